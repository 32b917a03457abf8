//src/sections.rs

use std::ops::Range;

use lazy_static::lazy_static;
use regex::Regex;

use crate::error::{ParseError, Result};

/// Line that opens every detailed hit block.
pub const HIT_SEPARATOR: &str = ">>";

/// The three top-level regions of a MultiGeneBlast report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    /// From the start of the report to "Significant hits:"
    Header,
    /// From "Significant hits:" to "Details:"
    SignificantHits,
    /// From "Details:" to the end of the report
    Details,
}

impl Section {
    pub fn name(self) -> &'static str {
        match self {
            Section::Header => "header",
            Section::SignificantHits => "significant hits",
            Section::Details => "details",
        }
    }

    fn pattern(self) -> &'static Regex {
        match self {
            Section::Header => &*HEADER_RE,
            Section::SignificantHits => &*SIGHITS_RE,
            Section::Details => &*DETAILS_RE,
        }
    }
}

lazy_static! {
    static ref HEADER_RE: Regex = Regex::new(r"(?s)\A(.*?)Significant hits:").unwrap();
    static ref SIGHITS_RE: Regex = Regex::new(r"(?s)Significant hits:(.*?)Details:").unwrap();
    static ref DETAILS_RE: Regex = Regex::new(r"(?s)Details:(.*?)\z").unwrap();
}

/// Non-blank lines of each section, borrowed from the report text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportSections<'a> {
    pub header: Vec<&'a str>,
    pub sighits: Vec<&'a str>,
    pub details: Vec<&'a str>,
}

/// Byte range of a section's body (delimiters excluded), if both delimiters are present.
pub fn section_span(text: &str, section: Section) -> Option<Range<usize>> {
    section
        .pattern()
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.range())
}

/// Splits a block into lines, dropping those that are empty or only whitespace.
pub fn non_blank_lines(block: &str) -> Vec<&str> {
    block.lines().filter(|line| !line.trim().is_empty()).collect()
}

fn extract<'a>(text: &'a str, section: Section) -> Result<Vec<&'a str>> {
    let span = section_span(text, section).ok_or(ParseError::SectionNotFound {
        section: section.name(),
    })?;
    Ok(non_blank_lines(&text[span]))
}

/// Locates the header, significant hits and details sections of a report.
pub fn split_sections(text: &str) -> Result<ReportSections<'_>> {
    let header = extract(text, Section::Header)?;
    let sighits = extract(text, Section::SignificantHits)?;
    let details = extract(text, Section::Details)?;

    log::debug!(
        "Split report into {} header, {} significant hit and {} detail lines",
        header.len(),
        sighits.len(),
        details.len()
    );

    Ok(ReportSections {
        header,
        sighits,
        details,
    })
}

/// Divides the details section into one block per `>>`-separated hit.
///
/// The separator lines themselves are not part of any block. A details
/// section without separators yields no blocks.
pub fn divide_hit_blocks<'a>(details: &[&'a str]) -> Vec<Vec<&'a str>> {
    let mut blocks: Vec<Vec<&'a str>> = Vec::new();
    let mut discarded = 0usize;

    for &line in details {
        if line == HIT_SEPARATOR {
            blocks.push(Vec::new());
        } else if let Some(block) = blocks.last_mut() {
            block.push(line);
        } else {
            discarded += 1;
        }
    }

    if discarded > 0 {
        log::debug!("Discarded {} detail line(s) before the first hit separator", discarded);
    }
    blocks
}
