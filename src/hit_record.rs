//src/hit_record.rs

use lazy_static::lazy_static;
use regex::Regex;

use crate::error::{ParseError, Result};
use crate::span::resolve;
use crate::tables::{parse_blast_rows, parse_locus_rows};
use crate::types::HitRecord;

/// Line separating the gene location table from the BLAST hits table.
pub const BLAST_TABLE_MARKER: &str =
    "Table of Blast hits (query gene, subject gene, %identity, blast score, %coverage, e-value):";

// Field positions within a hit block (the `>>` line itself is not part of it).
const RANK_ID_LINE: usize = 0;
const SOURCE_LINE: usize = 1;
const PROTEIN_COUNT_LINE: usize = 2;
const MGB_SCORE_LINE: usize = 3;
const CUMULATIVE_BITSCORE_LINE: usize = 4;
// Line 5 is the title of the gene location table.
const LOCATION_TABLE_START: usize = 6;

const SOURCE_PREFIX: &str = "Source: ";

lazy_static! {
    static ref DECIMAL_RE: Regex = Regex::new(r"\d+\.?\d*").unwrap();
    static ref TRAILING_INT_RE: Regex = Regex::new(r"(\d+)\s*$").unwrap();
}

fn field_line<'a>(block: &[&'a str], index: usize, field: &'static str) -> Result<&'a str> {
    block.get(index).copied().ok_or_else(|| ParseError::MalformedRow {
        context: field,
        line: String::new(),
        reason: format!("hit block ends before line {index}"),
    })
}

/// Splits `"<rank>. <id>"` at its first period.
fn parse_rank_id(line: &str) -> Result<(u32, String)> {
    const CONTEXT: &str = "hit rank line";
    let (rank, id) = line
        .split_once('.')
        .ok_or_else(|| ParseError::malformed(CONTEXT, line, "expected \"<rank>. <id>\""))?;
    let rank = rank
        .trim()
        .parse()
        .map_err(|_| ParseError::malformed(CONTEXT, line, format!("rank is not an integer: {rank:?}")))?;
    let id = id.trim_start_matches(' ').to_string();
    if id.is_empty() {
        return Err(ParseError::malformed(CONTEXT, line, "empty hit ID"));
    }
    Ok((rank, id))
}

fn parse_source(line: &str) -> String {
    let line = line.strip_prefix(SOURCE_PREFIX).unwrap_or(line);
    line.trim_end_matches('.').to_string()
}

/// Trailing run of digits, e.g. `Number of proteins with BLAST hits to this cluster: 5`.
fn trailing_integer(line: &str, context: &'static str) -> Result<u32> {
    TRAILING_INT_RE
        .captures(line)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse().ok())
        .ok_or_else(|| ParseError::malformed(context, line, "no trailing integer"))
}

/// First decimal-looking token, e.g. `MultiGeneBlast score: 5.82`.
pub fn first_decimal(line: &str, context: &'static str) -> Result<f64> {
    DECIMAL_RE
        .find(line)
        .and_then(|m| m.as_str().parse().ok())
        .ok_or_else(|| ParseError::malformed(context, line, "no numeric value"))
}

/// Builds one hit record from a `>>`-delimited block. Fields are positional;
/// the only searched line is the BLAST table marker.
pub fn build_hit_record(block: &[&str]) -> Result<HitRecord> {
    let marker = block
        .iter()
        .position(|line| *line == BLAST_TABLE_MARKER)
        .ok_or(ParseError::MarkerNotFound)?;

    let (rank, id) = parse_rank_id(field_line(block, RANK_ID_LINE, "hit rank line")?)?;
    let source_description = parse_source(field_line(block, SOURCE_LINE, "hit source line")?);
    let protein_count = trailing_integer(
        field_line(block, PROTEIN_COUNT_LINE, "protein count line")?,
        "protein count line",
    )?;
    let mgb_score = first_decimal(field_line(block, MGB_SCORE_LINE, "MGB score line")?, "MGB score line")?;
    let cumulative_bitscore = first_decimal(
        field_line(block, CUMULATIVE_BITSCORE_LINE, "cumulative bit score line")?,
        "cumulative bit score line",
    )?;

    if marker <= LOCATION_TABLE_START {
        return Err(ParseError::EmptyLocationTable);
    }
    let location_rows = parse_locus_rows(&block[LOCATION_TABLE_START..marker], "gene location table")?;
    let blast_rows = parse_blast_rows(&block[marker + 1..])?;
    let span = resolve(&location_rows)?;

    log::debug!(
        "Hit {}. {}: {} genes, {} blast hits, span {}..{} ({})",
        rank,
        id,
        location_rows.len(),
        blast_rows.len(),
        span.operon_start,
        span.operon_end,
        span.dominant_strand
    );

    Ok(HitRecord {
        rank,
        id,
        source_description,
        protein_count,
        mgb_score,
        cumulative_bitscore,
        location_rows,
        blast_rows,
        span,
    })
}
