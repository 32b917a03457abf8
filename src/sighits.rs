//src/sighits.rs

use std::fmt;

use ahash::{AHashMap, AHashSet};

use crate::error::{ParseError, Result};
use crate::types::{HitRecord, SigHitRow, SignificantHitTable};

const CONTEXT: &str = "significant hits table";

fn is_separator(c: char) -> bool {
    c == '.' || c == '\t'
}

/// Byte offset where the hit ID ends: the first tab, or the first period not
/// followed by a digit (so versioned accessions such as `WP_012345.1` stay whole).
///
/// Without tabs a description that starts with a digit cannot be told apart
/// from a version suffix, so `3.WP_012345.1.5S rRNA cluster` finds no end and
/// the line is rejected as malformed.
fn id_end(rest: &str) -> Option<usize> {
    let mut chars = rest.char_indices().peekable();
    while let Some((i, c)) = chars.next() {
        let next_is_digit = chars.peek().is_some_and(|&(_, n)| n.is_ascii_digit());
        if c == '\t' || (c == '.' && !next_is_digit) {
            return Some(i);
        }
    }
    None
}

/// Parses one summary line of the form `<rank>.<tab><id>.<tab><description>`.
pub fn parse_sighit_line(line: &str) -> Result<SigHitRow> {
    let trimmed = line.trim().trim_end_matches('.');

    let (rank_str, rest) = trimmed
        .split_once(is_separator)
        .ok_or_else(|| ParseError::malformed(CONTEXT, line, "no rank separator"))?;
    let rank: u32 = rank_str
        .trim()
        .parse()
        .map_err(|_| ParseError::malformed(CONTEXT, line, format!("rank is not an integer: {rank_str:?}")))?;

    let rest = rest.trim_start_matches(|c: char| is_separator(c) || c == ' ');
    let end = id_end(rest).ok_or_else(|| ParseError::malformed(CONTEXT, line, "no description after hit ID"))?;

    let id = rest[..end].trim();
    if id.is_empty() {
        return Err(ParseError::malformed(CONTEXT, line, "empty hit ID"));
    }
    let description = rest[end + 1..]
        .trim_start_matches(|c: char| is_separator(c) || c == ' ')
        .trim();

    Ok(SigHitRow {
        rank,
        id: id.to_string(),
        description: description.to_string(),
    })
}

/// Builds the ranked summary table from the significant hits section, in file order.
pub fn build_sighit_table(lines: &[&str]) -> Result<SignificantHitTable> {
    let rows = lines
        .iter()
        .map(|line| parse_sighit_line(line))
        .collect::<Result<Vec<_>>>()?;
    Ok(SignificantHitTable { rows })
}

/// Disagreement between the significant hits summary and the detailed hits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RankMismatch {
    /// A detailed hit whose rank has no row in the summary
    MissingFromSummary { rank: u32, id: String },
    /// Summary and details name different IDs for the same rank
    IdMismatch {
        rank: u32,
        summary_id: String,
        hit_id: String,
    },
    /// More than one detailed hit carries this rank
    DuplicateRank { rank: u32 },
}

impl fmt::Display for RankMismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RankMismatch::MissingFromSummary { rank, id } => {
                write!(f, "hit {rank}. {id} is not listed in the significant hits")
            }
            RankMismatch::IdMismatch {
                rank,
                summary_id,
                hit_id,
            } => write!(f, "rank {rank} is {summary_id} in the significant hits but {hit_id} in the details"),
            RankMismatch::DuplicateRank { rank } => write!(f, "rank {rank} appears in more than one hit block"),
        }
    }
}

/// Cross-checks detailed hits against the summary. The parser never fails on
/// these, callers decide whether they matter.
pub fn check_rank_consistency(table: &SignificantHitTable, hits: &[HitRecord]) -> Vec<RankMismatch> {
    let summary: AHashMap<u32, &str> = table.rows.iter().map(|row| (row.rank, row.id.as_str())).collect();
    let mut seen: AHashSet<u32> = AHashSet::with_capacity(hits.len());
    let mut mismatches = Vec::new();

    for hit in hits {
        if !seen.insert(hit.rank) {
            mismatches.push(RankMismatch::DuplicateRank { rank: hit.rank });
        }
        match summary.get(&hit.rank) {
            None => mismatches.push(RankMismatch::MissingFromSummary {
                rank: hit.rank,
                id: hit.id.clone(),
            }),
            Some(&summary_id) if summary_id != hit.id => mismatches.push(RankMismatch::IdMismatch {
                rank: hit.rank,
                summary_id: summary_id.to_string(),
                hit_id: hit.id.clone(),
            }),
            Some(_) => {}
        }
    }
    mismatches
}
