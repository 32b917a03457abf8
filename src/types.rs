//src/types.rs

use std::fmt;
use std::str::FromStr;

use crate::error::ParseError;

/// Column names of a gene location table (query cluster and hit clusters alike).
pub const LOCATION_COLUMNS: [&str; 6] = ["Locus", "Start", "Stop", "Strand", "Annotation", "Comment"];

/// Column names of the significant hits summary.
pub const SIGHIT_COLUMNS: [&str; 3] = ["Rank", "ID", "Description"];

/// Column names of a per-hit BLAST table.
pub const BLAST_COLUMNS: [&str; 6] = ["Query", "Subject", "PercID", "Score", "PercCoverage", "E-Value"];

/// Column names of the per-hit coordinate summary line.
pub const COORD_COLUMNS: [&str; 8] = [
    "Hit No",
    "ID",
    "Start Locus",
    "End Locus",
    "Start Index",
    "End Index",
    "Main Strand",
    "Source",
];

/// Genomic strand of a gene.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Strand {
    Plus,
    Minus,
}

impl FromStr for Strand {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "+" => Ok(Strand::Plus),
            "-" => Ok(Strand::Minus),
            other => Err(ParseError::UnrecognizedStrand {
                value: other.to_string(),
            }),
        }
    }
}

impl fmt::Display for Strand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Strand::Plus => f.write_str("+"),
            Strand::Minus => f.write_str("-"),
        }
    }
}

/// One row of a gene location table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocusRow {
    pub locus: String,
    pub start: i64,
    pub stop: i64,
    pub strand: Strand,
    pub annotation: String,
    pub comment: String,
}

/// The query cluster the report was generated against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryRecord {
    /// Basename of the input file named on the first line of the report
    pub source_filename: String,
    pub rows: Vec<LocusRow>,
}

/// One line of the "Significant hits" summary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SigHitRow {
    pub rank: u32,
    pub id: String,
    pub description: String,
}

/// Ranked summary of matches, in file order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SignificantHitTable {
    pub rows: Vec<SigHitRow>,
}

/// One row of a per-hit BLAST table:
///  query gene, subject gene, %identity, blast score, %coverage, e-value
#[derive(Debug, Clone, PartialEq)]
pub struct BlastRow {
    pub query: String,
    pub subject: String,
    pub percent_identity: f64,
    pub score: f64,
    pub percent_coverage: f64,
    pub evalue: f64,
}

/// Coordinates bounding all genes of a hit, oriented on the dominant strand.
///
/// On the minus strand `operon_start > operon_end`, so that start and end
/// always follow the 5'->3' direction of `dominant_strand`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperonSpan {
    pub dominant_strand: Strand,
    pub operon_start: i64,
    pub operon_end: i64,
    pub operon_length: i64,
    pub start_locus: String,
    pub end_locus: String,
}

/// One detailed match from the `Details:` section.
#[derive(Debug, Clone, PartialEq)]
pub struct HitRecord {
    pub rank: u32,
    pub id: String,
    /// Description of the matched cluster's origin ("Source:" line)
    pub source_description: String,
    /// Number of proteins with BLAST hits to the query cluster
    pub protein_count: u32,
    pub mgb_score: f64,
    pub cumulative_bitscore: f64,
    pub location_rows: Vec<LocusRow>,
    pub blast_rows: Vec<BlastRow>,
    pub span: OperonSpan,
}
