// src/lib.rs
pub mod error;
pub mod types;
pub mod sections;
pub mod tables;
pub mod query;
pub mod sighits;
pub mod hit_record;
pub mod span;
pub mod report_file;

use std::fmt::Write as FmtWrite;
use std::path::Path;

pub use crate::error::{ParseError, Result};
pub use crate::types::{
    BlastRow, HitRecord, LocusRow, OperonSpan, QueryRecord, SigHitRow, SignificantHitTable, Strand,
};

use crate::hit_record::build_hit_record;
use crate::query::build_query_record;
use crate::sections::{divide_hit_blocks, split_sections};
use crate::sighits::build_sighit_table;
use crate::tables::write_table;
use crate::types::{BLAST_COLUMNS, COORD_COLUMNS, LOCATION_COLUMNS, SIGHIT_COLUMNS};

/// A fully parsed MultiGeneBlast report.
#[derive(Debug, Clone, PartialEq)]
pub struct MgbReport {
    pub query: QueryRecord,
    pub significant_hits: SignificantHitTable,
    /// Detailed hits in file (rank) order
    pub hits: Vec<HitRecord>,
}

/// A report whose hits were built independently, so that callers can skip
/// the ones that failed instead of giving up on the whole report.
#[derive(Debug)]
pub struct PartialReport {
    pub query: QueryRecord,
    pub significant_hits: SignificantHitTable,
    pub hits: Vec<Result<HitRecord>>,
}

impl PartialReport {
    /// Fails on the first broken hit, tagging it with its block index.
    pub fn into_report(self) -> Result<MgbReport> {
        let hits = self
            .hits
            .into_iter()
            .enumerate()
            .map(|(index, hit)| {
                hit.map_err(|source| ParseError::Hit {
                    index,
                    source: Box::new(source),
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(MgbReport {
            query: self.query,
            significant_hits: self.significant_hits,
            hits,
        })
    }
}

/// Parses the report, building every hit block on its own. Section-level
/// problems still fail the whole report.
pub fn parse_each_hit(report_text: &str) -> Result<PartialReport> {
    let sections = split_sections(report_text)?;

    let query = build_query_record(&sections.header)?;
    let significant_hits = build_sighit_table(&sections.sighits)?;

    let blocks = divide_hit_blocks(&sections.details);
    log::info!(
        "Query {} with {} significant hits and {} detailed hit blocks",
        query.source_filename,
        significant_hits.rows.len(),
        blocks.len()
    );

    let hits = blocks.iter().map(|block| build_hit_record(block)).collect();

    Ok(PartialReport {
        query,
        significant_hits,
        hits,
    })
}

/// Parses a MultiGeneBlast report into its query record, significant hits
/// table and detailed hits. Any malformed hit fails the whole parse.
pub fn parse(report_text: &str) -> Result<MgbReport> {
    parse_each_hit(report_text)?.into_report()
}

/// Reads (optionally gzipped) and parses a report file.
pub fn parse_report_file<P: AsRef<Path>>(path: P) -> Result<MgbReport> {
    let content = report_file::read_report(path)?;
    parse(&content)
}

impl MgbReport {
    /// Generate the query table text on demand
    pub fn get_query_table(&self) -> String {
        let mut output = String::new();
        writeln!(output, "Details of query sequence:{}", self.query.source_filename).unwrap();
        output.push_str(&write_table(
            &LOCATION_COLUMNS,
            self.query.rows.iter().map(LocusRow::to_line),
        ));
        output
    }

    /// Generate the significant hits table, limited to the first `max_rows` rows if given
    pub fn get_sighits_table(&self, max_rows: Option<usize>) -> String {
        let limit = max_rows.unwrap_or(usize::MAX);
        write_table(
            &SIGHIT_COLUMNS,
            self.significant_hits
                .rows
                .iter()
                .take(limit)
                .map(|row| format!("{}\t{}\t{}", row.rank, row.id, row.description)),
        )
    }
}

impl HitRecord {
    pub fn get_location_table(&self) -> String {
        write_table(&LOCATION_COLUMNS, self.location_rows.iter().map(LocusRow::to_line))
    }

    pub fn get_blast_table(&self) -> String {
        write_table(&BLAST_COLUMNS, self.blast_rows.iter().map(BlastRow::to_line))
    }

    /// Rank, ID, start locus, end locus, operon start, operon end, dominant strand, source
    pub fn get_coords_line(&self) -> String {
        format!(
            "{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}",
            self.rank,
            self.id,
            self.span.start_locus,
            self.span.end_locus,
            self.span.operon_start,
            self.span.operon_end,
            self.span.dominant_strand,
            self.source_description
        )
    }

    pub fn coords_header() -> String {
        COORD_COLUMNS.join("\t")
    }
}
