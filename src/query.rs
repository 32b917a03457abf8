//src/query.rs

use crate::error::{ParseError, Result};
use crate::tables::parse_locus_rows;
use crate::types::QueryRecord;

/// Header line naming the query input file.
const FILENAME_LINE: usize = 0;
/// First row of the query gene table; the line before it is the table title.
const TABLE_START: usize = 2;

/// Basename of the path embedded at the end of a line such as
/// `ClusterBlast scores for /data/run1/query.gbk`.
///
/// Everything after the last path separator is kept, spaces included. A line
/// without any separator falls back to its last whitespace-separated token.
pub fn embedded_basename(line: &str) -> &str {
    let line = line.trim_end();
    match line.rfind(['/', '\\']) {
        Some(idx) => &line[idx + 1..],
        None => line.split_whitespace().next_back().unwrap_or(""),
    }
}

/// Builds the query record from the non-blank lines of the header section.
pub fn build_query_record(header: &[&str]) -> Result<QueryRecord> {
    if header.len() < TABLE_START {
        return Err(ParseError::malformed(
            "query header",
            header.first().copied().unwrap_or(""),
            format!("expected at least {TABLE_START} header lines, found {}", header.len()),
        ));
    }

    let source_filename = embedded_basename(header[FILENAME_LINE]).to_string();
    let rows = parse_locus_rows(&header[TABLE_START..], "query gene table")?;

    log::debug!("Query {} has {} genes", source_filename, rows.len());

    Ok(QueryRecord { source_filename, rows })
}
