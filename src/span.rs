//src/span.rs

use crate::error::{ParseError, Result};
use crate::types::{LocusRow, OperonSpan, Strand};

/// First row holding the extreme value of `key`. `better(a, b)` is true when
/// `a` should replace the current best `b`; strict comparisons keep the first.
fn first_extreme<F, B>(rows: &[LocusRow], key: F, better: B) -> &LocusRow
where
    F: Fn(&LocusRow) -> i64,
    B: Fn(i64, i64) -> bool,
{
    let mut best = &rows[0];
    for row in &rows[1..] {
        if better(key(row), key(best)) {
            best = row;
        }
    }
    best
}

/// Most frequent strand; on a tie the strand seen first in the table wins.
pub fn dominant_strand(strands: &[Strand]) -> Option<Strand> {
    let first = *strands.first()?;
    let plus = strands.iter().filter(|&&s| s == Strand::Plus).count();
    let minus = strands.len() - plus;

    Some(if plus > minus {
        Strand::Plus
    } else if minus > plus {
        Strand::Minus
    } else {
        first
    })
}

/// Derives the operon span of a hit from its gene location rows.
///
/// Start and end follow the dominant strand: on `+` the span runs from the
/// smallest Start to the largest Stop, on `-` from the largest Start down to
/// the smallest Stop. `end_locus` is always picked by Start (largest Start on
/// `+`, smallest Start on `-`), not by Stop.
pub fn resolve(rows: &[LocusRow]) -> Result<OperonSpan> {
    if rows.is_empty() {
        return Err(ParseError::EmptyLocationTable);
    }

    let strands: Vec<Strand> = rows.iter().map(|row| row.strand).collect();
    let dominant = dominant_strand(&strands).ok_or(ParseError::EmptyLocationTable)?;

    let min_start = first_extreme(rows, |r| r.start, |a, b| a < b);
    let max_start = first_extreme(rows, |r| r.start, |a, b| a > b);
    let min_stop = rows.iter().map(|r| r.stop).min().unwrap_or(min_start.stop);
    let max_stop = rows.iter().map(|r| r.stop).max().unwrap_or(max_start.stop);

    let span = match dominant {
        Strand::Plus => OperonSpan {
            dominant_strand: dominant,
            operon_start: min_start.start,
            operon_end: max_stop,
            operon_length: max_stop - min_start.start,
            start_locus: min_start.locus.clone(),
            end_locus: max_start.locus.clone(),
        },
        Strand::Minus => OperonSpan {
            dominant_strand: dominant,
            operon_start: max_start.start,
            operon_end: min_stop,
            operon_length: max_start.start - min_stop,
            start_locus: max_start.locus.clone(),
            end_locus: min_start.locus.clone(),
        },
    };

    log::trace!(
        "Resolved span {}..{} ({}) on strand {}",
        span.operon_start,
        span.operon_end,
        span.operon_length,
        span.dominant_strand
    );
    Ok(span)
}
