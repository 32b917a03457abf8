//src/tables.rs

use std::fmt::Write as FmtWrite;

use crate::error::{ParseError, Result};
use crate::types::{BlastRow, LocusRow, Strand};

/// Splits a tab-separated row after removing the trailing tab(s) the report
/// writes at the end of every table line.
pub fn split_row(line: &str) -> Vec<&str> {
    line.trim_end_matches('\t').split('\t').collect()
}

fn parse_field<T: std::str::FromStr>(
    value: &str,
    column: &str,
    context: &'static str,
    line: &str,
) -> Result<T> {
    value
        .trim()
        .parse()
        .map_err(|_| ParseError::malformed(context, line, format!("{column} is not a number: {value:?}")))
}

/// Parses one gene location row: `Locus, Start, Stop, Strand[, Annotation[, Comment]]`.
/// Strand must be `+` or `-`.
pub fn parse_locus_row(line: &str, context: &'static str) -> Result<LocusRow> {
    let fields = split_row(line);
    if !(4..=6).contains(&fields.len()) {
        return Err(ParseError::malformed(
            context,
            line,
            format!("expected 4 to 6 tab-separated fields, found {}", fields.len()),
        ));
    }

    Ok(LocusRow {
        locus: fields[0].to_string(),
        start: parse_field(fields[1], "Start", context, line)?,
        stop: parse_field(fields[2], "Stop", context, line)?,
        strand: fields[3].parse::<Strand>()?,
        annotation: fields.get(4).map(|s| s.to_string()).unwrap_or_default(),
        comment: fields.get(5).map(|s| s.to_string()).unwrap_or_default(),
    })
}

pub fn parse_locus_rows(lines: &[&str], context: &'static str) -> Result<Vec<LocusRow>> {
    lines.iter().map(|line| parse_locus_row(line, context)).collect()
}

/// Parses one BLAST row: query gene, subject gene, %identity, score, %coverage, e-value.
pub fn parse_blast_row(line: &str) -> Result<BlastRow> {
    const CONTEXT: &str = "blast-hit table";
    let fields = split_row(line);
    if fields.len() != 6 {
        return Err(ParseError::malformed(
            CONTEXT,
            line,
            format!("expected 6 tab-separated fields, found {}", fields.len()),
        ));
    }

    Ok(BlastRow {
        query: fields[0].to_string(),
        subject: fields[1].to_string(),
        percent_identity: parse_field(fields[2], "PercID", CONTEXT, line)?,
        score: parse_field(fields[3], "Score", CONTEXT, line)?,
        percent_coverage: parse_field(fields[4], "PercCoverage", CONTEXT, line)?,
        evalue: parse_field(fields[5], "E-Value", CONTEXT, line)?,
    })
}

pub fn parse_blast_rows(lines: &[&str]) -> Result<Vec<BlastRow>> {
    lines.iter().map(|line| parse_blast_row(line)).collect()
}

impl LocusRow {
    /// Renders the row as a tab-separated line (no trailing newline).
    pub fn to_line(&self) -> String {
        format!(
            "{}\t{}\t{}\t{}\t{}\t{}",
            self.locus, self.start, self.stop, self.strand, self.annotation, self.comment
        )
    }
}

impl BlastRow {
    pub fn to_line(&self) -> String {
        format!(
            "{}\t{}\t{}\t{}\t{}\t{}",
            self.query, self.subject, self.percent_identity, self.score, self.percent_coverage, self.evalue
        )
    }
}

/// Writes a header row followed by one line per record.
pub fn write_table<I>(columns: &[&str], lines: I) -> String
where
    I: IntoIterator<Item = String>,
{
    let mut output = String::new();
    writeln!(output, "{}", columns.join("\t")).unwrap();
    for line in lines {
        writeln!(output, "{}", line).unwrap();
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_locus_row_with_trailing_tab() {
        let row = parse_locus_row("SCO0001\t100\t1200\t-\tputative kinase\tnote\t", "test").expect("row");
        assert_eq!(row.locus, "SCO0001");
        assert_eq!(row.start, 100);
        assert_eq!(row.stop, 1200);
        assert_eq!(row.strand, Strand::Minus);
        assert_eq!(row.annotation, "putative kinase");
        assert_eq!(row.comment, "note");
    }

    #[test]
    fn test_parse_locus_row_blank_trailing_columns() {
        let row = parse_locus_row("orf1\t5\t50\t+\t\t", "test").expect("row");
        assert_eq!(row.annotation, "");
        assert_eq!(row.comment, "");
    }

    #[test]
    fn test_parse_locus_row_rejects_bad_rows() {
        let err = parse_locus_row("orf1\tfive\t50\t+\tannot", "test").unwrap_err();
        assert!(matches!(err, ParseError::MalformedRow { .. }));
        assert!(err.to_string().contains("Start"), "got: {err}");

        let err = parse_locus_row("orf1\t5", "test").unwrap_err();
        assert!(matches!(err, ParseError::MalformedRow { .. }));
    }

    #[test]
    fn test_parse_locus_row_rejects_unknown_strand() {
        match parse_locus_row("orf1\t5\t50\t?\tannot\t", "test") {
            Err(ParseError::UnrecognizedStrand { value }) => assert_eq!(value, "?"),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_locus_row_to_line_reparses() {
        let rows = vec![
            parse_locus_row("a\t1\t9\t+\tannot\t", "test").expect("row"),
            parse_locus_row("b\t20\t30\t-\t\tcomment", "test").expect("row"),
        ];
        let lines: Vec<String> = rows.iter().map(LocusRow::to_line).collect();
        let refs: Vec<&str> = lines.iter().map(String::as_str).collect();
        assert_eq!(parse_locus_rows(&refs, "test").expect("rows"), rows);
    }

    #[test]
    fn test_parse_blast_row() {
        let row = parse_blast_row("query_1\tSCO0001\t45\t310\t98.5\t1.2e-50\t").expect("row");
        assert_eq!(row.query, "query_1");
        assert_eq!(row.subject, "SCO0001");
        assert_eq!(row.percent_identity, 45.0);
        assert_eq!(row.score, 310.0);
        assert_eq!(row.percent_coverage, 98.5);
        assert_eq!(row.evalue, 1.2e-50);

        assert!(parse_blast_row("q\ts\t45\t310\t98.5").is_err());
    }

    #[test]
    fn test_write_table() {
        let text = write_table(&["A", "B"], vec!["1\t2".to_string()]);
        assert_eq!(text, "A\tB\n1\t2\n");
    }
}
