//src/error.rs

use thiserror::Error;

/// Everything that can go wrong while turning a MultiGeneBlast report into records.
#[derive(Debug, Error)]
pub enum ParseError {
    /// A delimiter pair bounding one of the three top-level sections is missing.
    #[error("section {section} not found")]
    SectionNotFound { section: &'static str },

    /// A line could not be split into the expected fields.
    #[error("malformed row in {context}: {reason} (line: {line:?})")]
    MalformedRow {
        context: &'static str,
        line: String,
        reason: String,
    },

    #[error("blast-hit table marker not found in hit block")]
    MarkerNotFound,

    #[error("unrecognized strand value {value:?}")]
    UnrecognizedStrand { value: String },

    #[error("hit block has an empty gene location table")]
    EmptyLocationTable,

    /// Wraps a hit-level failure with the 0-based index of its `>>` block.
    #[error("hit block {index}: {source}")]
    Hit {
        index: usize,
        #[source]
        source: Box<ParseError>,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ParseError {
    pub(crate) fn malformed(context: &'static str, line: &str, reason: impl Into<String>) -> Self {
        ParseError::MalformedRow {
            context,
            line: line.to_string(),
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ParseError>;
