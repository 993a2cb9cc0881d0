use crate::models::ContentType;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, InsightError>;

#[derive(Debug, Error)]
pub enum InsightError {
    /// A field was present in the source but could not be parsed into its
    /// declared type. Indicates corrupt input; aborts the whole run.
    #[error("malformed field `{field}`: cannot parse {value:?} as {expected}")]
    MalformedField {
        field: &'static str,
        value: String,
        expected: &'static str,
    },

    /// A selection rule needs more distinct ranked entries than the profile
    /// holds. Scoped to one content type's synthesis.
    #[error("insufficient data for {content_type} {selection} selection: {detail}")]
    InsufficientData {
        content_type: ContentType,
        selection: &'static str,
        detail: String,
    },

    /// Synthesis was requested for a content type with no observed records.
    #[error("no records observed for content type {0}")]
    MissingProfile(ContentType),

    #[error("failed to read dataset: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid record on line {line}: {source}")]
    Record {
        line: usize,
        #[source]
        source: serde_json::Error,
    },
}
