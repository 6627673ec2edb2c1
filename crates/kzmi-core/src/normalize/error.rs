use thiserror::Error;

/// Failure while normalizing records. Only raised under [`super::UrlPolicy::Strict`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum NormalizeError {
    #[error("missing URL field `{field}`")]
    MissingField { field: String },

    #[error("URL field `{field}` is not a string")]
    NotAString { field: String },

    #[error("record {index}")]
    InRecord {
        index: usize,
        #[source]
        source: Box<NormalizeError>,
    },
}
