use thiserror::Error;

#[derive(Error, Debug)]
pub enum LedgerError {
    #[error("Malformed {kind} record: missing identity field '{field}'")]
    MissingIdentity {
        kind: &'static str,
        field: &'static str,
    },

    #[error("Malformed {kind} record '{label}': no usable timestamp")]
    MissingTimestamp { kind: &'static str, label: String },

    #[error("Unparseable timestamp '{0}': expected RFC 3339 or epoch milliseconds")]
    UnparseableTimestamp(String),

    #[error("Assignment from client '{client}' has no resolvable project id")]
    UnresolvableAssignment { client: String },

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, LedgerError>;
