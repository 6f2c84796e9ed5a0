use reqwest::StatusCode;
use thiserror::Error;

/// Failure taxonomy for loading, editing, and exporting reservation tables.
///
/// Individual date cells that fail to parse are not represented here: they
/// are downgraded to the missing marker and counted in the sanitize report
/// so a single bad cell never invalidates its row.
#[derive(Debug, Error)]
pub enum TableError {
    /// The delimited text could not be read into a consistent table. Fatal
    /// for the load; the caller must re-supply the source.
    #[error("malformed input: {0}")]
    MalformedInput(String),

    /// None of the required identifying columns exist in the header. Fatal
    /// for the load; the caller must prompt for a different input.
    #[error("no matching schema: none of the required columns {required:?} are present")]
    NoMatchingSchema { required: Vec<String> },

    /// Remote fetch or webhook delivery failed in transit. Retryable; the
    /// in-memory working set is unaffected.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The webhook endpoint answered with a non-success status.
    #[error("webhook rejected export: HTTP {0}")]
    WebhookStatus(StatusCode),

    #[error("invalid source url: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// An intake entry named a column the working set does not have.
    #[error("unknown column: {0}")]
    UnknownColumn(String),

    #[error("invalid config: {0}")]
    InvalidConfig(#[from] serde_yaml::Error),

    #[error("invalid junk token pattern: {0}")]
    InvalidPattern(#[from] regex::Error),

    #[error("csv write error: {0}")]
    Csv(#[from] csv::Error),

    #[error("json encode error: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
