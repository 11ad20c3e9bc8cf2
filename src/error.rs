use serde::Serialize;
use thiserror::Error;

/// Reasons an uploaded table never reaches the scoring engine.
///
/// The `Display` text is what clients see in the `error` field.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum IngestError {
    #[error("Unsupported file format. Use CSV or Excel.")]
    UnsupportedFormat,

    #[error("Failed to read the file: {0}")]
    Read(String),

    #[error("Missing required column: {0}")]
    MissingColumn(String),

    #[error("Missing 'Team' column for team-based comparison.")]
    MissingTeamColumn,

    #[error("No file uploaded. Send the table as multipart field 'file'.")]
    MissingUpload,
}

impl IngestError {
    pub fn read(detail: impl std::fmt::Display) -> Self {
        IngestError::Read(detail.to_string())
    }
}

/// `{"error": "<message>"}` payload returned in place of results.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

impl From<&IngestError> for ErrorBody {
    fn from(err: &IngestError) -> Self {
        Self {
            error: err.to_string(),
        }
    }
}
