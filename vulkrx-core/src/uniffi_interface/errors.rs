use thiserror::Error as ThisError;
use uniffi::Error;

#[derive(Debug, ThisError, Error)]
#[non_exhaustive]
pub enum VulkrxError {
    #[error("error: {0}")]
    Common(String),
}

impl From<anyhow::Error> for VulkrxError {
    fn from(e: anyhow::Error) -> Self {
        VulkrxError::Common(format!("{:#}", e))
    }
}

impl From<String> for VulkrxError {
    fn from(s: String) -> Self {
        VulkrxError::Common(s)
    }
}

impl From<&str> for VulkrxError {
    fn from(s: &str) -> Self {
        VulkrxError::Common(s.to_string())
    }
}
