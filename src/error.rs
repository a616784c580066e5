use thiserror::Error;

/// Errors returned by the recovery target client
#[derive(Debug, Error)]
pub enum SdkError {
    /// A target id that cannot be placed in a request path
    #[error("Invalid target id: {0:?}")]
    InvalidInput(String),

    /// The target is not present in the catalog
    #[error("No target exists with name: {0}")]
    NotFound(String),

    #[error(transparent)]
    Response(#[from] ResponseError),

    /// The request could not be sent or its body could not be read
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
}

/// The server answered, but not with something usable
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ResponseError {
    #[error("Response was not success (status {status}): {message}")]
    Unsuccessful { status: u16, message: String },

    #[error("Response received is empty or malformed: {reason}")]
    Malformed { reason: String },
}

impl ResponseError {
    pub(crate) fn malformed(reason: impl Into<String>) -> Self {
        ResponseError::Malformed {
            reason: reason.into(),
        }
    }
}

impl SdkError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, SdkError::NotFound(_))
    }

    pub fn is_response_error(&self) -> bool {
        matches!(self, SdkError::Response(_))
    }
}
