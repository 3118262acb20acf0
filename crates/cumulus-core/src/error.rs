//! Error type shared by all gateway operations.
//!
//! Remote failures carry the HTTP status and the error message returned by
//! the Cloudinary API. Local failures (signing, image decode, config) get
//! their own variants so callers can distinguish the two classes.

use std::io;

#[derive(Debug, thiserror::Error)]
pub enum CloudinaryError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("HTTP transport error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Cloudinary API error ({http_status}): {message}")]
    Api { http_status: u16, message: String },

    #[error("Request signing error: {0}")]
    Signing(String),

    #[error("Image processing error: {0}")]
    ImageProcessing(String),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, CloudinaryError>;

impl CloudinaryError {
    /// True when the error originated on the remote side (transport or API),
    /// as opposed to a local computation failure.
    pub fn is_remote(&self) -> bool {
        matches!(self, CloudinaryError::Http(_) | CloudinaryError::Api { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_display() {
        let err = CloudinaryError::Api {
            http_status: 401,
            message: "Invalid Signature".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Cloudinary API error (401): Invalid Signature"
        );
        assert!(err.is_remote());
    }

    #[test]
    fn test_local_errors_are_not_remote() {
        assert!(!CloudinaryError::Signing("no secret".to_string()).is_remote());
        assert!(!CloudinaryError::ImageProcessing("corrupt".to_string()).is_remote());
        assert!(!CloudinaryError::Config("empty cloud name".to_string()).is_remote());
    }
}
