//! Signed direct-upload parameters.
//!
//! The full structure is handed to an untrusted client (typically a
//! browser) so it can POST straight to the service without ever seeing the
//! account secret. Every field is serialized even when empty because the
//! consuming client builds its request from the complete shape.

use serde::{Deserialize, Serialize};

/// Caller-supplied options, merged over fixed defaults (empty folder, no
/// eager transformations).
#[derive(Debug, Clone, Default)]
pub struct SignedUploadOptions {
    pub folder: Option<String>,
    pub eager: Option<Vec<String>>,
}

/// One-time-use authorization for a direct-to-cloud upload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignedUpload {
    /// Upload endpoint for the account and resource type.
    pub url: String,
    pub public_id: String,
    pub api_key: String,
    /// Unix seconds at signing time.
    pub timestamp: i64,
    pub eager: Vec<String>,
    pub folder: String,
    pub signature: String,
}
