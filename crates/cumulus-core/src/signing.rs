//! Cloudinary request signing.
//!
//! Signature = hex(digest(sorted "key=value" pairs joined by "&" + api_secret)).
//! Parameters with empty values are excluded; list parameters must already
//! be serialized (eager transformations joined by `|`, tags by `,`). The
//! remote service re-derives the signature over the same canonical string,
//! so this must match the published algorithm exactly.

use std::collections::BTreeMap;

use sha1::{Digest, Sha1};
use sha2::Sha256;

use crate::config::SignatureAlgorithm;
use crate::error::{CloudinaryError, Result};

/// Build the canonical string-to-sign: sorted, empty values dropped.
pub fn string_to_sign(params: &BTreeMap<String, String>) -> String {
    params
        .iter()
        .filter(|(_, v)| !v.is_empty())
        .map(|(k, v)| format!("{}={}", k, v))
        .collect::<Vec<_>>()
        .join("&")
}

/// Sign a parameter set with the account secret.
///
/// Fails when the secret is empty rather than producing a signature the
/// remote service would reject.
pub fn sign_request(
    params: &BTreeMap<String, String>,
    api_secret: &str,
    algorithm: SignatureAlgorithm,
) -> Result<String> {
    if api_secret.is_empty() {
        return Err(CloudinaryError::Signing(
            "api_secret is not configured".to_string(),
        ));
    }

    let to_sign = format!("{}{}", string_to_sign(params), api_secret);
    let signature = match algorithm {
        SignatureAlgorithm::Sha1 => hex::encode(Sha1::digest(to_sign.as_bytes())),
        SignatureAlgorithm::Sha256 => hex::encode(Sha256::digest(to_sign.as_bytes())),
    };
    Ok(signature)
}

/// Serialize an eager transformation list for signing and form submission.
pub fn serialize_eager(eager: &[String]) -> String {
    eager.join("|")
}

/// Serialize a tag list for signing and form submission.
pub fn serialize_tags(tags: &[String]) -> String {
    tags.join(",")
}
