//! Signed direct-upload construction.
//!
//! Builds everything an untrusted client needs to POST a file straight to
//! the service: endpoint URL, public parameters, and a signature computed
//! locally from the account secret. No network call is made here.

use std::collections::BTreeMap;

use cumulus_core::error::Result;
use cumulus_core::models::{ResourceType, SignedUpload, SignedUploadOptions};
use cumulus_core::signing::{self, sign_request};

use crate::CloudinaryGateway;

impl CloudinaryGateway {
    /// Produce a one-time-use signed upload authorization.
    ///
    /// The signature covers the timestamp, public id, folder, and eager
    /// list; the receiving service recomputes it from the same fields, so
    /// every covered field is returned even when empty.
    pub fn signed_upload(
        &self,
        public_id: &str,
        resource_type: ResourceType,
        options: SignedUploadOptions,
    ) -> Result<SignedUpload> {
        let timestamp = chrono::Utc::now().timestamp();
        let folder = options.folder.unwrap_or_default();
        let eager = options.eager.unwrap_or_default();

        let mut params = BTreeMap::new();
        params.insert("timestamp".to_string(), timestamp.to_string());
        params.insert("public_id".to_string(), public_id.to_string());
        params.insert("folder".to_string(), folder.clone());
        params.insert("eager".to_string(), signing::serialize_eager(&eager));

        let config = self.config();
        let signature = sign_request(&params, &config.api_secret, config.signature_algorithm)?;

        Ok(SignedUpload {
            url: self.upload_api_url(resource_type, "upload"),
            public_id: public_id.to_string(),
            api_key: config.api_key.clone(),
            timestamp,
            eager,
            folder,
            signature,
        })
    }
}
