//! Signed Upload API operations: upload, rename, destroy.
//!
//! Every call here signs its parameter set with the account secret before
//! sending. The optional resize step runs first, off the async pool, and a
//! resize failure rejects the whole upload; the original bytes are never
//! sent in its place.

use std::collections::BTreeMap;
use std::path::Path;

use cumulus_core::error::{CloudinaryError, Result};
use cumulus_core::models::{
    DeleteAssetResponse, RenameResponse, ResourceType, UploadOptions, UploadResponse, UploadSource,
};
use cumulus_core::signing::sign_request;
use cumulus_processing::{resize_image, ResizeOptions};

use crate::CloudinaryGateway;

impl CloudinaryGateway {
    /// Upload a file from memory, optionally resizing images first.
    ///
    /// Resize options only apply when the declared content type is an
    /// image; for any other media type they are ignored and the buffer is
    /// streamed unchanged.
    pub async fn upload(
        &self,
        source: UploadSource,
        options: UploadOptions,
        resize: Option<ResizeOptions>,
    ) -> Result<UploadResponse> {
        let UploadSource {
            data,
            content_type,
            filename,
        } = source;

        let data = match resize {
            Some(resize_options) if content_type.starts_with("image/") => {
                let content_type = content_type.clone();
                // Decode/encode is CPU-bound; run off the async pool.
                tokio::task::spawn_blocking(move || {
                    resize_image(&data, &content_type, resize_options)
                })
                .await
                .map_err(|e| {
                    CloudinaryError::ImageProcessing(format!("Resize task failed: {}", e))
                })??
            }
            _ => data,
        };

        let resource_type = options.resource_type();
        let form_fields = self.signed_form_fields(options.to_form())?;

        let mut form = reqwest::multipart::Form::new();
        for (key, value) in form_fields {
            form = form.text(key, value);
        }
        let part = reqwest::multipart::Part::bytes(data)
            .file_name(filename.unwrap_or_else(|| "file".to_string()))
            .mime_str(&content_type)?;
        form = form.part("file", part);

        let request = self
            .http()
            .post(self.upload_api_url(resource_type, "upload"))
            .multipart(form);

        self.execute("upload", request).await
    }

    /// Upload a file directly from a local path. No resize step.
    pub async fn upload_from_path(
        &self,
        path: impl AsRef<Path>,
        options: UploadOptions,
    ) -> Result<UploadResponse> {
        let path = path.as_ref();
        let data = tokio::fs::read(path).await?;
        let filename = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("file")
            .to_string();

        let resource_type = options.resource_type();
        let form_fields = self.signed_form_fields(options.to_form())?;

        let mut form = reqwest::multipart::Form::new();
        for (key, value) in form_fields {
            form = form.text(key, value);
        }
        form = form.part(
            "file",
            reqwest::multipart::Part::bytes(data).file_name(filename),
        );

        let request = self
            .http()
            .post(self.upload_api_url(resource_type, "upload"))
            .multipart(form);

        self.execute("upload_from_path", request).await
    }

    /// Rename an asset, keeping its stored data.
    pub async fn rename_asset(
        &self,
        from_public_id: &str,
        to_public_id: &str,
        resource_type: ResourceType,
        overwrite: bool,
    ) -> Result<RenameResponse> {
        let mut params = Vec::new();
        params.push(("from_public_id", from_public_id.to_string()));
        params.push(("to_public_id", to_public_id.to_string()));
        if overwrite {
            params.push(("overwrite", "true".to_string()));
        }
        let form = self.signed_form_fields(params)?;

        let request = self
            .http()
            .post(self.upload_api_url(resource_type, "rename"))
            .form(&form);

        self.execute("rename_asset", request).await
    }

    /// Delete a single asset via the Upload API `destroy` action.
    pub async fn delete_asset(
        &self,
        public_id: &str,
        resource_type: ResourceType,
    ) -> Result<DeleteAssetResponse> {
        let params = vec![("public_id", public_id.to_string())];
        let form = self.signed_form_fields(params)?;

        let request = self
            .http()
            .post(self.upload_api_url(resource_type, "destroy"))
            .form(&form);

        self.execute("delete_asset", request).await
    }

    /// Sign a parameter set and return the full field list to submit:
    /// the caller's parameters plus timestamp, api_key, and signature.
    pub(crate) fn signed_form_fields(
        &self,
        params: Vec<(&'static str, String)>,
    ) -> Result<Vec<(&'static str, String)>> {
        let timestamp = chrono::Utc::now().timestamp();

        let mut to_sign: BTreeMap<String, String> = params
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect();
        to_sign.insert("timestamp".to_string(), timestamp.to_string());

        let config = self.config();
        let signature = sign_request(&to_sign, &config.api_secret, config.signature_algorithm)?;

        let mut fields = params;
        fields.push(("timestamp", timestamp.to_string()));
        fields.push(("api_key", config.api_key.clone()));
        fields.push(("signature", signature));
        Ok(fields)
    }
}
