//! Cloudinary gateway.
//!
//! One `CloudinaryGateway` wraps a configured account and a shared HTTP
//! client. All upload, administration, and URL-generation operations hang
//! off it; each performs at most one outbound call (or one local
//! computation) and surfaces the remote error descriptor on failure. The
//! gateway is `Clone` and safe for concurrent use: nothing mutates shared
//! state after construction.

pub mod admin;
pub mod signed;
pub mod upload;

use std::sync::Arc;
use std::time::{Duration, Instant};

use serde::de::DeserializeOwned;
use serde::Deserialize;

use cumulus_core::config::CloudinaryConfig;
use cumulus_core::delivery;
use cumulus_core::error::Result;
use cumulus_core::models::ResourceType;

const HTTP_TIMEOUT: Duration = Duration::from_secs(60);

/// Error body shape returned by the Cloudinary API.
#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    error: ApiErrorMessage,
}

#[derive(Debug, Deserialize)]
struct ApiErrorMessage {
    message: String,
}

/// Gateway to one Cloudinary account.
#[derive(Clone, Debug)]
pub struct CloudinaryGateway {
    config: Arc<CloudinaryConfig>,
    client: reqwest::Client,
}

impl CloudinaryGateway {
    /// Build a gateway from a validated configuration.
    pub fn new(config: CloudinaryConfig) -> Result<Self> {
        config.validate()?;
        Self::with_config(config)
    }

    /// Build a gateway from the environment (`CLOUDINARY_URL` or the
    /// discrete `CLOUDINARY_*` variables).
    pub fn from_env() -> Result<Self> {
        Self::with_config(CloudinaryConfig::from_env()?)
    }

    fn with_config(config: CloudinaryConfig) -> Result<Self> {
        let client = reqwest::Client::builder().timeout(HTTP_TIMEOUT).build()?;
        Ok(Self {
            config: Arc::new(config),
            client,
        })
    }

    pub fn config(&self) -> &CloudinaryConfig {
        &self.config
    }

    pub(crate) fn http(&self) -> &reqwest::Client {
        &self.client
    }

    /// Upload API endpoint for an operation and resource type, e.g.
    /// `https://api.cloudinary.com/v1_1/demo/image/upload`.
    pub(crate) fn upload_api_url(&self, resource_type: ResourceType, action: &str) -> String {
        format!(
            "{}/{}/{}",
            self.config.api_base_url(),
            resource_type.as_str(),
            action
        )
    }

    /// Admin API endpoint under `/resources`.
    pub(crate) fn admin_api_url(&self, path: &str) -> String {
        format!("{}/{}", self.config.api_base_url(), path)
    }

    // Public ids may contain folder slashes that stay as path separators.
    pub(crate) fn encode_public_id(public_id: &str) -> String {
        public_id
            .split('/')
            .map(|segment| urlencoding::encode(segment).into_owned())
            .collect::<Vec<_>>()
            .join("/")
    }

    /// Send a request and decode the JSON response. All remote failures are
    /// logged at error severity here, the single boundary to the service.
    pub(crate) async fn execute<T: DeserializeOwned>(
        &self,
        operation: &'static str,
        request: reqwest::RequestBuilder,
    ) -> Result<T> {
        let start = Instant::now();

        let response = request.send().await.map_err(|e| {
            tracing::error!(operation, error = %e, "Cloudinary request failed");
            CloudinaryError::Http(e)
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ApiErrorBody>(&body)
                .map(|e| e.error.message)
                .unwrap_or(body);
            tracing::error!(
                operation,
                http_status = status.as_u16(),
                error = %message,
                duration_ms = start.elapsed().as_secs_f64() * 1000.0,
                "Cloudinary API request failed"
            );
            return Err(CloudinaryError::Api {
                http_status: status.as_u16(),
                message,
            });
        }

        let value = response.json::<T>().await?;

        tracing::info!(
            operation,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Cloudinary request succeeded"
        );

        Ok(value)
    }

    /// Build a delivery URL for an asset with an optional transformation.
    /// Local computation only.
    pub fn transformed_url(
        &self,
        public_id: &str,
        resource_type: ResourceType,
        transformation: Option<&Transformation>,
    ) -> String {
        delivery::delivery_url(&self.config, public_id, resource_type, transformation)
    }

    /// Render an `<img>` tag for an image asset.
    pub fn image_tag(
        &self,
        public_id: &str,
        transformation: Option<&Transformation>,
        alt: Option<&str>,
    ) -> String {
        delivery::image_tag(&self.config, public_id, transformation, alt)
    }

    /// Render a `<video>` tag for a video asset.
    pub fn video_tag(&self, public_id: &str, transformation: Option<&Transformation>) -> String {
        delivery::video_tag(&self.config, public_id, transformation)
    }
}

pub use cumulus_core::config::SignatureAlgorithm;
pub use cumulus_core::delivery::{CropMode, Transformation};
pub use cumulus_core::models::{
    Asset, AssetReference, DeleteAssetResponse, DeleteAssetsResponse, ListAssetsResponse,
    ListOptions, RenameResponse, SignedUpload, SignedUploadOptions, UpdateOptions, UploadOptions,
    UploadResponse, UploadSource,
};
pub use cumulus_core::{CloudinaryConfig as Config, CloudinaryError, Result as GatewayResult};
pub use cumulus_processing::{Fit, ResizeOptions};

#[cfg(test)]
mod tests {
    use super::*;

    fn gateway() -> CloudinaryGateway {
        CloudinaryGateway::new(CloudinaryConfig::new("demo", "key", "secret")).unwrap()
    }

    #[test]
    fn test_new_rejects_invalid_config() {
        assert!(CloudinaryGateway::new(CloudinaryConfig::new("", "key", "secret")).is_err());
    }

    #[test]
    fn test_upload_api_url() {
        let gateway = gateway();
        assert_eq!(
            gateway.upload_api_url(ResourceType::Image, "upload"),
            "https://api.cloudinary.com/v1_1/demo/image/upload"
        );
        assert_eq!(
            gateway.upload_api_url(ResourceType::Video, "rename"),
            "https://api.cloudinary.com/v1_1/demo/video/rename"
        );
    }

    #[test]
    fn test_encode_public_id_keeps_folder_slashes() {
        assert_eq!(
            CloudinaryGateway::encode_public_id("folder/my photo"),
            "folder/my%20photo"
        );
        assert_eq!(CloudinaryGateway::encode_public_id("plain"), "plain");
    }

    #[test]
    fn test_transformed_url_delegates_to_delivery() {
        let gateway = gateway();
        let t = Transformation::new().width(400);
        assert_eq!(
            gateway.transformed_url("sample", ResourceType::Image, Some(&t)),
            "https://res.cloudinary.com/demo/image/upload/w_400/sample"
        );
    }

    #[test]
    fn test_gateway_is_cheaply_cloneable() {
        let gateway = gateway();
        let clone = gateway.clone();
        assert_eq!(clone.config().cloud_name, "demo");
    }
}
