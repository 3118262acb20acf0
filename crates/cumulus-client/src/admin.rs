//! Admin API operations: ping, get, list, update, bulk delete.
//!
//! Admin calls authenticate with HTTP basic auth (api_key:api_secret)
//! instead of a per-request signature.

use cumulus_core::error::Result;
use cumulus_core::models::{
    Asset, AssetReference, DeleteAssetsResponse, ListAssetsResponse, ListOptions, ResourceType,
    UpdateOptions,
};

use crate::CloudinaryGateway;

impl CloudinaryGateway {
    /// Fire a liveness probe against the account.
    ///
    /// Diagnostic only: the outcome is reported through the log, and a
    /// failed ping never surfaces as an error to the caller. Sends
    /// directly rather than through the shared request path, which logs
    /// failures at error severity; a failed ping warrants one warn line.
    pub async fn ping(&self) {
        let request = self.admin_request(self.admin_api_url("ping"));
        match request.send().await {
            Ok(response) if response.status().is_success() => {
                tracing::info!(
                    http_status = response.status().as_u16(),
                    "Cloudinary ping succeeded"
                );
            }
            Ok(response) => {
                tracing::warn!(
                    http_status = response.status().as_u16(),
                    "Cloudinary ping failed"
                );
            }
            Err(e) => {
                tracing::warn!(error = %e, "Cloudinary ping failed");
            }
        }
    }

    /// Fetch the stored details of one asset.
    pub async fn get_asset(&self, asset: &AssetReference) -> Result<Asset> {
        let url = self.admin_api_url(&format!(
            "resources/{}/upload/{}",
            asset.resource_type.as_str(),
            Self::encode_public_id(&asset.public_id)
        ));
        let request = self.admin_request(url);
        self.execute("get_asset", request).await
    }

    /// List stored assets of one resource type, one page at a time.
    pub async fn list_assets(
        &self,
        resource_type: ResourceType,
        options: &ListOptions,
    ) -> Result<ListAssetsResponse> {
        let url = self.admin_api_url(&format!("resources/{}", resource_type.as_str()));
        let request = self.admin_request(url).query(&options.to_query());
        self.execute("list_assets", request).await
    }

    /// Delete up to 100 assets by public id. The per-identifier outcome map
    /// from the service is returned unmodified.
    pub async fn delete_assets(
        &self,
        public_ids: &[String],
        resource_type: ResourceType,
    ) -> Result<DeleteAssetsResponse> {
        let url = self.admin_api_url(&format!("resources/{}/upload", resource_type.as_str()));
        let query: Vec<(&str, &str)> = public_ids
            .iter()
            .map(|id| ("public_ids[]", id.as_str()))
            .collect();
        let config = self.config();
        let request = self
            .http()
            .delete(url)
            .basic_auth(&config.api_key, Some(&config.api_secret))
            .query(&query);
        self.execute("delete_assets", request).await
    }

    /// Replace an asset's tags and contextual metadata.
    pub async fn update_asset(
        &self,
        asset: &AssetReference,
        options: &UpdateOptions,
    ) -> Result<Asset> {
        let url = self.admin_api_url(&format!(
            "resources/{}/upload/{}",
            asset.resource_type.as_str(),
            Self::encode_public_id(&asset.public_id)
        ));
        let config = self.config();
        let request = self
            .http()
            .post(url)
            .basic_auth(&config.api_key, Some(&config.api_secret))
            .form(&options.to_form());
        self.execute("update_asset", request).await
    }

    fn admin_request(&self, url: String) -> reqwest::RequestBuilder {
        let config = self.config();
        self.http()
            .get(url)
            .basic_auth(&config.api_key, Some(&config.api_secret))
    }
}
