//! Asset models: references, admin responses, and per-operation options.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Cloudinary's classification of a stored asset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceType {
    #[default]
    Image,
    Video,
    Raw,
    /// Upload-time only: let the service detect the type.
    Auto,
}

impl ResourceType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceType::Image => "image",
            ResourceType::Video => "video",
            ResourceType::Raw => "raw",
            ResourceType::Auto => "auto",
        }
    }
}

impl std::fmt::Display for ResourceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Address of one remote asset. The authoritative state lives entirely in
/// the remote service; nothing is cached locally.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetReference {
    pub public_id: String,
    pub resource_type: ResourceType,
}

impl AssetReference {
    pub fn new(public_id: impl Into<String>, resource_type: ResourceType) -> Self {
        Self {
            public_id: public_id.into(),
            resource_type,
        }
    }

    pub fn image(public_id: impl Into<String>) -> Self {
        Self::new(public_id, ResourceType::Image)
    }

    pub fn video(public_id: impl Into<String>) -> Self {
        Self::new(public_id, ResourceType::Video)
    }
}

/// One stored asset as returned by the Admin API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Asset {
    pub public_id: String,
    #[serde(default)]
    pub resource_type: ResourceType,
    #[serde(default)]
    pub format: Option<String>,
    #[serde(default)]
    pub version: Option<u64>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub bytes: Option<u64>,
    #[serde(default)]
    pub width: Option<u32>,
    #[serde(default)]
    pub height: Option<u32>,
    #[serde(default)]
    pub folder: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub secure_url: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub context: Option<serde_json::Value>,
}

/// Admin API listing response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListAssetsResponse {
    #[serde(default)]
    pub resources: Vec<Asset>,
    #[serde(default)]
    pub next_cursor: Option<String>,
}

/// Bulk deletion response: per-identifier outcome, returned unmodified.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteAssetsResponse {
    #[serde(default)]
    pub deleted: BTreeMap<String, String>,
    #[serde(default)]
    pub partial: bool,
}

/// Single-asset destroy response from the Upload API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteAssetResponse {
    pub result: String,
}

/// Rename response (the asset under its new public id).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenameResponse {
    pub public_id: String,
    #[serde(default)]
    pub version: Option<u64>,
    #[serde(default)]
    pub format: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub secure_url: Option<String>,
}

/// Options for listing assets. Every field is optional; unset fields are
/// omitted from the request.
#[derive(Debug, Clone, Default)]
pub struct ListOptions {
    /// Maximum results per page (service default 10, maximum 500).
    pub max_results: Option<u32>,
    /// Cursor from a previous page.
    pub next_cursor: Option<String>,
    /// Restrict to public ids starting with this prefix.
    pub prefix: Option<String>,
    /// Include tag lists in the response.
    pub tags: bool,
    /// Include contextual metadata in the response.
    pub context: bool,
}

impl ListOptions {
    /// Render as query parameters.
    pub fn to_query(&self) -> Vec<(&'static str, String)> {
        let mut query = Vec::new();
        if let Some(max_results) = self.max_results {
            query.push(("max_results", max_results.to_string()));
        }
        if let Some(ref cursor) = self.next_cursor {
            query.push(("next_cursor", cursor.clone()));
        }
        if let Some(ref prefix) = self.prefix {
            query.push(("prefix", prefix.clone()));
        }
        if self.tags {
            query.push(("tags", "true".to_string()));
        }
        if self.context {
            query.push(("context", "true".to_string()));
        }
        query
    }
}

/// Options for updating a stored asset's metadata.
#[derive(Debug, Clone, Default)]
pub struct UpdateOptions {
    /// Replace the asset's tag list.
    pub tags: Option<Vec<String>>,
    /// Replace the asset's contextual metadata (key=value pairs).
    pub context: Option<BTreeMap<String, String>>,
}

impl UpdateOptions {
    /// Render as form fields in the service's serialization
    /// (tags comma-joined, context pipe-joined `key=value` pairs).
    pub fn to_form(&self) -> Vec<(&'static str, String)> {
        let mut form = Vec::new();
        if let Some(ref tags) = self.tags {
            form.push(("tags", tags.join(",")));
        }
        if let Some(ref context) = self.context {
            let serialized = context
                .iter()
                .map(|(k, v)| format!("{}={}", k, v))
                .collect::<Vec<_>>()
                .join("|");
            form.push(("context", serialized));
        }
        form
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resource_type_as_str() {
        assert_eq!(ResourceType::Image.as_str(), "image");
        assert_eq!(ResourceType::Video.as_str(), "video");
        assert_eq!(ResourceType::Raw.as_str(), "raw");
        assert_eq!(ResourceType::Auto.as_str(), "auto");
    }

    #[test]
    fn test_list_options_to_query() {
        let options = ListOptions {
            max_results: Some(50),
            next_cursor: Some("abc123".to_string()),
            prefix: Some("folder/".to_string()),
            tags: true,
            context: false,
        };
        let query = options.to_query();
        assert!(query.contains(&("max_results", "50".to_string())));
        assert!(query.contains(&("next_cursor", "abc123".to_string())));
        assert!(query.contains(&("prefix", "folder/".to_string())));
        assert!(query.contains(&("tags", "true".to_string())));
        assert!(!query.iter().any(|(k, _)| *k == "context"));
    }

    #[test]
    fn test_list_options_default_is_empty() {
        assert!(ListOptions::default().to_query().is_empty());
    }

    #[test]
    fn test_update_options_to_form() {
        let mut context = BTreeMap::new();
        context.insert("alt".to_string(), "A photo".to_string());
        context.insert("caption".to_string(), "Sunset".to_string());
        let options = UpdateOptions {
            tags: Some(vec!["a".to_string(), "b".to_string()]),
            context: Some(context),
        };
        let form = options.to_form();
        assert!(form.contains(&("tags", "a,b".to_string())));
        assert!(form.contains(&("context", "alt=A photo|caption=Sunset".to_string())));
    }

    #[test]
    fn test_asset_deserializes_sparse_response() {
        let json = r#"{"public_id":"sample","resource_type":"image"}"#;
        let asset: Asset = serde_json::from_str(json).unwrap();
        assert_eq!(asset.public_id, "sample");
        assert_eq!(asset.resource_type, ResourceType::Image);
        assert!(asset.tags.is_empty());
        assert!(asset.bytes.is_none());
    }

    #[test]
    fn test_delete_assets_response() {
        let json = r#"{"deleted":{"a":"deleted","b":"not_found"},"partial":false}"#;
        let response: DeleteAssetsResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.deleted.get("a").map(String::as_str), Some("deleted"));
        assert_eq!(response.deleted.get("b").map(String::as_str), Some("not_found"));
        assert!(!response.partial);
    }
}
