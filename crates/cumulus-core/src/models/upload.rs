//! Upload input and response models.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::models::asset::ResourceType;
use crate::signing::{serialize_eager, serialize_tags};

/// One uploadable file: a byte buffer plus its declared media type.
/// Supplied per call by the caller and never persisted by the gateway.
#[derive(Debug, Clone)]
pub struct UploadSource {
    pub data: Vec<u8>,
    pub content_type: String,
    /// Filename hint forwarded to the service.
    pub filename: Option<String>,
}

impl UploadSource {
    pub fn new(data: Vec<u8>, content_type: impl Into<String>) -> Self {
        Self {
            data,
            content_type: content_type.into(),
            filename: None,
        }
    }

    pub fn with_filename(mut self, filename: impl Into<String>) -> Self {
        self.filename = Some(filename.into());
        self
    }

    pub fn is_image(&self) -> bool {
        self.content_type.starts_with("image/")
    }
}

/// Upload parameters. Each field maps to one vendor upload parameter; unset
/// fields are omitted from the request and from the signature.
#[derive(Debug, Clone, Default)]
pub struct UploadOptions {
    pub folder: Option<String>,
    pub public_id: Option<String>,
    pub tags: Option<Vec<String>>,
    /// Transformation applied to the asset at upload time (URL syntax,
    /// e.g. "w_800,c_limit").
    pub transformation: Option<String>,
    /// Transformations generated eagerly at upload time.
    pub eager: Option<Vec<String>>,
    pub resource_type: Option<ResourceType>,
    pub overwrite: Option<bool>,
    pub invalidate: Option<bool>,
    pub use_filename: Option<bool>,
    pub unique_filename: Option<bool>,
    /// Contextual metadata stored with the asset (key=value pairs).
    pub context: Option<BTreeMap<String, String>>,
}

impl UploadOptions {
    pub fn resource_type(&self) -> ResourceType {
        self.resource_type.unwrap_or(ResourceType::Image)
    }

    /// Render the signable form fields (everything except the file itself,
    /// the api key, and the signature).
    pub fn to_form(&self) -> Vec<(&'static str, String)> {
        let mut form = Vec::new();
        if let Some(ref folder) = self.folder {
            form.push(("folder", folder.clone()));
        }
        if let Some(ref public_id) = self.public_id {
            form.push(("public_id", public_id.clone()));
        }
        if let Some(ref tags) = self.tags {
            form.push(("tags", serialize_tags(tags)));
        }
        if let Some(ref transformation) = self.transformation {
            form.push(("transformation", transformation.clone()));
        }
        if let Some(ref eager) = self.eager {
            form.push(("eager", serialize_eager(eager)));
        }
        if let Some(overwrite) = self.overwrite {
            form.push(("overwrite", overwrite.to_string()));
        }
        if let Some(invalidate) = self.invalidate {
            form.push(("invalidate", invalidate.to_string()));
        }
        if let Some(use_filename) = self.use_filename {
            form.push(("use_filename", use_filename.to_string()));
        }
        if let Some(unique_filename) = self.unique_filename {
            form.push(("unique_filename", unique_filename.to_string()));
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

/// The service's upload response descriptor, returned to the caller as-is.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadResponse {
    pub public_id: String,
    #[serde(default)]
    pub version: Option<u64>,
    #[serde(default)]
    pub signature: Option<String>,
    #[serde(default)]
    pub width: Option<u32>,
    #[serde(default)]
    pub height: Option<u32>,
    #[serde(default)]
    pub format: Option<String>,
    #[serde(default)]
    pub resource_type: ResourceType,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub bytes: Option<u64>,
    #[serde(default)]
    pub etag: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub secure_url: Option<String>,
    #[serde(default)]
    pub folder: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub eager: Vec<serde_json::Value>,
}
