pub mod asset;
pub mod signed_upload;
pub mod upload;

pub use asset::{
    Asset, AssetReference, DeleteAssetResponse, DeleteAssetsResponse, ListAssetsResponse,
    ListOptions, RenameResponse, ResourceType, UpdateOptions,
};
pub use signed_upload::{SignedUpload, SignedUploadOptions};
pub use upload::{UploadOptions, UploadResponse, UploadSource};
