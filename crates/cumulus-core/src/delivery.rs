//! Delivery URL builder and media tag rendering.
//!
//! Builds Cloudinary delivery URLs of the form
//! `{base}/{resource_type}/upload/{transformation}/{public_id}` and the
//! HTML markup strings for image and video embedding. Local computation
//! only; no network calls.

use crate::config::CloudinaryConfig;
use crate::models::asset::ResourceType;

/// Fill behavior for a delivery-time transformation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CropMode {
    /// Resize preserving aspect ratio within the bounds.
    Fit,
    /// Resize to exact dimensions, cropping as needed.
    Fill,
    /// Scale to exact dimensions, ignoring aspect ratio.
    Scale,
    /// Resize only if larger than the bounds.
    Limit,
    /// Pad to exact dimensions.
    Pad,
}

impl CropMode {
    fn as_str(&self) -> &'static str {
        match self {
            CropMode::Fit => "fit",
            CropMode::Fill => "fill",
            CropMode::Scale => "scale",
            CropMode::Limit => "limit",
            CropMode::Pad => "pad",
        }
    }
}

/// Builder for one delivery-time transformation segment.
///
/// # Example
///
/// ```
/// use cumulus_core::delivery::{CropMode, Transformation};
///
/// let t = Transformation::new().width(800).height(600).crop(CropMode::Fill);
/// assert_eq!(t.render(), "c_fill,h_600,w_800");
/// ```
#[derive(Debug, Clone, Default)]
pub struct Transformation {
    width: Option<u32>,
    height: Option<u32>,
    crop: Option<CropMode>,
    quality: Option<String>,
    format: Option<String>,
    /// Named transformation preset.
    named: Option<String>,
}

impl Transformation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn width(mut self, width: u32) -> Self {
        self.width = Some(width);
        self
    }

    pub fn height(mut self, height: u32) -> Self {
        self.height = Some(height);
        self
    }

    pub fn crop(mut self, mode: CropMode) -> Self {
        self.crop = Some(mode);
        self
    }

    /// Quality: a number ("80") or "auto".
    pub fn quality(mut self, quality: impl Into<String>) -> Self {
        self.quality = Some(quality.into());
        self
    }

    /// Output format: "jpg", "webp", "auto", ...
    pub fn format(mut self, format: impl Into<String>) -> Self {
        self.format = Some(format.into());
        self
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.named = Some(name.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.width.is_none()
            && self.height.is_none()
            && self.crop.is_none()
            && self.quality.is_none()
            && self.format.is_none()
            && self.named.is_none()
    }

    /// Render the URL segment, parameters in the service's alphabetical
    /// convention (`c_fill,h_600,w_800`). Named presets render as `t_name`.
    pub fn render(&self) -> String {
        let mut parts = Vec::new();
        if let Some(ref named) = self.named {
            parts.push(format!("t_{}", named));
        }
        if let Some(crop) = self.crop {
            parts.push(format!("c_{}", crop.as_str()));
        }
        if let Some(ref format) = self.format {
            parts.push(format!("f_{}", format));
        }
        if let Some(height) = self.height {
            parts.push(format!("h_{}", height));
        }
        if let Some(ref quality) = self.quality {
            parts.push(format!("q_{}", quality));
        }
        if let Some(width) = self.width {
            parts.push(format!("w_{}", width));
        }
        parts.join(",")
    }
}

/// Build a delivery URL for an asset, with an optional transformation.
pub fn delivery_url(
    config: &CloudinaryConfig,
    public_id: &str,
    resource_type: ResourceType,
    transformation: Option<&Transformation>,
) -> String {
    let base = config.delivery_base_url();
    let encoded_id = encode_public_id(public_id);
    match transformation.filter(|t| !t.is_empty()) {
        Some(t) => format!(
            "{}/{}/upload/{}/{}",
            base,
            resource_type.as_str(),
            t.render(),
            encoded_id
        ),
        None => format!("{}/{}/upload/{}", base, resource_type.as_str(), encoded_id),
    }
}

// Public ids may contain folder slashes, which stay as path separators;
// everything else within each segment is percent-encoded.
fn encode_public_id(public_id: &str) -> String {
    public_id
        .split('/')
        .map(|segment| urlencoding::encode(segment).into_owned())
        .collect::<Vec<_>>()
        .join("/")
}

/// Render an `<img>` tag for an image asset.
pub fn image_tag(
    config: &CloudinaryConfig,
    public_id: &str,
    transformation: Option<&Transformation>,
    alt: Option<&str>,
) -> String {
    let src = delivery_url(config, public_id, ResourceType::Image, transformation);
    match alt {
        Some(alt) => format!("<img src=\"{}\" alt=\"{}\"/>", src, escape_attr(alt)),
        None => format!("<img src=\"{}\"/>", src),
    }
}

const VIDEO_SOURCE_FORMATS: [(&str, &str); 3] =
    [("webm", "video/webm"), ("mp4", "video/mp4"), ("ogv", "video/ogg")];

/// Render a `<video>` tag with one `<source>` per delivery format.
pub fn video_tag(
    config: &CloudinaryConfig,
    public_id: &str,
    transformation: Option<&Transformation>,
) -> String {
    let sources: String = VIDEO_SOURCE_FORMATS
        .iter()
        .map(|(ext, mime)| {
            let url = delivery_url(config, public_id, ResourceType::Video, transformation);
            format!("<source src=\"{}.{}\" type=\"{}\"/>", url, ext, mime)
        })
        .collect();
    format!("<video controls>{}</video>", sources)
}

fn escape_attr(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('"', "&quot;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CloudinaryConfig;

    fn config() -> CloudinaryConfig {
        CloudinaryConfig::new("demo", "key", "secret")
    }

    #[test]
    fn test_transformation_render() {
        let t = Transformation::new().width(800).height(600).crop(CropMode::Fill);
        assert_eq!(t.render(), "c_fill,h_600,w_800");

        let t = Transformation::new().width(400).quality("auto").format("webp");
        assert_eq!(t.render(), "f_webp,q_auto,w_400");

        let t = Transformation::new().named("thumbnail");
        assert_eq!(t.render(), "t_thumbnail");
    }

    #[test]
    fn test_delivery_url_without_transformation() {
        let url = delivery_url(&config(), "sample", ResourceType::Image, None);
        assert_eq!(url, "https://res.cloudinary.com/demo/image/upload/sample");
    }

    #[test]
    fn test_delivery_url_with_transformation() {
        let t = Transformation::new().width(800).crop(CropMode::Limit);
        let url = delivery_url(&config(), "photos/sunset", ResourceType::Image, Some(&t));
        assert_eq!(
            url,
            "https://res.cloudinary.com/demo/image/upload/c_limit,w_800/photos/sunset"
        );
    }

    #[test]
    fn test_delivery_url_empty_transformation_is_omitted() {
        let t = Transformation::new();
        let url = delivery_url(&config(), "sample", ResourceType::Image, Some(&t));
        assert_eq!(url, "https://res.cloudinary.com/demo/image/upload/sample");
    }

    #[test]
    fn test_delivery_url_video_resource() {
        let url = delivery_url(&config(), "clips/intro", ResourceType::Video, None);
        assert_eq!(url, "https://res.cloudinary.com/demo/video/upload/clips/intro");
    }

    #[test]
    fn test_delivery_url_encodes_special_characters() {
        let url = delivery_url(&config(), "folder/my photo", ResourceType::Image, None);
        assert_eq!(
            url,
            "https://res.cloudinary.com/demo/image/upload/folder/my%20photo"
        );
    }

    #[test]
    fn test_delivery_url_with_cname() {
        let config = config().with_cname("media.example.com");
        let url = delivery_url(&config, "sample", ResourceType::Image, None);
        assert_eq!(url, "https://media.example.com/image/upload/sample");
    }

    #[test]
    fn test_image_tag() {
        let tag = image_tag(&config(), "sample", None, Some("A sunset"));
        assert_eq!(
            tag,
            "<img src=\"https://res.cloudinary.com/demo/image/upload/sample\" alt=\"A sunset\"/>"
        );

        let tag = image_tag(&config(), "sample", None, None);
        assert!(!tag.contains("alt="));
    }

    #[test]
    fn test_image_tag_escapes_alt() {
        let tag = image_tag(&config(), "sample", None, Some("a \"quoted\" <name>"));
        assert!(tag.contains("alt=\"a &quot;quoted&quot; &lt;name&gt;\""));
    }

    #[test]
    fn test_video_tag_has_all_sources() {
        let tag = video_tag(&config(), "clips/intro", None);
        assert!(tag.starts_with("<video controls>"));
        assert!(tag.contains("clips/intro.webm\" type=\"video/webm\""));
        assert!(tag.contains("clips/intro.mp4\" type=\"video/mp4\""));
        assert!(tag.contains("clips/intro.ogv\" type=\"video/ogg\""));
        assert!(tag.ends_with("</video>"));
    }
}
