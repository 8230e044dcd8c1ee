use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssetKind {
    Logo,
    Hero,
    Product,
    Icon,
    Favicon,
    /// Client-uploaded files of any other declared type.
    Image,
}

impl AssetKind {
    /// Parse the `asset_type` form field of the upload endpoint. Unknown
    /// labels become `Image` so uploads are never rejected on type alone.
    pub fn parse(s: &str) -> AssetKind {
        match s.to_lowercase().as_str() {
            "logo" => AssetKind::Logo,
            "hero" => AssetKind::Hero,
            "product" => AssetKind::Product,
            "icon" => AssetKind::Icon,
            "favicon" => AssetKind::Favicon,
            _ => AssetKind::Image,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            AssetKind::Logo => "logo",
            AssetKind::Hero => "hero",
            AssetKind::Product => "product",
            AssetKind::Icon => "icon",
            AssetKind::Favicon => "favicon",
            AssetKind::Image => "image",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

/// One generated or uploaded media file associated with a site.
///
/// Generated assets and client uploads share this shape; identity is the
/// `asset_id`, never the content.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssetRecord {
    pub asset_id: String,
    pub asset_type: AssetKind,
    pub url: String,
    pub alt_text: Option<String>,
    pub dimensions: Option<Dimensions>,
    pub file_size: Option<u64>,
}
