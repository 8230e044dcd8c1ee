use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// The five named colors every generated site is themed with, as hex strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorScheme {
    pub primary: String,
    pub secondary: String,
    pub accent: String,
    pub background: String,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Typography {
    pub heading_font: String,
    pub body_font: String,
    /// Size-role name ("h1", "h2", "h3", "body") to CSS size string.
    pub font_sizes: HashMap<String, String>,
}

/// Complete generated brand identity for one business.
///
/// Produced once per generation request by the branding pipeline and then
/// only read by the structure pipeline, the asset pipeline and the site
/// builder. Nothing mutates it after creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BrandIdentity {
    pub logo_url: Option<String>,
    pub color_scheme: ColorScheme,
    pub typography: Typography,
    pub brand_voice: String,
    pub brand_values: Vec<String>,
    pub tagline: String,
}
