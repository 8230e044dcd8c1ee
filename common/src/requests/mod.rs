//! Request and response payloads for the generation service HTTP API.
//!
//! Validation beyond enum membership (which serde enforces on
//! deserialization) lives in `validate()` methods returning the first
//! violated constraint as text; handlers surface that text as a 400.

use crate::model::analysis::AnalysisReport;
use crate::model::asset::AssetRecord;
use crate::model::branding::BrandIdentity;
use crate::model::business::{Industry, StylePreference};
use crate::model::site::SiteStructure;
use serde::{Deserialize, Serialize};

fn check_len(field: &str, value: &str, min: usize, max: usize) -> Result<(), String> {
    let n = value.chars().count();
    if n < min || n > max {
        return Err(format!(
            "Le champ '{}' doit contenir entre {} et {} caractères",
            field, min, max
        ));
    }
    Ok(())
}

fn check_url(url: &str) -> Result<(), String> {
    if url.starts_with("http://") || url.starts_with("https://") {
        Ok(())
    } else {
        Err(format!("URL invalide: {}", url))
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct GenerateSiteRequest {
    pub user_id: String,
    pub business_name: String,
    pub industry: Industry,
    pub description: String,
    pub target_audience: String,
    #[serde(default)]
    pub competitor_urls: Vec<String>,
    #[serde(default)]
    pub style_preferences: Vec<StylePreference>,
    #[serde(default)]
    pub color_preferences: Vec<String>,
    #[serde(default)]
    pub features_required: Vec<String>,
    pub budget_range: Option<String>,
    pub launch_timeline: Option<String>,
}

impl GenerateSiteRequest {
    pub fn validate(&self) -> Result<(), String> {
        check_len("business_name", &self.business_name, 1, 100)?;
        check_len("description", &self.description, 10, 1000)?;
        check_len("target_audience", &self.target_audience, 5, 500)?;
        if self.competitor_urls.len() > 5 {
            return Err("5 URLs concurrentes au maximum".to_string());
        }
        for url in &self.competitor_urls {
            check_url(url)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct BrandingRequest {
    pub business_name: String,
    pub industry: Industry,
    #[serde(default)]
    pub style_preferences: Vec<StylePreference>,
    #[serde(default)]
    pub color_preferences: Vec<String>,
    pub brand_personality: Option<String>,
    pub target_demographic: Option<String>,
}

impl BrandingRequest {
    pub fn validate(&self) -> Result<(), String> {
        check_len("business_name", &self.business_name, 1, 100)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct AnalyzeContentRequest {
    pub url: String,
    #[serde(default = "default_analysis_type")]
    pub analysis_type: String,
    #[serde(default)]
    pub focus_areas: Vec<String>,
}

fn default_analysis_type() -> String {
    "complete".to_string()
}

impl AnalyzeContentRequest {
    pub fn validate(&self) -> Result<(), String> {
        check_url(&self.url)
    }
}

/// Form fields of `POST /optimize-content`.
#[derive(Debug, Clone, Deserialize)]
pub struct OptimizeContentForm {
    pub content: String,
    pub optimization_type: String,
    /// Comma-separated keyword list.
    pub target_keywords: Option<String>,
}

impl OptimizeContentForm {
    pub fn keywords(&self) -> Vec<String> {
        self.target_keywords
            .as_deref()
            .unwrap_or("")
            .split(',')
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty())
            .collect()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct GenerateSiteResponse {
    pub success: bool,
    pub site_id: String,
    pub preview_url: String,
    pub branding: BrandIdentity,
    pub structure: SiteStructure,
    pub assets: Vec<AssetRecord>,
    /// Seconds; a fixed estimate, not a measurement.
    pub estimated_completion_time: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct BrandingResponse {
    pub success: bool,
    pub branding: BrandIdentity,
}

#[derive(Debug, Clone, Serialize)]
pub struct AnalyzeContentResponse {
    pub success: bool,
    pub analysis: AnalysisReport,
    pub insights: Vec<String>,
    pub recommendations: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct UploadedAsset {
    pub filename: String,
    pub url: String,
    pub asset_type: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct UploadAssetsResponse {
    pub success: bool,
    pub assets: Vec<UploadedAsset>,
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_request() -> GenerateSiteRequest {
        GenerateSiteRequest {
            user_id: "u1".to_string(),
            business_name: "Café Luna".to_string(),
            industry: Industry::FoodBeverage,
            description: "Torréfacteur artisanal et salon de thé de quartier".to_string(),
            target_audience: "Jeunes urbains amateurs de café".to_string(),
            competitor_urls: vec![],
            style_preferences: vec![],
            color_preferences: vec![],
            features_required: vec![],
            budget_range: None,
            launch_timeline: None,
        }
    }

    #[test]
    fn accepts_valid_request() {
        assert!(base_request().validate().is_ok());
    }

    #[test]
    fn rejects_short_description() {
        let mut req = base_request();
        req.description = "trop court".chars().take(5).collect();
        assert!(req.validate().is_err());
    }

    #[test]
    fn rejects_bad_competitor_scheme() {
        let mut req = base_request();
        req.competitor_urls = vec!["ftp://example.com".to_string()];
        assert!(req.validate().is_err());
    }

    #[test]
    fn industry_labels_round_trip_serde() {
        for industry in Industry::ALL {
            let json = serde_json::to_string(&industry).unwrap();
            assert_eq!(json, format!("\"{}\"", industry.label()));
            let back: Industry = serde_json::from_str(&json).unwrap();
            assert_eq!(back, industry);
        }
    }

    #[test]
    fn unknown_industry_fails_deserialization() {
        assert!(serde_json::from_str::<Industry>("\"Aérospatiale\"").is_err());
    }

    #[test]
    fn keywords_split_and_trim() {
        let form = OptimizeContentForm {
            content: "texte".to_string(),
            optimization_type: "seo".to_string(),
            target_keywords: Some("café, bio , ,torréfaction".to_string()),
        };
        assert_eq!(form.keywords(), vec!["café", "bio", "torréfaction"]);
    }
}
