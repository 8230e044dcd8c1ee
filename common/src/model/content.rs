use serde::{Deserialize, Serialize};

/// Result of running a piece of copy through the optimization pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentOptimization {
    pub original_content: String,
    pub optimized_content: String,
    pub improvements: Vec<String>,
    /// 0-100, as estimated by the model.
    pub seo_score: Option<f32>,
    /// 0-100, as estimated by the model.
    pub readability_score: Option<f32>,
}

/// A single market insight produced by the insights pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarketInsight {
    pub insight_type: String,
    pub title: String,
    pub description: String,
    pub confidence_score: f32,
    pub actionable_recommendations: Vec<String>,
}

/// Model-enriched description of one catalog product.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductDescription {
    pub title: String,
    pub short_description: String,
    pub long_description: String,
    pub key_points: Vec<String>,
    pub seo_keywords: Vec<String>,
}
