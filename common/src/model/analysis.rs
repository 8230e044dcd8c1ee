use serde::{Deserialize, Serialize};

/// Raw extraction from a fetched competitor page.
///
/// Everything here comes straight out of the markup; no model call is
/// involved. Link URLs are already resolved against the page's base URL.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PageExtract {
    pub title: String,
    pub meta_description: String,
    pub h1: Vec<String>,
    pub h2: Vec<String>,
    pub h3: Vec<String>,
    pub main_content: String,
    pub links: Vec<String>,
    pub images: Vec<PageImage>,
    pub json_ld: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageImage {
    pub src: String,
    pub alt: Option<String>,
}

/// Design-oriented signals read from the markup and inline styles.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DesignSignals {
    /// Up to 10 hex colors found in inline styles and stylesheets.
    pub colors: Vec<String>,
    /// Up to 5 font family names (Google Fonts links and font-family rules).
    pub fonts: Vec<String>,
    pub has_header: bool,
    pub has_footer: bool,
    pub has_sidebar: bool,
    pub has_nav: bool,
    pub uses_grid: bool,
    pub uses_flex: bool,
    /// Viewport meta tag, responsive class patterns or `@media` usage.
    pub responsive_indicators: bool,
}

/// SEO-oriented signals derived from the extraction.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SeoSignals {
    pub title_length: usize,
    pub description_length: usize,
    pub h1_count: usize,
    pub h2_count: usize,
    pub h3_count: usize,
    pub internal_links: usize,
    pub external_links: usize,
    /// Total `<img>` elements on the page, before any truncation of the
    /// extracted image list.
    pub image_count: usize,
    /// Percentage of images carrying non-empty alt text, 0-100.
    pub image_alt_coverage: f32,
    pub script_count: usize,
    pub stylesheet_count: usize,
    pub html_size: usize,
}

/// Full report for one analyzed competitor page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub url: String,
    pub extract: PageExtract,
    pub design: DesignSignals,
    pub seo: SeoSignals,
    /// Heuristic scores, both clamped to [0, 100].
    pub seo_score: u32,
    pub performance_score: u32,
    /// Qualitative business/positioning summary from the model.
    pub positioning_summary: String,
    pub insights: Vec<String>,
    pub recommendations: Vec<String>,
}

/// Aggregate over a list of competitor URLs; failed URLs are skipped.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompetitorLandscape {
    pub analyses: Vec<AnalysisReport>,
    pub skipped_urls: Vec<String>,
    pub market_summary: String,
}
