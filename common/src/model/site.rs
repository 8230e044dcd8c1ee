use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// One page of a generated site.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageRecord {
    pub page_id: String,
    pub page_name: String,
    /// "home", "product", "about", "contact", ...
    pub page_type: String,
    /// Opaque section records as returned by the model; the builder accepts
    /// them but renders every page through the generic layout.
    pub sections: Vec<Value>,
    pub meta_data: HashMap<String, Value>,
    pub seo_data: HashMap<String, Value>,
}

/// The generated page/navigation tree describing one placeholder website.
///
/// `site_id` is generator-assigned and is the join key every downstream
/// stage (assets, builder, status) keys on. It is the only handle a client
/// retains across requests.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteStructure {
    pub site_id: String,
    pub pages: Vec<PageRecord>,
    pub navigation: HashMap<String, Value>,
    pub global_settings: HashMap<String, Value>,
    pub integrations: Vec<String>,
}
