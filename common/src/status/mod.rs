use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SiteState {
    Generating,
    Building,
    Completed,
    Deployed,
    Error,
    /// Synthesized by the status query when no entry exists for an id;
    /// never written into the status table.
    NotFound,
}

/// Progress-tracking entry for one site's build.
///
/// Mutated in place by the builder as it advances through its stages and
/// looked up by site id. Entries never expire and are lost on restart;
/// the record is diagnostic, not authoritative.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteStatus {
    pub site_id: String,
    pub status: SiteState,
    pub progress_percentage: f32,
    pub current_step: String,
    pub error_message: Option<String>,
    pub last_updated: DateTime<Utc>,
}

impl SiteStatus {
    pub fn new(site_id: &str, status: SiteState, progress: f32, step: &str) -> Self {
        SiteStatus {
            site_id: site_id.to_string(),
            status,
            progress_percentage: progress,
            current_step: step.to_string(),
            error_message: None,
            last_updated: Utc::now(),
        }
    }

    pub fn not_found(site_id: &str) -> Self {
        SiteStatus::new(site_id, SiteState::NotFound, 0.0, "Site non trouvé")
    }
}
