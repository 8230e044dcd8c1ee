//! Tracks build progress for every site this process has worked on.
//!
//! The builder in `services::sites` writes a `SiteStatus` entry as it moves
//! through its stages, and the `GET /site/{site_id}/status` endpoint polls
//! it. The store is a trait so the builder stays free of process-wide
//! state and can be unit-tested against a fake; production uses the
//! in-memory map below, shared across the Actix application as `web::Data`.
//!
//! Entries never expire and are lost on restart. Each site id is only ever
//! written by the single pipeline invocation that owns it, so the map needs
//! concurrent access but no per-id locking.

use async_trait::async_trait;
use common::status::SiteStatus;
use std::collections::HashMap;
use tokio::sync::RwLock;

#[async_trait]
pub trait StatusStore: Send + Sync {
    async fn get(&self, site_id: &str) -> Option<SiteStatus>;
    async fn put(&self, site_id: &str, status: SiteStatus);
}

/// The single source of truth for build statuses in a running process.
#[derive(Default)]
pub struct InMemoryStatusStore {
    sites: RwLock<HashMap<String, SiteStatus>>,
}

impl InMemoryStatusStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl StatusStore for InMemoryStatusStore {
    async fn get(&self, site_id: &str) -> Option<SiteStatus> {
        self.sites.read().await.get(site_id).cloned()
    }

    async fn put(&self, site_id: &str, status: SiteStatus) {
        self.sites.write().await.insert(site_id.to_string(), status);
    }
}

#[cfg(test)]
pub mod testing {
    use super::*;
    use std::sync::Mutex;

    /// Fake store that remembers every write, in order, so tests can assert
    /// the exact transition sequence of a build.
    #[derive(Default)]
    pub struct RecordingStore {
        pub history: Mutex<Vec<SiteStatus>>,
    }

    #[async_trait]
    impl StatusStore for RecordingStore {
        async fn get(&self, site_id: &str) -> Option<SiteStatus> {
            self.history
                .lock()
                .unwrap()
                .iter()
                .rev()
                .find(|s| s.site_id == site_id)
                .cloned()
        }

        async fn put(&self, _site_id: &str, status: SiteStatus) {
            self.history.lock().unwrap().push(status);
        }
    }
}
