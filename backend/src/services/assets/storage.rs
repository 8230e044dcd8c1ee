//! Storage seam for generated and uploaded assets.
//!
//! Pipelines write bytes through `AssetStorage` and get back a public URL;
//! the production implementation keeps files under a local root and maps
//! them to a CDN-style prefix. Keys are relative paths, always with `/`
//! separators.

use crate::config::Config;
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs;

#[async_trait]
pub trait AssetStorage: Send + Sync {
    /// Store `bytes` under `key` and return the public URL serving them.
    async fn put(&self, key: &str, bytes: Vec<u8>, content_type: &str) -> Result<String, String>;

    /// Remove every object whose key starts with `prefix`.
    async fn delete_prefix(&self, prefix: &str) -> Result<(), String>;
}

/// Filesystem-backed storage under a configured root directory.
pub struct LocalStorage {
    root: PathBuf,
    public_base: String,
}

impl LocalStorage {
    pub fn new(config: &Config) -> LocalStorage {
        LocalStorage {
            root: PathBuf::from(&config.storage_root),
            public_base: config.cdn_base_url.trim_end_matches('/').to_string(),
        }
    }

    fn resolve(&self, key: &str) -> Result<PathBuf, String> {
        // Keys come from our own code and from upload filenames we mint
        // ourselves, but reject traversal outright anyway.
        if key.split('/').any(|part| part == "..") || key.starts_with('/') {
            return Err(format!("Clé de stockage invalide: {}", key));
        }
        Ok(self.root.join(key))
    }
}

#[async_trait]
impl AssetStorage for LocalStorage {
    async fn put(&self, key: &str, bytes: Vec<u8>, _content_type: &str) -> Result<String, String> {
        let path = self.resolve(key)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| format!("Création du dossier {} impossible: {}", parent.display(), e))?;
        }
        fs::write(&path, bytes)
            .await
            .map_err(|e| format!("Écriture de {} impossible: {}", path.display(), e))?;
        Ok(format!("{}/{}", self.public_base, key))
    }

    async fn delete_prefix(&self, prefix: &str) -> Result<(), String> {
        let path = self.resolve(prefix)?;
        match fs::remove_dir_all(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(format!(
                "Suppression de {} impossible: {}",
                path.display(),
                e
            )),
        }
    }
}

/// File extension to MIME type, for uploaded assets.
pub fn content_type_for(path: &Path) -> &'static str {
    match path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .as_deref()
    {
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        Some("svg") => "image/svg+xml",
        Some("ico") => "image/x-icon",
        _ => "application/octet-stream",
    }
}
