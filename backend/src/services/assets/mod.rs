//! # Assets Service Module
//!
//! Placeholder asset generation for new sites plus `POST /upload-assets`
//! for user-provided images. Everything lands behind the `AssetStorage`
//! seam so the storage backend is decided at startup.

pub mod generate;
pub mod storage;

use actix_multipart::Multipart;
use actix_web::{web, HttpResponse, Responder};
use common::model::asset::AssetKind;
use common::requests::{UploadAssetsResponse, UploadedAsset};
use futures_util::StreamExt;
use log::{error, info};
use std::path::Path;
use storage::{content_type_for, AssetStorage};
use uuid::Uuid;

const ALLOWED_EXTENSIONS: [&str; 7] = ["png", "jpg", "jpeg", "gif", "webp", "svg", "ico"];

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/upload-assets", web::post().to(process_upload));
}

async fn process_upload(
    storage: web::Data<dyn AssetStorage>,
    payload: Multipart,
) -> impl Responder {
    match upload_assets(storage.get_ref(), payload).await {
        Ok(assets) => {
            let message = format!("{} fichier(s) téléversé(s)", assets.len());
            HttpResponse::Ok().json(UploadAssetsResponse {
                success: true,
                assets,
                message,
            })
        }
        Err(e) => {
            error!("échec du téléversement: {}", e);
            HttpResponse::BadRequest().body(format!("Erreur de téléversement: {}", e))
        }
    }
}

/// Read the multipart stream: a `site_id` text part must arrive before any
/// file part; an optional `asset_type` part overrides filename inference
/// for the files that follow it. Each file gets a fresh UUID key under
/// `{site}/{type}/`.
pub async fn upload_assets(
    storage: &dyn AssetStorage,
    mut payload: Multipart,
) -> Result<Vec<UploadedAsset>, String> {
    let mut site_id: Option<String> = None;
    let mut declared_kind: Option<AssetKind> = None;
    let mut uploaded = Vec::new();

    while let Some(item) = payload.next().await {
        let mut field = item.map_err(|e| format!("Lecture du flux multipart impossible: {}", e))?;
        let part_name = field
            .content_disposition()
            .and_then(|cd| cd.get_name().map(|n| n.to_string()));

        match part_name.as_deref() {
            Some("site_id") => {
                let mut bytes = Vec::new();
                while let Some(chunk) = field.next().await {
                    let chunk =
                        chunk.map_err(|e| format!("Lecture du champ site_id impossible: {}", e))?;
                    bytes.extend_from_slice(&chunk);
                }
                let value = String::from_utf8(bytes)
                    .map_err(|_| "Le champ site_id n'est pas de l'UTF-8 valide".to_string())?;
                if value.trim().is_empty() {
                    return Err("Le champ site_id est vide".to_string());
                }
                site_id = Some(value.trim().to_string());
            }
            Some("asset_type") => {
                let mut bytes = Vec::new();
                while let Some(chunk) = field.next().await {
                    let chunk = chunk
                        .map_err(|e| format!("Lecture du champ asset_type impossible: {}", e))?;
                    bytes.extend_from_slice(&chunk);
                }
                let value = String::from_utf8(bytes)
                    .map_err(|_| "Le champ asset_type n'est pas de l'UTF-8 valide".to_string())?;
                declared_kind = Some(AssetKind::parse(value.trim()));
            }
            Some("files") => {
                let site = site_id
                    .as_deref()
                    .ok_or("Le champ site_id doit précéder les fichiers")?;

                let filename = field
                    .content_disposition()
                    .and_then(|cd| cd.get_filename().map(|f| f.to_string()))
                    .unwrap_or_default();
                let extension = Path::new(&filename)
                    .extension()
                    .and_then(|e| e.to_str())
                    .map(|e| e.to_ascii_lowercase())
                    .unwrap_or_default();
                if !ALLOWED_EXTENSIONS.contains(&extension.as_str()) {
                    return Err(format!("Type de fichier non autorisé: {}", filename));
                }

                let mut bytes = Vec::new();
                while let Some(chunk) = field.next().await {
                    let chunk =
                        chunk.map_err(|e| format!("Lecture de {} impossible: {}", filename, e))?;
                    bytes.extend_from_slice(&chunk);
                }

                // Raster uploads in lossy formats get the standard
                // downscale/flatten treatment before storage.
                let (bytes, extension) = if extension == "jpg" || extension == "jpeg" {
                    (generate::optimize_image(&bytes)?, "jpg".to_string())
                } else {
                    (bytes, extension)
                };

                let kind = declared_kind.unwrap_or_else(|| infer_kind(&filename));
                let key = format!(
                    "{}/{}/{}.{}",
                    site,
                    kind.label(),
                    Uuid::new_v4(),
                    extension
                );
                let content_type = content_type_for(Path::new(&key));
                let url = storage.put(&key, bytes, content_type).await?;
                info!("asset téléversé: {} -> {}", filename, url);
                uploaded.push(UploadedAsset {
                    filename,
                    url,
                    asset_type: kind.label().to_string(),
                });
            }
            _ => {}
        }
    }

    if uploaded.is_empty() {
        return Err("Aucun fichier reçu".to_string());
    }
    Ok(uploaded)
}

/// Best-effort asset kind from the uploaded filename.
fn infer_kind(filename: &str) -> AssetKind {
    let lower = filename.to_ascii_lowercase();
    for kind in [
        AssetKind::Logo,
        AssetKind::Hero,
        AssetKind::Favicon,
        AssetKind::Icon,
        AssetKind::Product,
    ] {
        if lower.contains(kind.label()) {
            return kind;
        }
    }
    AssetKind::Image
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_is_inferred_from_filename() {
        assert_eq!(infer_kind("mon-logo.png"), AssetKind::Logo);
        assert_eq!(infer_kind("hero-banner.jpg"), AssetKind::Hero);
        assert_eq!(infer_kind("photo.webp"), AssetKind::Image);
    }
}
