//! # Sites Service Module
//!
//! The full generation pipeline behind `POST /generate-site`: competitor
//! analysis (when URLs are provided), branding, structure, placeholder
//! assets, then the static build. The response returns as soon as the
//! build completes; persistence and the simulated CDN deployment continue
//! in a background task whose failures are logged only.
//! `GET /site/{site_id}/status` polls build progress.

pub mod build;
pub mod templates;

use crate::config::Config;
use crate::llm::ChatModel;
use crate::services::analysis::WebsiteAnalyzer;
use crate::services::assets::generate::generate_site_assets;
use crate::services::assets::storage::AssetStorage;
use crate::services::branding::generate::generate_branding;
use crate::services::content::generate::generate_site_structure;
use crate::status::StatusStore;
use actix_web::{web, HttpResponse, Responder};
use build::BuiltSite;
use common::requests::{GenerateSiteRequest, GenerateSiteResponse};
use common::status::SiteStatus;
use log::{error, info};
use serde_json::json;
use std::path::Path;

/// Fixed estimate returned to the client, in seconds.
const ESTIMATED_COMPLETION_SECS: u32 = 300;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/generate-site", web::post().to(process_generate))
        .route("/site/{site_id}/status", web::get().to(process_status));
}

async fn process_generate(
    model: web::Data<dyn ChatModel>,
    analyzer: web::Data<WebsiteAnalyzer>,
    storage: web::Data<dyn AssetStorage>,
    store: web::Data<dyn StatusStore>,
    config: web::Data<Config>,
    payload: web::Json<GenerateSiteRequest>,
) -> impl Responder {
    let request = payload.into_inner();
    if let Err(e) = request.validate() {
        return HttpResponse::BadRequest().body(e);
    }
    info!("génération de site pour: {}", request.business_name);

    match run_pipeline(
        model.get_ref(),
        analyzer.get_ref(),
        storage.get_ref(),
        store.get_ref(),
        config.get_ref(),
        &request,
    )
    .await
    {
        Ok((response, built)) => {
            let store = store.clone();
            let config = config.clone();
            let user_id = request.user_id.clone();
            tokio::spawn(async move {
                save_and_deploy(store.get_ref(), config.get_ref(), &built, &user_id).await;
            });
            HttpResponse::Ok().json(response)
        }
        Err(e) => {
            error!("erreur lors de la génération du site: {}", e);
            HttpResponse::InternalServerError().body(format!("Erreur de génération: {}", e))
        }
    }
}

async fn process_status(
    store: web::Data<dyn StatusStore>,
    path: web::Path<String>,
) -> impl Responder {
    let site_id = path.into_inner();
    let status = lookup_status(store.get_ref(), &site_id).await;
    HttpResponse::Ok().json(json!({
        "success": true,
        "site_id": site_id,
        "status": status,
    }))
}

/// Known ids return their last recorded entry; unknown ids synthesize a
/// `not_found` record instead of a 404 so pollers get a uniform shape.
async fn lookup_status(store: &dyn StatusStore, site_id: &str) -> SiteStatus {
    match store.get(site_id).await {
        Some(status) => status,
        None => SiteStatus::not_found(site_id),
    }
}

/// The synchronous part of site generation, through the finished build.
async fn run_pipeline(
    model: &dyn ChatModel,
    analyzer: &WebsiteAnalyzer,
    storage: &dyn AssetStorage,
    store: &dyn StatusStore,
    config: &Config,
    request: &GenerateSiteRequest,
) -> Result<(GenerateSiteResponse, BuiltSite), String> {
    if !request.competitor_urls.is_empty() {
        let landscape = analyzer
            .analyze_competitors(model, &request.competitor_urls)
            .await;
        info!(
            "paysage concurrentiel: {} analysé(s), {} ignoré(s) - {}",
            landscape.analyses.len(),
            landscape.skipped_urls.len(),
            landscape.market_summary
        );
    }

    let branding = generate_branding(
        model,
        &request.business_name,
        request.industry,
        &request.description,
        &request.target_audience,
        &request.style_preferences,
        &request.color_preferences,
    )
    .await?;

    let structure = generate_site_structure(model, request, &branding).await?;

    let assets = generate_site_assets(
        storage,
        &structure.site_id,
        &request.business_name,
        &branding,
    )
    .await?;

    let built = build::build_site(
        store,
        Path::new(&config.sites_root),
        &config.preview_base_url,
        request,
        &structure,
        &branding,
        &assets,
    )
    .await?;

    let response = GenerateSiteResponse {
        success: true,
        site_id: built.site_id.clone(),
        preview_url: built.preview_url.clone(),
        branding,
        structure,
        assets,
        estimated_completion_time: ESTIMATED_COMPLETION_SECS,
    };
    Ok((response, built))
}

/// Post-response persistence and deployment. Failures are logged, never
/// surfaced: the client already has its response.
async fn save_and_deploy(store: &dyn StatusStore, config: &Config, built: &BuiltSite, user_id: &str) {
    info!(
        "sauvegarde et déploiement du site {} pour l'utilisateur {}",
        built.site_id, user_id
    );
    if let Err(e) =
        build::save_site_to_database(Path::new(&config.sites_root), built, user_id).await
    {
        error!("erreur lors de la sauvegarde en base: {}", e);
        return;
    }
    if let Err(e) = build::deploy_site(store, &built.site_id, config.deploy_delay).await {
        error!("erreur lors du déploiement: {}", e);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::testing::{FailingModel, StubModel};
    use crate::services::assets::storage::LocalStorage;
    use crate::status::testing::RecordingStore;
    use crate::status::InMemoryStatusStore;
    use common::status::SiteState;
    use tempfile::TempDir;

    const STRATEGY_JSON: &str = r#"{
        "brand_voice": "chaleureux et artisanal",
        "brand_values": ["qualité", "authenticité", "proximité", "savoir-faire", "plaisir"],
        "tagline": "Le goût du vrai"
    }"#;

    const STRUCTURE_JSON: &str = r#"{
        "pages": [
            {"page_id": "home", "page_name": "Accueil", "page_type": "home",
             "sections": [{"section_type": "hero"}],
             "meta_data": {"title": "Accueil", "description": "Bienvenue", "keywords": ["café"]},
             "seo_data": {}},
            {"page_id": "a-propos", "page_name": "À propos", "page_type": "about",
             "sections": [], "meta_data": {"description": "Notre histoire"}, "seo_data": {}}
        ],
        "navigation": {"main": ["home", "a-propos"]},
        "global_settings": {"lang": "fr"},
        "integrations": ["stripe", "analytics"]
    }"#;

    fn cafe_luna_request() -> GenerateSiteRequest {
        serde_json::from_value(json!({
            "user_id": "u1",
            "business_name": "Café Luna",
            "industry": "Alimentation & Boissons",
            "description": "Torréfacteur artisanal et salon de thé de quartier",
            "target_audience": "Jeunes urbains amateurs de café",
            "style_preferences": ["audacieux"]
        }))
        .unwrap()
    }

    fn test_config(dir: &TempDir) -> Config {
        let mut config = Config::for_tests();
        config.storage_root = dir.path().join("assets").display().to_string();
        config.sites_root = dir.path().join("sites").display().to_string();
        config
    }

    #[tokio::test]
    async fn cafe_luna_end_to_end_against_a_stub_model() {
        let dir = TempDir::new().unwrap();
        let config = test_config(&dir);
        let model = StubModel::new([STRATEGY_JSON, STRUCTURE_JSON]);
        let analyzer = WebsiteAnalyzer::new(&config).unwrap();
        let storage = LocalStorage::new(&config);
        let store = RecordingStore::default();

        let (response, built) = run_pipeline(
            &model,
            &analyzer,
            &storage,
            &store,
            &config,
            &cafe_luna_request(),
        )
        .await
        .unwrap();

        assert!(response.success);
        assert_eq!(response.site_id, built.site_id);
        assert_eq!(response.estimated_completion_time, 300);
        assert!(response.preview_url.starts_with("https://preview.test/"));
        // Bold pins the first food & beverage palette.
        assert_eq!(response.branding.color_scheme.primary, "#D35400");
        assert_eq!(response.branding.brand_values.len(), 5);
        assert_eq!(response.structure.pages.len(), 2);
        assert_eq!(response.assets.len(), 13);

        let site_dir = dir.path().join("sites").join(&built.site_id);
        assert!(site_dir.join("index.html").exists());
        assert!(site_dir.join("a-propos.html").exists());

        let history = store.history.lock().unwrap();
        assert_eq!(history.last().unwrap().status, SiteState::Completed);
    }

    #[tokio::test]
    async fn model_failure_aborts_the_pipeline() {
        let dir = TempDir::new().unwrap();
        let config = test_config(&dir);
        let analyzer = WebsiteAnalyzer::new(&config).unwrap();
        let storage = LocalStorage::new(&config);
        let store = RecordingStore::default();

        let result = run_pipeline(
            &FailingModel,
            &analyzer,
            &storage,
            &store,
            &config,
            &cafe_luna_request(),
        )
        .await;
        assert!(result.is_err());
        // Branding failed before the build started: no status was written.
        assert!(store.history.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn save_and_deploy_reaches_deployed() {
        let dir = TempDir::new().unwrap();
        let config = test_config(&dir);
        let model = StubModel::new([STRATEGY_JSON, STRUCTURE_JSON]);
        let analyzer = WebsiteAnalyzer::new(&config).unwrap();
        let storage = LocalStorage::new(&config);
        let store = InMemoryStatusStore::new();

        let (_, built) = run_pipeline(
            &model,
            &analyzer,
            &storage,
            &store,
            &config,
            &cafe_luna_request(),
        )
        .await
        .unwrap();

        save_and_deploy(&store, &config, &built, "u1").await;

        let status = store.get(&built.site_id).await.unwrap();
        assert_eq!(status.status, SiteState::Deployed);
        assert!(built
            .site_path
            .join("site_data.json")
            .exists());
    }

    #[tokio::test]
    async fn unknown_site_id_synthesizes_not_found() {
        let store = InMemoryStatusStore::new();
        let status = lookup_status(&store, "inconnu").await;
        assert_eq!(status.status, SiteState::NotFound);
        assert_eq!(status.current_step, "Site non trouvé");
        assert_eq!(status.progress_percentage, 0.0);
    }
}
