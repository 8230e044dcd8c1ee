mod config;
mod llm;
mod services;
mod status;

use crate::config::Config;
use crate::llm::{ChatModel, OpenAiModel};
use crate::services::analysis::WebsiteAnalyzer;
use crate::services::assets::storage::{AssetStorage, LocalStorage};
use crate::status::{InMemoryStatusStore, StatusStore};
use actix_web::{web, App, HttpResponse, HttpServer, Responder};
use chrono::Utc;
use env_logger::Env;
use log::info;
use serde_json::json;
use std::sync::Arc;

const SERVICE_NAME: &str = "KLM Pegasus AI Service";
const SERVICE_VERSION: &str = env!("CARGO_PKG_VERSION");

async fn root() -> impl Responder {
    HttpResponse::Ok().json(json!({
        "message": SERVICE_NAME,
        "version": SERVICE_VERSION,
        "status": "actif",
        "timestamp": Utc::now().to_rfc3339(),
    }))
}

async fn health() -> impl Responder {
    HttpResponse::Ok().json(json!({
        "status": "healthy",
        "services": {
            "branding": "active",
            "content": "active",
            "analysis": "active",
            "assets": "active",
            "sites": "active",
        },
        "timestamp": Utc::now().to_rfc3339(),
    }))
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(Env::default().default_filter_or("info"));
    info!("démarrage du service de génération KLM Pegasus");

    let config = Config::from_env();
    let bind_addr = (config.host.clone(), config.port);

    let model = OpenAiModel::new(&config)
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidInput, e))?;
    let model: web::Data<dyn ChatModel> = web::Data::from(Arc::new(model) as Arc<dyn ChatModel>);

    let analyzer = WebsiteAnalyzer::new(&config)
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))?;
    let analyzer = web::Data::new(analyzer);

    let storage: web::Data<dyn AssetStorage> =
        web::Data::from(Arc::new(LocalStorage::new(&config)) as Arc<dyn AssetStorage>);
    let store: web::Data<dyn StatusStore> =
        web::Data::from(Arc::new(InMemoryStatusStore::new()) as Arc<dyn StatusStore>);
    let config_data = web::Data::new(config);

    info!("service prêt sur http://{}:{}", bind_addr.0, bind_addr.1);

    HttpServer::new(move || {
        App::new()
            .app_data(web::JsonConfig::default().limit(10 * 1024 * 1024)) // 10 MB
            .app_data(model.clone())
            .app_data(analyzer.clone())
            .app_data(storage.clone())
            .app_data(store.clone())
            .app_data(config_data.clone())
            .route("/", web::get().to(root))
            .route("/health", web::get().to(health))
            .configure(services::branding::configure)
            .configure(services::content::configure)
            .configure(services::analysis::configure)
            .configure(services::assets::configure)
            .configure(services::sites::configure)
    })
    .bind(bind_addr)?
    .run()
    .await
}
