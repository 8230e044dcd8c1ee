//! Content service: `POST /optimize-content` plus the structure/page/product
//! generation functions consumed by the site generation flow.

pub mod generate;

use crate::llm::ChatModel;
use actix_web::{web, HttpResponse, Responder};
use common::requests::OptimizeContentForm;
use log::{error, info};

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/optimize-content", web::post().to(process_optimize));
}

async fn process_optimize(
    model: web::Data<dyn ChatModel>,
    form: web::Form<OptimizeContentForm>,
) -> impl Responder {
    let form = form.into_inner();
    info!("optimisation de contenu: {}", form.optimization_type);

    match generate::optimize_content(
        model.get_ref(),
        &form.content,
        &form.optimization_type,
        &form.keywords(),
    )
    .await
    {
        Ok(optimization) => HttpResponse::Ok().json(serde_json::json!({
            "success": true,
            "original_content": optimization.original_content,
            "optimized_content": optimization.optimized_content,
            "improvements": optimization.improvements,
            "seo_score": optimization.seo_score,
            "readability_score": optimization.readability_score,
        })),
        Err(e) => {
            error!("erreur lors de l'optimisation de contenu: {}", e);
            HttpResponse::InternalServerError().body(format!("Erreur d'optimisation: {}", e))
        }
    }
}
