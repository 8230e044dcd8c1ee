//! # Branding Service Module
//!
//! Exposes `POST /generate-branding`: takes a business name, industry and
//! style/color preferences, and returns a complete `BrandIdentity`. The
//! endpoint runs the advanced pipeline (industry analysis + model-driven
//! colors/fonts with deterministic fallback); the basic pipeline in
//! `generate.rs` is used by the site generation flow.

pub mod generate;
pub mod palettes;

use crate::llm::ChatModel;
use actix_web::{web, HttpResponse, Responder};
use common::requests::{BrandingRequest, BrandingResponse};
use log::error;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/generate-branding", web::post().to(process));
}

async fn process(
    model: web::Data<dyn ChatModel>,
    payload: web::Json<BrandingRequest>,
) -> impl Responder {
    let req = payload.into_inner();
    if let Err(e) = req.validate() {
        return HttpResponse::BadRequest().body(e);
    }

    match generate::generate_complete_branding(
        model.get_ref(),
        &req.business_name,
        req.industry,
        &req.style_preferences,
        &req.color_preferences,
    )
    .await
    {
        Ok(branding) => HttpResponse::Ok().json(BrandingResponse {
            success: true,
            branding,
        }),
        Err(e) => {
            error!("erreur lors de la génération du branding: {}", e);
            HttpResponse::InternalServerError().body(format!("Erreur de branding: {}", e))
        }
    }
}
