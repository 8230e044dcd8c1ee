//! Structure and content pipeline: prompt/parse round-trips that turn
//! business info plus branding into typed site records.

use crate::llm::{parse_reply, ChatModel, ChatParams};
use common::model::branding::BrandIdentity;
use common::model::content::{ContentOptimization, MarketInsight, ProductDescription};
use common::model::site::{PageRecord, SiteStructure};
use common::requests::GenerateSiteRequest;
use log::{info, warn};
use serde::Deserialize;
use serde_json::Value;
use std::collections::{HashMap, HashSet};
use std::time::Duration;
use uuid::Uuid;

const STRUCTURE_SYSTEM: &str = "Tu es un expert en création de sites e-commerce. Tu génères des \
     structures de site optimisées pour la conversion et l'expérience utilisateur.";

#[derive(Debug, Deserialize)]
struct PageReply {
    page_id: String,
    page_name: String,
    page_type: String,
    sections: Vec<Value>,
    meta_data: HashMap<String, Value>,
    seo_data: HashMap<String, Value>,
}

#[derive(Debug, Deserialize)]
struct StructureReply {
    pages: Vec<PageReply>,
    navigation: HashMap<String, Value>,
    global_settings: HashMap<String, Value>,
    integrations: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct OptimizationReply {
    optimized_content: String,
    improvements: Vec<String>,
    seo_score: Option<f32>,
    readability_score: Option<f32>,
}

#[derive(Debug, Deserialize)]
struct InsightsReply {
    insights: Vec<MarketInsight>,
}

/// Generate the full page/navigation tree for a site.
///
/// The site id is minted server-side: the reply's join key must be an
/// opaque generator-assigned token, not something the model controls.
pub async fn generate_site_structure(
    model: &dyn ChatModel,
    business: &GenerateSiteRequest,
    branding: &BrandIdentity,
) -> Result<SiteStructure, String> {
    info!(
        "génération de la structure pour: {}",
        business.business_name
    );

    let prompt = structure_prompt(business, branding);
    let reply = model
        .complete(STRUCTURE_SYSTEM, &prompt, ChatParams::default())
        .await?;
    let parsed: StructureReply = parse_reply(&reply)?;

    let mut seen = HashSet::new();
    for page in &parsed.pages {
        if !seen.insert(page.page_id.clone()) {
            return Err(format!("page_id dupliqué dans la réponse: {}", page.page_id));
        }
    }

    let pages = parsed
        .pages
        .into_iter()
        .map(|p| PageRecord {
            page_id: p.page_id,
            page_name: p.page_name,
            page_type: p.page_type,
            sections: p.sections,
            meta_data: p.meta_data,
            seo_data: p.seo_data,
        })
        .collect::<Vec<_>>();

    let structure = SiteStructure {
        site_id: Uuid::new_v4().to_string(),
        pages,
        navigation: parsed.navigation,
        global_settings: parsed.global_settings,
        integrations: parsed.integrations,
    };

    info!("structure générée avec {} pages", structure.pages.len());
    Ok(structure)
}

/// Regenerate the content of a single page on demand.
pub async fn generate_page_content(
    model: &dyn ChatModel,
    page_type: &str,
    business: &GenerateSiteRequest,
    branding: &BrandIdentity,
    additional_context: Option<&Value>,
) -> Result<Value, String> {
    let context = additional_context
        .map(|v| v.to_string())
        .unwrap_or_else(|| "{}".to_string());
    let prompt = format!(
        "Génère le contenu détaillé pour une page {} de site e-commerce:\n\n\
         Entreprise: {}\n\
         Secteur: {}\n\
         Description: {}\n\
         Audience cible: {}\n\n\
         Branding:\n\
         - Ton: {}\n\
         - Valeurs: {}\n\
         - Slogan: {}\n\n\
         Contexte additionnel: {}\n\n\
         Génère un contenu engageant, optimisé SEO et orienté conversion. \
         Inclus des appels à l'action pertinents et du contenu persuasif.\n\n\
         Format JSON avec sections détaillées.",
        page_type,
        business.business_name,
        business.industry.label(),
        business.description,
        business.target_audience,
        branding.brand_voice,
        branding.brand_values.join(", "),
        branding.tagline,
        context,
    );

    let reply = model
        .complete(
            "Tu es un rédacteur expert en e-commerce. Tu crées du contenu engageant et \
             optimisé pour la conversion.",
            &prompt,
            ChatParams::default(),
        )
        .await?;
    parse_reply(&reply)
}

/// Optimize arbitrary copy for SEO/conversion and score the result.
pub async fn optimize_content(
    model: &dyn ChatModel,
    content: &str,
    optimization_type: &str,
    target_keywords: &[String],
) -> Result<ContentOptimization, String> {
    let keywords = if target_keywords.is_empty() {
        "Aucun".to_string()
    } else {
        target_keywords.join(", ")
    };
    let prompt = format!(
        "Optimise le contenu suivant pour {}:\n\n\
         Contenu original:\n{}\n\n\
         Mots-clés cibles: {}\n\n\
         Fournis le contenu optimisé, la liste des améliorations apportées, \
         un score SEO estimé (0-100) et un score de lisibilité (0-100).\n\n\
         Format JSON:\n\
         {{\n\
           \"optimized_content\": \"...\",\n\
           \"improvements\": [\"...\"],\n\
           \"seo_score\": 85,\n\
           \"readability_score\": 90\n\
         }}",
        optimization_type, content, keywords,
    );

    let reply = model
        .complete(
            "Tu es un expert en optimisation de contenu SEO et conversion.",
            &prompt,
            ChatParams {
                max_tokens: 4000,
                temperature: 0.3,
            },
        )
        .await?;
    let parsed: OptimizationReply = parse_reply(&reply)?;

    Ok(ContentOptimization {
        original_content: content.to_string(),
        optimized_content: parsed.optimized_content,
        improvements: parsed.improvements,
        seo_score: parsed.seo_score,
        readability_score: parsed.readability_score,
    })
}

/// Enrich a product list with model-written descriptions.
///
/// Batch semantics: a product whose round-trip fails is logged and kept
/// as-is; the loop continues. A pacing delay between calls keeps the
/// provider's rate limiter happy (pass `Duration::ZERO` in tests).
pub async fn generate_product_descriptions(
    model: &dyn ChatModel,
    products: &[Value],
    brand_voice: &str,
    target_audience: &str,
    pacing: Duration,
) -> Vec<Value> {
    let mut enhanced = Vec::with_capacity(products.len());

    for product in products {
        match describe_product(model, product, brand_voice, target_audience).await {
            Ok(description) => {
                let mut merged = product.clone();
                if let (Some(obj), Ok(extra)) =
                    (merged.as_object_mut(), serde_json::to_value(&description))
                {
                    if let Some(extra_obj) = extra.as_object() {
                        for (k, v) in extra_obj {
                            obj.insert(k.clone(), v.clone());
                        }
                    }
                }
                enhanced.push(merged);
            }
            Err(e) => {
                warn!("description de produit ignorée: {}", e);
                enhanced.push(product.clone());
            }
        }
        if !pacing.is_zero() {
            tokio::time::sleep(pacing).await;
        }
    }

    enhanced
}

async fn describe_product(
    model: &dyn ChatModel,
    product: &Value,
    brand_voice: &str,
    target_audience: &str,
) -> Result<ProductDescription, String> {
    let get = |key: &str| {
        product
            .get(key)
            .map(|v| v.to_string())
            .unwrap_or_default()
    };
    let prompt = format!(
        "Génère une description de produit engageante pour:\n\n\
         Nom du produit: {}\n\
         Catégorie: {}\n\
         Caractéristiques: {}\n\
         Prix: {}\n\n\
         Ton de marque: {}\n\
         Audience cible: {}\n\n\
         Fournis un titre accrocheur, une description courte (50 mots), une \
         description longue (150-200 mots), 3 à 5 points clés et des mots-clés SEO.\n\n\
         Format JSON:\n\
         {{\n\
           \"title\": \"...\",\n\
           \"short_description\": \"...\",\n\
           \"long_description\": \"...\",\n\
           \"key_points\": [\"...\"],\n\
           \"seo_keywords\": [\"...\"]\n\
         }}",
        get("name"),
        get("category"),
        get("features"),
        get("price"),
        brand_voice,
        target_audience,
    );

    let reply = model
        .complete(
            "Tu es un expert en rédaction de descriptions de produits e-commerce.",
            &prompt,
            ChatParams {
                max_tokens: 1000,
                temperature: 0.7,
            },
        )
        .await?;
    parse_reply(&reply)
}

/// Market-level insights over industry, audience and competitor data.
pub async fn generate_market_insights(
    model: &dyn ChatModel,
    industry: &str,
    target_audience: &str,
    competitor_data: Option<&Value>,
) -> Result<Vec<MarketInsight>, String> {
    let competitors = competitor_data
        .map(|v| v.to_string())
        .unwrap_or_else(|| "Aucune".to_string());
    let prompt = format!(
        "Analyse le marché pour:\n\
         Secteur: {}\n\
         Audience cible: {}\n\
         Données concurrents: {}\n\n\
         Fournis des insights sur les tendances du marché, les opportunités \
         identifiées, les recommandations stratégiques, les fonctionnalités \
         recommandées et la stratégie de prix.\n\n\
         Format JSON avec array d'insights:\n\
         {{\n\
           \"insights\": [\n\
             {{\n\
               \"insight_type\": \"market_trend\",\n\
               \"title\": \"...\",\n\
               \"description\": \"...\",\n\
               \"confidence_score\": 0.85,\n\
               \"actionable_recommendations\": [\"...\"]\n\
             }}\n\
           ]\n\
         }}",
        industry, target_audience, competitors,
    );

    let reply = model
        .complete(
            "Tu es un analyste de marché expert en e-commerce.",
            &prompt,
            ChatParams {
                max_tokens: 4000,
                temperature: 0.6,
            },
        )
        .await?;
    let parsed: InsightsReply = parse_reply(&reply)?;
    Ok(parsed.insights)
}

fn structure_prompt(business: &GenerateSiteRequest, branding: &BrandIdentity) -> String {
    format!(
        "Génère la structure complète d'un site e-commerce pour:\n\n\
         Entreprise: {}\n\
         Secteur: {}\n\
         Description: {}\n\
         Audience cible: {}\n\
         Fonctionnalités requises: {}\n\n\
         Branding:\n\
         - Ton de marque: {}\n\
         - Valeurs: {}\n\
         - Slogan: {}\n\n\
         Génère une structure avec une page d'accueil optimisée pour la \
         conversion, des pages produits/services, une page à propos, une page \
         contact, les pages légales nécessaires, une navigation optimisée et \
         les intégrations e-commerce.\n\n\
         Format JSON:\n\
         {{\n\
           \"pages\": [\n\
             {{\n\
               \"page_id\": \"home\",\n\
               \"page_name\": \"Accueil\",\n\
               \"page_type\": \"home\",\n\
               \"sections\": [{{\"section_type\": \"hero\", \"content\": {{}}, \"settings\": {{}}}}],\n\
               \"meta_data\": {{\"title\": \"...\", \"description\": \"...\", \"keywords\": [\"...\"]}},\n\
               \"seo_data\": {{}}\n\
             }}\n\
           ],\n\
           \"navigation\": {{}},\n\
           \"global_settings\": {{}},\n\
           \"integrations\": [\"stripe\", \"analytics\", \"seo\"]\n\
         }}",
        business.business_name,
        business.industry.label(),
        business.description,
        business.target_audience,
        business.features_required.join(", "),
        branding.brand_voice,
        branding.brand_values.join(", "),
        branding.tagline,
    )
}
