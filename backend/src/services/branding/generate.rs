//! Branding pipeline: one or two prompt/parse round-trips to the model plus
//! the deterministic tables in `palettes.rs`.
//!
//! The basic variant (`generate_branding`) asks the model for the brand
//! strategy only and derives colors, fonts and the placeholder logo locally.
//! The advanced variant (`generate_complete_branding`) additionally asks for
//! an industry-trends summary and lets the model propose colors and fonts
//! directly, falling back to the tables when those replies do not parse.
//! That fallback is the only failure recovery in the pipeline; everything
//! else propagates.

use crate::llm::{parse_reply, ChatModel, ChatParams};
use crate::services::branding::palettes;
use common::model::branding::{BrandIdentity, ColorScheme, Typography};
use common::model::business::{Industry, StylePreference};
use log::{error, info, warn};
use serde::Deserialize;
use std::collections::HashMap;

const STRATEGY_SYSTEM: &str = "Tu es un expert en stratégie de marque et branding. \
     Tu crées des identités de marque fortes et cohérentes.";

#[derive(Debug, Deserialize)]
struct StrategyReply {
    brand_voice: String,
    brand_values: Vec<String>,
    tagline: String,
    #[serde(default)]
    positioning: String,
    #[serde(default)]
    brand_promise: String,
}

#[derive(Debug, Default, Deserialize)]
struct IndustryAnalysisReply {
    #[serde(default)]
    market_trends: Vec<String>,
    #[serde(default)]
    popular_colors: Vec<String>,
    #[serde(default)]
    design_styles: Vec<String>,
    #[serde(default)]
    consumer_expectations: Vec<String>,
    #[serde(default)]
    differentiation_factors: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct ColorReply {
    primary: String,
    secondary: String,
    accent: String,
    background: String,
    text: String,
}

#[derive(Debug, Deserialize)]
struct TypographyReply {
    heading_font: String,
    body_font: String,
    font_sizes: HashMap<String, String>,
}

/// Basic branding generation: strategy from the model, visuals from the
/// deterministic tables.
pub async fn generate_branding(
    model: &dyn ChatModel,
    business_name: &str,
    industry: Industry,
    description: &str,
    target_audience: &str,
    style_preferences: &[StylePreference],
    color_preferences: &[String],
) -> Result<BrandIdentity, String> {
    info!("génération de branding pour: {}", business_name);

    let strategy =
        generate_brand_strategy(model, business_name, industry, description, target_audience)
            .await?;
    let color_scheme = table_color_scheme(industry, style_preferences, color_preferences);
    let typography = palettes::typography_for(style_preferences);
    let logo_url = logo_placeholder_url(business_name, &color_scheme);

    Ok(BrandIdentity {
        logo_url: Some(logo_url),
        color_scheme,
        typography,
        brand_voice: strategy.brand_voice,
        brand_values: strategy.brand_values,
        tagline: strategy.tagline,
    })
}

/// Advanced branding generation with industry analysis and model-driven
/// colors and fonts.
pub async fn generate_complete_branding(
    model: &dyn ChatModel,
    business_name: &str,
    industry: Industry,
    style_preferences: &[StylePreference],
    color_preferences: &[String],
) -> Result<BrandIdentity, String> {
    let analysis = analyze_industry(model, industry).await;
    let strategy = generate_advanced_strategy(model, business_name, industry, &analysis).await?;

    let color_scheme = match generate_advanced_colors(
        model,
        industry,
        style_preferences,
        color_preferences,
        &strategy,
    )
    .await
    {
        Ok(scheme) => scheme,
        Err(e) => {
            warn!(
                "couleurs avancées indisponibles ({}), retour à la table déterministe",
                e
            );
            table_color_scheme(industry, style_preferences, color_preferences)
        }
    };

    let typography =
        match generate_advanced_typography(model, industry, style_preferences, &strategy).await {
            Ok(typo) => typo,
            Err(e) => {
                warn!(
                    "typographie avancée indisponible ({}), retour à la table déterministe",
                    e
                );
                palettes::typography_for(style_preferences)
            }
        };

    let logo_url = logo_placeholder_url(business_name, &color_scheme);

    Ok(BrandIdentity {
        logo_url: Some(logo_url),
        color_scheme,
        typography,
        brand_voice: strategy.brand_voice,
        brand_values: strategy.brand_values,
        tagline: strategy.tagline,
    })
}

fn table_color_scheme(
    industry: Industry,
    style_preferences: &[StylePreference],
    color_preferences: &[String],
) -> ColorScheme {
    let table = palettes::industry_palettes(industry);
    let palette = palettes::select_palette(table, style_preferences, color_preferences);
    let (background, text) = palettes::background_and_text(style_preferences);
    ColorScheme {
        primary: palette.primary.to_string(),
        secondary: palette.secondary.to_string(),
        accent: palette.accent.to_string(),
        background,
        text,
    }
}

async fn generate_brand_strategy(
    model: &dyn ChatModel,
    business_name: &str,
    industry: Industry,
    description: &str,
    target_audience: &str,
) -> Result<StrategyReply, String> {
    let prompt = format!(
        "Crée une stratégie de marque complète pour:\n\n\
         Nom de l'entreprise: {}\n\
         Secteur: {}\n\
         Description: {}\n\
         Audience cible: {}\n\n\
         Génère:\n\
         1. Ton de marque (personnalité de la marque)\n\
         2. 5 valeurs fondamentales de la marque\n\
         3. Un slogan accrocheur et mémorable\n\
         4. Positionnement sur le marché\n\
         5. Promesse de marque\n\n\
         Format JSON:\n\
         {{\n\
           \"brand_voice\": \"description du ton\",\n\
           \"brand_values\": [\"valeur1\", \"valeur2\", \"valeur3\", \"valeur4\", \"valeur5\"],\n\
           \"tagline\": \"slogan accrocheur\",\n\
           \"positioning\": \"positionnement sur le marché\",\n\
           \"brand_promise\": \"promesse de marque\"\n\
         }}",
        business_name,
        industry.label(),
        description,
        target_audience
    );

    let reply = model
        .complete(
            STRATEGY_SYSTEM,
            &prompt,
            ChatParams {
                max_tokens: 1500,
                temperature: 0.7,
            },
        )
        .await?;
    parse_reply(&reply)
}

/// Industry trends summary. Failure is tolerated here: an empty analysis
/// degrades the downstream prompts, it does not abort the pipeline.
async fn analyze_industry(model: &dyn ChatModel, industry: Industry) -> IndustryAnalysisReply {
    let prompt = format!(
        "Analyse le secteur {} pour le e-commerce:\n\n\
         Fournis:\n\
         1. Tendances actuelles du marché\n\
         2. Couleurs populaires dans ce secteur\n\
         3. Styles de design préférés\n\
         4. Attentes des consommateurs\n\
         5. Éléments de différenciation importants\n\n\
         Format JSON:\n\
         {{\n\
           \"market_trends\": [\"tendance1\", \"tendance2\"],\n\
           \"popular_colors\": [\"#couleur1\", \"#couleur2\"],\n\
           \"design_styles\": [\"style1\", \"style2\"],\n\
           \"consumer_expectations\": [\"attente1\", \"attente2\"],\n\
           \"differentiation_factors\": [\"facteur1\", \"facteur2\"]\n\
         }}",
        industry.label()
    );

    let result = model
        .complete(
            "Tu es un analyste de marché expert en e-commerce et design.",
            &prompt,
            ChatParams {
                max_tokens: 1000,
                temperature: 0.6,
            },
        )
        .await
        .and_then(|reply| parse_reply::<IndustryAnalysisReply>(&reply));

    match result {
        Ok(analysis) => analysis,
        Err(e) => {
            error!("analyse d'industrie indisponible: {}", e);
            IndustryAnalysisReply::default()
        }
    }
}

async fn generate_advanced_strategy(
    model: &dyn ChatModel,
    business_name: &str,
    industry: Industry,
    analysis: &IndustryAnalysisReply,
) -> Result<StrategyReply, String> {
    let prompt = format!(
        "Crée une stratégie de marque avancée pour {} dans le secteur {}:\n\n\
         Analyse du marché:\n\
         - Tendances: {}\n\
         - Couleurs populaires: {}\n\
         - Styles de design: {}\n\
         - Attentes des consommateurs: {}\n\
         - Facteurs de différenciation: {}\n\n\
         Génère une stratégie qui se différencie de la concurrence, répond aux \
         attentes des consommateurs, capitalise sur les tendances du marché et \
         crée une connexion émotionnelle.\n\n\
         Format JSON:\n\
         {{\n\
           \"brand_voice\": \"ton de marque unique\",\n\
           \"brand_values\": [\"valeur1\", \"valeur2\", \"valeur3\", \"valeur4\", \"valeur5\"],\n\
           \"tagline\": \"slogan différenciant\",\n\
           \"positioning\": \"positionnement unique\",\n\
           \"brand_promise\": \"promesse de valeur\"\n\
         }}",
        business_name,
        industry.label(),
        analysis.market_trends.join(", "),
        analysis.popular_colors.join(", "),
        analysis.design_styles.join(", "),
        analysis.consumer_expectations.join(", "),
        analysis.differentiation_factors.join(", "),
    );

    let reply = model
        .complete(
            "Tu es un stratège de marque expert qui crée des identités uniques et mémorables.",
            &prompt,
            ChatParams {
                max_tokens: 1500,
                temperature: 0.7,
            },
        )
        .await?;
    parse_reply(&reply)
}

async fn generate_advanced_colors(
    model: &dyn ChatModel,
    industry: Industry,
    style_preferences: &[StylePreference],
    color_preferences: &[String],
    strategy: &StrategyReply,
) -> Result<ColorScheme, String> {
    let style = style_preferences
        .first()
        .map(|s| s.label())
        .unwrap_or("moderne");
    let colors = if color_preferences.is_empty() {
        "aucune préférence".to_string()
    } else {
        color_preferences.join(", ")
    };

    let prompt = format!(
        "Crée une palette de couleurs unique pour:\n\n\
         Secteur: {}\n\
         Style préféré: {}\n\
         Couleurs préférées: {}\n\
         Ton de marque: {}\n\
         Positionnement: {}\n\n\
         Génère une palette harmonieuse et professionnelle avec une couleur \
         principale, une couleur secondaire, une couleur d'accent, une couleur \
         de fond et une couleur de texte.\n\n\
         Format JSON:\n\
         {{\n\
           \"primary\": \"#hexcode\",\n\
           \"secondary\": \"#hexcode\",\n\
           \"accent\": \"#hexcode\",\n\
           \"background\": \"#hexcode\",\n\
           \"text\": \"#hexcode\"\n\
         }}",
        industry.label(),
        style,
        colors,
        strategy.brand_voice,
        strategy.positioning,
    );

    let reply = model
        .complete(
            "Tu es un expert en théorie des couleurs et design de marque.",
            &prompt,
            ChatParams {
                max_tokens: 800,
                temperature: 0.6,
            },
        )
        .await?;
    let parsed: ColorReply = parse_reply(&reply)?;
    Ok(ColorScheme {
        primary: parsed.primary,
        secondary: parsed.secondary,
        accent: parsed.accent,
        background: parsed.background,
        text: parsed.text,
    })
}

async fn generate_advanced_typography(
    model: &dyn ChatModel,
    industry: Industry,
    style_preferences: &[StylePreference],
    strategy: &StrategyReply,
) -> Result<Typography, String> {
    let style = style_preferences
        .first()
        .map(|s| s.label())
        .unwrap_or("moderne");

    let prompt = format!(
        "Recommande une combinaison de polices pour:\n\n\
         Style préféré: {}\n\
         Ton de marque: {}\n\
         Secteur: {}\n\
         Positionnement: {}\n\n\
         Recommande une police pour les titres, une police pour le corps de \
         texte et des tailles optimales. Utilise des polices Google Fonts \
         populaires et accessibles.\n\n\
         Format JSON:\n\
         {{\n\
           \"heading_font\": \"nom de la police\",\n\
           \"body_font\": \"nom de la police\",\n\
           \"font_sizes\": {{\"h1\": \"taille\", \"h2\": \"taille\", \"h3\": \"taille\", \"body\": \"taille\"}}\n\
         }}",
        style,
        strategy.brand_voice,
        industry.label(),
        strategy.positioning,
    );

    let reply = model
        .complete(
            "Tu es un expert en typographie et design web.",
            &prompt,
            ChatParams {
                max_tokens: 600,
                temperature: 0.5,
            },
        )
        .await?;
    let parsed: TypographyReply = parse_reply(&reply)?;
    Ok(Typography {
        heading_font: parsed.heading_font,
        body_font: parsed.body_font,
        font_sizes: parsed.font_sizes,
    })
}

/// No real image is generated here: the logo starts life as a templated
/// placeholder-service URL in the brand colors.
fn logo_placeholder_url(business_name: &str, colors: &ColorScheme) -> String {
    format!(
        "https://via.placeholder.com/200x80/{}/{}?text={}",
        colors.primary.trim_start_matches('#'),
        colors.text.trim_start_matches('#'),
        business_name.replace(' ', "+")
    )
}
