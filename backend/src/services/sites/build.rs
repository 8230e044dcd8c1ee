//! Static site construction.
//!
//! `build_site` turns a structure + branding + asset set into rendered
//! HTML/CSS/JS files on disk, advancing the status store at each stage.
//! Status writes are strictly forward: a stage failure records an error
//! entry and nothing is written afterwards for that site.

use super::templates;
use crate::status::StatusStore;
use chrono::{Datelike, Utc};
use common::model::asset::{AssetKind, AssetRecord};
use common::model::branding::BrandIdentity;
use common::model::site::SiteStructure;
use common::requests::GenerateSiteRequest;
use common::status::{SiteState, SiteStatus};
use log::{error, info};
use serde_json::json;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::fs;

/// Result of a successful build, including the denormalized record that
/// `save_site_to_database` persists.
#[derive(Debug, Clone)]
pub struct BuiltSite {
    pub site_id: String,
    pub preview_url: String,
    pub site_path: PathBuf,
    pub files: Vec<String>,
    pub record: serde_json::Value,
}

pub async fn build_site(
    store: &dyn StatusStore,
    sites_root: &Path,
    preview_base_url: &str,
    business: &GenerateSiteRequest,
    structure: &SiteStructure,
    branding: &BrandIdentity,
    assets: &[AssetRecord],
) -> Result<BuiltSite, String> {
    let site_id = structure.site_id.clone();
    info!("construction du site: {}", site_id);

    match build_stages(
        store,
        sites_root,
        preview_base_url,
        business,
        structure,
        branding,
        assets,
    )
    .await
    {
        Ok(built) => {
            store
                .put(
                    &site_id,
                    SiteStatus::new(
                        &site_id,
                        SiteState::Completed,
                        100.0,
                        "Site construit avec succès",
                    ),
                )
                .await;
            info!("site construit avec succès: {}", site_id);
            Ok(built)
        }
        Err(e) => {
            error!("erreur lors de la construction du site {}: {}", site_id, e);
            let mut status =
                SiteStatus::new(&site_id, SiteState::Error, 0.0, &format!("Erreur: {}", e));
            status.error_message = Some(e.clone());
            store.put(&site_id, status).await;
            Err(e)
        }
    }
}

async fn build_stages(
    store: &dyn StatusStore,
    sites_root: &Path,
    preview_base_url: &str,
    business: &GenerateSiteRequest,
    structure: &SiteStructure,
    branding: &BrandIdentity,
    assets: &[AssetRecord],
) -> Result<BuiltSite, String> {
    let site_id = &structure.site_id;

    let step = |state, progress, step: &str| SiteStatus::new(site_id, state, progress, step);

    store
        .put(site_id, step(SiteState::Building, 10.0, "Préparation de la construction"))
        .await;
    let template_data = prepare_template_data(business, branding, assets);

    store
        .put(site_id, step(SiteState::Building, 30.0, "Génération des pages"))
        .await;
    let mut site_files = generate_pages(structure, &template_data);

    store
        .put(site_id, step(SiteState::Building, 60.0, "Génération des assets"))
        .await;
    site_files.insert("assets/custom.css".to_string(), custom_css(branding));
    site_files.insert("assets/custom.js".to_string(), custom_js());

    store
        .put(site_id, step(SiteState::Building, 80.0, "Sauvegarde des fichiers"))
        .await;
    let site_path = save_site_files(sites_root, site_id, &site_files).await?;

    let preview_url = format!("{}/{}", preview_base_url.trim_end_matches('/'), site_id);
    let mut files: Vec<String> = site_files.keys().cloned().collect();
    files.sort();

    let record = json!({
        "site_id": site_id,
        "preview_url": preview_url,
        "site_path": site_path.display().to_string(),
        "files": files,
        "branding": branding,
        "structure": structure,
        "assets": assets,
        "created_at": Utc::now().to_rfc3339(),
    });

    Ok(BuiltSite {
        site_id: site_id.clone(),
        preview_url,
        site_path,
        files,
        record,
    })
}

/// Simulated CDN deployment: waits out the configured propagation delay and
/// flips the status to deployed.
pub async fn deploy_site(
    store: &dyn StatusStore,
    site_id: &str,
    delay: Duration,
) -> Result<(), String> {
    info!("déploiement du site: {}", site_id);
    if !delay.is_zero() {
        tokio::time::sleep(delay).await;
    }
    store
        .put(
            site_id,
            SiteStatus::new(site_id, SiteState::Deployed, 100.0, "Site déployé avec succès"),
        )
        .await;
    info!("site déployé avec succès: {}", site_id);
    Ok(())
}

/// Persist the denormalized site record next to the rendered files. Stands
/// in for a real database write.
pub async fn save_site_to_database(
    sites_root: &Path,
    built: &BuiltSite,
    user_id: &str,
) -> Result<(), String> {
    let db_data = json!({
        "user_id": user_id,
        "site_data": built.record,
        "created_at": Utc::now().to_rfc3339(),
        "updated_at": Utc::now().to_rfc3339(),
    });
    let path = sites_root.join(&built.site_id).join("site_data.json");
    let body = serde_json::to_string_pretty(&db_data)
        .map_err(|e| format!("Sérialisation du site impossible: {}", e))?;
    fs::write(&path, body)
        .await
        .map_err(|e| format!("Écriture de {} impossible: {}", path.display(), e))?;
    info!("données du site sauvegardées: {}", built.site_id);
    Ok(())
}

/// Merge branding, fixed navigation, placeholder copy and the asset URLs
/// into the flat map consumed by the page template. Generated and uploaded
/// assets are interchangeable here: only `asset_type` is consulted.
fn prepare_template_data(
    business: &GenerateSiteRequest,
    branding: &BrandIdentity,
    assets: &[AssetRecord],
) -> HashMap<String, String> {
    let by_kind = |kind: AssetKind| -> Vec<&AssetRecord> {
        assets.iter().filter(|a| a.asset_type == kind).collect()
    };
    let first_url = |kind: AssetKind, fallback: &str| -> String {
        by_kind(kind)
            .first()
            .map(|a| a.url.clone())
            .unwrap_or_else(|| fallback.to_string())
    };

    let navigation = [
        ("Accueil", "#home"),
        ("Produits", "#products"),
        ("À propos", "#about"),
        ("Contact", "#contact"),
    ];
    let nav_links = navigation
        .iter()
        .map(|(label, url)| templates::nav_link(url, label))
        .collect::<Vec<_>>()
        .join("\n");
    let mobile_nav_links = navigation
        .iter()
        .map(|(label, url)| templates::mobile_nav_link(url, label))
        .collect::<Vec<_>>()
        .join("\n");
    let footer_nav_links = navigation
        .iter()
        .map(|(label, url)| templates::footer_nav_link(url, label))
        .collect::<Vec<_>>()
        .join("\n");

    let icons = by_kind(AssetKind::Icon);
    let icon_url = |i: usize| {
        icons
            .get(i)
            .map(|a| a.url.clone())
            .unwrap_or_else(|| "/assets/icon.png".to_string())
    };
    let features = [
        ("Qualité Premium", "Des produits de la plus haute qualité"),
        ("Livraison Rapide", "Livraison en 24-48h partout en France"),
        ("Support Client", "Une équipe dédiée à votre service"),
    ];
    let feature_cards = features
        .iter()
        .enumerate()
        .map(|(i, (title, desc))| templates::feature_card(&icon_url(i), title, desc))
        .collect::<Vec<_>>()
        .join("\n");

    let products = by_kind(AssetKind::Product);
    let product_url = |i: usize| {
        products
            .get(i)
            .map(|a| a.url.clone())
            .unwrap_or_else(|| "/assets/product.png".to_string())
    };
    let prices = ["29,99 €", "39,99 €", "49,99 €"];
    let product_cards = (0..3)
        .map(|i| {
            templates::product_card(
                &product_url(i),
                &format!("Produit {}", i + 1),
                &format!("Description du produit {}", i + 1),
                prices[i],
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    let value_items = branding
        .brand_values
        .iter()
        .map(|v| templates::value_item(v))
        .collect::<Vec<_>>()
        .join("\n");

    let mut data = HashMap::new();
    let mut put = |k: &str, v: String| {
        data.insert(k.to_string(), v);
    };

    put("site_name", business.business_name.clone());
    put("site_description", business.description.clone());
    put("primary_color", branding.color_scheme.primary.clone());
    put("secondary_color", branding.color_scheme.secondary.clone());
    put("accent_color", branding.color_scheme.accent.clone());
    put("background_color", branding.color_scheme.background.clone());
    put("text_color", branding.color_scheme.text.clone());
    put("heading_font", branding.typography.heading_font.clone());
    put("body_font", branding.typography.body_font.clone());
    put(
        "heading_font_query",
        branding.typography.heading_font.replace(' ', "+"),
    );
    put(
        "body_font_query",
        branding.typography.body_font.replace(' ', "+"),
    );
    put("logo_url", first_url(AssetKind::Logo, "/assets/logo.png"));
    put(
        "favicon_url",
        first_url(AssetKind::Favicon, "/assets/favicon.ico"),
    );
    put("hero_image", first_url(AssetKind::Hero, "/assets/hero.jpg"));
    put("hero_image_alt", "Bannière principale".to_string());
    put(
        "hero_title",
        format!("Bienvenue chez {}", business.business_name),
    );
    put(
        "hero_subtitle",
        "Découvrez nos produits et services exceptionnels".to_string(),
    );
    put("cta_primary", "Découvrir".to_string());
    put("cta_secondary", "En savoir plus".to_string());
    put("features_title", "Nos Avantages".to_string());
    put("features_subtitle", "Pourquoi nous choisir".to_string());
    put("feature_cards", feature_cards);
    put("products_title", "Nos Produits".to_string());
    put("products_subtitle", "Découvrez notre sélection".to_string());
    put("product_cards", product_cards);
    put("about_title", "À Propos de Nous".to_string());
    put("about_description", business.description.clone());
    put("value_items", value_items);
    put("contact_title", "Contactez-Nous".to_string());
    put(
        "contact_subtitle",
        "Nous sommes là pour vous aider".to_string(),
    );
    put("contact_email", "contact@monentreprise.com".to_string());
    put("nav_links", nav_links);
    put("mobile_nav_links", mobile_nav_links);
    put("footer_nav_links", footer_nav_links);
    put("current_year", Utc::now().year().to_string());
    put("page_title", "Accueil".to_string());
    put("page_description", "Bienvenue sur notre site".to_string());
    put("page_keywords", "entreprise, produits, services".to_string());

    data
}

/// Render every page of the structure through the generic template.
fn generate_pages(
    structure: &SiteStructure,
    template_data: &HashMap<String, String>,
) -> HashMap<String, String> {
    let mut site_files = HashMap::new();
    site_files.insert(
        "index.html".to_string(),
        templates::render(templates::PAGE_TEMPLATE, template_data),
    );

    for page in &structure.pages {
        if page.page_type == "home" {
            continue;
        }
        let mut page_data = template_data.clone();
        page_data.insert("page_title".to_string(), page.page_name.clone());
        if let Some(desc) = page.meta_data.get("description").and_then(|v| v.as_str()) {
            page_data.insert("page_description".to_string(), desc.to_string());
        }
        if let Some(keywords) = page.meta_data.get("keywords").and_then(|v| v.as_array()) {
            let joined = keywords
                .iter()
                .filter_map(|k| k.as_str())
                .collect::<Vec<_>>()
                .join(", ");
            page_data.insert("page_keywords".to_string(), joined);
        }
        site_files.insert(
            format!("{}.html", sanitize_page_id(&page.page_id)),
            templates::render(templates::PAGE_TEMPLATE, &page_data),
        );
    }

    site_files
}

/// The page id becomes a file name; it comes from the model, so anything
/// outside a conservative character set is replaced.
fn sanitize_page_id(page_id: &str) -> String {
    let cleaned: String = page_id
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '-'
            }
        })
        .collect();
    if cleaned.is_empty() {
        "page".to_string()
    } else {
        cleaned
    }
}

fn custom_css(branding: &BrandIdentity) -> String {
    format!(
        r#"/* CSS personnalisé généré automatiquement */
:root {{
    --primary-color: {primary};
    --secondary-color: {secondary};
    --accent-color: {accent};
    --background-color: {background};
    --text-color: {text};
}}

@keyframes fadeIn {{
    from {{ opacity: 0; transform: translateY(20px); }}
    to {{ opacity: 1; transform: translateY(0); }}
}}

.animate-fade-in {{
    animation: fadeIn 0.6s ease-out forwards;
}}

.gradient-bg {{
    background: linear-gradient(135deg, var(--primary-color), var(--accent-color));
}}

.text-primary {{ color: var(--primary-color); }}
.bg-primary {{ background-color: var(--primary-color); }}
.border-primary {{ border-color: var(--primary-color); }}

@media (max-width: 768px) {{
    .hero-section h1 {{
        font-size: 2.5rem;
    }}

    .section-padding {{
        padding: 40px 0;
    }}
}}
"#,
        primary = branding.color_scheme.primary,
        secondary = branding.color_scheme.secondary,
        accent = branding.color_scheme.accent,
        background = branding.color_scheme.background,
        text = branding.color_scheme.text,
    )
}

fn custom_js() -> String {
    r##"// JavaScript personnalisé généré automatiquement

function toggleMobileMenu() {
    const menu = document.getElementById('mobile-menu');
    if (menu) {
        menu.classList.toggle('hidden');
    }
}

document.addEventListener('DOMContentLoaded', function() {
    document.querySelectorAll('a[href^="#"]').forEach(anchor => {
        anchor.addEventListener('click', function (e) {
            e.preventDefault();
            const target = document.querySelector(this.getAttribute('href'));
            if (target) {
                target.scrollIntoView({ behavior: 'smooth', block: 'start' });
            }
        });
    });

    const observer = new IntersectionObserver((entries) => {
        entries.forEach(entry => {
            if (entry.isIntersecting) {
                entry.target.classList.add('animate-fade-in');
            }
        });
    }, { threshold: 0.1, rootMargin: '0px 0px -50px 0px' });

    document.querySelectorAll('.animate-on-scroll').forEach(el => {
        observer.observe(el);
    });

    document.querySelectorAll('form').forEach(form => {
        form.addEventListener('submit', function(e) {
            e.preventDefault();
        });
    });
});
"##
    .to_string()
}

async fn save_site_files(
    sites_root: &Path,
    site_id: &str,
    site_files: &HashMap<String, String>,
) -> Result<PathBuf, String> {
    let site_path = sites_root.join(site_id);
    fs::create_dir_all(site_path.join("assets"))
        .await
        .map_err(|e| format!("Création de {} impossible: {}", site_path.display(), e))?;

    for (relative, content) in site_files {
        let full_path = site_path.join(relative);
        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| format!("Création de {} impossible: {}", parent.display(), e))?;
        }
        fs::write(&full_path, content)
            .await
            .map_err(|e| format!("Écriture de {} impossible: {}", full_path.display(), e))?;
    }

    info!("fichiers sauvegardés dans: {}", site_path.display());
    Ok(site_path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::status::testing::RecordingStore;
    use common::model::branding::{ColorScheme, Typography};
    use tempfile::TempDir;

    fn sample_branding() -> BrandIdentity {
        BrandIdentity {
            logo_url: None,
            color_scheme: ColorScheme {
                primary: "#D35400".to_string(),
                secondary: "#FDF2E9".to_string(),
                accent: "#27AE60".to_string(),
                background: "#FFFFFF".to_string(),
                text: "#1F2937".to_string(),
            },
            typography: Typography {
                heading_font: "Playfair Display".to_string(),
                body_font: "Source Sans Pro".to_string(),
                font_sizes: HashMap::new(),
            },
            brand_voice: "chaleureux".to_string(),
            brand_values: vec!["qualité".to_string(), "authenticité".to_string()],
            tagline: "Le goût du vrai".to_string(),
        }
    }

    fn sample_request() -> GenerateSiteRequest {
        serde_json::from_value(json!({
            "user_id": "u1",
            "business_name": "Café Luna",
            "industry": "Alimentation & Boissons",
            "description": "Torréfacteur artisanal et salon de thé de quartier",
            "target_audience": "Jeunes urbains amateurs de café"
        }))
        .unwrap()
    }

    fn sample_structure(site_id: &str) -> SiteStructure {
        serde_json::from_value(json!({
            "site_id": site_id,
            "pages": [
                {"page_id": "home", "page_name": "Accueil", "page_type": "home",
                 "sections": [], "meta_data": {}, "seo_data": {}},
                {"page_id": "contact", "page_name": "Contact", "page_type": "contact",
                 "sections": [],
                 "meta_data": {"description": "Écrivez-nous", "keywords": ["contact", "café"]},
                 "seo_data": {}}
            ],
            "navigation": {},
            "global_settings": {},
            "integrations": []
        }))
        .unwrap()
    }

    fn sample_assets(site_id: &str) -> Vec<AssetRecord> {
        // Mix of generated-style and uploaded-style records; the builder
        // must treat them alike.
        serde_json::from_value(json!([
            {"asset_id": format!("logo_{site_id}"), "asset_type": "logo",
             "url": "https://cdn.test/s/logo.png", "alt_text": "Logo",
             "dimensions": {"width": 200, "height": 80}, "file_size": 1200},
            {"asset_id": "upload-1", "asset_type": "hero",
             "url": "https://cdn.test/s/hero/upload.jpg", "alt_text": null,
             "dimensions": null, "file_size": null}
        ]))
        .unwrap()
    }

    #[tokio::test]
    async fn successful_build_writes_the_exact_status_sequence() {
        let dir = TempDir::new().unwrap();
        let store = RecordingStore::default();
        let built = build_site(
            &store,
            dir.path(),
            "https://preview.test",
            &sample_request(),
            &sample_structure("site-1"),
            &sample_branding(),
            &sample_assets("site-1"),
        )
        .await
        .unwrap();

        let history = store.history.lock().unwrap();
        let seq: Vec<(SiteState, f32)> = history
            .iter()
            .map(|s| (s.status, s.progress_percentage))
            .collect();
        assert_eq!(
            seq,
            vec![
                (SiteState::Building, 10.0),
                (SiteState::Building, 30.0),
                (SiteState::Building, 60.0),
                (SiteState::Building, 80.0),
                (SiteState::Completed, 100.0),
            ]
        );
        assert_eq!(history[0].current_step, "Préparation de la construction");
        assert_eq!(history[4].current_step, "Site construit avec succès");

        assert_eq!(built.preview_url, "https://preview.test/site-1");
        assert!(built.files.contains(&"index.html".to_string()));
        assert!(built.files.contains(&"contact.html".to_string()));
        assert!(built.files.contains(&"assets/custom.css".to_string()));
        assert!(built.files.contains(&"assets/custom.js".to_string()));
    }

    #[tokio::test]
    async fn rendered_pages_carry_branding_and_asset_urls() {
        let dir = TempDir::new().unwrap();
        let store = RecordingStore::default();
        build_site(
            &store,
            dir.path(),
            "https://preview.test",
            &sample_request(),
            &sample_structure("site-2"),
            &sample_branding(),
            &sample_assets("site-2"),
        )
        .await
        .unwrap();

        let index =
            std::fs::read_to_string(dir.path().join("site-2").join("index.html")).unwrap();
        assert!(index.contains("Café Luna"));
        assert!(index.contains("https://cdn.test/s/logo.png"));
        // Uploaded hero record is consumed exactly like a generated one.
        assert!(index.contains("https://cdn.test/s/hero/upload.jpg"));
        assert!(!index.contains("{{"));

        let css =
            std::fs::read_to_string(dir.path().join("site-2/assets/custom.css")).unwrap();
        assert!(css.contains("--primary-color: #D35400;"));

        let contact =
            std::fs::read_to_string(dir.path().join("site-2").join("contact.html")).unwrap();
        assert!(contact.contains("<title>Contact - Café Luna</title>"));
        assert!(contact.contains("Écrivez-nous"));
        assert!(contact.contains("contact, café"));
    }

    #[tokio::test]
    async fn pages_and_js_keep_their_anchor_fragments() {
        // The template and script bodies contain `"#` sequences; make sure
        // the emitted files carry everything past the first one.
        let dir = TempDir::new().unwrap();
        let store = RecordingStore::default();
        build_site(
            &store,
            dir.path(),
            "https://preview.test",
            &sample_request(),
            &sample_structure("site-4"),
            &sample_branding(),
            &sample_assets("site-4"),
        )
        .await
        .unwrap();

        let index =
            std::fs::read_to_string(dir.path().join("site-4").join("index.html")).unwrap();
        assert!(index.contains("href=\"#contact\""));
        assert!(index.contains("Site créé avec KLM Pegasus"));
        assert!(index.trim_end().ends_with("</html>"));

        let js =
            std::fs::read_to_string(dir.path().join("site-4/assets/custom.js")).unwrap();
        assert!(js.contains("a[href^=\"#\"]"));
        assert!(js.contains("IntersectionObserver"));
    }

    #[tokio::test]
    async fn failed_save_records_error_and_stops_writing() {
        let dir = TempDir::new().unwrap();
        // A regular file where the output directory should be forces the
        // save stage to fail.
        let blocking_file = dir.path().join("blocked");
        std::fs::write(&blocking_file, "x").unwrap();

        let store = RecordingStore::default();
        let result = build_site(
            &store,
            &blocking_file,
            "https://preview.test",
            &sample_request(),
            &sample_structure("site-3"),
            &sample_branding(),
            &sample_assets("site-3"),
        )
        .await;
        assert!(result.is_err());

        let history = store.history.lock().unwrap();
        let last = history.last().unwrap();
        assert_eq!(last.status, SiteState::Error);
        assert_eq!(last.progress_percentage, 0.0);
        assert!(last.error_message.as_deref().unwrap_or("").len() > 0);
        // Nothing after the error entry.
        assert!(history
            .iter()
            .all(|s| s.status != SiteState::Completed && s.status != SiteState::Deployed));
    }

    #[tokio::test]
    async fn deploy_flips_status_to_deployed() {
        let store = RecordingStore::default();
        deploy_site(&store, "site-4", Duration::ZERO).await.unwrap();
        let history = store.history.lock().unwrap();
        assert_eq!(history.last().unwrap().status, SiteState::Deployed);
        assert_eq!(history.last().unwrap().current_step, "Site déployé avec succès");
    }

    #[test]
    fn page_ids_are_sanitized_for_file_names() {
        assert_eq!(sanitize_page_id("a-propos"), "a-propos");
        assert_eq!(sanitize_page_id("../etc/passwd"), "---etc-passwd");
        assert_eq!(sanitize_page_id(""), "page");
    }
}
