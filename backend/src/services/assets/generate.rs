//! Placeholder asset rasterization.
//!
//! All visuals are flat geometric compositions derived from the brand color
//! scheme; no text is drawn. Each raster is encoded into a temp file and
//! then pushed through the storage abstraction, which hands back the public
//! URL recorded on the `AssetRecord`.

use super::storage::AssetStorage;
use common::model::asset::{AssetKind, AssetRecord, Dimensions};
use common::model::branding::{BrandIdentity, ColorScheme};
use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;
use image::{load_from_memory, DynamicImage, ImageFormat, Rgba, RgbaImage};
use log::info;
use std::io::{Read, Seek, SeekFrom};
use tempfile::NamedTempFile;

const PRODUCT_COUNT: u32 = 6;
const ICON_NAMES: [&str; 4] = ["shipping", "support", "security", "quality"];
const MAX_PROCESSED_EDGE: u32 = 1200;
const JPEG_QUALITY: u8 = 85;

/// Generate the full placeholder asset set for a site: logo, hero banner,
/// product images, feature icons and favicon.
pub async fn generate_site_assets(
    storage: &dyn AssetStorage,
    site_id: &str,
    business_name: &str,
    branding: &BrandIdentity,
) -> Result<Vec<AssetRecord>, String> {
    let scheme = &branding.color_scheme;
    let mut assets = Vec::new();

    assets.push(generate_logo(storage, site_id, business_name, scheme).await?);
    assets.push(generate_hero(storage, site_id, scheme).await?);
    for i in 1..=PRODUCT_COUNT {
        assets.push(generate_product_image(storage, site_id, i, scheme).await?);
    }
    for name in ICON_NAMES {
        assets.push(generate_icon(storage, site_id, name, scheme).await?);
    }
    assets.push(generate_favicon(storage, site_id, scheme).await?);

    info!("{} assets générés pour le site {}", assets.len(), site_id);
    Ok(assets)
}

async fn generate_logo(
    storage: &dyn AssetStorage,
    site_id: &str,
    business_name: &str,
    scheme: &ColorScheme,
) -> Result<AssetRecord, String> {
    let (w, h) = (200u32, 80u32);
    let mut img = RgbaImage::from_pixel(w, h, Rgba([0, 0, 0, 0]));
    fill_rect(&mut img, 10, 20, w - 10, h - 20, parse_hex(&scheme.primary));
    // Centered mark standing in for the wordmark.
    fill_disc(&mut img, w / 2, h / 2, 12, parse_hex(&scheme.accent));

    store_png(
        storage,
        img,
        &format!("{}/logo.png", site_id),
        AssetRecord {
            asset_id: format!("logo_{}", site_id),
            asset_type: AssetKind::Logo,
            url: String::new(),
            alt_text: Some(format!("Logo {}", business_name)),
            dimensions: Some(Dimensions { width: w, height: h }),
            file_size: None,
        },
    )
    .await
}

async fn generate_hero(
    storage: &dyn AssetStorage,
    site_id: &str,
    scheme: &ColorScheme,
) -> Result<AssetRecord, String> {
    let (w, h) = (1200u32, 600u32);
    let top = parse_hex(&scheme.primary);
    let bottom = parse_hex(&scheme.secondary);
    let mut img = RgbaImage::new(w, h);
    for y in 0..h {
        let t = y as f32 / (h - 1) as f32;
        let mut color = lerp_color(top, bottom, t);
        // Darken for legible overlaid text on the rendered page.
        for c in color.0.iter_mut().take(3) {
            *c = (*c as f32 * 0.65) as u8;
        }
        color.0[3] = 255;
        for x in 0..w {
            img.put_pixel(x, y, color);
        }
    }

    store_png(
        storage,
        img,
        &format!("{}/hero.png", site_id),
        AssetRecord {
            asset_id: format!("hero_{}", site_id),
            asset_type: AssetKind::Hero,
            url: String::new(),
            alt_text: Some("Bannière principale".to_string()),
            dimensions: Some(Dimensions { width: w, height: h }),
            file_size: None,
        },
    )
    .await
}

async fn generate_product_image(
    storage: &dyn AssetStorage,
    site_id: &str,
    index: u32,
    scheme: &ColorScheme,
) -> Result<AssetRecord, String> {
    let (w, h) = (400u32, 400u32);
    let mut img = RgbaImage::from_pixel(w, h, parse_hex(&scheme.background));
    let border = parse_hex(&scheme.primary);
    fill_rect(&mut img, 0, 0, w, 2, border);
    fill_rect(&mut img, 0, h - 2, w, h, border);
    fill_rect(&mut img, 0, 0, 2, h, border);
    fill_rect(&mut img, w - 2, 0, w, h, border);
    // One accent dot per product index, centered row.
    let accent = parse_hex(&scheme.accent);
    let spacing = 36u32;
    let start_x = w / 2 - (index - 1) * spacing / 2;
    for i in 0..index {
        fill_disc(&mut img, start_x + i * spacing, h / 2, 14, accent);
    }

    store_png(
        storage,
        img,
        &format!("{}/products/product_{}.png", site_id, index),
        AssetRecord {
            asset_id: format!("product_{}_{}", site_id, index),
            asset_type: AssetKind::Product,
            url: String::new(),
            alt_text: Some(format!("PRODUIT {}", index)),
            dimensions: Some(Dimensions { width: w, height: h }),
            file_size: None,
        },
    )
    .await
}

async fn generate_icon(
    storage: &dyn AssetStorage,
    site_id: &str,
    name: &str,
    scheme: &ColorScheme,
) -> Result<AssetRecord, String> {
    let size = 64u32;
    let mut img = RgbaImage::from_pixel(size, size, Rgba([0, 0, 0, 0]));
    fill_disc(&mut img, size / 2, size / 2, 28, parse_hex(&scheme.accent));
    fill_disc(&mut img, size / 2, size / 2, 10, Rgba([255, 255, 255, 255]));

    store_png(
        storage,
        img,
        &format!("{}/icons/icon_{}.png", site_id, name),
        AssetRecord {
            asset_id: format!("icon_{}_{}", name, site_id),
            asset_type: AssetKind::Icon,
            url: String::new(),
            alt_text: Some(format!("Icône {}", name)),
            dimensions: Some(Dimensions {
                width: size,
                height: size,
            }),
            file_size: None,
        },
    )
    .await
}

async fn generate_favicon(
    storage: &dyn AssetStorage,
    site_id: &str,
    scheme: &ColorScheme,
) -> Result<AssetRecord, String> {
    let size = 32u32;
    let mut img = RgbaImage::from_pixel(size, size, parse_hex(&scheme.primary));
    fill_disc(&mut img, size / 2, size / 2, 10, parse_hex(&scheme.accent));

    let bytes = encode_via_temp(DynamicImage::ImageRgba8(img), ImageFormat::Ico)?;
    let file_size = bytes.len() as u64;
    let url = storage
        .put(&format!("{}/favicon.ico", site_id), bytes, "image/x-icon")
        .await?;

    Ok(AssetRecord {
        asset_id: format!("favicon_{}", site_id),
        asset_type: AssetKind::Favicon,
        url,
        alt_text: None,
        dimensions: Some(Dimensions {
            width: size,
            height: size,
        }),
        file_size: Some(file_size),
    })
}

/// Remove every stored object belonging to a site.
pub async fn cleanup_assets(storage: &dyn AssetStorage, site_id: &str) -> Result<(), String> {
    storage.delete_prefix(site_id).await
}

/// Downscale to at most 1200×1200, flatten the alpha channel over white and
/// re-encode as JPEG. Returns the processed bytes.
pub fn optimize_image(bytes: &[u8]) -> Result<Vec<u8>, String> {
    let img = load_from_memory(bytes).map_err(|e| format!("Image illisible: {}", e))?;
    let resized = if img.width() > MAX_PROCESSED_EDGE || img.height() > MAX_PROCESSED_EDGE {
        img.resize(MAX_PROCESSED_EDGE, MAX_PROCESSED_EDGE, FilterType::Lanczos3)
    } else {
        img
    };

    let rgba = resized.to_rgba8();
    let (w, h) = rgba.dimensions();
    let mut background = RgbaImage::from_pixel(w, h, Rgba([255, 255, 255, 255]));
    image::imageops::overlay(&mut background, &rgba, 0, 0);
    let rgb = DynamicImage::ImageRgba8(background).to_rgb8();

    let mut tmp =
        NamedTempFile::new().map_err(|e| format!("Fichier temporaire impossible: {}", e))?;
    {
        let encoder = JpegEncoder::new_with_quality(tmp.as_file_mut(), JPEG_QUALITY);
        rgb.write_with_encoder(encoder)
            .map_err(|e| format!("Encodage JPEG impossible: {}", e))?;
    }
    read_back(&mut tmp)
}

/// Fetch an external image, optimize it and store it under the site prefix.
pub async fn download_and_process_image(
    http: &reqwest::Client,
    storage: &dyn AssetStorage,
    site_id: &str,
    source_url: &str,
) -> Result<AssetRecord, String> {
    let response = http
        .get(source_url)
        .send()
        .await
        .map_err(|e| format!("Téléchargement de {} impossible: {}", source_url, e))?;
    if !response.status().is_success() {
        return Err(format!(
            "Le serveur d'images a répondu {}",
            response.status().as_u16()
        ));
    }
    let bytes = response
        .bytes()
        .await
        .map_err(|e| format!("Lecture de l'image impossible: {}", e))?;

    let processed = optimize_image(&bytes)?;
    let img = load_from_memory(&processed).map_err(|e| format!("Image illisible: {}", e))?;
    let (w, h) = (img.width(), img.height());
    let file_size = processed.len() as u64;

    let key = format!("{}/image/{}.jpg", site_id, uuid::Uuid::new_v4());
    let asset_id = key
        .rsplit('/')
        .next()
        .unwrap_or_default()
        .trim_end_matches(".jpg")
        .to_string();
    let url = storage.put(&key, processed, "image/jpeg").await?;

    Ok(AssetRecord {
        asset_id,
        asset_type: AssetKind::Image,
        url,
        alt_text: None,
        dimensions: Some(Dimensions { width: w, height: h }),
        file_size: Some(file_size),
    })
}

async fn store_png(
    storage: &dyn AssetStorage,
    img: RgbaImage,
    key: &str,
    mut record: AssetRecord,
) -> Result<AssetRecord, String> {
    let bytes = encode_via_temp(DynamicImage::ImageRgba8(img), ImageFormat::Png)?;
    record.file_size = Some(bytes.len() as u64);
    record.url = storage.put(key, bytes, "image/png").await?;
    Ok(record)
}

fn encode_via_temp(img: DynamicImage, format: ImageFormat) -> Result<Vec<u8>, String> {
    let mut tmp =
        NamedTempFile::new().map_err(|e| format!("Fichier temporaire impossible: {}", e))?;
    img.write_to(tmp.as_file_mut(), format)
        .map_err(|e| format!("Encodage de l'image impossible: {}", e))?;
    read_back(&mut tmp)
}

fn read_back(tmp: &mut NamedTempFile) -> Result<Vec<u8>, String> {
    let file = tmp.as_file_mut();
    file.seek(SeekFrom::Start(0))
        .map_err(|e| format!("Lecture du fichier temporaire impossible: {}", e))?;
    let mut bytes = Vec::new();
    file.read_to_end(&mut bytes)
        .map_err(|e| format!("Lecture du fichier temporaire impossible: {}", e))?;
    Ok(bytes)
}

/// `#RRGGBB` (or `#RGB`) to an opaque pixel; malformed input falls back to
/// a neutral gray rather than failing asset generation.
fn parse_hex(hex: &str) -> Rgba<u8> {
    let stripped = hex.trim().trim_start_matches('#');
    let expanded: String = if stripped.len() == 3 {
        stripped.chars().flat_map(|c| [c, c]).collect()
    } else {
        stripped.to_string()
    };
    if expanded.len() == 6 {
        if let Ok(value) = u32::from_str_radix(&expanded, 16) {
            return Rgba([(value >> 16) as u8, (value >> 8) as u8, value as u8, 255]);
        }
    }
    Rgba([128, 128, 128, 255])
}

fn lerp_color(a: Rgba<u8>, b: Rgba<u8>, t: f32) -> Rgba<u8> {
    let mix = |x: u8, y: u8| (x as f32 + (y as f32 - x as f32) * t).round() as u8;
    Rgba([mix(a[0], b[0]), mix(a[1], b[1]), mix(a[2], b[2]), 255])
}

fn fill_rect(img: &mut RgbaImage, x0: u32, y0: u32, x1: u32, y1: u32, color: Rgba<u8>) {
    for y in y0..y1.min(img.height()) {
        for x in x0..x1.min(img.width()) {
            img.put_pixel(x, y, color);
        }
    }
}

fn fill_disc(img: &mut RgbaImage, cx: u32, cy: u32, radius: u32, color: Rgba<u8>) {
    let (cx, cy, r) = (cx as i64, cy as i64, radius as i64);
    for y in (cy - r).max(0)..(cy + r + 1).min(img.height() as i64) {
        for x in (cx - r).max(0)..(cx + r + 1).min(img.width() as i64) {
            let (dx, dy) = (x - cx, y - cy);
            if dx * dx + dy * dy <= r * r {
                img.put_pixel(x as u32, y as u32, color);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::assets::storage::LocalStorage;
    use crate::config::Config;
    use common::model::branding::Typography;
    use std::collections::HashMap;
    use tempfile::TempDir;

    fn branding() -> BrandIdentity {
        BrandIdentity {
            logo_url: None,
            color_scheme: ColorScheme {
                primary: "#2563EB".to_string(),
                secondary: "#F8FAFC".to_string(),
                accent: "#10B981".to_string(),
                background: "#FFFFFF".to_string(),
                text: "#1F2937".to_string(),
            },
            typography: Typography {
                heading_font: "Inter".to_string(),
                body_font: "Inter".to_string(),
                font_sizes: HashMap::new(),
            },
            brand_voice: "chaleureux".to_string(),
            brand_values: vec![],
            tagline: "Slogan".to_string(),
        }
    }

    fn test_storage(dir: &TempDir) -> LocalStorage {
        let mut config = Config::for_tests();
        config.storage_root = dir.path().display().to_string();
        LocalStorage::new(&config)
    }

    #[tokio::test]
    async fn full_asset_set_has_pairwise_distinct_ids() {
        let dir = TempDir::new().unwrap();
        let storage = test_storage(&dir);
        let assets = generate_site_assets(&storage, "site-42", "Café Luna", &branding())
            .await
            .unwrap();
        // 1 logo + 1 hero + 6 products + 4 icons + 1 favicon
        assert_eq!(assets.len(), 13);
        for (i, a) in assets.iter().enumerate() {
            for b in &assets[i + 1..] {
                assert_ne!(a.asset_id, b.asset_id);
            }
            assert!(a.url.starts_with("https://cdn.test/site-42/"));
            assert!(a.file_size.unwrap() > 0);
        }
    }

    #[tokio::test]
    async fn logo_dimensions_match_the_raster() {
        let dir = TempDir::new().unwrap();
        let storage = test_storage(&dir);
        let assets = generate_site_assets(&storage, "s", "B", &branding())
            .await
            .unwrap();
        let logo = assets.iter().find(|a| a.asset_type == AssetKind::Logo).unwrap();
        let dims = logo.dimensions.as_ref().unwrap();
        assert_eq!((dims.width, dims.height), (200, 80));
        let stored = std::fs::read(dir.path().join("s/logo.png")).unwrap();
        let decoded = load_from_memory(&stored).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (200, 80));
    }

    #[tokio::test]
    async fn cleanup_removes_the_site_prefix() {
        let dir = TempDir::new().unwrap();
        let storage = test_storage(&dir);
        generate_site_assets(&storage, "gone", "B", &branding())
            .await
            .unwrap();
        cleanup_assets(&storage, "gone").await.unwrap();
        assert!(!dir.path().join("gone").exists());
    }

    #[test]
    fn optimize_flattens_and_downscales() {
        let big = RgbaImage::from_pixel(2400, 1200, Rgba([255, 0, 0, 128]));
        let mut raw = Vec::new();
        DynamicImage::ImageRgba8(big)
            .write_to(&mut std::io::Cursor::new(&mut raw), ImageFormat::Png)
            .unwrap();
        let processed = optimize_image(&raw).unwrap();
        let out = load_from_memory(&processed).unwrap();
        assert!(out.width() <= MAX_PROCESSED_EDGE && out.height() <= MAX_PROCESSED_EDGE);
    }

    #[test]
    fn hex_parsing_handles_short_form_and_garbage() {
        assert_eq!(parse_hex("#FFF"), Rgba([255, 255, 255, 255]));
        assert_eq!(parse_hex("#2563EB"), Rgba([37, 99, 235, 255]));
        assert_eq!(parse_hex("bleu"), Rgba([128, 128, 128, 255]));
    }
}
