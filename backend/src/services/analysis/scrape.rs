//! HTML extraction for competitor analysis.
//!
//! Everything in this module is pure with respect to the network: it takes
//! the fetched markup plus its base URL and produces the typed extraction
//! and signal records. The fetch itself lives in `mod.rs` so these
//! functions stay testable on static HTML.

use common::model::analysis::{DesignSignals, PageExtract, PageImage, SeoSignals};
use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use url::Url;

const MAX_LINKS: usize = 50;
const MAX_IMAGES: usize = 20;
const MAX_COLORS: usize = 10;
const MAX_FONTS: usize = 5;

/// Elements whose text never counts as page content.
const STRIPPED_ELEMENTS: [&str; 6] = ["script", "style", "nav", "header", "footer", "aside"];

fn sel(css: &str) -> Selector {
    // Only called with static literals.
    Selector::parse(css).unwrap()
}

pub struct Extraction {
    pub extract: PageExtract,
    pub design: DesignSignals,
    pub seo: SeoSignals,
}

pub fn extract_page(html: &str, base_url: &Url) -> Extraction {
    let document = Html::parse_document(html);

    let title = document
        .select(&sel("title"))
        .next()
        .map(|t| t.text().collect::<String>().trim().to_string())
        .unwrap_or_default();

    let meta_description = document
        .select(&sel("meta[name=\"description\"]"))
        .next()
        .and_then(|m| m.value().attr("content"))
        .map(|s| s.trim().to_string())
        .unwrap_or_default();

    let headings = |css: &str| {
        document
            .select(&sel(css))
            .map(|h| h.text().collect::<String>().trim().to_string())
            .filter(|t| !t.is_empty())
            .collect::<Vec<_>>()
    };
    let h1 = headings("h1");
    let h2 = headings("h2");
    let h3 = headings("h3");

    let main_content = main_content_text(&document);

    let mut links = Vec::new();
    let mut internal_links = 0usize;
    let mut external_links = 0usize;
    for a in document.select(&sel("a[href]")) {
        let Some(href) = a.value().attr("href") else {
            continue;
        };
        if href.starts_with("javascript:") || href.starts_with("mailto:") {
            continue;
        }
        let Ok(resolved) = base_url.join(href) else {
            continue;
        };
        if resolved.host_str() == base_url.host_str() {
            internal_links += 1;
        } else {
            external_links += 1;
        }
        if links.len() < MAX_LINKS {
            links.push(resolved.to_string());
        }
    }

    let mut images = Vec::new();
    let mut image_count = 0usize;
    let mut images_with_alt = 0usize;
    for img in document.select(&sel("img")) {
        image_count += 1;
        let alt = img
            .value()
            .attr("alt")
            .map(|a| a.trim().to_string())
            .filter(|a| !a.is_empty());
        if alt.is_some() {
            images_with_alt += 1;
        }
        if images.len() < MAX_IMAGES {
            images.push(PageImage {
                src: img.value().attr("src").unwrap_or_default().to_string(),
                alt,
            });
        }
    }
    let image_alt_coverage = if image_count > 0 {
        images_with_alt as f32 / image_count as f32 * 100.0
    } else {
        0.0
    };

    let json_ld = document
        .select(&sel("script[type=\"application/ld+json\"]"))
        .map(|s| s.text().collect::<String>().trim().to_string())
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>();

    let design = design_signals(&document);

    let script_count = document.select(&sel("script[src]")).count();
    let stylesheet_count = document.select(&sel("link[rel=\"stylesheet\"]")).count();

    let seo = SeoSignals {
        title_length: title.chars().count(),
        description_length: meta_description.chars().count(),
        h1_count: h1.len(),
        h2_count: h2.len(),
        h3_count: h3.len(),
        internal_links,
        external_links,
        image_count,
        image_alt_coverage,
        script_count,
        stylesheet_count,
        html_size: html.len(),
    };

    Extraction {
        extract: PageExtract {
            title,
            meta_description,
            h1,
            h2,
            h3,
            main_content,
            links,
            images,
            json_ld,
        },
        design,
        seo,
    }
}

/// Text of the most content-like container, with chrome elements stripped.
/// Falls back to the whole body when no dedicated container exists.
fn main_content_text(document: &Html) -> String {
    for css in ["main", "article", ".content", "#content"] {
        if let Some(container) = document.select(&sel(css)).next() {
            return visible_text(container);
        }
    }
    document
        .select(&sel("body"))
        .next()
        .map(visible_text)
        .unwrap_or_default()
}

/// Collect descendant text, skipping text inside stripped elements.
fn visible_text(root: ElementRef) -> String {
    let mut out = String::new();
    for node in root.descendants() {
        let Some(text) = node.value().as_text() else {
            continue;
        };
        let mut stripped = false;
        for ancestor in node.ancestors() {
            if ancestor.id() == root.id() {
                break;
            }
            if let Some(el) = ancestor.value().as_element() {
                if STRIPPED_ELEMENTS.contains(&el.name()) {
                    stripped = true;
                    break;
                }
            }
        }
        if stripped {
            continue;
        }
        let trimmed = text.trim();
        if !trimmed.is_empty() {
            if !out.is_empty() {
                out.push(' ');
            }
            out.push_str(trimmed);
        }
    }
    out
}

fn design_signals(document: &Html) -> DesignSignals {
    // Inline <style> blocks plus every style attribute.
    let mut style_text = String::new();
    for style in document.select(&sel("style")) {
        style_text.push_str(&style.text().collect::<String>());
        style_text.push('\n');
    }
    for el in document.select(&sel("[style]")) {
        if let Some(s) = el.value().attr("style") {
            style_text.push_str(s);
            style_text.push('\n');
        }
    }

    let hex_re = Regex::new(r"#(?:[0-9a-fA-F]{6}|[0-9a-fA-F]{3})\b").unwrap();
    let mut colors: Vec<String> = Vec::new();
    for m in hex_re.find_iter(&style_text) {
        let color = m.as_str().to_uppercase();
        if !colors.contains(&color) {
            colors.push(color);
            if colors.len() == MAX_COLORS {
                break;
            }
        }
    }

    let mut fonts: Vec<String> = Vec::new();
    for link in document.select(&sel("link[href]")) {
        let Some(href) = link.value().attr("href") else {
            continue;
        };
        if !href.contains("fonts.googleapis.com") {
            continue;
        }
        if let Ok(parsed) = Url::parse(&format!("https:{}", href.trim_start_matches("https:"))) {
            for (key, value) in parsed.query_pairs() {
                if key == "family" {
                    for family in value.split('|') {
                        push_font(&mut fonts, family.split(':').next().unwrap_or(""));
                    }
                }
            }
        }
    }
    let family_re = Regex::new(r"font-family\s*:\s*([^;}]+)").unwrap();
    for caps in family_re.captures_iter(&style_text) {
        if let Some(first) = caps[1].split(',').next() {
            push_font(&mut fonts, first.trim().trim_matches(['\'', '"']));
        }
    }
    fonts.truncate(MAX_FONTS);

    let class_text = collect_classes(document);
    let responsive_indicators = document.select(&sel("meta[name=\"viewport\"]")).next().is_some()
        || ["col-", "sm:", "md:", "lg:", "container", "row"]
            .iter()
            .any(|p| class_text.contains(p))
        || style_text.contains("@media");

    DesignSignals {
        colors,
        fonts,
        has_header: document.select(&sel("header")).next().is_some(),
        has_footer: document.select(&sel("footer")).next().is_some(),
        has_sidebar: document.select(&sel("aside")).next().is_some()
            || class_text.contains("sidebar"),
        has_nav: document.select(&sel("nav")).next().is_some(),
        uses_grid: class_text.contains("grid") || style_text.contains("display:grid")
            || style_text.contains("display: grid"),
        uses_flex: class_text.contains("flex") || style_text.contains("display:flex")
            || style_text.contains("display: flex"),
        responsive_indicators,
    }
}

fn push_font(fonts: &mut Vec<String>, name: &str) {
    let name = name.replace('+', " ").trim().to_string();
    if !name.is_empty() && !fonts.contains(&name) && fonts.len() < MAX_FONTS {
        fonts.push(name);
    }
}

fn collect_classes(document: &Html) -> String {
    let mut out = String::new();
    for el in document.select(&sel("[class]")) {
        if let Some(c) = el.value().attr("class") {
            out.push_str(c);
            out.push(' ');
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    const PLAIN_PAGE: &str = r##"<html>
<head>
  <title>Boutique Artisanale - Objets faits main</title>
  <meta name="description" content="Des objets artisanaux uniques.">
  <style>body { color: #333333; font-family: Georgia, serif; } .cta { background: #E74C3C; }</style>
</head>
<body>
  <header><nav><a href="/produits">Produits</a></nav></header>
  <main>
    <h1>Bienvenue</h1>
    <h2>Nos créations</h2>
    <script>console.log("tracking");</script>
    <p>Chaque pièce est unique.</p>
    <a href="https://partenaire.example.org/catalogue">Partenaire</a>
    <img src="/img/vase.jpg" alt="Vase en céramique">
    <img src="/img/bol.jpg">
  </main>
  <footer>Mentions légales</footer>
</body>
</html>"##;

    fn base() -> Url {
        Url::parse("https://boutique.example.com/").unwrap()
    }

    #[test]
    fn extracts_title_headings_and_description() {
        let ex = extract_page(PLAIN_PAGE, &base());
        assert_eq!(ex.extract.title, "Boutique Artisanale - Objets faits main");
        assert_eq!(ex.extract.meta_description, "Des objets artisanaux uniques.");
        assert_eq!(ex.extract.h1, vec!["Bienvenue"]);
        assert_eq!(ex.extract.h2, vec!["Nos créations"]);
        assert!(ex.extract.h3.is_empty());
    }

    #[test]
    fn main_content_skips_scripts_and_chrome() {
        let ex = extract_page(PLAIN_PAGE, &base());
        assert!(ex.extract.main_content.contains("Chaque pièce est unique."));
        assert!(!ex.extract.main_content.contains("tracking"));
        assert!(!ex.extract.main_content.contains("Mentions légales"));
    }

    #[test]
    fn resolves_links_and_counts_internal_external() {
        let ex = extract_page(PLAIN_PAGE, &base());
        assert!(ex
            .extract
            .links
            .contains(&"https://boutique.example.com/produits".to_string()));
        assert_eq!(ex.seo.internal_links, 1);
        assert_eq!(ex.seo.external_links, 1);
    }

    #[test]
    fn alt_coverage_counts_all_images() {
        let ex = extract_page(PLAIN_PAGE, &base());
        assert_eq!(ex.extract.images.len(), 2);
        assert!((ex.seo.image_alt_coverage - 50.0).abs() < f32::EPSILON);
    }

    #[test]
    fn page_without_responsive_hints_is_flagged_static() {
        let ex = extract_page(PLAIN_PAGE, &base());
        assert!(!ex.design.responsive_indicators);
        assert!(ex.design.has_header);
        assert!(ex.design.has_footer);
        assert!(ex.design.has_nav);
        assert!(!ex.design.has_sidebar);
    }

    #[test]
    fn image_count_survives_the_extract_list_cap() {
        let imgs: String = (0..60)
            .map(|i| format!("<img src=\"/img/{i}.jpg\">"))
            .collect();
        let html = format!(
            "<html><head><title>t</title></head><body>{imgs}</body></html>"
        );
        let ex = extract_page(&html, &base());
        assert_eq!(ex.extract.images.len(), MAX_IMAGES);
        assert_eq!(ex.seo.image_count, 60);
    }

    #[test]
    fn viewport_meta_marks_page_responsive() {
        let html = r#"<html><head>
            <meta name="viewport" content="width=device-width, initial-scale=1">
            <title>Page</title></head><body><p>ok</p></body></html>"#;
        let ex = extract_page(html, &base());
        assert!(ex.design.responsive_indicators);
    }

    #[test]
    fn collects_inline_colors_and_fonts() {
        let ex = extract_page(PLAIN_PAGE, &base());
        assert!(ex.design.colors.contains(&"#333333".to_string()));
        assert!(ex.design.colors.contains(&"#E74C3C".to_string()));
        assert!(ex.design.fonts.contains(&"Georgia".to_string()));
    }

    #[test]
    fn google_fonts_link_yields_family_names() {
        let html = r#"<html><head><title>t</title>
            <link href="https://fonts.googleapis.com/css?family=Open+Sans:400,700|Playfair+Display" rel="stylesheet">
            </head><body></body></html>"#;
        let ex = extract_page(html, &base());
        assert!(ex.design.fonts.contains(&"Open Sans".to_string()));
        assert!(ex.design.fonts.contains(&"Playfair Display".to_string()));
    }
}
