//! HTML page template and `{{placeholder}}` rendering.
//!
//! One generic page template covers every page type; per-page title,
//! description and keywords are overridden in the data map before
//! rendering. List-shaped content (navigation, features, products, brand
//! values) is pre-rendered into HTML fragments and substituted like any
//! other placeholder.

use regex::Regex;
use std::collections::HashMap;

/// Substitute every `{{key}}` occurrence with its value from `data`.
/// Unknown keys render as the empty string.
pub fn render(template: &str, data: &HashMap<String, String>) -> String {
    let re = Regex::new(r"\{\{([a-z_0-9]+)\}\}").unwrap();
    re.replace_all(template, |caps: &regex::Captures| {
        data.get(&caps[1]).cloned().unwrap_or_default()
    })
    .into_owned()
}

pub const PAGE_TEMPLATE: &str = r##"<!DOCTYPE html>
<html lang="fr">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{{page_title}} - {{site_name}}</title>
    <meta name="description" content="{{page_description}}">
    <meta name="keywords" content="{{page_keywords}}">
    <link rel="icon" type="image/x-icon" href="{{favicon_url}}">
    <link href="https://fonts.googleapis.com/css2?family={{heading_font_query}}:wght@300;400;600;700&family={{body_font_query}}:wght@300;400;500;600&display=swap" rel="stylesheet">
    <script src="https://cdn.tailwindcss.com"></script>
    <link rel="stylesheet" href="assets/custom.css">
    <style>
        .font-heading { font-family: '{{heading_font}}', serif; }
        .font-body { font-family: '{{body_font}}', sans-serif; }
        .btn-primary {
            background-color: var(--primary-color);
            color: white;
            padding: 12px 24px;
            border-radius: 8px;
            font-weight: 600;
            transition: all 0.3s ease;
        }
        .btn-primary:hover {
            background-color: var(--accent-color);
            transform: translateY(-2px);
        }
        .section-padding { padding: 80px 0; }
        @media (max-width: 768px) {
            .section-padding { padding: 40px 0; }
        }
    </style>
</head>
<body class="font-body" style="color: var(--text-color); background-color: var(--background-color);">
<header class="bg-white shadow-sm sticky top-0 z-50">
    <nav class="container mx-auto px-4 py-4">
        <div class="flex justify-between items-center">
            <div class="flex items-center">
                <img src="{{logo_url}}" alt="{{site_name}}" class="h-10 w-auto mr-3">
                <span class="font-heading text-2xl font-bold" style="color: var(--primary-color);">{{site_name}}</span>
            </div>
            <div class="hidden md:flex space-x-8">
{{nav_links}}
            </div>
            <div class="flex items-center space-x-4">
                <a href="#contact" class="btn-primary">Contact</a>
                <button class="md:hidden p-2" onclick="toggleMobileMenu()">
                    <svg class="w-6 h-6" fill="none" stroke="currentColor" viewBox="0 0 24 24">
                        <path stroke-linecap="round" stroke-linejoin="round" stroke-width="2" d="M4 6h16M4 12h16M4 18h16"></path>
                    </svg>
                </button>
            </div>
        </div>
        <div id="mobile-menu" class="md:hidden hidden mt-4 pb-4">
{{mobile_nav_links}}
        </div>
    </nav>
</header>
<main>
<section class="hero-section relative overflow-hidden section-padding" style="background: linear-gradient(135deg, var(--primary-color), var(--accent-color));">
    <div class="container mx-auto px-4 relative z-10">
        <div class="grid lg:grid-cols-2 gap-12 items-center">
            <div class="text-white">
                <h1 class="font-heading text-5xl lg:text-6xl font-bold mb-6 animate-on-scroll">{{hero_title}}</h1>
                <p class="text-xl mb-8 opacity-90 animate-on-scroll">{{hero_subtitle}}</p>
                <div class="flex flex-col sm:flex-row gap-4 animate-on-scroll">
                    <a href="#products" class="btn-primary inline-block text-center">{{cta_primary}}</a>
                    <a href="#about" class="border-2 border-white text-white px-6 py-3 rounded-lg font-semibold hover:bg-white hover:text-gray-900 transition-all duration-300">{{cta_secondary}}</a>
                </div>
            </div>
            <div class="animate-on-scroll">
                <img src="{{hero_image}}" alt="{{hero_image_alt}}" class="w-full h-auto rounded-lg shadow-2xl">
            </div>
        </div>
    </div>
</section>
<section id="features" class="section-padding">
    <div class="container mx-auto px-4">
        <div class="text-center mb-16">
            <h2 class="font-heading text-4xl font-bold mb-4 animate-on-scroll">{{features_title}}</h2>
            <p class="text-xl text-gray-600 max-w-2xl mx-auto animate-on-scroll">{{features_subtitle}}</p>
        </div>
        <div class="grid md:grid-cols-2 lg:grid-cols-3 gap-8">
{{feature_cards}}
        </div>
    </div>
</section>
<section id="products" class="section-padding bg-gray-50">
    <div class="container mx-auto px-4">
        <div class="text-center mb-16">
            <h2 class="font-heading text-4xl font-bold mb-4 animate-on-scroll">{{products_title}}</h2>
            <p class="text-xl text-gray-600 max-w-2xl mx-auto animate-on-scroll">{{products_subtitle}}</p>
        </div>
        <div class="grid md:grid-cols-2 lg:grid-cols-3 gap-8">
{{product_cards}}
        </div>
    </div>
</section>
<section id="about" class="section-padding">
    <div class="container mx-auto px-4">
        <div class="grid lg:grid-cols-2 gap-12 items-center">
            <div class="animate-on-scroll">
                <h2 class="font-heading text-4xl font-bold mb-6">{{about_title}}</h2>
                <p class="text-lg text-gray-600 mb-6">{{about_description}}</p>
                <div class="grid grid-cols-2 gap-4">
{{value_items}}
                </div>
            </div>
        </div>
    </div>
</section>
<section id="contact" class="section-padding" style="background-color: var(--primary-color);">
    <div class="container mx-auto px-4 text-center text-white">
        <h2 class="font-heading text-4xl font-bold mb-6 animate-on-scroll">{{contact_title}}</h2>
        <p class="text-xl mb-8 opacity-90 animate-on-scroll">{{contact_subtitle}}</p>
        <a href="mailto:{{contact_email}}" class="bg-white text-gray-900 px-8 py-4 rounded-lg font-semibold hover:bg-gray-100 transition-all duration-300 inline-block animate-on-scroll">Nous Contacter</a>
    </div>
</section>
</main>
<footer class="bg-gray-900 text-white section-padding">
    <div class="container mx-auto px-4">
        <div class="grid md:grid-cols-3 gap-8">
            <div>
                <div class="flex items-center mb-4">
                    <img src="{{logo_url}}" alt="{{site_name}}" class="h-8 w-auto mr-2">
                    <span class="font-heading text-xl font-bold">{{site_name}}</span>
                </div>
                <p class="text-gray-400 mb-4">{{site_description}}</p>
            </div>
            <div>
                <h3 class="font-semibold text-lg mb-4">Navigation</h3>
                <ul class="space-y-2">
{{footer_nav_links}}
                </ul>
            </div>
            <div>
                <h3 class="font-semibold text-lg mb-4">Légal</h3>
                <ul class="space-y-2">
                    <li><a href="/mentions-legales" class="text-gray-400 hover:text-white transition-colors duration-300">Mentions légales</a></li>
                    <li><a href="/politique-confidentialite" class="text-gray-400 hover:text-white transition-colors duration-300">Politique de confidentialité</a></li>
                    <li><a href="/cgv" class="text-gray-400 hover:text-white transition-colors duration-300">CGV</a></li>
                </ul>
            </div>
        </div>
        <div class="border-t border-gray-800 mt-8 pt-8 text-center text-gray-400">
            <p>&copy; {{current_year}} {{site_name}}. Tous droits réservés.</p>
            <p class="mt-2 text-sm">Site créé avec KLM Pegasus</p>
        </div>
    </div>
</footer>
<script src="assets/custom.js"></script>
</body>
</html>
"##;

pub fn nav_link(url: &str, label: &str) -> String {
    format!(
        "                <a href=\"{}\" class=\"text-gray-700 hover:text-primary font-medium transition-colors duration-300\">{}</a>",
        url, label
    )
}

pub fn mobile_nav_link(url: &str, label: &str) -> String {
    format!(
        "            <a href=\"{}\" class=\"block py-2 text-gray-700 hover:text-primary\">{}</a>",
        url, label
    )
}

pub fn footer_nav_link(url: &str, label: &str) -> String {
    format!(
        "                    <li><a href=\"{}\" class=\"text-gray-400 hover:text-white transition-colors duration-300\">{}</a></li>",
        url, label
    )
}

pub fn feature_card(icon_url: &str, title: &str, description: &str) -> String {
    format!(
        r#"            <div class="text-center p-6 rounded-lg border border-gray-200 hover:shadow-lg transition-all duration-300 animate-on-scroll">
                <div class="w-16 h-16 mx-auto mb-4 rounded-full flex items-center justify-center" style="background-color: var(--accent-color);">
                    <img src="{icon_url}" alt="{title}" class="w-8 h-8">
                </div>
                <h3 class="font-heading text-xl font-semibold mb-3">{title}</h3>
                <p class="text-gray-600">{description}</p>
            </div>"#
    )
}

pub fn product_card(image_url: &str, name: &str, description: &str, price: &str) -> String {
    format!(
        r#"            <div class="bg-white rounded-lg shadow-md overflow-hidden hover:shadow-xl transition-all duration-300 animate-on-scroll">
                <img src="{image_url}" alt="{name}" class="w-full h-48 object-cover">
                <div class="p-6">
                    <h3 class="font-heading text-xl font-semibold mb-2">{name}</h3>
                    <p class="text-gray-600 mb-4">{description}</p>
                    <div class="flex justify-between items-center">
                        <span class="text-2xl font-bold" style="color: var(--primary-color);">{price}</span>
                        <button class="btn-primary">Acheter</button>
                    </div>
                </div>
            </div>"#
    )
}

pub fn value_item(value: &str) -> String {
    format!(
        r#"                    <div class="flex items-center">
                        <div class="w-3 h-3 rounded-full mr-3" style="background-color: var(--accent-color);"></div>
                        <span class="font-semibold">{value}</span>
                    </div>"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_substitutes_known_keys() {
        let mut data = HashMap::new();
        data.insert("site_name".to_string(), "Café Luna".to_string());
        let out = render("<h1>{{site_name}}</h1>", &data);
        assert_eq!(out, "<h1>Café Luna</h1>");
    }

    #[test]
    fn unknown_keys_render_empty() {
        let out = render("a{{missing_key}}b", &HashMap::new());
        assert_eq!(out, "ab");
    }

    #[test]
    fn page_template_has_no_foreign_placeholder_syntax() {
        // Everything substitutable must use the {{key}} form.
        assert!(!PAGE_TEMPLATE.contains("{%"));
        assert!(PAGE_TEMPLATE.contains("{{page_title}}"));
        assert!(PAGE_TEMPLATE.contains("{{nav_links}}"));
    }
}
