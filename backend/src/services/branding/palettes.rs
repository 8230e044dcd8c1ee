//! Deterministic color and typography tables, used directly by the basic
//! branding pipeline and as the fallback of the advanced one.

use common::model::branding::Typography;
use common::model::business::{Industry, StylePreference};
use rand::seq::SliceRandom;
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub primary: &'static str,
    pub secondary: &'static str,
    pub accent: &'static str,
}

const FALLBACK: [Palette; 1] = [Palette {
    primary: "#2563EB",
    secondary: "#F8FAFC",
    accent: "#10B981",
}];

/// Candidate palettes per industry. Every industry has an entry; `Autre`
/// doubles as the universal fallback.
pub fn industry_palettes(industry: Industry) -> &'static [Palette] {
    macro_rules! palettes {
        ($(($p:literal, $s:literal, $a:literal)),+ $(,)?) => {
            &[$(Palette { primary: $p, secondary: $s, accent: $a }),+]
        };
    }
    match industry {
        Industry::Fashion => palettes![
            ("#000000", "#FFFFFF", "#FF6B6B"),
            ("#2C3E50", "#ECF0F1", "#E74C3C"),
            ("#8E44AD", "#F8F9FA", "#F39C12"),
        ],
        Industry::Electronics => palettes![
            ("#2980B9", "#ECF0F1", "#3498DB"),
            ("#34495E", "#BDC3C7", "#1ABC9C"),
            ("#27AE60", "#FFFFFF", "#F1C40F"),
        ],
        Industry::HealthBeauty => palettes![
            ("#E91E63", "#FCE4EC", "#FF9800"),
            ("#9C27B0", "#F3E5F5", "#4CAF50"),
            ("#00BCD4", "#E0F2F1", "#FF5722"),
        ],
        Industry::HomeGarden => palettes![
            ("#4CAF50", "#E8F5E8", "#FF9800"),
            ("#795548", "#EFEBE9", "#8BC34A"),
            ("#607D8B", "#ECEFF1", "#FFC107"),
        ],
        Industry::SportsFitness => palettes![
            ("#FF5722", "#FFF3E0", "#4CAF50"),
            ("#2196F3", "#E3F2FD", "#FF9800"),
            ("#9C27B0", "#F3E5F5", "#CDDC39"),
        ],
        Industry::FoodBeverage => palettes![
            ("#D35400", "#FDF2E9", "#27AE60"),
            ("#6D4C41", "#EFEBE9", "#FFB300"),
            ("#C0392B", "#FFFFFF", "#F1C40F"),
        ],
        Industry::BooksMedia => palettes![
            ("#34495E", "#F8F9FA", "#E67E22"),
            ("#1A237E", "#E8EAF6", "#FF7043"),
        ],
        Industry::Jewelry => palettes![
            ("#212121", "#FAFAFA", "#D4AF37"),
            ("#4A148C", "#F3E5F5", "#FFD54F"),
        ],
        Industry::ArtCrafts => palettes![
            ("#00695C", "#E0F2F1", "#FF8A65"),
            ("#5D4037", "#F8F9FA", "#9CCC65"),
            ("#283593", "#E8EAF6", "#FFCA28"),
        ],
        Industry::Other => &FALLBACK,
    }
}

/// Pick the best candidate palette for the caller's preferences.
///
/// Order of the rules: explicit color preferences (case-insensitive
/// substring match against the three hex codes), then the style rule
/// (minimalist wants a neutral background, bold takes the first and
/// boldest entry), then an arbitrary pick.
pub fn select_palette(
    palettes: &'static [Palette],
    style_preferences: &[StylePreference],
    color_preferences: &[String],
) -> Palette {
    if palettes.is_empty() {
        return FALLBACK[0];
    }

    for palette in palettes {
        for pref in color_preferences {
            let pref = pref.to_lowercase();
            let hit = [palette.primary, palette.secondary, palette.accent]
                .iter()
                .any(|c| c.to_lowercase().contains(&pref));
            if hit {
                return *palette;
            }
        }
    }

    match style_preferences.first() {
        Some(StylePreference::Minimalist) => {
            for palette in palettes {
                if [palette.primary, palette.secondary, palette.accent]
                    .iter()
                    .any(|c| *c == "#FFFFFF" || *c == "#F8F9FA")
                {
                    return *palette;
                }
            }
        }
        Some(StylePreference::Bold) => return palettes[0],
        _ => {}
    }

    *palettes.choose(&mut rand::thread_rng()).unwrap_or(&palettes[0])
}

/// Fixed background/text companions, with the minimalist/bold overrides.
pub fn background_and_text(style_preferences: &[StylePreference]) -> (String, String) {
    let mut background = "#FFFFFF".to_string();
    let mut text = "#1F2937".to_string();
    if style_preferences.contains(&StylePreference::Minimalist) {
        background = "#FAFAFA".to_string();
        text = "#374151".to_string();
    } else if style_preferences.contains(&StylePreference::Bold) {
        text = "#111827".to_string();
    }
    (background, text)
}

fn sizes(h1: &str, h2: &str, h3: &str, body: &str) -> HashMap<String, String> {
    HashMap::from([
        ("h1".to_string(), h1.to_string()),
        ("h2".to_string(), h2.to_string()),
        ("h3".to_string(), h3.to_string()),
        ("body".to_string(), body.to_string()),
    ])
}

/// Font combination for the caller's first style preference; styles without
/// a dedicated entry use the modern one.
pub fn typography_for(style_preferences: &[StylePreference]) -> Typography {
    let style = style_preferences
        .first()
        .copied()
        .unwrap_or(StylePreference::Modern);
    match style {
        StylePreference::Classic => Typography {
            heading_font: "Playfair Display".to_string(),
            body_font: "Source Sans Pro".to_string(),
            font_sizes: sizes("3.5rem", "2.75rem", "2.25rem", "1.1rem"),
        },
        StylePreference::Minimalist => Typography {
            heading_font: "Poppins".to_string(),
            body_font: "Poppins".to_string(),
            font_sizes: sizes("2.5rem", "2rem", "1.75rem", "1rem"),
        },
        StylePreference::Bold => Typography {
            heading_font: "Montserrat".to_string(),
            body_font: "Open Sans".to_string(),
            font_sizes: sizes("4rem", "3rem", "2.5rem", "1.1rem"),
        },
        StylePreference::Elegant => Typography {
            heading_font: "Cormorant Garamond".to_string(),
            body_font: "Lato".to_string(),
            font_sizes: sizes("3.5rem", "2.75rem", "2.25rem", "1.1rem"),
        },
        StylePreference::Modern | StylePreference::Playful | StylePreference::Professional => {
            Typography {
                heading_font: "Inter".to_string(),
                body_font: "Inter".to_string(),
                font_sizes: sizes("3rem", "2.5rem", "2rem", "1rem"),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_industry_selects_from_its_own_table() {
        for industry in Industry::ALL {
            let table = industry_palettes(industry);
            assert!(!table.is_empty());
            let picked = select_palette(table, &[], &[]);
            assert!(table.contains(&picked), "{:?}", industry);
        }
    }

    #[test]
    fn color_preference_substring_match_is_case_insensitive() {
        let table = industry_palettes(Industry::Fashion);
        let picked = select_palette(table, &[], &["ff6b6b".to_string()]);
        assert_eq!(picked.accent, "#FF6B6B");
    }

    #[test]
    fn bold_style_takes_first_palette() {
        let table = industry_palettes(Industry::Electronics);
        let picked = select_palette(table, &[StylePreference::Bold], &[]);
        assert_eq!(picked, table[0]);
    }

    #[test]
    fn minimalist_style_prefers_neutral_background() {
        let table = industry_palettes(Industry::Fashion);
        let picked = select_palette(table, &[StylePreference::Minimalist], &[]);
        assert!([picked.primary, picked.secondary, picked.accent]
            .iter()
            .any(|c| *c == "#FFFFFF" || *c == "#F8F9FA"));
    }

    #[test]
    fn minimalist_background_and_text_overrides() {
        let (bg, text) = background_and_text(&[StylePreference::Minimalist]);
        assert_eq!(bg, "#FAFAFA");
        assert_eq!(text, "#374151");
    }

    #[test]
    fn bold_darkens_text_only() {
        let (bg, text) = background_and_text(&[StylePreference::Bold]);
        assert_eq!(bg, "#FFFFFF");
        assert_eq!(text, "#111827");
    }

    #[test]
    fn unstyled_typography_defaults_to_modern() {
        let typo = typography_for(&[]);
        assert_eq!(typo.heading_font, "Inter");
        assert_eq!(typo.font_sizes.get("h1").unwrap(), "3rem");
    }

    #[test]
    fn playful_falls_back_to_modern_fonts() {
        let typo = typography_for(&[StylePreference::Playful]);
        assert_eq!(typo.heading_font, "Inter");
    }
}
