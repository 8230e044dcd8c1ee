//! Heuristic SEO and performance scoring over extracted page signals,
//! plus the rule-driven insights and recommendations derived from them.

use common::model::analysis::{DesignSignals, SeoSignals};

/// Additive SEO score, capped at 100.
///
/// Each signal contributes independently so adding a signal can never
/// lower the score.
pub fn seo_score(seo: &SeoSignals) -> u32 {
    let mut score = 15u32; // baseline for a fetchable, parseable page

    if (30..=60).contains(&seo.title_length) {
        score += 20;
    } else if seo.title_length > 0 {
        score += 10;
    }

    if (120..=160).contains(&seo.description_length) {
        score += 20;
    } else if seo.description_length > 0 {
        score += 10;
    }

    if seo.h1_count == 1 {
        score += 15;
    }
    if seo.h2_count > 0 {
        score += 10;
    }

    if seo.image_alt_coverage >= 90.0 {
        score += 20;
    } else if seo.image_alt_coverage >= 70.0 {
        score += 15;
    } else if seo.image_alt_coverage >= 50.0 {
        score += 10;
    }

    score.min(100)
}

/// Subtractive performance proxy: start at 100, deduct for page weight
/// indicators, floor at 0. Each deduction category is capped.
pub fn performance_score(seo: &SeoSignals) -> u32 {
    let mut score = 100.0f32;

    score -= (seo.script_count as f32 * 2.0).min(20.0);
    score -= (seo.stylesheet_count as f32 * 3.0).min(15.0);
    // The full on-page image count, not the truncated extract list.
    score -= (seo.image_count as f32 * 0.5).min(25.0);

    if seo.html_size > 100_000 {
        score -= 20.0;
    } else if seo.html_size > 50_000 {
        score -= 10.0;
    }

    score.max(0.0).round() as u32
}

/// Short, human-readable observations from fixed threshold rules.
pub fn build_insights(seo_score: u32, perf_score: u32, design: &DesignSignals) -> Vec<String> {
    let mut insights = Vec::new();

    if seo_score > 80 {
        insights.push("Excellent référencement naturel sur cette page.".to_string());
    } else if seo_score > 60 {
        insights.push("Référencement correct mais perfectible.".to_string());
    } else {
        insights.push("Référencement faible, des fondamentaux manquent.".to_string());
    }

    if perf_score > 80 {
        insights.push("Page légère, bon temps de chargement attendu.".to_string());
    } else if perf_score < 50 {
        insights.push("Page lourde, le temps de chargement pénalise l'expérience.".to_string());
    }

    if design.responsive_indicators {
        insights.push("Le site présente des indicateurs de design responsive.".to_string());
    } else {
        insights.push("Aucun indicateur de design responsive détecté.".to_string());
    }

    if !design.colors.is_empty() {
        insights.push(format!(
            "Palette identifiée: {}.",
            design.colors.join(", ")
        ));
    }

    insights
}

/// Actionable fixes for the detected weaknesses, followed by the generic
/// recommendations that apply to any storefront. Capped at 10 entries.
pub fn build_recommendations(seo: &SeoSignals, design: &DesignSignals) -> Vec<String> {
    let mut recs = Vec::new();

    if !design.responsive_indicators {
        recs.push("Adopter un design responsive adapté aux mobiles.".to_string());
    }
    if seo.h1_count != 1 {
        recs.push("Utiliser exactement un titre H1 par page.".to_string());
    }
    if seo.image_alt_coverage < 70.0 {
        recs.push("Ajouter un texte alternatif descriptif à chaque image.".to_string());
    }
    if !(30..=60).contains(&seo.title_length) {
        recs.push("Ajuster la balise title entre 30 et 60 caractères.".to_string());
    }
    if !(120..=160).contains(&seo.description_length) {
        recs.push("Rédiger une meta description entre 120 et 160 caractères.".to_string());
    }
    if seo.script_count > 10 {
        recs.push("Réduire le nombre de scripts externes chargés.".to_string());
    }

    // Always-on baseline advice.
    recs.push("Mettre en avant les avis clients pour renforcer la confiance.".to_string());
    recs.push("Clarifier les appels à l'action sur les pages produits.".to_string());
    recs.push("Structurer le contenu avec des sous-titres descriptifs.".to_string());
    recs.push("Optimiser les images pour le web (compression, formats modernes).".to_string());

    recs.truncate(10);
    recs
}

#[cfg(test)]
mod tests {
    use super::*;

    fn empty_signals() -> SeoSignals {
        SeoSignals {
            title_length: 0,
            description_length: 0,
            h1_count: 0,
            h2_count: 0,
            h3_count: 0,
            internal_links: 0,
            external_links: 0,
            image_count: 0,
            image_alt_coverage: 0.0,
            script_count: 0,
            stylesheet_count: 0,
            html_size: 0,
        }
    }

    fn strong_signals() -> SeoSignals {
        SeoSignals {
            title_length: 45,
            description_length: 140,
            h1_count: 1,
            h2_count: 4,
            h3_count: 6,
            internal_links: 12,
            external_links: 2,
            image_count: 5,
            image_alt_coverage: 95.0,
            script_count: 2,
            stylesheet_count: 1,
            html_size: 30_000,
        }
    }

    fn plain_design() -> DesignSignals {
        DesignSignals {
            colors: vec![],
            fonts: vec![],
            has_header: true,
            has_footer: true,
            has_sidebar: false,
            has_nav: true,
            uses_grid: false,
            uses_flex: false,
            responsive_indicators: false,
        }
    }

    #[test]
    fn seo_score_is_capped_at_100() {
        assert!(seo_score(&strong_signals()) <= 100);
        assert_eq!(seo_score(&strong_signals()), 100);
    }

    #[test]
    fn empty_page_keeps_the_baseline_only() {
        assert_eq!(seo_score(&empty_signals()), 15);
    }

    #[test]
    fn seo_score_grows_monotonically_with_signals() {
        let mut s = empty_signals();
        let base = seo_score(&s);
        s.title_length = 45;
        let with_title = seo_score(&s);
        assert!(with_title > base);
        s.h1_count = 1;
        assert!(seo_score(&s) > with_title);
    }

    #[test]
    fn short_title_scores_less_than_optimal_title() {
        let mut s = empty_signals();
        s.title_length = 10;
        let short = seo_score(&s);
        s.title_length = 45;
        assert!(seo_score(&s) > short);
    }

    #[test]
    fn performance_deductions_are_capped() {
        let mut s = empty_signals();
        s.script_count = 500;
        s.stylesheet_count = 500;
        s.image_count = 1000;
        s.html_size = 5_000_000;
        assert_eq!(performance_score(&s), 100 - 20 - 15 - 25 - 20);
    }

    #[test]
    fn image_deduction_counts_every_image_on_the_page() {
        // 60 images deduct the full 25 points even though the extracted
        // image list is capped at 20 entries.
        let mut s = empty_signals();
        s.image_count = 60;
        assert_eq!(performance_score(&s), 75);
    }

    #[test]
    fn light_page_scores_high_on_performance() {
        assert!(performance_score(&strong_signals()) > 85);
    }

    #[test]
    fn static_page_gets_responsive_recommendation_first() {
        let recs = build_recommendations(&empty_signals(), &plain_design());
        assert_eq!(recs[0], "Adopter un design responsive adapté aux mobiles.");
        assert!(recs.len() <= 10);
    }

    #[test]
    fn recommendations_always_include_generic_advice() {
        let mut design = plain_design();
        design.responsive_indicators = true;
        let recs = build_recommendations(&strong_signals(), &design);
        assert!(recs
            .iter()
            .any(|r| r.contains("avis clients")));
    }

    #[test]
    fn insights_reflect_score_thresholds() {
        let insights = build_insights(85, 90, &plain_design());
        assert!(insights[0].contains("Excellent"));
        let insights = build_insights(40, 40, &plain_design());
        assert!(insights[0].contains("faible"));
    }
}
