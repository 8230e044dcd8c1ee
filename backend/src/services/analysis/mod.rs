//! # Analysis Service Module
//!
//! Competitor page analysis: fetches a page, extracts content and design
//! signals, computes heuristic SEO/performance scores, and asks the model
//! for a qualitative positioning summary. `POST /analyze-content` analyzes
//! a single URL; the site generation flow uses `analyze_competitors` to
//! batch several URLs with pacing between requests.

pub mod scores;
pub mod scrape;

use crate::config::Config;
use crate::llm::{ChatModel, ChatParams};
use actix_web::{web, HttpResponse, Responder};
use common::model::analysis::{AnalysisReport, CompetitorLandscape};
use common::requests::{AnalyzeContentRequest, AnalyzeContentResponse};
use log::{error, info, warn};
use std::time::Duration;
use url::Url;

const FETCH_TIMEOUT: Duration = Duration::from_secs(30);
const CONTENT_EXCERPT_CHARS: usize = 1500;

const SUMMARY_SYSTEM: &str = "Tu es un analyste e-commerce. Tu résumes le positionnement \
commercial d'un site web en français, en 3 à 5 phrases, à partir des éléments extraits de la page. \
Réponds uniquement avec le résumé, sans préambule.";

const MARKET_SYSTEM: &str = "Tu es un analyste de marché e-commerce. À partir de résumés de \
sites concurrents, tu produis une synthèse du paysage concurrentiel en français, en un paragraphe. \
Réponds uniquement avec la synthèse.";

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/analyze-content", web::post().to(process_analyze));
}

async fn process_analyze(
    analyzer: web::Data<WebsiteAnalyzer>,
    model: web::Data<dyn ChatModel>,
    payload: web::Json<AnalyzeContentRequest>,
) -> impl Responder {
    let req = payload.into_inner();
    if let Err(e) = req.validate() {
        return HttpResponse::BadRequest().body(e);
    }
    info!("analyse de contenu demandée pour {}", req.url);

    match analyzer.analyze(model.get_ref(), &req.url).await {
        Ok(report) => {
            let insights = report.insights.clone();
            let recommendations = report.recommendations.clone();
            HttpResponse::Ok().json(AnalyzeContentResponse {
                success: true,
                analysis: report,
                insights,
                recommendations,
            })
        }
        Err(e) => {
            error!("échec de l'analyse de {}: {}", req.url, e);
            HttpResponse::InternalServerError().body(format!("Erreur d'analyse: {}", e))
        }
    }
}

/// Fetches and analyzes competitor pages.
pub struct WebsiteAnalyzer {
    http: reqwest::Client,
    /// Pause between two competitor fetches; zero in tests.
    competitor_delay: Duration,
}

impl WebsiteAnalyzer {
    pub fn new(config: &Config) -> Result<Self, String> {
        let ua = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) \
                  AppleWebKit/537.36 (KHTML, like Gecko) \
                  Chrome/131.0.0.0 Safari/537.36";
        let http = reqwest::Client::builder()
            .timeout(FETCH_TIMEOUT)
            .redirect(reqwest::redirect::Policy::limited(5))
            .user_agent(ua)
            .build()
            .map_err(|e| format!("Impossible de construire le client HTTP: {}", e))?;
        Ok(Self {
            http,
            competitor_delay: config.competitor_delay,
        })
    }

    async fn fetch(&self, url: &str) -> Result<(String, Url), String> {
        let parsed = Url::parse(url).map_err(|e| format!("URL invalide '{}': {}", url, e))?;
        let response = self
            .http
            .get(parsed.clone())
            .send()
            .await
            .map_err(|e| format!("Échec de la requête vers {}: {}", url, e))?;
        if !response.status().is_success() {
            return Err(format!(
                "Le site {} a répondu {}",
                url,
                response.status().as_u16()
            ));
        }
        let body = response
            .text()
            .await
            .map_err(|e| format!("Lecture du corps de {} impossible: {}", url, e))?;
        Ok((body, parsed))
    }

    /// Full analysis of one page: extraction, heuristic scores, then a
    /// model-written positioning summary over the extracted signals.
    pub async fn analyze(
        &self,
        model: &dyn ChatModel,
        url: &str,
    ) -> Result<AnalysisReport, String> {
        let (html, base) = self.fetch(url).await?;
        let extraction = scrape::extract_page(&html, &base);

        let seo_score = scores::seo_score(&extraction.seo);
        let performance_score = scores::performance_score(&extraction.seo);
        let insights = scores::build_insights(seo_score, performance_score, &extraction.design);
        let recommendations = scores::build_recommendations(&extraction.seo, &extraction.design);

        let excerpt: String = extraction
            .extract
            .main_content
            .chars()
            .take(CONTENT_EXCERPT_CHARS)
            .collect();
        let prompt = format!(
            "URL: {url}\nTitre: {title}\nMeta description: {desc}\nTitres H1: {h1}\nTitres H2: {h2}\n\
             Extrait du contenu:\n{excerpt}",
            url = url,
            title = extraction.extract.title,
            desc = extraction.extract.meta_description,
            h1 = extraction.extract.h1.join(" | "),
            h2 = extraction.extract.h2.join(" | "),
            excerpt = excerpt,
        );
        let positioning_summary = model
            .complete(
                SUMMARY_SYSTEM,
                &prompt,
                ChatParams {
                    max_tokens: 500,
                    temperature: 0.5,
                },
            )
            .await?
            .trim()
            .to_string();

        Ok(AnalysisReport {
            url: url.to_string(),
            extract: extraction.extract,
            design: extraction.design,
            seo: extraction.seo,
            seo_score,
            performance_score,
            positioning_summary,
            insights,
            recommendations,
        })
    }

    /// Analyzes each URL in turn, pausing between requests. A URL whose
    /// fetch or analysis fails is logged and skipped; the batch itself
    /// never fails.
    pub async fn analyze_competitors(
        &self,
        model: &dyn ChatModel,
        urls: &[String],
    ) -> CompetitorLandscape {
        let mut analyses = Vec::new();
        let mut skipped_urls = Vec::new();

        for (i, url) in urls.iter().enumerate() {
            if i > 0 && !self.competitor_delay.is_zero() {
                tokio::time::sleep(self.competitor_delay).await;
            }
            match self.analyze(model, url).await {
                Ok(report) => analyses.push(report),
                Err(e) => {
                    warn!("concurrent {} ignoré: {}", url, e);
                    skipped_urls.push(url.clone());
                }
            }
        }

        let market_summary = if analyses.is_empty() {
            "Aucun site concurrent n'a pu être analysé.".to_string()
        } else {
            let digest = analyses
                .iter()
                .map(|a| format!("- {} : {}", a.url, a.positioning_summary))
                .collect::<Vec<_>>()
                .join("\n");
            match model
                .complete(
                    MARKET_SYSTEM,
                    &digest,
                    ChatParams {
                        max_tokens: 600,
                        temperature: 0.5,
                    },
                )
                .await
            {
                Ok(summary) => summary.trim().to_string(),
                Err(e) => {
                    warn!("synthèse de marché indisponible: {}", e);
                    format!("{} site(s) concurrent(s) analysé(s).", analyses.len())
                }
            }
        };

        CompetitorLandscape {
            analyses,
            skipped_urls,
            market_summary,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::testing::{FailingModel, StubModel};

    fn analyzer_without_delay() -> WebsiteAnalyzer {
        // Test config carries zero pacing delay.
        WebsiteAnalyzer::new(&Config::for_tests()).unwrap()
    }

    #[tokio::test]
    async fn unreachable_competitors_are_skipped_not_fatal() {
        let analyzer = analyzer_without_delay();
        let model = StubModel::new(Vec::<String>::new());
        let urls = vec!["http://127.0.0.1:1/page".to_string()];
        let landscape = analyzer.analyze_competitors(&model, &urls).await;
        assert!(landscape.analyses.is_empty());
        assert_eq!(landscape.skipped_urls, urls);
        assert_eq!(
            landscape.market_summary,
            "Aucun site concurrent n'a pu être analysé."
        );
    }

    #[tokio::test]
    async fn empty_url_list_yields_empty_landscape() {
        let analyzer = analyzer_without_delay();
        let model = FailingModel;
        let landscape = analyzer.analyze_competitors(&model, &[]).await;
        assert!(landscape.analyses.is_empty());
        assert!(landscape.skipped_urls.is_empty());
    }

    #[tokio::test]
    async fn malformed_url_fails_analysis() {
        let analyzer = analyzer_without_delay();
        let model = FailingModel;
        let err = analyzer.analyze(&model, "not a url").await.unwrap_err();
        assert!(err.contains("URL invalide"));
    }
}
