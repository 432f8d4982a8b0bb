//! Gemini REST client for the intelligence sections.
//!
//! Each section is one `generateContent` call with a JSON response schema
//! and Google Search grounding enabled. The answer text is parsed into the
//! section model and the grounding chunks become the section's sources.

use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::prompts::{self, SectionRequest};
use super::{ApiError, IntelligenceProvider};
use crate::config::Config;
use crate::models::competitive::exclude_developer;
use crate::models::{Geography, GroundingSource, MarketData, NewsArticle, ProjectLaunch, Section, SharePrice};

// ============================================================================
// Constants
// ============================================================================

/// Header carrying the API key
const API_KEY_HEADER: &str = "x-goog-api-key";

/// Maximum number of retries for rate-limited (429) requests.
const MAX_RATE_LIMIT_RETRIES: u32 = 3;

/// Initial backoff delay in milliseconds for rate limiting.
const INITIAL_BACKOFF_MS: u64 = 1000;

/// Expected list sizes, used only for logging.
const EXPECTED_SHARE_PRICES: usize = 10;
const EXPECTED_NEWS_ARTICLES: usize = 5;

// ============================================================================
// Wire types
// ============================================================================

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    contents: Vec<RequestContent<'a>>,
    #[serde(rename = "generationConfig")]
    generation_config: GenerationConfig<'a>,
    tools: Vec<Tool>,
}

#[derive(Debug, Serialize)]
struct RequestContent<'a> {
    parts: Vec<RequestPart<'a>>,
}

#[derive(Debug, Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
struct GenerationConfig<'a> {
    #[serde(rename = "responseMimeType")]
    response_mime_type: &'static str,
    #[serde(rename = "responseSchema")]
    response_schema: &'a serde_json::Value,
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct Tool {
    #[serde(rename = "googleSearch")]
    google_search: serde_json::Map<String, serde_json::Value>,
}

#[derive(Debug, Default, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Default, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
    #[serde(rename = "groundingMetadata")]
    grounding_metadata: Option<GroundingMetadata>,
    #[serde(rename = "finishReason")]
    finish_reason: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Default, Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct GroundingMetadata {
    #[serde(rename = "groundingChunks", default)]
    grounding_chunks: Vec<GroundingSource>,
}

impl<'a> GenerateRequest<'a> {
    fn from_section(request: &'a SectionRequest) -> Self {
        Self {
            contents: vec![RequestContent {
                parts: vec![RequestPart {
                    text: &request.prompt,
                }],
            }],
            generation_config: GenerationConfig {
                response_mime_type: "application/json",
                response_schema: &request.schema,
                temperature: request.temperature,
            },
            tools: vec![Tool {
                google_search: serde_json::Map::new(),
            }],
        }
    }
}

// ============================================================================
// Client
// ============================================================================

/// Gemini client. Clone is cheap - reqwest::Client shares its connection pool.
#[derive(Clone)]
pub struct GeminiClient {
    client: reqwest::Client,
    api_key: Option<String>,
    model: String,
    base_url: String,
    excluded_developer: String,
}

impl GeminiClient {
    pub fn new(config: &Config) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            api_key: config.resolved_api_key(),
            model: config.model.clone(),
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
            excluded_developer: config.excluded_developer.clone(),
        })
    }

    fn endpoint(&self) -> String {
        format!("{}/models/{}:generateContent", self.base_url, self.model)
    }

    /// Send one generation request, backing off on 429.
    async fn generate(&self, request: &SectionRequest) -> Result<GenerateResponse> {
        let api_key = self.api_key.as_deref().ok_or(ApiError::MissingApiKey)?;
        let url = self.endpoint();
        let body = GenerateRequest::from_section(request);

        let mut retries = 0;
        let mut backoff_ms = INITIAL_BACKOFF_MS;

        loop {
            let response = self
                .client
                .post(&url)
                .header(API_KEY_HEADER, api_key)
                .json(&body)
                .send()
                .await
                .map_err(ApiError::from)
                .with_context(|| format!("Failed to request {}", request.section))?;

            let status = response.status();
            if status.is_success() {
                return response
                    .json()
                    .await
                    .map_err(ApiError::from)
                    .with_context(|| format!("Failed to read {} response", request.section));
            }

            if status.as_u16() == 429 && retries < MAX_RATE_LIMIT_RETRIES {
                retries += 1;
                warn!(section = request.section, retry = retries, backoff_ms = backoff_ms, "Rate limited, backing off");
                tokio::time::sleep(Duration::from_millis(backoff_ms)).await;
                backoff_ms *= 2;
                continue;
            }

            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::from_status(status, &body).into());
        }
    }

    async fn fetch_section<T: DeserializeOwned>(&self, request: SectionRequest) -> Result<Section<T>> {
        debug!(section = request.section, model = %self.model, "Requesting section");
        let response = self.generate(&request).await?;
        let section = parse_section(request.section, response)?;
        info!(section = request.section, sources = section.sources.len(), "Section received");
        Ok(section)
    }
}

#[async_trait]
impl IntelligenceProvider for GeminiClient {
    async fn fetch_market_intelligence(&self, geography: Geography) -> Result<Section<MarketData>> {
        self.fetch_section(prompts::market_intelligence(geography)).await
    }

    async fn fetch_competitive_intelligence(
        &self,
        geography: Geography,
    ) -> Result<Section<Vec<ProjectLaunch>>> {
        let request = prompts::competitive_intelligence(geography, &self.excluded_developer);
        let section: Section<Vec<ProjectLaunch>> = self.fetch_section(request).await?;

        let before = section.data.len();
        let launches = exclude_developer(section.data, &self.excluded_developer);
        if launches.len() != before {
            debug!(dropped = before - launches.len(), developer = %self.excluded_developer, "Dropped excluded developer launches");
        }
        Ok(Section::new(launches, section.sources))
    }

    async fn fetch_share_prices(&self) -> Result<Section<Vec<SharePrice>>> {
        let section: Section<Vec<SharePrice>> = self.fetch_section(prompts::share_prices()).await?;
        if section.data.len() != EXPECTED_SHARE_PRICES {
            warn!(count = section.data.len(), expected = EXPECTED_SHARE_PRICES, "Unexpected share price count");
        }
        Ok(section)
    }

    async fn fetch_india_news(&self) -> Result<Section<Vec<NewsArticle>>> {
        let section: Section<Vec<NewsArticle>> = self.fetch_section(prompts::india_news()).await?;
        warn_news_count("india news", section.data.len());
        Ok(section)
    }

    async fn fetch_international_news(&self) -> Result<Section<Vec<NewsArticle>>> {
        let section: Section<Vec<NewsArticle>> =
            self.fetch_section(prompts::international_news()).await?;
        warn_news_count("international news", section.data.len());
        Ok(section)
    }
}

fn warn_news_count(section: &'static str, count: usize) {
    if count != EXPECTED_NEWS_ARTICLES {
        warn!(section = section, count = count, expected = EXPECTED_NEWS_ARTICLES, "Unexpected article count");
    }
}

// ============================================================================
// Response parsing
// ============================================================================

/// Remove a surrounding Markdown code fence (```json ... ```), if present.
fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let Some(body) = rest.strip_suffix("```") else {
        return trimmed;
    };
    // Drop the info string ("json") on the opening line
    match body.find('\n') {
        Some(newline) => body[newline + 1..].trim(),
        None => body.trim(),
    }
}

fn parse_section<T: DeserializeOwned>(section: &'static str, response: GenerateResponse) -> Result<Section<T>> {
    let candidate = response
        .candidates
        .into_iter()
        .next()
        .ok_or_else(|| ApiError::InvalidResponse(format!("No candidates in {} response", section)))?;

    let text: String = candidate
        .content
        .map(|c| c.parts.into_iter().filter_map(|p| p.text).collect::<String>())
        .unwrap_or_default();

    if text.trim().is_empty() {
        let reason = candidate.finish_reason.unwrap_or_else(|| "unknown".to_string());
        return Err(ApiError::InvalidResponse(format!(
            "Empty {} response (finish reason: {})",
            section, reason
        ))
        .into());
    }

    let data: T = serde_json::from_str(strip_code_fence(&text))
        .map_err(|source| ApiError::Schema { section, source })?;

    let sources = candidate
        .grounding_metadata
        .map(|m| m.grounding_chunks)
        .unwrap_or_default();

    Ok(Section::new(data, sources))
}

// ============================================================================
// Tests
// ============================================================================
