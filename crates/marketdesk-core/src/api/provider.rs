use anyhow::Result;
use async_trait::async_trait;

use crate::models::{Geography, MarketData, NewsArticle, ProjectLaunch, Section, SharePrice};

/// Source of the five report sections.
///
/// Each call answers with the section payload and the web sources the
/// provider cited for it.
#[async_trait]
pub trait IntelligenceProvider: Send + Sync {
    async fn fetch_market_intelligence(&self, geography: Geography) -> Result<Section<MarketData>>;

    async fn fetch_competitive_intelligence(
        &self,
        geography: Geography,
    ) -> Result<Section<Vec<ProjectLaunch>>>;

    async fn fetch_share_prices(&self) -> Result<Section<Vec<SharePrice>>>;

    async fn fetch_india_news(&self) -> Result<Section<Vec<NewsArticle>>>;

    async fn fetch_international_news(&self) -> Result<Section<Vec<NewsArticle>>>;
}
