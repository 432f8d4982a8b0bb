use serde::{Deserialize, Serialize};

use super::{unique_sources, GroundingSource, MarketData, NewsArticle, ProjectLaunch, SharePrice, SourceLink};

/// One provider answer: the section payload plus the sources it cited.
#[derive(Debug, Clone, PartialEq)]
pub struct Section<T> {
    pub data: T,
    pub sources: Vec<GroundingSource>,
}

impl<T> Section<T> {
    pub fn new(data: T, sources: Vec<GroundingSource>) -> Self {
        Self { data, sources }
    }
}

/// All five report sections fetched together.
///
/// Field names match the persisted record, which flattens the bundle next
/// to the snapshot timestamp and geography.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReportBundle {
    #[serde(rename = "marketData")]
    pub market_data: MarketData,
    #[serde(rename = "marketSources", default)]
    pub market_sources: Vec<GroundingSource>,
    #[serde(rename = "projectLaunches", default)]
    pub project_launches: Vec<ProjectLaunch>,
    #[serde(rename = "competitiveSources", default)]
    pub competitive_sources: Vec<GroundingSource>,
    #[serde(rename = "sharePrices", default)]
    pub share_prices: Vec<SharePrice>,
    #[serde(rename = "sharePriceSources", default)]
    pub share_price_sources: Vec<GroundingSource>,
    #[serde(rename = "indiaNews", default)]
    pub india_news: Vec<NewsArticle>,
    #[serde(rename = "indiaNewsSources", default)]
    pub india_news_sources: Vec<GroundingSource>,
    #[serde(rename = "internationalNews", default)]
    pub international_news: Vec<NewsArticle>,
    #[serde(rename = "internationalNewsSources", default)]
    pub international_news_sources: Vec<GroundingSource>,
}

impl ReportBundle {
    /// Assemble a bundle from the five section answers.
    pub fn from_sections(
        market: Section<MarketData>,
        competitive: Section<Vec<ProjectLaunch>>,
        shares: Section<Vec<SharePrice>>,
        india_news: Section<Vec<NewsArticle>>,
        international_news: Section<Vec<NewsArticle>>,
    ) -> Self {
        Self {
            market_data: market.data,
            market_sources: market.sources,
            project_launches: competitive.data,
            competitive_sources: competitive.sources,
            share_prices: shares.data,
            share_price_sources: shares.sources,
            india_news: india_news.data,
            india_news_sources: india_news.sources,
            international_news: international_news.data,
            international_news_sources: international_news.sources,
        }
    }

    /// Every cited source across sections, in section order.
    pub fn all_sources(&self) -> impl Iterator<Item = &GroundingSource> {
        self.market_sources
            .iter()
            .chain(&self.competitive_sources)
            .chain(&self.share_price_sources)
            .chain(&self.india_news_sources)
            .chain(&self.international_news_sources)
    }

    /// De-duplicated sources for the Sources page.
    pub fn unique_sources(&self) -> Vec<SourceLink> {
        unique_sources(self.all_sources())
    }
}
