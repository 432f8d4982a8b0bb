//! Generation requests for each report section.

use serde_json::Value;

use super::schema;
use crate::models::Geography;

/// Everything the client needs to ask for one section.
#[derive(Debug, Clone)]
pub struct SectionRequest {
    /// Short name used in logs and schema errors.
    pub section: &'static str,
    pub prompt: String,
    pub schema: Value,
    pub temperature: f32,
}

pub fn market_intelligence(geography: Geography) -> SectionRequest {
    SectionRequest {
        section: "market intelligence",
        prompt: format!(
            "Generate a comprehensive market intelligence report for the residential real estate market in {}.\n\
             The report must include: KPIs, Trends, Demand Profile, Market Synopsis, and SWOT Analysis.\n\
             Highlight important statistics using markdown bold syntax (**statistic** or **123**).",
            geography
        ),
        schema: schema::market_intelligence(),
        temperature: 0.2,
    }
}

pub fn competitive_intelligence(geography: Geography, excluded_developer: &str) -> SectionRequest {
    let mut prompt = format!(
        "Generate a list of 5 to 7 new residential project launches in {} within the last 90 days.\n\
         Strictly use authentic, credible sources (news, research firms, regulatory filings).\n\
         EXCLUDE data from broker portals, listings, influencers, and promotional sites.",
        geography
    );
    let excluded = excluded_developer.trim();
    if !excluded.is_empty() {
        prompt.push_str(&format!(
            "\nIMPORTANT: Do not include any projects developed by {0} or {0} Limited. Focus only on competitor projects.",
            excluded
        ));
    }
    SectionRequest {
        section: "competitive intelligence",
        prompt,
        schema: schema::competitive_intelligence(),
        temperature: 0.3,
    }
}

pub fn share_prices() -> SectionRequest {
    SectionRequest {
        section: "share prices",
        prompt: "Fetch the latest stock market data for the top 10 largest listed real estate companies in India by market capitalization.\n\
                 For each company, provide the full company name, its NSE stock symbol, the current price, the day's change in value, and the day's change in percentage.\n\
                 Determine if the change is an increase, decrease, or neutral for the changeType."
            .to_string(),
        schema: schema::share_prices(),
        temperature: 0.1,
    }
}

pub fn india_news() -> SectionRequest {
    SectionRequest {
        section: "india news",
        prompt: "Fetch the top 5 most recent and relevant news articles about the Indian real estate market.\n\
                 Source these articles from major Indian publications such as The Economic Times, Business Standard, Livemint, The Hindu BusinessLine, and Moneycontrol.\n\
                 For each article, provide a title, source name, URL, publication date (YYYY-MM-DD), and a concise one or two-sentence snippet."
            .to_string(),
        schema: schema::news(),
        temperature: 0.3,
    }
}

pub fn international_news() -> SectionRequest {
    SectionRequest {
        section: "international news",
        prompt: "Fetch the top 5 most recent and relevant news articles about the international/global real estate market.\n\
                 Source these articles from major international publications such as The Wall Street Journal, Financial Times, Bloomberg, Reuters, and The Economist.\n\
                 For each article, provide a title, source name, URL, publication date (YYYY-MM-DD), and a concise one or two-sentence snippet."
            .to_string(),
        schema: schema::news(),
        temperature: 0.3,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_geography_in_prompt() {
        let request = market_intelligence(Geography::Gurgaon);
        assert!(request.prompt.contains("market in Gurgaon."));
    }

    #[test]
    fn test_competitive_prompt_names_excluded_developer() {
        let request = competitive_intelligence(Geography::India, "DLF");
        assert!(request.prompt.contains("India (Pan-India)"));
        assert!(request.prompt.contains("developed by DLF or DLF Limited"));

        let request = competitive_intelligence(Geography::India, "");
        assert!(!request.prompt.contains("Do not include"));
    }
}
