use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewsArticle {
    pub title: String,
    pub source: String,
    pub url: String,
    /// Publication date, `YYYY-MM-DD`.
    #[serde(rename = "publishedDate")]
    pub published_date: String,
    pub snippet: String,
}

impl NewsArticle {
    /// Parsed publication date, if the provider honored the format.
    pub fn published_on(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(self.published_date.trim(), "%Y-%m-%d").ok()
    }
}
