use serde::{Deserialize, Serialize};

use super::ChangeType;

/// Latest quote for a listed real estate developer.
///
/// Prices arrive pre-formatted from the provider (e.g. `₹1,234.56`,
/// `+12.34`, `(+1.01%)`) and are kept as display strings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SharePrice {
    #[serde(rename = "companyName")]
    pub company_name: String,
    #[serde(rename = "stockSymbol")]
    pub stock_symbol: String,
    #[serde(rename = "currentPrice")]
    pub current_price: String,
    #[serde(rename = "dayChange")]
    pub day_change: String,
    #[serde(rename = "dayChangePercent")]
    pub day_change_percent: String,
    #[serde(rename = "changeType")]
    pub change_type: ChangeType,
}
