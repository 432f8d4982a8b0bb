use serde::{Deserialize, Serialize};

/// Direction of a KPI or share price movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeType {
    Increase,
    Decrease,
    #[default]
    Neutral,
}

impl ChangeType {
    /// Arrow marker used in text reports.
    pub fn marker(&self) -> &'static str {
        match self {
            ChangeType::Increase => "▲",
            ChangeType::Decrease => "▼",
            ChangeType::Neutral => "–",
        }
    }
}

impl std::fmt::Display for ChangeType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ChangeType::Increase => write!(f, "increase"),
            ChangeType::Decrease => write!(f, "decrease"),
            ChangeType::Neutral => write!(f, "neutral"),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SwotAnalysis {
    #[serde(default)]
    pub strengths: Vec<String>,
    #[serde(default)]
    pub weaknesses: Vec<String>,
    #[serde(default)]
    pub opportunities: Vec<String>,
    #[serde(default)]
    pub threats: Vec<String>,
}

impl SwotAnalysis {
    /// Quadrants in display order, paired with their headings.
    pub fn quadrants(&self) -> [(&'static str, &[String]); 4] {
        [
            ("Strengths", self.strengths.as_slice()),
            ("Weaknesses", self.weaknesses.as_slice()),
            ("Opportunities", self.opportunities.as_slice()),
            ("Threats", self.threats.as_slice()),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Kpi {
    pub name: String,
    pub value: String,
    #[serde(default)]
    pub change: String,
    #[serde(rename = "changeType", default)]
    pub change_type: ChangeType,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendDataPoint {
    pub quarter: String,
    #[serde(rename = "averagePrice")]
    pub average_price: f64,
    #[serde(rename = "unitsSold")]
    pub units_sold: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DemandProfileItem {
    pub category: String,
    pub percentage: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DemandProfile {
    #[serde(rename = "byConfiguration", default)]
    pub by_configuration: Vec<DemandProfileItem>,
    #[serde(rename = "byTicketSize", default)]
    pub by_ticket_size: Vec<DemandProfileItem>,
}

/// Market intelligence report for one geography.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MarketData {
    #[serde(rename = "marketOverview", default)]
    pub market_overview: String,
    #[serde(default)]
    pub swot: SwotAnalysis,
    #[serde(default)]
    pub kpis: Vec<Kpi>,
    #[serde(default)]
    pub trends: Vec<TrendDataPoint>,
    #[serde(rename = "demandProfile", default)]
    pub demand_profile: DemandProfile,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_market_data() {
        let json = r#"{
            "marketOverview": "Prices rose **8%** year on year.",
            "swot": {"strengths": ["Demand"], "weaknesses": [], "opportunities": ["Infra"], "threats": ["Rates"]},
            "kpis": [{"name": "Avg Price", "value": "₹9,500/sqft", "change": "+8%", "changeType": "increase"}],
            "trends": [{"quarter": "Q1 2025", "averagePrice": 9500, "unitsSold": 12000.5}],
            "demandProfile": {"byConfiguration": [{"category": "3 BHK", "percentage": 45}], "byTicketSize": []}
        }"#;

        let data: MarketData = serde_json::from_str(json).unwrap();
        assert_eq!(data.kpis[0].change_type, ChangeType::Increase);
        assert_eq!(data.trends[0].average_price, 9500.0);
        assert_eq!(data.demand_profile.by_configuration[0].category, "3 BHK");
        assert_eq!(data.swot.threats, vec!["Rates".to_string()]);
    }

    #[test]
    fn test_parse_market_data_missing_sections() {
        let data: MarketData = serde_json::from_str(r#"{"marketOverview": "Flat."}"#).unwrap();
        assert!(data.kpis.is_empty());
        assert!(data.swot.strengths.is_empty());
    }

    #[test]
    fn test_unknown_change_type_rejected() {
        let json = r#"{"name": "x", "value": "1", "change": "0", "changeType": "sideways"}"#;
        assert!(serde_json::from_str::<Kpi>(json).is_err());
    }
}
