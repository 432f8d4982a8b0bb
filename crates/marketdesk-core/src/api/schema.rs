//! Response schemas sent with each generation request.
//!
//! The provider constrains its JSON output to these shapes; the field names
//! match the serde names on the section models.

use serde_json::{json, Value};

fn string() -> Value {
    json!({ "type": "STRING" })
}

fn string_list() -> Value {
    json!({ "type": "ARRAY", "items": string() })
}

fn change_type() -> Value {
    json!({ "type": "STRING", "enum": ["increase", "decrease", "neutral"] })
}

fn demand_items() -> Value {
    json!({
        "type": "ARRAY",
        "items": {
            "type": "OBJECT",
            "properties": {
                "category": string(),
                "percentage": { "type": "NUMBER" }
            }
        }
    })
}

pub fn market_intelligence() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "marketOverview": string(),
            "swot": {
                "type": "OBJECT",
                "properties": {
                    "strengths": string_list(),
                    "weaknesses": string_list(),
                    "opportunities": string_list(),
                    "threats": string_list()
                }
            },
            "kpis": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "name": string(),
                        "value": string(),
                        "change": string(),
                        "changeType": change_type()
                    }
                }
            },
            "trends": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "quarter": string(),
                        "averagePrice": { "type": "NUMBER" },
                        "unitsSold": { "type": "NUMBER" }
                    }
                }
            },
            "demandProfile": {
                "type": "OBJECT",
                "properties": {
                    "byConfiguration": demand_items(),
                    "byTicketSize": demand_items()
                }
            }
        }
    })
}

pub fn competitive_intelligence() -> Value {
    json!({
        "type": "ARRAY",
        "items": {
            "type": "OBJECT",
            "properties": {
                "developerName": string(),
                "projectName": string(),
                "location": string(),
                "priceBracket": string(),
                "configuration": string(),
                "usp": string(),
                "launchDate": string()
            }
        }
    })
}

pub fn share_prices() -> Value {
    json!({
        "type": "ARRAY",
        "items": {
            "type": "OBJECT",
            "properties": {
                "companyName": string(),
                "stockSymbol": string(),
                "currentPrice": { "type": "STRING", "description": "e.g., '₹1,234.56'" },
                "dayChange": { "type": "STRING", "description": "e.g., '+12.34' or '-5.67'" },
                "dayChangePercent": { "type": "STRING", "description": "e.g., '(+1.01%)' or '(-0.50%)'" },
                "changeType": change_type()
            },
            "required": ["companyName", "stockSymbol", "currentPrice", "dayChange", "dayChangePercent", "changeType"]
        }
    })
}

pub fn news() -> Value {
    json!({
        "type": "ARRAY",
        "items": {
            "type": "OBJECT",
            "properties": {
                "title": string(),
                "source": { "type": "STRING", "description": "Name of the publication" },
                "url": { "type": "STRING", "description": "Direct URL to the article" },
                "publishedDate": { "type": "STRING", "description": "Date in YYYY-MM-DD format" },
                "snippet": { "type": "STRING", "description": "A one or two-sentence summary of the article." }
            },
            "required": ["title", "source", "url", "publishedDate", "snippet"]
        }
    })
}
