use serde::{Deserialize, Serialize};

/// Market region a report is scoped to.
///
/// Serialized by its display label, which is also what the provider prompts
/// interpolate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Geography {
    #[default]
    #[serde(rename = "India (Pan-India)")]
    India,
    #[serde(rename = "Gurgaon")]
    Gurgaon,
    #[serde(rename = "Delhi")]
    Delhi,
    #[serde(rename = "Mumbai")]
    Mumbai,
    #[serde(rename = "Panchkula")]
    Panchkula,
    #[serde(rename = "Chennai")]
    Chennai,
    #[serde(rename = "Kerala")]
    Kerala,
}

impl Geography {
    pub const ALL: [Geography; 7] = [
        Geography::India,
        Geography::Gurgaon,
        Geography::Delhi,
        Geography::Mumbai,
        Geography::Panchkula,
        Geography::Chennai,
        Geography::Kerala,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Geography::India => "India (Pan-India)",
            Geography::Gurgaon => "Gurgaon",
            Geography::Delhi => "Delhi",
            Geography::Mumbai => "Mumbai",
            Geography::Panchkula => "Panchkula",
            Geography::Chennai => "Chennai",
            Geography::Kerala => "Kerala",
        }
    }

    /// Parse a user-supplied name. Accepts the full label or the bare region
    /// name, ignoring case ("india", "India (Pan-India)", "mumbai").
    pub fn parse(s: &str) -> Option<Self> {
        let wanted = s.trim().to_lowercase();
        Self::ALL.into_iter().find(|g| {
            let label = g.label().to_lowercase();
            label == wanted || label.split(" (").next() == Some(wanted.as_str())
        })
    }
}

impl std::fmt::Display for Geography {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serializes_as_label() {
        let json = serde_json::to_string(&Geography::India).unwrap();
        assert_eq!(json, "\"India (Pan-India)\"");
        let back: Geography = serde_json::from_str("\"Panchkula\"").unwrap();
        assert_eq!(back, Geography::Panchkula);
    }

    #[test]
    fn test_parse_lenient() {
        assert_eq!(Geography::parse("india"), Some(Geography::India));
        assert_eq!(Geography::parse("India (Pan-India)"), Some(Geography::India));
        assert_eq!(Geography::parse(" MUMBAI "), Some(Geography::Mumbai));
        assert_eq!(Geography::parse("Atlantis"), None);
    }

    #[test]
    fn test_unknown_tag_fails_deserialization() {
        assert!(serde_json::from_str::<Geography>("\"Atlantis\"").is_err());
    }
}
