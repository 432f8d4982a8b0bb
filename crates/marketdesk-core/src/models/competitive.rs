use serde::{Deserialize, Serialize};

/// A new residential project launched by a competing developer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProjectLaunch {
    #[serde(rename = "developerName", default)]
    pub developer_name: String,
    #[serde(rename = "projectName", default)]
    pub project_name: String,
    #[serde(default)]
    pub location: String,
    #[serde(rename = "priceBracket", default)]
    pub price_bracket: String,
    #[serde(default)]
    pub configuration: String,
    #[serde(default)]
    pub usp: String,
    #[serde(rename = "launchDate", default)]
    pub launch_date: String,
}

impl ProjectLaunch {
    /// Whether this launch belongs to `developer` (case-insensitive substring).
    pub fn is_by(&self, developer: &str) -> bool {
        let developer = developer.trim();
        if developer.is_empty() {
            return false;
        }
        self.developer_name
            .to_lowercase()
            .contains(&developer.to_lowercase())
    }
}

/// Drop every launch attributed to the excluded developer.
pub fn exclude_developer(launches: Vec<ProjectLaunch>, developer: &str) -> Vec<ProjectLaunch> {
    launches.into_iter().filter(|l| !l.is_by(developer)).collect()
}
