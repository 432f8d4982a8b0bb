use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// A web page the provider cited while generating a section.
///
/// Mirrors the provider's grounding chunk shape, where any part may be
/// absent. Absent parts stay absent when re-serialized.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GroundingSource {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub web: Option<WebSource>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WebSource {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uri: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

impl GroundingSource {
    pub fn new(uri: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            web: Some(WebSource {
                uri: Some(uri.into()),
                title: Some(title.into()),
            }),
        }
    }

    pub fn uri(&self) -> Option<&str> {
        self.web.as_ref()?.uri.as_deref()
    }

    pub fn title(&self) -> Option<&str> {
        self.web.as_ref()?.title.as_deref()
    }
}

/// A displayable source with both parts present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceLink {
    pub uri: String,
    pub title: String,
}

/// De-duplicate sources by URI for display.
///
/// Entries keep the position where their URI first appeared, but carry the
/// title of the last entry seen with that URI. Entries missing a URI or a
/// title (or with an empty one) are dropped.
pub fn unique_sources<'a, I>(sources: I) -> Vec<SourceLink>
where
    I: IntoIterator<Item = &'a GroundingSource>,
{
    let mut order: Vec<Option<&'a str>> = Vec::new();
    let mut latest: HashMap<Option<&'a str>, &'a GroundingSource> = HashMap::new();

    for source in sources {
        let key = source.uri();
        if latest.insert(key, source).is_none() {
            order.push(key);
        }
    }

    order
        .into_iter()
        .filter_map(|key| {
            let source = latest.get(&key)?;
            let uri = source.uri().filter(|u| !u.is_empty())?;
            let title = source.title().filter(|t| !t.is_empty())?;
            Some(SourceLink {
                uri: uri.to_string(),
                title: title.to_string(),
            })
        })
        .collect()
}
