//! Application state and the pure reducer that advances it.
//!
//! The refresh cycle and the user both produce `AppEvent`s; `reduce` folds
//! each event into a new `AppState`. Nothing else mutates the state.

use chrono::{DateTime, Utc};

use crate::cache::Snapshot;
use crate::models::{Geography, ReportBundle};

/// User-visible message for any failed refresh.
pub const REFRESH_FAILED_MESSAGE: &str =
    "Failed to fetch intelligence data. The AI model may be overloaded. Please try again later.";

// ============================================================================
// Pages
// ============================================================================

/// Report pages, in navigation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Page {
    #[default]
    MarketIntelligence,
    CompetitiveIntelligence,
    Sources,
    SharePriceIndex,
    IndiaNews,
    InternationalNews,
}

impl Page {
    pub const ALL: [Page; 6] = [
        Page::MarketIntelligence,
        Page::CompetitiveIntelligence,
        Page::Sources,
        Page::SharePriceIndex,
        Page::IndiaNews,
        Page::InternationalNews,
    ];

    /// Get the display title for this page.
    pub fn title(&self) -> &'static str {
        match self {
            Page::MarketIntelligence => "Market Intelligence",
            Page::CompetitiveIntelligence => "Competitive Intelligence",
            Page::Sources => "Sources",
            Page::SharePriceIndex => "Share Price Index",
            Page::IndiaNews => "India News",
            Page::InternationalNews => "International News",
        }
    }

    /// Short name accepted on the command line.
    pub fn slug(&self) -> &'static str {
        match self {
            Page::MarketIntelligence => "market",
            Page::CompetitiveIntelligence => "competitive",
            Page::Sources => "sources",
            Page::SharePriceIndex => "shares",
            Page::IndiaNews => "india-news",
            Page::InternationalNews => "world-news",
        }
    }

    pub fn from_slug(s: &str) -> Option<Self> {
        let s = s.trim();
        Self::ALL
            .into_iter()
            .find(|p| p.slug().eq_ignore_ascii_case(s) || p.title().eq_ignore_ascii_case(s))
    }

    /// Get the next page (wrapping around)
    pub fn next(&self) -> Self {
        let i = Self::ALL.iter().position(|p| p == self).unwrap_or(0);
        Self::ALL[(i + 1) % Self::ALL.len()]
    }

    /// Get the previous page (wrapping around)
    pub fn prev(&self) -> Self {
        let i = Self::ALL.iter().position(|p| p == self).unwrap_or(0);
        Self::ALL[(i + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

// ============================================================================
// State
// ============================================================================

/// Where a published snapshot came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnapshotOrigin {
    /// Reused from today's persisted snapshot.
    Cache,
    /// Freshly fetched from the provider.
    Provider,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum LoadStatus {
    #[default]
    Idle,
    Loading,
    Ready,
    Failed(String),
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct AppState {
    pub status: LoadStatus,
    pub page: Page,
    /// Geography shown in the header. Selecting another one does not refetch.
    pub geography: Geography,
    pub bundle: Option<ReportBundle>,
    pub last_updated: Option<DateTime<Utc>>,
    pub origin: Option<SnapshotOrigin>,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.status, LoadStatus::Loading)
    }

    pub fn error(&self) -> Option<&str> {
        match &self.status {
            LoadStatus::Failed(message) => Some(message),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum AppEvent {
    RefreshStarted,
    RefreshSucceeded {
        snapshot: Snapshot,
        origin: SnapshotOrigin,
    },
    RefreshFailed(String),
    PageSelected(Page),
    GeographySelected(Geography),
}

/// Pure reducer: applies one event to the state.
pub fn reduce(mut state: AppState, event: AppEvent) -> AppState {
    match event {
        AppEvent::RefreshStarted => {
            state.status = LoadStatus::Loading;
        }
        AppEvent::RefreshSucceeded { snapshot, origin } => {
            state.status = LoadStatus::Ready;
            state.geography = snapshot.geography;
            state.last_updated = Some(snapshot.captured_at);
            state.bundle = Some(snapshot.bundle);
            state.origin = Some(origin);
        }
        AppEvent::RefreshFailed(reason) => {
            // Whatever was published before stays, but the page shows the error
            state.status = LoadStatus::Failed(reason);
        }
        AppEvent::PageSelected(page) => {
            state.page = page;
        }
        AppEvent::GeographySelected(geography) => {
            state.geography = geography;
        }
    }
    state
}

// ============================================================================
// Tests
// ============================================================================
