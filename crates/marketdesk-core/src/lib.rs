//! MarketDesk core library.
//!
//! Fetches AI-generated real-estate market intelligence, keeps one snapshot
//! per calendar day in a local cache, and renders the published report.
//!
//! - `api`: the `IntelligenceProvider` seam and the Gemini client
//! - `cache`: the single-slot `Snapshot` store
//! - `refresh`: the daily cache-or-fetch cycle
//! - `state`: `AppState` and its pure reducer
//! - `report`: plain-text page rendering

pub mod api;
pub mod cache;
pub mod config;
pub mod models;
pub mod refresh;
pub mod report;
pub mod state;
pub mod utils;

pub use api::{ApiError, GeminiClient, IntelligenceProvider};
pub use cache::{FileSnapshotStore, MemorySnapshotStore, Snapshot, SnapshotStore};
pub use config::Config;
pub use refresh::{Clock, FixedClock, RefreshOutcome, Refresher, SystemClock};
pub use state::{reduce, AppEvent, AppState, LoadStatus, Page, SnapshotOrigin};
