//! Data models for market intelligence sections.
//!
//! This module contains the structures the intelligence provider returns
//! and the snapshot cache persists:
//!
//! - `MarketData`: overview, SWOT, KPIs, trends and demand profile
//! - `ProjectLaunch`: competitor project launches
//! - `SharePrice`: listed developer share prices
//! - `NewsArticle`: domestic and international news
//! - `GroundingSource`: provenance references cited by the provider
//! - `ReportBundle`: all five sections and their sources together

pub mod bundle;
pub mod competitive;
pub mod geography;
pub mod market;
pub mod news;
pub mod shares;
pub mod source;

pub use bundle::{ReportBundle, Section};
pub use competitive::ProjectLaunch;
pub use geography::Geography;
pub use market::{ChangeType, DemandProfile, DemandProfileItem, Kpi, MarketData, SwotAnalysis, TrendDataPoint};
pub use news::NewsArticle;
pub use shares::SharePrice;
pub use source::{unique_sources, GroundingSource, SourceLink, WebSource};
