//! Intelligence provider module.
//!
//! This module defines the `IntelligenceProvider` seam the refresh cycle
//! fetches through, and `GeminiClient`, which answers each report section
//! with one schema-constrained, search-grounded generation request.

pub mod client;
pub mod error;
pub mod prompts;
pub mod provider;
pub mod schema;

pub use client::GeminiClient;
pub use error::ApiError;
pub use provider::IntelligenceProvider;
