//! Daily snapshot refresh cycle.
//!
//! On each run the `Refresher` either republishes today's persisted snapshot
//! or fetches all five report sections concurrently, publishes the new
//! bundle and persists it. Results are sent as `AppEvent`s over an MPSC
//! channel for the reducer to apply.

use std::sync::Arc;

use anyhow::Result;
use chrono::{DateTime, FixedOffset, Local, NaiveDate, Utc};
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

use crate::api::IntelligenceProvider;
use crate::cache::{Snapshot, SnapshotStore};
use crate::models::{Geography, ReportBundle};
use crate::state::{AppEvent, SnapshotOrigin, REFRESH_FAILED_MESSAGE};

/// Source of "now" and of the consumer's calendar.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;

    /// Calendar date of `at` in the consumer's time zone, using the UTC
    /// offset in force at that instant.
    fn local_date(&self, at: &DateTime<Utc>) -> NaiveDate;

    fn today(&self) -> NaiveDate {
        self.local_date(&self.now())
    }
}

/// Wall clock judged in the machine's local time zone, DST rules included.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }

    fn local_date(&self, at: &DateTime<Utc>) -> NaiveDate {
        at.with_timezone(&Local).date_naive()
    }
}

/// A clock stopped at one instant, in a zone whose offset never changes.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<FixedOffset>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0.with_timezone(&Utc)
    }

    fn local_date(&self, at: &DateTime<Utc>) -> NaiveDate {
        at.with_timezone(&self.0.timezone()).date_naive()
    }
}

/// How a refresh ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshOutcome {
    /// Today's snapshot was republished; no fetches were made.
    Cached,
    /// All sections were fetched and a new snapshot published.
    Fetched,
    /// A fetch failed; the persisted snapshot was left as it was.
    Failed,
}

pub struct Refresher {
    provider: Arc<dyn IntelligenceProvider>,
    store: Arc<dyn SnapshotStore>,
    clock: Arc<dyn Clock>,
    geography: Geography,
}

impl Refresher {
    /// `geography` is the fixed scope every fetch uses.
    pub fn new(
        provider: Arc<dyn IntelligenceProvider>,
        store: Arc<dyn SnapshotStore>,
        clock: Arc<dyn Clock>,
        geography: Geography,
    ) -> Self {
        Self {
            provider,
            store,
            clock,
            geography,
        }
    }

    /// Reuse today's snapshot if there is one, otherwise fetch a new one.
    pub async fn refresh(&self, tx: &mpsc::Sender<AppEvent>) -> RefreshOutcome {
        self.run(tx, false).await
    }

    /// Fetch a new snapshot even if today's is still stored.
    pub async fn force_refresh(&self, tx: &mpsc::Sender<AppEvent>) -> RefreshOutcome {
        self.run(tx, true).await
    }

    async fn run(&self, tx: &mpsc::Sender<AppEvent>, force: bool) -> RefreshOutcome {
        Self::send_result(tx, AppEvent::RefreshStarted).await;

        if !force {
            let now = self.clock.now();
            if let Some(snapshot) = self.load_fresh() {
                info!(captured_at = %snapshot.captured_at, age = %snapshot.age_display(&now), "Loading data from cache");
                Self::send_result(
                    tx,
                    AppEvent::RefreshSucceeded {
                        snapshot,
                        origin: SnapshotOrigin::Cache,
                    },
                )
                .await;
                return RefreshOutcome::Cached;
            }
        }

        info!(geography = %self.geography, "Fetching new data for the day");
        let bundle = match self.fetch_bundle().await {
            Ok(bundle) => bundle,
            Err(e) => {
                error!(error = %e, "Refresh failed");
                Self::send_result(tx, AppEvent::RefreshFailed(REFRESH_FAILED_MESSAGE.to_string())).await;
                return RefreshOutcome::Failed;
            }
        };

        let snapshot = Snapshot::new(&self.clock.now(), self.geography, bundle);
        let persisted = snapshot.clone();

        Self::send_result(
            tx,
            AppEvent::RefreshSucceeded {
                snapshot,
                origin: SnapshotOrigin::Provider,
            },
        )
        .await;

        if let Err(e) = self.store.save(&persisted) {
            warn!(error = %e, "Failed to persist snapshot");
        }

        info!("Refresh complete");
        RefreshOutcome::Fetched
    }

    /// The stored snapshot if it was captured today. Unreadable records
    /// count as a miss.
    fn load_fresh(&self) -> Option<Snapshot> {
        match self.store.load() {
            Ok(Some(snapshot)) if snapshot.is_fresh(self.clock.as_ref()) => Some(snapshot),
            Ok(Some(snapshot)) => {
                debug!(captured_at = %snapshot.captured_at, "Stored snapshot is stale");
                None
            }
            Ok(None) => {
                debug!("No stored snapshot");
                None
            }
            Err(e) => {
                warn!(error = %e, "Unreadable snapshot, treating as cache miss");
                None
            }
        }
    }

    /// Fetch all five sections concurrently. Any failure fails the whole
    /// bundle; no partial result escapes.
    async fn fetch_bundle(&self) -> Result<ReportBundle> {
        let provider = &self.provider;
        let geography = self.geography;

        let (market, competitive, shares, india_news, international_news) = tokio::try_join!(
            provider.fetch_market_intelligence(geography),
            provider.fetch_competitive_intelligence(geography),
            provider.fetch_share_prices(),
            provider.fetch_india_news(),
            provider.fetch_international_news(),
        )?;

        Ok(ReportBundle::from_sections(
            market,
            competitive,
            shares,
            india_news,
            international_news,
        ))
    }

    /// Helper to send refresh events, logging any channel errors
    async fn send_result(tx: &mpsc::Sender<AppEvent>, event: AppEvent) {
        if let Err(e) = tx.send(event).await {
            error!(error = %e, "Failed to send refresh event - channel closed");
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
