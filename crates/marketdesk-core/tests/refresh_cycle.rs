//! Drives the refresh cycle end to end: provider fake, file-backed store,
//! reducer and report rendering.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Duration, FixedOffset, TimeZone};
use tokio::sync::mpsc;

use marketdesk_core::models::{
    Geography, GroundingSource, MarketData, NewsArticle, ProjectLaunch, Section, SharePrice,
};
use marketdesk_core::{
    reduce, report, AppEvent, AppState, FileSnapshotStore, FixedClock, IntelligenceProvider,
    LoadStatus, Page, RefreshOutcome, Refresher, SnapshotOrigin, SnapshotStore,
};

#[derive(Default)]
struct ScriptedProvider {
    calls: AtomicUsize,
    offline: AtomicBool,
}

impl ScriptedProvider {
    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn check(&self) -> Result<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.offline.load(Ordering::SeqCst) {
            anyhow::bail!("provider unreachable");
        }
        Ok(())
    }
}

#[async_trait]
impl IntelligenceProvider for ScriptedProvider {
    async fn fetch_market_intelligence(&self, geography: Geography) -> Result<Section<MarketData>> {
        self.check()?;
        let data = MarketData {
            market_overview: format!("Demand in {} stayed **strong**.", geography),
            ..Default::default()
        };
        let sources = vec![
            GroundingSource::new("https://research.example/q1", "Q1 Report"),
            GroundingSource::new("https://news.example/a", "Launch coverage"),
        ];
        Ok(Section::new(data, sources))
    }

    async fn fetch_competitive_intelligence(
        &self,
        _geography: Geography,
    ) -> Result<Section<Vec<ProjectLaunch>>> {
        self.check()?;
        let launch = ProjectLaunch {
            developer_name: "Godrej Properties".to_string(),
            project_name: "Godrej Horizon".to_string(),
            ..Default::default()
        };
        Ok(Section::new(
            vec![launch],
            vec![GroundingSource::new("https://news.example/a", "Launch coverage, updated")],
        ))
    }

    async fn fetch_share_prices(&self) -> Result<Section<Vec<SharePrice>>> {
        self.check()?;
        Ok(Section::new(vec![], vec![]))
    }

    async fn fetch_india_news(&self) -> Result<Section<Vec<NewsArticle>>> {
        self.check()?;
        Ok(Section::new(vec![], vec![]))
    }

    async fn fetch_international_news(&self) -> Result<Section<Vec<NewsArticle>>> {
        self.check()?;
        Ok(Section::new(vec![], vec![]))
    }
}

fn ist(y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<FixedOffset> {
    FixedOffset::east_opt(5 * 3600 + 30 * 60)
        .unwrap()
        .with_ymd_and_hms(y, m, d, h, min, 0)
        .unwrap()
}

/// One run of the cycle, folding its events into `state`.
async fn run_once(
    provider: &Arc<ScriptedProvider>,
    store: &Arc<FileSnapshotStore>,
    now: DateTime<FixedOffset>,
    state: AppState,
) -> (RefreshOutcome, AppState) {
    let refresher = Refresher::new(
        provider.clone(),
        store.clone(),
        Arc::new(FixedClock(now)),
        Geography::Mumbai,
    );
    let (tx, mut rx) = mpsc::channel(8);
    let outcome = refresher.refresh(&tx).await;
    drop(tx);

    let mut state = state;
    while let Some(event) = rx.recv().await {
        state = reduce(state, event);
    }
    (outcome, state)
}

#[tokio::test]
async fn test_daily_refresh_cycle() {
    let dir = tempfile::tempdir().unwrap();
    let store = Arc::new(FileSnapshotStore::new(dir.path().to_path_buf()).unwrap());
    let provider = Arc::new(ScriptedProvider::default());
    let morning = ist(2025, 3, 14, 9, 15);

    // First run of the day fetches all five sections and persists them
    let (outcome, state) = run_once(&provider, &store, morning, AppState::new()).await;
    assert_eq!(outcome, RefreshOutcome::Fetched);
    assert_eq!(provider.calls(), 5);
    assert_eq!(state.status, LoadStatus::Ready);
    assert_eq!(state.origin, Some(SnapshotOrigin::Provider));
    assert_eq!(state.geography, Geography::Mumbai);
    assert!(store.path().exists());

    let written = std::fs::read_to_string(store.path()).unwrap();
    let record: serde_json::Value = serde_json::from_str(&written).unwrap();
    assert!(record.get("timestamp").is_some());
    assert!(record.get("marketData").is_some());
    assert!(record.get("marketSources").is_some());

    let text = report::render(&state);
    assert!(text.contains("Geography: Mumbai"));
    assert!(text.contains("Demand in Mumbai stayed strong."));
    assert!(text.contains("Last Updated: Friday, 14 March 2025 at 9:15 am IST"));

    // Same day: cached, no provider calls, file untouched
    let evening = ist(2025, 3, 14, 21, 0);
    let (outcome, state) = run_once(&provider, &store, evening, AppState::new()).await;
    assert_eq!(outcome, RefreshOutcome::Cached);
    assert_eq!(provider.calls(), 5);
    assert_eq!(state.origin, Some(SnapshotOrigin::Cache));
    assert_eq!(std::fs::read_to_string(store.path()).unwrap(), written);

    // Sources page: one entry per URI, latest title wins, first position kept
    let state = reduce(state, AppEvent::PageSelected(Page::Sources));
    let text = report::render(&state);
    let first = text.find("Q1 Report").unwrap();
    let second = text.find("Launch coverage, updated").unwrap();
    assert!(first < second);
    assert_eq!(text.matches("https://news.example/a").count(), 1);

    // Next day with the provider down: failure shown, yesterday's record kept
    provider.offline.store(true, Ordering::SeqCst);
    let next_day = morning + Duration::days(1);
    let (outcome, state) = run_once(&provider, &store, next_day, state).await;
    assert_eq!(outcome, RefreshOutcome::Failed);
    assert!(state.error().is_some());
    assert_eq!(std::fs::read_to_string(store.path()).unwrap(), written);
    assert!(report::render(&state).contains("Please try again later."));

    let kept = store.load().unwrap().unwrap();
    assert!(!kept.is_fresh(&FixedClock(next_day)));
}
