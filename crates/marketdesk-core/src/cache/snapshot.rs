use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{Geography, ReportBundle};
use crate::refresh::Clock;

/// One day's report bundle with its capture time and geography.
///
/// Serializes to the flat persisted record: `timestamp`, `geography` and the
/// bundle's section fields side by side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(rename = "timestamp")]
    pub captured_at: DateTime<Utc>,
    pub geography: Geography,
    #[serde(flatten)]
    pub bundle: ReportBundle,
}

impl Snapshot {
    pub fn new<Tz: TimeZone>(captured_at: &DateTime<Tz>, geography: Geography, bundle: ReportBundle) -> Self {
        Self {
            captured_at: captured_at.with_timezone(&Utc),
            geography,
            bundle,
        }
    }

    /// Whether the snapshot was captured on the clock's current calendar
    /// day. Each instant is dated with its own UTC offset, so a capture at
    /// 23:59:59 is stale one second after midnight even across a DST change.
    pub fn is_fresh(&self, clock: &dyn Clock) -> bool {
        clock.local_date(&self.captured_at) == clock.today()
    }

    pub fn age_minutes<Tz: TimeZone>(&self, now: &DateTime<Tz>) -> i64 {
        (now.with_timezone(&Utc) - self.captured_at).num_minutes()
    }

    /// Human-readable age ("just now", "5m ago", "3h ago", "2d ago").
    pub fn age_display<Tz: TimeZone>(&self, now: &DateTime<Tz>) -> String {
        let minutes = self.age_minutes(now);
        if minutes < 1 {
            // Also covers clock skew
            "just now".to_string()
        } else if minutes < 60 {
            format!("{}m ago", minutes)
        } else if minutes < 1440 {
            let hours = minutes / 60;
            if minutes % 60 >= 30 {
                format!("{}h ago", hours + 1)
            } else {
                format!("{}h ago", hours)
            }
        } else {
            let days = minutes / 1440;
            if (minutes % 1440) / 60 >= 12 {
                format!("{}d ago", days + 1)
            } else {
                format!("{}d ago", days)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, FixedOffset, NaiveDate};

    use crate::refresh::FixedClock;

    fn ist() -> FixedOffset {
        FixedOffset::east_opt(5 * 3600 + 30 * 60).unwrap()
    }

    fn snapshot_at<Tz: TimeZone>(at: DateTime<Tz>) -> Snapshot {
        Snapshot::new(&at, Geography::India, ReportBundle::default())
    }

    /// Central European time for 2025: UTC+1, then UTC+2 from 01:00 UTC on
    /// 30 March.
    struct CentralEuropeClock(DateTime<Utc>);

    impl CentralEuropeClock {
        fn offset_at(at: &DateTime<Utc>) -> FixedOffset {
            let summer_starts = Utc.with_ymd_and_hms(2025, 3, 30, 1, 0, 0).unwrap();
            let hours = if *at >= summer_starts { 2 } else { 1 };
            FixedOffset::east_opt(hours * 3600).unwrap()
        }
    }

    impl Clock for CentralEuropeClock {
        fn now(&self) -> DateTime<Utc> {
            self.0
        }

        fn local_date(&self, at: &DateTime<Utc>) -> NaiveDate {
            at.with_timezone(&Self::offset_at(at)).date_naive()
        }
    }

    #[test]
    fn test_fresh_same_day() {
        let morning = ist().with_ymd_and_hms(2025, 3, 14, 0, 0, 1).unwrap();
        let night = ist().with_ymd_and_hms(2025, 3, 14, 23, 59, 59).unwrap();
        assert!(snapshot_at(morning).is_fresh(&FixedClock(night)));
    }

    #[test]
    fn test_stale_one_second_past_midnight() {
        let captured = ist().with_ymd_and_hms(2025, 3, 14, 23, 59, 59).unwrap();
        let now = ist().with_ymd_and_hms(2025, 3, 15, 0, 0, 1).unwrap();
        assert!(!snapshot_at(captured).is_fresh(&FixedClock(now)));
    }

    #[test]
    fn test_calendar_day_not_rolling_window() {
        // Less than 24h apart but on different days
        let captured = ist().with_ymd_and_hms(2025, 3, 14, 9, 0, 0).unwrap();
        let now = ist().with_ymd_and_hms(2025, 3, 15, 8, 0, 0).unwrap();
        assert!(!snapshot_at(captured).is_fresh(&FixedClock(now)));
    }

    #[test]
    fn test_freshness_judged_in_consumer_zone() {
        // 20:00 UTC on the 14th is 01:30 IST on the 15th
        let snapshot = snapshot_at(Utc.with_ymd_and_hms(2025, 3, 14, 20, 0, 0).unwrap());

        let later_ist = ist().with_ymd_and_hms(2025, 3, 15, 10, 0, 0).unwrap();
        assert!(snapshot.is_fresh(&FixedClock(later_ist)));

        let utc = FixedOffset::east_opt(0).unwrap();
        let later_utc = utc.with_ymd_and_hms(2025, 3, 15, 4, 30, 0).unwrap();
        assert!(!snapshot.is_fresh(&FixedClock(later_utc)));
    }

    #[test]
    fn test_stale_across_dst_change() {
        // 23:30 CET on the 29th is 00:30 on the 30th at the summer offset
        let cet = FixedOffset::east_opt(3600).unwrap();
        let cest = FixedOffset::east_opt(2 * 3600).unwrap();
        let captured = cet.with_ymd_and_hms(2025, 3, 29, 23, 30, 0).unwrap();
        let now = cest.with_ymd_and_hms(2025, 3, 30, 10, 0, 0).unwrap();
        let clock = CentralEuropeClock(now.with_timezone(&Utc));

        assert_eq!(clock.local_date(&captured.with_timezone(&Utc)), NaiveDate::from_ymd_opt(2025, 3, 29).unwrap());
        assert!(!snapshot_at(captured).is_fresh(&clock));
    }

    #[test]
    fn test_fresh_across_dst_change_same_day() {
        // 00:30 CET on the 30th, before clocks go forward at 02:00
        let cet = FixedOffset::east_opt(3600).unwrap();
        let cest = FixedOffset::east_opt(2 * 3600).unwrap();
        let captured = cet.with_ymd_and_hms(2025, 3, 30, 0, 30, 0).unwrap();
        let now = cest.with_ymd_and_hms(2025, 3, 30, 10, 0, 0).unwrap();

        assert!(snapshot_at(captured).is_fresh(&CentralEuropeClock(now.with_timezone(&Utc))));
    }

    #[test]
    fn test_age_display() {
        let now = Utc.with_ymd_and_hms(2025, 3, 14, 12, 0, 0).unwrap();
        let at = |d: Duration| Snapshot::new(&(now - d), Geography::India, ReportBundle::default());

        assert_eq!(at(Duration::seconds(20)).age_display(&now), "just now");
        assert_eq!(at(Duration::minutes(-5)).age_display(&now), "just now");
        assert_eq!(at(Duration::minutes(5)).age_display(&now), "5m ago");
        assert_eq!(at(Duration::minutes(150)).age_display(&now), "3h ago");
        assert_eq!(at(Duration::hours(49)).age_display(&now), "2d ago");
    }

    #[test]
    fn test_record_shape() {
        let captured = Utc.with_ymd_and_hms(2025, 3, 14, 6, 30, 0).unwrap();
        let snapshot = Snapshot::new(&captured, Geography::India, ReportBundle::default());
        let value = serde_json::to_value(&snapshot).unwrap();

        let keys: Vec<&str> = value.as_object().unwrap().keys().map(String::as_str).collect();
        for key in [
            "timestamp",
            "geography",
            "marketData",
            "marketSources",
            "projectLaunches",
            "competitiveSources",
            "sharePrices",
            "sharePriceSources",
            "indiaNews",
            "indiaNewsSources",
            "internationalNews",
            "internationalNewsSources",
        ] {
            assert!(keys.contains(&key), "missing {}", key);
        }
        assert_eq!(value["timestamp"], "2025-03-14T06:30:00Z");
        assert_eq!(value["geography"], "India (Pan-India)");
    }

    #[test]
    fn test_accepts_browser_iso_timestamp() {
        let json = r#"{
            "timestamp": "2025-03-14T06:30:00.000Z",
            "geography": "Gurgaon",
            "marketData": {"marketOverview": "ok"}
        }"#;
        let snapshot: Snapshot = serde_json::from_str(json).unwrap();
        assert_eq!(snapshot.geography, Geography::Gurgaon);
        assert_eq!(snapshot.captured_at, Utc.with_ymd_and_hms(2025, 3, 14, 6, 30, 0).unwrap());
        assert!(snapshot.bundle.share_prices.is_empty());
    }
}
