use std::sync::Arc;

use chrono::{DateTime, TimeZone, Utc};
use clickscope_core::{
    enrich::Enricher,
    pipeline::{analytics_report, traffic_summary},
    store::VisitStore,
    visit::NewVisit,
};
use clickscope_duckdb::DuckDbBackend;

const WIN_CHROME: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 Chrome/120.0.0.0";
const IPHONE_SAFARI: &str = "Mozilla/5.0 (iPhone; CPU iPhone OS 17_0 like Mac OS X) Safari/17.0";

fn at(day: u32, hour: u32, minute: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, day, hour, minute, 0)
        .single()
        .expect("valid timestamp")
}

fn visit(url_id: i64, when: DateTime<Utc>, ua: Option<&str>, referrer: Option<&str>) -> NewVisit {
    NewVisit::from_client(url_id, "198.51.100.4", ua, referrer, when)
}

async fn seeded() -> DuckDbBackend {
    let db = DuckDbBackend::open_in_memory().expect("in-memory DuckDB");
    db.insert_visits(&[
        visit(1, at(15, 10, 5), Some(WIN_CHROME), Some("https://google.com")),
        visit(1, at(15, 11, 30), Some(WIN_CHROME), Some("https://google.com")),
        visit(1, at(15, 14, 0), Some(IPHONE_SAFARI), None),
        visit(1, at(16, 9, 45), None, Some("")),
        visit(1, at(16, 9, 50), Some(WIN_CHROME), Some("https://t.co")),
        visit(2, at(20, 0, 0), Some(WIN_CHROME), Some("https://other.example")),
    ])
    .await
    .expect("insert visits");
    db
}

#[tokio::test]
async fn recent_visits_are_newest_first_and_limited() {
    let db = seeded().await;
    let visits = db.fetch_recent_visits(1, 3).await.expect("fetch");

    assert_eq!(visits.len(), 3);
    let times: Vec<DateTime<Utc>> = visits.iter().map(|v| v.clicked_at).collect();
    assert_eq!(times, vec![at(16, 9, 50), at(16, 9, 45), at(15, 14, 0)]);
    assert!(visits.iter().all(|v| v.url_id == 1));
}

#[tokio::test]
async fn visitor_address_is_stored_hashed() {
    let db = seeded().await;
    let visits = db.fetch_recent_visits(1, 10).await.expect("fetch");
    for v in &visits {
        let hash = v.visitor_hash.as_deref().expect("hash present");
        assert_eq!(hash.len(), 64);
        assert!(!hash.contains("198.51.100.4"));
    }
}

#[tokio::test]
async fn null_and_empty_columns_round_trip_as_stored() {
    let db = seeded().await;
    let visits = db.fetch_recent_visits(1, 10).await.expect("fetch");
    let no_ua = visits
        .iter()
        .find(|v| v.clicked_at == at(16, 9, 45))
        .expect("visit without UA");
    assert_eq!(no_ua.user_agent, None);
    assert_eq!(no_ua.referrer.as_deref(), Some(""));
}

#[tokio::test]
async fn hourly_counters_ascend_and_truncate_to_hour() {
    let db = seeded().await;
    let counters = db.fetch_hourly_counters(1).await.expect("counters");

    let buckets: Vec<(DateTime<Utc>, i64)> =
        counters.iter().map(|c| (c.hour_bucket, c.count)).collect();
    assert_eq!(
        buckets,
        vec![
            (at(15, 10, 0), 1),
            (at(15, 11, 0), 1),
            (at(15, 14, 0), 1),
            (at(16, 9, 0), 2),
        ]
    );
}

#[tokio::test]
async fn top_referrers_exclude_null_and_empty() {
    let db = seeded().await;
    let referrers = db.fetch_top_referrers(1, 10).await.expect("referrers");

    let pairs: Vec<(&str, i64)> = referrers
        .iter()
        .map(|r| (r.referrer.as_str(), r.count))
        .collect();
    assert_eq!(pairs, vec![("https://google.com", 2), ("https://t.co", 1)]);

    let limited = db.fetch_top_referrers(1, 1).await.expect("referrers");
    assert_eq!(limited.len(), 1);
}

#[tokio::test]
async fn unknown_url_yields_empty_results() {
    let db = seeded().await;
    assert!(db.fetch_recent_visits(999, 10).await.expect("fetch").is_empty());
    assert!(db.fetch_hourly_counters(999).await.expect("counters").is_empty());
    assert!(db.fetch_top_referrers(999, 10).await.expect("refs").is_empty());
}

#[tokio::test]
async fn pipeline_runs_against_duckdb_through_the_trait() {
    let db = Arc::new(seeded().await);
    let store: Arc<dyn VisitStore> = db.clone();
    let enricher = Enricher::default();

    let report = analytics_report(store.as_ref(), &enricher, 1)
        .await
        .expect("report");
    assert_eq!(report.total_clicks, 5);
    assert_eq!(report.clicks_over_time.len(), 2);
    let device_sum: i64 = report.device_breakdown.iter().map(|d| d.count).sum();
    assert_eq!(device_sum, 5);
    assert_eq!(report.referrer_breakdown[0].referrer, "Direct");
    assert_eq!(report.referrer_breakdown[0].count, 2);

    let summary = traffic_summary(store.as_ref(), &enricher, 1)
        .await
        .expect("summary");
    assert!(summary.has_visits);
    assert!(summary.text.starts_with("Total clicks: 5. "));
    assert!(summary.text.contains("Clicks peaked between 10:00 and 09:00"));
    assert!(summary
        .text
        .contains("Top referrers include: https://google.com (2 clicks), https://t.co (1 clicks)"));
}

#[tokio::test]
async fn ping_succeeds_on_open_database() {
    let db = DuckDbBackend::open_in_memory().expect("db");
    db.ping().await.expect("ping");
    db.insert_visits(&[]).await.expect("empty insert is a no-op");
}

#[tokio::test]
async fn blank_referrers_count_as_direct_on_both_paths() {
    let db = Arc::new(DuckDbBackend::open_in_memory().expect("db"));
    db.insert_visits(&[
        visit(3, at(15, 10, 0), Some(WIN_CHROME), Some("   ")),
        visit(3, at(15, 10, 5), Some(WIN_CHROME), Some("\t")),
        visit(3, at(15, 10, 10), Some(WIN_CHROME), Some("https://t.co")),
    ])
    .await
    .expect("insert visits");

    let referrers = db.fetch_top_referrers(3, 10).await.expect("referrers");
    let names: Vec<&str> = referrers.iter().map(|r| r.referrer.as_str()).collect();
    assert_eq!(names, vec!["https://t.co"]);

    let store: Arc<dyn VisitStore> = db.clone();
    let enricher = Enricher::default();
    let report = analytics_report(store.as_ref(), &enricher, 3)
        .await
        .expect("report");
    assert_eq!(report.referrer_breakdown[0].referrer, "Direct");
    assert_eq!(report.referrer_breakdown[0].count, 2);

    let summary = traffic_summary(store.as_ref(), &enricher, 3)
        .await
        .expect("summary");
    assert!(summary
        .text
        .contains("Top referrers include: https://t.co (1 clicks). "));
}
