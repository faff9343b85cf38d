use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::visitor::hash_visitor_address;

/// A stored click on a shortened URL, exactly as the record store returns it.
///
/// Owned by the store and never mutated here; enrichment produces a separate
/// [`EnrichedVisit`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawVisit {
    pub id: i64,
    pub url_id: i64,
    /// One-way SHA-256 of the client address. Cannot be reversed.
    pub visitor_hash: Option<String>,
    pub user_agent: Option<String>,
    pub referrer: Option<String>,
    pub clicked_at: DateTime<Utc>,
}

/// Insert-side shape of a visit. The store assigns `id`.
///
/// Clicks are recorded by the URL service; this service only reads them. This
/// shape exists to seed a store (tests, local fixtures).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewVisit {
    pub url_id: i64,
    pub visitor_hash: Option<String>,
    pub user_agent: Option<String>,
    pub referrer: Option<String>,
    pub clicked_at: DateTime<Utc>,
}

impl NewVisit {
    /// Build a visit from request data, hashing the client address so the raw
    /// address never reaches the store.
    pub fn from_client(
        url_id: i64,
        ip: &str,
        user_agent: Option<&str>,
        referrer: Option<&str>,
        clicked_at: DateTime<Utc>,
    ) -> Self {
        Self {
            url_id,
            visitor_hash: Some(hash_visitor_address(ip)),
            user_agent: user_agent.map(str::to_string),
            referrer: referrer.map(str::to_string),
            clicked_at,
        }
    }
}

/// Country / region / city of a visitor.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeoInfo {
    pub country: Option<String>,
    pub region: Option<String>,
    pub city: Option<String>,
}

/// A [`RawVisit`] plus heuristically derived client labels.
///
/// Request-scoped and never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EnrichedVisit {
    pub id: i64,
    pub url_id: i64,
    pub visitor_hash: Option<String>,
    pub user_agent: Option<String>,
    pub clicked_at: DateTime<Utc>,
    pub device_type: Option<String>,
    pub os: Option<String>,
    pub browser: Option<String>,
    /// Carried through as stored; canonicalised to `"Direct"` only at aggregation.
    pub referrer: Option<String>,
    /// Always `None`, see [`crate::enrich::HashedAddressGeolocator`].
    pub geolocation: Option<GeoInfo>,
}

// ---------------------------------------------------------------------------
// Breakdown records
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClicksByDate {
    /// UTC calendar date, `YYYY-MM-DD`.
    pub date: String,
    pub count: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceCount {
    pub device: String,
    pub count: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BrowserCount {
    pub browser: String,
    pub count: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferrerCount {
    pub referrer: String,
    pub count: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HourlyCount {
    /// UTC hour of day, 0..=23.
    pub hour: u32,
    pub count: i64,
}

/// Full categorical and time-bucketed breakdown of a sampling window.
///
/// `Default` is the empty report: zero clicks and every list empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalyticsReport {
    pub total_clicks: i64,
    pub clicks_over_time: Vec<ClicksByDate>,
    pub device_breakdown: Vec<DeviceCount>,
    pub browser_breakdown: Vec<BrowserCount>,
    pub referrer_breakdown: Vec<ReferrerCount>,
    pub hourly_pattern: Vec<HourlyCount>,
}

// ---------------------------------------------------------------------------
// Store counters
// ---------------------------------------------------------------------------

/// Clicks within one hour, as pre-aggregated by the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HourlyCounter {
    /// Start of the hour (minutes and seconds are zero).
    pub hour_bucket: DateTime<Utc>,
    pub count: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferrerCounter {
    pub referrer: String,
    pub count: i64,
}
