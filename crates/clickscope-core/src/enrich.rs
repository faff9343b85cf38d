use crate::classifier::classify_user_agent;
use crate::visit::{EnrichedVisit, GeoInfo, RawVisit};

/// Resolve a visitor to a location.
pub trait Geolocator: Send + Sync {
    fn locate(&self, visitor_hash: Option<&str>) -> Option<GeoInfo>;
}

/// The only [`Geolocator`] in the system. Always returns `None`.
///
/// The store keeps a one-way SHA-256 of the visitor address, never the address
/// itself (see [`crate::visitor::hash_visitor_address`]). A hash cannot be
/// looked up in a GeoIP database, so location is always unavailable.
#[derive(Debug, Clone, Copy, Default)]
pub struct HashedAddressGeolocator;

impl Geolocator for HashedAddressGeolocator {
    fn locate(&self, _visitor_hash: Option<&str>) -> Option<GeoInfo> {
        None
    }
}

/// Maps raw visits to enriched visits, one-to-one and in input order.
pub struct Enricher {
    geolocator: Box<dyn Geolocator>,
}

impl Default for Enricher {
    fn default() -> Self {
        Self::new(Box::new(HashedAddressGeolocator))
    }
}

impl Enricher {
    pub fn new(geolocator: Box<dyn Geolocator>) -> Self {
        Self { geolocator }
    }

    pub fn enrich(&self, visits: &[RawVisit]) -> Vec<EnrichedVisit> {
        visits.iter().map(|v| self.enrich_one(v)).collect()
    }

    pub fn enrich_one(&self, visit: &RawVisit) -> EnrichedVisit {
        let labels = classify_user_agent(visit.user_agent.as_deref());
        EnrichedVisit {
            id: visit.id,
            url_id: visit.url_id,
            visitor_hash: visit.visitor_hash.clone(),
            user_agent: visit.user_agent.clone(),
            clicked_at: visit.clicked_at,
            device_type: labels.device_type,
            os: labels.os,
            browser: labels.browser,
            referrer: visit.referrer.clone(),
            geolocation: self.geolocator.locate(visit.visitor_hash.as_deref()),
        }
    }
}
