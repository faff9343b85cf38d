use sha2::{Digest, Sha256};

/// Hash a client address for storage.
///
/// Formula: sha256(ip) encoded as 64 lowercase hex chars. The hash is
/// one-way, so stored visits cannot be resolved back to an address (and
/// therefore cannot be geolocated).
pub fn hash_visitor_address(ip: &str) -> String {
    hex::encode(Sha256::digest(ip.trim().as_bytes()))
}
