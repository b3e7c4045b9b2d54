//! Geodesic math: coordinates and great-circle distance.
//!
//! Distances are pure Haversine legs, not road-network routes. The permutation
//! sweep in route optimization revisits the same coordinate pairs hundreds of
//! times per group attempt, so the public [`distance_km`] goes through a
//! process-wide LRU cache keyed on coordinate bit patterns.

use std::num::NonZeroUsize;
use std::sync::{Mutex, OnceLock};

use lru::LruCache;
use serde::{Deserialize, Serialize};

/// Mean Earth radius in kilometres.
const EARTH_RADIUS_KM: f64 = 6371.0;

/// A WGS84 coordinate in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
}

impl GeoPoint {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

/// Uncached Haversine distance (internal use).
fn distance_km_uncached(a: GeoPoint, b: GeoPoint) -> f64 {
    let (lat1, lon1) = (a.lat.to_radians(), a.lng.to_radians());
    let (lat2, lon2) = (b.lat.to_radians(), b.lng.to_radians());
    let dlat = lat2 - lat1;
    let dlon = lon2 - lon1;
    let sin_dlat = (dlat * 0.5).sin();
    let sin_dlon = (dlon * 0.5).sin();
    let h = sin_dlat * sin_dlat + lat1.cos() * lat2.cos() * sin_dlon * sin_dlon;
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());
    EARTH_RADIUS_KM * c
}

/// Cache key: the coordinate's raw bit patterns. f64 is not hashable, its bit
/// pattern is.
type PointBits = (u64, u64);

fn point_bits(p: GeoPoint) -> PointBits {
    (p.lat.to_bits(), p.lng.to_bits())
}

/// Global distance cache (50,000 entries).
fn get_distance_cache() -> &'static Mutex<LruCache<(PointBits, PointBits), f64>> {
    static CACHE: OnceLock<Mutex<LruCache<(PointBits, PointBits), f64>>> = OnceLock::new();
    CACHE.get_or_init(|| {
        Mutex::new(LruCache::new(
            NonZeroUsize::new(50_000).expect("cache size must be non-zero"),
        ))
    })
}

/// Great-circle distance between two coordinates with LRU caching.
///
/// Uses a symmetric key (smaller point first) so both directions of the same
/// leg share a cache entry.
pub fn distance_km(a: GeoPoint, b: GeoPoint) -> f64 {
    let (bits_a, bits_b) = (point_bits(a), point_bits(b));
    let key = if bits_a < bits_b {
        (bits_a, bits_b)
    } else {
        (bits_b, bits_a)
    };

    let mut cache = match get_distance_cache().lock() {
        Ok(guard) => guard,
        Err(_) => return distance_km_uncached(a, b), // Fallback: compute without cache if mutex poisoned
    };

    *cache.get_or_insert(key, || distance_km_uncached(a, b))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distance_is_symmetric() {
        let berlin = GeoPoint::new(52.52, 13.405);
        let airport = GeoPoint::new(52.3667, 13.5033);
        assert_eq!(distance_km(berlin, airport), distance_km(airport, berlin));
    }

    #[test]
    fn distance_to_self_is_zero() {
        let p = GeoPoint::new(-33.8688, 151.2093);
        assert_eq!(distance_km(p, p), 0.0);
    }

    #[test]
    fn one_degree_of_latitude_is_about_111_km() {
        let equator = GeoPoint::new(0.0, 0.0);
        let north = GeoPoint::new(1.0, 0.0);
        let d = distance_km(equator, north);
        assert!((d - 111.19).abs() < 0.1, "got {d}");
    }

    #[test]
    fn cached_and_repeat_lookups_agree() {
        let a = GeoPoint::new(48.8566, 2.3522);
        let b = GeoPoint::new(48.8606, 2.3376);
        let first = distance_km(a, b);
        let second = distance_km(a, b);
        assert_eq!(first, second);
        assert!(first > 0.0);
    }
}
