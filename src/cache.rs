/// Forecast payload cache, owned by the serving layer.
///
/// Building one forecast costs dozens of NOMADS round-trips, so the serving
/// layer remembers recent payloads per location. The cache is an injected
/// capability handed to the endpoint - the analysis pipeline never sees it,
/// and there is no module-global state.
///
/// Keys are coordinates rounded to two decimals (~1 km), so nearby queries
/// share an entry. Entries expire on a wall-clock TTL.

use serde_json::Value;
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

// ---------------------------------------------------------------------------
// Key
// ---------------------------------------------------------------------------

/// Cache key: latitude/longitude rounded to 2 decimal places, stored in
/// hundredths to stay hashable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CoordKey {
    lat_hundredths: i64,
    lon_hundredths: i64,
}

impl CoordKey {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self {
            lat_hundredths: (lat * 100.0).round() as i64,
            lon_hundredths: (lon * 100.0).round() as i64,
        }
    }
}

// ---------------------------------------------------------------------------
// Capability
// ---------------------------------------------------------------------------

/// The cache capability the endpoint consumes. Implementations must be
/// shareable across request handling.
pub trait ForecastCache: Send + Sync {
    /// Returns the cached payload for the key, if present and unexpired.
    fn get(&self, key: CoordKey) -> Option<Value>;

    /// Stores a payload under the key with the given time-to-live,
    /// replacing any previous entry.
    fn set(&self, key: CoordKey, value: Value, ttl: Duration);
}

// ---------------------------------------------------------------------------
// In-memory implementation
// ---------------------------------------------------------------------------

struct Entry {
    stored_at: Instant,
    ttl: Duration,
    value: Value,
}

/// Process-local `ForecastCache` backed by a mutex-guarded map. Expired
/// entries are evicted lazily on lookup.
pub struct MemoryCache {
    entries: Mutex<HashMap<CoordKey, Entry>>,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self { entries: Mutex::new(HashMap::new()) }
    }

    /// Number of live (possibly expired, not yet evicted) entries.
    pub fn len(&self) -> usize {
        self.entries.lock().map(|m| m.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for MemoryCache {
    fn default() -> Self {
        Self::new()
    }
}

impl ForecastCache for MemoryCache {
    fn get(&self, key: CoordKey) -> Option<Value> {
        let Ok(mut entries) = self.entries.lock() else { return None };

        match entries.get(&key) {
            Some(entry) if entry.stored_at.elapsed() <= entry.ttl => Some(entry.value.clone()),
            Some(_) => {
                entries.remove(&key);
                None
            }
            None => None,
        }
    }

    fn set(&self, key: CoordKey, value: Value, ttl: Duration) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.insert(key, Entry { stored_at: Instant::now(), ttl, value });
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const HOUR: Duration = Duration::from_secs(3600);

    #[test]
    fn test_nearby_coordinates_share_a_key() {
        assert_eq!(CoordKey::new(39.1201, -75.4699), CoordKey::new(39.1234, -75.4701));
        assert_ne!(CoordKey::new(39.12, -75.47), CoordKey::new(39.13, -75.47));
    }

    #[test]
    fn test_negative_coordinates_round_consistently() {
        assert_eq!(CoordKey::new(-33.865, 151.2094), CoordKey::new(-33.8651, 151.2094));
    }

    #[test]
    fn test_get_returns_stored_payload() {
        let cache = MemoryCache::new();
        let key = CoordKey::new(39.13, -75.47);

        cache.set(key, json!({"runs_used": 3}), HOUR);

        let value = cache.get(key).expect("fresh entry should be returned");
        assert_eq!(value["runs_used"], 3);
    }

    #[test]
    fn test_get_misses_unknown_key() {
        let cache = MemoryCache::new();
        assert!(cache.get(CoordKey::new(0.0, 0.0)).is_none());
    }

    #[test]
    fn test_expired_entry_is_evicted() {
        let cache = MemoryCache::new();
        let key = CoordKey::new(39.13, -75.47);

        cache.set(key, json!({"runs_used": 3}), Duration::from_millis(1));
        std::thread::sleep(Duration::from_millis(5));

        assert!(cache.get(key).is_none(), "expired entry must not be served");
        assert!(cache.is_empty(), "expired entry should be evicted on lookup");
    }

    #[test]
    fn test_set_replaces_previous_entry() {
        let cache = MemoryCache::new();
        let key = CoordKey::new(39.13, -75.47);

        cache.set(key, json!({"runs_used": 2}), HOUR);
        cache.set(key, json!({"runs_used": 3}), HOUR);

        assert_eq!(cache.get(key).unwrap()["runs_used"], 3);
        assert_eq!(cache.len(), 1);
    }
}
