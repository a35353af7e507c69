/// Forecast configuration - tunables and forecast.toml overlay
///
/// Every constant the pipeline depends on is a named tunable here rather
/// than a literal buried in the analysis code. Defaults match the operational
/// values; `forecast.toml` at the repo root can override any subset without
/// recompiling the service.
///
/// The snow temperature threshold lives only in `DetectionConfig` and is
/// passed into the pipeline at its entry point - it is not a shared constant
/// imported by both the ingest and analysis layers.

use serde::Deserialize;
use std::env;
use std::fs;
use std::path::Path;

// ---------------------------------------------------------------------------
// Pipeline tunables
// ---------------------------------------------------------------------------

/// Winter-precipitation classification and snow-amount tunables.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DetectionConfig {
    /// 2m temperature at or below this (°C) counts as snow.
    pub snow_threshold_c: f64,

    /// Minimum 6h precipitation (mm) to count as measurable; below this a
    /// window is treated as no precipitation at all.
    pub min_precip_6h_mm: f64,

    /// Snow depth (inches) per mm of liquid equivalent. 10:1 ratio in
    /// matching units: 10 inches of snow per inch (25.4 mm) of liquid.
    pub snow_liquid_ratio_in_per_mm: f64,

    /// Category band boundaries in inches of snow: below trace_max is trace,
    /// below light_max is light, below moderate_max is moderate, at or above
    /// moderate_max is heavy.
    pub trace_max_in: f64,
    pub light_max_in: f64,
    pub moderate_max_in: f64,
}

impl Default for DetectionConfig {
    fn default() -> Self {
        Self {
            snow_threshold_c: 2.0,
            min_precip_6h_mm: 0.05,
            snow_liquid_ratio_in_per_mm: 10.0 / 25.4,
            trace_max_in: 0.5,
            light_max_in: 3.0,
            moderate_max_in: 6.0,
        }
    }
}

/// Cross-run corroboration tunables.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ConsistencyConfig {
    /// Two event starts within this many hours of each other count as the
    /// same window.
    pub window_match_hours: i64,

    /// Minimum number of distinct runs that must show an event near a
    /// candidate window for it to be credible.
    pub min_runs_agreement: usize,
}

impl Default for ConsistencyConfig {
    fn default() -> Self {
        Self {
            window_match_hours: 18,
            min_runs_agreement: 2,
        }
    }
}

/// Lead-time tier boundaries (hours from the freshest run's init to event
/// start).
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TierConfig {
    /// At or below this lead the window is a short-range final call.
    pub final_call_max_hours: f64,

    /// At or below this lead (and above `final_call_max_hours`) the window
    /// gets a detailed mid-range entry; above it, a vague long-range notice.
    pub detailed_max_hours: f64,
}

impl Default for TierConfig {
    fn default() -> Self {
        Self {
            final_call_max_hours: 24.0,
            detailed_max_hours: 72.0,
        }
    }
}

/// Bundle of all pipeline tunables, passed into the core at its entry point.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ForecastConfig {
    pub detection: DetectionConfig,
    pub consistency: ConsistencyConfig,
    pub tiers: TierConfig,
}

impl ForecastConfig {
    /// Loads tunables from a TOML overlay file, falling back to the coded
    /// defaults when the file does not exist. Any subset of fields may be
    /// present; omitted fields keep their defaults.
    ///
    /// # Panics
    /// Panics if the file exists but is malformed. This is intentional - a
    /// service started with a broken override file should fail loudly at
    /// startup rather than run with half-applied tuning.
    pub fn load(path: &str) -> Self {
        if !Path::new(path).exists() {
            return ForecastConfig::default();
        }

        let contents = fs::read_to_string(path)
            .unwrap_or_else(|e| panic!("Failed to read {}: {}", path, e));

        toml::from_str(&contents)
            .unwrap_or_else(|e| panic!("Failed to parse {}: {}", path, e))
    }
}

// ---------------------------------------------------------------------------
// Service settings (environment)
// ---------------------------------------------------------------------------

/// Process-level settings read from the environment (.env supported via
/// dotenv in main).
#[derive(Debug, Clone)]
pub struct ServiceSettings {
    /// How long a cached forecast payload stays fresh.
    pub cache_ttl_minutes: u64,
}

impl Default for ServiceSettings {
    fn default() -> Self {
        Self { cache_ttl_minutes: 60 }
    }
}

impl ServiceSettings {
    /// Reads settings from the environment. Unset or unparsable variables
    /// fall back to defaults.
    ///
    /// Environment:
    ///   GFS_CACHE_TTL_MINUTES - forecast cache TTL (default: 60)
    pub fn from_env() -> Self {
        let cache_ttl_minutes = env::var("GFS_CACHE_TTL_MINUTES")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(60);

        Self { cache_ttl_minutes }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
