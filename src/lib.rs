/// wintermon_service: lead-time-tiered winter weather advisories from GFS
/// model run consistency.
///
/// # Module structure
///
/// ```text
/// wintermon_service
/// ├── model       — shared data types (TimeSeriesPoint, ModelRun, WinterEvent, …)
/// ├── config      — pipeline tunables + forecast.toml overlay + env settings
/// ├── ingest
/// │   ├── nomads  — NOAA NOMADS GFS 0.25° filter client and series assembly
/// │   └── fixtures (test only) — representative wgrib2 inventory payloads
/// ├── analysis
/// │   ├── detection   — per-run winter-precip classification and event merging
/// │   ├── consistency — cross-run corroboration of event windows
/// │   └── tiers       — lead-time tiering and advisory assembly
/// ├── cache       — TTL forecast cache capability (serving layer's)
/// └── endpoint    — HTTP API: /forecast, /forecast/debug, /health
/// ```

/// Public modules
pub mod analysis;
pub mod cache;
pub mod config;
pub mod endpoint;
pub mod ingest;
pub mod model;
