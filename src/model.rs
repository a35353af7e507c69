/// Shared data types for the winter weather advisory service.
///
/// Everything downstream of ingest speaks these types: the acquisition layer
/// produces `ModelRun`s, the analysis pipeline turns them into `WinterEvent`s
/// and `CorroboratedWindow`s, and the assembler emits a `TieredForecast`.
///
/// The `TieredForecast` field names (`possible`, `detailed`, `finalCall`,
/// `last_updated`, `runs_used`) are a compatibility contract with the serving
/// layer and its consumers - do not rename them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Model run input
// ---------------------------------------------------------------------------

/// One 6-hourly sample extracted from a model run at a single location.
///
/// `precip_6h_mm` is the accumulation over the 6 hours ending at `valid_time`,
/// derived upstream from APCP deltas and clamped to be non-negative.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeSeriesPoint {
    pub valid_time: DateTime<Utc>,
    /// Forecast hour offset from run init; non-negative multiple of 6.
    pub forecast_hour: u32,
    pub surface_temp_c: f64,
    pub precip_6h_mm: f64,
}

/// GFS initialization cycle: four runs per day at 00, 06, 12, 18 Z.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Cycle {
    #[serde(rename = "00")]
    Z00,
    #[serde(rename = "06")]
    Z06,
    #[serde(rename = "12")]
    Z12,
    #[serde(rename = "18")]
    Z18,
}

impl Cycle {
    /// All cycles in ascending order of init hour.
    pub const ALL: [Cycle; 4] = [Cycle::Z00, Cycle::Z06, Cycle::Z12, Cycle::Z18];

    pub fn hour(&self) -> u32 {
        match self {
            Cycle::Z00 => 0,
            Cycle::Z06 => 6,
            Cycle::Z12 => 12,
            Cycle::Z18 => 18,
        }
    }

    /// Two-digit cycle string as it appears in NOMADS paths ("00".."18").
    pub fn as_str(&self) -> &'static str {
        match self {
            Cycle::Z00 => "00",
            Cycle::Z06 => "06",
            Cycle::Z12 => "12",
            Cycle::Z18 => "18",
        }
    }
}

/// One complete model forecast cycle for a location: identity (`init_time`,
/// `cycle`) plus the ordered point sequence extracted for it.
///
/// Points are strictly increasing in `forecast_hour`. Runs are compared
/// newest-first by `init_time`; the freshest run is always index 0 in any
/// run list handed to the analysis pipeline.
#[derive(Debug, Clone)]
pub struct ModelRun {
    pub init_time: DateTime<Utc>,
    pub cycle: Cycle,
    pub points: Vec<TimeSeriesPoint>,
}

// ---------------------------------------------------------------------------
// Detected events
// ---------------------------------------------------------------------------

/// Snow intensity category, banded on estimated snow depth.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SnowCategory {
    Trace,
    Light,
    Moderate,
    Heavy,
}

impl std::fmt::Display for SnowCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            SnowCategory::Trace => "trace",
            SnowCategory::Light => "light",
            SnowCategory::Moderate => "moderate",
            SnowCategory::Heavy => "heavy",
        };
        write!(f, "{}", s)
    }
}

/// A contiguous winter-precipitation window detected within a single run.
///
/// `start_time` and `end_time` are both `valid_time`s of points in the run.
/// Immutable once produced by the detector.
#[derive(Debug, Clone, PartialEq)]
pub struct WinterEvent {
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    /// Multiple of 6, at least 6 (a single positive point spans one window).
    pub duration_hours: u32,
    /// Liquid-equivalent precipitation summed over the window (mm).
    pub total_liquid_mm: f64,
    /// Estimated snow depth at the fixed snow-to-liquid ratio, rounded to 0.1 in.
    pub snow_inches: f64,
    pub category: SnowCategory,
}

/// An event window corroborated across runs: the candidate start time, how
/// many distinct runs had a qualifying event near it, and the representative
/// event that supplies all displayed fields.
#[derive(Debug, Clone)]
pub struct CorroboratedWindow {
    pub start_time: DateTime<Utc>,
    pub run_count: usize,
    pub representative: WinterEvent,
}

// ---------------------------------------------------------------------------
// Advisory payload
// ---------------------------------------------------------------------------

/// Long-range notice: winter weather is possible, date range only.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PossibleNotice {
    pub message: String,
    pub date_range: String,
}

/// Mid-range entry: full event detail plus lead time in whole hours.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DetailedEvent {
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub duration_hours: u32,
    pub snow_inches: f64,
    pub category: SnowCategory,
    pub lead_hours: i64,
}

/// Short-range notice: the final call for an imminent or ongoing event.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FinalCall {
    pub message: String,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub duration_hours: u32,
    pub snow_inches: f64,
    pub category: SnowCategory,
}

/// The tiered advisory payload returned to the serving layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TieredForecast {
    pub possible: Option<PossibleNotice>,
    pub detailed: Vec<DetailedEvent>,
    #[serde(rename = "finalCall")]
    pub final_call: Option<FinalCall>,
    /// Freshest supplied run's init time; `None` when no usable runs.
    pub last_updated: Option<DateTime<Utc>>,
    /// Number of usable runs actually supplied to the pipeline.
    pub runs_used: usize,
}

impl TieredForecast {
    /// The payload shape when no usable runs were supplied: all tiers
    /// empty/null, zero runs. Never an error.
    pub fn empty() -> Self {
        TieredForecast {
            possible: None,
            detailed: Vec::new(),
            final_call: None,
            last_updated: None,
            runs_used: 0,
        }
    }
}

// ---------------------------------------------------------------------------
// Acquisition errors
// ---------------------------------------------------------------------------

/// Errors from the NOMADS acquisition layer.
///
/// These never cross the analysis boundary: a failed fetch or decode
/// truncates the affected run's series, and a run with no points is treated
/// as absent. The variants exist so `GribPointReader` implementations and
/// the probe diagnostic can report precisely what went wrong.
#[derive(Debug)]
pub enum GfsError {
    /// Transport-level failure talking to NOMADS.
    HttpError(String),
    /// Got a 200 but the body is an HTML error page or too short to be GRIB.
    NotGrib(String),
    /// The point reader could not extract t2m/APCP values from the message.
    DecodeError(String),
}

impl std::fmt::Display for GfsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GfsError::HttpError(msg) => write!(f, "NOMADS request failed: {}", msg),
            GfsError::NotGrib(msg) => write!(f, "Response is not GRIB data: {}", msg),
            GfsError::DecodeError(msg) => write!(f, "GRIB decode failed: {}", msg),
        }
    }
}

impl std::error::Error for GfsError {}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
