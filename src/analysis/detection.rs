/// Winter-precipitation window detection for a single model run.
///
/// Classifies each 6-hourly point as winter precip or not, merges contiguous
/// positive points into `WinterEvent`s, converts the summed liquid
/// equivalent to a snow depth estimate at a fixed 10:1 ratio, and bands the
/// estimate into an intensity category.
///
/// Pure over its input: the same point sequence and config always produce
/// the same events, and no state is carried between invocations.

use crate::config::DetectionConfig;
use crate::model::{SnowCategory, TimeSeriesPoint, WinterEvent};

/// True if this 6h window counts as winter precipitation: measurable precip
/// at or above the minimum, and 2m temperature at or below the snow
/// threshold.
pub fn is_winter_precip(point: &TimeSeriesPoint, config: &DetectionConfig) -> bool {
    if point.precip_6h_mm < config.min_precip_6h_mm {
        return false;
    }
    point.surface_temp_c <= config.snow_threshold_c
}

/// Converts liquid equivalent (mm) to estimated snow depth (inches),
/// rounded to one decimal place.
pub fn snow_inches(liquid_mm: f64, config: &DetectionConfig) -> f64 {
    let raw = liquid_mm * config.snow_liquid_ratio_in_per_mm;
    (raw * 10.0).round() / 10.0
}

/// Bands a snow depth estimate into its intensity category. Lower bounds
/// inclusive, upper bounds exclusive: [0, 0.5) trace, [0.5, 3) light,
/// [3, 6) moderate, [6, ∞) heavy at the default boundaries.
pub fn categorize(snow_in: f64, config: &DetectionConfig) -> SnowCategory {
    if snow_in < config.trace_max_in {
        SnowCategory::Trace
    } else if snow_in < config.light_max_in {
        SnowCategory::Light
    } else if snow_in < config.moderate_max_in {
        SnowCategory::Moderate
    } else {
        SnowCategory::Heavy
    }
}

/// Detects winter-precipitation events in one run's ordered point sequence.
///
/// Scans chronologically, accumulating consecutive positive points; the
/// pending event closes on the first negative point or at the end of the
/// sequence. An event reaching the last point closes using that point's
/// `valid_time` - no assumption that the event has actually ended there.
/// An isolated positive point yields a 6-hour event.
///
/// Returned events are non-overlapping and ascending by `start_time`
/// (a consequence of the single chronological scan).
pub fn detect_winter_events(
    points: &[TimeSeriesPoint],
    config: &DetectionConfig,
) -> Vec<WinterEvent> {
    let mut events = Vec::new();
    let mut i = 0;

    while i < points.len() {
        if !is_winter_precip(&points[i], config) {
            i += 1;
            continue;
        }

        let start_time = points[i].valid_time;
        let mut total_liquid_mm = points[i].precip_6h_mm;
        let mut j = i + 1;

        while j < points.len() && is_winter_precip(&points[j], config) {
            total_liquid_mm += points[j].precip_6h_mm;
            j += 1;
        }

        let end_time = points[j - 1].valid_time;
        let duration_hours = 6 * (j - i) as u32;
        let snow_in = snow_inches(total_liquid_mm, config);

        events.push(WinterEvent {
            start_time,
            end_time,
            duration_hours,
            total_liquid_mm,
            snow_inches: snow_in,
            category: categorize(snow_in, config),
        });

        i = j;
    }

    events
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
