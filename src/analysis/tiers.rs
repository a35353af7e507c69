/// Lead-time tiering and advisory assembly.
///
/// Takes corroborated windows (ascending by start) plus the freshest run's
/// init time and phrases each window by how far out it starts:
///
/// - more than 72h out: a vague long-range notice ("possible"), first
///   qualifying window only - later long-range windows are dropped, a
///   single-notice design carried over deliberately;
/// - 24h to 72h out: a detailed mid-range entry per window;
/// - 24h or less (including negative leads for ongoing events): the
///   short-range final call, a single slot where the last window
///   encountered wins.
///
/// `build_tiered_forecast` is the pipeline entry point: detection per run,
/// corroboration across runs, then assembly. It is a pure function of its
/// inputs - no clock reads, no I/O.

use chrono::{DateTime, Utc};

use crate::analysis::consistency::corroborated_windows;
use crate::analysis::detection::detect_winter_events;
use crate::config::{ForecastConfig, TierConfig};
use crate::model::{
    CorroboratedWindow, DetailedEvent, FinalCall, ModelRun, PossibleNotice, TieredForecast,
};

/// Hours from the freshest run's init to an event start. Fractional, not
/// clamped: a start before the init yields a negative lead, which routes to
/// the short-range tier as an ongoing or imminent event.
pub fn lead_hours(latest_init: DateTime<Utc>, event_start: DateTime<Utc>) -> f64 {
    (event_start - latest_init).num_seconds() as f64 / 3600.0
}

/// Buckets corroborated windows into the three tiers and composes the
/// advisory payload. Windows must arrive ascending by start time; exactly
/// one tier receives each window, decided solely by its lead.
pub fn assemble(
    windows: &[CorroboratedWindow],
    latest_init: DateTime<Utc>,
    runs_used: usize,
    config: &TierConfig,
) -> TieredForecast {
    let mut possible: Option<PossibleNotice> = None;
    let mut detailed: Vec<DetailedEvent> = Vec::new();
    let mut final_call: Option<FinalCall> = None;

    for window in windows {
        let rep = &window.representative;
        let lead = lead_hours(latest_init, rep.start_time);

        if lead > config.detailed_max_hours {
            if possible.is_none() {
                possible = Some(PossibleNotice {
                    message: "Winter weather is possible.".to_string(),
                    date_range: format!(
                        "{} to {}",
                        rep.start_time.format("%Y-%m-%d"),
                        rep.end_time.format("%Y-%m-%d")
                    ),
                });
            }
        } else if lead > config.final_call_max_hours {
            detailed.push(DetailedEvent {
                start_time: rep.start_time,
                end_time: rep.end_time,
                duration_hours: rep.duration_hours,
                snow_inches: rep.snow_inches,
                category: rep.category,
                lead_hours: lead.round() as i64,
            });
        } else {
            // Last qualifying window wins the single short-range slot.
            final_call = Some(FinalCall {
                message: format!(
                    "Winter weather event: start {}, duration {} hours, expected snow {} in ({}).",
                    rep.start_time.to_rfc3339(),
                    rep.duration_hours,
                    rep.snow_inches,
                    rep.category
                ),
                start_time: rep.start_time,
                end_time: rep.end_time,
                duration_hours: rep.duration_hours,
                snow_inches: rep.snow_inches,
                category: rep.category,
            });
        }
    }

    TieredForecast {
        possible,
        detailed,
        final_call,
        last_updated: Some(latest_init),
        runs_used,
    }
}

/// Builds the full tiered forecast from model runs (newest first).
///
/// Runs with zero usable points are treated as absent: they are not counted
/// in `runs_used` and never consulted. With no usable runs at all, the
/// empty-payload shape comes back - never an error.
pub fn build_tiered_forecast(runs: &[ModelRun], config: &ForecastConfig) -> TieredForecast {
    let usable: Vec<&ModelRun> = runs.iter().filter(|r| !r.points.is_empty()).collect();

    if usable.is_empty() {
        return TieredForecast::empty();
    }

    let latest_init = usable[0].init_time;

    let events_per_run: Vec<_> = usable
        .iter()
        .map(|run| detect_winter_events(&run.points, &config.detection))
        .collect();

    let windows = corroborated_windows(&events_per_run, &config.consistency);

    assemble(&windows, latest_init, usable.len(), &config.tiers)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
