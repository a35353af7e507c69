/// Cross-run event corroboration.
///
/// Independently-fetched model runs rarely agree exactly on when a storm
/// starts. This module takes each run's detected events (runs ordered
/// newest-first) and decides which event windows are credible: a window
/// counts only when enough distinct runs show an event near the same start
/// time.
///
/// Matching is pointwise against each candidate start independently, NOT
/// transitive clustering: two events can each be within tolerance of a
/// candidate without being within tolerance of each other, so an
/// intermediate event can bridge two events more than twice the tolerance
/// apart. Downstream tiering depends on this behavior; keep it.

use chrono::{DateTime, Utc};

use crate::config::ConsistencyConfig;
use crate::model::{CorroboratedWindow, WinterEvent};

/// True if the two start times are within the match tolerance of each other.
fn within_tolerance(a: DateTime<Utc>, b: DateTime<Utc>, tolerance_hours: i64) -> bool {
    (a - b).num_seconds().abs() <= tolerance_hours * 3600
}

/// Counts the runs that contain at least one event whose start is within
/// tolerance of the candidate. Each run contributes at most one to the
/// count, from its first qualifying event - multiple matching events in the
/// same run never double-count.
fn runs_agreeing(
    events_per_run: &[Vec<WinterEvent>],
    candidate: DateTime<Utc>,
    tolerance_hours: i64,
) -> usize {
    events_per_run
        .iter()
        .filter(|run_events| {
            run_events
                .iter()
                .any(|ev| within_tolerance(ev.start_time, candidate, tolerance_hours))
        })
        .count()
}

/// Picks the representative event for a corroborated window, in priority
/// order:
/// 1. the freshest run's event whose start exactly equals the candidate;
/// 2. failing that, scanning runs newest-to-oldest, the first event within
///    tolerance of the candidate.
///
/// The representative supplies every displayed field (duration, snow
/// amount, category) for the window.
fn representative<'a>(
    events_per_run: &'a [Vec<WinterEvent>],
    candidate: DateTime<Utc>,
    tolerance_hours: i64,
) -> Option<&'a WinterEvent> {
    if let Some(freshest) = events_per_run.first() {
        if let Some(exact) = freshest.iter().find(|ev| ev.start_time == candidate) {
            return Some(exact);
        }
    }

    events_per_run.iter().flat_map(|run_events| {
        run_events
            .iter()
            .find(|ev| within_tolerance(ev.start_time, candidate, tolerance_hours))
    }).next()
}

/// Reconciles event lists from multiple runs (newest-first) into the
/// chronologically ordered set of corroborated windows.
///
/// Candidate windows are the distinct exact `start_time` values appearing in
/// any run's event list - no normalization, so two starts differing even
/// slightly are distinct candidates. A candidate survives when the number of
/// agreeing runs meets the quorum.
pub fn corroborated_windows(
    events_per_run: &[Vec<WinterEvent>],
    config: &ConsistencyConfig,
) -> Vec<CorroboratedWindow> {
    let mut candidates: Vec<DateTime<Utc>> = events_per_run
        .iter()
        .flat_map(|run_events| run_events.iter().map(|ev| ev.start_time))
        .collect();
    candidates.sort();
    candidates.dedup();

    let mut windows = Vec::new();

    for candidate in candidates {
        let run_count = runs_agreeing(events_per_run, candidate, config.window_match_hours);
        if run_count < config.min_runs_agreement {
            continue;
        }

        // A candidate always has at least its own originating event within
        // tolerance, but keep the lookup fallible rather than assuming it.
        let Some(rep) = representative(events_per_run, candidate, config.window_match_hours)
        else {
            continue;
        };

        windows.push(CorroboratedWindow {
            start_time: candidate,
            run_count,
            representative: rep.clone(),
        });
    }

    windows
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
