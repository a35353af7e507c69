/// Forecast analysis pipeline for the winter weather advisory service.
///
/// Submodules, in data-flow order:
/// - `detection` — classifies one run's 6-hourly points and merges
///   contiguous winter-precip points into events.
/// - `consistency` — reconciles event lists across runs into corroborated
///   windows.
/// - `tiers` — buckets corroborated windows by lead time and assembles the
///   advisory payload.
///
/// Data flows strictly forward through these; nothing feeds back.

pub mod consistency;
pub mod detection;
pub mod tiers;
