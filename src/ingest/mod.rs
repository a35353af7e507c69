/// Data acquisition from the upstream model source.
///
/// - `nomads` — NOAA NOMADS GFS 0.25° filter client: URL construction, run
///   enumeration, subset download, point-series assembly.
/// - `fixtures` (test only) — representative wgrib2 inventory payloads.
///
/// If another model source is added later (e.g. the NAM for short-range
/// detail), it gets its own file here rather than growing `nomads`.

pub mod nomads;

#[cfg(test)]
pub(crate) mod fixtures;
