/// NOAA NOMADS GFS 0.25° acquisition client.
///
/// Handles filter-CGI URL construction and retrieval of small GRIB2 subsets
/// (2m temperature + surface APCP in a half-degree box around the requested
/// point) for the last few run inits:
///   https://nomads.ncep.noaa.gov/cgi-bin/filter_gfs_0p25.pl
///
/// GRIB2 binary decoding is delegated through the `GribPointReader` trait;
/// the shipped `Wgrib2Reader` shells out to the wgrib2 utility the same way
/// the upstream tooling leans on ecCodes. Everything else here - run
/// enumeration, HTML-error-page rejection, Kelvin conversion, 6-hour
/// precipitation deltas, truncate-on-first-failure - is plain plumbing.
///
/// Failure semantics: any fetch or decode error truncates that run's series
/// at the failing forecast hour. A run that yields zero points is dropped
/// entirely; the analysis layer never sees partial points or errors.

use chrono::{DateTime, Duration, NaiveDate, Utc};
use std::sync::mpsc;
use std::sync::Arc;
use threadpool::ThreadPool;

use crate::model::{Cycle, GfsError, ModelRun, TimeSeriesPoint};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

const NOMADS_BASE: &str = "https://nomads.ncep.noaa.gov/cgi-bin/filter_gfs_0p25.pl";

/// Forecast hours requested per run: 0..=240 every 6h, 41 subsets.
pub const FORECAST_HOUR_MAX: u32 = 240;
pub const FORECAST_HOUR_STEP: u32 = 6;

/// How many runs the forecast pipeline consumes.
pub const NUM_RUNS: usize = 3;

/// Hours after init before a GFS run is considered fully published.
pub const COMPLETE_RUN_HOURS: i64 = 6;

/// Upper bound on candidate runs enumerated per request (2 days x 4 cycles).
const CANDIDATE_RUN_LIMIT: usize = 8;

/// Workers for parallel candidate-run collection.
const FETCH_WORKERS: usize = 4;

/// Bodies shorter than this cannot be a GRIB2 message.
const MIN_GRIB_BYTES: usize = 100;

// ---------------------------------------------------------------------------
// GRIB point extraction seam
// ---------------------------------------------------------------------------

/// Raw values extracted from one GRIB2 subset at the nearest grid point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GribValues {
    /// 2m temperature in Kelvin, as stored in the file.
    pub t2m_k: f64,
    /// Accumulated precipitation since run init, in mm (kg/m²).
    pub apcp_mm: f64,
}

/// Extracts point values from a GRIB2 message. Decoding the binary format
/// is an external concern; implementations wrap whatever decoder is
/// available. Must be shareable across fetch workers.
pub trait GribPointReader: Send + Sync {
    fn extract(&self, grib: &[u8], lat: f64, lon: f64) -> Result<GribValues, GfsError>;
}

/// `GribPointReader` backed by the wgrib2 command-line utility.
///
/// Writes the message to a temp file (wgrib2 wants a path, not a pipe) and
/// asks for the value at the requested longitude/latitude, then parses the
/// `val=` fields out of the inventory lines.
pub struct Wgrib2Reader {
    /// Binary to invoke; "wgrib2" resolved from PATH by default.
    pub binary: String,
}

impl Default for Wgrib2Reader {
    fn default() -> Self {
        Self { binary: "wgrib2".to_string() }
    }
}

impl GribPointReader for Wgrib2Reader {
    fn extract(&self, grib: &[u8], lat: f64, lon: f64) -> Result<GribValues, GfsError> {
        let path = std::env::temp_dir().join(format!(
            "wintermon-{}-{}.grib2",
            std::process::id(),
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .map(|d| d.as_nanos())
                .unwrap_or(0)
        ));

        std::fs::write(&path, grib)
            .map_err(|e| GfsError::DecodeError(format!("temp file write failed: {}", e)))?;

        let output = std::process::Command::new(&self.binary)
            .arg(&path)
            .args(["-lon", &lon.to_string(), &lat.to_string()])
            .output();

        let _ = std::fs::remove_file(&path);

        let output = output
            .map_err(|e| GfsError::DecodeError(format!("failed to run {}: {}", self.binary, e)))?;

        if !output.status.success() {
            return Err(GfsError::DecodeError(format!(
                "{} exited with {}",
                self.binary, output.status
            )));
        }

        let inventory = String::from_utf8_lossy(&output.stdout);
        parse_point_inventory(&inventory)
    }
}

/// Parses wgrib2 `-lon` inventory output into point values.
///
/// Expected line shape (one per GRIB record):
///   `1:0:d=2024011506:TMP:2 m above ground:6 hour fcst:lon=284.5,lat=39.1,val=263.4`
///
/// TMP at 2m is required; APCP defaults to 0 when absent (the f000 subset
/// carries no accumulation record).
pub fn parse_point_inventory(inventory: &str) -> Result<GribValues, GfsError> {
    let mut t2m_k: Option<f64> = None;
    let mut apcp_mm: Option<f64> = None;

    for line in inventory.lines() {
        let val = line
            .rsplit("val=")
            .next()
            .and_then(|s| s.trim().parse::<f64>().ok());
        let Some(val) = val else { continue };

        if line.contains(":TMP:2 m above ground:") {
            t2m_k = Some(val);
        } else if line.contains(":APCP:surface:") {
            apcp_mm = Some(val);
        }
    }

    match t2m_k {
        Some(t2m_k) => Ok(GribValues { t2m_k, apcp_mm: apcp_mm.unwrap_or(0.0) }),
        None => Err(GfsError::DecodeError(
            "no 2m TMP record in inventory".to_string(),
        )),
    }
}

// ---------------------------------------------------------------------------
// URL construction
// ---------------------------------------------------------------------------

/// Bounding box `(leftlon, rightlon, toplat, bottomlat)` half a degree
/// around the point. NOMADS accepts negative longitudes.
pub fn subset_box(lat: f64, lon: f64) -> (f64, f64, f64, f64) {
    let delta = 0.5;
    (lon - delta, lon + delta, lat + delta, lat - delta)
}

/// NOMADS directory for a GFS 0.25° run: `/gfs.YYYYMMDD/HH/atmos`.
fn nomads_dir(date: NaiveDate, cycle: Cycle) -> String {
    format!("/gfs.{}/{}/atmos", date.format("%Y%m%d"), cycle.as_str())
}

/// GRIB file name within the run directory: `gfs.tHHz.pgrb2.0p25.fXXX`.
fn nomads_file(cycle: Cycle, fhr: u32) -> String {
    format!("gfs.t{}z.pgrb2.0p25.f{:03}", cycle.as_str(), fhr)
}

/// Builds the filter-CGI URL for one forecast hour of one run, requesting
/// TMP and APCP at 2m-above-ground/surface levels, subset to the box.
pub fn build_filter_url(
    date: NaiveDate,
    cycle: Cycle,
    fhr: u32,
    bbox: (f64, f64, f64, f64),
) -> String {
    let (leftlon, rightlon, toplat, bottomlat) = bbox;
    format!(
        "{}?dir={}&file={}&var_TMP=on&var_APCP=on&lev_2_m_above_ground=on&lev_surface=on\
         &subregion=on&leftlon={}&rightlon={}&toplat={}&bottomlat={}",
        NOMADS_BASE,
        urlencoding::encode(&nomads_dir(date, cycle)),
        urlencoding::encode(&nomads_file(cycle, fhr)),
        leftlon,
        rightlon,
        toplat,
        bottomlat
    )
}

// ---------------------------------------------------------------------------
// Fetching
// ---------------------------------------------------------------------------

/// True if the body plausibly is GRIB data. NOMADS returns 200 with an HTML
/// error page for missing files, so a status check alone is not enough.
pub fn looks_like_grib(body: &[u8]) -> bool {
    if body.len() < MIN_GRIB_BYTES {
        return false;
    }

    let head: &[u8] = &body[..body.len().min(500)];
    let trimmed = head
        .iter()
        .position(|b| !b.is_ascii_whitespace())
        .map(|i| &head[i..])
        .unwrap_or(head);

    if trimmed.starts_with(b"<") || trimmed.starts_with(b"%3C") {
        return false;
    }

    let lowered: Vec<u8> = head.iter().map(|b| b.to_ascii_lowercase()).collect();
    !lowered.windows(5).any(|w| w == b"<html")
}

/// Downloads one GRIB2 subset. Non-200 statuses and HTML-disguised bodies
/// are errors; the caller turns any error into series truncation.
fn fetch_grib(client: &reqwest::blocking::Client, url: &str) -> Result<Vec<u8>, GfsError> {
    let response = client
        .get(url)
        .send()
        .map_err(|e| GfsError::HttpError(e.to_string()))?;

    if !response.status().is_success() {
        return Err(GfsError::HttpError(format!("status {}", response.status())));
    }

    let body = response
        .bytes()
        .map_err(|e| GfsError::HttpError(e.to_string()))?
        .to_vec();

    if !looks_like_grib(&body) {
        return Err(GfsError::NotGrib(format!("{} byte body", body.len())));
    }

    Ok(body)
}

// ---------------------------------------------------------------------------
// Run enumeration
// ---------------------------------------------------------------------------

/// Init timestamp for a run.
fn init_time(date: NaiveDate, cycle: Cycle) -> DateTime<Utc> {
    date.and_hms_opt(cycle.hour(), 0, 0)
        .expect("cycle hour is always valid")
        .and_utc()
}

/// Enumerates candidate `(date, cycle)` runs over the last two days, newest
/// first, capped at eight.
///
/// With `complete_only`, runs initialized less than `COMPLETE_RUN_HOURS`
/// before `now` are skipped (GFS publishes the full 240h of output roughly
/// six hours after init). If that filter empties the list, all candidates
/// come back as a fallback rather than returning nothing.
pub fn list_recent_runs(now: DateTime<Utc>, complete_only: bool) -> Vec<(NaiveDate, Cycle)> {
    let mut out = Vec::new();

    for day_offset in 0..2 {
        let date = (now - Duration::days(day_offset)).date_naive();
        for cycle in Cycle::ALL {
            if complete_only && now - init_time(date, cycle) < Duration::hours(COMPLETE_RUN_HOURS)
            {
                continue;
            }
            out.push((date, cycle));
        }
    }

    if out.is_empty() {
        for day_offset in 0..2 {
            let date = (now - Duration::days(day_offset)).date_naive();
            for cycle in Cycle::ALL {
                out.push((date, cycle));
            }
        }
    }

    out.sort_by(|a, b| (b.0, b.1.hour()).cmp(&(a.0, a.1.hour())));
    out.truncate(CANDIDATE_RUN_LIMIT);
    out
}

// ---------------------------------------------------------------------------
// Series assembly
// ---------------------------------------------------------------------------

fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}

/// All forecast hours requested per run, in order.
pub fn forecast_hours() -> impl Iterator<Item = u32> {
    (0..=FORECAST_HOUR_MAX).step_by(FORECAST_HOUR_STEP as usize)
}

/// Assembles a run's point series from per-forecast-hour raw values,
/// stopping at the first `None` (truncation on fetch/decode failure).
///
/// Temperature converts from Kelvin; 6-hour precipitation is the APCP delta
/// between consecutive hours, clamped to zero when the accumulation resets
/// downward, and zero for the first point (no prior accumulation).
pub fn series_from_values<I>(init: DateTime<Utc>, values: I) -> Vec<TimeSeriesPoint>
where
    I: IntoIterator<Item = Option<GribValues>>,
{
    let mut points = Vec::new();
    let mut prev_apcp: Option<f64> = None;

    for (i, value) in values.into_iter().enumerate() {
        let Some(value) = value else { break };

        let fhr = FORECAST_HOUR_STEP * i as u32;
        let precip_6h = match prev_apcp {
            Some(prev) => (value.apcp_mm - prev).max(0.0),
            None => 0.0,
        };
        prev_apcp = Some(value.apcp_mm);

        points.push(TimeSeriesPoint {
            valid_time: init + Duration::hours(fhr as i64),
            forecast_hour: fhr,
            surface_temp_c: round2(value.t2m_k - 273.15),
            precip_6h_mm: round2(precip_6h),
        });
    }

    points
}

/// Fetches and assembles one run's series. The returned run may have zero
/// points (every forecast hour failed); the caller drops such runs.
pub fn fetch_run_series(
    client: &reqwest::blocking::Client,
    reader: &dyn GribPointReader,
    date: NaiveDate,
    cycle: Cycle,
    lat: f64,
    lon: f64,
) -> ModelRun {
    let init = init_time(date, cycle);
    let bbox = subset_box(lat, lon);

    // Lazy map: once series assembly stops at a failure, no further
    // subsets are requested for this run.
    let values = forecast_hours().map(|fhr| {
        let url = build_filter_url(date, cycle, fhr, bbox);
        fetch_grib(client, &url)
            .ok()
            .and_then(|body| reader.extract(&body, lat, lon).ok())
    });

    let points = series_from_values(init, values);
    ModelRun { init_time: init, cycle, points }
}

/// Fetches time series for the newest `NUM_RUNS` runs that yield any
/// points, collecting candidate runs in parallel on a worker pool.
///
/// Within a run the forecast hours are fetched sequentially because
/// truncation is order-dependent; across runs the fetches are independent.
pub fn fetch_timeseries_for_point(
    client: &reqwest::blocking::Client,
    reader: Arc<dyn GribPointReader>,
    lat: f64,
    lon: f64,
    complete_only: bool,
) -> Vec<ModelRun> {
    let candidates = list_recent_runs(Utc::now(), complete_only);
    if candidates.is_empty() {
        return Vec::new();
    }

    let pool = ThreadPool::new(FETCH_WORKERS.min(candidates.len()));
    let (tx, rx) = mpsc::channel();

    for (date, cycle) in candidates {
        let tx = tx.clone();
        let client = client.clone();
        let reader = Arc::clone(&reader);
        pool.execute(move || {
            let run = fetch_run_series(&client, reader.as_ref(), date, cycle, lat, lon);
            // Receiver hanging up just means the caller is gone.
            let _ = tx.send(run);
        });
    }
    drop(tx);

    let mut runs: Vec<ModelRun> = rx.iter().filter(|run| !run.points.is_empty()).collect();
    runs.sort_by(|a, b| b.init_time.cmp(&a.init_time));
    runs.truncate(NUM_RUNS);
    runs
}

// ---------------------------------------------------------------------------
// Diagnostics
// ---------------------------------------------------------------------------

/// Runs a single NOMADS request (newest candidate run, f006) and reports
/// fetch/decode diagnostics for troubleshooting. Never fails; problems are
/// described in the returned JSON.
pub fn probe(
    client: &reqwest::blocking::Client,
    reader: &dyn GribPointReader,
    lat: f64,
    lon: f64,
) -> serde_json::Value {
    let candidates = list_recent_runs(Utc::now(), false);
    let Some((date, cycle)) = candidates.first().copied() else {
        return serde_json::json!({ "error": "no candidate runs", "runs_tried": 0 });
    };

    let run_tried = format!("{}_{}Z", date.format("%Y%m%d"), cycle.as_str());
    let fhr = 6;
    let url = build_filter_url(date, cycle, fhr, subset_box(lat, lon));

    match fetch_grib(client, &url) {
        Err(e) => serde_json::json!({
            "run_tried": run_tried,
            "fhr": fhr,
            "error": e.to_string(),
        }),
        Ok(body) => match reader.extract(&body, lat, lon) {
            Ok(values) => serde_json::json!({
                "run_tried": run_tried,
                "status": "ok",
                "content_length": body.len(),
                "t2m_k": values.t2m_k,
                "apcp_mm": values.apcp_mm,
            }),
            Err(e) => serde_json::json!({
                "run_tried": run_tried,
                "fhr": fhr,
                "content_length": body.len(),
                "is_grib": true,
                "decode_error": e.to_string(),
            }),
        },
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ingest::fixtures::*;
    use chrono::TimeZone;

    fn jan15() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 15).unwrap()
    }

    // --- URL construction ---------------------------------------------------

    #[test]
    fn test_filter_url_targets_nomads_filter_cgi() {
        let url = build_filter_url(jan15(), Cycle::Z06, 6, subset_box(39.1, -75.5));
        assert!(
            url.starts_with("https://nomads.ncep.noaa.gov/cgi-bin/filter_gfs_0p25.pl?"),
            "must target the 0.25 degree filter, got: {}",
            url
        );
    }

    #[test]
    fn test_filter_url_encodes_run_directory() {
        let url = build_filter_url(jan15(), Cycle::Z06, 6, subset_box(39.1, -75.5));
        assert!(
            url.contains("dir=%2Fgfs.20240115%2F06%2Fatmos"),
            "dir slashes must be percent-encoded, got: {}",
            url
        );
    }

    #[test]
    fn test_filter_url_names_the_grib_file_with_padded_hour() {
        let url = build_filter_url(jan15(), Cycle::Z18, 6, subset_box(39.1, -75.5));
        assert!(url.contains("gfs.t18z.pgrb2.0p25.f006"), "got: {}", url);

        let url240 = build_filter_url(jan15(), Cycle::Z00, 240, subset_box(39.1, -75.5));
        assert!(url240.contains("gfs.t00z.pgrb2.0p25.f240"), "got: {}", url240);
    }

    #[test]
    fn test_filter_url_requests_both_variables_and_levels() {
        let url = build_filter_url(jan15(), Cycle::Z06, 6, subset_box(39.1, -75.5));
        assert!(url.contains("var_TMP=on"));
        assert!(url.contains("var_APCP=on"));
        assert!(url.contains("lev_2_m_above_ground=on"));
        assert!(url.contains("lev_surface=on"));
    }

    #[test]
    fn test_filter_url_subsets_half_degree_box() {
        let url = build_filter_url(jan15(), Cycle::Z06, 6, subset_box(39.0, -75.0));
        assert!(url.contains("subregion=on"));
        assert!(url.contains("leftlon=-75.5"));
        assert!(url.contains("rightlon=-74.5"));
        assert!(url.contains("toplat=39.5"));
        assert!(url.contains("bottomlat=38.5"));
    }

    // --- GRIB body validation -----------------------------------------------

    #[test]
    fn test_html_error_page_is_not_grib() {
        let mut body = b"<html><body>data file is not present</body></html>".to_vec();
        body.resize(600, b' ');
        assert!(!looks_like_grib(&body));
    }

    #[test]
    fn test_leading_whitespace_html_is_not_grib() {
        let mut body = b"\n  <!DOCTYPE html><html>404</html>".to_vec();
        body.resize(600, b' ');
        assert!(!looks_like_grib(&body));
    }

    #[test]
    fn test_short_body_is_not_grib() {
        assert!(!looks_like_grib(b"GRIB"));
        assert!(!looks_like_grib(b""));
    }

    #[test]
    fn test_binary_body_passes_validation() {
        let mut body = b"GRIB".to_vec();
        body.extend(std::iter::repeat(0xA7u8).take(500));
        assert!(looks_like_grib(&body));
    }

    // --- Run enumeration ----------------------------------------------------

    #[test]
    fn test_complete_only_skips_freshly_initialized_runs() {
        // 14:30Z on the 15th: the 12Z run is only 2.5h old (incomplete),
        // so the newest complete run is 06Z of the same day.
        let now = Utc.with_ymd_and_hms(2024, 1, 15, 14, 30, 0).unwrap();
        let runs = list_recent_runs(now, true);

        assert_eq!(runs[0], (jan15(), Cycle::Z06));
        assert!(!runs.contains(&(jan15(), Cycle::Z12)));
        assert!(!runs.contains(&(jan15(), Cycle::Z18)));
        assert_eq!(runs.len(), 6, "two of today's cycles are incomplete");
    }

    #[test]
    fn test_without_complete_only_all_cycles_of_both_days_appear() {
        let now = Utc.with_ymd_and_hms(2024, 1, 15, 14, 30, 0).unwrap();
        let runs = list_recent_runs(now, false);

        assert_eq!(runs.len(), 8);
        assert_eq!(runs[0], (jan15(), Cycle::Z18));
        assert_eq!(runs[7], (NaiveDate::from_ymd_opt(2024, 1, 14).unwrap(), Cycle::Z00));
    }

    #[test]
    fn test_runs_are_ordered_newest_first() {
        let now = Utc.with_ymd_and_hms(2024, 1, 15, 23, 0, 0).unwrap();
        let runs = list_recent_runs(now, true);

        for pair in runs.windows(2) {
            let a = init_time(pair[0].0, pair[0].1);
            let b = init_time(pair[1].0, pair[1].1);
            assert!(a > b, "candidates must be strictly newest-first");
        }
    }

    #[test]
    fn test_early_morning_reaches_into_previous_day() {
        // 01:00Z: no run from today is complete yet; the newest complete
        // run is yesterday's 18Z.
        let now = Utc.with_ymd_and_hms(2024, 1, 15, 1, 0, 0).unwrap();
        let runs = list_recent_runs(now, true);

        assert_eq!(runs[0], (NaiveDate::from_ymd_opt(2024, 1, 14).unwrap(), Cycle::Z18));
    }

    // --- Series assembly ----------------------------------------------------

    #[test]
    fn test_series_converts_kelvin_and_derives_precip_deltas() {
        let init = Utc.with_ymd_and_hms(2024, 1, 15, 6, 0, 0).unwrap();
        let values = vec![
            Some(GribValues { t2m_k: 273.15, apcp_mm: 0.0 }),
            Some(GribValues { t2m_k: 271.15, apcp_mm: 3.0 }),
            Some(GribValues { t2m_k: 270.65, apcp_mm: 7.5 }),
        ];

        let points = series_from_values(init, values);

        assert_eq!(points.len(), 3);
        assert_eq!(points[0].surface_temp_c, 0.0);
        assert_eq!(points[0].precip_6h_mm, 0.0, "first point has no prior accumulation");
        assert_eq!(points[1].surface_temp_c, -2.0);
        assert_eq!(points[1].precip_6h_mm, 3.0);
        assert_eq!(points[2].precip_6h_mm, 4.5);
        assert_eq!(points[2].forecast_hour, 12);
        assert_eq!(points[2].valid_time, init + Duration::hours(12));
    }

    #[test]
    fn test_series_clamps_negative_accumulation_delta() {
        // APCP resets at some bucket boundaries; a downward step must clamp
        // to zero, never a negative precipitation.
        let init = Utc.with_ymd_and_hms(2024, 1, 15, 6, 0, 0).unwrap();
        let values = vec![
            Some(GribValues { t2m_k: 270.0, apcp_mm: 6.0 }),
            Some(GribValues { t2m_k: 270.0, apcp_mm: 2.0 }),
        ];

        let points = series_from_values(init, values);
        assert_eq!(points[1].precip_6h_mm, 0.0);
    }

    #[test]
    fn test_series_truncates_at_first_failure() {
        let init = Utc.with_ymd_and_hms(2024, 1, 15, 6, 0, 0).unwrap();
        let values = vec![
            Some(GribValues { t2m_k: 270.0, apcp_mm: 0.0 }),
            Some(GribValues { t2m_k: 270.0, apcp_mm: 2.0 }),
            None,
            Some(GribValues { t2m_k: 270.0, apcp_mm: 4.0 }),
        ];

        let points = series_from_values(init, values);
        assert_eq!(points.len(), 2, "nothing after the first failure may survive");
    }

    #[test]
    fn test_series_from_no_values_is_empty() {
        let init = Utc.with_ymd_and_hms(2024, 1, 15, 6, 0, 0).unwrap();
        assert!(series_from_values(init, vec![None]).is_empty());
        assert!(series_from_values(init, Vec::<Option<GribValues>>::new()).is_empty());
    }

    #[test]
    fn test_forecast_hours_cover_ten_days_at_six_hour_steps() {
        let hours: Vec<u32> = forecast_hours().collect();
        assert_eq!(hours.len(), 41);
        assert_eq!(hours[0], 0);
        assert_eq!(hours[1], 6);
        assert_eq!(*hours.last().unwrap(), 240);
    }

    // --- Inventory parsing --------------------------------------------------

    #[test]
    fn test_parse_inventory_extracts_both_values() {
        let values = parse_point_inventory(fixture_wgrib2_inventory()).expect("should parse");
        assert_eq!(values.t2m_k, 263.4);
        assert_eq!(values.apcp_mm, 2.75);
    }

    #[test]
    fn test_parse_inventory_without_apcp_defaults_to_zero() {
        // The f000 subset has no accumulation record yet.
        let values =
            parse_point_inventory(fixture_wgrib2_inventory_tmp_only()).expect("should parse");
        assert_eq!(values.t2m_k, 263.4);
        assert_eq!(values.apcp_mm, 0.0);
    }

    #[test]
    fn test_parse_inventory_without_tmp_is_an_error() {
        let result = parse_point_inventory("1:0:d=2024011506:APCP:surface:0-6 hour acc fcst:lon=284.5,lat=39.1,val=2.75");
        assert!(matches!(result, Err(GfsError::DecodeError(_))));
    }

    #[test]
    fn test_parse_empty_inventory_is_an_error() {
        assert!(matches!(parse_point_inventory(""), Err(GfsError::DecodeError(_))));
    }
}
