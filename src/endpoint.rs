/// HTTP endpoint for the winter weather forecast
///
/// Serves the tiered advisory to frontends and external tools.
///
/// Endpoints:
/// - GET /forecast?lat=&lon=[&use_cache=][&complete_only=] - Tiered forecast
/// - GET /forecast/debug?lat=&lon= - One NOMADS request with diagnostics
/// - GET /health - Service health check
///
/// Responses carry permissive CORS headers (the frontend is served from a
/// different origin) and Cache-Control hints so intermediaries can absorb
/// repeat queries on top of the process-local cache.

use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;

use crate::analysis::tiers::build_tiered_forecast;
use crate::cache::{CoordKey, ForecastCache};
use crate::config::{ForecastConfig, ServiceSettings};
use crate::ingest::nomads::{self, GribPointReader};
use crate::model::TieredForecast;

// ---------------------------------------------------------------------------
// Query parsing
// ---------------------------------------------------------------------------

/// Parsed and validated /forecast query parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct ForecastQuery {
    pub lat: f64,
    pub lon: f64,
    /// Serve a cached payload when one is fresh (default true).
    pub use_cache: bool,
    /// Only consult runs published 6+ hours after init (default true).
    pub complete_only: bool,
}

fn query_pairs(raw_query: &str) -> Vec<(String, String)> {
    raw_query
        .split('&')
        .filter(|s| !s.is_empty())
        .map(|pair| {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            let decoded = urlencoding::decode(value)
                .map(|v| v.into_owned())
                .unwrap_or_else(|_| value.to_string());
            (key.to_string(), decoded)
        })
        .collect()
}

fn parse_flag(value: &str) -> bool {
    !matches!(value.to_ascii_lowercase().as_str(), "false" | "0" | "no")
}

impl ForecastQuery {
    /// Parses the raw query string (the part after `?`). Both coordinates
    /// are required and range-checked; the flags default to true.
    pub fn parse(raw_query: &str) -> Result<Self, String> {
        let mut lat: Option<f64> = None;
        let mut lon: Option<f64> = None;
        let mut use_cache = true;
        let mut complete_only = true;

        for (key, value) in query_pairs(raw_query) {
            match key.as_str() {
                "lat" => lat = value.parse().ok(),
                "lon" => lon = value.parse().ok(),
                "use_cache" => use_cache = parse_flag(&value),
                "complete_only" => complete_only = parse_flag(&value),
                _ => {}
            }
        }

        let lat = lat.ok_or("missing or invalid 'lat' parameter")?;
        let lon = lon.ok_or("missing or invalid 'lon' parameter")?;

        if !(-90.0..=90.0).contains(&lat) {
            return Err(format!("lat {} out of range [-90, 90]", lat));
        }
        if !(-180.0..=180.0).contains(&lon) {
            return Err(format!("lon {} out of range [-180, 180]", lon));
        }

        Ok(Self { lat, lon, use_cache, complete_only })
    }
}

// ---------------------------------------------------------------------------
// Payload shaping
// ---------------------------------------------------------------------------

/// Echoes the queried coordinates into the response body, as the serving
/// contract requires.
pub fn attach_location(payload: &mut Value, lat: f64, lon: f64) {
    if let Some(map) = payload.as_object_mut() {
        map.insert("lat".to_string(), Value::from(lat));
        map.insert("lon".to_string(), Value::from(lon));
    }
}

/// Body returned when no usable runs came back for the location: the
/// empty-payload shape plus a human-readable explanation.
pub fn no_runs_body(lat: f64, lon: f64) -> Value {
    let mut body = serde_json::to_value(TieredForecast::empty())
        .expect("empty payload always serializes");
    attach_location(&mut body, lat, lon);
    if let Some(map) = body.as_object_mut() {
        map.insert(
            "message".to_string(),
            Value::from(
                "No GFS runs available for this location. Runs may not be \
                 published yet, or the GRIB subsets could not be decoded \
                 (ensure wgrib2 is installed and on PATH).",
            ),
        );
    }
    body
}

// ---------------------------------------------------------------------------
// HTTP server
// ---------------------------------------------------------------------------

/// Everything the request loop needs, wired once at startup.
pub struct EndpointState {
    pub http: reqwest::blocking::Client,
    pub reader: Arc<dyn GribPointReader>,
    pub cache: Box<dyn ForecastCache>,
    pub config: ForecastConfig,
    pub settings: ServiceSettings,
}

/// Start the HTTP endpoint server on the specified port. Blocks serving
/// requests until the process exits.
pub fn start_endpoint_server(port: u16, state: EndpointState) -> Result<(), String> {
    let server = tiny_http::Server::http(format!("0.0.0.0:{}", port))
        .map_err(|e| format!("Failed to start HTTP server: {}", e))?;

    println!("📡 HTTP endpoint listening on http://0.0.0.0:{}", port);
    println!("   GET /forecast?lat=&lon= - Tiered winter forecast");
    println!("   GET /forecast/debug?lat=&lon= - NOMADS diagnostics");
    println!("   GET /health - Service health check\n");

    for request in server.incoming_requests() {
        let url = request.url().to_string();
        let (path, raw_query) = url.split_once('?').unwrap_or((url.as_str(), ""));

        let response = match path {
            "/health" => handle_health(),
            "/forecast" => handle_forecast(&state, raw_query),
            "/forecast/debug" => handle_debug(&state, raw_query),
            _ => create_response(
                404,
                serde_json::json!({
                    "error": "Not found",
                    "available_endpoints": ["/health", "/forecast", "/forecast/debug"]
                }),
                None,
            ),
        };

        if let Err(e) = request.respond(response) {
            eprintln!("Failed to send response: {}", e);
        }
    }

    Ok(())
}

/// Handle /health endpoint
fn handle_health() -> tiny_http::Response<std::io::Cursor<Vec<u8>>> {
    create_response(
        200,
        serde_json::json!({
            "status": "ok",
            "service": "wintermon_service",
            "version": "0.1.0"
        }),
        None,
    )
}

/// Handle /forecast endpoint
fn handle_forecast(state: &EndpointState, raw_query: &str) -> tiny_http::Response<std::io::Cursor<Vec<u8>>> {
    let query = match ForecastQuery::parse(raw_query) {
        Ok(q) => q,
        Err(e) => return create_response(400, serde_json::json!({ "error": e }), None),
    };

    let key = CoordKey::new(query.lat, query.lon);

    if query.use_cache {
        if let Some(mut cached) = state.cache.get(key) {
            attach_location(&mut cached, query.lat, query.lon);
            return create_response(200, cached, Some("public, max-age=600"));
        }
    }

    let runs = nomads::fetch_timeseries_for_point(
        &state.http,
        Arc::clone(&state.reader),
        query.lat,
        query.lon,
        query.complete_only,
    );

    if runs.is_empty() {
        return create_response(
            200,
            no_runs_body(query.lat, query.lon),
            Some("public, max-age=60"),
        );
    }

    let payload = build_tiered_forecast(&runs, &state.config);
    let mut body = match serde_json::to_value(&payload) {
        Ok(v) => v,
        Err(e) => {
            return create_response(
                500,
                serde_json::json!({ "error": format!("serialization failed: {}", e) }),
                None,
            )
        }
    };
    attach_location(&mut body, query.lat, query.lon);

    let ttl = Duration::from_secs(state.settings.cache_ttl_minutes * 60);
    state.cache.set(key, body.clone(), ttl);

    create_response(200, body, Some("public, max-age=600"))
}

/// Handle /forecast/debug endpoint
fn handle_debug(state: &EndpointState, raw_query: &str) -> tiny_http::Response<std::io::Cursor<Vec<u8>>> {
    // Debug defaults to a fixed reference point so it works bare.
    let (lat, lon) = match ForecastQuery::parse(raw_query) {
        Ok(q) => (q.lat, q.lon),
        Err(_) => (39.1295, -75.466),
    };

    let diagnostics = nomads::probe(&state.http, state.reader.as_ref(), lat, lon);
    create_response(200, diagnostics, None)
}

/// Create HTTP response with JSON body, CORS headers, and an optional
/// Cache-Control hint.
fn create_response(
    status_code: u16,
    json: Value,
    cache_control: Option<&str>,
) -> tiny_http::Response<std::io::Cursor<Vec<u8>>> {
    let body = serde_json::to_string(&json).unwrap_or_else(|_| "{}".to_string());

    let mut response = tiny_http::Response::from_data(body.into_bytes())
        .with_status_code(tiny_http::StatusCode::from(status_code))
        .with_header(
            tiny_http::Header::from_bytes(&b"Content-Type"[..], &b"application/json"[..]).unwrap(),
        )
        .with_header(
            tiny_http::Header::from_bytes(&b"Access-Control-Allow-Origin"[..], &b"*"[..]).unwrap(),
        )
        .with_header(
            tiny_http::Header::from_bytes(
                &b"Access-Control-Allow-Headers"[..],
                &b"Content-Type"[..],
            )
            .unwrap(),
        );

    if let Some(value) = cache_control {
        response = response.with_header(
            tiny_http::Header::from_bytes(&b"Cache-Control"[..], value.as_bytes()).unwrap(),
        );
    }

    response
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    // --- Query parsing -------------------------------------------------------

    #[test]
    fn test_parse_query_with_defaults() {
        let query = ForecastQuery::parse("lat=39.13&lon=-75.47").unwrap();
        assert_eq!(query.lat, 39.13);
        assert_eq!(query.lon, -75.47);
        assert!(query.use_cache, "use_cache defaults to true");
        assert!(query.complete_only, "complete_only defaults to true");
    }

    #[test]
    fn test_parse_query_flags_off() {
        let query =
            ForecastQuery::parse("lat=39.13&lon=-75.47&use_cache=false&complete_only=0").unwrap();
        assert!(!query.use_cache);
        assert!(!query.complete_only);
    }

    #[test]
    fn test_parse_query_missing_lat_is_an_error() {
        let result = ForecastQuery::parse("lon=-75.47");
        assert!(result.is_err());
        assert!(result.unwrap_err().contains("lat"));
    }

    #[test]
    fn test_parse_query_non_numeric_coordinate_is_an_error() {
        assert!(ForecastQuery::parse("lat=north&lon=-75.47").is_err());
    }

    #[test]
    fn test_parse_query_rejects_out_of_range_coordinates() {
        assert!(ForecastQuery::parse("lat=91&lon=0").is_err());
        assert!(ForecastQuery::parse("lat=-90.5&lon=0").is_err());
        assert!(ForecastQuery::parse("lat=0&lon=180.1").is_err());
        assert!(ForecastQuery::parse("lat=90&lon=-180").is_ok(), "bounds are inclusive");
    }

    #[test]
    fn test_parse_query_ignores_unknown_parameters() {
        let query = ForecastQuery::parse("lat=10&lon=20&units=metric").unwrap();
        assert_eq!(query.lat, 10.0);
    }

    #[test]
    fn test_parse_query_decodes_encoded_values() {
        let query = ForecastQuery::parse("lat=39.13&lon=%2D75.47").unwrap();
        assert_eq!(query.lon, -75.47);
    }

    // --- Payload shaping -----------------------------------------------------

    #[test]
    fn test_attach_location_echoes_coordinates() {
        let mut body = serde_json::json!({ "runs_used": 2 });
        attach_location(&mut body, 39.13, -75.47);
        assert_eq!(body["lat"], 39.13);
        assert_eq!(body["lon"], -75.47);
        assert_eq!(body["runs_used"], 2, "existing fields untouched");
    }

    #[test]
    fn test_no_runs_body_keeps_payload_shape() {
        let body = no_runs_body(39.13, -75.47);
        assert_eq!(body["runs_used"], 0);
        assert!(body["possible"].is_null());
        assert!(body["finalCall"].is_null());
        assert!(body["detailed"].as_array().unwrap().is_empty());
        assert!(body["last_updated"].is_null());
        assert!(body["message"].as_str().unwrap().contains("No GFS runs"));
        assert_eq!(body["lat"], 39.13);
    }
}
