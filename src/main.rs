//! Winter Weather Advisory Service - Main Entry
//!
//! A server-side service that, per request:
//! 1. Fetches GFS point forecasts for the last few model runs from NOMADS
//! 2. Detects winter-precipitation events within each run
//! 3. Corroborates events across runs
//! 4. Serves a lead-time-tiered advisory over HTTP
//!
//! Usage:
//!   cargo run --release                    # Serve on the default port 8080
//!   cargo run --release -- --endpoint 9000 # Serve on port 9000
//!
//! Environment:
//!   GFS_CACHE_TTL_MINUTES - forecast cache TTL (default: 60)
//!
//! Requires the wgrib2 utility on PATH for GRIB2 point extraction.

use std::env;
use std::sync::Arc;

use wintermon_service::cache::MemoryCache;
use wintermon_service::config::{ForecastConfig, ServiceSettings};
use wintermon_service::endpoint::{start_endpoint_server, EndpointState};
use wintermon_service::ingest::nomads::Wgrib2Reader;

const DEFAULT_PORT: u16 = 8080;
const CONFIG_PATH: &str = "forecast.toml";

fn main() {
    println!("❄️  Winter Weather Advisory Service");
    println!("===================================\n");

    dotenv::dotenv().ok();

    // Parse command-line arguments
    let args: Vec<String> = env::args().collect();
    let mut port = DEFAULT_PORT;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--endpoint" => {
                if i + 1 < args.len() {
                    match args[i + 1].parse() {
                        Ok(p) => port = p,
                        Err(_) => {
                            eprintln!("Error: invalid port '{}'", args[i + 1]);
                            std::process::exit(1);
                        }
                    }
                    i += 2;
                } else {
                    eprintln!("Error: --endpoint requires a port number");
                    std::process::exit(1);
                }
            }
            _ => {
                eprintln!("Unknown argument: {}", args[i]);
                eprintln!("Usage: {} [--endpoint PORT]", args[0]);
                std::process::exit(1);
            }
        }
    }

    // Tunables: coded defaults unless forecast.toml overrides them.
    let config = ForecastConfig::load(CONFIG_PATH);
    let settings = ServiceSettings::from_env();
    println!("📋 Snow threshold: {} °C", config.detection.snow_threshold_c);
    println!("📋 Corroboration: {} runs within {} h", config.consistency.min_runs_agreement, config.consistency.window_match_hours);
    println!("📋 Cache TTL: {} minutes\n", settings.cache_ttl_minutes);

    let http = match reqwest::blocking::Client::builder()
        .timeout(std::time::Duration::from_secs(60))
        .build()
    {
        Ok(client) => client,
        Err(e) => {
            eprintln!("\n❌ Failed to build HTTP client: {}\n", e);
            std::process::exit(1);
        }
    };

    let state = EndpointState {
        http,
        reader: Arc::new(Wgrib2Reader::default()),
        cache: Box::new(MemoryCache::new()),
        config,
        settings,
    };

    if let Err(e) = start_endpoint_server(port, state) {
        eprintln!("\n❌ Endpoint failed: {}\n", e);
        std::process::exit(1);
    }
}
