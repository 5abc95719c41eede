//! DrishtiIO viewer
//!
//! Connects to the camera daemon, reassembles frames from the byte stream,
//! runs detection on the configured cadence and resolution, and reports
//! remapped detections until the stream closes or Ctrl-C is pressed.

use drishti_io::config::{parse_config_path, AppConfig};
use drishti_io::detect::{Detector, StubDetector};
use drishti_io::display::LogSink;
use drishti_io::error::Result;
use drishti_io::pipeline::run_consumer;
use drishti_io::sampling::SamplingState;
use drishti_io::streaming::StreamReceiver;
use drishti_io::transport::TcpTransport;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

fn load_config(path: &str) -> Result<AppConfig> {
    if std::path::Path::new(path).exists() {
        AppConfig::from_file(path)
    } else {
        log::warn!("Config {} not found, using defaults", path);
        Ok(AppConfig::default())
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    log::info!("DrishtiIO viewer starting...");

    let config_path = parse_config_path("/etc/drishti.toml");
    log::info!("Using config: {}", config_path);
    let config = load_config(&config_path)?;

    let running = Arc::new(AtomicBool::new(true));
    let r = Arc::clone(&running);
    ctrlc::set_handler(move || {
        log::info!("Received shutdown signal");
        r.store(false, Ordering::Relaxed);
    })
    .map_err(|e| drishti_io::Error::Other(format!("Error setting Ctrl-C handler: {}", e)))?;

    let transport = TcpTransport::connect(&config.network.connect_address)?;
    let mut receiver = StreamReceiver::new(transport);
    let mut sampling = SamplingState::new(
        config.sampling.skip_interval,
        config.sampling.scale_factor,
    )?;

    // Real models plug in through the Detector trait; the stub reports
    // nothing but keeps the full pipeline exercised
    let mut detector: Option<StubDetector> = if config.sampling.detect {
        Some(StubDetector::empty())
    } else {
        log::info!("Detection disabled");
        None
    };
    let mut sink = LogSink::new();

    let result = run_consumer(
        &mut receiver,
        &mut sampling,
        detector.as_mut().map(|d| d as &mut dyn Detector),
        &mut sink,
        &running,
    );

    if let Err(e) = receiver.shutdown() {
        log::debug!("Socket close: {}", e);
    }

    match result {
        Ok(stats) => {
            log::info!(
                "Viewer stopped: {} frame(s), {} annotation(s)",
                stats.frames,
                stats.annotations
            );
            Ok(())
        }
        Err(e) => {
            log::error!("Viewer failed: {}", e);
            Err(e)
        }
    }
}
