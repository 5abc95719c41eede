//! DrishtiIO camera daemon
//!
//! Binds the configured endpoint, accepts a single viewer, then streams
//! JPEG-encoded camera frames as length-prefixed messages until the camera
//! ends, the viewer disconnects, or Ctrl-C is pressed.

use drishti_io::camera::PatternCamera;
use drishti_io::config::{parse_config_path, AppConfig};
use drishti_io::error::Result;
use drishti_io::pipeline::run_producer;
use drishti_io::streaming::FrameSender;
use drishti_io::transport::TcpListenerEndpoint;
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

    log::info!("DrishtiIO camera daemon starting...");

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

    // Single-viewer protocol: accept exactly one peer
    let endpoint = TcpListenerEndpoint::bind(&config.network.listen_address)?;
    log::info!(
        "Waiting for viewer on {}...",
        config.network.listen_address
    );
    let transport = endpoint.accept_one()?;

    let mut camera = PatternCamera::new(config.camera.width, config.camera.height);
    let mut sender = FrameSender::new(transport, config.camera.jpeg_quality);

    let result = run_producer(&mut camera, &mut sender, &running);

    // Teardown runs on every exit path; close errors never mask the run's
    // own outcome
    if let Err(e) = sender.shutdown() {
        log::debug!("Socket close: {}", e);
    }

    match result {
        Ok(sent) => {
            log::info!("Camera daemon stopped after {} frame(s)", sent);
            Ok(())
        }
        Err(e) => {
            log::error!("Camera daemon failed: {}", e);
            Err(e)
        }
    }
}
