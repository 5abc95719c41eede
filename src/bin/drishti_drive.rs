//! Drive subsystem smoke sequence
//!
//! Configures the chassis pins, drives all wheels forward for a few seconds,
//! stops, and releases. Runs against the recording mock backend so it can be
//! exercised off the robot; a hardware backend implements [`GpioBackend`]
//! the same way.
//!
//! [`GpioBackend`]: drishti_io::motor::GpioBackend

use drishti_io::error::Result;
use drishti_io::motor::{Direction, MockGpio, MotorController};
use drishti_io::motor::{DriveLayout, GpioBackend};
use std::thread;
use std::time::Duration;

fn drive_sequence<G: GpioBackend>(motors: &mut MotorController<G>) -> Result<()> {
    motors.drive_all(Direction::Forward, 80)?;
    thread::sleep(Duration::from_secs(5));
    motors.stop_all()?;
    Ok(())
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut motors = MotorController::new(MockGpio::new(), DriveLayout::default());

    let report = motors.configure();
    for (pin, reason) in &report.failed {
        log::warn!("Pin {} unavailable: {}", pin, reason);
    }

    // Release runs on the error path too
    let result = drive_sequence(&mut motors);
    motors.release_all();
    result
}
