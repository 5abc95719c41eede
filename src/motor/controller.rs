//! Motor controller for the four-wheel chassis

use super::{Direction, DriveLayout, GpioBackend, SetupReport, Wheel};
use crate::error::{Error, Result};
use std::collections::HashSet;

/// Software PWM frequency for the speed channels
pub const PWM_FREQUENCY_HZ: f32 = 100.0;

/// Four-wheel drive controller over a GPIO backend.
///
/// Speed is a duty-cycle percentage; values outside [0, 100] are clamped,
/// never rejected. A wheel whose pins failed to configure is skipped by the
/// all-wheel operations and rejected by the per-wheel ones, leaving the
/// controller running in degraded capability.
pub struct MotorController<G: GpioBackend> {
    gpio: G,
    layout: DriveLayout,
    ready: HashSet<Wheel>,
    released: bool,
}

impl<G: GpioBackend> MotorController<G> {
    /// Create a controller; no pins are touched until [`configure`].
    ///
    /// [`configure`]: MotorController::configure
    pub fn new(gpio: G, layout: DriveLayout) -> Self {
        Self {
            gpio,
            layout,
            ready: HashSet::new(),
            released: false,
        }
    }

    /// Configure every drive pin and start the PWM speed channels.
    ///
    /// Individual pin failures are recorded in the report and configuration
    /// of the remaining wheels proceeds. A wheel is drivable only when both
    /// of its pins and its PWM channel came up.
    pub fn configure(&mut self) -> SetupReport {
        let mut report = SetupReport::default();
        self.released = false;

        for wheel in Wheel::ALL {
            let pins = self.layout.pins_for(wheel);
            let mut wheel_ok = true;

            for pin in [pins.forward, pins.backward] {
                match self.gpio.setup_output(pin) {
                    Ok(()) => {
                        log::debug!("Pin {} configured", pin);
                        report.configured.push(pin);
                    }
                    Err(e) => {
                        log::warn!("Pin {} failed: {}", pin, e);
                        report.failed.push((pin, e.to_string()));
                        wheel_ok = false;
                    }
                }
            }

            if wheel_ok {
                if let Err(e) = self.gpio.pwm_start(pins.forward, PWM_FREQUENCY_HZ) {
                    log::warn!("PWM on pin {} failed: {}", pins.forward, e);
                    report.failed.push((pins.forward, e.to_string()));
                    wheel_ok = false;
                }
            }

            if wheel_ok {
                self.ready.insert(wheel);
            } else {
                log::warn!("{:?} unavailable, continuing without it", wheel);
            }
        }

        if report.is_complete() {
            log::info!("Drive configured, {} pins", report.configured.len());
        } else {
            log::warn!(
                "Drive configured degraded: {} pins up, {} failed",
                report.configured.len(),
                report.failed.len()
            );
        }
        report
    }

    /// Clamp a requested speed to the [0, 100] duty range
    pub fn clamp_speed(speed: i32) -> u8 {
        speed.clamp(0, 100) as u8
    }

    /// Drive one wheel in the given direction at `speed` percent.
    pub fn drive(&mut self, direction: Direction, wheel: Wheel, speed: i32) -> Result<()> {
        if !self.ready.contains(&wheel) {
            return Err(Error::InvalidParameter(format!(
                "{:?} is not configured",
                wheel
            )));
        }
        let pins = self.layout.pins_for(wheel);
        let duty = Self::clamp_speed(speed);

        match direction {
            Direction::Forward => {
                self.gpio.write(pins.forward, true)?;
                self.gpio.write(pins.backward, false)?;
            }
            Direction::Backward => {
                self.gpio.write(pins.forward, false)?;
                self.gpio.write(pins.backward, true)?;
            }
        }
        self.gpio.pwm_set_duty(pins.forward, duty)?;
        Ok(())
    }

    /// Drive every available wheel; unavailable wheels are skipped.
    pub fn drive_all(&mut self, direction: Direction, speed: i32) -> Result<()> {
        for wheel in Wheel::ALL {
            if !self.ready.contains(&wheel) {
                log::debug!("Skipping unavailable {:?}", wheel);
                continue;
            }
            self.drive(direction, wheel, speed)?;
        }
        Ok(())
    }

    /// Stop one wheel: duty to zero, both pins low.
    pub fn stop(&mut self, wheel: Wheel) -> Result<()> {
        if !self.ready.contains(&wheel) {
            return Err(Error::InvalidParameter(format!(
                "{:?} is not configured",
                wheel
            )));
        }
        let pins = self.layout.pins_for(wheel);
        self.gpio.pwm_set_duty(pins.forward, 0)?;
        self.gpio.write(pins.forward, false)?;
        self.gpio.write(pins.backward, false)?;
        Ok(())
    }

    /// Stop every available wheel.
    pub fn stop_all(&mut self) -> Result<()> {
        for wheel in Wheel::ALL {
            if self.ready.contains(&wheel) {
                self.stop(wheel)?;
            }
        }
        Ok(())
    }

    /// True when the wheel configured successfully
    pub fn is_ready(&self, wheel: Wheel) -> bool {
        self.ready.contains(&wheel)
    }

    /// Release every claimed resource and leave all outputs stopped.
    ///
    /// Idempotent, and safe after a partial configuration. Errors during an
    /// individual release step are logged and the remaining steps still run;
    /// nothing is raised to the caller.
    pub fn release_all(&mut self) {
        for wheel in Wheel::ALL {
            if !self.ready.contains(&wheel) {
                continue;
            }
            let pins = self.layout.pins_for(wheel);
            if let Err(e) = self.gpio.pwm_set_duty(pins.forward, 0) {
                log::warn!("Release: duty reset on pin {} failed: {}", pins.forward, e);
            }
            if let Err(e) = self.gpio.pwm_stop(pins.forward) {
                log::warn!("Release: PWM stop on pin {} failed: {}", pins.forward, e);
            }
            for pin in [pins.forward, pins.backward] {
                if let Err(e) = self.gpio.write(pin, false) {
                    log::warn!("Release: lowering pin {} failed: {}", pin, e);
                }
            }
        }
        self.ready.clear();
        if let Err(e) = self.gpio.cleanup() {
            log::warn!("Release: GPIO cleanup failed: {}", e);
        }
        if !self.released {
            log::info!("Drive released");
        }
        self.released = true;
    }
}

impl<G: GpioBackend> Drop for MotorController<G> {
    fn drop(&mut self) {
        if !self.released {
            self.release_all();
        }
    }
}
