//! GPIO backend seam for the drive subsystem
//!
//! The real backend wraps the board's GPIO character device; tests use
//! [`MockGpio`], which records every call and can be told to fail specific
//! pins during setup.

use crate::error::{Error, Result};
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

/// GPIO operations the motor controller needs
pub trait GpioBackend: Send {
    /// Configure a pin as a low output
    fn setup_output(&mut self, pin: u8) -> Result<()>;

    /// Drive a pin high or low
    fn write(&mut self, pin: u8, high: bool) -> Result<()>;

    /// Start software PWM on a pin at the given frequency, duty 0
    fn pwm_start(&mut self, pin: u8, frequency_hz: f32) -> Result<()>;

    /// Change the duty cycle (0-100) of a running PWM channel
    fn pwm_set_duty(&mut self, pin: u8, duty: u8) -> Result<()>;

    /// Stop PWM on a pin
    fn pwm_stop(&mut self, pin: u8) -> Result<()>;

    /// Release all pins claimed by this backend.
    ///
    /// Safe to call more than once.
    fn cleanup(&mut self) -> Result<()>;
}

/// Recording mock GPIO backend
#[derive(Clone)]
pub struct MockGpio {
    inner: Arc<Mutex<MockGpioInner>>,
}

#[derive(Default)]
struct MockGpioInner {
    configured: HashSet<u8>,
    levels: HashMap<u8, bool>,
    pwm_running: HashSet<u8>,
    duty: HashMap<u8, u8>,
    fail_setup: HashSet<u8>,
    cleanup_calls: u32,
}

impl MockGpio {
    /// Create a mock backend
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(MockGpioInner::default())),
        }
    }

    /// Make `setup_output` fail for the given pin
    pub fn fail_pin(&self, pin: u8) {
        self.inner.lock().unwrap().fail_setup.insert(pin);
    }

    /// Current level of a pin (false when never written)
    pub fn level(&self, pin: u8) -> bool {
        *self.inner.lock().unwrap().levels.get(&pin).unwrap_or(&false)
    }

    /// Last duty cycle set on a pin (0 when never set)
    pub fn duty(&self, pin: u8) -> u8 {
        *self.inner.lock().unwrap().duty.get(&pin).unwrap_or(&0)
    }

    /// True while PWM is running on the pin
    pub fn pwm_running(&self, pin: u8) -> bool {
        self.inner.lock().unwrap().pwm_running.contains(&pin)
    }

    /// Pins successfully configured as outputs
    pub fn configured_pins(&self) -> Vec<u8> {
        let mut pins: Vec<u8> = self.inner.lock().unwrap().configured.iter().copied().collect();
        pins.sort_unstable();
        pins
    }

    /// Number of cleanup calls seen
    pub fn cleanup_calls(&self) -> u32 {
        self.inner.lock().unwrap().cleanup_calls
    }
}

impl Default for MockGpio {
    fn default() -> Self {
        Self::new()
    }
}

impl GpioBackend for MockGpio {
    fn setup_output(&mut self, pin: u8) -> Result<()> {
        let mut inner = self.inner.lock().unwrap();
        if inner.fail_setup.contains(&pin) {
            return Err(Error::Gpio {
                pin,
                message: "simulated setup failure".to_string(),
            });
        }
        inner.configured.insert(pin);
        inner.levels.insert(pin, false);
        Ok(())
    }

    fn write(&mut self, pin: u8, high: bool) -> Result<()> {
        let mut inner = self.inner.lock().unwrap();
        if !inner.configured.contains(&pin) {
            return Err(Error::Gpio {
                pin,
                message: "pin not configured".to_string(),
            });
        }
        inner.levels.insert(pin, high);
        Ok(())
    }

    fn pwm_start(&mut self, pin: u8, _frequency_hz: f32) -> Result<()> {
        let mut inner = self.inner.lock().unwrap();
        if !inner.configured.contains(&pin) {
            return Err(Error::Gpio {
                pin,
                message: "pin not configured".to_string(),
            });
        }
        inner.pwm_running.insert(pin);
        inner.duty.insert(pin, 0);
        Ok(())
    }

    fn pwm_set_duty(&mut self, pin: u8, duty: u8) -> Result<()> {
        let mut inner = self.inner.lock().unwrap();
        if !inner.pwm_running.contains(&pin) {
            return Err(Error::Gpio {
                pin,
                message: "PWM not running".to_string(),
            });
        }
        inner.duty.insert(pin, duty);
        Ok(())
    }

    fn pwm_stop(&mut self, pin: u8) -> Result<()> {
        let mut inner = self.inner.lock().unwrap();
        inner.pwm_running.remove(&pin);
        inner.duty.insert(pin, 0);
        Ok(())
    }

    fn cleanup(&mut self) -> Result<()> {
        let mut inner = self.inner.lock().unwrap();
        inner.cleanup_calls += 1;
        let pins: Vec<u8> = inner.configured.iter().copied().collect();
        for pin in pins {
            inner.levels.insert(pin, false);
        }
        Ok(())
    }
}
