//! Drive subsystem: pin-driven motor controller
//!
//! Four DC motors, one per wheel, each driven by a pair of BCM pins
//! (forward / backward) with software PWM on the forward pin modulating
//! effective speed via duty cycle.
//!
//! The pin layout is an explicit configuration value passed at construction,
//! not a global table, so test and alternate chassis layouts are swappable.

mod controller;
mod gpio;

pub use controller::{MotorController, PWM_FREQUENCY_HZ};
pub use gpio::{GpioBackend, MockGpio};

/// Drive direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Backward,
}

/// Wheel identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Wheel {
    FrontLeft,
    FrontRight,
    BackLeft,
    BackRight,
}

impl Wheel {
    /// All wheels, in configuration order
    pub const ALL: [Wheel; 4] = [
        Wheel::FrontRight,
        Wheel::BackRight,
        Wheel::FrontLeft,
        Wheel::BackLeft,
    ];
}

/// Pin pair driving one wheel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WheelPins {
    /// Driven high for forward motion; also carries the PWM duty signal
    pub forward: u8,
    /// Driven high for backward motion
    pub backward: u8,
}

/// Pin assignment for the whole chassis
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DriveLayout {
    pub front_right: WheelPins,
    pub back_right: WheelPins,
    pub front_left: WheelPins,
    pub back_left: WheelPins,
}

impl DriveLayout {
    /// Pins for one wheel
    pub fn pins_for(&self, wheel: Wheel) -> WheelPins {
        match wheel {
            Wheel::FrontRight => self.front_right,
            Wheel::BackRight => self.back_right,
            Wheel::FrontLeft => self.front_left,
            Wheel::BackLeft => self.back_left,
        }
    }

    /// Every pin in the layout, wheel by wheel
    pub fn all_pins(&self) -> Vec<u8> {
        Wheel::ALL
            .iter()
            .flat_map(|w| {
                let p = self.pins_for(*w);
                [p.forward, p.backward]
            })
            .collect()
    }
}

impl Default for DriveLayout {
    /// Stock chassis wiring
    fn default() -> Self {
        Self {
            front_right: WheelPins {
                forward: 23,
                backward: 24,
            },
            back_right: WheelPins {
                forward: 25,
                backward: 16,
            },
            front_left: WheelPins {
                forward: 5,
                backward: 6,
            },
            back_left: WheelPins {
                forward: 12,
                backward: 13,
            },
        }
    }
}

/// Outcome of configuring the drive pins.
///
/// Individual pin failures are recorded and configuration of the remaining
/// pins proceeds; the controller then runs with whichever wheels came up.
#[derive(Debug, Default)]
pub struct SetupReport {
    /// Pins configured successfully
    pub configured: Vec<u8>,
    /// Pins that failed, with the backend's reason
    pub failed: Vec<(u8, String)>,
}

impl SetupReport {
    /// True when every pin configured
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }

    /// True when at least one pin failed but the controller is still usable
    pub fn is_degraded(&self) -> bool {
        !self.failed.is_empty() && !self.configured.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_layout_matches_chassis_wiring() {
        let layout = DriveLayout::default();
        assert_eq!(
            layout.front_right,
            WheelPins {
                forward: 23,
                backward: 24
            }
        );
        assert_eq!(layout.all_pins(), vec![23, 24, 25, 16, 5, 6, 12, 13]);
    }
}
