//! Mock implementations for testing without hardware.
//!
//! This module provides test doubles for the hardware traits, enabling
//! development and testing on desktop without a physical H-bridge.
//!
//! # Available Mocks
//!
//! | Mock | Trait | Purpose |
//! |------|-------|---------|
//! | [`MockPwmPin`] | [`PwmPin`] | Records every duty-cycle write |
//!
//! # Example
//!
//! ```rust
//! use hbridge_fan::{HBridgeFan, HBridgeFanConfig};
//! use hbridge_fan::hal::MockPwmPin;
//!
//! let config = HBridgeFanConfig::new("bench fan").with_speed_count(10);
//! let mut fan = HBridgeFan::new(config, MockPwmPin::new(), MockPwmPin::new()).unwrap();
//!
//! fan.make_call().set_state(true).set_speed(10).perform();
//! fan.update().unwrap();
//!
//! // Verify via the recorded pin levels
//! assert_eq!(fan.pin_a().level, 0.0); // slow decay, full speed
//! assert_eq!(fan.pin_b().level, 1.0);
//! ```
//!
//! [`PwmPin`]: crate::traits::PwmPin

extern crate alloc;

use alloc::vec::Vec;

use crate::traits::PwmPin;

/// Mock PWM pin for testing.
///
/// Records every duty-cycle write for verification. Use the public
/// fields to inspect state after test operations.
///
/// # Example
///
/// ```rust
/// use hbridge_fan::hal::MockPwmPin;
/// use hbridge_fan::traits::PwmPin;
///
/// let mut pin = MockPwmPin::new();
/// pin.set_level(0.75).unwrap();
/// pin.set_level(0.25).unwrap();
///
/// assert_eq!(pin.level, 0.25);
/// assert_eq!(pin.write_count, 2);
/// assert_eq!(pin.history, [0.75, 0.25]);
/// ```
#[derive(Debug, Default)]
pub struct MockPwmPin {
    /// Most recently written duty cycle (0.0 to 1.0).
    pub level: f32,
    /// Every duty cycle written, in order.
    pub history: Vec<f32>,
    /// Number of times `set_level` was called.
    pub write_count: usize,
}

impl MockPwmPin {
    /// Creates a new mock pin at level 0.0 with no recorded writes.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the last written level, if any write happened.
    pub fn last_write(&self) -> Option<f32> {
        self.history.last().copied()
    }
}

impl PwmPin for MockPwmPin {
    type Error = ();

    fn set_level(&mut self, duty: f32) -> Result<(), ()> {
        let duty = duty.clamp(0.0, 1.0);
        self.level = duty;
        self.history.push(duty);
        self.write_count += 1;
        Ok(())
    }
}
