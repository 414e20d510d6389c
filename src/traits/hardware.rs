//! Hardware abstraction traits for PWM output pins.
//!
//! This module defines the hardware interface that allows hbridge-fan to
//! work across different platforms (ESP32, desktop mocks, etc.).
//!
//! # Key Traits
//!
//! | Trait | Purpose |
//! |-------|---------|
//! | [`PwmPin`] | Normalized duty-cycle output for one H-bridge leg |
//!
//! # Implementation
//!
//! For testing and desktop development, use [`MockPwmPin`] from
//! [`crate::hal::mock`]. For ESP32 hardware, use the LEDC-backed
//! implementation from `hal::esp32` (requires `esp32` feature).
//!
//! # Example
//!
//! ```rust
//! use hbridge_fan::traits::PwmPin;
//! use hbridge_fan::hal::MockPwmPin;
//!
//! let mut pin = MockPwmPin::new();
//! pin.set_level(0.5).unwrap();
//! assert_eq!(pin.level, 0.5);
//! ```
//!
//! [`MockPwmPin`]: crate::hal::MockPwmPin

/// A PWM-capable output pin driven with a normalized duty cycle.
///
/// Implement this trait for your PWM peripheral. One H-bridge leg maps
/// to one `PwmPin`; the fan driver owns two of them.
///
/// # Implementation Notes
///
/// - Duty values outside `[0.0, 1.0]` should be clamped before being
///   applied to hardware
/// - Writes are fire-and-forget; there is no readback or acknowledgment
/// - The mapping from duty to physical signal (frequency, resolution,
///   polarity) is implementation-defined
///
/// # Example Implementation
///
/// ```rust
/// use hbridge_fan::traits::PwmPin;
///
/// struct MyPin { /* hardware handle */ }
///
/// impl PwmPin for MyPin {
///     type Error = ();
///
///     fn set_level(&mut self, duty: f32) -> Result<(), ()> {
///         let ticks = (duty.clamp(0.0, 1.0) * 1023.0) as u32;
///         // Write ticks to the PWM peripheral...
///         # let _ = ticks;
///         Ok(())
///     }
/// }
/// ```
pub trait PwmPin {
    /// Error type for pin operations.
    type Error;

    /// Set the output duty cycle, `0.0` (always low) to `1.0` (always high).
    ///
    /// Values outside this range should be clamped.
    fn set_level(&mut self, duty: f32) -> Result<(), Self::Error>;

    /// Convenience method to drive the pin fully low.
    fn turn_off(&mut self) -> Result<(), Self::Error> {
        self.set_level(0.0)
    }

    /// Convenience method to drive the pin fully high.
    fn turn_on(&mut self) -> Result<(), Self::Error> {
        self.set_level(1.0)
    }
}
