//! # hbridge-fan
//!
//! An H-bridge fan/motor driver and a text sensor filter chain for
//! embedded controllers.
//!
//! ## Features
//!
//! - **Hardware abstraction**: A [`PwmPin`] trait so the driver runs on
//!   real PWM peripherals or desktop mocks
//! - **H-bridge control**: Logical fan state (on/off, speed step,
//!   direction) translated into two duty cycles, with slow/fast decay
//!   modes and a short-braking routine
//! - **State calls**: Atomic multi-field state changes with observer
//!   notification
//! - **Text filters**: Pass-through, uppercase, and user-function filters
//!   applied to string sensor readings before publication
//!
//! ## Architecture
//!
//! The crate is structured to allow testing on desktop without hardware:
//!
//! - `traits` - Hardware abstractions
//! - `fan` - Logical fan state, capabilities, and the state-call builder
//! - `hbridge` - The driver translating state into pin duty cycles
//! - `text_sensor` - String sensor with a filter chain
//! - `config` - Validated, builder-style configuration
//! - `hal` - Concrete implementations (mock for testing, esp32 for hardware)
//!
//! ## Example
//!
//! ```rust
//! use hbridge_fan::{
//!     DecayMode, FanDirection, HBridgeFan, HBridgeFanConfig,
//!     hal::MockPwmPin,
//! };
//!
//! // Build a driver from a validated config and two PWM legs
//! let config = HBridgeFanConfig::new("bench fan")
//!     .with_decay_mode(DecayMode::Fast)
//!     .with_speed_count(10);
//! let mut fan = HBridgeFan::new(config, MockPwmPin::new(), MockPwmPin::new()).unwrap();
//!
//! // Request a state change
//! fan.make_call()
//!     .set_state(true)
//!     .set_speed(5)
//!     .set_direction(FanDirection::Forward)
//!     .perform();
//!
//! // Tick from your main loop; duty cycles follow the logical state
//! fan.update().unwrap();
//! assert_eq!(fan.pin_b().level, 0.5); // fast decay forward: b = f
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![warn(missing_docs)]

extern crate alloc;

/// Validated, builder-style configuration for the driver.
pub mod config;
/// Logical fan state, capabilities, and the state-call builder.
pub mod fan;
/// Hardware abstraction layer with mock implementations for testing.
pub mod hal;
/// H-bridge driver translating fan state into two PWM duty cycles.
pub mod hbridge;
/// Text sensor with a filter chain applied before publication.
pub mod text_sensor;
/// Core traits for hardware abstraction.
pub mod traits;

// Re-exports for convenience
pub use config::{ConfigError, HBridgeFanConfig};
pub use fan::{Fan, FanDirection, FanState, FanStateCall, FanTraits, StateListener};
pub use hbridge::{output_levels, DecayMode, HBridgeFan};
pub use text_sensor::{LambdaFilterFn, TextFilter, TextListener, TextSensor};
pub use traits::PwmPin;
