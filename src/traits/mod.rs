//! Trait definitions for hardware abstraction.
//!
//! This module defines the core abstractions that allow hbridge-fan to:
//! - Run on different hardware (ESP32, desktop mock)
//! - Be tested without a physical H-bridge attached
//!
//! # Hardware Abstraction
//!
//! The key hardware trait is:
//!
//! - [`PwmPin`]: a float output driven with a normalized duty cycle

pub mod hardware;

pub use hardware::*;
