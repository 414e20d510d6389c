//! Configuration types for the H-bridge fan driver.
//!
//! Uses `heapless::String` for `no_std` compatibility while remaining
//! ergonomic to use on desktop with `std`.
//!
//! Malformed configuration is rejected here, before a driver is built;
//! the driver itself assumes a validated config and has no recoverable
//! runtime error paths.
//!
//! # Example
//!
//! ```rust
//! use hbridge_fan::config::HBridgeFanConfig;
//! use hbridge_fan::DecayMode;
//!
//! let config = HBridgeFanConfig::new("ceiling fan")
//!     .with_decay_mode(DecayMode::Fast)
//!     .with_speed_count(4);
//!
//! assert!(config.validate().is_ok());
//! ```

use heapless::String as HString;

use crate::hbridge::DecayMode;

/// Maximum length for component name strings
pub const MAX_NAME_LEN: usize = 64;

/// Type alias for component name strings
pub type ShortString = HString<MAX_NAME_LEN>;

/// Create a ShortString from a &str, truncating if too long
pub fn short_string(s: &str) -> ShortString {
    let mut hs = ShortString::new();
    // Take only what fits
    let take = s.len().min(MAX_NAME_LEN);
    // Find valid UTF-8 boundary
    let valid_end = s
        .char_indices()
        .take_while(|(i, _)| *i < take)
        .last()
        .map(|(i, c)| i + c.len_utf8())
        .unwrap_or(0);
    let _ = hs.push_str(&s[..valid_end]);
    hs
}

/// Error produced when a configuration fails validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// `speed_count` was zero; at least one discrete speed step is required.
    #[error("speed_count must be at least 1")]
    ZeroSpeedCount,
}

/// H-bridge fan driver configuration.
///
/// Fixed at construction time; the driver never changes decay mode or
/// speed resolution at runtime.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HBridgeFanConfig {
    /// Component name, used in log output
    pub name: ShortString,
    /// PWM decay strategy for the off portion of each cycle
    pub decay_mode: DecayMode,
    /// Number of discrete non-zero speed steps
    pub speed_count: u32,
    /// Whether an oscillation output is wired externally.
    ///
    /// Only affects the advertised capability, never the duty-cycle
    /// computation.
    pub oscillation: bool,
}

impl HBridgeFanConfig {
    /// Creates a configuration with the given name and defaults
    /// (slow decay, 100 speed steps, no oscillation).
    pub fn new(name: &str) -> Self {
        Self {
            name: short_string(name),
            decay_mode: DecayMode::Slow,
            speed_count: 100,
            oscillation: false,
        }
    }

    /// Set the decay mode
    pub fn with_decay_mode(mut self, decay_mode: DecayMode) -> Self {
        self.decay_mode = decay_mode;
        self
    }

    /// Set the number of discrete speed steps
    pub fn with_speed_count(mut self, speed_count: u32) -> Self {
        self.speed_count = speed_count;
        self
    }

    /// Declare that an oscillation output is wired
    pub fn with_oscillation(mut self, oscillation: bool) -> Self {
        self.oscillation = oscillation;
        self
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ZeroSpeedCount`] if `speed_count` is zero.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.speed_count == 0 {
            return Err(ConfigError::ZeroSpeedCount);
        }
        Ok(())
    }
}

impl Default for HBridgeFanConfig {
    fn default() -> Self {
        Self::new("fan")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_string_fits() {
        let s = short_string("hello");
        assert_eq!(s.as_str(), "hello");
    }

    #[test]
    fn short_string_truncates() {
        let long = "x".repeat(100);
        let s = short_string(&long);
        assert_eq!(s.len(), MAX_NAME_LEN);
    }

    #[test]
    fn short_string_truncates_at_utf8_boundary() {
        // 'é' is 2 bytes, so 40 of them overflow 64 bytes mid-character
        let long = "é".repeat(40);
        let s = short_string(&long);
        assert!(s.len() <= MAX_NAME_LEN);
        assert!(s.as_str().chars().all(|c| c == 'é'));
    }

    #[test]
    fn config_defaults() {
        let config = HBridgeFanConfig::default();
        assert_eq!(config.name.as_str(), "fan");
        assert_eq!(config.decay_mode, DecayMode::Slow);
        assert_eq!(config.speed_count, 100);
        assert!(!config.oscillation);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn config_builder() {
        let config = HBridgeFanConfig::new("exhaust")
            .with_decay_mode(DecayMode::Fast)
            .with_speed_count(3)
            .with_oscillation(true);

        assert_eq!(config.name.as_str(), "exhaust");
        assert_eq!(config.decay_mode, DecayMode::Fast);
        assert_eq!(config.speed_count, 3);
        assert!(config.oscillation);
    }

    #[test]
    fn config_rejects_zero_speed_count() {
        let config = HBridgeFanConfig::new("bad").with_speed_count(0);
        assert_eq!(config.validate(), Err(ConfigError::ZeroSpeedCount));
    }

    #[test]
    fn config_accepts_single_speed() {
        let config = HBridgeFanConfig::new("single").with_speed_count(1);
        assert!(config.validate().is_ok());
    }
}
