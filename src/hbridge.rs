//! H-bridge fan driver: logical fan state to two PWM duty cycles.
//!
//! This module provides [`HBridgeFan`], the driver that translates the
//! logical fan state (on/off, speed step, direction) into duty cycles on
//! the two H-bridge legs, plus a braking routine.
//!
//! # Overview
//!
//! The driver:
//! - Owns the two [`PwmPin`] handles for its entire lifetime
//! - Owns a [`Fan`] holding the logical state and change listeners
//! - Recomputes both duty cycles on [`update`](HBridgeFan::update) ticks,
//!   but only when a state call has been applied since the last tick
//! - Short-brakes the motor on demand with [`brake`](HBridgeFan::brake)
//!
//! # Example
//!
//! ```rust
//! use hbridge_fan::{DecayMode, HBridgeFan, HBridgeFanConfig};
//! use hbridge_fan::hal::MockPwmPin;
//!
//! let config = HBridgeFanConfig::new("bench fan")
//!     .with_decay_mode(DecayMode::Slow)
//!     .with_speed_count(10);
//! let mut fan = HBridgeFan::new(config, MockPwmPin::new(), MockPwmPin::new()).unwrap();
//!
//! fan.make_call().set_state(true).set_speed(5).perform();
//!
//! // Host loop - call update() every tick
//! fan.update().unwrap();
//!
//! // Slow decay forward at f = 0.5: a = 1 - f, b = 1.0
//! assert_eq!(fan.pin_a().level, 0.5);
//! assert_eq!(fan.pin_b().level, 1.0);
//! ```
//!
//! # Decay Modes
//!
//! During the off portion of each PWM cycle the motor current has to go
//! somewhere. Slow decay keeps one leg fully high and PWMs the
//! complementary leg low-side; fast decay grounds one leg and PWMs the
//! other directly. The choice trades current ripple against braking
//! torque and is fixed at configuration time.

use log::{debug, info};

use crate::config::{ConfigError, HBridgeFanConfig, ShortString};
use crate::fan::{Fan, FanDirection, FanState, FanStateCall, FanTraits};
use crate::traits::PwmPin;

/// H-bridge PWM decay strategy.
///
/// Determines which transistor pair stays fully on versus switches with
/// the duty signal. Defaults to [`Slow`](Self::Slow).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum DecayMode {
    /// One leg held fully high, the complementary leg PWMed low-side.
    #[default]
    Slow,
    /// One leg grounded, the other PWMed directly.
    Fast,
}

impl DecayMode {
    /// Returns the decay mode as a lowercase string.
    #[inline]
    pub const fn as_str(&self) -> &'static str {
        match self {
            DecayMode::Slow => "slow",
            DecayMode::Fast => "fast",
        }
    }
}

/// Duty cycles for the two H-bridge legs at an effective speed fraction.
///
/// `f` is the effective speed in `[0.0, 1.0]`; `0.0` means off. This is
/// the full decision table over {off, direction, decay mode}: stateless,
/// no hysteresis, recomputed from scratch every tick.
///
/// # Examples
///
/// ```
/// use hbridge_fan::{output_levels, DecayMode, FanDirection};
///
/// // Off always idles both legs
/// assert_eq!(output_levels(0.0, FanDirection::Forward, DecayMode::Fast), (0.0, 0.0));
///
/// // Forward, slow decay: PWM the complementary leg against a high side
/// assert_eq!(output_levels(0.5, FanDirection::Forward, DecayMode::Slow), (0.5, 1.0));
/// ```
pub fn output_levels(f: f32, direction: FanDirection, decay_mode: DecayMode) -> (f32, f32) {
    if f == 0.0 {
        // off means idle, regardless of decay mode or direction
        return (0.0, 0.0);
    }
    match (direction, decay_mode) {
        (FanDirection::Forward, DecayMode::Slow) => (1.0 - f, 1.0),
        (FanDirection::Forward, DecayMode::Fast) => (0.0, f),
        (FanDirection::Reverse, DecayMode::Slow) => (1.0, 1.0 - f),
        (FanDirection::Reverse, DecayMode::Fast) => (f, 0.0),
    }
}

/// H-bridge fan driver.
///
/// Owns two [`PwmPin`] legs and the logical [`Fan`] state, and keeps the
/// physical duty cycles in sync with the most recent applied state call.
///
/// # Type Parameter
///
/// - `P`: The PWM pin implementation ([`PwmPin`] trait); both legs use
///   the same implementation, typically two channels of one peripheral.
///
/// # Scheduling
///
/// The host event loop calls [`update`](Self::update) periodically. All
/// operations run on that one logical thread; nothing here blocks,
/// suspends, or spawns work.
pub struct HBridgeFan<P: PwmPin> {
    name: ShortString,
    fan: Fan,
    pin_a: P,
    pin_b: P,
    decay_mode: DecayMode,
    speed_count: u32,
}

impl<P: PwmPin> HBridgeFan<P> {
    /// Creates a driver from a validated configuration and the two legs.
    ///
    /// Construction performs the one-time capability declaration:
    /// direction and speed are always advertised, oscillation only when
    /// the config says an oscillation output is wired.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the configuration fails validation
    /// (e.g. `speed_count == 0`).
    pub fn new(config: HBridgeFanConfig, pin_a: P, pin_b: P) -> Result<Self, ConfigError> {
        config.validate()?;
        let traits = FanTraits::new(config.oscillation, true, true, config.speed_count);
        Ok(Self {
            fan: Fan::new(&config.name, traits),
            name: config.name,
            pin_a,
            pin_b,
            decay_mode: config.decay_mode,
            speed_count: config.speed_count,
        })
    }

    /// Begin a logical state change; apply it with `perform()`.
    pub fn make_call(&mut self) -> FanStateCall<'_> {
        self.fan.make_call()
    }

    /// Current logical state.
    #[inline]
    pub fn state(&self) -> &FanState {
        self.fan.state()
    }

    /// The logical fan (capabilities, state, listener registration).
    #[inline]
    pub fn fan(&self) -> &Fan {
        &self.fan
    }

    /// Mutable access to the logical fan.
    #[inline]
    pub fn fan_mut(&mut self) -> &mut Fan {
        &mut self.fan
    }

    /// The configured decay mode.
    #[inline]
    pub fn decay_mode(&self) -> DecayMode {
        self.decay_mode
    }

    /// Pin A, the first H-bridge leg.
    #[inline]
    pub fn pin_a(&self) -> &P {
        &self.pin_a
    }

    /// Pin B, the second H-bridge leg.
    #[inline]
    pub fn pin_b(&self) -> &P {
        &self.pin_b
    }

    /// Periodic tick - call from the host scheduler loop.
    ///
    /// No-op unless a state call has been applied since the last tick.
    /// Otherwise recomputes both duty cycles from the current logical
    /// state and writes them out. The pending flag is consumed even when
    /// the fan is off.
    pub fn update(&mut self) -> Result<(), P::Error> {
        if !self.fan.take_pending_update() {
            return Ok(());
        }

        let state = *self.fan.state();
        let f = if state.on {
            // speed is clamped to [1, speed_count] by the state call,
            // so f stays in (0.0, 1.0]
            state.speed as f32 / self.speed_count as f32
        } else {
            0.0
        };

        let (a, b) = output_levels(f, state.direction, self.decay_mode);
        self.pin_a.set_level(a)?;
        self.pin_b.set_level(b)?;
        debug!("'{}' - Setting speed: a: {:.2}, b: {:.2}", self.name, a, b);
        Ok(())
    }

    /// Short-brake the motor.
    ///
    /// Drives both legs fully high and forces the logical state to off
    /// through the state-call interface, so listeners fire and the next
    /// tick quiesces the outputs. Ignores decay mode and direction.
    pub fn brake(&mut self) -> Result<(), P::Error> {
        self.pin_a.set_level(1.0)?;
        self.pin_b.set_level(1.0)?;
        debug!("'{}' - Braking", self.name);
        self.fan.make_call().set_state(false).perform();
        Ok(())
    }

    /// Log the driver configuration at info level.
    pub fn dump_config(&self) {
        info!("Fan '{}':", self.name);
        if self.fan.traits().supports_oscillation() {
            info!("  Oscillation: YES");
        }
        if self.fan.traits().supports_direction() {
            info!("  Direction: YES");
        }
        info!("  Speed count: {}", self.speed_count);
        info!("  Decay Mode: {}", self.decay_mode.as_str());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decay_mode_default_is_slow() {
        assert_eq!(DecayMode::default(), DecayMode::Slow);
    }

    #[test]
    fn decay_mode_as_str() {
        assert_eq!(DecayMode::Slow.as_str(), "slow");
        assert_eq!(DecayMode::Fast.as_str(), "fast");
    }

    // =========================================================================
    // output_levels decision table
    // =========================================================================

    #[test]
    fn off_idles_both_legs_in_every_mode() {
        for direction in [FanDirection::Forward, FanDirection::Reverse] {
            for decay in [DecayMode::Slow, DecayMode::Fast] {
                assert_eq!(output_levels(0.0, direction, decay), (0.0, 0.0));
            }
        }
    }

    #[test]
    fn forward_slow_decay() {
        let (a, b) = output_levels(0.5, FanDirection::Forward, DecayMode::Slow);
        assert_eq!(a, 0.5);
        assert_eq!(b, 1.0);
    }

    #[test]
    fn forward_fast_decay() {
        let (a, b) = output_levels(0.5, FanDirection::Forward, DecayMode::Fast);
        assert_eq!(a, 0.0);
        assert_eq!(b, 0.5);
    }

    #[test]
    fn reverse_is_mirror_of_forward() {
        for decay in [DecayMode::Slow, DecayMode::Fast] {
            for f in [0.1, 0.25, 0.5, 0.75, 1.0] {
                let (fa, fb) = output_levels(f, FanDirection::Forward, decay);
                let (ra, rb) = output_levels(f, FanDirection::Reverse, decay);
                assert_eq!((ra, rb), (fb, fa), "f={f}, decay={decay:?}");
            }
        }
    }

    #[test]
    fn full_speed_levels() {
        assert_eq!(
            output_levels(1.0, FanDirection::Forward, DecayMode::Slow),
            (0.0, 1.0)
        );
        assert_eq!(
            output_levels(1.0, FanDirection::Forward, DecayMode::Fast),
            (0.0, 1.0)
        );
        assert_eq!(
            output_levels(1.0, FanDirection::Reverse, DecayMode::Slow),
            (1.0, 0.0)
        );
        assert_eq!(
            output_levels(1.0, FanDirection::Reverse, DecayMode::Fast),
            (1.0, 0.0)
        );
    }

    #[test]
    fn levels_stay_normalized_over_speed_range() {
        // f = speed / speed_count stays in (0, 1] for valid speeds, and
        // the table never emits a duty outside [0, 1]
        let speed_count = 10u32;
        for speed in 1..=speed_count {
            let f = speed as f32 / speed_count as f32;
            assert!(f > 0.0 && f <= 1.0);
            for direction in [FanDirection::Forward, FanDirection::Reverse] {
                for decay in [DecayMode::Slow, DecayMode::Fast] {
                    let (a, b) = output_levels(f, direction, decay);
                    assert!((0.0..=1.0).contains(&a));
                    assert!((0.0..=1.0).contains(&b));
                }
            }
        }
    }
}
