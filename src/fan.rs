//! Logical fan state, capabilities, and the state-call builder.
//!
//! This module provides [`Fan`], the state holder the H-bridge driver is
//! built around. It owns the logical on/off, speed, and direction values,
//! the advertised [`FanTraits`], and a list of on-state-change listeners.
//!
//! # State Changes
//!
//! All state mutation goes through the [`FanStateCall`] builder so that a
//! change to several fields is applied atomically and observers see only
//! the final state:
//!
//! ```rust
//! use hbridge_fan::fan::{Fan, FanDirection, FanTraits};
//!
//! let mut fan = Fan::new("bench fan", FanTraits::new(false, true, true, 4));
//!
//! fan.make_call()
//!     .set_state(true)
//!     .set_speed(3)
//!     .set_direction(FanDirection::Reverse)
//!     .perform();
//!
//! assert!(fan.state().on);
//! assert_eq!(fan.state().speed, 3);
//! assert_eq!(fan.state().direction, FanDirection::Reverse);
//! ```
//!
//! Every `perform()` marks the fan as having a pending update; the driver
//! consumes that flag on its next tick. Both sides run on the same host
//! loop, so a change is never missed and never observed twice.

extern crate alloc;

use alloc::boxed::Box;
use alloc::vec::Vec;

use crate::config::{short_string, ShortString};

/// Rotation direction of the fan.
///
/// Controls which way current flows through the H-bridge. Defaults to
/// [`Forward`](Self::Forward).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum FanDirection {
    /// Normal rotation (positive polarity).
    #[default]
    Forward,
    /// Reversed rotation (negative polarity).
    Reverse,
}

impl FanDirection {
    /// Returns the direction as a lowercase string.
    ///
    /// # Examples
    ///
    /// ```
    /// use hbridge_fan::FanDirection;
    ///
    /// assert_eq!(FanDirection::Forward.as_str(), "forward");
    /// assert_eq!(FanDirection::Reverse.as_str(), "reverse");
    /// ```
    #[inline]
    pub const fn as_str(&self) -> &'static str {
        match self {
            FanDirection::Forward => "forward",
            FanDirection::Reverse => "reverse",
        }
    }

    /// Parse a direction from text input.
    ///
    /// Input is trimmed and case-insensitive. Accepts full names,
    /// abbreviations, and `"1"` / `"-1"`.
    ///
    /// # Examples
    ///
    /// ```
    /// use hbridge_fan::FanDirection;
    ///
    /// assert_eq!(FanDirection::from_text("forward"), Some(FanDirection::Forward));
    /// assert_eq!(FanDirection::from_text("  REV "), Some(FanDirection::Reverse));
    /// assert_eq!(FanDirection::from_text("sideways"), None);
    /// ```
    pub fn from_text(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "forward" | "fwd" | "1" => Some(FanDirection::Forward),
            "reverse" | "rev" | "-1" => Some(FanDirection::Reverse),
            _ => None,
        }
    }
}

/// Snapshot of the logical fan state.
///
/// `speed` is a discrete step in `[1, speed_count]`; it is meaningful
/// even while the fan is off so that turning the fan back on restores
/// the previous speed.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FanState {
    /// Whether the fan is running.
    pub on: bool,
    /// Discrete speed step, `1` to the advertised speed count.
    pub speed: u32,
    /// Rotation direction.
    pub direction: FanDirection,
}

impl Default for FanState {
    fn default() -> Self {
        Self {
            on: false,
            speed: 1,
            direction: FanDirection::Forward,
        }
    }
}

/// Capabilities a fan advertises to the host.
///
/// Declared once at construction time. The H-bridge driver always
/// advertises direction and speed support; oscillation only when an
/// oscillation output is wired externally.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FanTraits {
    oscillation: bool,
    direction: bool,
    speed: bool,
    speed_count: u32,
}

impl FanTraits {
    /// Creates a new capability declaration.
    pub const fn new(oscillation: bool, direction: bool, speed: bool, speed_count: u32) -> Self {
        Self {
            oscillation,
            direction,
            speed,
            speed_count,
        }
    }

    /// Whether oscillation is supported.
    #[inline]
    pub const fn supports_oscillation(&self) -> bool {
        self.oscillation
    }

    /// Whether direction control is supported.
    #[inline]
    pub const fn supports_direction(&self) -> bool {
        self.direction
    }

    /// Whether discrete speed steps are supported.
    #[inline]
    pub const fn supports_speed(&self) -> bool {
        self.speed
    }

    /// Number of discrete non-zero speed steps.
    #[inline]
    pub const fn speed_count(&self) -> u32 {
        self.speed_count
    }
}

/// Callback invoked after every applied state call.
pub type StateListener = Box<dyn FnMut(&FanState)>;

/// Logical fan: name, capabilities, state, and change listeners.
///
/// The fan does not touch hardware itself; a driver such as
/// [`HBridgeFan`](crate::HBridgeFan) owns a `Fan` and translates its
/// state into pin levels.
pub struct Fan {
    name: ShortString,
    traits: FanTraits,
    state: FanState,
    pending_update: bool,
    listeners: Vec<StateListener>,
}

impl Fan {
    /// Creates a fan with the given name and capability declaration.
    pub fn new(name: &str, traits: FanTraits) -> Self {
        Self {
            name: short_string(name),
            traits,
            state: FanState::default(),
            pending_update: false,
            listeners: Vec::new(),
        }
    }

    /// The fan's configured name.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The advertised capabilities.
    #[inline]
    pub fn traits(&self) -> &FanTraits {
        &self.traits
    }

    /// Current logical state.
    #[inline]
    pub fn state(&self) -> &FanState {
        &self.state
    }

    /// Begin a state change.
    ///
    /// Nothing happens until [`FanStateCall::perform`] is called.
    pub fn make_call(&mut self) -> FanStateCall<'_> {
        FanStateCall {
            fan: self,
            on: None,
            speed: None,
            direction: None,
            toggle: false,
        }
    }

    /// Register a listener invoked after every applied state call.
    ///
    /// Listeners fire even when a call leaves the state unchanged in net
    /// effect; the duty-cycle recompute this forces is idempotent.
    pub fn add_on_state_change(&mut self, listener: StateListener) {
        self.listeners.push(listener);
    }

    /// Whether a state call has been applied since the last
    /// [`take_pending_update`](Self::take_pending_update).
    #[inline]
    pub fn has_pending_update(&self) -> bool {
        self.pending_update
    }

    /// Consume the pending-update flag.
    ///
    /// Returns `true` exactly once per applied state call batch. The
    /// driver calls this at tick time; no pin write happens while this
    /// returns `false`.
    pub fn take_pending_update(&mut self) -> bool {
        let pending = self.pending_update;
        self.pending_update = false;
        pending
    }

    fn apply_call(&mut self, on: Option<bool>, speed: Option<u32>, dir: Option<FanDirection>, toggle: bool) {
        if toggle {
            self.state.on = !self.state.on;
        }
        if let Some(on) = on {
            self.state.on = on;
        }
        if let Some(speed) = speed {
            self.state.speed = speed.clamp(1, self.traits.speed_count.max(1));
        }
        if let Some(dir) = dir {
            self.state.direction = dir;
        }
        self.pending_update = true;

        let state = self.state;
        for listener in &mut self.listeners {
            listener(&state);
        }
    }
}

impl core::fmt::Debug for Fan {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Fan")
            .field("name", &self.name.as_str())
            .field("traits", &self.traits)
            .field("state", &self.state)
            .field("pending_update", &self.pending_update)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

/// Builder for an atomic fan state change.
///
/// Obtained from [`Fan::make_call`]. Unset fields keep their current
/// values. [`perform`](Self::perform) applies the change, marks the fan
/// as pending an update, and notifies listeners.
#[must_use = "a state call does nothing until perform() is called"]
pub struct FanStateCall<'a> {
    fan: &'a mut Fan,
    on: Option<bool>,
    speed: Option<u32>,
    direction: Option<FanDirection>,
    toggle: bool,
}

impl FanStateCall<'_> {
    /// Request the fan on or off.
    pub fn set_state(mut self, on: bool) -> Self {
        self.on = Some(on);
        self
    }

    /// Request a discrete speed step.
    ///
    /// Clamped into `[1, speed_count]` when applied.
    pub fn set_speed(mut self, speed: u32) -> Self {
        self.speed = Some(speed);
        self
    }

    /// Request a rotation direction.
    pub fn set_direction(mut self, direction: FanDirection) -> Self {
        self.direction = Some(direction);
        self
    }

    /// Request the opposite of the current on/off state.
    ///
    /// An explicit `set_state` on the same call wins over the toggle.
    pub fn toggle(mut self) -> Self {
        self.toggle = true;
        self
    }

    /// Apply the requested changes and notify listeners.
    pub fn perform(self) {
        let Self {
            fan,
            on,
            speed,
            direction,
            toggle,
        } = self;
        fan.apply_call(on, speed, direction, toggle);
    }
}
