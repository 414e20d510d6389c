//! Text sensor with a filter chain applied before publication.
//!
//! Raw string readings pass through an ordered sequence of
//! [`TextFilter`]s before reaching subscribers. Each filter either
//! forwards a (possibly transformed) value to the next filter or drops
//! it, stopping the chain for that reading. Dropping a value is normal
//! control flow, not an error; nothing downstream observes it.
//!
//! Filters are an owned `Vec` of tagged variants held by the sensor, so
//! iteration replaces pointer chasing and the chain cannot form a cycle.
//!
//! # Example
//!
//! ```rust
//! use hbridge_fan::text_sensor::{TextFilter, TextSensor};
//!
//! let mut sensor = TextSensor::new("firmware version");
//! sensor.add_filter(TextFilter::ToUpper);
//! sensor.add_filter(TextFilter::lambda(|v| {
//!     // drop readings the device emits while still booting
//!     if v == "BOOT" {
//!         None
//!     } else {
//!         Some(v)
//!     }
//! }));
//!
//! sensor.publish_raw_state("boot".into());
//! assert_eq!(sensor.state(), None); // dropped by the lambda
//!
//! sensor.publish_raw_state("v1.2.3".into());
//! assert_eq!(sensor.state(), Some("V1.2.3"));
//! ```

extern crate alloc;

use alloc::boxed::Box;
use alloc::string::String;
use alloc::vec::Vec;

use log::debug;

use crate::config::{short_string, ShortString};

/// A caller-supplied string transformation.
///
/// Return `Some` to forward the (possibly modified) value down the
/// chain, `None` to drop it.
pub type LambdaFilterFn = Box<dyn FnMut(String) -> Option<String>>;

/// A value transformer in a text sensor's filter chain.
///
/// Kept purposefully simple; anything more elaborate belongs in the
/// host system consuming the sensor.
pub enum TextFilter {
    /// Identity; always forwards the unmodified input.
    PassThrough,
    /// Applies a caller-supplied mapping; `None` stops the chain.
    Lambda(LambdaFilterFn),
    /// Converts the input to uppercase; always forwards.
    ToUpper,
}

impl TextFilter {
    /// Convenience constructor for a [`Lambda`](Self::Lambda) filter.
    pub fn lambda(f: impl FnMut(String) -> Option<String> + 'static) -> Self {
        TextFilter::Lambda(Box::new(f))
    }

    /// Process one value.
    ///
    /// Returns the value to forward to the next filter, or `None` to
    /// stop the chain for this reading.
    pub fn apply(&mut self, value: String) -> Option<String> {
        match self {
            TextFilter::PassThrough => Some(value),
            TextFilter::Lambda(f) => f(value),
            TextFilter::ToUpper => Some(value.to_uppercase()),
        }
    }
}

impl core::fmt::Debug for TextFilter {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            TextFilter::PassThrough => f.write_str("PassThrough"),
            TextFilter::Lambda(_) => f.write_str("Lambda"),
            TextFilter::ToUpper => f.write_str("ToUpper"),
        }
    }
}

/// Callback invoked with every published value.
pub type TextListener = Box<dyn FnMut(&str)>;

/// A string-valued sensor with a filter chain and subscribers.
///
/// Raw values go in via [`publish_raw_state`](Self::publish_raw_state);
/// whatever survives the filter chain is recorded as the current state
/// and handed to every subscriber.
pub struct TextSensor {
    name: ShortString,
    filters: Vec<TextFilter>,
    state: Option<String>,
    listeners: Vec<TextListener>,
}

impl TextSensor {
    /// Creates a sensor with no filters and no published state.
    pub fn new(name: &str) -> Self {
        Self {
            name: short_string(name),
            filters: Vec::new(),
            state: None,
            listeners: Vec::new(),
        }
    }

    /// The sensor's configured name.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Append a filter to the end of the chain.
    pub fn add_filter(&mut self, filter: TextFilter) {
        self.filters.push(filter);
    }

    /// Replace the whole filter chain.
    ///
    /// Safe to call any number of times; rebuilding the chain does not
    /// disturb the published state.
    pub fn set_filters(&mut self, filters: Vec<TextFilter>) {
        self.filters = filters;
    }

    /// Number of filters in the chain.
    #[inline]
    pub fn filter_count(&self) -> usize {
        self.filters.len()
    }

    /// Register a subscriber invoked with every published value.
    pub fn add_on_state_callback(&mut self, listener: TextListener) {
        self.listeners.push(listener);
    }

    /// The most recently published value, if any.
    #[inline]
    pub fn state(&self) -> Option<&str> {
        self.state.as_deref()
    }

    /// Feed a raw reading through the filter chain.
    ///
    /// Runs every filter in order. If one returns `None` the value is
    /// dropped silently: no later filter runs and nothing is published.
    pub fn publish_raw_state(&mut self, value: String) {
        let mut value = value;
        for filter in &mut self.filters {
            match filter.apply(value) {
                Some(next) => value = next,
                None => {
                    debug!("'{}' - Filter dropped value", self.name);
                    return;
                }
            }
        }
        self.publish_state(value);
    }

    /// Publish a value directly, bypassing the filter chain.
    pub fn publish_state(&mut self, value: String) {
        debug!("'{}' - Got value '{}'", self.name, value);
        self.state = Some(value);
        let state = self.state.as_deref().unwrap_or_default();
        for listener in &mut self.listeners {
            listener(state);
        }
    }
}

impl core::fmt::Debug for TextSensor {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("TextSensor")
            .field("name", &self.name.as_str())
            .field("filters", &self.filters)
            .field("state", &self.state)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::rc::Rc;
    use alloc::string::ToString;
    use core::cell::RefCell;

    #[test]
    fn pass_through_is_identity() {
        let mut filter = TextFilter::PassThrough;
        for s in ["", "hello", "MiXeD", "äöü", "with spaces"] {
            assert_eq!(filter.apply(s.to_string()), Some(s.to_string()));
        }
    }

    #[test]
    fn to_upper_uppercases() {
        let mut filter = TextFilter::ToUpper;
        assert_eq!(filter.apply("hello".into()), Some("HELLO".to_string()));
        assert_eq!(filter.apply("Grüße".into()), Some("GRÜSSE".to_string()));
    }

    #[test]
    fn to_upper_is_idempotent() {
        let mut filter = TextFilter::ToUpper;
        let once = filter.apply("Hello World".into()).unwrap();
        let twice = filter.apply(once.clone()).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn lambda_can_transform() {
        let mut filter = TextFilter::lambda(|v| Some(v + "!"));
        assert_eq!(filter.apply("hi".into()), Some("hi!".to_string()));
    }

    #[test]
    fn lambda_can_drop() {
        let mut filter = TextFilter::lambda(|_| None);
        assert_eq!(filter.apply("anything".into()), None);
    }

    #[test]
    fn sensor_without_filters_publishes_raw() {
        let mut sensor = TextSensor::new("plain");
        sensor.publish_raw_state("value".into());
        assert_eq!(sensor.state(), Some("value"));
    }

    #[test]
    fn filters_run_in_order() {
        let mut sensor = TextSensor::new("ordered");
        sensor.add_filter(TextFilter::lambda(|v| Some(v + "-a")));
        sensor.add_filter(TextFilter::lambda(|v| Some(v + "-b")));

        sensor.publish_raw_state("x".into());
        assert_eq!(sensor.state(), Some("x-a-b"));
    }

    #[test]
    fn dropping_filter_halts_chain() {
        let downstream_runs = Rc::new(RefCell::new(0));
        let counter = downstream_runs.clone();

        let mut sensor = TextSensor::new("guarded");
        sensor.add_filter(TextFilter::lambda(|_| None));
        sensor.add_filter(TextFilter::lambda(move |v| {
            *counter.borrow_mut() += 1;
            Some(v)
        }));

        sensor.publish_raw_state("dropped".into());

        assert_eq!(sensor.state(), None);
        assert_eq!(*downstream_runs.borrow(), 0);
    }

    #[test]
    fn dropped_value_does_not_reach_subscribers() {
        let published = Rc::new(RefCell::new(Vec::new()));
        let sink = published.clone();

        let mut sensor = TextSensor::new("quiet");
        sensor.add_filter(TextFilter::lambda(|_| None));
        sensor.add_on_state_callback(Box::new(move |v| {
            sink.borrow_mut().push(v.to_string());
        }));

        sensor.publish_raw_state("nope".into());
        assert!(published.borrow().is_empty());
    }

    #[test]
    fn subscribers_see_filtered_value() {
        let published = Rc::new(RefCell::new(Vec::new()));
        let sink = published.clone();

        let mut sensor = TextSensor::new("loud");
        sensor.add_filter(TextFilter::ToUpper);
        sensor.add_on_state_callback(Box::new(move |v| {
            sink.borrow_mut().push(v.to_string());
        }));

        sensor.publish_raw_state("ok".into());
        assert_eq!(published.borrow().as_slice(), ["OK".to_string()]);
    }

    #[test]
    fn publish_state_bypasses_filters() {
        let mut sensor = TextSensor::new("direct");
        sensor.add_filter(TextFilter::lambda(|_| None));

        sensor.publish_state("forced".into());
        assert_eq!(sensor.state(), Some("forced"));
    }

    #[test]
    fn set_filters_rebuilds_chain() {
        let mut sensor = TextSensor::new("rebuilt");
        sensor.add_filter(TextFilter::lambda(|_| None));
        sensor.publish_raw_state("first".into());
        assert_eq!(sensor.state(), None);

        // Rebuilding is idempotent and replaces the old chain entirely
        sensor.set_filters(alloc::vec![TextFilter::PassThrough]);
        sensor.set_filters(alloc::vec![TextFilter::PassThrough]);
        assert_eq!(sensor.filter_count(), 1);

        sensor.publish_raw_state("second".into());
        assert_eq!(sensor.state(), Some("second"));
    }
}
