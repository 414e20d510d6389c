//! ESP-IDF LEDC implementation of the PWM pin trait.
//!
//! Each H-bridge leg maps to one LEDC channel. Both channels should
//! share a timer so the legs switch at the same frequency.
//!
//! # Hardware Setup
//!
//! Typical wiring for a DRV8871-style driver:
//! - GPIO2 → IN1 (`pin_a`)
//! - GPIO3 → IN2 (`pin_b`)

use esp_idf_hal::ledc::LedcDriver;

use crate::traits::PwmPin;

/// A PWM output pin backed by an ESP32 LEDC channel.
///
/// Converts the normalized duty cycle into hardware ticks for the
/// channel's configured resolution.
///
/// # Example
///
/// ```ignore
/// use esp_idf_hal::ledc::{config::TimerConfig, LedcDriver, LedcTimerDriver, Resolution};
/// use esp_idf_hal::prelude::*;
/// use hbridge_fan::hal::esp32::Esp32PwmPin;
/// use hbridge_fan::{HBridgeFan, HBridgeFanConfig};
///
/// let peripherals = Peripherals::take()?;
/// let timer_config = TimerConfig::default()
///     .frequency(20.kHz().into())
///     .resolution(Resolution::Bits10);
/// let timer = LedcTimerDriver::new(peripherals.ledc.timer0, &timer_config)?;
///
/// let pin_a = Esp32PwmPin::new(LedcDriver::new(
///     peripherals.ledc.channel0,
///     &timer,
///     peripherals.pins.gpio2,
/// )?);
/// let pin_b = Esp32PwmPin::new(LedcDriver::new(
///     peripherals.ledc.channel1,
///     &timer,
///     peripherals.pins.gpio3,
/// )?);
///
/// let fan = HBridgeFan::new(HBridgeFanConfig::new("fan"), pin_a, pin_b)?;
/// ```
pub struct Esp32PwmPin<'d> {
    driver: LedcDriver<'d>,
    max_duty: u32,
}

impl<'d> Esp32PwmPin<'d> {
    /// Wraps a configured LEDC channel.
    pub fn new(driver: LedcDriver<'d>) -> Self {
        let max_duty = driver.get_max_duty();
        Self { driver, max_duty }
    }
}

impl PwmPin for Esp32PwmPin<'_> {
    type Error = esp_idf_hal::sys::EspError;

    fn set_level(&mut self, duty: f32) -> Result<(), Self::Error> {
        let ticks = (duty.clamp(0.0, 1.0) * self.max_duty as f32) as u32;
        self.driver.set_duty(ticks)
    }
}
