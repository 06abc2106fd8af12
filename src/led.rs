//! LED driver over a [`Gpio`] implementation.
//!
//! A [`Led`] is a pin plus polarity; it holds no state of its own and reads
//! the pin back when it needs to know whether it is lit. [`LedBank`] is the
//! fixed table of LEDs a program drives.

use heapless::Vec;

use crate::config::{ConfigError, MAX_LEDS};
use crate::gpio::{Gpio, Pin};

/// A single LED on a GPIO pin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Led {
    pin: Pin,
    active_low: bool,
}

impl Led {
    /// Creates an LED on `port`/`bit`.
    ///
    /// # Arguments
    /// * `port` - Port number, 0 for port A
    /// * `bit` - Bit position within the port
    /// * `active_low` - true if driving the pin low lights the LED
    ///
    /// # Errors
    /// * `InvalidPinBit` - `bit` is not in `0..=15`
    pub const fn new(port: u8, bit: u8, active_low: bool) -> Result<Self, ConfigError> {
        match Pin::new(port, bit) {
            Ok(pin) => Ok(Self::from_pin(pin, active_low)),
            Err(e) => Err(e),
        }
    }

    /// Creates an LED on an existing pin.
    pub const fn from_pin(pin: Pin, active_low: bool) -> Self {
        Self { pin, active_low }
    }

    pub fn pin(&self) -> Pin {
        self.pin
    }

    pub fn is_active_low(&self) -> bool {
        self.active_low
    }

    /// Configures the pin as an output and turns the LED off.
    pub fn power_up<G: Gpio>(&self, gpio: &G) {
        gpio.configure_as_output(self.pin);
        self.turn_off(gpio);
    }

    pub fn turn_on<G: Gpio>(&self, gpio: &G) {
        if self.active_low {
            gpio.clear_pin(self.pin);
        } else {
            gpio.set_pin(self.pin);
        }
    }

    pub fn turn_off<G: Gpio>(&self, gpio: &G) {
        if self.active_low {
            gpio.set_pin(self.pin);
        } else {
            gpio.clear_pin(self.pin);
        }
    }

    /// Inverts the pin level.
    pub fn toggle<G: Gpio>(&self, gpio: &G) {
        if gpio.read_pin(self.pin) {
            gpio.clear_pin(self.pin);
        } else {
            gpio.set_pin(self.pin);
        }
    }

    /// Returns true if the pin level lights the LED.
    pub fn is_on<G: Gpio>(&self, gpio: &G) -> bool {
        gpio.read_pin(self.pin) != self.active_low
    }
}

/// A fixed, non-empty table of LEDs.
#[derive(Debug, Clone)]
pub struct LedBank {
    leds: Vec<Led, MAX_LEDS>,
}

impl LedBank {
    /// Creates a bank from a static LED table.
    ///
    /// # Errors
    /// * `EmptyLedBank` - `leds` is empty
    /// * `TooManyLeds` - `leds` has more than [`MAX_LEDS`] entries
    pub fn new(leds: &[Led]) -> Result<Self, ConfigError> {
        if leds.is_empty() {
            return Err(ConfigError::EmptyLedBank);
        }

        let leds = Vec::from_slice(leds).map_err(|_| ConfigError::TooManyLeds {
            count: leds.len(),
            capacity: MAX_LEDS,
        })?;

        Ok(Self { leds })
    }

    /// Number of LEDs, never zero.
    pub fn len(&self) -> usize {
        self.leds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.leds.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Led> {
        self.leds.get(index)
    }

    pub fn iter(&self) -> core::slice::Iter<'_, Led> {
        self.leds.iter()
    }

    pub fn as_slice(&self) -> &[Led] {
        &self.leds
    }

    /// Powers up every LED, leaving them all off.
    pub fn power_up_all<G: Gpio>(&self, gpio: &G) {
        self.leds.iter().for_each(|led| led.power_up(gpio));
    }

    pub fn turn_on_all<G: Gpio>(&self, gpio: &G) {
        self.leds.iter().for_each(|led| led.turn_on(gpio));
    }

    pub fn turn_off_all<G: Gpio>(&self, gpio: &G) {
        self.leds.iter().for_each(|led| led.turn_off(gpio));
    }

    /// Advances the LEDs as a binary counter, LED 0 being the least significant bit.
    ///
    /// Toggles LEDs from index 0 upward and stops at the first one that ends up
    /// lit. All-on rolls over to all-off.
    pub fn binary_increment<G: Gpio>(&self, gpio: &G) {
        for led in self.leds.iter() {
            led.toggle(gpio);
            if led.is_on(gpio) {
                break;
            }
        }
    }

    /// Lit LEDs as a bitmask, bit `i` for LED `i`.
    pub fn pattern<G: Gpio>(&self, gpio: &G) -> u16 {
        self.leds
            .iter()
            .enumerate()
            .filter(|(_, led)| led.is_on(gpio))
            .fold(0, |acc, (i, _)| acc | (1 << i))
    }
}

impl<'a> IntoIterator for &'a LedBank {
    type Item = &'a Led;
    type IntoIter = core::slice::Iter<'a, Led>;

    fn into_iter(self) -> Self::IntoIter {
        self.leds.iter()
    }
}
