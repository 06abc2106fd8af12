//! Peripheral seams: GPIO pins and the external interrupt controller.
//!
//! The core only needs a handful of capabilities from the hardware, captured
//! by [`Gpio`] and [`InterruptController`]. Methods take `&self` because
//! GPIO set/reset and EXTI pending registers are single-write operations
//! shared by the main loop and interrupt handlers.

use crate::config::ConfigError;

/// A GPIO pin: port number (0 = port A) and bit position within the port.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Pin {
    port: u8,
    bit: u8,
}

impl Pin {
    /// Creates a pin.
    ///
    /// # Errors
    /// * `InvalidPinBit` - `bit` is not in `0..=15`
    pub const fn new(port: u8, bit: u8) -> Result<Self, ConfigError> {
        if bit > 15 {
            return Err(ConfigError::InvalidPinBit(bit));
        }
        Ok(Self { port, bit })
    }

    /// Port number, 0 for port A.
    #[inline]
    pub const fn port(&self) -> u8 {
        self.port
    }

    /// Bit position within the port.
    #[inline]
    pub const fn bit(&self) -> u8 {
        self.bit
    }

    /// Single-bit mask for this pin within its port registers.
    #[inline]
    pub const fn mask(&self) -> u16 {
        1 << self.bit
    }

    /// External interrupt line this pin is routed to.
    #[inline]
    pub const fn exti_line(&self) -> ExtiLine {
        ExtiLine(self.bit)
    }
}

/// Which transitions raise an external interrupt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Edge {
    Rising,
    Falling,
    RisingFalling,
}

/// An external interrupt line number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ExtiLine(pub u8);

impl ExtiLine {
    /// Single-bit mask for this line in the EXTI registers.
    #[inline]
    pub const fn mask(&self) -> u32 {
        1 << self.0
    }
}

/// Trait for abstracting GPIO hardware.
///
/// Implementations are expected to be register-level and infallible; any
/// misconfiguration is the board definition's problem, not the caller's.
pub trait Gpio {
    /// Enables the port clock and makes the pin a push-pull output.
    fn configure_as_output(&self, pin: Pin);

    /// Makes the pin an input routed to its external interrupt line.
    fn configure_as_input_interrupt(&self, pin: Pin, edge: Edge);

    /// Drives the pin high.
    fn set_pin(&self, pin: Pin);

    /// Drives the pin low.
    fn clear_pin(&self, pin: Pin);

    /// Reads the pin level from the input data register.
    fn read_pin(&self, pin: Pin) -> bool;
}

/// Trait for abstracting the interrupt controller.
pub trait InterruptController {
    /// Unmasks the line and enables its IRQ.
    fn enable_irq(&self, line: ExtiLine);

    /// Returns true if the line has a pending request.
    fn is_pending(&self, line: ExtiLine) -> bool;

    /// Acknowledges a pending request on the line.
    fn clear_pending(&self, line: ExtiLine);
}
