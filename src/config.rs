//! Blink timing, loop counts and configuration errors.

use crate::time::Ticks;

/// Maximum number of LEDs in a [`LedBank`](crate::led::LedBank).
pub const MAX_LEDS: usize = 16;

/// Loop count used by the seconds counter and single-LED programs.
pub const DEFAULT_LOOP_COUNT: u32 = 5;

/// Configuration errors reported by constructors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// An LED bank needs at least one LED.
    EmptyLedBank,

    /// More LEDs than [`MAX_LEDS`].
    TooManyLeds { count: usize, capacity: usize },

    /// Pin bit outside the 16 lines of a GPIO port.
    InvalidPinBit(u8),

    /// Tick frequency of zero.
    ZeroFrequency,
}

impl core::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ConfigError::EmptyLedBank => write!(f, "LED bank must contain at least one LED"),
            ConfigError::TooManyLeds { count, capacity } => {
                write!(f, "{} LEDs exceed bank capacity of {}", count, capacity)
            }
            ConfigError::InvalidPinBit(bit) => {
                write!(f, "pin bit {} is outside 0..=15", bit)
            }
            ConfigError::ZeroFrequency => write!(f, "tick frequency must be non-zero"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ConfigError {}

/// On/off split of one blink second.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BlinkTiming {
    /// Ticks the LED stays on (three quarters of a second).
    pub on_ticks: Ticks,
    /// Remaining ticks of the second, LED off.
    pub off_ticks: Ticks,
}

impl BlinkTiming {
    /// Splits one second at `frequency_hz` into on and off phases.
    pub const fn from_frequency(frequency_hz: u32) -> Self {
        let on_ticks = frequency_hz * 3 / 4;
        Self {
            on_ticks,
            off_ticks: frequency_hz - on_ticks,
        }
    }
}

/// Default number of binary-counter iterations: one per pattern of `led_count` LEDs.
pub const fn binary_loop_count(led_count: usize) -> u32 {
    1 << led_count
}

/// Parses a loop-count argument, falling back to `default` when absent.
///
/// Parsing is permissive: leading whitespace, an optional sign and the
/// leading decimal digits are used; anything unparseable yields zero.
/// Negative values clamp to zero.
pub fn parse_loop_count(arg: Option<&str>, default: u32) -> u32 {
    match arg {
        Some(arg) => parse_leading_int(arg).clamp(0, u32::MAX as i64) as u32,
        None => default,
    }
}

/// Loop count for the binary blink phase, never below `1 << led_count`.
pub fn binary_loops(arg: Option<&str>, led_count: usize) -> u32 {
    let minimum = binary_loop_count(led_count);
    parse_loop_count(arg, minimum).max(minimum)
}

fn parse_leading_int(s: &str) -> i64 {
    let s = s.trim_start();
    let (negative, digits) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };

    let mut value: i64 = 0;
    for byte in digits.bytes().take_while(u8::is_ascii_digit) {
        value = value
            .saturating_mul(10)
            .saturating_add(i64::from(byte - b'0'));
    }

    if negative { -value } else { value }
}
