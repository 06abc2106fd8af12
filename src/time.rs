//! Time abstraction for the tick-driven time base.

/// A number of timer ticks.
///
/// One tick is one period of the tick source, so the wall-clock length of a
/// tick depends on the frequency the timer was started with.
pub type Ticks = u32;

/// A point in time measured in ticks since the tick source started.
///
/// The underlying counter wraps after `u32::MAX` ticks (about 49.7 days at
/// 1 kHz); all arithmetic here is wrapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TickInstant(pub u32);

impl TickInstant {
    /// Returns the raw tick count.
    #[inline]
    pub fn ticks(self) -> Ticks {
        self.0
    }

    /// Ticks elapsed since an earlier instant, correct across one wrap.
    #[inline]
    pub fn duration_since(self, earlier: Self) -> Ticks {
        self.0.wrapping_sub(earlier.0)
    }

    /// Returns the instant `ticks` after this one.
    #[inline]
    pub fn wrapping_add(self, ticks: Ticks) -> Self {
        TickInstant(self.0.wrapping_add(ticks))
    }
}

/// Trait for abstracting monotonic time sources.
pub trait TimeSource {
    /// Returns the current time instant.
    fn now(&self) -> TickInstant;
}

/// Converts milliseconds to ticks at the given tick frequency, rounding down.
pub fn ticks_from_millis(millis: u32, frequency_hz: u32) -> Ticks {
    ((millis as u64 * frequency_hz as u64) / 1_000) as Ticks
}
