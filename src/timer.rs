//! Periodic tick timer with a blocking delay.
//!
//! Provides [`TickCounter`], the counter shared between the tick interrupt and
//! the main context, and [`Timer`], which turns it into a busy-wait
//! [`sleep`](Timer::sleep). The hardware tick is abstracted by [`TickSource`]
//! so the same delay logic runs against SysTick or a virtual clock.

use core::sync::atomic::{AtomicU32, Ordering};

use crate::config::ConfigError;
use crate::time::{TickInstant, Ticks, TimeSource, ticks_from_millis};

/// Default tick frequency.
pub const FREQUENCY_HZ: u32 = 1_000;

/// Whether a delay is in progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TimerState {
    /// Delay counter is zero, no pending wait.
    Idle,
    /// Delay counter is non-zero, a wait is in progress.
    Counting,
}

/// Tick counter shared between the tick interrupt and the main context.
///
/// Holds the delay countdown used by [`Timer::sleep`] and a wrapping uptime
/// count. Only [`tick`](Self::tick) decrements the countdown and only
/// [`arm`](Self::arm) sets it, so each side does plain atomic loads and
/// stores. No read-modify-write is used, which keeps this usable on
/// `thumbv6m` targets.
#[derive(Debug)]
pub struct TickCounter {
    remaining: AtomicU32,
    uptime: AtomicU32,
}

impl TickCounter {
    /// Creates an idle counter at uptime zero.
    pub const fn new() -> Self {
        Self {
            remaining: AtomicU32::new(0),
            uptime: AtomicU32::new(0),
        }
    }

    /// Advances the time base by one tick.
    ///
    /// Call this from the periodic tick interrupt. The countdown saturates at
    /// zero.
    pub fn tick(&self) {
        let uptime = self.uptime.load(Ordering::Relaxed);
        self.uptime.store(uptime.wrapping_add(1), Ordering::Relaxed);

        let remaining = self.remaining.load(Ordering::Acquire);
        if remaining != 0 {
            self.remaining.store(remaining - 1, Ordering::Release);
        }
    }

    /// Sets the countdown, overwriting any wait already in progress.
    pub fn arm(&self, ticks: Ticks) {
        self.remaining.store(ticks, Ordering::Release);
    }

    /// Ticks left before the current wait completes.
    pub fn remaining(&self) -> Ticks {
        self.remaining.load(Ordering::Acquire)
    }

    /// Returns the current delay state.
    pub fn state(&self) -> TimerState {
        if self.remaining() == 0 {
            TimerState::Idle
        } else {
            TimerState::Counting
        }
    }

    /// Ticks since the tick source started.
    pub fn uptime(&self) -> TickInstant {
        TickInstant(self.uptime.load(Ordering::Relaxed))
    }
}

impl Default for TickCounter {
    fn default() -> Self {
        Self::new()
    }
}

impl TimeSource for TickCounter {
    fn now(&self) -> TickInstant {
        self.uptime()
    }
}

/// Trait for abstracting the periodic tick hardware.
///
/// Implement this for SysTick (or any periodic timer) whose interrupt calls
/// [`TickCounter::tick`]. Host simulations implement [`wait`](Self::wait) to
/// advance a virtual clock instead.
pub trait TickSource {
    /// Starts the periodic tick at `frequency_hz`.
    fn start(&mut self, frequency_hz: u32);

    /// Called on every iteration of the busy-wait in [`Timer::sleep`].
    ///
    /// The default just hints a spin loop; the tick interrupt is expected to
    /// make progress on its own.
    fn wait(&mut self) {
        core::hint::spin_loop();
    }
}

/// Blocking delay provider driven by a [`TickCounter`].
///
/// # Type Parameters
/// * `'a` - Lifetime of the shared tick counter
/// * `S` - Tick source implementation type
pub struct Timer<'a, S: TickSource> {
    counter: &'a TickCounter,
    source: S,
    frequency_hz: u32,
}

impl<'a, S: TickSource> Timer<'a, S> {
    /// Creates a timer ticking at [`FREQUENCY_HZ`].
    pub fn new(counter: &'a TickCounter, source: S) -> Self {
        Self {
            counter,
            source,
            frequency_hz: FREQUENCY_HZ,
        }
    }

    /// Creates a timer ticking at a custom frequency.
    ///
    /// # Errors
    /// * `ZeroFrequency` - `frequency_hz` is zero
    pub fn with_frequency(
        counter: &'a TickCounter,
        source: S,
        frequency_hz: u32,
    ) -> Result<Self, ConfigError> {
        if frequency_hz == 0 {
            return Err(ConfigError::ZeroFrequency);
        }

        Ok(Self {
            counter,
            source,
            frequency_hz,
        })
    }

    /// Enables the periodic tick source.
    pub fn start(&mut self) {
        crate::log::debug!("tick source started at {} Hz", self.frequency_hz);
        self.source.start(self.frequency_hz);
    }

    /// Blocks for `ticks` timer ticks.
    ///
    /// This is a spin-wait: the calling context does nothing else until the
    /// tick interrupt has counted the delay down to zero. `sleep(0)` returns
    /// immediately. Never call this from the tick interrupt itself.
    pub fn sleep(&mut self, ticks: Ticks) {
        self.counter.arm(ticks);

        while self.counter.remaining() != 0 {
            self.source.wait();
        }
    }

    /// Blocks for `millis` milliseconds, rounded down to whole ticks.
    pub fn sleep_millis(&mut self, millis: u32) {
        self.sleep(ticks_from_millis(millis, self.frequency_hz));
    }

    /// Ticks per second.
    pub fn frequency_hz(&self) -> u32 {
        self.frequency_hz
    }

    /// Returns the shared counter this timer waits on.
    pub fn counter(&self) -> &'a TickCounter {
        self.counter
    }

    /// Returns a mutable reference to the tick source.
    pub fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }
}
