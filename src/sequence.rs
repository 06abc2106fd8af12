//! Scripted LED programs run by the main polling loop.
//!
//! [`BlinkDemo`] drives the LED bank through a fixed script of phases and
//! checks the button flag after every blocking sleep. Once the edge
//! interrupt has latched the flag, the current phase stops at its next
//! checkpoint and the LEDs are left to the interrupt handler.
//!
//! Changes made by the interrupt while a phase is between checkpoints are
//! only seen at the next checkpoint.

use crate::button::ButtonState;
use crate::config::BlinkTiming;
use crate::gpio::Gpio;
use crate::led::LedBank;
use crate::timer::{TickSource, Timer};
use crate::trace::Trace;

/// Phases of the scripted blink program, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Phase {
    /// All LEDs on together, then off.
    SyncBlink,
    /// Each LED blinks once, in bank order.
    SequentialBlink,
    /// LEDs count up in binary, one step per second.
    BinaryCount,
    /// All LEDs switched on.
    FinalOn,
    /// LED 0 blinks on its own.
    SingleBlink,
}

/// How a scripted program ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RunOutcome {
    /// Every phase ran to the end without a button transition.
    Completed,
    /// The button flag was seen set during this phase.
    Interrupted(Phase),
}

/// The main-loop LED program.
///
/// # Type Parameters
/// * `'a` - Lifetime of the shared state, LED bank and GPIO
/// * `G` - GPIO implementation type
/// * `S` - Tick source implementation type
/// * `T` - Trace channel implementation type
pub struct BlinkDemo<'a, G: Gpio, S: TickSource, T: Trace> {
    timer: Timer<'a, S>,
    leds: &'a LedBank,
    gpio: &'a G,
    button: &'a ButtonState,
    trace: T,
    timing: BlinkTiming,
    seconds: u32,
}

impl<'a, G: Gpio, S: TickSource, T: Trace> BlinkDemo<'a, G, S, T> {
    /// Creates the program. The timer should already be started.
    pub fn new(
        timer: Timer<'a, S>,
        leds: &'a LedBank,
        gpio: &'a G,
        button: &'a ButtonState,
        trace: T,
    ) -> Self {
        let timing = BlinkTiming::from_frequency(timer.frequency_hz());

        Self {
            timer,
            leds,
            gpio,
            button,
            trace,
            timing,
            seconds: 0,
        }
    }

    /// Runs the full script.
    ///
    /// Powers up the LEDs, blinks them all once, calls `arm_button` to enable
    /// the button interrupt, then blinks each LED in turn, counts `loops`
    /// seconds in binary and finally turns every LED on. Returns as soon as a
    /// checkpoint sees the button flag.
    pub fn run<F: FnOnce()>(&mut self, loops: u32, arm_button: F) -> RunOutcome {
        let result = self.run_phases(loops, arm_button);
        self.outcome(result)
    }

    /// Blinks LED 0 `loops` times with a checkpoint after each sleep.
    pub fn blink_first(&mut self, loops: u32) -> RunOutcome {
        self.leds.power_up_all(self.gpio);
        let result = self.single_blink(loops);
        self.outcome(result)
    }

    /// Sleeps one second, counts it, and reports whether the button flag is set.
    ///
    /// Call repeatedly after a program ends while it returns true: once the
    /// button has been touched this keeps the second counter running forever
    /// while the interrupt handler drives the LEDs.
    pub fn hold(&mut self) -> bool {
        self.timer.sleep(self.timer.frequency_hz());
        self.count_second();
        self.button.is_pressed()
    }

    /// Seconds counted so far.
    pub fn seconds(&self) -> u32 {
        self.seconds
    }

    pub fn timing(&self) -> BlinkTiming {
        self.timing
    }

    pub fn timer_mut(&mut self) -> &mut Timer<'a, S> {
        &mut self.timer
    }

    pub fn trace(&self) -> &T {
        &self.trace
    }

    fn outcome(&self, result: Result<(), Phase>) -> RunOutcome {
        match result {
            Ok(()) => RunOutcome::Completed,
            Err(phase) => {
                crate::log::debug!("button pressed, {} aborted", phase);
                RunOutcome::Interrupted(phase)
            }
        }
    }

    fn run_phases<F: FnOnce()>(&mut self, loops: u32, arm_button: F) -> Result<(), Phase> {
        self.leds.power_up_all(self.gpio);
        self.sync_blink()?;

        arm_button();

        self.sequential_blink()?;
        self.binary_count(loops)?;
        self.final_on()
    }

    fn checkpoint(&self, phase: Phase) -> Result<(), Phase> {
        if self.button.is_pressed() {
            Err(phase)
        } else {
            Ok(())
        }
    }

    fn count_second(&mut self) {
        self.seconds += 1;
        self.trace.write_line(format_args!("Second {}", self.seconds));
    }

    fn sync_blink(&mut self) -> Result<(), Phase> {
        self.leds.turn_on_all(self.gpio);
        self.timer.sleep(self.timing.on_ticks);
        self.checkpoint(Phase::SyncBlink)?;

        self.leds.turn_off_all(self.gpio);
        self.timer.sleep(self.timing.off_ticks);
        self.checkpoint(Phase::SyncBlink)?;

        self.count_second();
        Ok(())
    }

    fn sequential_blink(&mut self) -> Result<(), Phase> {
        let leds = self.leds;

        for led in leds {
            self.checkpoint(Phase::SequentialBlink)?;

            led.turn_on(self.gpio);
            self.timer.sleep(self.timing.on_ticks);
            self.checkpoint(Phase::SequentialBlink)?;

            led.turn_off(self.gpio);
            self.timer.sleep(self.timing.off_ticks);
            self.checkpoint(Phase::SequentialBlink)?;

            self.count_second();
        }

        Ok(())
    }

    fn binary_count(&mut self, loops: u32) -> Result<(), Phase> {
        for _ in 0..loops {
            self.checkpoint(Phase::BinaryCount)?;

            self.leds.binary_increment(self.gpio);
            self.checkpoint(Phase::BinaryCount)?;

            self.timer.sleep(self.timer.frequency_hz());
            self.count_second();
        }

        Ok(())
    }

    fn final_on(&mut self) -> Result<(), Phase> {
        let leds = self.leds;

        for led in leds {
            self.checkpoint(Phase::FinalOn)?;
            led.turn_on(self.gpio);
        }

        Ok(())
    }

    fn single_blink(&mut self, loops: u32) -> Result<(), Phase> {
        let leds = self.leds;
        let led = &leds.as_slice()[0];

        for _ in 0..loops {
            self.checkpoint(Phase::SingleBlink)?;

            led.turn_on(self.gpio);
            self.timer.sleep(self.timing.on_ticks);
            self.checkpoint(Phase::SingleBlink)?;

            led.turn_off(self.gpio);
            self.timer.sleep(self.timing.off_ticks);
            self.checkpoint(Phase::SingleBlink)?;

            self.count_second();
        }

        Ok(())
    }
}

/// Sleeps one second `loops` times, writing `Second <n>` after each.
///
/// Returns the number of seconds counted.
pub fn count_seconds<S: TickSource, T: Trace>(
    timer: &mut Timer<'_, S>,
    trace: &mut T,
    loops: u32,
) -> u32 {
    let mut seconds = 0;

    for _ in 0..loops {
        timer.sleep(timer.frequency_hz());
        seconds += 1;
        trace.write_line(format_args!("Second {}", seconds));
    }

    seconds
}

/// Blinks the LEDs one after another for `loops` seconds.
///
/// The first on-phase lasts a full second; later ones use the usual
/// three-quarter split. Returns the number of seconds counted.
pub fn rotate<G: Gpio, S: TickSource, T: Trace>(
    timer: &mut Timer<'_, S>,
    leds: &LedBank,
    gpio: &G,
    trace: &mut T,
    loops: u32,
) -> u32 {
    let timing = BlinkTiming::from_frequency(timer.frequency_hz());
    let mut seconds = 0;
    let mut index = 0;

    leds.power_up_all(gpio);

    for i in 0..loops {
        let led = &leds.as_slice()[index];

        led.turn_on(gpio);
        timer.sleep(if i == 0 { timer.frequency_hz() } else { timing.on_ticks });

        led.turn_off(gpio);
        timer.sleep(timing.off_ticks);

        seconds += 1;
        trace.write_line(format_args!("Second {}", seconds));

        index = (index + 1) % leds.len();
    }

    seconds
}
