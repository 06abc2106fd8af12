//! Edge interrupt handoff between a button and the LED bank.
//!
//! [`ButtonState`] is the state shared with the main loop: a latched pressed
//! flag, the index of the LED that follows the button, and the last level
//! seen. [`EdgeHandler`] runs in the external interrupt and is the only
//! writer of that state.
//!
//! Edges are not debounced. Every level change read back from the pin,
//! including contact bounce, counts as a transition.

use core::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use crate::gpio::{Edge, Gpio, InterruptController, Pin};
use crate::led::LedBank;

/// What an edge notification did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum EdgeEvent {
    /// The notification was not for the button line.
    Ignored,

    /// Pin level equals the last observed level.
    Unchanged,

    /// Button went to the pressed level; `led` was turned on.
    Pressed { led: usize, first: bool },

    /// Button was released; `led` was turned off and `next` follows.
    Released { led: usize, next: usize, first: bool },
}

/// Button state shared between the edge interrupt and the main loop.
///
/// Written only from interrupt context, read by the main loop at its
/// checkpoints. All fields are single words accessed with atomic loads and
/// stores.
#[derive(Debug)]
pub struct ButtonState {
    pressed: AtomicBool,
    led_index: AtomicUsize,
    last_level: AtomicBool,
}

impl ButtonState {
    /// Creates the power-up state: not pressed, LED 0, level low.
    pub const fn new() -> Self {
        Self {
            pressed: AtomicBool::new(false),
            led_index: AtomicUsize::new(0),
            last_level: AtomicBool::new(false),
        }
    }

    /// Returns true once any transition has been seen. Never cleared.
    pub fn is_pressed(&self) -> bool {
        self.pressed.load(Ordering::Acquire)
    }

    /// Index of the LED the next press lights.
    pub fn led_index(&self) -> usize {
        self.led_index.load(Ordering::Relaxed)
    }

    /// Last pin level the handler observed.
    pub fn last_level(&self) -> bool {
        self.last_level.load(Ordering::Relaxed)
    }

    /// Applies an observed pin level. Interrupt context only.
    ///
    /// On the first change ever seen the pressed flag latches and every LED
    /// is turned off. Then a high level lights the current LED, and a low
    /// level turns it off and moves on to the next one, wrapping around the
    /// bank.
    pub fn on_level<G: Gpio>(&self, level: bool, gpio: &G, leds: &LedBank) -> EdgeEvent {
        let previous = self.last_level.load(Ordering::Relaxed);
        self.last_level.store(level, Ordering::Relaxed);
        if level == previous {
            return EdgeEvent::Unchanged;
        }

        let first = !self.pressed.load(Ordering::Relaxed);
        if first {
            self.pressed.store(true, Ordering::Release);
            leds.turn_off_all(gpio);
        }

        let index = self.led_index() % leds.len();
        let led = &leds.as_slice()[index];

        if level {
            led.turn_on(gpio);
            EdgeEvent::Pressed { led: index, first }
        } else {
            led.turn_off(gpio);
            let next = (index + 1) % leds.len();
            self.led_index.store(next, Ordering::Relaxed);
            EdgeEvent::Released {
                led: index,
                next,
                first,
            }
        }
    }
}

impl Default for ButtonState {
    fn default() -> Self {
        Self::new()
    }
}

/// External interrupt handler for the button.
///
/// # Type Parameters
/// * `'a` - Lifetime of the shared state, LED bank and peripherals
/// * `G` - GPIO implementation type
/// * `C` - Interrupt controller implementation type
pub struct EdgeHandler<'a, G: Gpio, C: InterruptController> {
    state: &'a ButtonState,
    leds: &'a LedBank,
    gpio: &'a G,
    irq: &'a C,
    button: Pin,
}

impl<'a, G: Gpio, C: InterruptController> EdgeHandler<'a, G, C> {
    /// Creates a handler for the button on `button`.
    pub fn new(
        state: &'a ButtonState,
        leds: &'a LedBank,
        gpio: &'a G,
        irq: &'a C,
        button: Pin,
    ) -> Self {
        Self {
            state,
            leds,
            gpio,
            irq,
            button,
        }
    }

    /// Configures the button pin for both edges and enables its interrupt.
    pub fn arm(&self) {
        let line = self.button.exti_line();
        self.gpio.configure_as_input_interrupt(self.button, Edge::RisingFalling);
        self.irq.enable_irq(line);
        crate::log::debug!("button armed on line {}", line.0);
    }

    /// Entry point for the external interrupt.
    ///
    /// Does nothing unless the button line is pending. Clears the pending
    /// bit before handling the edge so the interrupt does not fire again.
    pub fn on_interrupt(&self) -> EdgeEvent {
        let line = self.button.exti_line();
        if !self.irq.is_pending(line) {
            return EdgeEvent::Ignored;
        }

        self.irq.clear_pending(line);
        self.on_edge(self.button.mask())
    }

    /// Handles an edge notification for the pins in `mask`.
    ///
    /// The level is read from the pin itself, not taken from the
    /// notification.
    pub fn on_edge(&self, mask: u16) -> EdgeEvent {
        if mask & self.button.mask() == 0 {
            return EdgeEvent::Ignored;
        }

        let level = self.gpio.read_pin(self.button);
        let event = self.state.on_level(level, self.gpio, self.leds);
        crate::log::trace!("button edge: {}", event);
        event
    }

    pub fn button(&self) -> Pin {
        self.button
    }

    pub fn state(&self) -> &'a ButtonState {
        self.state
    }
}
