//! State shared between interrupt handlers and the main loop.

use crate::button::ButtonState;
use crate::timer::TickCounter;

/// Everything that crosses the interrupt boundary.
///
/// Meant to live in a `static` so the tick and edge interrupt handlers can
/// reach it; the main loop borrows the same instance. These are the only
/// fields either side may mutate across that boundary:
///
/// - `ticks` is decremented by the tick interrupt and armed by `Timer::sleep`
/// - `button` is written by the edge interrupt and polled by the main loop
///
/// ```
/// use tick_blink::SharedContext;
///
/// static CONTEXT: SharedContext = SharedContext::new();
///
/// CONTEXT.ticks.tick();
/// assert!(!CONTEXT.button.is_pressed());
/// ```
#[derive(Debug, Default)]
pub struct SharedContext {
    pub ticks: TickCounter,
    pub button: ButtonState,
}

impl SharedContext {
    pub const fn new() -> Self {
        Self {
            ticks: TickCounter::new(),
            button: ButtonState::new(),
        }
    }
}
