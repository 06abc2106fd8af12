use core::fmt;

use rtt_target::rprintln;
use tick_blink::Trace;

/// Trace lines over the RTT up channel set up by `rtt_init_print!`
#[derive(Debug, Clone, Copy, Default)]
pub struct RttTrace;

impl Trace for RttTrace {
    fn write_line(&mut self, args: fmt::Arguments<'_>) {
        rprintln!("{}", args);
    }
}
