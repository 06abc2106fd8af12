//! Trace output channel.
//!
//! Output is fire-and-forget: implementations swallow their own errors.

use core::fmt;

/// Trait for abstracting the diagnostic text channel (RTT, semihosting, ITM, ...).
pub trait Trace {
    /// Writes one line of text. The implementation adds the line ending.
    fn write_line(&mut self, args: fmt::Arguments<'_>);
}

impl<T: Trace + ?Sized> Trace for &mut T {
    fn write_line(&mut self, args: fmt::Arguments<'_>) {
        (**self).write_line(args);
    }
}

/// Trace channel that discards everything, for release builds.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoTrace;

impl Trace for NoTrace {
    fn write_line(&mut self, _args: fmt::Arguments<'_>) {}
}

/// Writes the start-up banner and the system clock frequency.
pub fn greet<T: Trace>(trace: &mut T, sysclk_hz: u32) {
    trace.write_line(format_args!("Hello ARM World!"));
    trace.write_line(format_args!("System clock: {} Hz", sysclk_hz));
}
