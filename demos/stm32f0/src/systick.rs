use cortex_m::peripheral::{SYST, syst::SystClkSource};
use rtt_target::rprintln;

use tick_blink::TickSource;

/// SysTick as the periodic tick source
///
/// The `SysTick` exception handler must call
/// [`TickCounter::tick`](tick_blink::TickCounter::tick).
pub struct SysTickSource {
    syst: SYST,
    sysclk_hz: u32,
}

impl SysTickSource {
    pub fn new(syst: SYST, sysclk_hz: u32) -> Self {
        Self { syst, sysclk_hz }
    }
}

impl TickSource for SysTickSource {
    fn start(&mut self, frequency_hz: u32) {
        self.syst.set_clock_source(SystClkSource::Core);
        self.syst.set_reload((self.sysclk_hz / frequency_hz) - 1);
        self.syst.clear_current();
        self.syst.enable_counter();
        self.syst.enable_interrupt();

        rprintln!("SysTick configured for {} Hz", frequency_hz);
    }
}
