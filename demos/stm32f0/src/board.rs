use cortex_m::peripheral::SYST;
use rtt_target::rprintln;
use stm32f0xx_hal::{pac, prelude::*};

use tick_blink::{ConfigError, Led, LedBank, Pin};

pub const PORT_A: u8 = 0;
pub const PORT_C: u8 = 2;

/// Green LED on PC9, then blue LED on PC8. Both are active high.
pub fn leds() -> Result<LedBank, ConfigError> {
    LedBank::new(&[Led::new(PORT_C, 9, false)?, Led::new(PORT_C, 8, false)?])
}

/// User button on PA0, pulled down on the board, high while pressed.
pub fn button() -> Result<Pin, ConfigError> {
    Pin::new(PORT_A, 0)
}

/// Peripherals left over after clock setup
pub struct Board {
    pub syst: SYST,
    pub sysclk_hz: u32,
}

/// Initialize clocks and hand back what the tick source needs
///
/// Enables the GPIOA, GPIOC and SYSCFG clocks so the register-level
/// [`RegisterGpio`](crate::registers::RegisterGpio) can be used directly.
pub fn init_board() -> Board {
    let mut dp = pac::Peripherals::take().unwrap();
    let cp = cortex_m::Peripherals::take().unwrap();

    dp.RCC.ahbenr.modify(|_, w| w.iopaen().set_bit().iopcen().set_bit());
    dp.RCC.apb2enr.modify(|_, w| w.syscfgen().set_bit());

    let rcc = dp.RCC.configure().freeze(&mut dp.FLASH);
    let sysclk_hz = rcc.clocks.sysclk().0;
    rprintln!("System clock configured: {} Hz", sysclk_hz);

    Board {
        syst: cp.SYST,
        sysclk_hz,
    }
}
