//! Register-level GPIO and EXTI access.
//!
//! The library addresses pins by port index and bit, so these drivers go
//! straight to the PAC register blocks instead of the HAL's typed pins.
//! Port 0 is GPIOA; the STM32F051 has ports A, B, C, D and F.

use stm32f0xx_hal::pac::{self, Interrupt, NVIC};

use tick_blink::{Edge, ExtiLine, Gpio, InterruptController, Pin};

/// Runs `$body` with `$regs` bound to the register block of GPIO port `$port`.
///
/// Ports the device does not have evaluate to the default value of the body's type.
macro_rules! with_port {
    ($port:expr, |$regs:ident| $body:expr) => {
        match $port {
            0 => {
                // NOTE(unsafe) shared access to a memory-mapped register block
                let $regs = unsafe { &*pac::GPIOA::ptr() };
                $body
            }
            1 => {
                let $regs = unsafe { &*pac::GPIOB::ptr() };
                $body
            }
            2 => {
                let $regs = unsafe { &*pac::GPIOC::ptr() };
                $body
            }
            3 => {
                let $regs = unsafe { &*pac::GPIOD::ptr() };
                $body
            }
            5 => {
                let $regs = unsafe { &*pac::GPIOF::ptr() };
                $body
            }
            _ => Default::default(),
        }
    };
}

/// GPIO driver writing the port registers directly
#[derive(Debug, Clone, Copy, Default)]
pub struct RegisterGpio;

impl Gpio for RegisterGpio {
    fn configure_as_output(&self, pin: Pin) {
        let offset = 2 * u32::from(pin.bit());
        let mask = u32::from(pin.mask());

        with_port!(pin.port(), |regs| unsafe {
            regs.otyper.modify(|r, w| w.bits(r.bits() & !mask));
            regs.moder.modify(|r, w| {
                w.bits((r.bits() & !(0b11 << offset)) | (0b01 << offset))
            });
        })
    }

    fn configure_as_input_interrupt(&self, pin: Pin, edge: Edge) {
        let offset = 2 * u32::from(pin.bit());

        with_port!(pin.port(), |regs| unsafe {
            regs.pupdr.modify(|r, w| w.bits(r.bits() & !(0b11 << offset)));
            regs.moder.modify(|r, w| w.bits(r.bits() & !(0b11 << offset)));
        });

        let line = pin.exti_line();
        let shift = 4 * (u32::from(line.0) % 4);
        let field = 0b1111 << shift;
        let source = u32::from(pin.port()) << shift;

        // NOTE(unsafe) the lines written here belong to this pin only
        unsafe {
            let syscfg = &*pac::SYSCFG::ptr();
            match line.0 / 4 {
                0 => syscfg.exticr1.modify(|r, w| w.bits((r.bits() & !field) | source)),
                1 => syscfg.exticr2.modify(|r, w| w.bits((r.bits() & !field) | source)),
                2 => syscfg.exticr3.modify(|r, w| w.bits((r.bits() & !field) | source)),
                _ => syscfg.exticr4.modify(|r, w| w.bits((r.bits() & !field) | source)),
            }

            let exti = &*pac::EXTI::ptr();
            let rising = matches!(edge, Edge::Rising | Edge::RisingFalling);
            let falling = matches!(edge, Edge::Falling | Edge::RisingFalling);
            exti.rtsr.modify(|r, w| w.bits(select(r.bits(), line.mask(), rising)));
            exti.ftsr.modify(|r, w| w.bits(select(r.bits(), line.mask(), falling)));
        }
    }

    fn set_pin(&self, pin: Pin) {
        let mask = u32::from(pin.mask());
        // NOTE(unsafe) atomic write to a stateless register
        with_port!(pin.port(), |regs| unsafe { regs.bsrr.write(|w| w.bits(mask)) })
    }

    fn clear_pin(&self, pin: Pin) {
        let mask = u32::from(pin.mask()) << 16;
        with_port!(pin.port(), |regs| unsafe { regs.bsrr.write(|w| w.bits(mask)) })
    }

    fn read_pin(&self, pin: Pin) -> bool {
        let mask = u32::from(pin.mask());
        with_port!(pin.port(), |regs| regs.idr.read().bits() & mask != 0)
    }
}

/// EXTI and NVIC driver for the button lines
#[derive(Debug, Clone, Copy, Default)]
pub struct ExtiController;

impl ExtiController {
    fn exti() -> &'static pac::exti::RegisterBlock {
        // NOTE(unsafe) shared access to a memory-mapped register block
        unsafe { &*pac::EXTI::ptr() }
    }
}

impl InterruptController for ExtiController {
    fn enable_irq(&self, line: ExtiLine) {
        let exti = Self::exti();
        let interrupt = interrupt_for(line);

        // Requests latched before arming are dropped
        unsafe {
            exti.pr.write(|w| w.bits(line.mask()));
            exti.imr.modify(|r, w| w.bits(r.bits() | line.mask()));
        }
        NVIC::unpend(interrupt);
        // NOTE(unsafe) the handler for this interrupt is defined by the binary
        unsafe { NVIC::unmask(interrupt) };
    }

    fn is_pending(&self, line: ExtiLine) -> bool {
        Self::exti().pr.read().bits() & line.mask() != 0
    }

    fn clear_pending(&self, line: ExtiLine) {
        // NOTE(unsafe) write-one-to-clear, other lines are untouched
        unsafe { Self::exti().pr.write(|w| w.bits(line.mask())) }
    }
}

fn interrupt_for(line: ExtiLine) -> Interrupt {
    match line.0 {
        0 | 1 => Interrupt::EXTI0_1,
        2 | 3 => Interrupt::EXTI2_3,
        _ => Interrupt::EXTI4_15,
    }
}

fn select(bits: u32, mask: u32, set: bool) -> u32 {
    if set { bits | mask } else { bits & !mask }
}
