#![no_std]
#![no_main]

use core::cell::RefCell;

use cortex_m_rt::entry;
use critical_section::Mutex;
use panic_halt as _;
use rtt_target::{rprintln, rtt_init_print};
use stm32f0xx_hal::pac::interrupt;

use stm32f0_demos::board::{self, Board};
use stm32f0_demos::registers::{ExtiController, RegisterGpio};
use stm32f0_demos::rtt_trace::RttTrace;
use stm32f0_demos::systick::SysTickSource;

use tick_blink::config::binary_loops;
use tick_blink::trace::greet;
use tick_blink::{BlinkDemo, EdgeHandler, LedBank, SharedContext, Timer};

type ButtonHandler = EdgeHandler<'static, RegisterGpio, ExtiController>;

/// State shared by SysTick, EXTI0_1 and the main loop
static CONTEXT: SharedContext = SharedContext::new();

static GPIO: RegisterGpio = RegisterGpio;
static EXTI: ExtiController = ExtiController;

/// Edge handler, installed before the button interrupt is unmasked
static HANDLER: Mutex<RefCell<Option<ButtonHandler>>> = Mutex::new(RefCell::new(None));

/// SysTick exception handler - called once per tick
#[cortex_m_rt::exception]
fn SysTick() {
    CONTEXT.ticks.tick();
}

/// Button edge on EXTI line 0 (PA0)
#[interrupt]
fn EXTI0_1() {
    critical_section::with(|cs| {
        if let Some(handler) = HANDLER.borrow_ref(cs).as_ref() {
            handler.on_interrupt();
        }
    });
}

fn arm_button() {
    critical_section::with(|cs| {
        if let Some(handler) = HANDLER.borrow_ref(cs).as_ref() {
            handler.arm();
        }
    });
    rprintln!("Button interrupt enabled");
}

#[entry]
fn main() -> ! {
    rtt_init_print!();

    let Board { syst, sysclk_hz } = board::init_board();

    let mut trace = RttTrace;
    greet(&mut trace, sysclk_hz);

    let leds: &'static LedBank = cortex_m::singleton!(: LedBank = board::leds().unwrap()).unwrap();
    let handler = EdgeHandler::new(
        &CONTEXT.button,
        leds,
        &GPIO,
        &EXTI,
        board::button().unwrap(),
    );
    critical_section::with(|cs| {
        HANDLER.borrow(cs).replace(Some(handler));
    });

    let mut timer = Timer::new(&CONTEXT.ticks, SysTickSource::new(syst, sysclk_hz));
    timer.start();

    let loops = binary_loops(None, leds.len());
    let mut demo = BlinkDemo::new(timer, leds, &GPIO, &CONTEXT.button, trace);

    let outcome = demo.run(loops, arm_button);
    rprintln!("Script ended: {:?}", outcome);

    // Once the button has been touched it owns the LEDs; keep counting seconds
    while demo.hold() {}

    rprintln!("Done after {} seconds", demo.seconds());

    loop {
        cortex_m::asm::wfi();
    }
}
