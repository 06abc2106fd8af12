#![no_std]
#![no_main]

use cortex_m_rt::entry;
use panic_halt as _;
use rtt_target::{rprintln, rtt_init_print};

use stm32f0_demos::board::{self, Board};
use stm32f0_demos::registers::RegisterGpio;
use stm32f0_demos::rtt_trace::RttTrace;
use stm32f0_demos::systick::SysTickSource;

use tick_blink::config::parse_loop_count;
use tick_blink::sequence::{count_seconds, rotate};
use tick_blink::trace::greet;
use tick_blink::{BlinkDemo, DEFAULT_LOOP_COUNT, SharedContext, Timer};

/// Loop count override, parsed the same way as a command-line argument
const LOOPS: Option<&str> = option_env!("BLINKY_LOOPS");

static CONTEXT: SharedContext = SharedContext::new();

static GPIO: RegisterGpio = RegisterGpio;

/// SysTick exception handler - called once per tick
#[cortex_m_rt::exception]
fn SysTick() {
    CONTEXT.ticks.tick();
}

#[entry]
fn main() -> ! {
    rtt_init_print!();

    let Board { syst, sysclk_hz } = board::init_board();

    let mut trace = RttTrace;
    greet(&mut trace, sysclk_hz);

    let loops = parse_loop_count(LOOPS, DEFAULT_LOOP_COUNT);
    let leds = board::leds().unwrap();

    let mut timer = Timer::new(&CONTEXT.ticks, SysTickSource::new(syst, sysclk_hz));
    timer.start();

    rprintln!("Counting {} seconds", loops);
    count_seconds(&mut timer, &mut trace, loops);

    rprintln!("Rotating {} LEDs", leds.len());
    rotate(&mut timer, &leds, &GPIO, &mut trace, loops);

    rprintln!("Blinking LED 0");
    let mut demo = BlinkDemo::new(timer, &leds, &GPIO, &CONTEXT.button, trace);
    demo.blink_first(loops);
    while demo.hold() {}

    rprintln!("Uptime: {} ticks", CONTEXT.ticks.uptime().ticks());

    loop {
        cortex_m::asm::wfi();
    }
}
