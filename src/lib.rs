#![cfg_attr(not(feature = "std"), no_std)]
#![doc = include_str!("../README.md")]

//! # Core Concepts
//!
//! - **`TickCounter`**: Delay countdown and uptime advanced by the periodic tick interrupt
//! - **`Timer`**: Starts the tick source and provides the busy-wait `sleep(ticks)`
//! - **`TickSource`**: Trait to implement for your periodic tick hardware (or a virtual clock)
//! - **`ButtonState`**: Latched pressed flag and follow-LED index written by the edge interrupt
//! - **`EdgeHandler`**: External interrupt entry point that hands button edges to the LEDs
//! - **`SharedContext`**: The tick counter and button state, in one `static`
//! - **`Led`** / **`LedBank`**: Polarity-aware LEDs over a `Gpio` implementation
//! - **`Gpio`** / **`InterruptController`**: Traits to implement for your board
//! - **`BlinkDemo`**: The main-loop program that checks the button flag after every sleep
//! - **`Trace`**: Trait for the diagnostic text channel
//!
//! Interrupt handlers and the main loop only communicate through
//! `SharedContext`, using single-word atomic loads and stores. Each field has
//! exactly one writing context.

pub mod button;
pub mod config;
pub mod context;
pub mod gpio;
pub mod led;
mod log;
pub mod sequence;
pub mod time;
pub mod timer;
pub mod trace;

pub use button::{ButtonState, EdgeEvent, EdgeHandler};
pub use config::{BlinkTiming, ConfigError, DEFAULT_LOOP_COUNT, MAX_LEDS};
pub use context::SharedContext;
pub use gpio::{Edge, ExtiLine, Gpio, InterruptController, Pin};
pub use led::{Led, LedBank};
pub use sequence::{BlinkDemo, Phase, RunOutcome};
pub use time::{TickInstant, Ticks, TimeSource};
pub use timer::{FREQUENCY_HZ, TickCounter, TickSource, Timer, TimerState};
pub use trace::{NoTrace, Trace};
