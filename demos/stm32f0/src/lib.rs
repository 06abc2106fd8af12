#![no_std]

//! Board support for running tick-blink on the STM32F0 Discovery (STM32F051R8).

pub mod board;
pub mod registers;
pub mod rtt_trace;
pub mod systick;
