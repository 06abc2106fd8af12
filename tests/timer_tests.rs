//! Integration tests for the tick timer and busy-wait delay

mod common;
use common::*;

use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::Duration;

use tick_blink::{
    FREQUENCY_HZ, TickCounter, TickInstant, TickSource, TimeSource, Timer, TimerState,
};

/// Tick source that records the countdown on every busy-wait iteration
struct RecordingSource<'a> {
    counter: &'a TickCounter,
    seen: heapless::Vec<u32, 64>,
}

impl TickSource for RecordingSource<'_> {
    fn start(&mut self, _frequency_hz: u32) {}

    fn wait(&mut self) {
        let _ = self.seen.push(self.counter.remaining());
        self.counter.tick();
    }
}

/// Tick source that leaves all progress to another context
struct SpinSource;

impl TickSource for SpinSource {
    fn start(&mut self, _frequency_hz: u32) {}
}

#[test]
fn start_uses_default_frequency() {
    let gpio = MockGpio::new();
    let irq = MockIrq::new();
    let counter = TickCounter::new();
    let mut timer = Timer::new(&counter, VirtualClock::new(&counter, &gpio, &irq));

    timer.start();
    assert_eq!(timer.frequency_hz(), FREQUENCY_HZ);
    assert_eq!(timer.source_mut().started_hz(), Some(1_000));
}

#[test]
fn sleep_returns_after_exactly_requested_ticks() {
    let gpio = MockGpio::new();
    let irq = MockIrq::new();
    let counter = TickCounter::new();
    let mut timer = Timer::new(&counter, VirtualClock::new(&counter, &gpio, &irq));
    timer.start();

    for ticks in [1, 7, 750, 250] {
        let before = counter.now();
        timer.sleep(ticks);
        assert_eq!(counter.now().duration_since(before), ticks);
        assert_eq!(counter.remaining(), 0);
        assert_eq!(counter.state(), TimerState::Idle);
    }
}

#[test]
fn sleep_zero_returns_without_waiting() {
    let gpio = MockGpio::new();
    let irq = MockIrq::new();
    let counter = TickCounter::new();
    let mut timer = Timer::new(&counter, VirtualClock::new(&counter, &gpio, &irq));

    timer.sleep(0);
    timer.sleep(0);

    assert_eq!(timer.source_mut().waits(), 0);
    assert_eq!(counter.remaining(), 0);
    assert_eq!(counter.uptime(), TickInstant(0));
}

#[test]
fn countdown_decreases_by_one_per_tick_to_zero() {
    let counter = TickCounter::new();
    let source = RecordingSource {
        counter: &counter,
        seen: heapless::Vec::new(),
    };
    let mut timer = Timer::new(&counter, source);

    timer.sleep(5);

    let seen = &timer.source_mut().seen;
    assert_eq!(seen.as_slice(), &[5, 4, 3, 2, 1]);
    assert_eq!(counter.remaining(), 0);
}

#[test]
fn ticks_while_idle_only_advance_uptime() {
    let counter = TickCounter::new();

    for _ in 0..10 {
        counter.tick();
    }

    assert_eq!(counter.remaining(), 0);
    assert_eq!(counter.state(), TimerState::Idle);
    assert_eq!(counter.uptime(), TickInstant(10));
}

#[test]
fn rearming_overwrites_the_previous_wait() {
    let counter = TickCounter::new();
    counter.arm(100);
    for _ in 0..40 {
        counter.tick();
    }

    counter.arm(5);
    assert_eq!(counter.remaining(), 5);

    for _ in 0..5 {
        counter.tick();
    }
    assert_eq!(counter.state(), TimerState::Idle);
}

#[test]
fn sleep_millis_at_custom_frequency() {
    let gpio = MockGpio::new();
    let irq = MockIrq::new();
    let counter = TickCounter::new();
    let mut timer =
        Timer::with_frequency(&counter, VirtualClock::new(&counter, &gpio, &irq), 10_000).unwrap();

    timer.sleep_millis(3);
    assert_eq!(counter.uptime(), TickInstant(30));
}

#[test]
fn sleep_waits_for_ticks_from_another_context() {
    static COUNTER: TickCounter = TickCounter::new();
    let stop = AtomicBool::new(false);

    thread::scope(|scope| {
        scope.spawn(|| {
            while !stop.load(Ordering::Relaxed) {
                COUNTER.tick();
                thread::sleep(Duration::from_micros(50));
            }
        });

        let mut timer = Timer::new(&COUNTER, SpinSource);
        let before = COUNTER.now();
        timer.sleep(50);
        let elapsed = COUNTER.now().duration_since(before);

        stop.store(true, Ordering::Relaxed);

        assert!(elapsed >= 50, "woke after {} ticks", elapsed);
        assert_eq!(COUNTER.remaining(), 0);
    });
}
