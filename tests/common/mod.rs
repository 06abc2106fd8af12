//! Shared test infrastructure for tick-blink integration tests

#![allow(dead_code)] // Items used across multiple test files; Rust analyzes per-file

use core::cell::{Cell, RefCell};
use core::fmt::Write;

use tick_blink::{
    Edge, EdgeEvent, EdgeHandler, ExtiLine, Gpio, InterruptController, Led, LedBank, Pin,
    TickCounter, TickSource, Trace,
};

// ============================================================================
// Mock GPIO
// ============================================================================

pub const PORTS: usize = 8;

/// Mock GPIO with one level latch per port, shared by outputs and inputs
pub struct MockGpio {
    levels: [Cell<u16>; PORTS],
    outputs: [Cell<u16>; PORTS],
    interrupt_inputs: RefCell<heapless::Vec<(Pin, Edge), 4>>,
}

impl MockGpio {
    pub fn new() -> Self {
        Self {
            levels: core::array::from_fn(|_| Cell::new(0)),
            outputs: core::array::from_fn(|_| Cell::new(0)),
            interrupt_inputs: RefCell::new(heapless::Vec::new()),
        }
    }

    /// Drive an input pin from outside, as a button would
    pub fn set_input(&self, pin: Pin, level: bool) {
        if level {
            self.set_pin(pin);
        } else {
            self.clear_pin(pin);
        }
    }

    pub fn level(&self, pin: Pin) -> bool {
        self.read_pin(pin)
    }

    pub fn is_output(&self, pin: Pin) -> bool {
        self.outputs[pin.port() as usize].get() & pin.mask() != 0
    }

    pub fn interrupt_inputs(&self) -> heapless::Vec<(Pin, Edge), 4> {
        self.interrupt_inputs.borrow().clone()
    }
}

impl Gpio for MockGpio {
    fn configure_as_output(&self, pin: Pin) {
        let outputs = &self.outputs[pin.port() as usize];
        outputs.set(outputs.get() | pin.mask());
    }

    fn configure_as_input_interrupt(&self, pin: Pin, edge: Edge) {
        let _ = self.interrupt_inputs.borrow_mut().push((pin, edge));
    }

    fn set_pin(&self, pin: Pin) {
        let levels = &self.levels[pin.port() as usize];
        levels.set(levels.get() | pin.mask());
    }

    fn clear_pin(&self, pin: Pin) {
        let levels = &self.levels[pin.port() as usize];
        levels.set(levels.get() & !pin.mask());
    }

    fn read_pin(&self, pin: Pin) -> bool {
        self.levels[pin.port() as usize].get() & pin.mask() != 0
    }
}

// ============================================================================
// Mock Interrupt Controller
// ============================================================================

/// Mock EXTI/NVIC with enabled and pending bitmaps
pub struct MockIrq {
    enabled: Cell<u32>,
    pending: Cell<u32>,
    clears: Cell<u32>,
}

impl MockIrq {
    pub fn new() -> Self {
        Self {
            enabled: Cell::new(0),
            pending: Cell::new(0),
            clears: Cell::new(0),
        }
    }

    /// Latch a request on the line; returns false if the line is masked
    pub fn raise(&self, line: ExtiLine) -> bool {
        if !self.is_enabled(line) {
            return false;
        }
        self.pending.set(self.pending.get() | line.mask());
        true
    }

    pub fn is_enabled(&self, line: ExtiLine) -> bool {
        self.enabled.get() & line.mask() != 0
    }

    pub fn clear_count(&self) -> u32 {
        self.clears.get()
    }
}

impl InterruptController for MockIrq {
    fn enable_irq(&self, line: ExtiLine) {
        self.enabled.set(self.enabled.get() | line.mask());
    }

    fn is_pending(&self, line: ExtiLine) -> bool {
        self.pending.get() & line.mask() != 0
    }

    fn clear_pending(&self, line: ExtiLine) {
        self.pending.set(self.pending.get() & !line.mask());
        self.clears.set(self.clears.get() + 1);
    }
}

// ============================================================================
// Recording Trace
// ============================================================================

/// Trace channel that keeps every line
pub struct RecordingTrace {
    lines: heapless::Vec<heapless::String<32>, 128>,
}

impl RecordingTrace {
    pub fn new() -> Self {
        Self {
            lines: heapless::Vec::new(),
        }
    }

    pub fn lines(&self) -> &[heapless::String<32>] {
        &self.lines
    }

    pub fn last(&self) -> Option<&str> {
        self.lines.last().map(|line| line.as_str())
    }
}

impl Trace for RecordingTrace {
    fn write_line(&mut self, args: core::fmt::Arguments<'_>) {
        let mut line = heapless::String::new();
        let _ = line.write_fmt(args);
        let _ = self.lines.push(line);
    }
}

// ============================================================================
// Virtual Clock
// ============================================================================

/// A button level change scheduled at an uptime tick
#[derive(Debug, Clone, Copy)]
pub struct ScriptedEdge {
    pub at: u32,
    pub level: bool,
}

/// Tick source that advances the counter by one tick per busy-wait iteration
/// and plays scripted button edges through the edge handler
pub struct VirtualClock<'a> {
    counter: &'a TickCounter,
    gpio: &'a MockGpio,
    irq: &'a MockIrq,
    handler: Option<&'a EdgeHandler<'a, MockGpio, MockIrq>>,
    edges: heapless::Vec<ScriptedEdge, 16>,
    events: heapless::Vec<EdgeEvent, 16>,
    probe: Option<&'a LedBank>,
    history: heapless::Vec<(u32, u16), 64>,
    started_hz: Option<u32>,
    waits: u32,
}

impl<'a> VirtualClock<'a> {
    pub fn new(counter: &'a TickCounter, gpio: &'a MockGpio, irq: &'a MockIrq) -> Self {
        Self {
            counter,
            gpio,
            irq,
            handler: None,
            edges: heapless::Vec::new(),
            events: heapless::Vec::new(),
            probe: None,
            history: heapless::Vec::new(),
            started_hz: None,
            waits: 0,
        }
    }

    pub fn with_handler(mut self, handler: &'a EdgeHandler<'a, MockGpio, MockIrq>) -> Self {
        self.handler = Some(handler);
        self
    }

    /// Record the LED pattern whenever it changes, sampled after each tick
    pub fn with_probe(mut self, leds: &'a LedBank) -> Self {
        self.probe = Some(leds);
        self
    }

    /// Schedule the button pin to change to `level` at uptime tick `at`
    pub fn edge_at(mut self, at: u32, level: bool) -> Self {
        self.edges.push(ScriptedEdge { at, level }).unwrap();
        self
    }

    pub fn press_at(self, at: u32) -> Self {
        self.edge_at(at, true)
    }

    pub fn release_at(self, at: u32) -> Self {
        self.edge_at(at, false)
    }

    pub fn events(&self) -> &[EdgeEvent] {
        &self.events
    }

    /// `(uptime, pattern)` for every observed change of the LED pattern
    pub fn history(&self) -> &[(u32, u16)] {
        &self.history
    }

    pub fn started_hz(&self) -> Option<u32> {
        self.started_hz
    }

    pub fn waits(&self) -> u32 {
        self.waits
    }

    fn fire(&mut self, level: bool) {
        let Some(handler) = self.handler else {
            return;
        };

        let button = handler.button();
        self.gpio.set_input(button, level);

        if self.irq.raise(button.exti_line()) {
            let _ = self.events.push(handler.on_interrupt());
        }
    }
}

impl TickSource for VirtualClock<'_> {
    fn start(&mut self, frequency_hz: u32) {
        self.started_hz = Some(frequency_hz);
    }

    fn wait(&mut self) {
        self.waits += 1;
        self.counter.tick();

        let now = self.counter.uptime().ticks();
        let due: heapless::Vec<ScriptedEdge, 16> =
            self.edges.iter().copied().filter(|edge| edge.at == now).collect();

        for edge in due {
            self.fire(edge.level);
        }

        if let Some(leds) = self.probe {
            let pattern = leds.pattern(self.gpio);
            let last = self.history.last().map_or(0, |&(_, last)| last);
            if pattern != last {
                let _ = self.history.push((now, pattern));
            }
        }
    }
}

// ============================================================================
// Board Fixtures
// ============================================================================

/// Four active-high LEDs on PD12..PD15, as on the STM32F4 Discovery
pub fn discovery_leds() -> LedBank {
    LedBank::new(&[
        Led::new(3, 12, false).unwrap(),
        Led::new(3, 13, false).unwrap(),
        Led::new(3, 14, false).unwrap(),
        Led::new(3, 15, false).unwrap(),
    ])
    .unwrap()
}

/// User button on PA0
pub fn button_pin() -> Pin {
    Pin::new(0, 0).unwrap()
}
