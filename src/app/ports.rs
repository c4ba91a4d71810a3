//! Port traits — the hexagonal boundary between domain logic and the outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ Controller (domain)
//! ```
//!
//! Driven adapters (probe, relay, display, heartbeat LED, clock) implement
//! these traits.  The [`Controller`](super::service::Controller) consumes
//! them via generics, so the domain core never touches hardware directly.
//!
//! ## Timing notes
//!
//! - **ClockPort::sleep_ms** is the only suspension primitive the core may
//!   use.  Everything that waits — the inter-cycle pause, resistance-mode
//!   retries, the cooldown — goes through it, which is what lets the test
//!   suite run years of duty cycles in milliseconds.
//! - **ActuatorPort::set_compressor** MUST be idempotent: the loop re-asserts
//!   the relay state every cycle.

use super::events::AppEvent;

// ───────────────────────────────────────────────────────────────
// Sensor port (driven adapter: hardware → domain)
// ───────────────────────────────────────────────────────────────

/// Read-side port: the domain calls this to obtain one raw probe reading.
pub trait SensorPort {
    /// One measurement attempt.  `None` means the probe produced nothing at
    /// all (open divider, ADC fault); plausibility of a `Some` value is the
    /// domain's business, not the adapter's.
    fn read_temperature(&mut self) -> Option<f32>;
}

// ───────────────────────────────────────────────────────────────
// Actuator port (driven adapter: domain → hardware)
// ───────────────────────────────────────────────────────────────

/// Write-side port: the domain calls this to command actuators.
pub trait ActuatorPort {
    /// Energise or release the compressor relay.  Idempotent.
    fn set_compressor(&mut self, on: bool);

    /// Whether the relay is currently energised (last commanded state).
    fn is_compressor_on(&self) -> bool;

    /// Render one numeral (0–9) at one of the four display positions.
    fn show(&mut self, slot: u8, digit: u8);

    /// Render the error marker at one display position.
    fn show_error(&mut self, slot: u8);

    /// Drive the liveness LED.
    fn set_indicator(&mut self, on: bool);

    /// Release the relay and blank everything — safe shutdown.
    fn all_off(&mut self);
}

// ───────────────────────────────────────────────────────────────
// Clock port (driven adapter: domain → time)
// ───────────────────────────────────────────────────────────────

/// Monotonic time and the sole blocking-wait primitive.
pub trait ClockPort {
    /// Milliseconds since boot (monotonic).
    fn uptime_ms(&self) -> u64;

    /// Block for `ms`.  Called only in short sub-periods so the heartbeat
    /// keeps pulsing between calls.
    fn sleep_ms(&mut self, ms: u32);
}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: domain → logging / telemetry)
// ───────────────────────────────────────────────────────────────

/// The domain emits structured [`AppEvent`]s through this port.  Adapters
/// decide where they go (serial log today; anything else tomorrow).
pub trait EventSink {
    fn emit(&mut self, event: &AppEvent);
}

// ───────────────────────────────────────────────────────────────
// In-crate test doubles
// ───────────────────────────────────────────────────────────────

/// Mock ports for unit tests.  Integration tests under `tests/` carry their
/// own copies (they cannot see `#[cfg(test)]` items).
#[cfg(test)]
pub mod testing {
    use super::{ActuatorPort, ClockPort, EventSink, SensorPort};
    use crate::app::events::AppEvent;

    /// What one display slot was last told to show.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub enum Shown {
        Digit(u8),
        Error,
    }

    /// Records every actuator call and serves scripted probe readings.
    pub struct MockHardware {
        /// Scripted readings, consumed front to back; empty = probe dead.
        pub readings: std::collections::VecDeque<Option<f32>>,
        pub compressor_on: bool,
        /// Number of *observable* relay transitions (idempotence check).
        pub relay_transitions: u32,
        pub indicator_on: bool,
        /// Completed on→off indicator pulses.
        pub indicator_pulses: u32,
        pub frame: [Option<Shown>; 4],
    }

    impl MockHardware {
        pub fn new() -> Self {
            Self {
                readings: std::collections::VecDeque::new(),
                compressor_on: false,
                relay_transitions: 0,
                indicator_on: false,
                indicator_pulses: 0,
                frame: [None; 4],
            }
        }

        pub fn with_readings(readings: &[Option<f32>]) -> Self {
            let mut hw = Self::new();
            hw.readings.extend(readings.iter().copied());
            hw
        }
    }

    impl SensorPort for MockHardware {
        fn read_temperature(&mut self) -> Option<f32> {
            self.readings.pop_front().flatten()
        }
    }

    impl ActuatorPort for MockHardware {
        fn set_compressor(&mut self, on: bool) {
            if on != self.compressor_on {
                self.relay_transitions += 1;
            }
            self.compressor_on = on;
        }

        fn is_compressor_on(&self) -> bool {
            self.compressor_on
        }

        fn show(&mut self, slot: u8, digit: u8) {
            self.frame[slot as usize] = Some(Shown::Digit(digit));
        }

        fn show_error(&mut self, slot: u8) {
            self.frame[slot as usize] = Some(Shown::Error);
        }

        fn set_indicator(&mut self, on: bool) {
            if self.indicator_on && !on {
                self.indicator_pulses += 1;
            }
            self.indicator_on = on;
        }

        fn all_off(&mut self) {
            self.set_compressor(false);
            self.indicator_on = false;
            self.frame = [None; 4];
        }
    }

    /// Virtual clock: sleeping advances time instantly.
    pub struct MockClock {
        now_ms: u64,
        pub total_slept_ms: u64,
    }

    impl MockClock {
        pub fn new() -> Self {
            Self {
                now_ms: 0,
                total_slept_ms: 0,
            }
        }
    }

    impl ClockPort for MockClock {
        fn uptime_ms(&self) -> u64 {
            self.now_ms
        }

        fn sleep_ms(&mut self, ms: u32) {
            self.now_ms += u64::from(ms);
            self.total_slept_ms += u64::from(ms);
        }
    }

    /// Collects emitted events for assertions.
    pub struct RecordingSink {
        pub events: Vec<AppEvent>,
    }

    impl RecordingSink {
        pub fn new() -> Self {
            Self { events: Vec::new() }
        }
    }

    impl EventSink for RecordingSink {
        fn emit(&mut self, event: &AppEvent) {
            self.events.push(event.clone());
        }
    }
}
