//! Controller service — the hexagonal core.
//!
//! [`Controller`] owns the thermostat, sensor filter, duty-cycle guard, and
//! the per-cycle mutable state.  It exposes a clean, hardware-agnostic API.
//! All I/O flows through port traits injected at call sites, making the
//! entire service testable with mock adapters.
//!
//! ```text
//!   SensorPort ──▶ ┌──────────────────────────────┐ ──▶ EventSink
//!                  │          Controller          │
//! ActuatorPort ◀── │  Filter · Thermostat · Guard │
//!    ClockPort ──▶ └──────────────────────────────┘
//! ```

use heapless::HistoryBuffer;
use log::{debug, info};

use crate::app::events::{AppEvent, CycleSummary};
use crate::app::ports::{ActuatorPort, ClockPort, EventSink, SensorPort};
use crate::config::ControllerConfig;
use crate::control::filter::SensorFilter;
use crate::control::guard::DutyCycleGuard;
use crate::control::sleep_with_heartbeat;
use crate::control::thermostat::{Decision, Thermostat};
use crate::display;

/// Plausible readings kept for the telemetry average.
const SMOOTHING_WINDOW: usize = 8;

// ───────────────────────────────────────────────────────────────
// Controller state
// ───────────────────────────────────────────────────────────────

/// Everything the loop mutates, gathered in one owned value.  Mutations
/// happen synchronously within a cycle; there are no statics and no other
/// writers.
struct ControllerState {
    /// Last commanded relay state.
    compressor_on: bool,
    /// Previous cycle's displayed temperature (integer-truncated).
    previous_reading: i32,
    /// Monotonic cycle counter.
    cycle: u64,
    /// Uptime at the previous arbitration, for run-budget accounting.
    last_arbitration_ms: Option<u64>,
}

// ───────────────────────────────────────────────────────────────
// Controller
// ───────────────────────────────────────────────────────────────

/// The controller orchestrates one full control cycle per [`run_cycle`] call.
///
/// [`run_cycle`]: Controller::run_cycle
pub struct Controller {
    config: ControllerConfig,
    thermostat: Thermostat,
    filter: SensorFilter,
    guard: DutyCycleGuard,
    state: ControllerState,
    history: HistoryBuffer<f32, SMOOTHING_WINDOW>,
}

impl Controller {
    /// Construct the controller from a validated configuration.
    pub fn new(config: ControllerConfig) -> Self {
        let thermostat = Thermostat::new(config.band, config.valid_range);
        let filter = SensorFilter::from_config(&config);
        let guard = DutyCycleGuard::from_config(&config);

        Self {
            config,
            thermostat,
            filter,
            guard,
            state: ControllerState {
                compressor_on: false,
                previous_reading: 0,
                cycle: 0,
                last_arbitration_ms: None,
            },
            history: HistoryBuffer::new(),
        }
    }

    // ── Lifecycle ─────────────────────────────────────────────

    /// Put the hardware in a known state and announce the profile.
    pub fn start(&mut self, hw: &mut impl ActuatorPort, sink: &mut impl EventSink) {
        hw.set_compressor(false);
        hw.set_indicator(false);
        sink.emit(&AppEvent::Started {
            profile: self.config.profile,
        });
        info!(
            "controller started: profile={} band=({:.1}, {:.1}) °C",
            self.config.profile.name(),
            self.config.band.low,
            self.config.band.high,
        );
    }

    // ── Per-cycle orchestration ───────────────────────────────

    /// Run one full control cycle:
    /// acquire → decide → arbitrate → actuate → display → pause.
    ///
    /// The `hw` parameter satisfies **both** [`SensorPort`] and
    /// [`ActuatorPort`] — this avoids a double mutable borrow while keeping
    /// the port boundary explicit.  The call blocks for the whole cycle,
    /// including the inter-cycle pause; resistance retries and a triggered
    /// cooldown extend it further.
    pub fn run_cycle(
        &mut self,
        hw: &mut (impl SensorPort + ActuatorPort),
        clock: &mut impl ClockPort,
        sink: &mut impl EventSink,
    ) {
        self.state.cycle += 1;

        // 1. Acquire a usable temperature (may ride out a glitch).
        let reading = self.filter.acquire(hw, clock, sink);

        // 2. Thermostat request.
        let requested = self.thermostat.decide(reading.celsius);

        // 3. Guard arbitration (may block for a cooldown).
        let now = clock.uptime_ms();
        let elapsed_ms = self
            .state
            .last_arbitration_ms
            .map_or(0, |t| now.saturating_sub(t));
        self.state.last_arbitration_ms = Some(now);
        let arbitrated = self.guard.arbitrate(requested, elapsed_ms, hw, clock, sink);

        // 4. Actuate.  Re-asserted every cycle; the port is idempotent.
        let on = arbitrated == Decision::Start;
        hw.set_compressor(on);
        if on != self.state.compressor_on {
            self.state.compressor_on = on;
            sink.emit(&AppEvent::CompressorChanged { on });
            info!("compressor {}", if on { "started" } else { "stopped" });
        }

        // 5. Render current + previous, error glyphs for implausible fields.
        let frame = display::render_frame(
            reading.celsius,
            self.state.previous_reading,
            self.config.valid_range,
        );
        for (slot, glyph) in frame.iter().enumerate() {
            match glyph {
                display::Glyph::Digit(d) => hw.show(slot as u8, *d),
                display::Glyph::Error => hw.show_error(slot as u8),
            }
        }

        // 6. The value just rendered becomes next cycle's "previous".
        let shown_previous = self.state.previous_reading;
        self.state.previous_reading = reading.celsius as i32;

        if reading.plausible {
            self.history.write(reading.celsius);
        }
        let summary = CycleSummary {
            cycle: self.state.cycle,
            celsius: reading.celsius,
            plausible: reading.plausible,
            smoothed_celsius: self.smoothed(reading.celsius),
            previous: shown_previous,
            requested,
            arbitrated,
            compressor_on: on,
            runtime_secs: self.guard.runtime_secs(),
        };
        debug!(
            "cycle {}: {:.2} °C requested={:?} arbitrated={:?}",
            summary.cycle, summary.celsius, requested, arbitrated
        );
        sink.emit(&AppEvent::Cycle(summary));

        // 7. Heartbeat-interleaved pause until the next cycle.
        sleep_with_heartbeat(
            hw,
            clock,
            self.config.cycle_interval_secs.saturating_mul(1_000),
            self.config.heartbeat_period_ms,
        );
    }

    // ── Queries ───────────────────────────────────────────────

    /// Last commanded relay state.
    pub fn compressor_on(&self) -> bool {
        self.state.compressor_on
    }

    /// Previous cycle's displayed temperature.
    pub fn previous_reading(&self) -> i32 {
        self.state.previous_reading
    }

    /// Total control cycles executed since startup.
    pub fn cycle_count(&self) -> u64 {
        self.state.cycle
    }

    /// Accumulated continuous-run time (seconds).
    pub fn runtime_secs(&self) -> u32 {
        self.guard.runtime_secs()
    }

    /// Borrow of the active configuration.
    pub fn config(&self) -> &ControllerConfig {
        &self.config
    }

    // ── Internal ──────────────────────────────────────────────

    /// Mean of the recent plausible readings; falls back to the current
    /// value while the window is still empty.
    fn smoothed(&self, fallback: f32) -> f32 {
        if self.history.len() == 0 {
            return fallback;
        }
        let sum: f32 = self.history.oldest_ordered().copied().sum();
        sum / self.history.len() as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::ports::testing::{MockClock, MockHardware, RecordingSink, Shown};
    use crate::config::ControllerConfig;

    fn controller() -> Controller {
        Controller::new(ControllerConfig::fermenter())
    }

    fn started(hw: &mut MockHardware, sink: &mut RecordingSink) -> Controller {
        let mut c = controller();
        c.start(hw, sink);
        c
    }

    #[test]
    fn warm_cabinet_starts_compressor() {
        let mut hw = MockHardware::with_readings(&[Some(25.0)]);
        let mut clock = MockClock::new();
        let mut sink = RecordingSink::new();
        let mut c = started(&mut hw, &mut sink);

        c.run_cycle(&mut hw, &mut clock, &mut sink);
        assert!(c.compressor_on());
        assert!(hw.is_compressor_on());
    }

    #[test]
    fn settled_cabinet_keeps_compressor_off() {
        let mut hw = MockHardware::with_readings(&[Some(21.5)]);
        let mut clock = MockClock::new();
        let mut sink = RecordingSink::new();
        let mut c = started(&mut hw, &mut sink);

        c.run_cycle(&mut hw, &mut clock, &mut sink);
        assert!(!c.compressor_on());
    }

    #[test]
    fn cycle_pauses_for_the_configured_interval() {
        let mut hw = MockHardware::with_readings(&[Some(21.5)]);
        let mut clock = MockClock::new();
        let mut sink = RecordingSink::new();
        let mut c = started(&mut hw, &mut sink);

        c.run_cycle(&mut hw, &mut clock, &mut sink);
        assert_eq!(clock.total_slept_ms, 30_000);
        assert!(hw.indicator_pulses > 0, "pause must be heartbeat-interleaved");
    }

    #[test]
    fn previous_reading_lags_by_one_cycle() {
        let mut hw = MockHardware::with_readings(&[Some(25.4), Some(21.2)]);
        let mut clock = MockClock::new();
        let mut sink = RecordingSink::new();
        let mut c = started(&mut hw, &mut sink);

        c.run_cycle(&mut hw, &mut clock, &mut sink);
        assert_eq!(c.previous_reading(), 25);

        c.run_cycle(&mut hw, &mut clock, &mut sink);
        assert_eq!(c.previous_reading(), 21);
        // Left field showed the prior 25, right field the current 21.
        assert_eq!(
            hw.frame,
            [
                Some(Shown::Digit(2)),
                Some(Shown::Digit(5)),
                Some(Shown::Digit(2)),
                Some(Shown::Digit(1)),
            ]
        );
    }

    #[test]
    fn implausible_reading_renders_error_field_and_stops() {
        // Probe glitched and stays glitched: resistance mode exhausts, the
        // degraded value fails the thermostat check, relay opens.
        let mut hw = MockHardware::with_readings(&[Some(25.0)]);
        let mut clock = MockClock::new();
        let mut sink = RecordingSink::new();
        let mut c = started(&mut hw, &mut sink);

        c.run_cycle(&mut hw, &mut clock, &mut sink);
        assert!(c.compressor_on());

        hw.readings.extend(std::iter::repeat_n(Some(88.0), 31));
        c.run_cycle(&mut hw, &mut clock, &mut sink);
        assert!(!c.compressor_on(), "untrusted reading must fail safe");
        assert_eq!(hw.frame[2], Some(Shown::Error));
        assert_eq!(hw.frame[3], Some(Shown::Error));
        // The previous (trusted) field still shows numerals.
        assert_eq!(hw.frame[0], Some(Shown::Digit(2)));
        assert_eq!(hw.frame[1], Some(Shown::Digit(5)));
    }

    #[test]
    fn relay_writes_are_idempotent_across_cycles() {
        let mut hw = MockHardware::with_readings(&[Some(21.0), Some(21.2), Some(21.4)]);
        let mut clock = MockClock::new();
        let mut sink = RecordingSink::new();
        let mut c = started(&mut hw, &mut sink);

        for _ in 0..3 {
            c.run_cycle(&mut hw, &mut clock, &mut sink);
        }
        assert_eq!(
            hw.relay_transitions, 0,
            "re-asserting Stop must not toggle the relay"
        );
    }

    #[test]
    fn compressor_change_is_announced_once() {
        let mut hw = MockHardware::with_readings(&[Some(25.0), Some(25.1)]);
        let mut clock = MockClock::new();
        let mut sink = RecordingSink::new();
        let mut c = started(&mut hw, &mut sink);

        c.run_cycle(&mut hw, &mut clock, &mut sink);
        c.run_cycle(&mut hw, &mut clock, &mut sink);

        let changes = sink
            .events
            .iter()
            .filter(|e| matches!(e, AppEvent::CompressorChanged { .. }))
            .count();
        assert_eq!(changes, 1);
    }

    #[test]
    fn long_run_hits_cooldown_and_recovers() {
        // Warm readings forever; 30 s cycles against a 600 s budget.
        let mut hw = MockHardware::new();
        let mut clock = MockClock::new();
        let mut sink = RecordingSink::new();
        let mut c = started(&mut hw, &mut sink);

        let mut saw_cooldown = false;
        for _ in 0..25 {
            hw.readings.push_back(Some(25.0));
            c.run_cycle(&mut hw, &mut clock, &mut sink);
            if sink
                .events
                .iter()
                .any(|e| matches!(e, AppEvent::CooldownStarted { .. }))
            {
                saw_cooldown = true;
                break;
            }
        }
        assert!(saw_cooldown, "run budget never triggered a rest");
        assert!(!c.compressor_on());
        assert_eq!(c.runtime_secs(), 0);

        // Next warm cycle starts cooling again.
        hw.readings.push_back(Some(25.0));
        c.run_cycle(&mut hw, &mut clock, &mut sink);
        assert!(c.compressor_on());
    }

    #[test]
    fn telemetry_summary_every_cycle() {
        let mut hw = MockHardware::with_readings(&[Some(21.0), Some(21.5)]);
        let mut clock = MockClock::new();
        let mut sink = RecordingSink::new();
        let mut c = started(&mut hw, &mut sink);

        c.run_cycle(&mut hw, &mut clock, &mut sink);
        c.run_cycle(&mut hw, &mut clock, &mut sink);

        let summaries: Vec<_> = sink
            .events
            .iter()
            .filter_map(|e| match e {
                AppEvent::Cycle(s) => Some(*s),
                _ => None,
            })
            .collect();
        assert_eq!(summaries.len(), 2);
        assert_eq!(summaries[0].cycle, 1);
        assert_eq!(summaries[1].cycle, 2);
        assert!((summaries[1].smoothed_celsius - 21.25).abs() < 0.01);
    }
}
