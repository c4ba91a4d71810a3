//! Duty-cycle guard — mandatory rest after sustained compressor operation.
//!
//! Domestic compressors tolerate neither short-cycling nor near-continuous
//! running.  Short-cycling is already prevented upstream (every Stop request
//! zeroes the run budget), so this guard handles the other end: once the
//! compressor has run for the configured budget without a break, the relay
//! is opened and held open for a fixed cooldown before cooling may resume.
//!
//! The cooldown is a *blocking* wait — a hard safety floor, not best-effort.
//! The heartbeat keeps pulsing throughout so the rest period is observably
//! different from a hang.

use log::{info, warn};

use crate::app::events::AppEvent;
use crate::app::ports::{ActuatorPort, ClockPort, EventSink};
use crate::config::ControllerConfig;
use crate::control::sleep_with_heartbeat;
use crate::control::thermostat::Decision;

/// Arbitrates thermostat requests against the accumulated run budget.
#[derive(Debug)]
pub struct DutyCycleGuard {
    working_budget_ms: u64,
    cooldown_ms: u32,
    heartbeat_ms: u32,
    /// Continuous-run accumulator; zeroed on Stop requests and after rest.
    runtime_ms: u64,
}

impl DutyCycleGuard {
    pub fn from_config(cfg: &ControllerConfig) -> Self {
        Self {
            working_budget_ms: u64::from(cfg.working_secs_before_cooldown) * 1_000,
            cooldown_ms: cfg.cooldown_secs.saturating_mul(1_000),
            heartbeat_ms: cfg.heartbeat_period_ms,
            runtime_ms: 0,
        }
    }

    /// Accumulated continuous-run time, in whole seconds.
    pub fn runtime_secs(&self) -> u32 {
        (self.runtime_ms / 1_000) as u32
    }

    /// Arbitrate one thermostat request.
    ///
    /// `elapsed_ms` is the wall time since the previous arbitration — waits
    /// spent inside the cycle count too, because the relay was closed for
    /// all of it.
    pub fn arbitrate(
        &mut self,
        requested: Decision,
        elapsed_ms: u64,
        hw: &mut impl ActuatorPort,
        clock: &mut impl ClockPort,
        sink: &mut impl EventSink,
    ) -> Decision {
        match requested {
            Decision::Stop => {
                self.runtime_ms = 0;
                Decision::Stop
            }
            Decision::Start => {
                self.runtime_ms = self.runtime_ms.saturating_add(elapsed_ms);
                if self.runtime_ms < self.working_budget_ms {
                    return Decision::Start;
                }

                if hw.is_compressor_on() {
                    self.rest(hw, clock, sink);
                    Decision::Stop
                } else {
                    // Budget notionally spent but the compressor never ran
                    // through it — nothing to protect, just restart the count.
                    self.runtime_ms = 0;
                    Decision::Start
                }
            }
        }
    }

    /// Open the relay and hold it open for the cooldown period.
    fn rest(
        &mut self,
        hw: &mut impl ActuatorPort,
        clock: &mut impl ClockPort,
        sink: &mut impl EventSink,
    ) {
        let ran_secs = self.runtime_secs();
        warn!(
            "run budget spent after {ran_secs} s, resting compressor for {} s",
            self.cooldown_ms / 1_000
        );
        sink.emit(&AppEvent::CooldownStarted { ran_secs });

        // The relay must already be open while the rest elapses.
        hw.set_compressor(false);
        sleep_with_heartbeat(hw, clock, self.cooldown_ms, self.heartbeat_ms);

        self.runtime_ms = 0;
        info!("cooldown finished, arbitration resumed");
        sink.emit(&AppEvent::CooldownFinished);
    }
}
