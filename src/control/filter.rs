//! Sensor filter with escalating-retry glitch resistance.
//!
//! The probe occasionally emits electrically-induced outliers.  A reading
//! that fails the plausibility check does not fail the cycle: the filter
//! waits out the glitch with escalating delays (heartbeat still pulsing),
//! re-reading after each wait, and only gives up once the longest configured
//! wait has been spent.  The loop is never blocked indefinitely — on
//! exhaustion the last raw value is handed onwards and the thermostat's own
//! range check rejects it again.

use log::{info, warn};

use crate::app::events::AppEvent;
use crate::app::ports::{ActuatorPort, ClockPort, EventSink, SensorPort};
use crate::config::{ControllerConfig, ValidRange};
use crate::control::sleep_with_heartbeat;
use crate::error::SensorError;

/// One validated-or-degraded temperature, produced once per control cycle.
#[derive(Debug, Clone, Copy)]
pub struct Reading {
    /// Degrees Celsius.
    pub celsius: f32,
    /// Whether the value passed the plausibility check.
    pub plausible: bool,
}

/// Validates raw readings and rides out transient probe faults.
#[derive(Debug, Clone)]
pub struct SensorFilter {
    valid: ValidRange,
    initial_wait_secs: u32,
    step_secs: u32,
    max_wait_secs: u32,
    heartbeat_ms: u32,
}

impl SensorFilter {
    pub fn from_config(cfg: &ControllerConfig) -> Self {
        Self {
            valid: cfg.valid_range,
            initial_wait_secs: cfg.retry_initial_secs,
            step_secs: cfg.retry_step_secs,
            max_wait_secs: cfg.retry_max_wait_secs,
            heartbeat_ms: cfg.retry_heartbeat_ms,
        }
    }

    /// Obtain a usable temperature.  Never fails; the result may be flagged
    /// implausible if the probe would not settle.
    pub fn acquire(
        &self,
        hw: &mut (impl SensorPort + ActuatorPort),
        clock: &mut impl ClockPort,
        sink: &mut impl EventSink,
    ) -> Reading {
        let first = hw.read_temperature();
        if let Some(celsius) = first {
            if self.valid.is_plausible(celsius) {
                // Common fast path.
                return Reading {
                    celsius,
                    plausible: true,
                };
            }
        }

        let reason = if first.is_some() {
            SensorError::Implausible
        } else {
            SensorError::Unavailable
        };
        warn!("probe glitch ({reason}), entering resistance mode");
        sink.emit(&AppEvent::ReadingRejected {
            reason,
            celsius: first,
        });
        self.resist(first, hw, clock, sink)
    }

    /// Escalating re-read loop: wait 10 s, 20 s, ... up to the ceiling,
    /// returning the first plausible value seen.
    fn resist(
        &self,
        mut last: Option<f32>,
        hw: &mut (impl SensorPort + ActuatorPort),
        clock: &mut impl ClockPort,
        sink: &mut impl EventSink,
    ) -> Reading {
        let mut wait_secs = self.initial_wait_secs;
        let mut attempt = 0u32;

        while wait_secs <= self.max_wait_secs {
            attempt += 1;
            sink.emit(&AppEvent::ResistanceWait {
                attempt,
                wait_secs,
            });
            sleep_with_heartbeat(hw, clock, wait_secs.saturating_mul(1_000), self.heartbeat_ms);

            match hw.read_temperature() {
                Some(celsius) if self.valid.is_plausible(celsius) => {
                    info!("probe settled at {celsius:.3} °C after {attempt} retries");
                    sink.emit(&AppEvent::ResistanceResolved { celsius });
                    return Reading {
                        celsius,
                        plausible: true,
                    };
                }
                Some(celsius) => last = Some(celsius),
                None => {}
            }

            wait_secs += self.step_secs;
        }

        // A probe that never answered leaves nothing to degrade to; NaN
        // fails every downstream range check.
        let celsius = last.unwrap_or(f32::NAN);
        warn!("probe still glitched after {attempt} retries, carrying {celsius:.3} °C");
        sink.emit(&AppEvent::ResistanceExhausted { celsius });
        Reading {
            celsius,
            plausible: false,
        }
    }
}
