//! Outbound application events.
//!
//! The [`Controller`](super::service::Controller) emits these through the
//! [`EventSink`](super::ports::EventSink) port.  Adapters on the other side
//! decide what to do with them — today that is the serial log; the port
//! exists so nothing in the core ever formats a string.

use crate::config::Profile;
use crate::control::thermostat::Decision;
use crate::error::SensorError;

/// Structured events emitted by the controller core.
#[derive(Debug, Clone)]
pub enum AppEvent {
    /// The controller has started (carries the active profile).
    Started { profile: Profile },

    /// The relay changed state this cycle.
    CompressorChanged { on: bool },

    /// A raw reading failed validation and triggered resistance mode.
    ReadingRejected {
        reason: SensorError,
        celsius: Option<f32>,
    },

    /// One escalating wait inside resistance mode is about to start.
    ResistanceWait { attempt: u32, wait_secs: u32 },

    /// Resistance mode obtained a plausible reading and ended early.
    ResistanceResolved { celsius: f32 },

    /// Resistance mode ran out of escalation steps; the controller carries
    /// on with the last raw value (the thermostat will fail-safe on it).
    ResistanceExhausted { celsius: f32 },

    /// The run budget is spent: the guard opened the relay and is holding
    /// it open for the cooldown period.
    CooldownStarted { ran_secs: u32 },

    /// Cooldown elapsed; normal arbitration resumes with a zeroed budget.
    CooldownFinished,

    /// End-of-cycle summary, emitted every cycle.
    Cycle(CycleSummary),
}

/// A point-in-time snapshot of one control cycle, suitable for logging.
#[derive(Debug, Clone, Copy)]
pub struct CycleSummary {
    /// Monotonic cycle number since boot.
    pub cycle: u64,
    /// The temperature this cycle acted on (°C).
    pub celsius: f32,
    /// Whether that value passed the plausibility check.
    pub plausible: bool,
    /// Short-window average of recent plausible readings (°C).
    pub smoothed_celsius: f32,
    /// Previous cycle's displayed temperature (integer-truncated).
    pub previous: i32,
    /// What the thermostat asked for.
    pub requested: Decision,
    /// What the guard let through.
    pub arbitrated: Decision,
    /// Relay state after actuation.
    pub compressor_on: bool,
    /// Accumulated continuous-run time (seconds).
    pub runtime_secs: u32,
}
