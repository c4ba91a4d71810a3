//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing structured controller events to the
//! ESP-IDF logger (which goes to UART / USB-CDC in production).  Nothing in
//! the core formats strings; everything human-readable is produced here.

use log::{info, warn};

use crate::app::events::AppEvent;
use crate::app::ports::EventSink;
use crate::control::thermostat::Decision;

/// Adapter that logs every [`AppEvent`] to the serial console.
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &AppEvent) {
        match event {
            AppEvent::Cycle(s) => {
                info!(
                    "CYCLE | #{} | T={:.2}\u{00b0}C{} (avg {:.2}) prev={} | {} -> {} | \
                     compressor={} run={}s",
                    s.cycle,
                    s.celsius,
                    if s.plausible { "" } else { " (untrusted)" },
                    s.smoothed_celsius,
                    s.previous,
                    verb(s.requested),
                    verb(s.arbitrated),
                    if s.compressor_on { "ON" } else { "off" },
                    s.runtime_secs,
                );
            }
            AppEvent::CompressorChanged { on } => {
                info!("RELAY | compressor {}", if *on { "energised" } else { "released" });
            }
            AppEvent::ReadingRejected { reason, celsius } => match celsius {
                Some(c) => warn!("PROBE | {reason}: {c:.3}\u{00b0}C, retrying"),
                None => warn!("PROBE | {reason}, retrying"),
            },
            AppEvent::ResistanceWait { attempt, wait_secs } => {
                info!("PROBE | retry {attempt}: waiting {wait_secs}s before re-read");
            }
            AppEvent::ResistanceResolved { celsius } => {
                info!("PROBE | recovered, correct temp is {celsius:.3}\u{00b0}C");
            }
            AppEvent::ResistanceExhausted { celsius } => {
                warn!("PROBE | glitch persists, carrying {celsius:.3}\u{00b0}C");
            }
            AppEvent::CooldownStarted { ran_secs } => {
                warn!("GUARD | compressor ran {ran_secs}s, forced rest begins");
            }
            AppEvent::CooldownFinished => {
                info!("GUARD | rest complete, duty budget reset");
            }
            AppEvent::Started { profile } => {
                info!("START | profile={}", profile.name());
            }
        }
    }
}

fn verb(d: Decision) -> &'static str {
    match d {
        Decision::Start => "start",
        Decision::Stop => "stop",
    }
}
