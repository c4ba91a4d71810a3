//! Dead-band thermostat.
//!
//! Maps a temperature to a compressor request.  The compressor is a cooling
//! device, so "too warm" is the only condition that starts it; everything
//! else — in band, implausible, too cold — stops it.

use crate::config::{TemperatureBand, ValidRange};

/// What the thermostat wants the compressor to do this cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// Energise the compressor.
    Start,
    /// Release (or leave released) the compressor.
    Stop,
}

/// Threshold decisioning against the configured band.
#[derive(Debug, Clone, Copy)]
pub struct Thermostat {
    band: TemperatureBand,
    valid: ValidRange,
}

impl Thermostat {
    pub fn new(band: TemperatureBand, valid: ValidRange) -> Self {
        Self { band, valid }
    }

    /// Decide for one validated-or-degraded reading.
    ///
    /// The checks run in a fixed order; if the plausibility range ever
    /// overlaps the band oddly, the earlier check wins.  Values landing
    /// exactly on a band edge resolve to `Stop`.
    pub fn decide(&self, celsius: f32) -> Decision {
        // 1. Already in the target range: nothing to do.
        if self.band.contains(celsius) {
            return Decision::Stop;
        }

        // 2. Untrusted reading: never run the compressor on a glitch.
        if !self.valid.is_plausible(celsius) {
            return Decision::Stop;
        }

        // 3. Cold enough (or colder): a fridge cannot warm the cabinet.
        if celsius < self.band.low {
            return Decision::Stop;
        }

        // 4. Too warm: cool it down.
        if celsius > self.band.high {
            return Decision::Start;
        }

        Decision::Stop
    }
}
