//! Controller configuration parameters
//!
//! All tunable parameters for the BrewChill controller.  The struct is
//! immutable once built: a profile is chosen at compile time and never
//! mutated at runtime.

use serde::{Deserialize, Serialize};

/// Which cabinet this firmware is driving.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Profile {
    Kegerator,
    Fermenter,
}

impl Profile {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Kegerator => "kegerator",
            Self::Fermenter => "fermenter",
        }
    }
}

/// Target temperature range in which the compressor should stay off.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct TemperatureBand {
    /// Lower edge of the target range (°C).
    pub low: f32,
    /// Upper edge of the target range (°C); crossing it starts the compressor.
    pub high: f32,
}

impl TemperatureBand {
    /// Strictly inside the band — boundary values count as outside.
    pub fn contains(&self, celsius: f32) -> bool {
        celsius > self.low && celsius < self.high
    }
}

/// Plausibility range separating real readings from sensor glitches.
///
/// Distinct from [`TemperatureBand`]: this describes what the probe can
/// physically report in this installation, not what we want the chamber
/// to sit at.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ValidRange {
    /// Coldest plausible reading (°C).
    pub min: f32,
    /// Warmest plausible reading (°C).
    pub max: f32,
}

impl ValidRange {
    /// Strict check — values equal to either bound are treated as glitches.
    pub fn is_plausible(&self, celsius: f32) -> bool {
        celsius > self.min && celsius < self.max
    }
}

/// Core controller configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ControllerConfig {
    /// Profile identity (shown in the boot banner and telemetry).
    pub profile: Profile,

    // --- Temperature policy ---
    /// Desired chamber temperature range.
    pub band: TemperatureBand,
    /// Plausibility bounds for raw sensor readings.
    pub valid_range: ValidRange,

    // --- Compressor protection ---
    /// Continuous-run budget before a forced rest (seconds).
    pub working_secs_before_cooldown: u32,
    /// Mandatory rest once the run budget is spent (seconds).
    pub cooldown_secs: u32,

    // --- Sensor retry (resistance mode) ---
    /// First escalating wait after an implausible reading (seconds).
    pub retry_initial_secs: u32,
    /// Wait increment per failed re-read (seconds).
    pub retry_step_secs: u32,
    /// Longest single wait; reaching it ends the escalation (seconds).
    pub retry_max_wait_secs: u32,
    /// Heartbeat half-cycle while waiting out a glitch (milliseconds).
    pub retry_heartbeat_ms: u32,

    // --- Timing ---
    /// Pause between control cycles (seconds).
    pub cycle_interval_secs: u32,
    /// Heartbeat half-cycle during the inter-cycle pause (milliseconds).
    pub heartbeat_period_ms: u32,
}

impl ControllerConfig {
    /// Cold-storage profile: serving keg at cellar temperature.
    pub fn kegerator() -> Self {
        Self {
            profile: Profile::Kegerator,
            band: TemperatureBand { low: 4.0, high: 8.0 },
            ..Self::base()
        }
    }

    /// Fermentation profile: ale yeast comfort range.
    pub fn fermenter() -> Self {
        Self {
            profile: Profile::Fermenter,
            band: TemperatureBand {
                low: 20.0,
                high: 23.0,
            },
            ..Self::base()
        }
    }

    /// The profile selected at build time via the `fermenter` cargo feature.
    pub fn active_profile() -> Self {
        if cfg!(feature = "fermenter") {
            Self::fermenter()
        } else {
            Self::kegerator()
        }
    }

    /// Sanity-check the profile before the control loop starts.
    ///
    /// A misconfigured band or a zero retry step would make the loop spin or
    /// chatter the relay, so refuse to run rather than clamp silently.
    pub fn validate(&self) -> crate::error::Result<()> {
        if self.band.low >= self.band.high {
            return Err(crate::error::Error::Config("band low must be below high"));
        }
        if self.valid_range.min >= self.valid_range.max {
            return Err(crate::error::Error::Config("valid range min must be below max"));
        }
        if self.retry_step_secs == 0 {
            return Err(crate::error::Error::Config("retry step must be non-zero"));
        }
        if self.cycle_interval_secs == 0 {
            return Err(crate::error::Error::Config("cycle interval must be non-zero"));
        }
        if self.heartbeat_period_ms == 0 || self.retry_heartbeat_ms == 0 {
            return Err(crate::error::Error::Config("heartbeat period must be non-zero"));
        }
        Ok(())
    }

    fn base() -> Self {
        Self {
            profile: Profile::Kegerator,
            band: TemperatureBand { low: 0.0, high: 0.0 },

            // The probe never sees anything outside this in either cabinet;
            // anything else is electrical noise on the divider.
            valid_range: ValidRange {
                min: -4.0,
                max: 40.0,
            },

            // Compressor protection
            working_secs_before_cooldown: 600, // 10 min
            cooldown_secs: 120,                // 2 min rest

            // Resistance mode: 10 s, 20 s, ... capped at 5 min per wait
            retry_initial_secs: 10,
            retry_step_secs: 10,
            retry_max_wait_secs: 300,
            retry_heartbeat_ms: 300,

            // Timing
            cycle_interval_secs: 30,
            heartbeat_period_ms: 2_000,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kegerator_profile_is_sane() {
        let c = ControllerConfig::kegerator();
        assert!(c.band.low < c.band.high);
        assert!(c.valid_range.min < c.band.low);
        assert!(c.valid_range.max > c.band.high);
        assert!(c.working_secs_before_cooldown > 0);
        assert!(c.cooldown_secs > 0);
        assert!(c.cycle_interval_secs > 0);
        assert!(c.heartbeat_period_ms > 0);
    }

    #[test]
    fn fermenter_band_sits_above_kegerator_band() {
        let keg = ControllerConfig::kegerator();
        let ferm = ControllerConfig::fermenter();
        assert!(
            ferm.band.low > keg.band.high,
            "profiles must not overlap or the presets are miswired"
        );
    }

    #[test]
    fn plausibility_bounds_are_strict() {
        let c = ControllerConfig::kegerator();
        assert!(!c.valid_range.is_plausible(c.valid_range.min));
        assert!(!c.valid_range.is_plausible(c.valid_range.max));
        assert!(c.valid_range.is_plausible(c.valid_range.min + 0.1));
        assert!(c.valid_range.is_plausible(c.valid_range.max - 0.1));
    }

    #[test]
    fn band_check_is_strict_at_boundaries() {
        let band = TemperatureBand { low: 4.0, high: 8.0 };
        assert!(!band.contains(4.0));
        assert!(!band.contains(8.0));
        assert!(band.contains(6.0));
    }

    #[test]
    fn retry_escalation_terminates() {
        let c = ControllerConfig::kegerator();
        assert!(c.retry_step_secs > 0, "a zero step would loop forever");
        assert!(c.retry_initial_secs <= c.retry_max_wait_secs);
    }

    #[test]
    fn both_presets_validate() {
        ControllerConfig::kegerator().validate().unwrap();
        ControllerConfig::fermenter().validate().unwrap();
    }

    #[test]
    fn inverted_band_is_rejected() {
        let mut c = ControllerConfig::kegerator();
        c.band = TemperatureBand { low: 8.0, high: 4.0 };
        assert!(c.validate().is_err());
    }

    #[test]
    fn serde_roundtrip() {
        let c = ControllerConfig::fermenter();
        let json = serde_json::to_string(&c).unwrap();
        let c2: ControllerConfig = serde_json::from_str(&json).unwrap();
        assert!((c.band.low - c2.band.low).abs() < 0.001);
        assert!((c.band.high - c2.band.high).abs() < 0.001);
        assert_eq!(c.cooldown_secs, c2.cooldown_secs);
        assert_eq!(c.cycle_interval_secs, c2.cycle_interval_secs);
    }
}
