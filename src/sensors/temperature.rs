//! NTC thermistor temperature sensor (10 kOhm @ 25 C, B = 3950).
//!
//! Wired in a voltage-divider with a fixed 10 kOhm resistor against the
//! cabinet air, read via the ESP32-S3 ADC. The simplified Beta
//! (Steinhart-Hart) equation converts resistance to temperature.
//!
//! A reading pinned to either supply rail means the divider is open or
//! shorted — there is no temperature in that signal, so the read reports
//! `None` and the control core's retry logic takes over.
//!
//! ## Dual-target design
//!
//! On ESP-IDF: reads ADC1_CH8 via the oneshot API (initialised by hw_init).
//! On host/test: reads from a static AtomicU16 for injection.

use core::sync::atomic::AtomicU16;
#[cfg(not(target_os = "espidf"))]
use core::sync::atomic::Ordering;

#[cfg(target_os = "espidf")]
use crate::drivers::hw_init;
static SIM_TEMP_ADC: AtomicU16 = AtomicU16::new(2048);

#[cfg(not(target_os = "espidf"))]
pub fn sim_set_temp_adc(raw: u16) {
    SIM_TEMP_ADC.store(raw, Ordering::Relaxed);
}

const R25: f32 = 10_000.0;
const BETA: f32 = 3950.0;
const T25_K: f32 = 298.15;
const R_DIVIDER: f32 = 10_000.0;
const ADC_MAX: f32 = 4095.0;
const V_REF: f32 = 3.3;

/// Rail margin: anything this close to 0 V or V_REF is a wiring fault.
const V_RAIL_MARGIN: f32 = 0.01;

pub struct CabinetProbe {
    _adc_gpio: i32,
}

impl CabinetProbe {
    pub fn new(adc_gpio: i32) -> Self {
        Self {
            _adc_gpio: adc_gpio,
        }
    }

    /// One measurement attempt.  `None` when the divider reads as open or
    /// shorted; no retry or smoothing happens at this layer.
    pub fn read_celsius(&mut self) -> Option<f32> {
        let raw = self.read_adc();
        Self::adc_to_celsius(raw)
    }

    #[cfg(target_os = "espidf")]
    fn read_adc(&self) -> u16 {
        hw_init::adc1_read(hw_init::ADC1_CH_TEMP)
    }

    #[cfg(not(target_os = "espidf"))]
    fn read_adc(&self) -> u16 {
        SIM_TEMP_ADC.load(Ordering::Relaxed)
    }

    fn adc_to_celsius(raw: u16) -> Option<f32> {
        let voltage = (f32::from(raw) / ADC_MAX) * V_REF;
        if voltage <= V_RAIL_MARGIN || voltage >= (V_REF - V_RAIL_MARGIN) {
            return None;
        }
        let r_ntc = R_DIVIDER * voltage / (V_REF - voltage);
        let inv_t = (1.0 / T25_K) + (1.0 / BETA) * (r_ntc / R25).ln();
        if inv_t <= 0.0 {
            return None;
        }
        Some((1.0 / inv_t) - 273.15)
    }
}
