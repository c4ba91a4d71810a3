//! Sensor subsystem.
//!
//! One probe: the cabinet NTC thermistor.  The driver produces raw
//! `Option<f32>` readings; plausibility filtering is the control core's
//! business.

pub mod temperature;
