//! Controller core — pure domain orchestration, zero I/O.
//!
//! This module wires the control components (sensor filter, thermostat,
//! duty-cycle guard) into one per-cycle service.  All interaction with
//! hardware happens through **port traits** defined in [`ports`], keeping
//! this layer fully testable without real peripherals.

pub mod events;
pub mod ports;
pub mod service;
