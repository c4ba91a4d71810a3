//! BrewChill Firmware — Main Entry Point
//!
//! Hexagonal architecture: one blocking control loop over port traits.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                     Adapters (outer ring)                    │
//! │                                                              │
//! │  HardwareAdapter          LogEventSink        TimeAdapter    │
//! │  (Sensor+Actuator)        (EventSink)         (ClockPort)    │
//! │                                                              │
//! │  ─────────────── Port Trait Boundary ──────────────────      │
//! │                                                              │
//! │  ┌────────────────────────────────────────────────────┐      │
//! │  │             Controller (pure logic)                │      │
//! │  │  Filter · Thermostat · Duty-Cycle Guard            │      │
//! │  └────────────────────────────────────────────────────┘      │
//! └──────────────────────────────────────────────────────────────┘
//! ```
#![deny(unused_must_use)]

// ── Module declarations ───────────────────────────────────────
pub mod app;
pub mod config;
pub mod control;
pub mod error;

mod adapters;
mod display;
mod drivers;
mod pins;
mod sensors;

// ── Imports ───────────────────────────────────────────────────
use anyhow::Result;
use log::info;

use adapters::hardware::HardwareAdapter;
use adapters::log_sink::LogEventSink;
use adapters::time::TimeAdapter;
use app::service::Controller;
use config::ControllerConfig;
use drivers::display_tm1637::Tm1637Display;
use drivers::indicator::HeartbeatLed;
use drivers::relay::CompressorRelay;
use drivers::watchdog::Watchdog;
use sensors::temperature::CabinetProbe;

// ── Main ──────────────────────────────────────────────────────

fn main() -> Result<()> {
    // ── 1. ESP-IDF bootstrap ──────────────────────────────────
    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init()?;

    info!("╔══════════════════════════════════════╗");
    info!("║  BrewChill v{}                      ║", env!("CARGO_PKG_VERSION"));
    info!("╚══════════════════════════════════════╝");

    // ── 2. Configuration (build-time profile, validated once) ─
    let config = ControllerConfig::active_profile();
    if let Err(e) = config.validate() {
        anyhow::bail!("configuration rejected: {e}");
    }
    info!(
        "profile {}: band ({:.1}, {:.1}) °C, plausibility ({:.1}, {:.1}) °C",
        config.profile.name(),
        config.band.low,
        config.band.high,
        config.valid_range.min,
        config.valid_range.max,
    );

    // ── 3. Initialise hardware peripherals ────────────────────
    if let Err(e) = drivers::hw_init::init_peripherals() {
        // Peripheral init failure is critical — log and halt.
        // In production this triggers the watchdog reset after timeout.
        log::error!("HAL init failed: {e} — halting");
        #[allow(clippy::empty_loop)]
        loop {}
    }

    // ── 4. Construct drivers and adapters ─────────────────────
    let probe = CabinetProbe::new(pins::TEMP_ADC_GPIO);
    let relay = CompressorRelay::new();
    let display = Tm1637Display::new();
    let led = HeartbeatLed::new();
    let watchdog = Watchdog::new();

    let mut hw = HardwareAdapter::new(probe, relay, display, led, watchdog);
    let mut clock = TimeAdapter::new();
    let mut sink = LogEventSink::new();

    // ── 5. Construct the controller ───────────────────────────
    let mut controller = Controller::new(config);
    controller.start(&mut hw, &mut sink);

    info!("System ready. Entering control loop.");

    // ── 6. Control loop ───────────────────────────────────────
    // One cycle per iteration; run_cycle blocks through the inter-cycle
    // pause (and any resistance retries or cooldown), heartbeat pulsing
    // the whole time.  No exit path: power-off is the shutdown story.
    loop {
        controller.run_cycle(&mut hw, &mut clock, &mut sink);
    }
}
