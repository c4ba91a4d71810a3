//! Hardware adapter — bridges real peripherals to domain port traits.
//!
//! Owns the probe and all actuator drivers, exposing them through
//! [`SensorPort`] and [`ActuatorPort`].  This is the only module in the
//! system that hands hardware to the domain.  On non-espidf targets, the
//! underlying drivers use cfg-gated simulation stubs.

use crate::app::ports::{ActuatorPort, SensorPort};
use crate::drivers::display_tm1637::{Tm1637Display, GLYPH_ERR};
use crate::drivers::indicator::HeartbeatLed;
use crate::drivers::relay::CompressorRelay;
use crate::drivers::watchdog::Watchdog;
use crate::sensors::temperature::CabinetProbe;

/// Concrete adapter that combines all hardware behind port traits.
pub struct HardwareAdapter {
    probe: CabinetProbe,
    relay: CompressorRelay,
    display: Tm1637Display,
    led: HeartbeatLed,
    watchdog: Watchdog,
}

impl HardwareAdapter {
    pub fn new(
        probe: CabinetProbe,
        relay: CompressorRelay,
        display: Tm1637Display,
        led: HeartbeatLed,
        watchdog: Watchdog,
    ) -> Self {
        Self {
            probe,
            relay,
            display,
            led,
            watchdog,
        }
    }
}

// ── SensorPort implementation ─────────────────────────────────

impl SensorPort for HardwareAdapter {
    fn read_temperature(&mut self) -> Option<f32> {
        self.probe.read_celsius()
    }
}

// ── ActuatorPort implementation ───────────────────────────────

impl ActuatorPort for HardwareAdapter {
    fn set_compressor(&mut self, on: bool) {
        self.relay.set(on);
    }

    fn is_compressor_on(&self) -> bool {
        self.relay.is_energised()
    }

    fn show(&mut self, slot: u8, digit: u8) {
        self.display.set_digit(slot, digit.min(9));
    }

    fn show_error(&mut self, slot: u8) {
        self.display.set_digit(slot, GLYPH_ERR);
    }

    fn set_indicator(&mut self, on: bool) {
        self.led.set(on);
        // Every pulse doubles as the TWDT kick; the heartbeat never pauses
        // longer than its period, the watchdog tolerates ten seconds.
        self.watchdog.feed();
    }

    fn all_off(&mut self) {
        self.relay.set(false);
        self.display.clear();
        self.led.set(false);
    }
}
