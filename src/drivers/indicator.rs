//! Heartbeat LED driver.
//!
//! A single GPIO LED toggled by the heartbeat sleep.  Its blink is the only
//! externally visible difference between "waiting out a delay" and "hung".
//!
//! ## Dual-target design
//!
//! On ESP-IDF: drives the LED GPIO via hw_init.
//! On host/test: tracks state in-memory only.

use crate::drivers::hw_init;
use crate::pins;

pub struct HeartbeatLed {
    lit: bool,
}

impl HeartbeatLed {
    pub fn new() -> Self {
        hw_init::gpio_write(pins::HEARTBEAT_LED_GPIO, false);
        Self { lit: false }
    }

    pub fn set(&mut self, on: bool) {
        hw_init::gpio_write(pins::HEARTBEAT_LED_GPIO, on);
        self.lit = on;
    }

    pub fn is_lit(&self) -> bool {
        self.lit
    }
}
