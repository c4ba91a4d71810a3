//! Compressor relay driver (opto-isolated relay module, active HIGH).
//!
//! ## Safety contract
//!
//! The relay is a dumb actuator: duty-cycle protection lives in the control
//! core, not here.  What this driver does guarantee is idempotence — writing
//! the level it already holds touches nothing — and a de-energised boot
//! state, because a compressor that starts on power-up is a hazard.
//!
//! ## Dual-target design
//!
//! On ESP-IDF: drives the relay GPIO via hw_init helpers.
//! On host/test: tracks state in-memory only.

use core::convert::Infallible;

use embedded_hal::digital::{ErrorType, OutputPin};
use log::debug;

use crate::drivers::hw_init;
use crate::pins;

pub struct CompressorRelay {
    energised: bool,
}

impl CompressorRelay {
    /// The relay boots open regardless of what the GPIO held before reset.
    pub fn new() -> Self {
        hw_init::gpio_write(pins::RELAY_GPIO, false);
        Self { energised: false }
    }

    /// Close or open the relay.  Repeat writes of the same state are no-ops.
    pub fn set(&mut self, on: bool) {
        if on == self.energised {
            return;
        }
        hw_init::gpio_write(pins::RELAY_GPIO, on);
        self.energised = on;
        debug!("relay {}", if on { "closed" } else { "open" });
    }

    pub fn is_energised(&self) -> bool {
        self.energised
    }
}

// The relay is just a pin from the HAL's point of view, so expose it as one.

impl ErrorType for CompressorRelay {
    type Error = Infallible;
}

impl OutputPin for CompressorRelay {
    fn set_low(&mut self) -> core::result::Result<(), Self::Error> {
        self.set(false);
        Ok(())
    }

    fn set_high(&mut self) -> core::result::Result<(), Self::Error> {
        self.set(true);
        Ok(())
    }
}
