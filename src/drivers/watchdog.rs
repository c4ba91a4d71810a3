//! Task Watchdog Timer (TWDT) driver.
//!
//! Resets the device if the control loop stalls.  There is no periodic
//! "feed task": every heartbeat pulse kicks the timer instead, so the same
//! blink that shows liveness to a human proves it to the hardware.  The
//! longest gap between pulses is one heartbeat period — far inside the
//! timeout.

#[cfg(target_os = "espidf")]
use esp_idf_svc::sys::*;

/// Stall budget before the TWDT panics the device.
#[cfg(target_os = "espidf")]
const TIMEOUT_MS: u32 = 10_000;

pub struct Watchdog {
    #[cfg(target_os = "espidf")]
    subscribed: bool,
}

impl Default for Watchdog {
    fn default() -> Self {
        Self::new()
    }
}

impl Watchdog {
    /// Initialise and subscribe the current task to the TWDT.
    pub fn new() -> Self {
        #[cfg(target_os = "espidf")]
        {
            // SAFETY: plain IDF calls, no aliasing; called once at boot.
            unsafe {
                let cfg = esp_task_wdt_config_t {
                    timeout_ms: TIMEOUT_MS,
                    idle_core_mask: 0,
                    trigger_panic: true,
                };
                let ret = esp_task_wdt_reconfigure(&cfg);
                if ret != ESP_OK {
                    log::warn!("TWDT reconfigure returned {ret} (may already be configured)");
                }

                let ret = esp_task_wdt_add(core::ptr::null_mut());
                let subscribed = ret == ESP_OK;
                if subscribed {
                    log::info!("watchdog: subscribed ({TIMEOUT_MS} ms, panic on trigger)");
                } else {
                    log::warn!("watchdog: failed to subscribe ({ret})");
                }

                Self { subscribed }
            }
        }

        #[cfg(not(target_os = "espidf"))]
        {
            log::info!("watchdog(sim): no-op");
            Self {}
        }
    }

    /// Kick the timer.  Wired to the heartbeat LED toggle.
    pub fn feed(&self) {
        #[cfg(target_os = "espidf")]
        {
            if self.subscribed {
                // SAFETY: task was subscribed in new(); reset is re-entrant.
                unsafe {
                    esp_task_wdt_reset();
                }
            }
        }
    }
}
