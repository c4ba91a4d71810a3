//! System time adapter.
//!
//! Implements [`ClockPort`](crate::app::ports::ClockPort) for the controller.
//!
//! - **`target_os = "espidf"`** — uptime from `esp_timer_get_time()` (the
//!   ESP-IDF high-resolution monotonic timer); sleeps via the FreeRTOS
//!   delay so the idle task still runs.
//! - **`not(target_os = "espidf")`** — `std::time::Instant` and a thread
//!   sleep, for host-side simulation.

use crate::app::ports::ClockPort;

pub struct TimeAdapter {
    #[cfg(not(target_os = "espidf"))]
    start: std::time::Instant,
}

impl Default for TimeAdapter {
    fn default() -> Self {
        Self::new()
    }
}

impl TimeAdapter {
    pub fn new() -> Self {
        Self {
            #[cfg(not(target_os = "espidf"))]
            start: std::time::Instant::now(),
        }
    }
}

impl ClockPort for TimeAdapter {
    #[cfg(target_os = "espidf")]
    fn uptime_ms(&self) -> u64 {
        // SAFETY: esp_timer_get_time is a read-only monotonic counter query.
        (unsafe { esp_idf_svc::sys::esp_timer_get_time() }) as u64 / 1_000
    }

    #[cfg(not(target_os = "espidf"))]
    fn uptime_ms(&self) -> u64 {
        self.start.elapsed().as_millis() as u64
    }

    #[cfg(target_os = "espidf")]
    fn sleep_ms(&mut self, ms: u32) {
        esp_idf_hal::delay::FreeRtos::delay_ms(ms);
    }

    #[cfg(not(target_os = "espidf"))]
    fn sleep_ms(&mut self, ms: u32) {
        std::thread::sleep(std::time::Duration::from_millis(u64::from(ms)));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uptime_is_monotonic() {
        let mut clock = TimeAdapter::new();
        let a = clock.uptime_ms();
        clock.sleep_ms(2);
        let b = clock.uptime_ms();
        assert!(b >= a);
    }
}
