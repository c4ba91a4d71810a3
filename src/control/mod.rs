//! Control core — thermostat decisioning, sensor filtering, duty-cycle
//! protection, and the shared heartbeat-interleaved wait primitive.
//!
//! Everything in here is pure logic against the port traits in
//! [`crate::app::ports`]; no module in this tree touches hardware.

pub mod filter;
pub mod guard;
pub mod thermostat;

use crate::app::ports::{ActuatorPort, ClockPort};

/// Block for `total_ms`, toggling the liveness LED every `period_ms / 2`.
///
/// This is the system's only wait mechanism.  The inter-cycle pause, the
/// sensor filter's escalating retries, and the guard's cooldown all funnel
/// through it, so a watcher of the LED can always tell "alive and waiting"
/// from "hung".  The LED is left dark on return.
pub fn sleep_with_heartbeat(
    hw: &mut impl ActuatorPort,
    clock: &mut impl ClockPort,
    total_ms: u32,
    period_ms: u32,
) {
    let period = period_ms.max(2);
    let half = period / 2;
    let mut remaining = total_ms;
    while remaining > 0 {
        // The last chunk is clamped so the pause never overshoots the target.
        let chunk = remaining.min(period);
        let lit = chunk.min(half);
        hw.set_indicator(true);
        clock.sleep_ms(lit);
        hw.set_indicator(false);
        if chunk > lit {
            clock.sleep_ms(chunk - lit);
        }
        remaining -= chunk;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::ports::testing::{MockClock, MockHardware};

    #[test]
    fn sleeps_the_requested_total() {
        let mut hw = MockHardware::new();
        let mut clock = MockClock::new();
        sleep_with_heartbeat(&mut hw, &mut clock, 30_000, 2_000);
        assert_eq!(clock.uptime_ms(), 30_000);
    }

    #[test]
    fn pulses_the_indicator_throughout() {
        let mut hw = MockHardware::new();
        let mut clock = MockClock::new();
        sleep_with_heartbeat(&mut hw, &mut clock, 10_000, 2_000);
        // 5 full periods → 5 on-pulses, and the LED ends dark.
        assert_eq!(hw.indicator_pulses, 5);
        assert!(!hw.indicator_on);
    }

    #[test]
    fn zero_duration_returns_immediately() {
        let mut hw = MockHardware::new();
        let mut clock = MockClock::new();
        sleep_with_heartbeat(&mut hw, &mut clock, 0, 2_000);
        assert_eq!(clock.uptime_ms(), 0);
        assert_eq!(hw.indicator_pulses, 0);
    }
}
