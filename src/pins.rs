//! GPIO / peripheral pin assignments for the BrewChill controller board.
//!
//! Single source of truth — every driver references this module rather than
//! hard-coding pin numbers.  Change a pin here and it propagates everywhere.

// ---------------------------------------------------------------------------
// Compressor relay (opto-isolated relay module, active HIGH)
// ---------------------------------------------------------------------------

/// Digital output: HIGH = relay closed = compressor energised.
/// Boots LOW so the compressor stays off until the first control cycle.
pub const RELAY_GPIO: i32 = 8;

// ---------------------------------------------------------------------------
// Temperature sensor — NTC thermistor (10 kΩ @ 25 °C, B = 3950)
// ---------------------------------------------------------------------------

/// Voltage-divider midpoint to ADC1 channel 8 (GPIO 9 on ESP32-S3).
pub const TEMP_ADC_GPIO: i32 = 9;

// ---------------------------------------------------------------------------
// TM1637 four-digit display (two-wire serial, bit-banged)
// ---------------------------------------------------------------------------

/// Clock line to the TM1637 module.
pub const DISPLAY_CLK_GPIO: i32 = 3;
/// Bidirectional data line to the TM1637 module.
pub const DISPLAY_DIO_GPIO: i32 = 4;

// ---------------------------------------------------------------------------
// Heartbeat LED
// ---------------------------------------------------------------------------

/// Digital output: liveness indicator, toggled by the heartbeat sleep.
/// An observer can tell "alive and waiting" from "hung" by this LED alone.
pub const HEARTBEAT_LED_GPIO: i32 = 13;

// ---------------------------------------------------------------------------
// UART debug
// ---------------------------------------------------------------------------

pub const UART_TX_GPIO: i32 = 17;
pub const UART_RX_GPIO: i32 = 18;
