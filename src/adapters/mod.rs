//! Adapters — implementations of the port traits over real peripherals,
//! the system clock, and the serial log.

pub mod hardware;
pub mod log_sink;
pub mod time;
