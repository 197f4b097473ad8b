//! # clockrom
//!
//! ROM image for a 12-hour HH:MM clock built from a minute counter latch,
//! 74HC595 shift registers and BCD to 7-segment decoders. The ROM holds the
//! whole clock logic: for every combination of serializer bit counter and
//! minute counter it drives the display digits and the counter's successor.
//!
//! [clock::ClockRom] implements [romcraft::generate::RomProgram]; the binary
//! writes its image to [clock::OUTPUT_PATH].

pub mod clock;
pub mod time;

use tracing_subscriber::{EnvFilter, fmt};

/// Installs the global log subscriber.
///
/// `RUST_LOG` overrides the default `info` filter; `RUST_LOG=clockrom=trace`
/// prints the per-address audit lines.
pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    fmt().with_env_filter(filter).with_target(false).init();
}
