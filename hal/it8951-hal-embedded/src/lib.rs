//! embedded-hal 1.0 support for the IT8951 driver
//!
//! This crate provides implementations of the shared `it8951-hal` traits on
//! top of any `embedded-hal` 1.0 SPI bus, GPIO pins and delay provider:
//!
//! - [`gpio::EmbeddedOutput`] / [`gpio::EmbeddedInput`] - chip-select, reset and HRDY
//! - [`spi::EmbeddedSpi`] - byte transport with an optional configure hook,
//!   [`spi::embedded_mode`] to translate the clock mode inside that hook
//! - [`delay::EmbeddedDelay`] - reset timing and poll back-off
//!
//! On a Raspberry Pi the usual wiring is SPI0 with the chip-select on
//! GPIO 8 driven as a plain output, reset on GPIO 17 and HRDY on GPIO 24.

#![no_std]
#![deny(unsafe_code)]

pub mod delay;
pub mod gpio;
pub mod spi;

pub use delay::EmbeddedDelay;
pub use gpio::{EmbeddedInput, EmbeddedOutput};
pub use spi::{embedded_mode, EmbeddedSpi};

/// Raspberry Pi BCM pin numbers used by the common IT8951 HAT wiring
pub mod pins {
    /// Reset output
    pub const RST: u8 = 17;
    /// Chip-select output (CE0 driven as GPIO)
    pub const CS: u8 = 8;
    /// HRDY input
    pub const BUSY: u8 = 24;
}
