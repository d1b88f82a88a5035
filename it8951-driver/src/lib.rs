//! IT8951 e-paper controller driver
//!
//! Drives an IT8951 timing controller over SPI with the two extra lines the
//! chip needs: an active-high reset and the HRDY busy signal.
//!
//! # Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │  It8951 session: lifecycle, power modes, VCOM           │
//! ├──────────────────────────┬──────────────────────────────┤
//! │  display / refresh       │  image transfer              │
//! ├──────────────────────────┴──────────────────────────────┤
//! │  register access                                        │
//! ├─────────────────────────────────────────────────────────┤
//! │  Bus: preambles, chip-select scopes, HRDY gate          │
//! ├─────────────────────────────────────────────────────────┤
//! │  it8951-hal: SpiBus, OutputPin, InputPin, Delay         │
//! └─────────────────────────────────────────────────────────┘
//! ```
//!
//! # Usage
//!
//! ```ignore
//! let pins = Pins { spi, cs, rst, busy, delay };
//! let mut epd = It8951::initialize(pins, DriverConfig::default(), Vcom(1530))?;
//! epd.clear_refresh(epd.device_info().target_address(), DisplayMode::INIT)?;
//! epd.refresh_4bpp(&frame, area, false, epd.device_info().target_address())?;
//! epd.shutdown();
//! ```
//!
//! All operations block the calling thread. Waits on HRDY and on the
//! display engine poll forever unless a [`WaitPolicy`] bound is configured.

#![no_std]
#![deny(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

#[macro_use]
mod fmt;

pub mod bus;
pub mod config;
mod device;
mod display;
pub mod error;
mod image;
mod register;

#[cfg(test)]
mod mock;

pub use bus::{Bus, Pins};
pub use config::{DriverConfig, TransferMode, WaitPolicy};
pub use device::It8951;
pub use error::{Error, Result, Wait};

// Protocol types used in the public API
pub use it8951_protocol as protocol;
pub use it8951_protocol::{AreaImageInfo, DeviceInfo, DisplayMode, LoadImageInfo, PixelFormat, Vcom};
