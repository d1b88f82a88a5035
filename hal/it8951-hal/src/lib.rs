//! IT8951 transport abstraction layer
//!
//! This crate defines the traits the IT8951 driver uses to reach the
//! controller: an SPI bus, the chip-select and reset output pins, the HRDY
//! input pin and a blocking delay. Board support crates implement them so
//! the same protocol code runs on a Raspberry Pi, an MCU or a simulated
//! controller in tests.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  it8951-driver (framing, registers...)  │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  it8951-hal (this crate - traits)       │
//! └─────────────────────────────────────────┘
//!                     │
//!         ┌───────────┴───────────┐
//!         ▼                       ▼
//! ┌───────────────┐       ┌───────────────┐
//! │  it8951-hal-  │       │  test mocks / │
//! │   embedded    │       │   simulators  │
//! └───────────────┘       └───────────────┘
//! ```
//!
//! # Traits
//!
//! - [`gpio::OutputPin`], [`gpio::InputPin`] - Digital I/O
//! - [`spi::SpiBus`] - SPI bus operations
//! - [`delay::Delay`] - Blocking delays

#![no_std]
#![deny(unsafe_code)]

pub mod delay;
pub mod gpio;
pub mod spi;

// Re-export key traits at crate root for convenience
pub use delay::Delay;
pub use gpio::{InputPin, OutputPin};
pub use spi::{Mode, SpiBus, SpiConfig};
