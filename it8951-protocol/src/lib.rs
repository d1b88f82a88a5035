//! IT8951 host interface protocol
//!
//! This crate describes everything that travels between the host and the
//! IT8951 timing controller, without touching any hardware. The driver
//! crate sequences these pieces over a transport.
//!
//! # Wire Format
//!
//! Every transaction is a chip-select scope carrying 16-bit words, most
//! significant byte first. The first word is a preamble naming the kind of
//! transaction:
//! ```text
//! ┌──────────┬──────────────────────────────────────────┐
//! │ PREAMBLE │ PAYLOAD                                  │
//! ├──────────┼──────────────────────────────────────────┤
//! │ 0x6000   │ command code (1 word)                    │
//! │ 0x0000   │ data words (1..n)                        │
//! │ 0x1000   │ dummy word, then data words (1..n)       │
//! └──────────┴──────────────────────────────────────────┘
//! ```
//!
//! The controller raises HRDY when it can take the next word; the host
//! waits on it before every word, preamble included.

#![no_std]
#![deny(unsafe_code)]

#[cfg(test)]
extern crate std;

pub mod command;
pub mod device_info;
pub mod display;
pub mod dump;
pub mod image;
pub mod register;

pub use command::{Command, Preamble, VcomCommand};
pub use device_info::{DeviceInfo, DEVICE_INFO_WORDS};
pub use display::{DisplayMode, Vcom};
pub use dump::HexDump;
pub use image::{
    image_words, width_in_words, AreaImageInfo, EndianType, LoadImageInfo, PixelFormat, Rotation,
};

/// Errors raised when wire data does not fit the protocol model
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ProtocolError {
    /// Word block has the wrong length for the structure being decoded
    InvalidLength {
        /// Words the structure needs
        expected: usize,
        /// Words supplied
        actual: usize,
    },
    /// Bits per pixel value the controller has no format tag for
    UnsupportedBpp(u8),
}

impl core::fmt::Display for ProtocolError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ProtocolError::InvalidLength { expected, actual } => {
                write!(f, "expected {} words, got {}", expected, actual)
            }
            ProtocolError::UnsupportedBpp(bpp) => write!(f, "unsupported bit depth {}", bpp),
        }
    }
}

/// Split a 32-bit value into `(low, high)` 16-bit halves
pub fn split_u32(value: u32) -> (u16, u16) {
    ((value & 0xFFFF) as u16, (value >> 16) as u16)
}

/// Combine `(low, high)` 16-bit halves into a 32-bit value
pub fn join_u32(low: u16, high: u16) -> u32 {
    ((high as u32) << 16) | low as u32
}
