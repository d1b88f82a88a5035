//! Device information block
//!
//! Answer to [`Command::GetDeviceInfo`](crate::Command::GetDeviceInfo), read
//! as 20 words in this order:
//! ```text
//! ┌───────┬────────┬──────────┬──────────┬──────────────┬──────────────┐
//! │ WIDTH │ HEIGHT │ ADDR LOW │ ADDR HIGH│ FW VERSION   │ LUT VERSION  │
//! │ 1W    │ 1W     │ 1W       │ 1W       │ 8W           │ 8W           │
//! └───────┴────────┴──────────┴──────────┴──────────────┴──────────────┘
//! ```
//! The version strings hold two ASCII characters per word, low byte first,
//! NUL padded.

use core::fmt;

use heapless::String;

use crate::{join_u32, ProtocolError};

/// Words in a device information block
pub const DEVICE_INFO_WORDS: usize = 20;

/// Words in each version string
pub const VERSION_WORDS: usize = 8;

/// Maximum characters in a version string
pub const VERSION_LEN: usize = VERSION_WORDS * 2;

/// Panel and firmware description reported by the controller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DeviceInfo {
    /// Panel width in pixels
    pub panel_width: u16,
    /// Panel height in pixels
    pub panel_height: u16,
    /// Image buffer base address, low word
    pub memory_address_low: u16,
    /// Image buffer base address, high word
    pub memory_address_high: u16,
    /// Firmware version string words
    pub firmware_version: [u16; VERSION_WORDS],
    /// Waveform (LUT) version string words
    pub lut_version: [u16; VERSION_WORDS],
}

impl DeviceInfo {
    /// Decode a device information block
    pub fn from_words(words: &[u16]) -> Result<Self, ProtocolError> {
        if words.len() != DEVICE_INFO_WORDS {
            return Err(ProtocolError::InvalidLength {
                expected: DEVICE_INFO_WORDS,
                actual: words.len(),
            });
        }

        let mut info = DeviceInfo {
            panel_width: words[0],
            panel_height: words[1],
            memory_address_low: words[2],
            memory_address_high: words[3],
            ..DeviceInfo::default()
        };
        info.firmware_version
            .copy_from_slice(&words[4..4 + VERSION_WORDS]);
        info.lut_version
            .copy_from_slice(&words[4 + VERSION_WORDS..DEVICE_INFO_WORDS]);
        Ok(info)
    }

    /// Encode back into wire order
    pub fn to_words(&self) -> [u16; DEVICE_INFO_WORDS] {
        let mut words = [0u16; DEVICE_INFO_WORDS];
        words[0] = self.panel_width;
        words[1] = self.panel_height;
        words[2] = self.memory_address_low;
        words[3] = self.memory_address_high;
        words[4..4 + VERSION_WORDS].copy_from_slice(&self.firmware_version);
        words[4 + VERSION_WORDS..].copy_from_slice(&self.lut_version);
        words
    }

    /// Image buffer base address, the default target for transfers
    pub fn target_address(&self) -> u32 {
        join_u32(self.memory_address_low, self.memory_address_high)
    }

    /// Firmware version as text
    pub fn firmware_version_str(&self) -> String<VERSION_LEN> {
        words_to_string(&self.firmware_version)
    }

    /// Waveform (LUT) version as text
    pub fn lut_version_str(&self) -> String<VERSION_LEN> {
        words_to_string(&self.lut_version)
    }
}

impl fmt::Display for DeviceInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "System Info")?;
        writeln!(f, "Panel Width  : {}", self.panel_width)?;
        writeln!(f, "Panel Height : {}", self.panel_height)?;
        writeln!(f, "Mem Addr     : {:x}", self.target_address())?;
        writeln!(f, "FW Version   : {}", self.firmware_version_str())?;
        writeln!(f, "LUT Version  : {}", self.lut_version_str())
    }
}

/// Decode a version string: low byte first, stop at the first NUL
///
/// Bytes outside printable ASCII come out as `?`.
pub fn words_to_string(words: &[u16; VERSION_WORDS]) -> String<VERSION_LEN> {
    let mut text = String::new();
    for &word in words {
        for byte in [(word & 0xFF) as u8, (word >> 8) as u8] {
            if byte == 0 {
                return text;
            }
            let c = if byte.is_ascii_graphic() || byte == b' ' {
                byte as char
            } else {
                '?'
            };
            // capacity matches the word count, cannot overflow
            let _ = text.push(c);
        }
    }
    text
}

/// Encode text into version string words (test and simulation helper)
pub fn string_to_words(text: &str) -> [u16; VERSION_WORDS] {
    let mut words = [0u16; VERSION_WORDS];
    for (i, &byte) in text.as_bytes().iter().take(VERSION_LEN).enumerate() {
        let shift = if i % 2 == 0 { 0 } else { 8 };
        words[i / 2] |= (byte as u16) << shift;
    }
    words
}
