//! Driver configuration
//!
//! Every default reproduces the behavior the controller expects on correct
//! hardware; the knobs exist for bring-up and for bounding waits.
//!
//! With the `serde` feature the configuration deserializes from TOML:
//!
//! ```toml
//! verify_target_address = true
//!
//! [spi]
//! frequency = 12000000
//!
//! [ready_wait]
//! max_polls = 100000
//! poll_interval_us = 10
//! ```

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use it8951_hal::SpiConfig;

/// How long to keep polling a busy condition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct WaitPolicy {
    /// Polls before giving up, `None` polls forever
    pub max_polls: Option<u32>,
    /// Delay between polls in microseconds
    pub poll_interval_us: u32,
}

impl WaitPolicy {
    /// Poll until the condition clears
    pub const fn unbounded(poll_interval_us: u32) -> Self {
        Self {
            max_polls: None,
            poll_interval_us,
        }
    }

    /// Give up after `max_polls` polls
    pub const fn bounded(max_polls: u32, poll_interval_us: u32) -> Self {
        Self {
            max_polls: Some(max_polls),
            poll_interval_us,
        }
    }

    /// True once `polls` busy polls used up the bound
    pub fn exhausted(&self, polls: u32) -> bool {
        matches!(self.max_polls, Some(max) if polls >= max)
    }
}

/// How pixel words reach the controller during an area load
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum TransferMode {
    /// Whole buffer in one data-buffer write
    #[default]
    Packed,
    /// One framed data write per word, `width_in_words` words per row
    RowStrided,
}

/// Driver configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct DriverConfig {
    /// Bus clock and mode, applied on open
    pub spi: SpiConfig,
    /// HRDY wait before each word
    pub ready_wait: WaitPolicy,
    /// LUTAFSR wait in `wait_for_display_ready`
    pub display_wait: WaitPolicy,
    /// Fail on a target address read-back mismatch instead of logging it
    pub verify_target_address: bool,
    /// Pixel transfer path
    pub transfer_mode: TransferMode,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            spi: SpiConfig::default(),
            ready_wait: WaitPolicy::unbounded(10),
            display_wait: WaitPolicy::unbounded(100),
            verify_target_address: false,
            transfer_mode: TransferMode::Packed,
        }
    }
}
