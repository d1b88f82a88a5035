//! Waveform modes and VCOM

use core::fmt;

use crate::AreaImageInfo;

/// Panel identifier whose fast waveform sits at mode 4
pub const M641_LUT: &str = "M641";

/// Waveform mode used by the display commands
///
/// The numbering of the fast A2 waveform differs between panels, see
/// [`DisplayMode::fast_for_lut`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DisplayMode(pub u16);

impl DisplayMode {
    /// Full clear, after power up or to remove A2 ghosting
    pub const INIT: DisplayMode = DisplayMode(0);
    /// 16 level grayscale, full refresh
    pub const GC16: DisplayMode = DisplayMode(2);
    /// A2 on the 6" M641 panel
    pub const A2_M641: DisplayMode = DisplayMode(4);
    /// A2 on other panels
    pub const A2: DisplayMode = DisplayMode(6);

    /// Fast no-flash mode for a panel, from its LUT version string
    pub fn fast_for_lut(lut_version: &str) -> DisplayMode {
        if lut_version == M641_LUT {
            DisplayMode::A2_M641
        } else {
            DisplayMode::A2
        }
    }

    /// Raw wire value
    pub fn as_u16(self) -> u16 {
        self.0
    }
}

/// Arguments of a display-area command
pub fn display_area_args(area: &AreaImageInfo, mode: DisplayMode) -> [u16; 5] {
    [area.x, area.y, area.width, area.height, mode.as_u16()]
}

/// Arguments of a display-buffer-area command (address low word first)
pub fn display_buffer_area_args(
    area: &AreaImageInfo,
    mode: DisplayMode,
    target_address: u32,
) -> [u16; 7] {
    let (low, high) = crate::split_u32(target_address);
    [
        area.x,
        area.y,
        area.width,
        area.height,
        mode.as_u16(),
        low,
        high,
    ]
}

/// Panel bias voltage in millivolts (magnitude of a negative voltage)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Vcom(pub u16);

impl Vcom {
    /// Value in millivolts
    pub fn millivolts(self) -> u16 {
        self.0
    }
}

impl fmt::Display for Vcom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "-{}.{:02}V", self.0 / 1000, (self.0 % 1000) / 10)
    }
}
