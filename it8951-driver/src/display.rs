//! Display and refresh
//!
//! The display engine is either idle or busy; the only way to tell is
//! LUTAFSR, non-zero while a waveform runs. Refreshes load pixels with
//! [`It8951::host_area_packed_pixel_write`] and then issue a display
//! command.
//!
//! Monochrome refreshes go through [`It8951::display_1bpp`], which turns on
//! the 1bpp bit in UP1SR for the duration of the update:
//! ```text
//! UP1SR+2 |= 1<<2    BGVR ← fg<<8 | bg    display    wait    UP1SR+2 &= !(1<<2)
//! ```

use alloc::vec;

use it8951_hal::{Delay, InputPin, OutputPin, SpiBus};
use it8951_protocol::display::{display_area_args, display_buffer_area_args};
use it8951_protocol::register::{
    bitmap_color_table, high_word, BGVR, DRIVING_CAPABILITY, DRIVING_CAPABILITY_ENHANCED,
    LUTAFSR, UP1SR, UP1SR_1BPP_MODE,
};
use it8951_protocol::{
    image_words, AreaImageInfo, Command, DisplayMode, LoadImageInfo, PixelFormat,
};

use crate::device::It8951;
use crate::error::{Error, Result, Wait};

/// BGVR background for monochrome refreshes (white)
const MONO_BACKGROUND: u8 = 0xF0;
/// BGVR foreground for monochrome refreshes (black)
const MONO_FOREGROUND: u8 = 0x00;

impl<SPI, CS, RST, BUSY, D> It8951<SPI, CS, RST, BUSY, D>
where
    SPI: SpiBus,
    CS: OutputPin,
    RST: OutputPin,
    BUSY: InputPin,
    D: Delay,
{
    /// Block until the display engine is idle
    pub fn wait_for_display_ready(&mut self) -> Result<(), SPI::Error> {
        let policy = self.config.display_wait;
        let mut polls = 0u32;
        while self.read_register(LUTAFSR)? != 0 {
            if policy.exhausted(polls) {
                warn!("display still busy after {} polls", polls);
                return Err(Error::Timeout(Wait::Display));
            }
            polls = polls.saturating_add(1);
            self.bus.delay_us(policy.poll_interval_us);
        }
        Ok(())
    }

    /// Show `area` of the default frame buffer with waveform `mode`
    pub fn display_area(&mut self, area: &AreaImageInfo, mode: DisplayMode) -> Result<(), SPI::Error> {
        debug!("display area, mode {}", mode.as_u16());
        self.bus
            .write_command_buffer(Command::DisplayArea, &display_area_args(area, mode))
    }

    /// Show `area` of the image at `target_address` with waveform `mode`
    pub fn display_area_buffer(
        &mut self,
        area: &AreaImageInfo,
        mode: DisplayMode,
        target_address: u32,
    ) -> Result<(), SPI::Error> {
        debug!("display area buffer {:x}, mode {}", target_address, mode.as_u16());
        self.bus.write_command_buffer(
            Command::DisplayBufferArea,
            &display_buffer_area_args(area, mode, target_address),
        )
    }

    /// Show 1bpp data with the given background and foreground grey levels
    ///
    /// A `target_address` of 0 displays from the default frame buffer. The
    /// 1bpp bit is cleared again even when the display or the wait fails;
    /// the first error is returned.
    pub fn display_1bpp(
        &mut self,
        area: &AreaImageInfo,
        mode: DisplayMode,
        target_address: u32,
        background: u8,
        foreground: u8,
    ) -> Result<(), SPI::Error> {
        debug!("display 1bpp");
        let control = self.read_register(high_word(UP1SR))?;
        self.write_register(high_word(UP1SR), control | UP1SR_1BPP_MODE)?;

        let shown = self.show_1bpp(area, mode, target_address, background, foreground);

        let restored = self
            .read_register(high_word(UP1SR))
            .and_then(|control| self.write_register(high_word(UP1SR), control & !UP1SR_1BPP_MODE));
        shown.and(restored)
    }

    fn show_1bpp(
        &mut self,
        area: &AreaImageInfo,
        mode: DisplayMode,
        target_address: u32,
        background: u8,
        foreground: u8,
    ) -> Result<(), SPI::Error> {
        self.write_register(BGVR, bitmap_color_table(background, foreground))?;
        if target_address == 0 {
            self.display_area(area, mode)?;
        } else {
            self.display_area_buffer(area, mode, target_address)?;
        }
        self.wait_for_display_ready()
    }

    /// Raise the panel driving strength, for panels that look blurred
    pub fn enhance_driving_capability(&mut self) -> Result<(), SPI::Error> {
        let before = self.read_register(DRIVING_CAPABILITY)?;
        debug!("driving capability before: {:x}", before);
        self.write_register(DRIVING_CAPABILITY, DRIVING_CAPABILITY_ENHANCED)?;
        let after = self.read_register(DRIVING_CAPABILITY)?;
        debug!("driving capability after: {:x}", after);
        Ok(())
    }

    /// Load 1bpp data into `area` at `target_address` without displaying it
    ///
    /// Monochrome data travels with the 8bpp format tag.
    pub fn write_1bpp(
        &mut self,
        buffer: &[u16],
        area: &AreaImageInfo,
        target_address: u32,
    ) -> Result<(), SPI::Error> {
        self.wait_for_display_ready()?;
        let info = LoadImageInfo::new(PixelFormat::Bpp8, buffer, target_address);
        self.host_area_packed_pixel_write(&info, area, 1)
    }

    /// Load and show 1bpp data, black on white
    pub fn refresh_1bpp(
        &mut self,
        buffer: &[u16],
        area: &AreaImageInfo,
        mode: DisplayMode,
        target_address: u32,
    ) -> Result<(), SPI::Error> {
        debug!("refresh 1bpp");
        self.wait_for_display_ready()?;
        self.write_1bpp(buffer, area, target_address)?;
        self.display_1bpp(area, mode, target_address, MONO_BACKGROUND, MONO_FOREGROUND)
    }

    /// Show 1bpp data already in controller memory with the fast waveform
    pub fn multi_frame_refresh_1bpp(
        &mut self,
        area: &AreaImageInfo,
        target_address: u32,
    ) -> Result<(), SPI::Error> {
        debug!("multi-frame refresh 1bpp");
        self.wait_for_display_ready()?;
        let mode = self.fast_mode();
        self.display_1bpp(area, mode, target_address, MONO_BACKGROUND, MONO_FOREGROUND)
    }

    /// Load and show 2bpp data with GC16
    ///
    /// With `hold` the display command uses the default frame buffer,
    /// otherwise the image at `target_address`.
    pub fn refresh_2bpp(
        &mut self,
        buffer: &[u16],
        area: &AreaImageInfo,
        hold: bool,
        target_address: u32,
    ) -> Result<(), SPI::Error> {
        self.refresh_gray(buffer, area, hold, target_address, PixelFormat::Bpp2)
    }

    /// Load and show 4bpp data with GC16, see [`It8951::refresh_2bpp`]
    pub fn refresh_4bpp(
        &mut self,
        buffer: &[u16],
        area: &AreaImageInfo,
        hold: bool,
        target_address: u32,
    ) -> Result<(), SPI::Error> {
        self.refresh_gray(buffer, area, hold, target_address, PixelFormat::Bpp4)
    }

    /// Load and show 8bpp data with GC16, see [`It8951::refresh_2bpp`]
    pub fn refresh_8bpp(
        &mut self,
        buffer: &[u16],
        area: &AreaImageInfo,
        hold: bool,
        target_address: u32,
    ) -> Result<(), SPI::Error> {
        self.refresh_gray(buffer, area, hold, target_address, PixelFormat::Bpp8)
    }

    fn refresh_gray(
        &mut self,
        buffer: &[u16],
        area: &AreaImageInfo,
        hold: bool,
        target_address: u32,
        format: PixelFormat,
    ) -> Result<(), SPI::Error> {
        debug!("refresh {}bpp", format.bits());
        self.wait_for_display_ready()?;
        let info = LoadImageInfo::new(format, buffer, target_address);
        self.host_area_packed_pixel_write(&info, area, format.bits())?;
        if hold {
            self.display_area(area, DisplayMode::GC16)
        } else {
            self.display_area_buffer(area, DisplayMode::GC16, target_address)
        }
    }

    /// Fill the panel with white at `target_address` and show it with `mode`
    pub fn clear_refresh(&mut self, target_address: u32, mode: DisplayMode) -> Result<(), SPI::Error> {
        let area = self.full_area();
        let words = image_words(area.width, area.height, 4);
        debug!("clear refresh at {:x}, {} words", target_address, words);

        let frame = vec![0xFFFFu16; words];
        let info = LoadImageInfo::new(PixelFormat::Bpp4, &frame, target_address);
        self.wait_for_display_ready()?;
        self.host_area_packed_pixel_write(&info, &area, 4)?;
        self.display_area(&area, mode)
    }
}
