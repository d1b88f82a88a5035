//! Image transfer
//!
//! An area load is always framed the same way:
//! ```text
//! LISAR+2 ← high   LISAR ← low   (read back)
//! LoadImageArea   header, x, y, w, h
//! data            packed pixel words
//! LoadImageEnd
//! ```

use it8951_hal::{Delay, InputPin, OutputPin, SpiBus};
use it8951_protocol::register::{high_word, LISAR};
use it8951_protocol::{
    image_words, join_u32, split_u32, width_in_words, AreaImageInfo, Command, LoadImageInfo,
};

use crate::config::TransferMode;
use crate::device::It8951;
use crate::error::{Error, Result};

impl<SPI, CS, RST, BUSY, D> It8951<SPI, CS, RST, BUSY, D>
where
    SPI: SpiBus,
    CS: OutputPin,
    RST: OutputPin,
    BUSY: InputPin,
    D: Delay,
{
    /// Point the next image load at `address`
    ///
    /// Writes the high half before the low half, then reads both back. A
    /// mismatch is logged, or returned as [`Error::AddressMismatch`] when
    /// `verify_target_address` is set.
    pub fn set_target_memory_address(&mut self, address: u32) -> Result<(), SPI::Error> {
        let (low, high) = split_u32(address);
        self.write_register(high_word(LISAR), high)?;
        self.write_register(LISAR, low)?;

        let read_high = self.read_register(high_word(LISAR))?;
        let read_low = self.read_register(LISAR)?;
        let confirmed = join_u32(read_low, read_high);
        debug!("target address {:x}, confirmed {:x}", address, confirmed);

        if confirmed != address {
            warn!("target address read back {:x}, wrote {:x}", confirmed, address);
            if self.config.verify_target_address {
                return Err(Error::AddressMismatch {
                    written: address,
                    read: confirmed,
                });
            }
        }
        Ok(())
    }

    /// Start a full image load
    pub fn load_image_start(&mut self, info: &LoadImageInfo<'_>) -> Result<(), SPI::Error> {
        debug!("load image start");
        self.bus.write_command(Command::LoadImage)?;
        self.bus.write_data(info.header())
    }

    /// Start a load into `area`
    pub fn load_image_area_start(
        &mut self,
        info: &LoadImageInfo<'_>,
        area: &AreaImageInfo,
    ) -> Result<(), SPI::Error> {
        debug!(
            "load image area start {} {} {}x{}",
            area.x, area.y, area.width, area.height
        );
        self.bus
            .write_command_buffer(Command::LoadImageArea, &area.load_args(info.header()))
    }

    /// Terminate the current load
    pub fn load_image_end(&mut self) -> Result<(), SPI::Error> {
        self.bus.write_command(Command::LoadImageEnd)?;
        debug!("image loaded");
        Ok(())
    }

    /// Load `info.source` into `area` at `info.target_address`
    ///
    /// `bpp` is the host bit depth of the packed words. It only matters for
    /// [`TransferMode::RowStrided`], which sends `width_in_words` words per
    /// row, one framed write per word, and needs the buffer to cover the
    /// whole area.
    pub fn host_area_packed_pixel_write(
        &mut self,
        info: &LoadImageInfo<'_>,
        area: &AreaImageInfo,
        bpp: u8,
    ) -> Result<(), SPI::Error> {
        let mode = self.config.transfer_mode;
        if mode == TransferMode::RowStrided {
            let required = image_words(area.width, area.height, bpp);
            if info.source.len() < required {
                return Err(Error::BufferTooSmall {
                    required,
                    actual: info.source.len(),
                });
            }
        }

        self.set_target_memory_address(info.target_address)?;
        self.load_image_area_start(info, area)?;
        match mode {
            TransferMode::Packed => self.bus.write_data_buffer(info.source)?,
            TransferMode::RowStrided => {
                let row = width_in_words(area.width, bpp);
                trace!("row strided write, {} words per row", row);
                if row > 0 {
                    for line in info.source.chunks(row).take(area.height as usize) {
                        for &word in line {
                            self.bus.write_data(word)?;
                        }
                    }
                }
            }
        }
        self.load_image_end()
    }
}
