//! Register access
//!
//! Registers are 16 bits wide. 32-bit fields span `address` (low half) and
//! `address + 2` (high half).

use it8951_hal::{Delay, InputPin, OutputPin, SpiBus};
use it8951_protocol::register::high_word;
use it8951_protocol::{join_u32, split_u32, Command};

use crate::device::It8951;
use crate::error::Result;

impl<SPI, CS, RST, BUSY, D> It8951<SPI, CS, RST, BUSY, D>
where
    SPI: SpiBus,
    CS: OutputPin,
    RST: OutputPin,
    BUSY: InputPin,
    D: Delay,
{
    /// Read a 16-bit register
    pub fn read_register(&mut self, address: u16) -> Result<u16, SPI::Error> {
        self.bus.write_command(Command::RegisterRead)?;
        self.bus.write_data(address)?;
        let value = self.bus.read_data()?;
        trace!("read register {:x} = {:x}", address, value);
        Ok(value)
    }

    /// Write a 16-bit register
    ///
    /// The address goes out as a framed data word (write preamble under
    /// chip-select), not as a raw word outside any scope.
    pub fn write_register(&mut self, address: u16, value: u16) -> Result<(), SPI::Error> {
        trace!("write register {:x} = {:x}", address, value);
        self.bus.write_command(Command::RegisterWrite)?;
        self.bus.write_data(address)?;
        self.bus.write_data(value)
    }

    /// Read a 32-bit field, low half first
    pub fn read_register_u32(&mut self, address: u16) -> Result<u32, SPI::Error> {
        let low = self.read_register(address)?;
        let high = self.read_register(high_word(address))?;
        Ok(join_u32(low, high))
    }

    /// Write a 32-bit field, low half first
    pub fn write_register_u32(&mut self, address: u16, value: u32) -> Result<(), SPI::Error> {
        let (low, high) = split_u32(value);
        self.write_register(address, low)?;
        self.write_register(high_word(address), high)
    }
}
