//! Framing layer
//!
//! Every transaction runs inside one chip-select scope and starts with a
//! preamble word. HRDY is polled before the scope opens and before every
//! following word:
//! ```text
//!          wait  CS↓  preamble  wait  word  wait  word ...  CS↑
//! command        │    0x6000          code                  │
//! write          │    0x0000          data  ...             │
//! read           │    0x1000          dummy       data ...  │
//! ```
//! Words travel most significant byte first.

use it8951_hal::{Delay, InputPin, OutputPin, SpiBus};
use it8951_protocol::{Command, Preamble};

use crate::config::{DriverConfig, WaitPolicy};
use crate::error::{Error, Result, Wait};

/// Transport handed to the driver when the session opens
pub struct Pins<SPI, CS, RST, BUSY, D> {
    /// SPI bus (chip-select not handled by the bus)
    pub spi: SPI,
    /// Chip-select, active low
    pub cs: CS,
    /// Reset, active low
    pub rst: RST,
    /// HRDY, high when the controller takes the next word
    pub busy: BUSY,
    /// Delay provider for reset timing and poll back-off
    pub delay: D,
}

/// Owned transport with the IT8951 framing on top
///
/// Dropping the bus drives chip-select and reset low.
pub struct Bus<SPI, CS, RST, BUSY, D>
where
    SPI: SpiBus,
    CS: OutputPin,
    RST: OutputPin,
    BUSY: InputPin,
    D: Delay,
{
    spi: SPI,
    cs: CS,
    rst: RST,
    busy: BUSY,
    delay: D,
    ready_wait: WaitPolicy,
    released: bool,
}

impl<SPI, CS, RST, BUSY, D> Bus<SPI, CS, RST, BUSY, D>
where
    SPI: SpiBus,
    CS: OutputPin,
    RST: OutputPin,
    BUSY: InputPin,
    D: Delay,
{
    /// Take ownership of the transport and configure the SPI bus
    ///
    /// On failure the pins are released before the error returns.
    pub fn open(pins: Pins<SPI, CS, RST, BUSY, D>, config: &DriverConfig) -> Result<Self, SPI::Error> {
        let Pins {
            spi,
            cs,
            rst,
            busy,
            delay,
        } = pins;
        let mut bus = Self {
            spi,
            cs,
            rst,
            busy,
            delay,
            ready_wait: config.ready_wait,
            released: false,
        };

        bus.spi.configure(&config.spi).map_err(Error::Open)?;
        bus.cs.set_high();
        debug!("bus open at {} Hz", config.spi.frequency);
        Ok(bus)
    }

    /// Pulse reset: high 200 ms, low 10 ms, high 200 ms
    pub fn reset(&mut self) {
        info!("reset");
        self.rst.set_high();
        self.delay.delay_ms(200);
        self.rst.set_low();
        self.delay.delay_ms(10);
        self.rst.set_high();
        self.delay.delay_ms(200);
    }

    /// Block until HRDY is high
    pub fn wait_ready(&mut self) -> Result<(), SPI::Error> {
        let mut polls = 0u32;
        while self.busy.is_low() {
            if self.ready_wait.exhausted(polls) {
                warn!("HRDY still low after {} polls", polls);
                return Err(Error::Timeout(Wait::HostReady));
            }
            polls = polls.saturating_add(1);
            self.delay.delay_us(self.ready_wait.poll_interval_us);
        }
        Ok(())
    }

    /// Block for `us` microseconds
    pub fn delay_us(&mut self, us: u32) {
        self.delay.delay_us(us);
    }

    /// Send a command code
    pub fn write_command(&mut self, command: Command) -> Result<(), SPI::Error> {
        trace!("command {:x}", command.as_u16());
        self.scoped(Preamble::Command, |bus| {
            bus.wait_ready()?;
            bus.put_word(command.as_u16())
        })
    }

    /// Send one data word
    pub fn write_data(&mut self, data: u16) -> Result<(), SPI::Error> {
        self.scoped(Preamble::Write, |bus| {
            bus.wait_ready()?;
            bus.put_word(data)
        })
    }

    /// Send data words in a single chip-select scope
    pub fn write_data_buffer(&mut self, words: &[u16]) -> Result<(), SPI::Error> {
        trace!("write buffer ({} words)", words.len());
        self.scoped(Preamble::Write, |bus| {
            for &word in words {
                bus.wait_ready()?;
                bus.put_word(word)?;
            }
            Ok(())
        })
    }

    /// Send a command code followed by its argument words
    pub fn write_command_buffer(&mut self, command: Command, words: &[u16]) -> Result<(), SPI::Error> {
        self.write_command(command)?;
        self.write_data_buffer(words)
    }

    /// Read one data word, skipping the dummy word
    pub fn read_data(&mut self) -> Result<u16, SPI::Error> {
        self.scoped(Preamble::Read, |bus| {
            bus.wait_ready()?;
            bus.get_word()?;
            bus.wait_ready()?;
            bus.get_word()
        })
    }

    /// Fill `words` from one read scope, skipping the dummy word
    pub fn read_data_buffer(&mut self, words: &mut [u16]) -> Result<(), SPI::Error> {
        self.scoped(Preamble::Read, |bus| {
            bus.wait_ready()?;
            bus.get_word()?;
            for word in words.iter_mut() {
                bus.wait_ready()?;
                *word = bus.get_word()?;
            }
            Ok(())
        })?;
        trace!("read buffer ({} words)", words.len());
        Ok(())
    }

    /// Drive chip-select and reset low and stop using the bus
    pub fn release(mut self) {
        self.release_pins();
    }

    fn release_pins(&mut self) {
        if self.released {
            return;
        }
        self.released = true;
        self.cs.set_low();
        self.rst.set_low();
        debug!("bus released");
    }

    /// Wait, assert CS, send `preamble`, run `body`, then deassert CS even
    /// when `body` fails
    fn scoped<T>(
        &mut self,
        preamble: Preamble,
        body: impl FnOnce(&mut Self) -> Result<T, SPI::Error>,
    ) -> Result<T, SPI::Error> {
        self.wait_ready()?;
        self.cs.set_low();
        let result = self.put_word(preamble.as_u16()).and_then(|_| body(self));
        self.cs.set_high();
        result
    }

    fn put_word(&mut self, word: u16) -> Result<(), SPI::Error> {
        self.spi.write(&word.to_be_bytes()).map_err(Error::Spi)
    }

    fn get_word(&mut self) -> Result<u16, SPI::Error> {
        let mut bytes = [0u8; 2];
        self.spi.read(&mut bytes).map_err(Error::Spi)?;
        Ok(u16::from_be_bytes(bytes))
    }
}

impl<SPI, CS, RST, BUSY, D> Drop for Bus<SPI, CS, RST, BUSY, D>
where
    SPI: SpiBus,
    CS: OutputPin,
    RST: OutputPin,
    BUSY: InputPin,
    D: Delay,
{
    fn drop(&mut self) {
        self.release_pins();
    }
}
