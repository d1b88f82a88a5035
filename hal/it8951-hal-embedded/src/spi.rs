//! SPI adapter
//!
//! `embedded-hal` buses are configured when they are created, so by default
//! [`SpiBus::configure`] only records the requested settings. Platforms that
//! can change clock and mode at runtime (Linux spidev, for instance) pass a
//! hook with [`EmbeddedSpi::with_configure`]; its error aborts driver
//! initialization.

use embedded_hal::spi;
use it8951_hal::spi::{Phase, Polarity};
use it8951_hal::{Mode, SpiBus, SpiConfig};

/// `embedded-hal` form of a [`Mode`], for configure hooks
///
/// ```ignore
/// fn apply(dev: &mut Spidev, config: &SpiConfig) -> io::Result<()> {
///     let mode = embedded_mode(config.mode);
///     dev.configure(&options(config.frequency, mode))
/// }
/// ```
pub fn embedded_mode(mode: Mode) -> spi::Mode {
    let (polarity, phase): (Polarity, Phase) = mode.into();
    spi::Mode {
        polarity: match polarity {
            Polarity::IdleLow => spi::Polarity::IdleLow,
            Polarity::IdleHigh => spi::Polarity::IdleHigh,
        },
        phase: match phase {
            Phase::CaptureOnFirstTransition => spi::Phase::CaptureOnFirstTransition,
            Phase::CaptureOnSecondTransition => spi::Phase::CaptureOnSecondTransition,
        },
    }
}

type ConfigureHook<S> = fn(&mut S, &SpiConfig) -> Result<(), <S as spi::ErrorType>::Error>;

/// Wraps an `embedded-hal` SPI bus
pub struct EmbeddedSpi<S: spi::ErrorType> {
    bus: S,
    configure: Option<ConfigureHook<S>>,
    config: Option<SpiConfig>,
}

impl<S: spi::SpiBus> EmbeddedSpi<S> {
    /// Wrap an already configured bus
    pub fn new(bus: S) -> Self {
        Self {
            bus,
            configure: None,
            config: None,
        }
    }

    /// Wrap a bus together with a function applying [`SpiConfig`] to it
    pub fn with_configure(bus: S, configure: ConfigureHook<S>) -> Self {
        Self {
            bus,
            configure: Some(configure),
            config: None,
        }
    }

    /// Settings passed to the last successful `configure`
    pub fn config(&self) -> Option<&SpiConfig> {
        self.config.as_ref()
    }

    /// Clock mode of the last successful `configure`, in `embedded-hal` form
    pub fn mode(&self) -> Option<spi::Mode> {
        self.config.map(|config| embedded_mode(config.mode))
    }

    /// Return the wrapped bus
    pub fn into_inner(self) -> S {
        self.bus
    }
}

impl<S: spi::SpiBus> SpiBus for EmbeddedSpi<S> {
    type Error = S::Error;

    fn configure(&mut self, config: &SpiConfig) -> Result<(), Self::Error> {
        if let Some(hook) = self.configure {
            hook(&mut self.bus, config)?;
        }
        self.config = Some(*config);
        Ok(())
    }

    fn write(&mut self, data: &[u8]) -> Result<(), Self::Error> {
        self.bus.write(data)?;
        // chip-select is released right after; the bytes must be on the wire
        self.bus.flush()
    }

    fn read(&mut self, buf: &mut [u8]) -> Result<(), Self::Error> {
        self.bus.read(buf)?;
        self.bus.flush()
    }
}
