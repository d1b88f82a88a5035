//! Driver errors

use core::fmt;

use it8951_protocol::ProtocolError;

/// Result alias over the SPI bus error type
pub type Result<T, E> = core::result::Result<T, Error<E>>;

/// Which wait gave up
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Wait {
    /// HRDY stayed low
    HostReady,
    /// The display engine status register stayed non-zero
    Display,
}

/// Driver error, generic over the SPI bus error `E`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error<E> {
    /// Configuring the SPI bus failed while opening the session
    Open(E),
    /// A transfer failed mid-transaction
    Spi(E),
    /// A bounded wait ran out of polls
    Timeout(Wait),
    /// Target address read back differs from the one written
    AddressMismatch {
        /// Address written to LISAR
        written: u32,
        /// Address read back
        read: u32,
    },
    /// Caller buffer shorter than the area needs
    BufferTooSmall {
        /// Words the area occupies
        required: usize,
        /// Words supplied
        actual: usize,
    },
    /// Controller answered with data that does not decode
    Protocol(ProtocolError),
}

impl<E> From<ProtocolError> for Error<E> {
    fn from(e: ProtocolError) -> Self {
        Error::Protocol(e)
    }
}

impl<E: fmt::Debug> fmt::Display for Error<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Open(e) => write!(f, "failed to open SPI bus: {:?}", e),
            Error::Spi(e) => write!(f, "SPI transfer failed: {:?}", e),
            Error::Timeout(Wait::HostReady) => write!(f, "timed out waiting for HRDY"),
            Error::Timeout(Wait::Display) => write!(f, "timed out waiting for display engine"),
            Error::AddressMismatch { written, read } => write!(
                f,
                "target address mismatch: wrote {:#010x}, read {:#010x}",
                written, read
            ),
            Error::BufferTooSmall { required, actual } => write!(
                f,
                "buffer too small: need {} words, got {}",
                required, actual
            ),
            Error::Protocol(e) => write!(f, "protocol error: {}", e),
        }
    }
}
