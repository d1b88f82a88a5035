//! Blocking delay abstraction
//!
//! Used for the reset pulse timing and as the back-off between busy polls.

/// Blocking delay provider
pub trait Delay {
    /// Block for at least `ms` milliseconds
    fn delay_ms(&mut self, ms: u32);

    /// Block for at least `us` microseconds
    fn delay_us(&mut self, us: u32);
}
