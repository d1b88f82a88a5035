//! GPIO adapters
//!
//! `embedded-hal` pins are fallible while the driver treats pin access as
//! infallible. Write errors are counted and otherwise dropped. A failed read
//! reports the pin low so a broken HRDY line looks busy and is caught by a
//! bounded wait policy.

use core::cell::RefCell;

use embedded_hal::digital;
use it8951_hal::{InputPin, OutputPin};

/// Output pin wrapper that remembers the last driven level
///
/// Write errors are dropped, since the driver has no way to recover from
/// a stuck chip-select or reset line. They are counted so board code can
/// check [`EmbeddedOutput::write_errors`] after a failed refresh.
pub struct EmbeddedOutput<P> {
    pin: P,
    high: bool,
    write_errors: u32,
}

impl<P: digital::OutputPin> EmbeddedOutput<P> {
    /// Wrap a pin, driving it to `initial_high`
    pub fn new(pin: P, initial_high: bool) -> Self {
        let mut out = Self {
            pin,
            high: initial_high,
            write_errors: 0,
        };
        out.set_state(initial_high);
        out
    }

    /// Writes the pin rejected since it was wrapped
    pub fn write_errors(&self) -> u32 {
        self.write_errors
    }

    /// Return the wrapped pin
    pub fn into_inner(self) -> P {
        self.pin
    }

    fn record(&mut self, result: Result<(), P::Error>) {
        if result.is_err() {
            self.write_errors = self.write_errors.saturating_add(1);
        }
    }
}

impl<P: digital::OutputPin> OutputPin for EmbeddedOutput<P> {
    fn set_high(&mut self) {
        let result = self.pin.set_high();
        self.record(result);
        self.high = true;
    }

    fn set_low(&mut self) {
        let result = self.pin.set_low();
        self.record(result);
        self.high = false;
    }

    fn is_set_high(&self) -> bool {
        self.high
    }
}

/// Input pin wrapper
///
/// `embedded-hal` 1.0 reads take `&mut self`, hence the `RefCell`.
pub struct EmbeddedInput<P> {
    pin: RefCell<P>,
}

impl<P: digital::InputPin> EmbeddedInput<P> {
    /// Wrap an input pin
    pub fn new(pin: P) -> Self {
        Self {
            pin: RefCell::new(pin),
        }
    }

    /// Return the wrapped pin
    pub fn into_inner(self) -> P {
        self.pin.into_inner()
    }
}

impl<P: digital::InputPin> InputPin for EmbeddedInput<P> {
    fn is_high(&self) -> bool {
        self.pin.borrow_mut().is_high().unwrap_or(false)
    }
}
