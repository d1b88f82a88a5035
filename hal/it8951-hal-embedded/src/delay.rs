//! Delay adapter

use embedded_hal::delay::DelayNs;
use it8951_hal::Delay;

/// Wraps an `embedded-hal` delay provider
pub struct EmbeddedDelay<D> {
    delay: D,
}

impl<D: DelayNs> EmbeddedDelay<D> {
    /// Wrap a delay provider
    pub fn new(delay: D) -> Self {
        Self { delay }
    }

    /// Return the wrapped delay provider
    pub fn into_inner(self) -> D {
        self.delay
    }
}

impl<D: DelayNs> Delay for EmbeddedDelay<D> {
    fn delay_ms(&mut self, ms: u32) {
        self.delay.delay_ms(ms);
    }

    fn delay_us(&mut self, us: u32) {
        self.delay.delay_us(us);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct MockDelay {
        total_ns: u64,
    }

    impl DelayNs for MockDelay {
        fn delay_ns(&mut self, ns: u32) {
            self.total_ns += ns as u64;
        }
    }

    #[test]
    fn test_delay_forwards() {
        let mut delay = EmbeddedDelay::new(MockDelay { total_ns: 0 });
        delay.delay_ms(2);
        delay.delay_us(10);
        assert_eq!(delay.into_inner().total_ns, 2_010_000);
    }
}
