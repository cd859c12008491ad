//! Recording delay

use embedded_hal::delay::DelayNs;

/// [`DelayNs`] implementation that accumulates requested time instead of waiting
#[derive(Debug, Clone, Default)]
pub struct SimDelay {
    elapsed_ns: u64,
    calls: u32,
}

impl SimDelay {
    /// Create a delay with nothing elapsed
    pub fn new() -> Self {
        Self::default()
    }

    /// Total requested delay in nanoseconds
    pub fn elapsed_ns(&self) -> u64 {
        self.elapsed_ns
    }

    /// Total requested delay in whole microseconds
    pub fn elapsed_us(&self) -> u64 {
        self.elapsed_ns / 1_000
    }

    /// Number of delay requests
    pub fn calls(&self) -> u32 {
        self.calls
    }
}

impl DelayNs for SimDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.elapsed_ns += u64::from(ns);
        self.calls += 1;
    }

    fn delay_us(&mut self, us: u32) {
        self.elapsed_ns += u64::from(us) * 1_000;
        self.calls += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accumulates_mixed_units() {
        let mut delay = SimDelay::new();
        delay.delay_us(250);
        delay.delay_ns(500);
        delay.delay_ms(1);
        assert_eq!(delay.elapsed_ns(), 1_250_500);
        assert_eq!(delay.elapsed_us(), 1_250);
    }
}
