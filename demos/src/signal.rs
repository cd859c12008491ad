//! Test signal driven into the simulated input pin

use std::f32::consts::PI;

use avr_adc::SAMPLE_MAX;

/// Sine riding on a DC offset, in ADC counts
#[derive(Debug, Clone, Copy)]
pub struct Tone {
    pub offset: u16,
    pub amplitude: u16,
    /// Cycles per capture window
    pub cycles: usize,
    /// Samples per capture window
    pub window: usize,
}

impl Tone {
    /// Level of the `n`th sample, clamped to the converter range
    pub fn level(&self, n: usize) -> u16 {
        let phase = 2.0 * PI * (self.cycles * n) as f32 / self.window as f32;
        let level = f32::from(self.offset) + f32::from(self.amplitude) * phase.sin();
        level.round().clamp(0.0, f32::from(SAMPLE_MAX)) as u16
    }
}
