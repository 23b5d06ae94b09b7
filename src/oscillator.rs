// src/oscillator.rs
//
// Analytic sine oscillator.

use std::f64::consts::TAU;

use crate::error::{PlaybackError, PlaybackResult};

// ═══════════════════════════════════════════════════════════════════
// Sine Oscillator
// ═══════════════════════════════════════════════════════════════════

/// Fixed-frequency sine source addressed by sample index.
///
/// Phase is derived from the index on every call rather than accumulated,
/// so any span can be rendered in any order and disjoint spans can be read
/// concurrently through a shared reference.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Oscillator {
    frequency_hz: f64,
    sample_rate_hz: u32,
    amplitude: f32,
}

impl Oscillator {
    pub fn new(frequency_hz: f64, sample_rate_hz: u32, amplitude: f32) -> PlaybackResult<Self> {
        if sample_rate_hz == 0 {
            return Err(PlaybackError::InvalidTone("sample rate must be positive".into()));
        }
        let nyquist = sample_rate_hz as f64 / 2.0;
        if !frequency_hz.is_finite() || frequency_hz <= 0.0 || frequency_hz >= nyquist {
            return Err(PlaybackError::InvalidTone(format!(
                "frequency {} Hz outside (0, {}) Hz",
                frequency_hz, nyquist
            )));
        }
        if !(0.0..=1.0).contains(&amplitude) {
            return Err(PlaybackError::InvalidTone(format!(
                "amplitude {} outside [0, 1]",
                amplitude
            )));
        }

        Ok(Self {
            frequency_hz,
            sample_rate_hz,
            amplitude,
        })
    }

    #[inline]
    pub fn frequency_hz(&self) -> f64 {
        self.frequency_hz
    }

    #[inline]
    pub fn sample_rate_hz(&self) -> u32 {
        self.sample_rate_hz
    }

    #[inline]
    pub fn amplitude(&self) -> f32 {
        self.amplitude
    }

    /// Samples per cycle.
    pub fn period_samples(&self) -> f64 {
        self.sample_rate_hz as f64 / self.frequency_hz
    }

    /// Phase in radians at sample `n`, normalized to [0, 2π).
    #[inline]
    pub fn phase_at(&self, n: u64) -> f64 {
        self.phase_at_position(n as f64)
    }

    #[inline]
    fn phase_at_position(&self, position: f64) -> f64 {
        let cycles = (self.frequency_hz * position / self.sample_rate_hz as f64).rem_euclid(1.0);
        // rem_euclid can round up to exactly 1.0 for tiny negative inputs
        if cycles >= 1.0 { 0.0 } else { cycles * TAU }
    }

    /// Value at sample index `n`: `amplitude * sin(2π * f * n / sr)`.
    #[inline]
    pub fn sample_at(&self, n: u64) -> f32 {
        self.sample_at_position(n as f64)
    }

    /// Value at a fractional sample position.
    #[inline]
    pub fn sample_at_position(&self, position: f64) -> f32 {
        (self.amplitude as f64 * self.phase_at_position(position).sin()) as f32
    }

    /// Lazy, infinite sequence of samples starting at index `start`.
    pub fn samples(&self, start: u64) -> Samples<'_> {
        Samples {
            oscillator: self,
            index: start,
        }
    }
}

/// Iterator returned by [`Oscillator::samples`].
pub struct Samples<'a> {
    oscillator: &'a Oscillator,
    index: u64,
}

impl Iterator for Samples<'_> {
    type Item = f32;

    #[inline]
    fn next(&mut self) -> Option<f32> {
        let sample = self.oscillator.sample_at(self.index);
        self.index = self.index.wrapping_add(1);
        Some(sample)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (usize::MAX, None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scenario_a440() {
        let osc = Oscillator::new(440.0, 44_100, 1.0).unwrap();
        assert_eq!(osc.sample_at(0), 0.0);

        // Quarter cycle lands between samples at 440 Hz
        let quarter = 44_100.0 / (4.0 * 440.0);
        assert!((osc.sample_at_position(quarter) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_quarter_cycle_peak_on_integer_index() {
        let osc = Oscillator::new(441.0, 44_100, 1.0).unwrap();
        assert!((osc.sample_at(25) - 1.0).abs() < 1e-6);
        assert!((osc.sample_at(75) + 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_sample_range() {
        let osc = Oscillator::new(440.0, 44_100, 0.8).unwrap();
        for n in 0..44_100 {
            let sample = osc.sample_at(n);
            assert!((-0.8..=0.8).contains(&sample));
        }
    }

    #[test]
    fn test_periodicity() {
        for (freq, period) in [(441.0, 100), (100.0, 441)] {
            let osc = Oscillator::new(freq, 44_100, 1.0).unwrap();
            assert_eq!(osc.period_samples(), period as f64);
            for n in 0..2_000u64 {
                let a = osc.sample_at(n);
                let b = osc.sample_at(n + period);
                assert!((a - b).abs() < 1e-5, "n = {n}: {a} vs {b}");
            }
        }
    }

    #[test]
    fn test_phase_normalized() {
        let osc = Oscillator::new(1_000.0, 44_100, 1.0).unwrap();
        for n in (0..1_000_000u64).step_by(997) {
            let phase = osc.phase_at(n);
            assert!((0.0..TAU).contains(&phase));
        }
        assert!((0.0..TAU).contains(&osc.phase_at(u64::MAX)));
    }

    #[test]
    fn test_samples_restartable() {
        let osc = Oscillator::new(440.0, 48_000, 1.0).unwrap();
        let first: Vec<f32> = osc.samples(1_000).take(64).collect();
        let second: Vec<f32> = osc.samples(1_000).take(64).collect();
        assert_eq!(first, second);

        for (i, sample) in first.iter().enumerate() {
            assert_eq!(*sample, osc.sample_at(1_000 + i as u64));
        }
    }

    #[test]
    fn test_invalid_parameters() {
        assert!(matches!(
            Oscillator::new(440.0, 0, 1.0),
            Err(PlaybackError::InvalidTone(_))
        ));
        assert!(matches!(
            Oscillator::new(0.0, 44_100, 1.0),
            Err(PlaybackError::InvalidTone(_))
        ));
        assert!(matches!(
            Oscillator::new(22_050.0, 44_100, 1.0),
            Err(PlaybackError::InvalidTone(_))
        ));
        assert!(matches!(
            Oscillator::new(f64::NAN, 44_100, 1.0),
            Err(PlaybackError::InvalidTone(_))
        ));
        assert!(matches!(
            Oscillator::new(440.0, 44_100, 1.5),
            Err(PlaybackError::InvalidTone(_))
        ));
    }
}
