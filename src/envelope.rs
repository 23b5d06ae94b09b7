// src/envelope.rs
//
// Linear edge ramps applied to rendered buffers.

/// Fade-in/fade-out applied to the first and last `frames` samples of a buffer.
///
/// Gain is 0 on the outermost sample and climbs linearly to 1 at the inner edge
/// of the window, so a buffer never starts or stops on a discontinuity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FadeEnvelope {
    frames: usize,
}

impl FadeEnvelope {
    pub fn new(frames: usize) -> Self {
        Self { frames }
    }

    pub fn frames(&self) -> usize {
        self.frames
    }

    pub fn is_enabled(&self) -> bool {
        self.frames > 0
    }

    /// Ramp length actually used for a buffer of `len` samples.
    ///
    /// Clamped to half the buffer so the two ramps never overlap.
    #[inline]
    fn window(&self, len: usize) -> usize {
        self.frames.min(len / 2)
    }

    /// Gain applied at `index` in a buffer of `len` samples.
    pub fn gain_at(&self, index: usize, len: usize) -> f32 {
        let window = self.window(len);
        if window == 0 || index >= len {
            return 1.0;
        }

        let from_edge = index.min(len - 1 - index);
        if from_edge >= window {
            1.0
        } else {
            from_edge as f32 / window as f32
        }
    }

    /// Apply the envelope in place.
    pub fn apply(&self, samples: &mut [f32]) {
        let len = samples.len();
        let window = self.window(len);
        if window == 0 {
            return;
        }

        let step = 1.0 / window as f32;
        for i in 0..window {
            let gain = i as f32 * step;
            samples[i] *= gain;
            samples[len - 1 - i] *= gain;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gain_profile() {
        let env = FadeEnvelope::new(4);
        let gains: Vec<f32> = (0..12).map(|i| env.gain_at(i, 12)).collect();
        assert_eq!(
            gains,
            vec![0.0, 0.25, 0.5, 0.75, 1.0, 1.0, 1.0, 1.0, 0.75, 0.5, 0.25, 0.0]
        );
    }

    #[test]
    fn test_apply_matches_gain() {
        let env = FadeEnvelope::new(3);
        let mut samples = vec![1.0f32; 10];
        env.apply(&mut samples);
        for (i, sample) in samples.iter().enumerate() {
            assert!((sample - env.gain_at(i, 10)).abs() < 1e-6);
        }
    }

    #[test]
    fn test_window_clamped_to_half_buffer() {
        let env = FadeEnvelope::new(100);
        let mut samples = vec![1.0f32; 6];
        env.apply(&mut samples);
        assert_eq!(samples[0], 0.0);
        assert_eq!(samples[5], 0.0);
        assert!(samples.iter().all(|s| (0.0..=1.0).contains(s)));
    }

    #[test]
    fn test_disabled_is_identity() {
        let env = FadeEnvelope::default();
        assert!(!env.is_enabled());
        let mut samples = vec![0.5f32; 8];
        env.apply(&mut samples);
        assert!(samples.iter().all(|&s| s == 0.5));
        assert_eq!(env.gain_at(0, 8), 1.0);
    }

    #[test]
    fn test_single_sample_untouched() {
        let env = FadeEnvelope::new(10);
        let mut samples = vec![0.5f32];
        env.apply(&mut samples);
        assert_eq!(samples, vec![0.5]);
    }
}
