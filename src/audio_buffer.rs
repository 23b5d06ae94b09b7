// src/audio_buffer.rs

/// One rendered block of mono samples, created fresh per playback request.
///
/// Owned by the trigger until submitted, after which the output facility owns it.
#[derive(Debug, Clone, PartialEq)]
pub struct AudioBuffer {
    sample_rate: u32,
    data: Vec<f32>,
}

impl AudioBuffer {
    /// Create a new AudioBuffer taking ownership of existing data.
    #[inline]
    pub fn new(data: Vec<f32>, sample_rate: u32) -> Self {
        Self { sample_rate, data }
    }

    /// Create a silent buffer of `frames` samples.
    pub fn silent(frames: usize, sample_rate: u32) -> Self {
        Self::new(vec![0.0; frames], sample_rate)
    }

    #[inline]
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    #[inline]
    pub fn clear(&mut self) {
        self.data.fill(0.0);
    }

    /// Get direct access to the sample data.
    #[inline]
    pub fn samples(&self) -> &[f32] {
        &self.data
    }

    /// Get mutable access to the sample data.
    #[inline]
    pub fn samples_mut(&mut self) -> &mut [f32] {
        &mut self.data
    }

    #[inline]
    pub fn into_samples(self) -> Vec<f32> {
        self.data
    }

    /// Playback length in seconds at the buffer's own sample rate.
    pub fn duration_secs(&self) -> f64 {
        if self.sample_rate == 0 {
            return 0.0;
        }
        self.data.len() as f64 / self.sample_rate as f64
    }

    /// Largest absolute sample value.
    pub fn peak(&self) -> f32 {
        self.data.iter().fold(0.0f32, |peak, s| peak.max(s.abs()))
    }

    /// Linear-interpolated copy at `target_rate`.
    ///
    /// Duration is preserved; first and last samples map onto the new first
    /// and last samples so edge ramps survive the conversion.
    pub fn resampled(&self, target_rate: u32) -> AudioBuffer {
        if target_rate == self.sample_rate || self.data.len() < 2 || self.sample_rate == 0 {
            return AudioBuffer::new(self.data.clone(), target_rate);
        }

        let out_len =
            ((self.data.len() as u64 * target_rate as u64) / self.sample_rate as u64).max(2) as usize;
        let scale = (self.data.len() - 1) as f64 / (out_len - 1) as f64;
        let last = self.data.len() - 1;

        let data = (0..out_len)
            .map(|i| {
                let pos = i as f64 * scale;
                let idx = (pos.floor() as usize).min(last);
                let next = (idx + 1).min(last);
                let frac = (pos - idx as f64) as f32;
                self.data[idx] + (self.data[next] - self.data[idx]) * frac
            })
            .collect();

        AudioBuffer::new(data, target_rate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_buffer_basics() {
        let mut buffer = AudioBuffer::new(vec![0.25, -0.75, 0.5], 48_000);
        assert_eq!(buffer.len(), 3);
        assert!(!buffer.is_empty());
        assert_eq!(buffer.peak(), 0.75);

        buffer.clear();
        assert_eq!(buffer.peak(), 0.0);
        assert_eq!(buffer.into_samples(), vec![0.0; 3]);
    }

    #[test]
    fn test_duration() {
        let buffer = AudioBuffer::silent(22_050, 44_100);
        assert_eq!(buffer.duration_secs(), 0.5);
    }

    #[test]
    fn test_resample_same_rate_is_copy() {
        let buffer = AudioBuffer::new(vec![0.1, 0.2, 0.3], 44_100);
        assert_eq!(buffer.resampled(44_100), buffer);
    }

    #[test]
    fn test_resample_preserves_duration_and_edges() {
        let data: Vec<f32> = (0..441).map(|i| i as f32 / 440.0).collect();
        let buffer = AudioBuffer::new(data, 44_100);
        let up = buffer.resampled(48_000);

        assert_eq!(up.sample_rate(), 48_000);
        assert_eq!(up.len(), 480);
        assert_eq!(up.samples()[0], 0.0);
        assert!((up.samples()[479] - 1.0).abs() < 1e-6);

        // A linear ramp stays linear
        for pair in up.samples().windows(2) {
            assert!(pair[1] >= pair[0]);
        }
    }
}
