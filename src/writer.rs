// src/writer.rs
//
// Materializes oscillator spans into buffers ready for the output facility.

use crate::audio_buffer::AudioBuffer;
use crate::envelope::FadeEnvelope;
use crate::error::{PlaybackError, PlaybackResult};
use crate::oscillator::Oscillator;

/// Renders contiguous oscillator spans, optionally ramping the edges.
#[derive(Debug, Clone, Copy, Default)]
pub struct BufferWriter {
    fade: FadeEnvelope,
}

impl BufferWriter {
    pub fn new(fade: FadeEnvelope) -> Self {
        Self { fade }
    }

    /// Writer that leaves the edges untouched.
    pub fn without_fade() -> Self {
        Self::default()
    }

    pub fn fade(&self) -> FadeEnvelope {
        self.fade
    }

    /// Render `length` samples starting at `start_index`.
    ///
    /// `buffer[i] = oscillator.sample_at(start_index + i)`, scaled by the
    /// fade envelope when one is set.
    pub fn render(
        &self,
        oscillator: &Oscillator,
        start_index: u64,
        length: usize,
    ) -> PlaybackResult<AudioBuffer> {
        if length == 0 {
            return Err(PlaybackError::InvalidDuration);
        }

        let mut data: Vec<f32> = oscillator.samples(start_index).take(length).collect();
        self.fade.apply(&mut data);

        debug_assert!(data.iter().all(|s| (-1.0..=1.0).contains(s)));

        Ok(AudioBuffer::new(data, oscillator.sample_rate_hz()))
    }
}
