// src/config.rs
//
// Fixed tone parameters for a playback request.

use crate::error::{PlaybackError, PlaybackResult};

// Default tone configuration
pub const DEFAULT_FREQUENCY_HZ: f64 = 440.0;
pub const DEFAULT_SAMPLE_RATE_HZ: u32 = 44_100;
pub const DEFAULT_AMPLITUDE: f32 = 0.5;
pub const DEFAULT_DURATION_SECS: f64 = 1.0;
pub const DEFAULT_FADE_MS: f64 = 5.0;

/// Parameters of the tone rendered on every trigger.
///
/// The trigger itself is parameterless and always plays [`ToneConfig::default`].
/// Embedders driving an [`Engine`](crate::Engine) directly may pick their own.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ToneConfig {
    /// Oscillator frequency in Hz (e.g., 440.0).
    pub frequency_hz: f64,
    /// Render sample rate in Hz (e.g., 44100).
    pub sample_rate_hz: u32,
    /// Peak amplitude (0.0 - 1.0).
    pub amplitude: f32,
    /// Length of one playback buffer in seconds.
    pub duration_secs: f64,
    /// Length of each edge ramp in milliseconds. 0 disables the envelope.
    pub fade_ms: f64,
}

impl Default for ToneConfig {
    fn default() -> Self {
        Self {
            frequency_hz: DEFAULT_FREQUENCY_HZ,
            sample_rate_hz: DEFAULT_SAMPLE_RATE_HZ,
            amplitude: DEFAULT_AMPLITUDE,
            duration_secs: DEFAULT_DURATION_SECS,
            fade_ms: DEFAULT_FADE_MS,
        }
    }
}

impl ToneConfig {
    pub fn with_frequency(mut self, frequency_hz: f64) -> Self {
        self.frequency_hz = frequency_hz;
        self
    }

    pub fn with_sample_rate(mut self, sample_rate_hz: u32) -> Self {
        self.sample_rate_hz = sample_rate_hz;
        self
    }

    pub fn with_amplitude(mut self, amplitude: f32) -> Self {
        self.amplitude = amplitude;
        self
    }

    pub fn with_duration(mut self, duration_secs: f64) -> Self {
        self.duration_secs = duration_secs;
        self
    }

    pub fn with_fade(mut self, fade_ms: f64) -> Self {
        self.fade_ms = fade_ms;
        self
    }

    /// Number of frames in one buffer, rounded down.
    pub fn frame_count(&self) -> PlaybackResult<usize> {
        if !self.duration_secs.is_finite() || self.duration_secs <= 0.0 {
            return Err(PlaybackError::InvalidDuration);
        }
        let frames = (self.duration_secs * self.sample_rate_hz as f64).floor();
        if frames < 1.0 {
            return Err(PlaybackError::InvalidDuration);
        }
        Ok(frames as usize)
    }

    /// Number of frames in each edge ramp.
    pub fn fade_frames(&self) -> usize {
        if !self.fade_ms.is_finite() || self.fade_ms <= 0.0 {
            return 0;
        }
        (self.fade_ms * self.sample_rate_hz as f64 / 1000.0).round() as usize
    }
}
