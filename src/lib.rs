// src/lib.rs
//
// Library entry point: sine tone synthesis and one-shot playback.
//
// Trigger -> BufferWriter -> Oscillator, with the rendered buffer handed to
// an output facility behind the `output` traits.

mod audio_buffer;
mod config;
mod engine;
mod envelope;
mod error;
mod oscillator;
mod writer;

pub mod output;

#[cfg(feature = "device")]
mod trigger;

#[cfg(feature = "web")]
pub mod wasm;

#[cfg(feature = "ios")]
pub mod ffi;

// Re-export key types for Rust consumers
pub use audio_buffer::AudioBuffer;
pub use config::{
    DEFAULT_AMPLITUDE, DEFAULT_DURATION_SECS, DEFAULT_FADE_MS, DEFAULT_FREQUENCY_HZ,
    DEFAULT_SAMPLE_RATE_HZ, ToneConfig,
};
pub use engine::{Engine, EngineStatus};
pub use envelope::FadeEnvelope;
pub use error::{PlaybackError, PlaybackResult};
pub use oscillator::{Oscillator, Samples};
pub use writer::BufferWriter;

#[cfg(feature = "device")]
pub use trigger::{engine_status, play_sine_wave, try_play_sine_wave};
