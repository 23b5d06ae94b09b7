// src/output/mod.rs
//
// Outbound boundary to the host audio-output facility.
//
// The engine only ever sees these two traits. Hardware routing, device
// buffering latency and mixing of overlapping buffers belong to the
// implementations.

mod headless;
#[cfg(feature = "device")]
mod host;
#[cfg(feature = "device")]
mod queue;

pub use headless::{HeadlessBackend, HeadlessOutput};
#[cfg(feature = "device")]
pub use host::{HostBackend, HostOutput};

use crate::audio_buffer::AudioBuffer;
use crate::error::PlaybackResult;

/// Something that can hand out an output device.
pub trait OutputBackend {
    type Device: OutputDevice;

    /// Acquire the output device/context.
    ///
    /// Fails with [`PlaybackError::DeviceUnavailable`](crate::PlaybackError::DeviceUnavailable).
    fn acquire(&self) -> PlaybackResult<Self::Device>;
}

/// An acquired output device.
///
/// `submit` is a handoff, not a wait: it returns once the facility owns the
/// buffer, while playback continues on the facility's own clock.
pub trait OutputDevice: Send + Sync {
    /// Rate the device actually runs at.
    fn sample_rate(&self) -> u32;

    /// Take ownership of a rendered buffer for playback.
    ///
    /// All-or-nothing: on error nothing from `buffer` is played. Fails with
    /// [`PlaybackError::SubmissionFailed`](crate::PlaybackError::SubmissionFailed).
    fn submit(&self, buffer: AudioBuffer) -> PlaybackResult<()>;
}
