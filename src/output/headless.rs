// src/output/headless.rs
//
// Output facility without an OS device.
//
// Submitted buffers are kept in memory. Hosts that move samples themselves
// (an AudioWorklet, a file writer) drain them with `take_submitted`.

use std::sync::{Arc, Mutex, PoisonError};

use super::{OutputBackend, OutputDevice};
use crate::audio_buffer::AudioBuffer;
use crate::error::PlaybackResult;

/// Backend whose devices capture every submitted buffer.
///
/// Cloning is shallow: all clones and all acquired devices share one capture list.
#[derive(Clone)]
pub struct HeadlessBackend {
    sample_rate: u32,
    captured: Arc<Mutex<Vec<AudioBuffer>>>,
}

impl HeadlessBackend {
    pub fn new(sample_rate: u32) -> Self {
        Self {
            sample_rate,
            captured: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Number of buffers submitted so far and not yet taken.
    pub fn pending(&self) -> usize {
        self.captured.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    /// Drain all captured buffers in submission order.
    pub fn take_submitted(&self) -> Vec<AudioBuffer> {
        std::mem::take(&mut *self.captured.lock().unwrap_or_else(PoisonError::into_inner))
    }
}

impl OutputBackend for HeadlessBackend {
    type Device = HeadlessOutput;

    fn acquire(&self) -> PlaybackResult<HeadlessOutput> {
        log::debug!("Headless output acquired at {} Hz", self.sample_rate);
        Ok(HeadlessOutput {
            sample_rate: self.sample_rate,
            captured: Arc::clone(&self.captured),
        })
    }
}

/// Device handed out by [`HeadlessBackend`].
pub struct HeadlessOutput {
    sample_rate: u32,
    captured: Arc<Mutex<Vec<AudioBuffer>>>,
}

impl OutputDevice for HeadlessOutput {
    fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    fn submit(&self, buffer: AudioBuffer) -> PlaybackResult<()> {
        let buffer = buffer.resampled(self.sample_rate);
        self.captured
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(buffer);
        Ok(())
    }
}
