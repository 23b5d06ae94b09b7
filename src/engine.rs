// src/engine.rs

use std::sync::{
    Arc, Mutex, PoisonError,
    atomic::{AtomicU8, AtomicU64, Ordering},
};

use crate::config::ToneConfig;
use crate::envelope::FadeEnvelope;
use crate::error::PlaybackResult;
use crate::oscillator::Oscillator;
use crate::output::{OutputBackend, OutputDevice};
use crate::writer::BufferWriter;

/// Lifecycle of the engine handle.
///
/// `Uninitialized -> Acquiring -> Ready` on success,
/// `Acquiring -> Failed -> Uninitialized` on error so the next trigger retries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum EngineStatus {
    Uninitialized = 0,
    Acquiring = 1,
    Ready = 2,
    Failed = 3,
}

impl EngineStatus {
    fn from_u8(value: u8) -> Self {
        match value {
            1 => EngineStatus::Acquiring,
            2 => EngineStatus::Ready,
            3 => EngineStatus::Failed,
            _ => EngineStatus::Uninitialized,
        }
    }
}

/// Acquired device slot. `Ready` is the only state buffers are submitted from.
enum Handle<D> {
    Uninitialized,
    Ready(Arc<D>),
}

/// Lock-free readback for observers (UI, logs).
///
/// Mirrors the lifecycle so status can be read while another caller holds
/// the handle lock mid-acquisition.
struct Readback {
    status: AtomicU8,
    acquisitions: AtomicU64,
    submissions: AtomicU64,
}

impl Readback {
    fn new() -> Self {
        Self {
            status: AtomicU8::new(EngineStatus::Uninitialized as u8),
            acquisitions: AtomicU64::new(0),
            submissions: AtomicU64::new(0),
        }
    }

    #[inline]
    fn set_status(&self, status: EngineStatus) {
        self.status.store(status as u8, Ordering::Release);
    }
}

/// Tone playback engine.
///
/// Owns the output backend and the engine handle. `play` may be called from
/// several threads at once: acquisition is serialized behind the handle lock,
/// submission happens outside it.
///
/// The tone is validated once at construction; a built engine can always render.
pub struct Engine<B: OutputBackend> {
    backend: B,
    tone: ToneConfig,
    oscillator: Oscillator,
    frames: usize,
    writer: BufferWriter,
    handle: Mutex<Handle<B::Device>>,
    readback: Readback,
}

impl<B: OutputBackend> Engine<B> {
    /// Build an engine for `tone`.
    ///
    /// Fails with `InvalidTone` or `InvalidDuration` before any device is touched.
    pub fn new(backend: B, tone: ToneConfig) -> PlaybackResult<Self> {
        let oscillator = Oscillator::new(tone.frequency_hz, tone.sample_rate_hz, tone.amplitude)?;
        let frames = tone.frame_count()?;
        let writer = BufferWriter::new(FadeEnvelope::new(tone.fade_frames()));

        Ok(Self {
            backend,
            tone,
            oscillator,
            frames,
            writer,
            handle: Mutex::new(Handle::Uninitialized),
            readback: Readback::new(),
        })
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn tone(&self) -> &ToneConfig {
        &self.tone
    }

    pub fn status(&self) -> EngineStatus {
        EngineStatus::from_u8(self.readback.status.load(Ordering::Acquire))
    }

    /// Number of successful device acquisitions.
    pub fn acquisitions(&self) -> u64 {
        self.readback.acquisitions.load(Ordering::Relaxed)
    }

    /// Number of buffers accepted by the output facility.
    pub fn submissions(&self) -> u64 {
        self.readback.submissions.load(Ordering::Relaxed)
    }

    /// Acquire the output device if not already acquired.
    ///
    /// Idempotent. Concurrent first calls block on the handle lock and the
    /// losers reuse the winner's device.
    pub fn acquire(&self) -> PlaybackResult<Arc<B::Device>> {
        let mut handle = self.handle.lock().unwrap_or_else(PoisonError::into_inner);

        if let Handle::Ready(device) = &*handle {
            return Ok(Arc::clone(device));
        }

        self.readback.set_status(EngineStatus::Acquiring);
        match self.backend.acquire() {
            Ok(device) => {
                let device = Arc::new(device);
                *handle = Handle::Ready(Arc::clone(&device));
                self.readback.acquisitions.fetch_add(1, Ordering::Relaxed);
                self.readback.set_status(EngineStatus::Ready);
                log::info!("Output device acquired at {} Hz", device.sample_rate());
                Ok(device)
            }
            Err(e) => {
                self.readback.set_status(EngineStatus::Failed);
                log::warn!("Output device acquisition failed: {}", e);
                *handle = Handle::Uninitialized;
                self.readback.set_status(EngineStatus::Uninitialized);
                Err(e)
            }
        }
    }

    /// Frames rendered per trigger.
    pub fn frames(&self) -> usize {
        self.frames
    }

    /// Render one buffer of the configured tone and submit it.
    ///
    /// 1. acquire (or reuse) the device
    /// 2. render `duration_secs` of samples from index 0
    /// 3. hand the buffer to the device
    pub fn play(&self) -> PlaybackResult<()> {
        let device = self.acquire()?;
        let buffer = self.writer.render(&self.oscillator, 0, self.frames)?;

        device.submit(buffer).inspect_err(|e| {
            log::warn!("Buffer submission failed: {}", e);
        })?;

        self.readback.submissions.fetch_add(1, Ordering::Relaxed);
        log::info!(
            "Submitted {} frames of {} Hz tone",
            self.frames,
            self.tone.frequency_hz
        );
        Ok(())
    }

    /// Fire-and-forget [`play`](Self::play): failures are logged, never returned.
    pub fn trigger(&self) {
        if let Err(e) = self.play() {
            log::error!("play_sine_wave failed: {}", e);
        }
    }
}
