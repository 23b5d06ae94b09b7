// src/trigger.rs
//
// Process-wide playback trigger.
//
// The engine is created on first use and lives until process (or page) exit.
// The output device inside it is acquired lazily by the first trigger.

use std::sync::LazyLock;

#[cfg(feature = "web")]
use wasm_bindgen::prelude::*;

use crate::config::ToneConfig;
use crate::engine::{Engine, EngineStatus};
use crate::error::PlaybackResult;
use crate::output::HostBackend;

static ENGINE: LazyLock<PlaybackResult<Engine<HostBackend>>> = LazyLock::new(|| {
    let tone = ToneConfig::default();
    Engine::new(HostBackend::new(tone.sample_rate_hz), tone)
});

/// Play one buffer of the default tone. Fire-and-forget.
///
/// Failures are logged and never propagate to the caller; triggering again
/// retries from a clean state.
#[cfg_attr(feature = "web", wasm_bindgen)]
pub fn play_sine_wave() {
    match &*ENGINE {
        Ok(engine) => engine.trigger(),
        Err(e) => log::error!("play_sine_wave failed: {}", e),
    }
}

/// Same as [`play_sine_wave`] but reports the outcome.
pub fn try_play_sine_wave() -> PlaybackResult<()> {
    ENGINE.as_ref().map_err(Clone::clone)?.play()
}

/// Current state of the process-wide engine handle.
pub fn engine_status() -> EngineStatus {
    ENGINE
        .as_ref()
        .map(Engine::status)
        .unwrap_or(EngineStatus::Uninitialized)
}
