//! WebAssembly bindings via wasm-bindgen for browser integration.
//!
//! This module is only compiled when the `web` feature is enabled.
//!
//! # Usage
//!
//! Build with wasm-pack:
//! ```bash
//! wasm-pack build --target web --features web
//! ```
//!
//! # JavaScript Example
//!
//! ```javascript
//! import init, { play_sine_wave } from './pkg/waveshaper.js';
//!
//! await init();
//!
//! // Audio can only start from a user gesture
//! document.getElementById('ui-box').addEventListener('click', () => {
//!   play_sine_wave();
//! });
//! ```

use wasm_bindgen::prelude::*;

use crate::engine::EngineStatus;
use crate::trigger;

// ═══════════════════════════════════════════════════════════════════════════
// Initialization
// ═══════════════════════════════════════════════════════════════════════════

/// Runs when the module is instantiated. Sets up panic hooks and console logging.
#[wasm_bindgen(start)]
pub fn waveshaper_start() {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Debug).ok();
}

// ═══════════════════════════════════════════════════════════════════════════
// Readback
// ═══════════════════════════════════════════════════════════════════════════

/// Engine handle state as a string: "uninitialized", "acquiring", "ready" or "failed".
#[wasm_bindgen]
pub fn engine_status() -> String {
    match trigger::engine_status() {
        EngineStatus::Uninitialized => "uninitialized",
        EngineStatus::Acquiring => "acquiring",
        EngineStatus::Ready => "ready",
        EngineStatus::Failed => "failed",
    }
    .to_string()
}
