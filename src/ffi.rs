// C-compatible FFI bindings for Swift/iOS integration.
//
// All entry points are parameterless and safe to call from the main thread.
// Nothing here hands out pointers; the engine is process-wide.

use log::LevelFilter;
use oslog::OsLogger;

use crate::trigger;

// Logger subsystem identifier
const LOG_SUBSYSTEM: &str = "com.waveshaper.engine";

// ═══════════════════════════════════════════════════════════════════════════
// Logger Initialization
// ═══════════════════════════════════════════════════════════════════════════

/// Initialize the oslog logger.
///
/// Call once at application startup. Output appears in Console.app and
/// Xcode's debug console.
#[unsafe(no_mangle)]
pub extern "C" fn waveshaper_init_logger() {
    OsLogger::new(LOG_SUBSYSTEM)
        .level_filter(LevelFilter::Debug)
        .init()
        .ok();
}

// ═══════════════════════════════════════════════════════════════════════════
// Playback
// ═══════════════════════════════════════════════════════════════════════════

/// Play one buffer of the default tone. Errors are logged, never returned.
#[unsafe(no_mangle)]
pub extern "C" fn waveshaper_play_sine_wave() {
    trigger::play_sine_wave();
}

/// Engine handle state: 0 = uninitialized, 1 = acquiring, 2 = ready, 3 = failed.
#[unsafe(no_mangle)]
pub extern "C" fn waveshaper_engine_status() -> u8 {
    trigger::engine_status() as u8
}
