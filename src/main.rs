// src/main.rs
//
// Native player: `waveshaper` plays one tone on the default output device,
// `waveshaper --headless` renders it in memory and prints a summary.

use std::process::ExitCode;
use std::thread;
use std::time::Duration;

use waveshaper::output::HeadlessBackend;
use waveshaper::{Engine, ToneConfig};

// Extra wait so the device drains its queue before the process exits
const DRAIN_MARGIN: Duration = Duration::from_millis(250);

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let headless = std::env::args().skip(1).any(|arg| arg == "--headless");
    let tone = ToneConfig::default();

    if headless {
        let engine = match Engine::new(HeadlessBackend::new(tone.sample_rate_hz), tone) {
            Ok(engine) => engine,
            Err(e) => {
                log::error!("Invalid tone configuration: {}", e);
                return ExitCode::FAILURE;
            }
        };
        if let Err(e) = engine.play() {
            log::error!("Headless render failed: {}", e);
            return ExitCode::FAILURE;
        }

        for buffer in engine.backend().take_submitted() {
            println!(
                "{} frames @ {} Hz ({:.3} s), peak {:.4}",
                buffer.len(),
                buffer.sample_rate(),
                buffer.duration_secs(),
                buffer.peak()
            );
        }
        return ExitCode::SUCCESS;
    }

    if let Err(e) = waveshaper::try_play_sine_wave() {
        log::error!("Playback failed: {}", e);
        return ExitCode::FAILURE;
    }

    // Submission is a handoff; keep the process alive while the tone plays
    thread::sleep(Duration::from_secs_f64(tone.duration_secs) + DRAIN_MARGIN);
    log::info!("Engine status: {:?}", waveshaper::engine_status());
    ExitCode::SUCCESS
}
