// src/output/host.rs
//
// Output facility backed by the host's default audio device (cpal).
//
// On the web this routes through WebAudio; natively through the platform
// host (CoreAudio, WASAPI, ALSA, ...).

use std::sync::{Mutex, PoisonError};

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{FromSample, Sample, SampleFormat, SizedSample, StreamConfig, SupportedStreamConfig};

use super::queue::{QUEUE_SECONDS, QueueReader, QueueWriter, playback_queue};
use super::{OutputBackend, OutputDevice};
use crate::audio_buffer::AudioBuffer;
use crate::error::{PlaybackError, PlaybackResult};

/// Backend acquiring the default output device of the default host.
pub struct HostBackend {
    /// Rate the engine renders at; used when the device supports it.
    preferred_sample_rate: u32,
}

impl HostBackend {
    pub fn new(preferred_sample_rate: u32) -> Self {
        Self {
            preferred_sample_rate,
        }
    }
}

impl OutputBackend for HostBackend {
    type Device = HostOutput;

    fn acquire(&self) -> PlaybackResult<HostOutput> {
        let host = cpal::default_host();
        let device = host.default_output_device().ok_or_else(|| {
            PlaybackError::DeviceUnavailable("no default output device".to_string())
        })?;

        let device_name = device.name().unwrap_or_else(|_| "Unknown".to_string());
        log::info!("Using output device: {}", device_name);

        let supported = select_config(&device, self.preferred_sample_rate)?;
        let sample_format = supported.sample_format();
        let config: StreamConfig = supported.into();
        log::debug!("Audio config: {:?} ({:?})", config, sample_format);

        let sample_rate = config.sample_rate.0;
        let (writer, reader) = playback_queue(sample_rate as usize * QUEUE_SECONDS);
        let stream = match sample_format {
            SampleFormat::F32 => build_stream::<f32>(&device, &config, reader),
            SampleFormat::I16 => build_stream::<i16>(&device, &config, reader),
            SampleFormat::U16 => build_stream::<u16>(&device, &config, reader),
            other => Err(PlaybackError::DeviceUnavailable(format!(
                "unsupported sample format {:?}",
                other
            ))),
        }?;

        stream.play().map_err(|e| {
            PlaybackError::DeviceUnavailable(format!("failed to start output stream: {}", e))
        })?;

        // cpal::Stream is !Send, so it cannot live inside the shared handle.
        // The stream stays alive until process exit.
        std::mem::forget(stream);

        Ok(HostOutput {
            sample_rate,
            channels: config.channels as usize,
            writer: Mutex::new(writer),
        })
    }
}

/// Prefer an f32 config at the render rate, else whatever the device defaults to.
fn select_config(device: &cpal::Device, preferred: u32) -> PlaybackResult<SupportedStreamConfig> {
    if let Ok(ranges) = device.supported_output_configs() {
        for range in ranges {
            if range.sample_format() == SampleFormat::F32
                && range.min_sample_rate().0 <= preferred
                && preferred <= range.max_sample_rate().0
            {
                return Ok(range.with_sample_rate(cpal::SampleRate(preferred)));
            }
        }
    }

    device.default_output_config().map_err(|e| {
        PlaybackError::DeviceUnavailable(format!("failed to get default output config: {}", e))
    })
}

fn build_stream<T>(
    device: &cpal::Device,
    config: &StreamConfig,
    mut reader: QueueReader,
) -> PlaybackResult<cpal::Stream>
where
    T: SizedSample + FromSample<f32> + 'static,
{
    let channels = config.channels as usize;
    device
        .build_output_stream(
            config,
            move |data: &mut [T], _: &cpal::OutputCallbackInfo| {
                write_audio_samples(data, channels, &mut reader);
            },
            |err| log::error!("Audio stream error: {}", err),
            None,
        )
        .map_err(|e| {
            PlaybackError::DeviceUnavailable(format!("failed to build output stream: {}", e))
        })
}

/// Fill one device block from the queue. Never blocks, allocates or frees.
fn write_audio_samples<T: Sample + FromSample<f32>>(
    data: &mut [T],
    channels: usize,
    reader: &mut QueueReader,
) {
    for frame in data.chunks_mut(channels) {
        let value = reader
            .next_sample()
            .map(T::from_sample)
            .unwrap_or(T::EQUILIBRIUM);
        frame.fill(value);
    }
}

/// Running output stream plus the writing end of the ring feeding it.
///
/// The lock only serializes submitters; the audio callback owns the reader.
pub struct HostOutput {
    sample_rate: u32,
    channels: usize,
    writer: Mutex<QueueWriter>,
}

impl HostOutput {
    pub fn channels(&self) -> usize {
        self.channels
    }

    /// Samples submitted but not yet played.
    pub fn queued_frames(&self) -> usize {
        self.writer.lock().unwrap_or_else(PoisonError::into_inner).queued()
    }

    /// True once every submitted buffer has been played out.
    pub fn is_idle(&self) -> bool {
        self.queued_frames() == 0
    }
}

impl OutputDevice for HostOutput {
    fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    fn submit(&self, buffer: AudioBuffer) -> PlaybackResult<()> {
        let samples = buffer.resampled(self.sample_rate).into_samples();
        let frames = samples.len();

        self.writer
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push_all(&samples)
            .map_err(|vacant| {
                PlaybackError::SubmissionFailed(format!(
                    "output queue full ({} frames needed, {} free)",
                    frames, vacant
                ))
            })?;

        log::debug!("Queued {} frames on {} channel(s)", frames, self.channels);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_duplicates_mono_across_channels() {
        let (mut writer, mut reader) = playback_queue(16);
        writer.push_all(&[0.5, -0.5]).unwrap();

        let mut data = [1.0f32; 6];
        write_audio_samples(&mut data, 2, &mut reader);
        assert_eq!(data, [0.5, 0.5, -0.5, -0.5, 0.0, 0.0]);
    }

    #[test]
    fn test_write_converts_sample_format() {
        let (mut writer, mut reader) = playback_queue(16);
        writer.push_all(&[1.0]).unwrap();

        let mut data = [0i16; 2];
        write_audio_samples(&mut data, 1, &mut reader);
        assert_eq!(data, [i16::MAX, 0]);
    }

    #[test]
    fn test_write_continues_while_submitter_holds_lock() {
        let (mut writer, mut reader) = playback_queue(16);
        writer.push_all(&[0.25, 0.5, 0.75]).unwrap();
        let writer = Mutex::new(writer);

        // A submitter mid-push must not turn the playing tone into silence
        let mut guard = writer.lock().unwrap();
        let mut data = [0.0f32; 2];
        write_audio_samples(&mut data, 1, &mut reader);
        assert_eq!(data, [0.25, 0.5]);

        guard.push_all(&[1.0]).unwrap();
        drop(guard);

        write_audio_samples(&mut data, 1, &mut reader);
        assert_eq!(data, [0.75, 1.0]);
    }
}
