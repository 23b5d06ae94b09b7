// src/output/queue.rs
//
// Lock-free sample ring between `submit` and the real-time output callback.

use ringbuf::traits::{Consumer, Observer, Producer, Split};
use ringbuf::{HeapCons, HeapProd, HeapRb};

/// Seconds of audio the ring holds at the device rate.
pub const QUEUE_SECONDS: usize = 16;

/// Create a linked writer/reader pair holding up to `capacity` samples.
///
/// Storage is allocated once here; neither side allocates or frees afterwards.
pub fn playback_queue(capacity: usize) -> (QueueWriter, QueueReader) {
    let (producer, consumer) = HeapRb::<f32>::new(capacity.max(1)).split();
    (QueueWriter { producer }, QueueReader { consumer })
}

/// Submitting side. Buffers are appended whole or not at all.
pub struct QueueWriter {
    producer: HeapProd<f32>,
}

impl QueueWriter {
    /// Append every sample of `samples`, or none if they don't all fit.
    ///
    /// Returns the free space on rejection.
    pub fn push_all(&mut self, samples: &[f32]) -> Result<(), usize> {
        let vacant = self.producer.vacant_len();
        if samples.len() > vacant {
            return Err(vacant);
        }
        let pushed = self.producer.push_slice(samples);
        debug_assert_eq!(pushed, samples.len());
        Ok(())
    }

    /// Samples not yet played.
    pub fn queued(&self) -> usize {
        self.producer.occupied_len()
    }

    pub fn capacity(&self) -> usize {
        self.producer.capacity().get()
    }
}

/// Audio-callback side. Wait-free.
pub struct QueueReader {
    consumer: HeapCons<f32>,
}

impl QueueReader {
    /// Next sample to play, or `None` when nothing is queued.
    #[inline]
    pub fn next_sample(&mut self) -> Option<f32> {
        self.consumer.try_pop()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plays_in_submission_order() {
        let (mut writer, mut reader) = playback_queue(8);
        writer.push_all(&[1.0, 2.0]).unwrap();
        writer.push_all(&[3.0]).unwrap();

        let played: Vec<f32> = std::iter::from_fn(|| reader.next_sample()).collect();
        assert_eq!(played, vec![1.0, 2.0, 3.0]);
        assert_eq!(writer.queued(), 0);
    }

    #[test]
    fn test_rejects_whole_buffer_when_full() {
        let (mut writer, mut reader) = playback_queue(4);
        writer.push_all(&[0.1, 0.2, 0.3]).unwrap();

        // Two samples don't fit in the one free slot; nothing is queued
        assert_eq!(writer.push_all(&[0.4, 0.5]), Err(1));
        assert_eq!(writer.queued(), 3);

        // Draining makes room again
        reader.next_sample();
        assert!(writer.push_all(&[0.4, 0.5]).is_ok());
        let played: Vec<f32> = std::iter::from_fn(|| reader.next_sample()).collect();
        assert_eq!(played, vec![0.2, 0.3, 0.4, 0.5]);
    }

    #[test]
    fn test_oversized_buffer_rejected() {
        let (mut writer, _reader) = playback_queue(4);
        assert_eq!(writer.capacity(), 4);
        assert_eq!(writer.push_all(&[0.0; 5]), Err(4));
    }

    #[test]
    fn test_reader_across_threads() {
        let (mut writer, mut reader) = playback_queue(1_024);
        let samples: Vec<f32> = (0..1_000).map(|i| i as f32).collect();
        writer.push_all(&samples).unwrap();

        let played = std::thread::spawn(move || {
            std::iter::from_fn(|| reader.next_sample()).collect::<Vec<f32>>()
        })
        .join()
        .unwrap();
        assert_eq!(played, samples);
    }
}
