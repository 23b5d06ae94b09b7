// src/error.rs
//
// Error taxonomy for tone rendering and playback.

use thiserror::Error;

/// Everything that can go wrong between a trigger and audible output.
///
/// None of these are fatal to the process. The trigger boundary logs them and
/// the next trigger starts from a clean slate.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PlaybackError {
    /// The requested buffer would hold no samples.
    #[error("buffer duration must cover at least one sample")]
    InvalidDuration,

    /// Oscillator parameters are out of range.
    #[error("invalid tone parameters: {0}")]
    InvalidTone(String),

    /// The output device could not be acquired. The engine handle is reset.
    #[error("audio output device unavailable: {0}")]
    DeviceUnavailable(String),

    /// The output facility rejected a buffer after acquisition succeeded.
    #[error("audio submission failed: {0}")]
    SubmissionFailed(String),
}

/// Result alias used throughout the crate.
pub type PlaybackResult<T> = Result<T, PlaybackError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = PlaybackError::DeviceUnavailable("no default output device".into());
        assert_eq!(
            err.to_string(),
            "audio output device unavailable: no default output device"
        );
        assert_eq!(
            PlaybackError::InvalidDuration.to_string(),
            "buffer duration must cover at least one sample"
        );
    }
}
