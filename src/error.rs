//! Error types.

/// Error type for PCM decoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum DecodeError {
    /// The header offset points past the end of the input.
    #[error("Header offset {offset} exceeds the input length {len}.")]
    InvalidOffset { offset: usize, len: usize },
    /// The requested sample is past the end of the decoded data.
    #[error("Sample index {index} is out of range ({num_samples} samples).")]
    InvalidSample { index: usize, num_samples: usize },
}

/// Error type for RIFF/WAVE header inspection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum WavHeaderError {
    #[error("The input does not start with a RIFF/WAVE header.")]
    NotRiffWave,
    #[error("The RIFF/WAVE header has no fmt chunk.")]
    MissingFmtChunk,
    #[error("A chunk is shorter than its declared size.")]
    Truncated,
    #[error("Too many chunks in the RIFF/WAVE header.")]
    TooManyChunks,
}

/// Error type for [`crate::SoundPlayer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum PlayerError {
    #[error("No audio data to play.")]
    NoAudioData,
    #[error(transparent)]
    Decode(#[from] DecodeError),
    #[error("The output buffer must hold at least one sample.")]
    InsufficientOutputBuffer,
    #[error("Finish playing.")]
    FinishedPlaying,
}

/// Error type for byte sources.
#[cfg(feature = "std")]
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("Audio file {} is unavailable: {source}", .path.display())]
    SourceUnavailable {
        path: std::path::PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Error type for reading and decoding an audio file in one step.
#[cfg(feature = "std")]
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error(transparent)]
    Source(#[from] SourceError),
    #[error(transparent)]
    Decode(#[from] DecodeError),
}
