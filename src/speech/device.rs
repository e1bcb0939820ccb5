use anyhow::Result;
use tokio::sync::mpsc;

/// Event delivered by a live transcription device
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpeechEvent {
    /// One recognized segment. Interim segments revise the in-flight tail;
    /// final segments are settled and will not be re-delivered.
    Transcript { text: String, is_final: bool },
    /// The device ended the session on its own (delivered at most once)
    Ended,
}

/// Live speech-to-text device boundary
///
/// Capability is queried before any capture is offered; an unsupported
/// device is a permanent condition for the session, not an error path.
/// `stop` must end the event stream (close the channel or deliver `Ended`)
/// so consumers draining it terminate.
#[async_trait::async_trait]
pub trait SpeechDevice: Send + Sync {
    /// Whether live transcription is available at all
    fn is_supported(&self) -> bool;

    /// Begin live transcription
    ///
    /// Returns a channel receiver that will receive transcription events
    async fn start(&mut self) -> Result<mpsc::Receiver<SpeechEvent>>;

    /// Halt transcription; a no-op when not capturing
    async fn stop(&mut self) -> Result<()>;

    /// Device name for logging
    fn name(&self) -> &str;
}

/// Audio sample data (16-bit PCM, interleaved)
#[derive(Debug, Clone)]
pub struct AudioFrame {
    /// Raw audio samples (i16 PCM, interleaved)
    pub samples: Vec<i16>,
    /// Sample rate in Hz
    pub sample_rate: u32,
    /// Number of channels
    pub channels: u16,
    /// Timestamp in milliseconds since capture started
    pub timestamp_ms: u64,
}

/// Microphone stream used for the parallel playback recording
///
/// Acquisition may fail (no device, no permission); capture then proceeds
/// in transcript-only mode. `stop` must close the frame channel so the
/// recorder can finalize its artifact.
#[async_trait::async_trait]
pub trait AudioInput: Send + Sync {
    /// Acquire the stream and start producing frames
    async fn start(&mut self) -> Result<mpsc::Receiver<AudioFrame>>;

    /// Release the underlying stream; a no-op when not capturing
    async fn stop(&mut self) -> Result<()>;
}
