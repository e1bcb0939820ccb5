//! Speech capture lifecycle
//!
//! Wraps a live transcription device and an optional microphone stream
//! behind a stable start/stop/transcript/elapsed contract:
//! - interim results update the visible transcript optimistically; final
//!   results extend the confirmed transcript and are never retracted
//! - a one-second clock tracks elapsed time and enforces an optional
//!   maximum duration with an auto-stop notification
//! - the parallel audio recording degrades to transcript-only capture when
//!   the input stream cannot be acquired

mod capture;
mod device;
mod recorder;

pub use capture::{AutoStopHook, CaptureConfig, CaptureOutcome, CaptureSession};
pub use device::{AudioFrame, AudioInput, SpeechDevice, SpeechEvent};
pub use recorder::{AudioArtifact, WavRecorder};
