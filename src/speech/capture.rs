use anyhow::{Context, Result};
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex as StdMutex};
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tracing::{error, info, warn};

use super::device::{AudioInput, SpeechDevice, SpeechEvent};
use super::recorder::{AudioArtifact, WavRecorder};

/// Notification hook invoked when the duration bound stops the capture
pub type AutoStopHook = Arc<dyn Fn() + Send + Sync>;

/// Options recognized by [`CaptureSession::start`]
#[derive(Clone, Default)]
pub struct CaptureConfig {
    /// Hard bound on recording length in seconds. The clock stops the
    /// capture the instant elapsed time reaches it; recording never
    /// exceeds the bound.
    pub max_duration_secs: Option<u64>,

    /// Invoked exactly once if the bound triggers the stop
    pub on_auto_stop: Option<AutoStopHook>,

    /// Where to write the playback WAV; `None` disables the parallel
    /// audio recording entirely
    pub recording_path: Option<PathBuf>,
}

/// Snapshot returned by [`CaptureSession::stop`]
#[derive(Debug, Clone)]
pub struct CaptureOutcome {
    pub transcript: String,
    pub elapsed_secs: u64,
    /// Present only when an audio stream was acquired and finalized
    pub artifact: Option<AudioArtifact>,
}

/// Confirmed text only grows; the pending tail is replaced by each interim
/// result and cleared when a final result lands. The visible transcript is
/// always confirmed + pending.
#[derive(Default)]
struct TranscriptBuffer {
    confirmed: String,
    pending: String,
}

impl TranscriptBuffer {
    fn apply(&mut self, text: &str, is_final: bool) {
        if is_final {
            self.confirmed.push_str(text);
            self.confirmed.push(' ');
            self.pending.clear();
        } else {
            self.pending = text.to_string();
        }
    }

    fn visible(&self) -> String {
        let mut out = self.confirmed.clone();
        out.push_str(&self.pending);
        out.trim().to_string()
    }
}

/// One capture: live transcription, a one-second elapsed clock, and an
/// optional parallel audio recording
pub struct CaptureSession {
    device: Arc<Mutex<Box<dyn SpeechDevice>>>,
    audio: Option<Arc<Mutex<Box<dyn AudioInput>>>>,

    is_recording: Arc<AtomicBool>,
    elapsed_secs: Arc<AtomicU64>,
    transcript: Arc<StdMutex<TranscriptBuffer>>,
    artifact: Arc<StdMutex<Option<AudioArtifact>>>,

    tick_task: StdMutex<Option<JoinHandle<()>>>,
    event_task: StdMutex<Option<JoinHandle<()>>>,
    audio_task: StdMutex<Option<JoinHandle<()>>>,
}

impl CaptureSession {
    /// Wrap a transcription device and an optional microphone stream.
    ///
    /// Fails when the device reports no live-transcription capability; the
    /// capability check happens here, before any capture is offered.
    pub fn new(
        device: Box<dyn SpeechDevice>,
        audio: Option<Box<dyn AudioInput>>,
    ) -> Result<Self> {
        if !device.is_supported() {
            anyhow::bail!("speech device {:?} does not support live transcription", device.name());
        }

        Ok(Self {
            device: Arc::new(Mutex::new(device)),
            audio: audio.map(|a| Arc::new(Mutex::new(a))),
            is_recording: Arc::new(AtomicBool::new(false)),
            elapsed_secs: Arc::new(AtomicU64::new(0)),
            transcript: Arc::new(StdMutex::new(TranscriptBuffer::default())),
            artifact: Arc::new(StdMutex::new(None)),
            tick_task: StdMutex::new(None),
            event_task: StdMutex::new(None),
            audio_task: StdMutex::new(None),
        })
    }

    /// Start capturing. Resets transcript and elapsed time, begins live
    /// transcription and the elapsed clock, and attempts to acquire the
    /// audio stream; if acquisition fails the capture proceeds in
    /// transcript-only mode.
    pub async fn start(&self, config: CaptureConfig) -> Result<()> {
        if self.is_recording.swap(true, Ordering::SeqCst) {
            warn!("Capture already running");
            return Ok(());
        }

        self.elapsed_secs.store(0, Ordering::SeqCst);
        *self.transcript.lock().unwrap() = TranscriptBuffer::default();
        *self.artifact.lock().unwrap() = None;

        let mut event_rx = match self.device.lock().await.start().await {
            Ok(rx) => rx,
            Err(e) => {
                self.is_recording.store(false, Ordering::SeqCst);
                return Err(e).context("Failed to start speech device");
            }
        };

        info!("Capture started");

        // Transcription event task
        let transcript = Arc::clone(&self.transcript);
        let is_recording = Arc::clone(&self.is_recording);
        let event_task = tokio::spawn(async move {
            while let Some(event) = event_rx.recv().await {
                match event {
                    SpeechEvent::Transcript { text, is_final } => {
                        transcript.lock().unwrap().apply(&text, is_final);
                    }
                    SpeechEvent::Ended => {
                        // Device finished on its own; halt the clock too
                        is_recording.store(false, Ordering::SeqCst);
                        break;
                    }
                }
            }
        });
        *self.event_task.lock().unwrap() = Some(event_task);

        // Parallel audio recording (soft-fail)
        if let (Some(audio), Some(path)) = (&self.audio, config.recording_path.clone()) {
            match audio.lock().await.start().await {
                Ok(frame_rx) => {
                    let artifact = Arc::clone(&self.artifact);
                    let audio_task = tokio::spawn(async move {
                        Self::run_recorder(frame_rx, path, artifact).await;
                    });
                    *self.audio_task.lock().unwrap() = Some(audio_task);
                }
                Err(e) => {
                    warn!("Audio input unavailable, capturing transcript only: {}", e);
                }
            }
        }

        // Elapsed clock, one-second resolution
        let is_recording = Arc::clone(&self.is_recording);
        let elapsed = Arc::clone(&self.elapsed_secs);
        let device = Arc::clone(&self.device);
        let audio = self.audio.clone();
        let max = config.max_duration_secs;
        let hook = config.on_auto_stop.clone();
        let tick_task = tokio::spawn(async move {
            let mut interval = tokio::time::interval(Duration::from_secs(1));
            interval.tick().await; // first tick resolves immediately

            loop {
                interval.tick().await;
                if !is_recording.load(Ordering::SeqCst) {
                    break;
                }

                let now = elapsed.fetch_add(1, Ordering::SeqCst) + 1;
                if let Some(max) = max {
                    if now >= max {
                        // Pin elapsed at the bound and run the stop path
                        elapsed.store(max, Ordering::SeqCst);
                        if is_recording.swap(false, Ordering::SeqCst) {
                            if let Err(e) = device.lock().await.stop().await {
                                error!("Failed to stop speech device at time limit: {}", e);
                            }
                            if let Some(audio) = &audio {
                                if let Err(e) = audio.lock().await.stop().await {
                                    error!("Failed to stop audio input at time limit: {}", e);
                                }
                            }
                            info!("Capture auto-stopped at {}s limit", max);
                            if let Some(hook) = &hook {
                                hook();
                            }
                        }
                        break;
                    }
                }
            }
        });
        *self.tick_task.lock().unwrap() = Some(tick_task);

        Ok(())
    }

    /// Stop capturing. Idempotent: a second stop (or a stop after the
    /// duration bound already fired) only collects the outcome.
    pub async fn stop(&self) -> Result<CaptureOutcome> {
        if self.is_recording.swap(false, Ordering::SeqCst) {
            info!("Stopping capture");
            if let Err(e) = self.device.lock().await.stop().await {
                error!("Failed to stop speech device: {}", e);
            }
            if let Some(audio) = &self.audio {
                if let Err(e) = audio.lock().await.stop().await {
                    error!("Failed to stop audio input: {}", e);
                }
            }
        }

        // Reap outstanding tasks so trailing events land and the WAV
        // artifact is finalized before the outcome is read
        let tick = self.tick_task.lock().unwrap().take();
        if let Some(task) = tick {
            task.abort();
        }

        let event = self.event_task.lock().unwrap().take();
        if let Some(task) = event {
            if let Err(e) = task.await {
                if !e.is_cancelled() {
                    error!("Transcription task panicked: {}", e);
                }
            }
        }

        let audio = self.audio_task.lock().unwrap().take();
        if let Some(task) = audio {
            if let Err(e) = task.await {
                if !e.is_cancelled() {
                    error!("Audio recording task panicked: {}", e);
                }
            }
        }

        Ok(self.outcome())
    }

    /// The visible transcript: confirmed text plus the pending interim tail
    pub fn transcript(&self) -> String {
        self.transcript.lock().unwrap().visible()
    }

    pub fn elapsed_secs(&self) -> u64 {
        self.elapsed_secs.load(Ordering::SeqCst)
    }

    pub fn is_recording(&self) -> bool {
        self.is_recording.load(Ordering::SeqCst)
    }

    fn outcome(&self) -> CaptureOutcome {
        CaptureOutcome {
            transcript: self.transcript(),
            elapsed_secs: self.elapsed_secs(),
            artifact: self.artifact.lock().unwrap().clone(),
        }
    }

    /// Drain microphone frames into a WAV file; the recorder is created
    /// from the first frame's format and finalized when the stream closes
    async fn run_recorder(
        mut frame_rx: tokio::sync::mpsc::Receiver<super::device::AudioFrame>,
        path: PathBuf,
        artifact: Arc<StdMutex<Option<AudioArtifact>>>,
    ) {
        let mut recorder: Option<WavRecorder> = None;

        while let Some(frame) = frame_rx.recv().await {
            if recorder.is_none() {
                match WavRecorder::create(path.clone(), frame.sample_rate, frame.channels) {
                    Ok(r) => recorder = Some(r),
                    Err(e) => {
                        warn!("Failed to create playback recording: {}", e);
                        break;
                    }
                }
            }
            if let Some(r) = &mut recorder {
                if let Err(e) = r.write_frame(&frame) {
                    error!("Failed to write playback frame: {}", e);
                    break;
                }
            }
        }

        if let Some(r) = recorder {
            match r.finish() {
                Ok(done) => {
                    info!(
                        "Playback recording finalized: {:?} ({} samples)",
                        done.file_path, done.sample_count
                    );
                    *artifact.lock().unwrap() = Some(done);
                }
                Err(e) => error!("Failed to finalize playback recording: {}", e),
            }
        }
    }
}

impl Drop for CaptureSession {
    fn drop(&mut self) {
        // Tear down outstanding tasks even when stop() was never called.
        // Aborting the audio task drops its recorder, which finalizes the
        // WAV on the way out.
        for slot in [&self.tick_task, &self.event_task, &self.audio_task] {
            if let Ok(mut guard) = slot.lock() {
                if let Some(task) = guard.take() {
                    task.abort();
                }
            }
        }
    }
}
