pub mod coach;
pub mod config;
pub mod drill;
pub mod export;
pub mod http;
pub mod model;
pub mod prompts;
pub mod speech;
pub mod stats;
pub mod store;

pub use coach::{AnalyzeRequest, CoachClient, CoachError, GenerateRequest, HttpCoachClient};
pub use config::Config;
pub use drill::{DrillPhase, DrillSession, DrillSnapshot};
pub use http::{create_router, AppState};
pub use model::{
    AnalysisResult, Attempt, Difficulty, Domain, Profile, Prompt, QuestionType, Session,
};
pub use prompts::Corpus;
pub use speech::{
    AudioInput, CaptureConfig, CaptureOutcome, CaptureSession, SpeechDevice, SpeechEvent,
};
pub use store::{FileBackend, MemoryBackend, StorageBackend, Store};
