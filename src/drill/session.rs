use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, error, info, warn};

use crate::coach::{AnalyzeRequest, CoachClient, GenerateRequest};
use crate::model::{Attempt, Difficulty, Prompt, QuestionType, Session};
use crate::prompts::Corpus;
use crate::store::Store;

/// Minimum trimmed transcript length accepted for submission; anything
/// shorter is refused before the coaching service is contacted
pub const MIN_TRANSCRIPT_CHARS: usize = 10;

/// Phase of the active drill
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DrillPhase {
    Ready,
    Recording,
    Analyzing,
    Feedback,
}

/// State visible to the caller
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DrillSnapshot {
    pub phase: DrillPhase,
    pub prompt: Option<Prompt>,
    pub attempts: Vec<Attempt>,
    pub session_id: Option<String>,
    pub error: Option<String>,
}

struct DrillState {
    phase: DrillPhase,
    prompt: Option<Prompt>,
    attempts: Vec<Attempt>,
    session_id: String,
    error: Option<String>,
    /// Bumped on every new drill; an analysis outcome carrying a stale
    /// epoch is discarded instead of touching the new drill's state
    epoch: u64,
}

impl DrillState {
    fn begin(&mut self, prompt: Prompt) {
        self.prompt = Some(prompt);
        self.attempts.clear();
        self.session_id = uuid::Uuid::new_v4().to_string();
        self.phase = DrillPhase::Ready;
        self.error = None;
        self.epoch += 1;
    }
}

/// One user's drill flow over the store, corpus and coaching client
pub struct DrillSession {
    store: Arc<Store>,
    corpus: Arc<Corpus>,
    coach: Arc<dyn CoachClient>,
    state: Mutex<DrillState>,
}

impl DrillSession {
    pub fn new(store: Arc<Store>, corpus: Arc<Corpus>, coach: Arc<dyn CoachClient>) -> Self {
        Self {
            store,
            corpus,
            coach,
            state: Mutex::new(DrillState {
                phase: DrillPhase::Ready,
                prompt: None,
                attempts: Vec::new(),
                session_id: String::new(),
                error: None,
                epoch: 0,
            }),
        }
    }

    /// Select a prompt and open a fresh session. A missing profile is a
    /// caller error and a silent no-op; the surrounding UI gates onboarding.
    pub async fn start_drill(&self, preferred_type: Option<QuestionType>) {
        let Some(profile) = self.store.profile() else {
            debug!("start_drill called without a profile, ignoring");
            return;
        };

        let used = self.store.used_prompt_ids();
        let prompt = self.corpus.pick(&profile.domains, &used, preferred_type);
        info!("Drill started on prompt {} ({:?})", prompt.id, prompt.question_type);

        self.state.lock().await.begin(prompt);
    }

    /// Ask the coach for a generated question and open a fresh session on
    /// it. Failures are recorded as a user-visible, retryable error.
    pub async fn generate_drill(&self, category: QuestionType, difficulty: Option<Difficulty>) {
        let Some(profile) = self.store.profile() else {
            debug!("generate_drill called without a profile, ignoring");
            return;
        };

        let request = GenerateRequest {
            category,
            domains: profile.domains.clone(),
            difficulty: difficulty.or(profile.preferred_difficulty),
        };

        match self.coach.generate_question(&request).await {
            Ok(text) => {
                let prompt = Prompt {
                    id: format!("gen-{}", Utc::now().timestamp_millis()),
                    text,
                    question_type: category,
                    domains: profile.domains,
                    difficulty: request.difficulty,
                };
                info!("Drill started on generated prompt {}", prompt.id);
                self.state.lock().await.begin(prompt);
            }
            Err(e) => {
                warn!("Question generation failed: {}", e);
                self.state.lock().await.error = Some(e.to_string());
            }
        }
    }

    /// Mark capture as underway
    pub async fn begin_recording(&self) {
        let mut state = self.state.lock().await;
        if state.phase == DrillPhase::Ready && state.prompt.is_some() {
            state.phase = DrillPhase::Recording;
        }
    }

    /// Send a finished transcript for analysis and persist the attempt.
    ///
    /// No-op without an active prompt or while an analysis is already in
    /// flight. Transcripts below the minimum length are refused without
    /// contacting the coaching service. On failure the phase returns to
    /// ready with a user-visible error so the attempt can be resubmitted.
    pub async fn submit_recording(&self, transcript: &str, duration_secs: u64) {
        let (request, epoch) = {
            let mut state = self.state.lock().await;
            let Some(prompt) = state.prompt.clone() else {
                debug!("submit_recording without an active prompt, ignoring");
                return;
            };
            if state.phase == DrillPhase::Analyzing {
                debug!("analysis already in flight, ignoring submission");
                return;
            }
            if transcript.trim().chars().count() < MIN_TRANSCRIPT_CHARS {
                debug!("transcript below minimum length, refusing submission");
                return;
            }

            state.error = None;
            state.phase = DrillPhase::Analyzing;
            (
                AnalyzeRequest {
                    question: prompt.text,
                    question_type: prompt.question_type,
                    transcript: transcript.to_string(),
                },
                state.epoch,
            )
        };

        // The lock is not held across the round-trip; re-entry is barred by
        // the analyzing phase, and the epoch guards against a stale result
        // landing after the user moved on to a new drill.
        let outcome = self.coach.analyze(&request).await;

        let mut state = self.state.lock().await;
        if state.epoch != epoch {
            debug!("discarding analysis result for an abandoned drill");
            return;
        }

        match outcome {
            Ok(analysis) => {
                let Some(prompt) = state.prompt.clone() else {
                    return;
                };

                let attempt = Attempt {
                    transcript: transcript.to_string(),
                    duration: duration_secs,
                    analysis,
                    recorded_at: Utc::now(),
                };

                let mut attempts = state.attempts.clone();
                attempts.push(attempt);
                let created_at = attempts[0].recorded_at;

                let session = Session {
                    id: state.session_id.clone(),
                    prompt,
                    attempts: attempts.clone(),
                    created_at,
                };

                match self.store.save_session(&session) {
                    Ok(()) => {
                        if let Err(e) = self.store.mark_prompt_used(&session.prompt.id) {
                            warn!("Failed to mark prompt {} used: {}", session.prompt.id, e);
                        }
                        info!(
                            "Attempt {} persisted for session {}",
                            attempts.len(),
                            session.id
                        );
                        state.attempts = attempts;
                        state.phase = DrillPhase::Feedback;
                    }
                    Err(e) => {
                        error!("Failed to persist session {}: {}", session.id, e);
                        state.error = Some("Could not save your attempt. Please try again.".to_string());
                        state.phase = DrillPhase::Ready;
                    }
                }
            }
            Err(e) => {
                warn!("Analysis failed: {}", e);
                state.error = Some(e.to_string());
                state.phase = DrillPhase::Ready;
            }
        }
    }

    /// Practice the same prompt again; the next attempt appends to the
    /// same session
    pub async fn retry(&self) {
        let mut state = self.state.lock().await;
        if state.phase == DrillPhase::Feedback {
            state.phase = DrillPhase::Ready;
        }
    }

    /// Move on to a new question (new session, fresh attempts)
    pub async fn next_drill(&self, preferred_type: Option<QuestionType>) {
        self.start_drill(preferred_type).await;
    }

    pub async fn snapshot(&self) -> DrillSnapshot {
        let state = self.state.lock().await;
        DrillSnapshot {
            phase: state.phase,
            prompt: state.prompt.clone(),
            attempts: state.attempts.clone(),
            session_id: if state.session_id.is_empty() {
                None
            } else {
                Some(state.session_id.clone())
            },
            error: state.error.clone(),
        }
    }
}
