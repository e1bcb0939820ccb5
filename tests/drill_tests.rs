// Integration tests for the drill session state machine
//
// A scripted fake coach stands in for the external analysis service so
// phase transitions, persistence, retries and stale-response handling can
// be driven deterministically.

mod common;

use clarity_drills::coach::{AnalyzeRequest, CoachClient, CoachError, GenerateRequest};
use clarity_drills::drill::{DrillPhase, DrillSession};
use clarity_drills::model::{AnalysisResult, Domain, QuestionType};
use clarity_drills::prompts::Corpus;
use clarity_drills::store::{MemoryBackend, Store};
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::Notify;

const TRANSCRIPT: &str = "I would start by segmenting the market and validating demand.";

/// Coach double: scripted analyze outcomes, call counting, and an optional
/// gate to hold a call in flight
struct FakeCoach {
    calls: AtomicUsize,
    outcomes: Mutex<VecDeque<Result<AnalysisResult, CoachError>>>,
    gate: Option<Arc<Notify>>,
}

impl FakeCoach {
    fn scoring(overalls: &[u8]) -> Self {
        Self {
            calls: AtomicUsize::new(0),
            outcomes: Mutex::new(overalls.iter().map(|o| Ok(common::analysis(*o))).collect()),
            gate: None,
        }
    }

    fn failing_then(overall: u8) -> Self {
        let mut outcomes: VecDeque<Result<AnalysisResult, CoachError>> = VecDeque::new();
        outcomes.push_back(Err(CoachError::Request("connection refused".to_string())));
        outcomes.push_back(Ok(common::analysis(overall)));
        Self {
            calls: AtomicUsize::new(0),
            outcomes: Mutex::new(outcomes),
            gate: None,
        }
    }

    fn gated(overall: u8, gate: Arc<Notify>) -> Self {
        Self {
            calls: AtomicUsize::new(0),
            outcomes: Mutex::new(VecDeque::from([Ok(common::analysis(overall))])),
            gate: Some(gate),
        }
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl CoachClient for FakeCoach {
    async fn analyze(&self, _request: &AnalyzeRequest) -> Result<AnalysisResult, CoachError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(gate) = &self.gate {
            gate.notified().await;
        }
        self.outcomes
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(common::analysis(7)))
    }

    async fn generate_question(&self, request: &GenerateRequest) -> Result<String, CoachError> {
        Ok(format!(
            "How would you approach a {} scenario?",
            request.category.as_str()
        ))
    }
}

fn harness(coach: FakeCoach) -> (Arc<Store>, Arc<FakeCoach>, DrillSession) {
    let store = Arc::new(Store::new(Box::new(MemoryBackend::new())));
    let coach = Arc::new(coach);
    let drill = DrillSession::new(
        Arc::clone(&store),
        Arc::new(Corpus::builtin()),
        Arc::clone(&coach) as Arc<dyn CoachClient>,
    );
    (store, coach, drill)
}

fn onboard(store: &Store) {
    store
        .save_profile(&common::profile(&[Domain::Marketing, Domain::Strategy]))
        .unwrap();
}

#[tokio::test]
async fn start_drill_without_a_profile_is_a_silent_noop() {
    let (_store, coach, drill) = harness(FakeCoach::scoring(&[7]));

    drill.start_drill(None).await;

    let snapshot = drill.snapshot().await;
    assert_eq!(snapshot.phase, DrillPhase::Ready);
    assert!(snapshot.prompt.is_none());
    assert!(snapshot.error.is_none());
    assert_eq!(coach.calls(), 0);
}

#[tokio::test]
async fn start_drill_selects_a_prompt_inside_the_profile_domains() {
    let (store, _coach, drill) = harness(FakeCoach::scoring(&[7]));
    onboard(&store);

    for _ in 0..20 {
        drill.start_drill(None).await;
        let prompt = drill.snapshot().await.prompt.expect("prompt selected");
        assert!(prompt
            .domains
            .iter()
            .any(|d| [Domain::Marketing, Domain::Strategy].contains(d)));
    }
}

#[tokio::test]
async fn submission_runs_through_analyzing_to_feedback_and_persists() {
    let (store, _coach, drill) = harness(FakeCoach::scoring(&[7]));
    onboard(&store);

    drill.start_drill(Some(QuestionType::DrillDown)).await;
    drill.begin_recording().await;
    assert_eq!(drill.snapshot().await.phase, DrillPhase::Recording);

    drill.submit_recording(TRANSCRIPT, 42).await;

    let snapshot = drill.snapshot().await;
    assert_eq!(snapshot.phase, DrillPhase::Feedback);
    assert_eq!(snapshot.attempts.len(), 1);
    assert!(snapshot.error.is_none());

    let sessions = store.sessions();
    assert_eq!(sessions.len(), 1);
    assert_eq!(sessions[0].attempts.len(), 1);
    assert_eq!(sessions[0].attempts[0].transcript, TRANSCRIPT);
    assert_eq!(sessions[0].attempts[0].duration, 42);
    assert_eq!(
        sessions[0].created_at,
        sessions[0].attempts[0].recorded_at
    );

    let prompt = snapshot.prompt.unwrap();
    assert!(store.used_prompt_ids().contains(&prompt.id));
}

#[tokio::test]
async fn short_transcripts_never_reach_the_coach() {
    let (store, coach, drill) = harness(FakeCoach::scoring(&[7]));
    onboard(&store);

    drill.start_drill(None).await;
    drill.submit_recording("   too short   ", 5).await;

    assert_eq!(coach.calls(), 0, "coach must not be called");
    let snapshot = drill.snapshot().await;
    assert_eq!(snapshot.phase, DrillPhase::Ready);
    assert!(snapshot.attempts.is_empty());
    assert!(store.sessions().is_empty());
}

#[tokio::test]
async fn submission_without_an_active_prompt_is_ignored() {
    let (store, coach, drill) = harness(FakeCoach::scoring(&[7]));
    onboard(&store);

    drill.submit_recording(TRANSCRIPT, 30).await;

    assert_eq!(coach.calls(), 0);
    assert!(store.sessions().is_empty());
}

#[tokio::test]
async fn analysis_failure_returns_to_ready_and_allows_a_retry() {
    let (store, coach, drill) = harness(FakeCoach::failing_then(6));
    onboard(&store);

    drill.start_drill(None).await;
    drill.submit_recording(TRANSCRIPT, 30).await;

    let snapshot = drill.snapshot().await;
    assert_eq!(snapshot.phase, DrillPhase::Ready);
    assert!(snapshot.error.is_some(), "failure must be user-visible");
    assert!(snapshot.attempts.is_empty());
    assert!(store.sessions().is_empty(), "nothing may be half-persisted");

    // Same transcript, retried by user action
    drill.submit_recording(TRANSCRIPT, 30).await;

    let snapshot = drill.snapshot().await;
    assert_eq!(snapshot.phase, DrillPhase::Feedback);
    assert!(snapshot.error.is_none(), "error clears on a new submission");
    assert_eq!(coach.calls(), 2);
    assert_eq!(store.sessions().len(), 1);
}

#[tokio::test]
async fn retry_appends_to_the_same_session() {
    let (store, _coach, drill) = harness(FakeCoach::scoring(&[4, 7]));
    onboard(&store);

    drill.start_drill(None).await;
    let first_prompt = drill.snapshot().await.prompt.unwrap();

    drill.submit_recording(TRANSCRIPT, 40).await;
    drill.retry().await;

    let snapshot = drill.snapshot().await;
    assert_eq!(snapshot.phase, DrillPhase::Ready);
    assert_eq!(snapshot.attempts.len(), 1, "attempts survive a retry");
    assert_eq!(snapshot.prompt.as_ref().unwrap().id, first_prompt.id);

    drill.submit_recording("A second, better structured answer to it.", 35).await;

    let sessions = store.sessions();
    assert_eq!(sessions.len(), 1, "retry must not open a second session");
    assert_eq!(sessions[0].attempts.len(), 2);
    assert_eq!(sessions[0].attempts[0].analysis.overall, 4);
    assert_eq!(sessions[0].attempts[1].analysis.overall, 7);

    // Improvement reads +3 overall and positive per-dimension deltas
    let stats = clarity_drills::stats::compute(&sessions);
    assert_eq!(stats.average_improvement, 3.0);

    let comparison = clarity_drills::stats::comparison(&sessions[0]).unwrap();
    assert_eq!(comparison.overall_delta, 3);
    assert!(comparison.dimensions.iter().all(|d| d.delta > 0));
}

#[tokio::test]
async fn next_drill_opens_a_fresh_session() {
    let (store, _coach, drill) = harness(FakeCoach::scoring(&[5, 8]));
    onboard(&store);

    drill.start_drill(None).await;
    drill.submit_recording(TRANSCRIPT, 30).await;
    let first_id = drill.snapshot().await.session_id.unwrap();

    drill.next_drill(None).await;

    let snapshot = drill.snapshot().await;
    assert_eq!(snapshot.phase, DrillPhase::Ready);
    assert!(snapshot.attempts.is_empty());
    assert_ne!(snapshot.session_id.unwrap(), first_id);

    drill.submit_recording("A different answer for a different prompt.", 25).await;

    assert_eq!(store.sessions().len(), 2);
}

#[tokio::test]
async fn a_second_submission_is_refused_while_one_is_in_flight() {
    let gate = Arc::new(Notify::new());
    let (store, coach, drill) = harness(FakeCoach::gated(7, Arc::clone(&gate)));
    onboard(&store);

    let drill = Arc::new(drill);
    drill.start_drill(None).await;

    let in_flight = {
        let drill = Arc::clone(&drill);
        tokio::spawn(async move {
            drill.submit_recording(TRANSCRIPT, 30).await;
        })
    };

    // Let the first submission take the analyzing phase
    tokio::time::sleep(Duration::from_millis(20)).await;
    assert_eq!(drill.snapshot().await.phase, DrillPhase::Analyzing);

    drill.submit_recording(TRANSCRIPT, 30).await;
    assert_eq!(coach.calls(), 1, "overlapping submission must not call out");

    gate.notify_one();
    in_flight.await.unwrap();

    let snapshot = drill.snapshot().await;
    assert_eq!(snapshot.phase, DrillPhase::Feedback);
    assert_eq!(snapshot.attempts.len(), 1);
    assert_eq!(store.sessions().len(), 1);
}

#[tokio::test]
async fn a_stale_analysis_response_cannot_corrupt_a_new_drill() {
    let gate = Arc::new(Notify::new());
    let (store, coach, drill) = harness(FakeCoach::gated(9, Arc::clone(&gate)));
    onboard(&store);

    let drill = Arc::new(drill);
    drill.start_drill(None).await;

    let in_flight = {
        let drill = Arc::clone(&drill);
        tokio::spawn(async move {
            drill.submit_recording(TRANSCRIPT, 30).await;
        })
    };

    tokio::time::sleep(Duration::from_millis(20)).await;
    assert_eq!(coach.calls(), 1);

    // The user abandons the drill while the call is outstanding
    drill.start_drill(None).await;
    let fresh = drill.snapshot().await;

    // The stale response resolves afterwards and must be discarded
    gate.notify_one();
    in_flight.await.unwrap();

    let snapshot = drill.snapshot().await;
    assert_eq!(snapshot.phase, DrillPhase::Ready);
    assert!(snapshot.attempts.is_empty());
    assert_eq!(snapshot.session_id, fresh.session_id);
    assert!(snapshot.error.is_none());
    assert!(store.sessions().is_empty(), "stale result must not persist");
}

#[tokio::test]
async fn generate_drill_wraps_the_generated_question_in_a_prompt() {
    let (store, _coach, drill) = harness(FakeCoach::scoring(&[7]));
    onboard(&store);

    drill.generate_drill(QuestionType::Curveball, None).await;

    let snapshot = drill.snapshot().await;
    assert_eq!(snapshot.phase, DrillPhase::Ready);
    let prompt = snapshot.prompt.expect("generated prompt");
    assert!(prompt.id.starts_with("gen-"));
    assert_eq!(prompt.question_type, QuestionType::Curveball);
    assert_eq!(prompt.text, "How would you approach a curveball scenario?");
    assert_eq!(
        prompt.domains,
        vec![Domain::Marketing, Domain::Strategy]
    );
}
