use super::state::AppState;
use crate::export;
use crate::model::{Difficulty, Domain, Profile, QuestionType, TimerDuration};
use crate::stats;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{error, info};

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveProfileRequest {
    pub domains: Vec<Domain>,
    pub timed_mode: Option<bool>,
    pub timer_duration: Option<TimerDuration>,
    pub preferred_difficulty: Option<Difficulty>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StartDrillRequest {
    pub preferred_type: Option<QuestionType>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateDrillRequest {
    pub category: QuestionType,
    pub difficulty: Option<Difficulty>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitRecordingRequest {
    pub transcript: String,
    pub duration_secs: u64,
}

#[derive(Debug, Serialize)]
pub struct QuestionTypeInfo {
    pub id: &'static str,
    pub label: &'static str,
    pub description: &'static str,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

// ============================================================================
// Handlers
// ============================================================================

/// GET /profile
pub async fn get_profile(State(state): State<AppState>) -> impl IntoResponse {
    match state.store.profile() {
        Some(profile) => (StatusCode::OK, Json(profile)).into_response(),
        None => (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse {
                error: "No profile saved".to_string(),
            }),
        )
            .into_response(),
    }
}

/// PUT /profile
/// Full-replace save; the creation timestamp of an existing profile is kept
pub async fn save_profile(
    State(state): State<AppState>,
    Json(req): Json<SaveProfileRequest>,
) -> impl IntoResponse {
    let created_at = state
        .store
        .profile()
        .map(|p| p.created_at)
        .unwrap_or_else(Utc::now);

    let profile = Profile {
        domains: req.domains,
        created_at,
        timed_mode: req.timed_mode,
        timer_duration: req.timer_duration,
        preferred_difficulty: req.preferred_difficulty,
    };

    match state.store.save_profile(&profile) {
        Ok(()) => {
            info!("Profile saved ({} domains)", profile.domains.len());
            (StatusCode::OK, Json(profile)).into_response()
        }
        Err(e) => (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: e.to_string(),
            }),
        )
            .into_response(),
    }
}

/// POST /reset
/// Clear profile, sessions and used prompts together
pub async fn reset(State(state): State<AppState>) -> impl IntoResponse {
    match state.store.reset() {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => {
            error!("Reset failed: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: format!("Reset failed: {}", e),
                }),
            )
                .into_response()
        }
    }
}

/// POST /drills/start
pub async fn start_drill(
    State(state): State<AppState>,
    Json(req): Json<StartDrillRequest>,
) -> impl IntoResponse {
    if state.store.profile().is_none() {
        return (
            StatusCode::CONFLICT,
            Json(ErrorResponse {
                error: "Complete onboarding before starting a drill".to_string(),
            }),
        )
            .into_response();
    }

    state.drill.start_drill(req.preferred_type).await;
    (StatusCode::OK, Json(state.drill.snapshot().await)).into_response()
}

/// POST /drills/generate
/// Open a drill on a freshly generated question
pub async fn generate_drill(
    State(state): State<AppState>,
    Json(req): Json<GenerateDrillRequest>,
) -> impl IntoResponse {
    if state.store.profile().is_none() {
        return (
            StatusCode::CONFLICT,
            Json(ErrorResponse {
                error: "Complete onboarding before starting a drill".to_string(),
            }),
        )
            .into_response();
    }

    state.drill.generate_drill(req.category, req.difficulty).await;

    let snapshot = state.drill.snapshot().await;
    if let Some(message) = &snapshot.error {
        return (
            StatusCode::BAD_GATEWAY,
            Json(ErrorResponse {
                error: message.clone(),
            }),
        )
            .into_response();
    }
    (StatusCode::OK, Json(snapshot)).into_response()
}

/// POST /drills/recording/start
pub async fn begin_recording(State(state): State<AppState>) -> impl IntoResponse {
    state.drill.begin_recording().await;
    Json(state.drill.snapshot().await)
}

/// POST /drills/submit
/// The snapshot's phase and error field carry the outcome: feedback on
/// success, ready plus a retryable message on failure
pub async fn submit_recording(
    State(state): State<AppState>,
    Json(req): Json<SubmitRecordingRequest>,
) -> impl IntoResponse {
    state
        .drill
        .submit_recording(&req.transcript, req.duration_secs)
        .await;
    Json(state.drill.snapshot().await)
}

/// POST /drills/retry
pub async fn retry_drill(State(state): State<AppState>) -> impl IntoResponse {
    state.drill.retry().await;
    Json(state.drill.snapshot().await)
}

/// POST /drills/next
pub async fn next_drill(
    State(state): State<AppState>,
    Json(req): Json<StartDrillRequest>,
) -> impl IntoResponse {
    state.drill.next_drill(req.preferred_type).await;
    Json(state.drill.snapshot().await)
}

/// GET /drills/status
pub async fn drill_status(State(state): State<AppState>) -> impl IntoResponse {
    Json(state.drill.snapshot().await)
}

/// GET /sessions
pub async fn list_sessions(State(state): State<AppState>) -> impl IntoResponse {
    Json(state.store.sessions())
}

/// GET /sessions/:session_id/export
pub async fn export_session(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> impl IntoResponse {
    let sessions = state.store.sessions();
    match sessions.iter().find(|s| s.id == session_id) {
        Some(session) => (StatusCode::OK, export::session_as_text(session)).into_response(),
        None => (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse {
                error: format!("Session {} not found", session_id),
            }),
        )
            .into_response(),
    }
}

/// GET /sessions/:session_id/comparison
pub async fn compare_session(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> impl IntoResponse {
    let sessions = state.store.sessions();
    let Some(session) = sessions.iter().find(|s| s.id == session_id) else {
        return (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse {
                error: format!("Session {} not found", session_id),
            }),
        )
            .into_response();
    };

    match stats::comparison(session) {
        Some(comparison) => (StatusCode::OK, Json(comparison)).into_response(),
        None => (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(ErrorResponse {
                error: "Session needs at least two attempts to compare".to_string(),
            }),
        )
            .into_response(),
    }
}

/// GET /stats
pub async fn get_stats(State(state): State<AppState>) -> impl IntoResponse {
    Json(stats::compute(&state.store.sessions()))
}

/// GET /coaching
pub async fn get_coaching(State(state): State<AppState>) -> impl IntoResponse {
    Json(stats::insights(&state.store.sessions()))
}

/// GET /prompts/daily
pub async fn daily_prompt(State(state): State<AppState>) -> impl IntoResponse {
    match state.store.profile() {
        Some(profile) => (StatusCode::OK, Json(state.corpus.daily(&profile.domains))).into_response(),
        None => (
            StatusCode::CONFLICT,
            Json(ErrorResponse {
                error: "Complete onboarding to get a daily prompt".to_string(),
            }),
        )
            .into_response(),
    }
}

/// GET /prompts/types
pub async fn question_types() -> impl IntoResponse {
    let types: Vec<QuestionTypeInfo> = QuestionType::ALL
        .iter()
        .map(|t| QuestionTypeInfo {
            id: t.as_str(),
            label: t.label(),
            description: t.description(),
        })
        .collect();
    Json(types)
}

/// GET /health
/// Health check endpoint
pub async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, "OK")
}
