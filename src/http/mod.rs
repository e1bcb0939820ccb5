//! HTTP API server for external control (the practice UI)
//!
//! This module provides a REST API for driving drills:
//! - PUT /profile - Save the onboarding/settings profile
//! - POST /drills/start - Pick a prompt and open a session
//! - POST /drills/submit - Analyze a finished transcript
//! - POST /drills/retry, /drills/next - Feedback-phase actions
//! - GET /stats, /coaching - Derived progress views
//! - GET /prompts/daily - The date-keyed daily prompt

mod handlers;
mod routes;
mod state;

pub use routes::create_router;
pub use state::AppState;
