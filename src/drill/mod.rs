//! Drill session state machine
//!
//! Orchestrates prompt selection, the coaching round-trip, and persistence
//! across the lifecycle of one drill: ready → recording → analyzing →
//! feedback, then back to ready for a retry on the same prompt or a fresh
//! ready for the next question. Submission always passes through analyzing
//! and resolves to a definitive success or failure before leaving it.

mod session;

pub use session::{DrillPhase, DrillSession, DrillSnapshot, MIN_TRANSCRIPT_CHARS};
