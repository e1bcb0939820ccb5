//! Coaching service boundary
//!
//! Opaque request/response contract to the external analysis and
//! question-generation service. Replies are validated for shape and score
//! range before an [`crate::model::AnalysisResult`] is trusted; violations
//! are a distinct malformed-response failure, never partial success.

mod client;
mod http;

pub use client::{
    clean_question, parse_analysis, validate_analysis, AnalyzeRequest, CoachClient, CoachError,
    GenerateRequest,
};
pub use http::{CoachConfig, HttpCoachClient};
