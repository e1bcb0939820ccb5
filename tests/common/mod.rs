//! Shared fixtures for integration tests
#![allow(dead_code)] // each test binary uses a different subset

use chrono::{DateTime, Utc};
use clarity_drills::model::{
    AnalysisResult, Attempt, DimensionScore, Dimensions, Domain, Profile, Prompt, QuestionType,
    Session,
};

pub fn profile(domains: &[Domain]) -> Profile {
    Profile::new(domains.to_vec())
}

pub fn prompt(id: &str) -> Prompt {
    Prompt {
        id: id.to_string(),
        text: "Walk me through how you'd launch in a new segment.".to_string(),
        question_type: QuestionType::DrillDown,
        domains: vec![Domain::Marketing, Domain::Strategy],
        difficulty: None,
    }
}

pub fn analysis(overall: u8) -> AnalysisResult {
    let dim = |score: u8| DimensionScore {
        score,
        note: "One sentence of feedback.".to_string(),
    };
    AnalysisResult {
        overall,
        dimensions: Dimensions {
            structure: dim(overall),
            clarity: dim(overall),
            conciseness: dim(overall),
            altitude: dim(overall),
            confidence: dim(overall),
        },
        summary: "A reasonable answer with room to tighten.".to_string(),
        key_improvement: "Lead with the conclusion.".to_string(),
        polished_version: "Here is a tighter version of the answer.".to_string(),
        filler_words: vec!["um".to_string()],
    }
}

pub fn attempt_at(overall: u8, recorded_at: DateTime<Utc>) -> Attempt {
    Attempt {
        transcript: "I would start by segmenting the market and validating demand.".to_string(),
        duration: 42,
        analysis: analysis(overall),
        recorded_at,
    }
}

pub fn session(id: &str, overalls: &[u8]) -> Session {
    session_at(id, overalls, Utc::now())
}

pub fn session_at(id: &str, overalls: &[u8], created_at: DateTime<Utc>) -> Session {
    let attempts: Vec<Attempt> = overalls
        .iter()
        .map(|overall| attempt_at(*overall, created_at))
        .collect();
    Session {
        id: id.to_string(),
        prompt: prompt(&format!("p-{}", id)),
        attempts,
        created_at,
    }
}
