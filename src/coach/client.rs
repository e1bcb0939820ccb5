use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::{AnalysisResult, Difficulty, DimensionKind, Domain, QuestionType};

/// Analysis request payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeRequest {
    pub question: String,
    pub question_type: QuestionType,
    pub transcript: String,
}

/// Question-generation request payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerateRequest {
    pub category: QuestionType,
    pub domains: Vec<Domain>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<Difficulty>,
}

/// Failure kinds at the coaching boundary
#[derive(Debug, Error)]
pub enum CoachError {
    /// Network error or non-success response from the service
    #[error("coaching request failed: {0}")]
    Request(String),

    /// Reply missing required fields or carrying out-of-range scores
    #[error("coaching response malformed: {0}")]
    Malformed(String),
}

/// Client for the external coaching service
#[async_trait::async_trait]
pub trait CoachClient: Send + Sync {
    /// Analyze one spoken answer, returning validated structured feedback
    async fn analyze(&self, request: &AnalyzeRequest) -> Result<AnalysisResult, CoachError>;

    /// Generate a single drill question for a category and domain set
    async fn generate_question(&self, request: &GenerateRequest) -> Result<String, CoachError>;
}

/// Extract and validate the JSON object embedded in a coaching reply.
/// The model is asked for bare JSON but replies sometimes wrap it in prose.
pub fn parse_analysis(text: &str) -> Result<AnalysisResult, CoachError> {
    let start = text
        .find('{')
        .ok_or_else(|| CoachError::Malformed("no JSON object in reply".to_string()))?;
    let end = text
        .rfind('}')
        .filter(|end| *end > start)
        .ok_or_else(|| CoachError::Malformed("no JSON object in reply".to_string()))?;

    let result: AnalysisResult = serde_json::from_str(&text[start..=end])
        .map_err(|e| CoachError::Malformed(e.to_string()))?;

    validate_analysis(&result)?;
    Ok(result)
}

/// Range checks over a decoded analysis: every score must be 1-10
pub fn validate_analysis(result: &AnalysisResult) -> Result<(), CoachError> {
    if !(1..=10).contains(&result.overall) {
        return Err(CoachError::Malformed(format!(
            "overall score {} outside 1-10",
            result.overall
        )));
    }
    for kind in DimensionKind::ALL {
        let score = result.dimensions.get(kind).score;
        if !(1..=10).contains(&score) {
            return Err(CoachError::Malformed(format!(
                "{} score {} outside 1-10",
                kind.as_str(),
                score
            )));
        }
    }
    Ok(())
}

/// Trim a generated question of surrounding whitespace and quoting
pub fn clean_question(raw: &str) -> String {
    let trimmed = raw.trim();
    let unquoted = trimmed
        .strip_prefix('"')
        .and_then(|s| s.strip_suffix('"'))
        .unwrap_or(trimmed);
    unquoted.trim().to_string()
}
