use serde::Deserialize;
use tracing::{debug, info};

use super::client::{
    clean_question, parse_analysis, AnalyzeRequest, CoachClient, CoachError, GenerateRequest,
};
use crate::model::{AnalysisResult, Difficulty, QuestionType};

const ANALYSIS_MAX_TOKENS: u32 = 1500;
const GENERATION_MAX_TOKENS: u32 = 200;

/// Connection settings for the coaching service
#[derive(Debug, Clone, Deserialize)]
pub struct CoachConfig {
    /// Service base URL, e.g. "https://api.anthropic.com"
    pub base_url: String,
    /// Model identifier requested for every completion
    pub model: String,
    /// API token
    pub api_key: String,
}

/// reqwest-backed coaching client speaking the messages API
pub struct HttpCoachClient {
    client: reqwest::Client,
    config: CoachConfig,
}

impl HttpCoachClient {
    pub fn new(config: CoachConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }

    /// One user-turn completion round-trip
    async fn complete(&self, prompt: String, max_tokens: u32) -> Result<String, CoachError> {
        let body = serde_json::json!({
            "model": self.config.model,
            "max_tokens": max_tokens,
            "messages": [{ "role": "user", "content": prompt }],
        });

        let response = self
            .client
            .post(format!("{}/v1/messages", self.config.base_url))
            .header("x-api-key", &self.config.api_key)
            .header("anthropic-version", "2023-06-01")
            .json(&body)
            .send()
            .await
            .map_err(|e| CoachError::Request(format!("request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(CoachError::Request(format!(
                "service returned {}: {}",
                status, body
            )));
        }

        let reply: MessagesReply = response
            .json()
            .await
            .map_err(|e| CoachError::Malformed(format!("unparseable reply envelope: {}", e)))?;

        reply
            .first_text()
            .ok_or_else(|| CoachError::Malformed("reply carried no text content".to_string()))
    }
}

#[async_trait::async_trait]
impl CoachClient for HttpCoachClient {
    async fn analyze(&self, request: &AnalyzeRequest) -> Result<AnalysisResult, CoachError> {
        debug!(
            "Requesting analysis for {:?} question ({} chars of transcript)",
            request.question_type,
            request.transcript.len()
        );

        let text = self
            .complete(analysis_prompt(request), ANALYSIS_MAX_TOKENS)
            .await?;
        let result = parse_analysis(&text)?;

        info!("Analysis complete: overall {}/10", result.overall);
        Ok(result)
    }

    async fn generate_question(&self, request: &GenerateRequest) -> Result<String, CoachError> {
        debug!("Requesting generated {:?} question", request.category);

        let text = self
            .complete(generation_prompt(request), GENERATION_MAX_TOKENS)
            .await?;
        let question = clean_question(&text);
        if question.is_empty() {
            return Err(CoachError::Malformed("empty generated question".to_string()));
        }
        Ok(question)
    }
}

#[derive(Deserialize)]
struct MessagesReply {
    content: Vec<ContentBlock>,
}

impl MessagesReply {
    fn first_text(self) -> Option<String> {
        self.content.into_iter().find_map(|block| match block {
            ContentBlock::Text { text } => Some(text),
            ContentBlock::Other => None,
        })
    }
}

#[derive(Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
enum ContentBlock {
    Text { text: String },
    #[serde(other)]
    Other,
}

/// Guidance telling the coach which altitude the answer should have hit
fn altitude_guidance(question_type: QuestionType) -> &'static str {
    match question_type {
        QuestionType::BigPicture => "This was a 30,000-foot strategic question. The answer should stay at the strategic level with frameworks, not dive into tactics.",
        QuestionType::DrillDown => "This was a tactical drill-down question. The answer should be specific and actionable with concrete steps.",
        QuestionType::Curveball => "This was a curveball/scenario question. The answer should show quick thinking with a structured response despite the surprise.",
        QuestionType::Defend => "This was a \"defend your position\" question. The answer should present a clear thesis with supporting arguments.",
        QuestionType::Simplify => "This was a \"simplify/explain\" question. The answer should be accessible to a non-expert without jargon.",
    }
}

fn analysis_prompt(request: &AnalyzeRequest) -> String {
    format!(
        r#"You are a communication coach analyzing a spoken response to an unexpected question.

QUESTION: "{question}"
QUESTION TYPE: {question_type}
{guidance}

SPOKEN RESPONSE (transcribed):
"{transcript}"

Analyze this spoken response and return a JSON object with exactly this structure:
{{
  "overall": <number 1-10>,
  "dimensions": {{
    "structure": {{ "score": <1-10>, "note": "<one sentence>" }},
    "clarity": {{ "score": <1-10>, "note": "<one sentence>" }},
    "conciseness": {{ "score": <1-10>, "note": "<one sentence>" }},
    "altitude": {{ "score": <1-10>, "note": "<one sentence>" }},
    "confidence": {{ "score": <1-10>, "note": "<one sentence>" }}
  }},
  "summary": "<2-3 sentence overall assessment>",
  "keyImprovement": "<single most impactful thing to improve, one sentence>",
  "polishedVersion": "<rewrite of their response in 60-90 seconds of speaking time, keeping their ideas but with better structure, clarity, and confidence. Use their voice/style but eliminate filler and add structure.>",
  "fillerWords": [<array of filler phrases detected, e.g. "um", "like", "you know", "so basically", "I think maybe">]
}}

Scoring guide:
- Structure: Did they frame/preview before diving in? Is there a clear beginning/middle/end?
- Clarity: Would a listener understand on first hearing? No ambiguity?
- Conciseness: Did they make their point efficiently? No rambling or repetition?
- Altitude: Did they answer at the right level for the question type?
- Confidence: No hedging ("I think maybe"), filler words, or unnecessary qualifiers?

Return ONLY the JSON object, no other text."#,
        question = request.question,
        question_type = request.question_type.as_str(),
        guidance = altitude_guidance(request.question_type),
        transcript = request.transcript,
    )
}

fn generation_prompt(request: &GenerateRequest) -> String {
    let domains = request
        .domains
        .iter()
        .map(|d| d.as_str())
        .collect::<Vec<_>>()
        .join(", ");

    let difficulty_guide = match request.difficulty {
        Some(Difficulty::Easy) => "\nDifficulty level: easy. Keep the question straightforward and common.",
        Some(Difficulty::Medium) => "\nDifficulty level: medium. Make it moderately challenging.",
        Some(Difficulty::Hard) => "\nDifficulty level: hard. Make the question challenging, nuanced, and require deep expertise.",
        None => "",
    };

    format!(
        r#"Generate a single interview/communication drill question.

Category: {category}
Relevant domains: {domains}{difficulty_guide}

Category descriptions:
- big-picture: 30,000-foot strategic thinking questions
- drill-down: Tactical, step-by-step execution questions
- curveball: Unexpected scenario/crisis questions
- defend: "Defend a position" argumentative questions
- simplify: "Explain complex ideas simply" questions

Return ONLY the question text, nothing else. No quotes, no prefix, no explanation."#,
        category = request.category.as_str(),
        domains = domains,
        difficulty_guide = difficulty_guide,
    )
}
