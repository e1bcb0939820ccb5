use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Expertise domains a user can practice in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Domain {
    Marketing,
    Ai,
    Product,
    Strategy,
    Finance,
    Engineering,
    Design,
    Sales,
    Operations,
    Leadership,
}

impl Domain {
    pub const ALL: [Domain; 10] = [
        Domain::Marketing,
        Domain::Ai,
        Domain::Product,
        Domain::Strategy,
        Domain::Finance,
        Domain::Engineering,
        Domain::Design,
        Domain::Sales,
        Domain::Operations,
        Domain::Leadership,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Domain::Marketing => "Marketing",
            Domain::Ai => "AI & ML",
            Domain::Product => "Product",
            Domain::Strategy => "Strategy",
            Domain::Finance => "Finance",
            Domain::Engineering => "Engineering",
            Domain::Design => "Design",
            Domain::Sales => "Sales",
            Domain::Operations => "Operations",
            Domain::Leadership => "Leadership",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Domain::Marketing => "marketing",
            Domain::Ai => "ai",
            Domain::Product => "product",
            Domain::Strategy => "strategy",
            Domain::Finance => "finance",
            Domain::Engineering => "engineering",
            Domain::Design => "design",
            Domain::Sales => "sales",
            Domain::Operations => "operations",
            Domain::Leadership => "leadership",
        }
    }
}

/// The five fixed question categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum QuestionType {
    BigPicture,
    DrillDown,
    Curveball,
    Defend,
    Simplify,
}

impl QuestionType {
    pub const ALL: [QuestionType; 5] = [
        QuestionType::BigPicture,
        QuestionType::DrillDown,
        QuestionType::Curveball,
        QuestionType::Defend,
        QuestionType::Simplify,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            QuestionType::BigPicture => "big-picture",
            QuestionType::DrillDown => "drill-down",
            QuestionType::Curveball => "curveball",
            QuestionType::Defend => "defend",
            QuestionType::Simplify => "simplify",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            QuestionType::BigPicture => "Big Picture",
            QuestionType::DrillDown => "Drill Down",
            QuestionType::Curveball => "Curveball",
            QuestionType::Defend => "Defend a Position",
            QuestionType::Simplify => "Simplify",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            QuestionType::BigPicture => "30,000-foot strategic thinking",
            QuestionType::DrillDown => "Tactical, step-by-step execution",
            QuestionType::Curveball => "React to unexpected scenarios",
            QuestionType::Defend => "Build a compelling argument",
            QuestionType::Simplify => "Explain complex ideas simply",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }
}

/// Permitted fixed timer lengths for timed mode. Serialized as the bare
/// number of seconds, matching the persisted profile layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "u64", into = "u64")]
pub enum TimerDuration {
    Sixty,
    Ninety,
    OneTwenty,
}

impl TimerDuration {
    pub fn seconds(&self) -> u64 {
        match self {
            TimerDuration::Sixty => 60,
            TimerDuration::Ninety => 90,
            TimerDuration::OneTwenty => 120,
        }
    }
}

impl TryFrom<u64> for TimerDuration {
    type Error = String;

    fn try_from(value: u64) -> Result<Self, Self::Error> {
        match value {
            60 => Ok(TimerDuration::Sixty),
            90 => Ok(TimerDuration::Ninety),
            120 => Ok(TimerDuration::OneTwenty),
            other => Err(format!("unsupported timer duration: {}s", other)),
        }
    }
}

impl From<TimerDuration> for u64 {
    fn from(value: TimerDuration) -> Self {
        value.seconds()
    }
}

/// Minimum number of domains a profile must select
pub const MIN_PROFILE_DOMAINS: usize = 2;

/// One profile per installation, created during onboarding
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub domains: Vec<Domain>,
    pub created_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timed_mode: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timer_duration: Option<TimerDuration>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preferred_difficulty: Option<Difficulty>,
}

impl Profile {
    pub fn new(domains: Vec<Domain>) -> Self {
        Self {
            domains,
            created_at: Utc::now(),
            timed_mode: None,
            timer_duration: None,
            preferred_difficulty: None,
        }
    }
}

/// A drill question, either from the built-in corpus or generated on demand
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prompt {
    pub id: String,
    pub text: String,
    #[serde(rename = "type")]
    pub question_type: QuestionType,
    pub domains: Vec<Domain>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<Difficulty>,
}

/// The five scored dimensions of an analyzed answer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DimensionKind {
    Structure,
    Clarity,
    Conciseness,
    Altitude,
    Confidence,
}

impl DimensionKind {
    pub const ALL: [DimensionKind; 5] = [
        DimensionKind::Structure,
        DimensionKind::Clarity,
        DimensionKind::Conciseness,
        DimensionKind::Altitude,
        DimensionKind::Confidence,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DimensionKind::Structure => "structure",
            DimensionKind::Clarity => "clarity",
            DimensionKind::Conciseness => "conciseness",
            DimensionKind::Altitude => "altitude",
            DimensionKind::Confidence => "confidence",
        }
    }
}

/// Score plus a one-sentence note for a single dimension
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DimensionScore {
    pub score: u8,
    pub note: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dimensions {
    pub structure: DimensionScore,
    pub clarity: DimensionScore,
    pub conciseness: DimensionScore,
    pub altitude: DimensionScore,
    pub confidence: DimensionScore,
}

impl Dimensions {
    pub fn get(&self, kind: DimensionKind) -> &DimensionScore {
        match kind {
            DimensionKind::Structure => &self.structure,
            DimensionKind::Clarity => &self.clarity,
            DimensionKind::Conciseness => &self.conciseness,
            DimensionKind::Altitude => &self.altitude,
            DimensionKind::Confidence => &self.confidence,
        }
    }
}

/// Structured coaching output for one attempt, produced by the external
/// analysis service. Shape and score ranges are validated at the coaching
/// boundary before a value of this type is trusted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub overall: u8,
    pub dimensions: Dimensions,
    pub summary: String,
    pub key_improvement: String,
    pub polished_version: String,
    #[serde(default)]
    pub filler_words: Vec<String>,
}

/// One recorded, transcribed, and analyzed answer. Never mutated after
/// creation; owned by its parent session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attempt {
    pub transcript: String,
    /// Spoken duration in whole seconds
    pub duration: u64,
    pub analysis: AnalysisResult,
    pub recorded_at: DateTime<Utc>,
}

/// One full drill run on one prompt. All attempts answer the same prompt;
/// a retry appends to the same session, "next question" starts a new one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub id: String,
    pub prompt: Prompt,
    pub attempts: Vec<Attempt>,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn question_type_round_trips_kebab_case() {
        let json = serde_json::to_string(&QuestionType::BigPicture).unwrap();
        assert_eq!(json, "\"big-picture\"");
        let back: QuestionType = serde_json::from_str(&json).unwrap();
        assert_eq!(back, QuestionType::BigPicture);
    }

    #[test]
    fn timer_duration_serializes_as_seconds() {
        let json = serde_json::to_string(&TimerDuration::Ninety).unwrap();
        assert_eq!(json, "90");
        let back: TimerDuration = serde_json::from_str("120").unwrap();
        assert_eq!(back, TimerDuration::OneTwenty);
        assert!(serde_json::from_str::<TimerDuration>("45").is_err());
    }

    #[test]
    fn profile_omits_unset_optional_fields() {
        let profile = Profile::new(vec![Domain::Marketing, Domain::Strategy]);
        let json = serde_json::to_string(&profile).unwrap();
        assert!(json.contains("createdAt"));
        assert!(!json.contains("timedMode"));
        assert!(!json.contains("timerDuration"));
    }

    #[test]
    fn prompt_type_field_renamed() {
        let prompt = Prompt {
            id: "bp-1".to_string(),
            text: "Where is the industry heading?".to_string(),
            question_type: QuestionType::BigPicture,
            domains: vec![Domain::Strategy],
            difficulty: None,
        };
        let json = serde_json::to_string(&prompt).unwrap();
        assert!(json.contains("\"type\":\"big-picture\""));
    }
}
