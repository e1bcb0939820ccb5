use serde::Serialize;

use crate::model::{DimensionKind, Session};

/// How many recent sessions feed the insight window
const WINDOW: usize = 10;
/// Minimum scored sessions before any tip is offered
const MIN_SCORED: usize = 3;
/// Share of sub-6 scores that flags a dimension as weak
const WEAK_RATIO: f64 = 0.6;

/// A targeted tip for a dimension the user keeps scoring low on
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CoachingInsight {
    pub dimension: DimensionKind,
    pub tip: &'static str,
    pub avg_score: f64,
}

fn tip_for(kind: DimensionKind) -> &'static str {
    match kind {
        DimensionKind::Structure => "Try the \"preview, body, recap\" framework: state your main point, give 2-3 supporting details, then summarize. This gives listeners a clear roadmap.",
        DimensionKind::Clarity => "Replace vague phrases with specifics. Instead of \"we should improve things,\" say \"we should reduce response time from 3s to 1s.\" Concrete language builds credibility.",
        DimensionKind::Conciseness => "Practice the \"headline first\" technique: lead with your conclusion, then add detail only if needed. Cut any sentence that doesn't add new information.",
        DimensionKind::Altitude => "Match your answer to the question level. Strategic questions need frameworks, not tactics. Tactical questions need steps, not vision. Re-read the question before answering.",
        DimensionKind::Confidence => "Eliminate hedging phrases like \"I think maybe\" or \"sort of.\" State your position directly. If you're uncertain, say \"my hypothesis is...\" rather than undermining your point.",
    }
}

/// Tips for dimensions scoring below 6 in at least 60% of recent sessions
pub fn insights(sessions: &[Session]) -> Vec<CoachingInsight> {
    let recent = &sessions[..sessions.len().min(WINDOW)];
    if recent.len() < MIN_SCORED {
        return Vec::new();
    }

    let mut out = Vec::new();
    for kind in DimensionKind::ALL {
        let scores: Vec<u8> = recent
            .iter()
            .filter_map(|s| s.attempts.first())
            .map(|a| a.analysis.dimensions.get(kind).score)
            .collect();

        if scores.len() < MIN_SCORED {
            continue;
        }

        let low = scores.iter().filter(|s| **s < 6).count();
        if low as f64 / scores.len() as f64 >= WEAK_RATIO {
            let avg = scores.iter().map(|s| *s as f64).sum::<f64>() / scores.len() as f64;
            out.push(CoachingInsight {
                dimension: kind,
                tip: tip_for(kind),
                avg_score: (avg * 10.0).round() / 10.0,
            });
        }
    }

    out
}
