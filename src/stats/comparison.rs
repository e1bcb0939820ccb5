use serde::Serialize;

use crate::model::{DimensionKind, Session};

/// Per-dimension movement between the first and latest attempt
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DimensionDelta {
    pub dimension: DimensionKind,
    pub first: u8,
    pub latest: u8,
    pub delta: i16,
}

/// First-versus-latest attempt comparison for one session
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AttemptComparison {
    pub attempt_count: usize,
    pub first_overall: u8,
    pub latest_overall: u8,
    pub overall_delta: i16,
    pub dimensions: Vec<DimensionDelta>,
}

/// Compare the first and latest attempt of a session. Needs at least two
/// attempts to say anything.
pub fn comparison(session: &Session) -> Option<AttemptComparison> {
    if session.attempts.len() < 2 {
        return None;
    }

    let first = session.attempts.first()?;
    let latest = session.attempts.last()?;

    let dimensions = DimensionKind::ALL
        .iter()
        .map(|kind| {
            let f = first.analysis.dimensions.get(*kind).score;
            let l = latest.analysis.dimensions.get(*kind).score;
            DimensionDelta {
                dimension: *kind,
                first: f,
                latest: l,
                delta: l as i16 - f as i16,
            }
        })
        .collect();

    Some(AttemptComparison {
        attempt_count: session.attempts.len(),
        first_overall: first.analysis.overall,
        latest_overall: latest.analysis.overall,
        overall_delta: latest.analysis.overall as i16 - first.analysis.overall as i16,
        dimensions,
    })
}
