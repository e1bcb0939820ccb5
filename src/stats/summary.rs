use chrono::{NaiveDate, Utc};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

use crate::model::{Attempt, DimensionKind, Session};

/// One point in the recent score series
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScorePoint {
    /// Short display date, e.g. "Aug 5"
    pub date: String,
    pub score: u8,
}

/// Aggregate progress over all persisted sessions
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Stats {
    pub total_sessions: usize,
    pub current_streak: u32,
    pub longest_streak: u32,
    /// Mean first-attempt overall score
    pub average_score: f64,
    /// Mean (last attempt - first attempt) over sessions with retries
    pub average_improvement: f64,
    pub scores_by_dimension: BTreeMap<String, f64>,
    /// Last 20 sessions, oldest first
    pub recent_scores: Vec<ScorePoint>,
}

impl Stats {
    fn empty() -> Self {
        Self {
            total_sessions: 0,
            current_streak: 0,
            longest_streak: 0,
            average_score: 0.0,
            average_improvement: 0.0,
            scores_by_dimension: BTreeMap::new(),
            recent_scores: Vec::new(),
        }
    }
}

/// Stats as of today
pub fn compute(sessions: &[Session]) -> Stats {
    compute_on(sessions, Utc::now().date_naive())
}

/// Stats with an explicit "today" for the streak computation
pub fn compute_on(sessions: &[Session], today: NaiveDate) -> Stats {
    if sessions.is_empty() {
        return Stats::empty();
    }

    let first_attempts: Vec<&Attempt> = sessions
        .iter()
        .filter_map(|s| s.attempts.first())
        .collect();

    let average_score = mean(first_attempts.iter().map(|a| a.analysis.overall as f64));

    let improvements: Vec<f64> = sessions
        .iter()
        .filter(|s| s.attempts.len() >= 2)
        .filter_map(|s| {
            let first = s.attempts.first()?.analysis.overall as f64;
            let last = s.attempts.last()?.analysis.overall as f64;
            Some(last - first)
        })
        .collect();
    let average_improvement = mean(improvements.iter().copied());

    let mut scores_by_dimension = BTreeMap::new();
    for kind in DimensionKind::ALL {
        let avg = mean(
            first_attempts
                .iter()
                .map(|a| a.analysis.dimensions.get(kind).score as f64),
        );
        scores_by_dimension.insert(kind.as_str().to_string(), avg);
    }

    // Sessions are stored most recent first; the series reads oldest first
    let recent_scores: Vec<ScorePoint> = sessions
        .iter()
        .take(20)
        .rev()
        .filter_map(|s| {
            let first = s.attempts.first()?;
            Some(ScorePoint {
                date: s.created_at.format("%b %-d").to_string(),
                score: first.analysis.overall,
            })
        })
        .collect();

    let practice_days: BTreeSet<NaiveDate> =
        sessions.iter().map(|s| s.created_at.date_naive()).collect();
    let (current_streak, longest_streak) = streaks(&practice_days, today);

    Stats {
        total_sessions: sessions.len(),
        current_streak,
        longest_streak,
        average_score,
        average_improvement,
        scores_by_dimension,
        recent_scores,
    }
}

fn mean(values: impl Iterator<Item = f64>) -> f64 {
    let (sum, count) = values.fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));
    if count == 0 {
        0.0
    } else {
        sum / count as f64
    }
}

/// Consecutive-calendar-day streaks over the set of practice days. The
/// current streak counts only while the most recent practice day is today
/// or yesterday; the longest streak is the longest run anywhere.
fn streaks(days: &BTreeSet<NaiveDate>, today: NaiveDate) -> (u32, u32) {
    let sorted: Vec<NaiveDate> = days.iter().copied().collect();
    let Some(&latest) = sorted.last() else {
        return (0, 0);
    };

    let mut longest = 1u32;
    let mut run = 1u32;
    for pair in sorted.windows(2) {
        if pair[0].succ_opt() == Some(pair[1]) {
            run += 1;
            longest = longest.max(run);
        } else {
            run = 1;
        }
    }

    let mut current = 0u32;
    if latest == today || latest.succ_opt() == Some(today) {
        current = 1;
        for pair in sorted.windows(2).rev() {
            if pair[0].succ_opt() == Some(pair[1]) {
                current += 1;
            } else {
                break;
            }
        }
    }

    (current, longest)
}
