//! Derived views over persisted session history
//!
//! Read-only folds: practice streaks, score averages per dimension, the
//! recent score series, and coaching tips for consistently weak
//! dimensions. Nothing here writes back to the store.

mod comparison;
mod insights;
mod summary;

pub use comparison::{comparison, AttemptComparison, DimensionDelta};
pub use insights::{insights, CoachingInsight};
pub use summary::{compute, compute_on, ScorePoint, Stats};
