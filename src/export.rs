use crate::model::{DimensionKind, Session};

/// Render a session as a shareable plain-text summary
pub fn session_as_text(session: &Session) -> String {
    let mut lines: Vec<String> = Vec::new();
    lines.push("Clarity Drills - Session Summary".to_string());
    lines.push(format!("Question: {}", session.prompt.text));
    lines.push(format!("Type: {}", session.prompt.question_type.label()));
    lines.push(format!("Date: {}", session.created_at.format("%B %-d, %Y")));
    lines.push(String::new());

    for (i, attempt) in session.attempts.iter().enumerate() {
        let dims = DimensionKind::ALL
            .iter()
            .map(|kind| {
                format!(
                    "{}: {}",
                    capitalize(kind.as_str()),
                    attempt.analysis.dimensions.get(*kind).score
                )
            })
            .collect::<Vec<_>>()
            .join(" | ");

        lines.push(format!("--- Attempt {} ---", i + 1));
        lines.push(format!("Score: {}/10", attempt.analysis.overall));
        lines.push(dims);
        lines.push(format!("Summary: {}", attempt.analysis.summary));
        lines.push(format!("Key Improvement: {}", attempt.analysis.key_improvement));
        lines.push(format!("Transcript: {}", attempt.transcript));
        lines.push(String::new());
    }

    lines.join("\n")
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}
