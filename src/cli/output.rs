//! CLI output formatting

use crate::core::{config::StepConfig, StepState};
use crate::session::{SessionOutcome, SessionStatus, TransitionRecord};

// Re-export style
pub use console::style;
use console::Emoji;

// Emojis for output
pub static CHECK: Emoji<'_, '_> = Emoji("✅ ", "✓ ");
pub static CROSS: Emoji<'_, '_> = Emoji("❌ ", "✗ ");
pub static INFO: Emoji<'_, '_> = Emoji("ℹ️  ", "i ");
pub static WARN: Emoji<'_, '_> = Emoji("⚠️  ", "!");
pub static ROCKET: Emoji<'_, '_> = Emoji("🚀 ", "> ");

/// Format a step state for display
pub fn format_step_state(state: &StepState) -> String {
    match state {
        StepState::Unvisited => style("UNVISITED").dim().to_string(),
        StepState::Visited { .. } => style("VISITED").green().to_string(),
    }
}

/// Format a session status for display
pub fn format_status(status: SessionStatus) -> String {
    match status {
        SessionStatus::Completed => style("COMPLETED").green().to_string(),
        SessionStatus::Cancelled => style("CANCELLED").yellow().to_string(),
        SessionStatus::Abandoned => style("ABANDONED").dim().to_string(),
    }
}

/// Format a configured step as one line of `stepper list`
pub fn format_step_config(position: usize, step: &StepConfig) -> String {
    let mut flags = Vec::new();
    if step.optional {
        flags.push("optional");
    }
    if step.editable {
        flags.push("editable");
    }
    if step.cancellable {
        flags.push("cancellable");
    }
    if step.disabled {
        flags.push("disabled");
    }

    let caption = if step.disabled {
        style(&step.caption).dim().to_string()
    } else {
        style(&step.caption).bold().to_string()
    };

    let mut line = format!("{:>3}. {} {}", position, caption, style(format!("({})", step.id)).dim());
    if !flags.is_empty() {
        line.push_str(&format!(" [{}]", style(flags.join(", ")).cyan()));
    }
    line
}

/// Format a recorded transition for display
pub fn format_transition(record: &TransitionRecord) -> String {
    format!(
        "{} → {} ({})",
        style(record.from.as_deref().unwrap_or("-")).dim(),
        style(record.to.as_deref().unwrap_or("-")).cyan(),
        record.transition
    )
}

/// Format a session outcome summary
pub fn format_outcome(outcome: &SessionOutcome) -> String {
    let icon = match outcome.status {
        SessionStatus::Completed => CHECK,
        SessionStatus::Cancelled => WARN,
        SessionStatus::Abandoned => INFO,
    };

    format!(
        "{} {} - {} - {} visited, {} transitions, {} refused ({})",
        icon,
        style(&outcome.wizard).bold(),
        format_status(outcome.status),
        style(outcome.visited.len()).cyan(),
        outcome.transitions.len(),
        outcome.refused,
        style(&outcome.session_id.to_string()[..8]).dim()
    )
}
