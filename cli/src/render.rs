//! Plain-text views of the game state.
//!
//! Every function returns a `String` without a trailing newline; the session
//! decides where it goes.

use mathmaster_core::{Game, Hint, RoundOutcome};
use mathmaster_types::{Operator, PlayerProgress, Question};

const RULE: &str = "─";

/// Addition and subtraction stack vertically like on paper; the rest stay on
/// one line.
#[must_use]
pub fn question(question: &Question) -> String {
    match question.operator() {
        Operator::Add | Operator::Sub => stacked(question),
        Operator::Mul | Operator::Div => format!("{question} = ?"),
    }
}

fn stacked(question: &Question) -> String {
    let operands = question.operands();
    let width = operands
        .iter()
        .map(|n| n.to_string().len())
        .max()
        .unwrap_or(1);
    let last = operands.len().saturating_sub(1);

    let mut lines: Vec<String> = operands
        .iter()
        .enumerate()
        .map(|(i, n)| {
            let prefix = if i == last { question.operator().symbol() } else { " " };
            format!("{prefix} {n:>width$}")
        })
        .collect();
    lines.push(RULE.repeat(width + 2));
    lines.join("\n")
}

/// All levels grouped by category. `>` marks the current level.
#[must_use]
pub fn levels(game: &Game, progress: &PlayerProgress) -> String {
    let mut out = Vec::new();
    let mut category = None;
    for info in game.strategy().levels() {
        if category.as_deref() != Some(info.category.as_str()) {
            if category.is_some() {
                out.push(String::new());
            }
            out.push(info.category.clone());
            category = Some(info.category.clone());
        }
        let marker = if info.id == progress.current_level { '>' } else { ' ' };
        let lock = if progress.is_unlocked(info.id) { "" } else { "  (locked)" };
        out.push(format!("{marker} {:>2}. {}{lock}", info.id.value(), info.description));
    }
    out.join("\n")
}

#[must_use]
pub fn stats(game: &Game, progress: &PlayerProgress) -> String {
    let name = if progress.player_name.is_empty() {
        "(no name yet)"
    } else {
        progress.player_name.as_str()
    };
    let level = game
        .strategy()
        .level_name(progress.current_level)
        .unwrap_or_default();
    let policy = game.progression().policy();

    [
        format!("Player:   {name}"),
        format!("Level:    {} · {level}", progress.current_level),
        format!("Score:    {}", progress.score),
        format!(
            "Streak:   {} (best {})",
            progress.streak, progress.highest_streak
        ),
        format!(
            "Window:   {}/{} correct ({:.0}%), {}% over {} unlocks the next level",
            progress.correct_in_window,
            progress.attempts_in_window,
            progress.window_accuracy(),
            policy.threshold_percent(),
            policy.window(),
        ),
        format!(
            "Lifetime: {}/{} correct ({:.0}%)",
            progress.total_correct,
            progress.total_attempted,
            progress.lifetime_accuracy()
        ),
        format!(
            "Hints:    {} left, {} used",
            progress.hints_remaining, progress.hints_used
        ),
        format!(
            "Unlocked: {} of {} levels",
            progress.unlocked_levels.len(),
            game.strategy().level_count()
        ),
    ]
    .join("\n")
}

#[must_use]
pub fn badges(game: &Game, progress: &PlayerProgress) -> String {
    let rules = game.progression().rules();
    let earned = rules.iter().filter(|r| progress.has_badge(r.id)).count();
    let mut out = vec![format!("Badges {earned}/{}", rules.len())];
    out.extend(rules.iter().map(|rule| {
        let mark = if progress.has_badge(rule.id) { 'x' } else { ' ' };
        format!("[{mark}] {}: {}", rule.name, rule.description)
    }));
    out.join("\n")
}

#[must_use]
pub fn hint(hint: Hint, remaining: u32) -> String {
    format!("Hint: {hint} ({remaining} left)")
}

/// Feedback for a submitted answer, then any unlock and badges it caused.
#[must_use]
pub fn outcome(game: &Game, outcome: &RoundOutcome) -> String {
    let mut out = Vec::new();
    if outcome.correct {
        out.push(format!(
            "Correct! +{} points (streak {})",
            outcome.points, outcome.progress.streak
        ));
    } else {
        out.push(format!("Not quite. The answer was {}.", outcome.expected));
    }
    if let Some(level) = outcome.unlocked {
        let name = game.strategy().level_name(level).unwrap_or_default();
        out.push(format!(
            "Level {level} unlocked: {name}. Type :level {level} to play it."
        ));
    }
    out.extend(
        outcome
            .badges
            .iter()
            .map(|rule| format!("Badge earned: {}! {}", rule.name, rule.description)),
    );
    out.join("\n")
}
