//! Level unlocks, level selection and achievement awards.
//!
//! Everything here is a pure function of a [`PlayerProgress`] snapshot:
//! evaluating the same snapshot twice gives the same answer, and updated
//! snapshots are returned rather than written in place.

use std::collections::BTreeSet;

use mathmaster_types::{LevelId, PlayerProgress, SelectLevelError, UnlockPolicy};

use crate::achievements::{ACHIEVEMENTS, AchievementRule};

/// Outcome of closing a completed unlock window.
#[derive(Debug, Clone, PartialEq)]
pub struct WindowReport {
    /// Progress with the window counters reset (and the unlock applied).
    pub progress: PlayerProgress,
    pub unlocked: Option<LevelId>,
    /// Accuracy of the window that just closed, in percent.
    pub accuracy: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProgressionEngine {
    total_levels: u32,
    policy: UnlockPolicy,
    rules: &'static [AchievementRule],
}

impl ProgressionEngine {
    #[must_use]
    pub fn new(total_levels: u32, policy: UnlockPolicy) -> Self {
        Self::with_rules(total_levels, policy, ACHIEVEMENTS)
    }

    #[must_use]
    pub fn with_rules(
        total_levels: u32,
        policy: UnlockPolicy,
        rules: &'static [AchievementRule],
    ) -> Self {
        Self {
            total_levels,
            policy,
            rules,
        }
    }

    #[must_use]
    pub const fn total_levels(&self) -> u32 {
        self.total_levels
    }

    #[must_use]
    pub const fn policy(&self) -> UnlockPolicy {
        self.policy
    }

    #[must_use]
    pub const fn rules(&self) -> &'static [AchievementRule] {
        self.rules
    }

    /// Unlocked levels after evaluating the current window's accuracy.
    ///
    /// Adds `current_level + 1` when accuracy meets the threshold, the next
    /// level exists, and it is not already unlocked.
    #[must_use]
    pub fn check_unlock(&self, progress: &PlayerProgress) -> BTreeSet<LevelId> {
        let mut unlocked = progress.unlocked_levels.clone();
        if let Some(next) = self.next_unlock(progress) {
            unlocked.insert(next);
        }
        unlocked
    }

    /// Close the unlock window once it holds `policy.window()` attempts.
    ///
    /// Returns `None` while the window is still filling.
    #[must_use]
    pub fn close_window(&self, progress: &PlayerProgress) -> Option<WindowReport> {
        if progress.attempts_in_window < self.policy.window() {
            return None;
        }

        let accuracy = progress.window_accuracy();
        let unlocked = self.next_unlock(progress);
        let mut next = progress.clone();
        if let Some(level) = unlocked {
            next.unlocked_levels.insert(level);
            tracing::info!(level = level.value(), accuracy, "Level unlocked");
        } else {
            tracing::debug!(accuracy, "Unlock window closed without unlock");
        }
        next.attempts_in_window = 0;
        next.correct_in_window = 0;

        Some(WindowReport {
            progress: next,
            unlocked,
            accuracy,
        })
    }

    /// Rules not yet earned whose criterion `progress` now meets, in catalog order.
    #[must_use]
    pub fn check_achievements(&self, progress: &PlayerProgress) -> Vec<&'static AchievementRule> {
        self.rules
            .iter()
            .filter(|rule| !progress.has_badge(rule.id) && rule.is_earned(progress))
            .collect()
    }

    /// Merge newly earned badges into a copy of `progress`.
    ///
    /// Calling this again on the returned progress yields no new badges.
    #[must_use]
    pub fn award_achievements(
        &self,
        progress: &PlayerProgress,
    ) -> (PlayerProgress, Vec<&'static AchievementRule>) {
        let earned = self.check_achievements(progress);
        let mut next = progress.clone();
        for rule in &earned {
            tracing::info!(badge = rule.id, "Achievement earned");
            next.earned_badges.insert(rule.id.to_string());
        }
        (next, earned)
    }

    /// Switch to `level` if it exists and is unlocked.
    ///
    /// Moving to a different level starts a fresh unlock window.
    pub fn select_level(
        &self,
        progress: &PlayerProgress,
        level: u32,
    ) -> Result<PlayerProgress, SelectLevelError> {
        let id = LevelId::new(level)
            .filter(|id| id.value() <= self.total_levels)
            .ok_or(SelectLevelError::InvalidLevel {
                requested: level,
                available: self.total_levels,
            })?;
        if !progress.is_unlocked(id) {
            return Err(SelectLevelError::Locked(id));
        }

        let mut next = progress.clone();
        if next.current_level != id {
            next.current_level = id;
            next.attempts_in_window = 0;
            next.correct_in_window = 0;
        }
        Ok(next)
    }

    fn next_unlock(&self, progress: &PlayerProgress) -> Option<LevelId> {
        let next = progress.current_level.next();
        let eligible = progress.current_level.value() < self.total_levels
            && !progress.is_unlocked(next)
            && self.meets_threshold(progress);
        eligible.then_some(next)
    }

    // correct / attempts * 100 >= threshold, in integers.
    fn meets_threshold(&self, progress: &PlayerProgress) -> bool {
        let threshold = u64::from(self.policy.threshold_percent());
        if progress.attempts_in_window == 0 {
            return threshold == 0;
        }
        u64::from(progress.correct_in_window) * 100
            >= threshold * u64::from(progress.attempts_in_window)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine() -> ProgressionEngine {
        ProgressionEngine::new(20, UnlockPolicy::default())
    }

    fn id(n: u32) -> LevelId {
        LevelId::new(n).unwrap()
    }

    fn window(attempts: u32, correct: u32) -> PlayerProgress {
        PlayerProgress {
            attempts_in_window: attempts,
            correct_in_window: correct,
            ..PlayerProgress::default()
        }
    }

    #[test]
    fn sixty_percent_unlocks_next_level() {
        let unlocked = engine().check_unlock(&window(15, 9));
        assert_eq!(unlocked, BTreeSet::from([id(1), id(2)]));
    }

    #[test]
    fn below_threshold_keeps_levels() {
        let unlocked = engine().check_unlock(&window(15, 8));
        assert_eq!(unlocked, BTreeSet::from([id(1)]));
    }

    #[test]
    fn no_attempts_means_zero_accuracy() {
        assert_eq!(engine().check_unlock(&window(0, 0)), BTreeSet::from([id(1)]));
    }

    #[test]
    fn last_level_has_nothing_to_unlock() {
        let mut progress = window(15, 15);
        progress.current_level = id(20);
        progress.unlocked_levels = (1..=20).map(id).collect();
        assert_eq!(engine().check_unlock(&progress).len(), 20);
        assert!(!engine().check_unlock(&progress).contains(&id(21)));
    }

    #[test]
    fn check_unlock_is_idempotent() {
        let progress = window(15, 12);
        let first = engine().check_unlock(&progress);
        let again = PlayerProgress {
            unlocked_levels: first.clone(),
            ..progress
        };
        assert_eq!(engine().check_unlock(&again), first);
    }

    #[test]
    fn window_stays_open_until_full() {
        assert!(engine().close_window(&window(14, 14)).is_none());
    }

    #[test]
    fn closing_window_resets_counters() {
        let report = engine().close_window(&window(15, 9)).unwrap();
        assert_eq!(report.unlocked, Some(id(2)));
        assert!((report.accuracy - 60.0).abs() < 1e-9);
        assert_eq!(report.progress.attempts_in_window, 0);
        assert_eq!(report.progress.correct_in_window, 0);
        assert!(report.progress.is_unlocked(id(2)));
    }

    #[test]
    fn closing_failed_window_still_resets() {
        let report = engine().close_window(&window(15, 3)).unwrap();
        assert_eq!(report.unlocked, None);
        assert_eq!(report.progress.attempts_in_window, 0);
    }

    #[test]
    fn custom_policy_changes_window_and_threshold() {
        let engine = ProgressionEngine::new(20, UnlockPolicy::new(5, 80).unwrap());
        assert_eq!(engine.close_window(&window(5, 4)).unwrap().unlocked, Some(id(2)));
        assert_eq!(engine.close_window(&window(5, 3)).unwrap().unlocked, None);
    }

    #[test]
    fn persistent_player_fires_once() {
        let progress = PlayerProgress {
            total_attempted: 100,
            ..PlayerProgress::default()
        };
        let (progress, earned) = engine().award_achievements(&progress);
        let ids: Vec<&str> = earned.iter().map(|rule| rule.id).collect();
        assert_eq!(ids, vec!["persistent_player"]);
        assert!(progress.has_badge("persistent_player"));

        let (_, again) = engine().award_achievements(&progress);
        assert!(again.is_empty());
    }

    #[test]
    fn achievements_follow_catalog_order() {
        let progress = PlayerProgress {
            total_correct: 1,
            highest_streak: 10,
            ..PlayerProgress::default()
        };
        let ids: Vec<&str> = engine()
            .check_achievements(&progress)
            .iter()
            .map(|rule| rule.id)
            .collect();
        assert_eq!(ids, vec!["first_steps", "on_a_roll", "unstoppable"]);
    }

    #[test]
    fn check_achievements_does_not_mutate() {
        let progress = PlayerProgress {
            total_correct: 1,
            ..PlayerProgress::default()
        };
        let engine = engine();
        assert_eq!(engine.check_achievements(&progress).len(), 1);
        assert_eq!(engine.check_achievements(&progress).len(), 1);
        assert!(progress.earned_badges.is_empty());
    }

    #[test]
    fn select_unlocked_level() {
        let mut progress = window(7, 5);
        progress.unlocked_levels.insert(id(2));
        let next = engine().select_level(&progress, 2).unwrap();
        assert_eq!(next.current_level, id(2));
        assert_eq!(next.attempts_in_window, 0);
    }

    #[test]
    fn reselecting_current_level_keeps_window() {
        let progress = window(7, 5);
        let next = engine().select_level(&progress, 1).unwrap();
        assert_eq!(next.attempts_in_window, 7);
    }

    #[test]
    fn select_locked_level_fails() {
        let progress = PlayerProgress::default();
        assert_eq!(
            engine().select_level(&progress, 3),
            Err(SelectLevelError::Locked(id(3)))
        );
    }

    #[test]
    fn select_out_of_range_level_fails() {
        let progress = PlayerProgress::default();
        for level in [0, 21] {
            assert_eq!(
                engine().select_level(&progress, level),
                Err(SelectLevelError::InvalidLevel {
                    requested: level,
                    available: 20
                })
            );
        }
    }
}
