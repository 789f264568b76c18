// resources.rs
use std::time::Duration;

use bevy::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CompletionState {
    #[default]
    InProgress,
    Won,
    Lost,
}

impl CompletionState {
    pub fn is_terminal(self) -> bool {
        self != CompletionState::InProgress
    }
}

/// Result of reporting an item to the tracker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FoundOutcome {
    /// Removed, others are still outstanding.
    Removed,
    /// Removed the last outstanding item; the game is won.
    Completed,
    /// Unknown, already found, or the game is already over.
    Ignored,
}

/// Owns the items still to be found, the optional countdown and the overall
/// win/lose state.
#[derive(Resource, Debug)]
pub struct ItemTracker {
    outstanding: Vec<Entity>,
    state: CompletionState,
    countdown: Option<Timer>,
}

impl ItemTracker {
    pub fn new(labels: impl IntoIterator<Item = Entity>) -> Self {
        let mut outstanding = Vec::new();
        for label in labels {
            if !outstanding.contains(&label) {
                outstanding.push(label);
            }
        }

        Self {
            outstanding,
            state: CompletionState::InProgress,
            countdown: None,
        }
    }

    pub fn with_countdown(mut self, duration: Duration) -> Self {
        self.countdown = Some(Timer::new(duration, TimerMode::Once));
        self
    }

    pub fn item_found(&mut self, label: Entity) -> FoundOutcome {
        if self.state.is_terminal() {
            return FoundOutcome::Ignored;
        }
        let Some(index) = self.outstanding.iter().position(|&item| item == label) else {
            return FoundOutcome::Ignored;
        };

        self.outstanding.remove(index);
        if !self.outstanding.is_empty() {
            return FoundOutcome::Removed;
        }

        self.state = CompletionState::Won;
        if let Some(timer) = self.countdown.as_mut() {
            timer.pause();
        }
        FoundOutcome::Completed
    }

    /// Advances the countdown. Returns `Some(Lost)` on the tick it runs out.
    pub fn tick(&mut self, delta: Duration) -> Option<CompletionState> {
        if self.state.is_terminal() {
            return None;
        }
        let timer = self.countdown.as_mut()?;
        timer.tick(delta);
        if !timer.finished() {
            return None;
        }

        timer.pause();
        self.state = CompletionState::Lost;
        Some(CompletionState::Lost)
    }

    pub fn state(&self) -> CompletionState {
        self.state
    }

    pub fn remaining_items(&self) -> usize {
        self.outstanding.len()
    }

    pub fn is_outstanding(&self, label: Entity) -> bool {
        self.outstanding.contains(&label)
    }

    pub fn outstanding(&self) -> &[Entity] {
        &self.outstanding
    }

    pub fn has_countdown(&self) -> bool {
        self.countdown.is_some()
    }

    /// Seconds left on the countdown, clamped at zero.
    pub fn remaining_secs(&self) -> Option<f32> {
        self.countdown.as_ref().map(|timer| timer.remaining_secs().max(0.0))
    }
}

/// Panels the tracker reveals. Unset slots are caught by setup validation.
#[derive(Resource, Debug, Clone, Default)]
pub struct TrackerPanels {
    pub win_panel: Option<Entity>,
    pub lose_panel: Option<Entity>,
    pub countdown_label: Option<Entity>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels() -> [Entity; 3] {
        [Entity::from_raw(10), Entity::from_raw(11), Entity::from_raw(12)]
    }

    #[test]
    fn test_find_walkthrough() {
        let [a, b, c] = labels();
        let mut tracker = ItemTracker::new([a, b, c]);

        assert_eq!(tracker.item_found(b), FoundOutcome::Removed);
        assert_eq!(tracker.outstanding(), &[a, c]);
        assert_eq!(tracker.state(), CompletionState::InProgress);

        assert_eq!(tracker.item_found(b), FoundOutcome::Ignored);
        assert_eq!(tracker.remaining_items(), 2);

        assert_eq!(tracker.item_found(a), FoundOutcome::Removed);
        assert_eq!(tracker.outstanding(), &[c]);

        assert_eq!(tracker.item_found(c), FoundOutcome::Completed);
        assert_eq!(tracker.remaining_items(), 0);
        assert_eq!(tracker.state(), CompletionState::Won);
    }

    #[test]
    fn test_duplicate_reports_remove_once() {
        let [a, b, _] = labels();
        let mut tracker = ItemTracker::new([a, b]);
        for _ in 0..5 {
            tracker.item_found(a);
        }
        assert_eq!(tracker.remaining_items(), 1);
        assert!(!tracker.is_outstanding(a));
        assert!(tracker.is_outstanding(b));
    }

    #[test]
    fn test_unknown_label_is_ignored() {
        let [a, _, _] = labels();
        let mut tracker = ItemTracker::new([a]);
        assert_eq!(tracker.item_found(Entity::from_raw(99)), FoundOutcome::Ignored);
        assert_eq!(tracker.remaining_items(), 1);
    }

    #[test]
    fn test_every_order_wins_exactly_once() {
        let [a, b, c] = labels();
        let orders = [
            [a, b, c],
            [a, c, b],
            [b, a, c],
            [b, c, a],
            [c, a, b],
            [c, b, a],
        ];
        for order in orders {
            let mut tracker = ItemTracker::new([a, b, c]);
            let completions = order
                .iter()
                .chain(order.iter())
                .filter(|&&label| tracker.item_found(label) == FoundOutcome::Completed)
                .count();
            assert_eq!(completions, 1);
            assert_eq!(tracker.state(), CompletionState::Won);
        }
    }

    #[test]
    fn test_duplicate_labels_collapse() {
        let [a, b, _] = labels();
        let tracker = ItemTracker::new([a, b, a]);
        assert_eq!(tracker.remaining_items(), 2);
    }

    #[test]
    fn test_countdown_expires_before_last_item() {
        let [a, b, c] = labels();
        let mut tracker = ItemTracker::new([a, b, c]).with_countdown(Duration::from_secs(10));

        tracker.item_found(a);
        tracker.item_found(b);
        assert_eq!(tracker.tick(Duration::from_secs_f32(10.1)), Some(CompletionState::Lost));
        assert_eq!(tracker.state(), CompletionState::Lost);
        assert_eq!(tracker.remaining_secs(), Some(0.0));

        assert_eq!(tracker.item_found(c), FoundOutcome::Ignored);
        assert_eq!(tracker.state(), CompletionState::Lost);
        assert_eq!(tracker.remaining_items(), 1);

        // Terminal: no further ticks report anything
        assert_eq!(tracker.tick(Duration::from_secs(1)), None);
    }

    #[test]
    fn test_win_halts_countdown() {
        let [a, _, _] = labels();
        let mut tracker = ItemTracker::new([a]).with_countdown(Duration::from_secs(5));
        tracker.tick(Duration::from_secs(2));
        assert_eq!(tracker.item_found(a), FoundOutcome::Completed);

        assert_eq!(tracker.tick(Duration::from_secs(10)), None);
        assert_eq!(tracker.state(), CompletionState::Won);
        assert_eq!(tracker.remaining_secs(), Some(3.0));
    }

    #[test]
    fn test_countdown_decreases_while_in_progress() {
        let [a, _, _] = labels();
        let mut tracker = ItemTracker::new([a]).with_countdown(Duration::from_secs(4));
        assert_eq!(tracker.remaining_secs(), Some(4.0));
        assert_eq!(tracker.tick(Duration::from_secs(1)), None);
        assert_eq!(tracker.remaining_secs(), Some(3.0));
    }

    #[test]
    fn test_no_countdown_never_loses() {
        let [a, _, _] = labels();
        let mut tracker = ItemTracker::new([a]);
        assert!(!tracker.has_countdown());
        assert_eq!(tracker.tick(Duration::from_secs(1000)), None);
        assert_eq!(tracker.remaining_secs(), None);
        assert_eq!(tracker.state(), CompletionState::InProgress);
    }
}
