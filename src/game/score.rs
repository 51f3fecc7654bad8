/// Score needed per speed step
pub const SPEED_STEP_SCORE: u32 = 50;
/// Ticks per second added at each step
pub const SPEED_INCREMENT: u32 = 2;
/// Upper bound for the tick rate
pub const MAX_TICK_RATE: u32 = 30;

/// Current round's score and the tick rate it drives
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreTracker {
    score: u32,
    tick_rate: u32,
}

impl ScoreTracker {
    pub fn new(base_rate: u32) -> Self {
        Self {
            score: 0,
            tick_rate: base_rate,
        }
    }

    /// Start a new round at the difficulty's base rate
    pub fn reset(&mut self, base_rate: u32) {
        self.score = 0;
        self.tick_rate = base_rate;
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn tick_rate(&self) -> u32 {
        self.tick_rate
    }

    /// Add points. When the new score is a multiple of 50 the game speeds up
    /// by 2 ticks/s, capped at 30. Returns the new rate if it changed.
    pub fn award(&mut self, points: u32) -> Option<u32> {
        self.score = self.score.saturating_add(points);
        if self.score % SPEED_STEP_SCORE != 0 {
            return None;
        }

        let rate = self
            .tick_rate
            .saturating_add(SPEED_INCREMENT)
            .min(MAX_TICK_RATE);
        if rate == self.tick_rate {
            return None;
        }
        self.tick_rate = rate;
        Some(rate)
    }

    #[cfg(test)]
    pub(crate) fn set_score(&mut self, score: u32) {
        self.score = score;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_award_accumulates() {
        let mut tracker = ScoreTracker::new(15);
        assert_eq!(tracker.award(10), None);
        assert_eq!(tracker.award(20), None);
        assert_eq!(tracker.score(), 30);
        assert_eq!(tracker.tick_rate(), 15);
    }

    #[test]
    fn test_reaching_fifty_speeds_up() {
        let mut tracker = ScoreTracker::new(15);
        tracker.set_score(40);
        assert_eq!(tracker.award(10), Some(17));
        assert_eq!(tracker.score(), 50);
    }

    #[test]
    fn test_only_exact_multiples_speed_up() {
        let mut tracker = ScoreTracker::new(10);
        tracker.set_score(40);
        assert_eq!(tracker.award(10), Some(12));
        assert_eq!(tracker.award(10), None);
        assert_eq!(tracker.tick_rate(), 12);
    }

    #[test]
    fn test_jumping_over_multiple_keeps_rate() {
        let mut tracker = ScoreTracker::new(10);
        tracker.set_score(40);
        assert_eq!(tracker.award(20), None);
        assert_eq!(tracker.score(), 60);
        assert_eq!(tracker.tick_rate(), 10);

        tracker.set_score(45);
        assert_eq!(tracker.award(10), None);
        assert_eq!(tracker.tick_rate(), 10);
    }

    #[test]
    fn test_special_food_landing_on_multiple() {
        let mut tracker = ScoreTracker::new(15);
        tracker.set_score(50);
        assert_eq!(tracker.award(50), Some(17));
    }

    #[test]
    fn test_rate_is_capped() {
        let mut tracker = ScoreTracker::new(29);
        tracker.set_score(40);
        assert_eq!(tracker.award(10), Some(30));
        tracker.set_score(90);
        assert_eq!(tracker.award(10), None);
        assert_eq!(tracker.tick_rate(), MAX_TICK_RATE);
    }

    #[test]
    fn test_reset() {
        let mut tracker = ScoreTracker::new(20);
        tracker.award(100);
        tracker.reset(10);
        assert_eq!(tracker.score(), 0);
        assert_eq!(tracker.tick_rate(), 10);
    }
}
