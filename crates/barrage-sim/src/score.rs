//! Running score and the process-wide high score.

/// Best score seen by this process. Seeded once at startup and only raised
/// through `ScoreState`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HighScore(u64);

impl HighScore {
    pub fn new(initial: u64) -> Self {
        Self(initial)
    }

    pub fn get(&self) -> u64 {
        self.0
    }

    fn offer(&mut self, score: u64) -> bool {
        if score > self.0 {
            self.0 = score;
            true
        } else {
            false
        }
    }
}

/// Score for the current game plus the high score, which outlives games.
#[derive(Debug, Clone, Default)]
pub struct ScoreState {
    score: u64,
    high_score: HighScore,
}

impl ScoreState {
    pub fn new(high_score: HighScore) -> Self {
        Self {
            score: 0,
            high_score,
        }
    }

    pub fn score(&self) -> u64 {
        self.score
    }

    pub fn high_score(&self) -> u64 {
        self.high_score.get()
    }

    /// Add points, raising the high score when it is exceeded.
    pub(crate) fn add(&mut self, points: u64) {
        self.score += points;
        self.high_score.offer(self.score);
    }

    /// Start a new game. The high score is kept.
    pub(crate) fn reset(&mut self) {
        self.score = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn high_score_follows_score() {
        let mut state = ScoreState::new(HighScore::new(25));
        state.add(10);
        assert_eq!(state.score(), 10);
        assert_eq!(state.high_score(), 25);
        state.add(20);
        assert_eq!(state.high_score(), 30);

        state.reset();
        assert_eq!(state.score(), 0);
        assert_eq!(state.high_score(), 30, "high score survives a new game");
    }
}
