use crate::game::Level;
use crate::highscores::HighScoreStore;
use crate::options::Speed;
use std::time::Duration;

/// Progress through the levels of a single play-through
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct Run {
    /// Player name with surrounding whitespace removed; empty for anonymous
    /// play
    player: String,
    speed: Speed,
    level: Level,

    /// Sum of the scores of every finished level attempt
    total_score: u32,

    /// Score of the most recently finished level attempt, removed again
    /// from `total_score` if the level is retried
    last_level_score: u32,
}

/// What happens after a level has been cleared
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum LevelOutcome {
    /// The run moves on to the next level
    Advanced,

    /// The last level was cleared.  `saved` is true if the final score made
    /// it onto the leaderboard.
    Won { saved: bool },
}

impl Run {
    pub(crate) fn new(player: &str, speed: Speed) -> Run {
        Run {
            player: player.trim().to_owned(),
            speed,
            level: Level::One,
            total_score: 0,
            last_level_score: 0,
        }
    }

    pub(crate) fn player(&self) -> &str {
        &self.player
    }

    pub(crate) fn is_anonymous(&self) -> bool {
        self.player.is_empty()
    }

    pub(crate) fn level(&self) -> Level {
        self.level
    }

    pub(crate) fn total_score(&self) -> u32 {
        self.total_score
    }

    /// Time between ticks on the current level at the chosen speed
    pub(crate) fn interval(&self) -> Duration {
        self.speed.scale(self.level.config().base_interval)
    }

    /// Record that the current level was cleared with `score` points
    pub(crate) fn complete_level(&mut self, score: u32, scores: &HighScoreStore) -> LevelOutcome {
        self.record(score);
        match self.level.next() {
            Some(next) => {
                self.level = next;
                LevelOutcome::Advanced
            }
            None => LevelOutcome::Won {
                saved: self.submit(scores),
            },
        }
    }

    /// Record that the snake crashed on the current level with `score`
    /// points.  Returns true if the run's total made it onto the
    /// leaderboard.
    pub(crate) fn fail_level(&mut self, score: u32, scores: &HighScoreStore) -> bool {
        self.record(score);
        self.submit(scores)
    }

    /// Take back the score of the last finished attempt so that the current
    /// level can be played again
    pub(crate) fn retry(&mut self) {
        self.total_score = self.total_score.saturating_sub(self.last_level_score);
        self.last_level_score = 0;
    }

    fn record(&mut self, score: u32) {
        self.total_score = self.total_score.saturating_add(score);
        self.last_level_score = score;
    }

    fn submit(&self, scores: &HighScoreStore) -> bool {
        if self.is_anonymous() {
            log::info!("Anonymous run finished with {} points", self.total_score);
            false
        } else {
            scores.save_score(&self.player, self.total_score)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn store(tmpdir: &tempfile::TempDir) -> HighScoreStore {
        HighScoreStore::new(Some(tmpdir.path().join("scores.json")))
    }

    #[test]
    fn name_is_trimmed() {
        let run = Run::new("  ada \t", Speed::Normal);
        assert_eq!(run.player(), "ada");
        assert!(!run.is_anonymous());
        assert!(Run::new("   ", Speed::Normal).is_anonymous());
    }

    #[rstest]
    #[case(Speed::Slow, 240)]
    #[case(Speed::Normal, 150)]
    #[case(Speed::Fast, 90)]
    fn first_level_interval(#[case] speed: Speed, #[case] ms: u64) {
        let run = Run::new("ada", speed);
        assert_eq!(run.interval(), Duration::from_millis(ms));
    }

    #[test]
    fn full_run() {
        let tmpdir = tempfile::tempdir().unwrap();
        let scores = store(&tmpdir);
        let mut run = Run::new("ada", Speed::Fast);
        assert_eq!(run.complete_level(150, &scores), LevelOutcome::Advanced);
        assert_eq!(run.level(), Level::Two);
        assert_eq!(run.interval(), Duration::from_millis(78));
        assert_eq!(run.complete_level(300, &scores), LevelOutcome::Advanced);
        assert_eq!(run.level(), Level::Three);
        assert_eq!(
            run.complete_level(450, &scores),
            LevelOutcome::Won { saved: true }
        );
        assert_eq!(run.total_score(), 900);
        let board = scores.load();
        let rows = board
            .entries()
            .iter()
            .map(|e| (e.name.as_str(), e.score))
            .collect::<Vec<_>>();
        assert_eq!(rows, [("ada", 900)]);
    }

    #[test]
    fn retry_after_crash() {
        let tmpdir = tempfile::tempdir().unwrap();
        let scores = store(&tmpdir);
        let mut run = Run::new("ada", Speed::Normal);
        assert_eq!(run.complete_level(150, &scores), LevelOutcome::Advanced);
        assert!(run.fail_level(60, &scores));
        assert_eq!(run.total_score(), 210);
        run.retry();
        assert_eq!(run.total_score(), 150);
        assert_eq!(run.level(), Level::Two);
        run.retry();
        assert_eq!(run.total_score(), 150);
    }

    #[test]
    fn anonymous_runs_are_not_saved() {
        let tmpdir = tempfile::tempdir().unwrap();
        let scores = store(&tmpdir);
        let mut run = Run::new("", Speed::Normal);
        assert!(!run.fail_level(40, &scores));
        assert!(scores.load().is_empty());
    }
}
