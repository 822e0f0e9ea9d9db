use crate::consts;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// A single row of the leaderboard
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub(crate) struct ScoreEntry {
    pub(crate) name: String,
    pub(crate) score: u32,
    pub(crate) date: NaiveDate,
}

impl ScoreEntry {
    /// Create a new entry, truncating `name` to
    /// [`MAX_NAME_LENGTH`][consts::MAX_NAME_LENGTH] characters
    pub(crate) fn new(name: &str, score: u32, date: NaiveDate) -> ScoreEntry {
        ScoreEntry {
            name: name.chars().take(consts::MAX_NAME_LENGTH).collect(),
            score,
            date,
        }
    }
}

/// The top scores, best first, holding at most
/// [`MAX_HIGH_SCORES`][consts::MAX_HIGH_SCORES] entries
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(transparent)]
pub(crate) struct Leaderboard(Vec<ScoreEntry>);

impl Leaderboard {
    pub(crate) fn entries(&self) -> &[ScoreEntry] {
        &self.0
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Whether `score` would earn a place on the leaderboard.  A score that
    /// only ties the lowest entry of a full board does not qualify.
    pub(crate) fn qualifies(&self, score: u32) -> bool {
        self.0.len() < consts::MAX_HIGH_SCORES || self.0.last().is_none_or(|e| score > e.score)
    }

    /// Add `entry` to the leaderboard if it qualifies, keeping the board
    /// sorted & capped.  Returns whether the entry was added.
    pub(crate) fn submit(&mut self, entry: ScoreEntry) -> bool {
        if !self.qualifies(entry.score) {
            return false;
        }
        self.0.push(entry);
        self.0.sort_by(|a, b| b.score.cmp(&a.score));
        self.0.truncate(consts::MAX_HIGH_SCORES);
        true
    }

    /// Sort & cap entries read from disk, in case the file was edited by
    /// hand
    fn normalize(mut self) -> Leaderboard {
        self.0.sort_by(|a, b| b.score.cmp(&a.score));
        self.0.truncate(consts::MAX_HIGH_SCORES);
        self
    }

    pub(crate) fn load(path: &Path) -> Result<Leaderboard, LoadError> {
        let src = match fs_err::read(path) {
            Ok(src) => src,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Ok(Leaderboard::default())
            }
            Err(e) => return Err(LoadError::read(e)),
        };
        serde_json::from_slice::<Leaderboard>(&src)
            .map(Leaderboard::normalize)
            .map_err(LoadError::deserialize)
    }

    pub(crate) fn save(&self, path: &Path) -> Result<(), SaveError> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs_err::create_dir_all(parent).map_err(SaveError::mkdir)?;
        }
        let mut src = serde_json::to_string_pretty(self).map_err(SaveError::serialize)?;
        src.push('\n');
        fs_err::write(path, &src).map_err(SaveError::write)?;
        Ok(())
    }
}

/// Handle on the on-disk leaderboard.
///
/// Every failure to read or write the file is logged and otherwise
/// swallowed: an unreadable file acts like an empty leaderboard, and an
/// unwritable one silently drops new scores.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub(crate) struct HighScoreStore {
    /// `None` if saving is disabled or no default location could be
    /// determined
    path: Option<PathBuf>,
}

impl HighScoreStore {
    pub(crate) fn new(path: Option<PathBuf>) -> HighScoreStore {
        HighScoreStore { path }
    }

    /// Return the default high-scores file path
    pub(crate) fn default_path() -> Option<PathBuf> {
        dirs::data_local_dir().map(|p| p.join("hazardsnake").join("highscores.json"))
    }

    pub(crate) fn load(&self) -> Leaderboard {
        let Some(path) = self.path.as_deref() else {
            return Leaderboard::default();
        };
        match Leaderboard::load(path) {
            Ok(board) => board,
            Err(e) => {
                log::warn!("{e}: {}", error_chain(&e));
                Leaderboard::default()
            }
        }
    }

    /// Record a final score for `name`, dated today.  Returns whether the
    /// score made it onto the leaderboard.  Always false when the store is
    /// disabled.
    pub(crate) fn save_score(&self, name: &str, score: u32) -> bool {
        self.save_score_on(name, score, chrono::Local::now().date_naive())
    }

    fn save_score_on(&self, name: &str, score: u32, date: NaiveDate) -> bool {
        let Some(path) = self.path.as_deref() else {
            log::info!("High-score file disabled; not saving score {score} for {name:?}");
            return false;
        };
        let mut board = self.load();
        if !board.submit(ScoreEntry::new(name, score, date)) {
            return false;
        }
        match board.save(path) {
            Ok(()) => log::info!("Saved score {score} for {name:?} to {}", path.display()),
            Err(e) => log::warn!("{e}: {}", error_chain(&e)),
        }
        true
    }
}

/// Join the messages of an error's sources into a single line
fn error_chain(e: &dyn std::error::Error) -> String {
    let mut msgs = Vec::new();
    let mut source = e.source();
    while let Some(src) = source {
        msgs.push(src.to_string());
        source = src.source();
    }
    msgs.join(": ")
}

#[derive(Debug, Error)]
#[error("Failed to save high scores to disk")]
pub(crate) struct SaveError(#[source] SaveErrorSource);

impl SaveError {
    fn mkdir(e: std::io::Error) -> Self {
        SaveError(SaveErrorSource::Mkdir(e))
    }

    fn serialize(e: serde_json::Error) -> Self {
        SaveError(SaveErrorSource::Serialize(e))
    }

    fn write(e: std::io::Error) -> Self {
        SaveError(SaveErrorSource::Write(e))
    }
}

#[derive(Debug, Error)]
enum SaveErrorSource {
    #[error("failed to create parent directories")]
    Mkdir(#[source] std::io::Error),
    #[error("failed to serialize high scores")]
    Serialize(#[source] serde_json::Error),
    #[error("failed to write high scores to disk")]
    Write(#[source] std::io::Error),
}

#[derive(Debug, Error)]
#[error("Failed to read high scores from disk")]
pub(crate) struct LoadError(#[source] LoadErrorSource);

impl LoadError {
    fn read(e: std::io::Error) -> Self {
        LoadError(LoadErrorSource::Read(e))
    }

    fn deserialize(e: serde_json::Error) -> Self {
        LoadError(LoadErrorSource::Deserialize(e))
    }
}

#[derive(Debug, Error)]
enum LoadErrorSource {
    #[error("failed to read high scores file")]
    Read(#[source] std::io::Error),
    #[error("failed to deserialize high scores")]
    Deserialize(#[source] serde_json::Error),
}
