use crate::highscores::HighScoreStore;
use crate::options::Speed;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Program configuration read from a configuration file
#[derive(Clone, Deserialize, Debug, Default, Eq, PartialEq)]
pub(crate) struct Config {
    /// Defaults for the main menu
    #[serde(default)]
    pub(crate) game: GameConfig,

    /// Settings about data files
    #[serde(default)]
    pub(crate) files: FileConfig,
}

impl Config {
    /// Return the default configuration file path
    pub(crate) fn default_path() -> Result<PathBuf, ConfigError> {
        dirs::config_local_dir()
            .map(|p| p.join("hazardsnake").join("config.toml"))
            .ok_or(ConfigError::NoPath)
    }

    /// Read configuration from a file on disk.  If the file does not exist and
    /// `allow_missing` is true, a default `Config` value is returned.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the file could not be read or if the file's contents
    /// could not be deserialized.
    pub(crate) fn load(path: &Path, allow_missing: bool) -> Result<Config, ConfigError> {
        let content = match fs_err::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound && allow_missing => {
                return Ok(Config::default())
            }
            Err(e) => return Err(ConfigError::Read(e)),
        };
        toml::from_str(&content).map_err(Into::into)
    }

    /// Load the configuration from `path` if given, or else from the default
    /// path if a file exists there
    pub(crate) fn load_from(path: Option<&Path>) -> Result<Config, ConfigError> {
        match path {
            Some(p) => Config::load(p, false),
            None => Config::load(&Config::default_path()?, true),
        }
    }

    /// Return a handle on the high-scores file described by the
    /// configuration
    pub(crate) fn high_score_store(&self) -> HighScoreStore {
        let path = if self.files.save_high_scores {
            self.files
                .high_scores_file
                .clone()
                .or_else(HighScoreStore::default_path)
        } else {
            None
        };
        HighScoreStore::new(path)
    }
}

#[derive(Clone, Deserialize, Debug, Default, Eq, PartialEq)]
#[serde(default, rename_all = "kebab-case")]
pub(crate) struct GameConfig {
    /// Speed initially selected in the main menu
    pub(crate) speed: Speed,

    /// Name initially entered in the main menu
    pub(crate) player_name: Option<String>,
}

#[derive(Clone, Deserialize, Debug, Eq, PartialEq)]
#[serde(default, rename_all = "kebab-case")]
pub(crate) struct FileConfig {
    /// Path at which high scores should be stored
    pub(crate) high_scores_file: Option<PathBuf>,

    /// Whether to load & save high scores in a file
    pub(crate) save_high_scores: bool,

    /// File to append log messages to; logging is off if unset
    pub(crate) log_file: Option<PathBuf>,
}

impl Default for FileConfig {
    fn default() -> FileConfig {
        FileConfig {
            high_scores_file: None,
            save_high_scores: true,
            log_file: None,
        }
    }
}

#[derive(Debug, Error)]
pub(crate) enum ConfigError {
    #[error("failed to determine path to local configuration directory")]
    NoPath,
    #[error("failed to read configuration file")]
    Read(#[from] std::io::Error),
    #[error("failed to parse configuration file")]
    Parse(#[from] toml::de::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn parse_full() {
        let cfg: Config = toml::from_str(concat!(
            "[game]\n",
            "speed = \"slow\"\n",
            "player-name = \"ada\"\n",
            "\n",
            "[files]\n",
            "high-scores-file = \"/tmp/scores.json\"\n",
            "save-high-scores = false\n",
            "log-file = \"/tmp/hazardsnake.log\"\n",
        ))
        .unwrap();
        assert_eq!(
            cfg,
            Config {
                game: GameConfig {
                    speed: Speed::Slow,
                    player_name: Some(String::from("ada")),
                },
                files: FileConfig {
                    high_scores_file: Some(PathBuf::from("/tmp/scores.json")),
                    save_high_scores: false,
                    log_file: Some(PathBuf::from("/tmp/hazardsnake.log")),
                },
            }
        );
    }

    #[test]
    fn parse_empty() {
        let cfg: Config = toml::from_str("").unwrap();
        assert_eq!(cfg, Config::default());
        assert!(cfg.files.save_high_scores);
    }

    #[test]
    fn unknown_speed_is_an_error() {
        let r = toml::from_str::<Config>("[game]\nspeed = \"ludicrous\"\n");
        assert!(r.is_err());
    }

    #[test]
    fn missing_file() {
        let tmpdir = tempfile::tempdir().unwrap();
        let path = tmpdir.path().join("config.toml");
        assert_eq!(Config::load(&path, true).unwrap(), Config::default());
        assert!(matches!(
            Config::load(&path, false),
            Err(ConfigError::Read(_))
        ));
    }

    #[test]
    fn unparseable_file() {
        let tmpdir = tempfile::tempdir().unwrap();
        let path = tmpdir.path().join("config.toml");
        fs_err::write(&path, "[game\n").unwrap();
        assert!(matches!(
            Config::load(&path, true),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn disabled_high_scores() {
        let mut cfg = Config::default();
        cfg.files.save_high_scores = false;
        cfg.files.high_scores_file = Some(PathBuf::from("/tmp/scores.json"));
        assert_eq!(cfg.high_score_store(), HighScoreStore::new(None));
    }

    #[test]
    fn explicit_high_scores_file() {
        let mut cfg = Config::default();
        cfg.files.high_scores_file = Some(PathBuf::from("/tmp/scores.json"));
        assert_eq!(
            cfg.high_score_store(),
            HighScoreStore::new(Some(PathBuf::from("/tmp/scores.json")))
        );
    }
}
