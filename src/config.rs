//! Runtime configuration from environment variables
//!
//! | Variable          | Meaning                                   | Default        |
//! |-------------------|-------------------------------------------|----------------|
//! | `TILEROW_WORDS`   | word-list file, one word per line         | embedded list  |
//! | `TILEROW_DRAW`    | `weighted` or `uniform`                   | `weighted`     |
//! | `TILEROW_SEED`    | u64 seed for reproducible draws           | entropy        |
//! | `TILEROW_LAYOUT`  | 12 comma-separated bonus names            | standard row   |
//! | `TILEROW_LOG_DIR` | directory for log files                   | no logging     |
//! | `TILEROW_LOG`     | log level spec                            | `info`         |

use crate::app::SessionOptions;
use crate::game::board::{Bonus, BOARD_LEN, BONUSES, STANDARD_LAYOUT};
use crate::game::dictionary::{Dictionary, EmbeddedWordList, FileWordList};
use crate::game::DrawPolicy;
use std::path::PathBuf;
use std::sync::Arc;

pub const ENV_WORDS: &str = "TILEROW_WORDS";
pub const ENV_DRAW: &str = "TILEROW_DRAW";
pub const ENV_SEED: &str = "TILEROW_SEED";
pub const ENV_LAYOUT: &str = "TILEROW_LAYOUT";
pub const ENV_LOG_DIR: &str = "TILEROW_LOG_DIR";
pub const ENV_LOG: &str = "TILEROW_LOG";

/// Default log level spec
pub const DEFAULT_LOG_SPEC: &str = "info";

/// Errors from reading configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Unknown draw policy name
    InvalidDrawPolicy(String),
    /// Seed is not a u64
    InvalidSeed(String),
    /// Layout is not 12 known bonus names
    InvalidLayout(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::InvalidDrawPolicy(value) => write!(
                f,
                "{}: unknown draw policy {:?} (use weighted or uniform)",
                ENV_DRAW, value
            ),
            ConfigError::InvalidSeed(value) => {
                write!(f, "{}: {:?} is not a number", ENV_SEED, value)
            }
            ConfigError::InvalidLayout(reason) => write!(f, "{}: {}", ENV_LAYOUT, reason),
        }
    }
}

impl std::error::Error for ConfigError {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub words_path: Option<PathBuf>,
    pub draw_policy: DrawPolicy,
    pub seed: Option<u64>,
    pub layout: [Bonus; BOARD_LEN],
    pub log_dir: Option<PathBuf>,
    pub log_spec: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            words_path: None,
            draw_policy: DrawPolicy::default(),
            seed: None,
            layout: STANDARD_LAYOUT,
            log_dir: None,
            log_spec: DEFAULT_LOG_SPEC.to_string(),
        }
    }
}

impl Config {
    /// Read configuration from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read configuration through `lookup`; unset or blank values keep defaults
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        let mut config = Config::default();

        if let Some(path) = get(ENV_WORDS) {
            config.words_path = Some(PathBuf::from(path));
        }
        if let Some(value) = get(ENV_DRAW) {
            config.draw_policy =
                DrawPolicy::parse(&value).ok_or(ConfigError::InvalidDrawPolicy(value))?;
        }
        if let Some(value) = get(ENV_SEED) {
            let seed = value
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidSeed(value.clone()))?;
            config.seed = Some(seed);
        }
        if let Some(value) = get(ENV_LAYOUT) {
            config.layout = parse_layout(&value)?;
        }
        if let Some(dir) = get(ENV_LOG_DIR) {
            config.log_dir = Some(PathBuf::from(dir));
        }
        if let Some(spec) = get(ENV_LOG) {
            config.log_spec = spec;
        }
        Ok(config)
    }

    /// The word list this configuration points at
    pub fn dictionary(&self) -> Arc<dyn Dictionary> {
        match &self.words_path {
            Some(path) => {
                let words = FileWordList::new(path.clone());
                log::info!("using word list {}", words.path().display());
                Arc::new(words)
            }
            None => Arc::new(EmbeddedWordList),
        }
    }

    pub fn session_options(&self) -> SessionOptions {
        SessionOptions {
            layout: self.layout,
            dictionary: self.dictionary(),
            draw_policy: self.draw_policy,
            seed: self.seed,
        }
    }
}

/// Parse a comma-separated list of exactly 12 bonus names
pub fn parse_layout(value: &str) -> Result<[Bonus; BOARD_LEN], ConfigError> {
    let names: Vec<&str> = value.split(',').collect();
    if names.len() != BOARD_LEN {
        return Err(ConfigError::InvalidLayout(format!(
            "expected {} squares, got {}",
            BOARD_LEN,
            names.len()
        )));
    }

    let mut layout = [Bonus::Plain; BOARD_LEN];
    for (square, name) in layout.iter_mut().zip(names) {
        *square = Bonus::parse(name).ok_or_else(|| {
            let known: Vec<&str> = BONUSES.iter().map(Bonus::label).collect();
            ConfigError::InvalidLayout(format!(
                "unknown bonus {:?} (use {})",
                name.trim(),
                known.join(", ")
            ))
        })?;
    }
    Ok(layout)
}
