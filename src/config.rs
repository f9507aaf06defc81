use crate::error::{BumpError, Result};
use crate::git::Git2Repository;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// File name looked up in the working directory and the user config directory
pub const CONFIG_FILE_NAME: &str = "treebump.toml";

/// Represents the complete configuration for treebump.
///
/// Contains the default checkout location, commit identity, and logging options.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
pub struct Config {
    /// Checkout to operate on when `--repo` is not given
    #[serde(default)]
    pub work_dir: Option<PathBuf>,

    #[serde(default)]
    pub commit: CommitConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Identity used for the bump commit.
///
/// The two fields go together. When both are unset the checkout's own
/// `user.name` and `user.email` are used.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
pub struct CommitConfig {
    #[serde(default)]
    pub author_name: Option<String>,

    #[serde(default)]
    pub author_email: Option<String>,
}

fn default_log_level() -> String {
    "info".to_string()
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct LoggingConfig {
    /// Filter directive used when `RUST_LOG` is not set
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        LoggingConfig {
            level: default_log_level(),
        }
    }
}

impl Config {
    /// Reject settings that cannot be honoured as written
    pub fn validate(&self) -> Result<()> {
        if self.commit.author_name.is_some() != self.commit.author_email.is_some() {
            return Err(BumpError::config(
                "commit.author_name and commit.author_email must be set together",
            ));
        }
        Ok(())
    }

    /// Build the git collaborator that signs with the configured identity
    pub fn repository(&self) -> Git2Repository {
        match (&self.commit.author_name, &self.commit.author_email) {
            (Some(name), Some(email)) => Git2Repository::with_author(name, email),
            _ => Git2Repository::new(),
        }
    }
}

/// Loads configuration from file or returns defaults.
///
/// Attempts to load configuration in the following order:
/// 1. Custom path provided as parameter
/// 2. `treebump.toml` in current directory
/// 3. `treebump.toml` in the user config directory
/// 4. Default configuration if no file found
///
/// # Arguments
/// * `config_path` - Optional path to custom configuration file
///
/// # Returns
/// * `Ok(Config)` - Loaded or default configuration
/// * `Err` - If file exists but cannot be read, parsed, or validated
pub fn load_config(config_path: Option<&Path>) -> Result<Config> {
    let path = match config_path {
        Some(path) => path.to_path_buf(),
        None => match find_config_file() {
            Some(path) => path,
            None => return Ok(Config::default()),
        },
    };

    let config_str = fs::read_to_string(&path).map_err(|e| {
        BumpError::config(format!("Cannot read {}: {}", path.display(), e))
    })?;
    let config: Config = toml::from_str(&config_str)
        .map_err(|e| BumpError::config(format!("Cannot parse {}: {}", path.display(), e)))?;
    config.validate()?;

    Ok(config)
}

fn find_config_file() -> Option<PathBuf> {
    let local = Path::new(".").join(CONFIG_FILE_NAME);
    if local.exists() {
        return Some(local);
    }

    dirs::config_dir()
        .map(|dir| dir.join(CONFIG_FILE_NAME))
        .filter(|path| path.exists())
}
