mod api;
mod defaults;
mod validation;

use crate::cli::Args;
use crate::session::FilesystemSessionStore;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

pub use api::ApiConfig;
pub use defaults::{default_api_url, default_timeout_secs};
pub use validation::{expand_with, parse_flag};

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct SessionConfig {
    #[serde(default)]
    pub verbose: Option<bool>,
    #[serde(default)]
    pub path: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct FileConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub session: SessionConfig,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub api_url: String,
    pub timeout_secs: u64,
    pub verbose: bool,
    pub session_path: PathBuf,
}

impl Config {
    pub fn from_env_and_args(args: &Args) -> Result<Self> {
        let file_config = FileConfig::load()?;
        Self::from_sources(args, file_config, |name| env::var(name).ok())
    }

    /// Precedence for every setting: CLI flag > environment > config file > default.
    pub fn from_sources(
        args: &Args,
        file_config: FileConfig,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Self> {
        let api_url = args
            .api_url
            .clone()
            .or_else(|| env("TICKETDESK_API_URL"))
            .or(file_config.api.base_url)
            .map(|url| expand_with(&url, &env))
            .unwrap_or_else(default_api_url);

        let timeout_secs = env("TICKETDESK_TIMEOUT")
            .and_then(|s| s.trim().parse::<u64>().ok())
            .or(file_config.api.timeout_secs)
            .filter(|secs| *secs > 0)
            .unwrap_or_else(default_timeout_secs);

        let verbose = args.verbose
            || env("TICKETDESK_VERBOSE")
                .map(|v| parse_flag(&v))
                .or(file_config.session.verbose)
                .unwrap_or(false);

        let session_path = match env("TICKETDESK_SESSION_FILE").or(file_config.session.path) {
            Some(path) => PathBuf::from(expand_with(&path, &env)),
            None => FilesystemSessionStore::default_path()
                .context("Could not determine where to keep the session file")?,
        };

        Ok(Config {
            api_url,
            timeout_secs,
            verbose,
            session_path,
        })
    }
}

impl FileConfig {
    /// First config file found wins; no file at all means defaults.
    pub fn load() -> Result<Self> {
        for path in Self::get_config_paths() {
            if path.exists() {
                return Self::load_from(&path);
            }
        }
        Ok(FileConfig::default())
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let is_yaml = matches!(
            path.extension().and_then(|s| s.to_str()),
            Some("yaml") | Some("yml")
        );
        let config = if is_yaml {
            serde_yaml::from_str(&contents)
                .with_context(|| format!("Failed to parse YAML config file: {}", path.display()))?
        } else {
            serde_json::from_str(&contents)
                .with_context(|| format!("Failed to parse JSON config file: {}", path.display()))?
        };
        Ok(config)
    }

    pub fn get_config_paths() -> Vec<PathBuf> {
        let mut paths = vec![
            PathBuf::from(".ticketdesk.yaml"),
            PathBuf::from(".ticketdesk.yml"),
            PathBuf::from(".ticketdesk.json"),
        ];

        if let Some(home_dir) = dirs::home_dir() {
            let config_dir = home_dir.join(".config").join("ticketdesk");
            paths.push(config_dir.join("ticketdesk.yaml"));
            paths.push(config_dir.join("ticketdesk.yml"));
            paths.push(config_dir.join("ticketdesk.json"));
        }

        paths
    }
}
