use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tictactoe_common::ConfigError;
use tictactoe_common::config::{ConfigManager, FileContentConfigProvider, Validate, YamlConfigSerializer};
use tictactoe_common::games::tictactoe::Player;

const CONFIG_FILE_NAME: &str = "tictactoe_config.yaml";
const MAX_BOT_DELAY_MS: u64 = 10_000;

fn get_config_path() -> PathBuf {
    if let Ok(exe_path) = std::env::current_exe()
        && let Some(exe_dir) = exe_path.parent()
    {
        return exe_dir.join(CONFIG_FILE_NAME);
    }
    PathBuf::from(CONFIG_FILE_NAME)
}

pub fn get_config_manager(
    path: Option<&Path>,
) -> ConfigManager<FileContentConfigProvider, Config, YamlConfigSerializer> {
    match path {
        Some(path) => ConfigManager::from_yaml_file(path),
        None => ConfigManager::from_yaml_file(get_config_path()),
    }
}

#[derive(Debug, PartialEq, Serialize, Deserialize, Clone)]
pub struct Config {
    /// Mark played from stdin; `None` lets minimax play both sides.
    #[serde(default = "default_human")]
    pub human: Option<Player>,
    #[serde(default)]
    pub show_evaluation: bool,
    #[serde(default)]
    pub log_prefix: Option<String>,
    #[serde(default)]
    pub bot_delay_ms: u64,
}

fn default_human() -> Option<Player> {
    Some(Player::X)
}

impl Validate for Config {
    fn validate(&self) -> Result<(), ConfigError> {
        if self.bot_delay_ms > MAX_BOT_DELAY_MS {
            return Err(ConfigError::Validation(format!(
                "bot_delay_ms ({}) cannot exceed {}",
                self.bot_delay_ms, MAX_BOT_DELAY_MS
            )));
        }
        if let Some(prefix) = &self.log_prefix
            && prefix.trim().is_empty()
        {
            return Err(ConfigError::Validation(
                "log_prefix must not be blank".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            human: default_human(),
            show_evaluation: false,
            log_prefix: None,
            bot_delay_ms: 0,
        }
    }
}
