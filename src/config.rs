use anyhow::{Context, Result};
use serde::Deserialize;
use std::env;

use crate::game::MAX_PLAYERS;

/// Free dictionary API; a word is valid when `{url}/{word}` answers 2xx
pub const DEFAULT_DICTIONARY_API_URL: &str = "https://api.dictionaryapi.dev/api/v2/entries/en";

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub dictionary: DictionaryConfig,
    pub game: GameConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub frontend_dir: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DictionaryConfig {
    pub api_url: String,
    pub timeout_secs: u64,
    /// Local word list to use instead of the remote API
    pub word_list_path: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GameConfig {
    pub max_players: usize,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_source(|key| env::var(key).ok())
    }

    /// Build the configuration from any key lookup (the environment in
    /// production, a map in tests)
    pub fn from_source<F>(get: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let server = ServerConfig {
            host: get("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port: get("PORT")
                .unwrap_or_else(|| "3000".to_string())
                .parse()
                .context("PORT must be a number")?,
            frontend_dir: get("FRONTEND_DIR").unwrap_or_else(|| "../frontend".to_string()),
        };

        let dictionary = DictionaryConfig {
            api_url: get("DICTIONARY_API_URL")
                .unwrap_or_else(|| DEFAULT_DICTIONARY_API_URL.to_string()),
            timeout_secs: get("DICTIONARY_TIMEOUT_SECS")
                .unwrap_or_else(|| "30".to_string())
                .parse()
                .context("DICTIONARY_TIMEOUT_SECS must be a number")?,
            word_list_path: get("DICTIONARY_PATH").filter(|path| !path.trim().is_empty()),
        };

        let game = GameConfig {
            max_players: get("MAX_PLAYERS")
                .unwrap_or_else(|| MAX_PLAYERS.to_string())
                .parse::<usize>()
                .context("MAX_PLAYERS must be a number")?
                .clamp(1, MAX_PLAYERS),
        };

        Ok(Config {
            server,
            dictionary,
            game,
        })
    }

    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Result<Config> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_source(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.server_addr(), "0.0.0.0:3000");
        assert_eq!(config.dictionary.api_url, DEFAULT_DICTIONARY_API_URL);
        assert_eq!(config.dictionary.timeout_secs, 30);
        assert!(config.dictionary.word_list_path.is_none());
        assert_eq!(config.game.max_players, 4);
    }

    #[test]
    fn test_overrides() {
        let config = config_from(&[
            ("HOST", "127.0.0.1"),
            ("PORT", "8080"),
            ("DICTIONARY_PATH", "./words.txt"),
            ("MAX_PLAYERS", "2"),
        ])
        .unwrap();
        assert_eq!(config.server_addr(), "127.0.0.1:8080");
        assert_eq!(config.dictionary.word_list_path.as_deref(), Some("./words.txt"));
        assert_eq!(config.game.max_players, 2);
    }

    #[test]
    fn test_max_players_is_clamped() {
        let config = config_from(&[("MAX_PLAYERS", "9")]).unwrap();
        assert_eq!(config.game.max_players, 4);
        let config = config_from(&[("MAX_PLAYERS", "0")]).unwrap();
        assert_eq!(config.game.max_players, 1);
    }

    #[test]
    fn test_bad_port_is_an_error() {
        let err = config_from(&[("PORT", "eighty")]).unwrap_err();
        assert!(err.to_string().contains("PORT must be a number"));
    }
}
