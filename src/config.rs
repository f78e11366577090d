//! Server settings from environment variables.
//!
//! | Variable          | Default               |
//! |-------------------|-----------------------|
//! | `HOST`            | `0.0.0.0`             |
//! | `PORT`            | `3000`                |
//! | `DATA_FILE`       | `data/badminton.json` (`:memory:` keeps state in memory only) |
//! | `STATIC_DIR`      | `static`              |
//! | `UPCOMING_ROUNDS` | `3`                   |

use crate::logic::DEFAULT_UPCOMING_ROUNDS;
use std::path::PathBuf;

/// `DATA_FILE` value that disables the snapshot file.
pub const IN_MEMORY: &str = ":memory:";

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// None when running in memory only.
    pub data_file: Option<PathBuf>,
    /// Directory with a pre-built client, served at `/` when it exists.
    pub static_dir: PathBuf,
    pub upcoming_rounds: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            data_file: Some(PathBuf::from("data/badminton.json")),
            static_dir: PathBuf::from("static"),
            upcoming_rounds: DEFAULT_UPCOMING_ROUNDS,
        }
    }
}

impl ServerConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup. Unparseable numbers fall back to the default.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let data_file = match lookup("DATA_FILE") {
            Some(v) if v == IN_MEMORY => None,
            Some(v) if !v.trim().is_empty() => Some(PathBuf::from(v)),
            _ => defaults.data_file,
        };
        Self {
            host: lookup("HOST").unwrap_or(defaults.host),
            port: lookup("PORT")
                .and_then(|p| p.parse().ok())
                .unwrap_or(defaults.port),
            data_file,
            static_dir: lookup("STATIC_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.static_dir),
            upcoming_rounds: lookup("UPCOMING_ROUNDS")
                .and_then(|n| n.parse().ok())
                .unwrap_or(defaults.upcoming_rounds),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> ServerConfig {
        let env: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ServerConfig::from_lookup(|key| env.get(key).cloned())
    }

    #[test]
    fn defaults_when_unset() {
        assert_eq!(config_from(&[]), ServerConfig::default());
    }

    #[test]
    fn memory_data_file_disables_snapshot() {
        let config = config_from(&[("DATA_FILE", ":memory:"), ("PORT", "8080")]);
        assert_eq!(config.data_file, None);
        assert_eq!(config.port, 8080);
    }

    #[test]
    fn bad_numbers_fall_back() {
        let config = config_from(&[("PORT", "http"), ("UPCOMING_ROUNDS", "-1")]);
        assert_eq!(config.port, 3000);
        assert_eq!(config.upcoming_rounds, DEFAULT_UPCOMING_ROUNDS);
    }
}
