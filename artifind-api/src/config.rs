use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use serde::Deserialize;
use serde_with::serde_as;
use sqlx::postgres::{PgConnectOptions, PgSslMode};
use strum::{Display, EnumString};

use crate::domain::search::SearchConfig;

#[derive(Deserialize, Clone, Debug)]
pub struct Settings {
    pub application: ApplicationSettings,
    pub index: IndexSettings,
    pub repository: RepositorySettings,
    pub search: SearchSettings,
}

#[serde_as]
#[derive(Deserialize, Clone, Debug)]
pub struct ApplicationSettings {
    #[serde_as(as = "serde_with::DisplayFromStr")]
    pub port: u16,
    pub host: String,
}

#[derive(Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum IndexBackend {
    Snapshot,
    Postgres,
}

#[derive(Deserialize, Clone, Debug)]
pub struct IndexSettings {
    pub backend: IndexBackend,
    pub snapshot_path: PathBuf,
    pub database: DatabaseSettings,
}

#[serde_as]
#[derive(Deserialize, Clone, Debug)]
pub struct DatabaseSettings {
    pub username: String,
    pub password: String,
    #[serde_as(as = "serde_with::DisplayFromStr")]
    pub port: u16,
    pub host: String,
    pub database_name: String,
    pub require_ssl: bool,
}

impl DatabaseSettings {
    pub fn without_db(&self) -> PgConnectOptions {
        let ssl_mode = if self.require_ssl {
            PgSslMode::Require
        } else {
            PgSslMode::Prefer
        };

        PgConnectOptions::new()
            .host(&self.host)
            .port(self.port)
            .username(&self.username)
            .password(&self.password)
            .ssl_mode(ssl_mode)
    }

    pub fn with_db(&self) -> PgConnectOptions {
        self.without_db().database(&self.database_name)
    }
}

#[serde_as]
#[derive(Deserialize, Clone, Debug)]
pub struct RepositorySettings {
    pub url: String,
    #[serde_as(as = "serde_with::DisplayFromStr")]
    pub timeout_secs: u64,
}

impl RepositorySettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[serde_as]
#[derive(Deserialize, Clone, Debug)]
pub struct SearchSettings {
    #[serde_as(as = "serde_with::DisplayFromStr")]
    pub default_page_size: i64,
    #[serde_as(as = "serde_with::DisplayFromStr")]
    pub max_page_size: i64,
    /// Empty disables the classifier filter
    #[serde(default)]
    pub classifier: Option<String>,
}

impl From<&SearchSettings> for SearchConfig {
    fn from(settings: &SearchSettings) -> Self {
        SearchConfig {
            default_page_size: settings.default_page_size,
            max_page_size: settings.max_page_size,
            classifier: settings
                .classifier
                .clone()
                .filter(|classifier| !classifier.is_empty()),
        }
    }
}

pub fn read_config() -> Result<Settings, config::ConfigError> {
    let base_path = std::env::current_dir().map_err(|e| {
        config::ConfigError::Message(format!("Failed to determine the current directory: {e}"))
    })?;

    let environment = Environment::from_str(
        std::env::var("APP_ENVIRONMENT")
            .unwrap_or_else(|_| "local".into())
            .as_str(),
    )
    .map_err(|e| config::ConfigError::Message(format!("Failed to parse APP_ENVIRONMENT: {e}")))?;

    read_config_from(&base_path.join("config"), &environment)
}

fn read_config_from(
    config_directory: &Path,
    environment: &Environment,
) -> Result<Settings, config::ConfigError> {
    let environment_filename = format!("{}.yaml", environment);

    let settings = config::Config::builder()
        .add_source(config::File::from(config_directory.join("base.yaml")))
        .add_source(config::File::from(
            config_directory.join(environment_filename),
        ))
        .add_source(
            config::Environment::with_prefix("ARTIFIND")
                .prefix_separator("_")
                .separator("__"),
        )
        .build()?;

    settings.try_deserialize::<Settings>()
}

#[derive(Display, Debug, EnumString)]
pub enum Environment {
    #[strum(ascii_case_insensitive, serialize = "local")]
    Local,
    #[strum(ascii_case_insensitive, serialize = "production")]
    Production,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_directory() -> PathBuf {
        Path::new(env!("CARGO_MANIFEST_DIR")).join("config")
    }

    #[test]
    fn environment_is_case_insensitive() {
        assert!(matches!(
            Environment::from_str("PRODUCTION"),
            Ok(Environment::Production)
        ));
        assert!(Environment::from_str("staging").is_err());
        assert_eq!(Environment::Local.to_string(), "local");
    }

    #[test]
    fn local_config_uses_snapshot_index() {
        let settings = read_config_from(&config_directory(), &Environment::Local).unwrap();

        assert_eq!(settings.index.backend, IndexBackend::Snapshot);
        assert_eq!(settings.search.default_page_size, 10);
        assert_eq!(settings.search.classifier.as_deref(), Some("sources"));
    }

    #[test]
    fn production_config_uses_postgres_index() {
        let settings = read_config_from(&config_directory(), &Environment::Production).unwrap();

        assert_eq!(settings.index.backend, IndexBackend::Postgres);
        assert_eq!(settings.application.host, "0.0.0.0");
    }

    #[test]
    fn empty_classifier_disables_filter() {
        let settings = SearchSettings {
            default_page_size: 20,
            max_page_size: 50,
            classifier: Some(String::new()),
        };

        let config = SearchConfig::from(&settings);
        assert_eq!(config.default_page_size, 20);
        assert_eq!(config.classifier, None);
    }
}
