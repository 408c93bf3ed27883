//! Process configuration.
//!
//! Settings come from a TOML file overlaid with `RECITAL_*` environment
//! variables. The schema mode lives here because it must be chosen once
//! at startup, before the first storage call, and never changed again.

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment, File};
use recital_storage::db::SchemaMode;
use serde::Deserialize;

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// The path to the events database.
    pub db_path: PathBuf,
    /// Which containment representation the backing store is in.
    pub schema_mode: SchemaMode,
    /// The log level to use.
    pub log_level: log::LevelFilter,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            db_path: PathBuf::from("/tmp/recital_db"),
            schema_mode: SchemaMode::default(),
            log_level: log::LevelFilter::Info,
        }
    }
}

impl Settings {
    /// Load settings from the given TOML file (if it exists) overlaid
    /// with `RECITAL_*` environment variables.
    ///
    /// # Errors
    ///
    /// This function will return an error if the config file or the
    /// environment overlay cannot be parsed.
    pub fn init(config_path: &Path) -> Result<Self, ConfigError> {
        let s = Config::builder()
            .add_source(File::from(config_path).required(false))
            .add_source(Environment::with_prefix("RECITAL"))
            .build()?;

        s.try_deserialize()
    }

    /// Apply the schema-mode choice to the storage layer.
    ///
    /// Idempotent; the first application in the process wins.
    pub fn apply_schema_mode(&self) {
        recital_storage::db::set_schema_mode(self.schema_mode);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use config::FileFormat;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.schema_mode, SchemaMode::Legacy);
        assert_eq!(settings.log_level, log::LevelFilter::Info);
    }

    #[test]
    fn test_parse_toml() {
        let s = Config::builder()
            .add_source(File::from_str(
                r#"
                db_path = "/var/lib/recital/events"
                schema_mode = "normalized"
                log_level = "DEBUG"
                "#,
                FileFormat::Toml,
            ))
            .build()
            .unwrap();
        let settings: Settings = s.try_deserialize().unwrap();

        assert_eq!(settings.db_path, PathBuf::from("/var/lib/recital/events"));
        assert_eq!(settings.schema_mode, SchemaMode::Normalized);
        assert_eq!(settings.log_level, log::LevelFilter::Debug);
    }

    #[test]
    fn test_missing_file_falls_back_to_defaults() {
        let settings = Settings::init(Path::new("/nonexistent/Recital.toml")).unwrap();
        assert_eq!(settings, Settings::default());
    }
}
