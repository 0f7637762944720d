use std::path::{Path, PathBuf};

use chrono::{Days, Local, NaiveDate};
use fonviz_api_types::DateRange;
use serde::Deserialize;

/// Settings read once at startup and handed to whoever needs them.
#[derive(Clone, Debug, Deserialize)]
pub(crate) struct AppConfig {
    /// Path to the sqlite fund store.
    #[serde(alias = "DB_FILE")]
    pub(crate) db_file: PathBuf,
    /// Earliest date with meaningful data in the store.
    #[serde(alias = "OLDEST")]
    pub(crate) oldest: NaiveDate,
    pub(crate) server_hostname: String,
    pub(crate) server_port: u16,
}

impl AppConfig {
    /// Loads a yaml file, then lets `FONVIZ_*` environment variables override
    /// individual keys. A relative `DB_FILE` is resolved against the directory
    /// holding the config file.
    pub(crate) fn load(path: &Path) -> Result<Self, config::ConfigError> {
        let builder = config::Config::builder()
            .set_default("server_hostname", "127.0.0.1")?
            .set_default("server_port", 5000)?
            .add_source(config::File::from(path).format(config::FileFormat::Yaml))
            .add_source(config::Environment::with_prefix("FONVIZ").try_parsing(true));
        let mut config: AppConfig = builder.build()?.try_deserialize()?;
        if config.db_file.is_relative() {
            if let Some(dir) = path.parent() {
                config.db_file = dir.join(&config.db_file);
            }
        }
        Ok(config)
    }

    /// Window used when the caller leaves one or both ends open: from `OLDEST`
    /// through today, both included.
    pub(crate) fn window(&self, start: Option<NaiveDate>, end: Option<NaiveDate>) -> DateRange {
        let start = start.unwrap_or_else(|| {
            self.oldest
                .checked_sub_days(Days::new(1))
                .unwrap_or(self.oldest)
        });
        let end = end.unwrap_or_else(|| {
            let today = Local::now().date_naive();
            today.checked_add_days(Days::new(1)).unwrap_or(today)
        });
        DateRange::new(start, end)
    }
}

#[cfg(test)]
mod test {
    use std::path::PathBuf;

    use chrono::NaiveDate;

    use super::AppConfig;

    #[test]
    fn load_yaml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        std::fs::write(
            &path,
            "DB_FILE: funds.db\nOLDEST: \"2020-01-02\"\nserver_hostname: 0.0.0.0\nserver_port: 8081\n",
        )
        .unwrap();
        let config = AppConfig::load(&path).unwrap();
        assert_eq!(config.db_file, dir.path().join("funds.db"));
        assert_eq!(config.oldest, NaiveDate::from_ymd_opt(2020, 1, 2).unwrap());
        assert_eq!(config.server_hostname, "0.0.0.0");
        assert_eq!(config.server_port, 8081);
    }

    #[test]
    fn server_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        std::fs::write(&path, "DB_FILE: /srv/funds.db\nOLDEST: \"2020-01-02\"\n").unwrap();
        let config = AppConfig::load(&path).unwrap();
        assert_eq!(config.db_file, PathBuf::from("/srv/funds.db"));
        assert_eq!(config.server_hostname, "127.0.0.1");
        assert_eq!(config.server_port, 5000);
    }

    #[test]
    fn missing_db_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        std::fs::write(&path, "OLDEST: \"2020-01-02\"\n").unwrap();
        assert!(AppConfig::load(&path).is_err());
    }

    #[test]
    fn open_window_starts_at_oldest() {
        let config = AppConfig {
            db_file: PathBuf::from("funds.db"),
            oldest: NaiveDate::from_ymd_opt(2020, 1, 2).unwrap(),
            server_hostname: "127.0.0.1".into(),
            server_port: 5000,
        };
        let window = config.window(None, None);
        assert!(window.contains(config.oldest));
        assert!(window.contains(chrono::Local::now().date_naive()));
        let end = NaiveDate::from_ymd_opt(2021, 1, 1).unwrap();
        assert_eq!(config.window(None, Some(end)).end, end);
    }
}
