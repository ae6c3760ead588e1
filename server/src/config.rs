use anyhow::{Context, Result, anyhow};
use platform_db::DatabaseSettings;

const DEFAULT_TITLE: &str = "Employees";

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub database: DatabaseSettings,
    pub title: String,
    pub migrate_on_start: bool,
}

impl AppConfig {
    pub fn load() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let database =
            DatabaseSettings::from_lookup(&lookup).context("invalid database configuration")?;

        let title = lookup("APP_TITLE")
            .map(|val| val.trim().to_string())
            .filter(|val| !val.is_empty())
            .unwrap_or_else(|| DEFAULT_TITLE.into());

        let migrate_on_start = match lookup("MIGRATE_ON_START") {
            Some(raw) => parse_bool(&raw)
                .ok_or_else(|| anyhow!("MIGRATE_ON_START must be a boolean, got {raw:?}"))?,
            None => false,
        };

        Ok(Self {
            database,
            title,
            migrate_on_start,
        })
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" | "" => Some(false),
        _ => None,
    }
}
