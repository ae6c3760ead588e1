//! Scratch Postgres databases for integration tests.
//!
//! Tests call [`PgScratch::create`] and return early when it yields `None`,
//! which happens whenever `TEST_DATABASE_URL` is unset.

use anyhow::{Context, Result};
use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectionTrait, Database, DatabaseBackend, DatabaseConnection, Statement};
use url::Url;
use uuid::Uuid;

pub struct PgScratch {
    pub db: DatabaseConnection,
    admin_url: String,
    db_name: String,
}

impl PgScratch {
    /// Create a fresh, migrated database next to the one `TEST_DATABASE_URL`
    /// points at.
    pub async fn create() -> Result<Option<Self>> {
        let Ok(base) = std::env::var("TEST_DATABASE_URL") else {
            return Ok(None);
        };
        let (admin_url, db_name, test_url) = build_urls(&base)?;
        let admin = Database::connect(&admin_url)
            .await
            .context("connect to admin database")?;
        admin
            .execute(Statement::from_string(
                DatabaseBackend::Postgres,
                format!("CREATE DATABASE \"{db_name}\""),
            ))
            .await
            .context("create scratch database")?;
        let db = Database::connect(&test_url)
            .await
            .context("connect to scratch database")?;
        Migrator::up(&db, None).await.context("migrate scratch database")?;
        Ok(Some(Self {
            db,
            admin_url,
            db_name,
        }))
    }

    pub async fn cleanup(self) -> Result<()> {
        let Self {
            db,
            admin_url,
            db_name,
        } = self;
        drop(db);
        let admin = Database::connect(&admin_url).await?;
        admin
            .execute(Statement::from_string(
                DatabaseBackend::Postgres,
                format!("DROP DATABASE IF EXISTS \"{db_name}\" WITH (FORCE)"),
            ))
            .await?;
        Ok(())
    }
}

fn build_urls(base: &str) -> Result<(String, String, String)> {
    let url = Url::parse(base).context("TEST_DATABASE_URL is not a URL")?;
    let db_path = url.path().trim_start_matches('/');
    let base_name = if db_path.is_empty() {
        "employee_directory_test"
    } else {
        db_path
    };
    let db_name = format!("{}_{}", base_name, Uuid::new_v4().simple());
    let mut admin_url = url.clone();
    admin_url.set_path("/postgres");
    let mut test_url = url.clone();
    test_url.set_path(&format!("/{db_name}"));
    Ok((admin_url.to_string(), db_name, test_url.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scratch_urls_share_host_and_use_unique_names() {
        let (admin, name, test) = build_urls("postgres://u:p@db:5432/app").unwrap();
        assert_eq!(admin, "postgres://u:p@db:5432/postgres");
        assert!(name.starts_with("app_"));
        assert_eq!(test, format!("postgres://u:p@db:5432/{name}"));

        let (_, other, _) = build_urls("postgres://u:p@db:5432/app").unwrap();
        assert_ne!(name, other);
    }

    #[test]
    fn empty_path_gets_a_default_prefix() {
        let (_, name, _) = build_urls("postgres://u:p@db:5432").unwrap();
        assert!(name.starts_with("employee_directory_test_"));
    }
}
