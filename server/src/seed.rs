use anyhow::{Context, Result};
use platform_db::employees::{self as store};
use sea_orm::ConnectionTrait;
use tracing::info;

use crate::pages::employees::EmployeeForm;

const DEMO_EMPLOYEES: &[(&str, &str)] = &[
    ("Ada Lovelace", "Engineer"),
    ("Grace Hopper", "Rear Admiral"),
    ("Katherine Johnson", "Mathematician"),
];

/// Insert the demo rows unless the table already has data. Returns how many
/// rows were written.
pub async fn seed_demo_employees<C: ConnectionTrait>(db: &C) -> Result<usize> {
    let existing = store::count(db).await.context("failed to count employees")?;
    if existing > 0 {
        info!(existing, "employees table not empty; skipping seed");
        return Ok(0);
    }
    for (name, position) in DEMO_EMPLOYEES {
        let form = EmployeeForm {
            name: (*name).to_string(),
            position: (*position).to_string(),
        };
        let new_employee = form
            .validate()
            .map_err(|errors| anyhow::anyhow!("invalid seed row {name}: {errors:?}"))?;
        store::insert(db, new_employee)
            .await
            .with_context(|| format!("failed to insert {name}"))?;
    }
    Ok(DEMO_EMPLOYEES.len())
}
