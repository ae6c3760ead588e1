//! The employees page: list every employee and accept new ones.

use std::collections::BTreeMap;

use axum::{
    Form,
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
};
use entity::employees::{self, NAME_MAX_LEN, POSITION_MAX_LEN};
use platform_db::employees::{self as store, NewEmployee};
use sea_orm::DbErr;
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, error, info, instrument};

use super::view::{self, EmployeePage};
use crate::http::AppState;

pub const EMPLOYEES_PATH: &str = "/employees";

/// Raw form submission. Missing fields deserialize as empty strings.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Eq)]
pub struct EmployeeForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub position: String,
}

/// Field name to the messages raised against it.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FieldErrors(BTreeMap<&'static str, Vec<String>>);

impl FieldErrors {
    pub fn add(&mut self, field: &'static str, message: impl Into<String>) {
        self.0.entry(field).or_default().push(message.into());
    }

    pub fn get(&self, field: &str) -> &[String] {
        self.0.get(field).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn fields(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.0.keys().copied()
    }
}

impl EmployeeForm {
    pub fn validate(&self) -> Result<NewEmployee, FieldErrors> {
        let mut errors = FieldErrors::default();
        check_text(&mut errors, "name", "Name", &self.name, NAME_MAX_LEN);
        check_text(
            &mut errors,
            "position",
            "Position",
            &self.position,
            POSITION_MAX_LEN,
        );
        if !errors.is_empty() {
            return Err(errors);
        }
        Ok(NewEmployee {
            name: self.name.clone(),
            position: self.position.clone(),
        })
    }
}

fn check_text(errors: &mut FieldErrors, field: &'static str, label: &str, value: &str, max: usize) {
    if value.trim().is_empty() {
        errors.add(field, format!("{label} is required"));
    } else if value.chars().count() > max {
        errors.add(field, format!("{label} cannot exceed {max} characters"));
    }
}

#[derive(Debug, Error)]
pub enum PageError {
    #[error("failed to load employees")]
    Load(#[source] DbErr),
    #[error("failed to save employee")]
    Save(#[source] DbErr),
}

impl PageError {
    pub fn user_message(&self) -> &'static str {
        match self {
            PageError::Load(_) => "The employee list could not be loaded. Please try again later.",
            PageError::Save(_) => {
                "The employee could not be saved. Please try again; your input has been kept."
            }
        }
    }
}

#[instrument(name = "employees.list", skip_all)]
pub async fn list_employees(State(state): State<AppState>) -> Response {
    render(&state, &EmployeeForm::default(), &FieldErrors::default(), None).await
}

#[instrument(name = "employees.create", skip_all)]
pub async fn create_employee(
    State(state): State<AppState>,
    Form(form): Form<EmployeeForm>,
) -> Response {
    let new_employee = match form.validate() {
        Ok(new_employee) => new_employee,
        Err(errors) => {
            debug!(fields = ?errors.fields().collect::<Vec<_>>(), "employee form rejected");
            return render(&state, &form, &errors, None).await;
        }
    };

    match store::insert(&state.pool, new_employee).await {
        Ok(created) => {
            info!(id = created.id, "employee created");
            Redirect::to(EMPLOYEES_PATH).into_response()
        }
        Err(err) => {
            let failure = PageError::Save(err);
            error!(error = ?failure, "employee insert failed");
            render(&state, &form, &FieldErrors::default(), Some(failure)).await
        }
    }
}

async fn render(
    state: &AppState,
    form: &EmployeeForm,
    errors: &FieldErrors,
    failure: Option<PageError>,
) -> Response {
    let (employees, failure) = match store::list_all(&state.pool).await {
        Ok(rows) => (rows, failure),
        Err(err) => {
            let load_failure = PageError::Load(err);
            error!(error = ?load_failure, "employee list failed");
            (Vec::<employees::Model>::new(), failure.or(Some(load_failure)))
        }
    };
    let status = if failure.is_some() {
        StatusCode::INTERNAL_SERVER_ERROR
    } else {
        StatusCode::OK
    };
    let page = EmployeePage {
        title: &state.config.title,
        action: EMPLOYEES_PATH,
        employees: &employees,
        form,
        errors,
        failure: failure.as_ref().map(PageError::user_message),
    };
    (status, Html(view::render_employee_page(&page))).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(name: &str, position: &str) -> EmployeeForm {
        EmployeeForm {
            name: name.into(),
            position: position.into(),
        }
    }

    #[test]
    fn valid_form_keeps_values_verbatim() {
        let new_employee = form(" Ada Lovelace ", "Engineer").validate().unwrap();
        assert_eq!(new_employee.name, " Ada Lovelace ");
        assert_eq!(new_employee.position, "Engineer");
    }

    #[test]
    fn empty_and_blank_fields_are_required() {
        let errors = form("", "   ").validate().unwrap_err();
        assert_eq!(errors.get("name"), ["Name is required"]);
        assert_eq!(errors.get("position"), ["Position is required"]);
    }

    #[test]
    fn length_limit_is_inclusive_at_one_hundred() {
        assert!(form(&"a".repeat(100), &"b".repeat(100)).validate().is_ok());

        let errors = form(&"a".repeat(101), "Engineer").validate().unwrap_err();
        assert_eq!(errors.get("name"), ["Name cannot exceed 100 characters"]);
        assert!(errors.get("position").is_empty());

        let errors = form("Ada", &"b".repeat(101)).validate().unwrap_err();
        assert_eq!(
            errors.get("position"),
            ["Position cannot exceed 100 characters"]
        );
    }

    #[test]
    fn length_counts_characters_not_bytes() {
        let name = "é".repeat(100);
        assert!(name.len() > 100);
        assert!(form(&name, "Engineer").validate().is_ok());
    }

    #[test]
    fn errors_report_offending_fields_only() {
        let errors = form("", "Engineer").validate().unwrap_err();
        assert_eq!(errors.fields().collect::<Vec<_>>(), vec!["name"]);
    }
}
