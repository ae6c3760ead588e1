use std::fmt::Write as _;

use entity::employees::{self, NAME_MAX_LEN, POSITION_MAX_LEN};

use super::employees::{EmployeeForm, FieldErrors};

pub struct EmployeePage<'a> {
    pub title: &'a str,
    pub action: &'a str,
    pub employees: &'a [employees::Model],
    pub form: &'a EmployeeForm,
    pub errors: &'a FieldErrors,
    pub failure: Option<&'a str>,
}

pub fn render_employee_page(page: &EmployeePage<'_>) -> String {
    let title = escape(page.title);
    let mut html = String::with_capacity(2048);
    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n");
    let _ = writeln!(html, "<title>{title}</title>");
    html.push_str("</head>\n<body>\n");
    let _ = writeln!(html, "<h1>{title}</h1>");

    if let Some(message) = page.failure {
        let _ = writeln!(html, "<p class=\"error\" role=\"alert\">{}</p>", escape(message));
    }

    render_table(&mut html, page.employees);
    render_form(&mut html, page);

    html.push_str("</body>\n</html>\n");
    html
}

fn render_table(html: &mut String, rows: &[employees::Model]) {
    if rows.is_empty() {
        html.push_str("<p class=\"empty\">No employees yet.</p>\n");
        return;
    }
    html.push_str("<table>\n<thead><tr><th>Id</th><th>Name</th><th>Position</th></tr></thead>\n<tbody>\n");
    for row in rows {
        let _ = writeln!(
            html,
            "<tr><td>{}</td><td>{}</td><td>{}</td></tr>",
            row.id,
            escape(&row.name),
            escape(&row.position)
        );
    }
    html.push_str("</tbody>\n</table>\n");
}

fn render_form(html: &mut String, page: &EmployeePage<'_>) {
    let _ = writeln!(
        html,
        "<h2>Add employee</h2>\n<form method=\"post\" action=\"{}\">",
        escape(page.action)
    );
    render_field(html, "name", "Name", &page.form.name, NAME_MAX_LEN, page.errors);
    render_field(
        html,
        "position",
        "Position",
        &page.form.position,
        POSITION_MAX_LEN,
        page.errors,
    );
    html.push_str("<button type=\"submit\">Add</button>\n</form>\n");
}

fn render_field(
    html: &mut String,
    field: &str,
    label: &str,
    value: &str,
    max: usize,
    errors: &FieldErrors,
) {
    let _ = writeln!(
        html,
        "<div>\n<label for=\"{field}\">{label}</label>\n<input id=\"{field}\" name=\"{field}\" type=\"text\" maxlength=\"{max}\" required value=\"{}\">",
        escape(value)
    );
    for message in errors.get(field) {
        let _ = writeln!(
            html,
            "<span class=\"field-error\" data-field=\"{field}\">{}</span>",
            escape(message)
        );
    }
    html.push_str("</div>\n");
}

/// Escape text for use in element content and quoted attribute values.
pub fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
    out
}
