// UI layer: a simple interactive menu using `dialoguer`.
// It only collects input, hands it to `model::build_record` and the
// `ApiClient`, and prints whatever `ApiResult` comes back.

use crate::api::{ApiClient, ApiResult};
use crate::model::{self, PayKind, Payable};
use anyhow::Result;
use crossterm::style::Stylize;
use dialoguer::{Confirm, Input, Select};
use indicatif::{ProgressBar, ProgressStyle};
use serde_json::Value;
use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Duration;
use tracing::debug;

/// Departments the reference backend ships with. Only shown as a hint.
pub const KNOWN_DEPARTMENTS: &str = "TI | RH";

const LAST_DEPARTMENT_FILE: &str = ".sgrh_last_department";

/// How a rendered outcome should be presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Payload,
    Empty,
    Failure,
}

/// Main interactive menu. Runs a select loop until the user picks "Exit".
///
/// `Select::interact()` is keyboard-driven: arrow keys and Enter.
pub fn main_menu(api: ApiClient) -> Result<()> {
    println!("--- Employee manager ({}) ---", api.base_url());
    println!("Known departments: {}", KNOWN_DEPARTMENTS);
    loop {
        let items = vec![
            "Add employee",
            "List employees",
            "Compute payroll",
            "Remove employee",
            "Exit",
        ];
        let selection = Select::new().items(&items).default(0).interact()?;
        match selection {
            0 => handle_add(&api)?,
            1 => {
                let department = prompt_department()?;
                let result = with_spinner("Loading employees...", || api.list_employees(&department));
                show("Employees", &result, "No employees found or department does not exist.");
            }
            2 => {
                let department = prompt_department()?;
                let result = with_spinner("Computing payroll...", || api.compute_payroll(&department));
                show("Payroll", &result, "Payroll could not be computed.");
            }
            3 => handle_remove(&api)?,
            4 => break,
            _ => {}
        }
    }
    Ok(())
}

/// Collect the variant and its fields, validate locally, then POST.
fn handle_add(api: &ApiClient) -> Result<()> {
    let department = prompt_department()?;

    let labels: Vec<&str> = PayKind::ALL.iter().map(|kind| kind.label()).collect();
    let choice = Select::new()
        .with_prompt("Employee type")
        .items(&labels)
        .default(0)
        .interact()?;
    let kind = PayKind::ALL[choice];

    // Everything is read as text; `build_record` does the numeric parsing.
    let id: String = Input::new().with_prompt("Employee ID").interact_text()?;
    let name: String = Input::new().with_prompt("Employee name").interact_text()?;
    let mut fields = HashMap::new();
    for &field in kind.fields() {
        let value: String = Input::new().with_prompt(field_prompt(field)).interact_text()?;
        fields.insert(field.to_string(), value);
    }

    let record = match model::build_record(&id, &name, kind.tag(), &fields) {
        Ok(record) => record,
        Err(e) => {
            println!("{}", format!("Invalid input: {}", e).red());
            return Ok(());
        }
    };
    println!("{} (expected payment: {:.2})", record.identify(), record.pay_amount());

    let result = with_spinner("Adding employee...", || api.add_employee(&department, &record));
    show("Employee added", &result, "Employee added.");
    Ok(())
}

/// Ask for the employee id, confirm, then DELETE.
fn handle_remove(api: &ApiClient) -> Result<()> {
    let department = prompt_department()?;
    let raw_id: String = Input::new().with_prompt("Employee ID to remove").interact_text()?;
    let id = match raw_id.trim().parse::<i64>() {
        Ok(id) => id,
        Err(_) => {
            println!("{}", "Invalid input: ID must be a number.".red());
            return Ok(());
        }
    };

    let confirmed = Confirm::new()
        .with_prompt(format!("Remove employee {} from {}?", id, department))
        .interact()?;
    if !confirmed {
        return Ok(());
    }

    let result = with_spinner("Removing employee...", || api.remove_employee(&department, id));
    show("Removal", &result, "Removal request sent.");
    Ok(())
}

fn field_prompt(field: &str) -> &'static str {
    match field {
        model::FIELD_MONTHLY_SALARY => "Monthly salary",
        model::FIELD_HOURS_WORKED => "Hours worked",
        model::FIELD_HOURLY_RATE => "Hourly rate",
        model::FIELD_INTERNSHIP_STIPEND => "Internship stipend",
        _ => "Value",
    }
}

/// Prompt for a department, offering the last one used as default.
fn prompt_department() -> Result<String> {
    let mut input = Input::<String>::new();
    input.with_prompt("Department");
    if let Some(last) = load_last_department() {
        input.default(last);
    }
    let department = input.interact_text()?.trim().to_string();
    if let Err(e) = persist_last_department(&department) {
        debug!(error = %e, "could not remember last department");
    }
    Ok(department)
}

/// Run a blocking call while an indicatif spinner is shown.
fn with_spinner<T>(message: &'static str, call: impl FnOnce() -> T) -> T {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::with_template("{spinner} {msg}").unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    spinner.set_message(message);
    spinner.enable_steady_tick(Duration::from_millis(100));
    let out = call();
    spinner.finish_and_clear();
    out
}

fn show(title: &str, result: &ApiResult, empty_message: &str) {
    let (tone, text) = render_outcome(result, empty_message);
    match tone {
        Tone::Payload => println!("\n--- {} ---\n{}\n", title, text),
        Tone::Empty => println!("\n{}\n", text.yellow()),
        Tone::Failure => println!("\n{}\n", text.red()),
    }
}

/// Turn an `ApiResult` into the text shown to the operator.
///
/// Payloads are pretty-printed JSON, except plain-text replies which are
/// shown verbatim.
pub fn render_outcome(result: &ApiResult, empty_message: &str) -> (Tone, String) {
    match result {
        Ok(Some(Value::String(text))) => (Tone::Payload, text.clone()),
        Ok(Some(payload)) => {
            let text = serde_json::to_string_pretty(payload).unwrap_or_else(|_| payload.to_string());
            (Tone::Payload, text)
        }
        Ok(None) => (Tone::Empty, empty_message.to_string()),
        Err(failure) => (Tone::Failure, format!("Request failed: {}", failure)),
    }
}

fn last_department_path() -> PathBuf {
    let dir = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
    dir.join(LAST_DEPARTMENT_FILE)
}

/// Persist the last department name into the user's home directory.
fn persist_last_department(department: &str) -> Result<()> {
    std::fs::write(last_department_path(), department)?;
    Ok(())
}

/// Load the last department name, if one was saved and is non-empty.
fn load_last_department() -> Option<String> {
    let data = std::fs::read_to_string(last_department_path()).ok()?;
    let data = data.trim();
    (!data.is_empty()).then(|| data.to_string())
}
