// Employee record model: the three payment variants, the parser that turns
// raw operator input into a record, and the wire serializer used as the
// POST body.
//
// Wire names follow the backend (`tipo`, `nome`, `salario_mensal`, ...).
// Rust names stay in English.

use crate::error::ValidationError;
use serde::Deserialize;
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

pub const FIELD_KIND: &str = "tipo";
pub const FIELD_ID: &str = "id";
pub const FIELD_NAME: &str = "nome";
pub const FIELD_MONTHLY_SALARY: &str = "salario_mensal";
pub const FIELD_HOURS_WORKED: &str = "horas_trabalhadas";
pub const FIELD_HOURLY_RATE: &str = "valor_hora";
pub const FIELD_INTERNSHIP_STIPEND: &str = "auxilio_estagio";

/// The three payment kinds an employee can have.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayKind {
    Salaried,
    Hourly,
    Intern,
}

impl PayKind {
    pub const ALL: [PayKind; 3] = [PayKind::Salaried, PayKind::Hourly, PayKind::Intern];

    /// Discriminator value sent in the `tipo` field.
    pub fn tag(self) -> &'static str {
        match self {
            PayKind::Salaried => "efetivo",
            PayKind::Hourly => "autonomo",
            PayKind::Intern => "estagiario",
        }
    }

    /// Menu label.
    pub fn label(self) -> &'static str {
        match self {
            PayKind::Salaried => "Salaried (efetivo)",
            PayKind::Hourly => "Hourly (autonomo)",
            PayKind::Intern => "Intern (estagiario)",
        }
    }

    /// Wire names of the attributes this kind carries, in prompt order.
    pub fn fields(self) -> &'static [&'static str] {
        match self {
            PayKind::Salaried => &[FIELD_MONTHLY_SALARY],
            PayKind::Hourly => &[FIELD_HOURS_WORKED, FIELD_HOURLY_RATE],
            PayKind::Intern => &[FIELD_INTERNSHIP_STIPEND],
        }
    }
}

impl fmt::Display for PayKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for PayKind {
    type Err = ValidationError;

    /// Accepts the wire tag or the English name, case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "efetivo" | "salaried" => Ok(PayKind::Salaried),
            "autonomo" | "hourly" => Ok(PayKind::Hourly),
            "estagiario" | "intern" => Ok(PayKind::Intern),
            _ => Err(ValidationError::UnknownKind(s.to_string())),
        }
    }
}

/// Variant-specific payment attributes. Exactly one set exists per record.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "tipo")]
pub enum Payment {
    #[serde(rename = "efetivo")]
    Salaried {
        #[serde(rename = "salario_mensal")]
        monthly_salary: f64,
    },
    #[serde(rename = "autonomo")]
    Hourly {
        #[serde(rename = "horas_trabalhadas")]
        hours_worked: i64,
        #[serde(rename = "valor_hora")]
        hourly_rate: f64,
    },
    #[serde(rename = "estagiario")]
    Intern {
        #[serde(rename = "auxilio_estagio")]
        internship_stipend: f64,
    },
}

impl Payment {
    pub fn kind(&self) -> PayKind {
        match self {
            Payment::Salaried { .. } => PayKind::Salaried,
            Payment::Hourly { .. } => PayKind::Hourly,
            Payment::Intern { .. } => PayKind::Intern,
        }
    }
}

/// An employee as sent to `POST departamentos/{dept}/colaboradores`.
///
/// Deserializing accepts the same flat shape `serialize` produces, so an
/// echoed record can be read back.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct EmployeeRecord {
    pub id: i64,
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(flatten)]
    pub payment: Payment,
}

impl EmployeeRecord {
    pub fn kind(&self) -> PayKind {
        self.payment.kind()
    }
}

/// Capability shared by every employee variant.
pub trait Payable {
    /// Locally computed payment. The backend's figure is authoritative.
    fn pay_amount(&self) -> f64;

    /// One-line summary, e.g. `ID - 1 | Nome - Ana`.
    fn identify(&self) -> String;
}

impl Payable for EmployeeRecord {
    fn pay_amount(&self) -> f64 {
        match self.payment {
            Payment::Salaried { monthly_salary } => monthly_salary,
            Payment::Hourly {
                hours_worked,
                hourly_rate,
            } => hours_worked as f64 * hourly_rate,
            Payment::Intern { internship_stipend } => internship_stipend,
        }
    }

    fn identify(&self) -> String {
        format!("ID - {} | Nome - {}", self.id, self.name)
    }
}

/// Build a record from raw operator input.
///
/// `fields` is keyed by wire attribute name (`salario_mensal`, ...). Keys the
/// chosen kind does not use are ignored. Only numeric parsing is checked;
/// ranges (negative salary, zero hours) are left to the backend.
pub fn build_record(
    id: &str,
    name: &str,
    kind: &str,
    fields: &HashMap<String, String>,
) -> Result<EmployeeRecord, ValidationError> {
    let kind: PayKind = kind.parse()?;
    let id = id
        .trim()
        .parse::<i64>()
        .map_err(|_| ValidationError::InvalidId(id.to_string()))?;

    let payment = match kind {
        PayKind::Salaried => Payment::Salaried {
            monthly_salary: decimal_field(fields, FIELD_MONTHLY_SALARY)?,
        },
        PayKind::Hourly => Payment::Hourly {
            hours_worked: integer_field(fields, FIELD_HOURS_WORKED)?,
            hourly_rate: decimal_field(fields, FIELD_HOURLY_RATE)?,
        },
        PayKind::Intern => Payment::Intern {
            internship_stipend: decimal_field(fields, FIELD_INTERNSHIP_STIPEND)?,
        },
    };

    Ok(EmployeeRecord {
        id,
        name: name.trim().to_string(),
        payment,
    })
}

fn raw_field<'a>(
    fields: &'a HashMap<String, String>,
    field: &'static str,
) -> Result<&'a str, ValidationError> {
    fields
        .get(field)
        .map(|v| v.trim())
        .ok_or(ValidationError::MissingField(field))
}

fn integer_field(fields: &HashMap<String, String>, field: &'static str) -> Result<i64, ValidationError> {
    let raw = raw_field(fields, field)?;
    raw.parse::<i64>().map_err(|_| ValidationError::InvalidNumber {
        field,
        value: raw.to_string(),
    })
}

fn decimal_field(fields: &HashMap<String, String>, field: &'static str) -> Result<f64, ValidationError> {
    let raw = raw_field(fields, field)?;
    match raw.parse::<f64>() {
        // JSON has no representation for NaN or infinity.
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(ValidationError::InvalidNumber {
            field,
            value: raw.to_string(),
        }),
    }
}

/// Flatten a record into its wire map: `tipo`, `id`, `nome` and the
/// attributes of its variant, nothing else.
pub fn serialize(record: &EmployeeRecord) -> Map<String, Value> {
    let mut map = Map::new();
    map.insert(FIELD_KIND.into(), Value::from(record.kind().tag()));
    map.insert(FIELD_ID.into(), Value::from(record.id));
    map.insert(FIELD_NAME.into(), Value::from(record.name.as_str()));

    match record.payment {
        Payment::Salaried { monthly_salary } => {
            map.insert(FIELD_MONTHLY_SALARY.into(), Value::from(monthly_salary));
        }
        Payment::Hourly {
            hours_worked,
            hourly_rate,
        } => {
            map.insert(FIELD_HOURS_WORKED.into(), Value::from(hours_worked));
            map.insert(FIELD_HOURLY_RATE.into(), Value::from(hourly_rate));
        }
        Payment::Intern { internship_stipend } => {
            map.insert(FIELD_INTERNSHIP_STIPEND.into(), Value::from(internship_stipend));
        }
    }
    map
}
