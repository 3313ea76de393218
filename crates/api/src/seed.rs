//! Startup seed data for the in-memory directory.
//!
//! ```json
//! {
//!   "departments": [
//!     {
//!       "name": "Engineering",
//!       "code": "ENG",
//!       "employees": [
//!         { "name": "Ada", "email": "ada@example.com", "salary": 100000, "joining_date": "2019-01-15" }
//!       ]
//!     }
//!   ]
//! }
//! ```
//!
//! `id` may be given for departments and employees; otherwise a fresh one is minted.
//! Salaries accept JSON numbers or decimal strings.

use std::path::Path;

use chrono::NaiveDate;
use serde::Deserialize;
use uuid::Uuid;

use payroll_compensation::{Department, Employee};
use payroll_core::{DepartmentId, EmployeeId, Money};
use payroll_infra::InMemoryEmployeeDirectory;

use crate::config::ConfigError;

#[derive(Debug, Deserialize)]
pub struct SeedData {
    #[serde(default)]
    pub departments: Vec<SeedDepartment>,
}

#[derive(Debug, Deserialize)]
pub struct SeedDepartment {
    pub id: Option<Uuid>,
    pub name: String,
    pub code: String,
    #[serde(default)]
    pub employees: Vec<SeedEmployee>,
}

#[derive(Debug, Deserialize)]
pub struct SeedEmployee {
    pub id: Option<Uuid>,
    pub name: String,
    pub email: String,
    pub salary: SeedAmount,
    pub joining_date: NaiveDate,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum SeedAmount {
    Number(serde_json::Number),
    Text(String),
}

impl SeedAmount {
    fn to_money(&self) -> Result<Money, ConfigError> {
        let raw = match self {
            SeedAmount::Number(n) => n.to_string(),
            SeedAmount::Text(s) => s.clone(),
        };
        raw.parse()
            .map_err(|e| ConfigError::SeedData(format!("salary '{raw}': {e}")))
    }
}

/// Counts of records loaded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedSummary {
    pub departments: usize,
    pub employees: usize,
}

impl SeedData {
    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::SeedIo {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&raw).map_err(|source| ConfigError::SeedFormat {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Insert everything into `directory`. Stops at the first invalid record.
    pub fn apply(&self, directory: &InMemoryEmployeeDirectory) -> Result<SeedSummary, ConfigError> {
        let mut summary = SeedSummary::default();

        for d in &self.departments {
            let department_id = d.id.map(DepartmentId::from_uuid).unwrap_or_default();
            let department = Department::new(department_id, d.name.as_str(), d.code.as_str())
                .map_err(|e| ConfigError::SeedData(format!("department '{}': {e}", d.code)))?;
            directory
                .insert_department(department)
                .map_err(|e| ConfigError::SeedData(e.to_string()))?;
            summary.departments += 1;

            for e in &d.employees {
                let employee = Employee::new(
                    e.id.map(EmployeeId::from_uuid).unwrap_or_default(),
                    e.name.as_str(),
                    e.email.as_str(),
                    e.salary.to_money()?,
                    e.joining_date,
                    department_id,
                )
                .map_err(|err| ConfigError::SeedData(format!("employee '{}': {err}", e.name)))?;
                directory
                    .insert_employee(employee)
                    .map_err(|err| ConfigError::SeedData(err.to_string()))?;
                summary.employees += 1;
            }
        }

        Ok(summary)
    }
}
