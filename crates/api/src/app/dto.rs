use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use payroll_compensation::{
    AdjustmentEvent, AdjustmentResult, Department, Employee, EmployeeAdjustment, Tier,
};
use payroll_core::{AdjustmentId, DepartmentId, EmployeeId};
use payroll_infra::AdjustmentStats;

// -------------------------
// Request DTOs
// -------------------------

#[derive(Debug, Deserialize)]
pub struct AdjustmentRequest {
    pub department_id: String,
    pub performance_score: i64,
}

#[derive(Debug, Default, Deserialize)]
pub struct HistoryQuery {
    pub department_id: Option<String>,
}

// -------------------------
// Response DTOs
// -------------------------

/// Salaries are rendered as decimal strings (`"120000.00"`).
#[derive(Debug, Serialize)]
pub struct EmployeeAdjustmentResponse {
    pub employee_id: EmployeeId,
    pub old_salary: String,
    pub new_salary: String,
    pub percent_applied: u32,
    pub tier: Tier,
    pub tenure_bonus: bool,
    pub capped: bool,
}

impl From<&EmployeeAdjustment> for EmployeeAdjustmentResponse {
    fn from(adj: &EmployeeAdjustment) -> Self {
        Self {
            employee_id: adj.employee_id,
            old_salary: adj.old_salary.to_string(),
            new_salary: adj.new_salary.to_string(),
            percent_applied: adj.percent_applied,
            tier: adj.evaluation.tier,
            tenure_bonus: adj.evaluation.has_tenure_bonus(),
            capped: adj.capped,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct AdjustmentResponse {
    pub department_id: DepartmentId,
    pub performance_score: u8,
    pub employees_affected: usize,
    pub preview: bool,
    pub adjustments: Vec<EmployeeAdjustmentResponse>,
}

impl AdjustmentResponse {
    pub fn from_result(result: &AdjustmentResult, preview: bool) -> Self {
        Self {
            department_id: result.department_id,
            performance_score: result.performance_score.value(),
            employees_affected: result.employees_affected,
            preview,
            adjustments: result.adjustments.iter().map(Into::into).collect(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct AdjustmentHistoryItem {
    pub adjustment_id: AdjustmentId,
    pub department_id: DepartmentId,
    pub performance_score: u8,
    pub employees_affected: usize,
    pub occurred_at: DateTime<Utc>,
}

impl From<&AdjustmentEvent> for AdjustmentHistoryItem {
    fn from(e: &AdjustmentEvent) -> Self {
        Self {
            adjustment_id: e.adjustment_id,
            department_id: e.department_id,
            performance_score: e.performance_score.value(),
            employees_affected: e.employees_affected,
            occurred_at: e.occurred_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct AdjustmentHistoryResponse {
    pub items: Vec<AdjustmentHistoryItem>,
}

impl AdjustmentHistoryResponse {
    /// Newest first.
    pub fn from_events(events: &[AdjustmentEvent]) -> Self {
        let mut items: Vec<AdjustmentHistoryItem> = events.iter().map(Into::into).collect();
        items.sort_by(|a, b| b.occurred_at.cmp(&a.occurred_at));
        Self { items }
    }
}

pub type AdjustmentStatsResponse = AdjustmentStats;

#[derive(Debug, Serialize)]
pub struct DepartmentResponse {
    pub id: DepartmentId,
    pub name: String,
    pub code: String,
}

impl From<&Department> for DepartmentResponse {
    fn from(d: &Department) -> Self {
        Self {
            id: d.id_typed(),
            name: d.name().to_string(),
            code: d.code().to_string(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct EmployeeResponse {
    pub id: EmployeeId,
    pub name: String,
    pub email: String,
    pub salary: String,
    pub joining_date: NaiveDate,
    pub department_id: DepartmentId,
}

impl From<&Employee> for EmployeeResponse {
    fn from(e: &Employee) -> Self {
        Self {
            id: e.id_typed(),
            name: e.name().to_string(),
            email: e.email().to_string(),
            salary: e.salary().to_string(),
            joining_date: e.joining_date(),
            department_id: e.department_id(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct DepartmentEmployeesResponse {
    pub department: DepartmentResponse,
    pub employee_count: usize,
    pub items: Vec<EmployeeResponse>,
}
