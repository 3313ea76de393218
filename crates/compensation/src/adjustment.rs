//! Per-employee and per-batch adjustment computation, plus the ledger event.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use payroll_core::{AdjustmentId, DepartmentId, DomainResult, EmployeeId, Event, Money};

use crate::employee::Employee;
use crate::rules::{AdjustmentPolicy, Evaluation, PerformanceScore};
use crate::tenure::years_of_tenure_at;

/// Computed salary change for one employee.
///
/// `percent_applied` is always the rule-derived percentage, even when the cap
/// reduced the actual increase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeAdjustment {
    pub employee_id: EmployeeId,
    pub old_salary: Money,
    pub new_salary: Money,
    pub percent_applied: u32,
    pub evaluation: Evaluation,
    /// True when the cap limited (or blocked) the raise.
    pub capped: bool,
}

impl EmployeeAdjustment {
    pub fn changes_salary(&self) -> bool {
        self.new_salary != self.old_salary
    }
}

/// Outcome of one batch (applied or previewed).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdjustmentResult {
    pub department_id: DepartmentId,
    pub performance_score: PerformanceScore,
    pub employees_affected: usize,
    pub adjustments: Vec<EmployeeAdjustment>,
}

impl AdjustmentResult {
    pub fn empty(department_id: DepartmentId, performance_score: PerformanceScore) -> Self {
        Self {
            department_id,
            performance_score,
            employees_affected: 0,
            adjustments: Vec::new(),
        }
    }
}

/// Compute one employee's adjustment at instant `at`.
pub fn plan_employee(
    policy: &AdjustmentPolicy,
    employee: &Employee,
    score: PerformanceScore,
    at: DateTime<Utc>,
) -> DomainResult<EmployeeAdjustment> {
    let tenure = years_of_tenure_at(employee.joining_date(), at)?;
    let evaluation = policy.evaluate(score, tenure)?;

    let old_salary = employee.salary();
    let new_salary = policy.adjusted_salary(old_salary, evaluation.total_percent)?;
    let capped = if old_salary >= policy.salary_cap {
        evaluation.total_percent > 0
    } else {
        new_salary != old_salary.increased_by_percent(evaluation.total_percent)?
    };

    Ok(EmployeeAdjustment {
        employee_id: employee.id_typed(),
        old_salary,
        new_salary,
        percent_applied: evaluation.total_percent,
        evaluation,
        capped,
    })
}

/// Compute adjustments for a department snapshot.
///
/// Fails as a whole if any employee cannot be evaluated (e.g. a joining date in
/// the future); nothing is partially planned.
pub fn plan_batch(
    policy: &AdjustmentPolicy,
    department_id: DepartmentId,
    employees: &[Employee],
    score: PerformanceScore,
    at: DateTime<Utc>,
) -> DomainResult<AdjustmentResult> {
    let adjustments = employees
        .iter()
        .map(|e| plan_employee(policy, e, score, at))
        .collect::<DomainResult<Vec<_>>>()?;

    Ok(AdjustmentResult {
        department_id,
        performance_score: score,
        employees_affected: adjustments.len(),
        adjustments,
    })
}

/// Ledger entry: one successfully applied batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdjustmentEvent {
    pub adjustment_id: AdjustmentId,
    pub department_id: DepartmentId,
    pub performance_score: PerformanceScore,
    pub employees_affected: usize,
    pub occurred_at: DateTime<Utc>,
}

impl AdjustmentEvent {
    pub fn for_result(result: &AdjustmentResult, occurred_at: DateTime<Utc>) -> Self {
        Self {
            adjustment_id: AdjustmentId::new(),
            department_id: result.department_id,
            performance_score: result.performance_score,
            employees_affected: result.employees_affected,
            occurred_at,
        }
    }
}

impl Event for AdjustmentEvent {
    fn event_type(&self) -> &'static str {
        "compensation.adjustment.applied"
    }

    fn version(&self) -> u32 {
        1
    }

    fn occurred_at(&self) -> DateTime<Utc> {
        self.occurred_at
    }
}
