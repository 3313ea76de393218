//! Compensation domain module (salary adjustments).
//!
//! This crate contains the business rules for performance-based salary
//! adjustments, implemented purely as deterministic domain logic (no IO, no HTTP,
//! no storage). Orchestration against the employee directory and the ledger lives
//! in `payroll-infra`.

pub mod adjustment;
pub mod employee;
pub mod rules;
pub mod tenure;

pub use adjustment::{
    AdjustmentEvent, AdjustmentResult, EmployeeAdjustment, plan_batch, plan_employee,
};
pub use employee::{Department, Employee};
pub use rules::{
    AdjustmentPolicy, Evaluation, PerformanceScore, SALARY_CAP, TENURE_BONUS_PERCENT,
    TENURE_BONUS_THRESHOLD_YEARS, Tier, evaluate,
};
pub use tenure::{years_of_tenure, years_of_tenure_at};
