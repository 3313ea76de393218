//! Salary adjustment execution pipeline (application-level orchestration).
//!
//! ```text
//! (department, score)
//!   ↓
//! 1. Validate score (0..=100)
//!   ↓
//! 2. Claim the department (at most one run in flight)
//!   ↓
//! 3. Refuse duplicates (same department + score inside the window)
//!   ↓
//! 4. Resolve department, snapshot its employees
//!   ↓
//! 5. Plan every employee (pure: tenure, tier, bonus, cap)
//!   ↓
//! 6. Write salaries (all or compensated)
//!   ↓
//! 7. Append one ledger entry
//! ```
//!
//! The executor composes the `EmployeeDirectory` and `AdjustmentLedger` traits and
//! contains no IO itself. The rule computation is shared with `preview`, so a
//! preview and the run that follows it cannot disagree.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};
use thiserror::Error;
use tracing::{debug, error, info, instrument, warn};

use payroll_compensation::{
    AdjustmentEvent, AdjustmentResult, EmployeeAdjustment, PerformanceScore, Tier, plan_batch,
};
use payroll_core::{DepartmentId, DomainError, EmployeeId};

use crate::config::ExecutorConfig;
use crate::directory::{DirectoryError, EmployeeDirectory};
use crate::ledger::{AdjustmentLedger, LedgerError};
use crate::locks::DepartmentLocks;

/// Adjustment run failure.
#[derive(Debug, Error)]
pub enum AdjustmentError {
    /// Score out of range, malformed employee data, etc. Nothing was changed.
    #[error("validation failed: {0}")]
    Validation(String),

    #[error("department not found: {0}")]
    DepartmentNotFound(DepartmentId),

    /// Another run for the same department is in flight. Retry later.
    #[error("an adjustment for department {0} is already in progress")]
    ConcurrentModification(DepartmentId),

    #[error(
        "adjustment for department {department_id} with score {performance_score} was already applied at {applied_at}"
    )]
    DuplicateAdjustment {
        department_id: DepartmentId,
        performance_score: PerformanceScore,
        applied_at: DateTime<Utc>,
    },

    /// The batch could not be completed. Already-applied writes were compensated;
    /// `inconsistent` lists employees whose compensation also failed and need
    /// manual reconciliation. No ledger entry was written.
    #[error("adjustment batch failed: {reason} ({} employee(s) left inconsistent)", .inconsistent.len())]
    PartialFailure {
        failed_employee: Option<EmployeeId>,
        reason: String,
        inconsistent: Vec<EmployeeId>,
    },

    /// The caller cancelled (or the deadline passed) before all writes started.
    #[error("adjustment batch cancelled after {applied} write(s) ({} employee(s) left inconsistent)", .inconsistent.len())]
    Cancelled {
        applied: usize,
        inconsistent: Vec<EmployeeId>,
    },

    #[error("invariant violated: {0}")]
    InvariantViolation(String),

    #[error("directory error: {0}")]
    Directory(DirectoryError),

    #[error("ledger error: {0}")]
    Ledger(LedgerError),
}

impl From<DomainError> for AdjustmentError {
    fn from(value: DomainError) -> Self {
        match value {
            DomainError::Validation(msg) | DomainError::InvalidId(msg) => {
                AdjustmentError::Validation(msg)
            }
            other => AdjustmentError::InvariantViolation(other.to_string()),
        }
    }
}

impl From<DirectoryError> for AdjustmentError {
    fn from(value: DirectoryError) -> Self {
        match value {
            DirectoryError::UnknownDepartment(id) => AdjustmentError::DepartmentNotFound(id),
            DirectoryError::Invalid(msg) => AdjustmentError::Validation(msg),
            other => AdjustmentError::Directory(other),
        }
    }
}

impl From<LedgerError> for AdjustmentError {
    fn from(value: LedgerError) -> Self {
        AdjustmentError::Ledger(value)
    }
}

/// Caller-side control over the write phase of a batch.
///
/// Checked only between per-employee writes: a write already handed to the
/// directory is never interrupted.
#[derive(Debug, Clone, Default)]
pub struct BatchControl {
    cancellation: Arc<AtomicBool>,
    deadline: Option<Instant>,
}

impl BatchControl {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_deadline(mut self, deadline: Instant) -> Self {
        self.deadline = Some(deadline);
        self
    }

    pub fn with_timeout(self, timeout: Duration) -> Self {
        self.with_deadline(Instant::now() + timeout)
    }

    /// Request cancellation. Clones share the flag.
    pub fn cancel(&self) {
        self.cancellation.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancellation.load(Ordering::Relaxed)
    }

    fn should_stop(&self) -> bool {
        self.is_cancelled() || self.deadline.is_some_and(|d| Instant::now() >= d)
    }
}

/// Runs department-wide salary adjustments against injected collaborators.
///
/// ## Guarantees
///
/// - **Validation first**: an invalid score never touches the directory or ledger
/// - **Serialized per department**: concurrent runs for one department fail fast
///   with `ConcurrentModification`; other departments are unaffected
/// - **Snapshot**: employees added during a run are not part of it
/// - **All or compensated**: a failed write rolls back earlier writes
/// - **One ledger entry per successful, non-empty batch**
///
/// Collaborator errors are surfaced as-is and never retried here.
#[derive(Debug)]
pub struct AdjustmentExecutor<D, L> {
    directory: D,
    ledger: L,
    locks: DepartmentLocks,
    config: ExecutorConfig,
}

impl<D, L> AdjustmentExecutor<D, L> {
    pub fn new(directory: D, ledger: L) -> Self {
        Self {
            directory,
            ledger,
            locks: DepartmentLocks::new(),
            config: ExecutorConfig::default(),
        }
    }

    pub fn with_config(mut self, config: ExecutorConfig) -> Self {
        self.config = config;
        self
    }

    /// Share a lock registry with other executors over the same directory.
    pub fn with_locks(mut self, locks: DepartmentLocks) -> Self {
        self.locks = locks;
        self
    }

    pub fn directory(&self) -> &D {
        &self.directory
    }

    pub fn ledger(&self) -> &L {
        &self.ledger
    }
}

impl<D, L> AdjustmentExecutor<D, L>
where
    D: EmployeeDirectory,
    L: AdjustmentLedger,
{
    /// Adjust salaries for `department_id` using `performance_score`, evaluated now.
    pub fn apply_adjustment(
        &self,
        department_id: DepartmentId,
        performance_score: i64,
    ) -> Result<AdjustmentResult, AdjustmentError> {
        self.apply_adjustment_at(department_id, performance_score, Utc::now(), &BatchControl::new())
    }

    /// Adjust salaries with tenure evaluated at `at` and writes governed by `control`.
    #[instrument(skip_all, fields(department_id = %department_id, score = performance_score), err)]
    pub fn apply_adjustment_at(
        &self,
        department_id: DepartmentId,
        performance_score: i64,
        at: DateTime<Utc>,
        control: &BatchControl,
    ) -> Result<AdjustmentResult, AdjustmentError> {
        // 1) Validate before anything else
        let score = PerformanceScore::new(performance_score)?;

        // 2) One run per department
        let _claim = self
            .locks
            .try_acquire(department_id)
            .ok_or(AdjustmentError::ConcurrentModification(department_id))?;

        // 3) Duplicate guard
        self.ensure_not_duplicate(department_id, score)?;

        // 4 + 5) Snapshot and plan
        let result = self.plan(department_id, score, at)?;
        if result.adjustments.is_empty() {
            warn!(%department_id, "no employees found in department; nothing to adjust");
            return Ok(result);
        }

        // 6) Write (all or compensated)
        self.write_batch(&result, control)?;

        // 7) Record the batch
        let event = AdjustmentEvent::for_result(&result, Utc::now());
        if let Err(err) = self.ledger.append(event) {
            error!(%department_id, error = %err, "ledger append failed; reverting salaries");
            let applied: Vec<&EmployeeAdjustment> = result.adjustments.iter().collect();
            let inconsistent = self.compensate(&applied);
            if inconsistent.is_empty() {
                return Err(AdjustmentError::Ledger(err));
            }
            return Err(AdjustmentError::PartialFailure {
                failed_employee: None,
                reason: format!("ledger append failed: {err}"),
                inconsistent,
            });
        }

        info!(
            %department_id,
            score = score.value(),
            employees_affected = result.employees_affected,
            "salary adjustment completed"
        );
        Ok(result)
    }

    /// Compute what `apply_adjustment` would do now, without writing anything.
    pub fn preview(
        &self,
        department_id: DepartmentId,
        performance_score: i64,
    ) -> Result<AdjustmentResult, AdjustmentError> {
        self.preview_at(department_id, performance_score, Utc::now())
    }

    pub fn preview_at(
        &self,
        department_id: DepartmentId,
        performance_score: i64,
        at: DateTime<Utc>,
    ) -> Result<AdjustmentResult, AdjustmentError> {
        let score = PerformanceScore::new(performance_score)?;
        self.plan(department_id, score, at)
    }

    fn ensure_not_duplicate(
        &self,
        department_id: DepartmentId,
        score: PerformanceScore,
    ) -> Result<(), AdjustmentError> {
        let Some(window) = self.config.duplicate_window else {
            return Ok(());
        };
        let window = chrono::Duration::from_std(window)
            .map_err(|e| AdjustmentError::InvariantViolation(format!("duplicate window: {e}")))?;
        let since = Utc::now() - window;

        let recent = self
            .ledger
            .list_by_department(department_id)?
            .into_iter()
            .filter(|e| e.performance_score == score && e.occurred_at >= since)
            .max_by_key(|e| e.occurred_at);

        match recent {
            Some(e) => Err(AdjustmentError::DuplicateAdjustment {
                department_id,
                performance_score: score,
                applied_at: e.occurred_at,
            }),
            None => Ok(()),
        }
    }

    fn plan(
        &self,
        department_id: DepartmentId,
        score: PerformanceScore,
        at: DateTime<Utc>,
    ) -> Result<AdjustmentResult, AdjustmentError> {
        if self.directory.find_department(department_id)?.is_none() {
            return Err(AdjustmentError::DepartmentNotFound(department_id));
        }

        let employees = self.directory.list_by_department(department_id)?;
        if employees.is_empty() {
            return Ok(AdjustmentResult::empty(department_id, score));
        }

        if score.tier() == Tier::NeedsImprovement {
            warn!(
                score = score.value(),
                "performance score below 70; only tenure bonuses apply"
            );
        }

        let result = plan_batch(&self.config.policy, department_id, &employees, score, at)?;
        for adj in &result.adjustments {
            if adj.evaluation.has_tenure_bonus() {
                debug!(employee_id = %adj.employee_id, "tenure bonus applies");
            }
            if adj.capped {
                debug!(employee_id = %adj.employee_id, cap = %self.config.policy.salary_cap, "salary cap applies");
            }
        }
        Ok(result)
    }

    fn write_batch(
        &self,
        result: &AdjustmentResult,
        control: &BatchControl,
    ) -> Result<(), AdjustmentError> {
        let mut applied: Vec<&EmployeeAdjustment> = Vec::with_capacity(result.adjustments.len());

        for adj in &result.adjustments {
            if control.should_stop() {
                warn!(applied = applied.len(), "batch cancelled; reverting applied writes");
                let inconsistent = self.compensate(&applied);
                return Err(AdjustmentError::Cancelled {
                    applied: applied.len(),
                    inconsistent,
                });
            }

            match self.directory.update_salary(adj.employee_id, adj.new_salary) {
                Ok(()) => {
                    info!(
                        employee_id = %adj.employee_id,
                        old_salary = %adj.old_salary,
                        new_salary = %adj.new_salary,
                        percent = adj.percent_applied,
                        "salary adjusted"
                    );
                    applied.push(adj);
                }
                Err(err) => {
                    error!(
                        employee_id = %adj.employee_id,
                        error = %err,
                        applied = applied.len(),
                        "salary write failed; reverting applied writes"
                    );
                    let inconsistent = self.compensate(&applied);
                    return Err(AdjustmentError::PartialFailure {
                        failed_employee: Some(adj.employee_id),
                        reason: err.to_string(),
                        inconsistent,
                    });
                }
            }
        }

        Ok(())
    }

    /// Best-effort restore of old salaries. Returns employees that could not be
    /// restored.
    fn compensate(&self, applied: &[&EmployeeAdjustment]) -> Vec<EmployeeId> {
        let mut inconsistent = Vec::new();
        for adj in applied.iter().rev() {
            if let Err(err) = self.directory.update_salary(adj.employee_id, adj.old_salary) {
                error!(
                    employee_id = %adj.employee_id,
                    error = %err,
                    "compensating write failed; manual reconciliation required"
                );
                inconsistent.push(adj.employee_id);
            }
        }
        inconsistent
    }
}
