//! Append-only adjustment ledger boundary.

use std::sync::{Arc, RwLock};

use thiserror::Error;

use payroll_compensation::AdjustmentEvent;
use payroll_core::{AdjustmentId, DepartmentId};

/// Ledger operation error.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LedgerError {
    /// An entry with this id was already recorded (entries are immutable).
    #[error("adjustment already recorded: {0}")]
    AlreadyRecorded(AdjustmentId),

    #[error("ledger unavailable: {0}")]
    Unavailable(String),
}

/// Append-only store of completed adjustment batches.
///
/// Entries are never mutated or deleted. `list_all` returns entries in append
/// order and feeds reporting; the executor only reads it for the duplicate guard.
pub trait AdjustmentLedger: Send + Sync {
    fn append(&self, event: AdjustmentEvent) -> Result<(), LedgerError>;

    fn list_all(&self) -> Result<Vec<AdjustmentEvent>, LedgerError>;

    fn list_by_department(
        &self,
        department_id: DepartmentId,
    ) -> Result<Vec<AdjustmentEvent>, LedgerError> {
        Ok(self
            .list_all()?
            .into_iter()
            .filter(|e| e.department_id == department_id)
            .collect())
    }
}

impl<S> AdjustmentLedger for Arc<S>
where
    S: AdjustmentLedger + ?Sized,
{
    fn append(&self, event: AdjustmentEvent) -> Result<(), LedgerError> {
        (**self).append(event)
    }

    fn list_all(&self) -> Result<Vec<AdjustmentEvent>, LedgerError> {
        (**self).list_all()
    }

    fn list_by_department(
        &self,
        department_id: DepartmentId,
    ) -> Result<Vec<AdjustmentEvent>, LedgerError> {
        (**self).list_by_department(department_id)
    }
}

/// In-memory append-only ledger.
///
/// Intended for tests/dev. Not optimized for performance.
#[derive(Debug, Default)]
pub struct InMemoryAdjustmentLedger {
    entries: RwLock<Vec<AdjustmentEvent>>,
}

impl InMemoryAdjustmentLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.read().map(|e| e.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl AdjustmentLedger for InMemoryAdjustmentLedger {
    fn append(&self, event: AdjustmentEvent) -> Result<(), LedgerError> {
        let mut entries = self
            .entries
            .write()
            .map_err(|_| LedgerError::Unavailable("lock poisoned".to_string()))?;

        if entries.iter().any(|e| e.adjustment_id == event.adjustment_id) {
            return Err(LedgerError::AlreadyRecorded(event.adjustment_id));
        }
        entries.push(event);
        Ok(())
    }

    fn list_all(&self) -> Result<Vec<AdjustmentEvent>, LedgerError> {
        let entries = self
            .entries
            .read()
            .map_err(|_| LedgerError::Unavailable("lock poisoned".to_string()))?;
        Ok(entries.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use payroll_compensation::PerformanceScore;

    fn event(dept: DepartmentId, score: i64) -> AdjustmentEvent {
        AdjustmentEvent {
            adjustment_id: AdjustmentId::new(),
            department_id: dept,
            performance_score: PerformanceScore::new(score).unwrap(),
            employees_affected: 3,
            occurred_at: Utc::now(),
        }
    }

    #[test]
    fn append_preserves_order() {
        let ledger = InMemoryAdjustmentLedger::new();
        let dept = DepartmentId::new();
        let first = event(dept, 70);
        let second = event(dept, 90);

        ledger.append(first.clone()).unwrap();
        ledger.append(second.clone()).unwrap();

        assert_eq!(ledger.list_all().unwrap(), vec![first, second]);
        assert_eq!(ledger.len(), 2);
    }

    #[test]
    fn same_entry_cannot_be_recorded_twice() {
        let ledger = InMemoryAdjustmentLedger::new();
        let ev = event(DepartmentId::new(), 80);
        ledger.append(ev.clone()).unwrap();

        assert_eq!(
            ledger.append(ev.clone()).unwrap_err(),
            LedgerError::AlreadyRecorded(ev.adjustment_id)
        );
        assert_eq!(ledger.len(), 1);
    }

    #[test]
    fn filters_by_department() {
        let ledger = InMemoryAdjustmentLedger::new();
        let a = DepartmentId::new();
        let b = DepartmentId::new();
        ledger.append(event(a, 50)).unwrap();
        ledger.append(event(b, 60)).unwrap();
        ledger.append(event(a, 95)).unwrap();

        let only_a = ledger.list_by_department(a).unwrap();
        assert_eq!(only_a.len(), 2);
        assert!(only_a.iter().all(|e| e.department_id == a));
    }
}
