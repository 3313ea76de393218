//! Per-department run serialization.
//!
//! Two adjustment runs for the same department would snapshot the same "old"
//! salaries and race on the writes. The registry admits at most one in-flight run
//! per department; a second caller is turned away immediately rather than queued.

use std::collections::HashSet;
use std::sync::{Arc, Mutex, MutexGuard};

use payroll_core::DepartmentId;

/// Registry of departments with a run in progress.
///
/// Cheap to clone; clones share the same registry, so executors built over the
/// same directory should share one instance.
#[derive(Debug, Clone, Default)]
pub struct DepartmentLocks {
    in_flight: Arc<Mutex<HashSet<DepartmentId>>>,
}

impl DepartmentLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claim `department_id`, or `None` if a run already holds it.
    ///
    /// The claim is released when the returned guard is dropped.
    pub fn try_acquire(&self, department_id: DepartmentId) -> Option<DepartmentLockGuard> {
        let mut in_flight = lock_set(&self.in_flight);
        if !in_flight.insert(department_id) {
            return None;
        }
        Some(DepartmentLockGuard {
            in_flight: Arc::clone(&self.in_flight),
            department_id,
        })
    }

    pub fn is_locked(&self, department_id: DepartmentId) -> bool {
        lock_set(&self.in_flight).contains(&department_id)
    }
}

// The set stays consistent even if a holder panicked, so poisoning is ignored.
fn lock_set(set: &Mutex<HashSet<DepartmentId>>) -> MutexGuard<'_, HashSet<DepartmentId>> {
    set.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// RAII claim on one department.
#[derive(Debug)]
pub struct DepartmentLockGuard {
    in_flight: Arc<Mutex<HashSet<DepartmentId>>>,
    department_id: DepartmentId,
}

impl Drop for DepartmentLockGuard {
    fn drop(&mut self) {
        lock_set(&self.in_flight).remove(&self.department_id);
    }
}
