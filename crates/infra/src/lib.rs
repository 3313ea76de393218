//! Infrastructure layer: collaborator boundaries, in-memory stores, run
//! orchestration and configuration.

pub mod config;
pub mod directory;
pub mod executor;
pub mod ledger;
pub mod locks;
pub mod reporting;


pub use config::ExecutorConfig;
pub use directory::{DirectoryError, EmployeeDirectory, InMemoryEmployeeDirectory};
pub use executor::{AdjustmentError, AdjustmentExecutor, BatchControl};
pub use ledger::{AdjustmentLedger, InMemoryAdjustmentLedger, LedgerError};
pub use locks::{DepartmentLockGuard, DepartmentLocks};
pub use reporting::{AdjustmentStats, adjustment_stats};
