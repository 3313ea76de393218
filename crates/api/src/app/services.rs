//! Collaborator wiring shared by all handlers.

use std::sync::Arc;

use payroll_infra::{
    AdjustmentExecutor, ExecutorConfig, InMemoryAdjustmentLedger, InMemoryEmployeeDirectory,
};

pub type Directory = Arc<InMemoryEmployeeDirectory>;
pub type Ledger = Arc<InMemoryAdjustmentLedger>;
pub type Executor = AdjustmentExecutor<Directory, Ledger>;

/// In-memory directory and ledger, plus the executor running over them.
///
/// Handlers read through `directory()` / `ledger()` and mutate only through the
/// executor.
pub struct AppServices {
    directory: Directory,
    ledger: Ledger,
    executor: Executor,
}

impl AppServices {
    pub fn new(config: ExecutorConfig) -> Self {
        let directory: Directory = Arc::new(InMemoryEmployeeDirectory::new());
        let ledger: Ledger = Arc::new(InMemoryAdjustmentLedger::new());
        let executor = AdjustmentExecutor::new(Arc::clone(&directory), Arc::clone(&ledger))
            .with_config(config);

        Self {
            directory,
            ledger,
            executor,
        }
    }

    pub fn directory(&self) -> &InMemoryEmployeeDirectory {
        &self.directory
    }

    pub fn ledger(&self) -> &InMemoryAdjustmentLedger {
        &self.ledger
    }

    pub fn executor(&self) -> &Executor {
        &self.executor
    }
}

impl Default for AppServices {
    fn default() -> Self {
        Self::new(ExecutorConfig::default())
    }
}
