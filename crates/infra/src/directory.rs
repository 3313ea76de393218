//! Employee directory boundary.
//!
//! The directory owns employees and departments; the adjustment engine only reads
//! a department snapshot and writes back salaries.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use thiserror::Error;

use payroll_compensation::{Department, Employee};
use payroll_core::{DepartmentId, EmployeeId, Money};

/// Directory operation error.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DirectoryError {
    #[error("employee not found: {0}")]
    NotFound(EmployeeId),

    #[error("department not found: {0}")]
    UnknownDepartment(DepartmentId),

    #[error("invalid record: {0}")]
    Invalid(String),

    /// A uniqueness rule (department id/code, employee email) would be broken.
    #[error("conflict: {0}")]
    Conflict(String),

    #[error("directory unavailable: {0}")]
    Unavailable(String),
}

/// Read/write access to employees, as needed by salary adjustments.
///
/// Implementations must:
/// - return only employees currently assigned to the requested department
/// - fail `update_salary` with `NotFound` for unknown employees (never upsert)
pub trait EmployeeDirectory: Send + Sync {
    fn find_department(&self, id: DepartmentId) -> Result<Option<Department>, DirectoryError>;

    /// Employees of a department. Ordering is unspecified.
    fn list_by_department(&self, id: DepartmentId) -> Result<Vec<Employee>, DirectoryError>;

    fn update_salary(&self, employee_id: EmployeeId, new_salary: Money)
    -> Result<(), DirectoryError>;
}

impl<S> EmployeeDirectory for Arc<S>
where
    S: EmployeeDirectory + ?Sized,
{
    fn find_department(&self, id: DepartmentId) -> Result<Option<Department>, DirectoryError> {
        (**self).find_department(id)
    }

    fn list_by_department(&self, id: DepartmentId) -> Result<Vec<Employee>, DirectoryError> {
        (**self).list_by_department(id)
    }

    fn update_salary(
        &self,
        employee_id: EmployeeId,
        new_salary: Money,
    ) -> Result<(), DirectoryError> {
        (**self).update_salary(employee_id, new_salary)
    }
}

#[derive(Debug, Default)]
struct DirectoryState {
    departments: HashMap<DepartmentId, Department>,
    employees: HashMap<EmployeeId, Employee>,
}

/// In-memory employee directory.
///
/// Intended for tests/dev and the demo server. Enforces the department
/// reference invariant on insert.
#[derive(Debug, Default)]
pub struct InMemoryEmployeeDirectory {
    state: RwLock<DirectoryState>,
}

fn poisoned() -> DirectoryError {
    DirectoryError::Unavailable("lock poisoned".to_string())
}

impl InMemoryEmployeeDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a department. Ids and codes are unique.
    pub fn insert_department(&self, department: Department) -> Result<(), DirectoryError> {
        let mut state = self.state.write().map_err(|_| poisoned())?;
        if state.departments.contains_key(&department.id_typed()) {
            return Err(DirectoryError::Conflict(format!(
                "department {} already exists",
                department.id_typed()
            )));
        }
        if state
            .departments
            .values()
            .any(|d| d.code().eq_ignore_ascii_case(department.code()))
        {
            return Err(DirectoryError::Conflict(format!(
                "department code '{}' is already in use",
                department.code()
            )));
        }
        state.departments.insert(department.id_typed(), department);
        Ok(())
    }

    /// Insert or replace an employee. The department must already exist and the
    /// email must not belong to another employee (compared case-insensitively).
    pub fn insert_employee(&self, employee: Employee) -> Result<(), DirectoryError> {
        let mut state = self.state.write().map_err(|_| poisoned())?;
        if !state.departments.contains_key(&employee.department_id()) {
            return Err(DirectoryError::UnknownDepartment(employee.department_id()));
        }
        let email = employee.email().trim();
        let taken = state.employees.values().any(|e| {
            e.id_typed() != employee.id_typed() && e.email().trim().eq_ignore_ascii_case(email)
        });
        if taken {
            return Err(DirectoryError::Conflict(format!(
                "email '{email}' is already in use"
            )));
        }
        state.employees.insert(employee.id_typed(), employee);
        Ok(())
    }

    pub fn remove_employee(&self, employee_id: EmployeeId) -> Result<Employee, DirectoryError> {
        let mut state = self.state.write().map_err(|_| poisoned())?;
        state
            .employees
            .remove(&employee_id)
            .ok_or(DirectoryError::NotFound(employee_id))
    }

    pub fn employee(&self, employee_id: EmployeeId) -> Result<Option<Employee>, DirectoryError> {
        let state = self.state.read().map_err(|_| poisoned())?;
        Ok(state.employees.get(&employee_id).cloned())
    }

    pub fn departments(&self) -> Result<Vec<Department>, DirectoryError> {
        let state = self.state.read().map_err(|_| poisoned())?;
        let mut all: Vec<_> = state.departments.values().cloned().collect();
        all.sort_by(|a, b| a.code().cmp(b.code()));
        Ok(all)
    }
}

impl EmployeeDirectory for InMemoryEmployeeDirectory {
    fn find_department(&self, id: DepartmentId) -> Result<Option<Department>, DirectoryError> {
        let state = self.state.read().map_err(|_| poisoned())?;
        Ok(state.departments.get(&id).cloned())
    }

    fn list_by_department(&self, id: DepartmentId) -> Result<Vec<Employee>, DirectoryError> {
        let state = self.state.read().map_err(|_| poisoned())?;
        if !state.departments.contains_key(&id) {
            return Err(DirectoryError::UnknownDepartment(id));
        }
        Ok(state
            .employees
            .values()
            .filter(|e| e.department_id() == id)
            .cloned()
            .collect())
    }

    fn update_salary(
        &self,
        employee_id: EmployeeId,
        new_salary: Money,
    ) -> Result<(), DirectoryError> {
        let mut state = self.state.write().map_err(|_| poisoned())?;
        let current = state
            .employees
            .remove(&employee_id)
            .ok_or(DirectoryError::NotFound(employee_id))?;

        match current.clone().with_salary(new_salary) {
            Ok(updated) => {
                state.employees.insert(employee_id, updated);
                Ok(())
            }
            Err(e) => {
                state.employees.insert(employee_id, current);
                Err(DirectoryError::Invalid(e.to_string()))
            }
        }
    }
}
