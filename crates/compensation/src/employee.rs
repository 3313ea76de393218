use chrono::NaiveDate;
use serde::Serialize;

use payroll_core::{DepartmentId, DomainError, DomainResult, EmployeeId, Entity, Money};

/// Organizational unit employees belong to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Department {
    id: DepartmentId,
    name: String,
    code: String,
}

impl Department {
    pub fn new(
        id: DepartmentId,
        name: impl Into<String>,
        code: impl Into<String>,
    ) -> DomainResult<Self> {
        let name = name.into();
        let code = code.into();
        if name.trim().is_empty() {
            return Err(DomainError::validation("department name cannot be empty"));
        }
        if code.trim().is_empty() {
            return Err(DomainError::validation("department code cannot be empty"));
        }
        Ok(Self { id, name, code })
    }

    pub fn id_typed(&self) -> DepartmentId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn code(&self) -> &str {
        &self.code
    }
}

impl Entity for Department {
    type Id = DepartmentId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

/// Employee as seen by the adjustment engine.
///
/// The directory owns the lifecycle; the engine only reads salary and joining
/// date and produces a new salary via [`Employee::with_salary`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Employee {
    id: EmployeeId,
    name: String,
    email: String,
    salary: Money,
    joining_date: NaiveDate,
    department_id: DepartmentId,
}

impl Employee {
    pub fn new(
        id: EmployeeId,
        name: impl Into<String>,
        email: impl Into<String>,
        salary: Money,
        joining_date: NaiveDate,
        department_id: DepartmentId,
    ) -> DomainResult<Self> {
        let name = name.into();
        let email = email.into();
        if name.trim().is_empty() {
            return Err(DomainError::validation("employee name cannot be empty"));
        }
        if email.trim().is_empty() {
            return Err(DomainError::validation("employee email cannot be empty"));
        }
        if salary.is_negative() {
            return Err(DomainError::validation(format!(
                "salary cannot be negative (got {salary})"
            )));
        }

        Ok(Self {
            id,
            name,
            email,
            salary,
            joining_date,
            department_id,
        })
    }

    pub fn id_typed(&self) -> EmployeeId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn salary(&self) -> Money {
        self.salary
    }

    pub fn joining_date(&self) -> NaiveDate {
        self.joining_date
    }

    pub fn department_id(&self) -> DepartmentId {
        self.department_id
    }

    pub fn with_salary(self, salary: Money) -> DomainResult<Self> {
        if salary.is_negative() {
            return Err(DomainError::validation(format!(
                "salary cannot be negative (got {salary})"
            )));
        }
        Ok(Self { salary, ..self })
    }
}

impl Entity for Employee {
    type Id = EmployeeId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}
