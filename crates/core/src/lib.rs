//! `payroll-core`: domain foundation building blocks.
//!
//! This crate contains **pure domain** primitives (no infrastructure concerns):
//! identifiers, money, the domain error model and the entity/value/event traits
//! the compensation crate builds on.

pub mod entity;
pub mod error;
pub mod event;
pub mod id;
pub mod money;
pub mod value_object;

pub use entity::Entity;
pub use error::{DomainError, DomainResult};
pub use event::Event;
pub use id::{AdjustmentId, DepartmentId, EmployeeId};
pub use money::Money;
pub use value_object::ValueObject;
