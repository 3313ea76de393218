//! Value object trait: equality by value, not identity.

/// Marker trait for value objects.
///
/// Value objects have **no identity**: two salaries of `120000.00` are the same
/// salary, and a performance score of `95` is interchangeable with any other `95`.
/// They are immutable; "changing" one means building a new value.
///
/// ```ignore
/// let a = Money::from_cents(12_000_000);
/// let b = Money::from_major(120_000)?;
/// assert_eq!(a, b);
/// ```
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
