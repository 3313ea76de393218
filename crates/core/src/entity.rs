//! Entity trait: identity + continuity across state changes.

/// Entity marker + minimal interface.
///
/// Employees and departments are entities: two records with the same id are the
/// same employee even if the salary differs between snapshots.
pub trait Entity {
    /// Strongly-typed entity identifier.
    type Id: Clone + Eq + core::hash::Hash + core::fmt::Debug;

    /// Returns the entity identifier.
    fn id(&self) -> &Self::Id;
}
