//! Value object trait: equality by value, not identity.

/// Marker trait for value objects.
///
/// Value objects are **immutable** and **compared by value**. A roll's length
/// is a value object; the roll itself is an entity.
///
/// To "modify" a value object, build a new one. Immutability is what lets the
/// analytics engine share values across threads without locking.
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
