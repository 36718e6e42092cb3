//! Value object trait: equality by value, not identity.
//!
//! Filter state, cart lines and checkout snapshots are value objects: two of
//! them with the same attribute values are interchangeable.

/// Marker trait for value objects.
///
/// Value objects are **immutable** and **compared by value**. To "modify" one,
/// build a new value. Handing a value object across a component boundary (for
/// example a checkout snapshot) therefore never exposes mutable state.
///
/// ```ignore
/// #[derive(Debug, Clone, PartialEq, Eq)]
/// struct LengthRange { min: u32, max: u32 }
///
/// impl ValueObject for LengthRange {}
/// ```
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
