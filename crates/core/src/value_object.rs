//! Value object trait: equality by value, not identity.

/// Marker trait for value objects.
///
/// Value objects are immutable and compared by their attribute values. To
/// "modify" one, build a new one (`Money::checked_add` returns a fresh amount).
///
/// ```
/// use teller_core::{Money, ValueObject};
///
/// fn same<V: ValueObject>(a: &V, b: &V) -> bool {
///     a == b
/// }
///
/// assert!(same(&Money::from_cents(100), &"1.00".parse().unwrap()));
/// ```
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
