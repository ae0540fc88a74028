//! Value object trait: equality by value, not identity.

/// Marker trait for value objects.
///
/// Value objects have no identity and are never mutated in place: audit
/// entries, receipts and redemption results are all values. Two entries with
/// the same operation tag and amount are equal.
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
