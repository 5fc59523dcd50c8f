//! Value object trait: equality by value, not identity.

/// Marker trait for value objects.
///
/// Value objects have no identity and are compared by their attribute values.
/// `Money` is the canonical example in this domain: two amounts of 100 are the
/// same amount, whereas two borrowers named "Acme" are still two borrowers.
///
/// To "modify" a value object, build a new one (`Money::add` returns a fresh
/// value rather than mutating in place).
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
