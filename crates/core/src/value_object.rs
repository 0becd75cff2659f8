//! Value object trait: equality by value, not identity.

/// Marker trait for value objects.
///
/// Value objects carry no identity; two instances holding the same values are
/// interchangeable. Inventory line items and their derived reconciliation
/// figures are value objects: they are produced from fetched data, compared
/// by value in tests and discarded once displayed.
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
