//! Value object trait: equality by value, not identity.

/// Marker trait for value objects.
///
/// Value objects have no identity and are compared by their attribute values. They are
/// immutable: "changing" one means building a new value.
///
/// ```ignore
/// #[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// struct Amount(Decimal);
///
/// impl ValueObject for Amount {}
///
/// assert_eq!(Amount::new(dec!(10)), Amount::new(dec!(10.00)));
/// ```
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
