//! Snaks: single property/value assertions.

use crate::id::EntityId;
use crate::value::DataValue;

/// A single assertion about a property.
///
/// Besides carrying a concrete value, a snak can assert that a
/// property has no value at all, or that it has some unknown value.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Snak {
    /// The property has this value.
    Value {
        /// The property this assertion is about.
        property: EntityId,
        /// The asserted value.
        value: DataValue,
    },
    /// The property is known to have no value.
    NoValue {
        /// The property this assertion is about.
        property: EntityId,
    },
    /// The property has some value that is not known.
    SomeValue {
        /// The property this assertion is about.
        property: EntityId,
    },
}

impl Snak {
    /// Creates a value snak.
    pub fn value(property: EntityId, value: DataValue) -> Self {
        Snak::Value { property, value }
    }

    /// Creates a no-value snak.
    pub fn no_value(property: EntityId) -> Self {
        Snak::NoValue { property }
    }

    /// Creates a some-value snak.
    pub fn some_value(property: EntityId) -> Self {
        Snak::SomeValue { property }
    }

    /// Returns the property this snak is about.
    pub fn property(&self) -> &EntityId {
        match self {
            Snak::Value { property, .. }
            | Snak::NoValue { property }
            | Snak::SomeValue { property } => property,
        }
    }

    /// Returns the carried value, if this is a value snak.
    pub fn data_value(&self) -> Option<&DataValue> {
        match self {
            Snak::Value { value, .. } => Some(value),
            _ => None,
        }
    }
}
