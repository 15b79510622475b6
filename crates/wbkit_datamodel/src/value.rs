//! The closed set of data value kinds.

use crate::id::EntityId;
use crate::term::Term;
use std::hash::{Hash, Hasher};

/// A quantity with an optional uncertainty interval.
///
/// Amounts and bounds are kept as signed decimal strings (`"+42"`,
/// `"-0.5"`) so that no precision is lost between decode and encode.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QuantityValue {
    amount: String,
    unit: String,
    lower_bound: Option<String>,
    upper_bound: Option<String>,
}

impl QuantityValue {
    /// Creates a quantity without bounds.
    ///
    /// The unit is an entity IRI, or `"1"` for dimensionless values.
    pub fn new(amount: impl Into<String>, unit: impl Into<String>) -> Self {
        Self {
            amount: amount.into(),
            unit: unit.into(),
            lower_bound: None,
            upper_bound: None,
        }
    }

    /// Sets the uncertainty interval.
    pub fn with_bounds(
        mut self,
        lower_bound: impl Into<String>,
        upper_bound: impl Into<String>,
    ) -> Self {
        self.lower_bound = Some(lower_bound.into());
        self.upper_bound = Some(upper_bound.into());
        self
    }

    /// Returns the signed decimal amount string.
    pub fn amount(&self) -> &str {
        &self.amount
    }

    /// Returns the unit IRI, or `"1"` for no unit.
    pub fn unit(&self) -> &str {
        &self.unit
    }

    /// Returns the lower bound, if any.
    pub fn lower_bound(&self) -> Option<&str> {
        self.lower_bound.as_deref()
    }

    /// Returns the upper bound, if any.
    pub fn upper_bound(&self) -> Option<&str> {
        self.upper_bound.as_deref()
    }
}

/// A point in time with precision and calendar model.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TimeValue {
    time: String,
    timezone: i32,
    before: u32,
    after: u32,
    precision: u8,
    calendar_model: String,
}

impl TimeValue {
    /// Day precision, the most common case.
    pub const PRECISION_DAY: u8 = 11;
    /// Year precision.
    pub const PRECISION_YEAR: u8 = 9;

    /// Creates a time value.
    ///
    /// The time string uses the signed extended ISO form the wire
    /// format expects, e.g. `"+2020-01-15T00:00:00Z"`.
    pub fn new(
        time: impl Into<String>,
        timezone: i32,
        before: u32,
        after: u32,
        precision: u8,
        calendar_model: impl Into<String>,
    ) -> Self {
        Self {
            time: time.into(),
            timezone,
            before,
            after,
            precision,
            calendar_model: calendar_model.into(),
        }
    }

    /// Returns the time string.
    pub fn time(&self) -> &str {
        &self.time
    }

    /// Returns the timezone offset in minutes.
    pub fn timezone(&self) -> i32 {
        self.timezone
    }

    /// Returns the tolerance before the given time, in precision units.
    pub fn before(&self) -> u32 {
        self.before
    }

    /// Returns the tolerance after the given time, in precision units.
    pub fn after(&self) -> u32 {
        self.after
    }

    /// Returns the precision code.
    pub fn precision(&self) -> u8 {
        self.precision
    }

    /// Returns the calendar model IRI.
    pub fn calendar_model(&self) -> &str {
        &self.calendar_model
    }
}

/// A coordinate on a globe.
#[derive(Debug, Clone)]
pub struct GlobeCoordinateValue {
    latitude: f64,
    longitude: f64,
    precision: f64,
    globe: String,
}

impl GlobeCoordinateValue {
    /// Creates a globe coordinate.
    pub fn new(latitude: f64, longitude: f64, precision: f64, globe: impl Into<String>) -> Self {
        Self {
            latitude,
            longitude,
            precision,
            globe: globe.into(),
        }
    }

    /// Returns the latitude in degrees.
    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    /// Returns the longitude in degrees.
    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    /// Returns the precision in degrees.
    pub fn precision(&self) -> f64 {
        self.precision
    }

    /// Returns the globe IRI.
    pub fn globe(&self) -> &str {
        &self.globe
    }
}

// Coordinates compare and hash by bit pattern so that documents
// containing them keep full structural equality and hashing.
impl PartialEq for GlobeCoordinateValue {
    fn eq(&self, other: &Self) -> bool {
        self.latitude.to_bits() == other.latitude.to_bits()
            && self.longitude.to_bits() == other.longitude.to_bits()
            && self.precision.to_bits() == other.precision.to_bits()
            && self.globe == other.globe
    }
}

impl Eq for GlobeCoordinateValue {}

impl Hash for GlobeCoordinateValue {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.latitude.to_bits().hash(state);
        self.longitude.to_bits().hash(state);
        self.precision.to_bits().hash(state);
        self.globe.hash(state);
    }
}

/// One of the fixed, closed set of value kinds a snak can carry.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum DataValue {
    /// A reference to another entity.
    Entity(EntityId),
    /// A plain string.
    Text(String),
    /// A string in a specific language.
    Monolingual(Term),
    /// A quantity with unit and optional bounds.
    Quantity(QuantityValue),
    /// A point in time.
    Time(TimeValue),
    /// A coordinate on a globe.
    Coordinate(GlobeCoordinateValue),
}
