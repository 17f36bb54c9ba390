//! Tri-state numeric fields and the pressure/volume/temperature bundle.

use gc_core::{Real, Tolerances, nearly_equal};

/// One of the three core state properties of a point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PropKind {
    Pressure,
    Volume,
    Temperature,
}

impl PropKind {
    /// Order in which properties are given up when one must be re-derived.
    ///
    /// Volume is the most authoritative property, temperature the least.
    pub const REDERIVE_ORDER: [PropKind; 3] =
        [PropKind::Temperature, PropKind::Pressure, PropKind::Volume];

    pub fn as_str(&self) -> &'static str {
        match self {
            PropKind::Pressure => "pressure",
            PropKind::Volume => "volume",
            PropKind::Temperature => "temperature",
        }
    }
}

/// A numeric field that is either known or explicitly unknown.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Prop {
    Known(Real),
    #[default]
    Unknown,
}

impl Prop {
    pub fn value(self) -> Option<Real> {
        match self {
            Prop::Known(v) => Some(v),
            Prop::Unknown => None,
        }
    }

    pub fn is_known(self) -> bool {
        matches!(self, Prop::Known(_))
    }

    /// Known only if finite.
    pub fn finite(v: Real) -> Self {
        if v.is_finite() {
            Prop::Known(v)
        } else {
            Prop::Unknown
        }
    }

    fn same_as(self, other: Prop, tol: Tolerances) -> bool {
        match (self, other) {
            (Prop::Known(a), Prop::Known(b)) => nearly_equal(a, b, tol),
            (Prop::Unknown, Prop::Unknown) => true,
            _ => false,
        }
    }
}

impl From<Real> for Prop {
    fn from(v: Real) -> Self {
        Prop::Known(v)
    }
}

impl From<Option<Real>> for Prop {
    fn from(v: Option<Real>) -> Self {
        v.map_or(Prop::Unknown, Prop::Known)
    }
}

/// Caller intent for one field of a patch.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Edit {
    /// Leave the stored value alone.
    #[default]
    Keep,
    Set(Real),
    /// Mark the field unknown.
    Clear,
}

impl Edit {
    pub fn apply(self, current: Prop) -> Prop {
        match self {
            Edit::Keep => current,
            Edit::Set(v) => Prop::Known(v),
            Edit::Clear => Prop::Unknown,
        }
    }

    pub fn is_set(self) -> bool {
        matches!(self, Edit::Set(_))
    }

    pub fn is_keep(self) -> bool {
        matches!(self, Edit::Keep)
    }
}

impl From<Option<Real>> for Edit {
    /// `Some` sets, `None` clears.
    fn from(v: Option<Real>) -> Self {
        v.map_or(Edit::Clear, Edit::Set)
    }
}

/// Pressure [Pa], volume [m³] and temperature [K] of a single state point.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Pvt {
    pub pressure: Prop,
    pub volume: Prop,
    pub temperature: Prop,
}

impl Pvt {
    pub fn new(pressure: Real, volume: Real, temperature: Real) -> Self {
        Self {
            pressure: Prop::Known(pressure),
            volume: Prop::Known(volume),
            temperature: Prop::Known(temperature),
        }
    }

    pub fn get(&self, kind: PropKind) -> Prop {
        match kind {
            PropKind::Pressure => self.pressure,
            PropKind::Volume => self.volume,
            PropKind::Temperature => self.temperature,
        }
    }

    pub fn set(&mut self, kind: PropKind, value: Prop) {
        match kind {
            PropKind::Pressure => self.pressure = value,
            PropKind::Volume => self.volume = value,
            PropKind::Temperature => self.temperature = value,
        }
    }

    pub fn with(mut self, kind: PropKind, value: Prop) -> Self {
        self.set(kind, value);
        self
    }

    pub fn unknowns(&self) -> impl Iterator<Item = PropKind> + '_ {
        PropKind::REDERIVE_ORDER
            .into_iter()
            .filter(|k| !self.get(*k).is_known())
    }

    pub fn unknown_count(&self) -> usize {
        self.unknowns().count()
    }

    pub fn is_complete(&self) -> bool {
        self.unknown_count() == 0
    }

    /// True if any property moved beyond `tol` or changed between known and unknown.
    pub fn differs_from(&self, other: &Pvt, tol: Tolerances) -> bool {
        PropKind::REDERIVE_ORDER
            .into_iter()
            .any(|k| !self.get(k).same_as(other.get(k), tol))
    }
}
