//! State points and the process edge leaving each one.

use core::fmt;
use core::str::FromStr;

use crate::error::{CycleError, CycleResult};
use crate::prop::{Edit, Prop, PropKind, Pvt};
use gc_core::Real;
use gc_core::units::{self, Energy, Entropy, Pressure, Temperature, Volume};

/// Process connecting a point to its successor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum StepType {
    /// Unconstrained.
    #[default]
    None,
    Isobaric,
    Isochoric,
    Isothermal,
    Isentropic,
}

impl StepType {
    pub const ALL: [StepType; 5] = [
        StepType::None,
        StepType::Isobaric,
        StepType::Isochoric,
        StepType::Isothermal,
        StepType::Isentropic,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            StepType::None => "none",
            StepType::Isobaric => "isobaric",
            StepType::Isochoric => "isochoric",
            StepType::Isothermal => "isothermal",
            StepType::Isentropic => "isentropic",
        }
    }

    /// The property this process holds equal across the edge, if any.
    pub fn held_property(&self) -> Option<PropKind> {
        match self {
            StepType::Isobaric => Some(PropKind::Pressure),
            StepType::Isochoric => Some(PropKind::Volume),
            StepType::Isothermal => Some(PropKind::Temperature),
            StepType::None | StepType::Isentropic => None,
        }
    }
}

impl fmt::Display for StepType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StepType {
    type Err = CycleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        StepType::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| CycleError::InvalidStepType { name: s.to_owned() })
    }
}

/// Absolute entropy set by the caller on a point.
///
/// `revision` orders anchor writes within a cycle; the newest wins.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Anchor {
    pub value: Real,
    pub revision: u64,
}

/// Caller-supplied content for a new or replaced point.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct StepData {
    pub pvt: Pvt,
    pub step_type: StepType,
    pub static_entropy: Option<Real>,
}

impl StepData {
    pub fn new(pressure: Real, volume: Real, temperature: Real) -> Self {
        Self {
            pvt: Pvt::new(pressure, volume, temperature),
            ..Self::default()
        }
    }

    pub fn with_pressure(mut self, v: Real) -> Self {
        self.pvt.pressure = Prop::Known(v);
        self
    }

    pub fn with_volume(mut self, v: Real) -> Self {
        self.pvt.volume = Prop::Known(v);
        self
    }

    pub fn with_temperature(mut self, v: Real) -> Self {
        self.pvt.temperature = Prop::Known(v);
        self
    }

    pub fn without(mut self, kind: PropKind) -> Self {
        self.pvt.set(kind, Prop::Unknown);
        self
    }

    pub fn with_type(mut self, step_type: StepType) -> Self {
        self.step_type = step_type;
        self
    }

    /// Parse `name` into a [`StepType`].
    pub fn with_type_name(self, name: &str) -> CycleResult<Self> {
        Ok(self.with_type(name.parse()?))
    }

    pub fn with_static_entropy(mut self, s: Real) -> Self {
        self.static_entropy = Some(s);
        self
    }
}

/// Shallow, tri-state update of an existing point.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct StepPatch {
    pub pressure: Edit,
    pub volume: Edit,
    pub temperature: Edit,
    pub static_entropy: Edit,
    pub step_type: Option<StepType>,
}

impl StepPatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pressure(mut self, v: Real) -> Self {
        self.pressure = Edit::Set(v);
        self
    }

    pub fn volume(mut self, v: Real) -> Self {
        self.volume = Edit::Set(v);
        self
    }

    pub fn temperature(mut self, v: Real) -> Self {
        self.temperature = Edit::Set(v);
        self
    }

    pub fn clear(mut self, kind: PropKind) -> Self {
        *self.edit_mut(kind) = Edit::Clear;
        self
    }

    pub fn static_entropy(mut self, edit: Edit) -> Self {
        self.static_entropy = edit;
        self
    }

    pub fn step_type(mut self, step_type: StepType) -> Self {
        self.step_type = Some(step_type);
        self
    }

    /// Parse `name` into a [`StepType`]; unknown names are rejected here,
    /// before the patch can reach a cycle.
    pub fn type_name(self, name: &str) -> CycleResult<Self> {
        Ok(self.step_type(name.parse()?))
    }

    pub fn edit(&self, kind: PropKind) -> Edit {
        match kind {
            PropKind::Pressure => self.pressure,
            PropKind::Volume => self.volume,
            PropKind::Temperature => self.temperature,
        }
    }

    fn edit_mut(&mut self, kind: PropKind) -> &mut Edit {
        match kind {
            PropKind::Pressure => &mut self.pressure,
            PropKind::Volume => &mut self.volume,
            PropKind::Temperature => &mut self.temperature,
        }
    }

    /// Properties the caller supplied a value for.
    pub fn supplied(&self) -> Vec<PropKind> {
        PropKind::REDERIVE_ORDER
            .into_iter()
            .filter(|k| self.edit(*k).is_set())
            .collect()
    }

    /// True if the patch sets or clears any of pressure, volume, temperature.
    pub fn touches_pvt(&self) -> bool {
        PropKind::REDERIVE_ORDER
            .into_iter()
            .any(|k| !self.edit(k).is_keep())
    }
}

/// Derived quantities of the edge leaving a point.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct EdgeEnergy {
    /// ΔS [J/K]
    pub entropy_change: Option<Real>,
    /// Work done by the gas [J]
    pub work: Option<Real>,
    /// Heat supplied to the gas [J]
    pub heat: Option<Real>,
}

/// A state point in a cycle plus the process to its successor.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Step {
    pub(crate) pvt: Pvt,
    pub(crate) step_type: StepType,
    pub(crate) anchor: Option<Anchor>,
    pub(crate) entropy: Option<Real>,
    pub(crate) edge: EdgeEnergy,
}

impl Step {
    pub(crate) fn from_data(data: StepData, revision: u64) -> Self {
        Self {
            pvt: data.pvt,
            step_type: data.step_type,
            anchor: data.static_entropy.map(|value| Anchor { value, revision }),
            ..Self::default()
        }
    }

    pub fn pvt(&self) -> &Pvt {
        &self.pvt
    }

    /// Pressure [Pa]
    pub fn pressure(&self) -> Option<Real> {
        self.pvt.pressure.value()
    }

    /// Volume [m³]
    pub fn volume(&self) -> Option<Real> {
        self.pvt.volume.value()
    }

    /// Temperature [K]
    pub fn temperature(&self) -> Option<Real> {
        self.pvt.temperature.value()
    }

    pub fn step_type(&self) -> StepType {
        self.step_type
    }

    pub fn anchor(&self) -> Option<Anchor> {
        self.anchor
    }

    pub fn static_entropy(&self) -> Option<Real> {
        self.anchor.map(|a| a.value)
    }

    /// Absolute entropy [J/K], if reachable from an anchor.
    pub fn entropy(&self) -> Option<Real> {
        self.entropy
    }

    pub fn entropy_change(&self) -> Option<Real> {
        self.edge.entropy_change
    }

    pub fn work(&self) -> Option<Real> {
        self.edge.work
    }

    pub fn heat(&self) -> Option<Real> {
        self.edge.heat
    }

    pub fn pressure_si(&self) -> Option<Pressure> {
        self.pressure().map(units::pa)
    }

    pub fn volume_si(&self) -> Option<Volume> {
        self.volume().map(units::m3)
    }

    pub fn temperature_si(&self) -> Option<Temperature> {
        self.temperature().map(units::k)
    }

    pub fn entropy_si(&self) -> Option<Entropy> {
        self.entropy.map(units::j_per_k)
    }

    pub fn entropy_change_si(&self) -> Option<Entropy> {
        self.edge.entropy_change.map(units::j_per_k)
    }

    pub fn work_si(&self) -> Option<Energy> {
        self.edge.work.map(units::j)
    }

    pub fn heat_si(&self) -> Option<Energy> {
        self.edge.heat.map(units::j)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_all_names() {
        for t in StepType::ALL {
            assert_eq!(t.as_str().parse::<StepType>().unwrap(), t);
        }
    }

    #[test]
    fn rejects_unknown_names() {
        let err = "myInvalidType".parse::<StepType>().unwrap_err();
        assert_eq!(
            err,
            CycleError::InvalidStepType {
                name: "myInvalidType".into()
            }
        );
        // Names are matched exactly.
        assert!("Isobaric".parse::<StepType>().is_err());
        assert!(StepPatch::new().type_name("adiabatic").is_err());
    }

    #[test]
    fn held_property_per_process() {
        assert_eq!(StepType::Isobaric.held_property(), Some(PropKind::Pressure));
        assert_eq!(StepType::Isochoric.held_property(), Some(PropKind::Volume));
        assert_eq!(
            StepType::Isothermal.held_property(),
            Some(PropKind::Temperature)
        );
        assert_eq!(StepType::Isentropic.held_property(), None);
        assert_eq!(StepType::None.held_property(), None);
    }

    #[test]
    fn patch_reports_supplied_fields() {
        let patch = StepPatch::new()
            .volume(2.0)
            .clear(PropKind::Pressure)
            .step_type(StepType::Isobaric);
        assert_eq!(patch.supplied(), vec![PropKind::Volume]);
        assert!(patch.touches_pvt());
        assert!(!StepPatch::new().step_type(StepType::None).touches_pvt());
    }

    #[test]
    fn step_data_builder() {
        let data = StepData::new(1.0e4, 1.0, 300.0)
            .without(PropKind::Temperature)
            .with_type(StepType::Isochoric)
            .with_static_entropy(0.0);
        assert_eq!(data.pvt.temperature, Prop::Unknown);
        assert_eq!(data.step_type, StepType::Isochoric);

        let step = Step::from_data(data, 3);
        assert_eq!(step.static_entropy(), Some(0.0));
        assert_eq!(step.anchor().map(|a| a.revision), Some(3));
        assert_eq!(step.entropy(), None);
    }
}
