//! Ideal-gas law solver for a single state point.
//!
//! `P·V = n·R·T` fixes any one of the three properties from the other two.

use crate::prop::{Prop, PropKind, Pvt};
use crate::system::SystemParameters;

/// Outcome of resolving one point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// All three properties were already known.
    Complete,
    /// The named property was computed from the other two.
    Derived(PropKind),
    /// The computed value was not finite and the property stays unknown.
    Degenerate(PropKind),
    /// Two or more properties are unknown; nothing was computed.
    UnderConstrained { unknown: usize },
}

/// Solve the ideal-gas law for the single unknown property of `pvt`.
pub fn resolve(pvt: Pvt, system: &SystemParameters) -> (Pvt, Resolution) {
    let n_r = system.n_r();
    let (kind, value) = match (
        pvt.pressure.value(),
        pvt.volume.value(),
        pvt.temperature.value(),
    ) {
        (Some(_), Some(_), Some(_)) => return (pvt, Resolution::Complete),
        (Some(p), Some(v), None) => (PropKind::Temperature, p * v / n_r),
        (Some(p), None, Some(t)) => (PropKind::Volume, n_r * t / p),
        (None, Some(v), Some(t)) => (PropKind::Pressure, n_r * t / v),
        _ => {
            return (
                pvt,
                Resolution::UnderConstrained {
                    unknown: pvt.unknown_count(),
                },
            );
        }
    };

    let derived = Prop::finite(value);
    let resolution = if derived.is_known() {
        Resolution::Derived(kind)
    } else {
        Resolution::Degenerate(kind)
    };
    (pvt.with(kind, derived), resolution)
}

/// Re-derive one property of `pvt` while keeping every property in `held`.
///
/// If a property is already unknown it is the one solved for. Otherwise the
/// first non-held property in [`PropKind::REDERIVE_ORDER`] is recomputed. With
/// all three held the point is returned untouched.
pub fn rederive(pvt: Pvt, held: &[PropKind], system: &SystemParameters) -> (Pvt, Resolution) {
    if !pvt.is_complete() {
        return resolve(pvt, system);
    }
    match PropKind::REDERIVE_ORDER
        .into_iter()
        .find(|k| !held.contains(k))
    {
        Some(kind) => resolve(pvt.with(kind, Prop::Unknown), system),
        None => (pvt, Resolution::Complete),
    }
}
