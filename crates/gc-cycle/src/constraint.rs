//! Relationships a process edge imposes between its two endpoint states.
//!
//! Equality processes copy one property across the edge. An isentropic edge
//! keeps both endpoints on the same adiabat:
//!
//! ```text
//! n·Cv·ln(T₂/T₁) + n·R·ln(V₂/V₁) = 0
//! ```
//!
//! Every relation here is symmetric, so the same evaluation serves forward
//! and backward propagation.

use crate::prop::{Prop, PropKind, Pvt};
use crate::resolver::{Resolution, rederive, resolve};
use crate::step::StepType;
use crate::system::SystemParameters;
use gc_core::{R, Real};
use tracing::trace;

/// What an edge requires of the point at its far end.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Constraint {
    /// No requirement (unconstrained edge, or the reference is unresolved).
    Free,
    /// The property must take this value.
    Fix(PropKind, Real),
    /// The point must lie on the adiabat through this reference state.
    Adiabat { temperature: Real, volume: Real },
}

impl Constraint {
    /// Constraint that `edge` places on one endpoint given the other endpoint's state.
    pub fn from_edge(edge: StepType, reference: &Pvt) -> Self {
        match edge {
            StepType::None => Constraint::Free,
            StepType::Isentropic => {
                match (reference.temperature.value(), reference.volume.value()) {
                    (Some(temperature), Some(volume)) => Constraint::Adiabat {
                        temperature,
                        volume,
                    },
                    _ => Constraint::Free,
                }
            }
            equality => match equality.held_property() {
                Some(kind) => reference
                    .get(kind)
                    .value()
                    .map_or(Constraint::Free, |v| Constraint::Fix(kind, v)),
                None => Constraint::Free,
            },
        }
    }
}

/// Forced update of `to` across an edge of type `edge` from `from`.
///
/// `pin` is the constraint from `to`'s other edge, or [`Constraint::Free`].
/// Returns `None` when the edge imposes nothing or evaluation must be deferred.
pub fn apply(
    edge: StepType,
    from: &Pvt,
    to: &Pvt,
    pin: Constraint,
    system: &SystemParameters,
) -> Option<Pvt> {
    solve_point(*to, Constraint::from_edge(edge, from), pin, system)
}

/// Bring `target` in line with `forced` while honouring `pin`, the constraint
/// from the point's other edge.
///
/// When `forced` and `pin` disagree on the same property, `forced` wins.
pub fn solve_point(
    target: Pvt,
    forced: Constraint,
    pin: Constraint,
    system: &SystemParameters,
) -> Option<Pvt> {
    match (forced, pin) {
        (Constraint::Free, _) => None,
        (Constraint::Fix(kind, value), Constraint::Fix(pinned, _)) if pinned != kind => {
            let pvt = target.with(kind, Prop::Known(value));
            settle(rederive(pvt, &[kind, pinned], system))
        }
        (
            Constraint::Fix(kind, value),
            Constraint::Adiabat {
                temperature,
                volume,
            },
        ) => on_adiabat(kind, value, temperature, volume, system),
        (Constraint::Fix(kind, value), _) => {
            let pvt = target.with(kind, Prop::Known(value));
            settle(rederive(pvt, &[kind], system))
        }
        (
            Constraint::Adiabat {
                temperature,
                volume,
            },
            pin,
        ) => {
            let held = match pin {
                Constraint::Fix(kind, _) if target.get(kind).is_known() => Some(kind),
                _ => [PropKind::Volume, PropKind::Temperature]
                    .into_iter()
                    .find(|k| target.get(*k).is_known()),
            };
            let Some(kind) = held else {
                trace!("isentropic update deferred: target has neither volume nor temperature");
                return None;
            };
            let value = target.get(kind).value()?;
            on_adiabat(kind, value, temperature, volume, system)
        }
    }
}

fn settle((pvt, resolution): (Pvt, Resolution)) -> Option<Pvt> {
    if let Resolution::Degenerate(kind) = resolution {
        trace!(property = kind.as_str(), "constraint produced a non-finite value");
    }
    Some(pvt)
}

/// State on the adiabat through `(t_ref, v_ref)` with property `kind` fixed to `value`.
fn on_adiabat(
    kind: PropKind,
    value: Real,
    t_ref: Real,
    v_ref: Real,
    system: &SystemParameters,
) -> Option<Pvt> {
    let cv = system.isochoric_molar_heat_capacity;
    let pvt = match kind {
        PropKind::Volume => {
            let t = t_ref * (v_ref / value).powf(R / cv);
            Pvt {
                volume: Prop::Known(value),
                temperature: Prop::finite(t),
                pressure: Prop::Unknown,
            }
        }
        PropKind::Temperature => {
            let v = v_ref * (t_ref / value).powf(cv / R);
            Pvt {
                temperature: Prop::Known(value),
                volume: Prop::finite(v),
                pressure: Prop::Unknown,
            }
        }
        PropKind::Pressure => {
            // Substitute V = n·R·T/P into the adiabat and solve for T.
            let ln_t = (cv * t_ref.ln() + R * (v_ref * value / system.n_r()).ln()) / (cv + R);
            Pvt {
                pressure: Prop::Known(value),
                temperature: Prop::finite(ln_t.exp()),
                volume: Prop::Unknown,
            }
        }
    };
    let (pvt, resolution) = resolve(pvt, system);
    match resolution {
        Resolution::Derived(_) => Some(pvt),
        other => {
            trace!(?other, "isentropic solve did not produce a complete state");
            None
        }
    }
}
