//! Entropy change, work and heat per edge, plus absolute entropy.
//!
//! Entropy change uses the ideal-gas state function and ignores the process
//! type; work and heat depend on it. Work is the work done *by* the gas and
//! heat the heat supplied *to* it, so `heat - work = n·Cv·ΔT` on every edge.

use crate::prop::Pvt;
use crate::step::{Anchor, EdgeEnergy, Step, StepType};
use crate::system::SystemParameters;
use gc_core::{Real, finite_or_none};

/// `n·Cv·ln(T₂/T₁) + n·R·ln(V₂/V₁)`, if both endpoints know T and V.
pub fn entropy_change(from: &Pvt, to: &Pvt, system: &SystemParameters) -> Option<Real> {
    let (t1, v1) = (from.temperature.value()?, from.volume.value()?);
    let (t2, v2) = (to.temperature.value()?, to.volume.value()?);
    finite_or_none(system.n_cv() * (t2 / t1).ln() + system.n_r() * (v2 / v1).ln())
}

/// Entropy change, work and heat of an edge of type `edge` between two states.
///
/// Everything is absent for [`StepType::None`] and when either endpoint is
/// under-constrained.
pub fn edge_energy(
    edge: StepType,
    from: &Pvt,
    to: &Pvt,
    system: &SystemParameters,
) -> EdgeEnergy {
    if edge == StepType::None || from.unknown_count() > 1 || to.unknown_count() > 1 {
        return EdgeEnergy::default();
    }
    let du = internal_energy_change(from, to, system);
    let (work, heat) = match edge {
        StepType::Isobaric => {
            let work = isobaric_work(from, to);
            (work, du.zip(work).map(|(du, w)| du + w))
        }
        StepType::Isochoric => (Some(0.0), du),
        StepType::Isothermal => {
            let work = isothermal_work(from, to, system);
            (work, work)
        }
        StepType::Isentropic => (du.map(|du| -du), Some(0.0)),
        StepType::None => (None, None),
    };
    EdgeEnergy {
        entropy_change: entropy_change(from, to, system),
        work: work.and_then(finite_or_none),
        heat: heat.and_then(finite_or_none),
    }
}

/// n·Cv·(T₂ - T₁)
fn internal_energy_change(from: &Pvt, to: &Pvt, system: &SystemParameters) -> Option<Real> {
    Some(system.n_cv() * (to.temperature.value()? - from.temperature.value()?))
}

/// P₁·(V₂ - V₁)
fn isobaric_work(from: &Pvt, to: &Pvt) -> Option<Real> {
    Some(from.pressure.value()? * (to.volume.value()? - from.volume.value()?))
}

/// n·R·T₁·ln(V₂/V₁)
fn isothermal_work(from: &Pvt, to: &Pvt, system: &SystemParameters) -> Option<Real> {
    Some(system.n_r() * from.temperature.value()? * (to.volume.value()? / from.volume.value()?).ln())
}

/// Absolute entropy for every point.
///
/// `changes[i]` links point `i` to `i + 1`. Points joined by defined links form
/// a run; in each run the anchor with the highest revision fixes the level and
/// the rest follows by adding forward and subtracting backward.
pub fn absolute_entropy(changes: &[Option<Real>], anchors: &[Option<Anchor>]) -> Vec<Option<Real>> {
    let len = anchors.len();
    let mut entropy = vec![None; len];
    let mut start = 0;
    while start < len {
        let mut end = start;
        while end + 1 < len && changes.get(end).copied().flatten().is_some() {
            end += 1;
        }

        let newest = (start..=end)
            .filter_map(|i| anchors[i].map(|a| (i, a)))
            .max_by_key(|(_, a)| a.revision);
        if let Some((origin, anchor)) = newest {
            entropy[origin] = Some(anchor.value);
            let mut s = anchor.value;
            for i in origin..end {
                s += changes[i].unwrap_or_default();
                entropy[i + 1] = Some(s);
            }
            let mut s = anchor.value;
            for i in (start..origin).rev() {
                s -= changes[i].unwrap_or_default();
                entropy[i] = Some(s);
            }
        }
        start = end + 1;
    }
    entropy
}

/// Recompute every derived field of the chain in place.
pub fn recompute(steps: &mut [Step], system: &SystemParameters) {
    let edges: Vec<EdgeEnergy> = (0..steps.len())
        .map(|i| match steps.get(i + 1) {
            Some(next) => edge_energy(steps[i].step_type, &steps[i].pvt, &next.pvt, system),
            None => EdgeEnergy::default(),
        })
        .collect();
    for (step, edge) in steps.iter_mut().zip(edges) {
        step.edge = edge;
    }
    let changes: Vec<_> = steps.iter().map(|s| s.edge.entropy_change).collect();
    let anchors: Vec<_> = steps.iter().map(|s| s.anchor).collect();
    for (step, s) in steps
        .iter_mut()
        .zip(absolute_entropy(&changes, &anchors))
    {
        step.entropy = s;
    }
}
