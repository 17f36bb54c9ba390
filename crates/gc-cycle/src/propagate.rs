//! Outward constraint propagation after a point changes.
//!
//! An under-constrained dirty point is first completed from its own two
//! edges. Then two independent walks leave the dirty index, one toward the
//! end of the chain and one toward the start. Each hop evaluates the edge
//! between the current point and its neighbour, and moves on only if the
//! neighbour actually changed. A walk visits every point at most once, so the total
//! work is bounded by the chain length.

use crate::constraint::{Constraint, apply};
use crate::prop::Pvt;
use crate::step::Step;
use crate::system::SystemParameters;
use gc_core::Tolerances;
use tracing::{debug, trace};

/// Hops taken in each direction by one propagation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Walk {
    pub forward: usize,
    pub backward: usize,
}

/// Re-establish edge constraints outward from `dirty` in both directions.
pub fn propagate(
    mut steps: Vec<Step>,
    dirty: usize,
    system: &SystemParameters,
) -> (Vec<Step>, Walk) {
    let tol = Tolerances::default();
    complete_dirty(&mut steps, dirty, system);
    let walk = Walk {
        forward: walk_forward(&mut steps, dirty, system, tol),
        backward: walk_backward(&mut steps, dirty, system, tol),
    };
    trace!(dirty, forward = walk.forward, backward = walk.backward, "propagated");
    (steps, walk)
}

/// Solve an incomplete point at `dirty` from the edges on either side.
///
/// The incoming edge is tried first with the outgoing edge as pin, then the
/// other way round. The point is left alone if neither edge forces anything.
fn complete_dirty(steps: &mut [Step], dirty: usize, system: &SystemParameters) {
    let Some(step) = steps.get(dirty) else {
        return;
    };
    if step.pvt.is_complete() {
        return;
    }
    let prev = dirty.checked_sub(1).map(|i| &steps[i]);
    let next = steps.get(dirty + 1);
    let incoming_pin = prev.map_or(Constraint::Free, |p| {
        Constraint::from_edge(p.step_type, &p.pvt)
    });
    let outgoing_pin = next.map_or(Constraint::Free, |n| {
        Constraint::from_edge(step.step_type, &n.pvt)
    });

    let first = prev.and_then(|p| apply(p.step_type, &p.pvt, &step.pvt, outgoing_pin, system));
    let solved = match first {
        Some(pvt) if pvt.is_complete() => Some(pvt),
        _ => next
            .and_then(|n| {
                let target = first.unwrap_or(step.pvt);
                apply(step.step_type, &n.pvt, &target, incoming_pin, system)
            })
            .or(first),
    };
    match solved {
        Some(pvt) => {
            debug!(dirty, complete = pvt.is_complete(), "solved edited point from its edges");
            steps[dirty].pvt = pvt;
        }
        None => debug!(dirty, "edited point stays under-constrained"),
    }
}

fn walk_forward(
    steps: &mut [Step],
    dirty: usize,
    system: &SystemParameters,
    tol: Tolerances,
) -> usize {
    let len = steps.len();
    let mut hops = 0;
    let mut i = dirty;
    while i + 1 < len {
        let j = i + 1;
        // The edge leaving j toward j+1 is the one the walk meets next.
        let pin = match steps.get(j + 1) {
            Some(next) => Constraint::from_edge(steps[j].step_type, &next.pvt),
            None => Constraint::Free,
        };
        let candidate = apply(steps[i].step_type, &steps[i].pvt, &steps[j].pvt, pin, system);
        if !hop(&mut steps[j], candidate, tol) {
            break;
        }
        trace!(from = i, to = j, "forward hop");
        hops += 1;
        i = j;
    }
    hops
}

fn walk_backward(
    steps: &mut [Step],
    dirty: usize,
    system: &SystemParameters,
    tol: Tolerances,
) -> usize {
    let mut hops = 0;
    let mut i = dirty.min(steps.len().saturating_sub(1));
    while i > 0 {
        let j = i - 1;
        let pin = match j.checked_sub(1) {
            Some(prev) => Constraint::from_edge(steps[prev].step_type, &steps[prev].pvt),
            None => Constraint::Free,
        };
        let candidate = apply(steps[j].step_type, &steps[i].pvt, &steps[j].pvt, pin, system);
        if !hop(&mut steps[j], candidate, tol) {
            break;
        }
        trace!(from = i, to = j, "backward hop");
        hops += 1;
        i = j;
    }
    hops
}

/// Store a forced update; returns whether the point changed.
fn hop(step: &mut Step, candidate: Option<Pvt>, tol: Tolerances) -> bool {
    match candidate {
        Some(candidate) if candidate.differs_from(&step.pvt, tol) => {
            step.pvt = candidate;
            true
        }
        _ => false,
    }
}
