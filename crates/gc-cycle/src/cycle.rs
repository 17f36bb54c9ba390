//! Immutable cycle snapshots and the transitions between them.
//!
//! Every transition takes `&self` and returns a fresh [`Cycle`]; the input
//! snapshot is never touched, so a failed transition leaves the caller's
//! state exactly as it was.
//!
//! Each edit runs in three phases:
//! 1. merge the caller's data into the target point and solve its ideal-gas law,
//! 2. propagate edge constraints outward from that point,
//! 3. recompute entropy, work and heat over the whole chain.

use crate::energy;
use crate::error::{CycleError, CycleResult};
use crate::propagate::propagate;
use crate::prop::{Edit, PropKind, Pvt};
use crate::resolver::{Resolution, rederive, resolve};
use crate::step::{Anchor, Step, StepData, StepPatch};
use crate::summary::CycleSummary;
use crate::system::{SystemParameters, SystemPatch};
use gc_core::R;
use tracing::{debug, instrument};

/// Insertion position for [`Cycle::add_step`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepIndex {
    /// Insert before this index; indexes past the end append.
    At(usize),
    /// Append.
    End,
}

impl From<i64> for StepIndex {
    /// Negative values append.
    fn from(index: i64) -> Self {
        usize::try_from(index).map_or(StepIndex::End, StepIndex::At)
    }
}

/// How edge types are laid out after [`Cycle::reverse_steps`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum EdgeOrder {
    /// Types stay at their indexes.
    #[default]
    Preserve,
    /// Type `k` becomes old type `len - 1 - k`, so every process runs backwards
    /// between the same pair of states (the last type closes the loop).
    Mirror,
}

/// A consistent chain of state points plus the gas it describes.
#[derive(Debug, Clone, PartialEq)]
pub struct Cycle {
    system: SystemParameters,
    steps: Vec<Step>,
    anchor_revision: u64,
}

impl Default for Cycle {
    fn default() -> Self {
        Self::initialize()
    }
}

impl Cycle {
    /// Default parameters and a single point at 10 kPa, 1 m³, anchored at zero entropy.
    pub fn initialize() -> Self {
        let system = SystemParameters::default();
        let data = StepData::new(1.0e4, 1.0, 1.0e4 / (system.mole_count * R))
            .with_static_entropy(0.0);
        let mut steps = vec![Step::from_data(data, 0)];
        energy::recompute(&mut steps, &system);
        Self {
            system,
            steps,
            anchor_revision: 0,
        }
    }

    /// Build a cycle from caller-supplied points.
    ///
    /// Each point's ideal-gas law is solved but no constraints are propagated:
    /// the points are taken as the caller's authoritative starting state.
    /// Anchors are ranked by index, later points winning.
    pub fn new(system: SystemParameters, points: Vec<StepData>) -> CycleResult<Self> {
        system.validate()?;
        if points.is_empty() {
            return Err(CycleError::Empty);
        }
        let mut revision = 0;
        let mut steps: Vec<Step> = points
            .into_iter()
            .map(|mut data| {
                data.pvt = resolve(data.pvt, &system).0;
                if data.static_entropy.is_some() {
                    revision += 1;
                }
                Step::from_data(data, revision)
            })
            .collect();
        energy::recompute(&mut steps, &system);
        Ok(Self {
            system,
            steps,
            anchor_revision: revision,
        })
    }

    pub fn system(&self) -> &SystemParameters {
        &self.system
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    pub fn step(&self, index: usize) -> Option<&Step> {
        self.steps.get(index)
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Always false; a cycle keeps at least one point.
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn summary(&self) -> CycleSummary {
        CycleSummary::from_steps(&self.steps)
    }

    /// Insert a point before `index` (or append).
    #[instrument(level = "debug", skip(self, data), fields(len = self.steps.len()))]
    pub fn add_step(&self, index: StepIndex, data: StepData) -> Cycle {
        let index = match index {
            StepIndex::At(i) if i < self.steps.len() => i,
            _ => self.steps.len(),
        };
        let mut next = self.clone();
        let step = next.fresh_step(index, data);
        next.steps.insert(index, step);
        next.settle(index)
    }

    /// Replace all caller-visible content of the point at `index`.
    #[instrument(level = "debug", skip(self, data), fields(len = self.steps.len()))]
    pub fn replace_step(&self, index: usize, data: StepData) -> CycleResult<Cycle> {
        self.check_index(index)?;
        let mut next = self.clone();
        next.steps[index] = next.fresh_step(index, data);
        Ok(next.settle(index))
    }

    /// Merge `patch` over the point at `index`.
    ///
    /// Supplied properties are held; of the rest, one is re-derived so the
    /// ideal-gas law holds again (temperature first, then pressure).
    #[instrument(level = "debug", skip(self, patch), fields(len = self.steps.len()))]
    pub fn patch_step(&self, index: usize, patch: &StepPatch) -> CycleResult<Cycle> {
        self.check_index(index)?;
        let mut next = self.clone();
        let revision = match patch.static_entropy {
            Edit::Set(_) => next.bump_revision(),
            _ => 0,
        };

        let step = &mut next.steps[index];
        let mut pvt = Pvt {
            pressure: patch.pressure.apply(step.pvt.pressure),
            volume: patch.volume.apply(step.pvt.volume),
            temperature: patch.temperature.apply(step.pvt.temperature),
        };
        if patch.touches_pvt() {
            let (solved, resolution) = rederive(pvt, &patch.supplied(), &self.system);
            log_resolution(index, resolution);
            pvt = solved;
        }
        step.pvt = pvt;
        if let Some(step_type) = patch.step_type {
            step.step_type = step_type;
        }
        step.anchor = match patch.static_entropy {
            Edit::Keep => step.anchor,
            Edit::Set(value) => Some(Anchor { value, revision }),
            Edit::Clear => None,
        };
        Ok(next.settle(index))
    }

    /// Remove the point at `index`; a single-point cycle is returned unchanged.
    ///
    /// The predecessor's edge now joins it to the old successor, so
    /// propagation restarts from the predecessor and the successor yields.
    #[instrument(level = "debug", skip(self), fields(len = self.steps.len()))]
    pub fn delete_step(&self, index: usize) -> CycleResult<Cycle> {
        if self.steps.len() == 1 {
            debug!("refusing to delete the last remaining point");
            return Ok(self.clone());
        }
        self.check_index(index)?;
        let mut next = self.clone();
        next.steps.remove(index);
        match index.checked_sub(1) {
            Some(prev) => Ok(next.settle(prev)),
            None => {
                energy::recompute(&mut next.steps, &next.system);
                Ok(next)
            }
        }
    }

    /// Merge new gas parameters.
    ///
    /// Pressure and volume are authoritative across the change; every
    /// temperature is re-derived from them.
    #[instrument(level = "debug", skip(self), fields(len = self.steps.len()))]
    pub fn set_system_parameters(&self, patch: &SystemPatch) -> CycleResult<Cycle> {
        let system = self.system.merged(patch)?;
        let mut next = self.clone();
        next.system = system;
        for (index, step) in next.steps.iter_mut().enumerate() {
            let (pvt, resolution) =
                rederive(step.pvt, &[PropKind::Pressure, PropKind::Volume], &system);
            log_resolution(index, resolution);
            step.pvt = pvt;
        }
        energy::recompute(&mut next.steps, &next.system);
        Ok(next)
    }

    /// Traverse the same states in the opposite direction.
    ///
    /// Point 0 stays put and point `len - i` takes the state of old point `i`.
    /// Anchors travel with their states. No propagation runs, so reversing
    /// twice restores the starting chain.
    #[instrument(level = "debug", skip(self), fields(len = self.steps.len()))]
    pub fn reverse_steps(&self, order: EdgeOrder) -> Cycle {
        let len = self.steps.len();
        let mut next = self.clone();
        for i in 1..len {
            let old = &self.steps[i];
            let new = &mut next.steps[len - i];
            new.pvt = old.pvt;
            new.anchor = old.anchor;
        }
        if order == EdgeOrder::Mirror {
            for (k, step) in next.steps.iter_mut().enumerate() {
                step.step_type = self.steps[len - 1 - k].step_type;
            }
        }
        energy::recompute(&mut next.steps, &next.system);
        next
    }

    fn check_index(&self, index: usize) -> CycleResult<()> {
        if index < self.steps.len() {
            Ok(())
        } else {
            Err(CycleError::StepOutOfRange {
                index,
                len: self.steps.len(),
            })
        }
    }

    fn bump_revision(&mut self) -> u64 {
        self.anchor_revision += 1;
        self.anchor_revision
    }

    /// Stamp and resolve a caller-supplied point.
    fn fresh_step(&mut self, index: usize, mut data: StepData) -> Step {
        let revision = match data.static_entropy {
            Some(_) => self.bump_revision(),
            None => 0,
        };
        let (pvt, resolution) = resolve(data.pvt, &self.system);
        log_resolution(index, resolution);
        data.pvt = pvt;
        Step::from_data(data, revision)
    }

    /// Propagate from `dirty` and refresh every derived value.
    fn settle(mut self, dirty: usize) -> Cycle {
        let (mut steps, walk) = propagate(std::mem::take(&mut self.steps), dirty, &self.system);
        debug!(dirty, forward = walk.forward, backward = walk.backward, "settled");
        energy::recompute(&mut steps, &self.system);
        self.steps = steps;
        self
    }
}

fn log_resolution(index: usize, resolution: Resolution) {
    match resolution {
        Resolution::UnderConstrained { unknown } => {
            debug!(index, unknown, "point is under-constrained")
        }
        Resolution::Degenerate(kind) => {
            debug!(index, property = kind.as_str(), "ideal-gas solve was not finite")
        }
        Resolution::Complete | Resolution::Derived(_) => {}
    }
}
