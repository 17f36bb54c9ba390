//! gc-cycle: thermodynamic cycles of an ideal gas.
//!
//! A [`Cycle`] is an ordered chain of state points. Each point carries the
//! process ([`StepType`]) that leads to its successor; the last point's type
//! is inert because the chain is open. Transitions return new snapshots with
//! the ideal-gas law, every edge constraint, and all derived quantities
//! (entropy, work, heat) brought back into agreement.

pub mod command;
pub mod constraint;
pub mod cycle;
pub mod energy;
pub mod error;
pub mod prop;
pub mod propagate;
pub mod resolver;
pub mod step;
pub mod summary;
pub mod system;

pub use command::Command;
pub use constraint::Constraint;
pub use cycle::{Cycle, EdgeOrder, StepIndex};
pub use error::{CycleError, CycleResult};
pub use prop::{Edit, Prop, PropKind, Pvt};
pub use resolver::Resolution;
pub use step::{Anchor, EdgeEnergy, Step, StepData, StepPatch, StepType};
pub use summary::CycleSummary;
pub use system::{SystemParameters, SystemPatch};

#[cfg(test)]
mod proptests;
