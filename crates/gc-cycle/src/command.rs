//! A transition expressed as data, for hosts that queue or replay edits.

use crate::cycle::{Cycle, EdgeOrder, StepIndex};
use crate::error::CycleResult;
use crate::step::{StepData, StepPatch};
use crate::system::SystemPatch;

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Add { index: StepIndex, data: StepData },
    Replace { index: usize, data: StepData },
    Patch { index: usize, patch: StepPatch },
    Delete { index: usize },
    SetSystem(SystemPatch),
    Reverse(EdgeOrder),
}

impl Command {
    pub fn name(&self) -> &'static str {
        match self {
            Command::Add { .. } => "add",
            Command::Replace { .. } => "replace",
            Command::Patch { .. } => "patch",
            Command::Delete { .. } => "delete",
            Command::SetSystem(_) => "set_system",
            Command::Reverse(_) => "reverse",
        }
    }
}

impl Cycle {
    /// Run one command against this snapshot.
    pub fn apply(&self, command: &Command) -> CycleResult<Cycle> {
        match command {
            Command::Add { index, data } => Ok(self.add_step(*index, *data)),
            Command::Replace { index, data } => self.replace_step(*index, *data),
            Command::Patch { index, patch } => self.patch_step(*index, patch),
            Command::Delete { index } => self.delete_step(*index),
            Command::SetSystem(patch) => self.set_system_parameters(patch),
            Command::Reverse(order) => Ok(self.reverse_steps(*order)),
        }
    }

    /// Run `commands` in order, stopping at the first failure.
    pub fn apply_all<'a>(
        &self,
        commands: impl IntoIterator<Item = &'a Command>,
    ) -> CycleResult<Cycle> {
        commands
            .into_iter()
            .try_fold(self.clone(), |cycle, command| cycle.apply(command))
    }
}
