//! Scenario file format: an optional starting chain plus a list of edits.

use std::path::Path;

use gc_core::Real;
use gc_cycle::{
    Command, Cycle, CycleResult, Edit, EdgeOrder, StepData, StepIndex, StepPatch,
    SystemParameters, SystemPatch,
};
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{CliError, CliResult};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(deny_unknown_fields)]
pub struct Scenario {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub system: Option<SystemPatch>,
    #[serde(default)]
    pub steps: Vec<PointDef>,
    #[serde(default)]
    pub commands: Vec<CommandDef>,
}

/// A point as written in a scenario; the type stays a name until it reaches the engine.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(deny_unknown_fields)]
pub struct PointDef {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pressure: Option<Real>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub volume: Option<Real>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<Real>,
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub step_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub static_entropy: Option<Real>,
}

/// Patch fields: absent keeps, `null` clears, a number sets.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(deny_unknown_fields)]
pub struct PatchDef {
    #[serde(default, deserialize_with = "present")]
    pub pressure: Option<Option<Real>>,
    #[serde(default, deserialize_with = "present")]
    pub volume: Option<Option<Real>>,
    #[serde(default, deserialize_with = "present")]
    pub temperature: Option<Option<Real>>,
    #[serde(default, deserialize_with = "present")]
    pub static_entropy: Option<Option<Real>>,
    #[serde(default, rename = "type")]
    pub step_type: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum CommandDef {
    Add {
        #[serde(default = "append")]
        index: i64,
        step: PointDef,
    },
    Replace {
        index: usize,
        step: PointDef,
    },
    Patch {
        index: usize,
        patch: PatchDef,
    },
    Delete {
        index: usize,
    },
    SetSystem {
        params: SystemPatch,
    },
    Reverse {
        #[serde(default)]
        edges: EdgeOrder,
    },
}

fn append() -> i64 {
    -1
}

/// Distinguishes an explicit `null` from a missing key.
fn present<'de, D>(deserializer: D) -> Result<Option<Option<Real>>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<Real>::deserialize(deserializer).map(Some)
}

impl PointDef {
    pub fn to_data(&self) -> CycleResult<StepData> {
        let mut data = StepData {
            static_entropy: self.static_entropy,
            ..StepData::default()
        };
        data.pvt.pressure = self.pressure.into();
        data.pvt.volume = self.volume.into();
        data.pvt.temperature = self.temperature.into();
        match &self.step_type {
            Some(name) => data.with_type_name(name),
            None => Ok(data),
        }
    }
}

impl PatchDef {
    pub fn to_patch(&self) -> CycleResult<StepPatch> {
        let edit = |field: Option<Option<Real>>| field.map_or(Edit::Keep, Edit::from);
        let patch = StepPatch {
            pressure: edit(self.pressure),
            volume: edit(self.volume),
            temperature: edit(self.temperature),
            static_entropy: edit(self.static_entropy),
            step_type: None,
        };
        match &self.step_type {
            Some(name) => patch.type_name(name),
            None => Ok(patch),
        }
    }
}

impl CommandDef {
    pub fn to_command(&self) -> CycleResult<Command> {
        Ok(match self {
            CommandDef::Add { index, step } => Command::Add {
                index: StepIndex::from(*index),
                data: step.to_data()?,
            },
            CommandDef::Replace { index, step } => Command::Replace {
                index: *index,
                data: step.to_data()?,
            },
            CommandDef::Patch { index, patch } => Command::Patch {
                index: *index,
                patch: patch.to_patch()?,
            },
            CommandDef::Delete { index } => Command::Delete { index: *index },
            CommandDef::SetSystem { params } => Command::SetSystem(*params),
            CommandDef::Reverse { edges } => Command::Reverse(*edges),
        })
    }
}

impl Scenario {
    /// `.json` files are read as JSON, everything else as YAML.
    pub fn load(path: &Path) -> CliResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| CliError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        if is_json {
            Ok(serde_json::from_str(&content)?)
        } else {
            Ok(serde_yaml::from_str(&content)?)
        }
    }

    /// The cycle before any command runs.
    pub fn initial(&self) -> CliResult<Cycle> {
        let patch = self.system.unwrap_or_default();
        if self.steps.is_empty() {
            return Ok(Cycle::initialize().set_system_parameters(&patch)?);
        }
        let system = SystemParameters::default().merged(&patch)?;
        let points = self
            .steps
            .iter()
            .map(PointDef::to_data)
            .collect::<CycleResult<Vec<_>>>()?;
        Ok(Cycle::new(system, points)?)
    }

    /// Build the starting cycle and run every command in order.
    pub fn run(&self) -> CliResult<Cycle> {
        let mut cycle = self.initial()?;
        for (index, def) in self.commands.iter().enumerate() {
            let op = def.to_command().map_err(|source| CliError::Command {
                index,
                op: "parse",
                source,
            })?;
            tracing::debug!(index, op = op.name(), "applying command");
            cycle = cycle.apply(&op).map_err(|source| CliError::Command {
                index,
                op: op.name(),
                source,
            })?;
        }
        Ok(cycle)
    }
}
