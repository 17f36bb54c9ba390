//! Error types for cycle transitions.

use gc_core::CoreError;
use thiserror::Error;

/// Errors surfaced by cycle transitions.
///
/// A failed transition never yields a partially updated cycle.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CycleError {
    #[error("Invalid step type: {name:?} (expected none, isobaric, isochoric, isothermal or isentropic)")]
    InvalidStepType { name: String },

    #[error("Step index out of range: index={index}, len={len}")]
    StepOutOfRange { index: usize, len: usize },

    #[error("Invalid system parameter: {0}")]
    InvalidSystemParameter(#[from] CoreError),

    #[error("A cycle needs at least one step")]
    Empty,
}

pub type CycleResult<T> = Result<T, CycleError>;
