//! Working-substance parameters.

use crate::error::{CycleError, CycleResult};
use gc_core::units::{self, Amount, MolarHeatCapacity};
use gc_core::{R, Real, ensure_positive};

/// Mole count and molar isochoric heat capacity of the ideal gas.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SystemParameters {
    /// Amount of gas [mol]
    pub mole_count: Real,
    /// Cv [J/(mol·K)]
    pub isochoric_molar_heat_capacity: Real,
}

impl Default for SystemParameters {
    /// One mole of a diatomic gas.
    fn default() -> Self {
        Self {
            mole_count: 1.0,
            isochoric_molar_heat_capacity: 2.5 * R,
        }
    }
}

impl SystemParameters {
    pub fn new(mole_count: Real, isochoric_molar_heat_capacity: Real) -> CycleResult<Self> {
        let params = Self {
            mole_count,
            isochoric_molar_heat_capacity,
        };
        params.validate()?;
        Ok(params)
    }

    /// Both values must be finite and strictly positive.
    pub fn validate(&self) -> CycleResult<()> {
        ensure_positive(self.mole_count, "mole_count")
            .and_then(|_| {
                ensure_positive(
                    self.isochoric_molar_heat_capacity,
                    "isochoric_molar_heat_capacity",
                )
            })
            .map(|_| ())
            .map_err(CycleError::InvalidSystemParameter)
    }

    /// Merge `patch` over these parameters, validating the result.
    pub fn merged(&self, patch: &SystemPatch) -> CycleResult<Self> {
        let merged = Self {
            mole_count: patch.mole_count.unwrap_or(self.mole_count),
            isochoric_molar_heat_capacity: patch
                .isochoric_molar_heat_capacity
                .unwrap_or(self.isochoric_molar_heat_capacity),
        };
        merged.validate()?;
        Ok(merged)
    }

    /// n·R [J/K]
    pub fn n_r(&self) -> Real {
        self.mole_count * R
    }

    /// n·Cv [J/K]
    pub fn n_cv(&self) -> Real {
        self.mole_count * self.isochoric_molar_heat_capacity
    }

    pub fn amount(&self) -> Amount {
        units::mol(self.mole_count)
    }

    pub fn cv(&self) -> MolarHeatCapacity {
        units::j_per_mol_k(self.isochoric_molar_heat_capacity)
    }
}

/// Partial update of [`SystemParameters`]; `None` keeps the current value.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SystemPatch {
    #[cfg_attr(feature = "serde", serde(default))]
    pub mole_count: Option<Real>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub isochoric_molar_heat_capacity: Option<Real>,
}

impl SystemPatch {
    pub fn mole_count(v: Real) -> Self {
        Self {
            mole_count: Some(v),
            ..Self::default()
        }
    }

    pub fn isochoric_molar_heat_capacity(v: Real) -> Self {
        Self {
            isochoric_molar_heat_capacity: Some(v),
            ..Self::default()
        }
    }
}
