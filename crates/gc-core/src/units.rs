// gc-core/src/units.rs

use uom::si::f64::{
    AmountOfSubstance as UomAmountOfSubstance, Energy as UomEnergy,
    HeatCapacity as UomHeatCapacity, MolarHeatCapacity as UomMolarHeatCapacity,
    Pressure as UomPressure, ThermodynamicTemperature as UomThermodynamicTemperature,
    Volume as UomVolume,
};

// Public canonical unit types (SI, f64)
pub type Amount = UomAmountOfSubstance;
pub type Energy = UomEnergy;
/// Absolute entropy and entropy change share the unit J/K.
pub type Entropy = UomHeatCapacity;
pub type MolarHeatCapacity = UomMolarHeatCapacity;
pub type Pressure = UomPressure;
pub type Temperature = UomThermodynamicTemperature;
pub type Volume = UomVolume;

#[inline]
pub fn pa(v: f64) -> Pressure {
    use uom::si::pressure::pascal;
    Pressure::new::<pascal>(v)
}

#[inline]
pub fn k(v: f64) -> Temperature {
    use uom::si::thermodynamic_temperature::kelvin;
    Temperature::new::<kelvin>(v)
}

#[inline]
pub fn m3(v: f64) -> Volume {
    use uom::si::volume::cubic_meter;
    Volume::new::<cubic_meter>(v)
}

#[inline]
pub fn mol(v: f64) -> Amount {
    use uom::si::amount_of_substance::mole;
    Amount::new::<mole>(v)
}

#[inline]
pub fn j(v: f64) -> Energy {
    use uom::si::energy::joule;
    Energy::new::<joule>(v)
}

#[inline]
pub fn j_per_k(v: f64) -> Entropy {
    use uom::si::heat_capacity::joule_per_kelvin;
    Entropy::new::<joule_per_kelvin>(v)
}

#[inline]
pub fn j_per_mol_k(v: f64) -> MolarHeatCapacity {
    use uom::si::molar_heat_capacity::joule_per_kelvin_mole;
    MolarHeatCapacity::new::<joule_per_kelvin_mole>(v)
}

pub mod constants {
    use super::*;

    /// Molar gas constant [J/(mol·K)], CODATA 2018 exact value.
    pub const R_J_PER_MOL_K: f64 = 8.314_462_618_153_24;

    #[inline]
    pub fn r() -> MolarHeatCapacity {
        j_per_mol_k(R_J_PER_MOL_K)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uom::si::{molar_heat_capacity::joule_per_kelvin_mole, pressure::kilopascal};

    #[test]
    fn constructors_smoke() {
        let _p = pa(101_325.0);
        let _t = k(300.0);
        let _v = m3(0.5);
        let _n = mol(2.0);
        let _q = j(10.0);
        let _s = j_per_k(1.0);
        let _r = constants::r();
    }

    #[test]
    fn values_are_stored_in_si() {
        assert_eq!(pa(2_000.0).get::<kilopascal>(), 2.0);
        assert_eq!(
            constants::r().get::<joule_per_kelvin_mole>(),
            constants::R_J_PER_MOL_K
        );
    }
}
