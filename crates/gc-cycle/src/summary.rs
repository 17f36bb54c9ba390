//! Whole-cycle heat and work totals with the usual performance figures.

use crate::step::Step;
use gc_core::Real;

/// Totals over every edge that has work and heat defined.
///
/// `*_in` / `*_out` are non-negative magnitudes. Ratios are `None` when their
/// denominator is not strictly positive.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CycleSummary {
    pub heat_in: Real,
    pub heat_out: Real,
    pub heat_net: Real,
    /// Work done on the gas
    pub work_in: Real,
    /// Work done by the gas
    pub work_out: Real,
    pub work_net: Real,
    pub thermal_efficiency: Option<Real>,
    pub refrigeration_cop: Option<Real>,
    pub heating_cop: Option<Real>,
}

impl CycleSummary {
    pub fn from_steps(steps: &[Step]) -> Self {
        let mut s = Self::default();
        for step in steps {
            if let Some(q) = step.heat() {
                s.heat_in += q.max(0.0);
                s.heat_out += (-q).max(0.0);
            }
            if let Some(w) = step.work() {
                s.work_out += w.max(0.0);
                s.work_in += (-w).max(0.0);
            }
        }
        s.heat_net = s.heat_in - s.heat_out;
        s.work_net = s.work_out - s.work_in;
        s.thermal_efficiency = ratio(s.work_net, s.heat_in);
        s.refrigeration_cop = ratio(s.heat_in, -s.work_net);
        s.heating_cop = ratio(s.heat_out, -s.work_net);
        s
    }
}

fn ratio(num: Real, den: Real) -> Option<Real> {
    (den > 0.0 && num.is_finite()).then(|| num / den)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::step::EdgeEnergy;

    fn edge(work: Real, heat: Real) -> Step {
        Step {
            edge: EdgeEnergy {
                entropy_change: None,
                work: Some(work),
                heat: Some(heat),
            },
            ..Step::default()
        }
    }

    #[test]
    fn engine_cycle_efficiency() {
        // Net work 30 J out of 100 J supplied.
        let steps = [edge(50.0, 100.0), edge(-20.0, -70.0), Step::default()];
        let s = CycleSummary::from_steps(&steps);
        assert_eq!(s.heat_in, 100.0);
        assert_eq!(s.heat_out, 70.0);
        assert_eq!(s.work_out, 50.0);
        assert_eq!(s.work_in, 20.0);
        assert_eq!(s.work_net, 30.0);
        assert_eq!(s.heat_net, 30.0);
        assert_eq!(s.thermal_efficiency, Some(0.3));
        assert_eq!(s.refrigeration_cop, None);
        assert_eq!(s.heating_cop, None);
    }

    #[test]
    fn refrigerator_cycle_cops() {
        let steps = [edge(-40.0, -140.0), edge(0.0, 100.0)];
        let s = CycleSummary::from_steps(&steps);
        assert_eq!(s.work_net, -40.0);
        assert_eq!(s.refrigeration_cop, Some(2.5));
        assert_eq!(s.heating_cop, Some(3.5));
        assert_eq!(s.thermal_efficiency, Some(-0.4));
    }

    #[test]
    fn empty_edges_give_zero_totals() {
        let s = CycleSummary::from_steps(&[Step::default()]);
        assert_eq!(s, CycleSummary::default());
    }
}
