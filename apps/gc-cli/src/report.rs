//! Output views of a cycle.

use gc_core::Real;
use gc_cycle::{Cycle, CycleSummary, Step, SystemParameters};
use serde::Serialize;

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Report {
    pub system: SystemParameters,
    pub steps: Vec<PointView>,
    pub summary: CycleSummary,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct PointView {
    pub index: usize,
    #[serde(rename = "type")]
    pub step_type: &'static str,
    pub pressure: Option<Real>,
    pub volume: Option<Real>,
    pub temperature: Option<Real>,
    pub static_entropy: Option<Real>,
    pub entropy: Option<Real>,
    pub entropy_change: Option<Real>,
    pub work: Option<Real>,
    pub heat: Option<Real>,
}

impl PointView {
    fn new(index: usize, step: &Step) -> Self {
        Self {
            index,
            step_type: step.step_type().as_str(),
            pressure: step.pressure(),
            volume: step.volume(),
            temperature: step.temperature(),
            static_entropy: step.static_entropy(),
            entropy: step.entropy(),
            entropy_change: step.entropy_change(),
            work: step.work(),
            heat: step.heat(),
        }
    }
}

impl Report {
    pub fn new(cycle: &Cycle) -> Self {
        Self {
            system: *cycle.system(),
            steps: cycle
                .steps()
                .iter()
                .enumerate()
                .map(|(i, s)| PointView::new(i, s))
                .collect(),
            summary: cycle.summary(),
        }
    }

    pub fn to_table(&self) -> String {
        let mut out = format!(
            "n = {} mol, Cv = {:.4} J/(mol K)\n\n",
            self.system.mole_count, self.system.isochoric_molar_heat_capacity
        );
        out.push_str(&format!(
            "{:>3}  {:<10}  {:>12}  {:>10}  {:>10}  {:>10}  {:>10}  {:>12}  {:>12}\n",
            "#", "type", "P [Pa]", "V [m3]", "T [K]", "S [J/K]", "dS [J/K]", "W [J]", "Q [J]"
        ));
        for p in &self.steps {
            out.push_str(&format!(
                "{:>3}  {:<10}  {:>12}  {:>10}  {:>10}  {:>10}  {:>10}  {:>12}  {:>12}\n",
                p.index,
                p.step_type,
                cell(p.pressure, 2),
                cell(p.volume, 4),
                cell(p.temperature, 2),
                cell(p.entropy, 3),
                cell(p.entropy_change, 3),
                cell(p.work, 2),
                cell(p.heat, 2),
            ));
        }

        let s = &self.summary;
        out.push_str(&format!(
            "\nHeat:  in {:.2} J, out {:.2} J, net {:.2} J\n",
            s.heat_in, s.heat_out, s.heat_net
        ));
        out.push_str(&format!(
            "Work:  in {:.2} J, out {:.2} J, net {:.2} J\n",
            s.work_in, s.work_out, s.work_net
        ));
        out.push_str(&format!(
            "Thermal efficiency: {}\nRefrigeration COP: {}\nHeating COP: {}\n",
            cell(s.thermal_efficiency, 4),
            cell(s.refrigeration_cop, 4),
            cell(s.heating_cop, 4),
        ));
        out
    }
}

fn cell(value: Option<Real>, precision: usize) -> String {
    value.map_or_else(|| "-".to_string(), |v| format!("{v:.precision$}"))
}
