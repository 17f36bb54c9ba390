use crate::cycle::{Cycle, EdgeOrder};
use crate::prop::PropKind;
use crate::step::{Step, StepData, StepPatch, StepType};
use crate::system::SystemParameters;
use gc_core::{R, Tolerances, nearly_equal};
use proptest::prelude::*;

const LOOSE: Tolerances = Tolerances {
    abs: 1e-6,
    rel: 1e-7,
};

fn system() -> impl Strategy<Value = SystemParameters> {
    (0.5_f64..5.0, 1.5_f64..3.5).prop_map(|(n, cv)| SystemParameters {
        mole_count: n,
        isochoric_molar_heat_capacity: cv * R,
    })
}

fn point() -> impl Strategy<Value = StepData> {
    (1.0e3_f64..1.0e6, 0.1_f64..10.0)
        .prop_map(|(p, v)| StepData::new(p, v, 0.0).without(PropKind::Temperature))
}

fn constrained_type() -> impl Strategy<Value = StepType> {
    prop::sample::select(vec![
        StepType::Isobaric,
        StepType::Isochoric,
        StepType::Isothermal,
        StepType::Isentropic,
    ])
}

fn any_type() -> impl Strategy<Value = StepType> {
    prop::sample::select(StepType::ALL.to_vec())
}

fn ideal(step: &Step, system: &SystemParameters) -> bool {
    match (step.pressure(), step.volume(), step.temperature()) {
        (Some(p), Some(v), Some(t)) => nearly_equal(p * v, system.n_r() * t, LOOSE),
        _ => false,
    }
}

fn edge_holds(from: &Step, to: &Step, system: &SystemParameters) -> bool {
    let same = |a: Option<f64>, b: Option<f64>| match (a, b) {
        (Some(a), Some(b)) => nearly_equal(a, b, LOOSE),
        _ => false,
    };
    match from.step_type() {
        StepType::None => true,
        StepType::Isobaric => same(from.pressure(), to.pressure()),
        StepType::Isochoric => same(from.volume(), to.volume()),
        StepType::Isothermal => same(from.temperature(), to.temperature()),
        StepType::Isentropic => {
            crate::energy::entropy_change(from.pvt(), to.pvt(), system)
                .is_some_and(|ds| ds.abs() <= 1e-6)
        }
    }
}

/// Free points, then edge types set one at a time from the front.
fn typed_chain(
    system: SystemParameters,
    points: Vec<StepData>,
    types: &[StepType],
) -> Cycle {
    let mut cycle = Cycle::new(system, points).unwrap();
    for (i, t) in types.iter().enumerate().take(cycle.len()) {
        cycle = cycle.patch_step(i, &StepPatch::new().step_type(*t)).unwrap();
    }
    cycle
}

proptest! {
    #[test]
    fn every_point_stays_ideal(
        system in system(),
        points in prop::collection::vec(point(), 2..6),
        types in prop::collection::vec(constrained_type(), 6),
        pick in 0usize..6,
        volume in 0.1_f64..10.0,
    ) {
        let cycle = typed_chain(system, points, &types);
        let index = pick % cycle.len();
        let cycle = cycle.patch_step(index, &StepPatch::new().volume(volume)).unwrap();
        for step in cycle.steps() {
            prop_assert!(ideal(step, &system), "{step:?}");
        }
    }

    #[test]
    fn edges_hold_after_an_edit(
        system in system(),
        points in prop::collection::vec(point(), 2..6),
        types in prop::collection::vec(any_type(), 6),
        pick in 0usize..6,
        pressure in 1.0e3_f64..1.0e6,
    ) {
        let cycle = typed_chain(system, points, &types);
        for pair in cycle.steps().windows(2) {
            prop_assert!(edge_holds(&pair[0], &pair[1], &system));
        }

        let index = pick % cycle.len();
        let cycle = cycle.patch_step(index, &StepPatch::new().pressure(pressure)).unwrap();
        prop_assert!(nearly_equal(cycle.steps()[index].pressure().unwrap(), pressure, LOOSE));
        for (i, pair) in cycle.steps().windows(2).enumerate() {
            prop_assert!(edge_holds(&pair[0], &pair[1], &system), "edge {i}: {pair:?}");
        }
    }

    #[test]
    fn entropy_is_a_state_function(
        system in system(),
        points in prop::collection::vec(point(), 2..6),
        types in prop::collection::vec(constrained_type(), 6),
        anchor in -50.0_f64..50.0,
    ) {
        let points: Vec<StepData> = points
            .into_iter()
            .zip(types)
            .enumerate()
            .map(|(i, (data, t))| {
                let data = data.with_type(t);
                if i == 0 { data.with_static_entropy(anchor) } else { data }
            })
            .collect();
        let cycle = Cycle::new(system, points).unwrap();
        let level = |s: &Step| {
            system.n_cv() * s.temperature().unwrap().ln() + system.n_r() * s.volume().unwrap().ln()
        };
        let origin = level(&cycle.steps()[0]);
        for step in cycle.steps() {
            let expected = anchor + level(step) - origin;
            prop_assert!(nearly_equal(step.entropy().unwrap(), expected, LOOSE));
        }
    }

    #[test]
    fn reversing_twice_restores_the_chain(
        system in system(),
        points in prop::collection::vec((point(), any_type(), prop::option::of(-10.0_f64..10.0)), 1..6),
        mirror in any::<bool>(),
    ) {
        let points = points
            .into_iter()
            .map(|(data, t, s)| {
                let data = data.with_type(t);
                match s {
                    Some(s) => data.with_static_entropy(s),
                    None => data,
                }
            })
            .collect();
        let cycle = Cycle::new(system, points).unwrap();
        let order = if mirror { EdgeOrder::Mirror } else { EdgeOrder::Preserve };
        prop_assert_eq!(cycle.reverse_steps(order).reverse_steps(order), cycle);
    }

    #[test]
    fn deleting_the_only_point_is_a_no_op(system in system(), data in point(), index in 0usize..4) {
        let cycle = Cycle::new(system, vec![data]).unwrap();
        prop_assert_eq!(cycle.delete_step(index).unwrap(), cycle);
    }
}
