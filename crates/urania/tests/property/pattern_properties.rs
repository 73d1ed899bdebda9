use proptest::prelude::*;
use serde_json::{json, Map, Value};
use std::collections::BTreeSet;
use urania::{angular_difference, compute_patterns, AspectCalculator};

fn chart(positions: &[f64]) -> Value {
    let map: Map<String, Value> = positions
        .iter()
        .enumerate()
        .map(|(i, pos)| (format!("p{}", i), json!({ "abs_pos": pos })))
        .collect();
    Value::Object(map)
}

fn signature(subject: &Value, active: &[String]) -> BTreeSet<(&'static str, Vec<String>)> {
    compute_patterns(subject, Some(active))
        .unwrap()
        .into_iter()
        .map(|m| (m.id(), m.points))
        .collect()
}

proptest! {
    #[test]
    fn difference_is_symmetric_and_bounded(a in -720.0f64..720.0, b in -720.0f64..720.0) {
        let forward = angular_difference(a, b);
        let backward = angular_difference(b, a);
        prop_assert!((forward - backward).abs() < 1e-9);
        prop_assert!((0.0..=180.0).contains(&forward), "difference {} out of range", forward);
    }

    #[test]
    fn calculated_orb_fits_catalog(a in 0.0f64..360.0, b in 0.0f64..360.0) {
        let calculator = AspectCalculator::new();
        if let Some(pair) = calculator.calculate_aspect(a, b) {
            let definition = calculator
                .aspects()
                .iter()
                .find(|d| d.name == pair.aspect_type)
                .unwrap();
            prop_assert!(pair.orb <= definition.orb);
            prop_assert!((pair.difference - pair.angle).abs() <= definition.orb);
        }
    }

    #[test]
    fn aspect_rows_sorted_by_orb(positions in prop::collection::vec(0.0f64..360.0, 2..10)) {
        let rows = AspectCalculator::new().compute(&chart(&positions), None).unwrap();
        prop_assert!(rows.windows(2).all(|w| w[0].orb <= w[1].orb));
        prop_assert!(rows.iter().all(|r| r.base_key < r.other_key));
    }

    #[test]
    fn patterns_ignore_active_order(
        (positions, order) in prop::collection::vec(0.0f64..360.0, 3..8)
            .prop_flat_map(|positions| {
                let order: Vec<usize> = (0..positions.len()).collect();
                (Just(positions), Just(order).prop_shuffle())
            })
    ) {
        let subject = chart(&positions);
        let sorted: Vec<String> = (0..positions.len()).map(|i| format!("p{}", i)).collect();
        let shuffled: Vec<String> = order.iter().map(|i| format!("p{}", i)).collect();
        prop_assert_eq!(signature(&subject, &sorted), signature(&subject, &shuffled));
    }

    #[test]
    fn pattern_points_are_sorted_and_linked(
        positions in prop::collection::vec(0.0f64..360.0, 3..9)
    ) {
        for found in compute_patterns(&chart(&positions), None).unwrap() {
            prop_assert!(found.points.windows(2).all(|w| w[0] < w[1]));
            prop_assert!(found.points.len() >= 3);
            for link in &found.links {
                prop_assert!(found.points.contains(&link.pair[0]));
                prop_assert!(found.points.contains(&link.pair[1]));
            }
        }
    }
}
