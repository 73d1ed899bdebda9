use serde_json::{json, Value};
use std::collections::BTreeSet;
use urania::patterns::{template, PatternStructure, PATTERN_TEMPLATES};
use urania::{
    compute_major_aspects, compute_patterns, AspectCalculator, EngineSettings, PatternMatch,
    PatternRecord,
};

fn subject_at(positions: &[(&str, f64)]) -> Value {
    let map: serde_json::Map<String, Value> = positions
        .iter()
        .map(|(k, pos)| (k.to_string(), json!({ "abs_pos": pos })))
        .collect();
    Value::Object(map)
}

fn hexagon_with_cross() -> Value {
    subject_at(&[
        ("p1", 0.0),
        ("p2", 60.0),
        ("p3", 120.0),
        ("p4", 180.0),
        ("p5", 240.0),
        ("p6", 300.0),
        ("p7", 90.0),
        ("p8", 270.0),
    ])
}

fn of_id<'a>(matches: &'a [PatternMatch], id: &str) -> Vec<&'a PatternMatch> {
    matches.iter().filter(|m| m.id() == id).collect()
}

fn ids(matches: &[PatternMatch]) -> BTreeSet<&'static str> {
    matches.iter().map(|m| m.id()).collect()
}

#[test]
fn test_calculator_without_patterns_returns_empty() {
    let subject = json!({"sun": {"abs_pos": 0.0}, "moon": {"abs_pos": 5.0}});
    let active = vec!["sun".to_string(), "moon".to_string()];
    let matches = AspectCalculator::new()
        .compute_patterns(&subject, Some(active.as_slice()))
        .unwrap();
    assert!(matches.is_empty());
}

#[test]
fn test_empty_subject() {
    assert!(compute_patterns(&json!({}), None).unwrap().is_empty());
    assert!(compute_major_aspects(&json!({"note": "no points"}), None).unwrap().is_empty());
}

#[test]
fn test_hexagon_with_cross_end_to_end() {
    let subject = hexagon_with_cross();
    let active: Vec<String> = (1..=8).map(|i| format!("p{}", i)).collect();
    let matches = compute_patterns(&subject, Some(active.as_slice())).unwrap();

    let found = ids(&matches);
    for id in ["grand_trine", "grand_cross", "grand_sextile", "t_square"] {
        assert!(found.contains(id), "missing {}", id);
    }

    let sextiles = of_id(&matches, "grand_sextile");
    assert_eq!(sextiles.len(), 1);
    match &sextiles[0].structure {
        PatternStructure::GrandSextile { triples } => {
            assert_eq!(triples.len(), 2);
            assert!(triples.iter().all(|t| t.len() == 3));
        }
        other => panic!("unexpected structure {:?}", other),
    }

    // Both hexagon triangles are grand trines
    assert_eq!(of_id(&matches, "grand_trine").len(), 2);
    // 0/90/180/270 is the only cross
    let crosses = of_id(&matches, "grand_cross");
    assert_eq!(crosses.len(), 1);
    assert_eq!(crosses[0].points, vec!["p1", "p4", "p7", "p8"]);
}

#[test]
fn test_output_follows_matcher_order() {
    let matches = compute_patterns(&hexagon_with_cross(), None).unwrap();
    let order: Vec<usize> = matches
        .iter()
        .map(|m| PATTERN_TEMPLATES.iter().position(|t| t.id == m.id()).unwrap())
        .collect();
    assert!(order.windows(2).all(|w| w[0] <= w[1]));
}

#[test]
fn test_grand_trine_boundary() {
    let exact = subject_at(&[("a", 0.0), ("b", 120.0), ("c", 240.0)]);
    let exact = compute_patterns(&exact, None).unwrap();
    let trines = of_id(&exact, "grand_trine");
    assert_eq!(trines.len(), 1);
    assert_eq!(trines[0].links.len(), 3);
    assert!(trines[0].links.iter().all(|l| l.aspect_type == "trine"));

    let shifted = subject_at(&[("a", 0.0), ("b", 127.0), ("c", 240.0)]);
    let shifted = compute_patterns(&shifted, None).unwrap();
    assert!(of_id(&shifted, "grand_trine").is_empty());
}

#[test]
fn test_grand_cross_boundary() {
    let exact = subject_at(&[("a", 0.0), ("b", 90.0), ("c", 180.0), ("d", 270.0)]);
    let matches = compute_patterns(&exact, None).unwrap();
    let crosses = of_id(&matches, "grand_cross");
    assert_eq!(crosses.len(), 1);
    assert_eq!(crosses[0].links.len(), 6);
    // Any three corners of the cross form a T-square
    assert_eq!(of_id(&matches, "t_square").len(), 4);

    let broken = subject_at(&[("a", 0.0), ("b", 100.0), ("c", 180.0), ("d", 270.0)]);
    let matches = compute_patterns(&broken, None).unwrap();
    assert!(of_id(&matches, "grand_cross").is_empty());
}

#[test]
fn test_stellium_windowing() {
    let tight = subject_at(&[("a", 0.0), ("b", 4.0), ("c", 6.0)]);
    let matches = compute_patterns(&tight, None).unwrap();
    assert_eq!(of_id(&matches, "stellium").len(), 1);

    let with_outlier = subject_at(&[("a", 0.0), ("b", 4.0), ("c", 6.0), ("d", 50.0)]);
    let matches = compute_patterns(&with_outlier, None).unwrap();
    let stelliums = of_id(&matches, "stellium");
    assert_eq!(stelliums.len(), 1);
    assert_eq!(stelliums[0].points, vec!["a", "b", "c"]);

    let spread = subject_at(&[("a", 0.0), ("b", 40.0), ("c", 80.0)]);
    let matches = compute_patterns(&spread, None).unwrap();
    assert!(of_id(&matches, "stellium").is_empty());
}

#[test]
fn test_kite_detected_with_grand_trine() {
    let subject = subject_at(&[("a", 0.0), ("b", 120.0), ("c", 240.0), ("d", 180.0)]);
    let matches = compute_patterns(&subject, None).unwrap();
    let kites = of_id(&matches, "kite");
    assert_eq!(kites.len(), 1);
    assert_eq!(
        kites[0].structure,
        PatternStructure::Kite {
            triple: vec!["a".into(), "b".into(), "c".into()],
            apex: "a".into(),
            tail: "d".into(),
        }
    );
    assert_eq!(of_id(&matches, "grand_trine").len(), 1);
}

#[test]
fn test_kite_orb_boundaries() {
    let within = subject_at(&[("a", 0.0), ("b", 120.0), ("c", 240.0), ("d", 184.0)]);
    assert_eq!(of_id(&compute_patterns(&within, None).unwrap(), "kite").len(), 1);

    let beyond = subject_at(&[("a", 0.0), ("b", 120.0), ("c", 240.0), ("d", 185.0)]);
    assert!(of_id(&compute_patterns(&beyond, None).unwrap(), "kite").is_empty());

    // Trine apex moved by 4°: still a grand trine, tail still fits
    let loose_apex = subject_at(&[("a", 0.0), ("b", 124.0), ("c", 240.0), ("d", 182.0)]);
    assert_eq!(of_id(&compute_patterns(&loose_apex, None).unwrap(), "kite").len(), 1);
}

#[test]
fn test_natal_fixture_patterns() {
    let subject: Value = serde_json::from_str(include_str!("fixtures/natal_subject.json")).unwrap();
    let matches = compute_patterns(&subject, None).unwrap();
    let summary: Vec<(&str, Vec<String>)> =
        matches.iter().map(|m| (m.id(), m.points.clone())).collect();
    let expected: Vec<(&str, Vec<String>)> = vec![
        ("stellium", vec!["mercury", "sun", "venus"]),
        ("t_square", vec!["jupiter", "saturn", "sun"]),
        ("t_square", vec!["jupiter", "mercury", "saturn"]),
        ("grand_trine", vec!["mars", "moon", "sun"]),
        ("grand_trine", vec!["mars", "mercury", "moon"]),
        ("kite", vec!["jupiter", "mars", "moon", "sun"]),
        ("kite", vec!["jupiter", "mars", "mercury", "moon"]),
    ]
    .into_iter()
    .map(|(id, pts)| (id, pts.into_iter().map(String::from).collect()))
    .collect();
    assert_eq!(summary, expected);

    let t_square = &matches[1];
    assert_eq!(t_square.structure, PatternStructure::TSquare { focal: "saturn".into() });
    let stellium = &matches[0];
    assert_eq!(stellium.links.len(), 2);
}

#[test]
fn test_permutation_of_active_points() {
    let subject = hexagon_with_cross();
    let forward: Vec<String> = (1..=8).map(|i| format!("p{}", i)).collect();
    let mut backward = forward.clone();
    backward.reverse();
    let shuffled: Vec<String> = ["p5", "p2", "p8", "p1", "p7", "p3", "p6", "p4"]
        .iter()
        .map(|s| s.to_string())
        .collect();

    let signature = |active: &[String]| -> BTreeSet<(&'static str, Vec<String>)> {
        compute_patterns(&subject, Some(active))
            .unwrap()
            .into_iter()
            .map(|m| (m.id(), m.points))
            .collect()
    };
    let expected = signature(&forward[..]);
    assert_eq!(signature(&backward[..]), expected);
    assert_eq!(signature(&shuffled[..]), expected);
}

#[test]
fn test_record_round_trip_keeps_template() {
    let records = compute_major_aspects(&hexagon_with_cross(), None).unwrap();
    assert!(!records.is_empty());

    let text = serde_json::to_string(&records).unwrap();
    let parsed: Vec<PatternRecord> = serde_json::from_str(&text).unwrap();
    assert_eq!(parsed, records);
    for record in &parsed {
        let template = template(&record.id).unwrap();
        assert!(record.matches_template(template), "{} drifted", record.id);
    }
}

#[test]
fn test_record_json_shape() {
    let subject = subject_at(&[("a", 0.0), ("b", 120.0), ("c", 240.0)]);
    let records = compute_major_aspects(&subject, None).unwrap();
    let value = serde_json::to_value(&records).unwrap();
    let first = &value[0];
    assert_eq!(first["id"], "grand_trine");
    assert_eq!(first["aspects"], json!(["trine"]));
    assert_eq!(first["points"], json!(["a", "b", "c"]));
    assert_eq!(first["links"][0]["type"], "trine");
    assert_eq!(first["links"][0]["pair"], json!(["a", "b"]));
    assert_eq!(first["structure"]["triple"], json!(["a", "b", "c"]));
}

#[test]
fn test_active_point_limit_skips_large_matchers() {
    let settings = EngineSettings {
        max_active_points: 4,
        ..EngineSettings::default()
    };
    let calculator = AspectCalculator::new().with_settings(settings);
    let matches = calculator.compute_patterns(&hexagon_with_cross(), None).unwrap();
    let found = ids(&matches);
    assert!(found.contains("grand_trine"));
    assert!(found.contains("t_square"));
    assert!(!found.contains("grand_cross"));
    assert!(!found.contains("grand_sextile"));
    assert!(!found.contains("kite"));
}

#[test]
fn test_parallel_detection_matches_sequential() {
    let sequential = AspectCalculator::new().compute_patterns(&hexagon_with_cross(), None).unwrap();
    let parallel = AspectCalculator::new()
        .with_settings(EngineSettings {
            parallel: true,
            ..EngineSettings::default()
        })
        .compute_patterns(&hexagon_with_cross(), None)
        .unwrap();
    assert_eq!(parallel, sequential);
}
