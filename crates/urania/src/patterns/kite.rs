//! Kite: a grand trine with a tail.
//!
//! The tail opposes one trine apex and sits sextile to the other two, so the
//! opposition splits the triangle down its axis of symmetry.

use super::grand_trine::trine_triangle;
use super::{
    keys_of, point_set, Emitted, PatternMatch, PatternMatcher, PatternStructure, PatternTemplate,
};
use crate::aspects::types::{AspectLink, OPPOSITION, SEXTILE};
use crate::aspects::PairIndex;
use crate::patterns::combinations::combinations;
use crate::patterns::types::KITE;

pub struct KiteMatcher;

impl PatternMatcher for KiteMatcher {
    fn template(&self) -> &'static PatternTemplate {
        &KITE
    }

    fn arity(&self) -> usize {
        4
    }

    fn find_matches(&self, index: &PairIndex) -> Vec<PatternMatch> {
        let mut matches = Vec::new();
        let mut emitted = Emitted::default();

        for combo in combinations(index.len(), 4) {
            let Some((links, structure)) = kite_in(index, &combo) else {
                continue;
            };
            let set = point_set(index, &combo);
            if emitted.first_time(&set) {
                matches.push(PatternMatch::new(&KITE, set, links, structure));
            }
        }
        matches
    }
}

/// Links and roles of the first tail/apex assignment forming a kite
fn kite_in(index: &PairIndex, combo: &[usize]) -> Option<(Vec<AspectLink>, PatternStructure)> {
    for (t, &tail) in combo.iter().enumerate() {
        let triangle: Vec<usize> = combo
            .iter()
            .enumerate()
            .filter(|&(i, _)| i != t)
            .map(|(_, &p)| p)
            .collect();
        let Some(trines) = trine_triangle(index, triangle[0], triangle[1], triangle[2]) else {
            continue;
        };
        for (k, &apex) in triangle.iter().enumerate() {
            let wings: Vec<usize> = triangle
                .iter()
                .enumerate()
                .filter(|&(i, _)| i != k)
                .map(|(_, &p)| p)
                .collect();
            let (Some(opposition), Some(left), Some(right)) = (
                index.link(apex, tail, OPPOSITION),
                index.link(tail, wings[0], SEXTILE),
                index.link(tail, wings[1], SEXTILE),
            ) else {
                continue;
            };
            let mut links = trines;
            links.extend([opposition, left, right]);
            let mut triple = keys_of(index, &triangle);
            triple.sort();
            return Some((
                links,
                PatternStructure::Kite {
                    triple,
                    apex: index.key(apex).to_string(),
                    tail: index.key(tail).to_string(),
                },
            ));
        }
    }
    None
}
