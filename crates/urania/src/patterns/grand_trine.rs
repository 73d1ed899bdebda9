use super::{
    keys_of, point_set, Emitted, PatternMatch, PatternMatcher, PatternStructure, PatternTemplate,
};
use crate::aspects::types::{AspectLink, TRINE};
use crate::aspects::PairIndex;
use crate::patterns::combinations::combinations;
use crate::patterns::types::GRAND_TRINE;

pub struct GrandTrineMatcher;

/// Trine links a-b, a-c, b-c when all three exist
pub(crate) fn trine_triangle(
    index: &PairIndex,
    a: usize,
    b: usize,
    c: usize,
) -> Option<Vec<AspectLink>> {
    Some(vec![
        index.link(a, b, TRINE)?,
        index.link(a, c, TRINE)?,
        index.link(b, c, TRINE)?,
    ])
}

impl PatternMatcher for GrandTrineMatcher {
    fn template(&self) -> &'static PatternTemplate {
        &GRAND_TRINE
    }

    fn arity(&self) -> usize {
        3
    }

    fn find_matches(&self, index: &PairIndex) -> Vec<PatternMatch> {
        let mut matches = Vec::new();
        let mut emitted = Emitted::default();

        for combo in combinations(index.len(), 3) {
            let Some(links) = trine_triangle(index, combo[0], combo[1], combo[2]) else {
                continue;
            };
            let set = point_set(index, &combo);
            if !emitted.first_time(&set) {
                continue;
            }
            let mut triple = keys_of(index, &combo);
            triple.sort();
            matches.push(PatternMatch::new(
                &GRAND_TRINE,
                set,
                links,
                PatternStructure::GrandTrine { triple },
            ));
        }
        matches
    }
}
