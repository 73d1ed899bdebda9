use super::{
    keys_of, point_set, Emitted, PatternMatch, PatternMatcher, PatternStructure, PatternTemplate,
};
use crate::aspects::types::{AspectLink, OPPOSITION, SEXTILE};
use crate::aspects::PairIndex;
use crate::patterns::combinations::combinations;
use crate::patterns::types::TRAPEZE;

/// Cradle: a chain of three sextiles whose ends oppose each other
pub struct TrapezeMatcher;

fn cradle(index: &PairIndex, chain: [usize; 4]) -> Option<Vec<AspectLink>> {
    let [a, b, c, d] = chain;
    Some(vec![
        index.link(a, b, SEXTILE)?,
        index.link(b, c, SEXTILE)?,
        index.link(c, d, SEXTILE)?,
        index.link(a, d, OPPOSITION)?,
    ])
}

impl PatternMatcher for TrapezeMatcher {
    fn template(&self) -> &'static PatternTemplate {
        &TRAPEZE
    }

    fn arity(&self) -> usize {
        4
    }

    fn find_matches(&self, index: &PairIndex) -> Vec<PatternMatch> {
        let mut matches = Vec::new();
        let mut emitted = Emitted::default();

        for combo in combinations(index.len(), 4) {
            let ordered = index.sorted_by_position(&combo);
            // Start the chain at each point in turn so a cradle spanning 0° is found
            let found = (0..4).find_map(|start| {
                let chain = [0, 1, 2, 3].map(|step| ordered[(start + step) % 4]);
                cradle(index, chain).map(|links| (chain, links))
            });
            let Some((chain, links)) = found else {
                continue;
            };
            let set = point_set(index, &combo);
            if !emitted.first_time(&set) {
                continue;
            }
            matches.push(PatternMatch::new(
                &TRAPEZE,
                set,
                links,
                PatternStructure::Trapeze {
                    chain: keys_of(index, &chain),
                },
            ));
        }
        matches
    }
}
