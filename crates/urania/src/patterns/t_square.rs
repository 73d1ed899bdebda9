use super::{point_set, Emitted, PatternMatch, PatternMatcher, PatternStructure, PatternTemplate};
use crate::aspects::types::{OPPOSITION, SQUARE};
use crate::aspects::PairIndex;
use crate::patterns::combinations::combinations;
use crate::patterns::types::T_SQUARE;

/// Opposition whose ends are both square to a focal point
pub struct TSquareMatcher;

impl PatternMatcher for TSquareMatcher {
    fn template(&self) -> &'static PatternTemplate {
        &T_SQUARE
    }

    fn arity(&self) -> usize {
        3
    }

    fn find_matches(&self, index: &PairIndex) -> Vec<PatternMatch> {
        let mut matches = Vec::new();
        let mut emitted = Emitted::default();

        for combo in combinations(index.len(), 3) {
            let (a, b, c) = (combo[0], combo[1], combo[2]);
            // (x, focal, y); the first assignment that fits wins
            for (x, focal, y) in [(a, b, c), (a, c, b), (b, a, c)] {
                let (Some(opp), Some(sq1), Some(sq2)) = (
                    index.link(x, y, OPPOSITION),
                    index.link(x, focal, SQUARE),
                    index.link(focal, y, SQUARE),
                ) else {
                    continue;
                };
                let set = point_set(index, &combo);
                if emitted.first_time(&set) {
                    matches.push(PatternMatch::new(
                        &T_SQUARE,
                        set,
                        vec![opp, sq1, sq2],
                        PatternStructure::TSquare {
                            focal: index.key(focal).to_string(),
                        },
                    ));
                }
                break;
            }
        }
        matches
    }
}
