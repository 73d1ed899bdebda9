use super::{point_set, Emitted, PatternMatch, PatternMatcher, PatternStructure, PatternTemplate};
use crate::aspects::types::{OPPOSITION, SQUARE};
use crate::aspects::PairIndex;
use crate::patterns::combinations::combinations;
use crate::patterns::types::GRAND_CROSS;

/// Two oppositions crossing at right angles
pub struct GrandCrossMatcher;

impl PatternMatcher for GrandCrossMatcher {
    fn template(&self) -> &'static PatternTemplate {
        &GRAND_CROSS
    }

    fn arity(&self) -> usize {
        4
    }

    fn find_matches(&self, index: &PairIndex) -> Vec<PatternMatch> {
        let mut matches = Vec::new();
        let mut emitted = Emitted::default();

        for combo in combinations(index.len(), 4) {
            let oppositions: Vec<(usize, usize)> = combinations(4, 2)
                .map(|p| (combo[p[0]], combo[p[1]]))
                .filter(|&(p, q)| index.typed(p, q, OPPOSITION).is_some())
                .collect();

            for pick in combinations(oppositions.len(), 2) {
                let (p1, q1) = oppositions[pick[0]];
                let (p2, q2) = oppositions[pick[1]];
                // Disjoint pairs of four distinct points cover the subset
                if p1 == p2 || p1 == q2 || q1 == p2 || q1 == q2 {
                    continue;
                }
                let squares = [
                    index.link(p1, p2, SQUARE),
                    index.link(p1, q2, SQUARE),
                    index.link(q1, p2, SQUARE),
                    index.link(q1, q2, SQUARE),
                ];
                if squares.iter().any(Option::is_none) {
                    continue;
                }
                let set = point_set(index, &combo);
                if !emitted.first_time(&set) {
                    break;
                }
                let mut links = Vec::with_capacity(6);
                links.extend(index.link(p1, q1, OPPOSITION));
                links.extend(index.link(p2, q2, OPPOSITION));
                links.extend(squares.into_iter().flatten());
                let axis =
                    |p: usize, q: usize| [index.key(p).to_string(), index.key(q).to_string()];
                matches.push(PatternMatch::new(
                    &GRAND_CROSS,
                    set,
                    links,
                    PatternStructure::GrandCross {
                        axes: [axis(p1, q1), axis(p2, q2)],
                    },
                ));
                break;
            }
        }
        matches
    }
}
