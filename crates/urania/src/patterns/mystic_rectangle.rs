use super::{point_set, Emitted, PatternMatch, PatternMatcher, PatternStructure, PatternTemplate};
use crate::aspects::types::{AspectLink, OPPOSITION, SEXTILE, TRINE};
use crate::aspects::PairIndex;
use crate::patterns::combinations::combinations;
use crate::patterns::types::MYSTIC_RECTANGLE;

pub struct MysticRectangleMatcher;

/// Diagonals a-c and b-d are oppositions, a-b and c-d trines, b-c and d-a
/// sextiles.
fn rectangle(index: &PairIndex, a: usize, b: usize, c: usize, d: usize) -> Option<Vec<AspectLink>> {
    Some(vec![
        index.link(a, c, OPPOSITION)?,
        index.link(b, d, OPPOSITION)?,
        index.link(a, b, TRINE)?,
        index.link(c, d, TRINE)?,
        index.link(b, c, SEXTILE)?,
        index.link(d, a, SEXTILE)?,
    ])
}

impl PatternMatcher for MysticRectangleMatcher {
    fn template(&self) -> &'static PatternTemplate {
        &MYSTIC_RECTANGLE
    }

    fn arity(&self) -> usize {
        4
    }

    fn find_matches(&self, index: &PairIndex) -> Vec<PatternMatch> {
        let mut matches = Vec::new();
        let mut emitted = Emitted::default();

        for combo in combinations(index.len(), 4) {
            let [p, q, r, s] = [combo[0], combo[1], combo[2], combo[3]];
            // Every diagonal split, each with both edge orientations
            let layouts = [
                (p, q, r, s),
                (p, s, r, q),
                (p, r, q, s),
                (p, s, q, r),
                (p, q, s, r),
                (p, r, s, q),
            ];
            let found = layouts.into_iter().find_map(|(a, b, c, d)| {
                rectangle(index, a, b, c, d).map(|links| (a, b, c, d, links))
            });
            let Some((a, b, c, d, links)) = found else {
                continue;
            };
            let set = point_set(index, &combo);
            if !emitted.first_time(&set) {
                continue;
            }
            let pair = |x: usize, y: usize| [index.key(x).to_string(), index.key(y).to_string()];
            matches.push(PatternMatch::new(
                &MYSTIC_RECTANGLE,
                set,
                links,
                PatternStructure::MysticRectangle {
                    oppositions: [pair(a, c), pair(b, d)],
                },
            ));
        }
        matches
    }
}
