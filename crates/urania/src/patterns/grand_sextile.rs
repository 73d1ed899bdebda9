use super::{
    keys_of, point_set, Emitted, PatternMatch, PatternMatcher, PatternStructure, PatternTemplate,
};
use crate::aspects::types::{AspectLink, SEXTILE, TRINE};
use crate::aspects::PairIndex;
use crate::patterns::combinations::combinations;
use crate::patterns::types::GRAND_SEXTILE;

const RING: usize = 6;

/// Six points on a hexagon: neighbours sextile, every second point trine.
pub struct GrandSextileMatcher;

/// Links between ring positions `step` apart, all of type `aspect_type`
fn ring_links(
    index: &PairIndex,
    ring: &[usize],
    step: usize,
    aspect_type: &str,
) -> Option<Vec<AspectLink>> {
    (0..RING)
        .map(|i| index.link(ring[i], ring[(i + step) % RING], aspect_type))
        .collect()
}

impl PatternMatcher for GrandSextileMatcher {
    fn template(&self) -> &'static PatternTemplate {
        &GRAND_SEXTILE
    }

    fn arity(&self) -> usize {
        RING
    }

    fn find_matches(&self, index: &PairIndex) -> Vec<PatternMatch> {
        let mut matches = Vec::new();
        let mut emitted = Emitted::default();

        for combo in combinations(index.len(), RING) {
            let ring = index.sorted_by_position(&combo);
            let Some(mut links) = ring_links(index, &ring, 1, SEXTILE) else {
                continue;
            };
            let Some(trines) = ring_links(index, &ring, 2, TRINE) else {
                continue;
            };
            let set = point_set(index, &combo);
            if !emitted.first_time(&set) {
                continue;
            }
            links.extend(trines);

            let even: Vec<usize> = ring.iter().copied().step_by(2).collect();
            let odd: Vec<usize> = ring.iter().copied().skip(1).step_by(2).collect();
            matches.push(PatternMatch::new(
                &GRAND_SEXTILE,
                set,
                links,
                PatternStructure::GrandSextile {
                    triples: [keys_of(index, &even), keys_of(index, &odd)],
                },
            ));
        }
        matches
    }
}
