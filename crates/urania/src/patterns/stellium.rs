//! Stellium: three or more points bunched inside a 30° arc.

use super::{point_set, Emitted, PatternMatch, PatternMatcher, PatternStructure, PatternTemplate};
use crate::aspects::types::CONJUNCTION;
use crate::aspects::PairIndex;
use crate::patterns::combinations::combinations;
use crate::patterns::types::STELLIUM;
use std::collections::BTreeSet;

/// Widest arc a cluster may span, in degrees
pub const STELLIUM_SPAN: f64 = 30.0;

const MIN_MEMBERS: usize = 3;

pub struct StelliumMatcher;

impl PatternMatcher for StelliumMatcher {
    fn template(&self) -> &'static PatternTemplate {
        &STELLIUM
    }

    fn arity(&self) -> usize {
        MIN_MEMBERS
    }

    fn find_matches(&self, index: &PairIndex) -> Vec<PatternMatch> {
        let mut matches = Vec::new();
        let mut emitted = Emitted::default();

        let all: Vec<usize> = (0..index.len()).collect();
        let ordered = index.sorted_by_position(&all);
        // Second lap shifted by 360° so clusters across 0° stay contiguous
        let lap: Vec<(usize, f64)> = ordered
            .iter()
            .map(|&i| (i, index.abs_pos(i)))
            .chain(ordered.iter().map(|&i| (i, index.abs_pos(i) + 360.0)))
            .collect();

        let mut start = 0;
        for end in 0..lap.len() {
            while lap[end].1 - lap[start].1 > STELLIUM_SPAN {
                start += 1;
            }
            let members: BTreeSet<usize> = lap[start..=end].iter().map(|&(i, _)| i).collect();
            if members.len() < MIN_MEMBERS {
                continue;
            }
            let mut members: Vec<usize> = members.into_iter().collect();
            members.sort_by(|&a, &b| index.key(a).cmp(index.key(b)));

            let set = point_set(index, &members);
            if !emitted.first_time(&set) {
                continue;
            }
            let links = combinations(members.len(), 2)
                .filter_map(|pair| index.link(members[pair[0]], members[pair[1]], CONJUNCTION))
                .collect();
            let cluster = set.keys().to_vec();
            matches.push(PatternMatch::new(
                &STELLIUM,
                set,
                links,
                PatternStructure::Stellium { cluster },
            ));
        }
        matches
    }
}
