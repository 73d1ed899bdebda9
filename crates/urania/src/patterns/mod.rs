//! Multi-point aspect configurations.
//!
//! Every matcher reads the same immutable [`PairIndex`] and enumerates
//! candidate subsets of the active points. A candidate is rejected as soon as
//! one required pair is missing from the index or carries another aspect type.
//! Matches are deduplicated per matcher by their unordered point set, so the
//! role a point plays (focal, apex, tail) never produces a second match.

pub mod combinations;
pub mod grand_cross;
pub mod grand_sextile;
pub mod grand_trine;
pub mod kite;
pub mod mystic_rectangle;
pub mod stellium;
pub mod t_square;
pub mod trapeze;
pub mod types;

pub use types::{
    serialize_patterns, template, PatternMatch, PatternRecord, PatternStructure, PatternTemplate,
    PointSet, PATTERN_TEMPLATES,
};

use crate::aspects::{AspectCalculator, PairIndex};
use crate::error::UraniaResult;
use rayon::prelude::*;
use serde_json::Value;
use std::collections::HashSet;

/// One detection strategy per pattern template
pub trait PatternMatcher: Send + Sync {
    fn template(&self) -> &'static PatternTemplate;

    /// Size of the candidate subsets this matcher enumerates
    fn arity(&self) -> usize;

    fn find_matches(&self, index: &PairIndex) -> Vec<PatternMatch>;
}

/// All matchers in output order
pub fn default_matchers() -> Vec<Box<dyn PatternMatcher>> {
    vec![
        Box::new(stellium::StelliumMatcher),
        Box::new(t_square::TSquareMatcher),
        Box::new(grand_trine::GrandTrineMatcher),
        Box::new(grand_cross::GrandCrossMatcher),
        Box::new(grand_sextile::GrandSextileMatcher),
        Box::new(mystic_rectangle::MysticRectangleMatcher),
        Box::new(trapeze::TrapezeMatcher),
        Box::new(kite::KiteMatcher),
    ]
}

/// Point sets a matcher has already reported
#[derive(Debug, Default)]
pub(crate) struct Emitted(HashSet<PointSet>);

impl Emitted {
    /// Record `set`; false if it was reported before
    pub(crate) fn first_time(&mut self, set: &PointSet) -> bool {
        self.0.insert(set.clone())
    }
}

pub(crate) fn point_set(index: &PairIndex, members: &[usize]) -> PointSet {
    PointSet::new(members.iter().map(|&i| index.key(i)))
}

pub(crate) fn keys_of(index: &PairIndex, members: &[usize]) -> Vec<String> {
    members.iter().map(|&i| index.key(i).to_string()).collect()
}

impl AspectCalculator {
    /// Detect every pattern among the active points of `subject`.
    pub fn compute_patterns(
        &self,
        subject: &Value,
        active_points: Option<&[String]>,
    ) -> UraniaResult<Vec<PatternMatch>> {
        let (points, keys) = self.prepare(subject, active_points)?;
        if keys.is_empty() {
            return Ok(Vec::new());
        }
        let index = PairIndex::build(self, &points, &keys);
        if log::log_enabled!(log::Level::Trace) {
            for ([a, b], info) in index.entries() {
                log::trace!("{} {} {} (orb {})", a, info.aspect_type, b, info.orb);
            }
        }
        Ok(self.detect(&index))
    }

    /// Run every matcher over a prepared index.
    ///
    /// When the index holds more than `max_active_points` keys the 4- and
    /// 6-point matchers are skipped.
    pub fn detect(&self, index: &PairIndex) -> Vec<PatternMatch> {
        let matchers = default_matchers();
        let limit = self.settings().max_active_points;
        let runnable: Vec<&dyn PatternMatcher> = matchers
            .iter()
            .map(|m| m.as_ref())
            .filter(|m| {
                let allowed = m.arity() <= 3 || index.len() <= limit;
                if !allowed {
                    log::warn!(
                        "Skipping {} detection: {} active points exceeds the limit of {} \
                         ({} candidate subsets)",
                        m.template().id,
                        index.len(),
                        limit,
                        combinations::count(index.len(), m.arity())
                    );
                }
                allowed
            })
            .collect();

        let found: Vec<Vec<PatternMatch>> = if self.settings().parallel {
            runnable.par_iter().map(|m| m.find_matches(index)).collect()
        } else {
            runnable.iter().map(|m| m.find_matches(index)).collect()
        };

        for (matcher, matches) in runnable.iter().zip(&found) {
            log::debug!("{}: {} match(es)", matcher.template().id, matches.len());
        }
        found.into_iter().flatten().collect()
    }
}
