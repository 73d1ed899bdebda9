//! Aspect tables and aspect pattern detection for chart points.
//!
//! Input is a JSON object mapping point ids to attribute records carrying an
//! `abs_pos` in degrees, as produced by an upstream chart service. Output is
//! plain serde records: a pairwise aspect table, or the multi-point
//! configurations (stellium, T-square, grand trine, grand cross, grand
//! sextile, mystic rectangle, trapeze, kite) formed by the active points.

pub mod aspects;
pub mod error;
pub mod patterns;
pub mod points;

pub use aspects::{
    angular_difference, AspectCalculator, AspectDefinition, AspectLink, AspectRow, EngineSettings,
    PairIndex, MAJOR_ASPECTS,
};
pub use error::{UraniaError, UraniaResult};
pub use patterns::{
    serialize_patterns, PatternMatch, PatternRecord, PatternStructure, PatternTemplate,
    PATTERN_TEMPLATES,
};
pub use points::{normalize_key, Point, PointMap};

use serde_json::Value;

/// Detect patterns with the default catalog and return JSON-ready records.
pub fn compute_major_aspects(
    subject: &Value,
    active_points: Option<&[String]>,
) -> UraniaResult<Vec<PatternRecord>> {
    let matches = compute_patterns(subject, active_points)?;
    Ok(serialize_patterns(&matches))
}

/// Detect patterns with the default catalog
pub fn compute_patterns(
    subject: &Value,
    active_points: Option<&[String]>,
) -> UraniaResult<Vec<PatternMatch>> {
    AspectCalculator::new().compute_patterns(subject, active_points)
}
