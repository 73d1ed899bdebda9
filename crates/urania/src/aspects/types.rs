use crate::points::PointSummary;
use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};

pub const CONJUNCTION: &str = "conjunction";
pub const SEXTILE: &str = "sextile";
pub const SQUARE: &str = "square";
pub const TRINE: &str = "trine";
pub const OPPOSITION: &str = "opposition";

/// An aspect catalog entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AspectDefinition {
    pub name: String,
    /// Exact angle in degrees (0, 60, 90, 120, 180)
    pub angle: f64,
    /// Allowed deviation from the exact angle, inclusive
    pub orb: f64,
    pub icon: String,
}

impl AspectDefinition {
    pub fn new(name: &str, angle: f64, orb: f64, icon: &str) -> Self {
        Self {
            name: name.to_string(),
            angle,
            orb,
            icon: icon.to_string(),
        }
    }
}

lazy_static! {
    /// The five major aspects, in classification order.
    pub static ref MAJOR_ASPECTS: Vec<AspectDefinition> = vec![
        AspectDefinition::new(CONJUNCTION, 0.0, 6.0, "◎"),
        AspectDefinition::new(SEXTILE, 60.0, 4.0, "✺"),
        AspectDefinition::new(SQUARE, 90.0, 6.0, "□"),
        AspectDefinition::new(TRINE, 120.0, 6.0, "△"),
        AspectDefinition::new(OPPOSITION, 180.0, 6.0, "☍"),
    ];
}

/// Classified relationship between two indexed points
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PairAspect {
    #[serde(rename = "type")]
    pub aspect_type: String,
    pub angle: f64,
    /// Residual from the exact angle, rounded to 2 decimals
    pub orb: f64,
    /// Raw angular difference in [0, 180]
    pub difference: f64,
    pub icon: String,
}

/// Edge between two points realizing one required aspect of a pattern.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AspectLink {
    #[serde(rename = "type")]
    pub aspect_type: String,
    /// Always in sorted order
    pub pair: [String; 2],
    pub orb: f64,
    pub difference: f64,
}

impl AspectLink {
    pub fn new(a: &str, b: &str, info: &PairAspect) -> Self {
        Self {
            aspect_type: info.aspect_type.clone(),
            pair: canonical_pair(a, b),
            orb: info.orb,
            difference: info.difference,
        }
    }
}

/// Aspect details nested in a pairwise row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AspectSummary {
    pub name: String,
    pub angle: f64,
    pub icon: String,
    pub orb: f64,
}

/// One row of a plain aspect table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AspectRow {
    pub base_key: String,
    pub other_key: String,
    pub aspect_type: String,
    pub angle: f64,
    pub orb: f64,
    pub angle_difference: f64,
    pub icon: String,
    pub aspect: AspectSummary,
    pub base: PointSummary,
    pub other: PointSummary,
}

/// Order two keys so lookups do not depend on argument order.
pub fn canonical_pair(a: &str, b: &str) -> [String; 2] {
    if a <= b {
        [a.to_string(), b.to_string()]
    } else {
        [b.to_string(), a.to_string()]
    }
}

/// Round to two decimals, the precision reported for orbs. Exact halves go
/// to the even neighbour.
pub fn round_orb(value: f64) -> f64 {
    (value * 100.0).round_ties_even() / 100.0
}
