//! Point normalization.
//!
//! Upstream chart services hand us a loosely typed mapping of point id to
//! attribute record. Rows without a usable `abs_pos` are skipped rather than
//! rejected, so a partially populated subject still yields aspects.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::{HashMap, HashSet};

/// Key of the optional active point list embedded in a subject object
pub const ACTIVE_POINTS_FIELD: &str = "active_points";

/// A chart point with a usable absolute position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Point {
    /// Normalized identifier ("North Node" -> "north_node")
    pub key: String,
    pub name: Option<String>,
    pub sign: Option<String>,
    /// Position inside the sign, in degrees
    pub position: Option<f64>,
    /// Absolute position on the 0-360 circle
    pub abs_pos: f64,
    pub house: Option<String>,
    pub retrograde: Option<bool>,
}

impl Point {
    /// Build a point from a raw attribute record.
    ///
    /// Returns `None` when `abs_pos` is missing or not a finite number.
    pub fn from_record(key: String, record: &Map<String, Value>) -> Option<Self> {
        let abs_pos = record.get("abs_pos").and_then(coerce_f64)?;
        Some(Self {
            key,
            name: record.get("name").and_then(coerce_string),
            sign: record.get("sign").and_then(coerce_string),
            position: record.get("position").and_then(coerce_f64),
            abs_pos,
            house: record.get("house").and_then(coerce_string),
            retrograde: record.get("retrograde").and_then(Value::as_bool),
        })
    }

    /// Descriptive summary embedded in pairwise aspect rows
    pub fn summary(&self) -> PointSummary {
        PointSummary {
            name: self.name.clone(),
            sign: self.sign.clone(),
            position: self.position,
            abs_pos: Some(self.abs_pos),
            house: self.house.clone(),
            retrograde: self.retrograde,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointSummary {
    pub name: Option<String>,
    pub sign: Option<String>,
    pub position: Option<f64>,
    pub abs_pos: Option<f64>,
    pub house: Option<String>,
    pub retrograde: Option<bool>,
}

/// Normalized key -> point
pub type PointMap = HashMap<String, Point>;

/// Lower-case an identifier and fold spaces and hyphens into underscores.
pub fn normalize_key(raw: &str) -> String {
    raw.replace([' ', '-'], "_").to_lowercase()
}

/// Coerce a JSON value to a finite real number.
///
/// Numbers and numeric strings are accepted. Everything else, including
/// NaN and infinities spelled as strings, is rejected.
pub fn coerce_f64(value: &Value) -> Option<f64> {
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    parsed.filter(|v| v.is_finite())
}

fn coerce_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Extract every usable point from a subject mapping.
///
/// Two raw ids that normalize to the same key collide; the later entry in
/// input order replaces the earlier one.
pub fn extract_points(subject: &Map<String, Value>) -> PointMap {
    let mut points = PointMap::new();
    for (raw_key, data) in subject {
        let Some(record) = data.as_object() else {
            log::trace!("Skipping non-record entry '{}'", raw_key);
            continue;
        };
        let key = normalize_key(raw_key);
        match Point::from_record(key.clone(), record) {
            Some(point) => {
                if points.insert(key.clone(), point).is_some() {
                    log::debug!(
                        "Point key '{}' normalized onto an existing key; keeping the later entry",
                        key
                    );
                }
            }
            None => log::trace!("Skipping '{}': abs_pos is missing or not numeric", raw_key),
        }
    }
    points
}

/// Resolve the working set of point keys.
///
/// Requested ids are normalized, filtered to known points and deduplicated
/// in first-seen order. When nothing resolves, every point is used, sorted
/// by key.
pub fn resolve_keys<S: AsRef<str>>(points: &PointMap, active: Option<&[S]>) -> Vec<String> {
    let mut keys = Vec::new();
    let mut seen = HashSet::new();
    for raw in active.unwrap_or(&[]) {
        let key = normalize_key(raw.as_ref());
        if points.contains_key(&key) && seen.insert(key.clone()) {
            keys.push(key);
        }
    }
    if keys.is_empty() {
        keys = points.keys().cloned().collect();
        keys.sort();
    }
    keys
}

/// Read the `active_points` list embedded in a subject, if any.
///
/// Non-string entries are ignored.
pub fn embedded_active_points(subject: &Map<String, Value>) -> Option<Vec<String>> {
    let list = subject.get(ACTIVE_POINTS_FIELD)?.as_array()?;
    Some(
        list.iter()
            .filter_map(|v| v.as_str().map(str::to_string))
            .collect(),
    )
}
