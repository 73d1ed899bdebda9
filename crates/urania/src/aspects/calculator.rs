use crate::aspects::types::{
    round_orb, AspectDefinition, AspectRow, AspectSummary, PairAspect, MAJOR_ASPECTS,
};
use crate::error::{json_kind, UraniaError, UraniaResult};
use crate::points::{embedded_active_points, extract_points, resolve_keys, PointMap};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Default ceiling on active points before the 4- and 6-point matchers are skipped
pub const DEFAULT_MAX_ACTIVE_POINTS: usize = 32;

/// Engine limits fixed at construction time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineSettings {
    /// Above this many active points only the 3-point matchers run
    pub max_active_points: usize,
    /// Run pattern matchers on the rayon pool
    pub parallel: bool,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            max_active_points: DEFAULT_MAX_ACTIVE_POINTS,
            parallel: false,
        }
    }
}

/// Shortest separation of two absolute positions, in [0, 180].
pub fn angular_difference(a: f64, b: f64) -> f64 {
    let raw = (a - b).abs() % 360.0;
    if raw > 180.0 {
        360.0 - raw
    } else {
        raw
    }
}

/// Aspect calculator over a fixed aspect catalog
#[derive(Debug, Clone)]
pub struct AspectCalculator {
    aspects: Vec<AspectDefinition>,
    settings: EngineSettings,
}

impl AspectCalculator {
    /// Calculator using the five major aspects
    pub fn new() -> Self {
        Self {
            aspects: MAJOR_ASPECTS.clone(),
            settings: EngineSettings::default(),
        }
    }

    /// Calculator over a custom catalog. Order is kept: classification
    /// returns the first entry whose orb window contains the difference.
    pub fn try_with_aspects(aspects: Vec<AspectDefinition>) -> UraniaResult<Self> {
        validate_catalog(&aspects)?;
        Ok(Self {
            aspects,
            settings: EngineSettings::default(),
        })
    }

    pub fn with_settings(mut self, settings: EngineSettings) -> Self {
        self.settings = settings;
        self
    }

    pub fn aspects(&self) -> &[AspectDefinition] {
        &self.aspects
    }

    pub fn settings(&self) -> &EngineSettings {
        &self.settings
    }

    /// First catalog entry matching `diff`, with its residual orb.
    pub fn classify(&self, diff: f64) -> Option<(&AspectDefinition, f64)> {
        self.aspects.iter().find_map(|aspect| {
            let delta = (diff - aspect.angle).abs();
            (delta <= aspect.orb).then_some((aspect, delta))
        })
    }

    /// Classify the relationship between two absolute positions
    pub fn calculate_aspect(&self, lon1: f64, lon2: f64) -> Option<PairAspect> {
        let difference = angular_difference(lon1, lon2);
        let (aspect, delta) = self.classify(difference)?;
        Some(PairAspect {
            aspect_type: aspect.name.clone(),
            angle: aspect.angle,
            orb: round_orb(delta),
            difference,
            icon: aspect.icon.clone(),
        })
    }

    /// Normalize a subject and resolve its active keys.
    ///
    /// An explicit `active_points` argument wins over a list embedded in the
    /// subject object.
    pub fn prepare(
        &self,
        subject: &Value,
        active_points: Option<&[String]>,
    ) -> UraniaResult<(PointMap, Vec<String>)> {
        let map = subject.as_object().ok_or_else(|| UraniaError::InvalidSubject {
            found: json_kind(subject).to_string(),
        })?;
        let points = extract_points(map);
        let embedded;
        let active = match active_points {
            Some(list) if !list.is_empty() => Some(list),
            _ => {
                embedded = embedded_active_points(map);
                embedded.as_deref()
            }
        };
        let keys = resolve_keys(&points, active);
        log::debug!(
            "Prepared {} of {} subject entries, {} active",
            points.len(),
            map.len(),
            keys.len()
        );
        Ok((points, keys))
    }

    /// Plain aspect table for the active points, ascending by orb
    pub fn compute(
        &self,
        subject: &Value,
        active_points: Option<&[String]>,
    ) -> UraniaResult<Vec<AspectRow>> {
        let (points, keys) = self.prepare(subject, active_points)?;
        let mut rows = Vec::new();

        for (i, base_key) in keys.iter().enumerate() {
            let Some(base) = points.get(base_key) else {
                continue;
            };
            for other_key in &keys[i + 1..] {
                let Some(other) = points.get(other_key) else {
                    continue;
                };
                let Some(pair) = self.calculate_aspect(base.abs_pos, other.abs_pos) else {
                    continue;
                };
                rows.push(AspectRow {
                    base_key: base_key.clone(),
                    other_key: other_key.clone(),
                    aspect_type: pair.aspect_type.clone(),
                    angle: pair.angle,
                    orb: pair.orb,
                    angle_difference: pair.difference,
                    icon: pair.icon.clone(),
                    aspect: AspectSummary {
                        name: pair.aspect_type,
                        angle: pair.angle,
                        icon: pair.icon,
                        orb: pair.orb,
                    },
                    base: base.summary(),
                    other: other.summary(),
                });
            }
        }

        rows.sort_by(|a, b| a.orb.total_cmp(&b.orb));
        Ok(rows)
    }
}

impl Default for AspectCalculator {
    fn default() -> Self {
        Self::new()
    }
}

fn validate_catalog(aspects: &[AspectDefinition]) -> UraniaResult<()> {
    if aspects.is_empty() {
        return Err(UraniaError::EmptyCatalog);
    }
    for aspect in aspects {
        let invalid = |message: &str| UraniaError::InvalidAspect {
            name: aspect.name.clone(),
            message: message.to_string(),
        };
        if aspect.name.trim().is_empty() {
            return Err(invalid("name must not be empty"));
        }
        if !aspect.angle.is_finite() || !(0.0..=180.0).contains(&aspect.angle) {
            return Err(invalid("angle must lie within [0, 180]"));
        }
        if !aspect.orb.is_finite() || aspect.orb < 0.0 {
            return Err(invalid("orb must be a non-negative number"));
        }
    }
    Ok(())
}
