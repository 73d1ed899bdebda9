//! All-pairs aspect table shared by the pattern matchers.
//!
//! The table is dense over the active keys and addressed either by key
//! (orientation independent) or by position in the active key list, which is
//! what the combinatorial matchers iterate over.

use crate::aspects::calculator::AspectCalculator;
use crate::aspects::types::{canonical_pair, AspectLink, PairAspect};
use crate::points::PointMap;
use std::collections::HashMap;

#[derive(Debug, Clone)]
pub struct PairIndex {
    keys: Vec<String>,
    positions: Vec<f64>,
    slots: Vec<Option<PairAspect>>,
    lookup: HashMap<String, usize>,
}

impl PairIndex {
    /// Classify every pair of `keys`. Keys missing from `points` are ignored.
    ///
    /// Positions are folded into [0, 360) so position-ordered matchers see
    /// one lap of the circle.
    pub fn build(calculator: &AspectCalculator, points: &PointMap, keys: &[String]) -> Self {
        let (keys, positions): (Vec<String>, Vec<f64>) = keys
            .iter()
            .filter_map(|k| points.get(k).map(|p| (k.clone(), p.abs_pos.rem_euclid(360.0))))
            .unzip();
        let n = keys.len();
        let mut slots = vec![None; n * n];
        let mut classified = 0usize;

        for i in 0..n {
            for j in (i + 1)..n {
                if let Some(pair) = calculator.calculate_aspect(positions[i], positions[j]) {
                    slots[i * n + j] = Some(pair.clone());
                    slots[j * n + i] = Some(pair);
                    classified += 1;
                }
            }
        }
        log::debug!("Pair index: {} points, {} aspected pairs", n, classified);

        let lookup = keys
            .iter()
            .enumerate()
            .map(|(i, k)| (k.clone(), i))
            .collect();
        Self {
            keys,
            positions,
            slots,
            lookup,
        }
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn keys(&self) -> &[String] {
        &self.keys
    }

    pub fn key(&self, i: usize) -> &str {
        &self.keys[i]
    }

    pub fn abs_pos(&self, i: usize) -> f64 {
        self.positions[i]
    }

    /// Aspect between two indexed points, if any
    pub fn between(&self, i: usize, j: usize) -> Option<&PairAspect> {
        if i == j {
            return None;
        }
        self.slots[i * self.len() + j].as_ref()
    }

    /// Aspect between two indexed points when it has the given type
    pub fn typed(&self, i: usize, j: usize, aspect_type: &str) -> Option<&PairAspect> {
        self.between(i, j).filter(|info| info.aspect_type == aspect_type)
    }

    /// Link realizing `aspect_type` between two indexed points
    pub fn link(&self, i: usize, j: usize, aspect_type: &str) -> Option<AspectLink> {
        self.typed(i, j, aspect_type)
            .map(|info| AspectLink::new(self.key(i), self.key(j), info))
    }

    /// Aspect between two keys, independent of argument order
    pub fn get(&self, a: &str, b: &str) -> Option<&PairAspect> {
        let i = *self.lookup.get(a)?;
        let j = *self.lookup.get(b)?;
        self.between(i, j)
    }

    /// Aspect between two keys when it has the given type
    pub fn aspect_between(&self, a: &str, b: &str, aspect_type: &str) -> Option<&PairAspect> {
        self.get(a, b).filter(|info| info.aspect_type == aspect_type)
    }

    /// Every aspected pair as (canonical key pair, aspect), sorted by pair
    pub fn entries(&self) -> Vec<([String; 2], &PairAspect)> {
        let n = self.len();
        let mut entries = Vec::new();
        for i in 0..n {
            for j in (i + 1)..n {
                if let Some(info) = self.between(i, j) {
                    entries.push((canonical_pair(&self.keys[i], &self.keys[j]), info));
                }
            }
        }
        entries.sort_by(|a, b| a.0.cmp(&b.0));
        entries
    }

    /// Indices sorted by absolute position, ties broken by key
    pub fn sorted_by_position(&self, indices: &[usize]) -> Vec<usize> {
        let mut ordered = indices.to_vec();
        ordered.sort_by(|&a, &b| {
            self.positions[a]
                .total_cmp(&self.positions[b])
                .then_with(|| self.keys[a].cmp(&self.keys[b]))
        });
        ordered
    }
}
