use crate::aspects::types::AspectLink;
use serde::{Deserialize, Serialize};

/// Static description of a multi-point configuration
#[derive(Debug, PartialEq, Eq, Serialize)]
pub struct PatternTemplate {
    pub id: &'static str,
    pub name: &'static str,
    pub planets: &'static str,
    pub aspects: &'static [&'static str],
    pub aspects_label: &'static str,
    pub geometry: &'static str,
    pub orb: &'static str,
    pub construction: &'static str,
}

pub static STELLIUM: PatternTemplate = PatternTemplate {
    id: "stellium",
    name: "Stellium",
    planets: "3+ planets",
    aspects: &["conjunction"],
    aspects_label: "Conjunctions",
    geometry: "Clustered within ~30° (often one sign) with overlapping 0° links.",
    orb: "Planets within ~5–10° of each other across the cluster.",
    construction: "Conjunction-series bundle occupying one tight sector.",
};

pub static T_SQUARE: PatternTemplate = PatternTemplate {
    id: "t_square",
    name: "T-Square",
    planets: "3 planets",
    aspects: &["opposition", "square"],
    aspects_label: "Opposition + Squares",
    geometry: "Opposition capped by two 90° squares, forming a T spine.",
    orb: "Squares/opposition typically ±8–10°.",
    construction: "A ↔ B opposition with C square to both (C = focal).",
};

pub static GRAND_TRINE: PatternTemplate = PatternTemplate {
    id: "grand_trine",
    name: "Grand Trine",
    planets: "3 planets",
    aspects: &["trine"],
    aspects_label: "Trines",
    geometry: "Three 120° links in an equilateral triangle.",
    orb: "Trines usually ±6–8° (often ~±7°).",
    construction: "A–B–C all 120° apart forming a closed triangle.",
};

pub static GRAND_CROSS: PatternTemplate = PatternTemplate {
    id: "grand_cross",
    name: "Grand Cross",
    planets: "4 planets",
    aspects: &["opposition", "square"],
    aspects_label: "Oppositions + Squares",
    geometry: "Four points every 90°: two oppositions plus four squares.",
    orb: "Squares/oppositions typically ±8–10°.",
    construction: "A↔C and B↔D oppositions; each is square to its neighbors.",
};

pub static GRAND_SEXTILE: PatternTemplate = PatternTemplate {
    id: "grand_sextile",
    name: "Grand Sextile",
    planets: "6 planets",
    aspects: &["sextile", "trine"],
    aspects_label: "Sextiles + Trines",
    geometry: "Hexagram/Star of David: alternating 60° and 120° points.",
    orb: "Sextiles ±5–6°; trines ±6–8°.",
    construction: "Two interlaced Grand Trines linked by six sextiles.",
};

pub static MYSTIC_RECTANGLE: PatternTemplate = PatternTemplate {
    id: "mystic_rectangle",
    name: "Mystic Rectangle",
    planets: "4 planets",
    aspects: &["opposition", "trine", "sextile"],
    aspects_label: "Oppositions, Trines, Sextiles",
    geometry: "Two oppositions stitched by trines and sextiles into a rectangle.",
    orb: "Oppositions ±8–10°; trines 6–8°; sextiles 5–6°.",
    construction: "A↔C and B↔D; A sextile D & trine B, C sextile B & trine D.",
};

pub static TRAPEZE: PatternTemplate = PatternTemplate {
    id: "trapeze",
    name: "Trapeze / Cradle",
    planets: "4 planets",
    aspects: &["opposition", "sextile"],
    aspects_label: "Opposition + Sextiles",
    geometry: "Three sextiles in a row with an opposition across the open ends.",
    orb: "Sextiles ±5–6°; opposition ±8–10°.",
    construction: "A sextile B sextile C sextile D, with A↔D in opposition.",
};

pub static KITE: PatternTemplate = PatternTemplate {
    id: "kite",
    name: "Kite",
    planets: "4 planets",
    aspects: &["trine", "opposition", "sextile"],
    aspects_label: "Trines, Opposition, Sextiles",
    geometry: "A Grand Trine with a fourth point opposing one apex like a kite's tail.",
    orb: "Trines and opposition ±6°; sextiles ±4°.",
    construction: "A–B–C Grand Trine; D opposes A and is sextile to B and C.",
};

/// Every template, in detection order
pub static PATTERN_TEMPLATES: [&PatternTemplate; 8] = [
    &STELLIUM,
    &T_SQUARE,
    &GRAND_TRINE,
    &GRAND_CROSS,
    &GRAND_SEXTILE,
    &MYSTIC_RECTANGLE,
    &TRAPEZE,
    &KITE,
];

/// Look up a template by id
pub fn template(id: &str) -> Option<&'static PatternTemplate> {
    PATTERN_TEMPLATES.iter().copied().find(|t| t.id == id)
}

/// Role diagnostics for a match, one shape per pattern.
///
/// Serialized without a tag: the field names identify the shape. Kite is
/// listed before the grand trine so its extra fields are not swallowed on
/// deserialization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PatternStructure {
    Kite {
        triple: Vec<String>,
        apex: String,
        tail: String,
    },
    Stellium {
        cluster: Vec<String>,
    },
    TSquare {
        focal: String,
    },
    GrandTrine {
        triple: Vec<String>,
    },
    GrandCross {
        axes: [[String; 2]; 2],
    },
    GrandSextile {
        triples: [Vec<String>; 2],
    },
    MysticRectangle {
        oppositions: [[String; 2]; 2],
    },
    Trapeze {
        chain: Vec<String>,
    },
}

/// Canonical, hashable form of a matched point set
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PointSet(Vec<String>);

impl PointSet {
    pub fn new<I, S>(keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut keys: Vec<String> = keys.into_iter().map(Into::into).collect();
        keys.sort();
        keys.dedup();
        Self(keys)
    }

    pub fn keys(&self) -> &[String] {
        &self.0
    }

    pub fn into_keys(self) -> Vec<String> {
        self.0
    }
}

/// A concrete occurrence of a pattern
#[derive(Debug, Clone, PartialEq)]
pub struct PatternMatch {
    pub template: &'static PatternTemplate,
    /// Participating keys, sorted
    pub points: Vec<String>,
    pub links: Vec<AspectLink>,
    pub structure: PatternStructure,
}

impl PatternMatch {
    pub fn new(
        template: &'static PatternTemplate,
        points: PointSet,
        links: Vec<AspectLink>,
        structure: PatternStructure,
    ) -> Self {
        Self {
            template,
            points: points.into_keys(),
            links,
            structure,
        }
    }

    pub fn id(&self) -> &'static str {
        self.template.id
    }

    pub fn point_set(&self) -> PointSet {
        PointSet::new(self.points.iter().cloned())
    }

    /// Flatten into a JSON-ready record
    pub fn to_record(&self) -> PatternRecord {
        let t = self.template;
        PatternRecord {
            id: t.id.to_string(),
            name: t.name.to_string(),
            planets: t.planets.to_string(),
            aspects: t.aspects.iter().map(|a| a.to_string()).collect(),
            aspects_label: t.aspects_label.to_string(),
            geometry: t.geometry.to_string(),
            orb: t.orb.to_string(),
            construction: t.construction.to_string(),
            points: self.points.clone(),
            links: self.links.clone(),
            structure: self.structure.clone(),
        }
    }
}

/// Serialized pattern match: template fields plus the match itself
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatternRecord {
    pub id: String,
    pub name: String,
    pub planets: String,
    pub aspects: Vec<String>,
    pub aspects_label: String,
    pub geometry: String,
    pub orb: String,
    pub construction: String,
    pub points: Vec<String>,
    pub links: Vec<AspectLink>,
    pub structure: PatternStructure,
}

impl PatternRecord {
    /// True when the descriptive fields equal those of `template`
    pub fn matches_template(&self, template: &PatternTemplate) -> bool {
        self.id == template.id
            && self.name == template.name
            && self.planets == template.planets
            && self.aspects.iter().map(String::as_str).eq(template.aspects.iter().copied())
            && self.aspects_label == template.aspects_label
            && self.geometry == template.geometry
            && self.orb == template.orb
            && self.construction == template.construction
    }
}

/// Convert matches into JSON-ready records
pub fn serialize_patterns<'a, I>(matches: I) -> Vec<PatternRecord>
where
    I: IntoIterator<Item = &'a PatternMatch>,
{
    matches.into_iter().map(PatternMatch::to_record).collect()
}
