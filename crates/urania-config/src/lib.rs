use serde::Deserialize;
use std::fs;
use std::path::Path;
use urania::{AspectCalculator, AspectDefinition, EngineSettings};

/// Engine settings and aspect catalog loaded from `urania.toml`
#[derive(Debug, Clone, PartialEq)]
pub struct UraniaConfig {
    pub engine: EngineSettings,
    /// `None` keeps the five major aspects
    pub aspects: Option<Vec<AspectDefinition>>,
}

impl Default for UraniaConfig {
    fn default() -> Self {
        Self {
            engine: EngineSettings::default(),
            aspects: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
struct EngineToml {
    #[serde(default = "default_max_active_points")]
    max_active_points: usize,
    #[serde(default)]
    parallel: bool,
}

impl Default for EngineToml {
    fn default() -> Self {
        Self {
            max_active_points: default_max_active_points(),
            parallel: false,
        }
    }
}

fn default_max_active_points() -> usize {
    urania::aspects::DEFAULT_MAX_ACTIVE_POINTS
}

#[derive(Debug, Clone, Deserialize)]
struct AspectToml {
    name: String,
    angle: f64,
    orb: f64,
    #[serde(default)]
    icon: String,
}

#[derive(Debug, Clone, Deserialize)]
struct RootConfigToml {
    #[serde(default)]
    engine: EngineToml,
    #[serde(default)]
    aspects: Option<Vec<AspectToml>>,
}

/// Try common relative paths for `configs/urania.toml`.
pub fn read_config_text() -> anyhow::Result<String> {
    let paths = ["configs/urania.toml", "../../configs/urania.toml"];
    for p in &paths {
        if let Ok(c) = fs::read_to_string(p) {
            return Ok(c);
        }
    }
    anyhow::bail!("Could not load urania.toml from {:?}", paths);
}

pub fn parse_config(text: &str) -> anyhow::Result<UraniaConfig> {
    let root: RootConfigToml =
        toml::from_str(text).map_err(|e| anyhow::anyhow!("Failed to parse urania.toml: {e}"))?;
    let RootConfigToml { engine, aspects } = root;
    if engine.max_active_points < 3 {
        anyhow::bail!(
            "engine.max_active_points must be at least 3, got {}",
            engine.max_active_points
        );
    }
    let aspects = aspects.map(|list| {
        list.into_iter()
            .map(|a| AspectDefinition::new(&a.name, a.angle, a.orb, &a.icon))
            .collect::<Vec<_>>()
    });
    if matches!(&aspects, Some(list) if list.is_empty()) {
        anyhow::bail!("[[aspects]] is present but lists no aspects");
    }
    Ok(UraniaConfig {
        engine: EngineSettings {
            max_active_points: engine.max_active_points,
            parallel: engine.parallel,
        },
        aspects,
    })
}

pub fn load_config(path: &Path) -> anyhow::Result<UraniaConfig> {
    let text = fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read {}: {e}", path.display()))?;
    let config = parse_config(&text)?;
    log::debug!("Loaded config from {}", path.display());
    Ok(config)
}

/// Explicit path if given, else the default search paths, else built-in defaults.
pub fn load_config_or_default(path: Option<&Path>) -> anyhow::Result<UraniaConfig> {
    match path {
        Some(path) => load_config(path),
        None => match read_config_text() {
            Ok(text) => parse_config(&text),
            Err(e) => {
                log::debug!("{e}; using built-in defaults");
                Ok(UraniaConfig::default())
            }
        },
    }
}

pub fn build_calculator(config: &UraniaConfig) -> anyhow::Result<AspectCalculator> {
    let calculator = match &config.aspects {
        Some(aspects) => AspectCalculator::try_with_aspects(aspects.clone())
            .map_err(|e| anyhow::anyhow!("Invalid aspect catalog in urania.toml: {e}"))?,
        None => AspectCalculator::new(),
    };
    Ok(calculator.with_settings(config.engine.clone()))
}
