pub mod calculator;
pub mod index;
pub mod types;

pub use calculator::{
    angular_difference, AspectCalculator, EngineSettings, DEFAULT_MAX_ACTIVE_POINTS,
};
pub use index::PairIndex;
pub use types::{
    canonical_pair, AspectDefinition, AspectLink, AspectRow, AspectSummary, PairAspect,
    MAJOR_ASPECTS,
};
