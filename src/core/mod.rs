mod engine;
mod habit;
mod normalize;
mod presets;
mod summary;
mod tree;
mod types;

pub use engine::{
    BASELINE_GROWTH_RATE, GENERATIONAL_INJECTION, SCENARIO_GROWTH_RATE, YEARS_PER_GENERATION,
    habit_boost, project, run_simulation, simulate,
};
pub use habit::{
    DEFAULT_ANNUAL_RETURN, DEFAULT_MONTHLY_AMOUNT, DEFAULT_YEARS, GenerationalProjection,
    HabitImpact, habit_impact,
};
pub use normalize::{
    DEFAULT_GENERATIONS, MAX_GENERATIONS, MIN_GENERATIONS, NormalizeDefaults, RawFounder,
    RawScenario, RawSimulationInput, clamp_generations, normalize, normalize_with,
};
pub(crate) use normalize::lenient_number;
pub use presets::{
    PRESET_HABIT_CHANGE, Preset, PresetDetail, PresetFounder, PresetSimulation, PresetSummary,
    find_preset, list_presets, run_preset,
};
pub use summary::{summarize, tree_stats};
pub use tree::{build_tree, members_in_generation, split_evenly};
pub use types::{
    ComparisonSummary, Education, FamilyMember, FinancialHealth, FounderProfile, GenerationStats,
    LifeEvent, ScenarioDelta, SimulationResult, SummaryDifference, TrajectoryResult, TreeStats,
    WealthSequence,
};
