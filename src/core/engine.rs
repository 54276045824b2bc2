use tracing::debug;

use super::normalize::{RawSimulationInput, normalize};
use super::summary::summarize;
use super::tree::build_tree;
use super::types::{
    FounderProfile, ScenarioDelta, SimulationResult, TrajectoryResult, WealthSequence,
};

pub const YEARS_PER_GENERATION: i32 = 25;
pub const BASELINE_GROWTH_RATE: f64 = 1.06;
pub const SCENARIO_GROWTH_RATE: f64 = 1.08;
/// Flat per-generation injection, multiplied by generation depth and never compounded.
pub const GENERATIONAL_INJECTION: f64 = 150_000.0;
const HABIT_BOOST_MONTHS: f64 = 12.0 * 25.0;

/// One-off lump standing in for 25 years of the monthly habit change.
pub fn habit_boost(delta: &ScenarioDelta) -> f64 {
    delta.monthly_habit_change * HABIT_BOOST_MONTHS
}

/// Returns `(baseline, scenario)` aggregate wealth per generation.
pub fn project(profile: &FounderProfile, delta: &ScenarioDelta) -> (WealthSequence, WealthSequence) {
    let start_wealth = (profile.current_savings - profile.current_debt).max(0.0);
    let generations = delta.num_generations as usize;

    let baseline = compound_generations(start_wealth, BASELINE_GROWTH_RATE, generations);
    let scenario = compound_generations(
        start_wealth + habit_boost(delta),
        SCENARIO_GROWTH_RATE,
        generations,
    );
    (baseline, scenario)
}

fn compound_generations(start: f64, growth_rate: f64, generations: usize) -> WealthSequence {
    let per_generation_growth = growth_rate.powi(YEARS_PER_GENERATION);
    let mut wealth = Vec::with_capacity(generations);
    if generations == 0 {
        return WealthSequence::new(wealth);
    }

    wealth.push(start.max(0.0));
    for i in 1..generations {
        let next = wealth[i - 1] * per_generation_growth + GENERATIONAL_INJECTION * i as f64;
        wealth.push(next.max(0.0));
    }
    WealthSequence::new(wealth)
}

pub fn run_simulation(raw: &RawSimulationInput) -> SimulationResult {
    let (profile, delta) = normalize(raw);
    simulate(&profile, &delta)
}

pub fn simulate(profile: &FounderProfile, delta: &ScenarioDelta) -> SimulationResult {
    let (baseline_wealth, scenario_wealth) = project(profile, delta);
    let baseline_tree = build_tree(&baseline_wealth, profile);
    let scenario_tree = build_tree(&scenario_wealth, profile);
    let summary = summarize(&baseline_tree, &scenario_tree);

    debug!(
        generations = delta.num_generations,
        habit_change = delta.monthly_habit_change,
        baseline_total = summary.baseline.total_net_worth,
        scenario_total = summary.scenario.total_net_worth,
        members = summary.baseline.total_members,
        "simulation complete"
    );

    SimulationResult {
        baseline: TrajectoryResult {
            tree: baseline_tree,
        },
        scenario: TrajectoryResult {
            tree: scenario_tree,
        },
        summary,
    }
}
