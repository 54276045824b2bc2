use serde::Serialize;

use super::engine::simulate;
use super::normalize::{DEFAULT_GENERATIONS, clamp_generations};
use super::types::{Education, FounderProfile, ScenarioDelta, SimulationResult};
use crate::error::{Error, Result};

/// Monthly habit change every preset is compared against.
pub const PRESET_HABIT_CHANGE: f64 = 100.0;

#[derive(Debug, Clone, PartialEq)]
pub struct Preset {
    pub name: &'static str,
    pub description: &'static str,
    pub founder: FounderProfile,
}

/// A preset as served to clients. The founder uses simulation request field
/// names so it can be posted back unchanged.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PresetDetail {
    pub name: &'static str,
    pub description: &'static str,
    pub founder: PresetFounder,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PresetFounder {
    pub name: String,
    pub age: u32,
    pub income: f64,
    pub savings: f64,
    pub debt: f64,
    pub education: Education,
    pub financial_literacy: f64,
}

impl Preset {
    pub fn detail(&self) -> PresetDetail {
        let founder = &self.founder;
        PresetDetail {
            name: self.name,
            description: self.description,
            founder: PresetFounder {
                name: founder.name.clone(),
                age: founder.age,
                income: founder.annual_income,
                savings: founder.current_savings,
                debt: founder.current_debt,
                education: founder.education,
                financial_literacy: founder.financial_literacy,
            },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PresetSummary {
    pub name: &'static str,
    pub description: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PresetSimulation {
    #[serde(flatten)]
    pub result: SimulationResult,
    pub preset: &'static str,
}

struct PresetSeed {
    name: &'static str,
    description: &'static str,
    founder_name: &'static str,
    age: u32,
    income: f64,
    savings: f64,
    debt: f64,
    education: Education,
    financial_literacy: f64,
}

const SEEDS: [PresetSeed; 5] = [
    PresetSeed {
        name: "first_gen_wealth_builder",
        description: "First-generation wealth builder starting from scratch",
        founder_name: "First Gen",
        age: 25,
        income: 45_000.0,
        savings: 1_000.0,
        debt: 35_000.0,
        education: Education::Bachelors,
        financial_literacy: 0.3,
    },
    PresetSeed {
        name: "breaking_debt_cycle",
        description: "Breaking the cycle of generational debt",
        founder_name: "Cycle Breaker",
        age: 28,
        income: 40_000.0,
        savings: 500.0,
        debt: 45_000.0,
        education: Education::SomeCollege,
        financial_literacy: 0.5,
    },
    PresetSeed {
        name: "high_earner_lifestyle_inflation",
        description: "High earner who struggles with lifestyle inflation",
        founder_name: "High Earner",
        age: 32,
        income: 120_000.0,
        savings: 8_000.0,
        debt: 80_000.0,
        education: Education::Masters,
        financial_literacy: 0.35,
    },
    PresetSeed {
        name: "steady_saver",
        description: "Moderate income with excellent saving habits",
        founder_name: "Steady Saver",
        age: 30,
        income: 55_000.0,
        savings: 25_000.0,
        debt: 10_000.0,
        education: Education::Bachelors,
        financial_literacy: 0.7,
    },
    PresetSeed {
        name: "late_starter",
        description: "Starting wealth building later in life",
        founder_name: "Late Starter",
        age: 45,
        income: 70_000.0,
        savings: 15_000.0,
        debt: 20_000.0,
        education: Education::Bachelors,
        financial_literacy: 0.5,
    },
];

impl PresetSeed {
    fn to_preset(&self) -> Preset {
        Preset {
            name: self.name,
            description: self.description,
            founder: FounderProfile {
                name: self.founder_name.to_string(),
                age: self.age,
                annual_income: self.income,
                current_savings: self.savings,
                current_debt: self.debt,
                education: self.education,
                financial_literacy: self.financial_literacy,
            },
        }
    }
}

pub fn list_presets() -> Vec<PresetSummary> {
    SEEDS
        .iter()
        .map(|seed| PresetSummary {
            name: seed.name,
            description: seed.description,
        })
        .collect()
}

pub fn find_preset(name: &str) -> Result<Preset> {
    SEEDS
        .iter()
        .find(|seed| seed.name == name)
        .map(PresetSeed::to_preset)
        .ok_or_else(|| Error::UnknownPreset(name.to_string()))
}

pub fn run_preset(name: &str, num_generations: Option<f64>) -> Result<PresetSimulation> {
    let preset = find_preset(name)?;
    let delta = ScenarioDelta {
        monthly_habit_change: PRESET_HABIT_CHANGE,
        num_generations: clamp_generations(num_generations, DEFAULT_GENERATIONS),
    };
    Ok(PresetSimulation {
        result: simulate(&preset.founder, &delta),
        preset: preset.name,
    })
}
