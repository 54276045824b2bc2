use serde::{Deserialize, Deserializer};
use serde_json::Value;

use super::types::{Education, FounderProfile, ScenarioDelta};

pub const MIN_GENERATIONS: u32 = 1;
pub const MAX_GENERATIONS: u32 = 6;
pub const DEFAULT_GENERATIONS: u32 = 4;

/// Fallback values used whenever a raw field is missing or unreadable.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizeDefaults {
    pub name: String,
    pub age: u32,
    pub annual_income: f64,
    pub current_savings: f64,
    pub current_debt: f64,
    pub education: Education,
    pub financial_literacy: f64,
    pub monthly_habit_change: f64,
    pub num_generations: u32,
}

impl Default for NormalizeDefaults {
    fn default() -> Self {
        Self {
            name: "You".to_string(),
            age: 30,
            annual_income: 75_000.0,
            current_savings: 50_000.0,
            current_debt: 10_000.0,
            education: Education::SomeCollege,
            financial_literacy: 0.4,
            monthly_habit_change: 200.0,
            num_generations: DEFAULT_GENERATIONS,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawFounder {
    #[serde(deserialize_with = "lenient_text")]
    pub name: Option<String>,
    #[serde(deserialize_with = "lenient_number")]
    pub age: Option<f64>,
    #[serde(deserialize_with = "lenient_number", alias = "annualIncome")]
    pub income: Option<f64>,
    #[serde(deserialize_with = "lenient_number", alias = "currentSavings")]
    pub savings: Option<f64>,
    #[serde(deserialize_with = "lenient_number", alias = "currentDebt")]
    pub debt: Option<f64>,
    #[serde(deserialize_with = "lenient_text")]
    pub education: Option<String>,
    #[serde(deserialize_with = "lenient_number", alias = "financialLiteracy")]
    pub financial_literacy: Option<f64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawScenario {
    #[serde(deserialize_with = "lenient_number", alias = "monthlyHabitChange")]
    pub monthly_habit_change: Option<f64>,
}

/// Simulation request as it arrives from a form or JSON body.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawSimulationInput {
    #[serde(deserialize_with = "lenient_founder")]
    pub founder: RawFounder,
    #[serde(deserialize_with = "lenient_scenario")]
    pub scenario: RawScenario,
    #[serde(
        deserialize_with = "lenient_number",
        alias = "numGenerations",
        alias = "generations"
    )]
    pub num_generations: Option<f64>,
}

pub fn normalize(raw: &RawSimulationInput) -> (FounderProfile, ScenarioDelta) {
    normalize_with(raw, &NormalizeDefaults::default())
}

pub fn normalize_with(
    raw: &RawSimulationInput,
    defaults: &NormalizeDefaults,
) -> (FounderProfile, ScenarioDelta) {
    let founder = &raw.founder;

    let name = founder
        .name
        .as_deref()
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| defaults.name.clone());

    let age = founder
        .age
        .map(|v| v.max(0.0).trunc().min(u32::MAX as f64) as u32)
        .unwrap_or(defaults.age);

    let education = founder
        .education
        .as_deref()
        .and_then(Education::parse)
        .unwrap_or(defaults.education);

    let profile = FounderProfile {
        name,
        age,
        annual_income: non_negative(founder.income, defaults.annual_income),
        current_savings: non_negative(founder.savings, defaults.current_savings),
        current_debt: non_negative(founder.debt, defaults.current_debt),
        education,
        financial_literacy: founder
            .financial_literacy
            .unwrap_or(defaults.financial_literacy)
            .clamp(0.0, 1.0),
    };

    let delta = ScenarioDelta {
        monthly_habit_change: raw
            .scenario
            .monthly_habit_change
            .unwrap_or(defaults.monthly_habit_change),
        num_generations: clamp_generations(raw.num_generations, defaults.num_generations),
    };

    (profile, delta)
}

pub fn clamp_generations(requested: Option<f64>, fallback: u32) -> u32 {
    match requested {
        Some(v) => v
            .trunc()
            .clamp(MIN_GENERATIONS as f64, MAX_GENERATIONS as f64) as u32,
        None => fallback.clamp(MIN_GENERATIONS, MAX_GENERATIONS),
    }
}

fn non_negative(value: Option<f64>, fallback: f64) -> f64 {
    value.unwrap_or(fallback).max(0.0)
}

fn number_from_value(value: &Value) -> Option<f64> {
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    parsed.filter(|v| v.is_finite())
}

pub(crate) fn lenient_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(number_from_value))
}

pub(crate) fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(s)) => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}

fn lenient_founder<'de, D>(deserializer: D) -> Result<RawFounder, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value
        .and_then(|v| serde_json::from_value(v).ok())
        .unwrap_or_default())
}

fn lenient_scenario<'de, D>(deserializer: D) -> Result<RawScenario, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value
        .and_then(|v| serde_json::from_value(v).ok())
        .unwrap_or_default())
}
