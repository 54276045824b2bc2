use serde::{Deserialize, Serialize};

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Education {
    HighSchool,
    SomeCollege,
    Bachelors,
    Masters,
    Doctorate,
}

impl Education {
    /// Case-insensitive lookup of the wire name; `None` for anything unrecognised.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "high_school" => Some(Education::HighSchool),
            "some_college" => Some(Education::SomeCollege),
            "bachelors" => Some(Education::Bachelors),
            "masters" => Some(Education::Masters),
            "doctorate" => Some(Education::Doctorate),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FounderProfile {
    pub name: String,
    pub age: u32,
    pub annual_income: f64,
    pub current_savings: f64,
    pub current_debt: f64,
    pub education: Education,
    pub financial_literacy: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScenarioDelta {
    pub monthly_habit_change: f64,
    pub num_generations: u32,
}

/// Aggregate net worth per generation, index 0 being the founder.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(transparent)]
pub struct WealthSequence(Vec<f64>);

impl WealthSequence {
    pub fn new(values: Vec<f64>) -> Self {
        Self(values)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, generation: usize) -> Option<f64> {
        self.0.get(generation).copied()
    }

    pub fn values(&self) -> &[f64] {
        &self.0
    }

    pub fn total(&self) -> f64 {
        self.0.iter().sum()
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FinancialHealth {
    Distressed,
    Struggling,
    Stable,
    Thriving,
}

impl FinancialHealth {
    pub const THRIVING_ABOVE: f64 = 500_000.0;
    pub const STABLE_ABOVE: f64 = 100_000.0;

    pub fn classify(net_worth: f64) -> Self {
        if net_worth > Self::THRIVING_ABOVE {
            FinancialHealth::Thriving
        } else if net_worth > Self::STABLE_ABOVE {
            FinancialHealth::Stable
        } else if net_worth > 0.0 {
            FinancialHealth::Struggling
        } else {
            FinancialHealth::Distressed
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FamilyMember {
    pub id: String,
    pub name: String,
    pub generation: u32,
    pub current_age: u32,
    pub net_worth: f64,
    pub income: f64,
    pub savings: f64,
    pub investments: f64,
    pub debt: f64,
    pub home_equity: f64,
    pub inheritance_received: f64,
    pub financial_health: FinancialHealth,
    pub owns_home: bool,
    pub life_events: Vec<LifeEvent>,
    pub children: Vec<FamilyMember>,
}

/// A dated milestone on a member's timeline. The projection does not emit any
/// yet, so every member carries an empty list.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LifeEvent {
    pub year: i32,
    pub age: u32,
    pub event_type: String,
    pub description: String,
    pub financial_impact: f64,
}

impl FamilyMember {
    /// Pre-order walk over this member and every descendant.
    pub fn iter(&self) -> impl Iterator<Item = &FamilyMember> {
        let mut stack = vec![self];
        std::iter::from_fn(move || {
            let member = stack.pop()?;
            stack.extend(member.children.iter().rev());
            Some(member)
        })
    }

    pub fn depth(&self) -> u32 {
        self.iter().map(|m| m.generation).max().unwrap_or(0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationStats {
    pub avg_net_worth: f64,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TreeStats {
    pub total_net_worth: f64,
    pub total_members: usize,
    pub by_generation: Vec<GenerationStats>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryDifference {
    pub total_net_worth: f64,
    pub percent_change: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonSummary {
    pub baseline: TreeStats,
    pub scenario: TreeStats,
    pub difference: SummaryDifference,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrajectoryResult {
    pub tree: FamilyMember,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimulationResult {
    pub baseline: TrajectoryResult,
    pub scenario: TrajectoryResult,
    pub summary: ComparisonSummary,
}
