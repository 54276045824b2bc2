use serde::Serialize;

pub const DEFAULT_MONTHLY_AMOUNT: f64 = 50.0;
pub const DEFAULT_YEARS: u32 = 30;
pub const DEFAULT_ANNUAL_RETURN: f64 = 0.07;
const YEARS_BETWEEN_GENERATIONS: i32 = 30;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationalProjection {
    pub generation1: f64,
    pub generation2: f64,
    pub generation3: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HabitImpact {
    pub monthly_amount: f64,
    pub years: u32,
    pub annual_return: f64,
    pub future_value: f64,
    pub total_contributed: f64,
    pub interest_earned: f64,
    pub generational_projection: GenerationalProjection,
    pub insight: String,
}

/// What a recurring monthly amount grows into, compounded monthly, and how far
/// it could carry if each following generation leaves it invested for 30 years.
pub fn habit_impact(monthly_amount: f64, years: u32, annual_return: f64) -> HabitImpact {
    let months = years as f64 * 12.0;
    let monthly_rate = annual_return / 12.0;
    let future_value = if monthly_rate == 0.0 {
        monthly_amount * months
    } else {
        monthly_amount * (((1.0 + monthly_rate).powf(months) - 1.0) / monthly_rate)
    };
    let total_contributed = monthly_amount * months;
    let interest_earned = future_value - total_contributed;

    let per_generation = (1.0 + annual_return).powi(YEARS_BETWEEN_GENERATIONS);
    let gen2 = future_value * per_generation;
    let gen3 = gen2 * per_generation;

    HabitImpact {
        monthly_amount,
        years,
        annual_return,
        future_value: round_cents(future_value),
        total_contributed: round_cents(total_contributed),
        interest_earned: round_cents(interest_earned),
        generational_projection: GenerationalProjection {
            generation1: round_cents(future_value),
            generation2: round_cents(gen2),
            generation3: round_cents(gen3),
        },
        insight: format!(
            "${monthly_amount}/month becomes ${} in {years} years, \
             and could grow to ${} by your grandchildren's generation!",
            group_thousands(future_value),
            group_thousands(gen3),
        ),
    }
}

fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Whole units with comma thousands separators, e.g. `61006.4` -> `61,006`.
fn group_thousands(value: f64) -> String {
    let digits = format!("{:.0}", value.abs());
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    if value < 0.0 && grouped != "0" {
        grouped.insert(0, '-');
    }
    grouped
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_approx_tol(actual: f64, expected: f64, tol: f64) {
        assert!(
            (actual - expected).abs() <= tol,
            "expected {expected}, got {actual}, tolerance {tol}"
        );
    }

    #[test]
    fn zero_return_is_plain_accumulation() {
        let impact = habit_impact(100.0, 10, 0.0);
        assert_eq!(impact.future_value, 12_000.0);
        assert_eq!(impact.total_contributed, 12_000.0);
        assert_eq!(impact.interest_earned, 0.0);
        assert_eq!(impact.generational_projection.generation3, 12_000.0);
    }

    #[test]
    fn default_habit_matches_annuity_formula() {
        let impact = habit_impact(DEFAULT_MONTHLY_AMOUNT, DEFAULT_YEARS, DEFAULT_ANNUAL_RETURN);
        let r: f64 = 0.07 / 12.0;
        let expected = 50.0 * ((1.0 + r).powf(360.0) - 1.0) / r;
        assert_approx_tol(impact.future_value, expected, 0.01);
        assert_eq!(impact.total_contributed, 18_000.0);
        assert!(impact.interest_earned > 0.0);
        assert!(impact.generational_projection.generation2 > impact.future_value);
        assert!(
            impact.generational_projection.generation3 > impact.generational_projection.generation2
        );
    }

    #[test]
    fn outputs_are_rounded_to_cents() {
        let impact = habit_impact(33.33, 7, 0.05);
        for v in [
            impact.future_value,
            impact.interest_earned,
            impact.generational_projection.generation2,
        ] {
            assert_approx_tol((v * 100.0).round(), v * 100.0, 1e-6);
        }
    }

    #[test]
    fn negative_habit_projects_a_loss() {
        let impact = habit_impact(-25.0, 5, 0.04);
        assert!(impact.future_value < 0.0);
        assert!(impact.insight.contains("-25"));
    }

    #[test]
    fn thousands_are_grouped_with_commas() {
        assert_eq!(group_thousands(1_234_567.4), "1,234,567");
        assert_eq!(group_thousands(999.0), "999");
        assert_eq!(group_thousands(-1_234.6), "-1,235");
        assert_eq!(group_thousands(0.0), "0");
        assert_eq!(group_thousands(-0.2), "0");
    }

    #[test]
    fn insight_groups_projected_amounts() {
        let impact = habit_impact(100.0, 10, 0.0);
        assert!(impact.insight.contains("becomes $12,000 in 10 years"), "{}", impact.insight);
    }
}
