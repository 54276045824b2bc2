use super::types::{FamilyMember, FinancialHealth, FounderProfile, WealthSequence};

pub const MAX_MEMBERS_PER_GENERATION: usize = 8;
pub const CHILDREN_PER_PARENT: usize = 2;
pub const HOME_OWNERSHIP_ABOVE: f64 = 100_000.0;
pub const DEBT_PAYDOWN_PER_GENERATION: f64 = 15_000.0;
pub const DESCENDANT_REPORTED_AGE: u32 = 82;
const INCOME_GROWTH_PER_GENERATION: f64 = 0.2;

const NAME_POOL: [&str; 8] = [
    "Jordan", "Taylor", "Riley", "Quinn", "Phoenix", "Rowan", "Eden", "Blair",
];

/// Number of members in generation `generation`: doubles each step, capped at eight.
pub fn members_in_generation(generation: u32) -> usize {
    if generation >= MAX_MEMBERS_PER_GENERATION.trailing_zeros() {
        MAX_MEMBERS_PER_GENERATION
    } else {
        1 << generation
    }
}

/// Splits `aggregate` into `count` shares. Whole units of the remainder go to the
/// earliest members one at a time; the sub-unit residue stays with member 0.
pub fn split_evenly(aggregate: f64, count: usize) -> Vec<f64> {
    if count == 0 {
        return Vec::new();
    }
    let n = count as f64;
    if !aggregate.is_finite() {
        return vec![aggregate / n; count];
    }

    let base = (aggregate / n).floor();
    let remainder = aggregate - base * n;
    let whole_units = (remainder.floor().max(0.0) as usize).min(count);
    let residue = remainder - whole_units as f64;

    let mut shares: Vec<f64> = (0..count)
        .map(|i| if i < whole_units { base + 1.0 } else { base })
        .collect();
    shares[0] += residue;
    shares
}

pub fn member_name(generation: u32, index: usize, founder_name: &str) -> String {
    if generation == 0 {
        founder_name.to_string()
    } else {
        NAME_POOL[(generation as usize * 2 + index) % NAME_POOL.len()].to_string()
    }
}

/// Builds the family tree rooted at the founder from per-generation aggregate wealth.
pub fn build_tree(wealth: &WealthSequence, founder: &FounderProfile) -> FamilyMember {
    let shares: Vec<Vec<f64>> = if wealth.is_empty() {
        vec![vec![0.0]]
    } else {
        wealth
            .values()
            .iter()
            .enumerate()
            .map(|(g, &aggregate)| {
                split_evenly(aggregate.max(0.0), members_in_generation(g as u32))
            })
            .collect()
    };

    build_member(&shares, founder, 0, 0)
}

fn build_member(
    shares: &[Vec<f64>],
    founder: &FounderProfile,
    generation: u32,
    index: usize,
) -> FamilyMember {
    let g = generation as usize;
    let children = match shares.get(g + 1) {
        Some(next) => {
            let first = index * CHILDREN_PER_PARENT;
            let last = (first + CHILDREN_PER_PARENT).min(next.len());
            (first..last)
                .map(|child| build_member(shares, founder, generation + 1, child))
                .collect()
        }
        None => Vec::new(),
    };

    let net_worth = shares[g][index];
    let owns_home = net_worth > HOME_OWNERSHIP_ABOVE;

    FamilyMember {
        id: format!("g{generation}-{index}"),
        name: member_name(generation, index, &founder.name),
        generation,
        current_age: if generation == 0 {
            founder.age
        } else {
            DESCENDANT_REPORTED_AGE
        },
        net_worth,
        income: founder.annual_income * (1.0 + generation as f64 * INCOME_GROWTH_PER_GENERATION),
        savings: (net_worth * 0.2).max(0.0),
        investments: (net_worth * 0.6).max(0.0),
        debt: (founder.current_debt - generation as f64 * DEBT_PAYDOWN_PER_GENERATION).max(0.0),
        home_equity: if owns_home { net_worth * 0.3 } else { 0.0 },
        inheritance_received: if generation > 0 { net_worth * 0.15 } else { 0.0 },
        financial_health: FinancialHealth::classify(net_worth),
        owns_home,
        life_events: Vec::new(),
        children,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::Education;
    use proptest::prelude::{prop_assert, prop_assert_eq, proptest};
    use std::collections::HashSet;

    fn assert_approx(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() <= 1e-6,
            "expected {expected}, got {actual}"
        );
    }

    fn founder() -> FounderProfile {
        FounderProfile {
            name: "Casey".to_string(),
            age: 34,
            annual_income: 60_000.0,
            current_debt: 40_000.0,
            current_savings: 5_000.0,
            education: Education::Bachelors,
            financial_literacy: 0.5,
        }
    }

    fn generation_totals(root: &FamilyMember) -> Vec<(f64, usize)> {
        let mut totals = vec![(0.0, 0); root.depth() as usize + 1];
        for member in root.iter() {
            let slot = &mut totals[member.generation as usize];
            slot.0 += member.net_worth;
            slot.1 += 1;
        }
        totals
    }

    #[test]
    fn generation_sizes_double_then_cap() {
        let sizes: Vec<usize> = (0..7).map(members_in_generation).collect();
        assert_eq!(sizes, vec![1, 2, 4, 8, 8, 8, 8]);
        assert_eq!(members_in_generation(40), 8);
    }

    #[test]
    fn split_hands_whole_units_to_earliest_members() {
        assert_eq!(split_evenly(10.0, 4), vec![3.0, 3.0, 2.0, 2.0]);
        assert_eq!(split_evenly(9.0, 3), vec![3.0, 3.0, 3.0]);
        assert_eq!(split_evenly(0.0, 2), vec![0.0, 0.0]);
        let shares = split_evenly(7.5, 2);
        assert_eq!(shares, vec![4.5, 3.0]);
        assert!(split_evenly(5.0, 0).is_empty());
    }

    #[test]
    fn names_cycle_through_pool_by_position() {
        assert_eq!(member_name(0, 0, "Casey"), "Casey");
        assert_eq!(member_name(1, 0, "Casey"), "Riley");
        assert_eq!(member_name(1, 1, "Casey"), "Quinn");
        assert_eq!(member_name(3, 7, "Casey"), "Rowan");
    }

    #[test]
    fn four_generation_tree_has_expected_shape() {
        let wealth = WealthSequence::new(vec![40_000.0, 320_000.0, 1_000_000.0, 4_000_000.0]);
        let root = build_tree(&wealth, &founder());

        assert_eq!(root.generation, 0);
        assert_eq!(root.name, "Casey");
        assert_eq!(root.current_age, 34);
        assert_eq!(root.children.len(), 2);
        assert_eq!(root.depth(), 3);
        assert_eq!(root.iter().count(), 1 + 2 + 4 + 8);

        for member in root.iter() {
            for child in &member.children {
                assert_eq!(child.generation, member.generation + 1);
            }
        }

        let ids: HashSet<&str> = root.iter().map(|m| m.id.as_str()).collect();
        assert_eq!(ids.len(), 15);
    }

    #[test]
    fn capped_generations_attach_children_to_first_parents() {
        let wealth = WealthSequence::new(vec![1.0; 5]);
        let root = build_tree(&wealth, &founder());
        let gen3: Vec<&FamilyMember> = root.iter().filter(|m| m.generation == 3).collect();
        assert_eq!(gen3.len(), 8);
        let with_children = gen3.iter().filter(|m| !m.children.is_empty()).count();
        assert_eq!(with_children, 4);
        assert_eq!(root.depth(), 4);
    }

    #[test]
    fn decomposition_follows_fixed_rules() {
        let wealth = WealthSequence::new(vec![40_000.0, 400_000.0]);
        let root = build_tree(&wealth, &founder());

        assert_eq!(root.net_worth, 40_000.0);
        assert_approx(root.savings, 8_000.0);
        assert_approx(root.investments, 24_000.0);
        assert_eq!(root.debt, 40_000.0);
        assert_approx(root.home_equity, 0.0);
        assert!(!root.owns_home);
        assert_approx(root.inheritance_received, 0.0);
        assert_approx(root.income, 60_000.0);
        assert_eq!(root.financial_health, FinancialHealth::Struggling);

        let child = &root.children[0];
        assert_eq!(child.net_worth, 200_000.0);
        assert_eq!(child.debt, 25_000.0);
        assert_approx(child.home_equity, 60_000.0);
        assert!(child.owns_home);
        assert_approx(child.inheritance_received, 30_000.0);
        assert_eq!(child.current_age, 82);
        assert_approx(child.income, 72_000.0);
        assert_eq!(child.financial_health, FinancialHealth::Stable);
    }

    #[test]
    fn members_serialize_with_empty_life_events() {
        let wealth = WealthSequence::new(vec![40_000.0, 400_000.0]);
        let json = serde_json::to_value(build_tree(&wealth, &founder())).expect("serializable");
        assert_eq!(json["lifeEvents"], serde_json::json!([]));
        assert_eq!(json["children"][1]["lifeEvents"], serde_json::json!([]));
        assert!(json.get("branchColor").is_none());
    }

    #[test]
    fn empty_sequence_builds_lone_founder() {
        let root = build_tree(&WealthSequence::default(), &founder());
        assert_eq!(root.generation, 0);
        assert!(root.children.is_empty());
        assert_eq!(root.net_worth, 0.0);
        assert_eq!(root.financial_health, FinancialHealth::Distressed);
    }

    #[test]
    fn health_thresholds_are_exclusive() {
        assert_eq!(FinancialHealth::classify(500_000.01), FinancialHealth::Thriving);
        assert_eq!(FinancialHealth::classify(500_000.0), FinancialHealth::Stable);
        assert_eq!(FinancialHealth::classify(100_000.0), FinancialHealth::Struggling);
        assert_eq!(FinancialHealth::classify(0.5), FinancialHealth::Struggling);
        assert_eq!(FinancialHealth::classify(0.0), FinancialHealth::Distressed);
        assert_eq!(FinancialHealth::classify(-10.0), FinancialHealth::Distressed);
    }

    proptest! {
        #![proptest_config(proptest::test_runner::Config::with_cases(48))]

        #[test]
        fn prop_tree_matches_wealth_sequence(
            raw in proptest::collection::vec(0u64..50_000_000_000, 1..=6)
        ) {
            let values: Vec<f64> = raw.iter().map(|v| *v as f64 / 100.0).collect();
            let wealth = WealthSequence::new(values.clone());
            let root = build_tree(&wealth, &founder());

            prop_assert_eq!(root.depth() as usize, values.len() - 1);
            let totals = generation_totals(&root);
            for (g, (total, count)) in totals.iter().enumerate() {
                prop_assert_eq!(*count, members_in_generation(g as u32));
                prop_assert!((total - values[g]).abs() <= 1e-6 * values[g].max(1.0));
            }

            for member in root.iter() {
                prop_assert!(member.net_worth >= 0.0);
                prop_assert_eq!(member.financial_health, FinancialHealth::classify(member.net_worth));
                prop_assert_eq!(member.owns_home, member.net_worth > HOME_OWNERSHIP_ABOVE);
            }
        }
    }
}
