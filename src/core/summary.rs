use super::types::{
    ComparisonSummary, FamilyMember, GenerationStats, SummaryDifference, TreeStats,
};

pub fn tree_stats(root: &FamilyMember) -> TreeStats {
    let mut totals: Vec<(f64, usize)> = Vec::new();
    let mut total_net_worth = 0.0;
    let mut total_members = 0;

    for member in root.iter() {
        let g = member.generation as usize;
        if totals.len() <= g {
            totals.resize(g + 1, (0.0, 0));
        }
        totals[g].0 += member.net_worth;
        totals[g].1 += 1;
        total_net_worth += member.net_worth;
        total_members += 1;
    }

    let by_generation = totals
        .into_iter()
        .map(|(sum, count)| GenerationStats {
            avg_net_worth: if count == 0 { 0.0 } else { sum / count as f64 },
            count,
        })
        .collect();

    TreeStats {
        total_net_worth,
        total_members,
        by_generation,
    }
}

pub fn summarize(baseline: &FamilyMember, scenario: &FamilyMember) -> ComparisonSummary {
    let baseline = tree_stats(baseline);
    let scenario = tree_stats(scenario);
    let difference = scenario.total_net_worth - baseline.total_net_worth;

    ComparisonSummary {
        difference: SummaryDifference {
            total_net_worth: difference,
            percent_change: difference / baseline.total_net_worth.max(1.0) * 100.0,
        },
        baseline,
        scenario,
    }
}
