use super::types::{LeadershipResult, LevelEarning};
use crate::consts::LEADERSHIP_OVERRIDE_PERCENT;
use crate::input::CalculationInput;

pub fn calculate(input: &CalculationInput) -> LeadershipResult {
    let levels: Vec<LevelEarning> = input
        .leadership_counts
        .iter()
        .zip(input.leadership_sales.iter())
        .enumerate()
        .map(|(i, (&count, &sales))| {
            // A level pays only with at least one leader and some volume.
            let earnings = if count > 0.0 && sales > 0.0 {
                sales * (LEADERSHIP_OVERRIDE_PERCENT / 100.0)
            } else {
                0.0
            };
            LevelEarning {
                level: i + 1,
                count,
                rate_percent: LEADERSHIP_OVERRIDE_PERCENT,
                earnings,
            }
        })
        .collect();

    let total = levels.iter().map(|l| l.earnings).sum();
    LeadershipResult { levels, total }
}
