use super::types::{LevelEarning, NetworkResult};
use crate::consts::NETWORK_LEVEL_RATES;
use crate::input::CalculationInput;

pub fn calculate(input: &CalculationInput) -> NetworkResult {
    let levels: Vec<LevelEarning> = input
        .referral_counts
        .iter()
        .zip(NETWORK_LEVEL_RATES.iter())
        .enumerate()
        .map(|(i, (&count, &rate))| LevelEarning {
            level: i + 1,
            count,
            rate_percent: rate,
            earnings: count * input.avg_purchase_amount * (rate / 100.0),
        })
        .collect();

    let total = levels.iter().map(|l| l.earnings).sum();
    NetworkResult { levels, total }
}
