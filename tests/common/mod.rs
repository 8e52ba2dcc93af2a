#![allow(dead_code)]

use payforge::config::BinaryConfig;
use payforge::plan::{PlanSnapshot, RankStep, RankTable};

pub const EPS: f64 = 1e-9;

pub fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() <= EPS * expected.abs().max(1.0),
        "expected {}, got {}",
        expected,
        actual
    );
}

/// Two-step table matching the 21% / 14% differential example.
pub fn diamond_gold_table() -> RankTable {
    vec![
        RankStep::new(4, "Gold", 14.0, 5_000.0),
        RankStep::new(6, "Diamond", 21.0, 25_000.0),
    ]
    .into()
}

pub fn example_binary() -> BinaryConfig {
    BinaryConfig {
        cycle_amount: 2000.0,
        cycle_commission: 200.0,
        max_cycles_per_day: 10,
        sponsor_bonus_percent: 10.0,
    }
}

pub fn standard_snapshot() -> PlanSnapshot {
    PlanSnapshot::new(RankTable::standard(), example_binary())
}
