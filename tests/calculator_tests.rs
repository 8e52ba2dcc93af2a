mod common;

use common::{assert_close, diamond_gold_table, example_binary, standard_snapshot};
use payforge::config::{BinaryConfig, CalcParams};
use payforge::engine::{evaluate, Calculator, Scheme};
use payforge::input::{CalculationInput, DownlinePosition, InputPolicy};
use payforge::plan::{PlanSnapshot, RankStep, RankTable};
use strum::IntoEnumIterator;

fn full_input() -> CalculationInput {
    let mut input = CalculationInput {
        left_volume: 10_000.0,
        right_volume: 8_000.0,
        direct_sponsor_count: 2.0,
        sponsor_avg_purchase: 500.0,
        evaluation_days: 30.0,
        referral_counts: [5.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0],
        avg_purchase_amount: 1_000.0,
        current_step_number: 6.0,
        team_sales_amount: 20_000.0,
        leadership_counts: [1.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0],
        leadership_sales: [10_000.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0],
        ..Default::default()
    };
    input.downline.insert(
        4,
        DownlinePosition {
            count: 3.0,
            sales: 10_000.0,
        },
    );
    input
}

fn calculator(snapshot: PlanSnapshot, policy: InputPolicy) -> Calculator {
    Calculator::new(
        snapshot,
        CalcParams {
            policy,
            ..Default::default()
        },
    )
}

#[test]
fn test_grand_total_is_exact_sum() {
    let snapshot = PlanSnapshot::new(diamond_gold_table(), example_binary());
    let res = evaluate(&full_input(), &snapshot);

    let expected = res.binary.total
        + res.network.total
        + res.stair_step.personal_earnings
        + res.stair_step.downline_total
        + res.leadership.total;
    assert_eq!(res.grand_total, expected);

    // 900 binary + 500 network + 4200 personal + 700 differential + 200 leadership
    assert_close(res.grand_total, 6_500.0);
    assert!(res.failures.is_empty());
    assert!(res.warnings.is_empty());
}

#[test]
fn test_scheme_totals_cover_grand_total() {
    let res = evaluate(&full_input(), &standard_snapshot());
    let sum: f64 = Scheme::iter().map(|s| res.scheme_total(s)).sum();
    assert_close(sum, res.grand_total);
}

#[test]
fn test_binary_failure_does_not_block_other_schemes() {
    let snapshot = PlanSnapshot::new(
        diamond_gold_table(),
        BinaryConfig {
            cycle_amount: 0.0,
            ..example_binary()
        },
    );
    let res = evaluate(&full_input(), &snapshot);

    assert!(res.failed(Scheme::Binary));
    assert_eq!(res.failures.len(), 1);
    assert_eq!(res.binary.total, 0.0);
    assert!(res.grand_total.is_finite());
    assert_close(res.network.total, 500.0);
    assert_close(res.stair_step.total(), 4_900.0);
    assert_close(res.leadership.total, 200.0);
    assert_close(res.grand_total, 5_600.0);
}

#[test]
fn test_out_of_range_binary_payout_is_isolated() {
    let snapshot = PlanSnapshot::new(
        diamond_gold_table(),
        BinaryConfig {
            sponsor_bonus_percent: 150.0,
            ..example_binary()
        },
    );
    let res = evaluate(&full_input(), &snapshot);

    assert!(res.failed(Scheme::Binary));
    assert_eq!(res.binary.total, 0.0);
    assert_close(res.grand_total, 5_600.0);
}

#[test]
fn test_out_of_range_rank_rate_is_isolated() {
    let ranks: RankTable = vec![
        RankStep::new(4, "Gold", 14.0, 5_000.0),
        RankStep::new(6, "Diamond", 120.0, 25_000.0),
    ]
    .into();
    let res = evaluate(&full_input(), &PlanSnapshot::new(ranks, example_binary()));

    assert!(res.failed(Scheme::StairStep));
    assert_eq!(res.failures.len(), 1);
    assert!(res.failures[0].message.contains("120"), "{}", res.failures[0].message);
    assert_eq!(res.stair_step.total(), 0.0);
    assert!(res.warnings.is_empty());
    // 900 binary + 500 network + 200 leadership
    assert_close(res.grand_total, 1_600.0);
}

#[test]
fn test_negative_differential_raises_warning() {
    let table: RankTable = vec![
        RankStep::new(1, "Starter", 20.0, 0.0),
        RankStep::new(2, "Senior", 15.0, 0.0),
    ]
    .into();
    let input = CalculationInput {
        current_step_number: 2.0,
        downline: [(
            1,
            DownlinePosition {
                count: 1.0,
                sales: 1_000.0,
            },
        )]
        .into_iter()
        .collect(),
        ..Default::default()
    };
    let res = evaluate(&input, &PlanSnapshot::new(table, example_binary()));
    assert_close(res.grand_total, -50.0);
    assert_eq!(res.warnings.len(), 1);
    assert!(res.warnings[0].contains("Negative differential"));
}

#[test]
fn test_unconfigured_step_warns_when_sales_present() {
    let input = CalculationInput {
        current_step_number: 99.0,
        team_sales_amount: 1_000.0,
        ..Default::default()
    };
    let res = evaluate(&input, &standard_snapshot());
    assert_eq!(res.stair_step.personal_earnings, 0.0);
    assert!(res.warnings.iter().any(|w| w.contains("99")));
}

#[test]
fn test_clamp_policy_zeroes_negatives() {
    let calc = calculator(standard_snapshot(), InputPolicy::Clamp);
    let input = CalculationInput {
        left_volume: -10_000.0,
        right_volume: 8_000.0,
        avg_purchase_amount: f64::NAN,
        referral_counts: [5.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0],
        ..Default::default()
    };
    let res = calc.calculate(&input).unwrap();

    assert_eq!(res.binary.total, 0.0);
    assert_eq!(res.network.total, 0.0);
    assert_eq!(res.clamped.len(), 2);
    assert_eq!(res.clamped[0].field, "leftVolume");
    assert!(res.warnings.iter().any(|w| w.contains("avgPurchaseAmount")));
}

#[test]
fn test_reject_policy_names_field() {
    let calc = calculator(standard_snapshot(), InputPolicy::Reject);
    let input = CalculationInput {
        team_sales_amount: -1.0,
        ..Default::default()
    };
    let err = calc.calculate(&input).unwrap_err();
    assert!(err.to_string().contains("teamSalesAmount"), "{}", err);
}

#[test]
fn test_same_input_same_result() {
    let calc = calculator(standard_snapshot(), InputPolicy::Clamp);
    let a = calc.calculate(&full_input()).unwrap();
    let b = calc.calculate(&full_input()).unwrap();
    assert_eq!(a, b);
}

#[test]
fn test_batch_preserves_order() {
    let calc = calculator(standard_snapshot(), InputPolicy::Clamp);
    let inputs: Vec<CalculationInput> = (0..64)
        .map(|i| CalculationInput {
            referral_counts: [i as f64, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0],
            avg_purchase_amount: 100.0,
            ..Default::default()
        })
        .collect();

    let results = calc.calculate_batch(&inputs);
    assert_eq!(results.len(), inputs.len());
    for (i, res) in results.iter().enumerate() {
        let res = res.as_ref().unwrap();
        assert_close(res.network.total, i as f64 * 10.0);
        assert_eq!(*res, calc.calculate(&inputs[i]).unwrap());
    }
}

#[test]
fn test_batch_isolates_rejected_inputs() {
    let calc = calculator(standard_snapshot(), InputPolicy::Reject);
    let inputs = vec![
        full_input(),
        CalculationInput {
            left_volume: -1.0,
            ..Default::default()
        },
        full_input(),
    ];
    let results = calc.calculate_batch(&inputs);
    assert!(results[0].is_ok());
    assert!(results[1].is_err());
    assert!(results[2].is_ok());
}
