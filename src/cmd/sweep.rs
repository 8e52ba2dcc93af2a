use crate::reports::{self, SweepRow};
use clap::Args;
use payforge::config::Config;
use payforge::engine::Calculator;
use payforge::error::{PayForgeError, PfResult};
use payforge::input::{referral_counts_from_multiplier, CalculationInput};
use payforge::loader;
use rayon::prelude::*;

#[derive(Args, Debug, Clone)]
pub struct SweepArgs {
    #[command(flatten)]
    pub config: Config,

    /// Base input; only its referral counts are replaced
    #[arg(short, long)]
    pub input: Option<String>,

    #[arg(long, default_value_t = 1.0)]
    pub from: f64,
    #[arg(long, default_value_t = 5.0)]
    pub to: f64,
    #[arg(long, default_value_t = 1.0)]
    pub step: f64,

    /// Overrides the base input's average purchase amount
    #[arg(long)]
    pub avg_purchase: Option<f64>,
}

/// Upper bound on rows a single sweep may produce.
pub const MAX_SWEEP_ROWS: usize = 10_000;

pub fn multipliers(from: f64, to: f64, step: f64) -> PfResult<Vec<f64>> {
    if !(step.is_finite() && step > 0.0) || !from.is_finite() || !to.is_finite() || to < from {
        return Err(PayForgeError::Validation(format!(
            "Sweep range {}..={} step {} is empty or invalid",
            from, to, step
        )));
    }
    let count = ((to - from) / step + 1e-9).floor() + 1.0;
    if !count.is_finite() || count > MAX_SWEEP_ROWS as f64 {
        return Err(PayForgeError::Validation(format!(
            "Sweep range {}..={} step {} would produce more than {} rows",
            from, to, step, MAX_SWEEP_ROWS
        )));
    }
    let count = count as usize;
    Ok((0..count).map(|i| from + step * i as f64).collect())
}

pub fn run(args: &SweepArgs, calculator: &Calculator) -> PfResult<()> {
    let mut base = match &args.input {
        Some(path) => loader::load_inputs(path)?
            .into_iter()
            .next()
            .unwrap_or_default(),
        None => CalculationInput::default(),
    };
    if let Some(avg) = args.avg_purchase {
        base.avg_purchase_amount = avg;
    }

    let rows: Vec<SweepRow> = multipliers(args.from, args.to, args.step)?
        .par_iter()
        .map(|&m| {
            let mut input = base.clone();
            input.referral_counts = referral_counts_from_multiplier(m);
            calculator.calculate(&input).map(|res| SweepRow {
                multiplier: m,
                referrals: input.referral_counts.iter().sum(),
                network_total: res.network.total,
                grand_total: res.grand_total,
            })
        })
        .collect::<PfResult<_>>()?;

    reports::print_sweep(&rows, args.config.params.currency_decimals);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inclusive_range() {
        assert_eq!(multipliers(1.0, 3.0, 1.0).unwrap(), vec![1.0, 2.0, 3.0]);
        assert_eq!(multipliers(2.0, 2.0, 0.5).unwrap(), vec![2.0]);
    }

    #[test]
    fn test_invalid_range() {
        assert!(multipliers(3.0, 1.0, 1.0).is_err());
        assert!(multipliers(1.0, 3.0, 0.0).is_err());
        assert!(multipliers(1.0, f64::NAN, 1.0).is_err());
    }

    #[test]
    fn test_tiny_step_is_refused() {
        let err = multipliers(1.0, 5.0, 1e-300).unwrap_err();
        assert!(err.to_string().contains("more than"), "{}", err);
        assert!(multipliers(1.0, 1_000.0, 1e-9).is_err());
    }

    #[test]
    fn test_row_cap_boundary() {
        let last = (MAX_SWEEP_ROWS - 1) as f64;
        assert_eq!(multipliers(0.0, last, 1.0).unwrap().len(), MAX_SWEEP_ROWS);
        assert!(multipliers(0.0, last + 1.0, 1.0).is_err());
    }

    #[test]
    fn test_huge_range_is_refused() {
        assert!(multipliers(-f64::MAX, f64::MAX, 1.0).is_err());
    }
}
