use super::types::BinaryResult;
use crate::config::BinaryConfig;
use crate::error::{PayForgeError, PfResult};
use crate::input::CalculationInput;

/// Binary matching: paid cycles on the weaker leg, capped per day, plus the
/// direct sponsor bonus.
///
/// Fails when the settings could only produce a division by zero or a
/// negative or inflated payout.
pub fn calculate(input: &CalculationInput, cfg: &BinaryConfig) -> PfResult<BinaryResult> {
    if !(cfg.cycle_amount.is_finite() && cfg.cycle_amount > 0.0) {
        return Err(PayForgeError::Config(format!(
            "binary cycle amount must be positive, got {}",
            cfg.cycle_amount
        )));
    }
    if !(cfg.cycle_commission.is_finite() && cfg.cycle_commission >= 0.0) {
        return Err(PayForgeError::Config(format!(
            "binary cycle commission must not be negative, got {}",
            cfg.cycle_commission
        )));
    }
    if !(0.0..=100.0).contains(&cfg.sponsor_bonus_percent) {
        return Err(PayForgeError::Config(format!(
            "sponsor bonus must be within 0-100%, got {}",
            cfg.sponsor_bonus_percent
        )));
    }

    let weaker_leg = input.left_volume.min(input.right_volume);
    let potential = (weaker_leg / cfg.cycle_amount).floor();
    let max_allowed = (f64::from(cfg.max_cycles_per_day) * input.evaluation_days).floor();
    let actual = potential.min(max_allowed);

    let consumed = actual * cfg.cycle_amount;
    let cycle_earnings = actual * cfg.cycle_commission;
    let sponsor_bonus_earnings =
        input.direct_sponsor_count * input.sponsor_avg_purchase * (cfg.sponsor_bonus_percent / 100.0);

    Ok(BinaryResult {
        weaker_leg,
        potential_cycles: potential as u64,
        max_allowed_cycles: max_allowed as u64,
        actual_cycles: actual as u64,
        cycle_earnings,
        sponsor_bonus_earnings,
        left_carry: input.left_volume - consumed,
        right_carry: input.right_volume - consumed,
        total: cycle_earnings + sponsor_bonus_earnings,
    })
}
