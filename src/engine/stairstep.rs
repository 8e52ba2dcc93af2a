use super::types::{DifferentialEarning, RankProgress, StairStepResult};
use crate::error::{PayForgeError, PfResult};
use crate::input::CalculationInput;
use crate::plan::RankTable;
use tracing::debug;

/// Personal stair-step commission plus the differential earned on every
/// junior step the user has active downline in.
///
/// An unknown current step contributes nothing. Negative differentials are
/// kept as computed; the caller decides whether to warn.
pub fn calculate(input: &CalculationInput, ranks: &RankTable) -> StairStepResult {
    let step = input.current_step();
    let progress = rank_progress(ranks, step, input.team_sales_amount);

    let current = match ranks.find(step) {
        Some(step) => step,
        None => {
            debug!(
                "step {} not in rank table, stair-step contributes 0",
                step
            );
            return StairStepResult {
                progress,
                ..Default::default()
            };
        }
    };

    let personal_earnings = input.team_sales_amount * (current.commission_percentage / 100.0);

    let mut differentials = Vec::new();
    let mut downline_total = 0.0;

    for step in ranks.below(current.step_number) {
        let pos = match input.downline.get(&step.step_number) {
            Some(p) if p.count > 0.0 && p.sales > 0.0 => p,
            _ => continue,
        };

        let differential_percent = current.commission_percentage - step.commission_percentage;
        let earnings = pos.sales * (differential_percent / 100.0);
        downline_total += earnings;

        differentials.push(DifferentialEarning {
            step_number: step.step_number,
            step_name: step.step_name.clone(),
            downline_count: pos.count,
            downline_sales: pos.sales,
            differential_percent,
            earnings,
        });
    }

    StairStepResult {
        current_step_name: Some(current.step_name.clone()),
        current_percentage: current.commission_percentage,
        personal_earnings,
        differentials,
        downline_total,
        progress,
    }
}

/// Refuses tables whose step rates would pay out below 0% or above 100%.
pub fn check_rates(ranks: &RankTable) -> PfResult<()> {
    match ranks
        .distinct()
        .find(|s| !(0.0..=100.0).contains(&s.commission_percentage))
    {
        Some(s) => Err(PayForgeError::Config(format!(
            "step {} ('{}') commission {}% is outside 0-100",
            s.step_number, s.step_name, s.commission_percentage
        ))),
        None => Ok(()),
    }
}

pub fn rank_progress(ranks: &RankTable, current_step: u32, team_sales: f64) -> RankProgress {
    let next = ranks.next_after(current_step);
    RankProgress {
        qualified_step: ranks.qualified_for(team_sales).map(|s| s.step_number),
        next_step: next.map(|s| s.step_number),
        next_step_quota: next.map(|s| s.sales_quota),
        remaining_to_next: next.map(|s| (s.sales_quota - team_sales).max(0.0)),
    }
}
