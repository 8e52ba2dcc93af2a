pub mod binary;
pub mod leadership;
pub mod network;
pub mod stairstep;
pub mod types;

pub use self::types::{CalculationResult, Scheme, SchemeFailure};
use crate::config::CalcParams;
use crate::error::PfResult;
use crate::input::CalculationInput;
use crate::plan::PlanSnapshot;
use rayon::prelude::*;
use tracing::{debug, warn};

/// Runs all four engines against an already-sanitised input.
///
/// Pure: the same input and snapshot always give the same result. A failing
/// scheme is zeroed and listed in `failures`; the others still run.
pub fn evaluate(input: &CalculationInput, snapshot: &PlanSnapshot) -> CalculationResult {
    let mut failures = Vec::new();
    let mut warnings = Vec::new();

    let binary = binary::calculate(input, &snapshot.binary).unwrap_or_else(|e| {
        warn!("binary scheme skipped: {}", e);
        failures.push(SchemeFailure {
            scheme: Scheme::Binary,
            message: e.to_string(),
        });
        Default::default()
    });

    let network = network::calculate(input);
    let stair_step = match stairstep::check_rates(&snapshot.ranks) {
        Ok(()) => stairstep::calculate(input, &snapshot.ranks),
        Err(e) => {
            warn!("stair-step scheme skipped: {}", e);
            failures.push(SchemeFailure {
                scheme: Scheme::StairStep,
                message: e.to_string(),
            });
            Default::default()
        }
    };
    let leadership = leadership::calculate(input);

    let stair_failed = failures.iter().any(|f| f.scheme == Scheme::StairStep);
    if !stair_failed && stair_step.current_step_name.is_none() && input.team_sales_amount > 0.0 {
        warnings.push(format!(
            "Rank step {} is not configured; stair-step earnings are 0",
            input.current_step_number
        ));
    }
    for d in stair_step
        .differentials
        .iter()
        .filter(|d| d.differential_percent < 0.0)
    {
        warnings.push(format!(
            "Negative differential {}% against step {} ('{}'); check the rank table",
            d.differential_percent, d.step_number, d.step_name
        ));
    }

    let grand_total = binary.total
        + network.total
        + stair_step.personal_earnings
        + stair_step.downline_total
        + leadership.total;

    CalculationResult {
        binary,
        network,
        stair_step,
        leadership,
        grand_total,
        clamped: Vec::new(),
        warnings,
        failures,
    }
}

/// A loaded plan snapshot plus the boundary policy for user input.
#[derive(Debug, Clone)]
pub struct Calculator {
    pub snapshot: PlanSnapshot,
    pub params: CalcParams,
}

impl Calculator {
    pub fn new(snapshot: PlanSnapshot, params: CalcParams) -> Self {
        Self { snapshot, params }
    }

    /// Sanitises `input` and evaluates it.
    ///
    /// Errors only under [`crate::input::InputPolicy::Reject`] when a field is negative or
    /// not a number.
    pub fn calculate(&self, input: &CalculationInput) -> PfResult<CalculationResult> {
        let (clean, clamped) = input.sanitize(self.params.policy)?;
        let mut result = evaluate(&clean, &self.snapshot);

        for c in &clamped {
            result
                .warnings
                .push(format!("'{}' was {} and counted as 0", c.field, c.original));
        }
        result.clamped = clamped;

        debug!(
            "grand total {} (binary {}, network {}, stair-step {}, leadership {})",
            result.grand_total,
            result.binary.total,
            result.network.total,
            result.stair_step.total(),
            result.leadership.total
        );
        Ok(result)
    }

    /// Evaluates independent inputs in parallel. Output order follows input order.
    pub fn calculate_batch(&self, inputs: &[CalculationInput]) -> Vec<PfResult<CalculationResult>> {
        inputs.par_iter().map(|i| self.calculate(i)).collect()
    }
}
