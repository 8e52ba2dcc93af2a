use crate::consts::LEVELS;
use crate::error::{PayForgeError, PfResult};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use strum_macros::{Display, EnumString};
use tracing::warn;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
#[serde(rename_all = "snake_case")]
pub enum InputPolicy {
    /// Negative and non-finite values become zero.
    #[default]
    Clamp,
    /// The first negative or non-finite value aborts the calculation.
    Reject,
}

/// Downline activity at one rank step below the user's own.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DownlinePosition {
    pub count: f64,
    pub sales: f64,
}

/// Everything the user types into the calculator form.
///
/// Fields stay `f64` so bad values survive deserialization and can be
/// handled by [`CalculationInput::sanitize`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CalculationInput {
    // Binary
    pub left_volume: f64,
    pub right_volume: f64,
    pub direct_sponsor_count: f64,
    pub sponsor_avg_purchase: f64,
    pub evaluation_days: f64,

    // Flat network
    pub referral_counts: [f64; LEVELS],
    pub avg_purchase_amount: f64,

    // Stair-step
    /// Whole rank step number; see [`CalculationInput::current_step`].
    pub current_step_number: f64,
    pub team_sales_amount: f64,
    /// Keyed by rank step number.
    pub downline: BTreeMap<u32, DownlinePosition>,

    // Leadership breakaway
    pub leadership_counts: [f64; LEVELS],
    pub leadership_sales: [f64; LEVELS],
}

impl Default for CalculationInput {
    fn default() -> Self {
        Self {
            left_volume: 0.0,
            right_volume: 0.0,
            direct_sponsor_count: 0.0,
            sponsor_avg_purchase: 0.0,
            evaluation_days: 30.0,
            referral_counts: [0.0; LEVELS],
            avg_purchase_amount: 0.0,
            current_step_number: 1.0,
            team_sales_amount: 0.0,
            downline: BTreeMap::new(),
            leadership_counts: [0.0; LEVELS],
            leadership_sales: [0.0; LEVELS],
        }
    }
}

/// A field that was rewritten to zero during sanitisation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClampedField {
    pub field: String,
    pub original: f64,
}

impl CalculationInput {
    /// Normalises negative and non-finite values according to `policy`.
    ///
    /// With [`InputPolicy::Clamp`] every offending field is set to zero and
    /// reported; with [`InputPolicy::Reject`] the first one is returned as a
    /// validation error.
    pub fn sanitize(&self, policy: InputPolicy) -> PfResult<(Self, Vec<ClampedField>)> {
        let mut clean = self.clone();
        let mut clamped = Vec::new();

        let mut check = |name: String, value: &mut f64| -> PfResult<()> {
            if value.is_finite() && *value >= 0.0 {
                return Ok(());
            }
            match policy {
                InputPolicy::Reject => Err(PayForgeError::Validation(format!(
                    "'{}' must be a non-negative number, got {}",
                    name, value
                ))),
                InputPolicy::Clamp => {
                    warn!("Clamping '{}' from {} to 0", name, value);
                    clamped.push(ClampedField {
                        field: name,
                        original: *value,
                    });
                    *value = 0.0;
                    Ok(())
                }
            }
        };

        check("leftVolume".into(), &mut clean.left_volume)?;
        check("rightVolume".into(), &mut clean.right_volume)?;
        check("directSponsorCount".into(), &mut clean.direct_sponsor_count)?;
        check("sponsorAvgPurchase".into(), &mut clean.sponsor_avg_purchase)?;
        check("evaluationDays".into(), &mut clean.evaluation_days)?;
        check("avgPurchaseAmount".into(), &mut clean.avg_purchase_amount)?;
        check("teamSalesAmount".into(), &mut clean.team_sales_amount)?;

        for (i, v) in clean.referral_counts.iter_mut().enumerate() {
            check(format!("referralCounts[{}]", i + 1), v)?;
        }
        for (i, v) in clean.leadership_counts.iter_mut().enumerate() {
            check(format!("leadershipCounts[{}]", i + 1), v)?;
        }
        for (i, v) in clean.leadership_sales.iter_mut().enumerate() {
            check(format!("leadershipSales[{}]", i + 1), v)?;
        }
        for (step, pos) in clean.downline.iter_mut() {
            check(format!("downline[{}].count", step), &mut pos.count)?;
            check(format!("downline[{}].sales", step), &mut pos.sales)?;
        }

        // A step number also has to be whole.
        let step = clean.current_step_number;
        if !(step.is_finite() && step >= 0.0 && step.fract() == 0.0 && step <= u32::MAX as f64) {
            match policy {
                InputPolicy::Reject => {
                    return Err(PayForgeError::Validation(format!(
                        "'currentStepNumber' must be a whole non-negative number, got {}",
                        step
                    )))
                }
                InputPolicy::Clamp => {
                    warn!("Clamping 'currentStepNumber' from {} to 0", step);
                    clamped.push(ClampedField {
                        field: "currentStepNumber".into(),
                        original: step,
                    });
                    clean.current_step_number = 0.0;
                }
            }
        }

        Ok((clean, clamped))
    }

    /// Current rank step as a table key. Only meaningful on sanitised input.
    pub fn current_step(&self) -> u32 {
        self.current_step_number as u32
    }
}

/// Generates per-level referral counts as `multiplier^level`.
///
/// Form helper only; nothing in the engine calls it.
pub fn referral_counts_from_multiplier(multiplier: f64) -> [f64; LEVELS] {
    let mut counts = [0.0; LEVELS];
    for (i, c) in counts.iter_mut().enumerate() {
        *c = multiplier.powi(i as i32 + 1);
    }
    counts
}

/// Parses exactly seven comma-separated per-level values, e.g. `5,0,0,0,0,0,0`.
pub fn parse_levels(s: &str, name: &str) -> PfResult<[f64; LEVELS]> {
    let parts: Vec<&str> = s.split(',').collect();
    if parts.len() != LEVELS {
        return Err(PayForgeError::Validation(format!(
            "--{} requires {} values, got {}",
            name,
            LEVELS,
            parts.len()
        )));
    }
    let mut arr = [0.0; LEVELS];
    for (slot, p) in arr.iter_mut().zip(parts) {
        *slot = p.trim().parse().map_err(|_| {
            PayForgeError::Validation(format!("Invalid number '{}' in --{}", p.trim(), name))
        })?;
    }
    Ok(arr)
}

/// Parses `step:count:sales` triples, e.g. `2:3:5000,4:1:10000`.
pub fn parse_downline(s: &str) -> PfResult<BTreeMap<u32, DownlinePosition>> {
    let mut out = BTreeMap::new();
    for entry in s.split(',').map(str::trim).filter(|e| !e.is_empty()) {
        let fields: Vec<&str> = entry.split(':').map(str::trim).collect();
        let bad = || PayForgeError::Validation(format!("Downline entry '{}' is not step:count:sales", entry));
        if fields.len() != 3 {
            return Err(bad());
        }
        let step: u32 = fields[0].parse().map_err(|_| bad())?;
        let count: f64 = fields[1].parse().map_err(|_| bad())?;
        let sales: f64 = fields[2].parse().map_err(|_| bad())?;
        out.insert(step, DownlinePosition { count, sales });
    }
    Ok(out)
}
