use crate::config::BinaryConfig;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use strum_macros::Display;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RankStep {
    pub step_number: u32,
    pub step_name: String,
    /// Percent, 0..=100
    pub commission_percentage: f64,
    #[serde(default)]
    pub sales_quota: f64,
}

impl RankStep {
    pub fn new(step_number: u32, step_name: &str, commission_percentage: f64, sales_quota: f64) -> Self {
        Self {
            step_number,
            step_name: step_name.to_string(),
            commission_percentage,
            sales_quota,
        }
    }
}

/// Active rank steps, always ascending by step number.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "Vec<RankStep>", into = "Vec<RankStep>")]
pub struct RankTable {
    steps: Vec<RankStep>,
}

impl From<Vec<RankStep>> for RankTable {
    fn from(mut steps: Vec<RankStep>) -> Self {
        // Stable sort keeps duplicates in source order so validate() can name them.
        steps.sort_by_key(|s| s.step_number);
        Self { steps }
    }
}

impl From<RankTable> for Vec<RankStep> {
    fn from(table: RankTable) -> Self {
        table.steps
    }
}

impl RankTable {
    /// Seven-step plan used when no rank file is supplied.
    pub fn standard() -> Self {
        vec![
            RankStep::new(1, "Associate", 5.0, 0.0),
            RankStep::new(2, "Bronze", 8.0, 1_000.0),
            RankStep::new(3, "Silver", 11.0, 2_500.0),
            RankStep::new(4, "Gold", 14.0, 5_000.0),
            RankStep::new(5, "Platinum", 17.0, 10_000.0),
            RankStep::new(6, "Diamond", 21.0, 25_000.0),
            RankStep::new(7, "Crown", 25.0, 50_000.0),
        ]
        .into()
    }

    pub fn steps(&self) -> &[RankStep] {
        &self.steps
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn find(&self, step_number: u32) -> Option<&RankStep> {
        self.steps.iter().find(|s| s.step_number == step_number)
    }

    /// One row per step number, ascending. A repeated step number resolves
    /// to its first row, the same one [`RankTable::find`] returns.
    pub fn distinct(&self) -> impl DoubleEndedIterator<Item = &RankStep> {
        self.steps
            .iter()
            .enumerate()
            .filter(|(i, s)| *i == 0 || self.steps[i - 1].step_number != s.step_number)
            .map(|(_, s)| s)
    }

    /// Steps strictly below `step_number`, ascending.
    pub fn below(&self, step_number: u32) -> impl Iterator<Item = &RankStep> {
        self.distinct().filter(move |s| s.step_number < step_number)
    }

    /// First step strictly above `step_number`.
    pub fn next_after(&self, step_number: u32) -> Option<&RankStep> {
        self.distinct().find(|s| s.step_number > step_number)
    }

    /// Highest step whose sales quota is covered by `sales`.
    pub fn qualified_for(&self, sales: f64) -> Option<&RankStep> {
        self.distinct().rev().find(|s| s.sales_quota <= sales)
    }
}

/// Read-only configuration for one calculation session.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PlanSnapshot {
    pub ranks: RankTable,
    pub binary: BinaryConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Serialize, Deserialize)]
pub enum Severity {
    Error,
    Warning,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanIssue {
    pub severity: Severity,
    pub message: String,
}

impl PlanIssue {
    fn error(message: String) -> Self {
        Self {
            severity: Severity::Error,
            message,
        }
    }

    fn warning(message: String) -> Self {
        Self {
            severity: Severity::Warning,
            message,
        }
    }
}

impl PlanSnapshot {
    pub fn new(ranks: RankTable, binary: BinaryConfig) -> Self {
        Self { ranks, binary }
    }

    /// Data-quality audit of the snapshot. Empty means clean.
    pub fn validate(&self) -> Vec<PlanIssue> {
        let mut issues = Vec::new();

        if self.ranks.is_empty() {
            issues.push(PlanIssue::warning(
                "Rank table is empty; stair-step earnings will always be 0".to_string(),
            ));
        }

        let mut seen = HashSet::new();
        for step in self.ranks.steps() {
            if !seen.insert(step.step_number) {
                issues.push(PlanIssue::error(format!(
                    "Duplicate step number {} ('{}')",
                    step.step_number, step.step_name
                )));
            }
            if !(0.0..=100.0).contains(&step.commission_percentage) {
                issues.push(PlanIssue::error(format!(
                    "Step {} commission {}% is outside 0-100",
                    step.step_number, step.commission_percentage
                )));
            }
            if step.sales_quota < 0.0 || step.sales_quota.is_nan() {
                issues.push(PlanIssue::error(format!(
                    "Step {} sales quota {} is negative",
                    step.step_number, step.sales_quota
                )));
            }
        }

        for pair in self.ranks.steps().windows(2) {
            if pair[1].commission_percentage < pair[0].commission_percentage {
                issues.push(PlanIssue::warning(format!(
                    "Step {} pays less than step {} ({}% < {}%); differentials will go negative",
                    pair[1].step_number,
                    pair[0].step_number,
                    pair[1].commission_percentage,
                    pair[0].commission_percentage
                )));
            }
        }

        let b = &self.binary;
        if !(b.cycle_amount.is_finite() && b.cycle_amount > 0.0) {
            issues.push(PlanIssue::error(format!(
                "Binary cycle amount must be positive, got {}",
                b.cycle_amount
            )));
        }
        if b.cycle_commission < 0.0 || b.cycle_commission.is_nan() {
            issues.push(PlanIssue::error(format!(
                "Binary cycle commission must not be negative, got {}",
                b.cycle_commission
            )));
        }
        if !(0.0..=100.0).contains(&b.sponsor_bonus_percent) {
            issues.push(PlanIssue::error(format!(
                "Sponsor bonus {}% is outside 0-100",
                b.sponsor_bonus_percent
            )));
        }

        issues
    }

    pub fn has_errors(&self) -> bool {
        self.validate()
            .iter()
            .any(|i| i.severity == Severity::Error)
    }
}
