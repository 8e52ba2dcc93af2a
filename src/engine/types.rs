use crate::input::ClampedField;
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString};

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter, Serialize, Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum Scheme {
    Binary,
    Network,
    StairStep,
    Leadership,
}

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BinaryResult {
    pub weaker_leg: f64,
    pub potential_cycles: u64,
    pub max_allowed_cycles: u64,
    pub actual_cycles: u64,
    pub cycle_earnings: f64,
    pub sponsor_bonus_earnings: f64,
    // Leg volume not consumed by paid cycles
    pub left_carry: f64,
    pub right_carry: f64,
    pub total: f64,
}

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LevelEarning {
    pub level: usize,
    pub count: f64,
    pub rate_percent: f64,
    pub earnings: f64,
}

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkResult {
    pub levels: Vec<LevelEarning>,
    pub total: f64,
}

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DifferentialEarning {
    pub step_number: u32,
    pub step_name: String,
    pub downline_count: f64,
    pub downline_sales: f64,
    pub differential_percent: f64,
    pub earnings: f64,
}

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RankProgress {
    /// Highest step whose quota the team sales cover.
    pub qualified_step: Option<u32>,
    pub next_step: Option<u32>,
    pub next_step_quota: Option<f64>,
    pub remaining_to_next: Option<f64>,
}

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StairStepResult {
    /// None when the current step number is not in the rank table.
    pub current_step_name: Option<String>,
    pub current_percentage: f64,
    pub personal_earnings: f64,
    pub differentials: Vec<DifferentialEarning>,
    pub downline_total: f64,
    pub progress: RankProgress,
}

impl StairStepResult {
    pub fn total(&self) -> f64 {
        self.personal_earnings + self.downline_total
    }
}

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeadershipResult {
    pub levels: Vec<LevelEarning>,
    pub total: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchemeFailure {
    pub scheme: Scheme,
    pub message: String,
}

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculationResult {
    pub binary: BinaryResult,
    pub network: NetworkResult,
    pub stair_step: StairStepResult,
    pub leadership: LeadershipResult,
    pub grand_total: f64,

    #[serde(default)]
    pub clamped: Vec<ClampedField>,
    #[serde(default)]
    pub warnings: Vec<String>,
    #[serde(default)]
    pub failures: Vec<SchemeFailure>,
}

impl CalculationResult {
    pub fn scheme_total(&self, scheme: Scheme) -> f64 {
        match scheme {
            Scheme::Binary => self.binary.total,
            Scheme::Network => self.network.total,
            Scheme::StairStep => self.stair_step.total(),
            Scheme::Leadership => self.leadership.total,
        }
    }

    pub fn failed(&self, scheme: Scheme) -> bool {
        self.failures.iter().any(|f| f.scheme == scheme)
    }
}
