use crate::consts::{
    SETTING_CYCLE_AMOUNT, SETTING_CYCLE_COMMISSION, SETTING_MAX_CYCLES_PER_DAY,
    SETTING_SPONSOR_BONUS_PERCENT,
};
use crate::error::{PayForgeError, PfResult};
use crate::input::InputPolicy;
use clap::{parser::ValueSource, ArgMatches, Args};
use serde::{Deserialize, Serialize};
use tracing::debug;

#[derive(Args, Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[command(flatten)]
    pub binary: BinaryConfig,
    #[command(flatten)]
    pub params: CalcParams,
}

/// Binary-matching plan settings, fetched once per session.
#[derive(Args, Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BinaryConfig {
    /// Volume needed on the weaker leg for one cycle
    #[arg(long, default_value_t = 2000.0)]
    pub cycle_amount: f64,
    /// Flat payment per paid cycle
    #[arg(long, default_value_t = 200.0)]
    pub cycle_commission: f64,
    #[arg(long, default_value_t = 10)]
    pub max_cycles_per_day: u32,
    /// Percent of each direct sponsor's purchase paid as bonus
    #[arg(long, default_value_t = 10.0)]
    pub sponsor_bonus_percent: f64,
}

impl Default for BinaryConfig {
    fn default() -> Self {
        Self {
            cycle_amount: 2000.0,
            cycle_commission: 200.0,
            max_cycles_per_day: 10,
            sponsor_bonus_percent: 10.0,
        }
    }
}

impl BinaryConfig {
    /// Applies one row of the backend settings table.
    /// Returns false when the key is not a binary setting.
    pub fn apply_setting(&mut self, key: &str, value: f64) -> PfResult<bool> {
        match key {
            SETTING_CYCLE_AMOUNT => self.cycle_amount = value,
            SETTING_CYCLE_COMMISSION => self.cycle_commission = value,
            SETTING_MAX_CYCLES_PER_DAY => {
                if !value.is_finite() || value < 0.0 || value.fract() != 0.0 {
                    return Err(PayForgeError::Config(format!(
                        "'{}' must be a non-negative whole number, got {}",
                        key, value
                    )));
                }
                self.max_cycles_per_day = value as u32;
            }
            SETTING_SPONSOR_BONUS_PERCENT => self.sponsor_bonus_percent = value,
            _ => return Ok(false),
        }
        debug!("binary setting {} = {}", key, value);
        Ok(true)
    }

    /// Overwrites fields with values the user typed on the command line.
    /// Defaults filled in by clap do not override a loaded file.
    pub fn merge_from_cli(&mut self, cli_binary: &BinaryConfig, matches: &ArgMatches) {
        macro_rules! update_if_present {
            ($field:ident, $arg_name:expr) => {
                if matches.value_source($arg_name) == Some(ValueSource::CommandLine) {
                    self.$field = cli_binary.$field;
                }
            };
        }

        update_if_present!(cycle_amount, "cycle_amount");
        update_if_present!(cycle_commission, "cycle_commission");
        update_if_present!(max_cycles_per_day, "max_cycles_per_day");
        update_if_present!(sponsor_bonus_percent, "sponsor_bonus_percent");
    }
}

#[derive(Args, Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CalcParams {
    /// How negative or non-finite inputs are handled: clamp | reject
    #[arg(long, default_value = "clamp")]
    pub policy: InputPolicy,

    /// Decimal places used when printing money
    #[arg(long, default_value_t = 2)]
    pub currency_decimals: usize,
}

impl Default for CalcParams {
    fn default() -> Self {
        Self {
            policy: InputPolicy::Clamp,
            currency_decimals: 2,
        }
    }
}
