use crate::reports;
use clap::Args;
use payforge::config::Config;
use payforge::engine::Calculator;
use payforge::error::{PayForgeError, PfResult};
use payforge::input::{
    parse_downline, parse_levels, referral_counts_from_multiplier, CalculationInput,
};
use payforge::loader;

#[derive(Args, Debug, Clone)]
pub struct CalculateArgs {
    #[command(flatten)]
    pub config: Config,

    /// JSON file with one calculation input; the flags below are ignored when set
    #[arg(short, long)]
    pub input: Option<String>,

    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    pub left_volume: f64,
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    pub right_volume: f64,
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    pub direct_sponsors: f64,
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    pub sponsor_avg_purchase: f64,
    #[arg(long, default_value_t = 30.0, allow_negative_numbers = true)]
    pub days: f64,

    /// Seven comma-separated referral counts, level 1 first
    #[arg(long, default_value = "0,0,0,0,0,0,0", allow_hyphen_values = true)]
    pub referrals: String,
    /// Fill referral counts with multiplier^level instead of --referrals
    #[arg(long)]
    pub multiplier: Option<f64>,
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    pub avg_purchase: f64,

    #[arg(long, default_value_t = 1.0, allow_negative_numbers = true)]
    pub step: f64,
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    pub team_sales: f64,
    /// step:count:sales entries, e.g. 2:3:5000,4:1:10000
    #[arg(long, default_value = "", allow_hyphen_values = true)]
    pub downline: String,

    #[arg(long, default_value = "0,0,0,0,0,0,0", allow_hyphen_values = true)]
    pub leaders: String,
    #[arg(long, default_value = "0,0,0,0,0,0,0", allow_hyphen_values = true)]
    pub leader_sales: String,

    /// Print the raw result as JSON
    #[arg(long, default_value_t = false)]
    pub json: bool,
}

impl CalculateArgs {
    pub fn to_input(&self) -> PfResult<CalculationInput> {
        if let Some(path) = &self.input {
            let mut inputs = loader::load_inputs(path)?;
            if inputs.len() != 1 {
                return Err(PayForgeError::Validation(format!(
                    "'{}' holds {} inputs; use the batch command",
                    path,
                    inputs.len()
                )));
            }
            return Ok(inputs.remove(0));
        }

        let referral_counts = match self.multiplier {
            Some(m) => referral_counts_from_multiplier(m),
            None => parse_levels(&self.referrals, "referrals")?,
        };

        Ok(CalculationInput {
            left_volume: self.left_volume,
            right_volume: self.right_volume,
            direct_sponsor_count: self.direct_sponsors,
            sponsor_avg_purchase: self.sponsor_avg_purchase,
            evaluation_days: self.days,
            referral_counts,
            avg_purchase_amount: self.avg_purchase,
            current_step_number: self.step,
            team_sales_amount: self.team_sales,
            downline: parse_downline(&self.downline)?,
            leadership_counts: parse_levels(&self.leaders, "leaders")?,
            leadership_sales: parse_levels(&self.leader_sales, "leader-sales")?,
        })
    }
}

pub fn run(args: &CalculateArgs, calculator: &Calculator) -> PfResult<()> {
    let input = args.to_input()?;
    let result = calculator.calculate(&input)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        reports::print_result(&result, args.config.params.currency_decimals);
    }
    Ok(())
}
