use crate::reports;
use clap::Args;
use payforge::config::Config;
use payforge::engine::Calculator;
use payforge::error::PfResult;
use payforge::loader;
use serde_json::json;
use std::time::Instant;
use tracing::info;

#[derive(Args, Debug, Clone)]
pub struct BatchArgs {
    #[command(flatten)]
    pub config: Config,

    /// JSON file holding an array of calculation inputs
    #[arg(short, long)]
    pub input: String,

    #[arg(long, default_value_t = false)]
    pub json: bool,
}

pub fn run(args: &BatchArgs, calculator: &Calculator) -> PfResult<()> {
    let inputs = loader::load_inputs(&args.input)?;
    info!("Evaluating {} inputs", inputs.len());

    let start = Instant::now();
    let results = calculator.calculate_batch(&inputs);
    info!("Batch finished in {:.2?}", start.elapsed());

    if args.json {
        let out: Vec<serde_json::Value> = results
            .iter()
            .map(|r| match r {
                Ok(res) => serde_json::to_value(res).unwrap_or_else(|e| json!({ "error": e.to_string() })),
                Err(e) => json!({ "error": e.to_string() }),
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else {
        reports::print_batch_summary(&results, args.config.params.currency_decimals);
    }
    Ok(())
}
