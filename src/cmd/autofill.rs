use crate::reports;
use clap::Args;
use payforge::error::PfResult;
use payforge::input::referral_counts_from_multiplier;

#[derive(Args, Debug, Clone)]
pub struct AutofillArgs {
    #[arg(short, long)]
    pub multiplier: f64,

    /// Print as the comma list accepted by `calculate --referrals`
    #[arg(long, default_value_t = false)]
    pub plain: bool,
}

pub fn run(args: &AutofillArgs) -> PfResult<()> {
    let counts = referral_counts_from_multiplier(args.multiplier);
    if args.plain {
        let list: Vec<String> = counts.iter().map(|c| c.to_string()).collect();
        println!("{}", list.join(","));
    } else {
        reports::print_autofill(args.multiplier, &counts);
    }
    Ok(())
}
