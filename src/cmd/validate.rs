use crate::reports;
use clap::Args;
use payforge::config::Config;
use payforge::engine::Calculator;
use payforge::plan::Severity;

#[derive(Args, Debug, Clone)]
pub struct ValidateArgs {
    #[command(flatten)]
    pub config: Config,
}

/// Prints the plan audit. Returns true when no issue is an error.
pub fn run(calculator: &Calculator) -> bool {
    let snapshot = &calculator.snapshot;
    let issues = snapshot.validate();

    reports::print_rank_table(&snapshot.ranks, &snapshot.binary);
    reports::print_issues(&issues);

    !issues.iter().any(|i| i.severity == Severity::Error)
}
