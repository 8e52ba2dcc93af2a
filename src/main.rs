use clap::{ArgMatches, CommandFactory, FromArgMatches, Parser, Subcommand};
use payforge::config::Config;
use payforge::engine::Calculator;
use payforge::error::PfResult;
use payforge::loader;
use std::process;
use tracing::{error, info, warn, Level};

mod cmd;
mod reports;

#[derive(Parser, Debug)]
#[command(author, version, about = "Multi-tier commission calculator", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Rank table (.csv or .json); the standard plan is used when omitted
    #[arg(global = true, short, long)]
    ranks: Option<String>,

    /// Binary settings JSON (object or key/value rows)
    #[arg(global = true, short, long)]
    binary: Option<String>,

    #[arg(global = true, long, default_value_t = false)]
    debug: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    Calculate(cmd::calculate::CalculateArgs),
    Batch(cmd::batch::BatchArgs),
    Sweep(cmd::sweep::SweepArgs),
    Autofill(cmd::autofill::AutofillArgs),
    Validate(cmd::validate::ValidateArgs),
}

/// Loads the snapshot once, then lays explicit CLI flags over a loaded
/// binary settings file.
fn build_calculator(cli: &Cli, config: &Config, sub_matches: &ArgMatches) -> PfResult<Calculator> {
    let mut snapshot = loader::load_snapshot(cli.ranks.as_deref(), cli.binary.as_deref())?;

    if cli.binary.is_some() {
        snapshot.binary.merge_from_cli(&config.binary, sub_matches);
    } else {
        snapshot.binary = config.binary;
    }

    for issue in snapshot.validate() {
        warn!("Plan: {}", issue.message);
    }

    Ok(Calculator::new(snapshot, config.params.clone()))
}

fn main() {
    let matches = Cli::command().get_matches();
    let cli = Cli::from_arg_matches(&matches).unwrap_or_else(|e| e.exit());

    // Logs go to stderr so --json output stays parseable.
    tracing_subscriber::fmt()
        .with_max_level(if cli.debug { Level::DEBUG } else { Level::INFO })
        .with_writer(std::io::stderr)
        .init();

    info!("🚀 Initializing PayForge...");

    let (name, config) = match &cli.command {
        Commands::Calculate(args) => ("calculate", &args.config),
        Commands::Batch(args) => ("batch", &args.config),
        Commands::Sweep(args) => ("sweep", &args.config),
        Commands::Validate(args) => ("validate", &args.config),
        Commands::Autofill(args) => {
            if let Err(e) = cmd::autofill::run(args) {
                error!("{}", e);
                process::exit(1);
            }
            return;
        }
    };

    let Some(sub_matches) = matches.subcommand_matches(name) else {
        error!("Missing arguments for '{}'", name);
        process::exit(2);
    };

    let calculator = build_calculator(&cli, config, sub_matches).unwrap_or_else(|e| {
        error!("❌ FATAL ERROR LOADING PLAN:");
        error!("   {}", e);
        process::exit(1);
    });

    let outcome = match &cli.command {
        Commands::Calculate(args) => cmd::calculate::run(args, &calculator),
        Commands::Batch(args) => cmd::batch::run(args, &calculator),
        Commands::Sweep(args) => cmd::sweep::run(args, &calculator),
        Commands::Validate(_) => {
            if !cmd::validate::run(&calculator) {
                process::exit(1);
            }
            Ok(())
        }
        Commands::Autofill(_) => Ok(()),
    };

    if let Err(e) = outcome {
        error!("{}", e);
        process::exit(1);
    }
}
