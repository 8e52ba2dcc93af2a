use clap::{CommandFactory, FromArgMatches, Parser};
use payforge::config::{BinaryConfig, Config};
use payforge::input::InputPolicy;

#[derive(Parser, Debug)]
struct TestCli {
    #[command(flatten)]
    config: Config,
}

fn parse(args: &[&str]) -> (TestCli, clap::ArgMatches) {
    let mut argv = vec!["test"];
    argv.extend_from_slice(args);
    let matches = TestCli::command().get_matches_from(argv);
    let cli = TestCli::from_arg_matches(&matches).unwrap();
    (cli, matches)
}

#[test]
fn test_clap_defaults_match_default_impl() {
    let (cli, _) = parse(&[]);
    assert_eq!(cli.config.binary, BinaryConfig::default());
    assert_eq!(cli.config.params.policy, InputPolicy::Clamp);
    assert_eq!(cli.config.params.currency_decimals, 2);
}

#[test]
fn test_policy_flag() {
    let (cli, _) = parse(&["--policy", "reject"]);
    assert_eq!(cli.config.params.policy, InputPolicy::Reject);
}

#[test]
fn test_merge_only_applies_explicit_flags() {
    let (cli, matches) = parse(&["--cycle-amount", "500"]);

    let mut from_file = BinaryConfig {
        cycle_amount: 3000.0,
        cycle_commission: 300.0,
        max_cycles_per_day: 5,
        sponsor_bonus_percent: 7.5,
    };
    from_file.merge_from_cli(&cli.config.binary, &matches);

    assert_eq!(from_file.cycle_amount, 500.0);
    // untouched: clap defaults must not clobber file values
    assert_eq!(from_file.cycle_commission, 300.0);
    assert_eq!(from_file.max_cycles_per_day, 5);
    assert_eq!(from_file.sponsor_bonus_percent, 7.5);
}

#[test]
fn test_apply_setting() {
    let mut cfg = BinaryConfig::default();
    assert!(cfg.apply_setting("binary_cycle_amount", 1500.0).unwrap());
    assert!(cfg.apply_setting("binary_max_cycles_per_day", 12.0).unwrap());
    assert!(!cfg.apply_setting("story_ttl_hours", 24.0).unwrap());
    assert_eq!(cfg.cycle_amount, 1500.0);
    assert_eq!(cfg.max_cycles_per_day, 12);
}

#[test]
fn test_apply_setting_rejects_fractional_cap() {
    let mut cfg = BinaryConfig::default();
    assert!(cfg.apply_setting("binary_max_cycles_per_day", 2.5).is_err());
    assert!(cfg.apply_setting("binary_max_cycles_per_day", -1.0).is_err());
}

#[test]
fn test_binary_config_json_partial() {
    let cfg: BinaryConfig = serde_json::from_str(r#"{ "cycleAmount": 1000 }"#).unwrap();
    assert_eq!(cfg.cycle_amount, 1000.0);
    assert_eq!(cfg.cycle_commission, BinaryConfig::default().cycle_commission);
}
