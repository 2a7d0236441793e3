use std::path::PathBuf;

use clap::Parser;
use mapcrawl_core::{AppConfig, ConfigError, Environment};

use super::*;

fn config() -> AppConfig {
    AppConfig {
        env: Environment::Test,
        log_level: "info".to_owned(),
        max_stall_passes: 6,
        pacing_min_ms: 2_500,
        pacing_max_ms: 3_800,
        settle_delay_ms: 7_000,
    }
}

fn crawl_args(argv: &[&str]) -> CrawlArgs {
    let mut full = vec!["mapcrawl-cli", "crawl", "--fixture", "feed.json"];
    full.extend_from_slice(argv);
    match Cli::try_parse_from(full).expect("expected valid cli args").command {
        Commands::Crawl(args) => args,
        Commands::Phone { .. } => panic!("expected crawl command"),
    }
}

#[test]
fn parses_crawl_with_keyword_and_location() {
    let args = crawl_args(&["--keyword", "logistics", "--country", "Saudi Arabia", "--city", "Riyadh"]);
    assert_eq!(args.fixture, PathBuf::from("feed.json"));
    assert_eq!(args.keyword.as_deref(), Some("logistics"));
    assert_eq!(args.country.as_deref(), Some("Saudi Arabia"));
    assert_eq!(args.city.as_deref(), Some("Riyadh"));
    assert_eq!(args.format, OutputFormat::Jsonl);
    assert!(args.max_stall_passes.is_none());
    assert!(!args.no_pacing);
}

#[test]
fn parses_crawl_with_raw_query_and_options() {
    let args = crawl_args(&[
        "--query",
        "freight in China",
        "--max-stall-passes",
        "8",
        "--format",
        "json",
        "--no-pacing",
    ]);
    assert_eq!(args.query.as_deref(), Some("freight in China"));
    assert_eq!(args.max_stall_passes, Some(8));
    assert_eq!(args.format, OutputFormat::Json);
    assert!(args.no_pacing);
}

#[test]
fn crawl_requires_keyword_and_country_without_query() {
    let result = Cli::try_parse_from([
        "mapcrawl-cli",
        "crawl",
        "--fixture",
        "feed.json",
        "--keyword",
        "logistics",
    ]);
    assert!(result.is_err());
}

#[test]
fn query_conflicts_with_keyword() {
    let result = Cli::try_parse_from([
        "mapcrawl-cli",
        "crawl",
        "--fixture",
        "feed.json",
        "--query",
        "q",
        "--keyword",
        "k",
    ]);
    assert!(result.is_err());
}

#[test]
fn crawl_requires_fixture() {
    let result = Cli::try_parse_from(["mapcrawl-cli", "crawl", "--query", "q"]);
    assert!(result.is_err());
}

#[test]
fn parses_phone_command() {
    let cli = Cli::try_parse_from(["mapcrawl-cli", "phone", "+966 11 234 5678"])
        .expect("expected valid cli args");
    assert!(matches!(cli.command, Commands::Phone { ref text } if text == "+966 11 234 5678"));
}

#[test]
fn resolve_query_builds_from_location() {
    let args = crawl_args(&["--keyword", "logistics", "--country", "Saudi Arabia", "--city", "Riyadh"]);
    assert_eq!(
        crawl::resolve_query(&args).unwrap(),
        "logistics in Riyadh, Saudi Arabia"
    );
}

#[test]
fn resolve_query_rejects_blank_keyword() {
    let args = crawl_args(&["--keyword", " ", "--country", "China"]);
    let err = crawl::resolve_query(&args).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<ConfigError>(),
        Some(ConfigError::MissingField("keyword"))
    ));
}

#[test]
fn crawl_options_use_config_defaults() {
    let args = crawl_args(&["--query", "freight in China"]);
    let options = crawl::crawl_options(&config(), &args).unwrap();
    assert_eq!(options.query(), "freight in China");
    assert_eq!(options.max_stall_passes(), 6);
    assert_eq!(options.settle_delay().as_millis(), 7_000);
}

#[test]
fn crawl_options_flag_overrides_config() {
    let args = crawl_args(&["--query", "q", "--max-stall-passes", "3", "--no-pacing"]);
    let options = crawl::crawl_options(&config(), &args).unwrap();
    assert_eq!(options.max_stall_passes(), 3);
    assert!(options.settle_delay().is_zero());
}

#[test]
fn crawl_options_reject_out_of_range_threshold() {
    let args = crawl_args(&["--query", "q", "--max-stall-passes", "12"]);
    let err = crawl::crawl_options(&config(), &args).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<ConfigError>(),
        Some(ConfigError::OutOfRange { .. })
    ));
}

#[test]
fn crawl_options_reject_blank_query() {
    let args = crawl_args(&["--query", "   "]);
    let err = crawl::crawl_options(&config(), &args).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<ConfigError>(),
        Some(ConfigError::MissingField("search_query"))
    ));
}
