//! Config validation CLI tool
//!
//! Validates a schedule configuration file and reports any errors.

use schedule_util::default_config_path;
use std::path::PathBuf;
use std::process::ExitCode;

/// Path given as the first argument, or the default config location
fn config_path_from_args(args: &[String]) -> PathBuf {
    args.get(1)
        .map(PathBuf::from)
        .unwrap_or_else(default_config_path)
}

fn main() -> ExitCode {
    let args: Vec<String> = std::env::args().collect();

    if matches!(args.get(1).map(String::as_str), Some("-h" | "--help")) {
        println!("Usage: validate-config [config-file]");
        println!();
        println!("Validates a schedule configuration file.");
        println!();
        println!("If no path is provided, uses: {}", default_config_path().display());
        return ExitCode::SUCCESS;
    }

    let config_path = config_path_from_args(&args);
    println!("Checking {}", config_path.display());

    if !config_path.exists() {
        eprintln!("Error: Configuration file not found: {}", config_path.display());
        return ExitCode::from(1);
    }

    match schedule_config::load_config(&config_path) {
        Ok(policy) => {
            println!("✓ Configuration is valid");
            println!();
            println!("Summary:");
            println!("  Config version: {}", schedule_config::CURRENT_CONFIG_VERSION);
            println!("  Schedules: {}", policy.schedules.len());

            if !policy.schedules.is_empty() {
                println!();
                println!("Schedules:");
                for schedule in &policy.schedules {
                    let config = &schedule.config;
                    let window = match config.end_field() {
                        Some(end) if config.end_required() => {
                            format!("{} .. {} (end required)", config.start_field(), end)
                        }
                        Some(end) => format!("{} .. {}", config.start_field(), end),
                        None => format!("{} ..", config.start_field()),
                    };
                    println!("  - {}: {}", schedule.record, window);
                    for filter in config.filters() {
                        println!("      {}: {}", filter.name, filter.predicate);
                    }
                }
            }

            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("✗ Configuration validation failed");
            eprintln!();
            match &e {
                schedule_config::ConfigError::ReadError(io_err) => {
                    eprintln!("Failed to read file: {}", io_err);
                }
                schedule_config::ConfigError::ParseError(parse_err) => {
                    eprintln!("TOML parse error:");
                    eprintln!("  {}", parse_err);
                }
                schedule_config::ConfigError::ValidationFailed { errors } => {
                    eprintln!("Validation errors ({}):", errors.len());
                    for err in errors {
                        eprintln!("  - {}", err);
                    }
                }
                schedule_config::ConfigError::UnsupportedVersion(ver) => {
                    eprintln!(
                        "Unsupported config version: {} (expected {})",
                        ver,
                        schedule_config::CURRENT_CONFIG_VERSION
                    );
                }
            }
            ExitCode::from(1)
        }
    }
}
