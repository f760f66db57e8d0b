//! tabprep CLI.

use clap::{ColorChoice, Parser};
use std::io::{self, IsTerminal};

use tabprep_cli::cli::{Cli, Command, LogFormatArg};
use tabprep_cli::commands::{run_clean, run_profile};
use tabprep_cli::logging::{LogConfig, LogFormat, init_logging};
use tabprep_cli::render::{print_mapping, print_profile};

fn main() {
    let cli = Cli::parse();
    cli.color.write_global();
    init_logging(&log_config_from_cli(&cli));

    let exit_code = match cli.command {
        Command::Clean(args) => match run_clean(&args) {
            Ok(outcome) => {
                print_mapping(&outcome.mapping);
                0
            }
            Err(error) => {
                eprintln!("error: {error:#}");
                1
            }
        },
        Command::Profile(args) => match run_profile(&args) {
            Ok(summary) => {
                print_profile(&summary);
                0
            }
            Err(error) => {
                eprintln!("error: {error:#}");
                1
            }
        },
    };
    std::process::exit(exit_code);
}

/// Build logging configuration from CLI flags with consistent precedence.
fn log_config_from_cli(cli: &Cli) -> LogConfig {
    let mut config = LogConfig {
        level_filter: cli.verbosity.tracing_level_filter(),
        ..LogConfig::default()
    };
    config.use_env_filter = !cli.verbosity.is_present();
    config.format = match cli.log_format {
        LogFormatArg::Pretty => LogFormat::Pretty,
        LogFormatArg::Compact => LogFormat::Compact,
        LogFormatArg::Json => LogFormat::Json,
    };
    config.with_ansi = match cli.color.color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => io::stderr().is_terminal(),
    };
    config
}
