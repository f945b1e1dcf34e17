use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};

use healthy_options::args::{OptionParser, ParseResult};
use healthy_options::config::load_registry;
use healthy_options::logging::init_tracing;

/// Parse argument tokens against a flag registry and print the result.
#[derive(Debug, Parser)]
#[command(name = "healthy-options", version, about)]
struct Cli {
    /// Flag registry file (TOML). Defaults to ~/.config/healthy-options/flags.toml.
    #[arg(short = 'c', long = "flags", value_name = "FILE")]
    flags: Option<PathBuf>,

    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
    format: OutputFormat,

    /// Tokens to parse, given after `--`.
    #[arg(last = true, value_name = "TOKENS")]
    tokens: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Json,
    Text,
}

fn main() -> ExitCode {
    init_tracing();
    let cli = Cli::parse();

    match run(cli) {
        Ok(output) => {
            println!("{output}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("Error: {err:#}");
            ExitCode::from(1)
        }
    }
}

fn run(cli: Cli) -> Result<String> {
    let registry = load_registry(cli.flags.as_deref()).context("Failed to load flag registry")?;
    let parser = OptionParser::new(registry);
    let result = parser.parse(cli.tokens)?;
    render(&result, cli.format)
}

fn render(result: &ParseResult, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(result)?),
        OutputFormat::Text => {
            let mut lines: Vec<String> = result
                .options
                .iter()
                .map(|(symbol, value)| {
                    if value.is_switch() {
                        format!("{symbol} = true")
                    } else {
                        format!("{symbol} = {}", value.as_str().unwrap_or_default())
                    }
                })
                .collect();
            lines.push(format!("remaining: {}", result.remaining.join(" ")));
            Ok(lines.join("\n"))
        }
    }
}
