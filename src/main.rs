use std::io::{self, BufRead};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use deskcalc::calculator::{copy_display, tokenize_line};
use deskcalc::config::{Config, OutputFormat};
use deskcalc::{Calculator, Input};

/// Button-driven desk calculator.
///
/// Tokens are button labels such as `7`, `.`, `+`, `×`, `=`, `AC`, `±`, `%`,
/// `π`, `sin`, `ln`, `10ˣ` (ASCII spellings like `*`, `pi` and `10^x` work
/// too). Operators fold left to right: `2 + 3 × 4 =` is 20.
#[derive(Parser, Debug)]
#[command(name = "deskcalc", version, about)]
struct Cli {
    /// Tokens to press. When omitted, each stdin line is pressed in turn
    /// on the same calculator.
    tokens: Vec<String>,

    /// Print the display after every token instead of once per line
    #[arg(long)]
    steps: bool,

    /// Print JSON snapshots instead of the bare display
    #[arg(long)]
    json: bool,

    /// Interpret trigonometric arguments as radians
    #[arg(long)]
    radians: bool,

    /// Maximum number of typed digits
    #[arg(long, value_name = "N", value_parser = clap::value_parser!(u32).range(1..))]
    max_digits: Option<u32>,

    /// Copy the final display to the clipboard
    #[arg(long)]
    copy: bool,

    /// Config file (default: $XDG_CONFIG_HOME/deskcalc/config.toml)
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = Config::load(cli.config.as_deref())?;
    let settings =
        config.engine_settings_with(cli.radians, cli.max_digits.map(|digits| digits as usize));

    let printer = Printer {
        json: cli.json || config.output.format == OutputFormat::Json,
        steps: cli.steps,
    };
    let mut calc = Calculator::with_settings(settings);
    info!(?settings, "Calculator ready");

    if cli.tokens.is_empty() {
        for line in io::stdin().lock().lines() {
            let line = line.context("Failed to read stdin")?;
            if !line.trim().is_empty() {
                printer.run_line(&mut calc, &line)?;
            }
        }
    } else {
        printer.run_line(&mut calc, &cli.tokens.join(" "))?;
    }

    if cli.copy || config.output.copy_result {
        match copy_display(&calc.snapshot()) {
            Ok(true) => info!(display = calc.display(), "Copied display to clipboard"),
            Ok(false) => warn!("Display shows an error, nothing copied"),
            Err(err) => anyhow::bail!(err),
        }
    }

    Ok(())
}

fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

struct Printer {
    json: bool,
    steps: bool,
}

impl Printer {
    /// Press every token on `line`. A line with an unknown token is
    /// reported and skipped as a whole.
    fn run_line(&self, calc: &mut Calculator, line: &str) -> Result<()> {
        let inputs = match tokenize_line(line) {
            Ok(inputs) => inputs,
            Err(err) => {
                eprintln!("Error: {err}");
                return Ok(());
            }
        };

        for input in &inputs {
            calc.handle_input(*input);
            if self.steps {
                self.print(calc, Some(*input))?;
            }
        }

        if !self.steps {
            self.print(calc, None)?;
        }

        Ok(())
    }

    fn print(&self, calc: &Calculator, input: Option<Input>) -> Result<()> {
        if self.json {
            let snapshot = serde_json::to_string(&calc.snapshot())
                .context("Failed to serialize display")?;
            println!("{snapshot}");
        } else if let Some(input) = input {
            println!("{input} → {}", calc.display());
        } else {
            println!("{}", calc.display());
        }
        Ok(())
    }
}
