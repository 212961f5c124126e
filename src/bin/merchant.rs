//! Merchant's Guide Command Line Interface
//!
//! Reads merchant sentences one per line and prints the answers.
//!
//! # Usage
//!
//! ```bash
//! # Answer every line of a file
//! merchant run --file trace.txt
//!
//! # Pipe lines through stdin
//! printf 'glob is I\nhow much is glob glob ?\n' | merchant
//!
//! # Interactive prompt
//! merchant repl
//!
//! # Check a Roman numeral
//! merchant roman MCMXLIV
//! ```

use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use serde::Serialize;
use tracing::debug;

use merchants_guide::{evaluate, normalize_line, Merchant, MerchantConfig, RoundingMode};

#[derive(Parser)]
#[command(name = "merchant")]
#[command(version)]
#[command(about = "Translate alien numerals and price minerals for an interstellar merchant")]
#[command(long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Output format: text (default) or json
    #[arg(long, short = 'o', global = true, default_value = "text", value_enum)]
    format: OutputFormat,

    /// Rounding for mineral prices: half-even or half-up (overrides MERCHANT_ROUNDING)
    #[arg(long, global = true, value_parser = parse_rounding)]
    rounding: Option<RoundingMode>,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Execute every line of a file (reads stdin if not provided)
    Run {
        #[arg(short, long)]
        file: Option<PathBuf>,
    },

    /// Interactive prompt
    Repl,

    /// Evaluate a single Roman numeral
    Roman { numeral: String },
}

/// One line of `--format json` output
#[derive(Serialize)]
struct Exchange<'a> {
    input: &'a str,
    output: Option<&'a str>,
}

#[derive(Serialize)]
struct RomanValue<'a> {
    numeral: &'a str,
    value: u32,
}

fn parse_rounding(raw: &str) -> std::result::Result<RoundingMode, String> {
    raw.parse()
}

// =============================================================================
// MAIN
// =============================================================================

fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}: {:#}", "error".red().bold(), e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = match cli.rounding {
        Some(rounding) => MerchantConfig::new(rounding),
        None => MerchantConfig::from_env()?,
    };
    let mut merchant = Merchant::new(config);

    let command = cli.command.unwrap_or_else(|| {
        if atty::is(atty::Stream::Stdin) {
            Commands::Repl
        } else {
            Commands::Run { file: None }
        }
    });

    match command {
        Commands::Run { file } => cmd_run(&mut merchant, file, cli.format),
        Commands::Repl => cmd_repl(&mut merchant, cli.format),
        Commands::Roman { numeral } => cmd_roman(&numeral, cli.format),
    }
}

// =============================================================================
// COMMAND IMPLEMENTATIONS
// =============================================================================

fn cmd_run(merchant: &mut Merchant, file: Option<PathBuf>, format: OutputFormat) -> Result<()> {
    let reader: Box<dyn BufRead> = match &file {
        Some(path) => Box::new(BufReader::new(
            File::open(path).with_context(|| format!("failed to open {}", path.display()))?,
        )),
        None => Box::new(io::stdin().lock()),
    };
    let stdout = io::stdout().lock();

    match format {
        OutputFormat::Text => {
            merchant
                .run(reader, stdout)
                .context("failed to process input")?;
        }
        OutputFormat::Json => {
            let mut stdout = stdout;
            for line in reader.lines() {
                let line = line.context("failed to read input")?;
                let line = normalize_line(&line);
                let output = merchant.single_command(line);
                print_json(&mut stdout, line, output.as_deref())?;
            }
        }
    }

    Ok(())
}

fn cmd_repl(merchant: &mut Merchant, format: OutputFormat) -> Result<()> {
    let mut editor = DefaultEditor::new().context("failed to start line editor")?;
    let mut stdout = io::stdout().lock();

    loop {
        match editor.readline("merchant> ") {
            Ok(line) => {
                let line = normalize_line(&line);
                if !line.is_empty() {
                    if let Err(e) = editor.add_history_entry(line) {
                        debug!(error = %e, "failed to record history entry");
                    }
                }

                let output = merchant.single_command(line);
                match format {
                    OutputFormat::Text => {
                        if let Some(output) = output {
                            writeln!(stdout, "{}", output)?;
                        }
                    }
                    OutputFormat::Json => print_json(&mut stdout, line, output.as_deref())?,
                }
            }
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
            Err(e) => return Err(e).context("failed to read line"),
        }
    }

    Ok(())
}

fn cmd_roman(numeral: &str, format: OutputFormat) -> Result<()> {
    let value = evaluate(numeral)?;

    match format {
        OutputFormat::Text => println!("{} is {}", numeral, value),
        OutputFormat::Json => {
            let record = RomanValue { numeral, value };
            println!(
                "{}",
                serde_json::to_string(&record).context("JSON serialization failed")?
            );
        }
    }

    Ok(())
}

fn print_json(out: &mut impl Write, input: &str, output: Option<&str>) -> Result<()> {
    let record = Exchange { input, output };
    writeln!(
        out,
        "{}",
        serde_json::to_string(&record).context("JSON serialization failed")?
    )?;
    Ok(())
}
