use std::io::{BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use zcalc::calculator::{FUNCTION_NAMES, evaluate_expression, group_thousands};
use zcalc::convert::units;
use zcalc::{Config, Key, Session, Transcript, parse_conversion, solve};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to config.toml (defaults to the user config directory)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Evaluate an arithmetic expression
    Eval {
        expression: String,
        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },
    /// Convert units, e.g. `zcalc convert 12 cm to m`
    Convert {
        #[arg(required = true, trailing_var_arg = true)]
        text: Vec<String>,
    },
    /// Answer a free-text query
    Ask {
        #[arg(required = true, trailing_var_arg = true)]
        query: Vec<String>,
    },
    /// List the known units
    Units,
    /// List the functions and constants expressions may use
    Functions,
    /// Drive the keypad from stdin, one line of key names at a time
    Keypad,
    /// Ask box session: one query per stdin line
    Chat,
}

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    let config = Config::load(cli.config.as_deref()).context("Failed to load configuration")?;
    init_logging(&config);

    let display = |text: &str| {
        if config.display.thousands_separators {
            group_thousands(text)
        } else {
            text.to_string()
        }
    };

    match cli.command {
        Commands::Eval { expression, json } => {
            let result = evaluate_expression(&expression);
            if json {
                println!("{}", serde_json::to_string(&result)?);
            } else if result.is_success() {
                println!("{}", display(result.display()));
            } else {
                eprintln!("Error: {}", result.display());
            }
            if !result.is_success() {
                return Ok(ExitCode::FAILURE);
            }
        }
        Commands::Convert { text } => match parse_conversion(&conversion_sentence(&text)) {
            Some(answer) => println!("{answer}"),
            None => {
                eprintln!("Error: not a conversion I understand");
                return Ok(ExitCode::FAILURE);
            }
        },
        Commands::Ask { query } => println!("{}", solve(&query.join(" "))),
        Commands::Units => {
            for unit in units() {
                println!(
                    "{:<4} {:<8} {} {}",
                    unit.symbol,
                    unit.dimension,
                    unit.factor,
                    unit.dimension.base_unit()
                );
            }
        }
        Commands::Functions => {
            for name in FUNCTION_NAMES {
                println!("{name}");
            }
        }
        Commands::Keypad => run_keypad(&display)?,
        Commands::Chat => run_chat(&config)?,
    }

    Ok(ExitCode::SUCCESS)
}

/// Rebuild the ask-box sentence from `convert` arguments. A leading
/// `convert` word is accepted, so both `zcalc convert 12 cm to m` and
/// `zcalc convert convert 12 cm to m` work.
fn conversion_sentence(args: &[String]) -> String {
    let joined = args.join(" ");
    let starts_with_verb = joined
        .split_whitespace()
        .next()
        .is_some_and(|word| word.eq_ignore_ascii_case("convert"));

    if starts_with_verb {
        joined
    } else {
        format!("convert {joined}")
    }
}

fn init_logging(config: &Config) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.logging.filter))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Each whitespace-separated name is a keyboard key (`7`, `Enter`,
/// `Backspace`, `Escape`), a keypad action (`del`, `equals`, `clear`,
/// `ac`) or text to append verbatim (`sin(`, `pi`).
fn run_keypad(display: &dyn Fn(&str) -> String) -> anyhow::Result<()> {
    let mut session = Session::new();
    let stdin = std::io::stdin();
    let mut stdout = std::io::stdout().lock();

    for line in stdin.lock().lines() {
        let line = line.context("Failed to read stdin")?;
        for name in line.split_whitespace() {
            let key = Key::from_keyboard(name)
                .or_else(|| Key::from_action(name))
                .unwrap_or_else(|| Key::chip(name));
            session.press(&key);
        }

        let shown = session.display();
        writeln!(stdout, "{}", shown.expression)?;
        writeln!(stdout, "= {}", display(&shown.result))?;
        stdout.flush()?;
    }

    Ok(())
}

fn run_chat(config: &Config) -> anyhow::Result<()> {
    let mut transcript = Transcript::new(config.chat.history_limit);
    let stdin = std::io::stdin();
    let mut stdout = std::io::stdout().lock();

    for line in stdin.lock().lines() {
        let line = line.context("Failed to read stdin")?;
        if let Some(answer) = transcript.ask(&line) {
            writeln!(stdout, "{}", answer.text)?;
            stdout.flush()?;
        }
    }

    tracing::debug!(bubbles = transcript.len(), "chat session ended");
    Ok(())
}
