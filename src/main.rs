//! Litex - CLI

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use litex::frontend::lexer::{tokenize_blocks_with, LexerOptions};
use litex::util::config::Config;
use litex::util::logger::{self, LogLevel};
use litex::{check_file, parse_source_with, read_source, NAME, VERSION};
use owo_colors::OwoColorize;
use std::path::PathBuf;
use std::process::ExitCode;

/// Front end of the Litex statement and proof language
#[derive(Parser, Debug)]
#[command(name = "litex")]
#[command(author = "Litex Team")]
#[command(version = VERSION)]
#[command(about = NAME, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Configuration file (defaults to ./litex.toml)
    #[arg(long, value_name = "PATH", global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Parse a source file and record its facts
    Check {
        /// Source file to check
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },

    /// Print the indentation block tree of a source file
    Tokens {
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },

    /// Print the parsed statements of a source file
    Ast {
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Emit JSON instead of source form
        #[arg(long)]
        json: bool,
    },
}

fn main() -> ExitCode {
    let args = Args::parse();
    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{} {:#}", "error:".red().bold(), err);
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> Result<()> {
    let config = Config::discover(args.config.as_deref()).context("Failed to load configuration")?;
    let level = if args.verbose {
        LogLevel::Debug
    } else {
        config.log.level
    };
    logger::init_with_level(level);

    if args.verbose {
        eprintln!("{} version: {}", NAME, VERSION);
    }

    let options = LexerOptions::from(&config.lexer);

    match args.command {
        Commands::Check { file } => {
            let session = check_file(&file, &config)?;
            let stats = session.memory().stats();
            println!(
                "{}: {} statements; memory: {} ground, {} conditional, {} universal; \
                 declared: {} var, {} property, {} fn, {} alias",
                file.display(),
                session.statements(),
                stats.ground,
                stats.conditional,
                stats.universal,
                stats.vars,
                stats.properties,
                stats.fns,
                stats.aliases
            );
        }
        Commands::Tokens { file } => {
            let source = read_source(&file)?;
            let blocks = tokenize_blocks_with(&source, &options)
                .with_context(|| format!("Failed to tokenize: {}", file.display()))?;
            for block in &blocks {
                print!("{}", block);
            }
        }
        Commands::Ast { file, json } => {
            let source = read_source(&file)?;
            let stmts = parse_source_with(&source, &options)
                .with_context(|| format!("Failed to parse: {}", file.display()))?;
            if json {
                let text = serde_json::to_string_pretty(&stmts).context("Failed to serialize AST")?;
                println!("{}", text);
            } else {
                for stmt in &stmts {
                    println!("{}", stmt);
                }
            }
        }
    }

    Ok(())
}
