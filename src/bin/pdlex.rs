//! Command-line interface for pdlex
//!
//! Usage:
//!   pdlex highlight `<path>` [--grammar `<grammar>`] [--format `<format>`]  - Highlight a file ("-" reads stdin)
//!   pdlex tokens `<path>` [--grammar `<grammar>`]                         - Print one token per line
//!   pdlex grammars                                                    - List the built-in grammars

use clap::{ArgAction, Parser, Subcommand};
use log::debug;
use pdlex::config::{ConfigError, Loader, PdlexConfig};
use pdlex::formats::{self, dump, OutputFormat};
use pdlex::GrammarName;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "pdlex", version)]
#[command(about = "Syntax highlighting for pdfiles and prldevops command lines")]
struct Cli {
    /// Configuration file layered over the built-in defaults
    #[arg(long, short = 'c', global = true)]
    config: Option<PathBuf>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(long, short = 'v', global = true, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Highlight a file
    Highlight {
        /// Path to the file, or "-" for stdin
        path: String,
        /// Grammar to use (pdfile, parallels-file, prldevops); guessed when omitted
        #[arg(long, short = 'g')]
        grammar: Option<GrammarName>,
        /// Output format (html, ansi, json, yaml, text)
        #[arg(long, short = 'f')]
        format: Option<OutputFormat>,
    },
    /// Print the token stream, one token per line
    Tokens {
        /// Path to the file, or "-" for stdin
        path: String,
        #[arg(long, short = 'g')]
        grammar: Option<GrammarName>,
    },
    /// List the built-in grammars and their states
    Grammars,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let format = match &cli.command {
        Command::Highlight { format, .. } => *format,
        _ => None,
    };
    let config = load_config(cli.config.as_deref(), format).unwrap_or_else(|e| {
        eprintln!("Error loading configuration: {}", e);
        std::process::exit(1);
    });

    match cli.command {
        Command::Highlight { path, grammar, .. } => {
            handle_highlight_command(&config, &path, grammar)
        }
        Command::Tokens { path, grammar } => handle_tokens_command(&config, &path, grammar),
        Command::Grammars => handle_grammars_command(),
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

/// Defaults, then the `--config` file, then command-line flags
fn load_config(
    path: Option<&Path>,
    format: Option<OutputFormat>,
) -> Result<PdlexConfig, ConfigError> {
    let mut loader = Loader::new();
    if let Some(path) = path {
        loader = loader.with_file(path);
    }
    if let Some(format) = format {
        loader = loader.set_override("highlight.format", format.as_str())?;
    }
    loader.build()
}

fn read_source(path: &str) -> String {
    let result = if path == "-" {
        let mut buffer = String::new();
        io::stdin().read_to_string(&mut buffer).map(|_| buffer)
    } else {
        std::fs::read_to_string(path)
    };
    result.unwrap_or_else(|e| {
        eprintln!("Error reading {}: {}", path, e);
        std::process::exit(1);
    })
}

/// Explicit choice, then a guess from the file, then the configured default
fn pick_grammar(
    config: &PdlexConfig,
    path: &str,
    source: &str,
    explicit: Option<GrammarName>,
) -> GrammarName {
    let grammar = explicit
        .or_else(|| GrammarName::guess(Path::new(path), source))
        .unwrap_or(config.highlight.grammar);
    debug!("using grammar '{}' for {}", grammar, path);
    grammar
}

/// Handle the highlight command
fn handle_highlight_command(
    config: &PdlexConfig,
    path: &str,
    grammar: Option<GrammarName>,
) {
    let source = read_source(path);
    let grammar = pick_grammar(config, path, &source, grammar);
    let format = config.highlight.format;

    let tokens = grammar.tokenize(&source);
    let output = formats::render(&tokens, format, &config.render_options()).unwrap_or_else(|e| {
        eprintln!("Render error: {}", e);
        std::process::exit(1);
    });
    print!("{}", output);
}

/// Handle the tokens command
fn handle_tokens_command(config: &PdlexConfig, path: &str, grammar: Option<GrammarName>) {
    let source = read_source(path);
    let grammar = pick_grammar(config, path, &source, grammar);
    print!("{}", dump::to_lines(&grammar.tokenize(&source)));
}

/// Handle the grammars command
fn handle_grammars_command() {
    println!("Available grammars:\n");
    for name in GrammarName::ALL {
        let grammar = name.grammar();
        println!("  {} (aliases: {})", name, name.aliases().join(", "));
        for state in grammar.states() {
            println!("    {:<20} {} rules", state.name(), state.rule_count());
        }
    }
}
