mod io_util;
mod normalize;
mod order;
mod parse;
mod populate;

use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use std::io;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "sql-seeder")]
#[command(version)]
#[command(about = "Order CREATE TABLE statements by foreign keys and generate synthetic INSERT data", long_about = None)]
pub struct Cli {
    /// Verbose logging (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Reorder CREATE TABLE statements so referenced tables come first
    Order {
        /// Input SQL file, or a JSON/list literal of statements ('-' for stdin)
        file: PathBuf,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output a JSON array of statements
        #[arg(long)]
        json: bool,

        /// Only verify that an order exists and print it
        #[arg(long)]
        check: bool,
    },

    /// Generate INSERT statements for every table in dependency order
    Populate {
        /// Input SQL file, or a JSON/list literal of statements ('-' for stdin)
        file: PathBuf,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Rows per table (default: 10, or `rows` from --config)
        #[arg(short, long)]
        rows: Option<usize>,

        /// Random seed for reproducibility
        #[arg(long)]
        seed: Option<u64>,

        /// YAML config file (rows, seed, placeholder, per-table skip)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Literal used for NOT NULL columns of unsupported types
        #[arg(long)]
        placeholder: Option<String>,

        /// Output a JSON array of per-table statement arrays
        #[arg(long)]
        json: bool,
    },

    /// Show the parsed column model of each CREATE TABLE statement
    Parse {
        /// Input SQL file, or a JSON/list literal of statements ('-' for stdin)
        file: PathBuf,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Decode a text backend response into a JSON list of strings
    Normalize {
        /// File holding the raw response ('-' for stdin)
        file: PathBuf,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

pub fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Commands::Order {
            file,
            output,
            json,
            check,
        } => order::run(file, output, json, check),
        Commands::Populate {
            file,
            output,
            rows,
            seed,
            config,
            placeholder,
            json,
        } => populate::run(
            file,
            output,
            rows,
            seed,
            config,
            placeholder,
            json,
            cli.verbose,
        ),
        Commands::Parse { file, json } => parse::run(file, json),
        Commands::Normalize { file, output } => normalize::run(file, output),
        Commands::Completions { shell } => {
            generate(
                shell,
                &mut Cli::command(),
                "sql-seeder",
                &mut io::stdout(),
            );
            Ok(())
        }
    }
}
