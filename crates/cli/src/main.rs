// RowClean CLI - normalize and deduplicate rows in delimited text files

mod clean;
mod exit_codes;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand, ValueEnum};

use exit_codes::EXIT_SUCCESS;
use rowclean_dedup::KeepPolicy;

#[derive(Parser)]
#[command(name = "rowclean")]
#[command(about = "Normalize and deduplicate rows in delimited text files")]
#[command(long_version = long_version())]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Deduplicate a delimited file under a normalized key
    #[command(after_help = "\
Exit code 0 means the pass completed, whether or not duplicates were found.

Examples:
  rowclean clean vendors.csv -o cleaned.csv --key VendorName,ProductID --normalize VendorName
  rowclean clean vendors.csv -o cleaned.csv --key SKU --report report.txt
  rowclean clean vendors.csv -o cleaned.csv --key VendorName --keep none --dropped dupes.csv
  rowclean clean export.csv -o cleaned.csv --key Id --delimiter ';' --json")]
    Clean {
        /// Input file
        input: PathBuf,

        /// Cleaned output file
        #[arg(long, short = 'o')]
        output: PathBuf,

        /// Key column names (comma-separated; repeatable)
        #[arg(long = "key", short = 'k', value_delimiter = ',', required = true)]
        keys: Vec<String>,

        /// Key columns to normalize before comparison (comma-separated; repeatable)
        #[arg(long, short = 'n', value_delimiter = ',')]
        normalize: Vec<String>,

        /// Write a human-readable report here
        #[arg(long, short = 'r')]
        report: Option<PathBuf>,

        /// Write dropped duplicate rows here
        #[arg(long)]
        dropped: Option<PathBuf>,

        /// Which records of a duplicate group survive
        #[arg(long, value_enum, default_value = "first")]
        keep: KeepArg,

        /// Field delimiter
        #[arg(long, default_value = ",")]
        delimiter: char,

        /// Print the full run result as JSON on stdout
        #[arg(long)]
        json: bool,

        /// Suppress the stderr summary
        #[arg(long, short = 'q')]
        quiet: bool,
    },

    /// Run a clean job from a TOML config file
    #[command(after_help = "\
Examples:
  rowclean run vendors.clean.toml
  rowclean run vendors.clean.toml --json
  rowclean run vendors.clean.toml --output result.json")]
    Run {
        /// Path to the .clean.toml job file
        config: PathBuf,

        /// Output JSON to stdout instead of human summary
        #[arg(long)]
        json: bool,

        /// Write JSON result to file
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// Validate a job config without running it
    #[command(after_help = "\
Examples:
  rowclean validate vendors.clean.toml")]
    Validate {
        /// Path to the .clean.toml job file
        config: PathBuf,
    },
}

/// Keep policy as a flag value.
#[derive(Debug, Clone, Copy, ValueEnum)]
enum KeepArg {
    /// Keep the first occurrence of each key
    First,
    /// Drop all members of duplicated key groups
    None,
}

impl From<KeepArg> for KeepPolicy {
    fn from(arg: KeepArg) -> Self {
        match arg {
            KeepArg::First => Self::First,
            KeepArg::None => Self::None,
        }
    }
}

fn long_version() -> &'static str {
    concat!(
        env!("CARGO_PKG_VERSION"),
        " (", env!("GIT_COMMIT_HASH"), ")",
        "\nengine:  rowclean-dedup ", env!("CARGO_PKG_VERSION"),
        "\ntarget:  ", env!("TARGET"),
    )
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Clean {
            input,
            output,
            keys,
            normalize,
            report,
            dropped,
            keep,
            delimiter,
            json,
            quiet,
        } => clean::cmd_clean(
            input, output, keys, normalize, report, dropped, keep.into(), delimiter, json, quiet,
        ),
        Commands::Run { config, json, output } => clean::cmd_run(config, json, output),
        Commands::Validate { config } => clean::cmd_validate(config),
    };

    match result {
        Ok(()) => ExitCode::from(EXIT_SUCCESS),
        Err(CliError { code, message, hint }) => {
            if !message.is_empty() {
                eprintln!("error: {message}");
            }
            if let Some(hint) = hint {
                eprintln!("hint:  {hint}");
            }
            ExitCode::from(code)
        }
    }
}

#[derive(Debug)]
pub struct CliError {
    pub code: u8,
    pub message: String,
    pub hint: Option<String>,
}

impl CliError {
    pub fn new(code: u8, message: impl Into<String>) -> Self {
        Self { code, message: message.into(), hint: None }
    }

    /// Add a hint to an existing error.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}
