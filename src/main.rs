//! CLI for kleenref - Clean whitespace and punctuation in pasted references.

use std::fmt;
use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use std::process;

use clap::{Parser, Subcommand, ValueEnum};
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

use kleenref::{
    check_input, config::ConfigError, normalize_block, render, resolve_config, Config,
    Entitlement, FreeTier, OutputFormat, QuotaError, SAMPLE_REFERENCES,
};

/// Environment variable holding the log filter.
const LOG_ENV: &str = "KLEENREF_LOG";

// ---------------------------------------------------------------------------
// CLI definition
// ---------------------------------------------------------------------------

/// Clean whitespace and punctuation in pasted bibliographic references
#[derive(Parser)]
#[command(name = "kleenref")]
#[command(version)]
#[command(after_help = "\
Examples:
  kleenref clean refs.txt
  kleenref clean refs.txt --numbered -o cleaned.txt
  pbpaste | kleenref clean - --code KLEENREFPRO
  kleenref sample | kleenref clean")]
struct Cli {
    /// Log debug detail to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Clean references, one per line
    #[command(after_help = "\
Examples:
  kleenref clean refs.txt
  kleenref clean refs.txt -n --format json
  kleenref clean refs.txt --download

Blank lines are dropped. Free use is limited to a fixed number of references
per run; a premium access code lifts the limit.")]
    Clean {
        /// Input text file, one reference per line (use '-' for stdin)
        #[arg(default_value = "-")]
        input: PathBuf,

        /// Prefix each cleaned reference with its number (1., 2., 3., ...)
        #[arg(short, long)]
        numbered: bool,

        /// Output file (default: stdout)
        #[arg(short, long, conflicts_with = "download")]
        output: Option<PathBuf>,

        /// Write to the configured download file name in the current directory
        #[arg(short, long)]
        download: bool,

        /// Output format
        #[arg(long, value_enum, default_value_t = Format::Text)]
        format: Format,

        /// Premium access code
        #[arg(long, env = "KLEENREF_CODE", hide_env_values = true)]
        code: Option<String>,

        /// Configuration file (TOML)
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Print messy sample references to try the cleaner on
    Sample,
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Text,
    Json,
}

impl From<Format> for OutputFormat {
    fn from(format: Format) -> Self {
        match format {
            Format::Text => OutputFormat::Text,
            Format::Json => OutputFormat::Json,
        }
    }
}

// ---------------------------------------------------------------------------
// AppError - semantic exit codes
// ---------------------------------------------------------------------------

enum AppError {
    /// Exit 10 - input file not found / unreadable
    InputFile(String),
    /// Exit 11 - input holds no references
    EmptyInput,
    /// Exit 12 - free-tier reference limit exceeded
    QuotaExceeded(String),
    /// Exit 13 - configuration file not found / invalid
    Config(String),
    /// Exit 15 - cannot write output file
    OutputFile(String),
}

impl AppError {
    fn exit_code(&self) -> i32 {
        match self {
            AppError::InputFile(_) => 10,
            AppError::EmptyInput => 11,
            AppError::QuotaExceeded(_) => 12,
            AppError::Config(_) => 13,
            AppError::OutputFile(_) => 15,
        }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::InputFile(msg) => {
                write!(f, "{}\n  hint: verify the file path is correct", msg)
            }
            AppError::EmptyInput => {
                write!(
                    f,
                    "no references found in input\n  hint: paste at least one reference, one per line"
                )
            }
            AppError::QuotaExceeded(msg) => {
                write!(
                    f,
                    "{}\n  hint: pass a premium access code with --code (or KLEENREF_CODE) to clean unlimited references",
                    msg
                )
            }
            AppError::Config(msg) => {
                write!(
                    f,
                    "{}\n  hint: the config file must be TOML with optional keys max_free_lines, premium_codes, output_file_name",
                    msg
                )
            }
            AppError::OutputFile(msg) => {
                write!(
                    f,
                    "{}\n  hint: check that the output directory exists and is writable",
                    msg
                )
            }
        }
    }
}

impl From<QuotaError> for AppError {
    fn from(e: QuotaError) -> Self {
        match e {
            QuotaError::EmptyInput => AppError::EmptyInput,
            QuotaError::LimitExceeded { .. } => AppError::QuotaExceeded(e.to_string()),
        }
    }
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        process::exit(e.exit_code());
    }
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .without_time()
        .init();
}

fn run(cli: Cli) -> Result<(), AppError> {
    match cli.command {
        Commands::Clean {
            input,
            numbered,
            output,
            download,
            format,
            code,
            config,
        } => {
            let config = resolve_config(config.as_deref()).map_err(map_config_error)?;
            let destination = if download {
                Some(PathBuf::from(&config.output_file_name))
            } else {
                output
            };
            clean_command(
                &input,
                numbered,
                destination.as_deref(),
                format.into(),
                code.as_deref(),
                &config,
            )?;
        }
        Commands::Sample => {
            sample_command();
        }
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Commands
// ---------------------------------------------------------------------------

/// Clean the references in a text file.
fn clean_command(
    input: &Path,
    numbered: bool,
    output: Option<&Path>,
    format: OutputFormat,
    code: Option<&str>,
    config: &Config,
) -> Result<(), AppError> {
    // 1. Read the input (support '-' for stdin)
    let text = if input == Path::new("-") {
        let mut buf = String::new();
        io::stdin()
            .read_to_string(&mut buf)
            .map_err(|e| AppError::InputFile(format!("failed to read from stdin: {}", e)))?;
        buf
    } else {
        fs::read_to_string(input)
            .map_err(|e| AppError::InputFile(format!("'{}': {}", input.display(), e)))?
    };

    // 2. Count references, rejecting blank input
    let count = check_input(&text)?;
    debug!(count, "read references");

    // 3. Resolve the entitlement and apply the free-tier ceiling
    let entitlement = Entitlement::from_code(code, &config.premium_codes);
    match (code, entitlement) {
        (Some(_), Entitlement::Free) => warn!("premium code not recognized, using the free tier"),
        (_, Entitlement::Premium) => info!("premium unlocked"),
        _ => {}
    }
    let tier = FreeTier::new(config.max_free_lines);
    if let Err(e) = tier.check(count, entitlement) {
        debug!(count, limit = tier.limit(), "free tier limit reached");
        return Err(e.into());
    }

    // 4. Clean
    let cleaned = normalize_block(&text, numbered);

    // 5. Write to file or stdout
    if let Some(output_path) = output {
        let data = match format {
            OutputFormat::Text => cleaned,
            OutputFormat::Json => render(&cleaned, format),
        };
        fs::write(output_path, data.as_bytes()).map_err(|e| {
            AppError::OutputFile(format!("'{}': {}", output_path.display(), e))
        })?;
        info!(
            "cleaned {} reference(s), wrote {}",
            count,
            output_path.display()
        );
    } else {
        let stdout = io::stdout();
        let mut handle = stdout.lock();
        write!(handle, "{}", render(&cleaned, format))
            .map_err(|e| AppError::OutputFile(format!("stdout: {}", e)))?;
    }

    Ok(())
}

fn map_config_error(e: ConfigError) -> AppError {
    AppError::Config(format!("invalid configuration: {}", e))
}

/// Print the sample references.
fn sample_command() {
    println!("{}", SAMPLE_REFERENCES);
}
