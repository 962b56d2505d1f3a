//! Quizload CLI - Convert raw quiz CSV files to the goal import format
//!
//! ```bash
//! quizload convert questions.csv -o out.csv     # Validate + convert one file
//! quizload batch a.csv b.csv --out-dir out/     # Convert many, one report
//! quizload validate questions.csv               # Verdict only
//! quizload parse questions.csv                  # Dump parsed rows as JSON
//! quizload columns                              # Show required columns
//! ```

use clap::{Args, Parser, Subcommand};
use quizload::{
    convert_batch, convert_file, expected_columns_description, format_delimiter, goal_csv_string,
    parse_csv_file_with, rng_from_seed, validate_file, write_goal_csv_file, ConversionOptions,
    ConversionParameters, DEFAULT_CATEGORY,
};
use std::fs;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "quizload")]
#[command(
    about = "Convert raw quiz question CSV files to the goal import format",
    long_about = None
)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate and convert a raw CSV file
    Convert {
        /// Input CSV file
        input: PathBuf,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        #[command(flatten)]
        conversion: ConversionArgs,

        /// Print the first source rows and converted rows to stderr
        #[arg(long)]
        preview: bool,
    },

    /// Convert several CSV files into a directory
    Batch {
        /// Input CSV files
        #[arg(required = true)]
        inputs: Vec<PathBuf>,

        /// Directory receiving converted_<name> files
        #[arg(long)]
        out_dir: PathBuf,

        #[command(flatten)]
        conversion: ConversionArgs,

        /// Write the JSON batch report to this file (default: stdout)
        #[arg(long)]
        report: Option<PathBuf>,
    },

    /// Validate a raw CSV file without converting it
    Validate {
        /// Input CSV file
        input: PathBuf,

        /// CSV delimiter (auto-detect if not specified)
        #[arg(short, long)]
        delimiter: Option<char>,
    },

    /// Parse a CSV file and output its rows as JSON
    Parse {
        /// Input CSV file
        input: PathBuf,

        /// CSV delimiter (auto-detect if not specified)
        #[arg(short, long)]
        delimiter: Option<char>,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Show the required input columns
    Columns,
}

#[derive(Args)]
struct ConversionArgs {
    /// Category written into every record
    #[arg(long, env = "QUIZLOAD_CATEGORY", default_value = DEFAULT_CATEGORY)]
    category: String,

    /// Leave the ID column empty
    #[arg(long, env = "QUIZLOAD_BLANK_IDS")]
    blank_ids: bool,

    /// Seed for the id base (random if not specified)
    #[arg(long, env = "QUIZLOAD_SEED")]
    seed: Option<u64>,

    /// CSV delimiter (auto-detect if not specified)
    #[arg(short, long)]
    delimiter: Option<char>,

    /// Number of rows shown by --preview
    #[arg(long, default_value = "5")]
    preview_rows: usize,
}

impl From<ConversionArgs> for ConversionOptions {
    fn from(args: ConversionArgs) -> Self {
        ConversionOptions {
            params: ConversionParameters {
                category: args.category,
                blank_ids: args.blank_ids,
            },
            seed: args.seed,
            delimiter: args.delimiter,
            preview_rows: args.preview_rows,
        }
    }
}

fn main() {
    // Load .env file (if present)
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Commands::Convert {
            input,
            output,
            conversion,
            preview,
        } => cmd_convert(&input, output.as_deref(), conversion.into(), preview),

        Commands::Batch {
            inputs,
            out_dir,
            conversion,
            report,
        } => cmd_batch(&inputs, &out_dir, conversion.into(), report.as_deref()),

        Commands::Validate { input, delimiter } => cmd_validate(&input, delimiter),

        Commands::Parse {
            input,
            delimiter,
            output,
        } => cmd_parse(&input, delimiter, output.as_deref()),

        Commands::Columns => {
            print!("{}", expected_columns_description());
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("❌ Error: {}", e);
        std::process::exit(1);
    }
}

fn init_tracing(verbose: u8) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| match verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        _ => EnvFilter::new("debug"),
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn cmd_convert(
    input: &Path,
    output: Option<&Path>,
    options: ConversionOptions,
    show_preview: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    eprintln!("📄 Processing: {}", input.display());

    let mut rng = rng_from_seed(options.seed);
    let result = convert_file(input, &options, &mut rng)?;

    eprintln!("   Encoding: {}", result.csv_info.encoding);
    eprintln!("   Delimiter: '{}'", format_delimiter(result.csv_info.delimiter));
    eprintln!("   Rows: {}", result.csv_info.row_count);
    eprintln!("✅ Converted {} questions", result.table.len());
    if result.skipped_rows > 0 {
        eprintln!("   Skipped: {} rows without a question", result.skipped_rows);
    }

    if show_preview {
        eprintln!("\n👀 Input preview:");
        eprintln!("{}", serde_json::to_string_pretty(result.input_preview.rows())?);
        eprintln!("\n👀 Output preview:");
        eprint!("{}", goal_csv_string(&result.preview(options.preview_rows))?);
        eprintln!();
    }

    match output {
        Some(path) => {
            write_goal_csv_file(&result.table, path)?;
            eprintln!("💾 Output written to: {}", path.display());
        }
        None => print!("{}", goal_csv_string(&result.table)?),
    }

    Ok(())
}

fn cmd_batch(
    inputs: &[PathBuf],
    out_dir: &Path,
    options: ConversionOptions,
    report_path: Option<&Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    eprintln!("📦 Converting {} files", inputs.len());

    let report = convert_batch(inputs, out_dir, &options)?;

    eprintln!("\n📊 Results: {} converted, {} failed", report.converted(), report.failed());

    let json = serde_json::to_string_pretty(&report)?;
    write_output(&json, report_path)?;

    if !report.all_converted() {
        std::process::exit(1);
    }

    Ok(())
}

fn cmd_validate(input: &Path, delimiter: Option<char>) -> Result<(), Box<dyn std::error::Error>> {
    eprintln!("✔️  Validating: {}", input.display());

    let info = validate_file(input, delimiter)?;
    eprintln!("✅ Validation successful ({} rows)", info.row_count);

    Ok(())
}

fn cmd_parse(
    input: &Path,
    delimiter: Option<char>,
    output: Option<&Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    eprintln!("📄 Parsing CSV: {}", input.display());

    let result = parse_csv_file_with(input, delimiter)?;

    eprintln!("   Encoding: {}", result.encoding);
    eprintln!(
        "   Delimiter: '{}'{}",
        format_delimiter(result.delimiter),
        if delimiter.is_none() { " (auto-detected)" } else { "" }
    );
    eprintln!("   Columns: {}", result.table.headers().join(", "));
    eprintln!("✅ Parsed {} rows", result.table.len());

    let json = serde_json::to_string_pretty(&result.table)?;
    write_output(&json, output)?;

    Ok(())
}

fn write_output(content: &str, path: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    match path {
        Some(p) => {
            fs::write(p, content)?;
            eprintln!("💾 Output written to: {}", p.display());
        }
        None => {
            println!("{}", content);
        }
    }
    Ok(())
}
