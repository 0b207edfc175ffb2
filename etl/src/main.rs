//! campaign-split CLI - split a bank-marketing CSV into three tables
//!
//! ```bash
//! campaign-split                       # Fixed batch job on bank_marketing.csv
//! campaign-split run -i data.csv -o out --report out/report.json
//! campaign-split inspect data.csv      # Parse only, show what was found
//! campaign-split columns               # Show input and output layouts
//! ```

use std::path::{Path, PathBuf};

use campaign_split::transform::clean::DEFAULT_CONTACT_YEAR;
use campaign_split::{
    inspect_file, run, write_report, Campaign, CleanOptions, Client, Economics, OutputTable,
    SplitOptions, UnmappedPolicy, DEFAULT_INPUT, INPUT_COLUMNS,
};
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(name = "campaign-split")]
#[command(about = "Split a bank-marketing CSV into client, campaign and economics tables", long_about = None)]
#[command(args_conflicts_with_subcommands = true)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    #[command(flatten)]
    run: RunArgs,
}

#[derive(Subcommand)]
enum Commands {
    /// Clean and split the input (default when no command is given)
    Run(RunArgs),

    /// Report encoding, delimiter, columns and row count of an input file
    Inspect {
        /// Input CSV file
        input: PathBuf,

        /// CSV delimiter (auto-detect if not specified)
        #[arg(short, long)]
        delimiter: Option<char>,
    },

    /// Show expected input columns and output table layouts
    Columns,
}

#[derive(Args, Clone, Debug)]
struct RunArgs {
    /// Input CSV file
    #[arg(short, long, env = "CAMPAIGN_SPLIT_INPUT", default_value = DEFAULT_INPUT)]
    input: PathBuf,

    /// Directory for client.csv, campaign.csv and economics.csv
    #[arg(short, long, env = "CAMPAIGN_SPLIT_OUTPUT_DIR", default_value = ".")]
    output_dir: PathBuf,

    /// CSV delimiter (auto-detect if not specified)
    #[arg(short, long)]
    delimiter: Option<char>,

    /// Year of every last contact
    #[arg(long, env = "CAMPAIGN_SPLIT_YEAR", default_value_t = DEFAULT_CONTACT_YEAR)]
    year: i32,

    /// What to do with yes/no or outcome values outside their mapping
    #[arg(long, value_enum, default_value_t = UnmappedPolicy::Fail)]
    unmapped: UnmappedPolicy,

    /// Also write the run report as JSON
    #[arg(long)]
    report: Option<PathBuf>,
}

impl From<&RunArgs> for SplitOptions {
    fn from(args: &RunArgs) -> Self {
        SplitOptions {
            input: args.input.clone(),
            output_dir: args.output_dir.clone(),
            delimiter: args.delimiter,
            clean: CleanOptions {
                year: args.year,
                unmapped: args.unmapped,
            },
        }
    }
}

fn main() {
    // Load .env file (if present)
    dotenvy::dotenv().ok();

    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder()
        .with_env_filter(env)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Some(Commands::Run(args)) => cmd_run(&args),
        Some(Commands::Inspect { input, delimiter }) => cmd_inspect(&input, delimiter),
        Some(Commands::Columns) => cmd_columns(),
        None => cmd_run(&cli.run),
    };

    if let Err(e) = result {
        eprintln!("❌ Error: {}", e);
        std::process::exit(1);
    }
}

fn cmd_run(args: &RunArgs) -> Result<(), Box<dyn std::error::Error>> {
    let options = SplitOptions::from(args);
    let report = run(&options)?;

    if let Some(ref path) = args.report {
        write_report(&report, path)?;
        eprintln!("💾 Report written to: {}", path.display());
    }

    eprintln!("\n✨ Done! {} rows split into:", report.row_count);
    eprintln!("   {} ({} rows)", report.outputs.client.display(), report.client_rows);
    eprintln!("   {} ({} rows)", report.outputs.campaign.display(), report.campaign_rows);
    eprintln!("   {} ({} rows)", report.outputs.economics.display(), report.economics_rows);
    Ok(())
}

fn cmd_inspect(input: &Path, delimiter: Option<char>) -> Result<(), Box<dyn std::error::Error>> {
    eprintln!("📄 Inspecting: {}", input.display());

    let inspection = inspect_file(input, delimiter)?;
    print!("{}", inspection);

    if !inspection.is_complete() {
        std::process::exit(1);
    }
    Ok(())
}

fn cmd_columns() -> Result<(), Box<dyn std::error::Error>> {
    println!("Input columns:");
    for col in INPUT_COLUMNS {
        println!("  {}", col);
    }
    print_layout::<Client>();
    print_layout::<Campaign>();
    print_layout::<Economics>();
    Ok(())
}

fn print_layout<T: OutputTable>() {
    println!("\n{}:", T::FILE_NAME);
    println!("  {}", T::COLUMNS.join(", "));
}
