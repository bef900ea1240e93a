use clap::{Parser, Subcommand};
use colored::Colorize;
use seqscout::{
    config::ScanConfig,
    fasta::{generate_random_fasta, GenerateOptions},
    results::ScanSummary,
    search::scan,
    ScanError,
};
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};
use tracing::debug;
use tracing_subscriber::EnvFilter;

type Result<T> = std::result::Result<T, ScanError>;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Parser)]
struct CliScanConfig {
    /// Path to the genome FASTA file
    genome_file: PathBuf,

    /// Path to the FASTA file with the pattern sequences
    sequences_file: PathBuf,

    /// Path of the CSV match report to write
    output_file: PathBuf,

    /// Number of threads to use
    #[arg(short = 'j', long)]
    threads: Option<NonZeroUsize>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "warn")]
    log_level: String,

    /// Path to a YAML config file
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Scan a genome for exact occurrences of pattern sequences
    Scan(Box<CliScanConfig>),

    /// Write a FASTA file of random nucleotide sequences
    Generate {
        /// Path of the FASTA file to write
        output_file: PathBuf,

        /// Number of sequences to generate
        #[arg(long, default_value = "100")]
        count: usize,

        /// Minimum sequence length
        #[arg(long, default_value = "5")]
        min_len: usize,

        /// Maximum sequence length
        #[arg(long, default_value = "20")]
        max_len: usize,

        /// RNG seed for reproducible output
        #[arg(long)]
        seed: Option<u64>,
    },
}

fn main() -> Result<()> {
    run()
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Scan(args) => {
            let file_config = ScanConfig::load_from(args.config.as_deref())?;

            let cli_config = ScanConfig {
                genome_path: args.genome_file,
                patterns_path: args.sequences_file,
                output_path: args.output_file,
                thread_count: args
                    .threads
                    .or_else(|| NonZeroUsize::new(num_cpus::get()))
                    .unwrap_or(NonZeroUsize::MIN),
                log_level: args.log_level,
            };

            let config = file_config.merge_with_cli(cli_config);
            init_logging(&config.log_level);
            debug!("Effective configuration: {:?}", config);

            let summary = scan(&config)?;
            print_scan_results(&summary, &config.output_path);
            Ok(())
        }
        Commands::Generate {
            output_file,
            count,
            min_len,
            max_len,
            seed,
        } => {
            init_logging("warn");

            let options = GenerateOptions {
                count,
                min_len,
                max_len,
                seed,
            };
            generate_random_fasta(&output_file, &options)?;

            println!(
                "Generated {} random sequences in {}",
                count.to_string().green(),
                output_file.display().to_string().blue()
            );
            Ok(())
        }
    }
}

fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn print_scan_results(summary: &ScanSummary, output_path: &Path) {
    println!(
        "Found {} matches for {} of {} patterns",
        summary.total_matches.to_string().green(),
        summary.patterns_with_matches,
        summary.patterns_searched
    );

    if !summary.failures.is_empty() {
        println!(
            "\n{} pattern(s) could not be searched:",
            summary.failures.len().to_string().red()
        );
        for failure in &summary.failures {
            println!("  {}: {}", failure.pattern_id.red(), failure.error);
        }
    }

    println!(
        "\nResults written to {}",
        output_path.display().to_string().blue()
    );
}
