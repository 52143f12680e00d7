//! Kiai - Main entrypoint.
//!
//! Command line front end for the Kiai membership filter. It loads
//! configuration, initializes logging, and builds filters from word files.

use clap::{Parser, Subcommand};
use kiai_lib::config::{ConfigLoader, KiaiConfig, LogConfig, ENV_PREFIX};
use kiai_lib::data_structures::kiai_filter::{FilterStats, HashScheme, KiaiFilter, SizingPolicy};
use kiai_lib::error::{KiaiError, KiaiResult};
use kiai_lib::loader::{FileSource, KeyLoader, KeySource, ReaderSource};
use std::path::PathBuf;
use std::process;
use tracing::info;

/// Command line arguments for Kiai.
#[derive(Parser, Debug)]
#[clap(name = "kiai", version, about)]
struct Args {
    /// Path to configuration file
    #[clap(short, long, value_parser)]
    config: Option<PathBuf>,

    /// Command to execute
    #[clap(subcommand)]
    command: Option<Command>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Command {
    /// Print the bit array size and hash count for a capacity and error rate
    Sizing {
        /// Expected number of items
        #[clap(short = 'n', long)]
        expected_items: Option<usize>,

        /// Target false positive rate
        #[clap(short = 'p', long)]
        false_positive_rate: Option<f64>,
    },

    /// Build a filter from a file of keys (one per line, "-" for stdin)
    Load {
        /// File to read keys from
        #[clap(value_parser)]
        file: PathBuf,

        /// Expected number of items
        #[clap(short = 'n', long)]
        expected_items: Option<usize>,

        /// Target false positive rate
        #[clap(short = 'p', long)]
        false_positive_rate: Option<f64>,

        /// Index generation scheme (djb2 or fnv)
        #[clap(long)]
        hash_scheme: Option<HashScheme>,

        /// Key to test for membership after loading (repeatable)
        #[clap(long = "check")]
        check: Vec<String>,

        /// Print statistics as JSON
        #[clap(long)]
        json: bool,
    },

    /// Run the built-in demonstration
    Demo,

    /// Validate the configuration file
    Validate,

    /// Generate a default configuration file
    GenConfig {
        /// Path to output configuration file
        #[clap(short, long, value_parser)]
        output: PathBuf,
    },
}

/// Initialize the logging system.
fn init_logging(log: &LogConfig) -> KiaiResult<()> {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&log.level));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_line_number(log.source_location)
        .with_file(log.source_location);

    let result = if log.json {
        tracing::subscriber::set_global_default(builder.json().finish())
    } else {
        tracing::subscriber::set_global_default(builder.pretty().finish())
    };

    result.map_err(|e| KiaiError::Custom(format!("Failed to set global tracing subscriber: {e}")))
}

/// Main entry point for the application.
fn main() -> KiaiResult<()> {
    // Parse command-line arguments
    let args = <Args as clap::Parser>::parse();

    // Load configuration
    let config_loader = ConfigLoader::new(args.config.as_deref(), ENV_PREFIX);
    let config = match config_loader.load() {
        Ok(config) => config,
        Err(e) => {
            init_logging(&LogConfig::default())?;
            tracing::error!("Configuration error: {}", e);
            process::exit(1);
        }
    };

    init_logging(&config.log)?;

    match args.command.unwrap_or(Command::Demo) {
        Command::Sizing {
            expected_items,
            false_positive_rate,
        } => {
            let n = expected_items.unwrap_or(config.filter.expected_items);
            let p = false_positive_rate.unwrap_or(config.filter.false_positive_rate);
            let size = SizingPolicy::compute_size(n, p)?;
            let hash_count = SizingPolicy::compute_hash_count(size, n)?;

            println!("expected_items:      {n}");
            println!("false_positive_rate: {p}");
            println!("size (bits):         {size}");
            println!("hash_count:          {hash_count}");
            Ok(())
        }
        Command::Load {
            file,
            expected_items,
            false_positive_rate,
            hash_scheme,
            check,
            json,
        } => {
            let mut settings = config.filter.clone();
            if let Some(n) = expected_items {
                settings.expected_items = n;
            }
            if let Some(p) = false_positive_rate {
                settings.false_positive_rate = p;
            }
            if let Some(scheme) = hash_scheme {
                settings.hash_scheme = scheme;
            }

            let mut filter = KiaiFilter::with_config(settings.to_filter_config())?;
            let mut source: Box<dyn KeySource> = if file.as_os_str() == "-" {
                Box::new(ReaderSource::new("stdin", std::io::stdin()))
            } else {
                Box::new(FileSource::new(&file))
            };

            let report = KeyLoader::new(config.loader.clone()).load(&mut filter, source.as_mut());

            print_stats(&filter.stats(), json)?;
            for key in &check {
                println!("contains {key:?}: {}", filter.contains(key));
            }

            if let Some(error) = report.error {
                tracing::error!("Filter may be incomplete: {}", error);
                process::exit(1);
            }
            Ok(())
        }
        Command::Demo => run_demo(),
        Command::Validate => {
            // Loading already validated; reaching here means the configuration is sound
            info!("Configuration validated successfully");
            Ok(())
        }
        Command::GenConfig { output } => {
            info!("Generating default configuration");
            let default_config = KiaiConfig::default();

            // Create parent directories if they don't exist
            if let Some(parent) = output.parent() {
                std::fs::create_dir_all(parent)?;
            }

            let toml = default_config.to_toml()?;
            std::fs::write(&output, toml)?;

            info!("Default configuration written to {:?}", output);
            Ok(())
        }
    }
}

/// Print filter statistics, either as aligned text or as JSON.
fn print_stats(stats: &FilterStats, json: bool) -> KiaiResult<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(stats)?);
    } else {
        println!("{stats}");
    }
    Ok(())
}

/// Walk through adding and querying keys on two filter sizes.
fn run_demo() -> KiaiResult<()> {
    println!("Initialization and add");
    let mut filter = KiaiFilter::with_params(1_000, 0.01)?;
    print_stats(&filter.stats(), false)?;

    filter.add_all(["apple", "banana", "cherry"]);
    print_stats(&filter.stats(), false)?;

    for key in ["apple", "banana", "orange"] {
        println!("contains {key:?}: {}", filter.contains(key));
    }

    println!();
    println!("Larger filter");
    let mut large = KiaiFilter::with_params(10_000, 0.01)?;
    large.add_all(["dog", "cat", "fish"]);

    for key in ["dog", "cat", "fish", "bird"] {
        println!("contains {key:?}: {}", large.contains(key));
    }
    print_stats(&large.stats(), false)?;

    Ok(())
}
