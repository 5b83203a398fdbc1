use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use mvq::models::{MvqConfig, OutputMode, CONFIG_ENV};
use mvq::services::QuantizeService;

#[derive(Parser)]
#[command(name = "mvq")]
#[command(about = "MVQ - reduce 24-bit images to a 256-color palette")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Quantize a PNG and write the result
    Quantize {
        /// Input PNG file
        input: PathBuf,

        /// Output PNG file path
        #[arg(short, long)]
        output: PathBuf,

        /// Write a palette PNG instead of truecolor
        #[arg(long)]
        indexed: bool,

        /// Color budget (1-256)
        #[arg(short, long)]
        max_colors: Option<usize>,

        /// YAML config file (defaults to $MVQ_CONFIG)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Skip oxipng re-compression
        #[arg(long)]
        no_optimize: bool,
    },
    /// Print the palette an image reduces to
    Palette {
        /// Input PNG file
        input: PathBuf,

        /// Color budget (1-256)
        #[arg(short, long)]
        max_colors: Option<usize>,

        /// YAML config file (defaults to $MVQ_CONFIG)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Quantize {
            input,
            output,
            indexed,
            max_colors,
            config,
            no_optimize,
        }) => {
            init_logging();
            let mut config = load_config(config)?;
            if let Some(n) = max_colors {
                config.max_colors = n;
            }
            if indexed {
                config.output = OutputMode::Indexed;
            }
            if no_optimize {
                config.optimize = false;
            }
            run_quantize_command(&input, &output, config)
        }
        Some(Commands::Palette {
            input,
            max_colors,
            config,
            json,
        }) => {
            init_logging();
            let mut config = load_config(config)?;
            if let Some(n) = max_colors {
                config.max_colors = n;
            }
            run_palette_command(&input, config, json)
        }
        None => {
            init_logging();
            run_status_command();
            Ok(())
        }
    }
}

/// Minimal logging for CLI
fn init_logging() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "mvq=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().without_time())
        .init();
}

/// `--config` wins over the environment variable. A file named on the
/// command line must load; one from the environment falls back to defaults.
fn load_config(path: Option<PathBuf>) -> anyhow::Result<MvqConfig> {
    match path {
        Some(path) => Ok(MvqConfig::from_file(&path)?),
        None => {
            let path = std::env::var(CONFIG_ENV).ok().map(PathBuf::from);
            Ok(MvqConfig::load(path.as_deref()))
        }
    }
}

fn run_quantize_command(input: &Path, output: &Path, config: MvqConfig) -> anyhow::Result<()> {
    let service = QuantizeService::new(config)?;
    let outcome = service.quantize_file(input, output)?;

    println!(
        "Reduced to {} colors: {} ({}x{}, {} bytes)",
        outcome.report.colors,
        output.display(),
        outcome.width,
        outcome.height,
        outcome.png.len()
    );
    Ok(())
}

fn run_palette_command(input: &Path, config: MvqConfig, json: bool) -> anyhow::Result<()> {
    let service = QuantizeService::new(config)?;
    let summary = service.palette_file(input)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        for (idx, color) in summary.colors.iter().enumerate() {
            println!("{idx:3}  {color}");
        }
        println!(
            "\n{} colors ({} buckets, {} prune passes)",
            summary.colors.len(),
            summary.initial_buckets,
            summary.prune_passes
        );
    }
    Ok(())
}

/// Show configuration status and usage
fn run_status_command() {
    const VERSION: &str = env!("CARGO_PKG_VERSION");

    let config_file = std::env::var(CONFIG_ENV).ok();

    println!("MVQ v{VERSION}");
    println!("256-color bucket quantizer\n");

    println!("Environment Variables:");
    println!(
        "  {CONFIG_ENV} = {}",
        config_file.as_deref().unwrap_or("(not set)")
    );

    let config = MvqConfig::load(config_file.as_deref().map(Path::new));
    println!("\nConfiguration:");
    println!("  max_colors = {}", config.max_colors);
    println!("  output     = {:?}", config.output);
    println!("  optimize   = {}", config.optimize);

    println!("\nUsage:");
    println!("  mvq quantize <INPUT> -o <OUTPUT> [--indexed] [--max-colors N]");
    println!("  mvq palette <INPUT> [--json]");
    println!("  mvq --help");
}
