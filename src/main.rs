use clap::{Parser, Subcommand};
use env_logger::Env;
use std::path::{Path, PathBuf};
use trimpng::imaging::{EdgeMode, EmptyPolicy, Padding};
use trimpng::{TrimInput, TrimOptions, config, output, process};

/// Flags shared by `trim` and `check`.
#[derive(clap::Args, Clone)]
struct TrimArgs {
    /// PNG files or directories containing PNG files
    #[arg(required = true)]
    paths: Vec<PathBuf>,

    /// Pixels to keep around the opaque area (fractions round, negatives shrink)
    #[arg(short, long, allow_hyphen_values = true)]
    padding: Option<String>,

    /// Descend into subdirectories
    #[arg(short, long)]
    recursive: bool,

    /// How the right/bottom crop edge is derived from the opaque area
    #[arg(long, value_enum)]
    edge_mode: Option<EdgeMode>,

    /// What to do with images that have no opaque pixels
    #[arg(long, value_enum)]
    on_empty: Option<EmptyPolicy>,

    /// Print results as a JSON array instead of progress lines
    #[arg(long)]
    json: bool,
}

#[derive(Parser)]
#[command(name = "trimpng")]
#[command(about = "Crop PNG images to their opaque content")]
#[command(long_about = "\
Crop PNG images to their opaque content

Each image is cropped in place to the smallest rectangle containing every
pixel with non-zero alpha, grown by the padding on all sides and clamped to
the image. Directories expand to the PNG files they contain.

Reported distances (first trim of a 1000x1000 image with a 100x100 square
at (50,50), padding 0):

  left 50, top 50          crop origin
  right 850, bottom 850    distance from the crop edge to the image edge
  width 100, height 100    size of the rewritten image

Run 'trimpng gen-config' to generate a documented trimpng.toml.")]
#[command(version)]
struct Cli {
    /// Config file [default: ./trimpng.toml, if present]
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Maximum parallel images (capped at the number of cores)
    #[arg(short, long, global = true)]
    jobs: Option<usize>,

    /// Print diagnostic detail
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Crop images in place
    Trim {
        #[command(flatten)]
        args: TrimArgs,

        /// Report what would be cropped without writing anything
        #[arg(long)]
        dry_run: bool,
    },
    /// Report crops without writing anything (same as `trim --dry-run`)
    Check {
        #[command(flatten)]
        args: TrimArgs,
    },
    /// Print a stock trimpng.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Command::Trim { args, dry_run } => run_trim(cli.config.as_deref(), cli.jobs, args, dry_run),
        Command::Check { args } => run_trim(cli.config.as_deref(), cli.jobs, args, true),
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
            Ok(())
        }
    }
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(Env::default().default_filter_or(default_filter)).init();
}

fn run_trim(
    config_path: Option<&Path>,
    jobs: Option<usize>,
    args: TrimArgs,
    dry_run: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut trim_config = match config_path {
        Some(path) if !path.exists() => {
            return Err(format!("config file not found: {}", path.display()).into());
        }
        Some(path) => config::load_config(path)?,
        None => config::load_config(Path::new(config::CONFIG_FILENAME))?,
    };
    if jobs.is_some() {
        trim_config.processing.max_processes = jobs;
        trim_config.validate()?;
    }
    init_thread_pool(&trim_config.processing);

    let options = apply_args(TrimOptions::from_config(&trim_config), &args, dry_run);
    log::debug!("trim options: {options:?}");
    let input = TrimInput::Many(args.paths);

    let reports = if args.json {
        let reports = process::trim(&input, &options, None);
        println!("{}", output::to_json(&reports)?);
        reports
    } else {
        let (tx, rx) = std::sync::mpsc::channel();
        let printer = std::thread::spawn(move || {
            for event in rx {
                for line in output::format_process_event(&event) {
                    println!("{}", line);
                }
            }
        });
        let reports = process::trim(&input, &options, Some(tx));
        printer
            .join()
            .map_err(|_| "progress printer thread panicked")?;
        output::print_summary(&reports, dry_run);
        reports
    };

    let failed = reports.iter().filter(|r| r.outcome.is_err()).count();
    if failed > 0 {
        return Err(format!("{failed} of {} images failed", reports.len()).into());
    }
    Ok(())
}

/// Layer command-line flags over config-derived options.
fn apply_args(mut options: TrimOptions, args: &TrimArgs, dry_run: bool) -> TrimOptions {
    if let Some(text) = &args.padding {
        options.padding = Padding::parse(text);
    }
    if let Some(mode) = args.edge_mode {
        options.edge_mode = mode;
    }
    if let Some(policy) = args.on_empty {
        options.on_empty = policy;
    }
    options.recursive |= args.recursive;
    options.dry_run = dry_run;
    options
}

/// Initialize the rayon thread pool based on processing config.
///
/// Capped at the number of available CPU cores.
fn init_thread_pool(processing: &config::ProcessingConfig) {
    let threads = config::effective_threads(processing);
    rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build_global()
        .ok();
}
