mod args;
mod commands;
pub mod defaults;
mod export;
mod logging;
mod printing;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use demedrive_analysis::analysis::Preset;
use demedrive_sim::simulation::Configuration;
use std::path::PathBuf;

use args::{parse_pair, ExportFormat, InitialArgs, ModelArgs, RunArgs, SelectionArgs};
use commands::{alpha, critical, grid, init, run, sample, scan, step};

/// demedrive: a two-deme gene drive model
///
/// Iterates the deterministic migration-selection recurrence of a gene drive
/// between a target and a non-target deme, and estimates the critical
/// migration rate below which the drive stays confined to the target deme.
#[derive(Parser, Debug)]
#[command(name = "demedrive")]
#[command(author, version, about = "Two-deme gene drive dynamics and critical migration thresholds", long_about = None)]
struct Cli {
    /// Number of threads to use for parallel processing
    ///
    /// If not specified, defaults to the number of logical CPUs.
    #[arg(short = 't', long, global = true)]
    threads: Option<usize>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Load settings from a JSON configuration file; flags override it
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Write a configuration file with default values.
    ///
    /// Model and run flags given here are written into the file.
    Init {
        /// Output path
        #[arg(short, long, default_value = defaults::CONFIG_FILE)]
        output: PathBuf,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,

        #[command(flatten)]
        model: ModelArgs,

        #[command(flatten)]
        initial: InitialArgs,

        #[command(flatten)]
        run: RunArgs,
    },

    /// Advance both demes by a single generation.
    Step {
        #[command(flatten)]
        model: ModelArgs,

        #[command(flatten)]
        initial: InitialArgs,
    },

    /// Run a trajectory until convergence or the generation budget runs out.
    Run {
        #[command(flatten)]
        model: ModelArgs,

        #[command(flatten)]
        initial: InitialArgs,

        #[command(flatten)]
        run: RunArgs,

        /// Write the full history to this file
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// History file format
        #[arg(short, long, value_enum, default_value_t = ExportFormat::Csv)]
        format: ExportFormat,
    },

    /// Estimate the critical migration threshold m* by bisection.
    Critical {
        #[command(flatten)]
        selection: SelectionArgs,

        /// Migration asymmetry
        #[arg(long)]
        alpha: Option<f64>,

        #[command(flatten)]
        initial: InitialArgs,

        #[command(flatten)]
        run: RunArgs,

        /// Bisection stops once the bracket is narrower than this
        #[arg(short, long)]
        precision: Option<f64>,

        /// Afterwards, test the predicate at this many evenly spaced rates
        /// and warn if any contradict the estimate
        #[arg(long, value_name = "K")]
        check_monotonicity: Option<usize>,
    },

    /// Run one trajectory per initial condition and classify the outcomes.
    Scan {
        #[command(flatten)]
        model: ModelArgs,

        #[command(flatten)]
        run: RunArgs,

        /// Initial condition as q1,q2 (repeatable)
        #[arg(short, long = "initial", value_parser = parse_pair)]
        initials: Vec<(f64, f64)>,

        /// Start from a reference configuration (b2, malaria, rodent)
        #[arg(long)]
        preset: Option<Preset>,

        /// Write the rows to this file
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output file format
        #[arg(short, long, value_enum, default_value_t = ExportFormat::Csv)]
        format: ExportFormat,
    },

    /// Compare trajectories across migration asymmetries.
    Alpha {
        #[command(flatten)]
        selection: SelectionArgs,

        /// Baseline migration rate
        #[arg(short = 'm', long = "migration")]
        m: Option<f64>,

        /// Asymmetries to compare
        #[arg(long, value_delimiter = ',', default_values_t = demedrive_analysis::analysis::DEFAULT_ALPHAS)]
        alphas: Vec<f64>,

        /// Initial drive frequency in the target deme
        #[arg(long, default_value_t = defaults::ALPHA_INITIAL_Q1)]
        q1: f64,

        /// Initial drive frequency in the non-target deme
        #[arg(long, default_value_t = defaults::ALPHA_INITIAL_Q2)]
        q2: f64,

        #[command(flatten)]
        run: RunArgs,

        /// Generations kept per trajectory
        #[arg(short, long, default_value_t = defaults::ALPHA_WINDOW)]
        window: usize,

        /// Write the truncated histories to this file
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// History file format
        #[arg(short, long, value_enum, default_value_t = ExportFormat::Csv)]
        format: ExportFormat,
    },

    /// Critical thresholds over a grid of s, c, h and alpha values.
    Grid {
        /// Selection costs (comma separated)
        #[arg(short = 's', long = "selection", value_delimiter = ',', default_value = defaults::GRID_S)]
        s: Vec<f64>,

        /// Conversion rates (comma separated)
        #[arg(short = 'c', long = "conversion", value_delimiter = ',', default_value = defaults::GRID_C)]
        c: Vec<f64>,

        /// Dominance values (comma separated)
        #[arg(long = "dominance", value_delimiter = ',', default_value = defaults::GRID_H)]
        h: Vec<f64>,

        /// Migration asymmetries (comma separated)
        #[arg(long = "alpha", value_delimiter = ',', default_value = defaults::GRID_ALPHA)]
        alpha: Vec<f64>,

        #[command(flatten)]
        initial: InitialArgs,

        #[command(flatten)]
        run: RunArgs,

        /// Bisection precision
        #[arg(short, long)]
        precision: Option<f64>,

        /// Write the grid to this file
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output file format
        #[arg(short, long, value_enum, default_value_t = ExportFormat::Csv)]
        format: ExportFormat,

        /// Hide the progress bar
        #[arg(long)]
        no_progress: bool,
    },

    /// Draw display genotypes for both demes.
    Sample {
        #[command(flatten)]
        initial: InitialArgs,

        /// Individuals per deme
        #[arg(short = 'n', long)]
        individuals: Option<usize>,

        /// Random seed
        #[arg(long)]
        seed: Option<u64>,

        /// Baseline migration rate, used to report migrants per tick
        #[arg(short = 'm', long = "migration")]
        m: Option<f64>,
    },
}

fn load_configuration(path: Option<&PathBuf>) -> Result<Configuration> {
    match path {
        Some(path) => Configuration::from_json_file(path)
            .with_context(|| format!("Failed to load configuration from {}", path.display())),
        None => Ok(Configuration::default()),
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    logging::init(cli.verbose)?;

    if let Some(threads) = cli.threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build_global()?;
    }

    let mut config = load_configuration(cli.config.as_ref())?;

    match cli.command {
        Commands::Init {
            output,
            force,
            model,
            initial,
            run,
        } => {
            model.apply(&mut config);
            initial.apply(&mut config);
            run.apply(&mut config);
            init::write_configuration(&config, &output, force)?;
        }
        Commands::Step { model, initial } => {
            model.apply(&mut config);
            initial.apply(&mut config);
            step::step_once(&config)?;
        }
        Commands::Run {
            model,
            initial,
            run: run_args,
            output,
            format,
        } => {
            model.apply(&mut config);
            initial.apply(&mut config);
            run_args.apply(&mut config);
            run::run_trajectory(&config, output.as_ref(), format)?;
        }
        Commands::Critical {
            selection,
            alpha,
            initial,
            run: run_args,
            precision,
            check_monotonicity,
        } => {
            selection.apply(&mut config);
            if let Some(alpha) = alpha {
                config.model.alpha = alpha;
            }
            initial.apply(&mut config);
            run_args.apply(&mut config);
            if let Some(precision) = precision {
                config.search.precision = precision;
            }
            if check_monotonicity.is_some() {
                config.search.monotonicity_samples = check_monotonicity;
            }
            critical::find_threshold(&config)?;
        }
        Commands::Scan {
            model,
            run: run_args,
            initials,
            preset,
            output,
            format,
        } => {
            match &preset {
                Some(preset) => model.apply_preset(&mut config, preset),
                None => model.apply(&mut config),
            }
            run_args.apply(&mut config);
            scan::scan(&config, &initials, preset.as_ref(), output.as_ref(), format)?;
        }
        Commands::Alpha {
            selection,
            m,
            alphas,
            q1,
            q2,
            run: run_args,
            window,
            output,
            format,
        } => {
            selection.apply(&mut config);
            if let Some(m) = m {
                config.model.m = m;
            }
            run_args.apply(&mut config);
            alpha::compare(&config, &alphas, (q1, q2), window, output.as_ref(), format)?;
        }
        Commands::Grid {
            s,
            c,
            h,
            alpha,
            initial,
            run: run_args,
            precision,
            output,
            format,
            no_progress,
        } => {
            initial.apply(&mut config);
            run_args.apply(&mut config);
            if let Some(precision) = precision {
                config.search.precision = precision;
            }
            let axes = grid::GridAxes { s, c, h, alpha };
            grid::run_grid(&config, &axes, output.as_ref(), format, !no_progress)?;
        }
        Commands::Sample {
            initial,
            individuals,
            seed,
            m,
        } => {
            initial.apply(&mut config);
            if let Some(individuals) = individuals {
                config.sampling.individuals = individuals;
            }
            if seed.is_some() {
                config.sampling.seed = seed;
            }
            if let Some(m) = m {
                config.model.m = m;
            }
            sample::draw(&config)?;
        }
    }

    Ok(())
}
