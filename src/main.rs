//! Main CLI application for the Game of Life runner

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use game_of_life::{
    config::{default_config_path, BoardFormat, CliOverrides, EdgePolicy, Settings},
    game_of_life::{create_example_boards, default_output_path, load_board, Engine},
    run_generations,
    utils::{BoardFormatter, ColorOutput},
};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Instant;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "game_of_life")]
#[command(about = "Conway's Game of Life runner")]
#[command(version = "0.1.0")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Advance a board file a number of generations
    Run {
        /// Input board file
        #[arg(short = 'f', long)]
        input: PathBuf,

        /// Output board file (defaults to a timestamped name)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Number of generations (overrides config)
        #[arg(short = 'n', long, allow_negative_numbers = true)]
        generations: Option<i64>,

        /// Configuration file path
        #[arg(short, long, default_value_os_t = default_config_path())]
        config: PathBuf,

        /// Edge policy for board files without a header (overrides config)
        #[arg(long, value_enum)]
        edge: Option<EdgePolicy>,

        /// Output format (defaults to the output file extension)
        #[arg(long, value_enum)]
        format: Option<BoardFormat>,

        /// Print every generation
        #[arg(short, long)]
        verbose: bool,
    },

    /// Create a default configuration and example boards
    Setup {
        /// Directory to create files in
        #[arg(short, long, default_value = ".")]
        directory: PathBuf,

        /// Force overwrite existing files
        #[arg(long)]
        force: bool,
    },

    /// Show a board with statistics
    Show {
        /// Board file
        #[arg(short = 'f', long)]
        input: PathBuf,

        /// Configuration file path
        #[arg(short, long, default_value_os_t = default_config_path())]
        config: PathBuf,

        /// Generations to simulate while looking for a repeat or extinction
        #[arg(long, default_value_t = 64)]
        horizon: usize,
    },
}

fn main() -> ExitCode {
    match dispatch(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{}", failure_message(&err));
            ExitCode::FAILURE
        }
    }
}

/// Error line printed before a non-zero exit, including the context chain
fn failure_message(err: &anyhow::Error) -> String {
    ColorOutput::error(&format!("❌ Error: {:#}", err))
}

fn dispatch(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Run {
            input, output, generations, config, edge, format, verbose
        } => {
            let overrides = CliOverrides { generations, edge_policy: edge, format };
            let settings = load_settings(&config, &overrides)?;
            init_tracing(&settings, verbose);
            run_command(input, output, settings, format.is_some(), verbose)
        }
        Commands::Setup { directory, force } => {
            init_tracing(&Settings::default(), false);
            setup_command(directory, force)
        }
        Commands::Show { input, config, horizon } => {
            let settings = load_settings(&config, &CliOverrides::default())?;
            init_tracing(&settings, false);
            show_command(input, settings, horizon)
        }
    }
}

fn load_settings(config_path: &Path, overrides: &CliOverrides) -> Result<Settings> {
    let mut settings = Settings::load_or_default(config_path)
        .with_context(|| format!("Failed to load config from {}", config_path.display()))?;
    settings.merge_with_cli(overrides);
    Ok(settings)
}

/// RUST_LOG wins, then --verbose, then the configured level
fn init_tracing(settings: &Settings, verbose: bool) {
    let fallback = if verbose { "debug" } else { settings.logging.level.as_str() };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn run_command(
    input: PathBuf,
    output: Option<PathBuf>,
    mut settings: Settings,
    explicit_format: bool,
    verbose: bool,
) -> Result<()> {
    let output = output.unwrap_or_else(|| {
        default_output_path().with_extension(settings.output.format.extension())
    });
    if !explicit_format && output.extension().is_some() {
        settings.output.format = BoardFormat::from_path(&output);
    }

    let generations = settings.simulation.generations;
    if verbose {
        println!("Configuration:");
        println!("  Input: {}", input.display());
        println!("  Output: {}", output.display());
        println!("  Generations: {}", generations);
        println!("  Default edge policy: {}", settings.simulation.edge_policy);
        println!("  Output format: {:?}", settings.output.format);
        println!();
    }

    let start_time = Instant::now();
    let result = run_generations(&input, &output, generations, &settings, |generation, board| {
        if verbose {
            println!("{}", BoardFormatter::format_generation(generation, board));
        }
    })
    .with_context(|| format!("Failed to advance {} by {} generation(s)", input.display(), generations))?;

    println!("{}", ColorOutput::success(&format!(
        "✅ Advanced {} generation(s) in {:.3}s ({} living cells)",
        generations,
        start_time.elapsed().as_secs_f64(),
        result.living_count()
    )));
    println!("Saved to {}", output.display());

    Ok(())
}

fn setup_command(directory: PathBuf, force: bool) -> Result<()> {
    println!("{}", ColorOutput::info("🛠️  Setting up example files..."));

    let config_path = directory.join(default_config_path());
    if !config_path.exists() || force {
        Settings::default().to_file(&config_path)
            .context("Failed to create default configuration")?;
        println!("Created: {}", config_path.display());
    } else {
        println!("{}", ColorOutput::warning(&format!(
            "Skipped: {} (already exists)", config_path.display()
        )));
    }

    let boards_dir = directory.join("boards");
    create_example_boards(&boards_dir)
        .context("Failed to create example boards")?;
    println!("Created example boards in: {}", boards_dir.display());

    println!("\n{}", ColorOutput::success("✅ Setup complete!"));
    println!("\nNext steps:");
    println!("1. Edit {}", config_path.display());
    println!("2. Run: game_of_life run -f boards/glider.txt -o glider_next.txt -n 4");

    Ok(())
}

fn show_command(input: PathBuf, settings: Settings, horizon: usize) -> Result<()> {
    let board = load_board(&input, BoardFormat::from_path(&input), settings.simulation.edge_policy)
        .with_context(|| format!("Failed to load board from {}", input.display()))?;

    println!("Board ({}x{}):", board.width(), board.height());
    println!("{}", BoardFormatter::format_with_coords(&board));

    let behaviour = Engine::classify(&board, horizon);
    println!("{}", BoardFormatter::format_statistics(&board, behaviour));

    Ok(())
}
