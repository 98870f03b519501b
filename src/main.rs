use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use triangulation::utils::logging;
use triangulation::{
    render, InputParser, OutputFormat, TriangulationConfig, TriangulationError, TriangulationSession,
};

/// Locate a target from compass bearings taken at two or three known points
#[derive(Debug, Parser)]
#[command(name = "triangulation", version)]
struct Cli {
    /// Known coordinate as "lat, lon" (decimal or D°M'S"); repeat 2 or 3 times
    #[arg(short, long = "point", value_name = "LAT, LON", allow_hyphen_values = true)]
    points: Vec<String>,

    /// Bearing in degrees clockwise from north, one per point, in order
    #[arg(short, long = "bearing", value_name = "DEGREES", allow_negative_numbers = true)]
    bearings: Vec<String>,

    /// JSON file with observations instead of --point/--bearing
    #[arg(short, long, conflicts_with_all = ["points", "bearings"])]
    input: Option<PathBuf>,

    /// JSON configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Output format (overrides the configuration)
    #[arg(short, long, value_enum)]
    format: Option<OutputFormat>,

    /// Parallel-line tolerance in degrees (overrides the configuration)
    #[arg(long)]
    tolerance: Option<f64>,

    /// Log level (overrides the configuration; RUST_LOG wins over both)
    #[arg(long)]
    log_level: Option<String>,
}

fn load_config(cli: &Cli) -> Result<TriangulationConfig, Box<dyn std::error::Error>> {
    let mut config = match &cli.config {
        Some(path) => TriangulationConfig::load_from_file(path)?,
        None => TriangulationConfig::default(),
    };
    if let Some(format) = cli.format {
        config = config.with_output_format(format);
    }
    if let Some(tolerance) = cli.tolerance {
        config = config.with_parallel_tolerance(tolerance);
    }
    if let Some(level) = &cli.log_level {
        config = config.with_log_level(level.clone());
    }
    config.validate()?;
    Ok(config)
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config = load_config(&cli)?;
    logging::init(&config.log_level);

    let parser = InputParser::new();
    let observations = match &cli.input {
        Some(path) => parser.load_json(path)?,
        None => parser.parse_observations(&cli.points[..], &cli.bearings[..])?,
    };

    let format = config.output_format;
    let session = TriangulationSession::new(config)?;
    let report = session.run(&observations)?;

    println!("{}", render(&report, format)?.trim_end());
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::from(exit_status(e.as_ref()))
        }
    }
}

/// 2 for rejected input, 1 for everything else
fn exit_status(error: &(dyn std::error::Error + 'static)) -> u8 {
    match error.downcast_ref::<TriangulationError>() {
        Some(e) if e.is_input_error() => 2,
        _ => 1,
    }
}
