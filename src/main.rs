use std::path::PathBuf;
use std::process;

use clap::{Parser, ValueEnum};
use sheeterd::{ErLevel, RenderOptions, Splines};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LevelArg {
    Physical,
    Logical,
    Conceptual,
}

impl From<LevelArg> for ErLevel {
    fn from(level: LevelArg) -> Self {
        match level {
            LevelArg::Physical => ErLevel::Physical,
            LevelArg::Logical => ErLevel::Logical,
            LevelArg::Conceptual => ErLevel::Conceptual,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum SplinesArg {
    Straight,
    Curved,
}

impl From<SplinesArg> for Splines {
    fn from(splines: SplinesArg) -> Self {
        match splines {
            SplinesArg::Straight => Splines::Straight,
            SplinesArg::Curved => Splines::Curved,
        }
    }
}

#[derive(Parser)]
#[command(
    name = "sheeterd",
    version,
    about = "Generate ER diagrams from spreadsheet schema definitions"
)]
struct Cli {
    /// Input workbook: a CSV file, or a directory with one CSV per sheet
    input: PathBuf,

    /// Diagram abstraction level
    #[arg(short = 't', long = "type", value_enum, default_value = "physical")]
    level: LevelArg,

    /// Edge routing style
    #[arg(long, value_enum, default_value = "curved")]
    splines: SplinesArg,

    /// Output file (default: input path with a .pdf extension)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Style configuration file
    #[arg(short, long, default_value = "config_colors.yml")]
    config: PathBuf,

    /// Append a legend node per table classification
    #[arg(long)]
    legend: bool,

    /// Write per-table label files under debug/ for inspection
    #[arg(long)]
    debug_labels: bool,
}

fn main() {
    tracing_subscriber::fmt::init();
    let cli = Cli::parse();

    let output = cli
        .output
        .clone()
        .unwrap_or_else(|| cli.input.with_extension("pdf"));
    let options = RenderOptions {
        splines: cli.splines.into(),
        legend: cli.legend,
        debug_dir: cli.debug_labels.then(|| PathBuf::from("debug")),
    };

    match sheeterd::generate_diagram(&cli.input, &cli.config, &output, cli.level.into(), &options) {
        Ok(path) => println!("{}", path.display()),
        Err(e) => {
            eprintln!("error: {e}");
            process::exit(1);
        }
    }
}
