//! Spend Bubbles CLI
//!
//! Usage:
//!   spend-bubbles [OPTIONS] [FILE]
//!
//! Options:
//!   -c, --category <CATEGORY>   Category slug or dataset label
//!   -m, --measure <MEASURE>     currency or percent
//!   -W, --width <PX>            Container width
//!   -H, --height <PX>           Container height
//!   -t, --ticks <N>             Simulation ticks before the snapshot
//!       --config <FILE>         Pipeline configuration (TOML format)
//!   -s, --stylesheet <FILE>     Stylesheet file for color palette (TOML format)
//!   -f, --format <FORMAT>       svg or json
//!   -d, --debug                 Print layout details to stderr
//!   -h, --help                  Print help

use std::io::{self, IsTerminal, Read};
use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use tracing_subscriber::EnvFilter;

use spend_bubbles::{
    render_svg_with_stylesheet, simulate, Category, Dataset, FieldConfig, Measure, RenderConfig,
    Stylesheet,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Svg,
    Json,
}

#[derive(Parser)]
#[command(name = "spend-bubbles")]
#[command(about = "Packed bubble chart of regional spending changes")]
struct Cli {
    /// Dataset JSON file (reads from stdin if not provided)
    input: Option<PathBuf>,

    /// Category slug (e.g. groceries, all) or dataset label
    #[arg(short, long, default_value = "food-service")]
    category: Category,

    /// Which difference sizes the bubbles
    #[arg(short, long, default_value = "currency")]
    measure: Measure,

    /// Container width in pixels
    #[arg(short = 'W', long, default_value_t = 800.0)]
    width: f64,

    /// Container height in pixels
    #[arg(short = 'H', long, default_value_t = 600.0)]
    height: f64,

    /// Simulation ticks to run before the snapshot
    #[arg(short, long, default_value_t = 300)]
    ticks: usize,

    /// Pipeline configuration file (TOML format)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Stylesheet file for color palette (TOML format)
    #[arg(short, long)]
    stylesheet: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Svg)]
    format: OutputFormat,

    /// Debug mode: print value extent and positions to stderr
    #[arg(short, long)]
    debug: bool,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    // If no input file and stdin is a terminal (interactive), there is nothing to read
    if cli.input.is_none() && io::stdin().is_terminal() {
        eprintln!("No dataset given. Pass a JSON file or pipe one on stdin; see --help.");
        std::process::exit(2);
    }

    let field = match &cli.config {
        Some(path) => match FieldConfig::from_file(path) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("Error loading config '{}': {}", path.display(), e);
                std::process::exit(1);
            }
        },
        None => FieldConfig::default(),
    };

    // Load stylesheet
    let stylesheet = match &cli.stylesheet {
        Some(path) => match Stylesheet::from_file(path) {
            Ok(s) => s,
            Err(e) => {
                eprintln!("Error loading stylesheet '{}': {}", path.display(), e);
                std::process::exit(1);
            }
        },
        None => Stylesheet::default(),
    };

    // Read input
    let dataset = match &cli.input {
        Some(path) => Dataset::from_file(path),
        None => {
            let mut buffer = String::new();
            if let Err(e) = io::stdin().read_to_string(&mut buffer) {
                eprintln!("Error reading from stdin: {}", e);
                std::process::exit(1);
            }
            Dataset::from_json_str(&buffer)
        }
    };
    let dataset = match dataset {
        Ok(d) => d,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    let config = RenderConfig::new()
        .with_field(field)
        .with_stylesheet(stylesheet)
        .with_selection(cli.category, cli.measure)
        .with_size(cli.width, cli.height)
        .with_ticks(cli.ticks)
        .with_debug(cli.debug);

    let frame = match simulate(&dataset, &config) {
        Ok(frame) => frame,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    match cli.format {
        OutputFormat::Svg => {
            let svg = render_svg_with_stylesheet(&frame, &config.field.svg, &config.stylesheet);
            println!("{}", svg);
        }
        OutputFormat::Json => match serde_json::to_string_pretty(&frame) {
            Ok(json) => println!("{}", json),
            Err(e) => {
                eprintln!("Error encoding frame: {}", e);
                std::process::exit(1);
            }
        },
    }
}
