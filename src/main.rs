use anyhow::{Context, Result};
use clap::Parser;
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use aztro_natal::{interpret, split_message, EphemerisData, InterpreterConfig, Topic, WrapPolicy};

#[derive(Parser)]
#[command(name = "aztro-natal")]
#[command(about = "Natal chart report from pre-computed ephemeris longitudes")]
struct Cli {
    /// Ephemeris JSON (`bodies`, `cusps`, `ascendant`), or `-` for stdin
    input: PathBuf,

    /// JSON config file (`orb`, `wrap_policy`)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Aspect orb in degrees, overrides the config file
    #[arg(long)]
    orb: Option<f64>,

    /// Compare longitudes against wrapped house bands without lifting them past 360°
    #[arg(long)]
    literal_wrap: bool,

    /// Print the report as JSON instead of text
    #[arg(long)]
    json: bool,

    /// Print the prompt for a reading topic (label, title or number)
    #[arg(short, long)]
    topic: Option<String>,

    /// Split text output into messages of at most this many characters
    #[arg(long)]
    chunk: Option<usize>,
}

/// Logs go to stderr; stdout carries only the report.
fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::new(
        std::env::var("RUST_LOG").unwrap_or_else(|_| "aztro_natal=info".into()),
    );

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn read_input(input: &Path) -> Result<EphemerisData> {
    let data = if input.as_os_str() == "-" {
        let mut buffer = String::new();
        std::io::stdin()
            .read_to_string(&mut buffer)
            .context("Failed to read ephemeris from stdin")?;
        EphemerisData::from_json(&buffer)?
    } else {
        EphemerisData::load(input)
            .with_context(|| format!("Failed to load ephemeris from {}", input.display()))?
    };
    Ok(data)
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing();

    let mut config = match &cli.config {
        Some(path) => InterpreterConfig::load(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => InterpreterConfig::default(),
    };
    if let Some(orb) = cli.orb {
        config.orb = orb;
    }
    if cli.literal_wrap {
        config.wrap_policy = WrapPolicy::Literal;
    }

    let data = read_input(&cli.input)?;
    let report = interpret(&data, &config)?;

    let unassigned: Vec<_> = report.unassigned().collect();
    if !unassigned.is_empty() {
        tracing::warn!("No house determined for {:?}", unassigned);
    }

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    let text = match &cli.topic {
        Some(label) => {
            let topic = Topic::from_label(label)
                .with_context(|| format!("Unknown topic: {}", label))?;
            tracing::info!("Building prompt for topic {}", topic);
            topic.prompt(&report)
        }
        None => report.render(),
    };

    match cli.chunk {
        Some(limit) => {
            let chunks = split_message(&text, limit);
            let total = chunks.len();
            for (i, chunk) in chunks.iter().enumerate() {
                println!("--- message {}/{} ---", i + 1, total);
                print!("{}", chunk);
                if !chunk.ends_with('\n') {
                    println!();
                }
            }
        }
        None => print!("{}", text),
    }

    Ok(())
}
