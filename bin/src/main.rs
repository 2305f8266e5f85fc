use anyhow::{Context, Result};
use clap::Parser;
use std::{fs, path::PathBuf, time::Instant};

use me_core::data::load_records;
use me_core::individual::{compute_measures, group_by_individual};
use me_core::{EntropyOptions, Measure};
use mobility_entropy_core as me_core;

/// Per-individual entropy of time-ordered location visits.
#[derive(Parser)]
#[command(name = "mobility-entropy")]
struct Cli {
    /// Comma separated records with uid, lat, lng and datetime columns
    input: PathBuf,

    /// Measure to compute: random, uncorrelated or real (repeatable, default all)
    #[arg(short, long = "measure")]
    measures: Vec<Measure>,

    /// Normalize the uncorrelated entropy to [0, 1]
    #[arg(long)]
    normalize: bool,

    /// JSON file with entropy options; flags given on the command line win
    #[arg(long)]
    config: Option<PathBuf>,

    /// Print the table as JSON instead of CSV
    #[arg(long)]
    json: bool,

    /// Log progress to stderr
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn options(&self) -> Result<EntropyOptions> {
        let mut options = match &self.config {
            Some(path) => {
                let text = fs::read_to_string(path)
                    .with_context(|| format!("reading config {}", path.display()))?;
                serde_json::from_str(&text)
                    .with_context(|| format!("parsing config {}", path.display()))?
            }
            None => EntropyOptions::default(),
        };

        if !self.measures.is_empty() {
            options.measures = self.measures.clone();
        }
        options.normalize |= self.normalize;

        Ok(options)
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose { "info" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    let options = cli.options()?;
    let records = load_records(&cli.input)
        .with_context(|| format!("loading {}", cli.input.display()))?;

    let start = Instant::now();
    let groups = group_by_individual(records);
    let table = compute_measures(&groups, &options)?;
    log::info!(
        "{} individuals took: {}ms",
        table.rows.len(),
        start.elapsed().as_millis()
    );

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&table)?);
    } else {
        print!("{table}");
    }

    Ok(())
}
