use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;

use remote_jobs::dataset;
use remote_jobs::fetch::HttpFetcher;
use remote_jobs::html::HtmlTextExtractor;
use remote_jobs::salary;
use remote_jobs::sources;
use remote_jobs::summary::DatasetSummary;
use remote_jobs::{Enricher, Settings, Vocabulary};

#[derive(Parser)]
#[command(name = "remote_jobs", about = "Remote job postings: collect, enrich, summarize")]
struct Cli {
    /// Settings file (TOML or JSON); defaults to ./remote_jobs.toml if present
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Vocabulary JSON replacing the built-in skills/roles/regions
    #[arg(long, global = true)]
    vocabulary: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch RemoteOK + Remotive, enrich, write the dataset
    Collect {
        #[arg(short, long, default_value = "data/jobs_enriched.json")]
        output: PathBuf,
        /// Also write the raw postings before enrichment
        #[arg(long)]
        raw_output: Option<PathBuf>,
        #[arg(long)]
        remoteok_limit: Option<usize>,
        #[arg(long)]
        remotive_limit: Option<usize>,
    },
    /// Enrich a raw postings file (.json array or .jsonl)
    Enrich {
        input: PathBuf,
        #[arg(short, long, default_value = "data/jobs_enriched.json")]
        output: PathBuf,
    },
    /// Parse one salary string and print the yearly estimate
    Salary { text: String },
    /// Summarize an enriched dataset
    Stats {
        input: PathBuf,
        /// Number of skills to list
        #[arg(long, default_value = "10")]
        top: usize,
    },
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .try_init();
}

fn load_vocabulary(cli_path: Option<&Path>, settings: &Settings) -> Result<Vocabulary> {
    let path = cli_path.or(settings.vocabulary.as_deref());
    Vocabulary::load(path).with_context(|| format!("Failed to load vocabulary {:?}", path))
}

fn main() -> Result<()> {
    init_tracing();
    let t0 = Instant::now();
    let cli = Cli::parse();

    let mut settings = Settings::load(cli.config.as_deref()).context("Failed to load settings")?;

    match cli.command {
        Commands::Collect {
            output,
            raw_output,
            remoteok_limit,
            remotive_limit,
        } => {
            if let Some(n) = remoteok_limit {
                settings.sources.remoteok_limit = n;
            }
            if let Some(n) = remotive_limit {
                settings.sources.remotive_limit = n;
            }
            let vocab = load_vocabulary(cli.vocabulary.as_deref(), &settings)?;

            let fetcher = HttpFetcher::new(&settings.fetch)?;
            let raw = sources::collect_posts(&settings.sources, &fetcher, &HtmlTextExtractor)?;
            info!(count = raw.len(), "Collected raw postings");
            if let Some(path) = raw_output {
                dataset::write_records(&path, &raw)
                    .with_context(|| format!("Failed to write {:?}", path))?;
            }

            let enriched = Enricher::new(&vocab).process(raw);
            dataset::write_records(&output, &enriched)
                .with_context(|| format!("Failed to write {:?}", output))?;
            println!("Wrote {} postings to {:?}", enriched.len(), output);
        }
        Commands::Enrich { input, output } => {
            let vocab = load_vocabulary(cli.vocabulary.as_deref(), &settings)?;
            let raw = dataset::read_raw(&input)
                .with_context(|| format!("Failed to read {:?}", input))?;
            let enriched = Enricher::new(&vocab).process(raw);
            dataset::write_records(&output, &enriched)
                .with_context(|| format!("Failed to write {:?}", output))?;
            println!("Wrote {} postings to {:?}", enriched.len(), output);
        }
        Commands::Salary { text } => {
            let s = salary::parse(&text);
            let show = |v: Option<f64>| v.map(|x| format!("{:.0}", x)).unwrap_or_else(|| "-".into());
            println!("unit: {}", s.unit);
            println!("min:  {}", show(s.min));
            println!("max:  {}", show(s.max));
            println!("mid:  {}", show(s.mid()));
        }
        Commands::Stats { input, top } => {
            let records = dataset::read_enriched(&input)
                .with_context(|| format!("Failed to read {:?}", input))?;
            print!("{}", DatasetSummary::from_records(&records, top));
        }
    }

    let elapsed = t0.elapsed();
    if elapsed.as_secs() >= 1 {
        info!("Done in {:.1}s", elapsed.as_secs_f64());
    }
    Ok(())
}
