//! Ranks the pages of an HTML corpus, by sampling and by iteration.

use anyhow::{Context, Result};
use clap::Parser;
use corpus_rank::{
    crawl,
    page_rank::{iterated, sampled, IteratedPageRank, PageRank, PageRankResult, SampledPageRank},
    uniform, Report,
};
use std::path::PathBuf;
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// Directory holding the `.html` pages
    corpus: PathBuf,

    /// Probability of following a link rather than jumping to a random page
    #[arg(long, default_value_t = 0.85)]
    damping: f64,

    /// Length of the random walk
    #[arg(long, default_value_t = 10_000)]
    samples: usize,

    /// Seed for a reproducible walk
    #[arg(long)]
    seed: Option<u64>,

    /// Iteration stops once no rank moves by this much
    #[arg(long, default_value_t = 0.001)]
    epsilon: f64,

    #[arg(long, default_value_t = 10_000)]
    max_iterations: usize,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let corpus = crawl(&cli.corpus)
        .with_context(|| format!("cannot load corpus from {}", cli.corpus.display()))?;
    let start = uniform(&corpus);

    let cfg = sampled::Config {
        damping: cli.damping,
        samples: cli.samples,
        seed: cli.seed,
    };
    let res = SampledPageRank::new(&corpus, &cfg)?
        .calc(&start)
        .context("sampling failed")?;
    debug!("sampled:\n{:?}", res.debug());
    let title = format!("PageRank Results from Sampling (n = {})", cli.samples);
    print!("{}", Report::new(&title, res.page_rank()));

    let cfg = iterated::Config {
        damping: cli.damping,
        epsilon: cli.epsilon,
        max_iterations: cli.max_iterations,
    };
    let res = IteratedPageRank::new(&corpus, &cfg)?
        .calc(&start)
        .context("iteration failed")?;
    debug!("iterated:\n{:?}", res.debug());
    print!(
        "{}",
        Report::new("PageRank Results from Iteration", res.page_rank())
    );
    Ok(())
}
