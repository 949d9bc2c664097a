use super::{transition::weights, *};
use crate::*;
use rand::{distr::weighted::WeightedIndex, prelude::*, rngs::SmallRng};
use std::collections::HashMap;
use tracing::{debug, instrument};

/// PageRank estimated by a random surfer.
///
/// The surfer starts on a page drawn from the start distribution and takes
/// `samples - 1` further steps, each drawn from the transition model of the
/// page it stands on. A page's rank is the share of visited positions that
/// landed on it.
pub struct SampledPageRank<'a> {
    corpus: &'a Corpus,
    damping: f64,
    samples: usize,
    seed: Option<u64>,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub damping: f64,
    /// Length of the walk, counting the starting page.
    pub samples: usize,
    /// Fixed seed for a reproducible walk; OS entropy otherwise.
    pub seed: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            damping: 0.85,
            samples: 10_000,
            seed: None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Result {
    pub page_rank: Ranks,
    pub visits: HashMap<Page, usize, ahash::RandomState>,
}

impl<'a> SampledPageRank<'a> {
    pub fn new(corpus: &'a Corpus, config: &Config) -> crate::Result<Self> {
        check_damping(config.damping)?;
        if config.samples == 0 {
            return Err(Error::NoSamples);
        }
        Ok(Self {
            corpus,
            damping: config.damping,
            samples: config.samples,
            seed: config.seed,
        })
    }

    fn rng(&self) -> SmallRng {
        match self.seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_os_rng(),
        }
    }
}

impl PageRank for SampledPageRank<'_> {
    type Result = self::Result;

    #[instrument(skip_all, fields(pages = self.corpus.len(), samples = self.samples))]
    fn calc(&self, start: &Ranks) -> crate::Result<Self::Result> {
        let p = start_vector(self.corpus, start)?;
        let vertices = self.corpus.vertices();
        let mut rng = self.rng();
        let mut visits = vec![0usize; vertices.len()];

        let first = WeightedIndex::new(vertices.iter().map(|v| p[v]))?;
        let mut cur = first.sample(&mut rng);
        visits[cur] += 1;
        for _ in 1..self.samples {
            let next = WeightedIndex::new(weights(self.corpus, vertices[cur], self.damping))?;
            cur = next.sample(&mut rng);
            visits[cur] += 1;
        }

        let n = self.samples as f64;
        let page_rank = self
            .corpus
            .pages()
            .iter()
            .zip(visits.iter())
            .map(|(page, k)| (page.clone(), *k as f64 / n))
            .collect();
        let visits: HashMap<_, _, ahash::RandomState> =
            self.corpus.pages().iter().cloned().zip(visits).collect();
        debug!(
            unvisited = visits.values().filter(|k| **k == 0).count(),
            "walk finished"
        );
        Ok(Self::Result { page_rank, visits })
    }
}

impl PageRankResult for self::Result {
    fn page_rank(&self) -> &Ranks {
        &self.page_rank
    }

    fn debug(&self) -> impl std::fmt::Debug + '_ {
        ResultDebug { result: self }
    }
}

pub struct ResultDebug<'a> {
    result: &'a self::Result,
}

impl std::fmt::Debug for ResultDebug<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut pages: Vec<_> = self.result.page_rank.keys().collect();
        pages.sort();
        for page in pages {
            let p = self.result.page_rank[page];
            let k = self.result.visits[page];
            writeln!(f, "{page}: {p:?}, {k}")?;
        }
        Ok(())
    }
}

/// Walks `n` steps from a uniformly chosen page.
pub fn sample_rank(corpus: &Corpus, damping: f64, n: usize) -> crate::Result<Ranks> {
    let cfg = Config {
        damping,
        samples: n,
        seed: None,
    };
    let pr = SampledPageRank::new(corpus, &cfg)?;
    let res = pr.calc(&uniform(corpus))?;
    Ok(res.page_rank)
}
