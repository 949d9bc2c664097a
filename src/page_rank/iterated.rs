use super::*;
use crate::*;
use algograph::graph::VertexId;
use std::collections::HashMap;
use tracing::{debug, instrument, warn};

/// PageRank by fixed-point iteration of
/// `PR(v) = (1 - d)/N + d * (Σ_{u -> v} PR(u)/L(u) + Σ_{sink s} PR(s)/N)`.
pub struct IteratedPageRank<'a> {
    corpus: &'a Corpus,
    damping: f64,
    epsilon: f64,
    max_iterations: usize,
    degrees: HashMap<VertexId, usize, ahash::RandomState>,
    sinks: Vec<VertexId>,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub damping: f64,
    /// Converged once no page moves by this much in one pass.
    pub epsilon: f64,
    pub max_iterations: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            damping: 0.85,
            epsilon: 0.001,
            max_iterations: 10_000,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Result {
    pub page_rank: Ranks,
    /// Per-page change made by the last pass.
    pub delta: Ranks,
    pub iterations: usize,
}

impl<'a> IteratedPageRank<'a> {
    pub fn new(corpus: &'a Corpus, config: &Config) -> crate::Result<Self> {
        check_damping(config.damping)?;
        let epsilon = config.epsilon;
        if !(epsilon > 0.0) {
            return Err(Error::InvalidTolerance(epsilon));
        }
        let degrees: HashMap<_, _, ahash::RandomState> = corpus
            .vertices()
            .iter()
            .map(|u| (*u, corpus.out_degree(*u)))
            .collect();
        let sinks = corpus
            .vertices()
            .iter()
            .copied()
            .filter(|u| degrees[u] == 0)
            .collect();
        Ok(Self {
            corpus,
            damping: config.damping,
            epsilon,
            max_iterations: config.max_iterations,
            degrees,
            sinks,
        })
    }

    /// One synchronous pass: every new value is computed from `p` alone.
    fn step(
        &self,
        p: &HashMap<VertexId, f64, ahash::RandomState>,
    ) -> HashMap<VertexId, f64, ahash::RandomState> {
        let n = self.corpus.len() as f64;
        // a sink spreads its whole rank over every page
        let sink_share = self.sinks.iter().map(|s| p[s]).sum::<f64>() / n;
        self.corpus
            .vertices()
            .iter()
            .map(|v| {
                let inbound: f64 = self
                    .corpus
                    .predecessors(*v)
                    .map(|u| p[&u] / self.degrees[&u] as f64)
                    .sum();
                let r = (1.0 - self.damping) / n + self.damping * (inbound + sink_share);
                (*v, r)
            })
            .collect()
    }
}

impl PageRank for IteratedPageRank<'_> {
    type Result = self::Result;

    #[instrument(skip_all, fields(pages = self.corpus.len(), damping = self.damping))]
    fn calc(&self, start: &Ranks) -> crate::Result<Self::Result> {
        let mut p = start_vector(self.corpus, start)?;
        let mut max_delta = f64::INFINITY;
        for iterations in 1..=self.max_iterations {
            let r = self.step(&p);
            let delta: HashMap<_, _, ahash::RandomState> = self
                .corpus
                .vertices()
                .iter()
                .map(|v| (*v, r[v] - p[v]))
                .collect();
            max_delta = norm_inf(&delta);
            debug!(iterations, max_delta, "pass");
            if max_delta < self.epsilon {
                return Ok(Self::Result {
                    page_rank: to_ranks(self.corpus, &r),
                    delta: to_ranks(self.corpus, &delta),
                    iterations,
                });
            }
            p = r;
        }
        warn!(
            iterations = self.max_iterations,
            max_delta, "iteration cap reached before convergence"
        );
        Err(Error::NotConverged {
            iterations: self.max_iterations,
            max_delta,
        })
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
        writeln!(f, "iterations: {}", self.result.iterations)?;
        let mut pages: Vec<_> = self.result.page_rank.keys().collect();
        pages.sort();
        for page in pages {
            let p = self.result.page_rank[page];
            let d = self.result.delta[page];
            writeln!(f, "{page}: {p:?}, {d:?}")?;
        }
        Ok(())
    }
}

/// Iterates from the uniform distribution with default tolerance and cap.
pub fn iterate_rank(corpus: &Corpus, damping: f64) -> crate::Result<Ranks> {
    let cfg = Config {
        damping,
        ..Config::default()
    };
    let pr = IteratedPageRank::new(corpus, &cfg)?;
    let res = pr.calc(&uniform(corpus))?;
    Ok(res.page_rank)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::arbitrary::{Damping, RandomCorpus};
    use crate::corpus::tests::corpus;
    use quickcheck_macros::quickcheck;

    fn precise() -> Config {
        Config {
            epsilon: 1e-12,
            ..Config::default()
        }
    }

    #[test]
    fn two_cycle() {
        let c = corpus(&[("a", &["b"]), ("b", &["a"])]);
        let res = IteratedPageRank::new(&c, &Config::default())
            .unwrap()
            .calc(&uniform(&c))
            .unwrap();
        assert!((res.page_rank["a"] - 0.5).abs() < 0.001, "{:?}", res.debug());
        assert!((res.page_rank["b"] - 0.5).abs() < 0.001, "{:?}", res.debug());
        assert!(res.iterations < 1000, "{}", res.iterations);
    }

    #[test]
    fn two_cycle_deltas_shrink() {
        let c = corpus(&[("a", &["b"]), ("b", &["a"])]);
        let start: Ranks = [(Page::from("a"), 1.0)].into_iter().collect();
        let mut last = f64::INFINITY;
        for cap in 1..1000 {
            let cfg = Config {
                max_iterations: cap,
                ..Config::default()
            };
            match IteratedPageRank::new(&c, &cfg).unwrap().calc(&start) {
                Err(Error::NotConverged {
                    iterations,
                    max_delta,
                }) => {
                    assert_eq!(iterations, cap);
                    assert!(max_delta < last, "cap={cap}: {max_delta} >= {last}");
                    last = max_delta;
                }
                Ok(res) => {
                    assert!((res.page_rank["a"] - 0.5).abs() < 0.01);
                    return;
                }
                Err(e) => panic!("{e}"),
            }
        }
        panic!("no convergence within 1000 passes");
    }

    #[test]
    fn sink_mass_is_redistributed() {
        let c = corpus(&[("a", &["c"]), ("b", &["c"]), ("c", &[])]);
        let res = IteratedPageRank::new(&c, &precise())
            .unwrap()
            .calc(&uniform(&c))
            .unwrap();
        let pr = &res.page_rank;
        let sum: f64 = pr.values().sum();
        assert!((sum - 1.0).abs() < 1e-9, "{:?}", res.debug());
        assert!((pr["a"] - 0.212_766).abs() < 1e-5, "{:?}", res.debug());
        assert!((pr["b"] - 0.212_766).abs() < 1e-5, "{:?}", res.debug());
        assert!((pr["c"] - 0.574_468).abs() < 1e-5, "{:?}", res.debug());

        let coarse = iterate_rank(&c, 0.85).unwrap();
        let sum: f64 = coarse.values().sum();
        assert!((sum - 1.0).abs() < 1e-9, "{coarse:?}");
    }

    #[test]
    fn four_pages() {
        let c = corpus(&[
            ("1.html", &["2.html"]),
            ("2.html", &["1.html", "3.html"]),
            ("3.html", &["2.html", "4.html"]),
            ("4.html", &["2.html"]),
        ]);
        let res = IteratedPageRank::new(&c, &precise())
            .unwrap()
            .calc(&uniform(&c))
            .unwrap();
        let pr = &res.page_rank;
        assert!((pr["1.html"] - 0.219_914).abs() < 1e-4, "{:?}", res.debug());
        assert!((pr["2.html"] - 0.429_209).abs() < 1e-4, "{:?}", res.debug());
        assert!((pr["3.html"] - 0.219_914).abs() < 1e-4, "{:?}", res.debug());
        assert!((pr["4.html"] - 0.130_964).abs() < 1e-4, "{:?}", res.debug());
    }

    #[test]
    fn single_page() {
        let c = corpus(&[("only", &[])]);
        let pr = iterate_rank(&c, 0.85).unwrap();
        assert_eq!(pr.len(), 1);
        assert!((pr["only"] - 1.0).abs() < 1e-12);
    }

    #[test]
    fn deterministic() {
        let c = corpus(&[("a", &["b", "c"]), ("b", &["c"]), ("c", &["a"]), ("d", &[])]);
        let x = iterate_rank(&c, 0.85).unwrap();
        let y = iterate_rank(&c, 0.85).unwrap();
        assert_eq!(x, y);
    }

    #[test]
    fn periodic_walk_does_not_converge() {
        let c = corpus(&[("a", &["b"]), ("b", &["a"])]);
        let cfg = Config {
            damping: 1.0,
            ..Config::default()
        };
        let start: Ranks = [(Page::from("a"), 1.0)].into_iter().collect();
        let res = IteratedPageRank::new(&c, &cfg).unwrap().calc(&start);
        assert!(
            matches!(res, Err(Error::NotConverged { iterations: 10_000, .. })),
            "{res:?}"
        );
    }

    #[test]
    fn rejects_bad_config() {
        let c = corpus(&[("a", &[])]);
        let cfg = Config {
            epsilon: 0.0,
            ..Config::default()
        };
        assert!(matches!(
            IteratedPageRank::new(&c, &cfg),
            Err(Error::InvalidTolerance(_))
        ));
        assert!(matches!(
            iterate_rank(&c, -0.5),
            Err(Error::InvalidDamping(_))
        ));
    }

    #[quickcheck]
    fn sums_to_one(c: RandomCorpus, damping: Damping) {
        let c = c.corpus();
        let cfg = Config {
            damping: damping.0,
            ..Config::default()
        };
        let res = IteratedPageRank::new(&c, &cfg)
            .unwrap()
            .calc(&uniform(&c))
            .unwrap();
        assert_eq!(res.page_rank.len(), c.len());
        assert!(res.page_rank.values().all(|w| *w > 0.0));
        let sum: f64 = res.page_rank.values().sum();
        assert!((sum - 1.0).abs() < 1e-9, "sum={sum}: {:?}", res.debug());
    }
}
