use crate::{Corpus, Error, Page, Result};
use algograph::graph::VertexId;
use std::{collections::HashMap, hash::Hash};

/// A rank value for every page of a corpus.
pub type Ranks = HashMap<Page, f64, ahash::RandomState>;

pub fn norm_1<K: Eq + Hash>(v: &HashMap<K, f64, ahash::RandomState>) -> f64 {
    v.values().map(|x| x.abs()).sum()
}

pub fn norm_inf<K: Eq + Hash>(v: &HashMap<K, f64, ahash::RandomState>) -> f64 {
    v.values().map(|x| x.abs()).fold(0.0, f64::max)
}

/// `1/N` for every page.
pub fn uniform(corpus: &Corpus) -> Ranks {
    let n = corpus.len() as f64;
    corpus.pages().iter().map(|p| (p.clone(), 1.0 / n)).collect()
}

pub(crate) fn check_damping(damping: f64) -> Result<()> {
    if (0.0..=1.0).contains(&damping) {
        Ok(())
    } else {
        Err(Error::InvalidDamping(damping))
    }
}

/// Resolves a page-keyed start distribution onto the corpus's vertices.
/// Pages absent from `start` get 0.
pub(crate) fn start_vector(
    corpus: &Corpus,
    start: &Ranks,
) -> Result<HashMap<VertexId, f64, ahash::RandomState>> {
    let mut p: HashMap<_, _, ahash::RandomState> =
        corpus.vertices().iter().map(|v| (*v, 0.0)).collect();
    for (page, w) in start.iter() {
        let v = corpus.vertex(page.as_str())?;
        p.insert(v, *w);
    }
    let sum = norm_1(&p);
    if start.values().any(|w| !(*w >= 0.0)) || (sum - 1.0).abs() >= 1e-7 {
        return Err(Error::InvalidStart { sum });
    }
    Ok(p)
}

pub(crate) fn to_ranks(corpus: &Corpus, p: &HashMap<VertexId, f64, ahash::RandomState>) -> Ranks {
    corpus
        .vertices()
        .iter()
        .map(|v| (corpus.page(*v).clone(), *p.get(v).unwrap()))
        .collect()
}
