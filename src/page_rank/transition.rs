use crate::*;
use algograph::graph::VertexId;
use std::collections::HashSet;

/// Probability distribution over the page visited after `page`.
///
/// With probability `damping` the surfer follows one of `page`'s links, chosen
/// uniformly; otherwise it jumps to any page of the corpus. A page without
/// links always jumps, whatever the damping.
pub fn transition(corpus: &Corpus, page: &str, damping: f64) -> Result<Ranks> {
    check_damping(damping)?;
    let u = corpus.vertex(page)?;
    let weights = weights(corpus, u, damping);
    Ok(corpus.pages().iter().cloned().zip(weights).collect())
}

/// Transition probabilities out of `u`, aligned with [`Corpus::pages`].
pub(crate) fn weights(corpus: &Corpus, u: VertexId, damping: f64) -> Vec<f64> {
    let n = corpus.len();
    let links: HashSet<VertexId, ahash::RandomState> = corpus.successors(u).collect();
    if links.is_empty() {
        return vec![1.0 / n as f64; n];
    }
    let jump = (1.0 - damping) / n as f64;
    let follow = damping / links.len() as f64;
    corpus
        .vertices()
        .iter()
        .map(|v| {
            if links.contains(v) {
                jump + follow
            } else {
                jump
            }
        })
        .collect()
}
