use crate::{Ranks, Result};

pub trait PageRank {
    type Result: PageRankResult;

    /// Runs the estimator from a start distribution over the corpus's pages.
    fn calc(&self, start: &Ranks) -> Result<Self::Result>;
}

pub trait PageRankResult {
    fn page_rank(&self) -> &Ranks;
    fn debug(&self) -> impl std::fmt::Debug + '_;
}
