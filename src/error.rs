use crate::Page;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("corpus contains no pages")]
    EmptyCorpus,

    #[error("page not in corpus: {0}")]
    UnknownPage(Page),

    #[error("page links to itself: {0}")]
    SelfLink(Page),

    #[error("damping factor must lie in [0, 1], got {0}")]
    InvalidDamping(f64),

    #[error("convergence tolerance must be positive, got {0}")]
    InvalidTolerance(f64),

    #[error("sample count must be positive")]
    NoSamples,

    /// The start distribution does not sum to 1.
    #[error("start distribution sums to {sum}, expected 1")]
    InvalidStart { sum: f64 },

    /// The iteration cap was hit while some page still moved by at least the
    /// tolerance.
    #[error("did not converge after {iterations} iterations (max delta {max_delta})")]
    NotConverged { iterations: usize, max_delta: f64 },

    #[error("invalid sampling weights: {0}")]
    Weights(#[from] rand::distr::weighted::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("cannot list corpus directory: {0}")]
    Walk(#[from] walkdir::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
