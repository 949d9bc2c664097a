mod common;
pub use self::common::*;
mod corpus;
pub use self::corpus::{Corpus, Page};
mod error;
pub use self::error::{Error, Result};

pub mod crawl;
pub use self::crawl::crawl;
pub mod page_rank;
pub mod report;
pub use self::report::Report;

#[cfg(test)]
mod arbitrary;
