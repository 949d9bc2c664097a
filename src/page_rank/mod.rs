pub mod iterated;
pub use self::iterated::{iterate_rank, IteratedPageRank};
pub mod sampled;
pub use self::sampled::{sample_rank, SampledPageRank};
pub mod transition;
pub use self::transition::transition;
mod traits;
pub use self::traits::*;
