use crate::Ranks;
use std::fmt;

/// A titled listing of ranks, one page per line in lexicographic order.
pub struct Report<'a> {
    title: &'a str,
    ranks: &'a Ranks,
}

impl<'a> Report<'a> {
    pub fn new(title: &'a str, ranks: &'a Ranks) -> Self {
        Self { title, ranks }
    }
}

impl fmt::Display for Report<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.title)?;
        let mut rows: Vec<_> = self.ranks.iter().collect();
        rows.sort_by(|a, b| a.0.cmp(b.0));
        for (page, rank) in rows {
            writeln!(f, "  {page}: {rank:.4}")?;
        }
        Ok(())
    }
}
