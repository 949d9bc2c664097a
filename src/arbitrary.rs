use crate::{Corpus, Page};
use quickcheck::{Arbitrary, Gen};

#[derive(Debug, Clone)]
pub struct RandomCorpus {
    pub links: Vec<(Page, Vec<Page>)>,
}

impl RandomCorpus {
    pub fn corpus(&self) -> Corpus {
        Corpus::new(self.links.clone()).unwrap()
    }
}

impl Arbitrary for RandomCorpus {
    fn arbitrary(g: &mut Gen) -> Self {
        const N: usize = 12;

        let n = 1 + usize::arbitrary(g) % N;
        let pages: Vec<_> = (0..n).map(|i| Page::new(format!("{i}.html"))).collect();
        let links = pages
            .iter()
            .map(|u| {
                let targets = pages
                    .iter()
                    .filter(|v| *v != u && u8::arbitrary(g) % 3 == 0)
                    .cloned()
                    .collect();
                (u.clone(), targets)
            })
            .collect();
        Self { links }
    }
}

/// Damping factor strictly inside (0, 1).
#[derive(Debug, Clone, Copy)]
pub struct Damping(pub f64);

impl Arbitrary for Damping {
    fn arbitrary(g: &mut Gen) -> Self {
        Self(f64::from(u16::arbitrary(g) % 999 + 1) / 1000.0)
    }
}
