use crate::{Error, Result};
use algograph::graph::*;
use std::{
    borrow::Borrow,
    collections::{BTreeMap, BTreeSet, HashMap},
    fmt,
};

/// Identifier of a page, typically the file name of a document.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Page(String);

impl Page {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Page {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for Page {
    fn from(name: String) -> Self {
        Self(name)
    }
}

impl Borrow<str> for Page {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// An immutable, closed hyperlink graph.
///
/// Every link target is a page of the corpus and no page links to itself.
/// Pages are kept in lexicographic order, which fixes the iteration order
/// of every algorithm running over the corpus.
pub struct Corpus {
    graph: directed::TreeBackedGraph,
    pages: Vec<Page>,
    vertices: Vec<VertexId>,
    positions: HashMap<VertexId, usize, ahash::RandomState>,
    lookup: HashMap<Page, VertexId, ahash::RandomState>,
}

impl Corpus {
    /// Builds a corpus from each page's outbound links.
    ///
    /// A page listed more than once gets the union of its links. Fails on an
    /// empty input, a link to a page that is not a key, or a self-link.
    pub fn new<I, L>(links: I) -> Result<Self>
    where
        I: IntoIterator<Item = (Page, L)>,
        L: IntoIterator<Item = Page>,
    {
        let links = links.into_iter().fold(
            BTreeMap::<Page, BTreeSet<Page>>::new(),
            |mut acc, (page, targets)| {
                acc.entry(page).or_default().extend(targets);
                acc
            },
        );
        if links.is_empty() {
            return Err(Error::EmptyCorpus);
        }

        let mut graph = directed::TreeBackedGraph::new();
        let pages: Vec<Page> = links.keys().cloned().collect();
        let vertices: Vec<VertexId> = pages.iter().map(|_| graph.add_vertex()).collect();
        let positions = vertices
            .iter()
            .enumerate()
            .map(|(i, v)| (*v, i))
            .collect();
        let lookup: HashMap<_, _, ahash::RandomState> = pages
            .iter()
            .cloned()
            .zip(vertices.iter().copied())
            .collect();

        for (page, targets) in links.iter() {
            let u = lookup[page];
            for target in targets.iter() {
                if target == page {
                    return Err(Error::SelfLink(page.clone()));
                }
                let v = lookup
                    .get(target)
                    .ok_or_else(|| Error::UnknownPage(target.clone()))?;
                graph.add_edge(u, *v);
            }
        }

        Ok(Self {
            graph,
            pages,
            vertices,
            positions,
            lookup,
        })
    }

    pub fn len(&self) -> usize {
        self.pages.len()
    }

    /// Always `false`: a corpus holds at least one page.
    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    /// All pages, in lexicographic order.
    pub fn pages(&self) -> &[Page] {
        &self.pages
    }

    pub fn contains(&self, page: &str) -> bool {
        self.lookup.contains_key(page)
    }

    /// Pages `page` links to, in lexicographic order.
    pub fn links(&self, page: &str) -> Result<Vec<&Page>> {
        let u = self.vertex(page)?;
        let mut res: Vec<_> = self.successors(u).map(|v| self.page(v)).collect();
        res.sort();
        Ok(res)
    }

    pub fn link_count(&self) -> usize {
        self.graph.edge_size()
    }

    pub(crate) fn vertex(&self, page: &str) -> Result<VertexId> {
        self.lookup
            .get(page)
            .copied()
            .ok_or_else(|| Error::UnknownPage(Page::new(page)))
    }

    /// Vertices in the same order as [`Corpus::pages`].
    pub(crate) fn vertices(&self) -> &[VertexId] {
        &self.vertices
    }

    pub(crate) fn page(&self, v: VertexId) -> &Page {
        &self.pages[self.position(v)]
    }

    pub(crate) fn position(&self, v: VertexId) -> usize {
        *self.positions.get(&v).unwrap()
    }

    pub(crate) fn successors(&self, u: VertexId) -> impl Iterator<Item = VertexId> + '_ {
        self.graph.out_edges(&u).map(|e| e.sink)
    }

    pub(crate) fn predecessors(&self, v: VertexId) -> impl Iterator<Item = VertexId> + '_ {
        self.graph.in_edges(&v).map(|e| e.source)
    }

    pub(crate) fn out_degree(&self, u: VertexId) -> usize {
        self.graph.out_edges(&u).count()
    }
}

impl fmt::Debug for Corpus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut m = f.debug_map();
        for (page, v) in self.pages.iter().zip(self.vertices.iter()) {
            let mut links: Vec<_> = self.successors(*v).map(|s| self.page(s)).collect();
            links.sort();
            m.entry(page, &links);
        }
        m.finish()
    }
}
