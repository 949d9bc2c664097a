//! Loads a corpus from a directory of HTML documents.

use crate::{Corpus, Page, Result};
use regex::Regex;
use std::{
    collections::{BTreeMap, BTreeSet},
    fs,
    path::Path,
    sync::LazyLock,
};
use tracing::{debug, instrument};
use walkdir::WalkDir;

static HREF: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"<a\s+(?:[^>]*?)href="([^"]*)""#).expect("Invalid regex"));

/// Builds a corpus from the `.html` files directly inside `dir`.
///
/// Each file becomes a page named after its file name. Links to the page
/// itself and to files outside the directory are dropped.
#[instrument(skip_all, fields(dir = %dir.as_ref().display()))]
pub fn crawl(dir: impl AsRef<Path>) -> Result<Corpus> {
    let mut pages: BTreeMap<Page, BTreeSet<Page>> = BTreeMap::new();
    for entry in WalkDir::new(dir.as_ref()).min_depth(1).max_depth(1) {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }
        let Some(name) = entry.file_name().to_str() else {
            continue;
        };
        if !name.ends_with(".html") {
            continue;
        }
        let contents = fs::read_to_string(entry.path())?;
        let page = Page::from(name);
        let links = extract_links(&contents)
            .filter(|link| *link != name)
            .map(Page::from)
            .collect();
        pages.insert(page, links);
    }

    let known: BTreeSet<Page> = pages.keys().cloned().collect();
    for links in pages.values_mut() {
        links.retain(|link| known.contains(link));
    }
    debug!(
        pages = pages.len(),
        links = pages.values().map(|ls| ls.len()).sum::<usize>(),
        "corpus loaded"
    );
    Corpus::new(pages)
}

/// Targets of every `<a href="...">` in `contents`.
pub fn extract_links(contents: &str) -> impl Iterator<Item = &str> {
    HREF.captures_iter(contents)
        .filter_map(|cap| cap.get(1))
        .map(|m| m.as_str())
}
