//! Rendered-page cache with path revalidation
//!
//! Pages register their rendered HTML under their path. A mutation that
//! changes what a page shows calls [`Revalidator::revalidate_path`], and the
//! next request for that path renders from the store again.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

/// Signal that a path's cached representation is stale
///
/// Best effort and synchronous: implementations must not fail the caller.
pub trait Revalidator: Send + Sync {
    fn revalidate_path(&self, path: &str);
}

/// In-process cache of rendered pages keyed by path
///
/// Every path carries a generation that [`Revalidator::revalidate_path`]
/// bumps. A render only lands in the cache if no revalidation happened
/// since it started, so a slow read cannot store rows older than the last
/// mutation.
#[derive(Clone, Default)]
pub struct PageCache {
    pages: Arc<RwLock<Pages>>,
}

#[derive(Default)]
struct Pages {
    html: HashMap<String, String>,
    generations: HashMap<String, u64>,
}

impl Pages {
    fn generation(&self, path: &str) -> u64 {
        self.generations.get(path).copied().unwrap_or(0)
    }
}

impl PageCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cached render of `path`, if still fresh
    pub fn get(&self, path: &str) -> Option<String> {
        match self.pages.read() {
            Ok(pages) => pages.html.get(path).cloned(),
            Err(e) => {
                tracing::warn!(path, error = %e, "page cache lock poisoned, bypassing");
                None
            }
        }
    }

    /// Current generation of `path`; read it before fetching the page data
    pub fn generation(&self, path: &str) -> u64 {
        match self.pages.read() {
            Ok(pages) => pages.generation(path),
            Err(e) => {
                tracing::warn!(path, error = %e, "page cache lock poisoned");
                0
            }
        }
    }

    /// Cache `html` unless `path` was revalidated after `generation` was read
    ///
    /// Returns whether the page was stored.
    pub fn insert_if_fresh(&self, path: &str, generation: u64, html: String) -> bool {
        match self.pages.write() {
            Ok(mut pages) => {
                if pages.generation(path) != generation {
                    tracing::debug!(path, generation, "render outdated by revalidation");
                    return false;
                }
                pages.html.insert(path.to_string(), html);
                true
            }
            Err(e) => {
                tracing::warn!(path, error = %e, "page cache lock poisoned, not caching");
                false
            }
        }
    }

    pub fn contains(&self, path: &str) -> bool {
        self.get(path).is_some()
    }
}

impl Revalidator for PageCache {
    fn revalidate_path(&self, path: &str) {
        match self.pages.write() {
            Ok(mut pages) => {
                *pages.generations.entry(path.to_string()).or_insert(0) += 1;
                if pages.html.remove(path).is_some() {
                    tracing::debug!(path, "revalidated cached page");
                }
            }
            Err(e) => tracing::warn!(path, error = %e, "page cache lock poisoned"),
        }
    }
}
