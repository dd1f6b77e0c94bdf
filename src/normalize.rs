//! Typo correction, normalization and ingestion-time deduplication

use std::collections::HashSet;
use std::sync::Arc;

use crate::catalog::Catalog;
use crate::types::NormalizedAddress;

/// Canonicalizes raw addresses: trim, lower-case, fix known domain typos.
///
/// Ingestion and classification share this type so both see the same
/// canonical form of an address.
#[derive(Debug, Clone)]
pub struct Normalizer {
    catalog: Arc<Catalog>,
}

impl Default for Normalizer {
    fn default() -> Self {
        Self::new(Catalog::builtin())
    }
}

impl Normalizer {
    #[must_use]
    pub const fn new(catalog: Arc<Catalog>) -> Self {
        Self { catalog }
    }

    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Rewrite a misspelled domain to its canonical form. Unknown domains
    /// come back lower-cased but otherwise untouched.
    #[must_use]
    pub fn correct_domain(&self, domain: &str) -> String {
        self.catalog
            .correction(domain)
            .map_or_else(|| domain.to_lowercase(), str::to_string)
    }

    /// Split an already cleaned address on its first `@` and correct the
    /// domain. Returns `None` when there is no `@`.
    #[must_use]
    pub fn split(&self, cleaned: &str) -> Option<NormalizedAddress> {
        let (local, domain) = cleaned.split_once('@')?;
        Some(NormalizedAddress::from_parts(
            local.to_string(),
            self.correct_domain(domain),
        ))
    }

    /// Full canonical string for `raw`. Idempotent.
    #[must_use]
    pub fn normalize(&self, raw: &str) -> String {
        let cleaned = clean(raw);
        self.split(&cleaned)
            .map_or(cleaned, |address| address.to_string())
    }
}

/// Trim surrounding whitespace and lower-case
#[must_use]
pub fn clean(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// Collapses repeated addresses by their canonical form, keeping the first
/// occurrence in input order.
#[derive(Debug, Clone, Default)]
pub struct Deduplicator {
    normalizer: Normalizer,
    seen: HashSet<String>,
    ordered: Vec<String>,
}

impl Deduplicator {
    #[must_use]
    pub fn new(normalizer: Normalizer) -> Self {
        Self {
            normalizer,
            seen: HashSet::new(),
            ordered: Vec::new(),
        }
    }

    /// Offer one raw token. Returns `true` if it was new.
    pub fn push(&mut self, token: &str) -> bool {
        let canonical = self.normalizer.normalize(token);
        if self.seen.contains(&canonical) {
            return false;
        }
        self.seen.insert(canonical.clone());
        self.ordered.push(canonical);
        true
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.ordered.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ordered.is_empty()
    }

    /// Unique canonical addresses in first-seen order
    #[must_use]
    pub fn into_addresses(self) -> Vec<String> {
        self.ordered
    }
}

impl<'a> Extend<&'a str> for Deduplicator {
    fn extend<I: IntoIterator<Item = &'a str>>(&mut self, iter: I) {
        for token in iter {
            self.push(token);
        }
    }
}
