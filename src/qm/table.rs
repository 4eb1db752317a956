//! TermTable: terms grouped by pattern Hamming weight
//!
//! Grouping by weight is what makes the reduction pass cheap: only terms in
//! adjacent weight buckets can differ in exactly one concrete position.

use super::term::Term;

/// Terms bucketed by Hamming weight. A table built for width m holds m + 1
/// buckets; empty buckets are permitted and skipped by the pass.
#[derive(Debug, Clone)]
pub struct TermTable {
    buckets: Vec<Vec<Term>>,
}

impl TermTable {
    /// Bucket `terms` by weight over a pattern of `width` positions.
    pub fn index(terms: Vec<Term>, width: usize) -> Self {
        let mut buckets = vec![Vec::new(); width + 1];
        for term in terms {
            let weight = term.weight();
            buckets[weight].push(term);
        }
        Self { buckets }
    }

    /// Number of non-empty buckets.
    pub fn group_count(&self) -> usize {
        self.buckets.iter().filter(|b| !b.is_empty()).count()
    }

    pub fn bucket(&self, weight: usize) -> &[Term] {
        &self.buckets[weight]
    }

    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    /// All terms in ascending weight order, stored order within a bucket.
    pub fn into_terms(self) -> Vec<Term> {
        self.buckets.into_iter().flatten().collect()
    }
}
