//! Reduction engine: iterative adjacent-weight combination passes
//!
//! Each pass buckets the current terms by Hamming weight, combines every
//! cross pair of adjacent buckets that differs in exactly one concrete
//! position, and promotes terms that failed to combine into the prime
//! accumulator. Combined terms are deduplicated by pattern and become the
//! next pass's input. The accumulator is threaded through the whole loop so
//! primes emerging at intermediate levels survive to the final return.

use std::collections::HashSet;

use tracing::{debug, trace};

use super::table::TermTable;
use super::term::{BitState, Term, TermKind};
use crate::error::Error;

/// The complete set of prime implicants covering the ON-set of `terms`.
///
/// Pure-DC terms (covering no ON minterm) are discarded the moment they fail
/// to combine; they never reach the result.
pub fn prime_implicants(terms: Vec<Term>, width: usize) -> Result<Vec<Term>, Error> {
    for term in &terms {
        if term.pattern.len() != width {
            return Err(Error::InternalInvariant {
                detail: format!(
                    "term {} has width {}, expected {}",
                    term.pattern_string(),
                    term.pattern.len(),
                    width
                ),
            });
        }
    }

    let mut accumulator: Vec<Term> = Vec::new();
    let mut current = terms;
    let mut level = 0usize;

    loop {
        // Each pass introduces a dash into every surviving term, so the
        // level count can never exceed the pattern width.
        if level > width {
            return Err(Error::InternalInvariant {
                detail: format!("reduction did not terminate after {} passes", level),
            });
        }

        let table = TermTable::index(current, width);
        let groups = table.group_count();
        debug!(level, groups, primes = accumulator.len(), "reduction pass");

        if groups <= 1 {
            for term in table.into_terms() {
                promote(&mut accumulator, term);
            }
            debug!(primes = accumulator.len(), "reduction complete");
            return Ok(accumulator);
        }

        let (combined, used) = combine_adjacent_buckets(&table);

        for weight in 0..table.bucket_count() {
            for (i, term) in table.bucket(weight).iter().enumerate() {
                if !used[weight][i] {
                    promote(&mut accumulator, term.clone());
                }
            }
        }

        current = dedup_by_pattern(combined);
        level += 1;
    }
}

/// One inductive step: every (bucket k, bucket k+1) cross pair, ascending k.
/// Returns the emitted children and the per-bucket used flags.
fn combine_adjacent_buckets(table: &TermTable) -> (Vec<Term>, Vec<Vec<bool>>) {
    let mut used: Vec<Vec<bool>> = (0..table.bucket_count())
        .map(|w| vec![false; table.bucket(w).len()])
        .collect();
    let mut combined = Vec::new();

    for k in 0..table.bucket_count() - 1 {
        let lower = table.bucket(k);
        let upper = table.bucket(k + 1);

        for (i, term_one) in lower.iter().enumerate() {
            for (j, term_two) in upper.iter().enumerate() {
                if let Some(child) = term_one.combine(term_two) {
                    used[k][i] = true;
                    used[k + 1][j] = true;
                    trace!(
                        one = %term_one.pattern_string(),
                        two = %term_two.pattern_string(),
                        child = %child.pattern_string(),
                        "combined"
                    );
                    combined.push(child);
                }
            }
        }
    }

    (combined, used)
}

/// Admit a term that failed to combine. Only terms covering at least one ON
/// minterm become primes; pure-DC terms are dropped here.
fn promote(accumulator: &mut Vec<Term>, term: Term) {
    match term.kind {
        TermKind::On => {
            trace!(pattern = %term.pattern_string(), covers = ?term.covers, "prime");
            accumulator.push(term);
        }
        TermKind::DontCare => {
            trace!(pattern = %term.pattern_string(), "dropping pure-DC term");
        }
    }
}

/// Keep the first occurrence of each pattern. Covers and kind are not part of
/// the identity: two terms with the same pattern are the same implicant.
fn dedup_by_pattern(terms: Vec<Term>) -> Vec<Term> {
    let mut seen: HashSet<Vec<BitState>> = HashSet::with_capacity(terms.len());
    terms
        .into_iter()
        .filter(|term| seen.insert(term.pattern.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn on_terms(indices: &[u64], variables: usize) -> Vec<Term> {
        indices
            .iter()
            .map(|&i| Term::from_minterm(i, variables, TermKind::On))
            .collect()
    }

    fn patterns(terms: &[Term]) -> Vec<String> {
        let mut p: Vec<String> = terms.iter().map(Term::pattern_string).collect();
        p.sort();
        p
    }

    #[test]
    fn single_minterm_is_its_own_prime() {
        let primes = prime_implicants(on_terms(&[0], 2), 2).unwrap();
        assert_eq!(patterns(&primes), vec!["00"]);
        assert_eq!(primes[0].covers, vec![0]);
    }

    #[test]
    fn full_on_set_collapses_to_all_dashes() {
        let primes = prime_implicants(on_terms(&[0, 1, 2, 3], 2), 2).unwrap();
        assert_eq!(patterns(&primes), vec!["--"]);
        assert_eq!(primes[0].covers, vec![0, 1, 2, 3]);
    }

    #[test]
    fn pure_dc_terms_never_surface() {
        let terms: Vec<Term> = (0..4)
            .map(|i| Term::from_minterm(i, 2, TermKind::DontCare))
            .collect();
        let primes = prime_implicants(terms, 2).unwrap();
        assert!(primes.is_empty());
    }

    #[test]
    fn empty_input_yields_no_primes() {
        let primes = prime_implicants(Vec::new(), 3).unwrap();
        assert!(primes.is_empty());
    }

    #[test]
    fn intermediate_level_primes_survive() {
        // -100 becomes prime at level 1 while reduction continues to level 2.
        let mut terms = on_terms(&[4, 8, 10, 11, 12, 15], 4);
        terms.extend([
            Term::from_minterm(9, 4, TermKind::DontCare),
            Term::from_minterm(14, 4, TermKind::DontCare),
        ]);
        terms.sort_by_key(|t| t.covers[0]);

        let primes = prime_implicants(terms, 4).unwrap();
        assert_eq!(patterns(&primes), vec!["-100", "10--", "1--0", "1-1-"]);
    }

    #[test]
    fn duplicate_children_are_merged_by_pattern() {
        // 10-- is produced by both (100-, 101-) and (10-0, 10-1); only one
        // copy may reach the result.
        let primes = prime_implicants(on_terms(&[8, 9, 10, 11], 4), 4).unwrap();
        assert_eq!(patterns(&primes), vec!["10--"]);
    }

    #[test]
    fn width_mismatch_is_an_internal_error() {
        let terms = on_terms(&[1], 3);
        let result = prime_implicants(terms, 4);
        assert!(matches!(result, Err(Error::InternalInvariant { .. })));
    }
}
