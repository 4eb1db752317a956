//! Minimizer: orchestration and result formatting

use serde::Serialize;
use tracing::debug;

use super::reduce;
use super::term::{BitState, Term, TermKind};
use crate::error::Error;

/// Largest supported function domain: minterm indices are stored in u64.
pub const MAX_VARIABLES: usize = 64;

/// High-level entry point for prime-implicant generation.
pub struct Minimizer {
    variables: usize,
    minterms: Vec<u64>,
    dont_cares: Vec<u64>,
    variable_names: Vec<String>,
}

impl Minimizer {
    pub fn new(variables: usize) -> Self {
        let variable_names = (0..variables)
            .map(|i| {
                if i < 26 {
                    ((b'A' + i as u8) as char).to_string()
                } else {
                    format!("V{}", i)
                }
            })
            .collect();

        Self {
            variables,
            minterms: Vec::new(),
            dont_cares: Vec::new(),
            variable_names,
        }
    }

    pub fn with_variable_names(variables: usize, names: Vec<String>) -> Result<Self, Error> {
        if names.len() != variables {
            return Err(Error::LabelCountMismatch {
                labels: names.len(),
                variables,
            });
        }
        let mut minimizer = Self::new(variables);
        minimizer.variable_names = names;
        Ok(minimizer)
    }

    pub fn set_minterms(&mut self, minterms: &[u64]) {
        self.minterms = minterms.to_vec();
        self.minterms.sort_unstable();
        self.minterms.dedup();
    }

    pub fn set_dont_cares(&mut self, dont_cares: &[u64]) {
        self.dont_cares = dont_cares.to_vec();
        self.dont_cares.sort_unstable();
        self.dont_cares.dedup();
    }

    /// Run the reduction and return the complete prime-implicant set.
    pub fn solve(&self) -> Result<MinimizeResult, Error> {
        self.validate()?;

        debug!(
            variables = self.variables,
            on = self.minterms.len(),
            dc = self.dont_cares.len(),
            "minimizing"
        );

        // Merge the sorted ON and DC streams into level-0 terms, ascending
        // by index. Rows with output 0 never become terms.
        let mut terms: Vec<Term> = Vec::with_capacity(self.minterms.len() + self.dont_cares.len());
        let mut on = self.minterms.iter().peekable();
        let mut dc = self.dont_cares.iter().peekable();
        loop {
            match (on.peek(), dc.peek()) {
                (Some(&&m), Some(&&d)) => {
                    if m < d {
                        terms.push(Term::from_minterm(m, self.variables, TermKind::On));
                        on.next();
                    } else {
                        terms.push(Term::from_minterm(d, self.variables, TermKind::DontCare));
                        dc.next();
                    }
                }
                (Some(&&m), None) => {
                    terms.push(Term::from_minterm(m, self.variables, TermKind::On));
                    on.next();
                }
                (None, Some(&&d)) => {
                    terms.push(Term::from_minterm(d, self.variables, TermKind::DontCare));
                    dc.next();
                }
                (None, None) => break,
            }
        }

        let prime_implicants = reduce::prime_implicants(terms, self.variables)?;

        Ok(MinimizeResult {
            variables: self.variables,
            variable_names: self.variable_names.clone(),
            minterms: self.minterms.clone(),
            dont_cares: self.dont_cares.clone(),
            prime_implicants,
        })
    }

    fn validate(&self) -> Result<(), Error> {
        if self.variables == 0 || self.variables > MAX_VARIABLES {
            return Err(Error::TooManyVariables {
                variables: self.variables,
            });
        }

        for &index in self.minterms.iter().chain(&self.dont_cares) {
            if self.variables < 64 && index >= (1u64 << self.variables) {
                return Err(Error::IndexOutOfRange {
                    index,
                    variables: self.variables,
                });
            }
        }

        // Both lists are sorted; a shared element means an overlap.
        for &index in &self.dont_cares {
            if self.minterms.binary_search(&index).is_ok() {
                return Err(Error::IndexOverlap { index });
            }
        }

        Ok(())
    }
}

/// The outcome of one minimization: the prime-implicant set plus everything
/// needed to format it.
#[derive(Debug, Clone)]
pub struct MinimizeResult {
    pub variables: usize,
    pub variable_names: Vec<String>,
    pub minterms: Vec<u64>,
    pub dont_cares: Vec<u64>,
    pub prime_implicants: Vec<Term>,
}

/// Serializable report for the JSON output format.
#[derive(Debug, Serialize)]
pub struct MinimizeReport {
    pub variables: usize,
    pub minterms: Vec<u64>,
    pub dont_cares: Vec<u64>,
    pub prime_implicants: Vec<String>,
    pub product_terms: Vec<String>,
    pub expression: String,
}

impl MinimizeResult {
    /// Patterns as `01-` strings, in emission order.
    pub fn pattern_strings(&self) -> Vec<String> {
        self.prime_implicants.iter().map(Term::pattern_string).collect()
    }

    /// One product term per prime, in the `AB'C` style.
    pub fn product_terms(&self) -> Vec<String> {
        self.prime_implicants
            .iter()
            .map(|term| self.format_product_term(term))
            .collect()
    }

    /// Sum of all prime product terms. Empty result renders as `0`.
    pub fn expression(&self) -> String {
        if self.prime_implicants.is_empty() {
            return "0".to_string();
        }
        self.product_terms().join(" + ")
    }

    pub fn to_report(&self) -> MinimizeReport {
        MinimizeReport {
            variables: self.variables,
            minterms: self.minterms.clone(),
            dont_cares: self.dont_cares.clone(),
            prime_implicants: self.pattern_strings(),
            product_terms: self.product_terms(),
            expression: self.expression(),
        }
    }

    fn format_product_term(&self, term: &Term) -> String {
        let mut result = String::new();
        for i in 0..self.variables {
            match term.pattern[i] {
                BitState::Zero => {
                    result.push_str(&self.variable_names[i]);
                    result.push('\'');
                }
                BitState::One => result.push_str(&self.variable_names[i]),
                BitState::DontCare => {}
            }
        }
        if result.is_empty() {
            // All positions are dashes: the constant-true implicant.
            "1".to_string()
        } else {
            result
        }
    }
}
