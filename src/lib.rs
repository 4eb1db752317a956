//! qmc
//!
//! Quine-McCluskey two-level Boolean minimization. Given a function of n
//! input variables as a truth table or as ON-set / DC-set minterm index
//! lists, produces the complete set of prime implicants covering the ON-set
//! while exploiting the DC-set. Cover selection (Petrick's method, essential
//! prime extraction) is out of scope: the prime-implicant set is the result.

pub mod error;   // Error surface shared by every stage
pub mod input;   // Truth-table and sum-of-products canonicalization
pub mod output;  // Output placement and report rendering
pub mod qm;      // Reduction engine

// Re-export the main types
pub use error::Error;
pub use input::{OutputValue, TruthRow, TruthTable};
pub use qm::{BitState, MinimizeResult, Minimizer, Term, TermKind};

/// Convenience function to compute the prime implicants of a Boolean
/// function (up to 64 variables).
pub fn minimize(
    minterms: &[u64],
    dont_cares: Option<&[u64]>,
    variables: usize,
) -> Result<MinimizeResult, Error> {
    let mut minimizer = Minimizer::new(variables);
    minimizer.set_minterms(minterms);
    if let Some(dc) = dont_cares {
        minimizer.set_dont_cares(dc);
    }
    minimizer.solve()
}
