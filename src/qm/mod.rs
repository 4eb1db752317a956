// Quine-McCluskey prime-implicant engine
//
// Terms are grouped by Hamming weight, adjacent groups are combined into
// higher-order implicants across successive passes, and implicants that fail
// to combine accumulate as the prime-implicant result.

pub mod reduce;    // Reduction passes, dedup, prime accumulator
pub mod solver;    // Minimizer orchestration and report formatting
pub mod table;     // Weight-bucketed term table
pub mod term;      // Trivalent patterns and indexed terms

// Re-export main types for convenience
pub use reduce::prime_implicants;
pub use solver::{MAX_VARIABLES, MinimizeReport, MinimizeResult, Minimizer};
pub use table::TermTable;
pub use term::{BitState, Term, TermKind};
