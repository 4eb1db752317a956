//! Sum-of-products ingestion: ON-set and DC-set minterm index lists

use regex::Regex;
use tracing::{debug, warn};

use super::{OutputValue, TruthTable, fill_gaps};
use crate::error::Error;
use crate::qm::MAX_VARIABLES;

/// Canonicalize an ON-set index list plus an optional DC-set index list into
/// a fully populated truth table.
///
/// When `variables` is not supplied the width is inferred from the largest
/// index; callers wanting a wider domain must pass it explicitly.
pub fn canonicalize_lists(
    minterms: &str,
    dont_cares: Option<&str>,
    variables: Option<usize>,
) -> Result<TruthTable, Error> {
    let on = parse_index_list(minterms, "minterm")?;
    let dc = match dont_cares {
        Some(input) => parse_index_list(input, "don't care")?,
        None => Vec::new(),
    };

    for &index in &dc {
        if on.binary_search(&index).is_ok() {
            return Err(Error::IndexOverlap { index });
        }
    }

    let highest = on
        .last()
        .copied()
        .into_iter()
        .chain(dc.last().copied())
        .max()
        .unwrap_or(0);

    let variables = match variables {
        Some(n) => {
            if n == 0 || n > MAX_VARIABLES {
                return Err(Error::TooManyVariables { variables: n });
            }
            for &index in on.iter().chain(&dc) {
                if n < 64 && index >= (1u64 << n) {
                    return Err(Error::IndexOutOfRange { index, variables: n });
                }
            }
            n
        }
        None => bit_length(highest).max(1),
    };

    debug!(
        on = on.len(),
        dc = dc.len(),
        variables,
        "canonicalized sum-of-products input"
    );

    // Merge the two sorted streams ascending by index.
    let mut entries = Vec::with_capacity(on.len() + dc.len());
    let mut on_iter = on.into_iter().peekable();
    let mut dc_iter = dc.into_iter().peekable();
    loop {
        let entry = match (on_iter.peek(), dc_iter.peek()) {
            (Some(&m), Some(&d)) => {
                if m < d {
                    (on_iter.next().unwrap(), OutputValue::One)
                } else {
                    (dc_iter.next().unwrap(), OutputValue::DontCare)
                }
            }
            (Some(_), None) => (on_iter.next().unwrap(), OutputValue::One),
            (None, Some(_)) => (dc_iter.next().unwrap(), OutputValue::DontCare),
            (None, None) => break,
        };
        entries.push(entry);
    }

    Ok(TruthTable {
        variables,
        rows: fill_gaps(&entries, variables),
    })
}

/// Split on anything that is not a digit or a hyphen, drop empties, parse,
/// reject negatives, and return the indices sorted and deduplicated.
fn parse_index_list(input: &str, list: &'static str) -> Result<Vec<u64>, Error> {
    let splitter = Regex::new(r"[^0-9-]")?;

    let mut values = Vec::new();
    for token in splitter.split(input).filter(|t| !t.is_empty()) {
        match token.parse::<i64>() {
            Ok(value) if value < 0 => return Err(Error::NegativeIndex { value }),
            Ok(value) => values.push(value as u64),
            // Tokens like `1-2` keep their hyphen and fail the parse.
            Err(_) => warn!(token, "skipping unparseable index token"),
        }
    }

    if values.is_empty() {
        return Err(Error::EmptyIndexList { list });
    }

    values.sort_unstable();
    values.dedup();
    Ok(values)
}

/// Number of bits needed to represent `value`; ceil(log2(value + 1)).
fn bit_length(value: u64) -> usize {
    (64 - value.leading_zeros()) as usize
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn width_is_inferred_from_the_largest_index() {
        let table = canonicalize_lists("1,3,5", None, None).unwrap();
        assert_eq!(table.variables, 3);
        assert_eq!(table.rows.len(), 8);
        assert_eq!(table.on_set(), vec![1, 3, 5]);
        assert_eq!(table.dc_set(), vec![0, 2, 4, 6, 7]);
    }

    #[test]
    fn minterm_zero_alone_still_has_one_variable() {
        let table = canonicalize_lists("0", None, None).unwrap();
        assert_eq!(table.variables, 1);
        assert_eq!(table.rows.len(), 2);
    }

    #[test]
    fn explicit_width_overrides_inference() {
        let table = canonicalize_lists("1", None, Some(4)).unwrap();
        assert_eq!(table.variables, 4);
        assert_eq!(table.rows.len(), 16);
    }

    #[test]
    fn dont_cares_merge_into_the_table() {
        let table = canonicalize_lists("4,8,10,11,12,15", Some("9,14"), None).unwrap();
        assert_eq!(table.variables, 4);
        assert_eq!(table.on_set(), vec![4, 8, 10, 11, 12, 15]);
        assert_eq!(table.dc_set(), vec![0, 1, 2, 3, 5, 6, 7, 9, 13, 14]);
    }

    #[test]
    fn duplicates_are_removed_and_order_is_numeric() {
        let table = canonicalize_lists("10,2,10,9", None, None).unwrap();
        assert_eq!(table.on_set(), vec![2, 9, 10]);
    }

    #[test]
    fn overlap_is_rejected() {
        assert!(matches!(
            canonicalize_lists("1,2", Some("2,3"), None),
            Err(Error::IndexOverlap { index: 2 })
        ));
    }

    #[test]
    fn negative_index_is_rejected() {
        assert!(matches!(
            canonicalize_lists("1,-3", None, None),
            Err(Error::NegativeIndex { value: -3 })
        ));
    }

    #[test]
    fn empty_list_is_rejected() {
        assert!(matches!(
            canonicalize_lists(", ,", None, None),
            Err(Error::EmptyIndexList { .. })
        ));
    }

    #[test]
    fn index_too_large_for_explicit_width_is_rejected() {
        assert!(matches!(
            canonicalize_lists("9", None, Some(3)),
            Err(Error::IndexOutOfRange { index: 9, variables: 3 })
        ));
    }
}
