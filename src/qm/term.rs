//! Indexed terms: the unit of work in the reduction engine

/// State of one pattern position: concrete `0`, concrete `1`, or the `-`
/// wildcard introduced by combination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BitState {
    Zero,
    One,
    DontCare,
}

impl BitState {
    pub fn as_char(self) -> char {
        match self {
            BitState::Zero => '0',
            BitState::One => '1',
            BitState::DontCare => '-',
        }
    }
}

/// Whether a term's cover contains at least one ON minterm (`On`) or only
/// don't-care minterms (`DontCare`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TermKind {
    On,
    DontCare,
}

/// An indexed term: the set of minterm indices it covers, its trivalent bit
/// pattern (MSB first), and whether any covered minterm is in the ON-set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Term {
    pub pattern: Vec<BitState>,
    pub covers: Vec<u64>,
    pub kind: TermKind,
}

impl Term {
    pub fn from_minterm(minterm: u64, variables: usize, kind: TermKind) -> Self {
        let mut pattern = Vec::with_capacity(variables);
        for i in 0..variables {
            if (minterm >> i) & 1 == 1 {
                pattern.push(BitState::One);
            } else {
                pattern.push(BitState::Zero);
            }
        }
        pattern.reverse(); // MSB first

        Self {
            pattern,
            covers: vec![minterm],
            kind,
        }
    }

    /// Hamming weight of the pattern; `-` positions contribute zero.
    pub fn weight(&self) -> usize {
        self.pattern.iter().filter(|&&b| b == BitState::One).count()
    }

    /// Two terms combine iff they differ in exactly one position and that
    /// position is concrete in both. A `-` mismatch fails the pair.
    pub fn can_combine(&self, other: &Term) -> bool {
        if self.pattern.len() != other.pattern.len() {
            return false;
        }

        let mut diff_count = 0;
        for i in 0..self.pattern.len() {
            if self.pattern[i] != other.pattern[i] {
                if self.pattern[i] == BitState::DontCare || other.pattern[i] == BitState::DontCare {
                    return false;
                }
                diff_count += 1;
                if diff_count > 1 {
                    return false;
                }
            }
        }
        diff_count == 1
    }

    /// Combined term: `-` at the differing position, covers merged, kind `On`
    /// if either parent is `On`.
    pub fn combine(&self, other: &Term) -> Option<Term> {
        if !self.can_combine(other) {
            return None;
        }

        let mut covers = self.covers.clone();
        covers.extend(&other.covers);
        covers.sort_unstable();
        covers.dedup();

        let pattern = self
            .pattern
            .iter()
            .zip(&other.pattern)
            .map(|(&a, &b)| if a == b { a } else { BitState::DontCare })
            .collect();

        let kind = if self.kind == TermKind::On || other.kind == TermKind::On {
            TermKind::On
        } else {
            TermKind::DontCare
        };

        Some(Term { pattern, covers, kind })
    }

    pub fn covers_minterm(&self, minterm: u64) -> bool {
        self.covers.binary_search(&minterm).is_ok()
    }

    /// The pattern as a `01-` string, MSB first.
    pub fn pattern_string(&self) -> String {
        self.pattern.iter().map(|b| b.as_char()).collect()
    }

    /// Every minterm index the pattern evaluates true on, obtained by
    /// substituting both values for each `-`. Sorted ascending.
    pub fn expand(&self) -> Vec<u64> {
        let n = self.pattern.len();
        let mut base = 0u64;
        let mut free_bits = Vec::new();

        for (i, &state) in self.pattern.iter().enumerate() {
            let bit = (n - 1 - i) as u64;
            match state {
                BitState::One => base |= 1 << bit,
                BitState::DontCare => free_bits.push(bit),
                BitState::Zero => {}
            }
        }

        let mut minterms = Vec::with_capacity(1 << free_bits.len());
        for selection in 0..(1u64 << free_bits.len()) {
            let mut value = base;
            for (j, &bit) in free_bits.iter().enumerate() {
                if (selection >> j) & 1 == 1 {
                    value |= 1 << bit;
                }
            }
            minterms.push(value);
        }
        minterms.sort_unstable();
        minterms
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_minterm_is_msb_first() {
        let term = Term::from_minterm(4, 3, TermKind::On);
        assert_eq!(term.pattern_string(), "100");
        assert_eq!(term.covers, vec![4]);
    }

    #[test]
    fn weight_ignores_dashes() {
        let mut term = Term::from_minterm(7, 3, TermKind::On);
        assert_eq!(term.weight(), 3);
        term.pattern[1] = BitState::DontCare;
        assert_eq!(term.weight(), 2);
    }

    #[test]
    fn combine_single_difference() {
        let a = Term::from_minterm(4, 3, TermKind::On);
        let b = Term::from_minterm(5, 3, TermKind::DontCare);
        let c = a.combine(&b).unwrap();
        assert_eq!(c.pattern_string(), "10-");
        assert_eq!(c.covers, vec![4, 5]);
        assert_eq!(c.kind, TermKind::On);
    }

    #[test]
    fn combine_rejects_two_differences() {
        let a = Term::from_minterm(0, 3, TermKind::On);
        let b = Term::from_minterm(3, 3, TermKind::On);
        assert!(a.combine(&b).is_none());
    }

    #[test]
    fn combine_rejects_dash_mismatch() {
        // 0-1 and 1-1 combine (dashes agree); 0-1 and 011 do not.
        let a = Term {
            pattern: vec![BitState::Zero, BitState::DontCare, BitState::One],
            covers: vec![1, 3],
            kind: TermKind::On,
        };
        let b = Term {
            pattern: vec![BitState::One, BitState::DontCare, BitState::One],
            covers: vec![5, 7],
            kind: TermKind::On,
        };
        let c = Term::from_minterm(3, 3, TermKind::On);

        assert!(a.can_combine(&b));
        assert!(!a.can_combine(&c));
    }

    #[test]
    fn combine_kind_is_dc_only_when_both_parents_are() {
        let a = Term::from_minterm(2, 3, TermKind::DontCare);
        let b = Term::from_minterm(3, 3, TermKind::DontCare);
        assert_eq!(a.combine(&b).unwrap().kind, TermKind::DontCare);
    }

    #[test]
    fn expand_substitutes_both_values_per_dash() {
        let term = Term {
            pattern: vec![BitState::DontCare, BitState::DontCare, BitState::One],
            covers: vec![1, 3, 5, 7],
            kind: TermKind::On,
        };
        assert_eq!(term.expand(), vec![1, 3, 5, 7]);
    }

    #[test]
    fn expand_without_dashes_is_the_single_index() {
        let term = Term::from_minterm(6, 3, TermKind::On);
        assert_eq!(term.expand(), vec![6]);
    }
}
