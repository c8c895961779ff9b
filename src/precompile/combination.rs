//! Mixed-radix combination arithmetic.
//!
//! A combination index is read as a little-endian mixed-radix number whose
//! radices are the combination counts of the independent axes (paint stages,
//! or a node's intrinsic variants and child slots). Within one axis the
//! alternatives are laid out back to back in declaration order, so a digit is
//! resolved to a concrete option by a linear cumulative scan.

use smallvec::SmallVec;

/// Count of an axis whose true count does not fit in `usize`.
///
/// All count arithmetic saturates, so an overflow anywhere in a node tree
/// reaches the stage radices as this value.
pub const SATURATED_COUNT: usize = usize::MAX;

/// Peels digits off a combination index, least significant first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RadixDigits {
    remaining: usize,
}

impl RadixDigits {
    #[inline]
    #[must_use]
    pub fn new(index: usize) -> Self {
        Self { remaining: index }
    }

    /// Takes the next digit for an axis with `radix` alternatives.
    #[inline]
    pub fn take(&mut self, radix: usize) -> usize {
        debug_assert!(radix > 0, "axis with no alternatives");
        let radix = radix.max(1);
        let digit = self.remaining % radix;
        self.remaining /= radix;
        digit
    }

    /// What is left after all taken digits. For the last axis this is its digit.
    #[inline]
    #[must_use]
    pub fn remainder(&self) -> usize {
        self.remaining
    }
}

/// Recombines `(digit, radix)` pairs, least significant first, into an index.
///
/// Inverse of repeated [`RadixDigits::take`].
#[must_use]
pub fn encode(digits: &[(usize, usize)]) -> usize {
    digits
        .iter()
        .rev()
        .fold(0, |acc, &(digit, radix)| acc * radix + digit)
}

/// Splits `index` into one digit per radix, least significant first.
#[must_use]
pub fn decode(index: usize, radices: &[usize]) -> SmallVec<[usize; 4]> {
    let mut digits = RadixDigits::new(index);
    radices.iter().map(|&radix| digits.take(radix)).collect()
}

/// Sum of the combination counts of a set of alternatives, saturating at
/// [`SATURATED_COUNT`].
///
/// May be 0 when `options` is empty.
pub fn sum_combinations<T>(options: &[T], count: impl Fn(&T) -> usize) -> usize {
    options
        .iter()
        .fold(0usize, |acc, option| acc.saturating_add(count(option)))
}

/// Combination count of a paint-stage axis.
///
/// An axis with no registered alternatives still contributes one combination:
/// the stage's implicit default.
#[inline]
#[must_use]
pub fn axis_count(raw_sum: usize) -> usize {
    if raw_sum == 0 { 1 } else { raw_sum }
}

/// Resolves `desired` to an alternative and the index local to it.
///
/// Scans `options` in order, accumulating each one's count; the first option
/// whose cumulative boundary exceeds `desired` is selected. Returns `None` if
/// `desired` is past the last boundary.
pub fn select_option<T>(
    options: &[T],
    desired: usize,
    count: impl Fn(&T) -> usize,
) -> Option<(&T, usize)> {
    let mut before = 0usize;
    for option in options {
        let end = before.saturating_add(count(option));
        if desired < end {
            return Some((option, desired - before));
        }
        before = end;
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_digits_are_little_endian() {
        // radices [2, 3, 4]: index = d0 + 2 * (d1 + 3 * d2)
        let digits = decode(2 * 3 + 2 * 2 + 1, &[2, 3, 4]);
        assert_eq!(digits.as_slice(), &[1, 2, 1]);
    }

    #[test]
    fn test_encode_inverts_decode() {
        let radices = [3, 1, 5, 2];
        let total: usize = radices.iter().product();
        for index in 0..total {
            let digits = decode(index, &radices);
            let pairs: Vec<_> = digits.iter().copied().zip(radices).collect();
            assert_eq!(encode(&pairs), index);
        }
    }

    #[test]
    fn test_remainder_is_last_digit() {
        let mut digits = RadixDigits::new(17);
        assert_eq!(digits.take(4), 1);
        assert_eq!(digits.remainder(), 4);
    }

    #[test]
    fn test_axis_count_fallback() {
        assert_eq!(axis_count(0), 1);
        assert_eq!(axis_count(7), 7);
    }

    #[test]
    fn test_select_option_linear_scan() {
        let counts = [2usize, 3, 1];
        let pick = |d| select_option(&counts, d, |&c| c).map(|(c, local)| (*c, local));

        assert_eq!(pick(0), Some((2, 0)));
        assert_eq!(pick(1), Some((2, 1)));
        assert_eq!(pick(2), Some((3, 0)));
        assert_eq!(pick(4), Some((3, 2)));
        assert_eq!(pick(5), Some((1, 0)));
        assert_eq!(pick(6), None);
    }

    #[test]
    fn test_select_option_skips_empty_alternatives() {
        let counts = [0usize, 2];
        let picked = select_option(&counts, 0, |&c| c).map(|(c, local)| (*c, local));
        assert_eq!(picked, Some((2, 0)));
    }

    #[test]
    fn test_sum_saturates() {
        assert_eq!(sum_combinations(&[usize::MAX, 5], |&c| c), usize::MAX);
        assert_eq!(sum_combinations::<usize>(&[], |&c| c), 0);
    }
}
