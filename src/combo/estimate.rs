//! Up-front size estimation.
//!
//! Counts come straight from binomial coefficients, so nothing is enumerated
//! just to size the output. The byte figure assumes one byte per character and
//! is printed as advice only; it is never reconciled against the file.

use super::LengthSet;
use crate::error::{Error, Result};

/// `C(n, k)`, or `None` when it does not fit in a `u64`.
pub fn binomial(n: usize, k: usize) -> Option<u64> {
    if k > n {
        return Some(0);
    }
    let k = k.min(n - k);
    let mut acc: u128 = 1;
    for i in 0..k {
        // C(n, i + 1) = C(n, i) * (n - i) / (i + 1), exact at every step.
        acc = acc * (n - i) as u128 / (i + 1) as u128;
        if acc > u64::MAX as u128 {
            return None;
        }
    }
    Some(acc as u64)
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SizeEstimate {
    /// Number of combinations across all usable lengths.
    pub total: u64,
    /// Mean combination length in characters.
    pub avg_length: f64,
    /// `round((avg_length + 1) * total)`: characters plus one newline each.
    pub bytes: u64,
}

impl SizeEstimate {
    /// Sizes a run over `alphabet_len` positions.
    ///
    /// # Errors
    ///
    /// - [`Error::NothingToGenerate`] when no requested length fits.
    /// - [`Error::Overflow`] when the count leaves 64-bit range.
    pub fn compute(alphabet_len: usize, lengths: &LengthSet) -> Result<Self> {
        let mut total: u64 = 0;
        let mut weighted: u64 = 0;

        for length in lengths.usable(alphabet_len) {
            let overflow = || Error::Overflow { length };
            let count = binomial(alphabet_len, length).ok_or_else(overflow)?;
            total = total.checked_add(count).ok_or_else(overflow)?;
            weighted = (length as u64)
                .checked_mul(count)
                .and_then(|w| weighted.checked_add(w))
                .ok_or_else(overflow)?;
        }

        if total == 0 {
            return Err(Error::NothingToGenerate);
        }

        let avg_length = weighted as f64 / total as f64;
        let bytes = ((avg_length + 1.0) * total as f64).round() as u64;

        Ok(Self {
            total,
            avg_length,
            bytes,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn binomial_small_values() {
        assert_eq!(binomial(5, 0), Some(1));
        assert_eq!(binomial(5, 2), Some(10));
        assert_eq!(binomial(5, 5), Some(1));
        assert_eq!(binomial(3, 4), Some(0));
        assert_eq!(binomial(52, 5), Some(2_598_960));
    }

    #[test]
    fn binomial_reports_overflow() {
        assert_eq!(binomial(67, 33), Some(14_226_520_737_620_288_370));
        assert_eq!(binomial(70, 35), None);
    }

    #[test]
    fn abc_estimate() {
        let est = SizeEstimate::compute(3, &LengthSet::up_to(3)).unwrap();
        assert_eq!(est.total, 7);
        // 3*1 + 3*2 + 1*3 = 12 characters over 7 entries, plus 7 newlines.
        assert!((est.avg_length - 12.0 / 7.0).abs() < 1e-12);
        assert_eq!(est.bytes, 19);
    }

    #[test]
    fn explicit_lengths_only_count_requested_sizes() {
        let lengths: LengthSet = [2, 4].into_iter().collect();
        let est = SizeEstimate::compute(4, &lengths).unwrap();
        assert_eq!(est.total, 6 + 1);
        assert_eq!(est.bytes, 6 * 3 + 5);
    }

    #[test]
    fn zero_total_is_reported_not_divided() {
        let lengths: LengthSet = [3].into_iter().collect();
        assert!(matches!(
            SizeEstimate::compute(2, &lengths),
            Err(Error::NothingToGenerate)
        ));
        assert!(matches!(
            SizeEstimate::compute(5, &LengthSet::default()),
            Err(Error::NothingToGenerate)
        ));
    }

    #[test]
    fn oversized_alphabet_overflows() {
        assert!(matches!(
            SizeEstimate::compute(80, &LengthSet::up_to(80)),
            Err(Error::Overflow { .. })
        ));
    }
}
