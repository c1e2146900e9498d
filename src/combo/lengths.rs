//! Requested combination lengths.

use std::collections::BTreeSet;

/// Set of combination sizes for a run, iterated in ascending order.
///
/// Lengths of 0 or above the alphabet length are kept but contribute nothing;
/// see [`LengthSet::usable`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LengthSet(BTreeSet<usize>);

impl LengthSet {
    /// Every length from 1 through `max`.
    pub fn up_to(max: usize) -> Self {
        Self((1..=max).collect())
    }

    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.0.iter().copied()
    }

    /// Lengths that can yield at least one combination from `alphabet_len`
    /// positions.
    pub fn usable(&self, alphabet_len: usize) -> impl Iterator<Item = usize> + '_ {
        self.0
            .range(1..)
            .copied()
            .take_while(move |&l| l <= alphabet_len)
    }
}

impl FromIterator<usize> for LengthSet {
    fn from_iter<I: IntoIterator<Item = usize>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn up_to_covers_full_range() {
        let set = LengthSet::up_to(3);
        assert_eq!(set.iter().collect::<Vec<_>>(), vec![1, 2, 3]);
        assert_eq!(LengthSet::up_to(0), LengthSet::default());
    }

    #[test]
    fn explicit_lengths_are_sorted_and_deduplicated() {
        let set: LengthSet = [3, 1, 3, 2].into_iter().collect();
        assert_eq!(set.iter().collect::<Vec<_>>(), vec![1, 2, 3]);
    }

    #[test]
    fn usable_drops_zero_and_oversized_lengths() {
        let set: LengthSet = [0, 2, 5, 9].into_iter().collect();
        assert_eq!(set.usable(5).collect::<Vec<_>>(), vec![2, 5]);
        assert_eq!(set.usable(1).count(), 0);
        assert_eq!(set.usable(0).count(), 0);
    }
}
