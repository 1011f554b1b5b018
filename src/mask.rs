//! Growable bitset over `u64` words, sized to a triplet universe.
//!
//! Candidate coverage masks are built once and never mutated; the uncovered
//! mask of a running pass is the only mutable instance. All hot-path
//! operations are word-wise popcounts, so a full greedy scan over tens of
//! thousands of candidates stays cheap even for universes of ~20k triplets.

/// A fixed-width bit vector; bit `i` corresponds to triplet index `i`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Mask {
    words: Vec<u64>,
    /// Number of meaningful bits.
    len: usize,
}

impl Mask {
    /// Creates an all-zeros mask of `len` bits.
    pub fn zeros(len: usize) -> Self {
        Self {
            words: vec![0u64; len.div_ceil(64)],
            len,
        }
    }

    /// Creates an all-ones mask of `len` bits (the initial uncovered state).
    pub fn ones(len: usize) -> Self {
        let mut m = Self {
            words: vec![u64::MAX; len.div_ceil(64)],
            len,
        };
        m.trim_tail();
        m
    }

    /// Zeroes any bits above `len` in the last word.
    #[inline]
    fn trim_tail(&mut self) {
        let rem = self.len % 64;
        if rem != 0 {
            if let Some(last) = self.words.last_mut() {
                *last &= (1u64 << rem) - 1;
            }
        }
    }

    /// Number of meaningful bits.
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the mask has zero width.
    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Sets bit `i`.
    #[inline(always)]
    pub fn set(&mut self, i: usize) {
        debug_assert!(i < self.len);
        self.words[i / 64] |= 1u64 << (i % 64);
    }

    /// Returns whether bit `i` is set.
    #[inline(always)]
    pub fn get(&self, i: usize) -> bool {
        debug_assert!(i < self.len);
        (self.words[i / 64] >> (i % 64)) & 1 != 0
    }

    /// Total number of set bits.
    #[inline]
    pub fn count_ones(&self) -> usize {
        self.words.iter().map(|w| w.count_ones() as usize).sum()
    }

    /// Returns `true` if no bit is set.
    #[inline]
    pub fn is_zero(&self) -> bool {
        self.words.iter().all(|&w| w == 0)
    }

    /// Popcount of `self & other` without allocating.
    ///
    /// This is the greedy gain computation: how many still-uncovered triplets
    /// the candidate owning `other` would newly cover.
    #[inline]
    pub fn and_count(&self, other: &Mask) -> usize {
        debug_assert_eq!(self.len, other.len);
        self.words
            .iter()
            .zip(&other.words)
            .map(|(a, b)| (a & b).count_ones() as usize)
            .sum()
    }

    /// Clears every bit of `self` that is set in `other` (`self &= !other`).
    #[inline]
    pub fn clear_bits_of(&mut self, other: &Mask) {
        debug_assert_eq!(self.len, other.len);
        for (a, b) in self.words.iter_mut().zip(&other.words) {
            *a &= !b;
        }
    }

    /// ORs `other` into `self`.
    #[inline]
    pub fn or_assign(&mut self, other: &Mask) {
        debug_assert_eq!(self.len, other.len);
        for (a, b) in self.words.iter_mut().zip(&other.words) {
            *a |= b;
        }
    }

    /// Iterates the indices of set bits in `self & other`, ascending.
    #[inline]
    pub fn iter_and<'a>(&'a self, other: &'a Mask) -> impl Iterator<Item = usize> + 'a {
        debug_assert_eq!(self.len, other.len);
        self.words
            .iter()
            .zip(&other.words)
            .enumerate()
            .flat_map(|(wi, (a, b))| BitIter::new(wi * 64, a & b))
    }

    /// Iterates the indices of all set bits, ascending.
    #[inline]
    pub fn iter_ones(&self) -> impl Iterator<Item = usize> + '_ {
        self.words
            .iter()
            .enumerate()
            .flat_map(|(wi, &w)| BitIter::new(wi * 64, w))
    }
}

/// Iterator over set bits of a single word via trailing-zeros stripping.
struct BitIter {
    base: usize,
    word: u64,
}

impl BitIter {
    #[inline(always)]
    fn new(base: usize, word: u64) -> Self {
        Self { base, word }
    }
}

impl Iterator for BitIter {
    type Item = usize;

    #[inline(always)]
    fn next(&mut self) -> Option<usize> {
        if self.word == 0 {
            return None;
        }
        let v = self.word.trailing_zeros() as usize;
        self.word &= self.word - 1;
        Some(self.base + v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ones_respects_width() {
        let m = Mask::ones(70);
        assert_eq!(m.len(), 70);
        assert_eq!(m.count_ones(), 70);
        let m = Mask::ones(64);
        assert_eq!(m.count_ones(), 64);
        let m = Mask::ones(0);
        assert_eq!(m.count_ones(), 0);
        assert!(m.is_zero());
    }

    #[test]
    fn set_get_roundtrip() {
        let mut m = Mask::zeros(130);
        for i in [0, 1, 63, 64, 65, 127, 128, 129] {
            assert!(!m.get(i));
            m.set(i);
            assert!(m.get(i));
        }
        assert_eq!(m.count_ones(), 8);
    }

    #[test]
    fn and_count_matches_naive() {
        let mut a = Mask::zeros(200);
        let mut b = Mask::zeros(200);
        for i in (0..200).step_by(3) {
            a.set(i);
        }
        for i in (0..200).step_by(5) {
            b.set(i);
        }
        let naive = (0..200).filter(|i| i % 3 == 0 && i % 5 == 0).count();
        assert_eq!(a.and_count(&b), naive);
    }

    #[test]
    fn clear_bits_removes_exactly_intersection() {
        let mut uncovered = Mask::ones(100);
        let mut cover = Mask::zeros(100);
        for i in 10..30 {
            cover.set(i);
        }
        uncovered.clear_bits_of(&cover);
        assert_eq!(uncovered.count_ones(), 80);
        for i in 10..30 {
            assert!(!uncovered.get(i));
        }
        // Clearing again is a no-op.
        uncovered.clear_bits_of(&cover);
        assert_eq!(uncovered.count_ones(), 80);
    }

    #[test]
    fn or_assign_unions() {
        let mut a = Mask::zeros(66);
        let mut b = Mask::zeros(66);
        a.set(0);
        a.set(65);
        b.set(1);
        b.set(65);
        a.or_assign(&b);
        assert_eq!(a.count_ones(), 3);
        assert!(a.get(0) && a.get(1) && a.get(65));
    }

    #[test]
    fn iter_ones_is_ascending() {
        let mut m = Mask::zeros(150);
        let expected = vec![3usize, 64, 77, 149];
        for &i in &expected {
            m.set(i);
        }
        let got: Vec<usize> = m.iter_ones().collect();
        assert_eq!(got, expected);
    }

    #[test]
    fn iter_and_walks_intersection() {
        let mut a = Mask::zeros(70);
        let mut b = Mask::zeros(70);
        for i in [2usize, 5, 64, 69] {
            a.set(i);
        }
        for i in [5usize, 64, 68] {
            b.set(i);
        }
        let got: Vec<usize> = a.iter_and(&b).collect();
        assert_eq!(got, vec![5, 64]);
    }
}
