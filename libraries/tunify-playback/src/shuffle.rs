//! Shuffle selection
//!
//! Shuffle does not reorder the queue. Each advance picks a uniformly random
//! index, so the same track may come up twice in a row.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Uniform random index picker
#[derive(Debug, Clone)]
pub struct ShufflePicker {
    rng: StdRng,
}

impl ShufflePicker {
    /// Create a picker, seeded for reproducible sequences when `seed` is set
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self { rng }
    }

    /// Pick an index in `[0, len)`, or `None` for an empty range
    pub fn pick(&mut self, len: usize) -> Option<usize> {
        if len == 0 {
            return None;
        }
        Some(self.rng.gen_range(0..len))
    }
}

impl Default for ShufflePicker {
    fn default() -> Self {
        Self::new(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_range_has_no_pick() {
        let mut picker = ShufflePicker::default();
        assert_eq!(picker.pick(0), None);
    }

    #[test]
    fn picks_stay_in_range() {
        let mut picker = ShufflePicker::new(Some(7));
        for len in 1..20 {
            for _ in 0..50 {
                let index = picker.pick(len).unwrap();
                assert!(index < len);
            }
        }
    }

    #[test]
    fn seeded_pickers_agree() {
        let mut a = ShufflePicker::new(Some(42));
        let mut b = ShufflePicker::new(Some(42));

        let seq_a: Vec<_> = (0..32).map(|_| a.pick(10)).collect();
        let seq_b: Vec<_> = (0..32).map(|_| b.pick(10)).collect();
        assert_eq!(seq_a, seq_b);
    }

    #[test]
    fn every_index_is_reachable() {
        let mut picker = ShufflePicker::new(Some(1));
        let mut seen = [false; 5];
        for _ in 0..500 {
            seen[picker.pick(5).unwrap()] = true;
        }
        assert!(seen.iter().all(|s| *s));
    }

    #[test]
    fn repeats_are_allowed() {
        let mut picker = ShufflePicker::new(Some(3));
        let picks: Vec<_> = (0..200).map(|_| picker.pick(2).unwrap()).collect();
        assert!(picks.windows(2).any(|w| w[0] == w[1]));
    }
}
