//! Uniform in-place shuffle

use rand::Rng;

/// Shuffle `items` in place
///
/// Fisher-Yates with a shrinking range: position `i` swaps with a uniform
/// index in `0..=i`, so every permutation is equally likely. Empty and
/// single-element slices are left untouched.
pub fn shuffle<T, R: Rng + ?Sized>(items: &mut [T], rng: &mut R) {
    for i in (1..items.len()).rev() {
        let j = rng.random_range(0..=i);
        items.swap(i, j);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashMap;

    #[test]
    fn test_is_a_permutation() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut items: Vec<u32> = (0..50).collect();
        shuffle(&mut items, &mut rng);

        let mut sorted = items.clone();
        sorted.sort_unstable();
        assert_eq!(sorted, (0..50).collect::<Vec<_>>());
    }

    #[test]
    fn test_trivial_slices() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut empty: [u8; 0] = [];
        shuffle(&mut empty, &mut rng);

        let mut one = ["only"];
        shuffle(&mut one, &mut rng);
        assert_eq!(one, ["only"]);
    }

    #[test]
    fn test_same_seed_same_order() {
        let mut a: Vec<u32> = (0..20).collect();
        let mut b = a.clone();
        shuffle(&mut a, &mut StdRng::seed_from_u64(99));
        shuffle(&mut b, &mut StdRng::seed_from_u64(99));
        assert_eq!(a, b);
    }

    #[test]
    fn test_permutations_are_uniform() {
        // 3 elements have 6 permutations; each should show up about 1/6 of
        // the time. A biased swap range skews this by well over 10%.
        const TRIALS: usize = 60_000;
        let mut rng = StdRng::seed_from_u64(2024);
        let mut counts: HashMap<[u8; 3], usize> = HashMap::new();

        for _ in 0..TRIALS {
            let mut items = [0u8, 1, 2];
            shuffle(&mut items, &mut rng);
            *counts.entry(items).or_default() += 1;
        }

        assert_eq!(counts.len(), 6);
        let expected = TRIALS as f64 / 6.0;
        for (perm, count) in counts {
            let deviation = (count as f64 - expected).abs() / expected;
            assert!(deviation < 0.05, "{perm:?} seen {count} times");
        }
    }
}
