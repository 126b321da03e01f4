//! Uniform random arrangements
//!
//! Each generator draws one arrangement of the requested shape. The shapes
//! differ in which space they are uniform over:
//!
//! - [`rand_perm`]: ordered selections of positions (uniform over the
//!   distinct arrangements when the input is distinct or the selection is
//!   full length)
//! - [`rand_perm_rp`]: sequences over the distinct values (u^r)
//! - [`rand_choice`]: subsets of positions, in input order
//! - [`rand_choice_rp`]: multisets over the distinct values, via a random
//!   stars-and-bars word

use rand::Rng;

/// A mask with `n - r` zeroes followed by `r` ones
pub fn mask(n: usize, r: usize) -> Vec<bool> {
    let mut res = vec![false; n];
    for slot in res.iter_mut().skip(n.saturating_sub(r)) {
        *slot = true;
    }
    res
}

/// Fisher-Yates shuffle in place
pub fn shuffle<T, R: Rng + ?Sized>(data: &mut [T], rng: &mut R) {
    for i in (1..data.len()).rev() {
        let j = rng.random_range(0..=i);
        data.swap(i, j);
    }
}

/// Shuffled copy of the whole slice
pub fn rand_perm_full<R: Rng + ?Sized>(arr: &[i64], rng: &mut R) -> Vec<i64> {
    let mut permed = arr.to_vec();
    shuffle(&mut permed, rng);
    permed
}

/// Random permutation of `length` elements taken from `arr`
///
/// Returns `None` when `length` exceeds the input length.
pub fn rand_perm<R: Rng + ?Sized>(arr: &[i64], length: usize, rng: &mut R) -> Option<Vec<i64>> {
    if length > arr.len() {
        return None;
    }
    let mut permed = rand_perm_full(arr, rng);
    permed.truncate(length);
    Some(permed)
}

/// Random sequence of `length` independent draws from `arr`
///
/// `arr` should be free of duplicates for the result to be uniform.
pub fn rand_perm_rp<R: Rng + ?Sized>(arr: &[i64], length: usize, rng: &mut R) -> Vec<i64> {
    if arr.is_empty() {
        return Vec::new();
    }
    (0..length)
        .map(|_| arr[rng.random_range(0..arr.len())])
        .collect()
}

/// Random choice of `length` positions of `arr`, kept in input order
pub fn rand_choice<R: Rng + ?Sized>(arr: &[i64], length: usize, rng: &mut R) -> Vec<i64> {
    let mut bitmask = mask(arr.len(), length);
    shuffle(&mut bitmask, rng);
    arr.iter()
        .zip(bitmask)
        .filter_map(|(&e, keep)| keep.then_some(e))
        .collect()
}

/// Random multiset of `length` values from the duplicate-free `arr`
///
/// Sorting independent draws would not be uniform, so a random arrangement
/// of `length` stars and `arr.len() - 1` bars is drawn instead; each bar
/// moves on to the next value.
pub fn rand_choice_rp<R: Rng + ?Sized>(arr: &[i64], length: usize, rng: &mut R) -> Vec<i64> {
    if arr.is_empty() {
        return Vec::new();
    }
    let mut word = mask(arr.len() + length - 1, length);
    shuffle(&mut word, rng);
    let mut res = Vec::with_capacity(length);
    let mut on = 0;
    for star in word {
        if star {
            res.push(arr[on]);
        } else {
            on += 1;
        }
    }
    res
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashMap;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(0x5eed)
    }

    #[test]
    fn test_mask() {
        assert_eq!(mask(4, 2), vec![false, false, true, true]);
        assert_eq!(mask(2, 0), vec![false, false]);
        assert_eq!(mask(2, 2), vec![true, true]);
    }

    #[test]
    fn test_shuffle_is_permutation() {
        let mut rng = rng();
        let mut data = vec![5, 3, 9, 1, 1];
        shuffle(&mut data, &mut rng);
        data.sort();
        assert_eq!(data, vec![1, 1, 3, 5, 9]);
    }

    #[test]
    fn test_rand_perm_rejects_longer_length() {
        let mut rng = rng();
        assert!(rand_perm(&[1, 2], 3, &mut rng).is_none());
        assert_eq!(rand_perm(&[1, 2], 2, &mut rng).map(|p| p.len()), Some(2));
    }

    #[test]
    fn test_rand_choice_keeps_order() {
        let mut rng = rng();
        for _ in 0..50 {
            let choice = rand_choice(&[1, 2, 3, 4, 5], 3, &mut rng);
            assert_eq!(choice.len(), 3);
            assert!(choice.windows(2).all(|w| w[0] < w[1]));
        }
    }

    #[test]
    fn test_rand_choice_rp_shape() {
        let mut rng = rng();
        for _ in 0..50 {
            let choice = rand_choice_rp(&[1, 2, 3], 4, &mut rng);
            assert_eq!(choice.len(), 4);
            assert!(choice.windows(2).all(|w| w[0] <= w[1]));
        }
    }

    #[test]
    fn test_rand_choice_rp_is_uniform() {
        // C(3 + 2 - 1, 2) = 6 multisets, each should appear about 1/6 of the time
        let mut rng = rng();
        let runs = 60_000;
        let mut counts: HashMap<Vec<i64>, usize> = HashMap::new();
        for _ in 0..runs {
            *counts.entry(rand_choice_rp(&[1, 2, 3], 2, &mut rng)).or_default() += 1;
        }
        assert_eq!(counts.len(), 6);
        for (choice, count) in counts {
            let share = count as f64 / runs as f64;
            assert!((share - 1.0 / 6.0).abs() < 0.01, "{:?}: {}", choice, share);
        }
    }

    #[test]
    fn test_rand_perm_rp_empty_input() {
        let mut rng = rng();
        assert!(rand_perm_rp(&[], 3, &mut rng).is_empty());
        assert!(rand_choice_rp(&[], 3, &mut rng).is_empty());
    }
}
