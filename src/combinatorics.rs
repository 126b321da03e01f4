//! Combinatorial primitives
//!
//! Exact counting functions return `None` on `u128` overflow instead of
//! wrapping. The `*_approx` variants give an `f64` magnitude for complexity
//! estimates, where overflow only has to be ordered correctly.

use std::collections::BTreeMap;

/// n!
///
/// # Examples
/// ```
/// use enumerator::combinatorics::factorial;
/// assert_eq!(factorial(0), Some(1));
/// assert_eq!(factorial(5), Some(120));
/// assert_eq!(factorial(40), None);
/// ```
pub fn factorial(n: u64) -> Option<u128> {
    (1..=n as u128).try_fold(1u128, |acc, k| acc.checked_mul(k))
}

/// n permute r: the number of ordered selections of r out of n distinct values
pub fn n_p_r(n: u64, r: u64) -> Option<u128> {
    if r > n {
        return Some(0);
    }
    (0..r as u128).try_fold(1u128, |acc, i| acc.checked_mul(n as u128 - i))
}

/// n choose r
///
/// Computed multiplicatively so every intermediate value is itself a binomial
/// coefficient, which keeps the exact range as wide as possible.
pub fn n_c_r(n: u64, r: u64) -> Option<u128> {
    if r > n {
        return Some(0);
    }
    let r = r.min(n - r) as u128;
    let n = n as u128;
    let mut res: u128 = 1;
    for i in 0..r {
        res = res.checked_mul(n - i)? / (i + 1);
    }
    Some(res)
}

/// u^r with overflow detection
pub fn power(u: u64, r: u64) -> Option<u128> {
    let r = u32::try_from(r).ok()?;
    (u as u128).checked_pow(r)
}

/// Number of distinct orderings of a multiset: n! / (m1! m2! ...)
pub fn multiset_permutations(arr: &[i64]) -> Option<u128> {
    // Accumulate as a product of binomials to stay exact longer than n! would.
    let mut placed: u64 = 0;
    let mut res: u128 = 1;
    for count in multiplicities(arr).values() {
        placed += *count as u64;
        res = res.checked_mul(n_c_r(placed, *count as u64)?)?;
    }
    Some(res)
}

/// f64 magnitude of nPr
pub fn n_p_r_approx(n: u64, r: u64) -> f64 {
    if r > n {
        return 0.0;
    }
    (0..r).fold(1.0, |acc, i| acc * (n - i) as f64)
}

/// f64 magnitude of nCr
pub fn n_c_r_approx(n: u64, r: u64) -> f64 {
    if r > n {
        return 0.0;
    }
    let r = r.min(n - r);
    (0..r).fold(1.0, |acc, i| acc * (n - i) as f64 / (i + 1) as f64)
}

/// f64 magnitude of u^r
pub fn power_approx(u: u64, r: u64) -> f64 {
    (u as f64).powf(r as f64)
}

/// Occurrence count of each value, keyed in ascending order
pub fn multiplicities(arr: &[i64]) -> BTreeMap<i64, usize> {
    let mut ms = BTreeMap::new();
    for &e in arr {
        *ms.entry(e).or_insert(0) += 1;
    }
    ms
}

/// All values of the slice are pairwise distinct
pub fn is_distinct(arr: &[i64]) -> bool {
    multiplicities(arr).len() == arr.len()
}

/// Sorted copy with duplicates removed
pub fn remove_duplicates(arr: &[i64]) -> Vec<i64> {
    let mut res = arr.to_vec();
    res.sort_unstable();
    res.dedup();
    res
}

/// `arr` is a sub-multiset of `of` (multiplicities respected)
pub fn sub_multiset(arr: &[i64], of: &[i64]) -> bool {
    let mut ms = multiplicities(of);
    for e in arr {
        match ms.get_mut(e) {
            Some(v) if *v > 0 => *v -= 1,
            _ => return false,
        }
    }
    true
}

/// `arr` is a prefix of `of`
pub fn is_prefix(arr: &[i64], of: &[i64]) -> bool {
    of.starts_with(arr)
}

/// `arr` is a suffix of `of`
pub fn is_suffix(arr: &[i64], of: &[i64]) -> bool {
    of.ends_with(arr)
}

/// Standard next lexicographic permutation.
///
/// Rearranges `arr` in place and returns `false` once the last permutation has
/// been passed (leaving `arr` untouched in that case).
pub fn next_permutation(arr: &mut [i64]) -> bool {
    if arr.len() < 2 {
        return false;
    }
    let mut left = arr.len() - 1;
    while left > 0 && arr[left - 1] >= arr[left] {
        left -= 1;
    }
    if left == 0 {
        return false;
    }
    let pivot = left - 1;
    let mut right = arr.len() - 1;
    while arr[right] <= arr[pivot] {
        right -= 1;
    }
    arr.swap(pivot, right);
    arr[left..].reverse();
    true
}

/// Render a value as a letter if it is an ASCII letter code point
pub fn element_to_string(e: i64) -> String {
    match u8::try_from(e) {
        Ok(b) if b.is_ascii_alphabetic() => char::from(b).to_string(),
        _ => e.to_string(),
    }
}

/// Format a number with `digits` significant digits
pub fn to_precision(x: f64, digits: usize) -> String {
    if x == 0.0 || !x.is_finite() {
        return format!("{:.*}", digits.saturating_sub(1), x);
    }
    let magnitude = x.abs().log10().floor() as i64;
    let decimals = (digits as i64 - 1 - magnitude).max(0) as usize;
    format!("{:.*}", decimals, x)
}
