//! Factorials and binomial coefficients over non-negative integers.
//!
//! Values are carried as `f64` so they compose directly with the rate terms of
//! the finite-sum models. Every factorial up to `22!` and every binomial
//! coefficient below `2^53` is represented exactly; past `170!` the result is
//! `f64::INFINITY` and callers surface that as a computation error.

/// `n!` for `n >= 0`.
pub fn factorial(n: u32) -> f64 {
    (2..=n).fold(1.0, |acc, k| acc * f64::from(k))
}

/// Number of `k`-subsets of an `n`-set; 0 when `k < 0` or `k > n`.
pub fn binomial(n: u32, k: i64) -> f64 {
    if k < 0 || k > i64::from(n) {
        return 0.0;
    }
    // k is within 0..=n, so it fits in u32.
    let k = k as u32;
    let k = k.min(n - k);
    // Multiplicative form keeps every partial product an exact integer.
    (1..=k).fold(1.0, |acc, i| acc * f64::from(n - k + i) / f64::from(i))
}

/// `C(n, 0) ..= C(n, n)`, each entry derived from the previous one.
pub fn binomial_row(n: u32) -> Vec<f64> {
    let mut row = Vec::with_capacity(n as usize + 1);
    let mut current = 1.0;
    row.push(current);
    for k in 0..n {
        current = current * f64::from(n - k) / f64::from(k + 1);
        row.push(current);
    }
    row
}

/// `x^n / n!` without forming the factorial, so large `n` degrades gracefully.
pub(crate) fn power_over_factorial(x: f64, n: u32) -> f64 {
    (1..=n).fold(1.0, |acc, k| acc * x / f64::from(k))
}
