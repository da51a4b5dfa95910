//! Inverse empirical CDF: quantiles to row indices.

use panel_model::LinkValue;

/// Stable ascending order permutation of `values`.
///
/// `values[perm[0]] <= values[perm[1]] <= ...`; equal values keep their
/// original row order.
pub fn order_permutation(values: &[LinkValue]) -> Vec<usize> {
    let mut perm: Vec<usize> = (0..values.len()).collect();
    perm.sort_by(|&a, &b| values[a].cmp(&values[b]));
    perm
}

/// 1-based target rank for a quantile over `len` sorted values.
///
/// `round(q * len)` with ties to even, clamped to `[1, len]` so quantiles at
/// either boundary still select the smallest or largest element. `len` must
/// be non-zero.
pub fn target_rank(quantile: f64, len: usize) -> usize {
    let scaled = (quantile * len as f64).round_ties_even();
    if scaled.is_nan() || scaled < 1.0 {
        1
    } else if scaled >= len as f64 {
        len
    } else {
        scaled as usize
    }
}

/// Map quantiles through the empirical order of `values` to 0-based row indices.
///
/// Every returned index lies in `[0, values.len())`. `values` must be non-empty.
pub fn quantiles_to_indices<I>(values: &[LinkValue], quantiles: I) -> Vec<usize>
where
    I: IntoIterator<Item = f64>,
{
    let perm = order_permutation(values);
    quantiles
        .into_iter()
        .map(|q| perm[target_rank(q, perm.len()) - 1])
        .collect()
}
