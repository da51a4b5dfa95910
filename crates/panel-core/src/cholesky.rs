//! Pivoted Cholesky factorization for positive semi-definite matrices.
//!
//! Complete diagonal pivoting: at each step the largest remaining diagonal of
//! the Schur complement is moved to the front. The factorization stops at the
//! numerical rank, so singular correlation matrices (`rho = 1`, duplicated
//! variables) factor without error.

use nalgebra::DMatrix;

/// Upper-triangular factor `R` with pivot order `pivot` such that
/// `A[pivot, pivot] = R^T R`.
#[derive(Debug, Clone)]
pub struct PivotedCholesky {
    factor: DMatrix<f64>,
    pivot: Vec<usize>,
    rank: usize,
}

impl PivotedCholesky {
    /// Factor a symmetric positive semi-definite matrix.
    ///
    /// Pivots below `n * EPSILON * max(diag)` end the factorization; the rows
    /// of `R` past the rank stay zero.
    pub fn new(matrix: &DMatrix<f64>) -> Self {
        let n = matrix.nrows();
        let mut work = matrix.clone();
        let mut factor = DMatrix::zeros(n, n);
        let mut pivot: Vec<usize> = (0..n).collect();
        let max_diag = (0..n).map(|i| matrix[(i, i)]).fold(0.0_f64, f64::max);
        let tolerance = n as f64 * f64::EPSILON * max_diag;
        let mut rank = n;

        for k in 0..n {
            let (best, best_value) = (k..n)
                .map(|i| (i, work[(i, i)]))
                .fold((k, f64::NEG_INFINITY), |acc, item| {
                    if item.1 > acc.1 { item } else { acc }
                });
            if best_value <= tolerance {
                rank = k;
                break;
            }
            if best != k {
                work.swap_rows(k, best);
                work.swap_columns(k, best);
                factor.swap_columns(k, best);
                pivot.swap(k, best);
            }

            let diag = best_value.sqrt();
            factor[(k, k)] = diag;
            for j in (k + 1)..n {
                factor[(k, j)] = work[(k, j)] / diag;
            }
            for i in (k + 1)..n {
                for j in (k + 1)..n {
                    work[(i, j)] -= factor[(k, i)] * factor[(k, j)];
                }
            }
        }

        Self {
            factor,
            pivot,
            rank,
        }
    }

    /// The upper-triangular factor in pivoted order.
    pub fn factor(&self) -> &DMatrix<f64> {
        &self.factor
    }

    /// Pivot order: position `k` of the factor holds original index `pivot[k]`.
    pub fn pivot(&self) -> &[usize] {
        &self.pivot
    }

    /// Numerical rank found during factorization.
    pub fn rank(&self) -> usize {
        self.rank
    }

    /// Factor with columns moved back to the original variable order.
    ///
    /// The result `U` satisfies `U^T U = A` for the input matrix `A`.
    pub fn unpivoted_factor(&self) -> DMatrix<f64> {
        let n = self.factor.nrows();
        let mut out = DMatrix::zeros(n, n);
        for (position, &original) in self.pivot.iter().enumerate() {
            out.set_column(original, &self.factor.column(position));
        }
        out
    }
}
