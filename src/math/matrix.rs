use std::fmt;

/// Errors raised by [`Matrix`] operations whose operand dimensions don't
/// agree. These are programmer errors — a caller should treat them as
/// assertion failures, not as recoverable simulation state.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum MathError {
    #[error(
        "dimension mismatch: {op} expects {lhs_rows}x{lhs_cols} against {rhs_rows}x{rhs_cols}"
    )]
    DimensionMismatch {
        op: &'static str,
        lhs_rows: usize,
        lhs_cols: usize,
        rhs_rows: usize,
        rhs_cols: usize,
    },
}

/// A dense, row-major matrix of `f64`. Rows are stored contiguously in one
/// buffer rather than behind per-row pointers — the per-row heap
/// indirection some prior implementations use is an artefact, not a
/// requirement.
#[derive(Clone, Debug, PartialEq)]
pub struct Matrix {
    rows: usize,
    cols: usize,
    data: Vec<f64>,
}

impl Matrix {
    /// A zero-filled matrix of the given shape.
    pub fn zeros(rows: usize, cols: usize) -> Self {
        Matrix {
            rows,
            cols,
            data: vec![0.0; rows * cols],
        }
    }

    /// Build a matrix from row-major data. Panics if `data.len() != rows *
    /// cols`; this is a construction-time invariant, not a runtime one.
    pub fn from_row_major(rows: usize, cols: usize, data: Vec<f64>) -> Self {
        assert_eq!(data.len(), rows * cols, "row-major data has the wrong length");
        Matrix { rows, cols, data }
    }

    /// A diagonal matrix with `values` along the main diagonal.
    pub fn diagonal(values: &[f64]) -> Self {
        let n = values.len();
        let mut m = Matrix::zeros(n, n);
        for (i, &v) in values.iter().enumerate() {
            m.set(i, i, v);
        }
        m
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.data[row * self.cols + col]
    }

    pub fn set(&mut self, row: usize, col: usize, value: f64) {
        self.data[row * self.cols + col] = value;
    }

    pub fn row(&self, row: usize) -> &[f64] {
        &self.data[row * self.cols..(row + 1) * self.cols]
    }

    /// `self^T`.
    pub fn transpose(&self) -> Matrix {
        let mut out = Matrix::zeros(self.cols, self.rows);
        for r in 0..self.rows {
            for c in 0..self.cols {
                out.set(c, r, self.get(r, c));
            }
        }
        out
    }

    /// `self * other`. Fails with a dimension mismatch when `self.cols !=
    /// other.rows`.
    pub fn multiply(&self, other: &Matrix) -> Result<Matrix, MathError> {
        if self.cols != other.rows {
            return Err(MathError::DimensionMismatch {
                op: "Matrix::multiply",
                lhs_rows: self.rows,
                lhs_cols: self.cols,
                rhs_rows: other.rows,
                rhs_cols: other.cols,
            });
        }
        let mut out = Matrix::zeros(self.rows, other.cols);
        for r in 0..self.rows {
            for c in 0..other.cols {
                let mut sum = 0.0;
                for k in 0..self.cols {
                    sum += self.get(r, k) * other.get(k, c);
                }
                out.set(r, c, sum);
            }
        }
        Ok(out)
    }

    /// `self * v`, for `v` a column vector given as a plain slice. Fails
    /// with a dimension mismatch when `self.cols != v.len()`.
    pub fn multiply_by_slice(&self, v: &[f64]) -> Result<Vec<f64>, MathError> {
        if self.cols != v.len() {
            return Err(MathError::DimensionMismatch {
                op: "Matrix::multiply_by_slice",
                lhs_rows: self.rows,
                lhs_cols: self.cols,
                rhs_rows: v.len(),
                rhs_cols: 1,
            });
        }
        let mut out = vec![0.0; self.rows];
        for r in 0..self.rows {
            out[r] = self.row(r).iter().zip(v).map(|(a, b)| a * b).sum();
        }
        Ok(out)
    }

    /// One Gauss–Seidel sweep solving `self * x = b` in place, starting
    /// from `x = 0`. There is no convergence check here — the caller's
    /// outer loop controls how many sweeps run. A zero diagonal entry
    /// skips that row (leaves `x[i]` untouched); a `NaN` update is
    /// likewise skipped rather than propagated.
    pub fn solve_gauss_seidel(&self, b: &[f64]) -> Vec<f64> {
        assert_eq!(self.rows, b.len(), "right-hand side length must match row count");
        let mut x = vec![0.0; self.cols];
        for i in 0..self.rows {
            let diag = self.get(i, i.min(self.cols - 1));
            // The diagonal is only meaningful for square systems; for the
            // non-square Jacobian products this solver is used against in
            // practice `rows == cols` always holds, but we guard anyway.
            if i >= self.cols || diag == 0.0 {
                continue;
            }
            let row_dot_x: f64 = self.row(i).iter().zip(&x).map(|(a, xi)| a * xi).sum();
            let dx = (b[i] - row_dot_x) / diag;
            if dx.is_nan() {
                continue;
            }
            x[i] += dx;
        }
        x
    }
}

impl fmt::Display for Matrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for r in 0..self.rows {
            writeln!(f, "{:?}", self.row(r))?;
        }
        Ok(())
    }
}
