//! Ordinary least squares with an intercept.
//!
//! The design is centered, then the normal equations are solved by Cholesky
//! factorization. One-hot blocks are perfectly collinear with the intercept
//! (every row has exactly one hot item and one hot day), so a vanishing ridge
//! term is added to the Gram diagonal. That keeps the factorization well
//! defined and picks the minimum-norm least-squares solution; fitted values for
//! observed category combinations are unaffected.

use ndarray::{Array1, Array2, ArrayView1, ArrayView2, Axis};

use crate::errors::Error;

/// Ridge scale relative to the mean Gram diagonal.
const RIDGE: f64 = 1e-8;

/// A fitted linear model `y = x · coefficients + intercept`.
#[derive(Debug, Clone, PartialEq)]
pub struct LinearRegression {
    coefficients: Array1<f64>,
    intercept: f64,
}

impl LinearRegression {
    /// Fit on `x` (rows × features) against targets `y`.
    ///
    /// Errors:
    /// - zero rows, or `x`/`y` row counts disagree
    /// - a non-finite value in the inputs
    /// - the regularized normal equations are not positive definite
    pub fn fit(x: ArrayView2<f64>, y: ArrayView1<f64>) -> Result<Self, Error> {
        let (n, p) = x.dim();
        if n == 0 {
            return Err(Error::Training("cannot fit a regression on zero rows".into()));
        }
        if y.len() != n {
            return Err(Error::Training(format!(
                "feature rows ({n}) and targets ({}) differ in length",
                y.len()
            )));
        }
        if x.iter().chain(y.iter()).any(|v| !v.is_finite()) {
            return Err(Error::Training("non-finite value in training data".into()));
        }

        let x_mean = x
            .mean_axis(Axis(0))
            .unwrap_or_else(|| Array1::zeros(p));
        let y_mean = y.mean().unwrap_or(0.0);

        let xc = &x - &x_mean;
        let yc = &y - y_mean;

        let mut gram = xc.t().dot(&xc);
        let rhs = xc.t().dot(&yc);

        let scale = if p == 0 {
            1.0
        } else {
            (gram.diag().sum() / p as f64).max(1.0)
        };
        let ridge = RIDGE * scale;
        gram.diag_mut().mapv_inplace(|v| v + ridge);

        let coefficients = cholesky_solve(&gram, &rhs)?;
        let intercept = y_mean - x_mean.dot(&coefficients);

        Ok(Self {
            coefficients,
            intercept,
        })
    }

    /// Learned weights, one per feature column.
    pub fn coefficients(&self) -> ArrayView1<'_, f64> {
        self.coefficients.view()
    }

    /// Learned intercept.
    pub fn intercept(&self) -> f64 {
        self.intercept
    }

    /// Raw prediction for one encoded row.
    pub fn predict_one(&self, x: ArrayView1<f64>) -> f64 {
        self.coefficients.dot(&x) + self.intercept
    }

    /// Raw predictions for a design matrix.
    pub fn predict(&self, x: ArrayView2<f64>) -> Array1<f64> {
        x.dot(&self.coefficients) + self.intercept
    }
}

/// Solve `a · w = b` for symmetric positive definite `a`.
fn cholesky_solve(a: &Array2<f64>, b: &Array1<f64>) -> Result<Array1<f64>, Error> {
    let n = b.len();
    let mut l = Array2::<f64>::zeros((n, n));

    for j in 0..n {
        let mut d = a[[j, j]];
        for k in 0..j {
            d -= l[[j, k]] * l[[j, k]];
        }
        if !(d > 0.0) {
            return Err(Error::Training(format!(
                "normal equations are not positive definite (column {j})"
            )));
        }
        let d = d.sqrt();
        l[[j, j]] = d;
        for i in (j + 1)..n {
            let mut s = a[[i, j]];
            for k in 0..j {
                s -= l[[i, k]] * l[[j, k]];
            }
            l[[i, j]] = s / d;
        }
    }

    // L z = b
    let mut z = Array1::<f64>::zeros(n);
    for i in 0..n {
        let mut s = b[i];
        for k in 0..i {
            s -= l[[i, k]] * z[k];
        }
        z[i] = s / l[[i, i]];
    }

    // Lᵀ w = z
    let mut w = Array1::<f64>::zeros(n);
    for i in (0..n).rev() {
        let mut s = z[i];
        for k in (i + 1)..n {
            s -= l[[k, i]] * w[k];
        }
        w[i] = s / l[[i, i]];
    }

    Ok(w)
}
