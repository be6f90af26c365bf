//! Per-observation diagnostics of a linear fit: leverage, standardized
//! residuals and Cook's distance.
//!
//! The leverage is the diagonal of the hat matrix H = X (X^T X)^-1 X^T. It is
//! computed row-wise as h_i = x_i^T (X^T X)^-1 x_i so that the n x n matrix
//! is never formed.

use crate::{
    error::{DiagnosticsError, DiagnosticsResult},
    num::Float,
};
use log::{debug, warn};
use ndarray::{Array1, Array2, ArrayView1, ArrayView2, Axis};
use ndarray_linalg::{
    cholesky::{FactorizeC, InverseC},
    UPLO,
};

/// Tolerances used by the diagnostics engine.
#[derive(Debug, Clone)]
pub struct DiagnosticOptions<F>
where
    F: Float,
{
    /// An observation with 1 - h_i below this fraction of the mean leverage
    /// is treated as having unit leverage.
    pub unit_leverage_tol: F,
    /// Relative tolerance for the co-linearity check on X^T X. Each column
    /// must retain at least this fraction of its norm after projecting out
    /// the preceding columns.
    pub colinearity_tol: F,
}

impl<F> Default for DiagnosticOptions<F>
where
    F: Float,
{
    fn default() -> Self {
        Self {
            unit_leverage_tol: F::lit(1e-10),
            colinearity_tol: F::lit(1e-7),
        }
    }
}

impl<F> DiagnosticOptions<F>
where
    F: Float,
{
    /// Set the unit-leverage tolerance, relative to the mean leverage.
    pub fn unit_leverage_tol(mut self, tol: F) -> Self {
        self.unit_leverage_tol = tol;
        self
    }

    /// Set the tolerance for the co-linearity check.
    pub fn colinearity_tolerance(mut self, tol: F) -> Self {
        self.colinearity_tol = tol;
        self
    }
}

/// The diagnostic statistics of a fitted model. Immutable once computed;
/// the statistics are only readable through the accessors so that the
/// influential set always matches the Cook's distances.
#[derive(Debug, Clone)]
pub struct Diagnostics<F>
where
    F: Float,
{
    leverage: Array1<F>,
    sigma2: F,
    standardized_residuals: Array1<F>,
    cooks_distance: Array1<F>,
    influential: Vec<usize>,
    unit_leverage: Vec<usize>,
    fitted: Array1<F>,
    residuals: Array1<F>,
    n_params: usize,
}

impl<F> Diagnostics<F>
where
    F: Float,
{
    /// Compute the diagnostics from the design matrix, the residuals, the
    /// fitted values, and the number of parameters, with default tolerances.
    pub fn compute(
        x: ArrayView2<F>,
        residuals: ArrayView1<F>,
        fitted: ArrayView1<F>,
        n_params: usize,
    ) -> DiagnosticsResult<Self> {
        Self::compute_with(x, residuals, fitted, n_params, &DiagnosticOptions::default())
    }

    pub fn compute_with(
        x: ArrayView2<F>,
        residuals: ArrayView1<F>,
        fitted: ArrayView1<F>,
        n_params: usize,
        options: &DiagnosticOptions<F>,
    ) -> DiagnosticsResult<Self> {
        let n_obs = x.nrows();
        if residuals.len() != n_obs || fitted.len() != n_obs {
            return Err(DiagnosticsError::BadInput(
                "residuals and fitted values must have same dimension as observations".to_string(),
            ));
        }
        if n_params == 0 {
            return Err(DiagnosticsError::BadInput(
                "design matrix has no columns".to_string(),
            ));
        }
        if x.ncols() != n_params {
            return Err(DiagnosticsError::BadInput(format!(
                "design matrix has {} columns for {} parameters",
                x.ncols(),
                n_params
            )));
        }
        // Fail before touching the design matrix
        let sigma2 = residual_variance(residuals, n_params)?;
        let leverage = leverage_with(x, options.colinearity_tol)?;

        let n_float = F::from_count(n_obs);
        let p_float = F::from_count(n_params);
        let mean_leverage = leverage.sum() / n_float;
        let unit_tol = options.unit_leverage_tol * mean_leverage;
        let sigma = num_traits::Float::sqrt(sigma2);

        let mut standardized_residuals = Array1::<F>::zeros(n_obs);
        let mut cooks_distance = Array1::<F>::zeros(n_obs);
        let mut unit_leverage = Vec::new();
        for (i, (&h, &e)) in leverage.iter().zip(residuals.iter()).enumerate() {
            let one_minus_h = F::one() - h;
            if one_minus_h < unit_tol {
                unit_leverage.push(i);
                standardized_residuals[i] = F::nan();
                cooks_distance[i] = F::nan();
                continue;
            }
            // A perfect fit has no spread to standardize against; every
            // residual is zero and so is its influence.
            if sigma2 == F::zero() {
                continue;
            }
            standardized_residuals[i] = e / (sigma * num_traits::Float::sqrt(one_minus_h));
            cooks_distance[i] =
                (e * e / (p_float * sigma2)) * (h / (one_minus_h * one_minus_h));
        }
        if !unit_leverage.is_empty() {
            warn!(
                "{} observation(s) with unit leverage excluded from standardized diagnostics: {:?}",
                unit_leverage.len(),
                unit_leverage
            );
        }

        let threshold = F::lit(4.) / n_float;
        // NaN compares false, so unit-leverage points never qualify.
        let influential: Vec<usize> = cooks_distance
            .iter()
            .enumerate()
            .filter(|(_, &d)| d > threshold)
            .map(|(i, _)| i)
            .collect();
        debug!(
            "diagnostics for n = {}, p = {}: sigma^2 = {:?}, influential = {:?}",
            n_obs, n_params, sigma2, influential
        );

        Ok(Self {
            leverage,
            sigma2,
            standardized_residuals,
            cooks_distance,
            influential,
            unit_leverage,
            fitted: fitted.to_owned(),
            residuals: residuals.to_owned(),
            n_params,
        })
    }

    /// The diagonal of the hat matrix.
    pub fn leverage(&self) -> &Array1<F> {
        &self.leverage
    }

    /// The residual variance estimate sum(e^2) / (n - p).
    pub fn sigma2(&self) -> F {
        self.sigma2
    }

    /// e_i / (sigma * sqrt(1 - h_i)). NaN for unit-leverage observations.
    pub fn standardized_residuals(&self) -> &Array1<F> {
        &self.standardized_residuals
    }

    /// NaN for unit-leverage observations.
    pub fn cooks_distance(&self) -> &Array1<F> {
        &self.cooks_distance
    }

    /// Zero-based indices, ascending, of the observations with Cook's
    /// distance strictly above 4 / n.
    pub fn influential(&self) -> &[usize] {
        &self.influential
    }

    /// Zero-based indices, ascending, of the observations with (numerically)
    /// unit leverage.
    pub fn unit_leverage(&self) -> &[usize] {
        &self.unit_leverage
    }

    /// The fitted values the diagnostics were computed for.
    pub fn fitted(&self) -> &Array1<F> {
        &self.fitted
    }

    /// The raw residuals the diagnostics were computed for.
    pub fn residuals(&self) -> &Array1<F> {
        &self.residuals
    }

    pub fn n_obs(&self) -> usize {
        self.leverage.len()
    }

    pub fn n_params(&self) -> usize {
        self.n_params
    }

    /// The conventional Cook's distance cutoff 4 / n. This is a rule of thumb,
    /// not a significance level.
    pub fn influence_threshold(&self) -> F {
        F::lit(4.) / F::from_count(self.n_obs())
    }

    /// Returns true if the observation has unit leverage.
    pub fn is_unit_leverage(&self, i: usize) -> bool {
        self.unit_leverage.binary_search(&i).is_ok()
    }

    /// Returns true if the observation is in the influential set.
    pub fn is_influential(&self, i: usize) -> bool {
        self.influential.binary_search(&i).is_ok()
    }

    /// Whether the leverage is the same for every observation with h < 1, i.e.
    /// its range is below 1e-10 times its mean. This happens for balanced
    /// designs, and leaves nothing to plot against.
    pub fn is_constant_leverage(&self) -> bool {
        let valid = self
            .leverage
            .iter()
            .enumerate()
            .filter(|(i, _)| !self.is_unit_leverage(*i))
            .map(|(_, &h)| h);
        let (count, sum, lo, hi) = valid.fold(
            (0usize, F::zero(), F::infinity(), F::neg_infinity()),
            |(count, sum, lo, hi), h| {
                (
                    count + 1,
                    sum + h,
                    num_traits::Float::min(lo, h),
                    num_traits::Float::max(hi, h),
                )
            },
        );
        if count == 0 {
            return true;
        }
        let mean = sum / F::from_count(count);
        hi - lo < F::lit(1e-10) * mean
    }

    /// The studentized residuals. These are the internally studentized
    /// residuals, which are the same values as the standardized residuals;
    /// the leave-one-out variant is not computed.
    pub fn studentized_residuals(&self) -> &Array1<F> {
        &self.standardized_residuals
    }

    /// sqrt(|r_i|) for each standardized residual r_i.
    pub fn sqrt_abs_residuals(&self) -> Array1<F> {
        self.standardized_residuals
            .mapv(|r| num_traits::Float::sqrt(num_traits::Float::abs(r)))
    }
}

/// The residual variance estimate sum(e^2) / (n - p).
pub fn residual_variance<F>(residuals: ArrayView1<F>, n_params: usize) -> DiagnosticsResult<F>
where
    F: Float,
{
    let n_obs = residuals.len();
    if n_obs <= n_params {
        return Err(DiagnosticsError::InvalidModel { n_obs, n_params });
    }
    let rss: F = residuals.iter().fold(F::zero(), |acc, &e| acc + e * e);
    Ok(rss / F::from_count(n_obs - n_params))
}

/// The diagonal of the hat matrix of the design matrix `x`, with the default
/// co-linearity tolerance.
pub fn leverage<F>(x: ArrayView2<F>) -> DiagnosticsResult<Array1<F>>
where
    F: Float,
{
    leverage_with(x, DiagnosticOptions::<F>::default().colinearity_tol)
}

fn leverage_with<F>(x: ArrayView2<F>, colinearity_tol: F) -> DiagnosticsResult<Array1<F>>
where
    F: Float,
{
    let xtx: Array2<F> = x.t().dot(&x);
    let norms: Array1<F> = xtx.diag().to_owned();
    let factor = xtx.factorizec(UPLO::Lower).map_err(|err| {
        debug!("Cholesky factorization of X^T X failed: {}", err);
        DiagnosticsError::SingularDesign
    })?;
    let xtx_inv: Array2<F> = factor.invc()?;

    // The diagonal of the Cholesky factor is the norm of each column with the
    // previous columns projected out.
    let lower: Array2<F> = factor.into_lower();
    for (j, (&l_jj, &norm_sq)) in lower.diag().iter().zip(norms.iter()).enumerate() {
        let norm = num_traits::Float::sqrt(norm_sq);
        if !(norm > F::zero() && l_jj >= colinearity_tol * norm) {
            debug!("column {} of the design matrix is co-linear with the others", j);
            return Err(DiagnosticsError::SingularDesign);
        }
    }

    Ok((x.dot(&xtx_inv) * &x).sum_axis(Axis(1)))
}
