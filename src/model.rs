//! Collect the outputs of a fitted linear model

use crate::{
    diagnostics::{DiagnosticOptions, Diagnostics},
    error::{DiagnosticsError, DiagnosticsResult},
    num::Float,
    utility::one_pad,
};
use ndarray::{Array1, Array2, ArrayView1, ArrayView2};

/// The standard outputs of an ordinary least-squares fit. The fit itself is
/// performed elsewhere; this only holds what the diagnostics need. Built
/// through `FittedModelBuilder`, read-only afterwards.
#[derive(Debug, Clone)]
pub struct FittedModel<F>
where
    F: Float,
{
    /// the observed response by event
    y: Array1<F>,
    /// the design matrix with events in rows and parameters in columns
    x: Array2<F>,
    fitted: Array1<F>,
    residuals: Array1<F>,
    coefficients: Option<Array1<F>>,
}

impl<F> FittedModel<F>
where
    F: Float,
{
    pub fn y(&self) -> &Array1<F> {
        &self.y
    }

    /// The design matrix, including the intercept column if one was added.
    pub fn x(&self) -> &Array2<F> {
        &self.x
    }

    /// The fitted values, X * beta
    pub fn fitted(&self) -> &Array1<F> {
        &self.fitted
    }

    /// y - fitted
    pub fn residuals(&self) -> &Array1<F> {
        &self.residuals
    }

    /// The regression parameters, if they were provided.
    pub fn coefficients(&self) -> Option<&Array1<F>> {
        self.coefficients.as_ref()
    }

    /// The number of observations
    pub fn n_obs(&self) -> usize {
        self.y.len()
    }

    /// The number of parameters, i.e. the number of columns of the design
    /// matrix.
    pub fn n_params(&self) -> usize {
        self.x.ncols()
    }

    /// Number of degrees of freedom of the residuals. Always positive for a
    /// built model.
    pub fn ndf(&self) -> usize {
        self.n_obs() - self.n_params()
    }

    /// Compute the per-observation diagnostics with the default tolerances.
    pub fn diagnostics(&self) -> DiagnosticsResult<Diagnostics<F>> {
        self.diagnostics_with(&DiagnosticOptions::default())
    }

    /// Compute the per-observation diagnostics with custom tolerances.
    pub fn diagnostics_with(
        &self,
        options: &DiagnosticOptions<F>,
    ) -> DiagnosticsResult<Diagnostics<F>> {
        Diagnostics::compute_with(
            self.x.view(),
            self.residuals.view(),
            self.fitted.view(),
            self.n_params(),
            options,
        )
    }
}

/// Provides an interface to create the fitted model struct with convenient
/// type inference.
pub struct FittedModelBuilder;

impl FittedModelBuilder {
    /// Borrow the Y and X data where each row in the arrays is a new
    /// observation. Either the coefficients or the fitted values must be
    /// supplied before building.
    pub fn data<'a, F>(
        data_y: ArrayView1<'a, F>,
        data_x: ArrayView2<'a, F>,
    ) -> FittedModelData<'a, F>
    where
        F: Float,
    {
        FittedModelData {
            data_y,
            data_x,
            fitted: None,
            coefficients: None,
            add_intercept: false,
        }
    }
}

/// Holds the borrowed data and the fit outputs and provides functions to
/// adjust the settings.
pub struct FittedModelData<'a, F>
where
    F: Float,
{
    data_y: ArrayView1<'a, F>,
    data_x: ArrayView2<'a, F>,
    /// Fitted values supplied directly by the caller.
    fitted: Option<Array1<F>>,
    coefficients: Option<Array1<F>>,
    /// Whether to prepend a constant column to X. Defaults to `false`, since
    /// the design matrix of a fit usually includes it already.
    add_intercept: bool,
}

impl<'a, F> FittedModelData<'a, F>
where
    F: Float,
{
    /// The fitted parameters. If no fitted values are given they are derived
    /// as X * beta.
    pub fn coefficients(mut self, coefficients: Array1<F>) -> Self {
        self.coefficients = Some(coefficients);
        self
    }

    /// The fitted values of the model. These take precedence over X * beta.
    pub fn fitted(mut self, fitted: Array1<F>) -> Self {
        self.fitted = Some(fitted);
        self
    }

    /// Prepend a column of ones to the design matrix.
    pub fn add_intercept(mut self) -> Self {
        self.add_intercept = true;
        self
    }

    pub fn build(self) -> DiagnosticsResult<FittedModel<F>> {
        let n_data = self.data_y.len();
        if n_data != self.data_x.nrows() {
            return Err(DiagnosticsError::BadInput(
                "y and x data must have same number of points".to_string(),
            ));
        }
        let data_x: Array2<F> = if self.add_intercept {
            one_pad(self.data_x)
        } else {
            self.data_x.to_owned()
        };
        let n_params = data_x.ncols();
        if n_params == 0 {
            return Err(DiagnosticsError::BadInput(
                "design matrix has no columns".to_string(),
            ));
        }
        if n_data <= n_params {
            return Err(DiagnosticsError::InvalidModel {
                n_obs: n_data,
                n_params,
            });
        }
        if let Some(beta) = &self.coefficients {
            if beta.len() != n_params {
                return Err(DiagnosticsError::BadInput(format!(
                    "{} coefficients given for {} columns of the design matrix",
                    beta.len(),
                    n_params
                )));
            }
        }
        let fitted: Array1<F> = match (self.fitted, &self.coefficients) {
            (Some(fitted), _) => fitted,
            (None, Some(beta)) => data_x.dot(beta),
            (None, None) => {
                return Err(DiagnosticsError::BadInput(
                    "either the fitted values or the coefficients are required".to_string(),
                ))
            }
        };
        if fitted.len() != n_data {
            return Err(DiagnosticsError::BadInput(
                "fitted values must have same dimension as observations".to_string(),
            ));
        }
        let all_finite = self
            .data_y
            .iter()
            .chain(data_x.iter())
            .chain(fitted.iter())
            .all(|&v| num_traits::Float::is_finite(v));
        if !all_finite {
            return Err(DiagnosticsError::BadInput(
                "model data must be finite".to_string(),
            ));
        }

        let data_y: Array1<F> = self.data_y.to_owned();
        let residuals: Array1<F> = &data_y - &fitted;
        Ok(FittedModel {
            y: data_y,
            x: data_x,
            fitted,
            residuals,
            coefficients: self.coefficients,
        })
    }
}
