//! define the error enum for the result of diagnostics

use ndarray_linalg::error::LinalgError;
use thiserror::Error;

/// Fatal conditions that abort a diagnostics call before any panel is built.
/// Degenerate leverage and sparse smoothing data are not errors; they are
/// handled per panel.
#[derive(Error, Debug)]
pub enum DiagnosticsError {
    #[error("Inconsistent input: {0}")]
    BadInput(String),
    /// There must be strictly more observations than parameters so that the
    /// residual variance has at least one degree of freedom.
    #[error("Invalid model: {n_obs} observations for {n_params} parameters")]
    InvalidModel { n_obs: usize, n_params: usize },
    #[error("Singular design matrix")]
    SingularDesign,
    #[error("Linear algebra")]
    LinalgError {
        #[from]
        source: LinalgError,
    },
}

pub type DiagnosticsResult<T> = Result<T, DiagnosticsError>;
