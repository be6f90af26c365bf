//! Regression diagnostics for linear models fit to data stored in arrays.
//!
//! The [`Diagnostics`] engine computes the leverage, standardized residuals,
//! Cook's distance and influential observations of a fitted model. The
//! [`Figure`] builder turns them into the numeric content of the six classic
//! diagnostic panels (residuals vs fitted, normal Q-Q, scale-location, Cook's
//! distance, residuals vs leverage, and Cook's distance vs h/(1-h)), ready to
//! be drawn by any plotting backend.
//!
//! ```no_run
//! use ndarray::array;
//! use ndarray_lm_diagnostics::{Figure, FittedModelBuilder, PlotOptions};
//!
//! # fn main() -> ndarray_lm_diagnostics::error::DiagnosticsResult<()> {
//! let y = array![1.1, 1.8, 3.05, 4.1, 4.95];
//! let x = array![[1.], [2.], [3.], [4.], [5.]];
//! let model = FittedModelBuilder::data(y.view(), x.view())
//!     .add_intercept()
//!     .coefficients(array![0.06, 0.99])
//!     .build()?;
//! let figure = Figure::build(&model, &PlotOptions::default().which(vec![1, 2, 5]))?;
//! assert_eq!(figure.rows, 2);
//! # Ok(())
//! # }
//! ```

pub mod diagnostics;
pub mod error;
pub mod figure;
pub mod model;
pub mod num;
pub mod panel;
pub mod selection;
pub mod smooth;
pub mod stats;
mod utility;
pub mod views;

pub use diagnostics::{DiagnosticOptions, Diagnostics};
pub use figure::{Figure, PlacedPanel, PlotOptions};
pub use model::{FittedModel, FittedModelBuilder};
pub use panel::PanelSpec;
pub use selection::{panel_position, Selection, View};
pub use smooth::{Loess, Smoother};
