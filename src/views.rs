//! Generators for the six diagnostic panels.
//!
//! Each generator is a pure function of the diagnostics, the trend smoother
//! and the styling flag. With styling off only the scatter, the axis limits
//! and the axis ticks are produced; the trend curve, reference lines,
//! contours and point labels are left out.

use crate::{
    diagnostics::Diagnostics,
    panel::{Annotation, Limits, PanelSpec, Point},
    selection::View,
    smooth::Smoother,
    utility::{finite_range, linspace},
};
use std::cmp::Ordering;

pub mod cooks_distance;
pub mod cooks_leverage;
pub mod normal_qq;
pub mod residuals_fitted;
pub mod residuals_leverage;
pub mod scale_location;

pub use cooks_distance::cooks_distance;
pub use cooks_leverage::{cooks_vs_leverage, residual_level_line};
pub use normal_qq::normal_qq;
pub use residuals_fitted::residuals_vs_fitted;
pub use residuals_leverage::{cook_contour, residuals_vs_leverage};
pub use scale_location::scale_location;

/// Number of points at which trend curves and contours are sampled.
pub const CURVE_SAMPLES: usize = 100;
/// Below this many points no trend curve is fit.
pub const MIN_SMOOTH_OBS: usize = 4;
/// Point labels sit this fraction of the y-axis span above their point.
const LABEL_OFFSET: f64 = 0.025;
/// Fraction of the data range added on each side of an axis without a
/// prescribed range.
const AXIS_PAD: f64 = 0.04;

/// The inputs shared by all view generators.
pub struct ViewContext<'a> {
    pub diagnostics: &'a Diagnostics<f64>,
    pub smoother: &'a dyn Smoother,
    /// Whether to add the trend curves, reference lines, contours and labels.
    pub styled: bool,
    /// Observations that get a label, ascending.
    labeled: Vec<usize>,
}

impl<'a> ViewContext<'a> {
    /// Label every influential observation, or with a `label_limit` only that
    /// many of them, those with the largest Cook's distance.
    pub fn new(
        diagnostics: &'a Diagnostics<f64>,
        smoother: &'a dyn Smoother,
        styled: bool,
        label_limit: Option<usize>,
    ) -> Self {
        let mut labeled: Vec<usize> = diagnostics.influential().to_vec();
        if let Some(limit) = label_limit {
            let cooks = diagnostics.cooks_distance();
            // influential distances are finite, and ties keep observation order
            labeled.sort_by(|&a, &b| cooks[b].partial_cmp(&cooks[a]).unwrap_or(Ordering::Equal));
            labeled.truncate(limit);
            labeled.sort_unstable();
        }
        Self {
            diagnostics,
            smoother,
            styled,
            labeled,
        }
    }

    /// Whether the observation gets a label.
    pub fn is_labeled(&self, obs: usize) -> bool {
        self.labeled.binary_search(&obs).is_ok()
    }
}

/// Build the panel for one view.
pub fn build_view(view: View, ctx: &ViewContext) -> PanelSpec {
    match view {
        View::ResidualsVsFitted => residuals_vs_fitted(ctx),
        View::NormalQq => normal_qq(ctx),
        View::ScaleLocation => scale_location(ctx),
        View::CooksDistance => cooks_distance(ctx),
        View::ResidualsVsLeverage => residuals_vs_leverage(ctx),
        View::CooksVsLeverage => cooks_vs_leverage(ctx),
    }
}

/// The smoothed trend of the points, sampled evenly across their x range.
pub(crate) fn trend_curve(smoother: &dyn Smoother, points: &[Point]) -> Option<Vec<Point>> {
    if points.len() < MIN_SMOOTH_OBS {
        return None;
    }
    let (x, y): (Vec<f64>, Vec<f64>) = points.iter().copied().unzip();
    let (lo, hi) = finite_range(&x)?;
    let grid = linspace(lo, hi, CURVE_SAMPLES);
    let fit = smoother.smooth(&x, &y, &grid);
    let curve: Vec<Point> = grid
        .into_iter()
        .zip(fit.into_iter())
        .filter(|(_, y)| y.is_finite())
        .collect();
    if curve.is_empty() {
        None
    } else {
        Some(curve)
    }
}

/// Observation-number labels (1-based) for the labeled points among
/// `points`, given as (observation, x, y).
pub(crate) fn influence_labels<I>(
    ctx: &ViewContext,
    points: I,
    y_limits: &Limits,
) -> Vec<Annotation>
where
    I: IntoIterator<Item = (usize, f64, f64)>,
{
    let offset = LABEL_OFFSET * y_limits.span();
    points
        .into_iter()
        .filter(|&(i, _, _)| ctx.is_labeled(i))
        .map(|(i, x, y)| Annotation {
            x,
            y: y + offset,
            text: (i + 1).to_string(),
        })
        .collect()
}

/// [min - 0.5, max + 0.5] of the fitted values.
pub(crate) fn fitted_limits<'a, I>(fitted: I) -> Limits
where
    I: IntoIterator<Item = &'a f64>,
{
    match finite_range(fitted) {
        Some((lo, hi)) => Limits::new(lo - 0.5, hi + 0.5),
        None => Limits::new(-0.5, 0.5),
    }
}

/// Symmetric about zero at `scale` times the largest absolute value.
pub(crate) fn symmetric_limits<'a, I>(values: I, scale: f64) -> Limits
where
    I: IntoIterator<Item = &'a f64>,
{
    Limits::symmetric(scale * positive_max(values.into_iter().map(|v| v.abs())))
}

/// [0, scale * max]
pub(crate) fn zero_based_limits<'a, I>(values: I, scale: f64) -> Limits
where
    I: IntoIterator<Item = &'a f64>,
{
    Limits::new(0., scale * positive_max(values.into_iter().copied()))
}

/// The data range with the default padding.
pub(crate) fn data_limits<'a, I>(values: I) -> Limits
where
    I: IntoIterator<Item = &'a f64>,
{
    match finite_range(values) {
        Some((lo, hi)) => Limits::padded(lo, hi, AXIS_PAD),
        None => Limits::new(0., 1.),
    }
}

/// The largest finite value, or one if there is no positive value so that the
/// axis keeps a non-zero span.
fn positive_max<I>(values: I) -> f64
where
    I: Iterator<Item = f64>,
{
    let max = values.filter(|v| v.is_finite()).fold(0., f64::max);
    if max > 0. {
        max
    } else {
        1.
    }
}

/// Display text for a contour level or tick value, e.g. "0.5" or "1".
pub(crate) fn format_level(level: f64) -> String {
    format!("{}", level)
}
