//! Trend smoothing for the diagnostic panels.
//!
//! The default smoother fits LOESS at the observed x values and reads the
//! trend off the polyline through the sorted fit, the way a scatterplot
//! smooth is drawn.

use itertools::Itertools;
use log::warn;
use loess_rs::prelude as loess;
use std::cmp::Ordering;

/// A scatterplot smoother. Given identical inputs it must return identical
/// outputs, and it must accept repeated x values. Nothing is guaranteed for
/// query points outside the range of `x`.
pub trait Smoother {
    /// Predict the smoothed y value at each of the query points `at`.
    fn smooth(&self, x: &[f64], y: &[f64], at: &[f64]) -> Vec<f64>;
}

/// The degree of the local polynomial.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Degree {
    Linear,
    Quadratic,
}

/// Local polynomial regression without robustness iterations.
#[derive(Debug, Clone)]
pub struct Loess {
    /// The fraction of the points used in each local fit, in (0, 1].
    span: f64,
    degree: Degree,
}

impl Default for Loess {
    fn default() -> Self {
        Self {
            span: 2. / 3.,
            degree: Degree::Quadratic,
        }
    }
}

impl Loess {
    /// A local quadratic smoother with the given span. Spans outside of
    /// (0, 1] are clamped into it.
    pub fn new(span: f64) -> Self {
        Self {
            span: if span.is_finite() {
                span.max(f64::EPSILON).min(1.)
            } else {
                1.
            },
            ..Self::default()
        }
    }

    pub fn degree(mut self, degree: Degree) -> Self {
        self.degree = degree;
        self
    }

    pub fn span(&self) -> f64 {
        self.span
    }

    /// The smoothed values at the observed x, in input order.
    fn fit(&self, x: &[f64], y: &[f64]) -> Result<Vec<f64>, loess::LoessError> {
        let builder = loess::Loess::new()
            .fraction(self.span)
            .iterations(0)
            .surface_mode(loess::Direct)
            .boundary_policy(loess::NoBoundary);
        let builder = match self.degree {
            Degree::Linear => builder.degree(loess::Linear),
            Degree::Quadratic => builder.degree(loess::Quadratic),
        };
        let result = builder.adapter(loess::Batch).build()?.fit(x, y)?;
        Ok(result.y)
    }
}

impl Smoother for Loess {
    fn smooth(&self, x: &[f64], y: &[f64], at: &[f64]) -> Vec<f64> {
        let n_data = x.len().min(y.len());
        let (x, y) = (&x[..n_data], &y[..n_data]);
        let fitted = match self.fit(x, y) {
            Ok(fitted) => fitted,
            Err(err) => {
                warn!("LOESS fit of {} points failed: {}", n_data, err);
                return vec![f64::NAN; at.len()];
            }
        };
        // Repeated x share a local fit, so one vertex per distinct x.
        let mut curve: Vec<(f64, f64)> = x
            .iter()
            .copied()
            .zip(fitted.into_iter())
            .sorted_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(Ordering::Equal))
            .collect();
        curve.dedup_by(|a, b| a.0 == b.0);
        at.iter().map(|&x0| interpolate(&curve, x0)).collect()
    }
}

/// Linear interpolation along a polyline with strictly increasing x. Values
/// beyond either end are held at the end value.
fn interpolate(curve: &[(f64, f64)], x0: f64) -> f64 {
    let (first, last) = match (curve.first(), curve.last()) {
        (Some(first), Some(last)) => (*first, *last),
        _ => return f64::NAN,
    };
    if x0 <= first.0 {
        return first.1;
    }
    if x0 >= last.0 {
        return last.1;
    }
    // the first vertex strictly right of x0; 1 <= upper < len here
    let upper = curve.partition_point(|&(x, _)| x <= x0);
    let (x_lo, y_lo) = curve[upper - 1];
    let (x_hi, y_hi) = curve[upper];
    y_lo + (y_hi - y_lo) * (x0 - x_lo) / (x_hi - x_lo)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn quadratic_at_observed_points() {
        let x: Vec<f64> = (0..20).map(|i| i as f64 * 0.5).collect();
        let y: Vec<f64> = x.iter().map(|&x| 1. - 0.3 * x + 0.2 * x * x).collect();
        let pred = Loess::default().smooth(&x, &y, &x);
        for (p, &y0) in pred.iter().zip(y.iter()) {
            assert_abs_diff_eq!(*p, y0, epsilon = 1e-8);
        }
    }

    #[test]
    fn line_between_observed_points() {
        let x = [1., 2., 3., 4., 5., 6.];
        let y = [0.5, 1., 1.5, 2., 2.5, 3.];
        let pred = Loess::new(0.75)
            .degree(Degree::Linear)
            .smooth(&x, &y, &[1., 3.5, 6.]);
        assert_abs_diff_eq!(pred[0], 0.5, epsilon = 1e-8);
        assert_abs_diff_eq!(pred[1], 1.75, epsilon = 1e-8);
        assert_abs_diff_eq!(pred[2], 3., epsilon = 1e-8);
    }

    #[test]
    fn unsorted_input() {
        let x = [5., 1., 4., 2., 6., 3.];
        let y: Vec<f64> = x.iter().map(|&x| 2. * x - 1.).collect();
        let pred = Loess::default().smooth(&x, &y, &[2.5, 4.25]);
        assert_abs_diff_eq!(pred[0], 4., epsilon = 1e-8);
        assert_abs_diff_eq!(pred[1], 7.5, epsilon = 1e-8);
    }

    #[test]
    fn repeated_x_values() {
        let x = [1., 1., 1., 2., 2., 2., 3., 3., 3.];
        let y = [0., 1., 2., 3., 4., 5., 6., 7., 8.];
        let pred = Loess::new(1.)
            .degree(Degree::Linear)
            .smooth(&x, &y, &[1., 1.5, 3.]);
        assert!(pred.iter().all(|p| p.is_finite()));
    }

    #[test]
    fn deterministic() {
        let x = [0.3, 1.2, 0.7, 2.2, 1.9, 0.1, 1.5];
        let y = [1., -0.5, 0.2, 0.9, -1.1, 0.4, 0.3];
        let at = [0.5, 1., 1.5, 2.];
        let smoother = Loess::default();
        assert_eq!(smoother.smooth(&x, &y, &at), smoother.smooth(&x, &y, &at));
    }

    #[test]
    fn too_little_data_gives_nan() {
        let pred = Loess::default().smooth(&[1.], &[2.], &[1., 2.]);
        assert_eq!(pred.len(), 2);
        assert!(pred.iter().all(|p| p.is_nan()));
    }

    #[test]
    fn span_is_clamped() {
        assert_eq!(Loess::new(3.).span(), 1.);
        assert!(Loess::new(-1.).span() > 0.);
    }

    #[test]
    fn polyline_interpolation() {
        let curve = [(0., 0.), (1., 2.), (3., 0.)];
        assert_abs_diff_eq!(interpolate(&curve, 0.5), 1.);
        assert_abs_diff_eq!(interpolate(&curve, 2.), 1.);
        assert_abs_diff_eq!(interpolate(&curve, 1.), 2.);
        assert_abs_diff_eq!(interpolate(&curve, -1.), 0.);
        assert_abs_diff_eq!(interpolate(&curve, 4.), 0.);
        assert!(interpolate(&[], 1.).is_nan());
    }
}
