//! View 5: standardized residuals against leverage, with Cook's distance
//! contours.
//!
//! An observation with leverage h and standardized residual r has Cook's
//! distance r^2 h / (p (1 - h)), so the contour of level D is
//! r = ±sqrt(D p (1 - h) / h).

use super::{
    format_level, influence_labels, symmetric_limits, trend_curve, ViewContext, CURVE_SAMPLES,
};
use crate::{
    panel::{Annotation, Curve, Limits, PanelSpec, Point, RefLine},
    selection::View,
    utility::{finite_range, linspace},
};
use log::warn;

/// The Cook's distance levels drawn as contours.
pub const COOK_LEVELS: [f64; 2] = [0.5, 1.0];
/// The contours are not drawn closer to h = 0 or h = 1 than this.
const LEVERAGE_MARGIN: f64 = 0.001;

pub fn residuals_vs_leverage(ctx: &ViewContext) -> PanelSpec {
    let diag = ctx.diagnostics;
    let base = PanelSpec::base(
        View::ResidualsVsLeverage,
        "Leverage",
        "Standardized residuals",
    );
    if diag.is_constant_leverage() {
        warn!("leverage is constant across observations; no residuals vs leverage plot");
        return PanelSpec {
            y_limits: Limits::symmetric(1.),
            placeholder: Some("Constant leverage: no plot".to_string()),
            ..base
        };
    }

    // unit-leverage observations carry a NaN residual and drop out here
    let usable: Vec<(usize, f64, f64)> = diag
        .leverage()
        .iter()
        .zip(diag.standardized_residuals().iter())
        .enumerate()
        .filter(|(_, (&h, &r))| h < 1. && r.is_finite())
        .map(|(i, (&h, &r))| (i, h, r))
        .collect();
    let points: Vec<Point> = usable.iter().map(|&(_, h, r)| (h, r)).collect();
    let leverage_range = finite_range(points.iter().map(|(h, _)| h));

    let x_limits = Limits::new(0., 1.04 * leverage_range.map_or(1., |(_, hi)| hi));
    let y_limits = symmetric_limits(points.iter().map(|(_, r)| r), 1.1);
    if !ctx.styled {
        return PanelSpec {
            points,
            x_limits,
            y_limits,
            ..base
        };
    }

    let mut contours = Vec::new();
    let mut margin_labels = Vec::new();
    if let Some((h_min, h_max)) = leverage_range {
        let lo = h_min.max(LEVERAGE_MARGIN);
        let hi = h_max.min(1. - LEVERAGE_MARGIN);
        if lo < hi {
            let n_params = diag.n_params();
            for &level in COOK_LEVELS.iter() {
                let upper = cook_contour(level, n_params, lo, hi, CURVE_SAMPLES);
                let lower: Vec<Point> = upper.iter().map(|&(h, r)| (h, -r)).collect();
                if let Some(&(h_edge, r_edge)) = upper.last() {
                    for &y in [r_edge, -r_edge].iter() {
                        margin_labels.push(Annotation {
                            x: h_edge,
                            y,
                            text: format_level(level),
                        });
                    }
                }
                contours.push(Curve {
                    level: Some(level),
                    points: upper,
                });
                contours.push(Curve {
                    level: Some(level),
                    points: lower,
                });
            }
        }
    }

    PanelSpec {
        trend: trend_curve(ctx.smoother, &points),
        labels: influence_labels(ctx, usable, &y_limits),
        reference_lines: vec![RefLine::Horizontal(0.), RefLine::Vertical(0.)],
        points,
        contours,
        margin_labels,
        x_limits,
        y_limits,
        ..base
    }
}

/// The upper branch of the Cook's distance contour of the given level,
/// r(h) = sqrt(level * p * (1 - h) / h), sampled evenly over [lo, hi].
pub fn cook_contour(
    level: f64,
    n_params: usize,
    lo: f64,
    hi: f64,
    samples: usize,
) -> Vec<Point> {
    let scale = level * n_params as f64;
    linspace(lo, hi, samples)
        .into_iter()
        .map(|h| (h, (scale * (1. - h) / h).sqrt()))
        .collect()
}
