//! View 6: Cook's distance against the leverage ratio g = h / (1 - h).
//!
//! The x axis is in units of g but is ticked at round leverage values and
//! labeled with those leverages.

use super::{data_limits, format_level, influence_labels, zero_based_limits, ViewContext};
use crate::{
    panel::{Annotation, Curve, Limits, PanelSpec, Point, Tick},
    selection::View,
    utility::finite_range,
};

/// Leverage values at which the x axis is ticked.
pub const LEVERAGE_TICKS: [f64; 5] = [0.1, 0.2, 0.3, 0.4, 0.5];
/// Standardized residual levels drawn as lines through the origin.
pub const RESIDUAL_LEVELS: [f64; 4] = [0.5, 1.0, 1.5, 2.0];

pub fn cooks_vs_leverage(ctx: &ViewContext) -> PanelSpec {
    let diag = ctx.diagnostics;
    let usable: Vec<(usize, f64, f64)> = diag
        .leverage()
        .iter()
        .zip(diag.cooks_distance().iter())
        .enumerate()
        .filter(|(_, (&h, &d))| h < 1. && d.is_finite())
        .map(|(i, (&h, &d))| (i, leverage_ratio(h), d))
        .collect();
    let points: Vec<Point> = usable.iter().map(|&(_, g, d)| (g, d)).collect();

    let g_max = finite_range(points.iter().map(|(g, _)| g)).map(|(_, hi)| hi);
    let x_limits = match g_max {
        Some(g_max) if g_max > 0. => Limits::new(0., 1.04 * g_max),
        _ => data_limits(points.iter().map(|(g, _)| g)),
    };
    let y_limits = zero_based_limits(points.iter().map(|(_, d)| d), 1.025);
    let x_ticks = Some(leverage_ticks());
    let base = PanelSpec::base(View::CooksVsLeverage, "Leverage h", "Cook's distance");
    if !ctx.styled {
        return PanelSpec {
            points,
            x_limits,
            y_limits,
            x_ticks,
            ..base
        };
    }

    let mut contours = Vec::new();
    let mut margin_labels = Vec::new();
    if g_max.is_some() {
        // drawn across to the edge of the plotting region
        for &level in RESIDUAL_LEVELS.iter() {
            let (end, label) = residual_level_line(level, x_limits.hi, y_limits.hi);
            contours.push(Curve {
                level: Some(level),
                points: vec![(0., 0.), end],
            });
            margin_labels.push(label);
        }
    }

    PanelSpec {
        labels: influence_labels(ctx, usable, &y_limits),
        points,
        contours,
        margin_labels,
        x_limits,
        y_limits,
        x_ticks,
        ..base
    }
}

/// h / (1 - h)
fn leverage_ratio(h: f64) -> f64 {
    h / (1. - h)
}

/// Ticks at the g positions of the round leverage values, labeled with the
/// leverage values themselves.
fn leverage_ticks() -> Vec<Tick> {
    LEVERAGE_TICKS
        .iter()
        .map(|&h| Tick {
            position: leverage_ratio(h),
            label: format_level(h),
        })
        .collect()
}

/// The line y = level^2 * x from the origin across to `x_max`, or, if it
/// would leave the plot first, up to where it meets `y_max`. Returns the end
/// point of the line and its label, placed at that end point.
pub fn residual_level_line(level: f64, x_max: f64, y_max: f64) -> (Point, Annotation) {
    let slope = level * level;
    let end = if slope * x_max <= y_max {
        (x_max, slope * x_max)
    } else {
        (y_max / slope, y_max)
    };
    let label = Annotation {
        x: end.0,
        y: end.1,
        text: format_level(level),
    };
    (end, label)
}
