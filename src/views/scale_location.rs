//! View 3: sqrt(|standardized residual|) against fitted values

use super::{fitted_limits, influence_labels, trend_curve, zero_based_limits, ViewContext};
use crate::{
    panel::{PanelSpec, Point},
    selection::View,
};

pub fn scale_location(ctx: &ViewContext) -> PanelSpec {
    let diag = ctx.diagnostics;
    let root_abs = diag.sqrt_abs_residuals();
    // (observation, fitted, sqrt|r|) for the observations with a defined residual
    let usable: Vec<(usize, f64, f64)> = diag
        .fitted()
        .iter()
        .zip(root_abs.iter())
        .enumerate()
        .filter(|(_, (_, y))| y.is_finite())
        .map(|(i, (&x, &y))| (i, x, y))
        .collect();
    let points: Vec<Point> = usable.iter().map(|&(_, x, y)| (x, y)).collect();

    let x_limits = fitted_limits(diag.fitted().iter());
    let y_limits = zero_based_limits(root_abs.iter(), 1.1);
    let base = PanelSpec::base(
        View::ScaleLocation,
        "Fitted values",
        "√|Standardized residuals|",
    );
    if !ctx.styled {
        return PanelSpec {
            points,
            x_limits,
            y_limits,
            ..base
        };
    }

    PanelSpec {
        trend: trend_curve(ctx.smoother, &points),
        labels: influence_labels(ctx, usable, &y_limits),
        points,
        x_limits,
        y_limits,
        ..base
    }
}
