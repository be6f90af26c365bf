//! View 1: residuals against fitted values

use super::{fitted_limits, influence_labels, symmetric_limits, trend_curve, ViewContext};
use crate::{
    panel::{PanelSpec, Point, RefLine},
    selection::View,
};

pub fn residuals_vs_fitted(ctx: &ViewContext) -> PanelSpec {
    let diag = ctx.diagnostics;
    let points: Vec<Point> = diag
        .fitted()
        .iter()
        .zip(diag.residuals().iter())
        .map(|(&x, &y)| (x, y))
        .collect();
    let x_limits = fitted_limits(diag.fitted().iter());
    let y_limits = symmetric_limits(diag.residuals().iter(), 1.1);
    let base = PanelSpec::base(View::ResidualsVsFitted, "Fitted values", "Residuals");
    if !ctx.styled {
        return PanelSpec {
            points,
            x_limits,
            y_limits,
            ..base
        };
    }

    let labels = influence_labels(
        ctx,
        points.iter().enumerate().map(|(i, &(x, y))| (i, x, y)),
        &y_limits,
    );
    PanelSpec {
        trend: trend_curve(ctx.smoother, &points),
        reference_lines: vec![RefLine::Horizontal(0.)],
        points,
        x_limits,
        y_limits,
        labels,
        ..base
    }
}
