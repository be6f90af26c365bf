//! View 4: Cook's distance against observation number

use super::{influence_labels, zero_based_limits, ViewContext};
use crate::{
    panel::{Limits, PanelSpec, Point, RefLine},
    selection::View,
};

pub fn cooks_distance(ctx: &ViewContext) -> PanelSpec {
    let diag = ctx.diagnostics;
    let n_obs = diag.n_obs();
    let usable: Vec<(usize, f64, f64)> = diag
        .cooks_distance()
        .iter()
        .enumerate()
        .filter(|(_, d)| d.is_finite())
        .map(|(i, &d)| (i, (i + 1) as f64, d))
        .collect();
    let points: Vec<Point> = usable.iter().map(|&(_, x, y)| (x, y)).collect();
    let stems: Vec<(Point, Point)> = points.iter().map(|&(x, y)| ((x, 0.), (x, y))).collect();

    let x_limits = Limits::new(0.5, n_obs as f64 + 0.5);
    let y_limits = zero_based_limits(diag.cooks_distance().iter(), 1.075);
    let base = PanelSpec::base(View::CooksDistance, "Obs. number", "Cook's distance");
    if !ctx.styled {
        return PanelSpec {
            points,
            stems,
            x_limits,
            y_limits,
            ..base
        };
    }

    PanelSpec {
        labels: influence_labels(ctx, usable, &y_limits),
        reference_lines: vec![RefLine::Horizontal(diag.influence_threshold())],
        points,
        stems,
        x_limits,
        y_limits,
        ..base
    }
}
