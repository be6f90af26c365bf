//! View 2: normal quantile-quantile plot of the standardized residuals

use super::{data_limits, influence_labels, ViewContext};
use crate::{
    panel::{PanelSpec, Point, RefLine},
    selection::View,
    stats::{normal_quantile, plotting_positions, quantile_type7},
};
use itertools::Itertools;
use std::cmp::Ordering;

pub fn normal_qq(ctx: &ViewContext) -> PanelSpec {
    let diag = ctx.diagnostics;
    // Observation numbers of the usable residuals in ascending residual order.
    // Ties keep observation order.
    let order: Vec<usize> = diag
        .standardized_residuals()
        .iter()
        .enumerate()
        .filter(|(_, r)| r.is_finite())
        .map(|(i, _)| i)
        .sorted_by(|&a, &b| {
            diag.standardized_residuals()[a]
                .partial_cmp(&diag.standardized_residuals()[b])
                .unwrap_or(Ordering::Equal)
        })
        .collect();
    let sorted: Vec<f64> = order
        .iter()
        .map(|&i| diag.standardized_residuals()[i])
        .collect();
    let theoretical: Vec<f64> = plotting_positions(sorted.len())
        .into_iter()
        .map(normal_quantile)
        .collect();
    let points: Vec<Point> = theoretical
        .iter()
        .copied()
        .zip(sorted.iter().copied())
        .collect();

    let x_limits = data_limits(&theoretical);
    let y_limits = data_limits(&sorted);
    let base = PanelSpec::base(
        View::NormalQq,
        "Theoretical Quantiles",
        "Standardized residuals",
    );
    if !ctx.styled {
        return PanelSpec {
            points,
            x_limits,
            y_limits,
            ..base
        };
    }

    let reference_lines = quartile_line(&sorted, &theoretical)
        .into_iter()
        .collect();
    // each point sits at the sorted position of its observation
    let labels = influence_labels(
        ctx,
        order
            .iter()
            .zip(points.iter())
            .map(|(&i, &(x, y))| (i, x, y)),
        &y_limits,
    );
    PanelSpec {
        points,
        reference_lines,
        x_limits,
        y_limits,
        labels,
        ..base
    }
}

/// The line through the first and third quartiles of the sample against the
/// same normal quantiles, spanning the range of the theoretical quantiles.
fn quartile_line(sorted: &[f64], theoretical: &[f64]) -> Option<RefLine> {
    if sorted.is_empty() {
        return None;
    }
    let (y1, y2) = (quantile_type7(sorted, 0.25), quantile_type7(sorted, 0.75));
    let (x1, x2) = (normal_quantile(0.25), normal_quantile(0.75));
    let slope = (y2 - y1) / (x2 - x1);
    let intercept = y1 - slope * x1;
    // the theoretical quantiles are ascending
    let lo = theoretical.first().copied().unwrap_or(x1);
    let hi = theoretical.last().copied().unwrap_or(x2);
    Some(RefLine::Segment {
        from: (lo, intercept + slope * lo),
        to: (hi, intercept + slope * hi),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn line_through_quartiles() {
        let sorted = [-1.5, -0.5, 0., 0.5, 1.5];
        let theo: Vec<f64> = plotting_positions(5)
            .into_iter()
            .map(normal_quantile)
            .collect();
        match quartile_line(&sorted, &theo) {
            Some(RefLine::Segment { from, to }) => {
                // symmetric sample gives a line through the origin
                assert_abs_diff_eq!(from.0, theo[0]);
                assert_abs_diff_eq!(to.0, theo[4]);
                assert_abs_diff_eq!(from.1, -to.1, epsilon = 1e-12);
                let slope = 0.5 / normal_quantile(0.75);
                assert_abs_diff_eq!(to.1, slope * theo[4], epsilon = 1e-12);
            }
            other => panic!("unexpected reference line {:?}", other),
        }
        assert!(quartile_line(&[], &[]).is_none());
    }
}
