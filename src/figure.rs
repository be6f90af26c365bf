//! Assemble the selected diagnostic panels into a grid.

use crate::{
    diagnostics::Diagnostics,
    error::DiagnosticsResult,
    model::FittedModel,
    panel::PanelSpec,
    selection::{grid_shape, panel_position, Selection, View},
    smooth::{Loess, Smoother},
    views::{build_view, ViewContext},
};
use log::debug;

/// Options controlling which panels are built and how they are decorated.
#[derive(Debug, Clone)]
pub struct PlotOptions {
    /// The views to build. Defaults to 1, 2, 3, and 5.
    pub selection: Selection,
    /// Whether to add the trend curves, reference lines, contours, and point
    /// labels. Defaults to `true`.
    pub styled: bool,
    /// The span of the default trend smoother. Defaults to 2/3.
    pub span: f64,
    /// At most this many influential points are labeled in each panel, those
    /// with the largest Cook's distance. Defaults to `None`, labeling all.
    pub label_limit: Option<usize>,
}

impl Default for PlotOptions {
    fn default() -> Self {
        Self {
            selection: Selection::default(),
            styled: true,
            span: 2. / 3.,
            label_limit: None,
        }
    }
}

impl PlotOptions {
    /// Select the views by number. Numbers outside 1..=6 are ignored.
    pub fn which<I>(mut self, views: I) -> Self
    where
        I: IntoIterator<Item = i64>,
    {
        self.selection = Selection::new(views);
        self
    }

    pub fn styled(mut self, styled: bool) -> Self {
        self.styled = styled;
        self
    }

    /// Label at most `count` influential points per panel.
    pub fn label_count(mut self, count: usize) -> Self {
        self.label_limit = Some(count);
        self
    }

    /// Use a different span for the default trend smoother.
    pub fn span(mut self, span: f64) -> Self {
        self.span = span;
        self
    }
}

/// A panel and its cell in the grid.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedPanel {
    pub row: usize,
    pub col: usize,
    pub spec: PanelSpec,
}

/// The full set of diagnostic panels, two per row, in selection order.
#[derive(Debug, Clone, PartialEq)]
pub struct Figure {
    pub rows: usize,
    pub cols: usize,
    pub panels: Vec<PlacedPanel>,
}

impl Figure {
    /// Compute the diagnostics of the model and build the selected panels,
    /// smoothing trends with the default LOESS smoother.
    pub fn build(model: &FittedModel<f64>, options: &PlotOptions) -> DiagnosticsResult<Self> {
        let smoother = Loess::new(options.span);
        Self::build_with(model, options, &smoother)
    }

    /// As `build`, with a caller-provided trend smoother.
    pub fn build_with<S>(
        model: &FittedModel<f64>,
        options: &PlotOptions,
        smoother: &S,
    ) -> DiagnosticsResult<Self>
    where
        S: Smoother,
    {
        let diagnostics = model.diagnostics()?;
        Ok(Self::from_diagnostics(&diagnostics, options, smoother))
    }

    /// Build the selected panels from already computed diagnostics.
    pub fn from_diagnostics(
        diagnostics: &Diagnostics<f64>,
        options: &PlotOptions,
        smoother: &dyn Smoother,
    ) -> Self {
        let ctx = ViewContext::new(diagnostics, smoother, options.styled, options.label_limit);
        let views = options.selection.views();
        let total = views.len();
        let (rows, cols) = grid_shape(total);
        let panels: Vec<PlacedPanel> = views
            .iter()
            .enumerate()
            .filter_map(|(rank, &view)| {
                let (row, col) = panel_position(rank, total)?;
                Some(PlacedPanel {
                    row,
                    col,
                    spec: build_view(view, &ctx),
                })
            })
            .collect();
        debug!(
            "built {} diagnostic panel(s) on a {}x{} grid",
            panels.len(),
            rows,
            cols
        );
        Self { rows, cols, panels }
    }

    /// The panel of the given view, if it was selected.
    pub fn panel(&self, view: View) -> Option<&PanelSpec> {
        self.panels
            .iter()
            .find(|p| p.spec.view == view)
            .map(|p| &p.spec)
    }
}
