//! The renderable description of one diagnostic panel. Rendering itself is
//! left to the caller.

use crate::selection::View;

/// An (x, y) pair in data coordinates.
pub type Point = (f64, f64);

/// Scatter markers are open circles: a white fill with a dark stroke.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Marker {
    OpenCircle,
}

impl Marker {
    pub fn fill(self) -> &'static str {
        match self {
            Marker::OpenCircle => "white",
        }
    }

    pub fn stroke(self) -> &'static str {
        match self {
            Marker::OpenCircle => "black",
        }
    }
}

/// The visible range of an axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Limits {
    pub lo: f64,
    pub hi: f64,
}

impl Limits {
    pub fn new(lo: f64, hi: f64) -> Self {
        Self { lo, hi }
    }

    /// [-half, half]
    pub fn symmetric(half: f64) -> Self {
        Self::new(-half, half)
    }

    /// [lo, hi] extended by `frac` of its width on each side. A zero-width
    /// range is widened by one unit instead.
    pub fn padded(lo: f64, hi: f64, frac: f64) -> Self {
        let width = hi - lo;
        if width > 0. {
            Self::new(lo - frac * width, hi + frac * width)
        } else {
            Self::new(lo - 0.5, hi + 0.5)
        }
    }

    pub fn span(&self) -> f64 {
        self.hi - self.lo
    }

    pub fn contains(&self, v: f64) -> bool {
        self.lo <= v && v <= self.hi
    }
}

/// A straight reference line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RefLine {
    Horizontal(f64),
    Vertical(f64),
    Segment { from: Point, to: Point },
}

/// A sampled curve, optionally tied to the level it represents.
#[derive(Debug, Clone, PartialEq)]
pub struct Curve {
    pub level: Option<f64>,
    pub points: Vec<Point>,
}

/// A custom axis tick: drawn at `position`, labeled with `label`.
#[derive(Debug, Clone, PartialEq)]
pub struct Tick {
    pub position: f64,
    pub label: String,
}

/// Text placed at a point in data coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct Annotation {
    pub x: f64,
    pub y: f64,
    pub text: String,
}

/// Everything needed to draw one panel.
#[derive(Debug, Clone, PartialEq)]
pub struct PanelSpec {
    pub view: View,
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub marker: Marker,
    /// The primary scatter series.
    pub points: Vec<Point>,
    /// Vertical stems from the axis to each point, as (base, tip).
    pub stems: Vec<(Point, Point)>,
    /// The smoothed trend of the scatter.
    pub trend: Option<Vec<Point>>,
    pub reference_lines: Vec<RefLine>,
    /// Cook's distance contours or residual-level lines.
    pub contours: Vec<Curve>,
    pub x_limits: Limits,
    pub y_limits: Limits,
    pub x_ticks: Option<Vec<Tick>>,
    /// Observation-number labels of influential points.
    pub labels: Vec<Annotation>,
    /// Labels of the contour levels, at the edge of the plotting region.
    pub margin_labels: Vec<Annotation>,
    /// Shown instead of the scatter when there is nothing meaningful to plot.
    pub placeholder: Option<String>,
}

impl PanelSpec {
    /// A panel with the view's title and nothing drawn in it.
    pub(crate) fn base(view: View, x_label: &str, y_label: &str) -> Self {
        Self {
            view,
            title: view.title().to_string(),
            x_label: x_label.to_string(),
            y_label: y_label.to_string(),
            marker: Marker::OpenCircle,
            points: Vec::new(),
            stems: Vec::new(),
            trend: None,
            reference_lines: Vec::new(),
            contours: Vec::new(),
            x_limits: Limits::new(0., 1.),
            y_limits: Limits::new(0., 1.),
            x_ticks: None,
            labels: Vec::new(),
            margin_labels: Vec::new(),
            placeholder: None,
        }
    }

    pub fn is_placeholder(&self) -> bool {
        self.placeholder.is_some()
    }
}
