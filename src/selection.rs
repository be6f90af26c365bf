//! Which diagnostic views to build and where each one goes in the grid.

use log::debug;
use std::collections::BTreeSet;

/// The six diagnostic views, numbered as in the conventional `which`
/// argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum View {
    ResidualsVsFitted = 1,
    NormalQq = 2,
    ScaleLocation = 3,
    CooksDistance = 4,
    ResidualsVsLeverage = 5,
    CooksVsLeverage = 6,
}

impl View {
    pub const ALL: [View; 6] = [
        View::ResidualsVsFitted,
        View::NormalQq,
        View::ScaleLocation,
        View::CooksDistance,
        View::ResidualsVsLeverage,
        View::CooksVsLeverage,
    ];

    /// The view with the given 1-based number, if there is one.
    pub fn from_index(index: i64) -> Option<Self> {
        match index {
            1 => Some(View::ResidualsVsFitted),
            2 => Some(View::NormalQq),
            3 => Some(View::ScaleLocation),
            4 => Some(View::CooksDistance),
            5 => Some(View::ResidualsVsLeverage),
            6 => Some(View::CooksVsLeverage),
            _ => None,
        }
    }

    pub fn index(self) -> u8 {
        self as u8
    }

    pub fn title(self) -> &'static str {
        match self {
            View::ResidualsVsFitted => "Residuals vs Fitted",
            View::NormalQq => "Normal Q-Q",
            View::ScaleLocation => "Scale-Location",
            View::CooksDistance => "Cook's distance",
            View::ResidualsVsLeverage => "Residuals vs Leverage",
            View::CooksVsLeverage => "Cook's dist vs Leverage h/(1-h)",
        }
    }
}

/// A sanitized set of views: deduplicated, restricted to 1..=6 and sorted
/// ascending. Values outside the range are dropped rather than rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    views: Vec<View>,
}

impl Selection {
    pub fn new<I>(indices: I) -> Self
    where
        I: IntoIterator<Item = i64>,
    {
        let mut dropped = Vec::new();
        let views: BTreeSet<View> = indices
            .into_iter()
            .filter_map(|i| {
                let view = View::from_index(i);
                if view.is_none() {
                    dropped.push(i);
                }
                view
            })
            .collect();
        if !dropped.is_empty() {
            debug!("dropping out-of-range view numbers {:?}", dropped);
        }
        Self {
            views: views.into_iter().collect(),
        }
    }

    /// Every view, 1 through 6.
    pub fn all() -> Self {
        Self {
            views: View::ALL.to_vec(),
        }
    }

    pub fn views(&self) -> &[View] {
        &self.views
    }

    pub fn len(&self) -> usize {
        self.views.len()
    }

    pub fn is_empty(&self) -> bool {
        self.views.is_empty()
    }

    pub fn contains(&self, view: View) -> bool {
        self.views.binary_search(&view).is_ok()
    }

    /// The views as their 1-based numbers.
    pub fn indices(&self) -> Vec<u8> {
        self.views.iter().map(|v| v.index()).collect()
    }
}

/// Views 1, 2, 3, and 5.
impl Default for Selection {
    fn default() -> Self {
        Self::new(vec![1, 2, 3, 5])
    }
}

/// The number of panels in each row of the grid.
pub const PANELS_PER_ROW: usize = 2;

/// The (row, column) of the panel at position `rank` of the selection, filling
/// each row left to right. Returns `None` if `rank` is not below `total`.
pub fn panel_position(rank: usize, total: usize) -> Option<(usize, usize)> {
    if rank >= total {
        return None;
    }
    Some((rank / PANELS_PER_ROW, rank % PANELS_PER_ROW))
}

/// The (rows, columns) of a grid holding `total` panels.
pub fn grid_shape(total: usize) -> (usize, usize) {
    let rows = (total + PANELS_PER_ROW - 1) / PANELS_PER_ROW;
    (rows, total.min(PANELS_PER_ROW))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sanitize() {
        let sel = Selection::new(vec![0, 3, 7, 2]);
        assert_eq!(sel.indices(), vec![2, 3]);
        let sel = Selection::new(vec![6, 6, -1, 1, 1]);
        assert_eq!(sel.views(), &[View::ResidualsVsFitted, View::CooksVsLeverage]);
        assert!(Selection::new(vec![9]).is_empty());
    }

    #[test]
    fn default_views() {
        assert_eq!(Selection::default().indices(), vec![1, 2, 3, 5]);
        assert_eq!(Selection::all().len(), 6);
    }

    #[test]
    fn positions() {
        assert_eq!(panel_position(0, 3), Some((0, 0)));
        assert_eq!(panel_position(1, 3), Some((0, 1)));
        assert_eq!(panel_position(2, 3), Some((1, 0)));
        assert_eq!(panel_position(3, 3), None);
        assert_eq!(grid_shape(3), (2, 2));
        assert_eq!(grid_shape(4), (2, 2));
        assert_eq!(grid_shape(1), (1, 1));
        assert_eq!(grid_shape(0), (0, 0));
    }
}
