use crate::transport::Support;

/// One cell of a joint histogram grid.
///
/// Rows index cloud-top pressure, columns index optical depth. Bins are the
/// support points of a [`crate::Histogram`] viewed as a distribution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Bin {
    pub row: usize,
    pub col: usize,
}

impl Support for Bin {}

impl From<(usize, usize)> for Bin {
    fn from((row, col): (usize, usize)) -> Self {
        Self { row, col }
    }
}

impl std::fmt::Display for Bin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}
