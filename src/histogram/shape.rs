use super::bin::Bin;
use serde::Deserialize;
use serde::Serialize;

/// The (rows, columns) bin layout of a joint histogram.
///
/// Every feature vector in a dataset shares one shape. Values are stored
/// row-major, so bin `(r, c)` lives at flat index `r * cols + c`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Shape {
    pub rows: usize,
    pub cols: usize,
}

impl Shape {
    pub const fn new(rows: usize, cols: usize) -> Self {
        Self { rows, cols }
    }
    /// Total number of bins.
    pub const fn bins(&self) -> usize {
        self.rows * self.cols
    }
    /// Grid cell for a flat index.
    pub fn bin(&self, i: usize) -> Bin {
        debug_assert!(i < self.bins());
        Bin::from((i / self.cols, i % self.cols))
    }
    /// Flat index for a grid cell.
    pub fn index(&self, bin: &Bin) -> usize {
        debug_assert!(bin.row < self.rows && bin.col < self.cols);
        bin.row * self.cols + bin.col
    }
    /// All grid cells in flat-index order.
    pub fn grid(self) -> impl Iterator<Item = Bin> {
        (0..self.bins()).map(move |i| self.bin(i))
    }
    /// Length of the grid diagonal in index units.
    pub fn diagonal(&self) -> f32 {
        ((self.rows * self.rows + self.cols * self.cols) as f32).sqrt()
    }
}

impl Default for Shape {
    fn default() -> Self {
        Self::new(crate::ISCCP_PRESSURE_BINS, crate::ISCCP_TAU_BINS)
    }
}

impl std::fmt::Display for Shape {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.rows, self.cols)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flat_index_roundtrip() {
        let shape = Shape::new(7, 6);
        for i in 0..shape.bins() {
            assert_eq!(shape.index(&shape.bin(i)), i);
        }
        assert_eq!(shape.bin(13), Bin::from((2, 1)));
    }

    #[test]
    fn diagonal_of_three_four_grid() {
        assert_eq!(Shape::new(3, 4).diagonal(), 5.);
    }
}
