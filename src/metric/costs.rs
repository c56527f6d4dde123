use crate::Bin;
use crate::Energy;
use crate::Shape;
use crate::transport::Measure;

/// Dense bin-to-bin ground cost matrix for one histogram shape.
///
/// Built once per [`crate::Transport`] and reused for every distance call
/// of a run, since transport dominates clustering time.
#[derive(Debug, Clone, PartialEq)]
pub struct Costs {
    shape: Shape,
    values: Vec<Energy>,
}

impl Costs {
    pub fn shape(&self) -> Shape {
        self.shape
    }
    /// Cost between flat bin indices.
    pub fn get(&self, i: usize, j: usize) -> Energy {
        self.values[i * self.shape.bins() + j]
    }
}

impl From<(Shape, Vec<Energy>)> for Costs {
    fn from((shape, values): (Shape, Vec<Energy>)) -> Self {
        assert_eq!(values.len(), shape.bins() * shape.bins(), "square cost matrix");
        Self { shape, values }
    }
}

impl Measure for Costs {
    type X = Bin;
    type Y = Bin;
    fn distance(&self, x: &Self::X, y: &Self::Y) -> Energy {
        self.get(self.shape.index(x), self.shape.index(y))
    }
}
