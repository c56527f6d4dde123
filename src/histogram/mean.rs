use super::histogram::Histogram;
use super::shape::Shape;
use crate::Absorb;

/// Weighted running sum of histograms, read off as their element-wise mean.
///
/// Accumulates in f64 so that centroids of large clusters do not drift with
/// summation order more than necessary.
#[derive(Debug, Clone, PartialEq)]
pub struct Mean {
    shape: Shape,
    sums: Vec<f64>,
    weight: f64,
}

impl Mean {
    pub fn empty(shape: Shape) -> Self {
        Self {
            shape,
            sums: vec![0.; shape.bins()],
            weight: 0.,
        }
    }
    /// Total weight absorbed so far.
    pub fn weight(&self) -> f64 {
        self.weight
    }
    /// The weighted mean, or `None` if nothing was absorbed.
    pub fn centroid(&self) -> Option<Histogram> {
        match self.weight > 0. {
            false => None,
            true => Histogram::new(
                self.shape,
                self.sums
                    .iter()
                    .map(|s| (s / self.weight) as f32)
                    .collect(),
            )
            .ok(),
        }
    }
}

impl From<(&Histogram, f32)> for Mean {
    fn from((histogram, weight): (&Histogram, f32)) -> Self {
        let weight = weight as f64;
        Self {
            shape: histogram.shape(),
            sums: histogram
                .values()
                .iter()
                .map(|v| *v as f64 * weight)
                .collect(),
            weight,
        }
    }
}

impl Absorb for Mean {
    fn identity(&self) -> Self {
        Self::empty(self.shape)
    }
    fn absorb(mut self, other: &Self) -> Self {
        debug_assert_eq!(self.shape, other.shape);
        self.sums
            .iter_mut()
            .zip(other.sums.iter())
            .for_each(|(a, b)| *a += b);
        self.weight += other.weight;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_mean_has_no_centroid() {
        assert_eq!(Mean::empty(Shape::new(1, 2)).centroid(), None);
    }

    #[test]
    fn unweighted_mean_is_elementwise() {
        let shape = Shape::new(1, 2);
        let a = Histogram::new(shape, vec![10., 0.]).unwrap();
        let b = Histogram::new(shape, vec![9., 1.]).unwrap();
        let mean = [&a, &b]
            .into_iter()
            .map(|h| Mean::from((h, 1.)))
            .fold(Mean::empty(shape), |acc, m| acc.absorb(&m));
        assert_eq!(mean.centroid().unwrap().values(), &[9.5, 0.5]);
    }

    #[test]
    fn weights_pull_the_mean() {
        let shape = Shape::new(1, 2);
        let a = Histogram::new(shape, vec![4., 0.]).unwrap();
        let b = Histogram::new(shape, vec![0., 4.]).unwrap();
        let mean = Mean::from((&a, 3.)).absorb(&Mean::from((&b, 1.)));
        assert_eq!(mean.weight(), 4.);
        assert_eq!(mean.centroid().unwrap().values(), &[3., 1.]);
    }
}
