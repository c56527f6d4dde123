use super::bin::Bin;
use super::shape::Shape;
use crate::Arbitrary;
use crate::Error;
use crate::Probability;
use crate::transport::Density;
use serde::Deserialize;
use serde::Serialize;

/// One observation's joint histogram of cloud-top pressure and optical depth.
///
/// Values are raw bin frequencies (counts or percent cloud cover), stored
/// row-major over the [`Shape`] grid. A histogram is immutable once built;
/// centroids are produced as new histograms rather than edited in place.
///
/// Construction only checks that the value count matches the shape.
/// Content checks (finite, non-negative, positive mass) happen in
/// [`Histogram::check`], which the clustering engine runs at its boundary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Histogram {
    shape: Shape,
    values: Vec<f32>,
}

impl Histogram {
    /// Builds a histogram, rejecting a value count that does not fill the grid.
    pub fn new(shape: Shape, values: Vec<f32>) -> Result<Self, Error> {
        if values.len() != shape.bins() {
            return Err(Error::data(format!(
                "expected {} values for shape {}, found {}",
                shape.bins(),
                shape,
                values.len()
            )));
        }
        Ok(Self { shape, values })
    }
    /// An all-zero histogram. Not a valid sample, only an accumulator seed.
    pub fn zeroes(shape: Shape) -> Self {
        Self {
            shape,
            values: vec![0.; shape.bins()],
        }
    }
    pub fn shape(&self) -> Shape {
        self.shape
    }
    pub fn values(&self) -> &[f32] {
        &self.values
    }
    pub fn len(&self) -> usize {
        self.values.len()
    }
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
    /// Raw value at a grid cell.
    pub fn get(&self, bin: &Bin) -> f32 {
        self.values[self.shape.index(bin)]
    }
    /// Total mass across all bins.
    pub fn mass(&self) -> f32 {
        self.values.iter().sum()
    }
    /// Sum of squared values, in f64.
    pub fn energy(&self) -> f64 {
        self.values.iter().map(|v| *v as f64 * *v as f64).sum()
    }
    /// Validates content: every value finite and non-negative, positive
    /// total mass, and small enough that distances stay finite in f32.
    ///
    /// Any two histograms with energy at most `f32::MAX / 4` are at squared
    /// distance at most `f32::MAX`, and weighted means never exceed the
    /// largest energy among their members.
    pub fn check(&self) -> Result<(), String> {
        if let Some((i, v)) = self.values.iter().enumerate().find(|(_, v)| !v.is_finite()) {
            return Err(format!("non-finite value {} in bin {}", v, self.shape.bin(i)));
        }
        if let Some((i, v)) = self.values.iter().enumerate().find(|(_, v)| **v < 0.) {
            return Err(format!(
                "negative value {} in bin {}; convert fill values to missing before clustering",
                v,
                self.shape.bin(i)
            ));
        }
        if self.energy() > f32::MAX as f64 / 4. || !self.mass().is_finite() {
            return Err("values too large for distances to be represented".to_string());
        }
        if self.mass() <= 0. {
            return Err("histogram sums to zero".to_string());
        }
        Ok(())
    }
    /// Unit-mass copy of the values, as a probability vector over flat indices.
    pub fn normalize(&self) -> Vec<Probability> {
        let mass = self.mass();
        self.values.iter().map(|v| v / mass).collect()
    }
}

impl Density for Histogram {
    type Support = Bin;
    fn density(&self, x: &Self::Support) -> Probability {
        self.get(x) / self.mass()
    }
    fn support(&self) -> impl Iterator<Item = Self::Support> {
        self.values
            .iter()
            .enumerate()
            .filter(|(_, v)| **v > 0.)
            .map(|(i, _)| self.shape.bin(i))
    }
}

impl Arbitrary for Histogram {
    fn random() -> Self {
        let shape = Shape::default();
        let mut values = (0..shape.bins())
            .map(|_| rand::random::<f32>())
            .map(|x| if x < 0.5 { 0. } else { 100. * (x - 0.5) })
            .collect::<Vec<f32>>();
        let i = rand::random_range(0..shape.bins());
        values[i] += 1.;
        Self { shape, values }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_wrong_value_count() {
        assert!(Histogram::new(Shape::new(2, 2), vec![1., 2., 3.]).is_err());
        assert!(Histogram::new(Shape::new(2, 2), vec![1., 2., 3., 4.]).is_ok());
    }

    #[test]
    fn check_rejects_zero_mass() {
        let h = Histogram::zeroes(Shape::new(2, 3));
        assert!(h.check().unwrap_err().contains("zero"));
    }

    #[test]
    fn check_rejects_negative_and_nan() {
        let shape = Shape::new(1, 3);
        let negative = Histogram::new(shape, vec![1., -1., 2.]).unwrap();
        let missing = Histogram::new(shape, vec![1., f32::NAN, 2.]).unwrap();
        assert!(negative.check().unwrap_err().contains("negative"));
        assert!(missing.check().unwrap_err().contains("non-finite"));
    }

    #[test]
    fn check_rejects_overflowing_values() {
        let shape = Shape::new(1, 2);
        let huge = Histogram::new(shape, vec![1e20, 0.]).unwrap();
        let large = Histogram::new(shape, vec![1e18, 1e18]).unwrap();
        assert!(huge.check().unwrap_err().contains("too large"));
        assert!(large.check().is_ok());
    }

    #[test]
    fn density_is_normalized_over_support() {
        let h = Histogram::new(Shape::new(2, 2), vec![1., 0., 3., 0.]).unwrap();
        let support = h.support().collect::<Vec<_>>();
        assert_eq!(support, vec![Bin::from((0, 0)), Bin::from((1, 0))]);
        assert_eq!(h.density(&Bin::from((1, 0))), 0.75);
        assert_eq!(h.normalize().iter().sum::<f32>(), 1.);
    }

    #[test]
    fn random_histograms_are_valid() {
        for _ in 0..64 {
            assert!(Histogram::random().check().is_ok());
        }
    }
}
