use super::histogram::Histogram;
use super::shape::Shape;
use crate::Error;
use serde::Deserialize;

/// An ordered collection of feature vectors sharing one [`Shape`].
///
/// Sample order is the sample index, preserved in every label vector the
/// engine returns. Optional per-sample weights (e.g. cos(latitude) area
/// weights) turn centroids into weighted means and inertia into a weighted
/// sum; without them every sample weighs 1.
///
/// The dataset is read-only to the clustering core and may be shared across
/// concurrent runs. [`Dataset::validate`] is the data boundary: the engine
/// calls it before any iteration and rejects the whole call on failure.
#[derive(Debug, Clone, Deserialize)]
#[serde(try_from = "RawDataset")]
pub struct Dataset {
    shape: Shape,
    points: Vec<Histogram>,
    weights: Option<Vec<f32>>,
}

impl Dataset {
    pub fn new(shape: Shape, points: Vec<Histogram>) -> Self {
        Self {
            shape,
            points,
            weights: None,
        }
    }
    /// Builds a dataset from raw row-major value vectors.
    pub fn from_rows(shape: Shape, rows: Vec<Vec<f32>>) -> Result<Self, Error> {
        rows.into_iter()
            .enumerate()
            .map(|(i, values)| {
                Histogram::new(shape, values).map_err(|e| match e {
                    Error::InvalidData { reason, .. } => Error::sample(i, reason),
                    other => other,
                })
            })
            .collect::<Result<Vec<_>, _>>()
            .map(|points| Self::new(shape, points))
    }
    /// Attaches per-sample weights. Checked by [`Dataset::validate`].
    pub fn with_weights(mut self, weights: Vec<f32>) -> Self {
        self.weights = Some(weights);
        self
    }
    pub fn shape(&self) -> Shape {
        self.shape
    }
    pub fn points(&self) -> &[Histogram] {
        &self.points
    }
    pub fn point(&self, i: usize) -> &Histogram {
        &self.points[i]
    }
    pub fn len(&self) -> usize {
        self.points.len()
    }
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
    pub fn is_weighted(&self) -> bool {
        self.weights.is_some()
    }
    /// Weight of sample `i`, 1 when the dataset is unweighted.
    pub fn weight(&self, i: usize) -> f32 {
        self.weights.as_ref().map_or(1., |w| w[i])
    }

    /// Rejects datasets the engine cannot cluster: no samples, mismatched
    /// shapes, non-finite or negative values, zero-mass histograms, or
    /// malformed weights.
    pub fn validate(&self) -> Result<(), Error> {
        if self.points.is_empty() {
            return Err(Error::data("dataset has no samples"));
        }
        if self.shape.bins() == 0 {
            return Err(Error::data(format!("shape {} has no bins", self.shape)));
        }
        for (i, point) in self.points.iter().enumerate() {
            if point.shape() != self.shape {
                return Err(Error::sample(
                    i,
                    format!("shape {} differs from dataset shape {}", point.shape(), self.shape),
                ));
            }
            point.check().map_err(|reason| Error::sample(i, reason))?;
        }
        if let Some(ref weights) = self.weights {
            if weights.len() != self.points.len() {
                return Err(Error::data(format!(
                    "{} weights for {} samples",
                    weights.len(),
                    self.points.len()
                )));
            }
            if let Some((i, w)) = weights
                .iter()
                .enumerate()
                .find(|(_, w)| !(w.is_finite() && **w > 0.))
            {
                return Err(Error::sample(i, format!("weight {} is not positive", w)));
            }
        }
        Ok(())
    }
}

/// Wire form of a dataset as handed over by the preprocessing layer.
#[derive(Debug, Deserialize)]
struct RawDataset {
    shape: Shape,
    histograms: Vec<Vec<f32>>,
    #[serde(default)]
    weights: Option<Vec<f32>>,
}

impl TryFrom<RawDataset> for Dataset {
    type Error = Error;
    fn try_from(raw: RawDataset) -> Result<Self, Self::Error> {
        let dataset = Self::from_rows(raw.shape, raw.histograms)?;
        Ok(match raw.weights {
            Some(weights) => dataset.with_weights(weights),
            None => dataset,
        })
    }
}
