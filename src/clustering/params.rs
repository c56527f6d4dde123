use crate::Energy;
use crate::Error;
use crate::Histogram;
use crate::Shape;
use serde::Deserialize;
use serde::Serialize;

/// How each initialization picks its starting centroids.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Initialization {
    /// `k` distinct dataset members, uniformly at random.
    #[default]
    Random,
    /// k-means++: each further member drawn with probability proportional to
    /// its weighted distance from the nearest centroid picked so far.
    PlusPlus,
    /// Premade starting centroids as row-major value vectors, one per cluster.
    /// Every restart would be identical, so only one initialization runs.
    Explicit(Vec<Vec<f32>>),
}

impl Initialization {
    /// Explicit centroids as histograms of the dataset's shape.
    pub(crate) fn explicit(&self, k: usize, shape: Shape) -> Result<Option<Vec<Histogram>>, Error> {
        let Self::Explicit(rows) = self else {
            return Ok(None);
        };
        if rows.len() != k {
            return Err(Error::config(
                "init",
                format!("{} explicit centroids for k = {}", rows.len(), k),
            ));
        }
        rows.iter()
            .enumerate()
            .map(|(j, row)| {
                Histogram::new(shape, row.clone())
                    .map_err(|e| Error::config("init", format!("centroid {}: {}", j, e)))
                    .and_then(|h| match h.check() {
                        Ok(()) => Ok(h),
                        Err(reason) => Err(Error::config("init", format!("centroid {}: {}", j, reason))),
                    })
            })
            .collect::<Result<Vec<_>, _>>()
            .map(Some)
    }
}

/// Engine parameters for one `cluster` call.
///
/// Missing fields deserialize to their defaults, so a config file only
/// needs to name what it changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Params {
    pub max_iterations: usize,
    pub tolerance: Energy,
    pub n_init: usize,
    pub seed: u64,
    pub init: Initialization,
}

impl Default for Params {
    fn default() -> Self {
        Self {
            max_iterations: crate::KMEANS_MAX_ITERATIONS,
            tolerance: crate::KMEANS_TOLERANCE,
            n_init: crate::KMEANS_N_INIT,
            seed: crate::KMEANS_SEED,
            init: Initialization::default(),
        }
    }
}

impl Params {
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }
    pub fn with_n_init(mut self, n_init: usize) -> Self {
        self.n_init = n_init;
        self
    }
    pub fn with_init(mut self, init: Initialization) -> Self {
        self.init = init;
        self
    }
    /// Number of initializations that will actually run.
    pub fn restarts(&self) -> usize {
        match self.init {
            Initialization::Explicit(_) => 1,
            _ => self.n_init,
        }
    }
    /// Rejects out-of-range parameters, independent of any dataset.
    pub fn validate(&self) -> Result<(), Error> {
        if self.max_iterations == 0 {
            return Err(Error::config("max_iterations", "must be at least 1"));
        }
        if !(self.tolerance.is_finite() && self.tolerance >= 0.) {
            return Err(Error::config(
                "tolerance",
                format!("{} is not a non-negative number", self.tolerance),
            ));
        }
        if self.n_init == 0 {
            return Err(Error::config("n_init", "must be at least 1"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_fill_missing_fields() {
        let params: Params = serde_json::from_str(r#"{"n_init": 3}"#).unwrap();
        assert_eq!(params.n_init, 3);
        assert_eq!(params.max_iterations, 300);
        assert_eq!(params.init, Initialization::Random);
    }

    #[test]
    fn init_deserializes_by_name() {
        let params: Params = serde_json::from_str(r#"{"init": "plusplus"}"#).unwrap();
        assert_eq!(params.init, Initialization::PlusPlus);
        let params: Params = serde_json::from_str(r#"{"init": {"explicit": [[1, 0], [0, 1]]}}"#).unwrap();
        assert_eq!(params.restarts(), 1);
    }

    #[test]
    fn rejects_out_of_range() {
        let err = |p: Params| p.validate().unwrap_err();
        assert!(matches!(
            err(Params { n_init: 0, ..Params::default() }),
            Error::InvalidConfig { param: "n_init", .. }
        ));
        assert!(matches!(
            err(Params { max_iterations: 0, ..Params::default() }),
            Error::InvalidConfig { param: "max_iterations", .. }
        ));
        assert!(matches!(
            err(Params { tolerance: -1., ..Params::default() }),
            Error::InvalidConfig { param: "tolerance", .. }
        ));
    }

    #[test]
    fn explicit_centroids_are_checked() {
        let shape = Shape::new(1, 2);
        let init = Initialization::Explicit(vec![vec![1., 0.], vec![0., 0.]]);
        assert!(init.explicit(2, shape).unwrap_err().is_config());
        assert!(init.explicit(3, shape).unwrap_err().is_config());
        let init = Initialization::Explicit(vec![vec![1., 0.], vec![0., 1.]]);
        assert_eq!(init.explicit(2, shape).unwrap().map(|c| c.len()), Some(2));
        assert_eq!(Initialization::Random.explicit(2, shape), Ok(None));
    }
}
