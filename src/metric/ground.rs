use super::costs::Costs;
use crate::Bin;
use crate::Energy;
use crate::Error;
use crate::Shape;
use serde::Deserialize;
use serde::Serialize;

/// How index offsets along the two histogram axes combine into a distance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Norm {
    #[default]
    Euclidean,
    Manhattan,
}

/// Ground distance between histogram bins for the transport metric.
///
/// The cost of moving unit mass from bin `(r1, c1)` to bin `(r2, c2)` is
/// the chosen norm of the weighted index offsets
/// `(row_weight * |r1 - r2|, col_weight * |c1 - c2|)`, divided by `scale`.
/// Rows are cloud-top pressure, columns optical depth; equal weights treat
/// one pressure step and one optical depth step as the same distance.
///
/// With no explicit `scale` the divisor is the grid diagonal
/// `sqrt(rows² + cols²)`, so every cost lies in `[0, 1]` for unit weights.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Ground {
    pub row_weight: f32,
    pub col_weight: f32,
    pub norm: Norm,
    pub scale: Option<f32>,
}

impl Default for Ground {
    fn default() -> Self {
        Self {
            row_weight: 1.,
            col_weight: 1.,
            norm: Norm::Euclidean,
            scale: None,
        }
    }
}

impl Ground {
    /// Weights must be finite, non-negative and not both zero; an explicit
    /// scale must be finite and positive.
    pub fn validate(&self) -> Result<(), Error> {
        for (axis, w) in [("row_weight", self.row_weight), ("col_weight", self.col_weight)] {
            if !w.is_finite() || w < 0. {
                return Err(Error::config(
                    "ground",
                    format!("{} {} is not a finite non-negative weight", axis, w),
                ));
            }
        }
        if self.row_weight == 0. && self.col_weight == 0. {
            return Err(Error::config("ground", "row_weight and col_weight are both zero"));
        }
        match self.scale {
            Some(s) if !s.is_finite() || s <= 0. => Err(Error::config(
                "ground",
                format!("scale {} is not finite and positive", s),
            )),
            _ => Ok(()),
        }
    }
    /// Divisor applied to every bin-to-bin cost on this grid.
    pub fn scale(&self, shape: Shape) -> f32 {
        self.scale.unwrap_or_else(|| shape.diagonal())
    }
    /// Cost between two bins before scaling.
    pub fn offset(&self, x: &Bin, y: &Bin) -> Energy {
        let dr = self.row_weight * x.row.abs_diff(y.row) as f32;
        let dc = self.col_weight * x.col.abs_diff(y.col) as f32;
        match self.norm {
            Norm::Euclidean => (dr * dr + dc * dc).sqrt(),
            Norm::Manhattan => dr + dc,
        }
    }
    /// Precomputes the full bin-to-bin cost matrix for a grid.
    pub fn costs(&self, shape: Shape) -> Costs {
        let scale = self.scale(shape);
        Costs::from((
            shape,
            shape
                .grid()
                .flat_map(move |x| shape.grid().map(move |y| (x, y)))
                .map(|(x, y)| self.offset(&x, &y) / scale)
                .collect::<Vec<Energy>>(),
        ))
    }
}
