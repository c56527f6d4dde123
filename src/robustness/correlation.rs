use crate::Histogram;
use crate::Probability;

/// Pearson correlation coefficient between two equal-length vectors.
///
/// A constant vector has no variance, so the coefficient is undefined;
/// it is taken as 1 when both vectors are identical and 0 otherwise.
pub fn pearson(a: &[f32], b: &[f32]) -> Probability {
    debug_assert_eq!(a.len(), b.len());
    let n = a.len() as f64;
    if n == 0. {
        return 1.;
    }
    let ma = a.iter().map(|x| *x as f64).sum::<f64>() / n;
    let mb = b.iter().map(|x| *x as f64).sum::<f64>() / n;
    let (cov, va, vb) = a
        .iter()
        .zip(b.iter())
        .map(|(x, y)| (*x as f64 - ma, *y as f64 - mb))
        .fold((0., 0., 0.), |(c, va, vb), (dx, dy)| {
            (c + dx * dy, va + dx * dx, vb + dy * dy)
        });
    if va <= 0. || vb <= 0. {
        return if a == b { 1. } else { 0. };
    }
    (cov / (va * vb).sqrt()).clamp(-1., 1.) as Probability
}

/// `a.len() × b.len()` matrix of centroid correlations.
pub fn correlations(a: &[Histogram], b: &[Histogram]) -> Vec<Vec<Probability>> {
    a.iter()
        .map(|x| b.iter().map(|y| pearson(x.values(), y.values())).collect())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn perfectly_correlated() {
        assert!((pearson(&[1., 2., 3.], &[2., 4., 6.]) - 1.).abs() < 1e-6);
        assert!((pearson(&[1., 2., 3.], &[3., 2., 1.]) + 1.).abs() < 1e-6);
    }

    #[test]
    fn uncorrelated() {
        assert!(pearson(&[1., 0., -1., 0.], &[0., 1., 0., -1.]).abs() < 1e-6);
    }

    #[test]
    fn constant_vectors() {
        assert_eq!(pearson(&[2., 2., 2.], &[2., 2., 2.]), 1.);
        assert_eq!(pearson(&[2., 2., 2.], &[1., 2., 3.]), 0.);
    }
}
