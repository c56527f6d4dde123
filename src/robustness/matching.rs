use crate::Probability;
use serde::Deserialize;
use serde::Serialize;

/// A centroid of one trial paired with a centroid of another.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Match {
    pub a: usize,
    pub b: usize,
    pub correlation: Probability,
}

/// Greedy best-first matching on a correlation matrix.
///
/// All eligible pairs are visited in order of decreasing correlation, ties
/// broken by the lowest `(a, b)` index pair, and a pair is taken when
/// neither side is already matched. Rows in `skip_a` and columns in
/// `skip_b` never match.
pub fn greedy(matrix: &[Vec<Probability>], skip_a: &[usize], skip_b: &[usize]) -> Vec<Match> {
    let mut pairs = matrix
        .iter()
        .enumerate()
        .filter(|(a, _)| !skip_a.contains(a))
        .flat_map(|(a, row)| {
            row.iter()
                .enumerate()
                .filter(|(b, _)| !skip_b.contains(b))
                .map(move |(b, c)| Match {
                    a,
                    b,
                    correlation: *c,
                })
        })
        .collect::<Vec<Match>>();
    pairs.sort_by(|x, y| {
        y.correlation
            .total_cmp(&x.correlation)
            .then(x.a.cmp(&y.a))
            .then(x.b.cmp(&y.b))
    });
    let mut used_a = vec![false; matrix.len()];
    let mut used_b = vec![false; matrix.first().map_or(0, |row| row.len())];
    let mut matches = Vec::new();
    for pair in pairs {
        if !used_a[pair.a] && !used_b[pair.b] {
            used_a[pair.a] = true;
            used_b[pair.b] = true;
            matches.push(pair);
        }
    }
    matches
}
