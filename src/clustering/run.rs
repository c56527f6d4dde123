use crate::Energy;
use crate::Histogram;
use serde::Deserialize;
use serde::Serialize;

/// Outcome of one `cluster` call.
///
/// `labels[i]` is the cluster of sample `i`, always in `[0, k)`, computed
/// against the returned centroids. `inertia` is the (weighted) sum of
/// sample-to-centroid distances under the same assignment.
///
/// Non-convergence, degenerate clusters and cancellation are reported here
/// rather than raised.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunResult {
    centroids: Vec<Histogram>,
    labels: Vec<usize>,
    inertia: Energy,
    iterations: usize,
    converged: bool,
    cancelled: bool,
    degenerate: Vec<usize>,
}

impl RunResult {
    pub(crate) fn new(
        centroids: Vec<Histogram>,
        labels: Vec<usize>,
        inertia: Energy,
        iterations: usize,
        converged: bool,
    ) -> Self {
        let mut sizes = vec![0usize; centroids.len()];
        labels.iter().for_each(|j| sizes[*j] += 1);
        let degenerate = sizes
            .iter()
            .enumerate()
            .filter(|(_, size)| **size == 0)
            .map(|(j, _)| j)
            .collect();
        Self {
            centroids,
            labels,
            inertia,
            iterations,
            converged,
            cancelled: false,
            degenerate,
        }
    }
    /// Marks a result returned early because the caller cancelled.
    pub(crate) fn cancel(mut self) -> Self {
        self.converged = false;
        self.cancelled = true;
        self
    }

    pub fn k(&self) -> usize {
        self.centroids.len()
    }
    pub fn centroids(&self) -> &[Histogram] {
        &self.centroids
    }
    pub fn centroid(&self, j: usize) -> &Histogram {
        &self.centroids[j]
    }
    pub fn labels(&self) -> &[usize] {
        &self.labels
    }
    pub fn inertia(&self) -> Energy {
        self.inertia
    }
    /// Lloyd iterations performed by the winning initialization.
    pub fn iterations(&self) -> usize {
        self.iterations
    }
    pub fn converged(&self) -> bool {
        self.converged
    }
    pub fn cancelled(&self) -> bool {
        self.cancelled
    }
    /// Clusters with no members in the final assignment.
    pub fn degenerate(&self) -> &[usize] {
        &self.degenerate
    }
    pub fn is_degenerate(&self, j: usize) -> bool {
        self.degenerate.contains(&j)
    }
    /// Member count of every cluster.
    pub fn sizes(&self) -> Vec<usize> {
        let mut sizes = vec![0; self.k()];
        self.labels.iter().for_each(|j| sizes[*j] += 1);
        sizes
    }
    /// Sample indices assigned to cluster `j`, in sample order.
    pub fn members(&self, j: usize) -> impl Iterator<Item = usize> + '_ {
        self.labels
            .iter()
            .enumerate()
            .filter(move |(_, l)| **l == j)
            .map(|(i, _)| i)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Shape;

    #[test]
    fn empty_clusters_are_degenerate() {
        let shape = Shape::new(1, 2);
        let c = vec![Histogram::new(shape, vec![1., 0.]).unwrap(); 3];
        let run = RunResult::new(c, vec![0, 2, 0], 0., 1, true);
        assert_eq!(run.degenerate(), &[1]);
        assert_eq!(run.sizes(), vec![2, 0, 1]);
        assert_eq!(run.members(0).collect::<Vec<_>>(), vec![0, 2]);
    }

    #[test]
    fn degenerate_agrees_with_sizes() {
        let shape = Shape::new(1, 2);
        let c = vec![Histogram::new(shape, vec![1., 0.]).unwrap(); 5];
        let run = RunResult::new(c, vec![4, 4, 1, 4, 1, 1], 0., 1, true);
        let empty = run
            .sizes()
            .into_iter()
            .enumerate()
            .filter(|(_, n)| *n == 0)
            .map(|(j, _)| j)
            .collect::<Vec<usize>>();
        assert_eq!(run.degenerate(), empty.as_slice());
        assert_eq!(run.degenerate(), &[0, 2, 3]);
    }

    #[test]
    fn cancel_clears_converged() {
        let shape = Shape::new(1, 2);
        let c = vec![Histogram::new(shape, vec![1., 0.]).unwrap()];
        let run = RunResult::new(c, vec![0], 0., 1, true).cancel();
        assert!(run.cancelled());
        assert!(!run.converged());
    }
}
