//! Seeded random weight matrices for benchmarks and parity checks.

use rand::distributions::uniform::SampleUniform;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::matrix::WeightMatrix;
use crate::weight::EdgeWeight;

/// Directed graph with about `n * avg_degree` edges, weights uniform in
/// `[min, max]`. Self-loops are skipped; a repeated edge keeps the lighter weight.
pub fn random_weight_matrix<W>(n: usize, avg_degree: f32, min: W, max: W, seed: u64) -> WeightMatrix<W>
where
    W: EdgeWeight + SampleUniform,
{
    let (lo, hi) = if max < min { (max, min) } else { (min, max) };
    let mut rng = SmallRng::seed_from_u64(seed);
    let mut m = WeightMatrix::disconnected(n);
    if n < 2 {
        return m;
    }
    let m_est = (n as f32 * avg_degree.max(0.0)) as usize;
    for _ in 0..m_est {
        let u = rng.gen_range(0..n);
        let v = rng.gen_range(0..n);
        if u == v {
            continue;
        }
        let w = rng.gen_range(lo..=hi);
        if w < m.get(u, v) {
            m.set(u, v, w);
        }
    }
    m
}
