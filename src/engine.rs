//! All-pairs shortest paths by Floyd-Warshall relaxation.
//!
//! For every candidate intermediate vertex k (always the outermost loop), every
//! source i and every destination j: if `D[i][k] + D[k][j] < D[i][j]` then
//! `D[i][j]` takes the shorter length and `P[i][j] = k`. Values are read live,
//! so a pass over k sees improvements made earlier in the same pass. Ties are
//! not recorded: the first improvement under this fixed order wins.
//!
//! Preconditions: nonnegative weights. With a negative cycle the distances of
//! affected pairs are unspecified and `P` may be cyclic; nothing is detected.

use serde::Serialize;
use tracing::{debug, debug_span, trace, warn};

use crate::config::EngineConfig;
use crate::error::{Error, Result};
use crate::matrix::{DistanceMatrix, IntermediateMatrix, WeightMatrix};
use crate::weight::EdgeWeight;

/// Counters for one run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct EngineStats {
    pub vertices: u32,
    pub passes: u32,          // k iterations completed
    pub relaxations: u64,     // successful D[i][j] improvements
    pub parallel: bool,       // rows were relaxed on the rayon pool
}

/// Output of a completed run: distances `D`, intermediates `P`, counters.
#[derive(Debug, Clone, Serialize)]
#[serde(bound(serialize = "W: EdgeWeight + Serialize"))]
pub struct ShortestPaths<W> {
    distances: DistanceMatrix<W>,
    intermediates: IntermediateMatrix,
    stats: EngineStats,
}

impl<W: EdgeWeight> ShortestPaths<W> {
    pub fn dim(&self) -> usize {
        self.distances.dim()
    }

    /// Shortest i -> j length, `W::INFINITY` when unreachable.
    pub fn distance(&self, i: usize, j: usize) -> W {
        self.distances.get(i, j)
    }

    pub fn is_reachable(&self, i: usize, j: usize) -> bool {
        !self.distances.get(i, j).is_infinite()
    }

    /// Highest-indexed intermediate on the recorded i -> j path.
    pub fn intermediate(&self, i: usize, j: usize) -> Option<usize> {
        self.intermediates.get(i, j)
    }

    pub fn distances(&self) -> &DistanceMatrix<W> {
        &self.distances
    }

    pub fn intermediates(&self) -> &IntermediateMatrix {
        &self.intermediates
    }

    pub fn stats(&self) -> EngineStats {
        self.stats
    }

    pub fn into_parts(self) -> (DistanceMatrix<W>, IntermediateMatrix) {
        (self.distances, self.intermediates)
    }
}

pub struct Engine {
    config: EngineConfig,
}

impl Default for Engine {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

impl Engine {
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    pub fn from_env() -> Self {
        Self::new(EngineConfig::from_env())
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Compute `(D, P)` for the configured leading block of `weights`.
    ///
    /// Fails before doing any work if the vertex limit exceeds the matrix
    /// dimension. The input is never modified; `D` starts as a copy.
    pub fn run<W: EdgeWeight>(&self, weights: &WeightMatrix<W>) -> Result<ShortestPaths<W>> {
        let dimension = weights.dim();
        let n = match self.config.vertex_limit {
            None => dimension,
            Some(limit) if limit > dimension => {
                return Err(Error::VertexLimitExceeded { limit, dimension });
            }
            Some(limit) => limit,
        };
        if n < dimension {
            warn!(n, dimension, "vertex limit truncates weight matrix to leading block");
        }

        let span = debug_span!("all_pairs", n);
        let _enter = span.enter();

        let mut distances = weights.leading(n);
        let mut intermediates = IntermediateMatrix::empty(n);
        let parallel = self.use_parallel(n);

        let relaxations = if parallel {
            relax_all_parallel(n, distances.as_mut_slice(), intermediates.as_mut_slice())
        } else {
            relax_all(n, distances.as_mut_slice(), intermediates.as_mut_slice())
        };

        let stats = EngineStats { vertices: n as u32, passes: n as u32, relaxations, parallel };
        debug!(relaxations, parallel, "all-pairs run complete");
        Ok(ShortestPaths { distances, intermediates, stats })
    }

    fn use_parallel(&self, n: usize) -> bool {
        cfg!(feature = "parallel") && self.config.parallel_rows && n >= self.config.parallel_threshold.max(2)
    }
}

/// Run with default settings and an optional vertex limit.
pub fn all_pairs_shortest_paths<W: EdgeWeight>(
    weights: &WeightMatrix<W>,
    vertex_limit: Option<usize>,
) -> Result<ShortestPaths<W>> {
    Engine::new(EngineConfig::default().with_vertex_limit(vertex_limit)).run(weights)
}

fn relax_all<W: EdgeWeight>(n: usize, d: &mut [W], p: &mut [u32]) -> u64 {
    let mut total = 0u64;
    for k in 0..n {
        let mut pass = 0u64;
        for i in 0..n {
            let row = i * n;
            // inf + x stays inf, so an unreachable k cannot improve row i.
            if d[row + k].is_infinite() {
                continue;
            }
            for j in 0..n {
                let candidate = d[row + k].saturating_add(d[k * n + j]);
                if candidate < d[row + j] {
                    d[row + j] = candidate;
                    p[row + j] = k as u32;
                    pass += 1;
                }
            }
        }
        trace!(k, relaxations = pass, "pass complete");
        total += pass;
    }
    total
}

/// Relax one row against row k. `row_k` is a copy of row k taken before the pass.
#[cfg_attr(not(feature = "parallel"), allow(dead_code))]
#[inline]
fn relax_row<W: EdgeWeight>(k: usize, row: &mut [W], next: &mut [u32], row_k: &[W]) -> u64 {
    if row[k].is_infinite() {
        return 0;
    }
    let mut count = 0u64;
    for j in 0..row.len() {
        let candidate = row[k].saturating_add(row_k[j]);
        if candidate < row[j] {
            row[j] = candidate;
            next[j] = k as u32;
            count += 1;
        }
    }
    count
}

// Row k and column k cannot improve during pass k when D[k][k] >= 0
// (D[i][k] + D[k][k] >= D[i][k]), so every row may read a snapshot of row k
// and the result matches `relax_all` exactly. Passes over k stay sequential.
#[cfg(feature = "parallel")]
fn relax_all_parallel<W: EdgeWeight>(n: usize, d: &mut [W], p: &mut [u32]) -> u64 {
    use rayon::prelude::*;

    let mut total = 0u64;
    let mut row_k: Vec<W> = Vec::with_capacity(n);
    for k in 0..n {
        row_k.clear();
        row_k.extend_from_slice(&d[k * n..(k + 1) * n]);
        let snapshot = &row_k;
        let pass: u64 = d
            .par_chunks_mut(n)
            .zip(p.par_chunks_mut(n))
            .map(|(row, next)| relax_row(k, row, next, snapshot))
            .sum();
        trace!(k, relaxations = pass, "pass complete");
        total += pass;
    }
    total
}

#[cfg(not(feature = "parallel"))]
fn relax_all_parallel<W: EdgeWeight>(n: usize, d: &mut [W], p: &mut [u32]) -> u64 {
    relax_all(n, d, p)
}
