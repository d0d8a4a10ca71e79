//! Square matrices stored flat in row-major order.
//!
//! `WeightMatrix` holds edge weights (and, after a run, distances).
//! `IntermediateMatrix` holds the highest-indexed intermediate vertex of each
//! recorded shortest path. Both are always `n x n`; constructors reject any
//! other shape.

use std::ops::Index;

use serde::de::{self, Deserializer};
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::weight::EdgeWeight;

/// n x n edge weights. `get(i, j)` is the weight of edge i -> j, or
/// `W::INFINITY` when there is no such edge.
#[derive(Debug, Clone, PartialEq)]
pub struct WeightMatrix<W> {
    n: usize,
    data: Vec<W>,
}

/// Distances share the weight layout: `get(i, j)` is the length of a shortest
/// i -> j path, `W::INFINITY` when j is unreachable from i.
pub type DistanceMatrix<W> = WeightMatrix<W>;

impl<W: EdgeWeight> WeightMatrix<W> {
    /// Build from nested rows. Every row must have exactly `rows.len()` entries.
    pub fn from_rows(rows: Vec<Vec<W>>) -> Result<Self> {
        let n = rows.len();
        let mut data = Vec::with_capacity(n * n);
        for (row, r) in rows.into_iter().enumerate() {
            if r.len() != n {
                return Err(Error::NotSquare { row, len: r.len(), expected: n });
            }
            data.extend(r);
        }
        Ok(Self { n, data })
    }

    /// Build from a row-major buffer of exactly `n * n` weights.
    pub fn from_flat(n: usize, data: Vec<W>) -> Result<Self> {
        let expected = n.checked_mul(n).ok_or(Error::BufferLength { n, len: data.len(), expected: usize::MAX })?;
        if data.len() != expected {
            return Err(Error::BufferLength { n, len: data.len(), expected });
        }
        Ok(Self { n, data })
    }

    /// Graph with no edges: zero diagonal, infinite elsewhere.
    pub fn disconnected(n: usize) -> Self {
        let mut data = vec![W::INFINITY; n * n];
        for i in 0..n {
            data[i * n + i] = W::ZERO;
        }
        Self { n, data }
    }

    /// Parse `[[0, 1, null], ...]` where `null` is the infinite sentinel.
    pub fn from_json(s: &str) -> Result<Self>
    where
        W: for<'de> Deserialize<'de>,
    {
        Ok(serde_json::from_str(s)?)
    }

    /// Copy of the leading `m x m` block. Caller guarantees `m <= n`.
    pub(crate) fn leading(&self, m: usize) -> Self {
        if m == self.n {
            return self.clone();
        }
        let mut data = Vec::with_capacity(m * m);
        for row in self.data.chunks_exact(self.n.max(1)).take(m) {
            data.extend_from_slice(&row[..m]);
        }
        Self { n: m, data }
    }

    #[inline]
    pub fn dim(&self) -> usize {
        self.n
    }

    #[inline]
    pub fn get(&self, i: usize, j: usize) -> W {
        self.data[i * self.n + j]
    }

    #[inline]
    pub fn set(&mut self, i: usize, j: usize, w: W) {
        self.data[i * self.n + j] = w;
    }

    pub fn row(&self, i: usize) -> &[W] {
        &self.data[i * self.n..(i + 1) * self.n]
    }

    pub fn rows(&self) -> impl Iterator<Item = &[W]> {
        // chunks_exact(0) panics; an empty matrix simply has no rows.
        self.data.chunks_exact(self.n.max(1)).take(self.n)
    }

    pub fn as_slice(&self) -> &[W] {
        &self.data
    }

    pub(crate) fn as_mut_slice(&mut self) -> &mut [W] {
        &mut self.data
    }

    pub fn to_rows(&self) -> Vec<Vec<W>> {
        self.rows().map(|r| r.to_vec()).collect()
    }

    /// Total weight of the walk `path[0] -> path[1] -> ...`.
    ///
    /// `None` if a vertex is out of range or a hop has no edge. A single
    /// vertex costs zero. The sum runs left to right, so for float weights it
    /// can differ from the matching distance by rounding; integer weights
    /// agree exactly.
    pub fn path_cost(&self, path: &[usize]) -> Option<W> {
        if path.iter().any(|&v| v >= self.n) {
            return None;
        }
        let mut total = W::ZERO;
        for hop in path.windows(2) {
            let w = self.get(hop[0], hop[1]).finite()?;
            total = total.saturating_add(w);
        }
        Some(total)
    }

    /// True when `get(i, j) == get(j, i)` for every pair.
    pub fn is_symmetric(&self) -> bool {
        (0..self.n).all(|i| (i + 1..self.n).all(|j| self.get(i, j) == self.get(j, i)))
    }
}

impl<W: EdgeWeight> Index<(usize, usize)> for WeightMatrix<W> {
    type Output = W;
    fn index(&self, (i, j): (usize, usize)) -> &W {
        &self.data[i * self.n + j]
    }
}

impl<W: EdgeWeight + Serialize> Serialize for WeightMatrix<W> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let rows: Vec<Vec<Option<W>>> =
            self.rows().map(|r| r.iter().map(|w| w.finite()).collect()).collect();
        rows.serialize(serializer)
    }
}

impl<'de, W: EdgeWeight + Deserialize<'de>> Deserialize<'de> for WeightMatrix<W> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let rows = Vec::<Vec<Option<W>>>::deserialize(deserializer)?;
        let rows = rows
            .into_iter()
            .map(|r| r.into_iter().map(|w| w.unwrap_or(W::INFINITY)).collect())
            .collect();
        WeightMatrix::from_rows(rows).map_err(de::Error::custom)
    }
}

// Internal marker for "no intermediate"; never a valid vertex because n <= u32::MAX.
pub(crate) const NO_INTERMEDIATE: u32 = u32::MAX;

/// n x n intermediate-vertex markers produced by the engine.
///
/// `get(i, j)` is the highest-indexed intermediate vertex on the recorded
/// shortest i -> j path, or `None` when that path is the direct edge or no
/// path exists. Read it through [`IntermediateMatrix::intermediates`] to
/// recover full paths.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntermediateMatrix {
    n: usize,
    data: Vec<u32>,
}

impl IntermediateMatrix {
    /// All-"none" matrix, the state before any relaxation.
    pub fn empty(n: usize) -> Self {
        Self { n, data: vec![NO_INTERMEDIATE; n * n] }
    }

    /// Build from nested rows of optional vertex indices.
    ///
    /// Entries are not range-checked here; reconstruction reports
    /// out-of-range vertices as [`Error::CorruptIntermediate`].
    pub fn from_rows(rows: Vec<Vec<Option<u32>>>) -> Result<Self> {
        let n = rows.len();
        let mut data = Vec::with_capacity(n * n);
        for (row, r) in rows.into_iter().enumerate() {
            if r.len() != n {
                return Err(Error::NotSquare { row, len: r.len(), expected: n });
            }
            data.extend(r.into_iter().map(|k| k.unwrap_or(NO_INTERMEDIATE)));
        }
        Ok(Self { n, data })
    }

    #[inline]
    pub fn dim(&self) -> usize {
        self.n
    }

    #[inline]
    pub fn get(&self, i: usize, j: usize) -> Option<usize> {
        match self.data[i * self.n + j] {
            NO_INTERMEDIATE => None,
            k => Some(k as usize),
        }
    }

    #[inline]
    pub(crate) fn raw(&self, i: usize, j: usize) -> u32 {
        self.data[i * self.n + j]
    }

    pub(crate) fn as_mut_slice(&mut self) -> &mut [u32] {
        &mut self.data
    }

    pub fn to_rows(&self) -> Vec<Vec<Option<usize>>> {
        (0..self.n).map(|i| (0..self.n).map(|j| self.get(i, j)).collect()).collect()
    }
}

impl Serialize for IntermediateMatrix {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.to_rows().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for IntermediateMatrix {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let rows = Vec::<Vec<Option<u32>>>::deserialize(deserializer)?;
        IntermediateMatrix::from_rows(rows).map_err(de::Error::custom)
    }
}
