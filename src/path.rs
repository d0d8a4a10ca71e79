//! Path reconstruction from an intermediate-vertex matrix.
//!
//! `P[i][j] = k` says a shortest i -> j path runs through k, with k the highest
//! intermediate. The full path is recovered by recursive bisection: resolve
//! (i, k), emit k, resolve (k, j). Output comes out in path order, so no
//! reversal step is needed.

use crate::engine::ShortestPaths;
use crate::error::{Error, Result};
use crate::matrix::{IntermediateMatrix, NO_INTERMEDIATE};
use crate::weight::EdgeWeight;

/// Work item for the explicit-stack walk.
enum Step {
    Resolve(usize, usize),
    Emit(usize),
}

impl IntermediateMatrix {
    /// Vertices strictly between `from` and `to` on the recorded path.
    ///
    /// Empty for a direct edge, for an unreachable pair and for `from == to`;
    /// pair it with the distance matrix to tell those apart. Uses an explicit
    /// stack, so arbitrarily long paths cannot exhaust the call stack.
    ///
    /// A matrix that was not produced by a completed run (or came from a graph
    /// with a negative cycle) may be cyclic; that is reported as
    /// [`Error::PathTooLong`] once the walk would need more than `n - 2`
    /// intermediates.
    pub fn intermediates(&self, from: usize, to: usize) -> Result<Vec<usize>> {
        self.check_endpoints(from, to)?;
        let limit = self.dim().saturating_sub(2);
        let mut out = Vec::new();
        if from == to {
            return Ok(out);
        }

        // Every bisection emits exactly one vertex, so counting bisections
        // bounds both the output and the stack.
        let mut bisections = 0usize;
        // Right half is pushed first so the left half is resolved first.
        let mut stack = vec![Step::Resolve(from, to)];
        while let Some(step) = stack.pop() {
            match step {
                Step::Emit(k) => out.push(k),
                Step::Resolve(i, j) => {
                    if let Some(k) = self.checked_entry(i, j)? {
                        if bisections == limit {
                            return Err(Error::PathTooLong { from, to, limit });
                        }
                        bisections += 1;
                        stack.push(Step::Resolve(k, j));
                        stack.push(Step::Emit(k));
                        stack.push(Step::Resolve(i, k));
                    }
                }
            }
        }
        Ok(out)
    }

    /// Same output as [`intermediates`](Self::intermediates), written as the
    /// plain recursion. Recursion depth grows with the path length.
    pub fn intermediates_recursive(&self, from: usize, to: usize) -> Result<Vec<usize>> {
        self.check_endpoints(from, to)?;
        let mut out = Vec::new();
        if from != to {
            let limit = self.dim().saturating_sub(2);
            let mut budget = limit;
            self.resolve_into(from, to, &mut budget, &mut out)
                .map_err(|e| e.unwrap_or(Error::PathTooLong { from, to, limit }))?;
        }
        Ok(out)
    }

    // `Err(None)` means the bisection budget ran out; the caller names the pair.
    fn resolve_into(
        &self,
        i: usize,
        j: usize,
        budget: &mut usize,
        out: &mut Vec<usize>,
    ) -> std::result::Result<(), Option<Error>> {
        let Some(k) = self.checked_entry(i, j).map_err(Some)? else {
            return Ok(());
        };
        if *budget == 0 {
            return Err(None);
        }
        *budget -= 1;
        self.resolve_into(i, k, budget, out)?;
        out.push(k);
        self.resolve_into(k, j, budget, out)
    }

    fn check_endpoints(&self, from: usize, to: usize) -> Result<()> {
        let n = self.dim();
        for vertex in [from, to] {
            if vertex >= n {
                return Err(Error::VertexOutOfRange { vertex, n });
            }
        }
        Ok(())
    }

    // An entry equal to its own endpoint (k == i or k == j) would bisect into
    // the same pair forever; treat it like any other out-of-place vertex.
    fn checked_entry(&self, i: usize, j: usize) -> Result<Option<usize>> {
        let n = self.dim();
        match self.raw(i, j) {
            NO_INTERMEDIATE => Ok(None),
            k if (k as usize) >= n || k as usize == i || k as usize == j => {
                Err(Error::CorruptIntermediate { from: i, to: j, vertex: k as usize, n })
            }
            k => Ok(Some(k as usize)),
        }
    }
}

impl<W: EdgeWeight> ShortestPaths<W> {
    /// Full vertex sequence `from, ..., to` of a shortest path.
    ///
    /// `Ok(None)` when `to` is unreachable from `from`; `[from]` when they are
    /// the same vertex. That assumes a zero diagonal: with `W[i][i] > 0` the
    /// run may record a cycle in `D[i][i]` and `P[i][i]`, which is not expanded.
    pub fn path(&self, from: usize, to: usize) -> Result<Option<Vec<usize>>> {
        let mids = self.intermediates().intermediates(from, to)?;
        if from == to {
            return Ok(Some(vec![from]));
        }
        if !self.is_reachable(from, to) {
            return Ok(None);
        }
        let mut path = Vec::with_capacity(mids.len() + 2);
        path.push(from);
        path.extend(mids);
        path.push(to);
        Ok(Some(path))
    }

    /// Intermediate vertices only, as [`IntermediateMatrix::intermediates`].
    pub fn intermediates_between(&self, from: usize, to: usize) -> Result<Vec<usize>> {
        self.intermediates().intermediates(from, to)
    }
}
