//! All-pairs shortest paths (Floyd-Warshall) with path reconstruction,
//! exposed as a Rust API and a stable C ABI.
//!  - Engine: dense relaxation over a square weight matrix (`engine`), with
//!    optional row parallelism behind the `parallel` feature.
//!  - Reconstructor: recursive-bisection walk of the intermediate matrix (`path`).
//! C callers use `apsp_run` / `apsp_path` over `f32` weights with `INFINITY`
//! as "no edge" and `-1` as "no intermediate".

use core::slice;

pub mod config;
pub mod engine;
pub mod error;
pub mod generate;
pub mod matrix;
pub mod path;
pub mod weight;

pub use config::EngineConfig;
pub use engine::{all_pairs_shortest_paths, Engine, EngineStats, ShortestPaths};
pub use error::{Error, Result};
pub use generate::random_weight_matrix;
pub use matrix::{DistanceMatrix, IntermediateMatrix, WeightMatrix};
pub use weight::EdgeWeight;

#[repr(C)]
#[derive(Copy, Clone, Debug, Default)]
pub struct ApspResultInfo {
    pub relaxations: u64,   // successful D[i][j] improvements
    pub passes: u32,        // k iterations
    pub vertices: u32,      // n actually computed (after vertex_limit)
    pub error_code: i32,    // 0 == success
}

#[no_mangle]
pub extern "C" fn apsp_version() -> u32 { 1 }

#[inline(always)]
unsafe fn as_slice<'a, T>(ptr: *const T, len: usize) -> &'a [T] {
    slice::from_raw_parts(ptr, len)
}
#[inline(always)]
unsafe fn as_mut_slice<'a, T>(ptr: *mut T, len: usize) -> &'a mut [T] {
    slice::from_raw_parts_mut(ptr, len)
}

// n * n elements, or None when that overflows usize (32-bit targets).
fn square_len(n: u32) -> Option<usize> {
    (n as usize).checked_mul(n as usize)
}

unsafe fn write_error(info: *mut ApspResultInfo, code: i32) -> i32 {
    if !info.is_null() { *info = ApspResultInfo { error_code: code, ..ApspResultInfo::default() }; }
    code
}

/// Compute all-pairs shortest paths over a row-major `n x n` `f32` matrix.
///
/// `vertex_limit == 0` means all `n` vertices; otherwise only the leading
/// `m = vertex_limit` vertices are used and results are written row-major with
/// stride `m` into the first `m * m` slots. Engine knobs come from `APSP_*`
/// environment variables (see `config`).
///
/// Return codes: `0` ok, `-1` n == 0, `-2` vertex_limit > n, `-3` null pointer,
/// `-6` `n * n` does not fit in `usize`.
///
/// # Safety
/// `weights`, `out_dist` and `out_next` must point to `n * n` valid elements;
/// `info` may be null.
#[no_mangle]
pub unsafe extern "C" fn apsp_run(
    n: u32,
    vertex_limit: u32,
    weights: *const f32,  // len n*n
    out_dist: *mut f32,   // len n*n
    out_next: *mut i32,   // len n*n, -1 == none
    info: *mut ApspResultInfo,
) -> i32 {
    if n == 0 { return write_error(info, -1); }
    if weights.is_null() || out_dist.is_null() || out_next.is_null() { return write_error(info, -3); }

    let n_usize = n as usize;
    let Some(len) = square_len(n) else { return write_error(info, -6); };
    let wts = as_slice(weights, len);
    let matrix = match WeightMatrix::from_flat(n_usize, wts.to_vec()) {
        Ok(m) => m,
        Err(e) => return write_error(info, e.code()),
    };
    let limit = if vertex_limit == 0 { None } else { Some(vertex_limit as usize) };
    let engine = Engine::new(EngineConfig::from_env().with_vertex_limit(limit));
    let result = match engine.run(&matrix) {
        Ok(r) => r,
        Err(e) => return write_error(info, e.code()),
    };

    let m = result.dim();
    let dist = as_mut_slice(out_dist, len);
    let next = as_mut_slice(out_next, len);
    dist[..m * m].copy_from_slice(result.distances().as_slice());
    for i in 0..m {
        for j in 0..m {
            next[i * m + j] = result.intermediate(i, j).map_or(-1, |k| k as i32);
        }
    }

    let stats = result.stats();
    if !info.is_null() {
        *info = ApspResultInfo { relaxations: stats.relaxations, passes: stats.passes, vertices: stats.vertices, error_code: 0 };
    }
    0
}

/// Write the intermediates of the recorded `from -> to` path into `out_path`.
///
/// `*out_len` always receives the path's intermediate count when it is known,
/// so a caller can retry with a larger buffer after `-5`.
///
/// Return codes: `0` ok, `-1` n == 0, `-2` endpoint out of range, `-3` null
/// pointer, `-4` corrupt or cyclic `next` matrix, `-5` `capacity` too small,
/// `-6` `n * n` does not fit in `usize`.
///
/// # Safety
/// `next` must point to `n * n` elements as produced by `apsp_run`;
/// `out_path` must hold `capacity` elements (may be null when `capacity == 0`).
#[no_mangle]
pub unsafe extern "C" fn apsp_path(
    n: u32,
    next: *const i32,
    from: u32,
    to: u32,
    out_path: *mut u32,
    capacity: u32,
    out_len: *mut u32,
) -> i32 {
    if n == 0 { return -1; }
    if next.is_null() || out_len.is_null() || (out_path.is_null() && capacity > 0) { return -3; }
    let n_usize = n as usize;
    let Some(len) = square_len(n) else { return -6; };
    let raw = as_slice(next, len);
    let mut rows = Vec::with_capacity(n_usize);
    for row in raw.chunks_exact(n_usize) {
        let mut r = Vec::with_capacity(n_usize);
        for &k in row {
            match k {
                -1 => r.push(None),
                k if k < 0 => return -4,
                k => r.push(Some(k as u32)),
            }
        }
        rows.push(r);
    }
    let matrix = match IntermediateMatrix::from_rows(rows) {
        Ok(m) => m,
        Err(e) => return e.code(),
    };
    let mids = match matrix.intermediates(from as usize, to as usize) {
        Ok(v) => v,
        Err(e) => return e.code(),
    };
    *out_len = mids.len() as u32;
    if mids.len() > capacity as usize { return -5; }
    if !mids.is_empty() {
        let out = as_mut_slice(out_path, mids.len());
        for (slot, v) in out.iter_mut().zip(&mids) { *slot = *v as u32; }
    }
    0
}
