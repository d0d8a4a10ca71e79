//! Engine settings, optionally loaded from environment variables.
//!
//! | Variable                  | Default | Description                                   |
//! |---------------------------|---------|-----------------------------------------------|
//! | `APSP_VERTEX_LIMIT`       | unset   | Restrict runs to the leading n vertices (0 = all) |
//! | `APSP_PARALLEL_ROWS`      | `1`     | Relax rows in parallel (needs feature `parallel`) |
//! | `APSP_PARALLEL_THRESHOLD` | `128`   | Minimum vertex count before rows go parallel  |
//!
//! Absent or unparseable values fall back to the defaults.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Operate on the leading `n x n` block only. `None` uses the whole matrix.
    pub vertex_limit: Option<usize>,
    /// Split each k pass across rows. Ignored without the `parallel` feature.
    pub parallel_rows: bool,
    /// Below this many vertices the sequential loop is always used.
    pub parallel_threshold: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self { vertex_limit: None, parallel_rows: true, parallel_threshold: 128 }
    }
}

impl EngineConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            vertex_limit: env_parse::<usize>("APSP_VERTEX_LIMIT").filter(|&n| n > 0),
            parallel_rows: env_bool("APSP_PARALLEL_ROWS").unwrap_or(defaults.parallel_rows),
            parallel_threshold: env_parse("APSP_PARALLEL_THRESHOLD").unwrap_or(defaults.parallel_threshold),
        }
    }

    pub fn with_vertex_limit(mut self, limit: Option<usize>) -> Self {
        self.vertex_limit = limit;
        self
    }

    pub fn sequential() -> Self {
        Self { parallel_rows: false, ..Self::default() }
    }
}

fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
    std::env::var(key).ok().and_then(|v| v.trim().parse().ok())
}

fn env_bool(key: &str) -> Option<bool> {
    std::env::var(key).ok().map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
}
