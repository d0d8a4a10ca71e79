//! Runs one of the small textbook graphs and prints distances, intermediates
//! and every reconstructed path as JSON. `null` marks a missing edge.

use apsp_core::{EdgeWeight, Engine, WeightMatrix};
use tracing_subscriber::EnvFilter;

const FIVE: &str = r#"[
    [0, 1, null, 1, 5],
    [9, 0, 3, 2, null],
    [null, null, 0, 4, null],
    [null, null, 2, 0, 3],
    [3, null, null, null, 0]
]"#;

const SEVEN: &str = r#"[
    [0, 4, null, null, null, 10, null],
    [3, 0, null, 18, null, null, null],
    [null, 6, 0, null, null, null, null],
    [null, 5, 15, 0, 2, 19, 5],
    [null, null, 12, 1, 0, null, null],
    [null, null, null, null, null, 0, 10],
    [null, null, null, 8, null, null, 0]
]"#;

// Unit-weight undirected grid fragment.
const TWELVE: &str = r#"[
    [0, null, null, 1, null, null, null, null, null, null, null, null],
    [null, 0, null, null, 1, null, null, null, null, null, null, null],
    [null, null, 0, 1, null, null, null, null, null, null, null, null],
    [1, null, 1, 0, 1, null, null, 1, null, null, null, null],
    [null, 1, null, 1, 0, 1, null, null, 1, null, null, null],
    [null, null, null, null, 1, 0, null, null, null, null, null, null],
    [null, null, null, null, null, null, 0, 1, null, null, null, null],
    [null, null, null, 1, null, null, 1, 0, 1, null, 1, null],
    [null, null, null, null, 1, null, null, 1, 0, 1, null, 1],
    [null, null, null, null, null, null, null, null, 1, 0, null, null],
    [null, null, null, null, null, null, null, 1, null, null, 0, null],
    [null, null, null, null, null, null, null, null, 1, null, null, 0]
]"#;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt().with_env_filter(EnvFilter::from_default_env()).init();
    let which = std::env::args().nth(1).unwrap_or_else(|| "five".into());
    let src = match which.as_str() {
        "five" => FIVE,
        "seven" => SEVEN,
        "twelve" => TWELVE,
        other => { eprintln!("usage: run_classic [five|seven|twelve] (got {other})"); std::process::exit(1); }
    };
    let w: WeightMatrix<u32> = WeightMatrix::from_json(src)?;
    let sp = Engine::from_env().run(&w)?;

    let mut paths = Vec::new();
    for i in 0..sp.dim() {
        for j in 0..sp.dim() {
            if i == j { continue; }
            let label = match sp.path(i, j)? {
                Some(p) => p.iter().map(|v| format!("v{}", v + 1)).collect::<Vec<_>>().join(" -> "),
                None => "unreachable".to_string(),
            };
            paths.push(serde_json::json!({
                "from": format!("v{}", i + 1),
                "to": format!("v{}", j + 1),
                "weight": sp.distance(i, j).finite(),
                "path": label,
            }));
        }
    }
    let out = serde_json::json!({ "graph": which, "result": &sp, "paths": paths });
    println!("{}", serde_json::to_string_pretty(&out)?);
    Ok(())
}
