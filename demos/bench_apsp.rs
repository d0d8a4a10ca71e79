use std::fs::File;
use std::io::Write;
use std::time::Instant;

use apsp_core::{random_weight_matrix, Engine, EngineConfig};
use tracing_subscriber::EnvFilter;

fn run_one(n: usize, avg_degree: f32, seed: u64, check_paths: bool) -> serde_json::Value {
    let w = random_weight_matrix(n, avg_degree, 1u32, 100, seed);
    let seq = Engine::new(EngineConfig::sequential());
    let auto = Engine::from_env();

    let t0 = Instant::now(); let sp_seq = seq.run(&w).expect("sequential run"); let dt_seq = t0.elapsed().as_secs_f64() * 1000.0;
    let t1 = Instant::now(); let sp_auto = auto.run(&w).expect("configured run"); let dt_auto = t1.elapsed().as_secs_f64() * 1000.0;
    assert_eq!(sp_seq.distances(), sp_auto.distances(), "distance parity fail at n={n}");
    assert_eq!(sp_seq.intermediates(), sp_auto.intermediates(), "intermediate parity fail at n={n}");

    let mut obj = serde_json::json!({
        "n": n, "avg_degree": avg_degree,
        "sequential_ms": dt_seq, "configured_ms": dt_auto,
        "speedup": dt_seq / dt_auto.max(1e-9),
        "relaxations": sp_seq.stats().relaxations,
        "parallel": sp_auto.stats().parallel,
    });
    if check_paths {
        // Every reconstructed path must cost exactly its distance.
        let t2 = Instant::now();
        let mut checked = 0u64;
        for i in 0..n { for j in 0..n {
            if let Some(p) = sp_seq.path(i, j).expect("reconstruct") {
                assert_eq!(w.path_cost(&p), Some(sp_seq.distance(i, j)), "path cost mismatch {i}->{j}");
                checked += 1;
            }
        } }
        let dt_paths = t2.elapsed().as_secs_f64() * 1000.0;
        if let serde_json::Value::Object(ref mut map) = obj {
            map.insert("paths_checked".to_string(), checked.into());
            map.insert("paths_ms".to_string(), dt_paths.into());
        }
    }
    obj
}

fn main() {
    tracing_subscriber::fmt().with_env_filter(EnvFilter::from_default_env()).init();
    let args: Vec<String> = std::env::args().collect();
    if args.iter().any(|a| a == "--help") { eprintln!("Usage: bench_apsp --sizes 64,128,256 --degrees 2,4,8 --seed 42 --out benchmarks/apsp_sample.json [--check-paths]"); return; }
    let arg = |name: &str| args.iter().position(|a| a == name).and_then(|i| args.get(i + 1)).cloned();
    let sizes_arg = arg("--sizes").unwrap_or_else(|| "64,128,256".into());
    let degrees_arg = arg("--degrees").unwrap_or_else(|| "4".into());
    let seed: u64 = arg("--seed").and_then(|v| v.parse().ok()).unwrap_or(42);
    let out_path = arg("--out").unwrap_or_else(|| "benchmarks/apsp_sample.json".into());
    let check_paths = args.iter().any(|a| a == "--check-paths");
    let sizes: Vec<usize> = sizes_arg.split(',').filter_map(|s| s.parse().ok()).collect();
    let degrees: Vec<f32> = degrees_arg.split(',').filter_map(|s| s.parse().ok()).collect();
    let mut results = Vec::new();
    for &s in &sizes { for &deg in &degrees { results.push(run_one(s, deg, seed, check_paths)); } }
    let json = serde_json::Value::Array(results);
    if let Some(dir) = std::path::Path::new(&out_path).parent() { std::fs::create_dir_all(dir).ok(); }
    let mut f = File::create(&out_path).expect("create out");
    f.write_all(serde_json::to_string_pretty(&json).expect("serialize").as_bytes()).expect("write out");
    eprintln!("wrote {}", out_path);
}
