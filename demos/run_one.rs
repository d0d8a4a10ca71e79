use std::time::Instant;

use apsp_core::{random_weight_matrix, Engine};
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt().with_env_filter(EnvFilter::from_default_env()).init();
    let args: Vec<String> = std::env::args().collect();
    if args.len() < 4 { eprintln!("usage: run_one <n> <avg_degree> <seed> [from to]"); std::process::exit(1); }
    let n: usize = args[1].parse().expect("n");
    let density: f32 = args[2].parse().expect("avg_degree");
    let seed: u64 = args[3].parse().expect("seed");
    let w = random_weight_matrix(n, density, 1.0f32, 4.0, seed);
    let engine = Engine::from_env();
    let t0 = Instant::now();
    let sp = match engine.run(&w) {
        Ok(sp) => sp,
        Err(e) => { eprintln!("error {}: {e}", e.code()); std::process::exit(2); }
    };
    let ms = t0.elapsed().as_secs_f64() * 1000.0;
    let st = sp.stats();
    let reachable = (0..sp.dim()).flat_map(|i| (0..sp.dim()).map(move |j| (i, j))).filter(|&(i, j)| sp.is_reachable(i, j)).count();
    print!("n={n} passes={} relax={} reachable_pairs={reachable} parallel={} ms={ms:.3}", st.passes, st.relaxations, st.parallel);
    if args.len() >= 6 {
        let from: usize = args[4].parse().expect("from");
        let to: usize = args[5].parse().expect("to");
        match sp.path(from, to) {
            Ok(Some(p)) => print!(" path={p:?} cost={}", sp.distance(from, to)),
            Ok(None) => print!(" path=unreachable"),
            Err(e) => print!(" path_error={e}"),
        }
    }
    println!();
}
