use apsp_core::{
    all_pairs_shortest_paths, random_weight_matrix, Engine, EngineConfig, ShortestPaths, WeightMatrix,
};
use std::cmp::Ordering;
use std::collections::BinaryHeap;

const INF: u32 = u32::MAX;

fn from_edges(n: usize, edges: &[(usize, usize, u32)]) -> WeightMatrix<u32> {
    let mut m = WeightMatrix::disconnected(n);
    for &(u, v, w) in edges { if w < m.get(u, v) { m.set(u, v, w); } }
    m
}

fn path_graph(n: usize, w: u32) -> WeightMatrix<u32> {
    let edges: Vec<_> = (0..n.saturating_sub(1)).map(|u| (u, u + 1, w)).collect();
    from_edges(n, &edges)
}

fn star_graph(k: usize, w: u32) -> WeightMatrix<u32> { // center 0, leaves 1..=k
    let edges: Vec<_> = (1..=k).map(|leaf| (0, leaf, w)).collect();
    from_edges(k + 1, &edges)
}

fn complete_graph(n: usize, w: u32) -> WeightMatrix<u32> {
    let mut edges = Vec::new();
    for u in 0..n { for v in 0..n { if u != v { edges.push((u, v, w)); } } }
    from_edges(n, &edges)
}

fn bridge_cliques(a: usize, b: usize, w: u32) -> WeightMatrix<u32> { // bridge a-1 -> a only
    let mut edges = Vec::new();
    for u in 0..a { for v in 0..a { if u != v { edges.push((u, v, w)); } } }
    for u in a..a + b { for v in a..a + b { if u != v { edges.push((u, v, w)); } } }
    edges.push((a - 1, a, w));
    from_edges(a + b, &edges)
}

// Simple deterministic pseudo-random directed graph generator (xorshift64*)
fn pseudo_random_graph(n: usize, m: usize, seed: u64, w_min: u32, w_max: u32) -> WeightMatrix<u32> {
    let mut state = seed | 1; // ensure non-zero
    let mut next_u32 = || {
        state ^= state >> 12; state ^= state << 25; state ^= state >> 27; state = state.wrapping_mul(2685821657736338717); (state >> 32) as u32
    };
    let span = w_max - w_min + 1;
    let mut edges = Vec::with_capacity(m);
    while edges.len() < m {
        let u = next_u32() as usize % n; let v = next_u32() as usize % n; if u == v { continue; }
        edges.push((u, v, w_min + next_u32() % span));
    }
    from_edges(n, &edges)
}

#[derive(Copy, Clone, PartialEq, Eq)]
struct HeapItem { node: usize, dist: u32 }
impl Ord for HeapItem { fn cmp(&self, o: &Self) -> Ordering { o.dist.cmp(&self.dist).then(o.node.cmp(&self.node)) } }
impl PartialOrd for HeapItem { fn partial_cmp(&self, o: &Self) -> Option<Ordering> { Some(self.cmp(o)) } }

// Baseline: binary-heap Dijkstra from one source over the dense matrix.
fn dijkstra(w: &WeightMatrix<u32>, source: usize) -> Vec<u32> {
    let n = w.dim();
    let mut dist = vec![INF; n];
    dist[source] = 0;
    let mut heap = BinaryHeap::new();
    heap.push(HeapItem { node: source, dist: 0 });
    while let Some(HeapItem { node, dist: d }) = heap.pop() {
        if d > dist[node] { continue; }
        for v in 0..n {
            let e = w.get(node, v);
            if v == node || e == INF { continue; }
            let nd = d.saturating_add(e);
            if nd < dist[v] { dist[v] = nd; heap.push(HeapItem { node: v, dist: nd }); }
        }
    }
    dist
}

fn assert_parity(w: &WeightMatrix<u32>, sp: &ShortestPaths<u32>) {
    let mut diffs = Vec::new();
    for s in 0..w.dim() {
        let base = dijkstra(w, s);
        for (t, &b) in base.iter().enumerate() { let a = sp.distance(s, t); if a != b { diffs.push((s, t, a, b)); if diffs.len() > 16 { break; } } }
    }
    if !diffs.is_empty() {
        let mut msg = String::from("distance parity mismatch; first differences: ");
        for (s, t, a, b) in &diffs { msg.push_str(&format!("[{}->{}: {} vs {}] ", s, t, a, b)); }
        panic!("{} ({} diffs; n={})", msg, diffs.len(), w.dim());
    }
}

// Every reconstructed path must be a real walk in W costing exactly D[i][j].
fn assert_paths_cost_distance(w: &WeightMatrix<u32>, sp: &ShortestPaths<u32>) {
    let n = w.dim();
    for i in 0..n {
        for j in 0..n {
            let path = sp.path(i, j).unwrap();
            if i == j { assert_eq!(path, Some(vec![i])); continue; }
            match path {
                None => assert_eq!(sp.distance(i, j), INF, "{}->{} has no path but finite distance", i, j),
                Some(p) => {
                    assert_eq!(p.first(), Some(&i)); assert_eq!(p.last(), Some(&j));
                    assert_eq!(w.path_cost(&p), Some(sp.distance(i, j)), "path {:?} cost mismatch", p);
                    // Intermediates never exceed P[i][j], the highest one recorded.
                    if let Some(k) = sp.intermediate(i, j) { assert_eq!(p[1..p.len() - 1].iter().max(), Some(&k)); }
                }
            }
        }
    }
}

fn assert_triangle_inequality(sp: &ShortestPaths<u32>) {
    let n = sp.dim();
    for i in 0..n { for k in 0..n { for j in 0..n {
        let via = sp.distance(i, k).saturating_add(sp.distance(k, j));
        assert!(sp.distance(i, j) <= via, "triangle violated at ({},{},{})", i, k, j);
    } } }
}

#[test]
fn parity_core_small_graphs() {
    let graphs = vec![
        path_graph(10, 1),
        star_graph(12, 1),
        bridge_cliques(4, 4, 1),
        complete_graph(6, 1),
    ];
    for g in &graphs {
        let sp = all_pairs_shortest_paths(g, None).unwrap();
        assert_parity(g, &sp);
        assert_paths_cost_distance(g, &sp);
        assert_triangle_inequality(&sp);
    }
}

#[test]
fn parity_random_graphs() {
    for seed in 1..=5u64 { // moderate size to keep runtime reasonable
        let g = pseudo_random_graph(40, 160, seed * 7919, 1, 9);
        let sp = all_pairs_shortest_paths(&g, None).unwrap();
        assert_parity(&g, &sp);
        assert_paths_cost_distance(&g, &sp);
        assert_triangle_inequality(&sp);
        for i in 0..g.dim() { assert_eq!(sp.distance(i, i), 0); }
    }
}

#[test]
fn idempotent_runs() {
    let g = pseudo_random_graph(30, 90, 42, 1, 20);
    let a = all_pairs_shortest_paths(&g, None).unwrap();
    let b = all_pairs_shortest_paths(&g, None).unwrap();
    assert_eq!(a.distances(), b.distances());
    assert_eq!(a.intermediates(), b.intermediates());
}

#[test]
fn directionality_respected() {
    let g = path_graph(4, 2);
    assert!(!g.is_symmetric());
    let sp = all_pairs_shortest_paths(&g, None).unwrap();
    assert!(!sp.distances().is_symmetric());
    assert_eq!(sp.distance(0, 3), 6);
    assert_eq!(sp.distance(3, 0), INF);
    assert_eq!(sp.path(0, 3).unwrap(), Some(vec![0, 1, 2, 3]));
    assert_eq!(sp.path(3, 0).unwrap(), None);
}

#[test]
fn symmetric_input_gives_symmetric_distances() {
    let mut edges: Vec<(usize, usize, u32)> = Vec::new();
    for &(u, v, w) in &[(0, 1, 4), (1, 2, 1), (0, 2, 7), (2, 3, 3)] { edges.push((u, v, w)); edges.push((v, u, w)); }
    let g = from_edges(4, &edges);
    assert!(g.is_symmetric());
    assert!(all_pairs_shortest_paths(&g, None).unwrap().distances().is_symmetric());
}

#[test]
fn isolated_vertex_is_unreachable_both_ways() {
    // Vertex 2 has no edges at all.
    let g = from_edges(4, &[(0, 1, 1), (1, 3, 1), (3, 0, 1)]);
    let sp = all_pairs_shortest_paths(&g, None).unwrap();
    for v in [0, 1, 3] {
        assert_eq!(sp.distance(v, 2), INF);
        assert_eq!(sp.distance(2, v), INF);
        assert_eq!(sp.path(2, v).unwrap(), None);
    }
    assert_eq!(sp.distance(2, 2), 0);
}

#[test]
fn classic_seven_vertex_graph() {
    let g = WeightMatrix::from_rows(vec![
        vec![0, 4, INF, INF, INF, 10, INF],
        vec![3, 0, INF, 18, INF, INF, INF],
        vec![INF, 6, 0, INF, INF, INF, INF],
        vec![INF, 5, 15, 0, 2, 19, 5],
        vec![INF, INF, 12, 1, 0, INF, INF],
        vec![INF, INF, INF, INF, INF, 0, 10],
        vec![INF, INF, INF, 8, INF, INF, 0],
    ]).unwrap();
    let sp = all_pairs_shortest_paths(&g, None).unwrap();
    assert_eq!(sp.distances().to_rows(), vec![
        vec![0, 4, 36, 22, 24, 10, 20],
        vec![3, 0, 32, 18, 20, 13, 23],
        vec![9, 6, 0, 24, 26, 19, 29],
        vec![8, 5, 14, 0, 2, 18, 5],
        vec![9, 6, 12, 1, 0, 19, 6],
        vec![26, 23, 32, 18, 20, 0, 10],
        vec![16, 13, 22, 8, 10, 26, 0],
    ]);
    let s = |r: [i32; 7]| r.iter().map(|&k| if k < 0 { None } else { Some(k as usize) }).collect::<Vec<_>>();
    assert_eq!(sp.intermediates().to_rows(), vec![
        s([-1, -1, 4, 1, 3, -1, 5]),
        s([-1, -1, 4, -1, 3, 0, 3]),
        s([1, -1, -1, 1, 3, 1, 3]),
        s([1, -1, 4, -1, -1, 1, -1]),
        s([3, 3, -1, -1, -1, 3, 3]),
        s([6, 6, 6, 6, 6, -1, -1]),
        s([3, 3, 4, -1, 3, 3, -1]),
    ]);
    assert_eq!(sp.path(0, 2).unwrap(), Some(vec![0, 1, 3, 4, 2]));
    assert_paths_cost_distance(&g, &sp);
}

#[test]
fn float_weights_match_integer_run() {
    let g = pseudo_random_graph(25, 100, 3, 1, 8);
    let gf = WeightMatrix::from_rows(
        g.to_rows().into_iter().map(|r| r.into_iter().map(|w| if w == INF { f64::INFINITY } else { w as f64 }).collect()).collect(),
    ).unwrap();
    let a = all_pairs_shortest_paths(&g, None).unwrap();
    let b = all_pairs_shortest_paths(&gf, None).unwrap();
    for i in 0..25 { for j in 0..25 {
        let (x, y) = (a.distance(i, j), b.distance(i, j));
        if x == INF { assert!(y.is_infinite()); } else { assert_eq!(x as f64, y); }
        assert_eq!(a.intermediate(i, j), b.intermediate(i, j));
    } }
}

#[test]
fn zero_weight_cycle_paths() {
    // 0 -> 1 -> 2 -> 0 costs nothing; 2 -> 3 is the only way out.
    let g = from_edges(4, &[(0, 1, 0), (1, 2, 0), (2, 0, 0), (2, 3, 1)]);
    let sp = all_pairs_shortest_paths(&g, None).unwrap();
    assert_parity(&g, &sp);
    assert_paths_cost_distance(&g, &sp);
    assert_eq!(sp.path(0, 3).unwrap(), Some(vec![0, 1, 2, 3]));
    assert_eq!(sp.path(1, 0).unwrap(), Some(vec![1, 2, 0]));
    assert_eq!(sp.path(2, 1).unwrap(), Some(vec![2, 0, 1]));
    assert_eq!(sp.distance(3, 0), INF);
}

#[test]
fn zero_weight_edges_reconstruct_simple_paths() {
    for &n in &[4usize, 6, 9, 15] {
        for seed in 0..100u64 {
            let g = random_weight_matrix(n, 3.0, 0u32, 2, seed);
            let sp = all_pairs_shortest_paths(&g, None).unwrap();
            assert_parity(&g, &sp);
            assert_paths_cost_distance(&g, &sp);
            for i in 0..n { for j in 0..n {
                if let Some(p) = sp.path(i, j).unwrap() {
                    let mut seen = p.clone(); seen.sort_unstable(); seen.dedup();
                    assert_eq!(seen.len(), p.len(), "path {:?} repeats a vertex (n={}, seed={})", p, n, seed);
                }
            } }
        }
    }
}

#[test]
fn float_path_cost_within_rounding() {
    for seed in 0..30u64 {
        let g = random_weight_matrix(20, 4.0, 0.1f64, 0.3, seed);
        let sp = all_pairs_shortest_paths(&g, None).unwrap();
        for i in 0..20 { for j in 0..20 {
            match sp.path(i, j).unwrap() {
                None => assert!(sp.distance(i, j).is_infinite()),
                Some(p) => {
                    let cost = g.path_cost(&p).unwrap();
                    let d = sp.distance(i, j);
                    assert!((cost - d).abs() <= 1e-9 * d.max(1.0), "{}->{}: path cost {} vs distance {}", i, j, cost, d);
                }
            }
        } }
    }
}

#[test]
fn json_input_drives_engine() {
    let g = WeightMatrix::<u32>::from_json("[[0, 2, null], [null, 0, 3], [1, null, 0]]").unwrap();
    let sp = all_pairs_shortest_paths(&g, None).unwrap();
    let v = serde_json::to_value(&sp).unwrap();
    assert_eq!(v["distances"], serde_json::json!([[0, 2, 5], [4, 0, 3], [1, 3, 0]]));
    assert_eq!(v["intermediates"], serde_json::json!([[null, null, 1], [2, null, null], [null, 0, null]]));
}

#[cfg(feature = "parallel")]
#[test]
fn parallel_rows_bit_identical() {
    for seed in 1..=3u64 {
        let g = pseudo_random_graph(150, 900, seed, 1, 50);
        let seq = Engine::new(EngineConfig::sequential()).run(&g).unwrap();
        let par = Engine::new(EngineConfig { parallel_threshold: 2, ..EngineConfig::default() }).run(&g).unwrap();
        assert!(par.stats().parallel);
        assert_eq!(seq.distances(), par.distances());
        assert_eq!(seq.intermediates(), par.intermediates());
        assert_eq!(seq.stats().relaxations, par.stats().relaxations);
    }
}

#[test]
fn engine_vertex_limit_matches_truncated_input() {
    let g = pseudo_random_graph(20, 80, 11, 1, 5);
    let limited = Engine::new(EngineConfig::default().with_vertex_limit(Some(12))).run(&g).unwrap();
    let rows: Vec<Vec<u32>> = g.to_rows().into_iter().take(12).map(|r| r[..12].to_vec()).collect();
    let direct = all_pairs_shortest_paths(&WeightMatrix::from_rows(rows).unwrap(), None).unwrap();
    assert_eq!(limited.distances(), direct.distances());
    assert_eq!(limited.intermediates(), direct.intermediates());
}
