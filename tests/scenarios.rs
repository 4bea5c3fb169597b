// tests/scenarios.rs - whole-pipeline ranking scenarios through the public API
use std::fs;

use webrank::matrix::ops;
use webrank::pagerank::observer::ConvergenceTrace;
use webrank::{
    rank_links, DanglingPolicy, DenseMatrix, LinkList, LinkMatrixBuilder, PowerIteration,
    RankConfig, SolverState, Standings,
};

/// A ring where page i links to i+1 and i+2 (mod n); every page has two
/// outbound links and two inbound, so the ranking is uniform.
fn ring_web(n: usize) -> String {
    (0..n)
        .map(|i| format!("2 {} {}\n", (i + 1) % n + 1, (i + 2) % n + 1))
        .collect()
}

#[test]
fn test_ring_is_uniform_across_sizes() {
    for n in [2usize, 5, 17, 64] {
        let links = LinkList::parse(&ring_web(n), n).unwrap();
        let result = rank_links(&links, &RankConfig::default()).unwrap();

        assert!(result.converged, "n = {n}");
        let expected = 1.0 / n as f32;
        for score in &result.scores {
            assert!((score - expected).abs() < 1e-4, "n = {n}: {score}");
        }
    }
}

/// Irregular web: page i (0-based) has 1 + i % 4 links with scattered targets.
fn irregular_web(n: usize) -> String {
    (0..n)
        .map(|i| {
            let degree = 1 + i % 4;
            let dests: Vec<String> = (1..=degree)
                .map(|k| ((i * (2 * k + 1) + k) % n + 1).to_string())
                .collect();
            format!("{degree} {}\n", dests.join(" "))
        })
        .collect()
}

#[test]
fn test_scores_do_not_depend_on_thread_count() {
    let n = 50;
    let links = LinkList::parse(&irregular_web(n), n).unwrap();
    let cfg = RankConfig::default();

    let rank_with = |threads: usize| {
        rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build()
            .unwrap()
            .install(|| rank_links(&links, &cfg).unwrap())
    };
    let serial = rank_with(1);
    let parallel = rank_with(8);

    assert_eq!(serial.iterations, parallel.iterations);
    assert_eq!(serial.delta.to_bits(), parallel.delta.to_bits());
    let bits = |scores: &[f32]| scores.iter().map(|s| s.to_bits()).collect::<Vec<_>>();
    assert_eq!(bits(&serial.scores), bits(&parallel.scores));
}

#[test]
fn test_mass_stays_near_one_every_iteration() {
    // Irregular web, every page links somewhere
    let text = "3 2 3 4\n1 3\n2 1 4\n1 1\n2 2 3\n";
    let links = LinkList::parse(text, 5).unwrap();
    let cfg = RankConfig::new().with_tolerance(1e-6);
    let matrix = LinkMatrixBuilder::new(5).build(&links).unwrap();

    let mut trace = ConvergenceTrace::new();
    let result = PowerIteration::new(matrix, &cfg)
        .unwrap()
        .run_with_observer(&mut trace)
        .unwrap();

    assert!(result.converged);
    for mass in &trace.masses {
        assert!((mass - 1.0).abs() < 1e-5);
    }
}

#[test]
fn test_dangling_leak_versus_redistribute() {
    // Page 3 links nowhere
    let text = "2 2 3\n1 3\n0\n";
    let links = LinkList::parse(text, 3).unwrap();

    let leak = rank_links(&links, &RankConfig::new().with_tolerance(1e-6)).unwrap();
    let fixed = rank_links(
        &links,
        &RankConfig::new().with_dangling(DanglingPolicy::Redistribute),
    )
    .unwrap();

    assert!(leak.converged && fixed.converged);
    assert!(leak.total_mass() < 1.0);
    assert!((fixed.total_mass() - 1.0).abs() < 1e-5);

    // Same steady-state balance as the two-page case: (1-d)·s_dangling = d·(1 - mass)
    let d = 0.15f32;
    let lhs = (1.0 - d) * leak.scores[2];
    let rhs = d * (1.0 - leak.total_mass());
    assert!((lhs - rhs).abs() < 1e-4);
}

#[test]
fn test_converged_scores_are_a_fixed_point() {
    let text = "3 2 3 4\n1 3\n2 1 4\n1 1\n";
    let links = LinkList::parse(text, 4).unwrap();
    let cfg = RankConfig::new().with_tolerance(1e-6);
    let result = rank_links(&links, &cfg).unwrap();

    // Apply one more update by hand: s' = (1-d)·M·s + d/N
    let mut matrix = LinkMatrixBuilder::new(4).build(&links).unwrap();
    ops::scale(matrix.as_mut_slice(), 1.0 - cfg.damping);
    let mut next = result.scores.clone();
    ops::mat_vec(&matrix, &mut next).unwrap();
    ops::add_assign(&mut next, &[cfg.damping / 4.0; 4]).unwrap();

    let mut diff = next.clone();
    ops::scale(&mut diff, -1.0);
    ops::add_assign(&mut diff, &result.scores).unwrap();
    assert!(ops::norm(&diff) < 1e-4);
}

#[test]
fn test_builder_matrix_moves_into_solver() {
    let links = LinkList::parse("1 2\n1 1\n", 2).unwrap();
    let matrix: DenseMatrix = LinkMatrixBuilder::new(2).build(&links).unwrap();
    let mut solver = PowerIteration::new(matrix, &RankConfig::default()).unwrap();

    assert_eq!(solver.num_pages(), 2);
    solver.step().unwrap();
    assert_eq!(solver.state(), SolverState::Converged);
}

#[test]
fn test_standings_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("web.txt");
    fs::write(&path, "2 2 3\n1 1\n1 1\n").unwrap();

    let cfg = RankConfig::default();
    let matrix = LinkMatrixBuilder::new(3)
        .with_dangling(cfg.dangling)
        .from_path(&path)
        .unwrap();
    let result = PowerIteration::new(matrix, &cfg).unwrap().run().unwrap();

    let mut scores = result.scores.clone();
    let standings = Standings::take(&mut scores);
    let first = standings.iter().next().unwrap();

    assert_eq!(first.page, 1);
    assert_eq!(standings.len(), 3);
    assert!(scores.iter().all(|&s| s == 0.0));
}
