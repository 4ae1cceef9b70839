use netprop::{
    column_normalized_matrix, rwr, symmetric_matrix, Network, RwrConfig, SymmetryMode,
};
use proptest::prelude::*;

/// Connected network from a spanning tree (`parents`) plus `extra` edges.
fn connected_network(n: usize, parents: &[usize], extra: &[(usize, usize)]) -> Network {
    let name = |i: usize| format!("g{i:02}");
    let mut edges = Vec::new();
    for (i, &p) in parents.iter().take(n - 1).enumerate() {
        edges.push((name(i + 1), name(p % (i + 1))));
    }
    for &(u, v) in extra {
        edges.push((name(u % n), name(v % n)));
    }
    Network::from_edges(edges)
}

fn assert_prob_like(xs: &[f64]) {
    assert!(!xs.is_empty());
    for &x in xs {
        assert!(x.is_finite(), "non-finite score: {x}");
        assert!(x >= -1e-12, "negative score: {x}");
    }
}

fn network_strategy() -> impl Strategy<Value = Network> {
    (2usize..14).prop_flat_map(|n| {
        (
            proptest::collection::vec(0usize..64, n - 1),
            proptest::collection::vec((0usize..64, 0usize..64), 0..2 * n),
        )
            .prop_map(move |(parents, extra)| connected_network(n, &parents, &extra))
    })
}

fn config_strategy() -> impl Strategy<Value = RwrConfig> {
    (0.05f64..0.95, 0.1f64..=1.0, any::<bool>(), any::<bool>()).prop_map(
        |(restart, teleport, symmetric, degree_scaling)| RwrConfig {
            restart,
            teleport,
            mode: if symmetric {
                SymmetryMode::Symmetric
            } else {
                SymmetryMode::ColumnNormalized
            },
            degree_scaling,
        },
    )
}

proptest! {
    #[test]
    fn column_normalized_columns_sum_to_one(g in network_strategy(), teleport in 0.05f64..=1.0) {
        let m = column_normalized_matrix(&g, teleport).unwrap();
        for j in 0..g.node_count() {
            let s: f64 = m.column(j).sum();
            prop_assert!((s - 1.0).abs() < 1e-9, "col {} sum={}", j, s);
        }
    }

    #[test]
    fn symmetric_matrix_is_symmetric(g in network_strategy()) {
        let m = symmetric_matrix(&g).unwrap();
        prop_assert!((&m - m.transpose()).amax() < 1e-12);
    }

    #[test]
    fn module_is_connected_superset_of_seeds(
        g in network_strategy(),
        picks in proptest::collection::vec(any::<prop::sample::Index>(), 1..4),
        config in config_strategy(),
    ) {
        let names = g.names().to_vec();
        let seeds: Vec<&str> = picks
            .iter()
            .map(|ix| names[ix.index(names.len())].as_str())
            .collect();

        let run = rwr(&g, &seeds, &config).unwrap();
        let scores: Vec<f64> = run.ranking.entries().iter().map(|r| r.probability).collect();
        assert_prob_like(&scores);
        prop_assert_eq!(run.ranking.len(), g.node_count());
        prop_assert!(scores.windows(2).all(|w| w[0] >= w[1]));

        let nodes = run.module.nodes();
        prop_assert!(g.induced_is_connected(&nodes));
        for s in &seeds {
            prop_assert!(run.module.names().any(|m| m == *s), "seed {} missing", s);
        }
        let ranks: Vec<usize> = run.module.added().map(|e| e.rank).collect();
        prop_assert!(ranks.windows(2).all(|w| w[0] < w[1]), "admission not in rank order");
    }

    #[test]
    fn runs_are_deterministic(
        g in network_strategy(),
        picks in proptest::collection::vec(any::<prop::sample::Index>(), 1..4),
        config in config_strategy(),
    ) {
        let names = g.names().to_vec();
        let seeds: Vec<&str> = picks
            .iter()
            .map(|ix| names[ix.index(names.len())].as_str())
            .collect();
        let mut reversed = seeds.clone();
        reversed.reverse();

        let a = rwr(&g, &seeds, &config).unwrap();
        let b = rwr(&g, &reversed, &config).unwrap();
        prop_assert_eq!(a, b);
    }
}

#[test]
fn edge_insertion_order_does_not_change_results() {
    let edges = [("A", "B"), ("B", "C"), ("C", "D"), ("B", "E"), ("E", "D")];
    let mut shuffled = edges.to_vec();
    shuffled.reverse();
    let g1 = Network::from_edges(edges);
    let g2 = Network::from_edges(shuffled.into_iter().map(|(u, v)| (v, u)));
    let cfg = RwrConfig::default();
    let a = rwr(&g1, ["A", "D"], &cfg).unwrap();
    let b = rwr(&g2, ["A", "D"], &cfg).unwrap();
    assert_eq!(a, b);
}

#[cfg(feature = "petgraph")]
mod petgraph_interop {
    use netprop::{rwr, Network, RwrConfig};
    use petgraph::graph::UnGraph;

    #[test]
    fn petgraph_network_matches_edge_list() {
        let mut g: UnGraph<String, ()> = UnGraph::new_undirected();
        let a = g.add_node("A".to_string());
        let b = g.add_node("B".to_string());
        let c = g.add_node("C".to_string());
        g.add_edge(a, b, ());
        g.add_edge(b, c, ());

        let from_pg = Network::from_petgraph(&g);
        let from_edges = Network::from_edges([("A", "B"), ("B", "C")]);
        assert_eq!(from_pg, from_edges);

        let run = rwr(&from_pg, ["A", "C"], &RwrConfig::default()).unwrap();
        assert_eq!(run.module.len(), 3);
    }
}
