//! Graph adapter trait and the string-identified interaction network.

use std::collections::{BTreeSet, HashMap};

use crate::partition::{connected_components, DisjointSet};

/// A graph view that can return **borrowed** neighbor slices.
///
/// Numeric builders only need node counts and adjacency, so they are generic over this
/// trait rather than tied to [`Network`].
pub trait GraphRef {
    fn node_count(&self) -> usize;
    fn neighbors_ref(&self, node: usize) -> &[usize];
    fn degree(&self, node: usize) -> usize {
        self.neighbors_ref(node).len()
    }
}

/// Undirected, unweighted network with opaque string node identifiers.
///
/// Node index `i` is the position of the identifier in lexicographic (byte) order, fixed at
/// construction. Adjacency lists are sorted and free of duplicates and self-loops.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Network {
    names: Vec<String>,
    index: HashMap<String, usize>,
    adj: Vec<Vec<usize>>,
    edge_count: usize,
}

impl Network {
    /// Build a network from an undirected edge list.
    ///
    /// Nodes are the endpoints of all non-self-loop edges. Repeated edges (in either
    /// direction) collapse into one.
    pub fn from_edges<I, S>(edges: I) -> Self
    where
        I: IntoIterator<Item = (S, S)>,
        S: Into<String>,
    {
        let mut pairs: BTreeSet<(String, String)> = BTreeSet::new();
        let mut self_loops = 0usize;
        for (u, v) in edges {
            let (u, v) = (u.into(), v.into());
            if u == v {
                self_loops += 1;
                continue;
            }
            if u < v {
                pairs.insert((u, v));
            } else {
                pairs.insert((v, u));
            }
        }
        if self_loops > 0 {
            tracing::debug!(self_loops, "skipped self-loop edges");
        }

        let names: Vec<String> = pairs
            .iter()
            .flat_map(|(u, v)| [u.clone(), v.clone()])
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        let index: HashMap<String, usize> =
            names.iter().enumerate().map(|(i, s)| (s.clone(), i)).collect();

        let mut adj = vec![Vec::new(); names.len()];
        for (u, v) in &pairs {
            let (iu, iv) = (index[u], index[v]);
            adj[iu].push(iv);
            adj[iv].push(iu);
        }
        for nbrs in &mut adj {
            nbrs.sort_unstable();
        }

        Self {
            names,
            index,
            adj,
            edge_count: pairs.len(),
        }
    }

    /// Convert a `petgraph` undirected graph whose node weights are identifiers.
    #[cfg(feature = "petgraph")]
    pub fn from_petgraph<E>(graph: &petgraph::graph::UnGraph<String, E>) -> Self {
        use petgraph::visit::EdgeRef;
        Self::from_edges(
            graph
                .edge_references()
                .map(|e| (graph[e.source()].clone(), graph[e.target()].clone())),
        )
    }

    pub fn node_count(&self) -> usize {
        self.names.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Identifier of node `i`.
    pub fn name(&self, i: usize) -> &str {
        &self.names[i]
    }

    /// All identifiers, in index order (sorted).
    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    pub fn neighbors(&self, i: usize) -> &[usize] {
        &self.adj[i]
    }

    pub fn degree(&self, i: usize) -> usize {
        self.adj[i].len()
    }

    pub fn is_connected(&self) -> bool {
        let labels = connected_components(self);
        labels.iter().all(|&l| l == 0)
    }

    /// Whether the sub-graph induced by `nodes` is a single connected component.
    ///
    /// An empty node set is not connected.
    pub fn induced_is_connected(&self, nodes: &[usize]) -> bool {
        if nodes.is_empty() {
            return false;
        }
        let mut dsu = DisjointSet::new(self.node_count());
        let mut components = 0usize;
        let mut seen = vec![false; self.node_count()];
        for &u in nodes {
            if std::mem::replace(&mut seen[u], true) {
                continue;
            }
            components += 1;
            for &v in &self.adj[u] {
                if seen[v] && dsu.union(u, v) {
                    components -= 1;
                }
            }
        }
        components == 1
    }

    /// The sub-network induced by the largest connected component.
    ///
    /// Ties go to the component holding the lexicographically smallest identifier.
    pub fn largest_component(&self) -> Network {
        let labels = connected_components(self);
        let k = labels.iter().copied().max().map_or(0, |m| m + 1);
        if k <= 1 {
            return self.clone();
        }
        let mut sizes = vec![0usize; k];
        for &l in &labels {
            sizes[l] += 1;
        }
        // Labels are assigned in index order, so the first maximum holds the smallest name.
        let mut best = 0usize;
        for (l, &size) in sizes.iter().enumerate() {
            if size > sizes[best] {
                best = l;
            }
        }
        tracing::debug!(
            components = k,
            kept = sizes[best],
            dropped = self.node_count() - sizes[best],
            "restricting network to its largest connected component"
        );

        let mut edges = Vec::new();
        for (u, nbrs) in self.adj.iter().enumerate() {
            if labels[u] != best {
                continue;
            }
            for &v in nbrs {
                if u < v {
                    edges.push((self.names[u].clone(), self.names[v].clone()));
                }
            }
        }
        Network::from_edges(edges)
    }
}

impl GraphRef for Network {
    fn node_count(&self) -> usize {
        self.names.len()
    }

    fn neighbors_ref(&self, node: usize) -> &[usize] {
        &self.adj[node]
    }
}
