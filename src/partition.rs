//! Connectivity primitives: component labelling and incremental union-find.
//!
//! Invariants:
//! - Component labels are contiguous in `0..k`, assigned in increasing order of the lowest
//!   node index in each component.
//! - [`DisjointSet::union`] reports whether two previously separate sets were merged, which
//!   lets callers keep an exact component count while nodes are added one at a time.

use std::collections::VecDeque;

use crate::graph::GraphRef;

/// Connected components of an **undirected** graph, using BFS.
pub fn connected_components<G: GraphRef>(graph: &G) -> Vec<usize> {
    let n = graph.node_count();
    let mut labels = vec![usize::MAX; n];
    let mut queue: VecDeque<usize> = VecDeque::new();

    let mut comp = 0usize;
    for start in 0..n {
        if labels[start] != usize::MAX {
            continue;
        }
        labels[start] = comp;
        queue.push_back(start);
        while let Some(u) = queue.pop_front() {
            for &v in graph.neighbors_ref(u) {
                if v >= n {
                    // Adapter contract violation; ignore out-of-range neighbor.
                    continue;
                }
                if labels[v] == usize::MAX {
                    labels[v] = comp;
                    queue.push_back(v);
                }
            }
        }
        comp += 1;
    }

    labels
}

/// Union-find over `0..n` with path halving and union by size.
#[derive(Debug, Clone)]
pub struct DisjointSet {
    parent: Vec<usize>,
    size: Vec<usize>,
}

impl DisjointSet {
    pub fn new(n: usize) -> Self {
        Self {
            parent: (0..n).collect(),
            size: vec![1; n],
        }
    }

    pub fn find(&mut self, mut x: usize) -> usize {
        while self.parent[x] != x {
            self.parent[x] = self.parent[self.parent[x]];
            x = self.parent[x];
        }
        x
    }

    /// Merge the sets holding `a` and `b`. Returns `false` if they were already joined.
    pub fn union(&mut self, a: usize, b: usize) -> bool {
        let (mut ra, mut rb) = (self.find(a), self.find(b));
        if ra == rb {
            return false;
        }
        if self.size[ra] < self.size[rb] {
            std::mem::swap(&mut ra, &mut rb);
        }
        self.parent[rb] = ra;
        self.size[ra] += self.size[rb];
        true
    }

    pub fn same(&mut self, a: usize, b: usize) -> bool {
        self.find(a) == self.find(b)
    }
}
