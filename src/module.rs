//! Greedy expansion of a seed set into a connected module.
//!
//! Starting from the seeds on the graph, the highest-ranked node not yet in the module is
//! admitted one at a time until the induced sub-graph is a single connected component.
//! Connectivity is tracked incrementally with a [`DisjointSet`]: admitting a node creates one
//! component and each union with an already-admitted neighbor removes one.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::graph::Network;
use crate::partition::DisjointSet;
use crate::rank::RankedList;
use crate::{Error, Result};

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ModuleEntry {
    /// 1-based position in the module (seeds first, then admission order).
    pub position: usize,
    /// 1-based position in the full ranking.
    pub rank: usize,
    pub node: usize,
    pub name: String,
    pub probability: f64,
    pub seed: bool,
}

/// Seeds plus the admitted nodes; the induced sub-graph is connected.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ConnectedModule {
    entries: Vec<ModuleEntry>,
}

impl ConnectedModule {
    pub fn entries(&self) -> &[ModuleEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Node indices in module order.
    pub fn nodes(&self) -> Vec<usize> {
        self.entries.iter().map(|e| e.node).collect()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.name.as_str())
    }

    /// Nodes admitted on top of the seeds, in admission order.
    pub fn added(&self) -> impl Iterator<Item = &ModuleEntry> {
        self.entries.iter().filter(|e| !e.seed)
    }

    /// Write `rank\tnode\tprobability` rows, `rank` being the module position.
    pub fn write_tsv<W: Write>(&self, mut out: W) -> Result<()> {
        writeln!(out, "rank\tnode\tprobability")?;
        for e in &self.entries {
            writeln!(out, "{}\t{}\t{}", e.position, e.name, e.probability)?;
        }
        out.flush()?;
        Ok(())
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let file = File::create(path)?;
        self.write_tsv(BufWriter::new(file))?;
        tracing::debug!(path = %path.display(), rows = self.len(), "wrote connected module");
        Ok(())
    }
}

struct Expansion {
    dsu: DisjointSet,
    member: Vec<bool>,
    components: usize,
}

impl Expansion {
    fn new(n: usize) -> Self {
        Self {
            dsu: DisjointSet::new(n),
            member: vec![false; n],
            components: 0,
        }
    }

    /// Add `u` to the module and return the number of components of the induced sub-graph.
    fn admit(&mut self, network: &Network, u: usize) -> usize {
        self.member[u] = true;
        self.components += 1;
        for &v in network.neighbors(u) {
            if self.member[v] && self.dsu.union(u, v) {
                self.components -= 1;
            }
        }
        self.components
    }
}

/// Expand `seeds` (node indices) along `ranking` until the module is connected.
pub fn connected_module(
    network: &Network,
    seeds: &[usize],
    ranking: &RankedList,
) -> Result<ConnectedModule> {
    if seeds.is_empty() {
        return Err(Error::InvalidInput("no seeds found in network".to_string()));
    }
    let mut state = Expansion::new(network.node_count());

    let mut seed_order: Vec<usize> = seeds.to_vec();
    seed_order.sort_by_key(|&s| ranking.rank_of(s));
    seed_order.dedup();
    let seed_count = seed_order.len();
    let mut order = Vec::with_capacity(seeds.len());
    let mut components = 0usize;
    for &s in &seed_order {
        components = state.admit(network, s);
        order.push(s);
    }

    let mut excluded = seed_order.clone();
    excluded.sort_unstable();
    let mut candidates = ranking.without(&excluded);
    while components > 1 {
        let Some(next) = candidates.next() else {
            return Err(Error::InvalidInput(
                "network is not connected; seeds cannot be joined".to_string(),
            ));
        };
        components = state.admit(network, next.node);
        order.push(next.node);
    }
    tracing::debug!(
        seeds = seed_count,
        added = order.len() - seed_count,
        "module connected"
    );

    let entries = order
        .into_iter()
        .enumerate()
        .map(|(i, node)| ModuleEntry {
            position: i + 1,
            rank: ranking.rank_of(node),
            node,
            name: network.name(node).to_string(),
            probability: ranking.probability_of(node),
            seed: i < seed_count,
        })
        .collect();
    Ok(ConnectedModule { entries })
}
