//! Seed filtering and the initial probability vector `p0`.

use std::collections::BTreeSet;

use nalgebra::DVector;

use crate::graph::Network;
use crate::{Error, Result};

/// Seeds resolved onto a network.
#[derive(Debug, Clone, PartialEq)]
pub struct SeedVector {
    /// Initial distribution, indexed by node index.
    pub p0: DVector<f64>,
    /// Indices of seeds present in the network, ascending.
    pub on_graph: Vec<usize>,
    /// Seed identifiers absent from the network, sorted and unique.
    pub dropped: Vec<String>,
}

impl SeedVector {
    /// Number of seeds present in the network; the per-seed normalizer of `pInf`.
    pub fn count(&self) -> usize {
        self.on_graph.len()
    }

    pub fn contains(&self, node: usize) -> bool {
        self.on_graph.binary_search(&node).is_ok()
    }
}

/// Resolve `seeds` onto `network` and build `p0`.
///
/// Each present seed `s` gets `sqrt(degree(s))` with `degree_scaling`, `1.0` otherwise.
/// Fails with [`Error::InvalidInput`] when no seed is present.
pub fn seed_vector<I, S>(network: &Network, seeds: I, degree_scaling: bool) -> Result<SeedVector>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut on_graph = BTreeSet::new();
    let mut dropped = BTreeSet::new();
    for seed in seeds {
        let seed = seed.as_ref();
        match network.index_of(seed) {
            Some(i) => {
                on_graph.insert(i);
            }
            None => {
                dropped.insert(seed.to_string());
            }
        }
    }

    if !dropped.is_empty() {
        tracing::warn!(
            dropped = dropped.len(),
            kept = on_graph.len(),
            "seeds not found in network were ignored"
        );
    }
    if on_graph.is_empty() {
        return Err(Error::InvalidInput("no seeds found in network".to_string()));
    }

    let mut p0 = DVector::<f64>::zeros(network.node_count());
    for &i in &on_graph {
        p0[i] = if degree_scaling {
            (network.degree(i) as f64).sqrt()
        } else {
            1.0
        };
    }

    Ok(SeedVector {
        p0,
        on_graph: on_graph.into_iter().collect(),
        dropped: dropped.into_iter().collect(),
    })
}
