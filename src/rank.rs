//! Ranking utilities.

use std::cmp::Reverse;
use std::io::Write;

use ordered_float::NotNan;

use crate::graph::Network;
use crate::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Ranked {
    pub node: usize,
    pub probability: f64,
}

/// Every node of a network, ordered by visiting probability descending.
#[derive(Debug, Clone, PartialEq)]
pub struct RankedList {
    entries: Vec<Ranked>,
    // node index -> 0-based position in `entries`
    positions: Vec<usize>,
}

impl RankedList {
    pub fn entries(&self) -> &[Ranked] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// 1-based rank of `node`.
    pub fn rank_of(&self, node: usize) -> usize {
        self.positions[node] + 1
    }

    pub fn probability_of(&self, node: usize) -> f64 {
        self.entries[self.positions[node]].probability
    }

    /// Entries in rank order, skipping `excluded` nodes. `excluded` must be sorted.
    pub fn without<'a>(&'a self, excluded: &'a [usize]) -> impl Iterator<Item = &'a Ranked> + 'a {
        self.entries
            .iter()
            .filter(move |r| excluded.binary_search(&r.node).is_err())
    }

    /// Write the whole ranking as `rank\tnode\tprobability` rows.
    pub fn write_tsv<W: Write>(&self, network: &Network, mut out: W) -> Result<()> {
        writeln!(out, "rank\tnode\tprobability")?;
        for (i, r) in self.entries.iter().enumerate() {
            writeln!(out, "{}\t{}\t{}", i + 1, network.name(r.node), r.probability)?;
        }
        out.flush()?;
        Ok(())
    }
}

/// Rank all nodes by `scores` descending.
///
/// Exact ties are broken by ascending node identifier, which coincides with ascending node
/// index. Non-finite scores are rejected.
pub fn rank_scores(network: &Network, scores: &[f64]) -> Result<RankedList> {
    let n = network.node_count();
    if scores.len() != n {
        return Err(Error::InvalidParameter(format!(
            "score length must equal node_count (len={} node_count={})",
            scores.len(),
            n
        )));
    }

    let mut keyed = Vec::with_capacity(n);
    for (i, &score) in scores.iter().enumerate() {
        if !score.is_finite() {
            return Err(Error::Numerical(format!(
                "visiting probability of {} is not finite",
                network.name(i)
            )));
        }
        let s = NotNan::new(score)
            .map_err(|_| Error::Numerical("visiting probability is NaN".to_string()))?;
        keyed.push((Reverse(s), i));
    }
    keyed.sort_unstable();

    let entries: Vec<Ranked> = keyed
        .into_iter()
        .map(|(Reverse(s), node)| Ranked {
            node,
            probability: s.into_inner(),
        })
        .collect();
    let mut positions = vec![0usize; n];
    for (pos, r) in entries.iter().enumerate() {
        positions[r.node] = pos;
    }
    Ok(RankedList { entries, positions })
}
