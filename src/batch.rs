//! Independent runs over many seed sets.
//!
//! Each run only reads the shared network and operator, so runs can be spread over a worker
//! pool with no coordination (e.g. repeated null-model trials with permuted seeds). The
//! operator is built once per batch; per-run failures (such as a seed set with no member on
//! the network) are reported per run and do not abort the batch.

use crate::graph::Network;
use crate::rwr::{RwrConfig, RwrOperator, RwrRun};
use crate::Result;

/// Run every seed set against one operator, serially.
pub fn rwr_batch<S: AsRef<str>>(
    network: &Network,
    seed_sets: &[Vec<S>],
    config: &RwrConfig,
) -> Result<Vec<Result<RwrRun>>> {
    let op = RwrOperator::build(network, *config)?;
    Ok(seed_sets.iter().map(|seeds| op.run(network, seeds)).collect())
}

/// Parallel [`rwr_batch`]; results are returned in input order and match the serial version.
#[cfg(feature = "parallel")]
pub fn rwr_batch_parallel<S: AsRef<str> + Sync>(
    network: &Network,
    seed_sets: &[Vec<S>],
    config: &RwrConfig,
) -> Result<Vec<Result<RwrRun>>> {
    use rayon::prelude::*;

    let op = RwrOperator::build(network, *config)?;
    Ok(seed_sets
        .par_iter()
        .map(|seeds| op.run(network, seeds))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    fn path() -> Network {
        Network::from_edges([("A", "B"), ("B", "C"), ("C", "D"), ("D", "E")])
    }

    #[test]
    fn batch_matches_individual_runs() {
        let g = path();
        let cfg = RwrConfig::default();
        let sets = vec![vec!["A", "E"], vec!["C"], vec!["ghost"]];
        let runs = rwr_batch(&g, &sets, &cfg).unwrap();
        assert_eq!(runs.len(), 3);
        assert_eq!(
            runs[0].as_ref().unwrap(),
            &crate::rwr::rwr(&g, ["A", "E"], &cfg).unwrap()
        );
        assert_eq!(runs[1].as_ref().unwrap().module.len(), 1);
        assert!(matches!(runs[2], Err(Error::InvalidInput(_))));
    }

    #[test]
    fn invalid_config_fails_whole_batch() {
        let g = path();
        let cfg = RwrConfig {
            restart: 0.0,
            ..RwrConfig::default()
        };
        assert!(rwr_batch(&g, &[vec!["A"]], &cfg).is_err());
    }

    #[cfg(feature = "parallel")]
    #[test]
    fn parallel_batch_matches_serial() {
        let g = path();
        let cfg = RwrConfig::default();
        let sets: Vec<Vec<String>> = ["A", "B", "C", "D", "E"]
            .iter()
            .map(|s| vec![s.to_string(), "A".to_string()])
            .collect();
        let serial = rwr_batch(&g, &sets, &cfg).unwrap();
        let parallel = rwr_batch_parallel(&g, &sets, &cfg).unwrap();
        for (s, p) in serial.iter().zip(parallel.iter()) {
            assert_eq!(s.as_ref().unwrap(), p.as_ref().unwrap());
        }
    }
}
