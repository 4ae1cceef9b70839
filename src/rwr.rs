//! Random walk with restart: closed-form propagation from a seed set.

use nalgebra::DMatrix;

use crate::graph::Network;
use crate::module::{connected_module, ConnectedModule};
use crate::operator::{transition_operator, SymmetryMode};
use crate::rank::{rank_scores, RankedList};
use crate::seeds::{seed_vector, SeedVector};
use crate::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RwrConfig {
    /// Damping factor `r`, in `(0, 1)`.
    pub restart: f64,
    /// Teleportation `a`, in `(0, 1]`. Only used by [`SymmetryMode::ColumnNormalized`].
    pub teleport: f64,
    pub mode: SymmetryMode,
    /// Scale seeds by `sqrt(degree)` and outputs by `sqrt(1/degree)`.
    pub degree_scaling: bool,
}

impl Default for RwrConfig {
    fn default() -> Self {
        Self {
            restart: 0.8,
            teleport: 1.0,
            mode: SymmetryMode::ColumnNormalized,
            degree_scaling: false,
        }
    }
}

impl RwrConfig {
    pub fn validate(&self) -> Result<()> {
        if !self.restart.is_finite() || self.restart <= 0.0 || self.restart >= 1.0 {
            return Err(Error::InvalidParameter(
                "restart must be in (0,1)".to_string(),
            ));
        }
        if !self.teleport.is_finite() || self.teleport <= 0.0 || self.teleport > 1.0 {
            return Err(Error::InvalidParameter(
                "teleport must be in (0,1]".to_string(),
            ));
        }
        Ok(())
    }

    /// File name encoding scaling, symmetry mode and `r`,
    /// e.g. `connected_module_rwr_no_scaling_columnwise_0.8.txt`.
    pub fn output_file_name(&self) -> String {
        let scaling = if self.degree_scaling {
            "scaling"
        } else {
            "no_scaling"
        };
        format!(
            "connected_module_rwr_{}_{}_{}.txt",
            scaling,
            self.mode.label(),
            self.restart
        )
    }
}

/// Outcome of one propagation run.
#[derive(Debug, Clone, PartialEq)]
pub struct RwrRun {
    pub ranking: RankedList,
    pub module: ConnectedModule,
    /// Number of seeds present in the network.
    pub seeds_on_graph: usize,
    /// Seeds absent from the network.
    pub seeds_dropped: Vec<String>,
}

/// Apply `w` to the seed vector and normalize per seed.
///
/// `pInf = W p0`, then (with degree scaling) `pInf[i] *= sqrt(1/degree(i))`, then every entry
/// is divided by the number of seeds on the graph.
pub fn propagate(
    network: &Network,
    w: &DMatrix<f64>,
    seeds: &SeedVector,
    config: &RwrConfig,
) -> Result<Vec<f64>> {
    let n = network.node_count();
    if w.nrows() != n || w.ncols() != n || seeds.p0.len() != n {
        return Err(Error::InvalidParameter(format!(
            "operator is {}x{} and seed vector has length {}, network has {} nodes",
            w.nrows(),
            w.ncols(),
            seeds.p0.len(),
            n
        )));
    }
    if seeds.count() == 0 {
        return Err(Error::InvalidInput("no seeds found in network".to_string()));
    }

    let mut p_inf = w * &seeds.p0;
    if config.degree_scaling {
        for (i, p) in p_inf.iter_mut().enumerate() {
            let k = network.degree(i);
            if k == 0 {
                return Err(Error::Numerical(format!(
                    "node {} has degree 0; degree scaling is undefined",
                    network.name(i)
                )));
            }
            *p *= (1.0 / k as f64).sqrt();
        }
    }
    let per_seed = seeds.count() as f64;
    Ok(p_inf.iter().map(|p| p / per_seed).collect())
}

/// A built restart operator, reusable across seed sets on the same network.
#[derive(Debug, Clone)]
pub struct RwrOperator {
    config: RwrConfig,
    w: DMatrix<f64>,
}

impl RwrOperator {
    pub fn build(network: &Network, config: RwrConfig) -> Result<Self> {
        let w = transition_operator(network, &config)?;
        Ok(Self { config, w })
    }

    pub fn config(&self) -> &RwrConfig {
        &self.config
    }

    pub fn matrix(&self) -> &DMatrix<f64> {
        &self.w
    }

    /// Propagate `seeds`, rank every node and expand the seeds into a connected module.
    pub fn run<I, S>(&self, network: &Network, seeds: I) -> Result<RwrRun>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let sv = seed_vector(network, seeds, self.config.degree_scaling)?;
        self.run_resolved(network, sv)
    }

    fn run_resolved(&self, network: &Network, sv: SeedVector) -> Result<RwrRun> {
        let scores = propagate(network, &self.w, &sv, &self.config)?;
        let ranking = rank_scores(network, &scores)?;
        let module = connected_module(network, &sv.on_graph, &ranking)?;
        tracing::info!(
            seeds = sv.count(),
            dropped = sv.dropped.len(),
            module_size = module.len(),
            added = module.len() - sv.count(),
            "connected module found"
        );
        Ok(RwrRun {
            ranking,
            module,
            seeds_on_graph: sv.count(),
            seeds_dropped: sv.dropped,
        })
    }
}

/// One-shot random walk with restart.
///
/// Seeds are resolved before any matrix work, so a seed set with no members on the network
/// fails fast with [`Error::InvalidInput`].
pub fn rwr<I, S>(network: &Network, seeds: I, config: &RwrConfig) -> Result<RwrRun>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    config.validate()?;
    let sv = seed_vector(network, seeds, config.degree_scaling)?;
    let op = RwrOperator::build(network, *config)?;
    op.run_resolved(network, sv)
}
