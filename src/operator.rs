//! Restart transition operators.
//!
//! Both schemes produce \(W = r\,(I - (1-r)\,M)^{-1}\) for a normalized adjacency \(M\):
//! - [`SymmetryMode::ColumnNormalized`]: \(M = \mathrm{colnorm}(aA + \tfrac{1-a}{n}J)\), a
//!   column-stochastic matrix with uniform teleportation mass \(1-a\).
//! - [`SymmetryMode::Symmetric`]: \(M_s = D^{-1/2} A D^{-1/2} = I - L_{norm}\).
//!
//! Matrices are dense and indexed by node index.

use nalgebra::DMatrix;

use crate::graph::GraphRef;
use crate::rwr::RwrConfig;
use crate::{Error, Result};

/// Normalization scheme of the walk matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SymmetryMode {
    #[default]
    ColumnNormalized,
    Symmetric,
}

impl SymmetryMode {
    /// Label used in output file names.
    pub fn label(self) -> &'static str {
        match self {
            SymmetryMode::ColumnNormalized => "columnwise",
            SymmetryMode::Symmetric => "symmetrical",
        }
    }
}

fn adjacency_matrix<G: GraphRef>(graph: &G) -> DMatrix<f64> {
    let n = graph.node_count();
    let mut a = DMatrix::<f64>::zeros(n, n);
    for u in 0..n {
        for &v in graph.neighbors_ref(u) {
            a[(u, v)] = 1.0;
        }
    }
    a
}

/// Column-stochastic walk matrix with teleportation `a`.
///
/// Every column of the result sums to 1. A column with zero L1 norm (a degree-0 node when
/// `a == 1`) is rejected rather than divided by.
pub fn column_normalized_matrix<G: GraphRef>(graph: &G, teleport: f64) -> Result<DMatrix<f64>> {
    let n = graph.node_count();
    if n == 0 {
        return Err(Error::InvalidInput("network has no nodes".to_string()));
    }
    let uniform = (1.0 - teleport) / n as f64;
    let mut m = adjacency_matrix(graph) * teleport;
    m.add_scalar_mut(uniform);

    for (j, mut col) in m.column_iter_mut().enumerate() {
        let norm: f64 = col.iter().map(|x| x.abs()).sum();
        if norm <= 0.0 || !norm.is_finite() {
            return Err(Error::Numerical(format!(
                "column {j} of the walk matrix has zero norm (node has degree 0)"
            )));
        }
        col /= norm;
    }
    Ok(m)
}

/// Symmetric normalized adjacency \(D^{-1/2} A D^{-1/2}\).
pub fn symmetric_matrix<G: GraphRef>(graph: &G) -> Result<DMatrix<f64>> {
    let n = graph.node_count();
    if n == 0 {
        return Err(Error::InvalidInput("network has no nodes".to_string()));
    }
    let mut inv_sqrt = Vec::with_capacity(n);
    for u in 0..n {
        let k = graph.degree(u);
        if k == 0 {
            return Err(Error::Numerical(format!(
                "node {u} has degree 0; symmetric normalization is undefined"
            )));
        }
        inv_sqrt.push(1.0 / (k as f64).sqrt());
    }

    let mut m = DMatrix::<f64>::zeros(n, n);
    for u in 0..n {
        for &v in graph.neighbors_ref(u) {
            m[(u, v)] = inv_sqrt[u] * inv_sqrt[v];
        }
    }
    Ok(m)
}

/// \(r\,(I - (1-r)\,M)^{-1}\) for an already-normalized walk matrix.
pub fn restart_operator(walk: DMatrix<f64>, restart: f64) -> Result<DMatrix<f64>> {
    let n = walk.nrows();
    let h = DMatrix::<f64>::identity(n, n) - walk * (1.0 - restart);
    let inv = h.try_inverse().ok_or_else(|| {
        Error::Numerical("restart matrix I - (1-r)M is singular".to_string())
    })?;
    if inv.iter().any(|x| !x.is_finite()) {
        return Err(Error::Numerical(
            "restart matrix inverse is not finite".to_string(),
        ));
    }
    Ok(inv * restart)
}

/// Build the full restart operator `W` for `config`.
pub fn transition_operator<G: GraphRef>(graph: &G, config: &RwrConfig) -> Result<DMatrix<f64>> {
    config.validate()?;
    tracing::debug!(
        nodes = graph.node_count(),
        mode = config.mode.label(),
        restart = config.restart,
        teleport = config.teleport,
        "building restart operator"
    );
    let walk = match config.mode {
        SymmetryMode::ColumnNormalized => column_normalized_matrix(graph, config.teleport)?,
        SymmetryMode::Symmetric => symmetric_matrix(graph)?,
    };
    restart_operator(walk, config.restart)
}
