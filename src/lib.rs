//! `netprop`: random-walk-with-restart (RWR) network propagation for disease-module discovery.
//!
//! Given an interaction network and a set of seed nodes, the engine builds a restart operator
//! over the graph, propagates the seed distribution to a stationary visiting-probability vector
//! in closed form, ranks every node by that vector, and greedily grows the seeds into a
//! connected module.
//!
//! Public invariants (must not drift):
//! - **Node order**: every vector and matrix is indexed by the lexicographic order of node
//!   identifiers ([`Network`] sorts once at construction). Insertion order never leaks.
//! - **Determinism**: identical network, seeds and [`RwrConfig`] yield bit-identical
//!   [`RankedList`] and [`ConnectedModule`].
//! - **No silent fallbacks**: an empty seed intersection, a zero-degree node or a singular
//!   operator is an error, never a NaN.
//!
//! Swappable (allowed to change without breaking the contract):
//! - how connectivity is tracked during module expansion (union-find vs. recomputation)
//! - serial vs. parallel execution of independent runs ([`batch`])
//!
//! Scalability: the operator is a dense `n x n` inverse, so a run costs \(O(n^3)\) time and
//! \(O(n^2)\) memory. Practical graphs are bounded to a few thousand nodes.

pub mod batch;
pub mod graph;
pub mod io;
pub mod module;
pub mod operator;
pub mod partition;
pub mod rank;
pub mod rwr;
pub mod seeds;

pub use batch::rwr_batch;
#[cfg(feature = "parallel")]
pub use batch::rwr_batch_parallel;
pub use graph::{GraphRef, Network};
pub use io::{load_network, load_seeds, read_edge_list, read_seeds, sniff_delimiter};
pub use module::{connected_module, ConnectedModule, ModuleEntry};
pub use operator::{
    column_normalized_matrix, restart_operator, symmetric_matrix, transition_operator,
    SymmetryMode,
};
pub use partition::{connected_components, DisjointSet};
pub use rank::{rank_scores, Ranked, RankedList};
pub use rwr::{propagate, rwr, RwrConfig, RwrOperator, RwrRun};
pub use seeds::{seed_vector, SeedVector};

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Input data violates a precondition (no seeds on the graph, malformed file, ...).
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
    /// The operator could not be built or inverted.
    #[error("numerical error: {0}")]
    Numerical(String),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
