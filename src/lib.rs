//! Maximum flow by Ford-Fulkerson with depth-first augmenting paths, recording the residual
//! graph, the chosen path and the flow at every step so the run can be replayed or visualized.
//!
//! ```
//! use ffstages::{max_flow, FlowNetwork};
//!
//! let graph = FlowNetwork::from_triples([(0, 1, 10), (0, 2, 8), (1, 3, 5), (2, 3, 10)]).unwrap();
//! let solution = max_flow(&graph, 0, 3).unwrap();
//! assert_eq!(solution.value(), 13);
//! assert!(solution.stages().last().unwrap().path().is_empty());
//! ```
#![no_std]
#![deny(
    trivial_casts,
    trivial_numeric_casts,
    unused_import_braces,
    unused_qualifications,
    rust_2018_idioms
)]
#![forbid(unsafe_code)]

extern crate alloc;

pub mod algo;
mod augment;
mod capacity;
mod error;
mod flow;
mod graph;
mod id;
mod residual;
mod solver;
mod stage;

pub use algo::dfs::DepthFirst;
pub use algo::{AugmentingPath, PathFinder};
pub use augment::apply_flow;
pub use capacity::Capacity;
pub use error::Error;
pub use flow::Flow;
pub use graph::{Edge, FlowNetwork, NodePair, RawEdge};
pub use id::NodeId;
pub use residual::{build_residual, ResidualGraph};
pub use solver::FordFulkerson;
pub use stage::{Solution, Stage, StageKind};

/// Solves `graph` from `source` to `sink` with the depth-first [`FordFulkerson`] solver.
pub fn max_flow<N, C>(
    graph: &FlowNetwork<N, C>,
    source: N,
    sink: N,
) -> Result<Solution<N, C>, Error>
where
    N: NodeId,
    C: Capacity,
{
    FordFulkerson::new().solve(graph, source, sink)
}
