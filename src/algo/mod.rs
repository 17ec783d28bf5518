use alloc::format;
use alloc::vec::Vec;

use itertools::Itertools;

use crate::capacity::Capacity;
use crate::error::Error;
use crate::id::NodeId;
use crate::residual::ResidualGraph;

pub mod dfs;

/// A simple source-to-sink path through a residual graph, with the flow it can carry.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AugmentingPath<N, C> {
    nodes: Vec<N>,
    bottleneck: C,
}

impl<N, C> AugmentingPath<N, C>
where
    N: NodeId,
    C: Capacity,
{
    /// Wraps `nodes` as a path of `residual`, computing its bottleneck.
    ///
    /// Fails with [`Error::MalformedPath`] if the path has fewer than two nodes or a step has no
    /// residual edge.
    pub fn new(residual: &ResidualGraph<N, C>, nodes: Vec<N>) -> Result<Self, Error> {
        let bottleneck = bottleneck(residual, &nodes)?;
        Ok(Self { nodes, bottleneck })
    }

    pub fn nodes(&self) -> &[N] {
        &self.nodes
    }

    pub fn bottleneck(&self) -> C {
        self.bottleneck
    }

    /// Consecutive `(u, v)` pairs along the path.
    pub fn steps(&self) -> impl Iterator<Item = (N, N)> + '_ {
        self.nodes.iter().copied().tuple_windows()
    }

    pub fn into_nodes(self) -> Vec<N> {
        self.nodes
    }
}

/// The minimum residual capacity over consecutive pairs of `nodes`.
pub fn bottleneck<N, C>(residual: &ResidualGraph<N, C>, nodes: &[N]) -> Result<C, Error>
where
    N: NodeId,
    C: Capacity,
{
    let capacities = nodes
        .iter()
        .copied()
        .tuple_windows()
        .map(|(u, v)| {
            residual
                .capacity(u, v)
                .ok_or_else(|| Error::MalformedPath(format!("no residual edge {u:?} -> {v:?}")))
        })
        .collect::<Result<Vec<_>, _>>()?;

    capacities
        .into_iter()
        .min()
        .ok_or_else(|| Error::MalformedPath(format!("{nodes:?} has no edges")))
}

/// Strategy for finding an augmenting path in a residual graph.
pub trait PathFinder<N: NodeId, C> {
    /// Returns `None` once the sink is unreachable from the source, which ends the solve.
    fn find_path(
        &mut self,
        residual: &ResidualGraph<N, C>,
        source: N,
        sink: N,
    ) -> Result<Option<AugmentingPath<N, C>>, Error>;
}
