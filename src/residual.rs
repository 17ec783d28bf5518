use alloc::format;

use petgraph::graphmap::DiGraphMap;
use petgraph::Direction;

use crate::capacity::Capacity;
use crate::error::Error;
use crate::flow::Flow;
use crate::graph::FlowNetwork;
use crate::id::NodeId;

/// Remaining forward capacity and cancelable backward capacity at one point of a solve.
///
/// Only strictly positive residual capacities are stored. Edges leaving a node are enumerated in
/// the order they were first added, which follows the base graph's edge order.
#[derive(Clone, Debug)]
pub struct ResidualGraph<N: NodeId, C> {
    graph: DiGraphMap<N, C>,
}

impl<N, C> ResidualGraph<N, C>
where
    N: NodeId,
    C: Capacity,
{
    pub fn capacity(&self, source: N, target: N) -> Option<C> {
        self.graph.edge_weight(source, target).copied()
    }

    pub fn contains_edge(&self, source: N, target: N) -> bool {
        self.graph.contains_edge(source, target)
    }

    pub fn contains_node(&self, node: N) -> bool {
        self.graph.contains_node(node)
    }

    /// Outgoing residual edges of `node` as `(target, capacity)`.
    pub fn successors(&self, node: N) -> impl Iterator<Item = (N, C)> + '_ {
        self.graph
            .edges_directed(node, Direction::Outgoing)
            .map(|(_, v, c)| (v, *c))
    }

    pub fn edges(&self) -> impl Iterator<Item = (N, N, C)> + '_ {
        self.graph.all_edges().map(|(u, v, c)| (u, v, *c))
    }

    pub fn nodes(&self) -> impl Iterator<Item = N> + '_ {
        self.graph.nodes()
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    fn add(&mut self, source: N, target: N, capacity: C) -> Result<(), Error> {
        match self.graph.edge_weight_mut(source, target) {
            // an antiparallel base edge already contributed to this pair
            Some(existing) => {
                *existing = existing
                    .checked_add(&capacity)
                    .ok_or(Error::CapacityOverflow)?;
            }
            None => {
                self.graph.add_edge(source, target, capacity);
            }
        }
        Ok(())
    }
}

impl<N, C> PartialEq for ResidualGraph<N, C>
where
    N: NodeId,
    C: PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.graph.nodes().eq(other.graph.nodes())
            && self.graph.all_edges().eq(other.graph.all_edges())
    }
}

impl<N, C> Eq for ResidualGraph<N, C>
where
    N: NodeId,
    C: Eq,
{
}

/// Derives a fresh residual graph from `graph` and the current `flow`.
///
/// For every base edge `(u, v)` with capacity `c` carrying `f`, the residual graph holds `u -> v`
/// with `c - f` when positive and `v -> u` with `f` when positive. Fails with
/// [`Error::InconsistentFlowState`] unless `flow` has exactly one entry per base edge, each within
/// `[0, c]`.
pub fn build_residual<N, C>(
    graph: &FlowNetwork<N, C>,
    flow: &Flow<N, C>,
) -> Result<ResidualGraph<N, C>, Error>
where
    N: NodeId,
    C: Capacity,
{
    if let Some((u, v, _)) = flow.iter().find(|(u, v, _)| !graph.contains_edge(*u, *v)) {
        return Err(Error::InconsistentFlowState(format!(
            "entry for {u:?} -> {v:?} which is not an edge"
        )));
    }

    let mut residual = ResidualGraph {
        graph: DiGraphMap::with_capacity(graph.node_count(), 2 * graph.edge_count()),
    };
    for node in graph.nodes() {
        residual.graph.add_node(node);
    }

    for (u, v, capacity) in graph.edges() {
        let f = flow.get(u, v).ok_or_else(|| {
            Error::InconsistentFlowState(format!("no entry for {u:?} -> {v:?}"))
        })?;
        if f < C::zero() || f > capacity {
            return Err(Error::InconsistentFlowState(format!(
                "{u:?} -> {v:?} carries {f} of {capacity}"
            )));
        }

        let forward = capacity - f;
        if forward > C::zero() {
            residual.add(u, v, forward)?;
        }
        if f > C::zero() {
            residual.add(v, u, f)?;
        }
    }

    for (u, v, c) in residual.edges() {
        log::trace!("residual {u:?} -> {v:?} = {c}");
    }

    Ok(residual)
}
