use alloc::format;

use petgraph::graphmap::DiGraphMap;
use petgraph::Direction;
use serde::{Deserialize, Serialize};

use crate::capacity::Capacity;
use crate::error::Error;
use crate::flow::checked_sum;
use crate::id::NodeId;

pub type NodePair<N> = (N, N);

/// A capacitated edge of the flow network.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Deserialize)]
#[serde(
    try_from = "RawEdge<N, C>",
    bound(deserialize = "N: NodeId + Deserialize<'de>, \
                    C: Capacity + Deserialize<'de>")
)]
pub struct Edge<N, C> {
    source: N,
    target: N,
    capacity: C,
}

impl<N, C> Edge<N, C>
where
    N: NodeId,
    C: Capacity,
{
    pub fn new(source: N, target: N, capacity: C) -> Result<Self, Error> {
        if capacity < C::zero() {
            Err(Error::InvalidCapacity(format!(
                "{source:?} -> {target:?} has capacity {capacity}"
            )))
        } else {
            Ok(Self {
                source,
                target,
                capacity,
            })
        }
    }

    pub fn source(&self) -> N {
        self.source
    }

    pub fn target(&self) -> N {
        self.target
    }

    pub fn capacity(&self) -> C {
        self.capacity
    }
}

#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Deserialize, Serialize)]
pub struct RawEdge<N, C> {
    pub source: N,
    pub target: N,
    pub capacity: C,
}

impl<N, C> TryFrom<RawEdge<N, C>> for Edge<N, C>
where
    N: NodeId,
    C: Capacity,
{
    type Error = Error;

    fn try_from(e: RawEdge<N, C>) -> Result<Self, Self::Error> {
        Self::new(e.source, e.target, e.capacity)
    }
}

impl<N, C> From<Edge<N, C>> for RawEdge<N, C> {
    fn from(e: Edge<N, C>) -> Self {
        Self {
            source: e.source,
            target: e.target,
            capacity: e.capacity,
        }
    }
}

/// The base graph of a max-flow problem: nodes and at most one capacitated edge per ordered pair.
///
/// Nodes and edges are enumerated in insertion order. The solver only ever borrows the network
/// immutably, so capacities stay fixed for the lifetime of a solve.
#[derive(Clone, Debug)]
pub struct FlowNetwork<N: NodeId, C> {
    graph: DiGraphMap<N, C>,
}

impl<N, C> FlowNetwork<N, C>
where
    N: NodeId,
    C: Capacity,
{
    pub fn new() -> Self {
        Self {
            graph: DiGraphMap::new(),
        }
    }

    pub fn from_edges<I>(edges: I) -> Result<Self, Error>
    where
        I: IntoIterator<Item = Edge<N, C>>,
    {
        edges.into_iter().try_fold(Self::new(), |mut acc, e| {
            acc.add_edge(e)?;
            Ok(acc)
        })
    }

    /// Builds a network from `(source, target, capacity)` triples.
    pub fn from_triples<I>(triples: I) -> Result<Self, Error>
    where
        I: IntoIterator<Item = (N, N, C)>,
    {
        triples.into_iter().try_fold(Self::new(), |mut acc, (u, v, c)| {
            acc.add_edge(Edge::new(u, v, c)?)?;
            Ok(acc)
        })
    }

    pub fn add_node(&mut self, node: N) {
        self.graph.add_node(node);
    }

    pub fn add_edge(&mut self, edge: Edge<N, C>) -> Result<(), Error> {
        let Edge {
            source,
            target,
            capacity,
        } = edge;
        if self.graph.contains_edge(source, target) {
            return Err(Error::DuplicateEdge(format!("{source:?} -> {target:?}")));
        }
        self.graph.add_edge(source, target, capacity);
        Ok(())
    }

    pub fn capacity(&self, source: N, target: N) -> Option<C> {
        self.graph.edge_weight(source, target).copied()
    }

    pub fn contains_node(&self, node: N) -> bool {
        self.graph.contains_node(node)
    }

    pub fn contains_edge(&self, source: N, target: N) -> bool {
        self.graph.contains_edge(source, target)
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn nodes(&self) -> impl Iterator<Item = N> + '_ {
        self.graph.nodes()
    }

    /// All edges as `(source, target, capacity)`, in insertion order.
    pub fn edges(&self) -> impl Iterator<Item = (N, N, C)> + '_ {
        self.graph.all_edges().map(|(u, v, c)| (u, v, *c))
    }

    /// Total capacity leaving `node`, an upper bound on the number of augmentations.
    pub fn out_capacity(&self, node: N) -> Result<C, Error> {
        checked_sum(
            self.graph
                .edges_directed(node, Direction::Outgoing)
                .map(|(_, _, c)| *c),
        )
    }
}

impl<N, C> Default for FlowNetwork<N, C>
where
    N: NodeId,
    C: Capacity,
{
    fn default() -> Self {
        Self::new()
    }
}
