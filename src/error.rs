use alloc::string::String;

use displaydoc::Display;

#[derive(Clone, Debug, PartialEq, Eq, Display)]
pub enum Error {
    /// Flow assignment does not match the graph: {0}
    InconsistentFlowState(String),
    /// Invalid endpoints, source and sink are the same node
    DegenerateEndpoints,
    /// Augmenting path step has no matching base edge: {0}
    MalformedPath(String),
    /// Invalid edge capacity, expected non-negative value: {0}
    InvalidCapacity(String),
    /// Edge already present in the graph: {0}
    DuplicateEdge(String),
    /// Node is not part of the graph: {0}
    UnknownNode(String),
    /// Capacity or flow total does not fit in the capacity type
    CapacityOverflow,
    /// Flow exceeds the capacity bound: {0}
    CapacityBoundViolated(String),
    /// Flow is not conserved: {0}
    ConservationViolated(String),
    /// Solve interrupted before an augmenting path search
    Interrupted,
}
