use alloc::sync::Arc;
use alloc::vec::Vec;

use serde::{Deserialize, Serialize};

use crate::flow::Flow;
use crate::id::NodeId;
use crate::residual::ResidualGraph;

/// Which point of an iteration a [`Stage`] was recorded at.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StageKind {
    /// Fresh residual graph, no path chosen yet.
    Search,
    /// Same residual graph with the augmenting path highlighted.
    PathFound,
    /// Flow after pushing the bottleneck along the path.
    Augmented,
}

/// An immutable snapshot of the solve: residual graph, highlighted path, flow.
///
/// The stages of one iteration share the residual graph built at its start. In particular an
/// [`StageKind::Augmented`] stage shows the updated flow next to the residual graph from before
/// the update; residuals are only recomputed by the next search.
#[derive(Clone, Debug, PartialEq)]
pub struct Stage<N: NodeId, C> {
    kind: StageKind,
    iteration: usize,
    residual: Arc<ResidualGraph<N, C>>,
    path: Vec<N>,
    flow: Flow<N, C>,
}

impl<N, C> Stage<N, C>
where
    N: NodeId,
{
    pub(crate) fn new(
        kind: StageKind,
        iteration: usize,
        residual: Arc<ResidualGraph<N, C>>,
        path: Vec<N>,
        flow: Flow<N, C>,
    ) -> Self {
        Self {
            kind,
            iteration,
            residual,
            path,
            flow,
        }
    }

    pub fn kind(&self) -> StageKind {
        self.kind
    }

    /// 1-based index of the search this stage belongs to.
    pub fn iteration(&self) -> usize {
        self.iteration
    }

    pub fn residual(&self) -> &ResidualGraph<N, C> {
        &self.residual
    }

    /// Whether both stages hold the very same residual graph object.
    pub fn shares_residual(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.residual, &other.residual)
    }

    /// The highlighted path, empty for [`StageKind::Search`] stages.
    pub fn path(&self) -> &[N] {
        &self.path
    }

    pub fn flow(&self) -> &Flow<N, C> {
        &self.flow
    }
}

/// Result of a solve: the recorded history, the final flow and its value.
#[derive(Clone, Debug, PartialEq)]
pub struct Solution<N: NodeId, C> {
    stages: Vec<Stage<N, C>>,
    flow: Flow<N, C>,
    value: C,
}

impl<N, C> Solution<N, C>
where
    N: NodeId,
    C: Copy,
{
    pub(crate) fn new(stages: Vec<Stage<N, C>>, flow: Flow<N, C>, value: C) -> Self {
        Self {
            stages,
            flow,
            value,
        }
    }

    pub fn stages(&self) -> &[Stage<N, C>] {
        &self.stages
    }

    pub fn flow(&self) -> &Flow<N, C> {
        &self.flow
    }

    /// The max-flow value, net flow leaving the source.
    pub fn value(&self) -> C {
        self.value
    }

    /// Number of augmenting paths that were applied.
    pub fn augmentations(&self) -> usize {
        self.stages
            .iter()
            .filter(|s| s.kind == StageKind::Augmented)
            .count()
    }

    pub fn into_parts(self) -> (Vec<Stage<N, C>>, Flow<N, C>, C) {
        (self.stages, self.flow, self.value)
    }
}
