use alloc::format;
use alloc::sync::Arc;
use alloc::vec::Vec;

use crate::algo::dfs::DepthFirst;
use crate::algo::PathFinder;
use crate::augment::apply_flow;
use crate::capacity::Capacity;
use crate::error::Error;
use crate::flow::Flow;
use crate::graph::FlowNetwork;
use crate::id::NodeId;
use crate::residual::build_residual;
use crate::stage::{Solution, Stage, StageKind};

/// Ford-Fulkerson max-flow solver that records every intermediate stage.
///
/// Each search rebuilds the residual graph from the current flow, asks the path finder for an
/// augmenting path and, if there is one, pushes its bottleneck. The solver holds no state between
/// solves other than the path finder.
#[derive(Clone, Debug, Default)]
pub struct FordFulkerson<P = DepthFirst> {
    finder: P,
}

impl FordFulkerson {
    pub fn new() -> Self {
        Self::with_finder(DepthFirst)
    }
}

impl<P> FordFulkerson<P> {
    pub fn with_finder(finder: P) -> Self {
        Self { finder }
    }

    pub fn solve<N, C>(
        &mut self,
        graph: &FlowNetwork<N, C>,
        source: N,
        sink: N,
    ) -> Result<Solution<N, C>, Error>
    where
        N: NodeId,
        C: Capacity,
        P: PathFinder<N, C>,
    {
        self.solve_until(graph, source, sink, |_| true)
    }

    /// Like [`FordFulkerson::solve`], but asks `keep_going` before every search (with the 1-based
    /// iteration number) and fails with [`Error::Interrupted`] once it returns `false`.
    pub fn solve_until<N, C, F>(
        &mut self,
        graph: &FlowNetwork<N, C>,
        source: N,
        sink: N,
        mut keep_going: F,
    ) -> Result<Solution<N, C>, Error>
    where
        N: NodeId,
        C: Capacity,
        P: PathFinder<N, C>,
        F: FnMut(usize) -> bool,
    {
        if source == sink {
            return Err(Error::DegenerateEndpoints);
        }
        for node in [source, sink] {
            if !graph.contains_node(node) {
                return Err(Error::UnknownNode(format!("{node:?}")));
            }
        }

        let mut flow = Flow::zeroed(graph);
        let mut stages = Vec::new();

        for iteration in 1.. {
            if !keep_going(iteration) {
                log::debug!("interrupted before search #{iteration}");
                return Err(Error::Interrupted);
            }

            let residual = Arc::new(build_residual(graph, &flow)?);
            let found = self.finder.find_path(&residual, source, sink)?;
            stages.push(Stage::new(
                StageKind::Search,
                iteration,
                Arc::clone(&residual),
                Vec::new(),
                flow.clone(),
            ));

            let Some(path) = found else {
                log::debug!("search #{iteration}: no augmenting path");
                break;
            };
            log::debug!(
                "search #{iteration}: {:?} carries {}",
                path.nodes(),
                path.bottleneck()
            );

            stages.push(Stage::new(
                StageKind::PathFound,
                iteration,
                Arc::clone(&residual),
                path.nodes().to_vec(),
                flow.clone(),
            ));
            apply_flow(graph, &mut flow, path.nodes(), path.bottleneck())?;
            stages.push(Stage::new(
                StageKind::Augmented,
                iteration,
                residual,
                path.into_nodes(),
                flow.clone(),
            ));
        }

        let value = flow.value(source)?;

        log::info!("----------------------------------");
        log::info!("         Nodes = {}", graph.node_count());
        log::info!("         Edges = {}", graph.edge_count());
        log::info!("        Stages = {}", stages.len());
        log::info!("Max flow value = {value}");

        Ok(Solution::new(stages, flow, value))
    }

    /// Verifies a solution against `graph`: every stage keeps each edge's flow within
    /// `[0, capacity]`, the final flow is conserved at every inner node, and the reported value
    /// matches both what leaves the source and what reaches the sink.
    pub fn check<N, C>(
        &self,
        graph: &FlowNetwork<N, C>,
        source: N,
        sink: N,
        solution: &Solution<N, C>,
    ) -> Result<(), Error>
    where
        N: NodeId,
        C: Capacity,
    {
        for stage in solution.stages() {
            for (u, v, capacity) in graph.edges() {
                let f = stage.flow().get(u, v).ok_or_else(|| {
                    Error::InconsistentFlowState(format!("no entry for {u:?} -> {v:?}"))
                })?;
                if f < C::zero() || f > capacity {
                    return Err(Error::CapacityBoundViolated(format!(
                        "stage {} ({:?}): {u:?} -> {v:?} carries {f} of {capacity}",
                        stage.iteration(),
                        stage.kind()
                    )));
                }
            }
        }

        let flow = solution.flow();
        for node in graph.nodes().filter(|n| *n != source && *n != sink) {
            let (inflow, outflow) = (flow.inflow(node)?, flow.outflow(node)?);
            if inflow != outflow {
                return Err(Error::ConservationViolated(format!(
                    "{node:?} receives {inflow} and sends {outflow}"
                )));
            }
        }

        let value = solution.value();
        // compared additively so unsigned capacities cannot underflow
        let source_out = flow.inflow(source)?.checked_add(&value);
        let sink_in = flow.outflow(sink)?.checked_add(&value);
        if source_out != Some(flow.outflow(source)?) || sink_in != Some(flow.inflow(sink)?) {
            return Err(Error::ConservationViolated(format!(
                "value {value} does not match the net flow out of {source:?} and into {sink:?}"
            )));
        }

        let saturated = flow
            .iter()
            .filter(|(u, v, f)| graph.capacity(*u, *v) == Some(*f) && *f > C::zero())
            .count();

        log::debug!("          stages: {}", solution.stages().len());
        log::debug!("   augmentations: {}", solution.augmentations());
        if let Ok(out_capacity) = graph.out_capacity(source) {
            log::debug!("  source out-cap: {out_capacity}");
        }
        log::debug!(" saturated edges: {saturated}");
        log::debug!("        max flow: {value}");

        Ok(())
    }
}
