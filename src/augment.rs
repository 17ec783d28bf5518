use alloc::format;
use alloc::vec::Vec;
use core::cmp::min;

use itertools::Itertools;

use crate::capacity::Capacity;
use crate::error::Error;
use crate::flow::Flow;
use crate::graph::FlowNetwork;
use crate::id::NodeId;

/// Pushes `bottleneck` units along `path`.
///
/// A step `(u, v)` that follows a base edge increases its flow; a step against a base edge
/// `(v, u)` cancels flow on it. When both edges exist the forward edge is filled first and the
/// remainder is cancelled on the reverse one. Every step is validated before `flow` is written, so
/// on error the assignment is left as it was.
pub fn apply_flow<N, C>(
    graph: &FlowNetwork<N, C>,
    flow: &mut Flow<N, C>,
    path: &[N],
    bottleneck: C,
) -> Result<(), Error>
where
    N: NodeId,
    C: Capacity,
{
    let mut updates = Vec::with_capacity(2 * path.len());

    for (u, v) in path.iter().copied().tuple_windows() {
        let mut remaining = bottleneck;

        if let Some(current) = flow.get(u, v) {
            let capacity = graph.capacity(u, v).ok_or_else(|| {
                Error::InconsistentFlowState(format!(
                    "entry for {u:?} -> {v:?} which is not an edge"
                ))
            })?;
            if current < C::zero() || current > capacity {
                return Err(Error::InconsistentFlowState(format!(
                    "{u:?} -> {v:?} carries {current} of {capacity}"
                )));
            }
            let pushed = min(remaining, capacity - current);
            if pushed > C::zero() {
                updates.push((u, v, current + pushed));
                remaining -= pushed;
            }
        }

        if remaining > C::zero() {
            match flow.get(v, u) {
                Some(current) if current >= remaining => {
                    updates.push((v, u, current - remaining));
                }
                _ => {
                    return Err(Error::MalformedPath(format!(
                        "cannot move {bottleneck} along {u:?} -> {v:?}"
                    )));
                }
            }
        }
    }

    for (u, v, value) in updates {
        log::trace!("flow {u:?} -> {v:?} = {value}");
        flow.insert(u, v, value);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use alloc::vec;

    use super::*;

    fn network() -> FlowNetwork<i32, i32> {
        FlowNetwork::from_triples(vec![
            (0, 1, 10),
            (0, 2, 8),
            (1, 2, 2),
            (1, 3, 5),
            (2, 3, 10),
            (2, 4, 5),
            (3, 4, 7),
        ])
        .unwrap()
    }

    fn assert_within_capacity(g: &FlowNetwork<i32, i32>, flow: &Flow<i32, i32>) {
        for (u, v, c) in g.edges() {
            let f = flow.get(u, v).unwrap();
            assert!(0 <= f && f <= c, "{u} -> {v} carries {f} of {c}");
        }
    }

    #[test]
    fn forward_steps_increase_flow() {
        let g = network();
        let mut flow = Flow::zeroed(&g);
        apply_flow(&g, &mut flow, &[0, 1, 2, 3], 2).unwrap();
        assert_eq!(flow.get(0, 1), Some(2));
        assert_eq!(flow.get(1, 2), Some(2));
        assert_eq!(flow.get(2, 3), Some(2));
        assert_eq!(flow.get(0, 2), Some(0));
        assert_within_capacity(&g, &flow);
    }

    #[test]
    fn backward_steps_cancel_flow() {
        let g = network();
        let mut flow = Flow::zeroed(&g);
        apply_flow(&g, &mut flow, &[0, 1, 2, 3], 2).unwrap();
        // 0 -> 2 -> 1 -> 3 uses 2 -> 1 against the base edge 1 -> 2
        apply_flow(&g, &mut flow, &[0, 2, 1, 3], 2).unwrap();
        assert_eq!(flow.get(1, 2), Some(0));
        assert_eq!(flow.get(0, 2), Some(2));
        assert_eq!(flow.get(1, 3), Some(2));
        assert_eq!(flow.value(0), Ok(4));
        assert_within_capacity(&g, &flow);
    }

    #[test]
    fn step_without_base_edge_is_malformed() {
        let g = network();
        let mut flow = Flow::zeroed(&g);
        assert!(matches!(
            apply_flow(&g, &mut flow, &[0, 3], 1),
            Err(Error::MalformedPath(_))
        ));
    }

    #[test]
    fn cancelling_more_than_carried_is_malformed() {
        let g = network();
        let mut flow = Flow::zeroed(&g);
        apply_flow(&g, &mut flow, &[0, 1, 3], 1).unwrap();
        assert!(matches!(
            apply_flow(&g, &mut flow, &[3, 1, 0], 2),
            Err(Error::MalformedPath(_))
        ));
    }

    #[test]
    fn failed_update_leaves_flow_untouched() {
        let g = network();
        let mut flow = Flow::zeroed(&g);
        apply_flow(&g, &mut flow, &[0, 1, 3], 5).unwrap();
        let before = flow.clone();
        // first step is fine, second saturates 1 -> 3 and has nothing to cancel
        assert!(apply_flow(&g, &mut flow, &[0, 1, 3], 1).is_err());
        assert_eq!(flow, before);
    }

    #[test]
    fn antiparallel_pair_fills_forward_then_cancels() {
        let g = FlowNetwork::from_triples(vec![(0, 1, 4), (1, 0, 3)]).unwrap();
        let mut flow = Flow::zeroed(&g);
        flow.insert(0, 1, 1);
        flow.insert(1, 0, 2);
        // residual 0 -> 1 is 3 forward plus 2 cancelable
        apply_flow(&g, &mut flow, &[0, 1], 5).unwrap();
        assert_eq!(flow.get(0, 1), Some(4));
        assert_eq!(flow.get(1, 0), Some(0));
    }

    #[test]
    fn missing_base_entry_is_inconsistent() {
        let g = network();
        let mut flow = Flow::zeroed(&g);
        flow.insert(1, 0, 0);
        assert!(matches!(
            apply_flow(&g, &mut flow, &[1, 0], 1),
            Err(Error::InconsistentFlowState(_))
        ));
    }
}
