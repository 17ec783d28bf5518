use alloc::collections::BTreeSet;
use alloc::vec;

use crate::algo::{AugmentingPath, PathFinder};
use crate::capacity::Capacity;
use crate::error::Error;
use crate::id::NodeId;
use crate::residual::ResidualGraph;

/// Depth-first augmenting path search.
///
/// Outgoing residual edges are explored in residual graph order and the first path that reaches
/// the sink is returned. This is neither the shortest nor the widest path. The traversal keeps an
/// explicit stack instead of recursing, so deep graphs do not exhaust the call stack, while the
/// visiting order stays that of the recursive formulation.
#[derive(Clone, Copy, Debug, Default)]
pub struct DepthFirst;

impl<N, C> PathFinder<N, C> for DepthFirst
where
    N: NodeId,
    C: Capacity,
{
    fn find_path(
        &mut self,
        residual: &ResidualGraph<N, C>,
        source: N,
        sink: N,
    ) -> Result<Option<AugmentingPath<N, C>>, Error> {
        if source == sink {
            return Err(Error::DegenerateEndpoints);
        }

        let mut visited = BTreeSet::new();
        visited.insert(source);
        let mut path = vec![source];
        // one successor iterator per node on `path`
        let mut frontier = vec![residual.successors(source)];

        while let Some(successors) = frontier.last_mut() {
            let next = successors
                .find(|&(v, capacity)| capacity > C::zero() && !visited.contains(&v))
                .map(|(v, _)| v);

            match next {
                Some(v) => {
                    visited.insert(v);
                    path.push(v);
                    if v == sink {
                        return AugmentingPath::new(residual, path).map(Some);
                    }
                    frontier.push(residual.successors(v));
                }
                None => {
                    frontier.pop();
                    path.pop();
                }
            }
        }

        Ok(None)
    }
}

/// Convenience wrapper around [`DepthFirst`].
pub fn find_path<N, C>(
    residual: &ResidualGraph<N, C>,
    source: N,
    sink: N,
) -> Result<Option<AugmentingPath<N, C>>, Error>
where
    N: NodeId,
    C: Capacity,
{
    DepthFirst.find_path(residual, source, sink)
}

#[cfg(test)]
mod tests {
    use alloc::vec;
    use alloc::vec::Vec;

    use super::*;
    use crate::flow::Flow;
    use crate::graph::FlowNetwork;
    use crate::residual::build_residual;

    fn residual_of(triples: Vec<(i32, i32, i32)>) -> ResidualGraph<i32, i32> {
        let g = FlowNetwork::from_triples(triples).unwrap();
        build_residual(&g, &Flow::zeroed(&g)).unwrap()
    }

    #[test]
    fn first_found_path_and_bottleneck() {
        let r = residual_of(vec![
            (0, 1, 10),
            (0, 2, 8),
            (1, 2, 2),
            (1, 3, 5),
            (2, 3, 10),
            (2, 4, 5),
            (3, 4, 7),
        ]);
        let path = find_path(&r, 0, 3).unwrap().unwrap();
        assert_eq!(path.nodes(), &[0, 1, 2, 3]);
        assert_eq!(path.bottleneck(), 2);
        assert_eq!(path.steps().collect::<Vec<_>>(), vec![(0, 1), (1, 2), (2, 3)]);
    }

    #[test]
    fn not_the_shortest_path() {
        let r = residual_of(vec![(0, 1, 4), (1, 2, 3), (2, 3, 9), (0, 3, 1)]);
        let path = find_path(&r, 0, 3).unwrap().unwrap();
        assert_eq!(path.nodes(), &[0, 1, 2, 3]);
        assert_eq!(path.bottleneck(), 3);
    }

    #[test]
    fn edge_order_decides_the_branch() {
        let r = residual_of(vec![(0, 3, 1), (0, 1, 4), (1, 2, 3), (2, 3, 9)]);
        let path = find_path(&r, 0, 3).unwrap().unwrap();
        assert_eq!(path.nodes(), &[0, 3]);
        assert_eq!(path.bottleneck(), 1);
    }

    #[test]
    fn backtracks_out_of_dead_ends() {
        let r = residual_of(vec![(0, 1, 5), (1, 4, 5), (4, 1, 5), (0, 2, 6), (2, 3, 2)]);
        let path = find_path(&r, 0, 3).unwrap().unwrap();
        assert_eq!(path.nodes(), &[0, 2, 3]);
        assert_eq!(path.bottleneck(), 2);
    }

    #[test]
    fn paths_are_simple_on_cycles() {
        let r = residual_of(vec![(0, 1, 3), (1, 2, 3), (2, 0, 3), (2, 1, 1), (2, 3, 1)]);
        let path = find_path(&r, 0, 3).unwrap().unwrap();
        assert_eq!(path.nodes(), &[0, 1, 2, 3]);
        let unique: BTreeSet<_> = path.nodes().iter().collect();
        assert_eq!(unique.len(), path.nodes().len());
    }

    #[test]
    fn unreachable_sink() {
        let r = residual_of(vec![(0, 1, 3), (2, 3, 3)]);
        assert_eq!(find_path(&r, 0, 3).unwrap(), None);
        // source that is not in the graph has no successors
        assert_eq!(find_path(&r, 7, 3).unwrap(), None);
    }

    #[test]
    fn same_source_and_sink() {
        let r = residual_of(vec![(0, 1, 3)]);
        assert_eq!(find_path(&r, 1, 1).unwrap_err(), Error::DegenerateEndpoints);
    }

    #[test]
    fn bottleneck_of_unknown_step() {
        let r = residual_of(vec![(0, 1, 3), (1, 2, 1)]);
        assert!(matches!(
            AugmentingPath::new(&r, vec![0, 2]),
            Err(Error::MalformedPath(_))
        ));
        assert!(matches!(
            AugmentingPath::new(&r, vec![0]),
            Err(Error::MalformedPath(_))
        ));
        assert_eq!(AugmentingPath::new(&r, vec![0, 1, 2]).unwrap().bottleneck(), 1);
    }
}
