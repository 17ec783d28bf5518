use alloc::collections::BTreeMap;
use alloc::format;

use crate::capacity::Capacity;
use crate::error::Error;
use crate::graph::{FlowNetwork, NodePair};
use crate::id::NodeId;

/// A flow assignment: one value per base edge.
///
/// Entries are keyed by the ordered pair of the base edge and iterate in key order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Flow<N, C> {
    values: BTreeMap<NodePair<N>, C>,
}

impl<N, C> Flow<N, C>
where
    N: NodeId,
    C: Capacity,
{
    pub fn new() -> Self {
        Self {
            values: BTreeMap::new(),
        }
    }

    /// A flow carrying zero on every edge of `graph`.
    pub fn zeroed(graph: &FlowNetwork<N, C>) -> Self {
        graph.edges().map(|(u, v, _)| ((u, v), C::zero())).collect()
    }

    pub fn get(&self, source: N, target: N) -> Option<C> {
        self.values.get(&(source, target)).copied()
    }

    pub fn insert(&mut self, source: N, target: N, value: C) -> Option<C> {
        self.values.insert((source, target), value)
    }

    pub fn remove(&mut self, source: N, target: N) -> Option<C> {
        self.values.remove(&(source, target))
    }

    pub fn contains(&self, source: N, target: N) -> bool {
        self.values.contains_key(&(source, target))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (N, N, C)> + '_ {
        self.values.iter().map(|(&(u, v), &f)| (u, v, f))
    }

    /// Total flow leaving `node`, or [`Error::CapacityOverflow`] if it does not fit in `C`.
    pub fn outflow(&self, node: N) -> Result<C, Error> {
        checked_sum(self.iter().filter(|(u, _, _)| *u == node).map(|(_, _, f)| f))
    }

    /// Total flow entering `node`, or [`Error::CapacityOverflow`] if it does not fit in `C`.
    pub fn inflow(&self, node: N) -> Result<C, Error> {
        checked_sum(self.iter().filter(|(_, v, _)| *v == node).map(|(_, _, f)| f))
    }

    /// Net flow leaving `source`.
    ///
    /// Augmenting paths never re-enter the source, so for a flow produced by the solver the inflow
    /// is zero. An inflow larger than the outflow is reported as [`Error::ConservationViolated`].
    pub fn value(&self, source: N) -> Result<C, Error> {
        let (outflow, inflow) = (self.outflow(source)?, self.inflow(source)?);
        if inflow > outflow {
            return Err(Error::ConservationViolated(format!(
                "{source:?} receives {inflow} but only sends {outflow}"
            )));
        }
        Ok(outflow - inflow)
    }
}

pub(crate) fn checked_sum<C, I>(values: I) -> Result<C, Error>
where
    C: Capacity,
    I: IntoIterator<Item = C>,
{
    values
        .into_iter()
        .try_fold(C::zero(), |acc, c| acc.checked_add(&c))
        .ok_or(Error::CapacityOverflow)
}

impl<N, C> Default for Flow<N, C>
where
    N: NodeId,
    C: Capacity,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<N, C> FromIterator<(NodePair<N>, C)> for Flow<N, C>
where
    N: NodeId,
{
    fn from_iter<I: IntoIterator<Item = (NodePair<N>, C)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec;
    use alloc::vec::Vec;

    use super::*;

    #[test]
    fn zeroed_covers_every_edge() {
        let g = FlowNetwork::from_triples(vec![(0, 1, 10), (0, 2, 8), (1, 2, 2)]).unwrap();
        let flow = Flow::zeroed(&g);
        assert_eq!(flow.len(), 3);
        assert!(flow.iter().all(|(_, _, f)| f == 0));
        assert_eq!(flow.get(1, 2), Some(0));
        assert_eq!(flow.get(2, 1), None);
    }

    #[test]
    fn iterates_in_key_order() {
        let flow: Flow<i32, i32> = vec![((2, 3), 1), ((0, 1), 4), ((0, 2), 3)]
            .into_iter()
            .collect();
        assert_eq!(
            flow.iter().collect::<Vec<_>>(),
            vec![(0, 1, 4), (0, 2, 3), (2, 3, 1)]
        );
    }

    #[test]
    fn net_value_and_node_balance() {
        let flow: Flow<i32, i32> = vec![((0, 1), 7), ((0, 2), 8), ((1, 2), 2), ((1, 3), 5)]
            .into_iter()
            .collect();
        assert_eq!(flow.value(0), Ok(15));
        assert_eq!(flow.inflow(1), Ok(7));
        assert_eq!(flow.outflow(1), Ok(7));
        assert_eq!(flow.inflow(2), Ok(10));
        assert_eq!(flow.outflow(3), Ok(0));
    }

    #[test]
    fn totals_that_do_not_fit_overflow() {
        let flow: Flow<u32, u32> = vec![((0, 1), u32::MAX), ((0, 2), 1), ((1, 3), u32::MAX)]
            .into_iter()
            .collect();
        assert_eq!(flow.outflow(0), Err(Error::CapacityOverflow));
        assert_eq!(flow.value(0), Err(Error::CapacityOverflow));
        assert_eq!(flow.inflow(3), Ok(u32::MAX));
    }

    #[test]
    fn source_receiving_more_than_it_sends() {
        let flow: Flow<u32, u64> = vec![((0, 1), 2), ((1, 0), 5)].into_iter().collect();
        assert!(matches!(flow.value(0), Err(Error::ConservationViolated(_))));
        assert_eq!(flow.value(1), Ok(3));
    }

    #[test]
    fn insert_and_remove() {
        let mut flow = Flow::<u32, u64>::new();
        assert!(flow.is_empty());
        assert_eq!(flow.insert(1, 2, 3), None);
        assert_eq!(flow.insert(1, 2, 4), Some(3));
        assert!(flow.contains(1, 2));
        assert_eq!(flow.remove(1, 2), Some(4));
        assert!(!flow.contains(1, 2));
    }
}
