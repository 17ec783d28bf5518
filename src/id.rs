use core::fmt::Debug;
use core::hash::Hash;

/// A trait representing a node identifier.
///
/// Identifiers are opaque to the algorithm; they only need to be copied, compared and hashed.
pub trait NodeId: Copy + Ord + Hash + Debug {}

impl NodeId for i32 {}

impl NodeId for i64 {}

impl NodeId for u32 {}

impl NodeId for u64 {}

impl NodeId for usize {}

impl NodeId for char {}

impl NodeId for &'static str {}
