use core::fmt::{Debug, Display};
use core::ops::{Add, AddAssign, Sub, SubAssign};

use num_traits::{CheckedAdd, Zero};

/// A trait representing an edge capacity (and flow) type, which is an integer.
///
/// Integer capacities are what make the augmenting loop terminate: every augmentation pushes at
/// least one unit, and the total is bounded by the capacity leaving the source.
pub trait Capacity:
    Copy
    + Add<Output = Self>
    + Sub<Output = Self>
    + Ord
    + AddAssign
    + SubAssign
    + Zero
    + CheckedAdd
    + Debug
    + Display
    + Default
{
}

impl Capacity for i32 {}

impl Capacity for i64 {}

impl Capacity for u32 {}

impl Capacity for u64 {}

impl Capacity for usize {}
