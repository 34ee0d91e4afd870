//! Time discretization transforms.
//!
//! Rescale or coarsen every commodity time and arc transit time of an
//! instance onto an integer grid, which controls the size of time-expanded
//! formulations. Each transform visits every arc and commodity exactly once.
//!
//! - [`scale`]: multiply by a factor and round up
//! - [`pessimistic_round`]: windows only shrink, travel never gets faster
//! - [`optimistic_round`]: windows only widen, travel never gets slower
//! - [`simple_round`]: nearest-integer rounding everywhere

mod policy;
mod transform;

pub use policy::RoundingPolicy;
pub use transform::{optimistic_round, pessimistic_round, round, scale, simple_round};
