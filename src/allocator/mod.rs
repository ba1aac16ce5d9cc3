//! Task allocation.
//!
//! Two passes over an analyzed task graph: sprint allocation packs
//! tasks into fixed-capacity iterations under precedence constraints,
//! then team allocation maps the packed tasks onto roster members.

mod sprint;
mod team;

pub use sprint::SprintAllocator;
pub use team::{TeamAllocator, OVERALLOCATION_THRESHOLD, UNASSIGNED_ROLE};
