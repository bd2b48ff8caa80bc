//! Cell set algebra, boundary amalgamation, hole resolution and validation.

pub mod amalgamate;
pub mod cellset;
pub mod hierarchy;
pub mod validation;

pub use amalgamate::{Edge, EdgeToggleSet, amalgamate, boundary_edges, link_rings};
pub use cellset::{contains, difference, intersect, symmetric_difference, union};
pub use hierarchy::resolve_holes;
