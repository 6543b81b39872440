//! Overlap tests and minimum translation vectors for convex polygons.
//!
//! Two convex polygons are tested with the separating axis theorem. When they
//! overlap, [`resolve`] returns the axis of least penetration and the signed
//! distance to push the first polygon along it so that the pair no longer
//! overlaps.

#[macro_use]
pub mod compare;
mod error;
mod interval;
mod line;
mod polygon;
mod sat;
mod scene;
mod types;

pub use error::{Degeneracy, GeometryError};
pub use interval::Interval;
pub use line::Line;
pub use polygon::{axes, project, Polygon, WindingDirection};
pub use sat::{overlaps, resolve, Collision};
pub use scene::{Nudge, Scene, Step};
pub use types::{dot, magnitude, normalize, perpendicular, subtract, P2, V2};
