//! The domain module encapsulates the core business logic. It defines the `Shape` and `Room`
//! entities, along with the geometric rules deciding where shapes may be placed.
//!
//! By minimizing hard dependencies, this module ensures the business logic remains adaptable and
//! independent of specific implementation details.

mod area;
mod basis;
mod collision;
mod group;
mod placement;
mod room;
mod shape;

pub use area::{AreaCalculator, AreaReport, ShapeVisitor};
pub use basis::{
    rectangle_corners, rotate_point, triangle_pivot, triangle_vertices, Angle, Bounds, ColorError,
    Extent, Position, Rgb, BOUNDS_TOLERANCE,
};
pub use collision::{HasCollision, Outline, TRIANGLE_AREA_TOLERANCE};
pub use group::{ShapeGroup, ShapeId};
pub use placement::{check_placement, find_spawn_position, PlacementError, DEFAULT_SEARCH_BUDGET};
pub use room::{Room, RoomError};
pub use shape::{Circle, Rectangle, Shape, ShapeDetails, ShapeError, ShapeKind, Triangle};
