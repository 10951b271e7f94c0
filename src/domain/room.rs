//! The room and the shapes placed in it.

use thiserror::Error;
use tracing::{debug, info};

use super::{
    find_spawn_position, Angle, AreaCalculator, AreaReport, Bounds, PlacementError, Position,
    Shape, ShapeError, ShapeGroup, ShapeId, DEFAULT_SEARCH_BUDGET,
};

/// A bounded room holding non-overlapping shapes.
///
/// Every mutation goes through the placement gate. A rejected mutation returns an error and
/// leaves the room exactly as it was.
#[derive(Clone, Debug, PartialEq)]
pub struct Room {
    bounds: Bounds,
    shapes: ShapeGroup,
    search_budget: u64,
}

impl Room {
    pub fn new(bounds: Bounds) -> Self {
        Self {
            bounds,
            shapes: ShapeGroup::new(),
            search_budget: DEFAULT_SEARCH_BUDGET,
        }
    }

    pub fn with_search_budget(self, search_budget: u64) -> Self {
        Self {
            search_budget,
            ..self
        }
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    pub fn shapes(&self) -> &ShapeGroup {
        &self.shapes
    }

    pub fn get(&self, id: ShapeId) -> Option<&Shape> {
        self.shapes.get(id)
    }

    /// Places `shape` at the first free position of the room.
    pub fn add_shape(&mut self, shape: Shape) -> Result<ShapeId, RoomError> {
        let required = shape.area();
        let available = self.remaining_area();
        if self.total_area() + required > self.bounds.area() {
            debug!(required, available, name = shape.name(), "room area exceeded");
            return Err(RoomError::AreaExceeded {
                required,
                available,
            });
        }

        let position =
            find_spawn_position(&shape, &self.bounds, self.shapes.shapes(), self.search_budget)?;
        let shape = shape.moved_to(position, &self.bounds, self.shapes.shapes())?;
        let id = self.shapes.push(shape);
        info!(%id, x = position.x(), y = position.y(), "added shape");
        Ok(id)
    }

    pub fn remove_shape(&mut self, id: ShapeId) -> Result<Shape, RoomError> {
        let shape = self.shapes.remove(id).ok_or(RoomError::UnknownShape(id))?;
        info!(%id, name = shape.name(), "removed shape");
        Ok(shape)
    }

    /// Topmost shape at `point`.
    pub fn hit_test(&self, point: Position) -> Option<ShapeId> {
        self.shapes.topmost_at(point)
    }

    pub fn move_shape(&mut self, id: ShapeId, position: Position) -> Result<(), RoomError> {
        let shape = self.shape(id)?;
        let moved = shape
            .moved_to(position, &self.bounds, self.shapes.others(id))
            .inspect_err(|err| debug!(%id, %err, "move rejected"))?;
        self.shapes.replace(id, moved);
        Ok(())
    }

    /// Turns a rectangle or triangle by `delta` about its pivot, keeping its position.
    pub fn rotate_shape(&mut self, id: ShapeId, delta: Angle) -> Result<(), RoomError> {
        let shape = self.shape(id)?;
        let rotated = shape
            .rotated_by(delta)?
            .moved_to(shape.position(), &self.bounds, self.shapes.others(id))
            .inspect_err(|err| debug!(%id, %err, "rotation rejected"))?;
        self.shapes.replace(id, rotated);
        Ok(())
    }

    pub fn total_area(&self) -> f64 {
        self.area_calculator().total_area()
    }

    pub fn per_shape_areas(&self) -> Vec<(String, f64)> {
        self.area_calculator().into_details()
    }

    pub fn remaining_area(&self) -> f64 {
        self.bounds.area() - self.total_area()
    }

    pub fn area_report(&self) -> AreaReport {
        AreaReport::new(self.bounds.area(), self.area_calculator())
    }

    fn area_calculator(&self) -> AreaCalculator {
        let mut calculator = AreaCalculator::new();
        self.shapes.accept(&mut calculator);
        calculator
    }

    fn shape(&self, id: ShapeId) -> Result<&Shape, RoomError> {
        self.shapes.get(id).ok_or(RoomError::UnknownShape(id))
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum RoomError {
    #[error("shape needs {required:.2} units² but only {available:.2} units² are left")]
    AreaExceeded { required: f64, available: f64 },
    #[error("unknown shape {0}")]
    UnknownShape(ShapeId),
    #[error(transparent)]
    Shape(#[from] ShapeError),
    #[error(transparent)]
    Placement(#[from] PlacementError),
}
