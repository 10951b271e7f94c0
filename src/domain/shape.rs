//! Rectangles, circles and triangles that can be placed in a room.
//!
//! A shape is anchored at the top-left corner of its unrotated bounding box. Shapes are values:
//! moving or rotating one produces a validated candidate, and the caller decides whether to
//! commit it.

use std::{f64::consts::PI, fmt};

use thiserror::Error;

use super::{
    check_placement, rectangle_corners, triangle_pivot, triangle_vertices, Angle, Bounds, Extent,
    HasCollision, Outline, PlacementError, Position, Rgb, ShapeVisitor,
};

#[derive(Clone, Debug, PartialEq)]
pub struct Shape {
    name: String,
    color: Rgb,
    position: Position,
    kind: ShapeKind,
}

impl Shape {
    pub fn rectangle(
        name: impl Into<String>,
        color: Rgb,
        width: f64,
        height: f64,
    ) -> Result<Self, ShapeError> {
        Ok(Self::new(
            name,
            color,
            ShapeKind::Rectangle(Rectangle {
                width: dimension("width", width)?,
                height: dimension("height", height)?,
                angle: Angle::default(),
            }),
        ))
    }

    pub fn circle(name: impl Into<String>, color: Rgb, radius: f64) -> Result<Self, ShapeError> {
        Ok(Self::new(
            name,
            color,
            ShapeKind::Circle(Circle {
                radius: dimension("radius", radius)?,
            }),
        ))
    }

    pub fn triangle(
        name: impl Into<String>,
        color: Rgb,
        base: f64,
        height: f64,
    ) -> Result<Self, ShapeError> {
        Ok(Self::new(
            name,
            color,
            ShapeKind::Triangle(Triangle {
                base: dimension("base", base)?,
                height: dimension("height", height)?,
                angle: Angle::default(),
            }),
        ))
    }

    fn new(name: impl Into<String>, color: Rgb, kind: ShapeKind) -> Self {
        Self {
            name: name.into(),
            color,
            position: Position::default(),
            kind,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn color(&self) -> Rgb {
        self.color
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn kind(&self) -> &ShapeKind {
        &self.kind
    }

    /// `None` for circles, which have no orientation.
    pub fn angle(&self) -> Option<Angle> {
        match self.kind {
            ShapeKind::Rectangle(rectangle) => Some(rectangle.angle),
            ShapeKind::Triangle(triangle) => Some(triangle.angle),
            ShapeKind::Circle(_) => None,
        }
    }

    pub fn with_position(&self, position: Position) -> Self {
        Self {
            position,
            ..self.clone()
        }
    }

    pub fn with_angle(&self, angle: Angle) -> Result<Self, ShapeError> {
        let kind = match self.kind {
            ShapeKind::Rectangle(rectangle) => {
                ShapeKind::Rectangle(Rectangle { angle, ..rectangle })
            }
            ShapeKind::Triangle(triangle) => ShapeKind::Triangle(Triangle { angle, ..triangle }),
            ShapeKind::Circle(_) => return Err(ShapeError::NotRotatable(self.kind.name())),
        };
        Ok(Self {
            kind,
            ..self.clone()
        })
    }

    pub fn rotated_by(&self, delta: Angle) -> Result<Self, ShapeError> {
        let angle = self
            .angle()
            .ok_or(ShapeError::NotRotatable(self.kind.name()))?;
        self.with_angle(angle + delta)
    }

    /// Rotation pivot and label anchor.
    pub fn center(&self) -> Position {
        match self.kind {
            ShapeKind::Rectangle(rectangle) => {
                self.position + Position::new(rectangle.width / 2.0, rectangle.height / 2.0)
            }
            ShapeKind::Circle(circle) => {
                self.position + Position::new(circle.radius, circle.radius)
            }
            ShapeKind::Triangle(triangle) => {
                triangle_pivot(self.position, triangle.base, triangle.height)
            }
        }
    }

    /// Axis-aligned footprint at the current position and angle.
    pub fn extent(&self) -> Extent {
        match self.kind {
            ShapeKind::Circle(circle) => Extent::new(
                self.position,
                self.position + Position::new(2.0 * circle.radius, 2.0 * circle.radius),
            ),
            _ => Extent::from_points(self.outline().vertices()),
        }
    }

    pub fn area(&self) -> f64 {
        self.kind.area()
    }

    pub fn contains(&self, point: Position) -> bool {
        self.outline().contains(point)
    }

    pub fn intersects_with(&self, other: &Shape) -> bool {
        self.has_collision(other)
    }

    /// Candidate copy of this shape at `position`, if it passes the placement gate against
    /// `others`. The caller is responsible for leaving this shape itself out of `others`.
    pub fn moved_to<'a>(
        &self,
        position: Position,
        bounds: &Bounds,
        others: impl IntoIterator<Item = &'a Shape>,
    ) -> Result<Shape, PlacementError> {
        let candidate = self.with_position(position);
        check_placement(&candidate, bounds, others)?;
        Ok(candidate)
    }

    pub fn accept(&self, visitor: &mut dyn ShapeVisitor) {
        match &self.kind {
            ShapeKind::Rectangle(rectangle) => visitor.visit_rectangle(self, rectangle),
            ShapeKind::Circle(circle) => visitor.visit_circle(self, circle),
            ShapeKind::Triangle(triangle) => visitor.visit_triangle(self, triangle),
        }
    }

    pub fn details(&self) -> ShapeDetails<'_> {
        ShapeDetails(self)
    }
}

impl HasCollision for Shape {
    fn outline(&self) -> Outline {
        match self.kind {
            ShapeKind::Rectangle(rectangle) => Outline::Rectangle(rectangle_corners(
                self.position,
                rectangle.width,
                rectangle.height,
                rectangle.angle,
            )),
            ShapeKind::Circle(circle) => Outline::Circle {
                center: self.center(),
                radius: circle.radius,
            },
            ShapeKind::Triangle(triangle) => Outline::Triangle(triangle_vertices(
                self.position,
                triangle.base,
                triangle.height,
                triangle.angle,
            )),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ShapeKind {
    Rectangle(Rectangle),
    Circle(Circle),
    Triangle(Triangle),
}

impl ShapeKind {
    pub fn name(&self) -> &'static str {
        match self {
            ShapeKind::Rectangle(_) => "Rectangle",
            ShapeKind::Circle(_) => "Circle",
            ShapeKind::Triangle(_) => "Triangle",
        }
    }

    pub fn area(&self) -> f64 {
        match self {
            ShapeKind::Rectangle(rectangle) => rectangle.area(),
            ShapeKind::Circle(circle) => circle.area(),
            ShapeKind::Triangle(triangle) => triangle.area(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rectangle {
    width: f64,
    height: f64,
    angle: Angle,
}

impl Rectangle {
    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn angle(&self) -> Angle {
        self.angle
    }

    pub fn area(&self) -> f64 {
        self.width * self.height
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Circle {
    radius: f64,
}

impl Circle {
    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn area(&self) -> f64 {
        PI * self.radius.powi(2)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Triangle {
    base: f64,
    height: f64,
    angle: Angle,
}

impl Triangle {
    pub fn base(&self) -> f64 {
        self.base
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn angle(&self) -> Angle {
        self.angle
    }

    pub fn area(&self) -> f64 {
        self.base * self.height / 2.0
    }
}

/// Human-readable summary of a shape: name, type, dimensions, angle and area.
pub struct ShapeDetails<'a>(&'a Shape);

impl fmt::Display for ShapeDetails<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let shape = self.0;
        writeln!(f, "Name: {}", shape.name)?;
        writeln!(f, "Type: {}", shape.kind.name())?;
        match shape.kind {
            ShapeKind::Rectangle(rectangle) => {
                writeln!(f, "Width={}, Height={}", rectangle.width, rectangle.height)?
            }
            ShapeKind::Circle(circle) => writeln!(f, "Radius={}", circle.radius)?,
            ShapeKind::Triangle(triangle) => {
                writeln!(f, "Base={}, Height={}", triangle.base, triangle.height)?
            }
        }
        match shape.angle() {
            Some(angle) => writeln!(f, "Angle: {}°", angle.to_deg())?,
            None => writeln!(f, "Angle: N/A")?,
        }
        write!(f, "Area: {:.2}", shape.area())
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ShapeError {
    #[error("invalid {dimension} {value}, must be a positive number")]
    InvalidDimension { dimension: &'static str, value: f64 },
    #[error("{0} shapes cannot be rotated")]
    NotRotatable(&'static str),
}

fn dimension(dimension: &'static str, value: f64) -> Result<f64, ShapeError> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(ShapeError::InvalidDimension { dimension, value })
    }
}
