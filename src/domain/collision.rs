//! Collision detection between rectangles, triangles and circles.
//!
//! Polygons are tested against each other with the separating axis theorem. Touching counts as
//! an intersection in every test.

use nalgebra::Vector2;

use super::Position;

/// Absolute tolerance of the area-sum test used for triangle containment.
pub const TRIANGLE_AREA_TOLERANCE: f64 = 1e-6;

pub trait HasCollision {
    fn has_collision(&self, other: &dyn HasCollision) -> bool {
        self.outline().has_intersection(&other.outline())
    }

    fn outline(&self) -> Outline;
}

/// Footprint of a shape at its current position and angle.
#[derive(Clone, Debug, PartialEq)]
pub enum Outline {
    Rectangle([Position; 4]),
    Triangle([Position; 3]),
    Circle { center: Position, radius: f64 },
}

impl Outline {
    pub fn vertices(&self) -> &[Position] {
        match self {
            Outline::Rectangle(corners) => corners,
            Outline::Triangle(vertices) => vertices,
            Outline::Circle { .. } => &[],
        }
    }

    pub fn contains(&self, point: Position) -> bool {
        match self {
            Outline::Rectangle(corners) => is_on_same_side_of_all_edges(corners, point),
            Outline::Triangle(vertices) => is_inside_triangle(vertices, point),
            Outline::Circle { center, radius } => center.distance_squared(point) <= radius.powi(2),
        }
    }

    pub fn has_intersection(&self, other: &Outline) -> bool {
        match (self, other) {
            (
                Outline::Circle { center, radius },
                Outline::Circle {
                    center: other_center,
                    radius: other_radius,
                },
            ) => center.distance_squared(*other_center) <= (radius + other_radius).powi(2),
            (Outline::Circle { center, radius }, polygon)
            | (polygon, Outline::Circle { center, radius }) => {
                polygon_intersects_circle(polygon, *center, *radius)
            }
            _ => !has_separating_axis(self, other),
        }
    }

    fn axes(&self) -> Vec<Vector2<f64>> {
        let normals = edges(self.vertices()).filter_map(|(p1, p2)| edge_normal(p1, p2));
        match self {
            // Opposite edges of a rectangle are parallel
            Outline::Rectangle(_) => normals.take(2).collect(),
            _ => normals.collect(),
        }
    }
}

fn edges(vertices: &[Position]) -> impl Iterator<Item = (Position, Position)> + '_ {
    (0..vertices.len()).map(move |i| (vertices[i], vertices[(i + 1) % vertices.len()]))
}

fn edge_normal(p1: Position, p2: Position) -> Option<Vector2<f64>> {
    let edge = p2 - p1;
    let normal = Vector2::new(-edge.y(), edge.x());
    let length = normal.norm();
    (length != 0.0).then(|| normal / length)
}

fn project(vertices: &[Position], axis: Vector2<f64>) -> (f64, f64) {
    vertices
        .iter()
        .map(|p| p.dot(axis))
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(min, max), p| {
            (min.min(p), max.max(p))
        })
}

fn has_separating_axis(outline: &Outline, other: &Outline) -> bool {
    outline
        .axes()
        .into_iter()
        .chain(other.axes())
        .any(|axis| {
            let (min, max) = project(outline.vertices(), axis);
            let (other_min, other_max) = project(other.vertices(), axis);
            max < other_min || other_max < min
        })
}

fn polygon_intersects_circle(polygon: &Outline, center: Position, radius: f64) -> bool {
    let radius_squared = radius.powi(2);
    polygon.contains(center)
        || edges(polygon.vertices())
            .filter_map(|(p1, p2)| closest_point_on_segment(center, p1, p2))
            .any(|p| p.distance_squared(center) <= radius_squared)
        || polygon
            .vertices()
            .iter()
            .any(|p| p.distance_squared(center) <= radius_squared)
}

/// Clamped projection of `point` onto the segment, or `None` for a zero-length segment.
fn closest_point_on_segment(point: Position, p1: Position, p2: Position) -> Option<Position> {
    let segment = Vector2::from(p2 - p1);
    let length_squared = segment.norm_squared();
    if length_squared == 0.0 {
        return None;
    }
    let t = ((point - p1).dot(segment) / length_squared).clamp(0.0, 1.0);
    Some(p1 + Position::from(segment * t))
}

fn is_on_same_side_of_all_edges(corners: &[Position], point: Position) -> bool {
    let signs = edges(corners)
        .map(|(p1, p2)| {
            (p2.x() - p1.x()) * (point.y() - p1.y()) - (p2.y() - p1.y()) * (point.x() - p1.x())
        })
        .collect::<Vec<_>>();
    signs.iter().all(|s| *s >= 0.0) || signs.iter().all(|s| *s <= 0.0)
}

fn is_inside_triangle(vertices: &[Position; 3], point: Position) -> bool {
    let [a, b, c] = *vertices;
    let total = triangle_area(a, b, c);
    let sum = triangle_area(point, b, c) + triangle_area(a, point, c) + triangle_area(a, b, point);
    (sum - total).abs() < TRIANGLE_AREA_TOLERANCE
}

fn triangle_area(a: Position, b: Position, c: Position) -> f64 {
    (a.x() * (b.y() - c.y()) + b.x() * (c.y() - a.y()) + c.x() * (a.y() - b.y())).abs() / 2.0
}
