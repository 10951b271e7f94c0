//! Area accounting through a visitor over the shapes of a room.

use std::fmt;

use super::{Circle, Rectangle, Shape, Triangle};

pub trait ShapeVisitor {
    fn visit_rectangle(&mut self, shape: &Shape, rectangle: &Rectangle);

    fn visit_circle(&mut self, shape: &Shape, circle: &Circle);

    fn visit_triangle(&mut self, shape: &Shape, triangle: &Triangle);
}

/// Sums up the area of every visited shape and keeps a per-shape breakdown in visiting order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AreaCalculator {
    total_area: f64,
    details: Vec<(String, f64)>,
}

impl AreaCalculator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn total_area(&self) -> f64 {
        self.total_area
    }

    pub fn details(&self) -> &[(String, f64)] {
        &self.details
    }

    pub fn into_details(self) -> Vec<(String, f64)> {
        self.details
    }

    fn record(&mut self, shape: &Shape, area: f64) {
        self.total_area += area;
        self.details.push((shape.name().to_string(), area));
    }
}

impl ShapeVisitor for AreaCalculator {
    fn visit_rectangle(&mut self, shape: &Shape, rectangle: &Rectangle) {
        self.record(shape, rectangle.area());
    }

    fn visit_circle(&mut self, shape: &Shape, circle: &Circle) {
        self.record(shape, circle.area());
    }

    fn visit_triangle(&mut self, shape: &Shape, triangle: &Triangle) {
        self.record(shape, triangle.area());
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct AreaReport {
    room_area: f64,
    calculator: AreaCalculator,
}

impl AreaReport {
    pub fn new(room_area: f64, calculator: AreaCalculator) -> Self {
        Self {
            room_area,
            calculator,
        }
    }

    pub fn room_area(&self) -> f64 {
        self.room_area
    }

    pub fn used_area(&self) -> f64 {
        self.calculator.total_area()
    }

    pub fn remaining_area(&self) -> f64 {
        self.room_area - self.used_area()
    }

    pub fn details(&self) -> &[(String, f64)] {
        self.calculator.details()
    }
}

impl fmt::Display for AreaReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Room area: {:.2} units²", self.room_area)?;
        writeln!(f)?;
        writeln!(f, "Shapes:")?;
        for (name, area) in self.details() {
            writeln!(f, " - {name}: {area:.2} units²")?;
        }
        writeln!(f)?;
        writeln!(f, "Used area: {:.2} units²", self.used_area())?;
        write!(f, "Remaining area: {:.2} units²", self.remaining_area())
    }
}
