//! Basic building blocks.
//!
//! Room coordinates are y-down with the origin in the top-left corner of the room, the same
//! convention as the drawing surface. Angles are kept in degrees.

use std::{
    fmt,
    ops::{Add, Neg, Sub},
    str::FromStr,
};

use nalgebra::{Rotation2, Vector2};
use thiserror::Error;

/// Slack granted to bounds checks, so that rotations by multiples of 90° survive round-off.
pub const BOUNDS_TOLERANCE: f64 = 1e-9;

#[derive(Clone, Copy, Debug, Default, PartialEq, PartialOrd)]
pub struct Position {
    x: f64,
    y: f64,
}

impl Position {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn x(&self) -> f64 {
        self.x
    }

    pub fn y(&self) -> f64 {
        self.y
    }

    pub fn distance_squared(&self, position: Self) -> f64 {
        (self.x - position.x).powi(2) + (self.y - position.y).powi(2)
    }

    pub fn dot(&self, axis: Vector2<f64>) -> f64 {
        self.x * axis.x + self.y * axis.y
    }
}

impl From<Position> for Vector2<f64> {
    fn from(value: Position) -> Self {
        Vector2::new(value.x, value.y)
    }
}

impl From<Vector2<f64>> for Position {
    fn from(value: Vector2<f64>) -> Self {
        Self::new(value.x, value.y)
    }
}

impl From<Position> for (f32, f32) {
    fn from(value: Position) -> Self {
        (value.x as f32, value.y as f32)
    }
}

impl Add for Position {
    type Output = Position;

    fn add(self, rhs: Self) -> Self::Output {
        Self {
            x: self.x + rhs.x,
            y: self.y + rhs.y,
        }
    }
}

impl Sub for Position {
    type Output = Position;

    fn sub(self, rhs: Self) -> Self::Output {
        Self {
            x: self.x - rhs.x,
            y: self.y - rhs.y,
        }
    }
}

/// Angle in degrees, always within `[0, 360)`.
#[derive(Clone, Copy, Debug, Default, PartialEq, PartialOrd)]
pub struct Angle(f64);

impl Angle {
    pub fn from_deg(degree: f64) -> Self {
        let normalized = degree.rem_euclid(360.0);
        // rem_euclid rounds tiny negative inputs up to 360.0
        Self(if normalized >= 360.0 { 0.0 } else { normalized })
    }

    pub fn to_deg(self) -> f64 {
        self.0
    }

    pub fn to_rad(self) -> f64 {
        self.0.to_radians()
    }
}

impl Add for Angle {
    type Output = Angle;

    fn add(self, rhs: Self) -> Self::Output {
        Self::from_deg(self.0 + rhs.0)
    }
}

impl Neg for Angle {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Self::from_deg(-self.0)
    }
}

/// Rotates `point` about `center` with the matrix `[cos -sin; sin cos]`.
///
/// Rotating `(1, 0)` by 90° about the origin gives `(0, 1)`. Since room coordinates are y-down,
/// positive angles turn clockwise on screen.
pub fn rotate_point(point: Position, center: Position, angle: Angle) -> Position {
    let offset = Rotation2::new(angle.to_rad()) * Vector2::from(point - center);
    center + Position::from(offset)
}

/// Corners of a rectangle anchored at its unrotated top-left corner, in the order top-left,
/// top-right, bottom-right, bottom-left, rotated about the rectangle's center.
pub fn rectangle_corners(
    position: Position,
    width: f64,
    height: f64,
    angle: Angle,
) -> [Position; 4] {
    let (x, y) = (position.x(), position.y());
    let center = Position::new(x + width / 2.0, y + height / 2.0);
    [
        Position::new(x, y),
        Position::new(x + width, y),
        Position::new(x + width, y + height),
        Position::new(x, y + height),
    ]
    .map(|corner| rotate_point(corner, center, angle))
}

/// Rotation pivot and label anchor of an isosceles triangle anchored at the top-left of its
/// unrotated bounding box.
pub fn triangle_pivot(position: Position, base: f64, height: f64) -> Position {
    Position::new(position.x() + base / 2.0, position.y() + height * 2.0 / 3.0)
}

/// Vertices of an isosceles triangle with its apex at the top center, in the order base-left,
/// apex, base-right, rotated about [`triangle_pivot`].
pub fn triangle_vertices(
    position: Position,
    base: f64,
    height: f64,
    angle: Angle,
) -> [Position; 3] {
    let (x, y) = (position.x(), position.y());
    let pivot = triangle_pivot(position, base, height);
    [
        Position::new(x, y + height),
        Position::new(x + base / 2.0, y),
        Position::new(x + base, y + height),
    ]
    .map(|vertex| rotate_point(vertex, pivot, angle))
}

/// Axis-aligned footprint of a shape.
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd)]
pub struct Extent {
    min: Position,
    max: Position,
}

impl Extent {
    pub fn new(min: Position, max: Position) -> Self {
        Self { min, max }
    }

    pub fn from_points(points: &[Position]) -> Self {
        let min = points.iter().fold(
            Position::new(f64::INFINITY, f64::INFINITY),
            |acc, p| Position::new(acc.x.min(p.x), acc.y.min(p.y)),
        );
        let max = points.iter().fold(
            Position::new(f64::NEG_INFINITY, f64::NEG_INFINITY),
            |acc, p| Position::new(acc.x.max(p.x), acc.y.max(p.y)),
        );
        Self { min, max }
    }

    pub fn min(&self) -> Position {
        self.min
    }

    pub fn max(&self) -> Position {
        self.max
    }

    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }
}

/// The room rectangle `[0, width] x [0, height]`.
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd)]
pub struct Bounds {
    width: f64,
    height: f64,
}

impl Bounds {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn area(&self) -> f64 {
        self.width * self.height
    }

    pub fn contains(&self, extent: &Extent) -> bool {
        extent.min.x + BOUNDS_TOLERANCE >= 0.0
            && extent.min.y + BOUNDS_TOLERANCE >= 0.0
            && extent.max.x - BOUNDS_TOLERANCE <= self.width
            && extent.max.y - BOUNDS_TOLERANCE <= self.height
    }

    /// Whether a footprint of this size fits somewhere in the room, regardless of position.
    pub fn fits(&self, extent: &Extent) -> bool {
        extent.width() - BOUNDS_TOLERANCE <= self.width
            && extent.height() - BOUNDS_TOLERANCE <= self.height
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl FromStr for Rgb {
    type Err = ColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let hex = s.strip_prefix('#').unwrap_or(s);
        if hex.len() != 6 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(ColorError::InvalidHex(s.to_string()));
        }
        let channel = |i: usize| {
            u8::from_str_radix(&hex[i..i + 2], 16)
                .map_err(|_| ColorError::InvalidHex(s.to_string()))
        };
        Ok(Rgb::new(channel(0)?, channel(2)?, channel(4)?))
    }
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ColorError {
    #[error("invalid hex colour {0:?}, expected #rrggbb")]
    InvalidHex(String),
}

#[cfg(test)]
mod tests {
    use approx::{assert_abs_diff_eq, AbsDiffEq};
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    const EPSILON: f64 = 1e-12;

    #[test]
    fn test_position() {
        let position = Position::new(1.0, 2.0);
        assert_abs_diff_eq!(position.x(), 1.0);
        assert_abs_diff_eq!(position.y(), 2.0);
        assert_abs_diff_eq!(position.distance_squared(Position::new(4.0, 6.0)), 25.0);
    }

    #[rstest]
    #[case(0.0, 0.0)]
    #[case(90.0, 90.0)]
    #[case(360.0, 0.0)]
    #[case(375.0, 15.0)]
    #[case(-15.0, 345.0)]
    #[case(-720.0, 0.0)]
    #[case(-1e-20, 0.0)]
    fn test_angle_from_deg(#[case] degree: f64, #[case] expected: f64) {
        assert_abs_diff_eq!(Angle::from_deg(degree).to_deg(), expected);
    }

    #[test]
    fn test_angle_add_wraps() {
        let angle = Angle::from_deg(350.0) + Angle::from_deg(20.0);
        assert_abs_diff_eq!(angle.to_deg(), 10.0, epsilon = EPSILON);
        assert_abs_diff_eq!((-Angle::from_deg(90.0)).to_deg(), 270.0);
    }

    #[rstest]
    #[case::quarter(Position::new(1.0, 0.0), Position::new(0.0, 0.0), 90.0, Position::new(0.0, 1.0))]
    #[case::half(Position::new(1.0, 0.0), Position::new(0.0, 0.0), 180.0, Position::new(-1.0, 0.0))]
    #[case::about_center(Position::new(2.0, 1.0), Position::new(1.0, 1.0), 270.0, Position::new(1.0, 0.0))]
    #[case::identity(Position::new(3.0, 4.0), Position::new(1.0, 1.0), 0.0, Position::new(3.0, 4.0))]
    fn test_rotate_point(
        #[case] point: Position,
        #[case] center: Position,
        #[case] degree: f64,
        #[case] expected: Position,
    ) {
        assert_abs_diff_eq!(
            rotate_point(point, center, Angle::from_deg(degree)),
            expected,
            epsilon = EPSILON
        );
    }

    #[test]
    fn test_rectangle_corners_unrotated() {
        let corners = rectangle_corners(Position::new(1.0, 2.0), 4.0, 2.0, Angle::default());
        for (corner, expected) in std::iter::zip(
            corners,
            [
                Position::new(1.0, 2.0),
                Position::new(5.0, 2.0),
                Position::new(5.0, 4.0),
                Position::new(1.0, 4.0),
            ],
        ) {
            assert_abs_diff_eq!(corner, expected, epsilon = EPSILON);
        }
    }

    #[test]
    fn test_rectangle_corners_quarter_turn() {
        // 20 x 10 around center (10, 5) becomes 10 x 20 around the same center
        let corners = rectangle_corners(Position::new(0.0, 0.0), 20.0, 10.0, Angle::from_deg(90.0));
        for (corner, expected) in std::iter::zip(
            corners,
            [
                Position::new(15.0, -5.0),
                Position::new(15.0, 15.0),
                Position::new(5.0, 15.0),
                Position::new(5.0, -5.0),
            ],
        ) {
            assert_abs_diff_eq!(corner, expected, epsilon = EPSILON);
        }
    }

    #[test]
    fn test_triangle_vertices() {
        let position = Position::new(0.0, 0.0);
        let vertices = triangle_vertices(position, 10.0, 10.0, Angle::default());
        assert_eq!(
            vertices,
            [
                Position::new(0.0, 10.0),
                Position::new(5.0, 0.0),
                Position::new(10.0, 10.0),
            ]
        );
        assert_eq!(triangle_pivot(position, 9.0, 6.0), Position::new(4.5, 4.0));
    }

    #[test]
    fn test_triangle_vertices_half_turn_keeps_pivot() {
        let position = Position::new(0.0, 0.0);
        let vertices = triangle_vertices(position, 6.0, 9.0, Angle::from_deg(180.0));
        // pivot is (3, 6): the apex (3, 0) lands on (3, 12)
        assert_abs_diff_eq!(vertices[1], Position::new(3.0, 12.0), epsilon = EPSILON);
        assert_abs_diff_eq!(vertices[0], Position::new(6.0, 3.0), epsilon = EPSILON);
    }

    #[test]
    fn test_extent_from_points() {
        let extent = Extent::from_points(&[
            Position::new(3.0, -1.0),
            Position::new(-2.0, 4.0),
            Position::new(1.0, 1.0),
        ]);
        assert_eq!(extent.min(), Position::new(-2.0, -1.0));
        assert_eq!(extent.max(), Position::new(3.0, 4.0));
        assert_abs_diff_eq!(extent.width(), 5.0);
        assert_abs_diff_eq!(extent.height(), 5.0);
    }

    #[rstest]
    #[case::inside(Position::new(0.0, 0.0), Position::new(20.0, 10.0), true)]
    #[case::round_off(Position::new(-1e-12, 0.0), Position::new(20.0, 10.0 + 1e-12), true)]
    #[case::left(Position::new(-0.5, 0.0), Position::new(5.0, 5.0), false)]
    #[case::bottom(Position::new(0.0, 0.0), Position::new(5.0, 10.5), false)]
    fn test_bounds_contains(#[case] min: Position, #[case] max: Position, #[case] expected: bool) {
        let bounds = Bounds::new(20.0, 10.0);
        assert_eq!(bounds.contains(&Extent::new(min, max)), expected);
    }

    #[test]
    fn test_bounds_fits() {
        let bounds = Bounds::new(20.0, 10.0);
        let extent = Extent::new(Position::new(100.0, 100.0), Position::new(120.0, 110.0));
        assert!(bounds.fits(&extent));
        assert!(!bounds.contains(&extent));
        assert_abs_diff_eq!(bounds.area(), 200.0);
    }

    #[rstest]
    #[case("#3b75af", Ok(Rgb::new(0x3b, 0x75, 0xaf)))]
    #[case("F0E6D6", Ok(Rgb::new(0xf0, 0xe6, 0xd6)))]
    #[case("#12345", Err(ColorError::InvalidHex("#12345".to_string())))]
    #[case("#+12345", Err(ColorError::InvalidHex("#+12345".to_string())))]
    #[case("#gg0000", Err(ColorError::InvalidHex("#gg0000".to_string())))]
    fn test_rgb_from_str(#[case] input: &str, #[case] expected: Result<Rgb, ColorError>) {
        assert_eq!(input.parse::<Rgb>(), expected);
    }

    #[test]
    fn test_rgb_display() {
        assert_eq!(Rgb::new(0x3b, 0x75, 0xaf).to_string(), "#3b75af");
    }

    impl AbsDiffEq for Position {
        type Epsilon = f64;

        fn default_epsilon() -> f64 {
            f64::EPSILON
        }

        fn abs_diff_eq(&self, other: &Self, epsilon: f64) -> bool {
            f64::abs_diff_eq(&self.x, &other.x, epsilon)
                && f64::abs_diff_eq(&self.y, &other.y, epsilon)
        }
    }
}
