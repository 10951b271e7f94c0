//! Ordered collection of the shapes in a room.
//!
//! Insertion order is drawing order: later shapes lie on top and are hit-tested first. Shapes
//! are addressed by a [`ShapeId`] that is never reused, so a removed shape cannot be reached
//! through a stale id.

use std::fmt;

use super::{Position, Shape, ShapeVisitor};

#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct ShapeId(u64);

impl fmt::Display for ShapeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ShapeGroup {
    shapes: Vec<(ShapeId, Shape)>,
    next_id: u64,
}

impl ShapeGroup {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    pub fn get(&self, id: ShapeId) -> Option<&Shape> {
        self.shapes
            .iter()
            .find(|(shape_id, _)| *shape_id == id)
            .map(|(_, shape)| shape)
    }

    pub fn iter(&self) -> impl Iterator<Item = (ShapeId, &Shape)> {
        self.shapes.iter().map(|(id, shape)| (*id, shape))
    }

    pub fn shapes(&self) -> impl Iterator<Item = &Shape> {
        self.shapes.iter().map(|(_, shape)| shape)
    }

    /// All shapes except the one with `id`.
    pub fn others(&self, id: ShapeId) -> impl Iterator<Item = &Shape> {
        self.shapes
            .iter()
            .filter(move |(shape_id, _)| *shape_id != id)
            .map(|(_, shape)| shape)
    }

    /// Topmost shape containing `point`.
    pub fn topmost_at(&self, point: Position) -> Option<ShapeId> {
        self.shapes
            .iter()
            .rev()
            .find(|(_, shape)| shape.contains(point))
            .map(|(id, _)| *id)
    }

    pub fn accept(&self, visitor: &mut dyn ShapeVisitor) {
        for shape in self.shapes() {
            shape.accept(visitor);
        }
    }

    pub(super) fn push(&mut self, shape: Shape) -> ShapeId {
        let id = ShapeId(self.next_id);
        self.next_id += 1;
        self.shapes.push((id, shape));
        id
    }

    /// Swaps in a validated replacement, keeping the shape's place in the drawing order.
    pub(super) fn replace(&mut self, id: ShapeId, shape: Shape) -> Option<Shape> {
        self.shapes
            .iter_mut()
            .find(|(shape_id, _)| *shape_id == id)
            .map(|(_, current)| std::mem::replace(current, shape))
    }

    pub(super) fn remove(&mut self, id: ShapeId) -> Option<Shape> {
        let idx = self.shapes.iter().position(|(shape_id, _)| *shape_id == id)?;
        Some(self.shapes.remove(idx).1)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::tests::{circle, rectangle};

    #[test]
    fn test_ids_are_not_reused() {
        let mut group = ShapeGroup::new();
        let first = group.push(rectangle(0.0, 0.0, 1.0, 1.0));
        assert_eq!(group.remove(first), Some(rectangle(0.0, 0.0, 1.0, 1.0)));
        let second = group.push(rectangle(0.0, 0.0, 1.0, 1.0));

        assert!(first != second);
        assert_eq!(group.get(first), None);
        assert_eq!(group.remove(first), None);
        assert_eq!(group.len(), 1);
    }

    #[test]
    fn test_topmost_at() {
        let mut group = ShapeGroup::new();
        let bottom = group.push(rectangle(0.0, 0.0, 10.0, 10.0));
        let top = group.push(circle(0.0, 0.0, 5.0));

        assert_eq!(group.topmost_at(Position::new(5.0, 5.0)), Some(top));
        assert_eq!(group.topmost_at(Position::new(9.5, 9.5)), Some(bottom));
        assert_eq!(group.topmost_at(Position::new(20.0, 20.0)), None);
    }

    #[test]
    fn test_others_and_replace_keep_order() {
        let mut group = ShapeGroup::new();
        let a = group.push(rectangle(0.0, 0.0, 1.0, 1.0));
        let b = group.push(rectangle(2.0, 0.0, 1.0, 1.0));
        let c = group.push(rectangle(4.0, 0.0, 1.0, 1.0));

        let others = group.others(b).map(|s| s.position().x()).collect::<Vec<_>>();
        assert_eq!(others, vec![0.0, 4.0]);

        group.replace(b, rectangle(2.0, 5.0, 1.0, 1.0));
        let ids = group.iter().map(|(id, _)| id).collect::<Vec<_>>();
        assert_eq!(ids, vec![a, b, c]);
        assert_eq!(group.get(b).map(|s| s.position().y()), Some(5.0));
    }
}
