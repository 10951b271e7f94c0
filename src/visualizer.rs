//! 2D visualization.
//!
//! The room is centred at the world origin with the side panel to its right. Room coordinates
//! are y-down, Bevy's world is y-up. Shapes are filled meshes labelled with their names, rebuilt
//! whenever the room changes. Outlines and the selection box are drawn with gizmos on top.

use bevy::{
    prelude::*,
    sprite::{MaterialMesh2dBundle, Mesh2dHandle},
};

use crate::{
    controller::{Selection, Status},
    domain::{Bounds, HasCollision, Outline, Position, Rgb, Shape, ShapeKind},
    resource::RoomRes,
};

/// Width of the text panel right of the room.
pub const PANEL_WIDTH: f32 = 280.0;

const CIRCLE_SEGMENTS: usize = 64;
const LABEL_FONT_SIZE: f32 = 14.0;
/// Depth between consecutive shapes, later shapes on top.
const LAYER_STEP: f32 = 0.01;

#[derive(Component)]
struct ShapeVisual;

pub struct Visualizer;

impl Plugin for Visualizer {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, set_up)
            .add_systems(Update, (sync_shapes, draw_room, update_text));
    }
}

fn set_up(mut commands: Commands) {
    create_camera(&mut commands);
    create_text(&mut commands);
}

fn create_camera(commands: &mut Commands) {
    let mut camera = Camera2dBundle::default();
    camera.transform.translation.x = PANEL_WIDTH / 2.0;
    commands.spawn(camera);
}

fn create_text(commands: &mut Commands) {
    let text_style = TextStyle {
        font_size: 16.0,
        color: Color::BLACK,
        ..default()
    };
    commands.spawn(
        TextBundle::from_sections(vec![
            TextSection::new("", text_style.clone()),
            TextSection::new("", text_style.clone()),
            TextSection::new("", text_style),
        ])
        .with_style(Style {
            position_type: PositionType::Absolute,
            top: Val::Px(12.0),
            right: Val::Px(12.0),
            width: Val::Px(PANEL_WIDTH - 24.0),
            ..default()
        }),
    );
}

fn sync_shapes(
    mut commands: Commands,
    room: Res<RoomRes>,
    visuals: Query<Entity, With<ShapeVisual>>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<ColorMaterial>>,
) {
    if !room.is_changed() {
        return;
    }

    for entity in &visuals {
        commands.entity(entity).despawn();
    }
    let bounds = room.bounds();
    for (index, shape) in room.shapes().shapes().enumerate() {
        let depth = index as f32 * 2.0 * LAYER_STEP;
        create_shape(
            shape,
            bounds,
            depth,
            &mut commands,
            &mut meshes,
            &mut materials,
        );
    }
}

fn create_shape(
    shape: &Shape,
    bounds: Bounds,
    depth: f32,
    commands: &mut Commands,
    meshes: &mut ResMut<Assets<Mesh>>,
    materials: &mut ResMut<Assets<ColorMaterial>>,
) {
    let mesh = match shape.kind() {
        ShapeKind::Rectangle(rectangle) => meshes.add(Rectangle::new(
            rectangle.width() as f32,
            rectangle.height() as f32,
        )),
        ShapeKind::Circle(circle) => meshes.add(Circle::new(circle.radius() as f32)),
        ShapeKind::Triangle(_) => {
            let [a, b, c] = triangle_mesh_vertices(shape, bounds);
            meshes.add(Triangle2d::new(a, b, c))
        }
    };
    let mut transform = shape_transform(shape, bounds);
    transform.translation.z = depth;

    commands.spawn((
        MaterialMesh2dBundle {
            mesh: Mesh2dHandle(mesh),
            material: materials.add(to_bevy_color(shape.color())),
            transform,
            ..default()
        },
        ShapeVisual,
    ));
    commands.spawn((
        Text2dBundle {
            text: Text::from_section(
                shape.name(),
                TextStyle {
                    font_size: LABEL_FONT_SIZE,
                    color: Color::BLACK,
                    ..default()
                },
            )
            .with_justify(JustifyText::Center),
            transform: Transform::from_translation(
                to_world(shape.center(), bounds).extend(depth + LAYER_STEP),
            ),
            ..default()
        },
        ShapeVisual,
    ));
}

/// Places the mesh at the shape centre. Rectangles turn with the shape, while triangle meshes
/// are built from the already rotated vertices. Positive room angles turn clockwise on screen.
fn shape_transform(shape: &Shape, bounds: Bounds) -> Transform {
    let translation = to_world(shape.center(), bounds).extend(0.0);
    match shape.kind() {
        ShapeKind::Rectangle(rectangle) => Transform::from_translation(translation)
            .with_rotation(Quat::from_rotation_z(-rectangle.angle().to_rad() as f32)),
        _ => Transform::from_translation(translation),
    }
}

/// Triangle corners in world space relative to the pivot, counter-clockwise.
fn triangle_mesh_vertices(shape: &Shape, bounds: Bounds) -> [Vec2; 3] {
    let pivot = to_world(shape.center(), bounds);
    let outline = shape.outline();
    let vertices = outline.vertices();
    // Flipping y reverses the winding, so two corners swap.
    [vertices[0], vertices[2], vertices[1]].map(|v| to_world(v, bounds) - pivot)
}

fn draw_room(mut gizmos: Gizmos, room: Res<RoomRes>, selection: Res<Selection>) {
    let bounds = room.bounds();
    gizmos.rect_2d(
        Vec2::ZERO,
        0.0,
        Vec2::new(bounds.width() as f32, bounds.height() as f32),
        Color::BLACK,
    );

    for (id, shape) in room.shapes().iter() {
        let color = Color::BLACK;
        match shape.outline() {
            Outline::Circle { center, radius } => {
                gizmos
                    .circle_2d(to_world(center, bounds), radius as f32, color)
                    .segments(CIRCLE_SEGMENTS);
            }
            outline => {
                let vertices = outline.vertices();
                gizmos.linestrip_2d(
                    vertices
                        .iter()
                        .chain(vertices.first())
                        .map(|v| to_world(*v, bounds)),
                    color,
                );
            }
        }

        if selection.shape() == Some(id) {
            let extent = shape.extent();
            let center = Position::new(
                (extent.min().x() + extent.max().x()) / 2.0,
                (extent.min().y() + extent.max().y()) / 2.0,
            );
            gizmos.rect_2d(
                to_world(center, bounds),
                0.0,
                Vec2::new(extent.width() as f32, extent.height() as f32),
                Color::DARK_GRAY,
            );
        }
    }
}

fn update_text(
    mut text: Query<&mut Text>,
    room: Res<RoomRes>,
    selection: Res<Selection>,
    status: Res<Status>,
) {
    let Ok(mut text) = text.get_single_mut() else {
        return;
    };

    let bounds = room.bounds();
    text.sections[0].value = format!(
        "Room: {} x {}\nShapes: {}\nUsed area: {:.2}\nRemaining area: {:.2}\n\n",
        bounds.width(),
        bounds.height(),
        room.shapes().len(),
        room.total_area(),
        room.remaining_area(),
    );
    text.sections[1].value = selection
        .shape()
        .and_then(|id| room.get(id))
        .map_or(String::new(), |shape| format!("{}\n\n", shape.details()));
    text.sections[2].value = status.message().to_string();
}

pub fn to_world(position: Position, bounds: Bounds) -> Vec2 {
    Vec2::new(
        (position.x() - bounds.width() / 2.0) as f32,
        (bounds.height() / 2.0 - position.y()) as f32,
    )
}

pub fn to_room_position(position: Vec2, bounds: Bounds) -> Position {
    Position::new(
        position.x as f64 + bounds.width() / 2.0,
        bounds.height() / 2.0 - position.y as f64,
    )
}

pub fn to_bevy_color(color: Rgb) -> Color {
    Color::rgb_u8(color.r, color.g, color.b)
}

#[cfg(test)]
mod tests {
    use std::f32::consts::FRAC_PI_2;

    use approx::assert_abs_diff_eq;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;
    use crate::tests::{circle, rotated_rectangle, rotated_triangle};

    #[rstest]
    #[case::top_left(Position::new(0.0, 0.0), Vec2::new(-300.0, 200.0))]
    #[case::center(Position::new(300.0, 200.0), Vec2::new(0.0, 0.0))]
    #[case::bottom_right(Position::new(600.0, 400.0), Vec2::new(300.0, -200.0))]
    fn test_to_world(#[case] position: Position, #[case] expected: Vec2) {
        let bounds = Bounds::new(600.0, 400.0);
        assert_eq!(to_world(position, bounds), expected);
        assert_eq!(to_room_position(expected, bounds), position);
    }

    #[test]
    fn test_shape_transform() {
        let bounds = Bounds::new(100.0, 100.0);

        let transform = shape_transform(&rotated_rectangle(10.0, 20.0, 20.0, 10.0, 90.0), bounds);
        assert_eq!(transform.translation, Vec3::new(-30.0, 25.0, 0.0));
        assert_abs_diff_eq!(
            transform.rotation.to_euler(EulerRot::XYZ).2,
            -FRAC_PI_2,
            epsilon = 1e-6
        );

        let transform = shape_transform(&circle(0.0, 0.0, 5.0), bounds);
        assert_eq!(transform.translation, Vec3::new(-45.0, 45.0, 0.0));
        assert_eq!(transform.rotation, Quat::IDENTITY);
    }

    #[rstest]
    #[case::upright(0.0)]
    #[case::turned(135.0)]
    fn test_triangle_mesh_vertices(#[case] degree: f64) {
        let bounds = Bounds::new(100.0, 100.0);
        let shape = rotated_triangle(40.0, 40.0, 12.0, 9.0, degree);
        let [a, b, c] = triangle_mesh_vertices(&shape, bounds);

        assert!((b - a).perp_dot(c - a) > 0.0);
        assert_abs_diff_eq!((a + b + c).length(), 0.0, epsilon = 1e-3);
    }
}
