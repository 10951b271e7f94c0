//! Interactive editing of the room.
//!
//! A left click selects the topmost shape under the pointer, and dragging moves it. Shapes are
//! added with `R`, `C` and `T`, the selection is rotated with `Q` and `E` and removed with
//! `Delete` or `Backspace`. `A` logs the area report and `P` exports the room as PNG.

use bevy::prelude::*;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::{
    config::PlannerConfig,
    domain::{Angle, Bounds, Position, Rgb, Room, Shape, ShapeError, ShapeId},
    export,
    resource::{ConfigRes, RoomRes},
    visualizer::to_room_position,
};

pub struct Controller;

impl Plugin for Controller {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, set_up)
            .add_systems(Update, (handle_pointer, handle_keyboard_input))
            .init_resource::<Selection>()
            .init_resource::<Status>();
    }
}

#[derive(Resource, Default)]
pub struct Selection {
    shape: Option<ShapeId>,
    drag_offset: Option<Position>,
}

impl Selection {
    pub fn shape(&self) -> Option<ShapeId> {
        self.shape
    }
}

/// Outcome of the last command.
#[derive(Resource)]
pub struct Status(String);

impl Status {
    pub fn message(&self) -> &str {
        &self.0
    }

    fn set(&mut self, message: impl Into<String>) {
        self.0 = message.into();
    }
}

impl Default for Status {
    fn default() -> Self {
        Self("R/C/T: add   Q/E: rotate   Del: remove   A: report   P: export".to_string())
    }
}

/// Names and colours for new shapes.
#[derive(Resource)]
struct Palette {
    rng: ChaCha8Rng,
    counter: u32,
}

impl Palette {
    fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            counter: 0,
        }
    }

    fn next_name(&mut self, kind: &str) -> String {
        self.counter += 1;
        format!("{kind} {}", self.counter)
    }

    fn next_color(&mut self) -> Rgb {
        Rgb::new(
            self.rng.random_range(40..=220),
            self.rng.random_range(40..=220),
            self.rng.random_range(40..=220),
        )
    }
}

fn set_up(mut commands: Commands, config: Res<ConfigRes>) {
    commands.insert_resource(Palette::new(config.color_seed));
}

fn handle_pointer(
    cameras: Query<(&Camera, &GlobalTransform)>,
    windows: Query<&Window>,
    buttons: Res<ButtonInput<MouseButton>>,
    mut selection: ResMut<Selection>,
    mut status: ResMut<Status>,
    mut room: ResMut<RoomRes>,
) {
    if buttons.just_released(MouseButton::Left) {
        selection.drag_offset = None;
    }

    let Some(pointer) = get_pointer_position_in_room(&cameras, &windows, room.bounds()) else {
        return;
    };

    if buttons.just_pressed(MouseButton::Left) {
        selection.shape = room.hit_test(pointer);
        match selection.shape.and_then(|id| room.get(id)) {
            Some(shape) => {
                selection.drag_offset = Some(pointer - shape.position());
                status.set(format!("Selected {}", shape.name()));
            }
            None => {
                selection.drag_offset = None;
                status.set("Nothing selected");
            }
        }
        return;
    }

    if !buttons.pressed(MouseButton::Left) {
        return;
    }
    let (Some(id), Some(offset)) = (selection.shape, selection.drag_offset) else {
        return;
    };
    let target = pointer - offset;
    if room.get(id).is_some_and(|shape| shape.position() != target) {
        drag_shape(&mut room, id, target);
    }
}

/// Moves the dragged shape to `target`. A rejected move leaves it where it is until the pointer
/// reaches a valid spot.
fn drag_shape(room: &mut Room, id: ShapeId, target: Position) -> bool {
    match room.move_shape(id, target) {
        Ok(()) => true,
        Err(err) => {
            trace!("drag of {id} to ({}, {}) rejected: {err}", target.x(), target.y());
            false
        }
    }
}

fn get_pointer_position_in_room(
    cameras: &Query<(&Camera, &GlobalTransform)>,
    windows: &Query<&Window>,
    bounds: Bounds,
) -> Option<Position> {
    let (camera, camera_transform) = cameras.get_single().ok()?;
    let cursor_position = windows.get_single().ok()?.cursor_position()?;
    let world_position = camera.viewport_to_world_2d(camera_transform, cursor_position)?;
    Some(to_room_position(world_position, bounds))
}

fn handle_keyboard_input(
    keys: Res<ButtonInput<KeyCode>>,
    config: Res<ConfigRes>,
    mut room: ResMut<RoomRes>,
    mut selection: ResMut<Selection>,
    mut status: ResMut<Status>,
    palette: Option<ResMut<Palette>>,
) {
    let Some(mut palette) = palette else {
        return;
    };

    for key in keys.get_just_pressed() {
        match key {
            KeyCode::KeyR | KeyCode::KeyC | KeyCode::KeyT => {
                let message = match new_shape(*key, &config, &mut palette) {
                    Ok(shape) => {
                        let name = shape.name().to_string();
                        match room.add_shape(shape) {
                            Ok(id) => {
                                selection.shape = Some(id);
                                format!("Added {name}")
                            }
                            Err(err) => {
                                warn!("cannot add {name}: {err}");
                                format!("Cannot add {name}: {err}")
                            }
                        }
                    }
                    Err(err) => format!("Cannot create shape: {err}"),
                };
                status.set(message);
            }
            KeyCode::KeyQ | KeyCode::KeyE => {
                let Some(id) = selection.shape else {
                    status.set("Select a shape to rotate");
                    continue;
                };
                let step = Angle::from_deg(config.rotation_step);
                let delta = if *key == KeyCode::KeyQ { -step } else { step };
                match room.rotate_shape(id, delta) {
                    Ok(()) => status.set(format!(
                        "Rotated to {:.0}°",
                        room.get(id)
                            .and_then(Shape::angle)
                            .map_or(0.0, Angle::to_deg)
                    )),
                    Err(err) => status.set(format!("Cannot rotate: {err}")),
                }
            }
            KeyCode::Delete | KeyCode::Backspace => {
                let Some(id) = selection.shape.take() else {
                    continue;
                };
                selection.drag_offset = None;
                match room.remove_shape(id) {
                    Ok(shape) => status.set(format!("Removed {}", shape.name())),
                    Err(err) => status.set(err.to_string()),
                }
            }
            KeyCode::KeyA => {
                info!("area report\n{}", room.area_report());
                status.set("Area report written to the log");
            }
            KeyCode::KeyP => {
                match export::export_png(&room, config.background, &config.export_path) {
                    Ok(()) => {
                        info!("exported room to {}", config.export_path.display());
                        status.set(format!("Exported {}", config.export_path.display()));
                    }
                    Err(err) => {
                        warn!("export failed: {err}");
                        status.set(format!("Export failed: {err}"));
                    }
                }
            }
            _ => {}
        }
    }
}

fn new_shape(
    key: KeyCode,
    config: &PlannerConfig,
    palette: &mut Palette,
) -> Result<Shape, ShapeError> {
    let color = palette.next_color();
    match key {
        KeyCode::KeyC => Shape::circle(palette.next_name("Circle"), color, config.circle_radius),
        KeyCode::KeyT => {
            let (base, height) = config.triangle_size;
            Shape::triangle(palette.next_name("Triangle"), color, base, height)
        }
        _ => {
            let (width, height) = config.rectangle_size;
            Shape::rectangle(palette.next_name("Rectangle"), color, width, height)
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::{domain::ShapeKind, tests::rectangle};

    #[test]
    fn test_palette_is_deterministic() {
        let mut a = Palette::new(7);
        let mut b = Palette::new(7);
        let colors_a = (0..5).map(|_| a.next_color()).collect::<Vec<_>>();
        let colors_b = (0..5).map(|_| b.next_color()).collect::<Vec<_>>();

        assert_eq!(colors_a, colors_b);
        assert_eq!(a.next_name("Circle"), "Circle 1");
        assert_eq!(a.next_name("Triangle"), "Triangle 2");
    }

    #[test]
    fn test_new_shape_uses_configured_dimensions() {
        let config = PlannerConfig::default();
        let mut palette = Palette::new(config.color_seed);

        let shape = new_shape(KeyCode::KeyT, &config, &mut palette).unwrap();
        assert_eq!(shape.name(), "Triangle 1");
        match shape.kind() {
            ShapeKind::Triangle(triangle) => {
                assert_eq!((triangle.base(), triangle.height()), config.triangle_size)
            }
            kind => panic!("unexpected shape {kind:?}"),
        }

        let shape = new_shape(KeyCode::KeyC, &config, &mut palette).unwrap();
        assert_eq!(shape.area(), std::f64::consts::PI * 900.0);
    }

    #[test]
    fn test_drag_shape() {
        let mut room = Room::new(Bounds::new(100.0, 100.0));
        let id = room.add_shape(rectangle(0.0, 0.0, 10.0, 10.0)).unwrap();
        room.add_shape(rectangle(0.0, 0.0, 10.0, 10.0)).unwrap();

        assert!(!drag_shape(&mut room, id, Position::new(5.0, 0.0)));
        assert_eq!(room.get(id).map(Shape::position), Some(Position::new(0.0, 0.0)));

        assert!(drag_shape(&mut room, id, Position::new(50.0, 50.0)));
        assert_eq!(room.get(id).map(Shape::position), Some(Position::new(50.0, 50.0)));
    }
}
