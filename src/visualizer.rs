//! 2D visualization.
//!
//! The background raster is shown as a sprite; robot, sensors and beacons are drawn as gizmo
//! markers every frame. Keys: R resets the robot, T toggles the sensor text, O toggles the
//! ultrasonic overlays.

use bevy::{
    prelude::*,
    render::{
        render_asset::RenderAssetUsages,
        render_resource::{Extent3d, TextureDimension, TextureFormat},
    },
};

use line_sim::domain::{
    Angle, BeaconKind, Marker, MarkerKind, Position, Raster, RenderSink, SensorKind,
};

use crate::resource::SimulationRes;

const ROBOT_SIZE: Vec2 = Vec2::new(30.0, 20.0);
const SENSOR_SIZE: Vec2 = Vec2::new(5.0, 5.0);
const ULTRASONIC_RADIUS: f32 = 5.0;
const HIT_RADIUS: f32 = 3.0;

pub struct Visualizer {
    start: Position,
}

impl Visualizer {
    pub fn new(start: Position) -> Self {
        Self { start }
    }
}

impl Plugin for Visualizer {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, set_up)
            .add_systems(
                Update,
                (
                    handle_keyboard_input,
                    update_text,
                    draw_markers,
                    draw_overlays,
                ),
            )
            .insert_resource(Scene::new(self.start));
    }
}

#[derive(Resource)]
pub struct Scene {
    start: Position,
    show_text: bool,
    show_overlays: bool,
}

impl Scene {
    fn new(start: Position) -> Self {
        Self {
            start,
            show_text: true,
            show_overlays: false,
        }
    }
}

fn set_up(
    mut commands: Commands,
    mut images: ResMut<Assets<Image>>,
    simulation: Res<SimulationRes>,
) {
    commands.spawn(Camera2dBundle::default());
    commands.spawn(SpriteBundle {
        texture: images.add(background_image(simulation.raster())),
        ..default()
    });
    create_text(&mut commands);
}

fn background_image(raster: &dyn Raster) -> Image {
    let (width, height) = raster.dimensions();
    let mut data = Vec::with_capacity((width * height * 4) as usize);
    for y in 0..height {
        for x in 0..width {
            let [r, g, b] = raster
                .pixel(x.into(), y.into())
                .map(|color| color.0)
                .unwrap_or_default();
            data.extend_from_slice(&[r, g, b, u8::MAX]);
        }
    }

    Image::new(
        Extent3d {
            width,
            height,
            depth_or_array_layers: 1,
        },
        TextureDimension::D2,
        data,
        TextureFormat::Rgba8UnormSrgb,
        RenderAssetUsages::RENDER_WORLD,
    )
}

fn create_text(commands: &mut Commands) {
    let text_style = TextStyle {
        font_size: 18.0,
        color: Color::BLACK,
        ..default()
    };
    commands.spawn(
        TextBundle::from_sections(vec![TextSection::new("", text_style)]).with_style(Style {
            position_type: PositionType::Absolute,
            bottom: Val::Px(12.0),
            left: Val::Px(12.0),
            ..default()
        }),
    );
}

/// Render sink drawing markers with gizmos.
struct GizmoSink<'a, 'w, 's> {
    gizmos: &'a mut Gizmos<'w, 's>,
    size: (u32, u32),
}

impl RenderSink for GizmoSink<'_, '_, '_> {
    fn draw(&mut self, marker: &Marker) {
        let position = to_bevy_position(marker.position, self.size);
        match marker.kind {
            MarkerKind::Robot { heading } => {
                let rotation = to_bevy_rotation(heading);
                self.gizmos
                    .rect_2d(position, rotation, ROBOT_SIZE, Color::DARK_GRAY);
                self.gizmos.ray_2d(
                    position,
                    Vec2::from_angle(rotation) * ROBOT_SIZE.x * 0.5,
                    Color::DARK_GRAY,
                );
            }
            MarkerKind::LineSensor { on_line } => {
                let color = if on_line { Color::GREEN } else { Color::RED };
                self.gizmos.rect_2d(position, 0.0, SENSOR_SIZE, color);
            }
            MarkerKind::UltrasonicSensor { heading } => {
                let direction = Vec2::from_angle(to_bevy_rotation(heading));
                self.gizmos
                    .circle_2d(position, ULTRASONIC_RADIUS, Color::BLUE);
                self.gizmos
                    .ray_2d(position, direction * ULTRASONIC_RADIUS, Color::BLUE);
            }
            MarkerKind::HallSensor | MarkerKind::InfraredSensor => {
                self.gizmos.rect_2d(position, 0.0, SENSOR_SIZE, Color::BLACK);
            }
            MarkerKind::Beacon { kind, radius } => {
                let color = match kind {
                    BeaconKind::Magnetic => Color::GREEN,
                    BeaconKind::Infrared => Color::RED,
                };
                self.gizmos.circle_2d(position, radius as f32, color);
                self.gizmos.rect_2d(position, 0.0, SENSOR_SIZE, Color::BLACK);
            }
        }
    }
}

fn draw_markers(mut gizmos: Gizmos, simulation: Res<SimulationRes>) {
    let mut sink = GizmoSink {
        gizmos: &mut gizmos,
        size: simulation.raster().dimensions(),
    };
    simulation.render(&mut sink);
}

fn draw_overlays(mut gizmos: Gizmos, scene: Res<Scene>, simulation: Res<SimulationRes>) {
    if !scene.show_overlays {
        return;
    }

    let size = simulation.raster().dimensions();
    for sensor in simulation.sensors() {
        let Ok(scan) = sensor.debug_trace() else {
            continue;
        };
        let origin = to_bevy_position(scan.origin.into(), size);
        if let Some(last) = scan.probes.last() {
            gizmos.line_2d(origin, to_bevy_position((*last).into(), size), Color::BLUE);
        }
        if let Some(hit) = scan.hit {
            gizmos.circle_2d(to_bevy_position(hit.pixel.into(), size), HIT_RADIUS, Color::RED);
        }
    }
}

fn update_text(
    mut text: Query<&mut Text>,
    scene: Res<Scene>,
    simulation: Res<SimulationRes>,
) {
    let mut text = text.single_mut();
    if !scene.show_text {
        text.sections[0].value = String::new();
        return;
    }

    let readings = simulation
        .sensors()
        .map(|sensor| match sensor.kind() {
            SensorKind::Line => format!(
                "LINE: {}",
                if sensor.read_line().unwrap_or_default() { "on" } else { "off" }
            ),
            SensorKind::Ultrasonic => sensor
                .get_distance()
                .map_or("US: ---".to_string(), |d| format!("US: {d:3} px")),
            SensorKind::Hall | SensorKind::Infrared => sensor.get_reading().map_or(
                format!("{}: ---", sensor.kind()),
                |r| format!("{}: {r:4.2}", sensor.kind().to_string().to_uppercase()),
            ),
        })
        .collect::<Vec<_>>();

    let robot = simulation.robot();
    text.sections[0].value = format!(
        "POS: {:5.1} {:5.1}   HDG: {:3.0} deg\n{}",
        robot.position().x(),
        robot.position().y(),
        robot.heading().deg(),
        readings.join("   ")
    );
}

fn handle_keyboard_input(
    keys: Res<ButtonInput<KeyCode>>,
    mut scene: ResMut<Scene>,
    mut simulation: ResMut<SimulationRes>,
) {
    if keys.just_pressed(KeyCode::KeyR) {
        let start = scene.start;
        let robot = simulation.robot_mut();
        robot.set_position(start);
        robot.set_heading(Angle::from_deg(0.0));
    }

    if keys.just_pressed(KeyCode::KeyT) {
        scene.show_text = !scene.show_text;
    }

    if keys.just_pressed(KeyCode::KeyO) {
        scene.show_overlays = !scene.show_overlays;
    }
}

/// Raster coordinates have their origin in the top-left corner with the y-axis pointing down;
/// the camera is centred on the raster with the y-axis pointing up.
fn to_bevy_position(position: Position, (width, height): (u32, u32)) -> Vec2 {
    Vec2::new(
        (position.x() - width as f64 / 2.0) as f32,
        (height as f64 / 2.0 - position.y()) as f32,
    )
}

fn to_bevy_rotation(heading: Angle) -> f32 {
    (-heading).radians() as f32
}
