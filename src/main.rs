use bevy::diagnostic::{DiagnosticsStore, FrameTimeDiagnosticsPlugin};
use bevy::prelude::*;
use rand::Rng;
use warpgrid::{
    DepthPerspective, GridConfig, GridSimulation, LatestFrame, LineSegment, SegmentRenderer,
    WarpGridPlugin,
};

const GRID_SIZE: Vec2 = Vec2::new(1200.0, 680.0);
const GRID_SPACING: Vec2 = Vec2::new(20.0, 20.0);
// Stroke widths are configured in world units; gizmos draw in pixels.
const PIXELS_PER_LINE_WIDTH: f32 = 100.0;

/// Magnitudes and radii for the mouse and keyboard triggered forces.
#[derive(Resource, Clone, Copy)]
struct DemoForces {
    explosive: f32,
    explosive_radius: f32,
    implosive: f32,
    implosive_radius: f32,
    directional: f32,
    directional_radius: f32,
    depth: f32,
    depth_radius: f32,
}

impl Default for DemoForces {
    fn default() -> Self {
        Self {
            explosive: 40.0,
            explosive_radius: 120.0,
            implosive: 2.0,
            implosive_radius: 120.0,
            directional: 6.0,
            directional_radius: 400.0,
            depth: 40.0,
            depth_radius: 80.0,
        }
    }
}

/// Gizmo group for the thick lattice lines; thin lines use the default group.
#[derive(Default, Reflect, GizmoConfigGroup)]
struct ThickLines;

/// Draws segments as gizmo lines, routing each to the group matching its stroke.
struct GizmoRenderer<'a, 'w, 's, 'tw, 'ts> {
    thin: &'a mut Gizmos<'w, 's>,
    thick: &'a mut Gizmos<'tw, 'ts, ThickLines>,
    thick_from: f32,
    capacity: usize,
}

impl SegmentRenderer for GizmoRenderer<'_, '_, '_, '_, '_> {
    fn capacity(&self) -> usize {
        self.capacity
    }

    fn draw(&mut self, segment: &LineSegment) {
        if segment.thickness >= self.thick_from {
            self.thick.line_2d(segment.start, segment.end, segment.color);
        } else {
            self.thin.line_2d(segment.start, segment.end, segment.color);
        }
    }
}

fn configure_line_widths(config: Option<Res<GridConfig>>, mut store: ResMut<GizmoConfigStore>) {
    let Some(config) = config else {
        return;
    };

    let (thin, _) = store.config_mut::<DefaultGizmoConfigGroup>();
    thin.line.width = config.min_line_width * PIXELS_PER_LINE_WIDTH;
    let (thick, _) = store.config_mut::<ThickLines>();
    thick.line.width = config.max_line_width * PIXELS_PER_LINE_WIDTH;
}

fn init(mut commands: Commands, simulation: Option<ResMut<GridSimulation>>) {
    commands.spawn(Camera2d);

    if let Some(mut simulation) = simulation {
        simulation.set_projection(DepthPerspective::new(Vec2::ZERO));
    }
}

fn cursor_world_position(
    windows: &Query<&Window>,
    camera_query: &Query<(&Camera, &GlobalTransform)>,
) -> Option<Vec2> {
    let window = windows.single().ok()?;
    let cursor_pos = window.cursor_position()?;
    let (camera, camera_transform) = camera_query.single().ok()?;
    camera.viewport_to_world_2d(camera_transform, cursor_pos).ok()
}

fn apply_input_forces(
    simulation: Option<ResMut<GridSimulation>>,
    forces: Res<DemoForces>,
    windows: Query<&Window>,
    camera_query: Query<(&Camera, &GlobalTransform)>,
    mouse: Res<ButtonInput<MouseButton>>,
    input: Res<ButtonInput<KeyCode>>,
) {
    let Some(mut simulation) = simulation else {
        return;
    };

    if let Some(cursor) = cursor_world_position(&windows, &camera_query) {
        let position = cursor.extend(0.0);
        if mouse.just_released(MouseButton::Left) {
            simulation.apply_explosive_force(forces.explosive, position, forces.explosive_radius);
        } else if mouse.just_released(MouseButton::Right) {
            simulation.apply_implosive_force(forces.implosive, position, forces.implosive_radius);
        }

        if input.just_pressed(KeyCode::Space) {
            simulation.apply_directed_force(
                Vec3::new(0.0, 0.0, forces.depth),
                position,
                forces.depth_radius,
            );
        }
    }

    let direction = if input.just_released(KeyCode::ArrowLeft) {
        Vec2::NEG_X
    } else if input.just_released(KeyCode::ArrowDown) {
        Vec2::NEG_Y
    } else if input.just_released(KeyCode::ArrowRight) {
        Vec2::X
    } else if input.just_released(KeyCode::ArrowUp) {
        Vec2::Y
    } else {
        Vec2::ZERO
    };
    if direction != Vec2::ZERO {
        simulation.apply_directed_force(
            (direction * forces.directional).extend(0.0),
            Vec3::ZERO,
            forces.directional_radius,
        );
    }

    if input.just_pressed(KeyCode::KeyR) {
        let mut rand = rand::rng();
        let half = GRID_SIZE / 2.0;
        let position = Vec3::new(
            rand.random_range(-half.x..=half.x),
            rand.random_range(-half.y..=half.y),
            0.0,
        );
        simulation.apply_explosive_force(forces.explosive, position, forces.explosive_radius);
    }

    if input.just_pressed(KeyCode::Tab) {
        let mode = simulation.draw_mode().toggled();
        info!("draw mode: {mode:?}");
        simulation.set_draw_mode(mode);
    }
}

fn draw_grid(
    latest: Res<LatestFrame>,
    simulation: Option<Res<GridSimulation>>,
    mut thin: Gizmos,
    mut thick: Gizmos<ThickLines>,
) {
    let Some(simulation) = simulation else {
        return;
    };

    let mut renderer = GizmoRenderer {
        thin: &mut thin,
        thick: &mut thick,
        thick_from: simulation.tessellator().max_line_width,
        capacity: simulation.max_segments(),
    };
    if let Err(err) = latest.frame.render_into(&mut renderer) {
        warn!("frame {} not drawn: {err}", latest.index);
    }
}

#[derive(Component)]
struct DiagnosticsText;

fn setup_diagnostics(mut commands: Commands) {
    commands.spawn((
        Text::default(),
        TextFont {
            font_size: 18.0,
            ..default()
        },
        TextColor(Color::WHITE),
        Node {
            position_type: PositionType::Absolute,
            top: Val::Px(10.0),
            left: Val::Px(10.0),
            ..default()
        },
        DiagnosticsText,
    ));
}

fn update_diagnostics(
    diagnostics: Res<DiagnosticsStore>,
    latest: Res<LatestFrame>,
    simulation: Option<Res<GridSimulation>>,
    mut query: Query<&mut Text, With<DiagnosticsText>>,
) {
    let Some(simulation) = simulation else {
        return;
    };

    for mut text in &mut query {
        let fps = diagnostics
            .get(&FrameTimeDiagnosticsPlugin::FPS)
            .and_then(|fps| fps.smoothed())
            .unwrap_or(0.0);

        text.0 = format!(
            "FPS: {:.1}\nTick: {}\nMode: {:?}\nSegments: {} / {} (dropped {})\nEnergy: {:.4}",
            fps,
            latest.index,
            simulation.draw_mode(),
            latest.frame.len(),
            simulation.max_segments(),
            latest.frame.dropped,
            simulation.kinetic_energy(),
        );
    }
}

fn main() {
    let config = GridConfig::new(Rect::from_center_size(Vec2::ZERO, GRID_SIZE), GRID_SPACING)
        .with_max_segments(12_000);

    App::new()
        .add_plugins(DefaultPlugins)
        .add_plugins(FrameTimeDiagnosticsPlugin::default())
        .add_plugins(WarpGridPlugin::new(config))
        .init_gizmo_group::<ThickLines>()
        .insert_resource(DemoForces::default())
        .add_systems(Startup, (init, configure_line_widths, setup_diagnostics))
        .add_systems(Update, (apply_input_forces, draw_grid, update_diagnostics))
        .run();
}
