// Headless warping grid run: random impacts, per-second frame statistics.
use bevy::prelude::*;
use rand::Rng;
use warpgrid::{
    DrawMode, GridConfig, GridSimulation, LatestFrame, SegmentKind, WarpGridPlugin,
    advance_grid_physics, tessellate_grid,
};

const SAMPLE_PERIOD: u32 = 60;
const RUN_TICKS: u32 = 600;

fn random_impacts(
    mut simulation: ResMut<GridSimulation>,
    config: Res<GridConfig>,
    mut tick: Local<u32>,
) {
    *tick += 1;
    if *tick % 45 != 0 {
        return;
    }

    let mut rand = rand::rng();
    let bounds = config.bounds;
    let position = Vec3::new(
        rand.random_range(bounds.min.x..=bounds.max.x),
        rand.random_range(bounds.min.y..=bounds.max.y),
        0.0,
    );
    if rand.random_bool(0.5) {
        simulation.apply_explosive_force(40.0, position, 60.0);
    } else {
        simulation.apply_implosive_force(2.0, position, 60.0);
    }

    if *tick % 180 == 0 {
        let mode = simulation.draw_mode().toggled();
        simulation.set_draw_mode(mode);
    }
}

fn frame_tracker(
    simulation: Res<GridSimulation>,
    latest: Res<LatestFrame>,
    mut frame_count: Local<u32>,
) {
    *frame_count += 1;

    if *frame_count % SAMPLE_PERIOD == 0 {
        let frame = &latest.frame;
        println!(
            "[tick {:04}] mode={:?} segments={} (edges {}, fillers {}, dropped {}) energy={:.5}",
            latest.index,
            simulation.draw_mode(),
            frame.len(),
            frame.count_of_kind(SegmentKind::Edge),
            frame.count_of_kind(SegmentKind::Filler),
            frame.dropped,
            simulation.kinetic_energy(),
        );
    }

    if *frame_count > RUN_TICKS {
        std::process::exit(0);
    }
}

fn main() {
    let config = GridConfig::default().with_draw_mode(DrawMode::Smooth);
    let (columns, rows) = config.dimensions();
    println!("Headless warping grid: {columns}x{rows} lattice");

    App::new()
        .add_plugins(MinimalPlugins)
        .add_plugins(WarpGridPlugin::new(config))
        .add_systems(
            FixedUpdate,
            (
                random_impacts.before(advance_grid_physics),
                frame_tracker.after(tessellate_grid),
            ),
        )
        .run();
}
