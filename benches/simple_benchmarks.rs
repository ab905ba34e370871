/// Simple custom benchmarking without criterion
use std::time::Instant;
use bevy::prelude::*;
use warpgrid::{DrawMode, GridConfig, GridSimulation, LatticeBuilder};

fn time_it<F: FnMut()>(name: &str, iterations: usize, mut f: F) {
    // Warmup
    for _ in 0..5 {
        f();
    }

    let start = Instant::now();
    for _ in 0..iterations {
        f();
    }
    let elapsed = start.elapsed();

    let avg_ms = elapsed.as_secs_f64() * 1000.0 / iterations as f64;
    println!("{}: {:.3}ms avg ({} iterations)", name, avg_ms, iterations);
}

fn config_for(side: usize, draw_mode: DrawMode) -> GridConfig {
    let extent = (side - 1) as f32 * 10.0;
    GridConfig::new(Rect::new(0.0, 0.0, extent, extent), Vec2::splat(10.0))
        .with_draw_mode(draw_mode)
        .with_max_segments(side * side * 8)
}

fn disturbed(config: &GridConfig) -> Option<GridSimulation> {
    let mut simulation = match GridSimulation::new(config) {
        Ok(simulation) => simulation,
        Err(err) => {
            println!("skipping: {err}");
            return None;
        }
    };
    let center = config.bounds.center().extend(0.0);
    simulation.apply_explosive_force(400.0, center, config.bounds.width() / 3.0);
    for _ in 0..10 {
        simulation.advance();
    }
    Some(simulation)
}

fn main() {
    println!("\n=== Warping Grid Benchmarks ===\n");

    println!("--- Lattice Construction ---");
    for &side in &[32, 64, 128] {
        let config = config_for(side, DrawMode::Quick);
        time_it(&format!("build (n={}x{})", side, side), 20, || {
            let _ = LatticeBuilder::from_config(&config).build();
        });
    }

    println!("\n--- Physics Step ---");
    for &side in &[32, 64, 128] {
        let Some(mut simulation) = disturbed(&config_for(side, DrawMode::Quick)) else {
            continue;
        };
        time_it(&format!("advance (n={}x{})", side, side), 100, || {
            simulation.advance();
        });
    }

    println!("\n--- Tessellation ---");
    for &side in &[32, 64, 128] {
        for draw_mode in [DrawMode::Quick, DrawMode::Smooth] {
            let Some(mut simulation) = disturbed(&config_for(side, draw_mode)) else {
                continue;
            };
            time_it(
                &format!("tessellate {:?} (n={}x{})", draw_mode, side, side),
                50,
                || {
                    let _ = simulation.tessellate();
                },
            );
        }
    }

    println!("\n--- Combined Step ---");
    for &side in &[32, 64] {
        let Some(mut simulation) = disturbed(&config_for(side, DrawMode::Smooth)) else {
            continue;
        };
        time_it(&format!("step (n={}x{})", side, side), 50, || {
            let _ = simulation.step();
        });
    }

    println!("\n=== Benchmark Complete ===\n");
}
