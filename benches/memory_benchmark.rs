use std::alloc::{GlobalAlloc, Layout, System};
use std::sync::atomic::{AtomicUsize, Ordering};

use bevy::prelude::*;
use warpgrid::{GridConfig, GridSimulation, LineSegment, PointMass, Spring};

// Memory tracking allocator
struct TrackingAllocator;

static ALLOCATED: AtomicUsize = AtomicUsize::new(0);

unsafe impl GlobalAlloc for TrackingAllocator {
    unsafe fn alloc(&self, layout: Layout) -> *mut u8 {
        let ret = unsafe { System.alloc(layout) };
        if !ret.is_null() {
            ALLOCATED.fetch_add(layout.size(), Ordering::SeqCst);
        }
        ret
    }

    unsafe fn dealloc(&self, ptr: *mut u8, layout: Layout) {
        unsafe { System.dealloc(ptr, layout) };
        ALLOCATED.fetch_sub(layout.size(), Ordering::SeqCst);
    }
}

#[global_allocator]
static GLOBAL: TrackingAllocator = TrackingAllocator;

fn get_memory_usage() -> usize {
    ALLOCATED.load(Ordering::SeqCst)
}

fn main() {
    let baseline = get_memory_usage();
    println!("Baseline memory: {} KB", baseline / 1024);

    for &side in &[32usize, 64, 128] {
        let extent = (side - 1) as f32 * 10.0;
        let config = GridConfig::new(Rect::new(0.0, 0.0, extent, extent), Vec2::splat(10.0))
            .with_max_segments(side * side * 8);

        let before = get_memory_usage();
        let mut simulation = match GridSimulation::new(&config) {
            Ok(simulation) => simulation,
            Err(err) => {
                println!("skipping {side}x{side}: {err}");
                continue;
            }
        };
        let lattice_bytes = get_memory_usage().saturating_sub(before);

        let masses = simulation.lattice().masses().len();
        let springs = simulation.lattice().springs().len();
        println!("\n--- Lattice {}x{} ---", side, side);
        println!("Masses: {} ({} KB)", masses, masses * std::mem::size_of::<PointMass>() / 1024);
        println!("Springs: {} ({} KB)", springs, springs * std::mem::size_of::<Spring>() / 1024);
        println!("Measured lattice allocation: {} KB", lattice_bytes / 1024);

        let center = config.bounds.center().extend(0.0);
        simulation.apply_explosive_force(400.0, center, extent / 3.0);

        let before_frame = get_memory_usage();
        match simulation.step() {
            Ok(frame) => {
                let frame_bytes = get_memory_usage().saturating_sub(before_frame);
                println!(
                    "Frame: {} segments, {} KB live ({} KB of segment data)",
                    frame.len(),
                    frame_bytes / 1024,
                    frame.len() * std::mem::size_of::<LineSegment>() / 1024
                );
            }
            Err(err) => println!("Frame failed: {err}"),
        }
    }
}
