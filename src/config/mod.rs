//! Configuration and parameters
//!
//! Constants and grid settings.

pub mod constants;
pub mod grid_config;

pub use constants::*;
pub use grid_config::*;
