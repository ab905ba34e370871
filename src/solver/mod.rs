// src/solver/mod.rs
pub mod forces;
pub mod integrate;

// Re-export from the solver module
pub use forces::*;
pub use integrate::*;
