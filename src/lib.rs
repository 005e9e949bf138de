//! A grid of on/off lamps drawn to an SDL window, repainting only the lamps
//! that changed since the last frame.

pub mod atlas;
pub mod changes;
pub mod config;
pub mod demo;
pub mod geometry;
pub mod grid;
pub mod renderer;
pub mod screenshot;
pub mod window;
