//! # Rendering Module
//!
//! 2D drawing of the live level state using macroquad.

pub mod display;

pub use display::*;
