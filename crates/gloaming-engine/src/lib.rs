//! Gloaming engine crate.
//!
//! Window, GPU and input runtime plus an instanced quad renderer. Knows
//! nothing about the narrative; the studio feeds it draw lists.

pub mod core;
pub mod device;
pub mod input;
pub mod time;
pub mod window;

pub mod coords;
pub mod logging;
pub mod paint;
pub mod render;
pub mod scene;
