//! BARRAGE application shell.
//!
//! Wires the simulation to host-side seams (assets, rendering, input,
//! display), paces it with a fixed-step frame clock, and optionally runs it
//! on a dedicated game loop thread.

pub mod assets;
pub mod game_loop;
pub mod platform;
pub mod runner;
pub mod state;

pub use barrage_core as core;
