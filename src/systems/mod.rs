//! Application systems
//!
//! The pieces `main.rs` wires into the winit event loop.

mod render;
mod simulation;
mod window;

pub use render::{FrameAction, RenderError, RenderSystem};
pub use simulation::{FrameOutcome, SimulationSystem};
pub use window::{WindowError, WindowSystem};
