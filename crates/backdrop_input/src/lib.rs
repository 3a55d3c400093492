//! Page input for the galaxy backdrop
//!
//! The animation only ever sees four inputs: a throttled, normalized pointer
//! position, a debounced scroll-active flag, a visibility flag and the
//! viewport. This crate turns raw window events into those values and maps
//! the pointer onto a smoothed camera offset.

mod camera_controller;
mod pointer;
mod scroll;
mod visibility;

pub use camera_controller::{CameraRig, ParallaxController};
pub use pointer::{PointerState, PointerThrottle};
pub use scroll::ScrollDebouncer;
pub use visibility::VisibilityTracker;
