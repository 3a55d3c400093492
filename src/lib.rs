//! Galaxy Backdrop
//!
//! An ambient animated galaxy drawn behind an application window.

pub mod config;
pub mod systems;
