//! Simulation core for the galaxy backdrop
//!
//! Everything here is renderer-agnostic and deterministic for a given seed:
//!
//! - [`DeviceProfile`] - Capability class resolved once per mount
//! - [`SceneConfig`] - Counts, divisors and visual constants per device class
//! - [`ParticleBuffer`] - Fixed-length packed xyz storage
//! - [`ParticleSystem`] - Star field, star shower, galactic dust, floating orbs
//! - [`GalaxyCore`], [`NebulaCloud`] - Slowly turning translucent shells
//! - [`FrameGate`], [`FrameCounter`] - Per-frame gating and update divisors
//! - [`GalaxyScene`] - Owns all of the above and dispatches gated ticks

mod device;
mod error;
mod gate;
mod objects;
mod scene;
pub mod config;
pub mod particles;

pub use device::{DeviceProfile, DeviceTier, TierThresholds, Viewport};
pub use error::ConfigValidationError;
pub use gate::{FrameCounter, FrameGate, FrameTime, GateDecision, SystemMask, TickReport};
pub use objects::{GalaxyCore, NebulaCloud};
pub use scene::GalaxyScene;
pub use config::SceneConfig;
pub use particles::{ParticleBuffer, ParticleSystem, SystemKind};

// Re-export math types used in public signatures
pub use backdrop_math::{Euler, Mat4, Vec3};
