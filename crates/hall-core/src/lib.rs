//! Interactive Hall-effect electron drift simulation.
//!
//! Charged carriers drift along a bar under an applied current and deflect
//! laterally under an applied magnetic field, settling into the edge charge
//! distribution that produces the Hall voltage. This crate is the compute
//! core only: it integrates particle kinematics each frame and publishes
//! transforms through the [`render::ParticleRenderer`] seam. Presentation,
//! input widgets, and scheduling belong to the host.

pub mod boundary;
pub mod config;
pub mod forces;
pub mod math;
pub mod particle;
pub mod render;
pub mod sim;
pub mod transition;

pub use config::HallConfig;
pub use render::{InstanceBuffer, ParticleRenderer};
pub use sim::Simulation;
pub use transition::SimulationMode;
