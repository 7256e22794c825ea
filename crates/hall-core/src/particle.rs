use crate::math::hash11;
use glam::Vec3;

/// SoA storage for the electron batch.
///
/// A particle's identity is its index; the batch is created whole by
/// `Simulation::initialize` and recycled whole. Wrap-around re-seats an
/// existing particle rather than allocating a new one.
pub struct ParticleSet {
    pub count: usize,
    pub position: Vec<Vec3>,
    pub velocity: Vec<Vec3>,
    /// Per-particle phase seed in [0,1) offsetting the cosmetic pulsation.
    pub pulse_seed: Vec<f32>,
    /// Instance scale published to the renderer each step.
    pub scale: Vec<f32>,
    /// Emissive intensity published to the renderer each step.
    pub emissive: Vec<f32>,
}

impl ParticleSet {
    pub fn new(count: usize) -> Self {
        Self {
            count,
            position: vec![Vec3::ZERO; count],
            velocity: vec![Vec3::ZERO; count],
            pulse_seed: (0..count).map(|i| hash11(i as f32 + 0.5)).collect(),
            scale: vec![1.0; count],
            emissive: vec![0.0; count],
        }
    }
}
