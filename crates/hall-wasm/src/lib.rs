use hall_core::{HallConfig, InstanceBuffer, Simulation};
use wasm_bindgen::prelude::*;

/// Wasm-facing wrapper around the Hall bar simulation.
///
/// The host drives `step` once per rendered frame with the two slider values
/// and reads particle transforms straight out of wasm memory through
/// `buffer_ptr` / `buffer_byte_len` (32 bytes per particle: position, scale,
/// emissive, padding - matches the WGSL instance layout).
#[wasm_bindgen]
pub struct HallWorld {
    sim: Simulation,
    buffer: InstanceBuffer,
}

#[wasm_bindgen]
impl HallWorld {
    #[wasm_bindgen(constructor)]
    pub fn new(particle_count: usize, seed: u64) -> HallWorld {
        web_sys::console::log_1(
            &format!("HallWorld created: {} particles, seed {}", particle_count, seed).into(),
        );

        let mut sim = Simulation::new(HallConfig::default(), seed);
        sim.initialize(particle_count);
        HallWorld {
            sim,
            buffer: InstanceBuffer::new(particle_count),
        }
    }

    /// Advance one frame. Returns elapsed wall time in milliseconds so the
    /// host can display compute cost.
    #[wasm_bindgen]
    pub fn step(&mut self, dt: f32, current: f32, field: f32, time: f32) -> f32 {
        let start = js_sys::Date::now();
        self.sim.step(dt, current, field, time, &mut self.buffer);
        (js_sys::Date::now() - start) as f32
    }

    #[wasm_bindgen]
    pub fn buffer_ptr(&self) -> *const f32 {
        self.buffer.as_bytes().as_ptr() as *const f32
    }

    #[wasm_bindgen]
    pub fn buffer_byte_len(&self) -> usize {
        self.buffer.as_bytes().len()
    }

    #[wasm_bindgen]
    pub fn particle_count(&self) -> usize {
        self.sim.particles().count
    }

    /// Whether the simulation is currently frozen at near-zero current.
    #[wasm_bindgen]
    pub fn is_frozen(&self) -> bool {
        self.sim.mode() == hall_core::SimulationMode::Frozen
    }

    /// Rebuild the batch with a new particle count and seed. All previously
    /// observed particle identities are invalid afterwards.
    #[wasm_bindgen]
    pub fn reinitialize(&mut self, particle_count: usize, seed: u64) {
        web_sys::console::log_1(
            &format!("HallWorld reinitialized: {} particles", particle_count).into(),
        );
        let mut sim = Simulation::new(self.sim.config().clone(), seed);
        sim.initialize(particle_count);
        self.sim = sim;
        self.buffer.resize(particle_count);
    }

    /// Resize the bar volume. Non-positive or non-finite extents are
    /// ignored, keeping the previous value.
    #[wasm_bindgen]
    pub fn set_volume(&mut self, x_max: f32, y_max: f32, z_max: f32) {
        self.sim.config_mut().set_volume(x_max, y_max, z_max);
    }

    #[wasm_bindgen]
    pub fn set_gains(&mut self, drift_gain: f32, deflection_gain: f32, force_scale: f32) {
        let cfg = self.sim.config_mut();
        cfg.drift_gain = drift_gain;
        cfg.deflection_gain = deflection_gain;
        cfg.force_scale = force_scale;
    }

    #[wasm_bindgen]
    pub fn set_thresholds(
        &mut self,
        freeze_threshold: f32,
        accumulation_field_threshold: f32,
        accumulation_current_threshold: f32,
    ) {
        let cfg = self.sim.config_mut();
        cfg.freeze_threshold = freeze_threshold;
        cfg.accumulation_field_threshold = accumulation_field_threshold;
        cfg.accumulation_current_threshold = accumulation_current_threshold;
    }

    /// Drop the particle batch. The world must be reinitialized before the
    /// next `step`.
    #[wasm_bindgen]
    pub fn dispose(&mut self) {
        self.sim.dispose();
    }
}
