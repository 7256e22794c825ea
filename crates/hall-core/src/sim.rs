use crate::boundary::{accumulation_state, clamp_and_wrap};
use crate::config::HallConfig;
use crate::forces::lorentz::compute_deflection;
use crate::math::smoothstep;
use crate::particle::ParticleSet;
use crate::render::ParticleRenderer;
use crate::transition::{SimulationMode, Transition, TransitionController};
use glam::Vec3;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use std::f32::consts::TAU;

/// Control inputs snapshotted and sanitized once at step entry.
///
/// The control surface may mutate its values at any time; every particle in
/// one step sees this snapshot, never the live values.
#[derive(Clone, Copy, Debug)]
pub struct FrameInputs {
    pub dt: f32,
    pub current: f32,
    pub field: f32,
    pub clock: f32,
}

impl FrameInputs {
    /// Coerce untrusted scalars into their safe ranges. NaN, infinite, and
    /// negative values collapse to 0; oversized values are capped, including
    /// the frame delta (stall recovery).
    pub fn sanitize(dt: f32, current: f32, field: f32, clock: f32, cfg: &HallConfig) -> Self {
        Self {
            dt: sanitize_scalar(dt, cfg.max_delta_time),
            current: sanitize_scalar(current, cfg.max_current),
            field: sanitize_scalar(field, cfg.max_field),
            clock: if clock.is_finite() { clock } else { 0.0 },
        }
    }
}

fn sanitize_scalar(v: f32, max: f32) -> f32 {
    if v.is_finite() && v > 0.0 {
        v.min(max)
    } else {
        0.0
    }
}

/// Per-frame integrator for the Hall bar.
///
/// Owns the particle batch, the freeze/resume state machine, and the seeded
/// RNG behind all pseudo-random sampling. Driven once per rendered frame by
/// an external clock; `step` is synchronous and O(particle count).
pub struct Simulation {
    config: HallConfig,
    particles: Option<ParticleSet>,
    transition: TransitionController,
    rng: SmallRng,
}

impl Simulation {
    /// A fresh simulation with no particle batch. `seed` fixes every
    /// pseudo-random choice, so equal seeds replay identically.
    pub fn new(config: HallConfig, seed: u64) -> Self {
        Self {
            config,
            particles: None,
            transition: TransitionController::new(),
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    pub fn config(&self) -> &HallConfig {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut HallConfig {
        &mut self.config
    }

    pub fn is_initialized(&self) -> bool {
        self.particles.is_some()
    }

    pub fn mode(&self) -> SimulationMode {
        self.transition.mode()
    }

    /// The live batch.
    ///
    /// # Panics
    /// If called before `initialize` or after `dispose`.
    pub fn particles(&self) -> &ParticleSet {
        self.particles
            .as_ref()
            .expect("Simulation::particles called with no live batch")
    }

    /// Mutable access to the live batch, for hosts that seat particles
    /// explicitly (and for tests). Panics like [`particles`](Self::particles).
    pub fn particles_mut(&mut self) -> &mut ParticleSet {
        self.particles
            .as_mut()
            .expect("Simulation::particles_mut called with no live batch")
    }

    /// Build a batch of `count` particles uniformly distributed in the
    /// volume with zero velocity. Any prior batch is dropped first and all
    /// previously observed particle identities are invalidated. The mode
    /// machine restarts in `Flowing`.
    pub fn initialize(&mut self, count: usize) {
        let mut particles = ParticleSet::new(count);
        for i in 0..count {
            particles.position[i] = self.sample_volume();
        }
        self.particles = Some(particles);
        self.transition = TransitionController::new();
    }

    /// Release the batch. `initialize` may be called again afterwards.
    ///
    /// # Panics
    /// If there is no live batch (double dispose, or dispose before
    /// initialize). That is an orchestration bug, not simulation input.
    pub fn dispose(&mut self) {
        assert!(
            self.particles.take().is_some(),
            "Simulation::dispose called with no live batch"
        );
    }

    /// Advance one frame and publish every particle to `renderer`.
    ///
    /// `dt` is the frame delta in seconds, `current` and `field` the two
    /// control channels, `clock` the accumulated simulation time driving the
    /// cosmetic pulsation. All four are sanitized at entry; bad values
    /// degrade to a quiescent frame rather than an error.
    ///
    /// # Panics
    /// If called before `initialize` or after `dispose`.
    pub fn step<R: ParticleRenderer>(
        &mut self,
        dt: f32,
        current: f32,
        field: f32,
        clock: f32,
        renderer: &mut R,
    ) {
        assert!(
            self.particles.is_some(),
            "Simulation::step called with no live batch"
        );
        let inputs = FrameInputs::sanitize(dt, current, field, clock, &self.config);

        if self.transition.update(inputs.current, self.config.freeze_threshold)
            == Transition::Froze
        {
            self.redistribute();
        }

        match self.transition.mode() {
            SimulationMode::Flowing => self.step_flowing(inputs),
            SimulationMode::Frozen => self.step_frozen(inputs),
        }

        let particles = self.particles.as_ref().expect("batch checked above");
        for i in 0..particles.count {
            renderer.update_instance(
                i as u32,
                particles.position[i],
                particles.scale[i],
                particles.emissive[i],
            );
        }
    }

    fn step_flowing(&mut self, inputs: FrameInputs) {
        let cfg = &self.config;
        let acc = accumulation_state(cfg, inputs.current, inputs.field);

        // Electrons drift against the nominal current direction.
        let velocity = Vec3::new(-inputs.current, 0.0, 0.0);
        let deflection = compute_deflection(velocity, inputs.field, cfg.force_scale);
        let apply_deflection = inputs.field > cfg.deflection_field_min;
        let glow = 0.35 + 0.65 * smoothstep(0.0, cfg.max_field, inputs.field);

        let particles = self.particles.as_mut().expect("batch checked by caller");
        for i in 0..particles.count {
            let pos = &mut particles.position[i];
            pos.x += velocity.x * inputs.dt * cfg.drift_gain;
            if apply_deflection {
                pos.z += deflection.z * inputs.dt * cfg.deflection_gain;
            }
            // Bounded liveliness wobble; the vertical clamp keeps it from
            // ever walking out of the bar.
            pos.y += (self.rng.gen::<f32>() - 0.5) * cfg.jitter_amplitude;

            clamp_and_wrap(pos, cfg, acc, &mut self.rng);
            particles.velocity[i] = velocity;

            let phase = inputs.clock * cfg.pulse_frequency + particles.pulse_seed[i] * TAU;
            particles.scale[i] = cfg.base_scale * (1.0 + cfg.pulse_amplitude * phase.sin());
            particles.emissive[i] = glow;
        }
    }

    fn step_frozen(&mut self, inputs: FrameInputs) {
        let cfg = &self.config;
        let particles = self.particles.as_mut().expect("batch checked by caller");
        for i in 0..particles.count {
            let phase = inputs.clock * cfg.pulse_frequency + particles.pulse_seed[i] * TAU;
            particles.scale[i] =
                cfg.base_scale * (1.0 + cfg.frozen_pulse_amplitude * phase.sin());
            particles.emissive[i] = 0.15;
        }
    }

    /// Freeze side effect: scatter the batch uniformly and stop everything.
    fn redistribute(&mut self) {
        let count = self.particles.as_ref().expect("batch checked by caller").count;
        let mut positions = Vec::with_capacity(count);
        for _ in 0..count {
            positions.push(self.sample_volume());
        }
        let particles = self.particles.as_mut().expect("batch checked by caller");
        for i in 0..count {
            particles.position[i] = positions[i];
            particles.velocity[i] = Vec3::ZERO;
        }
    }

    fn sample_volume(&mut self) -> Vec3 {
        let cfg = &self.config;
        Vec3::new(
            self.rng.gen_range(-cfg.x_max..cfg.x_max),
            self.rng.gen_range(-cfg.y_max..cfg.y_max),
            self.rng.gen_range(-cfg.z_max..cfg.z_max),
        )
    }
}
