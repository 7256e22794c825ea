/// Tunable constants for the Hall bar simulation.
///
/// All values are stylized visualization units, not SI. The axes are fixed:
/// X is the drift axis (electrons travel toward -X under positive current),
/// Y is the vertical axis (the applied field points along -Y), and Z is the
/// lateral axis where Hall deflection shows up.
#[derive(Clone, Debug)]
pub struct HallConfig {
    /// Half-extent of the bar on the drift axis.
    pub x_max: f32,
    /// Half-extent on the vertical axis.
    pub y_max: f32,
    /// Half-extent on the lateral axis (before accumulation widening).
    pub z_max: f32,
    /// Upper clamp for the current control channel.
    pub max_current: f32,
    /// Upper clamp for the magnetic field control channel.
    pub max_field: f32,
    /// Current level at or below which the simulation freezes.
    pub freeze_threshold: f32,
    /// Converts drift velocity into position change per second.
    pub drift_gain: f32,
    /// Overall scale applied to the Lorentz cross product.
    pub force_scale: f32,
    /// Converts deflection force into lateral position change per second.
    pub deflection_gain: f32,
    /// Field strength below which no lateral advance is applied at all.
    pub deflection_field_min: f32,
    /// Peak-to-peak magnitude of the per-frame vertical jitter.
    pub jitter_amplitude: f32,
    /// Field strength above which edge accumulation can activate.
    pub accumulation_field_threshold: f32,
    /// Current above which edge accumulation can activate.
    pub accumulation_current_threshold: f32,
    /// Fractional widening of the lateral clamp at full field strength.
    pub accumulation_widen: f32,
    /// Frame deltas above this are capped before integration.
    pub max_delta_time: f32,
    /// Mean instance scale sent to the renderer.
    pub base_scale: f32,
    /// Pulsation amplitude while flowing, as a fraction of `base_scale`.
    pub pulse_amplitude: f32,
    /// Pulsation frequency in radians per simulation second.
    pub pulse_frequency: f32,
    /// Pulsation amplitude while frozen, just enough to read as alive.
    pub frozen_pulse_amplitude: f32,
}

impl Default for HallConfig {
    fn default() -> Self {
        Self {
            x_max: 6.0,
            y_max: 1.5,
            z_max: 2.5,
            max_current: 15.0,
            max_field: 100.0,
            freeze_threshold: 0.1,
            drift_gain: 0.35,
            force_scale: 0.02,
            deflection_gain: 0.12,
            deflection_field_min: 0.01,
            jitter_amplitude: 0.02,
            accumulation_field_threshold: 10.0,
            accumulation_current_threshold: 1.0,
            accumulation_widen: 0.15,
            max_delta_time: 0.05,
            base_scale: 1.0,
            pulse_amplitude: 0.25,
            pulse_frequency: 4.0,
            frozen_pulse_amplitude: 0.03,
        }
    }
}

impl HallConfig {
    /// Largest lateral half-extent any frame can use (accumulation widening
    /// at full field strength).
    pub fn z_limit_max(&self) -> f32 {
        self.z_max * (1.0 + self.accumulation_widen)
    }

    /// Apply new half-extents from an untrusted control surface. A value
    /// that is not strictly positive and finite is ignored, keeping the
    /// previous extent: a degenerate axis would leave the wrap resample and
    /// batch initialization with an empty range to draw from.
    pub fn set_volume(&mut self, x_max: f32, y_max: f32, z_max: f32) {
        if x_max.is_finite() && x_max > 0.0 {
            self.x_max = x_max;
        }
        if y_max.is_finite() && y_max > 0.0 {
            self.y_max = y_max;
        }
        if z_max.is_finite() && z_max > 0.0 {
            self.z_max = z_max;
        }
    }
}
