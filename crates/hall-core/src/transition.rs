/// Gross motion state of the simulation.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum SimulationMode {
    /// Particles integrate normally.
    Flowing,
    /// Motion suspended at near-zero current; only cosmetic pulsation runs.
    Frozen,
}

/// Edge reported by [`TransitionController::update`], at most once per
/// threshold crossing.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Transition {
    None,
    /// Current dropped from above the threshold to at or below it this frame.
    Froze,
    /// Current rose from at or below the threshold to above it this frame.
    Resumed,
}

/// Detects the current crossing the freeze threshold.
///
/// Tracks the previous frame's clamped current so a single-frame dip is a
/// real crossing, not something averaged away. Edges fire on the crossing
/// frame only; holding the current below the threshold reports `None` on
/// every later frame.
pub struct TransitionController {
    mode: SimulationMode,
    prev_current: f32,
}

impl TransitionController {
    pub fn new() -> Self {
        Self {
            mode: SimulationMode::Flowing,
            prev_current: 0.0,
        }
    }

    pub fn mode(&self) -> SimulationMode {
        self.mode
    }

    /// Feed this frame's clamped current; call exactly once per step, before
    /// integration.
    pub fn update(&mut self, current: f32, threshold: f32) -> Transition {
        let prev = self.prev_current;
        self.prev_current = current;
        match self.mode {
            SimulationMode::Flowing if prev > threshold && current <= threshold => {
                self.mode = SimulationMode::Frozen;
                Transition::Froze
            }
            SimulationMode::Frozen if prev <= threshold && current > threshold => {
                self.mode = SimulationMode::Flowing;
                Transition::Resumed
            }
            _ => Transition::None,
        }
    }
}

impl Default for TransitionController {
    fn default() -> Self {
        Self::new()
    }
}
