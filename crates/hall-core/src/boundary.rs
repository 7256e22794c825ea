use crate::config::HallConfig;
use glam::Vec3;
use rand::rngs::SmallRng;
use rand::Rng;

/// Lateral clamp state derived once per step from the frame's inputs.
#[derive(Clone, Copy, Debug)]
pub struct AccumulationState {
    /// True when both current and field are over their accumulation
    /// thresholds, i.e. visible Hall buildup needs both.
    pub active: bool,
    /// Lateral clamp half-extent for this frame. Equal to `z_max` when
    /// inactive, widened with field strength when active.
    pub z_limit: f32,
}

/// Derive the accumulation state for one step.
pub fn accumulation_state(cfg: &HallConfig, current: f32, field: f32) -> AccumulationState {
    let active = field > cfg.accumulation_field_threshold
        && current > cfg.accumulation_current_threshold;
    let z_limit = if active {
        cfg.z_max * (1.0 + cfg.accumulation_widen * (field / cfg.max_field).min(1.0))
    } else {
        cfg.z_max
    };
    AccumulationState { active, z_limit }
}

/// Confine one particle to the bar volume after its position advance.
///
/// Order matters: drift-axis wrap first (carriers re-enter from the opposite
/// face, modeling a continuous current), resample of the non-drift axes on
/// wrap, then vertical and lateral clamps. When accumulation is active the
/// lateral resample is square-law biased toward the -Z edge, so re-entering
/// carriers pile up where deflection is pushing everything anyway.
pub fn clamp_and_wrap(
    position: &mut Vec3,
    cfg: &HallConfig,
    acc: AccumulationState,
    rng: &mut SmallRng,
) {
    let wrapped = if position.x > cfg.x_max {
        position.x = -cfg.x_max;
        true
    } else if position.x < -cfg.x_max {
        position.x = cfg.x_max;
        true
    } else {
        false
    };

    if wrapped {
        position.y = rng.gen_range(-cfg.y_max..cfg.y_max);
        position.z = if acc.active {
            let t: f32 = rng.gen();
            -acc.z_limit + t * t * 2.0 * acc.z_limit
        } else {
            rng.gen_range(-cfg.z_max..cfg.z_max)
        };
    }

    position.y = position.y.clamp(-cfg.y_max, cfg.y_max);
    position.z = position.z.clamp(-acc.z_limit, acc.z_limit);
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn rng() -> SmallRng {
        SmallRng::seed_from_u64(42)
    }

    #[test]
    fn exceeding_positive_drift_bound_wraps_to_negative() {
        let cfg = HallConfig::default();
        let acc = accumulation_state(&cfg, 0.0, 0.0);
        let mut pos = Vec3::new(cfg.x_max + 0.3, 0.0, 0.0);
        clamp_and_wrap(&mut pos, &cfg, acc, &mut rng());
        assert_eq!(pos.x, -cfg.x_max);
    }

    #[test]
    fn exceeding_negative_drift_bound_reenters_from_positive() {
        let cfg = HallConfig::default();
        let acc = accumulation_state(&cfg, 0.0, 0.0);
        let mut pos = Vec3::new(-cfg.x_max - 0.1, 0.2, 0.2);
        clamp_and_wrap(&mut pos, &cfg, acc, &mut rng());
        assert_eq!(pos.x, cfg.x_max);
    }

    #[test]
    fn wrap_resamples_other_axes_in_range() {
        let cfg = HallConfig::default();
        let acc = accumulation_state(&cfg, 0.0, 0.0);
        let mut r = rng();
        for _ in 0..200 {
            let mut pos = Vec3::new(-cfg.x_max - 1.0, 99.0, -99.0);
            clamp_and_wrap(&mut pos, &cfg, acc, &mut r);
            assert!(pos.y >= -cfg.y_max && pos.y <= cfg.y_max, "y = {}", pos.y);
            assert!(pos.z >= -cfg.z_max && pos.z <= cfg.z_max, "z = {}", pos.z);
        }
    }

    #[test]
    fn in_range_position_is_untouched() {
        let cfg = HallConfig::default();
        let acc = accumulation_state(&cfg, 0.0, 0.0);
        let mut pos = Vec3::new(1.0, 0.5, -1.2);
        clamp_and_wrap(&mut pos, &cfg, acc, &mut rng());
        assert_eq!(pos, Vec3::new(1.0, 0.5, -1.2));
    }

    #[test]
    fn vertical_overshoot_is_clamped_not_wrapped() {
        let cfg = HallConfig::default();
        let acc = accumulation_state(&cfg, 0.0, 0.0);
        let mut pos = Vec3::new(0.0, cfg.y_max + 5.0, 0.0);
        clamp_and_wrap(&mut pos, &cfg, acc, &mut rng());
        assert_eq!(pos.y, cfg.y_max);
    }

    #[test]
    fn accumulation_needs_both_current_and_field() {
        let cfg = HallConfig::default();
        assert!(!accumulation_state(&cfg, 0.5, 50.0).active);
        assert!(!accumulation_state(&cfg, 5.0, 5.0).active);
        assert!(accumulation_state(&cfg, 5.0, 50.0).active);
    }

    #[test]
    fn accumulation_widens_lateral_limit_with_field() {
        let cfg = HallConfig::default();
        let weak = accumulation_state(&cfg, 5.0, 20.0);
        let strong = accumulation_state(&cfg, 5.0, 90.0);
        assert!(weak.z_limit > cfg.z_max);
        assert!(strong.z_limit > weak.z_limit);
        assert!(strong.z_limit <= cfg.z_limit_max() + 1e-6);
    }

    #[test]
    fn active_accumulation_biases_resample_toward_negative_edge() {
        let cfg = HallConfig::default();
        let acc = accumulation_state(&cfg, 5.0, 80.0);
        let mut r = rng();
        let mut mean_z = 0.0;
        let n = 2000;
        for _ in 0..n {
            let mut pos = Vec3::new(cfg.x_max + 1.0, 0.0, 0.0);
            clamp_and_wrap(&mut pos, &cfg, acc, &mut r);
            assert!(pos.z.abs() <= acc.z_limit + 1e-6);
            mean_z += pos.z;
        }
        mean_z /= n as f32;
        assert!(
            mean_z < -0.2 * acc.z_limit,
            "expected strong -Z bias, mean z = {}",
            mean_z
        );
    }
}
