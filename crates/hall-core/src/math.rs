/// Hash a float to [0,1). Deterministic, used for per-particle phase seeds.
pub fn hash11(p: f32) -> f32 {
    let mut p = (p * 0.1031).fract();
    p *= p + 33.33;
    p *= p + p;
    p.fract()
}

/// Hermite ramp between two edges, GLSL-style.
pub fn smoothstep(edge0: f32, edge1: f32, x: f32) -> f32 {
    let t = ((x - edge0) / (edge1 - edge0)).clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}
