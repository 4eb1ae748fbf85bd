pub fn clamp01(v: f64) -> f64 {
    v.clamp(0.0, 1.0)
}

pub fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

/// Hermite smoothstep, `t²(3 − 2t)`. Callers clamp `t` first.
pub fn smoothstep(t: f64) -> f64 {
    t * t * (3.0 - 2.0 * t)
}

/// Position of `x` inside `[a, b]`, clamped to `[0, 1]`. A degenerate range acts
/// as a step at `a`.
pub fn map01(x: f64, a: f64, b: f64) -> f64 {
    if b <= a {
        return if x >= a { 1.0 } else { 0.0 };
    }
    clamp01((x - a) / (b - a))
}
