use std::array;

/// An RGBA color with components in `0.0..=1.0`.
pub type Rgba = [f32; 4];

/// Values that can be animated by a transition.
///
/// Interpolation is component-wise: `a * (1 - t) + b * t`, so `t == 1` yields the target exactly.
pub trait Lerp: Clone + PartialEq + 'static {
    /// Interpolate from `self` toward `to` by `t`.
    fn lerp(&self, to: &Self, t: f32) -> Self;
}

impl Lerp for f32 {
    fn lerp(&self, to: &Self, t: f32) -> Self {
        self * (1.0 - t) + to * t
    }
}

impl Lerp for f64 {
    fn lerp(&self, to: &Self, t: f32) -> Self {
        let t = f64::from(t);
        self * (1.0 - t) + to * t
    }
}

impl<const N: usize> Lerp for [f32; N] {
    fn lerp(&self, to: &Self, t: f32) -> Self {
        array::from_fn(|i| self[i].lerp(&to[i], t))
    }
}

impl Lerp for (f32, f32) {
    fn lerp(&self, to: &Self, t: f32) -> Self {
        (self.0.lerp(&to.0, t), self.1.lerp(&to.1, t))
    }
}
