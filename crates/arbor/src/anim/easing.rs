use serde::{Deserialize, Serialize};

/// Easing curve applied to a transition's progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Easing {
    /// `x`
    #[default]
    Linear,
    /// `x²`
    EaseIn,
    /// `1 - (1 - x)²`
    EaseOut,
    /// Smoothstep, `x²(3 - 2x)`
    EaseInEaseOut,
}

impl Easing {
    /// Apply the curve to a progress value in `0.0..=1.0`.
    pub fn apply(self, x: f32) -> f32 {
        match self {
            Self::Linear => x,
            Self::EaseIn => x * x,
            Self::EaseOut => {
                let y = 1.0 - x;
                1.0 - y * y
            }
            Self::EaseInEaseOut => x * x * (3.0 - 2.0 * x),
        }
    }
}
