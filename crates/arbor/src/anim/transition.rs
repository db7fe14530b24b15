use super::{Animator, Easing, Lerp, Param};
use crate::error::{Error, Result};

/// A timed interpolation of one parameter toward a target.
///
/// Progress is tracked as a ratio that starts at `-delay / duration` and climbs by
/// `dt / duration` each frame, clamped at 1. The parameter is untouched while the ratio is negative.
#[derive(Debug, Clone)]
pub struct Transition<T> {
    /// Value snapshotted when the transition was armed.
    initial: T,
    /// Value reached when the ratio hits 1.
    target: Option<T>,
    /// Length of the interpolation in seconds.
    duration: Option<f32>,
    /// Seconds before the interpolation starts.
    delay: f32,
    /// Curve applied to the ratio.
    easing: Easing,
    /// Elapsed ratio. Unset until the first tick so delay and duration may be set in any order.
    ratio: Option<f32>,
}

/// Result of advancing a transition by one frame.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Step<T> {
    /// New value for the parameter, if the transition has started.
    pub(crate) value: Option<T>,
    /// The ratio reached 1.
    pub(crate) done: bool,
}

impl<T: Lerp> Transition<T> {
    /// Arm a transition starting from `initial`.
    pub(crate) fn new(initial: T) -> Self {
        Self {
            initial,
            target: None,
            duration: None,
            delay: 0.0,
            easing: Easing::Linear,
            ratio: None,
        }
    }

    /// Current elapsed ratio, if the transition has ticked.
    pub fn ratio(&self) -> Option<f32> {
        self.ratio
    }

    /// The easing curve in use.
    pub fn easing(&self) -> Easing {
        self.easing
    }

    /// Advance by `dt` seconds.
    pub(crate) fn advance(&mut self, dt: f32) -> Result<Step<T>> {
        let target = self
            .target
            .as_ref()
            .ok_or_else(|| Error::Transition("transition has no target".into()))?;
        let duration = match self.duration {
            Some(d) if d > 0.0 => d,
            other => {
                return Err(Error::Transition(format!(
                    "transition duration must be positive, got {other:?}"
                )));
            }
        };

        let ratio = self.ratio.get_or_insert(-self.delay / duration);
        *ratio = (*ratio + dt / duration).min(1.0);
        if *ratio < 0.0 {
            return Ok(Step {
                value: None,
                done: false,
            });
        }

        let eased = self.easing.apply(*ratio);
        Ok(Step {
            value: Some(self.initial.lerp(target, eased)),
            done: *ratio == 1.0,
        })
    }
}

/// Configures a transition that has already been registered as active.
///
/// Returned by [`Animator::transition`]. Each method edits the armed transition in place:
///
/// ```
/// # use arbor::anim::Animator;
/// # fn main() -> arbor::Result<()> {
/// let mut animator = Animator::new();
/// let p = animator.param(0.0f32);
/// animator.transition(p)?.target(10.0).duration(1.0).ease_out();
/// for _ in 0..10 {
///     animator.update_all(0.1)?;
/// }
/// assert_eq!(animator.get(p)?, 10.0);
/// # Ok(())
/// # }
/// ```
pub struct TransitionBuilder<'a, T: Lerp> {
    /// Registry holding the transition.
    animator: &'a mut Animator,
    /// Parameter being animated.
    param: Param<T>,
}

impl<'a, T: Lerp> TransitionBuilder<'a, T> {
    /// Wrap a freshly armed transition.
    pub(crate) fn new(animator: &'a mut Animator, param: Param<T>) -> Self {
        Self { animator, param }
    }

    /// Apply an edit to the armed transition. A transition replaced or stopped in the meantime is
    /// left alone.
    fn edit(self, f: impl FnOnce(&mut Transition<T>)) -> Self {
        if let Some(t) = self.animator.transition_mut(self.param) {
            f(t);
        }
        self
    }

    /// Set the value to animate toward.
    pub fn target(self, v: T) -> Self {
        self.edit(|t| t.target = Some(v))
    }

    /// Wait `seconds` before starting.
    pub fn delay(self, seconds: f32) -> Self {
        self.edit(|t| t.delay = seconds)
    }

    /// Take `seconds` to reach the target.
    pub fn duration(self, seconds: f32) -> Self {
        self.edit(|t| t.duration = Some(seconds))
    }

    /// Use an explicit easing curve.
    pub fn easing(self, easing: Easing) -> Self {
        self.edit(|t| t.easing = easing)
    }

    /// Quadratic ease-in.
    pub fn ease_in(self) -> Self {
        self.easing(Easing::EaseIn)
    }

    /// Quadratic ease-out.
    pub fn ease_out(self) -> Self {
        self.easing(Easing::EaseOut)
    }

    /// Smoothstep.
    pub fn ease_in_ease_out(self) -> Self {
        self.easing(Easing::EaseInEaseOut)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn armed(target: f32, duration: f32) -> Transition<f32> {
        let mut t = Transition::new(0.0);
        t.target = Some(target);
        t.duration = Some(duration);
        t
    }

    #[test]
    fn delay_holds_value() -> Result<()> {
        let mut t = armed(1.0, 1.0);
        t.delay = 0.5;
        let s = t.advance(0.25)?;
        assert_eq!(s.value, None);
        assert!(!s.done);
        assert_eq!(t.ratio(), Some(-0.25));
        let s = t.advance(0.5)?;
        assert_eq!(s.value, Some(0.25));
        Ok(())
    }

    #[test]
    fn overshoot_clamps() -> Result<()> {
        let mut t = armed(4.0, 1.0);
        let s = t.advance(3.0)?;
        assert_eq!(s.value, Some(4.0));
        assert!(s.done);
        Ok(())
    }

    #[test]
    fn missing_pieces_fail() -> Result<()> {
        let mut t = Transition::new(0.0f32);
        assert!(matches!(t.advance(0.1), Err(Error::Transition(_))));
        t.target = Some(1.0);
        assert!(matches!(t.advance(0.1), Err(Error::Transition(_))));
        t.duration = Some(0.0);
        assert!(matches!(t.advance(0.1), Err(Error::Transition(_))));
        Ok(())
    }
}
