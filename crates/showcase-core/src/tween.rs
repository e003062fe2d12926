use glam::Vec3;
use std::time::Duration;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Ease {
    Linear,
    /// Quadratic ease-out, the animation helper's default curve.
    Power1Out,
}

impl Ease {
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Ease::Linear => t,
            Ease::Power1Out => 1.0 - (1.0 - t) * (1.0 - t),
        }
    }
}

/// One-shot vector animation between two points.
#[derive(Clone, Debug)]
pub struct Tween {
    pub from: Vec3,
    pub to: Vec3,
    pub start: Duration,
    pub duration: Duration,
    pub ease: Ease,
}

impl Tween {
    pub fn new(from: Vec3, to: Vec3, start: Duration, duration: Duration) -> Self {
        Self {
            from,
            to,
            start,
            duration,
            ease: Ease::Power1Out,
        }
    }

    /// Interpolated value at `now` and whether the tween has completed.
    pub fn sample(&self, now: Duration) -> (Vec3, bool) {
        if self.duration.is_zero() {
            return (self.to, true);
        }
        let elapsed = now.saturating_sub(self.start).as_secs_f32();
        let t = elapsed / self.duration.as_secs_f32();
        if t >= 1.0 {
            return (self.to, true);
        }
        (self.from.lerp(self.to, self.ease.apply(t)), false)
    }
}
