/// Easing functions used to shape node opacity tweens.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Ease {
    /// Linear interpolation.
    Linear,
    /// Quadratic ease-in.
    InQuad,
    /// Quadratic ease-out.
    #[default]
    OutQuad,
    /// Quadratic ease-in/out.
    InOutQuad,
    /// Cubic ease-out.
    OutCubic,
}

impl Ease {
    /// Apply this easing function to normalized progress `t` in `[0, 1]`.
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::InQuad => t * t,
            Self::OutQuad => 1.0 - (1.0 - t) * (1.0 - t),
            Self::InOutQuad => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - ((-2.0 * t + 2.0).powi(2) / 2.0)
                }
            }
            Self::OutCubic => 1.0 - (1.0 - t).powi(3),
        }
    }
}

/// A time-based interpolation of one opacity value.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OpacityTween {
    from: f32,
    to: f32,
    start_ms: f64,
    duration_ms: f64,
    ease: Ease,
}

impl OpacityTween {
    /// A tween already settled at `value`.
    pub fn settled(value: f32) -> Self {
        Self {
            from: value,
            to: value,
            start_ms: 0.0,
            duration_ms: 0.0,
            ease: Ease::Linear,
        }
    }

    /// Sampled value at `now_ms`.
    pub fn sample(&self, now_ms: f64) -> f32 {
        if self.duration_ms <= 0.0 {
            return self.to;
        }
        let t = self.ease.apply((now_ms - self.start_ms) / self.duration_ms) as f32;
        self.from + (self.to - self.from) * t
    }

    /// Final value this tween converges to.
    pub fn target(&self) -> f32 {
        self.to
    }

    /// Retarget from wherever the tween currently is at `now_ms`.
    pub fn retarget(&mut self, to: f32, now_ms: f64, duration_ms: f64, ease: Ease) {
        let from = self.sample(now_ms);
        *self = Self {
            from,
            to,
            start_ms: now_ms,
            duration_ms,
            ease,
        };
    }

    /// Whether the tween has reached its target by `now_ms`.
    pub fn is_settled(&self, now_ms: f64) -> bool {
        self.duration_ms <= 0.0 || now_ms - self.start_ms >= self.duration_ms
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/ease.rs"]
mod tests;
