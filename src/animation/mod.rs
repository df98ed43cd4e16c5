//! Closed-form falling and bouncing of dropped pieces, driven by the engine's
//! move history.

mod animator;
mod drop;

pub use animator::{DropAnimator, BELOW_BOARD};
pub use drop::{DropAnimation, DEFAULT_RESTITUTION};

/// Animation settings.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct AnimationConfig {
    /// Coefficient of restitution, in `[0, 1)`.
    pub restitution: f64,
    /// Whether newly dropped pieces bounce on landing.
    pub bounce: bool,
    /// Animation time units per second of wall-clock time.
    pub speed_multiplier: f64,
    /// Display ticks per second.
    pub fps: u32,
}

impl AnimationConfig {
    /// Animation time that passes during one display tick.
    pub fn tick_delta(&self) -> f64 {
        self.speed_multiplier / f64::from(self.fps)
    }
}

impl Default for AnimationConfig {
    fn default() -> Self {
        AnimationConfig {
            restitution: DEFAULT_RESTITUTION,
            bounce: true,
            speed_multiplier: 8.0,
            fps: 60,
        }
    }
}
