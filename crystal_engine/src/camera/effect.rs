//! Timed camera modifiers.

use std::fmt;

use glam::Vec2;
use variantly::Variantly;

/// Slack when comparing elapsed time against a duration built from summed frame deltas.
const TIME_EPSILON: f32 = 1e-5;

/// Effect categories. Only [`EffectType::Shake`] may have several live instances.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Variantly)]
pub enum EffectType {
    Shake,
    Zoom,
    Sway,
    Follow,
    Pan,
}

impl fmt::Display for EffectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EffectType::Shake => "shake",
            EffectType::Zoom => "zoom",
            EffectType::Sway => "sway",
            EffectType::Follow => "follow",
            EffectType::Pan => "pan",
        };
        f.write_str(name)
    }
}

/// Per-type effect parameters.
#[derive(Debug, Clone, PartialEq, Variantly)]
pub enum CameraEffectKind {
    /// Random jitter that decays linearly to nothing.
    Shake { intensity: f32 },
    /// Zoom towards `target`; `from` is captured when the effect is applied.
    Zoom { from: Option<f32>, target: f32 },
    /// Sinusoidal offset `amplitude * sin(2π * frequency * t)`.
    Sway { amplitude: Vec2, frequency: f32 },
    /// Keep the named entity inside a deadzone around the view center.
    Follow {
        target: String,
        deadzone: Vec2,
        smooth: bool,
        smoothing: f32,
    },
    /// Slide the camera position to `target`; `from` is captured when applied.
    Pan { from: Option<Vec2>, target: Vec2 },
}

/// A camera modifier with its clock.
#[derive(Debug, Clone, PartialEq)]
pub struct CameraEffect {
    pub kind: CameraEffectKind,
    pub elapsed: f32,
    /// `None` runs until removed.
    pub duration: Option<f32>,
}

impl CameraEffect {
    pub fn new(kind: CameraEffectKind, duration: Option<f32>) -> Self {
        Self {
            kind,
            elapsed: 0.0,
            duration,
        }
    }

    pub fn shake(intensity: f32, duration: f32) -> Self {
        Self::new(CameraEffectKind::Shake { intensity }, Some(duration))
    }

    pub fn zoom(target: f32, duration: f32) -> Self {
        Self::new(CameraEffectKind::Zoom { from: None, target }, Some(duration))
    }

    pub fn sway(amplitude: Vec2, frequency: f32, duration: Option<f32>) -> Self {
        Self::new(CameraEffectKind::Sway { amplitude, frequency }, duration)
    }

    /// Indefinite follow; `smoothing` is the exponential approach rate per second.
    pub fn follow(target: impl Into<String>, deadzone: Vec2, smooth: bool, smoothing: f32) -> Self {
        Self::new(
            CameraEffectKind::Follow {
                target: target.into(),
                deadzone,
                smooth,
                smoothing,
            },
            None,
        )
    }

    pub fn pan(target: Vec2, duration: f32) -> Self {
        Self::new(CameraEffectKind::Pan { from: None, target }, Some(duration))
    }

    pub fn effect_type(&self) -> EffectType {
        match self.kind {
            CameraEffectKind::Shake { .. } => EffectType::Shake,
            CameraEffectKind::Zoom { .. } => EffectType::Zoom,
            CameraEffectKind::Sway { .. } => EffectType::Sway,
            CameraEffectKind::Follow { .. } => EffectType::Follow,
            CameraEffectKind::Pan { .. } => EffectType::Pan,
        }
    }

    /// Fraction of the duration elapsed, in `[0, 1]`. Indefinite effects report zero.
    pub fn progress(&self) -> f32 {
        match self.duration {
            Some(d) if d > 0.0 => (self.elapsed / d).clamp(0.0, 1.0),
            Some(_) => 1.0,
            None => 0.0,
        }
    }

    pub fn is_finished(&self) -> bool {
        self.duration.is_some_and(|d| self.elapsed + TIME_EPSILON >= d)
    }
}

/// Ease-in-out curve with exact endpoints.
pub(crate) fn smoothstep(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finite_effects_finish_at_duration() {
        let mut fx = CameraEffect::shake(5.0, 0.5);
        assert!(!fx.is_finished());
        fx.elapsed = 0.25;
        assert!((fx.progress() - 0.5).abs() < f32::EPSILON);
        fx.elapsed = 0.5;
        assert!(fx.is_finished());
        assert_eq!(fx.progress(), 1.0);
    }

    #[test]
    fn follow_never_finishes_on_its_own() {
        let mut fx = CameraEffect::follow("hero", Vec2::new(100.0, 80.0), true, 5.0);
        fx.elapsed = 1.0e6;
        assert!(!fx.is_finished());
        assert_eq!(fx.effect_type(), EffectType::Follow);
        assert!(fx.kind.is_follow());
    }

    #[test]
    fn zero_duration_completes_immediately() {
        let fx = CameraEffect::zoom(2.0, 0.0);
        assert!(fx.is_finished());
        assert_eq!(fx.progress(), 1.0);
    }

    #[test]
    fn smoothstep_hits_endpoints() {
        assert_eq!(smoothstep(0.0), 0.0);
        assert_eq!(smoothstep(1.0), 1.0);
        assert_eq!(smoothstep(0.5), 0.5);
    }
}
