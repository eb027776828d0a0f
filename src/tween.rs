//! Minimal tween scheduler for fire-and-forget presentation animations.

use std::collections::HashMap;

/// Easing curves used by the dialogue presentation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Easing {
    #[default]
    Linear,
    /// Fast start, slow end (quadratic).
    OutQuad,
    /// Slow start, fast end (quadratic).
    InQuad,
    /// Fast start, slow end (cubic).
    OutCubic,
    /// Overshoots slightly before settling.
    OutBack,
}

impl Easing {
    /// Applies the curve to a normalized `t` in [0, 1].
    pub fn apply(self, t: f32) -> f32 {
        match self {
            Easing::Linear => t,
            Easing::OutQuad => 1.0 - (1.0 - t) * (1.0 - t),
            Easing::InQuad => t * t,
            Easing::OutCubic => 1.0 - (1.0 - t).powi(3),
            Easing::OutBack => {
                const C1: f32 = 1.70158;
                const C3: f32 = C1 + 1.0;
                let u = t - 1.0;
                1.0 + C3 * u * u * u + C1 * u * u
            }
        }
    }
}

/// One in-flight interpolation from `start` to `end`.
#[derive(Clone, Copy, Debug)]
pub struct Tween {
    start: f32,
    end: f32,
    duration: f32,
    delay: f32,
    elapsed: f32,
    easing: Easing,
}

impl Tween {
    pub fn new(start: f32, end: f32, duration: f32, easing: Easing) -> Self {
        Self {
            start,
            end,
            duration: duration.max(f32::EPSILON),
            delay: 0.0,
            elapsed: 0.0,
            easing,
        }
    }

    /// Defers the first movement by `delay` seconds.
    pub fn with_delay(mut self, delay: f32) -> Self {
        self.delay = delay.max(0.0);
        self
    }

    /// Advances the tween and returns the current value.
    pub fn tick(&mut self, dt: f32) -> f32 {
        self.elapsed += dt;
        self.value()
    }

    /// Current value without advancing.
    pub fn value(&self) -> f32 {
        let active = (self.elapsed - self.delay).max(0.0);
        let t = (active / self.duration).clamp(0.0, 1.0);
        self.start + (self.end - self.start) * self.easing.apply(t)
    }

    pub fn finished(&self) -> bool {
        self.elapsed - self.delay >= self.duration
    }
}

/// Fade targets addressed by the runner.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FadeTarget {
    Panel,
    AutoLabel,
}

/// Per-target fade scheduler.
///
/// Starting a fade on a target replaces the one in flight, so fades never
/// stack on the same surface.
#[derive(Debug, Default)]
pub struct FadeBoard {
    fades: HashMap<FadeTarget, Tween>,
}

impl FadeBoard {
    pub fn start(&mut self, target: FadeTarget, tween: Tween) {
        self.fades.insert(target, tween);
    }

    /// Advances every fade and hands the sampled values to `apply`.
    /// Finished fades are retired after reporting their end value.
    pub fn tick(&mut self, dt: f32, mut apply: impl FnMut(FadeTarget, f32)) {
        let mut done = Vec::new();
        for (target, tween) in self.fades.iter_mut() {
            let value = tween.tick(dt);
            apply(*target, value);
            if tween.finished() {
                done.push(*target);
            }
        }
        for target in done {
            self.fades.remove(&target);
        }
    }

    pub fn is_active(&self, target: FadeTarget) -> bool {
        self.fades.contains_key(&target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn easing_hits_endpoints() {
        for easing in [
            Easing::Linear,
            Easing::OutQuad,
            Easing::InQuad,
            Easing::OutCubic,
            Easing::OutBack,
        ] {
            assert!(easing.apply(0.0).abs() < 1e-5);
            assert!((easing.apply(1.0) - 1.0).abs() < 1e-5);
        }
    }

    #[test]
    fn tween_respects_delay_and_clamps() {
        let mut tween = Tween::new(0.0, 1.0, 0.5, Easing::Linear).with_delay(0.25);
        assert_eq!(tween.tick(0.25), 0.0);
        assert!((tween.tick(0.25) - 0.5).abs() < 1e-5);
        assert_eq!(tween.tick(10.0), 1.0);
        assert!(tween.finished());
    }

    #[test]
    fn starting_a_fade_replaces_the_inflight_one() {
        let mut board = FadeBoard::default();
        board.start(FadeTarget::Panel, Tween::new(0.0, 1.0, 1.0, Easing::Linear));
        board.start(FadeTarget::Panel, Tween::new(1.0, 0.0, 1.0, Easing::Linear));
        let mut sampled = None;
        board.tick(0.5, |_, value| sampled = Some(value));
        assert!((sampled.unwrap() - 0.5).abs() < 1e-5);
    }

    #[test]
    fn finished_fades_are_retired() {
        let mut board = FadeBoard::default();
        board.start(FadeTarget::Panel, Tween::new(0.0, 1.0, 0.1, Easing::Linear));
        board.tick(1.0, |_, _| {});
        assert!(!board.is_active(FadeTarget::Panel));
    }
}
