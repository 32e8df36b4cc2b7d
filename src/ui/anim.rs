//! Time-based tweens driven by the per-frame update loop.
//!
//! A [`Track`] owns one animated value. `tween_to` replaces whatever is
//! running and starts from the current value; `then_to` queues a segment that
//! starts where the previous one ends.

use crate::ui::color;
use smallvec::SmallVec;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TweenType {
    Linear,
    /// Quadratic ease-in.
    Accelerate,
    /// Quadratic ease-out.
    Decelerate,
    InQuint,
    OutQuint,
}

impl TweenType {
    pub fn ease(self, progress: f32) -> f32 {
        let t = progress.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::Accelerate => t * t,
            Self::Decelerate => 1.0 - (1.0 - t) * (1.0 - t),
            Self::InQuint => t * t * t * t * t,
            Self::OutQuint => {
                let u = 1.0 - t;
                1.0 - u * u * u * u * u
            }
        }
    }
}

pub trait Lerp: Copy {
    fn lerp(a: Self, b: Self, t: f32) -> Self;
}

impl Lerp for f32 {
    #[inline(always)]
    fn lerp(a: Self, b: Self, t: f32) -> Self {
        (b - a).mul_add(t, a)
    }
}

impl Lerp for [f32; 4] {
    #[inline(always)]
    fn lerp(a: Self, b: Self, t: f32) -> Self {
        color::lerp_color(a, b, t)
    }
}

#[derive(Debug, Clone, Copy)]
struct Segment<T> {
    to: T,
    duration: f32,
    ease: TweenType,
}

#[derive(Debug, Clone, Copy)]
struct Running<T> {
    from: T,
    seg: Segment<T>,
    elapsed: f32,
}

#[derive(Debug, Clone)]
pub struct Track<T: Lerp> {
    value: T,
    running: Option<Running<T>>,
    queue: SmallVec<[Segment<T>; 2]>,
}

impl<T: Lerp> Track<T> {
    pub fn new(value: T) -> Self {
        Self {
            value,
            running: None,
            queue: SmallVec::new(),
        }
    }

    #[inline(always)]
    pub fn value(&self) -> T {
        self.value
    }

    /// Target of the last queued segment, or the current value when idle.
    pub fn final_value(&self) -> T {
        self.queue
            .last()
            .map(|s| s.to)
            .or_else(|| self.running.map(|r| r.seg.to))
            .unwrap_or(self.value)
    }

    #[inline(always)]
    pub fn is_animating(&self) -> bool {
        self.running.is_some() || !self.queue.is_empty()
    }

    /// Seconds left until the last queued segment lands.
    pub fn remaining(&self) -> f32 {
        let current = self
            .running
            .map_or(0.0, |r| (r.seg.duration - r.elapsed).max(0.0));
        current + self.queue.iter().map(|s| s.duration).sum::<f32>()
    }

    /// Drops pending segments and jumps to `value`.
    pub fn set(&mut self, value: T) {
        self.clear();
        self.value = value;
    }

    /// Stops animating and keeps the current value.
    pub fn clear(&mut self) {
        self.running = None;
        self.queue.clear();
    }

    pub fn tween_to(&mut self, to: T, duration: f32, ease: TweenType) {
        self.clear();
        self.then_to(to, duration, ease);
    }

    pub fn then_to(&mut self, to: T, duration: f32, ease: TweenType) {
        self.queue.push(Segment {
            to,
            duration,
            ease,
        });
        if self.running.is_none() {
            self.start_next();
        }
        // Zero-length segments land immediately so readers never see a stale value.
        self.update(0.0);
    }

    fn start_next(&mut self) {
        if self.queue.is_empty() {
            return;
        }
        let seg = self.queue.remove(0);
        self.running = Some(Running {
            from: self.value,
            seg,
            elapsed: 0.0,
        });
    }

    pub fn update(&mut self, dt: f32) {
        let mut dt = dt.max(0.0);
        while let Some(mut run) = self.running {
            let remaining = run.seg.duration - run.elapsed;
            if remaining <= dt {
                self.value = run.seg.to;
                dt -= remaining.max(0.0);
                self.running = None;
                self.start_next();
                continue;
            }
            run.elapsed += dt;
            let t = run.seg.ease.ease(run.elapsed / run.seg.duration);
            self.value = T::lerp(run.from, run.seg.to, t);
            self.running = Some(run);
            break;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn remaining_counts_queued_segments() {
        let mut t = Track::new(0.0_f32);
        assert_eq!(t.remaining(), 0.0);
        t.tween_to(1.0, 0.3, TweenType::Linear);
        t.then_to(0.0, 0.2, TweenType::Linear);
        t.update(0.1);
        assert!((t.remaining() - 0.4).abs() <= 1e-5, "got {}", t.remaining());
        t.update(1.0);
        assert_eq!(t.remaining(), 0.0);
    }

    #[test]
    fn eases_pin_endpoints() {
        for ease in [
            TweenType::Linear,
            TweenType::Accelerate,
            TweenType::Decelerate,
            TweenType::InQuint,
            TweenType::OutQuint,
        ] {
            assert_eq!(ease.ease(0.0), 0.0, "{ease:?} at 0");
            assert!((ease.ease(1.0) - 1.0).abs() <= 1e-6, "{ease:?} at 1");
        }
        assert!(TweenType::InQuint.ease(0.5) < 0.05);
        assert!(TweenType::OutQuint.ease(0.5) > 0.95);
    }

    #[test]
    fn tween_reaches_target_and_stops() {
        let mut t = Track::new(0.0_f32);
        t.tween_to(1.0, 0.3, TweenType::Linear);
        t.update(0.15);
        assert!((t.value() - 0.5).abs() <= 1e-5, "halfway, got {}", t.value());
        t.update(0.2);
        assert_eq!(t.value(), 1.0);
        assert!(!t.is_animating());
    }

    #[test]
    fn queued_segment_starts_from_previous_target() {
        let mut t = Track::new(0.0_f32);
        t.tween_to(1.0, 0.1, TweenType::Linear);
        t.then_to(0.0, 1.0, TweenType::Linear);
        assert_eq!(t.final_value(), 0.0);
        // Leftover time from the first segment carries into the second.
        t.update(0.6);
        assert!((t.value() - 0.5).abs() <= 1e-5, "got {}", t.value());
    }

    #[test]
    fn zero_duration_applies_immediately() {
        let mut t = Track::new([0.0_f32; 4]);
        t.tween_to([1.0; 4], 0.0, TweenType::OutQuint);
        assert_eq!(t.value(), [1.0; 4]);
        assert!(!t.is_animating());
    }

    #[test]
    fn set_cancels_running_tween() {
        let mut t = Track::new(0.0_f32);
        t.tween_to(1.0, 1.0, TweenType::Linear);
        t.set(0.25);
        t.update(5.0);
        assert_eq!(t.value(), 0.25);
    }
}
