//! Curved health bar with a lingering "miss" bar.
//!
//! The baseline runs flat, bends into a short diagonal rise near its end and
//! flattens out again. Two bars are cut from it every time a value changes:
//! the health bar over `[0, health]` and the miss bar over
//! `[health, max(miss, health)]`. After a miss the miss bar holds its length,
//! flashes red, and retracts to the health value once the reset timer fires.

use crate::config::Config;
use crate::core::timer::{Scheduler, TimerHandle};
use crate::game::judgment::Judgment;
use crate::ui::actors::{Actor, BlendMode, MeshVertex};
use crate::ui::anim::{Track, TweenType};
use crate::ui::color;
use crate::ui::path::{self, ControlPoint, Path, SegmentKind};
use glam::Vec2;
use log::trace;
use std::sync::Arc;

pub const MAIN_PATH_RADIUS: f32 = 10.0;
const MISS_PATH_RADIUS: f32 = 40.0;

const CURVE_START_OFFSET: f32 = 70.0;
const CURVE_END_OFFSET: f32 = 40.0;
const CURVE_SMOOTHNESS: f32 = 10.0;
const MIN_PATH_LENGTH: f32 = CURVE_START_OFFSET + CURVE_SMOOTHNESS;
const MAX_BAR_HEIGHT: f32 = 64.0;

const BACKGROUND_SOLID_PORTION: f32 = 0.16;

// Hit flash
const HIT_GLOW_FLASH_ALPHA: f32 = 0.8;
const HIT_GLOW_SETTLE: f32 = 0.3;
const HIT_MISS_BAR_FLASH: f32 = 0.03;
const HIT_MISS_BAR_SETTLE: f32 = 1.0;
const HIT_MISS_GLOW_SETTLE: f32 = 0.3;

// Miss flash
const MISS_FLASH_IN: f32 = 0.1;
const MISS_FLASH_SETTLE: f32 = 0.8;
const MISS_GLOW_LIGHTEN: f32 = 0.2;
const MISS_FINISH_DURATION: f32 = 0.3;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Params {
    pub width: f32,
    pub bar_height: f32,
    pub bar_length: f32,
    pub health_glow_portion: f32,
    pub miss_glow_portion: f32,
    pub miss_reset_delay: f32,
    pub miss_retract_duration: f32,
}

impl Params {
    pub fn from_config(cfg: &Config) -> Self {
        Self {
            width: cfg.health_bar_width,
            bar_height: cfg.health_bar_height,
            bar_length: cfg.health_bar_length,
            health_glow_portion: cfg.health_glow_portion,
            miss_glow_portion: cfg.miss_glow_portion,
            miss_reset_delay: cfg.miss_reset_delay,
            miss_retract_duration: cfg.miss_retract_duration,
        }
    }
}

impl Default for Params {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Palette {
    pub bar: [f32; 4],
    pub glow: [f32; 4],
    pub miss_flash_bar: [f32; 4],
    pub miss_bar: [f32; 4],
    pub miss_glow: [f32; 4],
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            bar: color::HEALTH_BAR_RGBA,
            glow: color::HEALTH_GLOW_RGBA,
            miss_flash_bar: color::MISS_FLASH_BAR_RGBA,
            miss_bar: color::MISS_BAR_RGBA,
            miss_glow: color::MISS_GLOW_RGBA,
        }
    }
}

/// Who currently owns the miss value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissPhase {
    /// Miss value tracks health directly.
    Idle,
    /// Colors are still settling after a hit, a miss or a reset.
    Flashing,
    /// A reset is scheduled; the miss value is held.
    PendingReset,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Deferred {
    ResetMissBar,
}

pub struct State {
    params: Params,
    palette: Palette,
    path: Path,
    background: Arc<[MeshVertex]>,
    health: f32,
    miss: Track<f32>,
    main_glow: Track<[f32; 4]>,
    miss_bar: Track<[f32; 4]>,
    miss_glow: Track<[f32; 4]>,
    reset_miss: Option<TimerHandle>,
    timers: Scheduler<Deferred>,
    health_vertices: Vec<Vec2>,
    health_offset: Vec2,
    miss_vertices: Vec<Vec2>,
    miss_offset: Vec2,
}

/* ----------------------------- geometry ----------------------------- */

/// Builds the baseline: flat run, rounded bend, diagonal rise, rounded bend,
/// short flat tail.
pub fn build_path(width: f32, bar_height: f32, bar_length: f32) -> Path {
    let draw_width = width * bar_length.clamp(0.2, 1.0);
    let len = (draw_width - MAIN_PATH_RADIUS * 2.0).max(MIN_PATH_LENGTH);
    let h = bar_height.clamp(0.0, MAX_BAR_HEIGHT);

    let curve_start = Vec2::new(len - CURVE_START_OFFSET, 0.0);
    let curve_end = Vec2::new(len - CURVE_END_OFFSET, h);
    let dir = (curve_end - curve_start).normalize_or_zero();

    Path::new(&[
        ControlPoint::typed(Vec2::ZERO, SegmentKind::Linear),
        ControlPoint::typed(
            Vec2::new(curve_start.x - CURVE_SMOOTHNESS, 0.0),
            SegmentKind::Bezier,
        ),
        ControlPoint::plain(curve_start),
        ControlPoint::typed(curve_start + dir * CURVE_SMOOTHNESS, SegmentKind::Linear),
        ControlPoint::typed(curve_end - dir * CURVE_SMOOTHNESS, SegmentKind::Bezier),
        ControlPoint::plain(curve_end),
        ControlPoint::typed(
            Vec2::new(curve_end.x + CURVE_SMOOTHNESS, h),
            SegmentKind::Linear,
        ),
        ControlPoint::plain(Vec2::new(len, h)),
    ])
}

/// Bar color at `position`, measured from the leading edge (0) to the tail
/// (1): transparent into glow across the glow portion, solid past it.
pub fn bar_colour_at(position: f32, bar: [f32; 4], glow: [f32; 4], glow_portion: f32) -> [f32; 4] {
    if glow[3] <= 0.0 || glow_portion <= 0.0 || position >= glow_portion {
        return bar;
    }
    let t = TweenType::InQuint.ease(position / glow_portion);
    color::lerp_color(color::TRANSPARENT, glow, t)
}

/// Background color at `position` from the start (0) to the end (1).
pub fn background_colour_at(position: f32) -> [f32; 4] {
    if position <= BACKGROUND_SOLID_PORTION {
        return color::BACKGROUND_START_RGBA;
    }
    let t = (position - BACKGROUND_SOLID_PORTION) / (1.0 - BACKGROUND_SOLID_PORTION);
    color::lerp_color(
        color::BACKGROUND_START_RGBA,
        color::BACKGROUND_END_RGBA,
        TweenType::OutQuint.ease(t),
    )
}

/// Colors a polyline by arc-length fraction. `from_end` measures from the last
/// vertex instead of the first.
fn colorize(points: &[Vec2], from_end: bool, colour_at: impl Fn(f32) -> [f32; 4]) -> Arc<[MeshVertex]> {
    let total = path::polyline_length(points);
    let mut s = 0.0_f32;
    let mut out = Vec::with_capacity(points.len());
    for (i, p) in points.iter().enumerate() {
        if i > 0 {
            s += points[i - 1].distance(*p);
        }
        let along = if total > 0.0 { s / total } else { 0.0 };
        let position = if from_end { 1.0 - along } else { along };
        out.push(MeshVertex {
            pos: p.to_array(),
            color: colour_at(position),
        });
    }
    Arc::from(out)
}

fn build_background(path: &Path) -> Arc<[MeshVertex]> {
    colorize(path.vertices(), false, background_colour_at)
}

fn refresh_bars(state: &mut State) {
    let miss = state.miss.value().max(state.health);
    state
        .path
        .sample_range(&mut state.health_vertices, 0.0, state.health);
    state
        .path
        .sample_range(&mut state.miss_vertices, state.health, miss);
    state.health_offset = path::rebase_to_origin(&mut state.health_vertices);
    state.miss_offset = path::rebase_to_origin(&mut state.miss_vertices);
}

/* ------------------------------ lifecycle ----------------------------- */

pub fn init(params: Params, palette: Palette) -> State {
    let path = build_path(params.width, params.bar_height, params.bar_length);
    let background = build_background(&path);
    let mut state = State {
        params,
        palette,
        path,
        background,
        health: 1.0,
        miss: Track::new(1.0),
        main_glow: Track::new(palette.glow),
        miss_bar: Track::new(palette.bar),
        miss_glow: Track::new(palette.glow),
        reset_miss: None,
        timers: Scheduler::new(),
        health_vertices: Vec::new(),
        health_offset: Vec2::ZERO,
        miss_vertices: Vec::new(),
        miss_offset: Vec2::ZERO,
    };
    refresh_bars(&mut state);
    state
}

/// Re-lays the baseline for a new drawable width.
pub fn resize(state: &mut State, width: f32) {
    state.params.width = width;
    state.path = build_path(width, state.params.bar_height, state.params.bar_length);
    state.background = build_background(&state.path);
    refresh_bars(state);
}

fn cancel_pending_reset(state: &mut State) -> bool {
    match state.reset_miss.take() {
        Some(handle) => {
            state.timers.cancel(handle);
            true
        }
        None => false,
    }
}

/// Ends a miss display: drops the pending reset and eases colors back.
fn finish_miss_display(state: &mut State) {
    if state.health > 0.0 {
        if state.miss_bar.final_value() != state.palette.bar {
            state
                .miss_bar
                .tween_to(state.palette.bar, MISS_FINISH_DURATION, TweenType::Accelerate);
        }
        if state.miss_glow.final_value() != state.palette.glow {
            state
                .miss_glow
                .tween_to(state.palette.glow, MISS_FINISH_DURATION, TweenType::Accelerate);
        }
    }
    cancel_pending_reset(state);
}

pub fn set_health(state: &mut State, value: f32) {
    if !value.is_finite() {
        return;
    }
    let value = value.clamp(0.0, 1.0);
    state.health = value;
    if value >= state.miss.value() {
        finish_miss_display(state);
    }
    // A pending reset owns the miss value; it reads the health when it fires.
    if state.reset_miss.is_none() {
        if state.miss.is_animating() && value < state.miss.value() {
            // Retraction in flight: keep its deadline, aim at the new health.
            let left = state.miss.remaining();
            state.miss.tween_to(value, left, TweenType::OutQuint);
        } else {
            state.miss.set(value);
        }
    }
    refresh_bars(state);
}

pub fn apply_judgement(state: &mut State, judgment: &Judgment) {
    if judgment.is_hit() {
        flash(state);
    } else {
        miss(state);
    }
}

fn flash(state: &mut State) {
    let glow = state.palette.glow;
    state
        .main_glow
        .set(color::with_alpha(glow, HIT_GLOW_FLASH_ALPHA));
    state
        .main_glow
        .tween_to(glow, HIT_GLOW_SETTLE, TweenType::OutQuint);

    if !displaying_miss(state) {
        state
            .miss_bar
            .tween_to(color::WHITE, HIT_MISS_BAR_FLASH, TweenType::OutQuint);
        state
            .miss_bar
            .then_to(state.palette.bar, HIT_MISS_BAR_SETTLE, TweenType::OutQuint);
        state
            .miss_glow
            .tween_to(color::WHITE, HIT_MISS_BAR_FLASH, TweenType::OutQuint);
        state
            .miss_glow
            .then_to(glow, HIT_MISS_GLOW_SETTLE, TweenType::OutQuint);
    }
}

fn miss(state: &mut State) {
    if !cancel_pending_reset(state) {
        if state.miss.is_animating() {
            // Caught mid-retraction: hold the bar where it is.
            state.miss.clear();
        } else {
            state.miss.set(state.health);
        }
    }

    let p = state.palette;
    state
        .miss_bar
        .tween_to(p.miss_flash_bar, MISS_FLASH_IN, TweenType::OutQuint);
    state
        .miss_bar
        .then_to(p.miss_bar, MISS_FLASH_SETTLE, TweenType::OutQuint);
    state
        .miss_glow
        .set(color::lighten(p.miss_glow, MISS_GLOW_LIGHTEN));
    state
        .miss_glow
        .tween_to(p.miss_glow, MISS_FLASH_SETTLE, TweenType::OutQuint);

    state.reset_miss = Some(
        state
            .timers
            .schedule(state.params.miss_reset_delay, Deferred::ResetMissBar),
    );
    trace!("miss bar held at {:.3}", state.miss.value());
    refresh_bars(state);
}

fn reset_miss_bar(state: &mut State) {
    state.reset_miss = None;
    state.miss.tween_to(
        state.health,
        state.params.miss_retract_duration,
        TweenType::OutQuint,
    );
    finish_miss_display(state);
}

fn advance_tracks(state: &mut State, dt: f32) {
    state.miss.update(dt);
    state.main_glow.update(dt);
    state.miss_bar.update(dt);
    state.miss_glow.update(dt);
}

pub fn update(state: &mut State, dt: f32) {
    let mut remaining = dt.max(0.0);
    while let Some((moved, handle, action)) = state.timers.next_due(remaining) {
        advance_tracks(state, moved);
        remaining = (remaining - moved).max(0.0);
        match action {
            Deferred::ResetMissBar if state.reset_miss == Some(handle) => reset_miss_bar(state),
            Deferred::ResetMissBar => {}
        }
    }
    state.timers.advance(remaining);
    advance_tracks(state, remaining);
    refresh_bars(state);
}

/* ------------------------------ queries ------------------------------ */

#[inline(always)]
pub const fn displaying_miss(state: &State) -> bool {
    state.reset_miss.is_some()
}

pub fn phase(state: &State) -> MissPhase {
    if state.reset_miss.is_some() {
        MissPhase::PendingReset
    } else if state.miss.is_animating()
        || state.miss_bar.is_animating()
        || state.miss_glow.is_animating()
        || state.main_glow.is_animating()
    {
        MissPhase::Flashing
    } else {
        MissPhase::Idle
    }
}

#[inline(always)]
pub const fn health(state: &State) -> f32 {
    state.health
}

/// Raw miss value; may sit below health until the next render clamps it.
#[inline(always)]
pub fn miss_value(state: &State) -> f32 {
    state.miss.value()
}

#[inline(always)]
pub fn displayed_miss(state: &State) -> f32 {
    state.miss.value().max(state.health)
}

#[inline(always)]
pub fn health_vertices(state: &State) -> &[Vec2] {
    &state.health_vertices
}

#[inline(always)]
pub fn miss_vertices(state: &State) -> &[Vec2] {
    &state.miss_vertices
}

#[inline(always)]
pub const fn health_offset(state: &State) -> Vec2 {
    state.health_offset
}

#[inline(always)]
pub const fn miss_offset(state: &State) -> Vec2 {
    state.miss_offset
}

#[inline(always)]
pub const fn baseline(state: &State) -> &Path {
    &state.path
}

#[inline(always)]
pub fn miss_bar_colour(state: &State) -> [f32; 4] {
    state.miss_bar.value()
}

pub fn get_actors(state: &State, origin: [f32; 2]) -> Vec<Actor> {
    let base = Vec2::from(origin) + Vec2::splat(MAIN_PATH_RADIUS);

    let miss_bar = state.miss_bar.value();
    let miss_glow = state.miss_glow.value();
    let miss_portion = state.params.miss_glow_portion;
    let miss_mesh = colorize(&state.miss_vertices, true, |pos| {
        bar_colour_at(pos, miss_bar, miss_glow, miss_portion)
    });

    let bar = state.palette.bar;
    let glow = state.main_glow.value();
    let health_portion = state.params.health_glow_portion;
    let health_mesh = colorize(&state.health_vertices, true, |pos| {
        bar_colour_at(pos, bar, glow, health_portion)
    });

    vec![
        Actor::Mesh {
            offset: base.to_array(),
            vertices: Arc::clone(&state.background),
            thickness: MAIN_PATH_RADIUS * 2.0,
            blend: BlendMode::Alpha,
            z: 0,
        },
        Actor::Mesh {
            offset: (base + state.miss_offset).to_array(),
            vertices: miss_mesh,
            thickness: MISS_PATH_RADIUS * 2.0,
            blend: BlendMode::Add,
            z: 1,
        },
        Actor::Mesh {
            offset: (base + state.health_offset).to_array(),
            vertices: health_mesh,
            thickness: MAIN_PATH_RADIUS * 2.0,
            blend: BlendMode::Alpha,
            z: 2,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::judgment::JudgeGrade;

    const EPS: f32 = 1e-4;

    fn bar() -> State {
        init(Params::default(), Palette::default())
    }

    fn hit() -> Judgment {
        Judgment::hit(JudgeGrade::Fantastic, 4.0)
    }

    #[test]
    fn baseline_is_flat_then_rises() {
        let s = bar();
        let p = baseline(&s);
        let first = p.vertices()[0];
        let last = *p.vertices().last().expect("non-empty path");
        assert_eq!(first, Vec2::ZERO);
        assert!((last.y - Params::default().bar_height).abs() <= EPS);
        assert!(p.position_at(0.5).y.abs() <= EPS, "first half stays on the flat run");
    }

    #[test]
    fn health_bar_length_grows_with_health() {
        let mut s = bar();
        let mut prev = -1.0_f32;
        for i in 0..=100 {
            set_health(&mut s, i as f32 / 100.0);
            let len = path::polyline_length(health_vertices(&s));
            assert!(len + EPS >= prev, "length shrank at {i}: {len} < {prev}");
            prev = len;
        }
        assert!((prev - baseline(&s).distance()).abs() <= 0.01);
    }

    #[test]
    fn miss_bar_starts_where_health_bar_ends() {
        let mut s = bar();
        set_health(&mut s, 0.8);
        apply_judgement(&mut s, &Judgment::miss());
        set_health(&mut s, 0.55);
        for _ in 0..60 {
            assert!(displayed_miss(&s) >= health(&s));
            if displayed_miss(&s) <= health(&s) {
                update(&mut s, 1.0 / 60.0);
                continue;
            }
            let tip = health_offset(&s) + *health_vertices(&s).last().expect("vertices");
            assert!(
                tip.distance(miss_offset(&s)) <= 0.01,
                "miss bar detached: tip={tip}, miss start={}",
                miss_offset(&s)
            );
            update(&mut s, 1.0 / 60.0);
        }
    }

    #[test]
    fn resampling_is_idempotent() {
        let mut s = bar();
        set_health(&mut s, 0.37);
        let before = (health_vertices(&s).to_vec(), miss_vertices(&s).to_vec());
        refresh_bars(&mut s);
        refresh_bars(&mut s);
        assert_eq!(before.0, health_vertices(&s));
        assert_eq!(before.1, miss_vertices(&s));
    }

    #[test]
    fn empty_ranges_become_a_single_origin_vertex() {
        let mut s = bar();
        set_health(&mut s, 0.0);
        assert_eq!(health_vertices(&s), &[Vec2::ZERO]);
        assert_eq!(miss_vertices(&s), &[Vec2::ZERO]);
        assert_eq!(health_offset(&s), Vec2::ZERO);
    }

    #[test]
    fn miss_at_full_health_lingers_then_retracts() {
        let mut s = bar();
        set_health(&mut s, 1.0);
        apply_judgement(&mut s, &Judgment::miss());
        assert_eq!(miss_value(&s), 1.0);
        assert_eq!(phase(&s), MissPhase::PendingReset);

        set_health(&mut s, 0.9);
        assert_eq!(miss_value(&s), 1.0, "pending reset holds the miss value");

        update(&mut s, 0.4);
        assert_eq!(miss_value(&s), 1.0);
        update(&mut s, 0.1);
        assert!(!displaying_miss(&s), "reset fired at 0.5s");
        assert!((miss_value(&s) - 1.0).abs() <= 1e-3, "retraction just began");

        update(&mut s, 0.15);
        let mid = miss_value(&s);
        assert!(mid < 1.0 && mid > 0.9, "mid-retraction value {mid}");

        update(&mut s, 0.15);
        assert!((miss_value(&s) - 0.9).abs() <= EPS, "got {}", miss_value(&s));
    }

    #[test]
    fn second_miss_replaces_first_reset() {
        let mut s = bar();
        apply_judgement(&mut s, &Judgment::miss());
        set_health(&mut s, 0.9);
        update(&mut s, 0.1);
        apply_judgement(&mut s, &Judgment::miss());
        set_health(&mut s, 0.8);
        assert_eq!(s.timers.pending_count(), 1, "only one reset may be pending");

        // Past the first reset's deadline, before the second's.
        update(&mut s, 0.45);
        assert_eq!(phase(&s), MissPhase::PendingReset);
        assert_eq!(miss_value(&s), 1.0);

        update(&mut s, 0.1);
        assert!(!displaying_miss(&s));
        update(&mut s, 0.3);
        assert!((miss_value(&s) - 0.8).abs() <= EPS, "got {}", miss_value(&s));
    }

    fn start_retraction() -> State {
        let mut s = bar();
        apply_judgement(&mut s, &Judgment::miss());
        set_health(&mut s, 0.5);
        update(&mut s, 0.5);
        assert!(!displaying_miss(&s), "reset should have fired");
        update(&mut s, 0.05);
        assert_eq!(phase(&s), MissPhase::Flashing);
        s
    }

    #[test]
    fn health_drain_during_retraction_keeps_easing() {
        let mut s = start_retraction();
        let before = miss_value(&s);
        assert!(before > 0.6, "retraction barely started, got {before}");

        set_health(&mut s, 0.49);
        assert_eq!(miss_value(&s), before, "health tick must not snap the miss bar");
        assert!(displayed_miss(&s) > health(&s));

        update(&mut s, 0.1);
        let mid = miss_value(&s);
        assert!(mid < before && mid > 0.49, "still retracting, got {mid}");

        update(&mut s, 0.3);
        assert!((miss_value(&s) - 0.49).abs() <= EPS, "got {}", miss_value(&s));
        assert_eq!(phase(&s), MissPhase::Idle);
    }

    #[test]
    fn miss_during_retraction_holds_current_length() {
        let mut s = start_retraction();
        let held = miss_value(&s);
        apply_judgement(&mut s, &Judgment::miss());
        assert_eq!(phase(&s), MissPhase::PendingReset);
        assert_eq!(miss_value(&s), held, "bar must not jump back to health");

        update(&mut s, 0.4);
        assert_eq!(miss_value(&s), held);

        update(&mut s, 0.1);
        assert!(!displaying_miss(&s));
        update(&mut s, 0.35);
        assert!((miss_value(&s) - 0.5).abs() <= EPS, "got {}", miss_value(&s));
    }

    #[test]
    fn healing_past_miss_value_cancels_reset() {
        let mut s = bar();
        set_health(&mut s, 0.6);
        apply_judgement(&mut s, &Judgment::miss());
        set_health(&mut s, 0.5);
        set_health(&mut s, 0.7);
        assert!(!displaying_miss(&s));
        assert_eq!(s.timers.pending_count(), 0);
        assert_eq!(miss_value(&s), 0.7);
        update(&mut s, 2.0);
        assert_eq!(phase(&s), MissPhase::Idle);
        assert_eq!(miss_bar_colour(&s), Palette::default().bar);
    }

    #[test]
    fn idle_health_change_snaps_miss_value() {
        let mut s = bar();
        set_health(&mut s, 0.42);
        assert_eq!(miss_value(&s), 0.42);
        assert_eq!(miss_vertices(&s), &[Vec2::ZERO]);
    }

    #[test]
    fn miss_flashes_red_and_settles() {
        let mut s = bar();
        let palette = Palette::default();
        apply_judgement(&mut s, &Judgment::miss());
        update(&mut s, MISS_FLASH_IN);
        assert_eq!(miss_bar_colour(&s), palette.miss_flash_bar);
        update(&mut s, MISS_FLASH_SETTLE * 0.25);
        assert!(phase(&s) == MissPhase::PendingReset);
        update(&mut s, 5.0);
        assert_eq!(phase(&s), MissPhase::Idle);
    }

    #[test]
    fn hit_during_miss_leaves_miss_colors_alone() {
        let mut s = bar();
        apply_judgement(&mut s, &Judgment::miss());
        update(&mut s, MISS_FLASH_IN);
        let red = miss_bar_colour(&s);
        apply_judgement(&mut s, &hit());
        update(&mut s, HIT_MISS_BAR_FLASH);
        assert_ne!(miss_bar_colour(&s), color::WHITE);
        assert!(miss_bar_colour(&s)[1] <= red[1] + EPS, "still reddish");
    }

    #[test]
    fn hit_flashes_idle_miss_bar_white() {
        let mut s = bar();
        apply_judgement(&mut s, &hit());
        update(&mut s, HIT_MISS_BAR_FLASH);
        assert_eq!(miss_bar_colour(&s), color::WHITE);
        assert_eq!(phase(&s), MissPhase::Flashing);
        update(&mut s, HIT_MISS_BAR_SETTLE);
        assert_eq!(miss_bar_colour(&s), Palette::default().bar);
        assert_eq!(phase(&s), MissPhase::Idle);
    }

    #[test]
    fn glow_ramp_is_transparent_at_edge_and_solid_past_portion() {
        let p = Palette::default();
        let edge = bar_colour_at(0.0, p.bar, p.glow, 0.6);
        assert_eq!(edge[3], 0.0);
        let near = bar_colour_at(0.59, p.bar, p.glow, 0.6);
        assert!(near[3] > 0.4 && near[3] <= p.glow[3] + EPS);
        assert_eq!(bar_colour_at(0.6, p.bar, p.glow, 0.6), p.bar);
        assert_eq!(bar_colour_at(0.0, p.bar, color::TRANSPARENT, 0.6), p.bar);
        assert_eq!(bar_colour_at(0.0, p.bar, p.glow, 0.0), p.bar);
    }

    #[test]
    fn background_ramp_dims_toward_end() {
        assert_eq!(background_colour_at(0.0), color::BACKGROUND_START_RGBA);
        assert_eq!(background_colour_at(0.16), color::BACKGROUND_START_RGBA);
        let end = background_colour_at(1.0);
        for (a, b) in end.iter().zip(color::BACKGROUND_END_RGBA) {
            assert!((a - b).abs() <= EPS);
        }
        assert!(background_colour_at(0.5)[3] < 0.8);
    }

    #[test]
    fn draws_background_miss_and_health_meshes() {
        let mut s = bar();
        set_health(&mut s, 0.5);
        let actors = get_actors(&s, [20.0, 30.0]);
        assert_eq!(actors.len(), 3);
        let Actor::Mesh { offset, vertices, .. } = &actors[2] else {
            panic!("health bar should be a mesh");
        };
        assert_eq!(*offset, [30.0, 40.0]);
        assert_eq!(vertices.len(), health_vertices(&s).len());
        assert_eq!(vertices[0].pos, [0.0, 0.0]);
    }

    #[test]
    fn narrow_layout_still_has_a_usable_baseline() {
        let mut s = bar();
        resize(&mut s, 10.0);
        assert!(baseline(&s).distance() > MIN_PATH_LENGTH * 0.9);
        set_health(&mut s, 0.5);
        assert!(health_vertices(&s).len() >= 2);
    }
}
