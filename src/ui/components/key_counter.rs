use crate::assets::Skin;
use crate::ui::actors::{Actor, SizeSpec, SpriteSource, TextAlign};
use crate::ui::anim::{Track, TweenType};
use crate::ui::color;

pub const KEY_TEXTURE: &str = "inputoverlay-key";

// Matches the longest dimension of the stock key texture.
const KEY_SIZE: f32 = 46.0;
const TRANSITION_DURATION: f32 = 0.05;
const ACTIVE_SCALE: f32 = 0.75;
const ICON_ROTATION_DEG: f32 = 90.0;
const TEXT_ZOOM: f32 = 0.5;
const FONT_REGULAR: &str = "miso";
const FONT_BOLD: &str = "wendy";

#[derive(Debug, Clone, Copy)]
pub struct Colors {
    pub active: [f32; 4],
    pub text: [f32; 4],
}

impl Default for Colors {
    fn default() -> Self {
        Self {
            active: color::KEY_ACTIVE_RGBA,
            text: color::KEY_TEXT_RGBA,
        }
    }
}

#[derive(Debug, Clone)]
pub struct State {
    trigger_name: String,
    count: u32,
    active: bool,
    text: String,
    texture: Option<String>,
    icon_tint: [f32; 4],
    scale: Track<f32>,
    colors: Colors,
}

pub fn init(trigger_name: &str, skin: &Skin, colors: Colors) -> State {
    State {
        trigger_name: trigger_name.to_string(),
        count: 0,
        active: false,
        text: trigger_name.to_string(),
        texture: skin.texture(KEY_TEXTURE),
        icon_tint: color::WHITE,
        scale: Track::new(1.0),
        colors,
    }
}

fn set_count(state: &mut State, count: u32) {
    if state.count == count {
        return;
    }
    state.count = count;
    state.text = if count > 0 {
        count.to_string()
    } else {
        state.trigger_name.clone()
    };
}

/// Key went down. Counts only during forward playback.
pub fn activate(state: &mut State, forward_playback: bool) {
    state.active = true;
    if forward_playback {
        set_count(state, state.count.saturating_add(1));
    }
    state.scale.tween_to(ACTIVE_SCALE, TRANSITION_DURATION, TweenType::Decelerate);
    state.icon_tint = state.colors.active;
}

/// Key went up. Rewinding past a press takes it back off the count.
pub fn deactivate(state: &mut State, forward_playback: bool) {
    state.active = false;
    if !forward_playback {
        set_count(state, state.count.saturating_sub(1));
    }
    state.scale.tween_to(1.0, TRANSITION_DURATION, TweenType::Decelerate);
    state.icon_tint = color::WHITE;
}

pub fn update(state: &mut State, dt: f32) {
    state.scale.update(dt);
}

#[inline(always)]
pub const fn count(state: &State) -> u32 {
    state.count
}

#[inline(always)]
pub const fn is_active(state: &State) -> bool {
    state.active
}

#[inline(always)]
pub fn label(state: &State) -> &str {
    &state.text
}

#[inline(always)]
pub fn scale(state: &State) -> f32 {
    state.scale.value()
}

pub fn get_actors(state: &State, center: [f32; 2]) -> Vec<Actor> {
    let s = state.scale.value();
    let mut children = Vec::with_capacity(2);
    if let Some(tex) = &state.texture {
        children.push(Actor::Sprite {
            align: [0.5, 0.5],
            offset: [KEY_SIZE * 0.5, KEY_SIZE * 0.5],
            size: [SizeSpec::Px(KEY_SIZE), SizeSpec::Px(KEY_SIZE)],
            source: SpriteSource::Texture(tex.clone()),
            tint: state.icon_tint,
            z: 0,
            visible: true,
            rot_z_deg: ICON_ROTATION_DEG,
            scale: [s, s],
        });
    }
    // Text stays upright; only the icon is rotated.
    children.push(Actor::Text {
        align: [0.5, 0.5],
        offset: [KEY_SIZE * 0.5, KEY_SIZE * 0.5],
        color: state.colors.text,
        font: if state.active { FONT_BOLD } else { FONT_REGULAR },
        content: state.text.clone(),
        align_text: TextAlign::Center,
        z: 1,
        scale: [TEXT_ZOOM * s, TEXT_ZOOM * s],
    });

    vec![Actor::Frame {
        align: [0.5, 0.5],
        offset: center,
        size: [SizeSpec::Px(KEY_SIZE), SizeSpec::Px(KEY_SIZE)],
        children,
        background: None,
        z: 50,
    }]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn counter() -> State {
        init("Z", &Skin::none(), Colors::default())
    }

    #[test]
    fn shows_trigger_name_until_first_press() {
        let mut k = counter();
        assert_eq!(label(&k), "Z");
        activate(&mut k, true);
        assert_eq!(label(&k), "1");
        deactivate(&mut k, true);
        activate(&mut k, true);
        deactivate(&mut k, true);
        assert_eq!(count(&k), 2);
        assert_eq!(label(&k), "2");
    }

    #[test]
    fn rewind_takes_presses_back() {
        let mut k = counter();
        activate(&mut k, true);
        deactivate(&mut k, true);
        activate(&mut k, false);
        deactivate(&mut k, false);
        assert_eq!(count(&k), 0);
        assert_eq!(label(&k), "Z");
        deactivate(&mut k, false);
        assert_eq!(count(&k), 0, "count never goes negative");
    }

    #[test]
    fn rewind_press_before_any_count_keeps_name() {
        let mut k = counter();
        activate(&mut k, false);
        assert_eq!(count(&k), 0);
        assert_eq!(label(&k), "Z");
        deactivate(&mut k, false);
        assert_eq!(label(&k), "Z");
    }

    #[test]
    fn press_scales_down_then_back() {
        let mut k = counter();
        activate(&mut k, true);
        update(&mut k, TRANSITION_DURATION);
        assert!((scale(&k) - ACTIVE_SCALE).abs() <= 1e-5);
        assert!(is_active(&k));
        deactivate(&mut k, true);
        update(&mut k, TRANSITION_DURATION * 0.5);
        assert!(scale(&k) > ACTIVE_SCALE && scale(&k) < 1.0);
        update(&mut k, TRANSITION_DURATION);
        assert_eq!(scale(&k), 1.0);
    }

    #[test]
    fn missing_texture_draws_text_only() {
        let k = counter();
        let actors = get_actors(&k, [100.0, 100.0]);
        let Actor::Frame { children, .. } = &actors[0] else {
            panic!("counter should be wrapped in a frame");
        };
        assert_eq!(children.len(), 1);
        assert!(matches!(&children[0], Actor::Text { content, .. } if content.as_str() == "Z"));
    }
}
