//! User profile overlay: header, tab strip and a scrolling stack of sections.
//!
//! The overlay keeps one `last_section` that both the tab strip and the
//! scroll position report into. Every write is compare-before-set, so a tab
//! change that scrolls the container (or a scroll that moves the tab) settles
//! after one hop instead of bouncing.

use crate::core::network::{FetchError, UserSource};
use crate::game::user::{ApiUser, UserRef};
use crate::ui::actors::{Actor, Background, SizeSpec, TextAlign};
use crate::ui::anim::{Track, TweenType};
use crate::ui::color;
use log::{debug, info, warn};
use rustc_hash::FxHashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, TryRecvError};
use std::sync::Arc;
use std::thread;

const POP_IN_DURATION: f32 = 0.25;
const POP_OUT_DURATION: f32 = 0.2;

const HEADER_H: f32 = 120.0;
const TAB_H: f32 = 34.0;
const TAB_W: f32 = 110.0;
const SECTION_TITLE_PAD: f32 = 16.0;
// A section counts as "scrolled to" once its top is this close to the viewport top.
const SCROLL_LOOKAHEAD: f32 = 40.0;
const BOTTOM_SNAP: f32 = 0.5;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SectionKind {
    About,
    Recent,
    Ranks,
    Medals,
    Historical,
    Beatmaps,
    Kudosu,
}

impl SectionKind {
    pub const ALL: [Self; 7] = [
        Self::About,
        Self::Recent,
        Self::Ranks,
        Self::Medals,
        Self::Historical,
        Self::Beatmaps,
        Self::Kudosu,
    ];

    /// Stable identifier used by the server's section ordering list.
    pub const fn id(self) -> &'static str {
        match self {
            Self::About => "me",
            Self::Recent => "recent_activity",
            Self::Ranks => "top_ranks",
            Self::Medals => "medals",
            Self::Historical => "historical",
            Self::Beatmaps => "beatmaps",
            Self::Kudosu => "kudosu",
        }
    }

    pub const fn title(self) -> &'static str {
        match self {
            Self::About => "me!",
            Self::Recent => "Recent",
            Self::Ranks => "Ranks",
            Self::Medals => "Medals",
            Self::Historical => "Historical",
            Self::Beatmaps => "Beatmaps",
            Self::Kudosu => "Kudosu!",
        }
    }

    const fn height(self) -> f32 {
        match self {
            Self::About => 300.0,
            Self::Recent => 260.0,
            Self::Ranks => 420.0,
            Self::Medals => 220.0,
            Self::Historical => 360.0,
            Self::Beatmaps => 480.0,
            Self::Kudosu => 180.0,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Section {
    pub kind: SectionKind,
    /// Stacking priority; earlier in the ordering list is higher.
    pub priority: i32,
    pub top: f32,
    pub height: f32,
}

/* ---------------------------- scroll container ---------------------------- */

#[derive(Debug, Default)]
struct Scroller {
    sections: Vec<Section>,
    viewport_h: f32,
    scroll: f32,
    selected: Option<SectionKind>,
    // Section explicitly scrolled to; wins when the bottom clamp hides it.
    target: Option<SectionKind>,
}

impl Scroller {
    fn clear(&mut self) {
        self.sections.clear();
        self.scroll = 0.0;
        self.selected = None;
        self.target = None;
    }

    fn add(&mut self, kind: SectionKind, priority: i32) {
        let top = self.content_height();
        self.sections.push(Section {
            kind,
            priority,
            top,
            height: kind.height(),
        });
    }

    fn content_height(&self) -> f32 {
        self.sections.last().map_or(0.0, |s| s.top + s.height)
    }

    fn max_scroll(&self) -> f32 {
        (self.content_height() - self.viewport_h).max(0.0)
    }

    fn first(&self) -> Option<SectionKind> {
        self.sections.first().map(|s| s.kind)
    }

    fn top_of(&self, kind: SectionKind) -> Option<f32> {
        self.sections.iter().find(|s| s.kind == kind).map(|s| s.top)
    }

    fn section_at_scroll(&self) -> Option<SectionKind> {
        let max = self.max_scroll();
        if max > 0.0 && self.scroll >= max - BOTTOM_SNAP {
            return self
                .target
                .or_else(|| self.sections.last().map(|s| s.kind));
        }
        self.sections
            .iter()
            .rev()
            .find(|s| s.top <= self.scroll + SCROLL_LOOKAHEAD)
            .or_else(|| self.sections.first())
            .map(|s| s.kind)
    }

    /// Returns the newly selected section when the selection moved.
    fn refresh_selection(&mut self) -> Option<SectionKind> {
        let now = self.section_at_scroll();
        if now == self.selected {
            return None;
        }
        self.selected = now;
        now
    }

    fn set_scroll(&mut self, y: f32) -> Option<SectionKind> {
        self.target = None;
        self.scroll = y.clamp(0.0, self.max_scroll());
        self.refresh_selection()
    }

    fn scroll_to(&mut self, kind: SectionKind) -> Option<SectionKind> {
        let top = self.top_of(kind)?;
        self.target = Some(kind);
        self.scroll = top.clamp(0.0, self.max_scroll());
        self.refresh_selection()
    }

    fn scroll_to_top(&mut self) {
        self.target = None;
        self.scroll = 0.0;
    }
}

/* -------------------------------- tabs -------------------------------- */

#[derive(Debug, Default)]
struct TabStrip {
    items: Vec<SectionKind>,
    current: Option<SectionKind>,
}

impl TabStrip {
    /// Returns `true` when the value actually changed.
    fn set_current(&mut self, kind: SectionKind) -> bool {
        if self.current == Some(kind) {
            return false;
        }
        self.current = Some(kind);
        true
    }

    fn clear(&mut self) {
        self.items.clear();
        self.current = None;
    }
}

/* -------------------------------- state -------------------------------- */

struct PendingFetch {
    user_id: u64,
    rx: mpsc::Receiver<Result<ApiUser, FetchError>>,
    cancelled: Arc<AtomicBool>,
}

pub struct State {
    source: Arc<dyn UserSource>,
    user: Option<ApiUser>,
    requested: Option<UserRef>,
    available: Vec<SectionKind>,
    tabs: TabStrip,
    scroller: Scroller,
    last_section: Option<SectionKind>,
    loading: bool,
    fetch: Option<PendingFetch>,
    visible: bool,
    alpha: Track<f32>,
}

pub fn init(source: Arc<dyn UserSource>, viewport_h: f32) -> State {
    State {
        source,
        user: None,
        requested: None,
        available: Vec::new(),
        tabs: TabStrip::default(),
        scroller: Scroller {
            viewport_h: viewport_h.max(0.0),
            ..Scroller::default()
        },
        last_section: None,
        loading: false,
        fetch: None,
        visible: false,
        alpha: Track::new(0.0),
    }
}

fn cancel_fetch(state: &mut State) {
    if let Some(fetch) = state.fetch.take() {
        fetch.cancelled.store(true, Ordering::Release);
        debug!("Cancelled profile fetch for user {}", fetch.user_id);
    }
    state.loading = false;
}

fn start_fetch(state: &mut State, user_id: u64) {
    let (tx, rx) = mpsc::channel();
    let cancelled = Arc::new(AtomicBool::new(false));
    let flag = Arc::clone(&cancelled);
    let source = Arc::clone(&state.source);

    thread::spawn(move || {
        let result = source.fetch_user(user_id);
        if flag.load(Ordering::Acquire) {
            debug!("Dropping superseded profile result for user {user_id}");
            return;
        }
        // Receiver may be gone if the overlay was dropped.
        let _ = tx.send(result);
    });

    state.fetch = Some(PendingFetch {
        user_id,
        rx,
        cancelled,
    });
    state.loading = true;
}

/// Shows `user`, replacing whatever was displayed or loading.
pub fn show_user(state: &mut State, user: UserRef) {
    let shown = state.user.as_ref().is_some_and(|u| u.id == user.id);
    let in_flight = state.fetch.as_ref().is_some_and(|f| f.user_id == user.id);
    if shown || in_flight {
        debug!("Profile for user {} already shown or loading", user.id);
        return;
    }

    cancel_fetch(state);
    state.user = None;
    state.tabs.clear();
    state.scroller.clear();
    state.last_section = None;
    state.available = if user.is_bot {
        Vec::new()
    } else {
        SectionKind::ALL.to_vec()
    };
    state.scroller.scroll_to_top();

    if user.is_online() {
        info!("Fetching profile for {} ({})", user.username, user.id);
        start_fetch(state, user.id);
        state.requested = Some(user);
    } else {
        let record = ApiUser::from(&user);
        state.requested = Some(user);
        user_load_complete(state, record);
    }
}

/// Fills sections and tabs in the order the user record asks for.
fn user_load_complete(state: &mut State, user: ApiUser) {
    let by_id: FxHashMap<&'static str, SectionKind> =
        state.available.iter().map(|k| (k.id(), *k)).collect();

    for (index, id) in user.profile_order.iter().enumerate() {
        let Some(&kind) = by_id.get(id.as_str()) else {
            debug!("Skipping unknown profile section '{id}'");
            continue;
        };
        if state.tabs.items.contains(&kind) {
            continue;
        }
        state.scroller.add(kind, -(index as i32));
        state.tabs.items.push(kind);
    }

    info!(
        "Loaded profile for {} ({} sections)",
        user.username,
        state.tabs.items.len()
    );
    state.user = Some(user);
    state.loading = false;
}

/// Applies a finished fetch, if any. Returns `true` when a user was loaded.
pub fn poll(state: &mut State) -> bool {
    let Some(msg) = state.fetch.as_ref().map(|f| f.rx.try_recv()) else {
        return false;
    };
    match msg {
        Ok(Ok(user)) => {
            state.fetch = None;
            user_load_complete(state, user);
            true
        }
        Ok(Err(e)) => {
            warn!("Failed to load user profile: {e}");
            state.fetch = None;
            state.loading = false;
            false
        }
        Err(TryRecvError::Empty) => false,
        Err(TryRecvError::Disconnected) => {
            warn!("Profile fetch worker exited without a result");
            state.fetch = None;
            state.loading = false;
            false
        }
    }
}

/* --------------------------- selection sync --------------------------- */

fn on_scroll_section_changed(state: &mut State, section: SectionKind) {
    if state.last_section == Some(section) {
        return;
    }
    state.last_section = Some(section);
    if state.tabs.set_current(section) {
        on_tab_changed(state, section);
    }
}

fn on_tab_changed(state: &mut State, section: SectionKind) {
    let Some(last) = state.last_section else {
        // Nothing selected yet: the first section wins over the clicked tab.
        state.last_section = state.scroller.first();
        if let Some(first) = state.last_section
            && state.tabs.set_current(first)
        {
            on_tab_changed(state, first);
        }
        return;
    };
    if last == section {
        return;
    }
    state.last_section = Some(section);
    if let Some(now) = state.scroller.scroll_to(section) {
        on_scroll_section_changed(state, now);
    }
}

/// Tab strip click.
pub fn select_tab(state: &mut State, section: SectionKind) {
    if state.tabs.set_current(section) {
        on_tab_changed(state, section);
    }
}

/// Scroll container moved to `y`.
pub fn set_scroll(state: &mut State, y: f32) {
    if let Some(now) = state.scroller.set_scroll(y) {
        on_scroll_section_changed(state, now);
    }
}

pub fn scroll_by(state: &mut State, dy: f32) {
    set_scroll(state, state.scroller.scroll + dy);
}

/* ------------------------------ lifecycle ------------------------------ */

pub fn set_visible(state: &mut State, visible: bool) {
    if state.visible == visible {
        return;
    }
    state.visible = visible;
    if visible {
        state.alpha.tween_to(1.0, POP_IN_DURATION, TweenType::OutQuint);
    } else {
        state.alpha.tween_to(0.0, POP_OUT_DURATION, TweenType::OutQuint);
    }
}

pub fn update(state: &mut State, dt: f32) {
    poll(state);
    state.alpha.update(dt);
}

/* ------------------------------- queries ------------------------------- */

#[inline(always)]
pub fn user(state: &State) -> Option<&ApiUser> {
    state.user.as_ref()
}

#[inline(always)]
pub fn requested(state: &State) -> Option<&UserRef> {
    state.requested.as_ref()
}

#[inline(always)]
pub const fn is_loading(state: &State) -> bool {
    state.loading
}

#[inline(always)]
pub const fn is_fetching(state: &State) -> bool {
    state.fetch.is_some()
}

#[inline(always)]
pub fn sections(state: &State) -> &[Section] {
    &state.scroller.sections
}

#[inline(always)]
pub fn tab_items(state: &State) -> &[SectionKind] {
    &state.tabs.items
}

#[inline(always)]
pub const fn current_tab(state: &State) -> Option<SectionKind> {
    state.tabs.current
}

#[inline(always)]
pub const fn last_section(state: &State) -> Option<SectionKind> {
    state.last_section
}

#[inline(always)]
pub const fn scroll_position(state: &State) -> f32 {
    state.scroller.scroll
}

#[inline(always)]
pub fn alpha(state: &State) -> f32 {
    state.alpha.value()
}

/* ------------------------------- drawing ------------------------------- */

fn text(offset: [f32; 2], content: &str, color: [f32; 4], zoom: f32, z: i16) -> Actor {
    Actor::Text {
        align: [0.0, 0.0],
        offset,
        color,
        font: "miso",
        content: content.into(),
        align_text: TextAlign::Left,
        z,
        scale: [zoom, zoom],
    }
}

pub fn get_actors(state: &State, origin: [f32; 2], width: f32) -> Vec<Actor> {
    let alpha = state.alpha.value();
    if alpha <= 0.0 {
        return Vec::new();
    }

    let mut children = Vec::new();

    let header = match (&state.user, &state.requested) {
        (Some(u), _) => u.username.clone(),
        (None, Some(r)) if state.loading => format!("{} (loading...)", r.username),
        (None, Some(r)) => r.username.clone(),
        (None, None) => String::new(),
    };
    children.push(text([24.0, 40.0], &header, color::WHITE, 1.0, 2));

    for (i, kind) in state.tabs.items.iter().enumerate() {
        let tint = if state.tabs.current == Some(*kind) {
            color::TAB_ACTIVE_RGBA
        } else {
            color::TAB_IDLE_RGBA
        };
        children.push(text(
            [24.0 + TAB_W * i as f32, HEADER_H + 8.0],
            kind.title(),
            tint,
            0.7,
            2,
        ));
    }

    let content_y = HEADER_H + TAB_H;
    let view_top = state.scroller.scroll;
    let view_bottom = view_top + state.scroller.viewport_h;
    for s in &state.scroller.sections {
        if s.top + s.height < view_top || s.top > view_bottom {
            continue;
        }
        children.push(Actor::Frame {
            align: [0.0, 0.0],
            offset: [0.0, content_y + s.top - view_top],
            size: [SizeSpec::Fill, SizeSpec::Px(s.height)],
            children: vec![text(
                [24.0, SECTION_TITLE_PAD],
                s.kind.title(),
                color::WHITE,
                0.9,
                1,
            )],
            background: None,
            // Higher priority draws on top.
            z: s.priority.clamp(i16::MIN as i32, i16::MAX as i32) as i16,
        });
    }

    let mut frame = Actor::Frame {
        align: [0.0, 0.0],
        offset: origin,
        size: [
            SizeSpec::Px(width),
            SizeSpec::Px(content_y + state.scroller.viewport_h),
        ],
        children,
        background: Some(Background::Color(color::OVERLAY_BG_RGBA)),
        z: 200,
    };
    frame.fade(alpha);
    vec![frame]
}
