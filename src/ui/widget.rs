//! Tagged-enum driver over the HUD widgets.
//!
//! Each widget keeps its own `State` and free functions; `Widget` only routes
//! events, ticks and actor requests to the right module.

use crate::game::judgment::Judgment;
use crate::game::user::UserRef;
use crate::ui::actors::Actor;
use crate::ui::components::profile_overlay::SectionKind;
use crate::ui::components::{health_bar, key_counter, profile_overlay};
use log::trace;

#[derive(Debug, Clone, PartialEq)]
pub enum WidgetEvent {
    Activate { forward: bool },
    Deactivate { forward: bool },
    Judgement(Judgment),
    Health(f32),
    ShowUser(UserRef),
    TabClicked(SectionKind),
    Scrolled(f32),
    SetVisible(bool),
}

pub enum Widget {
    KeyCounter {
        state: key_counter::State,
        center: [f32; 2],
    },
    HealthBar {
        state: health_bar::State,
        origin: [f32; 2],
    },
    ProfileOverlay {
        state: profile_overlay::State,
        origin: [f32; 2],
        width: f32,
    },
}

impl Widget {
    pub const fn kind_name(&self) -> &'static str {
        match self {
            Self::KeyCounter { .. } => "KeyCounter",
            Self::HealthBar { .. } => "HealthBar",
            Self::ProfileOverlay { .. } => "ProfileOverlay",
        }
    }

    /// Routes `event` to the widget. Returns `false` when the widget has no
    /// use for it.
    pub fn handle(&mut self, event: &WidgetEvent) -> bool {
        match (self, event) {
            (Self::KeyCounter { state, .. }, WidgetEvent::Activate { forward }) => {
                key_counter::activate(state, *forward);
            }
            (Self::KeyCounter { state, .. }, WidgetEvent::Deactivate { forward }) => {
                key_counter::deactivate(state, *forward);
            }
            (Self::HealthBar { state, .. }, WidgetEvent::Judgement(j)) => {
                health_bar::apply_judgement(state, j);
            }
            (Self::HealthBar { state, .. }, WidgetEvent::Health(v)) => {
                health_bar::set_health(state, *v);
            }
            (Self::ProfileOverlay { state, .. }, WidgetEvent::ShowUser(user)) => {
                profile_overlay::show_user(state, user.clone());
            }
            (Self::ProfileOverlay { state, .. }, WidgetEvent::TabClicked(kind)) => {
                profile_overlay::select_tab(state, *kind);
            }
            (Self::ProfileOverlay { state, .. }, WidgetEvent::Scrolled(y)) => {
                profile_overlay::set_scroll(state, *y);
            }
            (Self::ProfileOverlay { state, .. }, WidgetEvent::SetVisible(v)) => {
                profile_overlay::set_visible(state, *v);
            }
            (w, ev) => {
                trace!("{} ignores {ev:?}", w.kind_name());
                return false;
            }
        }
        true
    }

    pub fn update(&mut self, dt: f32) {
        match self {
            Self::KeyCounter { state, .. } => key_counter::update(state, dt),
            Self::HealthBar { state, .. } => health_bar::update(state, dt),
            Self::ProfileOverlay { state, .. } => profile_overlay::update(state, dt),
        }
    }

    pub fn actors(&self) -> Vec<Actor> {
        match self {
            Self::KeyCounter { state, center } => key_counter::get_actors(state, *center),
            Self::HealthBar { state, origin } => health_bar::get_actors(state, *origin),
            Self::ProfileOverlay {
                state,
                origin,
                width,
            } => profile_overlay::get_actors(state, *origin, *width),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WidgetId(usize);

/// Flat list of widgets drawn in insertion order.
#[derive(Default)]
pub struct Hud {
    widgets: Vec<Widget>,
}

impl Hud {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, widget: Widget) -> WidgetId {
        self.widgets.push(widget);
        WidgetId(self.widgets.len() - 1)
    }

    pub fn get(&self, id: WidgetId) -> Option<&Widget> {
        self.widgets.get(id.0)
    }

    pub fn len(&self) -> usize {
        self.widgets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.widgets.is_empty()
    }

    /// Sends `event` to one widget.
    pub fn send(&mut self, id: WidgetId, event: &WidgetEvent) -> bool {
        self.widgets.get_mut(id.0).is_some_and(|w| w.handle(event))
    }

    /// Sends `event` to every widget; returns how many took it.
    pub fn broadcast(&mut self, event: &WidgetEvent) -> usize {
        self.widgets.iter_mut().filter_map(|w| w.handle(event).then_some(())).count()
    }

    pub fn update(&mut self, dt: f32) {
        for w in &mut self.widgets {
            w.update(dt);
        }
    }

    pub fn actors(&self) -> Vec<Actor> {
        self.widgets.iter().flat_map(Widget::actors).collect()
    }
}
