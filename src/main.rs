use rhythm_hud::assets::Skin;
use rhythm_hud::config;
use rhythm_hud::core::network::ApiClient;
use rhythm_hud::game::judgment::{JudgeGrade, Judgment};
use rhythm_hud::game::user::UserRef;
use rhythm_hud::ui::actors::{Actor, vertex_bytes};
use rhythm_hud::ui::components::{health_bar, key_counter, profile_overlay};
use rhythm_hud::ui::widget::{Hud, Widget, WidgetEvent};
use std::sync::Arc;

const FRAME_DT: f32 = 1.0 / 60.0;
const FRAMES: u32 = 180;
const OVERLAY_VIEWPORT_H: f32 = 480.0;

fn mesh_bytes(actors: &[Actor]) -> usize {
    actors
        .iter()
        .map(|a| match a {
            Actor::Mesh { vertices, .. } => vertex_bytes(vertices).len(),
            Actor::Frame { children, .. } => mesh_bytes(children),
            _ => 0,
        })
        .sum()
}

/// Scripted input for one frame of the demo run.
fn frame_events(frame: u32) -> Vec<WidgetEvent> {
    let mut out = Vec::new();
    match frame % 30 {
        0 => out.push(WidgetEvent::Activate { forward: true }),
        4 => out.push(WidgetEvent::Deactivate { forward: true }),
        _ => {}
    }
    match frame {
        20 | 50 | 140 => out.push(WidgetEvent::Judgement(Judgment::hit(JudgeGrade::Great, 12.0))),
        60 | 66 => {
            out.push(WidgetEvent::Health(0.9 - frame as f32 * 0.002));
            out.push(WidgetEvent::Judgement(Judgment::miss()));
        }
        120 => out.push(WidgetEvent::Health(0.95)),
        150 => out.push(WidgetEvent::Scrolled(320.0)),
        _ => {}
    }
    out
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Install logger immediately, then set runtime max level from config after loading it.
    let _ = env_logger::builder()
        .filter_level(log::LevelFilter::Trace)
        .try_init();
    // Startup default when config is missing or malformed.
    log::set_max_level(log::LevelFilter::Warn);

    config::load();
    let cfg = config::get();
    log::set_max_level(cfg.log_level.as_level_filter());

    let user_id = match std::env::args().nth(1) {
        Some(arg) => Some(arg.parse::<u64>().map_err(|e| format!("invalid user id '{arg}': {e}"))?),
        None => None,
    };

    let skin = Skin::from_dir(&cfg.skin_dir);
    let mut hud = Hud::new();
    for (i, trigger) in ["Z", "X"].into_iter().enumerate() {
        hud.push(Widget::KeyCounter {
            state: key_counter::init(trigger, &skin, key_counter::Colors::default()),
            center: [40.0, 300.0 + 52.0 * i as f32],
        });
    }
    let bar = hud.push(Widget::HealthBar {
        state: health_bar::init(
            health_bar::Params::from_config(&cfg),
            health_bar::Palette::default(),
        ),
        origin: [16.0, 16.0],
    });
    let overlay = hud.push(Widget::ProfileOverlay {
        state: profile_overlay::init(
            Arc::new(ApiClient::new(&cfg.api_base_url)),
            OVERLAY_VIEWPORT_H,
        ),
        origin: [0.0, 0.0],
        width: 800.0,
    });

    let user = match user_id {
        Some(id) => UserRef::new(id, format!("user {id}")),
        None => UserRef::new(1, "Guest"),
    };
    hud.send(overlay, &WidgetEvent::ShowUser(user));
    hud.send(overlay, &WidgetEvent::SetVisible(true));

    for frame in 0..FRAMES {
        for ev in frame_events(frame) {
            hud.broadcast(&ev);
        }
        hud.update(FRAME_DT);

        if frame % 30 == 29 {
            let actors = hud.actors();
            let nodes: usize = actors.iter().map(Actor::count).sum();
            log::info!(
                "t={:.2}s: {} top-level actors, {} nodes, {} mesh bytes",
                (frame + 1) as f32 * FRAME_DT,
                actors.len(),
                nodes,
                mesh_bytes(&actors)
            );
        }
    }

    if let Some(Widget::HealthBar { state, .. }) = hud.get(bar) {
        log::info!(
            "final health {:.2}, miss bar {:.2}, phase {:?}",
            health_bar::health(state),
            health_bar::displayed_miss(state),
            health_bar::phase(state)
        );
    }
    if let Some(Widget::ProfileOverlay { state, .. }) = hud.get(overlay) {
        log::info!(
            "profile: {:?}, tab {:?}, loading {}",
            profile_overlay::user(state).map(|u| u.username.as_str()),
            profile_overlay::current_tab(state),
            profile_overlay::is_loading(state)
        );
    }
    Ok(())
}
