//! Immediate-mode drawing of the arena with gizmos.
//!
//! Reads the store and run state, never writes them. Runs after the tick so a
//! frame shows the state the tick just produced.

use bevy::color::palettes::css;
use bevy::prelude::*;
use bevy::window::PrimaryWindow;

use crate::common::state::{RunPhase, RunState};
use crate::common::tunables::Tunables;
use crate::plugins::camera::to_world;
use crate::plugins::core::ArenaSystems;
use crate::plugins::input::TargetLock;
use crate::plugins::snapshot::HudPublisher;
use crate::plugins::store::{Enemy, EnemyKind, EntityStore, ItemKind};

const BAR_HEIGHT: f32 = 4.0;

pub fn plugin(app: &mut App) {
    app.add_systems(Update, (draw_arena, update_title).after(ArenaSystems::Publish));
}

fn item_color(kind: ItemKind) -> Color {
    match kind {
        ItemKind::Heal => css::RED.into(),
        ItemKind::Strength => css::DODGER_BLUE.into(),
        ItemKind::Weapon => css::GOLD.into(),
    }
}

fn draw_arena(
    mut gizmos: Gizmos,
    tunables: Res<Tunables>,
    store: Res<EntityStore>,
    lock: Res<TargetLock>,
) {
    let arena = &tunables.arena;
    let w = |p: Vec2| to_world(arena, p);

    gizmos.rect_2d(Isometry2d::IDENTITY, arena.size(), css::DIM_GRAY);

    for p in store.particles() {
        gizmos.circle_2d(w(p.body.pos), p.body.size.x * 0.5, css::WHITE_SMOKE);
    }
    for item in store.items() {
        gizmos.rect_2d(w(item.body.pos), item.body.size, item_color(item.kind));
    }
    for p in store.projectiles() {
        gizmos.circle_2d(w(p.body.pos), p.body.size.x * 0.5, css::YELLOW);
    }
    for e in store.hostiles() {
        draw_hostile(&mut gizmos, w(e.body.pos), e);
    }

    if let Some(target) = lock.target().and_then(|id| store.hostile(id)) {
        let r = target.body.size.x * 0.5 + 6.0;
        gizmos.circle_2d(w(target.body.pos), r, css::ORANGE_RED);
    }

    let player = &store.player;
    gizmos.circle_2d(w(player.body.pos), player.body.size.x * 0.5, css::DEEP_SKY_BLUE);
}

fn draw_hostile(gizmos: &mut Gizmos, at: Vec2, e: &Enemy) {
    let color = match e.kind {
        EnemyKind::Zombie => css::SEA_GREEN,
        EnemyKind::Boss => css::CRIMSON,
    };
    gizmos.rect_2d(at, e.body.size, color);

    // Health bar above the body.
    let width = e.body.size.x;
    let left = at + Vec2::new(-width * 0.5, e.body.size.y * 0.5 + BAR_HEIGHT);
    let frac = (e.hp / e.max_hp).clamp(0.0, 1.0);
    gizmos.line_2d(left, left + Vec2::X * width, css::DARK_RED);
    gizmos.line_2d(left, left + Vec2::X * width * frac, css::LIME);
}

fn update_title(
    run: Res<RunState>,
    publisher: Res<HudPublisher>,
    mut window: Single<&mut Window, With<PrimaryWindow>>,
) {
    let Some(hud) = publisher.latest() else { return };
    let status = match run.phase {
        RunPhase::Playing => String::new(),
        RunPhase::GameOver => " | GAME OVER (R to restart)".to_owned(),
        RunPhase::Won => " | YOU WIN (R to restart)".to_owned(),
    };
    let title = format!(
        "Day {} | HP {}/{} | STR {} | WPN {} | Score {}{}",
        hud.stage, hud.hp, hud.max_hp, hud.strength, hud.weapon_level, hud.score, status
    );
    if window.title != title {
        window.title = title;
    }
}
