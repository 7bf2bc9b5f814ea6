mod common;

use avian2d::prelude::TranslationInterpolation;
use bevy::prelude::*;
use bubble_climb::common::state::GameState;
use bubble_climb::plugins::bubbles::components::PooledBubble;
use bubble_climb::plugins::bubbles::pool::BubblePool;
use bubble_climb::plugins::level::LevelProgress;
use bubble_climb::plugins::player::Player;
use bubble_climb::plugins::world::Ground;

#[test]
fn boots_and_ticks() {
    let mut app = common::app_headless();

    for _ in 0..3 {
        app.update();
    }
}

#[test]
fn entering_the_game_spawns_player_ground_and_pool() {
    let mut app = common::app_headless();

    app.world_mut()
        .resource_mut::<NextState<GameState>>()
        .set(GameState::InGame);
    app.update();

    for _ in 0..5 {
        app.update();
    }

    let world = app.world_mut();
    let players = world
        .query::<(&Player, &TranslationInterpolation)>()
        .iter(world)
        .count();
    assert_eq!(players, 1, "Player should opt in to smoothing via TranslationInterpolation");

    assert_eq!(world.query::<&Ground>().iter(world).count(), 1);
    assert_eq!(world.query::<&PooledBubble>().iter(world).count(), 20);

    let pool = world.resource::<BubblePool>();
    assert_eq!(pool.available_len(), 20);
    assert_eq!(pool.on_loan_len(), 0);
    assert_eq!(world.resource::<LevelProgress>().level, 1);
}
