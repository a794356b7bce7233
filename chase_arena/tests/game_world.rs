mod support;

use chase_arena::domain::tuning::MonsterTuning;
use chase_arena::domain::{Entity, EntityKind, Rect, Registrar, Strategy, Vec2};
use chase_arena::interface_adapters::assets::{FallbackAssetLoader, ImageAssetLoader};
use chase_arena::interface_adapters::protocol::FrameSnapshotDto;
use chase_arena::interface_adapters::render::{CanvasRenderer, Frame};
use chase_arena::use_cases::{Game, GameSettings};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::rc::Rc;
use support::{NoInput, asset};

fn new_game(spawn_chance_percent: u32) -> (Game, tempfile::TempDir) {
    // Empty directory: every sprite falls back to a placeholder.
    let dir = tempfile::tempdir().expect("tempdir");
    let loader = FallbackAssetLoader::new(ImageAssetLoader::new(dir.path()));
    let settings = GameSettings {
        spawn_chance_percent,
        ..GameSettings::default()
    };
    let game = Game::new(settings, &loader, Rc::new(NoInput), StdRng::seed_from_u64(7))
        .expect("game should build with placeholder art");
    (game, dir)
}

#[test]
fn when_game_starts_then_player_is_live_after_first_step_at_screen_center() {
    let (mut game, _dir) = new_game(0);
    assert!(game.entities().is_empty());

    game.step();

    let player = game
        .entities()
        .get(game.player_id())
        .expect("player registered on the first step");
    assert_eq!(player.kind(), EntityKind::Player);
    assert_eq!(player.center(), Vec2::new(800.0, 450.0));
    assert_eq!(player.rect, Rect::new(750.0, 400.0, 100.0, 100.0));
    assert_eq!(game.entities().count_of(EntityKind::Monster), 0);
    assert_eq!(game.frame(), 1);
}

#[test]
fn when_spawn_roll_always_succeeds_then_each_step_spawns_one_monster_per_edge() {
    let (mut game, _dir) = new_game(101);

    game.step();
    assert_eq!(game.entities().count_of(EntityKind::Monster), 2);

    let screen_height = game.settings().screen_height as f32;
    for monster in game.entities().of_kind(EntityKind::Monster) {
        assert!((0.0..=screen_height).contains(&monster.y()));
    }
    let mut centers_x: Vec<f32> = game
        .entities()
        .of_kind(EntityKind::Monster)
        .map(|m| m.center().x)
        .collect();
    centers_x.sort_by(f32::total_cmp);
    // Spawned this step, so each has already taken one chase step inward.
    let grunt = MonsterTuning::grunt();
    let brute = MonsterTuning::brute();
    assert_eq!(centers_x, vec![grunt.speed, 1600.0 - brute.speed]);

    game.step();
    assert_eq!(game.entities().count_of(EntityKind::Monster), 4);
}

#[test]
fn when_monster_reaches_player_then_game_is_over() {
    let (mut game, _dir) = new_game(0);
    let center = Vec2::new(800.0, 450.0);
    let mut killer = Entity::monster(asset(0.0, 0.0, 100.0), 0.0, Strategy::ChasePlayer);
    killer.rect.set_center(center);
    game.manager_mut().register(killer);

    game.step();

    assert!(game.info().game_over);
    assert!(!game.entities().contains(game.player_id()));
    assert_eq!(game.info().kills, 0);
}

#[test]
fn when_projectile_hits_monster_then_kill_count_rises() {
    let (mut game, _dir) = new_game(0);
    game.manager_mut().register(Entity::monster(
        asset(100.0, 100.0, 20.0),
        0.0,
        Strategy::ChasePlayer,
    ));
    game.manager_mut().register(Entity::projectile(
        asset(105.0, 105.0, 10.0),
        0.0,
        Vec2::ZERO,
        5,
    ));

    game.step();

    assert_eq!(game.info().kills, 1);
    assert!(!game.info().game_over);
    assert_eq!(game.entities().count_of(EntityKind::Monster), 0);
}

#[test]
fn when_game_is_rendered_then_overlays_and_snapshot_reflect_the_world() {
    let (mut game, _dir) = new_game(0);
    game.step();
    let mut frame = Frame::new(1600, 900);

    game.render(&mut CanvasRenderer, &mut frame);

    assert_eq!(frame.overlays().len(), 1);
    assert_eq!(frame.overlays()[0].text, "0");
    assert_ne!(frame.pixels().get_pixel(800, 450).0, [255, 255, 255, 255]);

    let snapshot = FrameSnapshotDto::from(&game);
    assert_eq!(snapshot.frame, 1);
    assert_eq!(snapshot.entities.len(), 1);
    assert_eq!(snapshot.entities[0].kind, EntityKind::Player);
}
