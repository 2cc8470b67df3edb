use cgmath::{Deg, Point3, Vector3};
use voxel_sandbox::{
    application_state::input_state::{InputAction, ProcessedInputState, RawInputState},
    config::EngineConfig,
    engine_state::{
        player_state::GameMode,
        voxels::{
            block::block_type::BlockType,
            chunk::chunk_generation::ChunkGenerator,
            world::{BlockPosition, World},
        },
        EngineEvent, EngineState,
    },
};

const DT: f32 = 1.0 / 60.0;

/// A 16x16 slab filling chunk (0, 0): stone at y = 0 and dirt up to y = 3.
fn slab_world() -> World {
    let mut world = World::new();
    for x in 0..16 {
        for z in 0..16 {
            world.set(Point3::new(x, 0, z), BlockType::Stone);
            for y in 1..=3 {
                world.set(Point3::new(x, y, z), BlockType::Dirt);
            }
        }
    }
    world
}

fn slab_config(spawn: [f32; 3]) -> EngineConfig {
    let mut config = EngineConfig::default();
    config.world.chunk_load_distance = 0;
    config.world.spawn_position = spawn;
    config
}

fn slab_engine() -> EngineState {
    let mut engine_state = EngineState::from_snapshot(slab_config([8.5, 4.0, 8.5]), slab_world());
    engine_state.update(DT);
    engine_state.rebuild_mesh_if_dirty();
    engine_state.drain_events();
    engine_state
}

fn tick(engine_state: &mut EngineState, input: ProcessedInputState, ticks: usize) {
    for _ in 0..ticks {
        engine_state.set_input_commands(input.clone());
        engine_state.update(DT);
    }
}

fn press(action: InputAction) -> ProcessedInputState {
    ProcessedInputState::default().with_action(action, RawInputState::Pressed)
}

#[test]
fn generated_chunk_has_grass_and_inner_trees() {
    for seed in 0..16 {
        let mut world = World::new();
        ChunkGenerator::new(seed, 8).generate_chunk(&mut world, 0, 0);

        for x in 0..16 {
            for z in 0..16 {
                assert_eq!(world.get(Point3::new(x, 8, z)), Some(BlockType::GrassBlock));
            }
        }
        for (position, block_type) in world.iter() {
            if matches!(block_type, BlockType::OakLog | BlockType::BirchLog) {
                assert!((2..=13).contains(&position.x), "log at {:?}", position);
                assert!((2..=13).contains(&position.z), "log at {:?}", position);
            }
        }
    }
}

#[test]
fn avatar_rests_on_slab() {
    let mut engine_state = slab_engine();
    tick(&mut engine_state, ProcessedInputState::default(), 60);

    let player = engine_state.player();
    assert!(player.on_ground);
    assert_eq!(player.position.x, 8.5);
    assert_eq!(player.position.z, 8.5);
    assert_eq!(player.position.y.floor() as i32, 4);
    assert!(!engine_state.is_dirty());
}

#[test]
fn place_then_mine_restores_world() {
    let mut engine_state = slab_engine();
    let before = engine_state.world().clone();
    let position = Point3::new(11, 4, 8);

    assert!(engine_state.place(position, BlockType::OakPlanks));
    assert!(engine_state.is_dirty());
    assert!(!engine_state.place(position, BlockType::Stone));
    assert_eq!(engine_state.mine(position), Some(BlockType::OakPlanks));
    assert_eq!(engine_state.world(), &before);
}

#[test]
fn place_at_target_uses_struck_face() {
    let mut engine_state = slab_engine();
    assert!(engine_state.place(Point3::new(8, 5, 5), BlockType::Cobblestone));

    let hit = engine_state.target().unwrap();
    assert_eq!(hit.position, Point3::new(8, 5, 5));
    assert_eq!(hit.normal, Vector3::new(0, 0, 1));

    assert!(engine_state.place_at_target(BlockType::BirchPlanks));
    assert_eq!(engine_state.world().get(Point3::new(8, 5, 6)), Some(BlockType::BirchPlanks));
    assert!(engine_state.drain_events().contains(&EngineEvent::BlockPlaced {
        position: Point3::new(8, 5, 6),
        block_type: BlockType::BirchPlanks,
    }));
}

#[test]
fn place_refuses_avatar_cell() {
    let mut engine_state = slab_engine();
    engine_state.look(Deg(0.0), Deg(-90.0));

    assert_eq!(engine_state.target().unwrap().position, Point3::new(8, 3, 8));
    assert!(!engine_state.place_at_target(BlockType::Dirt));
    assert!(!engine_state.world().contains(Point3::new(8, 4, 8)));
}

#[test]
fn crafting_table_is_used_not_built_on() {
    let mut engine_state = slab_engine();
    assert!(engine_state.place(Point3::new(8, 5, 5), BlockType::CraftingTable));

    assert!(!engine_state.place_at_target(BlockType::Dirt));
    assert!(!engine_state.world().contains(Point3::new(8, 5, 6)));
    assert_eq!(
        engine_state.drain_events(),
        vec![EngineEvent::CraftingTableUsed(Point3::new(8, 5, 5))]
    );
}

#[test]
fn survival_mining_waits_for_break_time() {
    let mut engine_state = slab_engine();
    engine_state.look(Deg(0.0), Deg(-90.0));
    let below: BlockPosition = Point3::new(8, 3, 8);

    tick(&mut engine_state, press(InputAction::Attack), 1);
    assert_eq!(engine_state.mining_progress(), Some((below, 0)));
    assert_eq!(engine_state.breaking_overlay().face_count(), 6);

    let held = ProcessedInputState::holding(&[InputAction::Attack]);
    tick(&mut engine_state, held.clone(), 20);
    assert!(engine_state.world().contains(below));
    let (_, stage) = engine_state.mining_progress().unwrap();
    assert!(stage >= 5 && stage < 9, "stage {stage}");

    tick(&mut engine_state, held, 15);
    assert!(!engine_state.world().contains(below));
    assert!(engine_state.mining_progress().is_none());
    assert!(engine_state.breaking_overlay().is_empty());
    assert!(engine_state.drain_events().contains(&EngineEvent::BlockMined {
        position: below,
        block_type: BlockType::Dirt,
        game_mode: GameMode::Survival,
    }));
}

#[test]
fn releasing_attack_cancels_mining() {
    let mut engine_state = slab_engine();
    engine_state.look(Deg(0.0), Deg(-90.0));

    tick(&mut engine_state, press(InputAction::Attack), 1);
    tick(&mut engine_state, ProcessedInputState::holding(&[InputAction::Attack]), 10);
    tick(&mut engine_state, ProcessedInputState::default(), 60);

    assert!(engine_state.world().contains(Point3::new(8, 3, 8)));
    assert!(engine_state.mining_progress().is_none());
}

#[test]
fn creative_mining_is_instant() {
    let mut engine_state = slab_engine();
    engine_state.set_game_mode(GameMode::Creative);
    engine_state.look(Deg(0.0), Deg(-90.0));
    engine_state.drain_events();

    assert!(engine_state.attack());
    assert!(!engine_state.world().contains(Point3::new(8, 3, 8)));
    assert_eq!(
        engine_state.drain_events(),
        vec![EngineEvent::BlockMined {
            position: Point3::new(8, 3, 8),
            block_type: BlockType::Dirt,
            game_mode: GameMode::Creative,
        }]
    );
}

#[test]
fn stone_floor_cannot_be_mined() {
    let mut world = World::new();
    for x in 0..16 {
        for z in 0..16 {
            world.set(Point3::new(x, 0, z), BlockType::Stone);
        }
    }
    let mut engine_state = EngineState::from_snapshot(slab_config([8.5, 1.0, 8.5]), world);
    engine_state.look(Deg(0.0), Deg(-90.0));

    assert!(!engine_state.attack());
    engine_state.set_game_mode(GameMode::Creative);
    assert!(!engine_state.attack());
    assert_eq!(engine_state.world().get(Point3::new(8, 0, 8)), Some(BlockType::Stone));
}

#[test]
fn sneaking_stops_at_slab_edge() {
    let mut engine_state = EngineState::from_snapshot(slab_config([15.5, 4.0, 8.5]), slab_world());
    tick(&mut engine_state, ProcessedInputState::default(), 5);
    assert!(engine_state.player().on_ground);

    let input = ProcessedInputState::holding(&[InputAction::Right, InputAction::Sneak]);
    tick(&mut engine_state, input, 120);

    let player = engine_state.player();
    assert!(player.position.x + 0.3 < 16.0);
    assert!(player.on_ground);
    assert_eq!(player.position.y, 4.0);
}

#[test]
fn double_tap_jump_toggles_creative_flight() {
    let mut engine_state = slab_engine();
    engine_state.set_game_mode(GameMode::Creative);
    tick(&mut engine_state, ProcessedInputState::default(), 5);
    engine_state.drain_events();

    tick(&mut engine_state, press(InputAction::Jump), 1);
    tick(
        &mut engine_state,
        ProcessedInputState::default().with_action(InputAction::Jump, RawInputState::Released),
        2,
    );
    tick(&mut engine_state, press(InputAction::Jump), 1);

    assert!(engine_state.player().flying);
    assert!(engine_state
        .drain_events()
        .contains(&EngineEvent::FlightToggled(true)));
}

#[test]
fn falling_out_of_the_world_is_rescued() {
    let mut world = slab_world();
    for y in 0..=3 {
        world.remove(Point3::new(8, y, 8));
    }
    let mut engine_state = EngineState::from_snapshot(slab_config([8.5, 4.0, 8.5]), world);

    let mut rescued = false;
    for _ in 0..600 {
        engine_state.update(DT);
        rescued |= engine_state
            .drain_events()
            .iter()
            .any(|event| matches!(event, EngineEvent::PlayerRecovered(_)));
        if rescued {
            break;
        }
    }
    assert!(rescued);
    assert!(engine_state.player().position.y > 0.0);
}

#[test]
fn teleport_streams_new_chunks() {
    let mut config = EngineConfig::default();
    config.world.chunk_load_distance = 1;
    let mut engine_state = EngineState::new(config);
    engine_state.rebuild_mesh_if_dirty();
    let generated = engine_state.generated_chunk_count();

    engine_state.teleport(Point3::new(200.5, 20.0, 0.5));
    assert!(engine_state.is_dirty());
    assert_eq!(engine_state.generated_chunk_count(), generated + 9);
    assert!(engine_state.rebuild_mesh_if_dirty());
    assert!(engine_state.mesh().face_count() > 0);
}

#[test]
fn snapshot_round_trip_through_engine() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("saves").join("world.json");

    let mut engine_state = slab_engine();
    assert!(engine_state.place(Point3::new(3, 4, 3), BlockType::CraftingTable));
    engine_state.save_snapshot(&path).unwrap();

    let loaded = EngineState::load(slab_config([8.5, 4.0, 8.5]), &path);
    assert_eq!(loaded.world(), engine_state.world());
    assert_eq!(loaded.generated_chunk_count(), 1);
}

#[test]
fn malformed_snapshot_starts_a_fresh_world() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("world.json");
    std::fs::write(&path, r#"{"1,2": "stone"}"#).unwrap();

    let mut config = EngineConfig::default();
    config.world.chunk_load_distance = 0;
    let engine_state = EngineState::load(config, &path);

    assert_eq!(engine_state.generated_chunk_count(), 1);
    assert_eq!(engine_state.world().get(Point3::new(1, 0, 1)), Some(BlockType::Stone));
    assert_eq!(engine_state.world().get(Point3::new(1, 8, 1)), Some(BlockType::GrassBlock));
}
