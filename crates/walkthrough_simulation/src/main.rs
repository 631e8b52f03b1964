//! Headless walkthrough demo
//!
//! Коридор (пол + две стены), три landmark'а, scripted joystick.
//! Без рендера: только лог enter/leave и финальная позиция dolly.

use std::time::Duration;

use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;
use bevy_rapier3d::prelude::Collider;
use rand::Rng;

use walkthrough_simulation::logger;
use walkthrough_simulation::{
    create_headless_app, spawn_dolly, CollisionProxy, DeterministicRng, Dolly, Joystick,
    LandmarkEntered, LandmarkLeft, LandmarkTable, WalkthroughPlugin, WalkthroughSet,
};

const LANDMARKS_JSON: &str = r#"{
    "Reception": { "name": "Reception", "info": "Visitor registration and campus maps." },
    "Library": { "name": "Library", "info": "Open 8:00-22:00. Quiet zone on the second floor." },
    "Auditorium": { "name": "Main Auditorium", "info": "Lectures and events, 300 seats." }
}"#;

/// Коридор вдоль -Z: ширина 4, длина 40
const CORRIDOR_HALF_WIDTH: f32 = 2.0;
const CORRIDOR_HALF_LENGTH: f32 = 20.0;

const TICKS: u32 = 600;

fn main() {
    let seed = 42;
    println!("Starting walkthrough headless demo (seed: {})", seed);

    let table = match LandmarkTable::from_json(LANDMARKS_JSON) {
        Ok(table) => table,
        Err(err) => {
            logger::log_error(&format!("Landmark table load failed: {}", err));
            return;
        }
    };

    let mut app = create_headless_app(seed);
    app.insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_secs_f32(
        1.0 / 60.0,
    )))
    .insert_resource(corridor_proxy())
    .insert_resource(table)
    .insert_resource(Joystick::default())
    .add_plugins(WalkthroughPlugin)
    .add_systems(Startup, setup_scene)
    .add_systems(Update, scripted_joystick.before(WalkthroughSet::Input))
    .add_systems(Update, report_landmarks.after(WalkthroughSet::Proximity));

    for tick in 0..TICKS {
        app.update();

        if tick % 100 == 0 {
            let mut dolly = app.world_mut().query_filtered::<&Transform, With<Dolly>>();
            if let Ok(transform) = dolly.single(app.world()) {
                println!("Tick {}: dolly at {:?}", tick, transform.translation);
            }
        }
    }

    println!("Demo complete!");
}

/// Пол на y = 0 + стены по x = ±CORRIDOR_HALF_WIDTH
fn corridor_proxy() -> CollisionProxy {
    let wall = Collider::cuboid(0.1, 2.0, CORRIDOR_HALF_LENGTH);
    CollisionProxy::at_origin(Collider::compound(vec![
        (
            Vec3::new(0.0, -0.05, 0.0),
            Quat::IDENTITY,
            Collider::cuboid(CORRIDOR_HALF_WIDTH + 1.0, 0.05, CORRIDOR_HALF_LENGTH),
        ),
        (
            Vec3::new(-CORRIDOR_HALF_WIDTH - 0.1, 2.0, 0.0),
            Quat::IDENTITY,
            wall.clone(),
        ),
        (
            Vec3::new(CORRIDOR_HALF_WIDTH + 0.1, 2.0, 0.0),
            Quat::IDENTITY,
            wall,
        ),
    ]))
}

fn setup_scene(mut commands: Commands) {
    spawn_dolly(&mut commands, Vec3::new(0.0, 0.0, CORRIDOR_HALF_LENGTH - 2.0));

    // Scene nodes с именами из landmark таблицы
    for (name, position) in [
        ("Reception", Vec3::new(1.5, 0.0, 12.0)),
        ("Library", Vec3::new(-1.5, 0.0, 0.0)),
        ("Auditorium", Vec3::new(0.0, 0.0, -15.0)),
    ] {
        commands.spawn((Name::new(name), Transform::from_translation(position)));
    }
}

/// Joystick "пользователь": в основном идёт вперёд, иногда подруливает
fn scripted_joystick(mut rng: ResMut<DeterministicRng>, mut joystick: ResMut<Joystick>) {
    if rng.rng.gen_bool(0.05) {
        joystick.turn = rng.rng.gen_range(-0.3..0.3);
    }
    joystick.forward = if rng.rng.gen_bool(0.9) { 1.0 } else { 0.0 };
}

fn report_landmarks(mut entered: EventReader<LandmarkEntered>, mut left: EventReader<LandmarkLeft>) {
    for event in entered.read() {
        println!(
            "  panel: {}: {} (at {:?})",
            event.display_name, event.info, event.panel.position
        );
    }
    for event in left.read() {
        println!("  panel hidden: {}", event.key);
    }
}
