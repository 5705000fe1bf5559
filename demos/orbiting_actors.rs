//! Headless walk-through of a small actor hierarchy.
//!
//! A sun spins in place, a planet orbits it as a child, and a moon rides on
//! the planet. A door actor only opens when its trigger key goes down.
//! Run with `RUST_LOG=debug` to see animation start/complete events.

use std::f32::consts::TAU;

use glam::Vec3;
use marionette::animation::{AnimationMode, Pose, TrackBuilder};
use marionette::input::Key;
use marionette::scene::RenderBinding;
use marionette::{Engine, Settings};

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let settings = match std::env::args().nth(1) {
        Some(path) => Settings::from_json_str(&std::fs::read_to_string(path)?)?,
        None => Settings::default(),
    };
    let mut engine = Engine::new(settings);

    let spin = TrackBuilder::new()
        .keyframe(0.0, Pose::IDENTITY)
        .keyframe(4.0, Pose::IDENTITY.with_rotation(Vec3::new(0.0, TAU, 0.0)))
        .duration(4.0)
        .build()?;

    let sun = engine
        .scene
        .spawn_actor("sun")
        .track(spin.clone())
        .mode(AnimationMode::Continuous)
        .render_binding(RenderBinding { mesh: 0, texture: 0 })
        .spawn()?;

    let planet = engine
        .scene
        .spawn_actor("planet")
        .pose(Pose::from_translation(Vec3::new(4.0, 0.0, 0.0)).with_scale(Vec3::splat(0.5)))
        .parent(sun)
        .render_binding(RenderBinding { mesh: 0, texture: 1 })
        .spawn()?;

    engine
        .scene
        .spawn_actor("moon")
        .pose(Pose::from_translation(Vec3::new(1.5, 0.0, 0.0)).with_scale(Vec3::splat(0.3)))
        .parent(planet)
        .render_binding(RenderBinding::untextured(0))
        .spawn()?;

    let open = TrackBuilder::new()
        .keyframe(0.0, Pose::from_translation(Vec3::new(0.0, 0.0, 8.0)))
        .keyframe(0.5, Pose::from_translation(Vec3::new(0.0, 2.0, 8.0)))
        .keyframe(1.5, Pose::from_translation(Vec3::new(0.0, 2.0, 8.0)))
        .keyframe(2.0, Pose::from_translation(Vec3::new(0.0, 0.0, 8.0)))
        .duration(2.0)
        .build()?;
    let door = engine
        .scene
        .spawn_actor("door")
        .pose(Pose::from_translation(Vec3::new(0.0, 0.0, 8.0)))
        .track(open)
        .trigger_key(Key::O)
        .render_binding(RenderBinding::untextured(1))
        .spawn()?;

    let viewer = engine
        .scene
        .spawn_actor("viewer")
        .pose(Pose::from_translation(Vec3::new(0.0, 0.0, -12.0)))
        .spawn()?;
    engine.set_viewer(viewer);

    let dt = 1.0 / 60.0;
    for frame in 0..360 {
        match frame {
            60 => engine.input.press(Key::O),
            61 => engine.input.release(Key::O),
            120 => engine.input.press(Key::W),
            180 => engine.input.release(Key::W),
            _ => {}
        }

        engine.frame(dt);

        if frame % 60 == 0 {
            for item in engine.render_list() {
                let p = item.uniforms.model.w_axis.truncate();
                log::info!(
                    "frame {frame:3} {} mesh={} at ({:6.2}, {:6.2}, {:6.2})",
                    item.actor,
                    item.binding.mesh,
                    p.x,
                    p.y,
                    p.z
                );
            }
        }
    }

    log::info!(
        "{} frames, {:.2}s simulated, door animating: {}",
        engine.frame_count(),
        engine.time(),
        engine.scene.actor(door).is_some_and(marionette::Actor::is_animating)
    );
    Ok(())
}
