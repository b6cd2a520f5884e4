//! Systems moving data between the ECS and [`ParkSimulation`].

use bevy::prelude::*;
use log::{debug, info};

use crate::animation::{ClipMixer, MotionState};
use crate::input::{InputIntent, KeyBindings};
use crate::posture::arm_swing;
use crate::wander::Npc;

use super::{ArmPivot, ArmSide, AvatarBody, NpcAvatar, ParkSimulation, PlayerAvatar};

/// Spawns the player hierarchy and one entity per NPC.
///
/// The entities carry only transforms and markers. Meshes are attached by
/// the renderer when it is present.
#[expect(
    clippy::needless_pass_by_value,
    reason = "Bevy systems require parameters by value, not by reference."
)]
pub fn spawn_avatars_system(mut commands: Commands, sim: Res<ParkSimulation>) {
    let player = sim.player();
    commands
        .spawn((
            Name::new("Player"),
            PlayerAvatar,
            ClipMixer::new(player.motion),
            Transform::from_translation(player.position)
                .with_rotation(Quat::from_rotation_y(player.heading)),
        ))
        .with_children(|root| {
            root.spawn((Name::new("PlayerBody"), AvatarBody, Transform::default()))
                .with_children(|body| {
                    for side in [ArmSide::Left, ArmSide::Right] {
                        body.spawn((ArmPivot(side), Transform::from_translation(side.shoulder())));
                    }
                });
        });

    for npc in sim.crowd().iter() {
        commands.spawn((
            Name::new(format!("Npc{}", npc.id.0)),
            NpcAvatar(npc.id),
            ClipMixer::new(npc.state.phase.motion()),
            npc_transform(npc),
        ));
    }
    info!("spawned player and {} npcs", sim.crowd().len());
}

fn npc_transform(npc: &Npc) -> Transform {
    let ground = npc.state.position;
    Transform::from_xyz(ground.x, 0.0, ground.y)
        .with_rotation(Quat::from_rotation_y(npc.state.heading))
        .with_scale(Vec3::splat(npc.scale))
}

/// Folds this frame's key presses and releases into [`InputIntent`].
#[expect(
    clippy::needless_pass_by_value,
    reason = "Bevy systems require parameters by value, not by reference."
)]
pub fn capture_input_system(
    keyboard: Res<ButtonInput<KeyCode>>,
    bindings: Res<KeyBindings>,
    mut intent: ResMut<InputIntent>,
) {
    let snapshot = intent.as_mut();
    for key in keyboard.get_just_pressed() {
        bindings.handle_key(snapshot, *key, true);
    }
    for key in keyboard.get_just_released() {
        bindings.handle_key(snapshot, *key, false);
    }
}

/// Advances the simulation by the frame's delta time.
#[expect(
    clippy::needless_pass_by_value,
    reason = "Bevy systems require parameters by value, not by reference."
)]
pub fn step_simulation_system(
    time: Res<Time>,
    intent: Res<InputIntent>,
    mut sim: ResMut<ParkSimulation>,
) {
    sim.step(&intent, time.delta_secs());
}

/// Copies the player state onto the avatar hierarchy.
///
/// The root receives position and heading, the body the lean and bounce,
/// and the arm pivots the running pump. Missing entities are skipped.
#[expect(
    clippy::needless_pass_by_value,
    reason = "Bevy systems require parameters by value, not by reference."
)]
pub fn apply_player_outputs_system(
    sim: Res<ParkSimulation>,
    mut roots: Query<(&mut Transform, &mut ClipMixer), With<PlayerAvatar>>,
    mut bodies: Query<&mut Transform, (With<AvatarBody>, Without<PlayerAvatar>)>,
    mut arms: Query<(&ArmPivot, &mut Transform), (Without<AvatarBody>, Without<PlayerAvatar>)>,
) {
    let player = sim.player();
    let dt = sim.frame_dt();

    if let Ok((mut transform, mut mixer)) = roots.single_mut() {
        transform.translation = player.position;
        transform.rotation = Quat::from_rotation_y(player.heading);
        if mixer.play(player.motion) {
            debug!("player animation -> {:?}", player.motion);
        }
        mixer.advance(dt);
    }

    let pose = player.posture.body();
    for mut transform in &mut bodies {
        transform.translation.y = pose.bounce;
        transform.rotation = Quat::from_rotation_x(pose.lean);
    }

    let running = player.motion == MotionState::Run && player.grounded;
    let (left, right) = arm_swing(running, sim.elapsed(), sim.posture_settings());
    for (pivot, mut transform) in &mut arms {
        let angle = match pivot.0 {
            ArmSide::Left => left,
            ArmSide::Right => right,
        };
        transform.rotation = Quat::from_rotation_x(angle);
    }
}

/// Copies every NPC's state onto its entity.
#[expect(
    clippy::needless_pass_by_value,
    reason = "Bevy systems require parameters by value, not by reference."
)]
pub fn apply_npc_outputs_system(
    sim: Res<ParkSimulation>,
    mut npcs: Query<(&NpcAvatar, &mut Transform, &mut ClipMixer)>,
) {
    let dt = sim.frame_dt();
    for (avatar, mut transform, mut mixer) in &mut npcs {
        let Some(npc) = sim.crowd().get(avatar.0) else {
            continue;
        };
        *transform = npc_transform(npc);
        mixer.play(npc.state.phase.motion());
        mixer.advance(dt);
    }
}
