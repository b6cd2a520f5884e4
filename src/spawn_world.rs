//! Visual dressing of the park: ground, props, fence, bridge, lights and
//! avatar meshes.
//!
//! Avatars are built from primitive shapes; the simulation entities spawned
//! by [`ParkPlugin`](crate::ParkPlugin) gain their meshes here as soon as
//! they appear.

use std::f32::consts::FRAC_PI_2;

use bevy::prelude::*;

use crate::numeric::{expect_f32, seed_to_f64};
use crate::scenery::{self, PropKind, BRIDGE_CENTRE, POND_CENTRE, POND_RADIUS};
use crate::sim_sync::{ArmPivot, AvatarBody, NpcAvatar, PlayerAvatar};
use crate::ARENA_BOUND;

/// Shared meshes and materials for avatars.
#[derive(Resource, Debug, Clone)]
pub struct AvatarAssets {
    torso: Handle<Mesh>,
    head: Handle<Mesh>,
    arm: Handle<Mesh>,
    skin: Handle<StandardMaterial>,
    player: Handle<StandardMaterial>,
}

struct PropAssets {
    trunk: Handle<Mesh>,
    canopy: Handle<Mesh>,
    rock: Handle<Mesh>,
    flower: Handle<Mesh>,
    stem: Handle<Mesh>,
    cap: Handle<Mesh>,
    bark: Handle<StandardMaterial>,
    leaves: Handle<StandardMaterial>,
    stone: Handle<StandardMaterial>,
    petals: Handle<StandardMaterial>,
    mushroom: Handle<StandardMaterial>,
}

fn material(materials: &mut Assets<StandardMaterial>, color: Color) -> Handle<StandardMaterial> {
    materials.add(StandardMaterial {
        base_color: color,
        perceptual_roughness: 0.9,
        ..default()
    })
}

/// Spawns the static park and registers [`AvatarAssets`].
pub fn spawn_world_system(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let size = ARENA_BOUND * 2.0 + 12.0;
    commands.spawn((
        Name::new("Ground"),
        Mesh3d(meshes.add(Plane3d::default().mesh().size(size, size))),
        MeshMaterial3d(material(&mut materials, Color::srgb(0.45, 0.72, 0.38))),
    ));

    let path = material(&mut materials, Color::srgb(0.86, 0.78, 0.6));
    for (name, extent) in [
        ("PathNorthSouth", Vec3::new(3.0, 0.02, size)),
        ("PathEastWest", Vec3::new(size, 0.02, 3.0)),
    ] {
        commands.spawn((
            Name::new(name),
            Mesh3d(meshes.add(Cuboid::from_size(extent))),
            MeshMaterial3d(path.clone()),
            Transform::from_xyz(0.0, 0.01, 0.0),
        ));
    }

    commands.spawn((
        Name::new("Pond"),
        Mesh3d(meshes.add(Cylinder::new(POND_RADIUS, 0.04))),
        MeshMaterial3d(material(&mut materials, Color::srgb(0.35, 0.6, 0.85))),
        Transform::from_xyz(POND_CENTRE.x, 0.02, POND_CENTRE.y),
    ));

    let props = PropAssets {
        trunk: meshes.add(Cylinder::new(0.18, 1.6)),
        canopy: meshes.add(Sphere::new(1.1)),
        rock: meshes.add(Sphere::new(0.6)),
        flower: meshes.add(Sphere::new(0.12)),
        stem: meshes.add(Cylinder::new(0.02, 0.3)),
        cap: meshes.add(Cone::new(0.22, 0.18)),
        bark: material(&mut materials, Color::srgb(0.45, 0.3, 0.18)),
        leaves: material(&mut materials, Color::srgb(0.25, 0.55, 0.25)),
        stone: material(&mut materials, Color::srgb(0.6, 0.6, 0.62)),
        petals: material(&mut materials, Color::srgb(0.95, 0.6, 0.75)),
        mushroom: material(&mut materials, Color::srgb(0.85, 0.25, 0.2)),
    };
    for prop in scenery::generate().into_iter().chain(scenery::pond_rocks()) {
        spawn_prop(&mut commands, &props, prop);
    }

    let lawn = material(&mut materials, Color::srgb(0.29, 0.55, 0.25));
    for patch in scenery::grass_patches() {
        commands.spawn((
            Name::new("GrassPatch"),
            Mesh3d(meshes.add(Circle::new(patch.radius))),
            MeshMaterial3d(lawn.clone()),
            Transform::from_xyz(patch.centre.x, 0.003, patch.centre.y).with_rotation(
                Quat::from_rotation_y(patch.rotation) * Quat::from_rotation_x(-FRAC_PI_2),
            ),
        ));
    }

    let wood = material(&mut materials, Color::srgb(0.4, 0.26, 0.13));
    spawn_fence(&mut commands, &mut meshes, &wood);
    spawn_bridge(&mut commands, &mut meshes, &mut materials, &wood);

    commands.insert_resource(AmbientLight {
        color: Color::srgb(0.69, 0.83, 0.95),
        brightness: 400.0,
        ..default()
    });

    commands.spawn((
        Name::new("Sun"),
        DirectionalLight {
            illuminance: 9_000.0,
            shadows_enabled: true,
            ..default()
        },
        Transform::from_xyz(15.0, 25.0, 10.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));
    commands.spawn((
        Name::new("FillLight"),
        DirectionalLight {
            illuminance: 2_500.0,
            color: Color::srgb(0.8, 0.85, 1.0),
            ..default()
        },
        Transform::from_xyz(-10.0, 12.0, -15.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));

    commands.insert_resource(AvatarAssets {
        torso: meshes.add(Capsule3d::new(0.28, 0.6)),
        head: meshes.add(Sphere::new(0.22)),
        arm: meshes.add(Capsule3d::new(0.07, 0.45)),
        skin: material(&mut materials, Color::srgb(0.96, 0.8, 0.66)),
        player: material(&mut materials, Color::srgb(0.95, 0.55, 0.2)),
    });
}

fn spawn_fence(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    wood: &Handle<StandardMaterial>,
) {
    let post = meshes.add(Cylinder::new(0.06, 0.8));
    for ground in scenery::fence_posts() {
        commands.spawn((
            Mesh3d(post.clone()),
            MeshMaterial3d(wood.clone()),
            Transform::from_xyz(ground.x, 0.4, ground.y),
        ));
    }
    for (start, end) in scenery::fence_sides() {
        let span = end - start;
        let middle = start.midpoint(end);
        let direction = Vec3::new(span.x, 0.0, span.y).normalize();
        let along = Quat::from_rotation_arc(Vec3::Y, direction);
        for (height, radius) in [(0.65, 0.03), (0.3, 0.025)] {
            commands.spawn((
                Mesh3d(meshes.add(Cylinder::new(radius, span.length()))),
                MeshMaterial3d(wood.clone()),
                Transform::from_xyz(middle.x, height, middle.y).with_rotation(along),
            ));
        }
    }
}

fn spawn_bridge(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
    wood: &Handle<StandardMaterial>,
) {
    let plank = meshes.add(Cuboid::new(1.6, 0.08, 0.35));
    let deck = material(materials, Color::srgb(0.63, 0.32, 0.18));
    let post = meshes.add(Cylinder::new(0.04, 0.7));
    let rail = meshes.add(Cylinder::new(0.03, 3.4));
    commands
        .spawn((
            Name::new("Bridge"),
            Transform::from_translation(BRIDGE_CENTRE),
            Visibility::default(),
        ))
        .with_children(|bridge| {
            for offset in scenery::bridge_plank_offsets() {
                bridge.spawn((
                    Mesh3d(plank.clone()),
                    MeshMaterial3d(deck.clone()),
                    Transform::from_xyz(0.0, 0.0, offset),
                ));
            }
            for side in [-0.75, 0.75] {
                for end in [-1.6, 1.6] {
                    bridge.spawn((
                        Mesh3d(post.clone()),
                        MeshMaterial3d(wood.clone()),
                        Transform::from_xyz(side, 0.4, end),
                    ));
                }
                bridge.spawn((
                    Mesh3d(rail.clone()),
                    MeshMaterial3d(wood.clone()),
                    Transform::from_xyz(side, 0.7, 0.0)
                        .with_rotation(Quat::from_rotation_x(FRAC_PI_2)),
                ));
            }
        });
}

fn spawn_prop(commands: &mut Commands, assets: &PropAssets, prop: scenery::Prop) {
    let root = Transform::from_translation(prop.position).with_scale(Vec3::splat(prop.scale));
    let name = Name::new(format!("{:?}", prop.kind));
    commands.spawn((name, root, Visibility::default())).with_children(|parent| match prop.kind {
        PropKind::Tree => {
            parent.spawn((
                Mesh3d(assets.trunk.clone()),
                MeshMaterial3d(assets.bark.clone()),
                Transform::from_xyz(0.0, 0.8, 0.0),
            ));
            parent.spawn((
                Mesh3d(assets.canopy.clone()),
                MeshMaterial3d(assets.leaves.clone()),
                Transform::from_xyz(0.0, 2.2, 0.0),
            ));
        }
        PropKind::Rock => {
            parent.spawn((
                Mesh3d(assets.rock.clone()),
                MeshMaterial3d(assets.stone.clone()),
                Transform::from_scale(Vec3::new(1.0, 0.6, 0.9)),
            ));
        }
        PropKind::Flower => {
            parent.spawn((
                Mesh3d(assets.stem.clone()),
                MeshMaterial3d(assets.leaves.clone()),
                Transform::from_xyz(0.0, 0.15, 0.0),
            ));
            parent.spawn((
                Mesh3d(assets.flower.clone()),
                MeshMaterial3d(assets.petals.clone()),
                Transform::from_xyz(0.0, 0.32, 0.0),
            ));
        }
        PropKind::Mushroom => {
            parent.spawn((
                Mesh3d(assets.stem.clone()),
                MeshMaterial3d(assets.bark.clone()),
                Transform::from_xyz(0.0, 0.15, 0.0).with_scale(Vec3::new(2.5, 1.0, 2.5)),
            ));
            parent.spawn((
                Mesh3d(assets.cap.clone()),
                MeshMaterial3d(assets.mushroom.clone()),
                Transform::from_xyz(0.0, 0.36, 0.0),
            ));
        }
    });
}

fn npc_colour(id: usize) -> Color {
    let hue = expect_f32(seed_to_f64(id * 47 % 360));
    Color::hsl(hue, 0.5, 0.6)
}

/// Attaches meshes to avatar entities spawned since the last frame.
#[expect(
    clippy::needless_pass_by_value,
    reason = "Bevy systems require parameters by value, not by reference."
)]
pub fn dress_avatars_system(
    mut commands: Commands,
    avatar_assets: Option<Res<AvatarAssets>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    players: Query<Entity, Added<PlayerAvatar>>,
    bodies: Query<Entity, Added<AvatarBody>>,
    arms: Query<Entity, Added<ArmPivot>>,
    npcs: Query<(Entity, &NpcAvatar), Added<NpcAvatar>>,
) {
    let Some(assets) = avatar_assets else {
        return;
    };

    for entity in &players {
        commands.entity(entity).insert(Visibility::default());
    }
    for entity in &bodies {
        spawn_figure(&mut commands, entity, &assets, assets.player.clone());
    }
    for entity in &arms {
        commands
            .entity(entity)
            .insert(Visibility::default())
            .with_children(|pivot| {
                pivot.spawn((
                    Mesh3d(assets.arm.clone()),
                    MeshMaterial3d(assets.skin.clone()),
                    Transform::from_xyz(0.0, -0.3, 0.0),
                ));
            });
    }
    for (entity, npc) in &npcs {
        let clothes = material(&mut materials, npc_colour(npc.0.0));
        spawn_figure(&mut commands, entity, &assets, clothes);
    }
}

fn spawn_figure(
    commands: &mut Commands,
    entity: Entity,
    assets: &AvatarAssets,
    clothes: Handle<StandardMaterial>,
) {
    commands
        .entity(entity)
        .insert(Visibility::default())
        .with_children(|figure| {
            figure.spawn((
                Mesh3d(assets.torso.clone()),
                MeshMaterial3d(clothes),
                Transform::from_xyz(0.0, 0.75, 0.0),
            ));
            figure.spawn((
                Mesh3d(assets.head.clone()),
                MeshMaterial3d(assets.skin.clone()),
                Transform::from_xyz(0.0, 1.5, 0.0),
            ));
        });
}
