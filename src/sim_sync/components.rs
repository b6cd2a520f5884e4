//! Marker components tying ECS entities to simulation actors.

use bevy::prelude::*;

use crate::wander::NpcId;

/// Root entity of the player avatar.
///
/// Its `Transform` carries position and heading.
#[derive(Component, Reflect, Default, Debug, Clone, Copy, PartialEq, Eq)]
#[reflect(Component, Default)]
pub struct PlayerAvatar;

/// Child of [`PlayerAvatar`] that carries the running lean and bounce.
#[derive(Component, Reflect, Default, Debug, Clone, Copy, PartialEq, Eq)]
#[reflect(Component, Default)]
pub struct AvatarBody;

/// Which arm an [`ArmPivot`] drives.
#[derive(Reflect, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArmSide {
    /// The avatar's left arm.
    Left,
    /// The avatar's right arm.
    Right,
}

impl ArmSide {
    /// Shoulder offset in body space.
    #[must_use]
    pub const fn shoulder(self) -> Vec3 {
        match self {
            Self::Left => Vec3::new(-0.32, 1.15, 0.0),
            Self::Right => Vec3::new(0.32, 1.15, 0.0),
        }
    }
}

/// Shoulder pivot under [`AvatarBody`]; rotated by the running arm pump.
#[derive(Component, Reflect, Debug, Clone, Copy, PartialEq, Eq)]
#[reflect(Component)]
pub struct ArmPivot(pub ArmSide);

/// Entity mirroring one NPC of the crowd.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct NpcAvatar(pub NpcId);
