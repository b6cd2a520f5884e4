//! Decorative prop placement.
//!
//! Props are scattered by a deterministic hash of their index, so the park
//! looks the same on every run. Placement keeps the central crossroads, the
//! two paths and the pond clear. Nothing in the simulation collides with
//! props; they exist purely for the renderer.

use glam::{Vec2, Vec3};

use crate::numeric::{expect_f32, seed_to_f64};

/// Centre of the pond on the ground plane (`y` is world Z).
pub const POND_CENTRE: Vec2 = Vec2::new(10.0, -10.0);
/// Radius of the pond's water surface.
pub const POND_RADIUS: f32 = 3.5;
/// Half-extent of the perimeter fence, just outside the arena.
pub const FENCE_BOUND: f32 = 25.0;
/// Posts per fence side; corners are shared.
pub const FENCE_POSTS_PER_SIDE: u16 = 10;
/// Deck centre of the footbridge over the pond's southern bank.
pub const BRIDGE_CENTRE: Vec3 = Vec3::new(10.0, 0.15, -6.0);
/// Planks along the bridge deck.
pub const BRIDGE_PLANKS: u16 = 8;

/// Pseudo-random value in `[0, 1)` derived from `seed`.
///
/// Uses `fract(sin(seed) * 10000)`, evaluated in `f64`.
///
/// # Examples
///
/// ```
/// use promenade::scenery::seeded_random;
/// let a = seeded_random(42.0);
/// assert_eq!(a, seeded_random(42.0));
/// assert!((0.0..1.0).contains(&a));
/// ```
#[must_use]
pub fn seeded_random(seed: f64) -> f64 {
    let x = seed.sin() * 10_000.0;
    x - x.floor()
}

/// Kind of decorative prop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PropKind {
    /// Trunk with a round canopy.
    Tree,
    /// Squashed boulder.
    Rock,
    /// Stem with a single bloom.
    Flower,
    /// Stem with a cone cap.
    Mushroom,
}

/// A placed prop.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Prop {
    /// What to draw.
    pub kind: PropKind,
    /// World position of the base.
    pub position: Vec3,
    /// Uniform scale.
    pub scale: f32,
}

#[derive(Debug, Clone, Copy)]
enum Keepout {
    /// Square of the given half-extent around the origin.
    Centre(f32),
    /// Strips of the given half-width along both axes.
    Paths(f32),
    /// Disc of the given radius around the pond.
    Pond(f32),
}

impl Keepout {
    fn contains(self, point: Vec2) -> bool {
        match self {
            Self::Centre(half) => point.x.abs() < half && point.y.abs() < half,
            Self::Paths(half) => point.x.abs() < half || point.y.abs() < half,
            Self::Pond(radius) => point.distance(POND_CENTRE) < radius,
        }
    }
}

struct ScatterRule {
    kind: PropKind,
    count: usize,
    seed_offset: usize,
    seed_stride: usize,
    half_extent: f64,
    height: f32,
    /// `(base, spread)`; props without one use scale 1.
    scale: Option<(f32, f32)>,
    keepouts: &'static [Keepout],
}

const RULES: [ScatterRule; 4] = [
    ScatterRule {
        kind: PropKind::Tree,
        count: 35,
        seed_offset: 0,
        seed_stride: 3,
        half_extent: 24.0,
        height: 0.0,
        scale: Some((0.7, 0.9)),
        keepouts: &[Keepout::Centre(4.0), Keepout::Paths(2.5), Keepout::Pond(6.0)],
    },
    ScatterRule {
        kind: PropKind::Rock,
        count: 20,
        seed_offset: 100,
        seed_stride: 5,
        half_extent: 23.0,
        height: 0.15,
        scale: Some((0.25, 0.55)),
        keepouts: &[Keepout::Centre(3.0)],
    },
    ScatterRule {
        kind: PropKind::Flower,
        count: 60,
        seed_offset: 200,
        seed_stride: 7,
        half_extent: 23.0,
        height: 0.0,
        scale: None,
        keepouts: &[Keepout::Centre(3.0), Keepout::Paths(2.5), Keepout::Pond(5.0)],
    },
    ScatterRule {
        kind: PropKind::Mushroom,
        count: 12,
        seed_offset: 300,
        seed_stride: 11,
        half_extent: 20.0,
        height: 0.0,
        scale: None,
        keepouts: &[Keepout::Centre(4.0)],
    },
];

impl ScatterRule {
    fn sample(&self, index: usize, channel: usize) -> f64 {
        seeded_random(seed_to_f64(index * self.seed_stride + self.seed_offset + channel))
    }

    fn place(&self, index: usize) -> Option<Prop> {
        let span = self.half_extent * 2.0;
        let x = expect_f32(self.sample(index, 0) * span - self.half_extent);
        let z = expect_f32(self.sample(index, 1) * span - self.half_extent);
        let ground = Vec2::new(x, z);
        if self.keepouts.iter().any(|k| k.contains(ground)) {
            return None;
        }
        let scale = self.scale.map_or(1.0, |(base, spread)| {
            base + expect_f32(self.sample(index, 2)) * spread
        });
        Some(Prop {
            kind: self.kind,
            position: Vec3::new(x, self.height, z),
            scale,
        })
    }
}

/// Every decorative prop in the park, in a stable order.
#[must_use]
pub fn generate() -> Vec<Prop> {
    let props: Vec<Prop> = RULES
        .iter()
        .flat_map(|rule| (0..rule.count).filter_map(move |i| rule.place(i)))
        .collect();
    log::debug!("scattered {} props", props.len());
    props
}

/// Rocks ringing the pond, with a wobble in their distance from its centre.
#[must_use]
pub fn pond_rocks() -> Vec<Prop> {
    const COUNT: u16 = 14;
    (0..COUNT)
        .map(|i| {
            let index = f64::from(i);
            let angle = index / f64::from(COUNT) * std::f64::consts::TAU;
            let radius = 3.6 + (index * 2.7).sin() * 0.4;
            let ground = POND_CENTRE
                + Vec2::new(
                    expect_f32(angle.cos() * radius),
                    expect_f32(angle.sin() * radius),
                );
            Prop {
                kind: PropKind::Rock,
                position: Vec3::new(ground.x, 0.12, ground.y),
                scale: 0.3 + expect_f32(seeded_random(index * 17.0)) * 0.35,
            }
        })
        .collect()
}

/// The four fence sides as `(start, end)` ground points, clockwise from the
/// north-west corner.
#[must_use]
pub const fn fence_sides() -> [(Vec2, Vec2); 4] {
    let b = FENCE_BOUND;
    [
        (Vec2::new(-b, -b), Vec2::new(b, -b)),
        (Vec2::new(b, -b), Vec2::new(b, b)),
        (Vec2::new(b, b), Vec2::new(-b, b)),
        (Vec2::new(-b, b), Vec2::new(-b, -b)),
    ]
}

/// Ground positions of every fence post, without duplicated corners.
#[must_use]
pub fn fence_posts() -> Vec<Vec2> {
    fence_sides()
        .into_iter()
        .flat_map(|(start, end)| {
            (0..FENCE_POSTS_PER_SIDE).map(move |i| {
                start.lerp(end, f32::from(i) / f32::from(FENCE_POSTS_PER_SIDE))
            })
        })
        .collect()
}

/// Darker disc of grass laid flat on the ground.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GrassPatch {
    /// Ground position (`y` is world Z).
    pub centre: Vec2,
    /// Disc radius.
    pub radius: f32,
    /// Spin about +Y, in radians.
    pub rotation: f32,
}

/// Grass patches breaking up the lawn.
#[must_use]
pub fn grass_patches() -> Vec<GrassPatch> {
    (0..25_usize)
        .map(|i| {
            let sample = |channel: usize| seeded_random(seed_to_f64(i * 13 + 400 + channel));
            GrassPatch {
                centre: Vec2::new(
                    expect_f32(sample(0) * 44.0 - 22.0),
                    expect_f32(sample(1) * 44.0 - 22.0),
                ),
                radius: expect_f32(1.5 + sample(2) * 3.5),
                rotation: expect_f32(sample(3) * std::f64::consts::PI),
            }
        })
        .collect()
}

/// Offsets of the bridge planks from [`BRIDGE_CENTRE`] along world Z.
#[must_use]
pub fn bridge_plank_offsets() -> Vec<f32> {
    (0..BRIDGE_PLANKS).map(|i| f32::from(i) * 0.45 - 1.6).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ARENA_BOUND;

    #[test]
    fn generation_is_deterministic() {
        assert_eq!(generate(), generate());
    }

    #[test]
    fn props_stay_inside_the_arena() {
        for prop in generate() {
            assert!(prop.position.x.abs() <= ARENA_BOUND);
            assert!(prop.position.z.abs() <= ARENA_BOUND);
        }
    }

    #[test]
    fn paths_and_pond_stay_clear_of_trees_and_flowers() {
        for prop in generate()
            .into_iter()
            .filter(|p| matches!(p.kind, PropKind::Tree | PropKind::Flower))
        {
            let ground = Vec2::new(prop.position.x, prop.position.z);
            assert!(ground.x.abs() >= 2.5 && ground.y.abs() >= 2.5, "{prop:?} on a path");
            assert!(ground.distance(POND_CENTRE) >= 5.0, "{prop:?} in the pond");
        }
    }

    #[test]
    fn tree_scales_follow_their_range() {
        for tree in generate().into_iter().filter(|p| p.kind == PropKind::Tree) {
            assert!(tree.scale >= 0.7 && tree.scale <= 1.6);
        }
    }

    #[test]
    fn every_kind_is_represented() {
        let props = generate();
        for kind in [PropKind::Tree, PropKind::Rock, PropKind::Flower, PropKind::Mushroom] {
            assert!(props.iter().any(|p| p.kind == kind), "no {kind:?} placed");
        }
    }

    #[test]
    fn pond_rocks_ring_the_water() {
        let rocks = pond_rocks();
        assert_eq!(rocks.len(), 14);
        for rock in rocks {
            let ground = Vec2::new(rock.position.x, rock.position.z);
            let distance = ground.distance(POND_CENTRE);
            assert!(distance >= POND_RADIUS - 0.35 && distance <= 4.0 + 1e-4, "{rock:?}");
            assert!(rock.scale >= 0.3 && rock.scale <= 0.65);
        }
    }

    #[test]
    fn fence_encloses_the_arena() {
        let posts = fence_posts();
        assert_eq!(posts.len(), 4 * usize::from(FENCE_POSTS_PER_SIDE));
        for post in &posts {
            let edge = post.x.abs().max(post.y.abs());
            assert!((edge - FENCE_BOUND).abs() < 1e-4, "{post:?} off the fence line");
            assert!(edge > ARENA_BOUND);
        }
        for corner in fence_sides().map(|(start, _)| start) {
            assert_eq!(posts.iter().filter(|p| **p == corner).count(), 1);
        }
    }

    #[test]
    fn grass_patches_stay_on_the_lawn() {
        let patches = grass_patches();
        assert_eq!(patches.len(), 25);
        assert_eq!(patches, grass_patches());
        for patch in patches {
            assert!(patch.centre.x.abs() <= 22.0 && patch.centre.y.abs() <= 22.0);
            assert!(patch.radius >= 1.5 && patch.radius <= 5.0);
        }
    }

    #[test]
    fn bridge_planks_span_the_deck() {
        let offsets = bridge_plank_offsets();
        assert_eq!(offsets.len(), usize::from(BRIDGE_PLANKS));
        assert!((offsets.first().copied().unwrap_or_default() + 1.6).abs() < 1e-5);
        assert!(offsets
            .windows(2)
            .all(|pair| matches!(pair, [front, back] if back > front)));
    }

    #[test]
    fn seeded_random_is_in_unit_range() {
        for seed in 0..500 {
            let value = seeded_random(f64::from(seed));
            assert!((0.0..1.0).contains(&value));
        }
    }
}
