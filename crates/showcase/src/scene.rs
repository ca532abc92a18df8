//! Scene composition: one ECS entity per catalog record, per-frame ship poses,
//! hover materials, and the instance lists the render passes draw.

use crate::catalog::{SpaceshipRecord, FALLBACK_COLOR};
use crate::hull::{HullStyle, MaterialSlot};
use engine_core::{hex_to_linear, Hoverable, Pickable, Transform};
use glam::{Mat4, Quat, Vec3};
use hecs::{Entity, World};
use procgen::Star;
use renderer::{InstanceData, LightUniform, PointLight};

/// Vertical bob amplitude in world units.
pub const BOB_AMPLITUDE: f32 = 0.2;
/// Scale multiplier while the pointer is over a ship.
pub const HOVER_SCALE: f32 = 1.2;
/// Yaw added per fixed 1/60 s step while hovered.
pub const SPIN_PER_STEP: f32 = 0.01;
/// Name label anchor in ship-local space (scales with the ship).
pub const LABEL_OFFSET: Vec3 = Vec3::new(0.0, 2.0, 0.0);
/// Label glyph height in world units.
pub const LABEL_WORLD_HEIGHT: f32 = 0.5;
/// Fraction of a star's generated size used for its billboard.
const STAR_SPRITE_SCALE: f32 = 0.3;

const HOVER_BODY: &str = "#10b981";
const HOVER_GLOW: &str = "#059669";
const CANOPY: &str = "#87ceeb";
const CANOPY_OPACITY: f32 = 0.7;
const ENGINE_COLD: &str = "#666666";
const ENGINE_HOT: &str = "#ff4444";
const ENGINE_GLOW: &str = "#ff0000";
pub const LABEL_COLOR: &str = "#10b981";

/// Links an entity to its catalog record.
#[derive(Debug, Clone, Copy)]
pub struct Ship {
    pub record: &'static SpaceshipRecord,
    /// Linear RGBA of the record color (gray if it failed to parse).
    pub base_color: [f32; 4],
}

/// Where the record puts the ship. Never mutated after spawn.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShipPlacement {
    pub position: Vec3,
    /// Euler XYZ radians.
    pub rotation: Vec3,
    pub scale: f32,
}

impl ShipPlacement {
    pub fn from_record(record: &SpaceshipRecord) -> Self {
        Self {
            position: record.position,
            rotation: record.rotation,
            scale: record.scale,
        }
    }
}

/// Yaw accumulated while hovered, kept when the pointer leaves.
#[derive(Debug, Clone, Copy, Default)]
pub struct Spin {
    pub yaw: f32,
}

/// Spawn one entity per record. Returns entities in catalog order.
pub fn spawn_ships(world: &mut World, records: &'static [SpaceshipRecord], hull: HullStyle) -> Vec<Entity> {
    let radius = hull.bounding_radius();
    let entities: Vec<Entity> = records
        .iter()
        .map(|record| {
            let placement = ShipPlacement::from_record(record);
            world.spawn((
                Ship { record, base_color: record.base_color_or_fallback() },
                placement,
                ship_pose(&placement, 0.0, false, 0.0),
                Hoverable::default(),
                Pickable::new(Vec3::ZERO, radius),
                Spin::default(),
            ))
        })
        .collect();
    log::info!("Spawned {} ships ({:?} hull)", entities.len(), hull);
    entities
}

/// Ship transform for a frame. Pure in its inputs.
pub fn ship_pose(placement: &ShipPlacement, elapsed: f32, hovered: bool, spin_yaw: f32) -> Transform {
    let base = placement.position;
    let position = Vec3::new(base.x, base.y + (elapsed + base.x).sin() * BOB_AMPLITUDE, base.z);
    let rotation = placement.rotation + Vec3::new(0.0, spin_yaw, 0.0);
    let scale = if hovered { placement.scale * HOVER_SCALE } else { placement.scale };
    Transform::from_placement(position, rotation, scale)
}

/// One fixed step of hover spin.
pub fn step_spin(world: &mut World) {
    for (_, (spin, hover)) in world.query_mut::<(&mut Spin, &Hoverable)>() {
        if hover.hovered {
            spin.yaw += SPIN_PER_STEP;
        }
    }
}

/// Write every ship's transform for the current time.
pub fn update_poses(world: &mut World, elapsed: f32) {
    for (_, (transform, placement, hover, spin)) in
        world.query_mut::<(&mut Transform, &ShipPlacement, &Hoverable, &Spin)>()
    {
        *transform = ship_pose(placement, elapsed, hover.hovered, spin.yaw);
    }
}

/// Surface parameters of one hull part.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Material {
    /// Linear RGBA, alpha = opacity.
    pub color: [f32; 4],
    pub emissive: [f32; 3],
    pub emissive_intensity: f32,
    pub metalness: f32,
    pub roughness: f32,
}

impl Material {
    fn instance(&self, model: Mat4) -> InstanceData {
        InstanceData::new(model.to_cols_array_2d(), self.color)
            .with_emissive(self.emissive, self.emissive_intensity)
            .with_material(self.metalness, self.roughness)
    }
}

fn palette(hex: &str) -> [f32; 4] {
    hex_to_linear(hex).unwrap_or(FALLBACK_COLOR)
}

fn rgb(hex: &str) -> [f32; 3] {
    let [r, g, b, _] = palette(hex);
    [r, g, b]
}

/// Material for a part slot. Hovered ships switch to the highlight palette.
pub fn part_material(slot: MaterialSlot, base_color: [f32; 4], hovered: bool) -> Material {
    let (color, glow, intensity, metalness, roughness) = match slot {
        MaterialSlot::Body => (
            if hovered { palette(HOVER_BODY) } else { base_color },
            HOVER_GLOW,
            0.3,
            0.8,
            0.2,
        ),
        MaterialSlot::Wing => (
            if hovered { palette(HOVER_BODY) } else { base_color },
            HOVER_GLOW,
            0.2,
            0.7,
            0.3,
        ),
        MaterialSlot::Canopy => {
            let [r, g, b, _] = palette(CANOPY);
            ([r, g, b, CANOPY_OPACITY], HOVER_BODY, 0.1, 0.0, 1.0)
        }
        MaterialSlot::Engine => (
            palette(if hovered { ENGINE_HOT } else { ENGINE_COLD }),
            ENGINE_GLOW,
            0.5,
            0.0,
            1.0,
        ),
    };
    let (emissive, emissive_intensity) = if hovered { (rgb(glow), intensity) } else { ([0.0; 3], 0.0) };
    Material { color, emissive, emissive_intensity, metalness, roughness }
}

/// Per-part instance lists, indexed like `hull.parts()`.
pub fn build_instances(world: &World, hull: HullStyle) -> Vec<Vec<InstanceData>> {
    let parts = hull.parts();
    let mut batches: Vec<Vec<InstanceData>> = vec![Vec::new(); parts.len()];
    for (_, (ship, transform, hover)) in world.query::<(&Ship, &Transform, &Hoverable)>().iter() {
        let ship_matrix = transform.to_matrix();
        for (batch, part) in batches.iter_mut().zip(parts) {
            let material = part_material(part.slot, ship.base_color, hover.hovered);
            batch.push(material.instance(ship_matrix * part.local_matrix()));
        }
    }
    batches
}

/// Hovered ships with the world-space point their name label hangs from.
pub fn hover_labels(world: &World) -> Vec<(&'static str, Vec3, f32)> {
    world
        .query::<(&Ship, &Transform, &Hoverable)>()
        .iter()
        .filter(|(_, (_, _, hover))| hover.hovered)
        .map(|(_, (ship, transform, _))| {
            (ship.record.name, transform.transform_point(LABEL_OFFSET), transform.uniform_scale())
        })
        .collect()
}

/// Camera-facing star sprites. Color comes from emission so the lights do not tint them.
pub fn star_instances(stars: &[Star], camera_rotation: Quat, elapsed: f32, twinkle_speed: f32) -> Vec<InstanceData> {
    stars
        .iter()
        .map(|star| {
            let size = star.size * STAR_SPRITE_SCALE;
            let model = Mat4::from_scale_rotation_translation(Vec3::splat(size), camera_rotation, star.position);
            let brightness = star.twinkle(elapsed, twinkle_speed);
            let [r, g, b, _] = star.color;
            InstanceData::new(model.to_cols_array_2d(), [0.0, 0.0, 0.0, 1.0])
                .with_emissive([r, g, b], brightness)
                .unlit_sprite()
        })
        .collect()
}

/// Ambient fill plus a green key light and a darker green rim light.
pub fn scene_lights() -> LightUniform {
    LightUniform {
        ambient: [1.0, 1.0, 1.0, 0.2],
        points: [
            PointLight::new(Vec3::splat(10.0), rgb("#10b981"), 0.5),
            PointLight::new(Vec3::splat(-10.0), rgb("#059669"), 0.3),
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{catalog, find};

    fn placement() -> ShipPlacement {
        ShipPlacement {
            position: Vec3::new(-8.0, 2.0, -5.0),
            rotation: Vec3::new(0.0, 0.5, 0.0),
            scale: 1.0,
        }
    }

    #[test]
    fn bob_stays_within_amplitude() {
        let p = placement();
        for i in 0..600 {
            let t = i as f32 * 0.05;
            let pose = ship_pose(&p, t, false, 0.0);
            assert!((pose.position.y - 2.0).abs() <= BOB_AMPLITUDE + 1e-5);
            assert_eq!(pose.position.x, -8.0);
            assert_eq!(pose.position.z, -5.0);
        }
    }

    #[test]
    fn bob_phase_depends_on_base_x() {
        let p = placement();
        let pose = ship_pose(&p, 8.0, false, 0.0);
        assert!((pose.position.y - 2.0).abs() < 1e-5);
    }

    #[test]
    fn hover_scales_by_1_2() {
        let mut p = placement();
        p.scale = 1.5;
        assert!((ship_pose(&p, 0.0, true, 0.0).uniform_scale() - 1.8).abs() < 1e-6);
        assert_eq!(ship_pose(&p, 0.0, false, 0.0).uniform_scale(), 1.5);
    }

    #[test]
    fn spin_adds_to_base_yaw() {
        let p = placement();
        let spun = ship_pose(&p, 0.0, false, 0.25);
        let expected = Quat::from_rotation_y(0.75);
        assert!(spun.rotation.angle_between(expected) < 1e-5);
    }

    #[test]
    fn spin_accumulates_only_while_hovered() {
        let mut world = World::new();
        let entities = spawn_ships(&mut world, catalog(), HullStyle::Fighter);
        let hovered = entities[0];
        let idle = entities[1];
        world.get::<&mut Hoverable>(hovered).unwrap().enter();

        for _ in 0..60 {
            step_spin(&mut world);
        }
        assert!((world.get::<&Spin>(hovered).unwrap().yaw - 0.6).abs() < 1e-4);
        assert_eq!(world.get::<&Spin>(idle).unwrap().yaw, 0.0);

        // Leaving freezes the yaw where it is.
        world.get::<&mut Hoverable>(hovered).unwrap().leave();
        step_spin(&mut world);
        assert!((world.get::<&Spin>(hovered).unwrap().yaw - 0.6).abs() < 1e-4);
    }

    #[test]
    fn spawn_one_entity_per_record() {
        let mut world = World::new();
        let entities = spawn_ships(&mut world, catalog(), HullStyle::Rocket);
        assert_eq!(entities.len(), catalog().len());
        let ship = world.get::<&Ship>(entities[1]).unwrap();
        assert_eq!(ship.record.id, 2);
        let pick = world.get::<&Pickable>(entities[1]).unwrap();
        assert_eq!(pick.radius, HullStyle::Rocket.bounding_radius());
    }

    #[test]
    fn update_poses_writes_transforms() {
        let mut world = World::new();
        let entities = spawn_ships(&mut world, catalog(), HullStyle::Fighter);
        world.get::<&mut Hoverable>(entities[1]).unwrap().enter();
        update_poses(&mut world, 1.0);
        let t = *world.get::<&Transform>(entities[1]).unwrap();
        let record = find(2).unwrap();
        assert!((t.uniform_scale() - record.scale * HOVER_SCALE).abs() < 1e-6);
        assert!((t.position.y - (record.position.y + (1.0f32).sin() * BOB_AMPLITUDE)).abs() < 1e-5);
    }

    #[test]
    fn unhovered_body_uses_record_color() {
        let base = [0.1, 0.2, 0.3, 1.0];
        let m = part_material(MaterialSlot::Body, base, false);
        assert_eq!(m.color, base);
        assert_eq!(m.emissive, [0.0; 3]);
        assert_eq!(m.emissive_intensity, 0.0);
        assert_eq!((m.metalness, m.roughness), (0.8, 0.2));
    }

    #[test]
    fn hovered_parts_switch_palette() {
        let base = [0.1, 0.2, 0.3, 1.0];
        let body = part_material(MaterialSlot::Body, base, true);
        assert_eq!(body.color, palette(HOVER_BODY));
        assert_eq!(body.emissive_intensity, 0.3);
        let wing = part_material(MaterialSlot::Wing, base, true);
        assert_eq!(wing.emissive_intensity, 0.2);
        assert_eq!((wing.metalness, wing.roughness), (0.7, 0.3));
        let engine = part_material(MaterialSlot::Engine, base, true);
        assert_eq!(engine.color, palette(ENGINE_HOT));
        assert_eq!(engine.emissive, rgb(ENGINE_GLOW));
        assert_eq!(engine.emissive_intensity, 0.5);
    }

    #[test]
    fn canopy_is_translucent_sky_blue_either_way() {
        let base = [0.1, 0.2, 0.3, 1.0];
        for hovered in [false, true] {
            let canopy = part_material(MaterialSlot::Canopy, base, hovered);
            assert_eq!(canopy.color[3], CANOPY_OPACITY);
            assert_eq!(&canopy.color[..3], &palette(CANOPY)[..3]);
        }
        assert_eq!(part_material(MaterialSlot::Canopy, base, true).emissive_intensity, 0.1);
    }

    #[test]
    fn palette_constants_parse() {
        for hex in [HOVER_BODY, HOVER_GLOW, CANOPY, ENGINE_COLD, ENGINE_HOT, ENGINE_GLOW, LABEL_COLOR] {
            assert!(hex_to_linear(hex).is_ok(), "{hex}");
        }
    }

    #[test]
    fn instances_cover_every_part_of_every_ship() {
        let mut world = World::new();
        spawn_ships(&mut world, catalog(), HullStyle::Fighter);
        let batches = build_instances(&world, HullStyle::Fighter);
        assert_eq!(batches.len(), HullStyle::Fighter.parts().len());
        assert!(batches.iter().all(|b| b.len() == catalog().len()));
    }

    #[test]
    fn labels_only_for_hovered_ships() {
        let mut world = World::new();
        let entities = spawn_ships(&mut world, catalog(), HullStyle::Fighter);
        assert!(hover_labels(&world).is_empty());
        world.get::<&mut Hoverable>(entities[2]).unwrap().enter();
        update_poses(&mut world, 0.0);
        let labels = hover_labels(&world);
        assert_eq!(labels.len(), 1);
        assert_eq!(labels[0].0, "Explorador Científico");
    }
}
