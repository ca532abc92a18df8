//! Ship hull geometry: each style is a fixed list of primitive parts in ship-local space.
//!
//! Ships face +Z (canopy forward, engines aft). Hull style changes only what is drawn;
//! picking uses [`HullStyle::bounding_radius`].

use glam::{EulerRot, Mat4, Quat, Vec3};
use renderer::MeshData;
use serde::{Deserialize, Serialize};
use std::f32::consts::FRAC_PI_2;

const ROUND_SEGMENTS: u32 = 24;
const SPHERE_RINGS: u32 = 16;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum HullStyle {
    /// Flat body with a wing slab and twin engines.
    #[default]
    Fighter,
    /// Cylindrical fuselage with a nose cone, fins and boosters.
    Rocket,
}

/// Which material a part takes. Slots map to colors in `scene::part_material`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MaterialSlot {
    Body,
    Wing,
    Canopy,
    Engine,
}

impl MaterialSlot {
    /// Canopy glass is drawn after opaque parts.
    pub fn is_translucent(self) -> bool {
        matches!(self, MaterialSlot::Canopy)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Shape {
    Box { size: Vec3 },
    Sphere { radius: f32 },
    /// Along local Y before the part rotation.
    Cylinder { radius_top: f32, radius_bottom: f32, height: f32 },
    /// Apex at local +Y before the part rotation.
    Cone { radius: f32, height: f32 },
}

impl Shape {
    pub fn mesh_data(&self) -> MeshData {
        match *self {
            Shape::Box { size } => MeshData::cuboid(size),
            Shape::Sphere { radius } => MeshData::sphere(radius, ROUND_SEGMENTS, SPHERE_RINGS),
            Shape::Cylinder { radius_top, radius_bottom, height } => {
                MeshData::cylinder(radius_top, radius_bottom, height, ROUND_SEGMENTS)
            }
            Shape::Cone { radius, height } => MeshData::cone(radius, height, ROUND_SEGMENTS),
        }
    }

    /// Radius of a sphere around the shape's own origin that contains it.
    fn extent(&self) -> f32 {
        match *self {
            Shape::Box { size } => (size * 0.5).length(),
            Shape::Sphere { radius } => radius,
            Shape::Cylinder { radius_top, radius_bottom, height } => {
                Vec3::new(radius_top.max(radius_bottom), height * 0.5, 0.0).length()
            }
            Shape::Cone { radius, height } => Vec3::new(radius, height * 0.5, 0.0).length(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HullPart {
    pub shape: Shape,
    pub offset: Vec3,
    /// Euler XYZ radians.
    pub rotation: Vec3,
    pub slot: MaterialSlot,
}

impl HullPart {
    const fn new(shape: Shape, offset: Vec3, slot: MaterialSlot) -> Self {
        Self { shape, offset, rotation: Vec3::ZERO, slot }
    }

    const fn rotated(self, rotation: Vec3) -> Self {
        Self { rotation, ..self }
    }

    /// Part-to-ship matrix.
    pub fn local_matrix(&self) -> Mat4 {
        let r = self.rotation;
        Mat4::from_rotation_translation(Quat::from_euler(EulerRot::XYZ, r.x, r.y, r.z), self.offset)
    }
}

/// Engines and boosters lie along the ship's long axis.
const ALONG_Z: Vec3 = Vec3::new(FRAC_PI_2, 0.0, 0.0);

static FIGHTER: [HullPart; 5] = [
    HullPart::new(Shape::Box { size: Vec3::new(2.0, 0.5, 4.0) }, Vec3::ZERO, MaterialSlot::Body),
    HullPart::new(Shape::Box { size: Vec3::new(4.0, 0.2, 1.0) }, Vec3::new(0.0, 0.0, -1.0), MaterialSlot::Wing),
    HullPart::new(Shape::Sphere { radius: 0.4 }, Vec3::new(0.0, 0.3, 1.0), MaterialSlot::Canopy),
    HullPart::new(
        Shape::Cylinder { radius_top: 0.2, radius_bottom: 0.3, height: 1.0 },
        Vec3::new(-1.0, -0.2, -2.0),
        MaterialSlot::Engine,
    )
    .rotated(ALONG_Z),
    HullPart::new(
        Shape::Cylinder { radius_top: 0.2, radius_bottom: 0.3, height: 1.0 },
        Vec3::new(1.0, -0.2, -2.0),
        MaterialSlot::Engine,
    )
    .rotated(ALONG_Z),
];

static ROCKET: [HullPart; 8] = [
    HullPart::new(
        Shape::Cylinder { radius_top: 0.6, radius_bottom: 0.6, height: 4.0 },
        Vec3::ZERO,
        MaterialSlot::Body,
    )
    .rotated(ALONG_Z),
    HullPart::new(Shape::Cone { radius: 0.6, height: 1.2 }, Vec3::new(0.0, 0.0, 2.6), MaterialSlot::Body)
        .rotated(ALONG_Z),
    HullPart::new(Shape::Sphere { radius: 0.35 }, Vec3::new(0.0, 0.5, 1.1), MaterialSlot::Canopy),
    HullPart::new(Shape::Box { size: Vec3::new(2.6, 0.1, 1.0) }, Vec3::new(0.0, 0.0, -1.5), MaterialSlot::Wing),
    HullPart::new(Shape::Box { size: Vec3::new(0.1, 1.0, 1.0) }, Vec3::new(0.0, 0.9, -1.5), MaterialSlot::Wing),
    HullPart::new(Shape::Box { size: Vec3::new(0.1, 1.0, 1.0) }, Vec3::new(0.0, -0.9, -1.5), MaterialSlot::Wing),
    HullPart::new(
        Shape::Cylinder { radius_top: 0.2, radius_bottom: 0.3, height: 0.8 },
        Vec3::new(-0.45, 0.0, -2.4),
        MaterialSlot::Engine,
    )
    .rotated(ALONG_Z),
    HullPart::new(
        Shape::Cylinder { radius_top: 0.2, radius_bottom: 0.3, height: 0.8 },
        Vec3::new(0.45, 0.0, -2.4),
        MaterialSlot::Engine,
    )
    .rotated(ALONG_Z),
];

impl HullStyle {
    pub fn parts(self) -> &'static [HullPart] {
        match self {
            HullStyle::Fighter => &FIGHTER,
            HullStyle::Rocket => &ROCKET,
        }
    }

    /// Radius of a sphere around the ship origin enclosing every part (unscaled).
    pub fn bounding_radius(self) -> f32 {
        self.parts()
            .iter()
            .map(|p| p.offset.length() + p.shape.extent())
            .fold(0.0, f32::max)
    }

    /// Draw order: opaque parts first, canopy glass last.
    pub fn draw_order(self) -> impl Iterator<Item = (usize, &'static HullPart)> {
        let parts = self.parts();
        let opaque = parts.iter().enumerate().filter(|(_, p)| !p.slot.is_translucent());
        let glass = parts.iter().enumerate().filter(|(_, p)| p.slot.is_translucent());
        opaque.chain(glass)
    }
}
