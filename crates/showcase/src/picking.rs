//! Pointer picking against ship bounding spheres.

use engine_core::{Hoverable, Pickable, Ray, Transform};
use hecs::{Entity, World};

/// Nearest pickable entity along the ray, with its hit distance.
pub fn pick(world: &World, ray: &Ray) -> Option<(Entity, f32)> {
    world
        .query::<(&Transform, &Pickable)>()
        .iter()
        .filter_map(|(entity, (transform, pickable))| {
            let center = transform.transform_point(pickable.center);
            let radius = pickable.radius * transform.uniform_scale();
            ray.intersect_sphere(center, radius).map(|t| (entity, t))
        })
        .min_by(|a, b| a.1.total_cmp(&b.1))
}

/// Mark `target` hovered and every other entity not hovered.
pub fn update_hover(world: &mut World, target: Option<Entity>) {
    for (entity, hover) in world.query_mut::<&mut Hoverable>() {
        let over = Some(entity) == target;
        if hover.set(over) {
            log::debug!("Hover {} {:?}", if over { "enter" } else { "leave" }, entity);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    fn sphere_at(world: &mut World, position: Vec3, radius: f32, scale: f32) -> Entity {
        let mut transform = Transform::from_position(position);
        transform.scale = Vec3::splat(scale);
        world.spawn((transform, Pickable::new(Vec3::ZERO, radius), Hoverable::default()))
    }

    fn hovered(world: &World, e: Entity) -> bool {
        world.get::<&Hoverable>(e).unwrap().hovered
    }

    #[test]
    fn picks_nearest_along_ray() {
        let mut world = World::new();
        let far = sphere_at(&mut world, Vec3::new(0.0, 0.0, -10.0), 1.0, 1.0);
        let near = sphere_at(&mut world, Vec3::new(0.0, 0.0, -3.0), 1.0, 1.0);
        let ray = Ray::new(Vec3::new(0.0, 0.0, 10.0), Vec3::NEG_Z);
        let (hit, t) = pick(&world, &ray).unwrap();
        assert_eq!(hit, near);
        assert!((t - 12.0).abs() < 1e-4);
        assert_ne!(hit, far);
    }

    #[test]
    fn miss_returns_none() {
        let mut world = World::new();
        sphere_at(&mut world, Vec3::new(5.0, 0.0, 0.0), 1.0, 1.0);
        let ray = Ray::new(Vec3::new(0.0, 0.0, 10.0), Vec3::NEG_Z);
        assert!(pick(&world, &ray).is_none());
    }

    #[test]
    fn scale_grows_pick_radius() {
        let mut world = World::new();
        sphere_at(&mut world, Vec3::new(1.5, 0.0, 0.0), 1.0, 2.0);
        let ray = Ray::new(Vec3::new(0.0, 0.0, 10.0), Vec3::NEG_Z);
        assert!(pick(&world, &ray).is_some());
    }

    #[test]
    fn hover_is_exclusive_and_idempotent() {
        let mut world = World::new();
        let a = sphere_at(&mut world, Vec3::ZERO, 1.0, 1.0);
        let b = sphere_at(&mut world, Vec3::X * 5.0, 1.0, 1.0);

        update_hover(&mut world, Some(a));
        update_hover(&mut world, Some(a));
        assert!(hovered(&world, a));
        assert!(!hovered(&world, b));

        update_hover(&mut world, Some(b));
        assert!(!hovered(&world, a));
        assert!(hovered(&world, b));

        update_hover(&mut world, None);
        assert!(!hovered(&world, a) && !hovered(&world, b));
    }
}
