//! Common ECS components for pointer interaction.

use glam::Vec3;

/// Per-entity pointer hover flag. Owned by the entity; never shared.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Hoverable {
    pub hovered: bool,
}

impl Hoverable {
    /// Pointer entered the entity. Returns true if the state changed.
    pub fn enter(&mut self) -> bool {
        let changed = !self.hovered;
        self.hovered = true;
        changed
    }

    /// Pointer left the entity. Returns true if the state changed.
    pub fn leave(&mut self) -> bool {
        let changed = self.hovered;
        self.hovered = false;
        changed
    }

    /// Apply a hover target (true = pointer over this entity). Returns true if the state changed.
    pub fn set(&mut self, over: bool) -> bool {
        if over {
            self.enter()
        } else {
            self.leave()
        }
    }
}

/// Bounding sphere used for pointer picking, in local units (scaled by the entity's transform).
#[derive(Debug, Clone, Copy)]
pub struct Pickable {
    /// Sphere center in local space.
    pub center: Vec3,
    /// Radius in local space.
    pub radius: f32,
}

impl Pickable {
    pub fn new(center: Vec3, radius: f32) -> Self {
        Self { center, radius }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn enter_twice_is_same_as_once() {
        let mut once = Hoverable::default();
        once.enter();
        let mut twice = Hoverable::default();
        assert!(twice.enter());
        assert!(!twice.enter());
        assert_eq!(once, twice);
    }

    #[test]
    fn leave_while_not_hovered_is_noop() {
        let mut h = Hoverable::default();
        assert!(!h.leave());
        assert!(!h.hovered);
    }

    #[test]
    fn set_reports_changes_only() {
        let mut h = Hoverable::default();
        assert!(h.set(true));
        assert!(!h.set(true));
        assert!(h.set(false));
        assert!(!h.set(false));
    }
}
