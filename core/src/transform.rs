//! Host transforms that overlay entries can attach to.
//!
//! The host owns a [`SharedTransform`] and moves it around; attached overlay
//! text keeps only a [`WeakTransform`], so dropping the host object is all it
//! takes to detach the text.

use std::sync::{Arc, Weak};

use parking_lot::RwLock;

use crate::math::{Quat, Vec3, QUAT_IDENTITY};

/// Translation, rotation and scale of a host object.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    /// Translation in world units.
    pub translation: Vec3,
    /// Rotation as a quaternion.
    pub rotation: Quat,
    /// Non-uniform scale.
    pub scale: Vec3,
}

impl Transform {
    /// Identity transform: origin position, no rotation, unit scale.
    pub const IDENTITY: Self = Self {
        translation: Vec3::new(0.0, 0.0, 0.0),
        rotation: QUAT_IDENTITY,
        scale: Vec3::new(1.0, 1.0, 1.0),
    };

    /// Create from translation only (identity rotation and scale).
    pub fn from_translation(translation: Vec3) -> Self {
        Self {
            translation,
            ..Self::IDENTITY
        }
    }

    /// World-space position.
    pub fn position(&self) -> Vec3 {
        self.translation
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Owning, shareable transform handle.
pub type SharedTransform = Arc<RwLock<Transform>>;

/// Non-owning transform reference. Upgrading fails once every
/// [`SharedTransform`] clone has been dropped.
pub type WeakTransform = Weak<RwLock<Transform>>;

/// Wrap a transform into a [`SharedTransform`].
pub fn shared(transform: Transform) -> SharedTransform {
    Arc::new(RwLock::new(transform))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weak_dies_with_owner() {
        let owner = shared(Transform::from_translation(Vec3::new(1.0, 2.0, 3.0)));
        let weak: WeakTransform = Arc::downgrade(&owner);

        let position = weak.upgrade().map(|t| t.read().position());
        assert_eq!(position, Some(Vec3::new(1.0, 2.0, 3.0)));

        drop(owner);
        assert!(weak.upgrade().is_none());
    }

    #[test]
    fn test_host_moves_are_visible_through_weak() {
        let owner = shared(Transform::IDENTITY);
        let weak = Arc::downgrade(&owner);
        owner.write().translation = Vec3::new(0.0, 5.0, 0.0);
        assert_eq!(
            weak.upgrade().map(|t| t.read().position()),
            Some(Vec3::new(0.0, 5.0, 0.0))
        );
    }
}
