//! Handles to entities living in an [crate::environment::Environment] world.
//!
//! A handle remembers the [WorldId] it was issued by, so an environment can
//! refuse handles minted by another one even when the entity indices collide.

use bevy_ecs::prelude::Entity;
use bevy_ecs::world::WorldId;

/// Refers to a registered vehicle. A handle always names some vehicle entity,
/// so a mission can never be bound to "no vehicle".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VehicleHandle {
    world: WorldId,
    entity: Entity,
}

impl VehicleHandle {
    pub(crate) fn new(world: WorldId, entity: Entity) -> Self {
        Self { world, entity }
    }

    pub fn entity(self) -> Entity {
        self.entity
    }

    /// The entity, if this handle was issued by `world`.
    pub(crate) fn entity_in(self, world: WorldId) -> Option<Entity> {
        (self.world == world).then_some(self.entity)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MissionHandle {
    world: WorldId,
    entity: Entity,
}

impl MissionHandle {
    pub(crate) fn new(world: WorldId, entity: Entity) -> Self {
        Self { world, entity }
    }

    pub fn entity(self) -> Entity {
        self.entity
    }

    pub(crate) fn entity_in(self, world: WorldId) -> Option<Entity> {
        (self.world == world).then_some(self.entity)
    }
}
