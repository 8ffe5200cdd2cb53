//! The environment: owns the fleet and the mission queue, and advances the
//! simulation one cycle at a time.
//!
//! Vehicles and missions are entities in a private [World]. Registration order
//! is kept in [VehicleRoster] and [MissionQueue]; a cycle walks the queue in
//! that order and runs each mission to completion before touching the next.

use bevy_ecs::prelude::{Entity, Resource, World};
use tracing::{debug, info};

use crate::clock::CycleClock;
use crate::ecs::{MissionHandle, VehicleHandle};
use crate::error::{SimError, ValidationError};
use crate::events::{EventSink, SimEvent};
use crate::mission::{Mission, MissionState};
use crate::scenario::{CyclePolicy, EnvironmentConfig};
use crate::telemetry::{
    CompletedMissionRecord, CycleReport, MissionDisposition, MissionOutcome, MissionTelemetry,
};
use crate::vehicle::{Vehicle, VehicleOps};

/// Vehicle entities in registration order.
#[derive(Debug, Default, Resource)]
pub struct VehicleRoster(pub Vec<Entity>);

/// Mission entities in registration order.
#[derive(Debug, Default, Resource)]
pub struct MissionQueue(pub Vec<Entity>);

pub struct Environment {
    world: World,
}

impl Default for Environment {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Environment")
            .field("cycle", &self.cycle())
            .field("vehicles", &self.vehicle_count())
            .field("missions", &self.mission_count())
            .finish()
    }
}

impl Environment {
    pub fn new() -> Self {
        Self::with_config(EnvironmentConfig::default())
    }

    pub fn with_config(config: EnvironmentConfig) -> Self {
        let mut world = World::new();
        world.insert_resource(CycleClock::default());
        world.insert_resource(MissionTelemetry::with_limit(config.history_limit));
        world.insert_resource(VehicleRoster::default());
        world.insert_resource(MissionQueue::default());
        world.insert_resource(config);
        Self { world }
    }

    pub fn config(&self) -> &EnvironmentConfig {
        self.world.resource::<EnvironmentConfig>()
    }

    pub fn set_cycle_policy(&mut self, policy: CyclePolicy) {
        self.world.resource_mut::<EnvironmentConfig>().cycle_policy = policy;
    }

    /// Appends a vehicle to the fleet. Ids are not checked for uniqueness.
    pub fn register_vehicle(&mut self, vehicle: impl Into<Vehicle>) -> VehicleHandle {
        let vehicle = vehicle.into();
        debug!(vehicle_id = vehicle.id(), kind = %vehicle.kind(), "registering vehicle");
        let entity = self.world.spawn(vehicle).id();
        self.world.resource_mut::<VehicleRoster>().0.push(entity);
        VehicleHandle::new(self.world.id(), entity)
    }

    /// Appends a mission to the queue. Its vehicle must already be registered here.
    pub fn register_mission(&mut self, mission: Mission) -> Result<MissionHandle, ValidationError> {
        self.ensure_vehicle(mission.vehicle())?;
        debug!(
            origin = mission.origin(),
            destination = mission.destination(),
            "registering mission"
        );
        let entity = self.world.spawn(mission).id();
        self.world.resource_mut::<MissionQueue>().0.push(entity);
        Ok(MissionHandle::new(self.world.id(), entity))
    }

    /// Binds a registered mission to another registered vehicle.
    pub fn reassign_mission(
        &mut self,
        mission: MissionHandle,
        vehicle: VehicleHandle,
    ) -> Result<(), ValidationError> {
        self.ensure_vehicle(vehicle)?;
        let mut entry = self
            .mission_entity(mission)
            .and_then(|e| self.world.get_mut::<Mission>(e))
            .ok_or(ValidationError::UnknownMission)?;
        entry.assign_vehicle(vehicle);
        Ok(())
    }

    pub fn vehicle(&self, handle: VehicleHandle) -> Option<&Vehicle> {
        self.world.get::<Vehicle>(self.vehicle_entity(handle)?)
    }

    pub fn vehicle_mut(&mut self, handle: VehicleHandle) -> Option<&mut Vehicle> {
        let entity = self.vehicle_entity(handle)?;
        self.world.get_mut::<Vehicle>(entity).map(|v| v.into_inner())
    }

    pub fn mission(&self, handle: MissionHandle) -> Option<&Mission> {
        self.world.get::<Mission>(self.mission_entity(handle)?)
    }

    /// Route edits only. The vehicle binding goes through
    /// [Environment::reassign_mission] and the lifecycle through
    /// [Environment::start_mission], [Environment::complete_mission] or a cycle.
    pub fn mission_mut(&mut self, handle: MissionHandle) -> Option<&mut Mission> {
        let entity = self.mission_entity(handle)?;
        self.world.get_mut::<Mission>(entity).map(|m| m.into_inner())
    }

    /// First registered vehicle with this id.
    pub fn find_vehicle(&self, id: &str) -> Option<VehicleHandle> {
        self.vehicles()
            .find(|(_, vehicle)| vehicle.id() == id)
            .map(|(handle, _)| handle)
    }

    pub fn vehicles(&self) -> impl Iterator<Item = (VehicleHandle, &Vehicle)> + '_ {
        let world = self.world.id();
        self.world
            .resource::<VehicleRoster>()
            .0
            .iter()
            .filter_map(move |&e| {
                self.world
                    .get::<Vehicle>(e)
                    .map(|v| (VehicleHandle::new(world, e), v))
            })
    }

    pub fn missions(&self) -> impl Iterator<Item = (MissionHandle, &Mission)> + '_ {
        let world = self.world.id();
        self.world
            .resource::<MissionQueue>()
            .0
            .iter()
            .filter_map(move |&e| {
                self.world
                    .get::<Mission>(e)
                    .map(|m| (MissionHandle::new(world, e), m))
            })
    }

    pub fn vehicle_count(&self) -> usize {
        self.world.resource::<VehicleRoster>().0.len()
    }

    pub fn mission_count(&self) -> usize {
        self.world.resource::<MissionQueue>().0.len()
    }

    /// Number of the last cycle run, 0 before the first.
    pub fn cycle(&self) -> u64 {
        self.world.resource::<CycleClock>().now()
    }

    pub fn telemetry(&self) -> &MissionTelemetry {
        self.world.resource::<MissionTelemetry>()
    }

    /// Runs `start` on one mission outside of a cycle.
    pub fn start_mission(
        &mut self,
        handle: MissionHandle,
        sink: &mut dyn EventSink,
    ) -> Result<(), SimError> {
        self.with_mission(handle, |mission, vehicle| mission.start(vehicle, sink))?
    }

    /// Runs `complete` on one mission outside of a cycle.
    pub fn complete_mission(
        &mut self,
        handle: MissionHandle,
        sink: &mut dyn EventSink,
    ) -> Result<(), SimError> {
        let mission = self
            .mission_entity(handle)
            .and_then(|e| self.world.get_mut::<Mission>(e))
            .ok_or(ValidationError::UnknownMission)?;
        mission.into_inner().complete(sink)
    }

    /// Advances the clock and drives every queued mission through `start` then
    /// `complete`, strictly in registration order.
    ///
    /// Already completed missions follow the configured [CyclePolicy]; missions
    /// started by hand are only completed. The first failing mission aborts the
    /// cycle and its error is returned.
    pub fn run_cycle(&mut self, sink: &mut dyn EventSink) -> Result<CycleReport, SimError> {
        let cycle = self.world.resource_mut::<CycleClock>().advance();
        let policy = self.config().cycle_policy;
        let queue = self.world.resource::<MissionQueue>().0.clone();
        let world = self.world.id();
        sink.record(SimEvent::CycleStarted {
            cycle,
            missions: queue.len(),
        });

        let mut report = CycleReport::new(cycle);
        for entity in queue {
            let handle = MissionHandle::new(world, entity);
            let (outcome, completed) = self.with_mission(handle, |mission, vehicle| {
                process_mission(handle, mission, vehicle, policy, cycle, &mut *sink)
            })??;
            if let Some(record) = completed {
                self.world.resource_mut::<MissionTelemetry>().record(record);
            }
            report.outcomes.push(outcome);
        }

        let (processed, skipped) = (report.processed(), report.skipped());
        sink.record(SimEvent::CycleFinished {
            cycle,
            processed,
            skipped,
        });
        info!(cycle, processed, skipped, "cycle finished");
        Ok(report)
    }

    fn vehicle_entity(&self, handle: VehicleHandle) -> Option<Entity> {
        handle.entity_in(self.world.id())
    }

    fn mission_entity(&self, handle: MissionHandle) -> Option<Entity> {
        handle.entity_in(self.world.id())
    }

    /// Handles issued by another environment never count as registered here.
    fn ensure_vehicle(&self, handle: VehicleHandle) -> Result<(), ValidationError> {
        if self.vehicle(handle).is_some() {
            Ok(())
        } else {
            Err(ValidationError::UnregisteredVehicle)
        }
    }

    /// Borrows a mission together with its assigned vehicle.
    fn with_mission<R>(
        &mut self,
        handle: MissionHandle,
        f: impl FnOnce(&mut Mission, &mut Vehicle) -> R,
    ) -> Result<R, ValidationError> {
        let mission = self
            .mission_entity(handle)
            .ok_or(ValidationError::UnknownMission)?;
        let vehicle = self
            .world
            .get::<Mission>(mission)
            .ok_or(ValidationError::UnknownMission)?
            .vehicle()
            .entity();

        let mut query = self
            .world
            .query::<(Option<&mut Mission>, Option<&mut Vehicle>)>();
        let [(mission, _), (_, vehicle)] = query
            .get_many_mut(&mut self.world, [mission, vehicle])
            .map_err(|_| ValidationError::UnregisteredVehicle)?;

        match (mission, vehicle) {
            (Some(mut mission), Some(mut vehicle)) => Ok(f(&mut *mission, &mut *vehicle)),
            (None, _) => Err(ValidationError::UnknownMission),
            (_, None) => Err(ValidationError::UnregisteredVehicle),
        }
    }
}

fn process_mission(
    handle: MissionHandle,
    mission: &mut Mission,
    vehicle: &mut Vehicle,
    policy: CyclePolicy,
    cycle: u64,
    sink: &mut dyn EventSink,
) -> Result<(MissionOutcome, Option<CompletedMissionRecord>), SimError> {
    let disposition = match (mission.state(), policy) {
        (MissionState::Created, _) => MissionDisposition::Completed,
        (MissionState::Started, _) => MissionDisposition::Resumed,
        (MissionState::Completed, CyclePolicy::Replay) => {
            mission.reset()?;
            MissionDisposition::Replayed
        }
        (MissionState::Completed, CyclePolicy::SkipCompleted) => {
            debug!(
                cycle,
                destination = mission.destination(),
                "mission already completed"
            );
            sink.record(SimEvent::MissionSkipped {
                origin: mission.origin().to_string(),
                destination: mission.destination().to_string(),
            });
            MissionDisposition::Skipped
        }
    };

    let outcome = MissionOutcome {
        mission: handle,
        vehicle_id: vehicle.id().to_string(),
        kind: mission.kind(),
        disposition,
    };
    if disposition == MissionDisposition::Skipped {
        return Ok((outcome, None));
    }

    if mission.state() == MissionState::Created {
        mission.start(vehicle, sink)?;
    }
    mission.complete(sink)?;

    let record = CompletedMissionRecord {
        mission: handle,
        vehicle_id: outcome.vehicle_id.clone(),
        origin: mission.origin().to_string(),
        destination: mission.destination().to_string(),
        deadline_hours: mission.deadline_hours(),
        cycle,
    };
    Ok((outcome, Some(record)))
}
