//! Missions and their `Created → Started → Completed` lifecycle.
//!
//! `start` and `complete` dispatch on [MissionKind] independently, so a
//! variant can change one transition's reporting without touching the other.
//!
//! Transitions are driven through the owning environment, which resolves the
//! bound vehicle from the mission's handle. A mission cannot be started with
//! some other vehicle:
//!
//! ```compile_fail
//! use fleet_core::environment::Environment;
//! use fleet_core::events::EventLog;
//! use fleet_core::mission::Mission;
//! use fleet_core::vehicle::{Car, Drone};
//!
//! let mut env = Environment::new();
//! let car = env.register_vehicle(Car::new("A1").unwrap());
//! let mut mission = Mission::new("CityA", "CityB", car).unwrap();
//! let mut other = Drone::new("D9").unwrap();
//! mission.start(&mut other, &mut EventLog::default()).unwrap();
//! ```
//!
//! Nor can a mission be rewound from outside the crate:
//!
//! ```compile_fail
//! use fleet_core::environment::Environment;
//! use fleet_core::events::EventLog;
//! use fleet_core::mission::Mission;
//! use fleet_core::vehicle::Car;
//!
//! let mut env = Environment::new();
//! let car = env.register_vehicle(Car::new("A1").unwrap());
//! let handle = env
//!     .register_mission(Mission::new("CityA", "CityB", car).unwrap())
//!     .unwrap();
//! env.start_mission(handle, &mut EventLog::default()).unwrap();
//! env.mission_mut(handle).unwrap().reset().unwrap();
//! ```

use bevy_ecs::prelude::Component;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::ecs::VehicleHandle;
use crate::error::{require_non_empty, require_positive, SimError, ValidationError};
use crate::events::{EventSink, SimEvent};
use crate::vehicle::VehicleOps;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MissionKind {
    Standard,
    /// Time-boxed delivery. The deadline is reported, not enforced.
    UrgentDelivery { deadline_hours: f64 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissionState {
    Created,
    Started,
    Completed,
}

#[derive(Debug, Clone, PartialEq, Component)]
pub struct Mission {
    kind: MissionKind,
    origin: String,
    destination: String,
    vehicle: VehicleHandle,
    state: MissionState,
}

impl Mission {
    pub fn new(
        origin: impl Into<String>,
        destination: impl Into<String>,
        vehicle: VehicleHandle,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            kind: MissionKind::Standard,
            origin: require_non_empty("origin", origin.into())?,
            destination: require_non_empty("destination", destination.into())?,
            vehicle,
            state: MissionState::Created,
        })
    }

    pub fn urgent_delivery(
        origin: impl Into<String>,
        destination: impl Into<String>,
        vehicle: VehicleHandle,
        deadline_hours: f64,
    ) -> Result<Self, ValidationError> {
        let deadline_hours = require_positive("deadline_hours", deadline_hours)?;
        let mut mission = Self::new(origin, destination, vehicle)?;
        mission.kind = MissionKind::UrgentDelivery { deadline_hours };
        Ok(mission)
    }

    pub fn kind(&self) -> MissionKind {
        self.kind
    }

    pub fn origin(&self) -> &str {
        &self.origin
    }

    pub fn destination(&self) -> &str {
        &self.destination
    }

    pub fn vehicle(&self) -> VehicleHandle {
        self.vehicle
    }

    pub fn state(&self) -> MissionState {
        self.state
    }

    pub fn deadline_hours(&self) -> Option<f64> {
        match self.kind {
            MissionKind::Standard => None,
            MissionKind::UrgentDelivery { deadline_hours } => Some(deadline_hours),
        }
    }

    pub fn set_origin(&mut self, origin: impl Into<String>) -> Result<(), ValidationError> {
        self.origin = require_non_empty("origin", origin.into())?;
        Ok(())
    }

    pub fn set_destination(
        &mut self,
        destination: impl Into<String>,
    ) -> Result<(), ValidationError> {
        self.destination = require_non_empty("destination", destination.into())?;
        Ok(())
    }

    /// Registration checks happen in the environment; see
    /// [crate::environment::Environment::reassign_mission].
    pub(crate) fn assign_vehicle(&mut self, vehicle: VehicleHandle) {
        self.vehicle = vehicle;
    }

    /// `Created → Started`: reports the route (or the deadline for urgent
    /// deliveries), then moves the assigned vehicle exactly once.
    ///
    /// `vehicle` must be the one [Mission::vehicle] resolves to.
    pub(crate) fn start(
        &mut self,
        vehicle: &mut dyn VehicleOps,
        sink: &mut dyn EventSink,
    ) -> Result<(), SimError> {
        self.transition(MissionState::Created, MissionState::Started)?;
        debug!(
            origin = %self.origin,
            destination = %self.destination,
            vehicle_id = vehicle.id(),
            "mission started"
        );
        match self.kind {
            MissionKind::Standard => sink.record(SimEvent::MissionStarted {
                origin: self.origin.clone(),
                destination: self.destination.clone(),
            }),
            MissionKind::UrgentDelivery { deadline_hours } => {
                sink.record(SimEvent::UrgentDeliveryStarted { deadline_hours })
            }
        }
        vehicle.travel(sink);
        Ok(())
    }

    /// `Started → Completed`: reports the destination, or the deadline for
    /// urgent deliveries.
    pub(crate) fn complete(&mut self, sink: &mut dyn EventSink) -> Result<(), SimError> {
        self.transition(MissionState::Started, MissionState::Completed)?;
        debug!(destination = %self.destination, "mission completed");
        match self.kind {
            MissionKind::Standard => sink.record(SimEvent::MissionCompleted {
                destination: self.destination.clone(),
            }),
            MissionKind::UrgentDelivery { deadline_hours } => {
                sink.record(SimEvent::UrgentDeliveryCompleted { deadline_hours })
            }
        }
        Ok(())
    }

    /// `Completed → Created`, so a replayed cycle can run the mission again.
    pub(crate) fn reset(&mut self) -> Result<(), SimError> {
        self.transition(MissionState::Completed, MissionState::Created)
    }

    fn transition(&mut self, from: MissionState, to: MissionState) -> Result<(), SimError> {
        if self.state != from {
            return Err(SimError::InvalidTransition {
                from: self.state,
                to,
            });
        }
        self.state = to;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy_ecs::prelude::{Entity, World};

    use crate::events::EventLog;
    use crate::vehicle::{Car, Drone, VehicleKind};

    fn handle() -> VehicleHandle {
        VehicleHandle::new(World::new().id(), Entity::from_raw(7))
    }

    #[test]
    fn route_fields_must_be_non_empty() {
        assert_eq!(
            Mission::new("", "CityB", handle()).unwrap_err(),
            ValidationError::EmptyField { field: "origin" }
        );
        assert_eq!(
            Mission::new("CityA", "", handle()).unwrap_err(),
            ValidationError::EmptyField {
                field: "destination"
            }
        );

        let mut mission = Mission::new("CityA", "CityB", handle()).expect("mission");
        assert!(mission.set_destination("").is_err());
        assert_eq!(mission.destination(), "CityB");
    }

    #[test]
    fn urgent_deadline_must_be_positive() {
        assert!(Mission::urgent_delivery("Port1", "Island2", handle(), 0.0).is_err());
        assert!(Mission::urgent_delivery("Port1", "Island2", handle(), -1.0).is_err());
        let mission =
            Mission::urgent_delivery("Port1", "Island2", handle(), 3.0).expect("mission");
        assert_eq!(mission.deadline_hours(), Some(3.0));
    }

    #[test]
    fn start_reports_route_and_moves_vehicle_once() {
        let mut car = Car::new("A1").expect("car");
        let mut log = EventLog::default();
        let mut mission = Mission::new("CityA", "CityB", handle()).expect("mission");

        mission.start(&mut car, &mut log).expect("start");
        assert_eq!(mission.state(), MissionState::Started);
        assert_eq!(
            log.events(),
            &[
                SimEvent::MissionStarted {
                    origin: "CityA".into(),
                    destination: "CityB".into(),
                },
                SimEvent::VehicleMoved {
                    vehicle_id: "A1".into(),
                    kind: VehicleKind::Car,
                },
            ]
        );

        log.clear();
        mission.complete(&mut log).expect("complete");
        assert_eq!(mission.state(), MissionState::Completed);
        assert_eq!(
            log.events(),
            &[SimEvent::MissionCompleted {
                destination: "CityB".into()
            }]
        );
    }

    #[test]
    fn urgent_delivery_reports_deadline_on_both_transitions() {
        let mut drone = Drone::new("D1").expect("drone");
        let mut log = EventLog::default();
        let mut mission =
            Mission::urgent_delivery("Port1", "Island2", handle(), 3.0).expect("mission");

        mission.start(&mut drone, &mut log).expect("start");
        mission.complete(&mut log).expect("complete");

        assert_eq!(
            log.events(),
            &[
                SimEvent::UrgentDeliveryStarted {
                    deadline_hours: 3.0
                },
                SimEvent::VehicleMoved {
                    vehicle_id: "D1".into(),
                    kind: VehicleKind::Drone,
                },
                SimEvent::UrgentDeliveryCompleted {
                    deadline_hours: 3.0
                },
            ]
        );
    }

    #[test]
    fn out_of_order_transitions_are_rejected_without_side_effects() {
        let mut car = Car::new("A1").expect("car");
        let mut log = EventLog::default();
        let mut mission = Mission::new("CityA", "CityB", handle()).expect("mission");

        let err = mission.complete(&mut log).unwrap_err();
        assert!(matches!(
            err,
            SimError::InvalidTransition {
                from: MissionState::Created,
                to: MissionState::Completed
            }
        ));
        assert_eq!(mission.state(), MissionState::Created);
        assert!(log.is_empty());

        mission.start(&mut car, &mut log).expect("start");
        assert!(mission.start(&mut car, &mut log).is_err());
        assert_eq!(log.len(), 2, "second start must not move the vehicle");
    }

    #[test]
    fn reset_allows_a_second_run() {
        let mut car = Car::new("A1").expect("car");
        let mut log = EventLog::default();
        let mut mission = Mission::new("CityA", "CityB", handle()).expect("mission");
        mission.start(&mut car, &mut log).expect("start");
        mission.complete(&mut log).expect("complete");

        mission.reset().expect("reset");
        assert_eq!(mission.state(), MissionState::Created);
        mission.start(&mut car, &mut log).expect("restart");
    }

    #[test]
    fn reset_only_rewinds_completed_missions() {
        let mut car = Car::new("A1").expect("car");
        let mut log = EventLog::default();
        let mut mission = Mission::new("CityA", "CityB", handle()).expect("mission");

        assert!(matches!(
            mission.reset(),
            Err(SimError::InvalidTransition {
                from: MissionState::Created,
                to: MissionState::Created
            })
        ));

        mission.start(&mut car, &mut log).expect("start");
        let err = mission.reset().unwrap_err();
        assert!(matches!(
            err,
            SimError::InvalidTransition {
                from: MissionState::Started,
                to: MissionState::Created
            }
        ));
        assert_eq!(mission.state(), MissionState::Started);
        assert!(mission.start(&mut car, &mut log).is_err());
        let moves = log
            .events()
            .iter()
            .filter(|e| matches!(e, SimEvent::VehicleMoved { .. }))
            .count();
        assert_eq!(moves, 1);
    }
}
