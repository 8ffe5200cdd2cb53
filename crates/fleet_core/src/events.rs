//! Structured simulation events and the sinks that receive them.
//!
//! Every operation that reports something takes a `&mut dyn EventSink`, so the
//! model never writes to the console itself. The order in which events reach a
//! sink is the observable trace of a run.

use serde::Serialize;
use tracing::info;

use crate::capability::Capability;
use crate::cargo::{CargoKind, SafetyProtocol};
use crate::vehicle::VehicleKind;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum SimEvent {
    CycleStarted {
        cycle: u64,
        missions: usize,
    },
    CycleFinished {
        cycle: u64,
        processed: usize,
        skipped: usize,
    },
    MissionStarted {
        origin: String,
        destination: String,
    },
    UrgentDeliveryStarted {
        deadline_hours: f64,
    },
    MissionCompleted {
        destination: String,
    },
    UrgentDeliveryCompleted {
        deadline_hours: f64,
    },
    /// A completed mission was left alone by the cycle.
    MissionSkipped {
        origin: String,
        destination: String,
    },
    VehicleMoved {
        vehicle_id: String,
        kind: VehicleKind,
    },
    CargoLoaded {
        vehicle_id: String,
        kind: VehicleKind,
        cargo: CargoKind,
        weight: f64,
    },
    CargoUnloaded {
        vehicle_id: String,
        kind: VehicleKind,
    },
    CapabilityUsed {
        vehicle_id: String,
        kind: VehicleKind,
        capability: Capability,
    },
    SafetyVerified {
        cargo: CargoKind,
        protocol: SafetyProtocol,
    },
}

impl SimEvent {
    pub fn name(&self) -> &'static str {
        match self {
            SimEvent::CycleStarted { .. } => "cycle_started",
            SimEvent::CycleFinished { .. } => "cycle_finished",
            SimEvent::MissionStarted { .. } => "mission_started",
            SimEvent::UrgentDeliveryStarted { .. } => "urgent_delivery_started",
            SimEvent::MissionCompleted { .. } => "mission_completed",
            SimEvent::UrgentDeliveryCompleted { .. } => "urgent_delivery_completed",
            SimEvent::MissionSkipped { .. } => "mission_skipped",
            SimEvent::VehicleMoved { .. } => "vehicle_moved",
            SimEvent::CargoLoaded { .. } => "cargo_loaded",
            SimEvent::CargoUnloaded { .. } => "cargo_unloaded",
            SimEvent::CapabilityUsed { .. } => "capability_used",
            SimEvent::SafetyVerified { .. } => "safety_verified",
        }
    }

    /// True for events that belong to a mission's start/complete transitions.
    pub fn is_mission_transition(&self) -> bool {
        matches!(
            self,
            SimEvent::MissionStarted { .. }
                | SimEvent::UrgentDeliveryStarted { .. }
                | SimEvent::MissionCompleted { .. }
                | SimEvent::UrgentDeliveryCompleted { .. }
        )
    }
}

impl std::fmt::Display for SimEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Hours and weights use Debug so whole numbers keep their decimal ("3.0").
        match self {
            SimEvent::CycleStarted { cycle, missions } => {
                write!(f, "cycle {cycle} started with {missions} missions")
            }
            SimEvent::CycleFinished {
                cycle,
                processed,
                skipped,
            } => write!(
                f,
                "cycle {cycle} finished: {processed} processed, {skipped} skipped"
            ),
            SimEvent::MissionStarted {
                origin,
                destination,
            } => write!(f, "mission started from {origin} to {destination}"),
            SimEvent::UrgentDeliveryStarted { deadline_hours } => write!(
                f,
                "urgent delivery started with a deadline of {deadline_hours:?} hours"
            ),
            SimEvent::MissionCompleted { destination } => {
                write!(f, "mission completed at {destination}")
            }
            SimEvent::UrgentDeliveryCompleted { deadline_hours } => write!(
                f,
                "urgent delivery completed within the {deadline_hours:?} hour deadline"
            ),
            SimEvent::MissionSkipped {
                origin,
                destination,
            } => write!(
                f,
                "mission from {origin} to {destination} already completed, skipped"
            ),
            SimEvent::VehicleMoved { vehicle_id, kind } => {
                write!(f, "{kind} {vehicle_id} moving")
            }
            SimEvent::CargoLoaded {
                vehicle_id,
                kind,
                cargo,
                weight,
            } => write!(
                f,
                "{kind} {vehicle_id} loading {} cargo ({weight:?} kg)",
                cargo.name()
            ),
            SimEvent::CargoUnloaded { vehicle_id, kind } => {
                write!(f, "{kind} {vehicle_id} unloading")
            }
            SimEvent::CapabilityUsed {
                vehicle_id,
                kind,
                capability,
            } => write!(f, "{kind} {vehicle_id}: {capability}"),
            SimEvent::SafetyVerified { cargo, protocol } => {
                write!(f, "{} cargo verified with {protocol:?}", cargo.name())
            }
        }
    }
}

pub trait EventSink {
    fn record(&mut self, event: SimEvent);
}

/// Keeps every event in arrival order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EventLog {
    events: Vec<SimEvent>,
}

impl EventLog {
    pub fn events(&self) -> &[SimEvent] {
        &self.events
    }

    pub fn into_events(self) -> Vec<SimEvent> {
        self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }

    /// Mission start/complete events only, dropping vehicle and cycle chatter.
    pub fn mission_transitions(&self) -> Vec<&SimEvent> {
        self.events
            .iter()
            .filter(|e| e.is_mission_transition())
            .collect()
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&self.events)
    }
}

impl EventSink for EventLog {
    fn record(&mut self, event: SimEvent) {
        self.events.push(event);
    }
}

impl EventSink for Vec<SimEvent> {
    fn record(&mut self, event: SimEvent) {
        self.push(event);
    }
}

/// Drops every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl EventSink for NullSink {
    fn record(&mut self, _event: SimEvent) {}
}

/// Forwards events to `tracing` at info level under the `fleet_core::events` target.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl EventSink for TracingSink {
    fn record(&mut self, event: SimEvent) {
        info!(target: "fleet_core::events", event = event.name(), "{event}");
    }
}
