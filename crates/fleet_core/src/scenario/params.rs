use bevy_ecs::prelude::Resource;
use serde::{Deserialize, Serialize};

use crate::error::SimError;
use crate::vehicle::VehicleKind;

/// Default number of completed mission records kept in telemetry.
const DEFAULT_HISTORY_LIMIT: usize = 10_000;

/// How a cycle treats missions that are already completed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CyclePolicy {
    /// Report them as skipped and leave them untouched.
    #[default]
    SkipCompleted,
    /// Reset them to `Created` and run them again.
    Replay,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Resource)]
#[serde(default)]
pub struct EnvironmentConfig {
    pub cycle_policy: CyclePolicy,
    /// Max completed mission records retained by [crate::telemetry::MissionTelemetry].
    pub history_limit: usize,
}

impl Default for EnvironmentConfig {
    fn default() -> Self {
        Self {
            cycle_policy: CyclePolicy::SkipCompleted,
            history_limit: DEFAULT_HISTORY_LIMIT,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VehicleSpec {
    pub kind: VehicleKind,
    pub id: String,
    #[serde(default)]
    pub capacity: Option<f64>,
    #[serde(default)]
    pub location: Option<String>,
}

/// A mission bound to a vehicle by id. Missions with a deadline become urgent deliveries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MissionSpec {
    pub origin: String,
    pub destination: String,
    pub vehicle_id: String,
    #[serde(default)]
    pub deadline_hours: Option<f64>,
}

/// Declarative fleet description. Vehicles and missions are registered in list order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScenarioParams {
    pub vehicles: Vec<VehicleSpec>,
    pub missions: Vec<MissionSpec>,
    pub config: EnvironmentConfig,
}

impl ScenarioParams {
    pub fn from_json_str(json: &str) -> Result<Self, SimError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn with_vehicle(mut self, kind: VehicleKind, id: impl Into<String>) -> Self {
        self.vehicles.push(VehicleSpec {
            kind,
            id: id.into(),
            capacity: None,
            location: None,
        });
        self
    }

    pub fn with_vehicle_spec(mut self, spec: VehicleSpec) -> Self {
        self.vehicles.push(spec);
        self
    }

    pub fn with_mission(
        mut self,
        origin: impl Into<String>,
        destination: impl Into<String>,
        vehicle_id: impl Into<String>,
    ) -> Self {
        self.missions.push(MissionSpec {
            origin: origin.into(),
            destination: destination.into(),
            vehicle_id: vehicle_id.into(),
            deadline_hours: None,
        });
        self
    }

    pub fn with_urgent_mission(
        mut self,
        origin: impl Into<String>,
        destination: impl Into<String>,
        vehicle_id: impl Into<String>,
        deadline_hours: f64,
    ) -> Self {
        self.missions.push(MissionSpec {
            origin: origin.into(),
            destination: destination.into(),
            vehicle_id: vehicle_id.into(),
            deadline_hours: Some(deadline_hours),
        });
        self
    }

    pub fn with_cycle_policy(mut self, policy: CyclePolicy) -> Self {
        self.config.cycle_policy = policy;
        self
    }

    pub fn with_history_limit(mut self, limit: usize) -> Self {
        self.config.history_limit = limit;
        self
    }
}
