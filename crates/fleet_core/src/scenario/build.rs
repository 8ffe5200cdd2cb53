use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

use crate::environment::Environment;
use crate::error::{SimError, ValidationError};
use crate::mission::Mission;
use crate::scenario::params::{MissionSpec, ScenarioParams, VehicleSpec};
use crate::vehicle::{Amphibious, Car, Drone, Submarine, Vehicle, VehicleKind, VehicleOps};

/// Place names used by [random_scenario].
const PLACES: [&str; 8] = [
    "Depot",
    "CityA",
    "CityB",
    "Port1",
    "Island2",
    "Harbor",
    "Airfield",
    "Warehouse",
];

/// Share of generated missions that are urgent deliveries.
const URGENT_SHARE: f64 = 0.25;

const CAPACITY_RANGE: std::ops::Range<f64> = 10.0..500.0;
const DEADLINE_RANGE_HOURS: std::ops::Range<f64> = 1.0..48.0;

pub fn build_vehicle(spec: &VehicleSpec) -> Result<Vehicle, ValidationError> {
    let id = spec.id.as_str();
    let mut vehicle: Vehicle = match spec.kind {
        VehicleKind::Car => Car::new(id)?.into(),
        VehicleKind::Drone => Drone::new(id)?.into(),
        VehicleKind::Amphibious => Amphibious::new(id)?.into(),
        VehicleKind::Submarine => Submarine::new(id)?.into(),
    };
    if let Some(capacity) = spec.capacity {
        vehicle.set_capacity(capacity)?;
    }
    if let Some(location) = &spec.location {
        vehicle.set_location(location)?;
    }
    Ok(vehicle)
}

fn build_mission(env: &Environment, spec: &MissionSpec) -> Result<Mission, ValidationError> {
    let vehicle = env
        .find_vehicle(&spec.vehicle_id)
        .ok_or_else(|| ValidationError::UnknownVehicleId(spec.vehicle_id.clone()))?;
    match spec.deadline_hours {
        Some(deadline) => Mission::urgent_delivery(
            spec.origin.as_str(),
            spec.destination.as_str(),
            vehicle,
            deadline,
        ),
        None => Mission::new(spec.origin.as_str(), spec.destination.as_str(), vehicle),
    }
}

/// Registers every vehicle, then every mission, in list order. Missions name
/// their vehicle by id and bind to the first vehicle registered with it.
pub fn build_environment(params: &ScenarioParams) -> Result<Environment, SimError> {
    let mut env = Environment::with_config(params.config);
    for spec in &params.vehicles {
        env.register_vehicle(build_vehicle(spec)?);
    }
    for spec in &params.missions {
        let mission = build_mission(&env, spec)?;
        env.register_mission(mission)?;
    }
    debug!(
        vehicles = env.vehicle_count(),
        missions = env.mission_count(),
        "scenario built"
    );
    Ok(env)
}

/// Seeded random fleet: the same seed always yields the same scenario.
/// No missions are generated for an empty fleet.
pub fn random_scenario(seed: u64, vehicles: usize, missions: usize) -> ScenarioParams {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut params = ScenarioParams::default();

    for i in 0..vehicles {
        let kind = VehicleKind::ALL[rng.gen_range(0..VehicleKind::ALL.len())];
        params = params.with_vehicle_spec(VehicleSpec {
            kind,
            id: format!("{}-{i}", kind.name()),
            capacity: Some(rng.gen_range(CAPACITY_RANGE)),
            location: Some(PLACES[rng.gen_range(0..PLACES.len())].to_string()),
        });
    }
    if params.vehicles.is_empty() {
        return params;
    }

    for _ in 0..missions {
        let origin = rng.gen_range(0..PLACES.len());
        let destination = (origin + rng.gen_range(1..PLACES.len())) % PLACES.len();
        let vehicle_id = params.vehicles[rng.gen_range(0..params.vehicles.len())]
            .id
            .clone();
        params = if rng.gen_bool(URGENT_SHARE) {
            let deadline = rng.gen_range(DEADLINE_RANGE_HOURS);
            params.with_urgent_mission(PLACES[origin], PLACES[destination], vehicle_id, deadline)
        } else {
            params.with_mission(PLACES[origin], PLACES[destination], vehicle_id)
        };
    }
    params
}
