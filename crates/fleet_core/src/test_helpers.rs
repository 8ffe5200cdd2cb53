//! Test helpers for common fleet setup.
//!
//! Shared fixtures so integration tests and benchmarks build the same fleets.

use crate::ecs::{MissionHandle, VehicleHandle};
use crate::environment::Environment;
use crate::mission::Mission;
use crate::vehicle::{Car, Drone, VehicleOps};

/// Deadline used by the reference urgent delivery.
pub const REFERENCE_DEADLINE_HOURS: f64 = 3.0;

/// Handles into the environment built by [reference_fleet].
#[derive(Debug, Clone, Copy)]
pub struct ReferenceFleet {
    pub car: VehicleHandle,
    pub drone: VehicleHandle,
    pub delivery: MissionHandle,
    pub urgent: MissionHandle,
}

/// Car "A1" (capacity 100, at "Depot").
///
/// # Panics
///
/// Panics if the fixed attributes fail validation (should never happen).
pub fn depot_car() -> Car {
    Car::new("A1")
        .and_then(|car| car.with_capacity(100.0))
        .and_then(|car| car.with_location("Depot"))
        .expect("reference car attributes are valid")
}

/// Drone "D1" with no capacity or location set.
///
/// # Panics
///
/// Panics if the fixed id fails validation (should never happen).
pub fn scout_drone() -> Drone {
    Drone::new("D1").expect("reference drone id is valid")
}

/// Car A1 and drone D1, with a CityA→CityB mission on A1 followed by an
/// urgent Port1→Island2 delivery on D1.
///
/// # Panics
///
/// Panics if registration fails (should never happen).
pub fn reference_fleet() -> (Environment, ReferenceFleet) {
    let mut env = Environment::new();
    let car = env.register_vehicle(depot_car());
    let drone = env.register_vehicle(scout_drone());
    let delivery = env
        .register_mission(Mission::new("CityA", "CityB", car).expect("valid mission"))
        .expect("car is registered");
    let urgent = env
        .register_mission(
            Mission::urgent_delivery("Port1", "Island2", drone, REFERENCE_DEADLINE_HOURS)
                .expect("valid urgent delivery"),
        )
        .expect("drone is registered");
    (
        env,
        ReferenceFleet {
            car,
            drone,
            delivery,
            urgent,
        },
    )
}
