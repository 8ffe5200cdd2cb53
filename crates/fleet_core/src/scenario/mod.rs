//! Scenario setup: declarative fleet descriptions and the builder that turns
//! them into a ready-to-run [crate::environment::Environment].

mod build;
mod params;

pub use build::{build_environment, build_vehicle, random_scenario};
pub use params::{CyclePolicy, EnvironmentConfig, MissionSpec, ScenarioParams, VehicleSpec};
