pub mod capability;
pub mod cargo;
pub mod clock;
pub mod ecs;
pub mod environment;
pub mod error;
pub mod events;
pub mod mission;
pub mod runner;
pub mod scenario;
pub mod telemetry;
pub mod vehicle;

#[cfg(feature = "test-helpers")]
pub mod test_helpers;
