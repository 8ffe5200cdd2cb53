//! Capability traits composed by vehicle variants.
//!
//! Each trait is implemented only by the variants that carry the capability, so
//! asking a vehicle for something it cannot do is rejected by the compiler:
//!
//! ```compile_fail
//! use fleet_core::capability::Fly;
//! use fleet_core::events::NullSink;
//! use fleet_core::vehicle::Car;
//!
//! let mut car = Car::new("A1").unwrap();
//! car.fly(&mut NullSink);
//! ```
//!
//! ```compile_fail
//! use fleet_core::capability::Drive;
//! use fleet_core::events::NullSink;
//! use fleet_core::vehicle::Submarine;
//!
//! let mut sub = Submarine::new("S1").unwrap();
//! sub.drive(&mut NullSink);
//! ```

use serde::{Deserialize, Serialize};

use crate::events::EventSink;
use crate::vehicle::VehicleOps;

/// Names a capability for reporting. Does not gate anything at runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Capability {
    Drive,
    Fly,
    Swim,
    Recharge,
    Refuel,
    Autonomous,
}

impl Capability {
    pub fn name(self) -> &'static str {
        match self {
            Capability::Drive => "drive",
            Capability::Fly => "fly",
            Capability::Swim => "swim",
            Capability::Recharge => "recharge",
            Capability::Refuel => "refuel",
            Capability::Autonomous => "autonomous",
        }
    }
}

impl std::fmt::Display for Capability {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

pub trait Drive: VehicleOps {
    fn drive(&mut self, sink: &mut dyn EventSink);
}

pub trait Fly: VehicleOps {
    fn fly(&mut self, sink: &mut dyn EventSink);
}

pub trait Swim: VehicleOps {
    fn swim(&mut self, sink: &mut dyn EventSink);
}

/// Battery-powered vehicles.
pub trait Recharge: VehicleOps {
    fn recharge(&mut self, sink: &mut dyn EventSink);
    /// Fraction of a full charge, in `[0, 1]`.
    fn battery_level(&self) -> f64;
}

/// Fuel-powered vehicles.
pub trait Refuel: VehicleOps {
    fn refuel(&mut self, sink: &mut dyn EventSink);
    /// Fraction of a full tank, in `[0, 1]`.
    fn fuel_level(&self) -> f64;
}

pub trait Autonomous: VehicleOps {
    fn enter_autonomous_mode(&mut self, sink: &mut dyn EventSink);
    fn is_autonomous(&self) -> bool;
}
