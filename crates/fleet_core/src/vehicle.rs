//! Vehicle variants and the operations every variant supplies.
//!
//! Each variant is its own type composing a fixed set of capability traits
//! from [crate::capability]. [Vehicle] is the closed sum over the variants and
//! is what the environment stores as an ECS component.

use bevy_ecs::prelude::Component;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::capability::{Autonomous, Capability, Drive, Fly, Recharge, Refuel, Swim};
use crate::cargo::Cargo;
use crate::error::{require_non_empty, require_positive, ValidationError};
use crate::events::{EventSink, SimEvent};

/// Share of a full tank or battery spent per move.
pub const ENERGY_PER_MOVE: f64 = 0.1;

const FULL: f64 = 1.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VehicleKind {
    Car,
    Drone,
    Amphibious,
    Submarine,
}

impl VehicleKind {
    pub const ALL: [VehicleKind; 4] = [
        VehicleKind::Car,
        VehicleKind::Drone,
        VehicleKind::Amphibious,
        VehicleKind::Submarine,
    ];

    /// The capability set composed by this variant's type.
    pub fn capabilities(self) -> &'static [Capability] {
        match self {
            VehicleKind::Car => &[Capability::Drive, Capability::Refuel],
            VehicleKind::Drone => &[
                Capability::Fly,
                Capability::Recharge,
                Capability::Autonomous,
            ],
            VehicleKind::Amphibious => &[Capability::Drive, Capability::Swim],
            VehicleKind::Submarine => &[Capability::Swim],
        }
    }

    pub fn has(self, capability: Capability) -> bool {
        self.capabilities().contains(&capability)
    }

    pub fn name(self) -> &'static str {
        match self {
            VehicleKind::Car => "car",
            VehicleKind::Drone => "drone",
            VehicleKind::Amphibious => "amphibious",
            VehicleKind::Submarine => "submarine",
        }
    }
}

impl std::fmt::Display for VehicleKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Identity, capacity and location shared by every variant.
///
/// Capacity and location stay unset until assigned. Every setter validates its
/// input and leaves the field untouched on failure.
#[derive(Debug, Clone, PartialEq)]
pub struct VehicleProfile {
    id: String,
    capacity: Option<f64>,
    location: Option<String>,
}

impl VehicleProfile {
    pub fn new(id: impl Into<String>) -> Result<Self, ValidationError> {
        Ok(Self {
            id: require_non_empty("id", id.into())?,
            capacity: None,
            location: None,
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn capacity(&self) -> Option<f64> {
        self.capacity
    }

    pub fn location(&self) -> Option<&str> {
        self.location.as_deref()
    }

    pub fn set_id(&mut self, id: impl Into<String>) -> Result<(), ValidationError> {
        self.id = require_non_empty("id", id.into())?;
        Ok(())
    }

    pub fn set_capacity(&mut self, capacity: f64) -> Result<(), ValidationError> {
        self.capacity = Some(require_positive("capacity", capacity)?);
        Ok(())
    }

    pub fn set_location(&mut self, location: impl Into<String>) -> Result<(), ValidationError> {
        self.location = Some(require_non_empty("location", location.into())?);
        Ok(())
    }
}

/// Operations every vehicle variant implements for itself.
///
/// `travel` is the vehicle's move operation.
pub trait VehicleOps {
    fn kind(&self) -> VehicleKind;
    fn profile(&self) -> &VehicleProfile;
    fn profile_mut(&mut self) -> &mut VehicleProfile;

    fn travel(&mut self, sink: &mut dyn EventSink);
    fn load(&mut self, cargo: &Cargo, sink: &mut dyn EventSink);
    fn unload(&mut self, sink: &mut dyn EventSink);

    fn id(&self) -> &str {
        self.profile().id()
    }

    fn capacity(&self) -> Option<f64> {
        self.profile().capacity()
    }

    fn location(&self) -> Option<&str> {
        self.profile().location()
    }

    fn set_id(&mut self, id: &str) -> Result<(), ValidationError> {
        self.profile_mut().set_id(id)
    }

    fn set_capacity(&mut self, capacity: f64) -> Result<(), ValidationError> {
        self.profile_mut().set_capacity(capacity)
    }

    fn set_location(&mut self, location: &str) -> Result<(), ValidationError> {
        self.profile_mut().set_location(location)
    }

    fn with_capacity(mut self, capacity: f64) -> Result<Self, ValidationError>
    where
        Self: Sized,
    {
        self.set_capacity(capacity)?;
        Ok(self)
    }

    fn with_location(mut self, location: &str) -> Result<Self, ValidationError>
    where
        Self: Sized,
    {
        self.set_location(location)?;
        Ok(self)
    }
}

fn moved(profile: &VehicleProfile, kind: VehicleKind) -> SimEvent {
    SimEvent::VehicleMoved {
        vehicle_id: profile.id().to_string(),
        kind,
    }
}

fn loaded(profile: &VehicleProfile, kind: VehicleKind, cargo: &Cargo) -> SimEvent {
    if let Some(capacity) = profile.capacity() {
        if cargo.weight() > capacity {
            warn!(
                vehicle_id = profile.id(),
                weight = cargo.weight(),
                capacity,
                "cargo heavier than vehicle capacity"
            );
        }
    }
    SimEvent::CargoLoaded {
        vehicle_id: profile.id().to_string(),
        kind,
        cargo: cargo.kind(),
        weight: cargo.weight(),
    }
}

fn unloaded(profile: &VehicleProfile, kind: VehicleKind) -> SimEvent {
    SimEvent::CargoUnloaded {
        vehicle_id: profile.id().to_string(),
        kind,
    }
}

fn used(profile: &VehicleProfile, kind: VehicleKind, capability: Capability) -> SimEvent {
    SimEvent::CapabilityUsed {
        vehicle_id: profile.id().to_string(),
        kind,
        capability,
    }
}

fn drain(level: f64) -> f64 {
    (level - ENERGY_PER_MOVE).max(0.0)
}

/// Ground vehicle running on fuel.
#[derive(Debug, Clone, PartialEq)]
pub struct Car {
    profile: VehicleProfile,
    fuel_level: f64,
}

impl Car {
    pub fn new(id: impl Into<String>) -> Result<Self, ValidationError> {
        Ok(Self {
            profile: VehicleProfile::new(id)?,
            fuel_level: FULL,
        })
    }
}

impl VehicleOps for Car {
    fn kind(&self) -> VehicleKind {
        VehicleKind::Car
    }

    fn profile(&self) -> &VehicleProfile {
        &self.profile
    }

    fn profile_mut(&mut self) -> &mut VehicleProfile {
        &mut self.profile
    }

    fn travel(&mut self, sink: &mut dyn EventSink) {
        self.fuel_level = drain(self.fuel_level);
        sink.record(moved(&self.profile, VehicleKind::Car));
    }

    fn load(&mut self, cargo: &Cargo, sink: &mut dyn EventSink) {
        sink.record(loaded(&self.profile, VehicleKind::Car, cargo));
    }

    fn unload(&mut self, sink: &mut dyn EventSink) {
        sink.record(unloaded(&self.profile, VehicleKind::Car));
    }
}

impl Drive for Car {
    fn drive(&mut self, sink: &mut dyn EventSink) {
        sink.record(used(&self.profile, VehicleKind::Car, Capability::Drive));
    }
}

impl Refuel for Car {
    fn refuel(&mut self, sink: &mut dyn EventSink) {
        self.fuel_level = FULL;
        sink.record(used(&self.profile, VehicleKind::Car, Capability::Refuel));
    }

    fn fuel_level(&self) -> f64 {
        self.fuel_level
    }
}

/// Battery-powered flyer that can run without an operator.
#[derive(Debug, Clone, PartialEq)]
pub struct Drone {
    profile: VehicleProfile,
    battery_level: f64,
    autonomous: bool,
}

impl Drone {
    pub fn new(id: impl Into<String>) -> Result<Self, ValidationError> {
        Ok(Self {
            profile: VehicleProfile::new(id)?,
            battery_level: FULL,
            autonomous: false,
        })
    }
}

impl VehicleOps for Drone {
    fn kind(&self) -> VehicleKind {
        VehicleKind::Drone
    }

    fn profile(&self) -> &VehicleProfile {
        &self.profile
    }

    fn profile_mut(&mut self) -> &mut VehicleProfile {
        &mut self.profile
    }

    fn travel(&mut self, sink: &mut dyn EventSink) {
        self.battery_level = drain(self.battery_level);
        sink.record(moved(&self.profile, VehicleKind::Drone));
    }

    fn load(&mut self, cargo: &Cargo, sink: &mut dyn EventSink) {
        sink.record(loaded(&self.profile, VehicleKind::Drone, cargo));
    }

    fn unload(&mut self, sink: &mut dyn EventSink) {
        sink.record(unloaded(&self.profile, VehicleKind::Drone));
    }
}

impl Fly for Drone {
    fn fly(&mut self, sink: &mut dyn EventSink) {
        sink.record(used(&self.profile, VehicleKind::Drone, Capability::Fly));
    }
}

impl Recharge for Drone {
    fn recharge(&mut self, sink: &mut dyn EventSink) {
        self.battery_level = FULL;
        sink.record(used(&self.profile, VehicleKind::Drone, Capability::Recharge));
    }

    fn battery_level(&self) -> f64 {
        self.battery_level
    }
}

impl Autonomous for Drone {
    fn enter_autonomous_mode(&mut self, sink: &mut dyn EventSink) {
        self.autonomous = true;
        sink.record(used(
            &self.profile,
            VehicleKind::Drone,
            Capability::Autonomous,
        ));
    }

    fn is_autonomous(&self) -> bool {
        self.autonomous
    }
}

/// Drives on land and swims on water.
#[derive(Debug, Clone, PartialEq)]
pub struct Amphibious {
    profile: VehicleProfile,
}

impl Amphibious {
    pub fn new(id: impl Into<String>) -> Result<Self, ValidationError> {
        Ok(Self {
            profile: VehicleProfile::new(id)?,
        })
    }
}

impl VehicleOps for Amphibious {
    fn kind(&self) -> VehicleKind {
        VehicleKind::Amphibious
    }

    fn profile(&self) -> &VehicleProfile {
        &self.profile
    }

    fn profile_mut(&mut self) -> &mut VehicleProfile {
        &mut self.profile
    }

    fn travel(&mut self, sink: &mut dyn EventSink) {
        sink.record(moved(&self.profile, VehicleKind::Amphibious));
    }

    fn load(&mut self, cargo: &Cargo, sink: &mut dyn EventSink) {
        sink.record(loaded(&self.profile, VehicleKind::Amphibious, cargo));
    }

    fn unload(&mut self, sink: &mut dyn EventSink) {
        sink.record(unloaded(&self.profile, VehicleKind::Amphibious));
    }
}

impl Drive for Amphibious {
    fn drive(&mut self, sink: &mut dyn EventSink) {
        sink.record(used(
            &self.profile,
            VehicleKind::Amphibious,
            Capability::Drive,
        ));
    }
}

impl Swim for Amphibious {
    fn swim(&mut self, sink: &mut dyn EventSink) {
        sink.record(used(
            &self.profile,
            VehicleKind::Amphibious,
            Capability::Swim,
        ));
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Submarine {
    profile: VehicleProfile,
}

impl Submarine {
    pub fn new(id: impl Into<String>) -> Result<Self, ValidationError> {
        Ok(Self {
            profile: VehicleProfile::new(id)?,
        })
    }
}

impl VehicleOps for Submarine {
    fn kind(&self) -> VehicleKind {
        VehicleKind::Submarine
    }

    fn profile(&self) -> &VehicleProfile {
        &self.profile
    }

    fn profile_mut(&mut self) -> &mut VehicleProfile {
        &mut self.profile
    }

    fn travel(&mut self, sink: &mut dyn EventSink) {
        sink.record(moved(&self.profile, VehicleKind::Submarine));
    }

    fn load(&mut self, cargo: &Cargo, sink: &mut dyn EventSink) {
        sink.record(loaded(&self.profile, VehicleKind::Submarine, cargo));
    }

    fn unload(&mut self, sink: &mut dyn EventSink) {
        sink.record(unloaded(&self.profile, VehicleKind::Submarine));
    }
}

impl Swim for Submarine {
    fn swim(&mut self, sink: &mut dyn EventSink) {
        sink.record(used(
            &self.profile,
            VehicleKind::Submarine,
            Capability::Swim,
        ));
    }
}

/// Any registered vehicle. Capability operations are reached by matching on
/// the variant (or through the `as_*` accessors), never through this type.
#[derive(Debug, Clone, PartialEq, Component)]
pub enum Vehicle {
    Car(Car),
    Drone(Drone),
    Amphibious(Amphibious),
    Submarine(Submarine),
}

impl Vehicle {
    fn ops(&self) -> &dyn VehicleOps {
        match self {
            Vehicle::Car(v) => v,
            Vehicle::Drone(v) => v,
            Vehicle::Amphibious(v) => v,
            Vehicle::Submarine(v) => v,
        }
    }

    fn ops_mut(&mut self) -> &mut dyn VehicleOps {
        match self {
            Vehicle::Car(v) => v,
            Vehicle::Drone(v) => v,
            Vehicle::Amphibious(v) => v,
            Vehicle::Submarine(v) => v,
        }
    }

    pub fn as_car_mut(&mut self) -> Option<&mut Car> {
        match self {
            Vehicle::Car(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_drone_mut(&mut self) -> Option<&mut Drone> {
        match self {
            Vehicle::Drone(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_amphibious_mut(&mut self) -> Option<&mut Amphibious> {
        match self {
            Vehicle::Amphibious(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_submarine_mut(&mut self) -> Option<&mut Submarine> {
        match self {
            Vehicle::Submarine(v) => Some(v),
            _ => None,
        }
    }
}

impl VehicleOps for Vehicle {
    fn kind(&self) -> VehicleKind {
        self.ops().kind()
    }

    fn profile(&self) -> &VehicleProfile {
        self.ops().profile()
    }

    fn profile_mut(&mut self) -> &mut VehicleProfile {
        self.ops_mut().profile_mut()
    }

    fn travel(&mut self, sink: &mut dyn EventSink) {
        self.ops_mut().travel(sink);
    }

    fn load(&mut self, cargo: &Cargo, sink: &mut dyn EventSink) {
        self.ops_mut().load(cargo, sink);
    }

    fn unload(&mut self, sink: &mut dyn EventSink) {
        self.ops_mut().unload(sink);
    }
}

impl From<Car> for Vehicle {
    fn from(v: Car) -> Self {
        Vehicle::Car(v)
    }
}

impl From<Drone> for Vehicle {
    fn from(v: Drone) -> Self {
        Vehicle::Drone(v)
    }
}

impl From<Amphibious> for Vehicle {
    fn from(v: Amphibious) -> Self {
        Vehicle::Amphibious(v)
    }
}

impl From<Submarine> for Vehicle {
    fn from(v: Submarine) -> Self {
        Vehicle::Submarine(v)
    }
}
