use serde::{Deserialize, Serialize};

use crate::error::{require_positive, ValidationError};
use crate::events::{EventSink, SimEvent};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CargoKind {
    Fragile,
    Military,
}

/// Safety procedure applied when a caller verifies a load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SafetyProtocol {
    /// Extra padding and vibration damping for fragile goods.
    AntiVibration,
    /// Restricted handling for military goods.
    AccessRestriction,
}

impl CargoKind {
    pub fn safety_protocol(self) -> SafetyProtocol {
        match self {
            CargoKind::Fragile => SafetyProtocol::AntiVibration,
            CargoKind::Military => SafetyProtocol::AccessRestriction,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            CargoKind::Fragile => "fragile",
            CargoKind::Military => "military",
        }
    }
}

/// A unit of cargo. It does not know which vehicle carries it; vehicles only
/// borrow it for the duration of a `load` call.
#[derive(Debug, Clone, PartialEq)]
pub struct Cargo {
    kind: CargoKind,
    weight: f64,
}

impl Cargo {
    pub fn new(kind: CargoKind, weight: f64) -> Result<Self, ValidationError> {
        Ok(Self {
            kind,
            weight: require_positive("weight", weight)?,
        })
    }

    pub fn fragile(weight: f64) -> Result<Self, ValidationError> {
        Self::new(CargoKind::Fragile, weight)
    }

    pub fn military(weight: f64) -> Result<Self, ValidationError> {
        Self::new(CargoKind::Military, weight)
    }

    pub fn kind(&self) -> CargoKind {
        self.kind
    }

    pub fn weight(&self) -> f64 {
        self.weight
    }

    pub fn set_weight(&mut self, weight: f64) -> Result<(), ValidationError> {
        self.weight = require_positive("weight", weight)?;
        Ok(())
    }

    /// Runs the kind-specific safety check. Loading never triggers this.
    pub fn verify_safety(&self, sink: &mut dyn EventSink) -> SafetyProtocol {
        let protocol = self.kind.safety_protocol();
        sink.record(SimEvent::SafetyVerified {
            cargo: self.kind,
            protocol,
        });
        protocol
    }
}

impl std::fmt::Display for Cargo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} cargo ({:?} kg)", self.kind.name(), self.weight)
    }
}
