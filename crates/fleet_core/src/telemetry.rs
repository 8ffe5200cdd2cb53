//! Telemetry / KPIs: cycle reports and a rolling record of completed missions.

use std::collections::VecDeque;

use bevy_ecs::prelude::Resource;

use crate::ecs::MissionHandle;
use crate::mission::MissionKind;

/// What a cycle did with one queued mission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissionDisposition {
    /// Ran `start` then `complete`.
    Completed,
    /// Had already been started by hand; the cycle only completed it.
    Resumed,
    /// Was already completed and ran again under [crate::scenario::CyclePolicy::Replay].
    Replayed,
    /// Was already completed and left alone.
    Skipped,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MissionOutcome {
    pub mission: MissionHandle,
    pub vehicle_id: String,
    pub kind: MissionKind,
    pub disposition: MissionDisposition,
}

/// Outcomes of one cycle, in processing (registration) order.
#[derive(Debug, Clone, PartialEq)]
pub struct CycleReport {
    pub cycle: u64,
    pub outcomes: Vec<MissionOutcome>,
}

impl CycleReport {
    pub fn new(cycle: u64) -> Self {
        Self {
            cycle,
            outcomes: Vec::new(),
        }
    }

    /// Missions that went through at least one transition this cycle.
    pub fn processed(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| o.disposition != MissionDisposition::Skipped)
            .count()
    }

    pub fn skipped(&self) -> usize {
        self.outcomes.len() - self.processed()
    }
}

/// One mission completion, recorded when `complete` succeeds inside a cycle.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletedMissionRecord {
    pub mission: MissionHandle,
    pub vehicle_id: String,
    pub origin: String,
    pub destination: String,
    pub deadline_hours: Option<f64>,
    pub cycle: u64,
}

/// Completed missions, newest last, capped at `limit` entries.
#[derive(Debug, Default, Resource)]
pub struct MissionTelemetry {
    completed: VecDeque<CompletedMissionRecord>,
    completed_total: u64,
    limit: usize,
}

impl MissionTelemetry {
    pub fn with_limit(limit: usize) -> Self {
        Self {
            completed: VecDeque::new(),
            completed_total: 0,
            limit,
        }
    }

    pub fn record(&mut self, record: CompletedMissionRecord) {
        self.completed_total += 1;
        if self.limit == 0 {
            return;
        }
        while self.completed.len() >= self.limit {
            self.completed.pop_front();
        }
        self.completed.push_back(record);
    }

    pub fn completed(&self) -> impl Iterator<Item = &CompletedMissionRecord> {
        self.completed.iter()
    }

    /// Every completion seen, including records already evicted.
    pub fn completed_total(&self) -> u64 {
        self.completed_total
    }

    pub fn urgent_completed(&self) -> usize {
        self.completed
            .iter()
            .filter(|r| r.deadline_hours.is_some())
            .count()
    }
}
