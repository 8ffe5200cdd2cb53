//! Simulation runner: advances an environment cycle by cycle.
//!
//! The environment itself only knows how to run one cycle; these helpers loop
//! over it for callers that want several, optionally inspecting the state
//! after each one.

use tracing::info;

use crate::environment::Environment;
use crate::error::SimError;
use crate::events::EventSink;
use crate::telemetry::CycleReport;

/// Runs `cycles` cycles and returns their reports in order.
pub fn run_cycles(
    env: &mut Environment,
    cycles: usize,
    sink: &mut dyn EventSink,
) -> Result<Vec<CycleReport>, SimError> {
    run_cycles_with_hook(env, cycles, sink, |_, _| {})
}

/// Runs `cycles` cycles and invokes `hook` after each one completes.
pub fn run_cycles_with_hook<F>(
    env: &mut Environment,
    cycles: usize,
    sink: &mut dyn EventSink,
    mut hook: F,
) -> Result<Vec<CycleReport>, SimError>
where
    F: FnMut(&Environment, &CycleReport),
{
    let mut reports = Vec::with_capacity(cycles);
    for _ in 0..cycles {
        let report = env.run_cycle(sink)?;
        hook(env, &report);
        reports.push(report);
    }
    Ok(reports)
}

/// Runs cycles until one processes no mission or `max_cycles` is reached.
/// Returns the number of cycles executed, including the idle one.
///
/// Under [crate::scenario::CyclePolicy::Replay] missions never settle, so this
/// always runs `max_cycles`.
pub fn run_until_settled(
    env: &mut Environment,
    max_cycles: usize,
    sink: &mut dyn EventSink,
) -> Result<usize, SimError> {
    let mut cycles = 0;
    while cycles < max_cycles {
        let report = env.run_cycle(sink)?;
        cycles += 1;
        if report.processed() == 0 {
            break;
        }
    }
    info!(cycles, "simulation settled");
    Ok(cycles)
}
