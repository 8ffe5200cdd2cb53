//! Load tests for fleet_core: cycle throughput on large generated fleets.

use fleet_core::events::NullSink;
use fleet_core::runner::run_cycles;
use fleet_core::scenario::{build_environment, random_scenario, CyclePolicy};
use std::time::Instant;

#[test]
#[ignore] // Only run explicitly: cargo test --package fleet_core --test load_tests -- --ignored
fn test_sustained_replay_load() {
    let params = random_scenario(42, 500, 10_000).with_cycle_policy(CyclePolicy::Replay);
    let mut env = build_environment(&params).expect("environment");

    let start = Instant::now();
    let reports = run_cycles(&mut env, 20, &mut NullSink).expect("cycles");
    let duration = start.elapsed();

    let missions: usize = reports.iter().map(|r| r.processed()).sum();
    let missions_per_sec = missions as f64 / duration.as_secs_f64();
    println!(
        "Sustained replay load: {} missions in {:.2}s ({:.0} missions/sec)",
        missions,
        duration.as_secs_f64(),
        missions_per_sec
    );

    assert_eq!(missions, 200_000);
    assert!(
        missions_per_sec > 10_000.0,
        "Should process >10000 missions/sec, got {:.0}",
        missions_per_sec
    );
}
