use fleet_core::events::{EventLog, SimEvent};
use fleet_core::mission::MissionState;
use fleet_core::test_helpers::reference_fleet;
use fleet_core::vehicle::{VehicleKind, VehicleOps};

#[test]
fn reference_fleet_single_cycle_trace() {
    let (mut env, fleet) = reference_fleet();
    let car = env.vehicle(fleet.car).expect("car");
    assert_eq!(car.capacity(), Some(100.0));
    assert_eq!(car.location(), Some("Depot"));

    let mut log = EventLog::default();
    let report = env.run_cycle(&mut log).expect("cycle");

    assert_eq!(
        log.events(),
        &[
            SimEvent::CycleStarted {
                cycle: 1,
                missions: 2
            },
            SimEvent::MissionStarted {
                origin: "CityA".into(),
                destination: "CityB".into(),
            },
            SimEvent::VehicleMoved {
                vehicle_id: "A1".into(),
                kind: VehicleKind::Car,
            },
            SimEvent::MissionCompleted {
                destination: "CityB".into()
            },
            SimEvent::UrgentDeliveryStarted {
                deadline_hours: 3.0
            },
            SimEvent::VehicleMoved {
                vehicle_id: "D1".into(),
                kind: VehicleKind::Drone,
            },
            SimEvent::UrgentDeliveryCompleted {
                deadline_hours: 3.0
            },
            SimEvent::CycleFinished {
                cycle: 1,
                processed: 2,
                skipped: 0
            },
        ]
    );

    let vehicles: Vec<_> = report.outcomes.iter().map(|o| o.vehicle_id.as_str()).collect();
    assert_eq!(vehicles, vec!["A1", "D1"]);
    for handle in [fleet.delivery, fleet.urgent] {
        assert_eq!(
            env.mission(handle).map(|m| m.state()),
            Some(MissionState::Completed)
        );
    }

    let records: Vec<_> = env
        .telemetry()
        .completed()
        .map(|r| (r.vehicle_id.as_str(), r.deadline_hours, r.cycle))
        .collect();
    assert_eq!(records, vec![("A1", None, 1), ("D1", Some(3.0), 1)]);
}

#[test]
fn trace_serializes_to_json() {
    let (mut env, _) = reference_fleet();
    let mut log = EventLog::default();
    env.run_cycle(&mut log).expect("cycle");

    let json = log.to_json().expect("json");
    let value: serde_json::Value = serde_json::from_str(&json).expect("parse");
    let events = value.as_array().expect("array");
    assert_eq!(events.len(), log.len());
    assert_eq!(events[1]["event"], "mission_started");
    assert_eq!(events[1]["origin"], "CityA");
    assert_eq!(events[2]["kind"], "car");
    assert_eq!(events[4]["deadline_hours"], 3.0);
}
