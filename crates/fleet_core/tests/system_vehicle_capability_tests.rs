use fleet_core::capability::{Autonomous, Capability, Drive, Fly, Recharge, Refuel, Swim};
use fleet_core::cargo::{Cargo, CargoKind};
use fleet_core::events::{EventLog, SimEvent};
use fleet_core::vehicle::{Amphibious, Car, Drone, Submarine, Vehicle, VehicleKind, VehicleOps};

fn fleet() -> Vec<Vehicle> {
    vec![
        Car::new("A1").expect("car").into(),
        Drone::new("D1").expect("drone").into(),
        Amphibious::new("X1").expect("amphibious").into(),
        Submarine::new("S1").expect("submarine").into(),
    ]
}

#[test]
fn move_load_unload_dispatch_to_each_variant() {
    let cargo = Cargo::fragile(5.0).expect("cargo");
    for mut vehicle in fleet() {
        let mut log = EventLog::default();
        vehicle.travel(&mut log);
        vehicle.load(&cargo, &mut log);
        vehicle.unload(&mut log);

        let kind = vehicle.kind();
        let id = vehicle.id().to_string();
        assert_eq!(
            log.events(),
            &[
                SimEvent::VehicleMoved {
                    vehicle_id: id.clone(),
                    kind,
                },
                SimEvent::CargoLoaded {
                    vehicle_id: id.clone(),
                    kind,
                    cargo: CargoKind::Fragile,
                    weight: 5.0,
                },
                SimEvent::CargoUnloaded {
                    vehicle_id: id,
                    kind,
                },
            ]
        );
    }
}

#[test]
fn composed_capabilities_report_through_the_sink() {
    let mut log = EventLog::default();

    let mut car = Car::new("A1").expect("car");
    car.drive(&mut log);
    car.refuel(&mut log);

    let mut drone = Drone::new("D1").expect("drone");
    drone.fly(&mut log);
    drone.recharge(&mut log);
    drone.enter_autonomous_mode(&mut log);

    let mut amphibious = Amphibious::new("X1").expect("amphibious");
    amphibious.drive(&mut log);
    amphibious.swim(&mut log);

    let mut sub = Submarine::new("S1").expect("submarine");
    sub.swim(&mut log);

    let used: Vec<_> = log
        .events()
        .iter()
        .map(|e| match e {
            SimEvent::CapabilityUsed {
                kind, capability, ..
            } => (*kind, *capability),
            other => panic!("unexpected event {other:?}"),
        })
        .collect();
    assert_eq!(
        used,
        vec![
            (VehicleKind::Car, Capability::Drive),
            (VehicleKind::Car, Capability::Refuel),
            (VehicleKind::Drone, Capability::Fly),
            (VehicleKind::Drone, Capability::Recharge),
            (VehicleKind::Drone, Capability::Autonomous),
            (VehicleKind::Amphibious, Capability::Drive),
            (VehicleKind::Amphibious, Capability::Swim),
            (VehicleKind::Submarine, Capability::Swim),
        ]
    );
    for (kind, capability) in used {
        assert!(kind.has(capability), "{kind} should compose {capability}");
    }
}

fn cross_water<V: Swim>(vehicle: &mut V, log: &mut EventLog) {
    vehicle.swim(log);
    vehicle.travel(log);
}

#[test]
fn generic_capability_bounds_accept_only_composing_variants() {
    let mut log = EventLog::default();
    cross_water(&mut Amphibious::new("X1").expect("amphibious"), &mut log);
    cross_water(&mut Submarine::new("S1").expect("submarine"), &mut log);
    assert_eq!(log.len(), 4);
}

#[test]
fn attribute_setters_validate_and_keep_prior_state() {
    let mut vehicle: Vehicle = Car::new("A1").expect("car").into();

    assert!(vehicle.set_capacity(0.0).is_err());
    assert!(vehicle.set_capacity(-5.0).is_err());
    vehicle.set_capacity(1.0).expect("capacity");
    assert_eq!(vehicle.capacity(), Some(1.0));

    assert!(vehicle.set_id("").is_err());
    assert_eq!(vehicle.id(), "A1");

    vehicle.set_location("Depot").expect("location");
    assert!(vehicle.set_location("").is_err());
    assert_eq!(vehicle.location(), Some("Depot"));
}

#[test]
fn cargo_verification_is_explicit() {
    let mut log = EventLog::default();
    let mut car = Car::new("A1").expect("car");
    let cargo = Cargo::military(20.0).expect("cargo");

    car.load(&cargo, &mut log);
    assert!(
        !log
            .events()
            .iter()
            .any(|e| matches!(e, SimEvent::SafetyVerified { .. })),
        "loading must not verify safety"
    );

    cargo.verify_safety(&mut log);
    assert!(matches!(
        log.events().last(),
        Some(SimEvent::SafetyVerified {
            cargo: CargoKind::Military,
            ..
        })
    ));
}
