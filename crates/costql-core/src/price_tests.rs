use crate::{Bounds, Price, WorkType};

fn b(min: f64, avg: f64, p95: f64, max: f64) -> Bounds {
    Bounds::new(min, avg, p95, max).unwrap()
}

#[test]
fn free_iff_every_slot_is_zero() {
    assert!(Price::FREE.is_free());
    assert!(Price::of(WorkType::BulkJoin, Bounds::ALWAYS_0).is_free());
    for work in WorkType::ALL {
        assert!(!Price::of(work, Bounds::ALWAYS_1).is_free());
    }
}

#[test]
fn of_fills_a_single_slot() {
    let p = Price::of(WorkType::LocalCall, Bounds::ALWAYS_1);
    for (work, bounds) in p.iter() {
        if work == WorkType::LocalCall {
            assert_eq!(bounds, Bounds::ALWAYS_1);
        } else {
            assert!(bounds.is_always_zero());
        }
    }
}

#[test]
fn plus_adds_slotwise() {
    let a = Price::of(WorkType::InstanceAccess, Bounds::ALWAYS_1);
    let c = Price::of(WorkType::BulkJoin, Bounds::ALWAYS_1);
    let sum = a + c + a;
    assert_eq!(sum.get(WorkType::InstanceAccess), b(2.0, 2.0, 2.0, 2.0));
    assert_eq!(sum.get(WorkType::BulkJoin), Bounds::ALWAYS_1);
    assert_eq!(sum.get(WorkType::LocalCall), Bounds::ALWAYS_0);
}

#[test]
fn times_variants() {
    let p = Price::of(WorkType::TrivialReturn, b(1.0, 2.0, 3.0, 4.0))
        .with(WorkType::EfficientRemoteCall, Bounds::ALWAYS_1);
    let q = b(0.0, 10.0, 50.0, 100.0);

    let by_bounds = p * q;
    assert_eq!(by_bounds.get(WorkType::TrivialReturn), b(0.0, 20.0, 150.0, 400.0));
    assert_eq!(by_bounds.get(WorkType::EfficientRemoteCall), q);

    let scaled = p * 2.0;
    assert_eq!(scaled.get(WorkType::TrivialReturn), b(2.0, 4.0, 6.0, 8.0));

    let factors = Price::of(WorkType::TrivialReturn, Bounds::ALWAYS_1);
    let slotwise = p * factors;
    assert_eq!(slotwise.get(WorkType::TrivialReturn), b(1.0, 2.0, 3.0, 4.0));
    assert!(slotwise.get(WorkType::EfficientRemoteCall).is_always_zero());
}

#[test]
fn work_type_ids_round_trip() {
    for work in WorkType::ALL {
        assert_eq!(WorkType::from_id(work.id()), Some(work));
        assert_eq!(WorkType::ALL[work.index()], work);
    }
    assert_eq!(WorkType::from_id("slowest"), None);
    assert_eq!(WorkType::max_heading_len(), 5);
}

#[test]
fn serializes_by_work_type_id() {
    let p = Price::of(WorkType::BulkJoin, Bounds::ALWAYS_1);
    let json = serde_json::to_value(p).unwrap();
    assert_eq!(json["join"]["avg"], 1.0);
    assert_eq!(json["access"]["max"], 0.0);
    assert_eq!(json.as_object().unwrap().len(), WorkType::COUNT);
}
