use costql_core::{Bounds, Price, WorkType};

use crate::{Environment, Invoice};

fn env() -> Environment {
    Environment::from_sdl("type Store @costqlResource { name: String } type Query { store: Store }").unwrap()
}

fn access(n: f64) -> Price {
    Price::of(WorkType::InstanceAccess, Bounds::constant(n).unwrap())
}

#[test]
fn type_costs_are_routed() {
    let env = env();
    let store = env.type_by_name("Store").unwrap();
    let query = env.query_type().unwrap();

    let mut invoice = Invoice::new();
    invoice.add_type_cost(store, access(1.0));
    invoice.add_type_cost(query, access(2.0));

    assert_eq!(invoice.resource_costs().len(), 1);
    assert_eq!(invoice.part_costs().len(), 1);
    assert_eq!(invoice.type_cost(store.id()), Some(access(1.0)));
    assert_eq!(invoice.type_cost(query.id()), Some(access(2.0)));
    assert!(invoice.field_cost(env.field_by_name("Query", "store").unwrap().id()).is_none());
}

#[test]
fn repeated_keys_accumulate() {
    let env = env();
    let field = env.field_by_name("Query", "store").unwrap().id();

    let mut invoice = Invoice::new();
    invoice.add_field_cost(field, access(1.0));
    invoice.add_field_cost(field, access(4.0));

    assert_eq!(invoice.field_cost(field), Some(access(5.0)));
    assert_eq!(invoice.total(), access(5.0));
}

#[test]
fn merge_adds_shared_keys() {
    let env = env();
    let query = env.query_type().unwrap();
    let field = env.field_by_name("Query", "store").unwrap().id();

    let mut a = Invoice::new();
    a.add_type_cost(query, access(1.0));
    let mut b = Invoice::new();
    b.add_type_cost(query, access(2.0));
    b.add_field_cost(field, access(3.0));

    let sum = a.clone() + b.clone();
    assert_eq!(sum.type_cost(query.id()), Some(access(3.0)));
    assert_eq!(sum.field_cost(field), Some(access(3.0)));
    assert_eq!(sum.total(), access(6.0));

    a += &b;
    assert_eq!(a, sum);
}

#[test]
fn equality_ignores_insertion_order() {
    let env = env();
    let store = env.type_by_name("Store").unwrap();
    let query = env.query_type().unwrap();

    let mut a = Invoice::new();
    a.add_type_cost(store, access(1.0));
    a.add_type_cost(query, access(2.0));
    let mut b = Invoice::new();
    b.add_type_cost(query, access(2.0));
    b.add_type_cost(store, access(1.0));

    assert_eq!(a, b);
}

#[test]
fn scaling_applies_to_every_entry() {
    let env = env();
    let store = env.type_by_name("Store").unwrap();
    let field = env.field_by_name("Query", "store").unwrap().id();

    let mut invoice = Invoice::new();
    invoice.add_type_cost(store, access(2.0));
    invoice.add_field_cost(field, access(3.0));

    let scaled = invoice.clone() * 2.0;
    assert_eq!(scaled.type_cost(store.id()), Some(access(4.0)));
    assert_eq!(scaled.field_cost(field), Some(access(6.0)));

    let q = Bounds::new(0.0, 1.0, 2.0, 3.0).unwrap();
    let by_bounds = invoice.clone().times_bounds(q);
    assert_eq!(
        by_bounds.field_cost(field),
        Some(Price::of(WorkType::InstanceAccess, Bounds::new(0.0, 3.0, 6.0, 9.0).unwrap()))
    );

    let by_price = invoice * access(10.0);
    assert_eq!(by_price.total(), access(50.0));
}

#[test]
fn empty() {
    let invoice = Invoice::new();
    assert!(invoice.is_empty());
    assert_eq!(invoice.total(), Price::FREE);
}
