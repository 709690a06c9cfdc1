use costql_core::{Bounds, Price, StepPricer, WorkType};
use costql_syntax::ast::TypeSystemDefinition;

use crate::Error;
use crate::config::EnvironmentConfig;
use crate::cost::{DeclaredCost, JoinHint};

fn declare_with(sdl: &str, config: &EnvironmentConfig) -> crate::Result<DeclaredCost> {
    let document = costql_syntax::parse_schema(sdl).unwrap();
    let TypeSystemDefinition::Type(def) = &document.definitions[0] else {
        panic!("expected a type definition");
    };
    DeclaredCost::parse(&def.name, &def.directives, config)
}

fn declare(sdl: &str) -> crate::Result<DeclaredCost> {
    declare_with(sdl, &EnvironmentConfig::default())
}

fn error(sdl: &str) -> String {
    declare(sdl).unwrap_err().to_string()
}

#[test]
fn no_directive_declares_nothing() {
    assert_eq!(declare("scalar S @other").unwrap(), DeclaredCost::default());
}

#[test]
fn free_marker() {
    let cost = declare("scalar S @costqlFree").unwrap();

    assert!(cost.free);
    assert_eq!(cost.cardinality, Some(Bounds::ALWAYS_1));
    assert_eq!(cost.pricing, Some(StepPricer::FREE));
}

#[test]
fn free_and_cost_conflict() {
    insta::assert_snapshot!(
        error("scalar S @costql(always: true) @costqlFree"),
        @"`S` cannot carry both @costqlFree and @costql"
    );
}

#[test]
fn duplicate_cost_directive() {
    let err = declare("scalar S @costql(always: true) @costql(shared: true)").unwrap_err();
    assert!(matches!(err, Error::DuplicateDirective { .. }), "{err:?}");
}

#[test]
fn flags_are_tri_state() {
    let cost = declare("scalar S @costql(always: true, shared: null)").unwrap();

    assert_eq!(cost.always, Some(true));
    assert_eq!(cost.shared, None);
    assert_eq!(cost.cardinality, None);
}

#[test]
fn cost_directive_without_prices_is_free() {
    for sdl in ["scalar S @costql(q: {const: 3})", "scalar S @costql(shared: true)", "scalar S @costql"] {
        let cost = declare(sdl).unwrap();
        assert!(!cost.free, "{sdl}");
        assert_eq!(cost.pricing, Some(StepPricer::FREE), "{sdl}");
    }
}

#[test]
fn constant_cardinality() {
    let cost = declare("scalar S @costql(q: {const: 3})").unwrap();
    assert_eq!(cost.cardinality, Some(Bounds::constant(3.0).unwrap()));
}

#[test]
fn constant_with_points_is_ambiguous() {
    insta::assert_snapshot!(
        error("scalar S @costql(q: {const: 1, max: 2})"),
        @"ambiguous bounds on `S`: `const` excludes min, avg, p95 and max"
    );
}

#[test]
fn unordered_cardinality() {
    let err = declare("scalar S @costql(q: {min: 5, avg: 1, max: 10})").unwrap_err();
    assert!(matches!(err, Error::InvalidBounds { .. }), "{err:?}");
}

#[test]
fn undefined_cardinality_falls_back() {
    let cost = declare("scalar S @costql(q: {min: 2})").unwrap();
    assert_eq!(cost.cardinality, None);
}

#[test]
fn unit_price_defaults_access_to_one() {
    let cost = declare("scalar S @costql(unit: {fast: {const: 2}})").unwrap();

    let unit = Price::of(WorkType::InstanceAccess, Bounds::ALWAYS_1)
        .with(WorkType::EfficientRemoteCall, Bounds::constant(2.0).unwrap());
    assert_eq!(cost.pricing, Some(StepPricer::new(Price::FREE, unit, None)));
}

#[test]
fn undefined_price_slot_takes_default() {
    let cost = declare("scalar S @costql(base: {fast: {min: 1}, access: {const: 0}})").unwrap();

    let pricing = cost.pricing.unwrap();
    assert!(pricing.base().is_free());
    assert!(pricing.unit().is_free());
}

#[test]
fn step_alone_enables_pricing() {
    let cost = declare("scalar S @costql(maxUnitsPerBase: 25)").unwrap();
    assert_eq!(
        cost.pricing,
        Some(StepPricer::new(Price::FREE, Price::FREE, Some(25.0)))
    );
}

#[test]
fn max_units_per_base_must_be_positive() {
    insta::assert_snapshot!(
        error("scalar S @costql(maxUnitsPerBase: 0)"),
        @"argument `maxUnitsPerBase` on `S` expects a positive number, found int"
    );
    insta::assert_snapshot!(
        error("scalar S @costql(maxUnitsPerBase: -2.5)"),
        @"argument `maxUnitsPerBase` on `S` expects a positive number, found float"
    );
}

#[test]
fn wrong_literal_kind() {
    insta::assert_snapshot!(
        error(r#"scalar S @costql(shared: "yes")"#),
        @"argument `shared` on `S` expects a boolean, found string"
    );
    insta::assert_snapshot!(
        error(r#"scalar S @costql(q: {max: "x"})"#),
        @"argument `q.max` on `S` expects a number, found string"
    );
    insta::assert_snapshot!(
        error("scalar S @costql(unit: 3)"),
        @"argument `unit` on `S` expects an object, found int"
    );
}

#[test]
fn single_join_object_is_a_list() {
    let cost = declare(r#"type T @costql(joins: {fields: "a", autoDepth: 2}) { a: Int }"#).unwrap();

    let expected = JoinHint {
        types: None,
        auto_depth: 2,
        fields: vec!["a".to_owned()],
        sub: Vec::new(),
    };
    assert_eq!(cost.joins, Some(vec![expected]));
}

#[test]
fn nested_join_hints() {
    let cost = declare(
        r#"type T @costql(joins: [{types: ["A", "B"], fields: ["x"], sub: {fields: ["y"]}}]) { a: Int }"#,
    )
    .unwrap();

    let joins = cost.joins.unwrap();
    assert_eq!(joins.len(), 1);
    assert_eq!(joins[0].types, Some(vec!["A".to_owned(), "B".to_owned()]));
    assert_eq!(joins[0].sub.len(), 1);
    assert_eq!(joins[0].sub[0].fields, vec!["y".to_owned()]);
}

#[test]
fn negative_auto_depth() {
    insta::assert_snapshot!(
        error("type T @costql(joins: {autoDepth: -1}) { a: Int }"),
        @"argument `joins.autoDepth` on `T` expects a non-negative int, found int"
    );
}

#[test]
fn renamed_directives() {
    let config = EnvironmentConfig {
        cost_directive: "cost".to_owned(),
        free_directive: "free".to_owned(),
        resource_directive: "resource".to_owned(),
    };

    let cost = declare_with("scalar S @costql(always: true) @cost(shared: true)", &config).unwrap();
    assert_eq!(cost.always, None);
    assert_eq!(cost.shared, Some(true));

    let cost = declare_with("scalar S @free", &config).unwrap();
    assert!(cost.free);
}
