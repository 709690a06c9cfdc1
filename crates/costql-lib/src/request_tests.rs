use std::fmt::Write;

use costql_core::Price;
use indoc::indoc;

use crate::{Environment, Error, Invoice, InvoiceReport};

const SHOP: &str = indoc! {r#"
    type Query { shop: Shop! }
    type Shop @costqlResource { name: String items: [Item] @costql(q: {const: 3}) }
    type Item { price: Float }
"#};

fn env(sdl: &str) -> Environment {
    Environment::from_sdl(sdl).unwrap()
}

fn describe(price: Price) -> String {
    price
        .iter()
        .filter(|(_, b)| !b.is_always_zero())
        .map(|(work, b)| {
            if b.min() == b.max() {
                format!("{} {}", work.id(), b.min())
            } else {
                format!("{} {}/{}/{}/{}", work.id(), b.min(), b.avg(), b.p95(), b.max())
            }
        })
        .collect::<Vec<_>>()
        .join(", ")
}

fn summary(env: &Environment, invoice: &Invoice) -> String {
    let report = InvoiceReport::new(env, invoice);
    let mut out = String::new();
    let sections = [
        ("resource", &report.resources),
        ("part", &report.parts),
        ("field", &report.fields),
    ];
    for (section, lines) in sections {
        for line in lines {
            writeln!(out, "{section} {}: {}", line.name, describe(line.cost)).unwrap();
        }
    }
    out.trim_end().to_owned()
}

fn priced(sdl: &str, request: &str) -> String {
    let env = env(sdl);
    let invoice = env.invoice_str(request).unwrap();
    summary(&env, &invoice)
}

fn error(sdl: &str, request: &str) -> String {
    env(sdl).invoice_str(request).unwrap_err().to_string()
}

#[test]
fn nested_selection() {
    insta::assert_snapshot!(priced(SHOP, "{ shop { name items { price } } }"), @r"
    resource Shop: access 1
    part Item: access 3
    part Query: access 1
    field Item.price: local 3
    field Query.shop: fast 1
    field Shop.name: local 1
    ");
}

#[test]
fn default_derived_invoice_is_deterministic() {
    let env = env("type Query { a: A } type A { b: String cs: [A] }");
    let first = env.invoice_str("{ a { b cs { b } } }").unwrap();
    let second = env.invoice_str("{ a { b cs { b } } }").unwrap();

    assert!(!first.is_empty());
    assert_eq!(first, second);
    assert_eq!(summary(&env, &first), summary(&env, &second));
}

#[test]
fn repeated_fields_merge() {
    let plain = priced(SHOP, "{ shop { name items { price } } }");

    let spread = priced(
        SHOP,
        indoc! {r#"
            { shop { name } ...Rest }
            fragment Rest on Query { shop { name items { price } } }
        "#},
    );
    let inline = priced(SHOP, "{ shop { name } ... on Query { shop { items { price } } } ... { shop { name } } }");
    let aliased = priced(SHOP, "{ a: shop { name } b: shop { items { price } } }");

    assert_eq!(spread, plain);
    assert_eq!(inline, plain);
    assert_eq!(aliased, plain);
}

#[test]
fn always_recomputed_fields_count_each_alias() {
    let sdl = indoc! {r#"
        type Query { shop: Shop! @costql(always: true, unit: {local: {const: 1}, access: {const: 0}}) }
        type Shop { name: String }
    "#};

    insta::assert_snapshot!(priced(sdl, "{ a: shop { name } b: shop { name } shop { name } }"), @r"
    part Query: access 1
    part Shop: access 3
    field Query.shop: local 3
    field Shop.name: local 3
    ");
}

#[test]
fn abstract_targets_split_quantity() {
    let sdl = indoc! {r#"
        type A { x: Int }
        type B { x: Int }
        union Any = A | B
        type Query { any: Any! }
    "#};

    insta::assert_snapshot!(priced(sdl, "{ any { ... on A { x } } }"), @r"
    part A: access 0.5
    part B: access 0.5
    part Query: access 1
    field A.x: local 0.5
    field Query.any: local 1
    ");
}

#[test]
fn joined_fields_are_bulk_priced() {
    let sdl = indoc! {r#"
        type Query { shop: Shop! @costql(joins: {fields: "items"}) }
        type Shop @costqlResource { name: String items: [Item] @costql(q: {const: 3}, unit: {local: {const: 1}}) }
        type Item { price: Float }
    "#};

    insta::assert_snapshot!(priced(sdl, "{ shop { name items { price } } }"), @r"
    resource Shop: access 1, join 1
    part Item: access 3, join 3
    part Query: access 1
    field Item.price: local 3
    field Shop.items: access 1, join 1
    field Shop.name: local 1
    ");
}

#[test]
fn free_elements() {
    let sdl = indoc! {r#"
        type Query { shop: Shop! }
        type Shop @costqlResource { name: String @costqlFree items: [Item] @costql(q: {const: 3}) }
        type Item @costqlFree { price: Float }
    "#};

    insta::assert_snapshot!(priced(sdl, "{ shop { name items { price } } }"), @r"
    resource Shop: access 1
    part Item: access 3
    part Query: access 1
    field Item.price: local 3
    field Query.shop: fast 1
    ");
}

#[test]
fn cost_directive_without_prices_is_free() {
    let sdl = indoc! {r#"
        type Query { items: [Item] @costql(q: {const: 3}) one: Item @costql(shared: true) }
        type Item { price: Float }
    "#};
    let summary = priced(sdl, "{ items { price } one { price } }");

    assert!(summary.contains("field Item.price"), "{summary}");
    assert!(!summary.contains("field Query."), "{summary}");
}

#[test]
fn inline_fragments_apply_to_their_exact_type() {
    let sdl = indoc! {r#"
        interface Node { id: ID }
        type User implements Node { id: ID name: String }
        type Query { user: User! }
    "#};

    insta::assert_snapshot!(priced(sdl, "{ user { ... on Node { id } } }"), @r"
    part Query: access 1
    part User: access 1
    field Query.user: local 1
    ");
    insta::assert_snapshot!(priced(sdl, "{ user { ... on User { id } } }"), @r"
    part Query: access 1
    part User: access 1
    field Query.user: local 1
    field User.id: local 1
    ");

    // Spreads still match by assignability.
    let spread = priced(sdl, "{ user { ...N } } fragment N on Node { id }");
    assert!(spread.contains("field User.id: local 1"), "{spread}");
}

#[test]
fn introspection_fields_are_ignored() {
    assert_eq!(
        priced(SHOP, "{ __typename shop { __typename name } }"),
        priced(SHOP, "{ shop { name } }")
    );
}

#[test]
fn operations_are_summed() {
    let env = env(SHOP);
    let once = env.invoice_str("{ shop { name } }").unwrap();
    let twice = env
        .invoice_str("query A { shop { name } } query B { shop { name } }")
        .unwrap();

    assert_eq!(twice, once.clone() + once);
}

#[test]
fn request_accessors() {
    let env = env(SHOP);
    let request = env
        .request_str("query A { ...F } fragment F on Query { shop { name } } fragment F on Query { shop { items { price } } }")
        .unwrap();

    assert_eq!(request.operations().len(), 1);
    assert_eq!(request.fragments("F").len(), 2);
    assert!(request.fragments("G").is_empty());
    assert!(std::ptr::eq(request.environment(), &env));
}

#[test]
fn unknown_field() {
    insta::assert_snapshot!(error(SHOP, "{ shop { nope } }"), @"type `Shop` has no field `nope`");
}

#[test]
fn unknown_fragment() {
    insta::assert_snapshot!(error(SHOP, "{ ...Missing }"), @"unknown fragment `Missing`");
}

#[test]
fn fragment_cycles() {
    insta::assert_snapshot!(
        error(SHOP, "{ ...A } fragment A on Query { ...B } fragment B on Query { shop { ...A } }"),
        @"fragment `A` spreads itself"
    );

    // Unused fragments are checked too.
    let err = env(SHOP)
        .request_str("{ shop { name } } fragment Loop on Shop { ...Loop }")
        .unwrap_err();
    assert!(matches!(err, Error::FragmentCycle(ref name) if name == "Loop"), "{err:?}");
}

#[test]
fn unknown_type_condition() {
    insta::assert_snapshot!(
        error(SHOP, "{ ... on Nope { shop { name } } }"),
        @"unknown type `Nope` referenced by `Query`"
    );
}

#[test]
fn missing_root() {
    insta::assert_snapshot!(
        error(SHOP, "mutation { shop { name } }"),
        @"no root type for mutation operations"
    );
}

#[test]
fn syntax_errors_propagate() {
    let err = env(SHOP).invoice_str("{ shop { ").unwrap_err();
    assert!(matches!(err, Error::Syntax(_)), "{err:?}");
}
