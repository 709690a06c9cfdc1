use indoc::indoc;

use super::printer::format_quantity;
use crate::{Environment, Invoice, InvoicePrinter};

const SHOP: &str = indoc! {r#"
    type Query { shop: Shop! }
    type Shop @costqlResource { name: String items: [Item] @costql(q: {const: 3}, unit: {local: {const: 1}, access: {const: 0}}) }
    type Item { price: Float }
"#};

#[test]
fn render_invoice() {
    let env = Environment::from_sdl(SHOP).unwrap();
    let invoice = env.invoice_str("{ shop { name items { price } } }").unwrap();

    insta::assert_snapshot!(InvoicePrinter::new(&env, &invoice).render(), @r"
    ===================================================================================================
    RESOURCE                 Raw#         Basic         Local         Joins          Fast          Slow
    ---------------------------------------------------------------------------------------------------
    Shop        Min             1
                Avg             1
                95%             1
                Max             1
    ===================================================================================================

    ===================================================================================================
    PART                     Raw#         Basic         Local         Joins          Fast          Slow
    ---------------------------------------------------------------------------------------------------
    Item        Min             3
                Avg             3
                95%             3
                Max             3
    ---------------------------------------------------------------------------------------------------
    Query       Min             1
                Avg             1
                95%             1
                Max             1
    ---------------------------------------------------------------------------------------------------
    TOTAL       Min             4
                Avg             4
                95%             4
                Max             4
    ===================================================================================================

    ===================================================================================================
    FIELD                    Raw#         Basic         Local         Joins          Fast          Slow
    ---------------------------------------------------------------------------------------------------
    Item.price  Min                                         3
                Avg                                         3
                95%                                         3
                Max                                         3
    ---------------------------------------------------------------------------------------------------
    Query.shop  Min                                                                     1
                Avg                                                                     1
                95%                                                                     1
                Max                                                                     1
    ---------------------------------------------------------------------------------------------------
    Shop.items  Min                                         1
                Avg                                         1
                95%                                         1
                Max                                         1
    ---------------------------------------------------------------------------------------------------
    Shop.name   Min                                         1
                Avg                                         1
                95%                                         1
                Max                                         1
    ---------------------------------------------------------------------------------------------------
    TOTAL       Min                                         5                           1
                Avg                                         5                           1
                95%                                         5                           1
                Max                                         5                           1
    ===================================================================================================

    ===================================================================================================
    GRAND TOTAL              Raw#         Basic         Local         Joins          Fast          Slow
    ---------------------------------------------------------------------------------------------------
                Min             5                           5                           1
                Avg             5                           5                           1
                95%             5                           5                           1
                Max             5                           5                           1
    ===================================================================================================

    LEGEND:
     - Raw#:  Total count of instance accesses.
     - Basic: Trivial derivations from prefetched data.
     - Local: Same-machine in- or inter-process calls.
     - Joins: Bulk data gathers such as DB joins.
     - Fast:  Efficient remote API calls, e.g. DB, GraphQL.
     - Slow:  Inefficient remote API calls, e.g. REST.
     - Min:   Minimum quantity in normal conditions.
     - Avg:   Average quantity in normal conditions.
     - 95%:   95% percentile, >= 95% of expected values.
     - Max:   Maximum, accounting for built-in constraints.
    ");
}

#[test]
fn empty_sections() {
    let env = Environment::from_sdl(SHOP).unwrap();
    let invoice = Invoice::new();
    let text = InvoicePrinter::new(&env, &invoice).name_width(4).column_width(6).render();

    assert_eq!(text.matches("(none)").count(), 3);
    assert!(text.lines().any(|line| line == "RESOURCE      Raw# Basic Local Joins  Fast  Slow"), "{text}");
    assert_eq!(text.lines().next(), Some("=".repeat(4 + 4 + 6 * 6).as_str()));
}

#[test]
fn name_column_fits_longest_name() {
    let env = Environment::from_sdl("type Query { aVeryLongFieldName: Int }").unwrap();
    let invoice = env.invoice_str("{ aVeryLongFieldName }").unwrap();
    let text = InvoicePrinter::new(&env, &invoice).render();

    // `Query.aVeryLongFieldName` plus one separating space.
    let rule = text.lines().next().unwrap();
    assert_eq!(rule.len(), 25 + 4 + 6 * 14);
    assert!(text.contains("Query.aVeryLongFieldName  Min"), "{text}");
}

#[test]
fn quantities() {
    assert_eq!(format_quantity(0.0), "0");
    assert_eq!(format_quantity(0.4), "0");
    assert_eq!(format_quantity(0.5), "1");
    assert_eq!(format_quantity(999.5), "1,000");
    assert_eq!(format_quantity(1_234_567.4), "1,234,567");
    assert_eq!(format_quantity(-1234.0), "-1,234");
}
