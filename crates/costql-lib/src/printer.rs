//! Tabular text rendering of an invoice.

use std::fmt::{self, Write};

use costql_core::{Bounds, Price, WorkType};
use indexmap::IndexMap;

use crate::environment::Environment;
use crate::invoice::Invoice;

const DEFAULT_NAME_WIDTH: usize = 10;
const DEFAULT_COLUMN_WIDTH: usize = 14;

const LEGEND_POINTS: [(&str, &str); 4] = [
    ("Min:", "Minimum quantity in normal conditions."),
    ("Avg:", "Average quantity in normal conditions."),
    ("95%:", "95% percentile, >= 95% of expected values."),
    ("Max:", "Maximum, accounting for built-in constraints."),
];

/// Renders resource, part and field tables with subtotals, a grand total and
/// a legend. The name column widens to fit the longest entry.
pub struct InvoicePrinter<'a> {
    env: &'a Environment,
    invoice: &'a Invoice,
    name_width: usize,
    column_width: usize,
}

impl<'a> InvoicePrinter<'a> {
    pub fn new(env: &'a Environment, invoice: &'a Invoice) -> Self {
        Self {
            env,
            invoice,
            name_width: DEFAULT_NAME_WIDTH,
            column_width: DEFAULT_COLUMN_WIDTH,
        }
    }

    /// Minimum width of the name column.
    pub fn name_width(mut self, width: usize) -> Self {
        self.name_width = width;
        self
    }

    pub fn column_width(mut self, width: usize) -> Self {
        self.column_width = width;
        self
    }

    pub fn render(&self) -> String {
        let mut out = String::new();
        self.format(&mut out).expect("String write never fails");
        out
    }

    pub fn format(&self, w: &mut impl Write) -> fmt::Result {
        let env = self.env;
        let resources = sorted(
            self.invoice
                .resource_costs()
                .iter()
                .map(|(&id, &p)| (env.ty(id).name(), p)),
        );
        let parts = sorted(
            self.invoice
                .part_costs()
                .iter()
                .map(|(&id, &p)| (env.ty(id).name(), p)),
        );
        let fields = sorted(
            self.invoice
                .field_costs()
                .iter()
                .map(|(&id, &p)| (env.field(id).qualified_name(), p)),
        );

        let longest = resources
            .keys()
            .chain(parts.keys())
            .chain(fields.keys())
            .map(|name| name.chars().count() + 1)
            .max()
            .unwrap_or(0);
        let table = Table {
            name_width: self.name_width.max(longest),
            column_width: self.column_width,
        };

        let mut total = Price::FREE;
        total += table.section(w, "Resource", &resources)?;
        writeln!(w)?;
        total += table.section(w, "Part", &parts)?;
        writeln!(w)?;
        total += table.section(w, "Field", &fields)?;

        writeln!(w)?;
        table.double_rule(w)?;
        table.header(w, "GRAND TOTAL")?;
        table.row(w, "", total, true)?;
        writeln!(w)?;

        writeln!(w, "LEGEND:")?;
        let heading_width = WorkType::max_heading_len() + 2;
        for work in WorkType::ALL {
            let label = format!("{}:", work.heading());
            writeln!(w, " - {label:<heading_width$}{}", work.description())?;
        }
        for (label, text) in LEGEND_POINTS {
            writeln!(w, " - {label:<heading_width$}{text}")?;
        }
        Ok(())
    }
}

fn sorted<'n>(entries: impl Iterator<Item = (&'n str, Price)>) -> IndexMap<&'n str, Price> {
    let mut named: IndexMap<&str, Price> = entries.collect();
    named.sort_keys();
    named
}

struct Table {
    name_width: usize,
    column_width: usize,
}

impl Table {
    fn line_width(&self) -> usize {
        self.name_width + 1 + 3 + WorkType::COUNT * self.column_width
    }

    fn double_rule(&self, w: &mut impl Write) -> fmt::Result {
        writeln!(w, "{}", "=".repeat(self.line_width()))
    }

    fn single_rule(&self, w: &mut impl Write) -> fmt::Result {
        writeln!(w, "{}", "-".repeat(self.line_width()))
    }

    fn header(&self, w: &mut impl Write, title: &str) -> fmt::Result {
        let mut line = format!("{title:<width$}    ", width = self.name_width);
        for work in WorkType::ALL {
            write!(line, "{:>width$}", work.heading(), width = self.column_width)?;
        }
        writeln!(w, "{}", line.trim_end())?;
        self.single_rule(w)
    }

    fn section(&self, w: &mut impl Write, title: &str, items: &IndexMap<&str, Price>) -> Result<Price, fmt::Error> {
        self.double_rule(w)?;
        self.header(w, &title.to_uppercase())?;
        if items.is_empty() {
            writeln!(w, "(none)")?;
            return Ok(Price::FREE);
        }

        let mut subtotal = Price::FREE;
        for (name, &price) in items {
            subtotal += price;
            self.row(w, name, price, items.len() == 1)?;
        }
        if items.len() > 1 {
            self.row(w, "TOTAL", subtotal, true)?;
        }
        Ok(subtotal)
    }

    fn row(&self, w: &mut impl Write, name: &str, price: Price, bottom: bool) -> fmt::Result {
        let points: [(&str, fn(&Bounds) -> f64); 4] = [
            ("Min", Bounds::min),
            ("Avg", Bounds::avg),
            ("95%", Bounds::p95),
            ("Max", Bounds::max),
        ];
        for (i, (label, point)) in points.into_iter().enumerate() {
            let name = if i == 0 { name } else { "" };
            let mut line = format!("{name:<width$} {label}", width = self.name_width);
            for (_, bounds) in price.iter() {
                let cell = if bounds.is_always_zero() {
                    String::new()
                } else {
                    format_quantity(point(&bounds))
                };
                write!(line, "{cell:>width$}", width = self.column_width)?;
            }
            writeln!(w, "{}", line.trim_end())?;
        }
        if bottom {
            self.double_rule(w)
        } else {
            self.single_rule(w)
        }
    }
}

/// Rounded half away from zero, with `,` thousands separators.
pub(crate) fn format_quantity(value: f64) -> String {
    let rounded = value.round();
    if !rounded.is_finite() {
        return rounded.to_string();
    }
    let digits = format!("{:.0}", rounded.abs());
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    if rounded < 0.0 {
        format!("-{grouped}")
    } else {
        grouped
    }
}
